//! Discovered service records.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// One discovered provider of a service.
///
/// The endpoint address comes from the announcement packet's sender address,
/// not from the payload; only the port is self-reported. A provider cannot
/// redirect discoverers to an address it does not send from.
#[derive(Debug, Clone)]
pub struct ServiceRecord {
    pub service_name: String,
    pub host_name: String,
    pub endpoint: SocketAddr,
    /// When the most recent matching announcement arrived. Not part of the
    /// record's identity.
    pub last_seen: Instant,
}

impl ServiceRecord {
    /// How long ago this record was last refreshed.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_seen)
    }

    fn identity(&self) -> (&str, &str, &SocketAddr) {
        (&self.service_name, &self.host_name, &self.endpoint)
    }
}

// Identity is (service_name, host_name, endpoint). last_seen is excluded so
// that a refreshed record compares equal to the stale entry it replaces.
impl PartialEq for ServiceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for ServiceRecord {}

impl Hash for ServiceRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

// Canonical order for the discovered set. This gives snapshots a stable,
// test-friendly order; it says nothing about freshness.
impl Ord for ServiceRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl PartialOrd for ServiceRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
