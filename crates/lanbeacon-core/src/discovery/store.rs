//! The bounded, deduplicated set of discovered services.
//!
//! Two invariants hold after every mutation: the set never holds more than
//! `max_services` records, and no record older than `max_idle` survives past
//! the deadline reported by [`DiscoverySet::next_deadline`]. Idle enforcement
//! is the caller's job (the discoverer arms a timer for the deadline); this
//! module only decides what to evict and when the next eviction is due.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use crate::record::ServiceRecord;

/// Set of discovered services, unique by record identity, iterated in
/// canonical identity order.
#[derive(Debug)]
pub struct DiscoverySet {
    records: BTreeSet<ServiceRecord>,
    max_idle: Duration,
    max_services: usize,
}

impl DiscoverySet {
    /// Create an empty set. Limits are validated by the discoverer's
    /// constructor before this is called.
    pub fn new(max_idle: Duration, max_services: usize) -> Self {
        Self {
            records: BTreeSet::new(),
            max_idle,
            max_services,
        }
    }

    /// Insert a record, or refresh an existing one with the same identity.
    ///
    /// The existing entry must be removed first: records compare equal by
    /// identity alone, so a plain insert would be a no-op and the stale
    /// `last_seen` would survive.
    pub fn upsert(&mut self, record: ServiceRecord) {
        self.records.remove(&record);
        self.records.insert(record);
    }

    /// Drop the oldest records until the set is within `max_services`.
    /// Returns true if anything was evicted.
    pub fn evict_over_capacity(&mut self) -> bool {
        let mut evicted = false;
        while self.records.len() > self.max_services {
            // min_by_key returns the first of equal elements, so ties on
            // last_seen break by canonical identity order.
            let oldest = self
                .records
                .iter()
                .min_by_key(|r| r.last_seen)
                .cloned()
                .expect("set over capacity cannot be empty");
            self.records.remove(&oldest);
            evicted = true;
        }
        evicted
    }

    /// Drop every record whose age has reached `max_idle`. Returns true if
    /// anything was removed.
    pub fn remove_idle(&mut self, now: Instant) -> bool {
        let before = self.records.len();
        let max_idle = self.max_idle;
        self.records.retain(|r| r.age(now) < max_idle);
        self.records.len() != before
    }

    /// The single instant at which some record could next become idle:
    /// the oldest record's `last_seen + max_idle`. `None` when the set is
    /// empty, meaning no timer needs to be armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.records
            .iter()
            .map(|r| r.last_seen)
            .min()
            .map(|oldest| oldest + self.max_idle)
    }

    /// Immutable snapshot in canonical order, for handing to the change
    /// callback.
    pub fn snapshot(&self) -> Vec<ServiceRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_IDLE: Duration = Duration::from_secs(30);

    fn record(host: &str, port: u16, last_seen: Instant) -> ServiceRecord {
        ServiceRecord {
            service_name: "svc".to_string(),
            host_name: host.to_string(),
            endpoint: format!("10.0.0.1:{}", port).parse().unwrap(),
            last_seen,
        }
    }

    #[test]
    fn test_upsert_deduplicates_by_identity() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 10);

        set.upsert(record("host", 80, now));
        set.upsert(record("host", 80, now + Duration::from_secs(1)));
        set.upsert(record("host", 80, now + Duration::from_secs(2)));

        assert_eq!(set.len(), 1);
        let snapshot = set.snapshot();
        assert_eq!(snapshot[0].last_seen, now + Duration::from_secs(2));
    }

    #[test]
    fn test_upsert_keeps_distinct_identities() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 10);

        set.upsert(record("host-a", 80, now));
        set.upsert(record("host-b", 80, now));
        set.upsert(record("host-a", 81, now));

        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_capacity_eviction_drops_oldest() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 2);

        set.upsert(record("old", 80, now));
        set.upsert(record("mid", 80, now + Duration::from_secs(1)));
        set.upsert(record("new", 80, now + Duration::from_secs(2)));
        assert!(set.evict_over_capacity());

        let hosts: Vec<String> = set.snapshot().into_iter().map(|r| r.host_name).collect();
        assert_eq!(hosts, vec!["mid".to_string(), "new".to_string()]);
    }

    #[test]
    fn test_capacity_eviction_breaks_ties_by_identity_order() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 2);

        // All three share last_seen; the first in identity order goes.
        set.upsert(record("aaa", 80, now));
        set.upsert(record("bbb", 80, now));
        set.upsert(record("ccc", 80, now));
        set.evict_over_capacity();

        let hosts: Vec<String> = set.snapshot().into_iter().map(|r| r.host_name).collect();
        assert_eq!(hosts, vec!["bbb".to_string(), "ccc".to_string()]);
    }

    #[test]
    fn test_eviction_noop_within_capacity() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 2);
        set.upsert(record("host", 80, now));
        assert!(!set.evict_over_capacity());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_idle() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(Duration::from_secs(5), 10);

        set.upsert(record("stale", 80, now));
        set.upsert(record("fresh", 80, now + Duration::from_secs(4)));

        assert!(set.remove_idle(now + Duration::from_secs(5)));
        let snapshot = set.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].host_name, "fresh");

        // nothing else is due yet
        assert!(!set.remove_idle(now + Duration::from_secs(5)));
    }

    #[test]
    fn test_next_deadline_tracks_oldest_record() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(Duration::from_secs(5), 10);
        assert_eq!(set.next_deadline(), None);

        set.upsert(record("b", 80, now + Duration::from_secs(1)));
        set.upsert(record("a", 80, now));
        assert_eq!(set.next_deadline(), Some(now + Duration::from_secs(5)));

        // refreshing the oldest record pushes the deadline out
        set.upsert(record("a", 80, now + Duration::from_secs(2)));
        assert_eq!(set.next_deadline(), Some(now + Duration::from_secs(6)));

        set.remove_idle(now + Duration::from_secs(10));
        assert_eq!(set.next_deadline(), None);
    }

    #[test]
    fn test_snapshot_is_in_canonical_order() {
        let now = Instant::now();
        let mut set = DiscoverySet::new(MAX_IDLE, 10);
        set.upsert(record("zzz", 80, now));
        set.upsert(record("aaa", 80, now));
        set.upsert(record("mmm", 80, now));

        let hosts: Vec<String> = set.snapshot().into_iter().map(|r| r.host_name).collect();
        assert_eq!(hosts, vec!["aaa".to_string(), "mmm".to_string(), "zzz".to_string()]);
    }
}
