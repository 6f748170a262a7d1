//! Multicast listener that maintains the set of live service providers.
//!
//! The discoverer joins the multicast group, decodes announcement datagrams,
//! filters them by service name and feeds matching records into a
//! [`DiscoverySet`]. A single idle-check timer is kept armed at the oldest
//! record's expiry instant, so eviction is exact without periodic scans and
//! the loop quiesces entirely while the set is empty.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use tokio::net::UdpSocket;
use tokio::time::sleep_until;
use tracing::{debug, warn};

use super::store::DiscoverySet;
use crate::error::DiscoverError;
use crate::record::ServiceRecord;
use crate::socket::bind_reusable;
use crate::wire::decode_announcement;
use crate::{DEFAULT_MULTICAST_ADDR, DEFAULT_MULTICAST_PORT};

/// Default idle timeout: records not refreshed for this long are evicted.
pub const DEFAULT_MAX_IDLE: Duration = Duration::from_secs(30);

/// Default cap on the number of discovered services held at once.
pub const DEFAULT_MAX_SERVICES: usize = 10;

/// Largest payload a single UDP datagram can carry.
const MAX_DATAGRAM_LEN: usize = 65_507;

/// Configuration for a [`Discoverer`].
#[derive(Debug, Clone)]
pub struct DiscovererConfig {
    /// Only announcements for this service reach the set; everything else is
    /// dropped.
    pub listen_for_service: String,
    /// Records not refreshed within this duration are evicted. Must be > 0.
    pub max_idle: Duration,
    /// Upper bound on the set; the oldest record is dropped on overflow.
    /// Must be > 0.
    pub max_services: usize,
    pub multicast_addr: Ipv4Addr,
    pub multicast_port: u16,
}

impl DiscovererConfig {
    pub fn new(listen_for_service: impl Into<String>) -> Self {
        Self {
            listen_for_service: listen_for_service.into(),
            max_idle: DEFAULT_MAX_IDLE,
            max_services: DEFAULT_MAX_SERVICES,
            multicast_addr: DEFAULT_MULTICAST_ADDR,
            multicast_port: DEFAULT_MULTICAST_PORT,
        }
    }

    pub fn max_idle(mut self, max_idle: Duration) -> Self {
        self.max_idle = max_idle;
        self
    }

    pub fn max_services(mut self, max_services: usize) -> Self {
        self.max_services = max_services;
        self
    }

    pub fn multicast_addr(mut self, addr: Ipv4Addr) -> Self {
        self.multicast_addr = addr;
        self
    }

    pub fn multicast_port(mut self, port: u16) -> Self {
        self.multicast_port = port;
        self
    }
}

/// Listens for service announcements and tracks the currently-live providers.
#[derive(Debug)]
pub struct Discoverer {
    socket: UdpSocket,
    listen_for_service: String,
    services: DiscoverySet,
}

impl Discoverer {
    /// Bind the multicast socket and join the group.
    ///
    /// Bind/join failures and zero limits are constructor errors; nothing
    /// about the receive path is fatal after this succeeds.
    pub fn new(config: DiscovererConfig) -> Result<Self, DiscoverError> {
        if config.max_services == 0 {
            return Err(DiscoverError::InvalidConfiguration("max_services must be > 0"));
        }
        if config.max_idle.is_zero() {
            return Err(DiscoverError::InvalidConfiguration("max_idle must be > 0"));
        }

        let std_socket = bind_reusable(config.multicast_port).map_err(DiscoverError::Bind)?;
        std_socket
            .join_multicast_v4(&config.multicast_addr, &Ipv4Addr::UNSPECIFIED)
            .map_err(|source| DiscoverError::JoinGroup {
                group: config.multicast_addr,
                source,
            })?;
        let socket = UdpSocket::from_std(std_socket).map_err(DiscoverError::Bind)?;

        Ok(Self {
            socket,
            listen_for_service: config.listen_for_service,
            services: DiscoverySet::new(config.max_idle, config.max_services),
        })
    }

    /// Listen until cancelled, invoking `on_change` with a snapshot of the
    /// set after every mutation.
    ///
    /// The callback runs inline on this task: invocations are strictly
    /// sequential, and none happen once the returned future is dropped.
    /// Dropping the future also cancels the pending receive and the idle
    /// timer. A slow callback delays datagram processing and idle-eviction
    /// accuracy, so it should not block.
    pub async fn run<F>(&mut self, mut on_change: F) -> Result<(), DiscoverError>
    where
        F: FnMut(&[ServiceRecord]),
    {
        let mut buf = vec![0u8; MAX_DATAGRAM_LEN];

        loop {
            // Rearmed on every iteration, after capacity eviction, so the
            // timer always reflects the oldest surviving record.
            let deadline = self.services.next_deadline();

            tokio::select! {
                received = self.socket.recv_from(&mut buf) => {
                    match received {
                        Ok((len, sender)) => {
                            if self.handle_datagram(&buf[..len], sender) {
                                on_change(&self.services.snapshot());
                            }
                        }
                        Err(e) => {
                            // Per-datagram failure; re-arm the receive.
                            warn!("UDP receive error: {}", e);
                        }
                    }
                }
                _ = idle_deadline(deadline) => {
                    if self.services.remove_idle(Instant::now()) {
                        on_change(&self.services.snapshot());
                    }
                }
            }
        }
    }

    /// Listen for a fixed duration and return the final set.
    pub async fn collect_for(
        config: DiscovererConfig,
        duration: Duration,
    ) -> Result<Vec<ServiceRecord>, DiscoverError> {
        let mut discoverer = Self::new(config)?;
        let mut latest = Vec::new();

        let outcome =
            tokio::time::timeout(duration, discoverer.run(|services| latest = services.to_vec()))
                .await;

        match outcome {
            Ok(Err(e)) => Err(e),
            // run() never returns Ok today, but the elapsed timeout is the
            // normal exit: hand back whatever the last callback saw.
            Ok(Ok(())) | Err(_) => Ok(latest),
        }
    }

    /// Decode one datagram and apply it to the set. Returns true if the set
    /// changed.
    fn handle_datagram(&mut self, data: &[u8], sender: SocketAddr) -> bool {
        let announcement = match decode_announcement(data) {
            Ok(a) => a,
            Err(e) => {
                warn!("dropping announcement from {}: {}", sender, e);
                return false;
            }
        };

        if announcement.service_name != self.listen_for_service {
            debug!("ignoring announcement for service {:?}", announcement.service_name);
            return false;
        }

        // Address from the packet's sender, port from the payload.
        let endpoint = SocketAddr::new(sender.ip(), announcement.port);
        self.services.upsert(ServiceRecord {
            service_name: announcement.service_name,
            host_name: announcement.host_name,
            endpoint,
            last_seen: Instant::now(),
        });

        // Capacity eviction runs before the timer is rearmed by the caller.
        self.services.evict_over_capacity();
        true
    }
}

/// Pending forever when no record can become idle (empty set), otherwise a
/// sleep until the oldest record's expiry.
async fn idle_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at.into()).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_services_is_rejected() {
        let config = DiscovererConfig::new("svc").max_services(0);
        let err = Discoverer::new(config).unwrap_err();
        assert!(matches!(err, DiscoverError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_zero_max_idle_is_rejected() {
        let config = DiscovererConfig::new("svc").max_idle(Duration::ZERO);
        let err = Discoverer::new(config).unwrap_err();
        assert!(matches!(err, DiscoverError::InvalidConfiguration(_)));
    }

    #[tokio::test]
    async fn test_handle_datagram_filters_and_upserts() {
        let config = DiscovererConfig::new("svc").multicast_port(0);
        let mut discoverer = Discoverer::new(config).unwrap();
        let sender: SocketAddr = "192.168.1.20:54321".parse().unwrap();

        // wrong service: dropped silently
        assert!(!discoverer.handle_datagram(b"other:host:80", sender));
        assert!(discoverer.services.is_empty());

        // matching: inserted with the sender's address and the payload port
        assert!(discoverer.handle_datagram(b"svc:host:80", sender));
        let snapshot = discoverer.services.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].endpoint, "192.168.1.20:80".parse().unwrap());

        // refresh: still one record
        assert!(discoverer.handle_datagram(b"svc:host:80", sender));
        assert_eq!(discoverer.services.len(), 1);

        // malformed: no mutation
        assert!(!discoverer.handle_datagram(b"svc:host", sender));
        assert!(!discoverer.handle_datagram(b"svc:host:notaport", sender));
        assert_eq!(discoverer.services.len(), 1);
    }
}
