//! Periodic service announcer.
//!
//! Sends one announcement datagram per second to the multicast group. There
//! is no acknowledgment and no retry for a lost packet; the next announcement
//! is at most a second away.

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{interval, MissedTickBehavior};
use tracing::warn;

use crate::error::AnnounceError;
use crate::wire::encode_announcement;
use crate::{DEFAULT_MULTICAST_ADDR, DEFAULT_MULTICAST_PORT};

/// Cadence of announcements.
pub const ANNOUNCE_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration for an [`Announcer`].
///
/// The announced port is not required to match anything actually listening;
/// there is no coupling between the announcer and the service itself.
#[derive(Debug, Clone)]
pub struct AnnouncerConfig {
    pub service_name: String,
    pub service_port: u16,
    pub multicast_addr: Ipv4Addr,
    pub multicast_port: u16,
    pub interval: Duration,
}

impl AnnouncerConfig {
    pub fn new(service_name: impl Into<String>, service_port: u16) -> Self {
        Self {
            service_name: service_name.into(),
            service_port,
            multicast_addr: DEFAULT_MULTICAST_ADDR,
            multicast_port: DEFAULT_MULTICAST_PORT,
            interval: ANNOUNCE_INTERVAL,
        }
    }

    pub fn multicast_addr(mut self, addr: Ipv4Addr) -> Self {
        self.multicast_addr = addr;
        self
    }

    pub fn multicast_port(mut self, port: u16) -> Self {
        self.multicast_port = port;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Announces a named service to the multicast group on a fixed cadence.
#[derive(Debug)]
pub struct Announcer {
    socket: UdpSocket,
    target: SocketAddrV4,
    config: AnnouncerConfig,
}

impl Announcer {
    /// Validate the config and open the outbound socket. Send failures are
    /// absorbed later by the announce loop.
    pub async fn new(config: AnnouncerConfig) -> Result<Self, AnnounceError> {
        if config.interval.is_zero() {
            // tokio::time::interval panics on a zero period
            return Err(AnnounceError::InvalidConfiguration("interval must be > 0"));
        }

        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
            .await
            .map_err(AnnounceError::Bind)?;
        // Loopback delivery, so discoverers on the same machine see us.
        socket
            .set_multicast_loop_v4(true)
            .map_err(AnnounceError::Bind)?;

        let target = SocketAddrV4::new(config.multicast_addr, config.multicast_port);
        Ok(Self {
            socket,
            target,
            config,
        })
    }

    /// Announce forever: once immediately, then on every tick.
    ///
    /// Send and host-name-resolution failures are logged and the cadence
    /// continues. Dropping this future stops the announcer; there is no other
    /// stop protocol.
    pub async fn run(&self) {
        let mut ticker = interval(self.config.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            // The first tick completes immediately.
            ticker.tick().await;
            self.announce_once().await;
        }
    }

    async fn announce_once(&self) {
        // Resolved per send, so a changed host name is picked up.
        let host_name = match hostname::get() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                warn!("failed to resolve local host name: {}", e);
                return;
            }
        };

        let message = encode_announcement(
            &self.config.service_name,
            &host_name,
            self.config.service_port,
        );

        if let Err(e) = self.socket.send_to(message.as_bytes(), self.target).await {
            warn!("failed to send announcement to {}: {}", self.target, e);
        }
    }
}
