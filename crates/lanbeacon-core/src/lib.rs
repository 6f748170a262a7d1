//! lanbeacon: announce and discover named services on a LAN over UDP
//! multicast.
//!
//! An [`Announcer`] broadcasts `service:host:port` datagrams once per second.
//! A [`Discoverer`] joins the multicast group, filters announcements by
//! service name, and maintains a bounded set of currently-live providers,
//! invoking a change callback on every mutation. Records are evicted when
//! they go unrefreshed for too long (idle eviction) or when the set overflows
//! (capacity eviction, oldest first).
//!
//! Announcers and discoverers are independent: any number of either may run
//! in the same or different processes, coordinating only through the network.

pub mod announcer;
pub mod discovery;
pub mod error;
pub mod record;
pub mod socket;
pub mod wire;

pub use announcer::{Announcer, AnnouncerConfig};
pub use discovery::{Discoverer, DiscovererConfig, DiscoverySet};
pub use error::{AnnounceError, DecodeError, DiscoverError};
pub use record::ServiceRecord;

use std::net::Ipv4Addr;

/// Default multicast group shared by announcers and discoverers.
pub const DEFAULT_MULTICAST_ADDR: Ipv4Addr = Ipv4Addr::new(239, 255, 0, 1);

/// Default multicast port.
pub const DEFAULT_MULTICAST_PORT: u16 = 30001;
