//! CLI argument definitions using clap.

use std::net::Ipv4Addr;

use clap::{Args, Parser, Subcommand};

/// lanbeacon - announce and discover services on the local network
#[derive(Parser, Debug)]
#[command(name = "lanbeacon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Announce a service to the multicast group
    Announce(AnnounceArgs),

    /// Discover providers of a service
    Discover(DiscoverArgs),
}

// ==================== Announce ====================

#[derive(Args, Debug)]
pub struct AnnounceArgs {
    /// Name of the service to announce
    pub service: String,

    /// Port the service listens on
    pub port: u16,

    /// Multicast group to send to
    #[arg(long, default_value = "239.255.0.1", env = "LANBEACON_GROUP")]
    pub group: Ipv4Addr,

    /// Multicast port to send to
    #[arg(long, default_value = "30001", env = "LANBEACON_PORT")]
    pub multicast_port: u16,

    /// Announce interval in milliseconds
    #[arg(long, default_value = "1000")]
    pub interval: u64,
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Name of the service to discover
    pub service: String,

    /// Watch mode - continuously print the live set on every change
    #[arg(short, long)]
    pub watch: bool,

    /// Discovery duration in seconds (ignored in watch mode)
    #[arg(short, long, default_value = "5")]
    pub duration: u64,

    /// Evict providers not heard from for this many seconds
    #[arg(long, default_value = "30")]
    pub max_idle: u64,

    /// Maximum number of providers to track
    #[arg(long, default_value = "10")]
    pub max_services: usize,

    /// Multicast group to join
    #[arg(long, default_value = "239.255.0.1", env = "LANBEACON_GROUP")]
    pub group: Ipv4Addr,

    /// Multicast port to listen on
    #[arg(long, default_value = "30001", env = "LANBEACON_PORT")]
    pub multicast_port: u16,
}
