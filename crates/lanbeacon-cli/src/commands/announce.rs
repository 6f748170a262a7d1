//! Announce command implementation.

use std::time::Duration;

use lanbeacon_core::{Announcer, AnnouncerConfig};

use crate::cli::AnnounceArgs;
use crate::error::CliError;

/// Run the announce command: advertise the service until Ctrl+C.
pub async fn run_announce(args: AnnounceArgs) -> Result<(), CliError> {
    let config = AnnouncerConfig::new(args.service.clone(), args.port)
        .multicast_addr(args.group)
        .multicast_port(args.multicast_port)
        .interval(Duration::from_millis(args.interval));

    let announcer = Announcer::new(config).await?;

    println!(
        "Announcing {} (port {}) to {}:{} - press Ctrl+C to stop",
        args.service, args.port, args.group, args.multicast_port
    );

    tokio::select! {
        _ = announcer.run() => {}
        _ = tokio::signal::ctrl_c() => {
            println!("\nStopped.");
        }
    }

    Ok(())
}
