//! Discover command implementation.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use colored::*;

use lanbeacon_core::{Discoverer, DiscovererConfig, ServiceRecord};

use crate::cli::DiscoverArgs;
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter, ServiceRow};

/// Run the discover command
pub async fn run_discover(args: DiscoverArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let config = DiscovererConfig::new(args.service.clone())
        .max_idle(Duration::from_secs(args.max_idle))
        .max_services(args.max_services)
        .multicast_addr(args.group)
        .multicast_port(args.multicast_port);

    if args.watch {
        run_watch_mode(config, json).await
    } else {
        run_oneshot_mode(config, args.duration, formatter.as_ref()).await
    }
}

async fn run_oneshot_mode(
    config: DiscovererConfig,
    duration_secs: u64,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    println!("Discovering services for {} seconds...", duration_secs);

    let services = Discoverer::collect_for(config, Duration::from_secs(duration_secs)).await?;

    println!("{}", formatter.format_services(&services));

    if services.is_empty() {
        return Err(CliError::NoServicesFound);
    }

    Ok(())
}

async fn run_watch_mode(config: DiscovererConfig, json: bool) -> Result<(), CliError> {
    println!("Watching for services (press Ctrl+C to stop)...\n");

    let mut discoverer = Discoverer::new(config)?;

    let watch = discoverer.run(move |services| {
        // Clear screen and print header
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", "lanbeacon service watch".bold());
        println!("{}", "Press Ctrl+C to stop".dimmed());
        println!();

        if json {
            let rows: Vec<ServiceRow> = services.iter().map(ServiceRow::from).collect();
            let output = serde_json::json!({
                "services": rows,
                "count": rows.len()
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output)
                    .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
            );
        } else {
            print_watch_table(services);
        }

        io::stdout().flush().ok();
    });

    tokio::select! {
        result = watch => result?,
        _ = tokio::signal::ctrl_c() => {}
    }

    Ok(())
}

fn print_watch_table(services: &[ServiceRecord]) {
    let now = Instant::now();

    println!(
        "{:<20} {:<20} {:<22} {:<8}",
        "Service".bold(),
        "Host".bold(),
        "Address".bold(),
        "Age".bold()
    );
    println!("{}", "-".repeat(72));

    for service in services {
        println!(
            "{:<20} {:<20} {:<22} {:<8}",
            truncate(&service.service_name, 18),
            truncate(&service.host_name, 18),
            service.endpoint.to_string(),
            format!("{:.1}s", service.age(now).as_secs_f64())
        );
    }

    println!();
    println!("Found {} service(s)", services.len());
}

// Counts chars, not bytes: host names arrive off the wire as arbitrary UTF-8
// and a byte slice could land inside a multibyte char.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
