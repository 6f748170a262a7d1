//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use std::time::Instant;

use lanbeacon_core::ServiceRecord;
use serde::Serialize;

/// Output formatter trait
pub trait OutputFormatter {
    /// Format the discovered service set
    fn format_services(&self, services: &[ServiceRecord]) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}

/// Serializable view of a discovered service.
#[derive(Debug, Serialize)]
pub struct ServiceRow {
    pub service: String,
    pub host: String,
    pub address: String,
    pub port: u16,
    pub age_secs: f64,
}

impl From<&ServiceRecord> for ServiceRow {
    fn from(record: &ServiceRecord) -> Self {
        Self {
            service: record.service_name.clone(),
            host: record.host_name.clone(),
            address: record.endpoint.ip().to_string(),
            port: record.endpoint.port(),
            age_secs: record.age(Instant::now()).as_secs_f64(),
        }
    }
}
