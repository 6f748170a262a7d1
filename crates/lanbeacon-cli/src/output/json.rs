//! JSON output for CLI results.

use lanbeacon_core::ServiceRecord;

use super::{OutputFormatter, ServiceRow};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_services(&self, services: &[ServiceRecord]) -> String {
        let rows: Vec<ServiceRow> = services.iter().map(ServiceRow::from).collect();
        let output = serde_json::json!({
            "services": rows,
            "count": rows.len()
        });
        serde_json::to_string_pretty(&output).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_format_services() {
        let services = vec![ServiceRecord {
            service_name: "svc".to_string(),
            host_name: "box-1".to_string(),
            endpoint: "192.168.1.5:8080".parse().unwrap(),
            last_seen: Instant::now(),
        }];

        let output = JsonOutput::new().format_services(&services);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["services"][0]["service"], "svc");
        assert_eq!(parsed["services"][0]["port"], 8080);
    }

    #[test]
    fn test_format_empty() {
        let output = JsonOutput::new().format_services(&[]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["count"], 0);
    }
}
