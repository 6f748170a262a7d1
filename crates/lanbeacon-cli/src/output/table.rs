//! Table-formatted output for CLI.

use std::time::Instant;

use comfy_table::{Cell, ContentArrangement, Table};

use lanbeacon_core::ServiceRecord;

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_services(&self, services: &[ServiceRecord]) -> String {
        if services.is_empty() {
            return "No services found.".to_string();
        }

        let now = Instant::now();

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Service", "Host", "Address", "Port", "Age"]);

        for service in services {
            table.add_row(vec![
                Cell::new(&service.service_name),
                Cell::new(&service.host_name),
                Cell::new(service.endpoint.ip().to_string()),
                Cell::new(service.endpoint.port().to_string()),
                Cell::new(format!("{:.1}s", service.age(now).as_secs_f64())),
            ]);
        }

        format!("{}\n\nFound {} service(s)", table, services.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_services() {
        let services = vec![ServiceRecord {
            service_name: "svc".to_string(),
            host_name: "box-1".to_string(),
            endpoint: "192.168.1.5:8080".parse().unwrap(),
            last_seen: Instant::now(),
        }];

        let output = TableOutput::new().format_services(&services);
        assert!(output.contains("svc"));
        assert!(output.contains("box-1"));
        assert!(output.contains("192.168.1.5"));
        assert!(output.contains("Found 1 service(s)"));
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(TableOutput::new().format_services(&[]), "No services found.");
    }
}
