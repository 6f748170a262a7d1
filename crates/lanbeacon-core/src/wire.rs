//! Announcement wire format.
//!
//! One UDP datagram carries one announcement, as plain text:
//! `<serviceName>:<hostName>:<port>`. The datagram boundary is the message
//! boundary; there is no length prefix or framing beyond that.

use crate::error::DecodeError;

/// A decoded service announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub service_name: String,
    pub host_name: String,
    pub port: u16,
}

/// Encode an announcement message.
///
/// Caller contract: `service_name` and `host_name` must not contain `:`.
/// This is not validated here.
pub fn encode_announcement(service_name: &str, host_name: &str, port: u16) -> String {
    format!("{}:{}:{}", service_name, host_name, port)
}

/// Decode an announcement datagram.
///
/// Fails with [`DecodeError::MalformedMessage`] unless the payload is UTF-8
/// text with exactly three `:`-separated fields, and with
/// [`DecodeError::InvalidPort`] if the third field is not a base-10 `u16`.
/// Allocation is bounded by the size of `data`.
pub fn decode_announcement(data: &[u8]) -> Result<Announcement, DecodeError> {
    let text = std::str::from_utf8(data)
        .map_err(|_| DecodeError::MalformedMessage("payload is not valid UTF-8".to_string()))?;

    let fields: Vec<&str> = text.split(':').collect();
    if fields.len() != 3 {
        return Err(DecodeError::MalformedMessage(format!(
            "expected 3 fields, got {}",
            fields.len()
        )));
    }

    let port: u16 = fields[2]
        .parse()
        .map_err(|_| DecodeError::InvalidPort(fields[2].to_string()))?;

    Ok(Announcement {
        service_name: fields[0].to_string(),
        host_name: fields[1].to_string(),
        port,
    })
}
