//! JSON output formatting
//!
//! Every JSON document memchat prints has the same envelope: the payload
//! under `data` and a small `meta` block describing the client that
//! produced it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Envelope written around every JSON payload
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    /// When the document was printed
    pub generated_at: DateTime<Utc>,

    /// memchat version that printed it
    pub client_version: &'static str,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                generated_at: Utc::now(),
                client_version: env!("CARGO_PKG_VERSION"),
            },
        }
    }
}

/// Wrap `data` in the envelope and pretty-print it
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
