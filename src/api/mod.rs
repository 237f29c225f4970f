pub mod client;
pub mod hetzner;
pub mod models;
pub mod timestamp;

pub use client::DnsApiClient;
pub use hetzner::{HetznerClient, API_BASE_URL};
pub use timestamp::{Timestamp, TimestampError};
