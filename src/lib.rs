//! Client for the Hetzner DNS record API.
//!
//! Fetches a single record by ID or one page of the records in a zone:
//!
//! ```no_run
//! use hdns_client::{DnsApiClient, HetznerClient};
//!
//! # async fn run() -> hdns_client::Result<()> {
//! let client = HetznerClient::new("my-api-token")?;
//! let page = client.get_records("5c95wmRRiFSdwNswRDcMuG", None).await?;
//! for record in &page.records {
//!     println!("{} {} {}", record.name, record.r#type, record.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;


pub use api::models::{
    ListResponse, Meta, Pagination, Record, RecordResponse, RecordsListOptions,
};
pub use api::{DnsApiClient, HetznerClient, Timestamp, TimestampError, API_BASE_URL};
pub use error::{Error, Result};
