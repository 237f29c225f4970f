use super::models::*;
use crate::error::Result;
use async_trait::async_trait;

/// Read access to the records of a DNS provider.
#[async_trait]
pub trait DnsApiClient: Send + Sync {
    async fn get_record(&self, record_id: &str) -> Result<RecordResponse>;

    /// Fetches one page of records. `None` requests the first page of 100.
    async fn get_records(
        &self,
        zone_id: &str,
        options: Option<RecordsListOptions>,
    ) -> Result<ListResponse>;
}
