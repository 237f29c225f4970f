use anyhow::{Context, Result};
use hdns_client::{
    config::{Config, Zone},
    DnsApiClient, HetznerClient,
};
use log::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());
    let config = Config::load(&config_file)?;

    let client = HetznerClient::with_base_url(&config.base_url, &config.api_token)
        .context("Failed to create API client")?;

    for zone in &config.zones {
        if let Err(e) = print_zone(&client, zone).await {
            error!("Failed to fetch zone {}: {:#}", zone.id, e);
            return Err(e);
        }
    }
    Ok(())
}

async fn print_zone(client: &dyn DnsApiClient, zone: &Zone) -> Result<()> {
    info!("Fetching records for zone {}", zone.id);
    let records = client
        .get_records(&zone.id, Some(zone.list_options()))
        .await
        .with_context(|| format!("Failed to list records of zone {}", zone.id))?;
    println!("{}", serde_json::to_string_pretty(&records)?);

    for record_id in &zone.records {
        info!("Fetching record {}", record_id);
        let record = client
            .get_record(record_id)
            .await
            .with_context(|| format!("Failed to fetch record {}", record_id))?;
        println!("{}", serde_json::to_string_pretty(&record)?);
    }
    Ok(())
}
