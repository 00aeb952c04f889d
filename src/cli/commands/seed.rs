use anyhow::Result;
use service::seed::{seed_demo_data, SeedSummary};
use tracing::{error, info, trace};

use super::init_database;

/// Migrate the database and load the demo dataset into it.
pub async fn seed_database(database_url: &str) -> Result<SeedSummary> {
    trace!("Entering seed_database function");
    let store = init_database(database_url).await?;

    match seed_demo_data(&store).await {
        Ok(summary) => {
            info!(
                "Seed complete: {} owners, {} properties, {} images",
                summary.owners, summary.properties, summary.images
            );
            Ok(summary)
        }
        Err(e) => {
            error!("Failed to seed database: {}", e);
            Err(e.into())
        }
    }
}
