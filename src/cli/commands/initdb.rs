use anyhow::Result;
use migration::{Migrator, MigratorTrait};
use service::Store;
use tracing::{debug, error, info, trace};

/// Connect and apply every pending migration.
pub async fn init_database(database_url: &str) -> Result<Store> {
    trace!("Entering init_database function");
    info!("Initializing database");
    debug!("Database URL: {}", database_url);

    let store = match Store::connect(database_url).await {
        Ok(store) => {
            info!("Successfully connected to database");
            store
        }
        Err(e) => {
            error!("Failed to connect to database '{}': {}", database_url, e);
            return Err(e.into());
        }
    };

    info!("Running database migrations");
    match Migrator::up(store.connection(), None).await {
        Ok(_) => {
            info!("Database migrations completed successfully");
            debug!("All pending migrations have been applied");
        }
        Err(e) => {
            error!("Failed to run database migrations: {}", e);
            return Err(e.into());
        }
    }

    info!("Database initialization completed successfully!");
    Ok(store)
}
