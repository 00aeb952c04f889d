//! Business logic of the listing service: the store adapter, the generic repository,
//! one module per entity and the purchase workflow.

pub mod auth;
pub mod converters;
pub mod error;
pub mod owner;
pub mod property;
pub mod property_image;
pub mod property_trace;
pub mod repository;
pub mod sale;
pub mod seed;
pub mod store;

pub use auth::{Claims, TokenIssuer};
pub use error::{Result, ServiceError};
pub use repository::Repository;
pub use store::Store;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use common::{OwnerRequest, PropertyRequest};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;

    use crate::auth::TokenIssuer;
    use crate::store::Store;

    /// In-memory SQLite database with every migration applied.
    pub async fn setup_store() -> Store {
        let store = Store::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");
        Migrator::up(store.connection(), None)
            .await
            .expect("Failed to run migrations");
        store
    }

    pub fn test_tokens() -> TokenIssuer {
        TokenIssuer::new("test-secret-key", "realty", "realty-clients", 120)
    }

    pub fn owner_request(username: &str, password: &str) -> OwnerRequest {
        OwnerRequest {
            name: "Test Owner".to_string(),
            address: "123 Main St".to_string(),
            photo: "photo.jpg".to_string(),
            birthday: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn property_request(name: &str, price: i64, owner_id: Option<i32>) -> PropertyRequest {
        PropertyRequest {
            name: name.to_string(),
            address: "Calle 123".to_string(),
            price: Decimal::new(price, 0),
            year: 2010,
            owner_id,
            for_sale: None,
        }
    }
}
