//! Demo dataset: two owners, three listed properties and their photos.

use chrono::NaiveDate;
use common::{OwnerRequest, PropertyImageRequest, PropertyRequest};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::error::Result;
use crate::store::Store;
use crate::{owner, property, property_image};

/// Rows written by [`seed_demo_data`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub owners: usize,
    pub properties: usize,
    pub images: usize,
}

const DEMO_PASSWORD: &str = "password";

fn demo_owner(name: &str, address: &str, photo: &str, birthday: (i32, u32, u32), username: &str) -> OwnerRequest {
    let (year, month, day) = birthday;
    OwnerRequest {
        name: name.to_string(),
        address: address.to_string(),
        photo: photo.to_string(),
        birthday: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        username: username.to_string(),
        password: DEMO_PASSWORD.to_string(),
    }
}

/// Inserts the demo dataset into an empty database.
///
/// Does nothing when owners already exist.
pub async fn seed_demo_data(store: &Store) -> Result<SeedSummary> {
    if !owner::list_all(store).await?.is_empty() {
        warn!("Database already has owners, skipping seed");
        return Ok(SeedSummary::default());
    }

    let john = owner::create(
        store,
        demo_owner("John Doe", "123 Main St", "photo.jpg", (1980, 1, 1), "john"),
    )
    .await?;
    let jane = owner::create(
        store,
        demo_owner("Jane Smith", "456 Oak Ave", "photo2.jpg", (1990, 5, 15), "jane"),
    )
    .await?;

    let listings = [
        ("Casa de Playa", "Calle 123", 150000, 2010, jane.id),
        ("Apartamento en la Ciudad", "Avenida 45", 250000, 2015, john.id),
        ("Casa de Campo", "Vereda 7", 350000, 2020, john.id),
    ];
    let mut property_ids = Vec::with_capacity(listings.len());
    for (name, address, price, year, owner_id) in listings {
        let created = property::create(
            store,
            PropertyRequest {
                name: name.to_string(),
                address: address.to_string(),
                price: Decimal::new(price, 0),
                year,
                owner_id: Some(owner_id),
                for_sale: Some(true),
            },
        )
        .await?;
        property_ids.push(created.id);
    }

    let photos = [
        (0, "https://arquitectopablorestrepo.com/wp-content/uploads/2024/06/Diseno-casa-campestre-La-Morada-1.jpg"),
        (0, "https://images.adsttc.com/media/images/5d34/e507/284d/d109/5600/0240/large_jpg/_FI.jpg"),
        (1, "https://images.adsttc.com/media/images/5caf/246b/284d/d19a/9100/0586/large_jpg/13135-JO_SALESFORCE_TOWER_13_(c)_Jason_O'Rear.jpg"),
        (2, "https://www.fincasquindio.com.co/wp-content/uploads/2022/02/finca_tipica_quindio.jpg"),
    ];
    for (index, file_url) in photos {
        property_image::create(
            store,
            PropertyImageRequest {
                property_id: property_ids[index],
                file_url: file_url.to_string(),
                enabled: true,
            },
        )
        .await?;
    }

    let summary = SeedSummary {
        owners: 2,
        properties: property_ids.len(),
        images: photos.len(),
    };
    info!("Seeded {:?}", summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{setup_store, test_tokens};

    #[tokio::test]
    async fn test_seed_populates_empty_database_once() {
        let store = setup_store().await;

        let summary = seed_demo_data(&store).await.unwrap();
        assert_eq!(summary, SeedSummary { owners: 2, properties: 3, images: 4 });

        let properties = property::list_all(&store).await.unwrap();
        assert!(properties.iter().all(|listing| listing.for_sale));
        assert_eq!(properties[0].name, "Casa de Playa");
        assert_eq!(property_image::list_for_property(&store, properties[0].id).await.unwrap().len(), 2);

        let login = owner::authenticate(&store, &test_tokens(), "jane", "password")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(properties[0].owner_id, Some(login.owner.id));

        assert_eq!(seed_demo_data(&store).await.unwrap(), SeedSummary::default());
        assert_eq!(owner::list_all(&store).await.unwrap().len(), 2);
    }
}
