//! Property listings: CRUD, filtering and single-field updates.

use common::{PropertyFilter, PropertyRequest, PropertyResponse};
use model::entities::property;
use model::validation::require_positive;
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, trace, warn};

use crate::converters::property_response;
use crate::error::{Result, ServiceError};
use crate::store::Store;

const ENTITY: &str = "Property";

pub async fn list_all(store: &Store) -> Result<Vec<PropertyResponse>> {
    let properties = store.collection::<property::Entity>().get_all().await?;
    debug!("Loaded {} properties", properties.len());
    Ok(properties.into_iter().map(property_response).collect())
}

/// Properties matching every filter that is set.
#[instrument(skip(store))]
pub async fn list_filtered(store: &Store, filter: &PropertyFilter) -> Result<Vec<PropertyResponse>> {
    let matching: Vec<_> = list_all(store)
        .await?
        .into_iter()
        .filter(|property| filter.matches(property))
        .collect();
    debug!("{} properties match the filter", matching.len());
    Ok(matching)
}

pub async fn get_by_id(store: &Store, id: i32) -> Result<Option<PropertyResponse>> {
    let property = store.collection::<property::Entity>().get_by_id(id).await?;
    Ok(property.map(property_response))
}

fn build(request: &PropertyRequest) -> Result<property::Model> {
    Ok(property::Model::new(
        &request.name,
        &request.address,
        request.price,
        request.year,
        request.owner_id,
        request.for_sale,
    )?)
}

#[instrument(skip(store, request), fields(name = %request.name))]
pub async fn create(store: &Store, request: PropertyRequest) -> Result<PropertyResponse> {
    trace!("Creating property");
    let stored = store.collection::<property::Entity>().add(build(&request)?).await?;
    info!("Property created with ID {}", stored.id);
    Ok(property_response(stored))
}

/// Replaces the whole property. The for-sale default applies again when not given.
#[instrument(skip(store, request))]
pub async fn update(store: &Store, id: i32, request: PropertyRequest) -> Result<PropertyResponse> {
    let mut model = build(&request)?;
    model.id = id;
    match store.collection::<property::Entity>().update(model).await? {
        Some(updated) => {
            info!("Property {} updated", id);
            Ok(property_response(updated))
        }
        None => {
            warn!("Property {} not found for update", id);
            Err(ServiceError::not_found(ENTITY, id))
        }
    }
}

pub async fn delete(store: &Store, id: i32) -> Result<()> {
    if store.collection::<property::Entity>().remove_by_id(id).await? {
        info!("Property {} deleted", id);
        Ok(())
    } else {
        warn!("Property {} not found for delete", id);
        Err(ServiceError::not_found(ENTITY, id))
    }
}

/// Loads the property, applies `change` and writes the whole row back.
async fn modify<F>(store: &Store, id: i32, change: F) -> Result<PropertyResponse>
where
    F: FnOnce(&mut property::Model),
{
    let repo = store.collection::<property::Entity>();
    let Some(mut current) = repo.get_by_id(id).await? else {
        warn!("Property {} not found", id);
        return Err(ServiceError::not_found(ENTITY, id));
    };
    change(&mut current);
    repo.update(current)
        .await?
        .map(property_response)
        .ok_or_else(|| ServiceError::not_found(ENTITY, id))
}

#[instrument(skip(store))]
pub async fn set_for_sale(store: &Store, id: i32, for_sale: bool) -> Result<PropertyResponse> {
    let updated = modify(store, id, |property| property.for_sale = for_sale).await?;
    info!("Property {} for-sale flag set to {}", id, for_sale);
    Ok(updated)
}

/// `None` marks the property as unowned. The owner id is not checked against the owners table.
#[instrument(skip(store))]
pub async fn set_owner(store: &Store, id: i32, owner_id: Option<i32>) -> Result<PropertyResponse> {
    let updated = modify(store, id, |property| property.owner_id = owner_id).await?;
    info!("Property {} owner set to {:?}", id, owner_id);
    Ok(updated)
}

#[instrument(skip(store))]
pub async fn set_price(store: &Store, id: i32, price: Decimal) -> Result<PropertyResponse> {
    require_positive("Price", price)?;
    let updated = modify(store, id, |property| property.price = price).await?;
    info!("Property {} price set to {}", id, price);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{property_request, setup_store};

    #[tokio::test]
    async fn test_create_applies_for_sale_default() {
        let store = setup_store().await;

        let unowned = create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();
        assert!(unowned.for_sale);

        let owned = create(&store, property_request("Casa de Campo", 350000, Some(1))).await.unwrap();
        assert!(!owned.for_sale);

        let mut request = property_request("Apartamento en la Ciudad", 250000, Some(1));
        request.for_sale = Some(true);
        assert!(create(&store, request).await.unwrap().for_sale);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields() {
        let store = setup_store().await;

        let mut request = property_request("Casa", 150000, None);
        request.price = Decimal::ZERO;
        assert!(matches!(create(&store, request).await, Err(ServiceError::Validation(_))));

        let mut request = property_request("Casa", 150000, None);
        request.address = " ".to_string();
        assert!(matches!(create(&store, request).await, Err(ServiceError::Validation(_))));

        assert!(list_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_filtered() {
        let store = setup_store().await;
        create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();
        create(&store, property_request("Apartamento en la Ciudad", 250000, None)).await.unwrap();
        create(&store, property_request("Casa de Campo", 350000, None)).await.unwrap();

        let by_name = PropertyFilter {
            name: Some("casa".to_string()),
            ..Default::default()
        };
        assert_eq!(list_filtered(&store, &by_name).await.unwrap().len(), 2);

        let by_price = PropertyFilter {
            min_price: Some(Decimal::new(250000, 0)),
            max_price: Some(Decimal::new(350000, 0)),
            ..Default::default()
        };
        let names: Vec<_> = list_filtered(&store, &by_price)
            .await
            .unwrap()
            .into_iter()
            .map(|property| property.name)
            .collect();
        assert_eq!(names, vec!["Apartamento en la Ciudad", "Casa de Campo"]);

        assert_eq!(list_filtered(&store, &PropertyFilter::default()).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_property() {
        let store = setup_store().await;
        let created = create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();

        let updated = update(&store, created.id, property_request("Casa Renovada", 180000, Some(2)))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Casa Renovada");
        assert_eq!(updated.owner_id, Some(2));
        assert!(!updated.for_sale);
    }

    #[tokio::test]
    async fn test_missing_property_is_not_found_everywhere() {
        let store = setup_store().await;

        assert!(get_by_id(&store, 5).await.unwrap().is_none());
        for result in [
            update(&store, 5, property_request("Casa", 1, None)).await,
            set_for_sale(&store, 5, true).await,
            set_owner(&store, 5, Some(1)).await,
            set_price(&store, 5, Decimal::ONE).await,
        ] {
            assert!(matches!(result, Err(ServiceError::NotFound { entity: "Property", id: 5 })));
        }
        assert!(matches!(delete(&store, 5).await, Err(ServiceError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_partial_updates_change_one_field() {
        let store = setup_store().await;
        let created = create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();

        let after_owner = set_owner(&store, created.id, Some(2)).await.unwrap();
        assert_eq!(after_owner.owner_id, Some(2));
        assert!(after_owner.for_sale);

        let after_flag = set_for_sale(&store, created.id, false).await.unwrap();
        assert!(!after_flag.for_sale);
        assert_eq!(after_flag.owner_id, Some(2));

        let after_price = set_price(&store, created.id, Decimal::new(160000, 0)).await.unwrap();
        assert_eq!(after_price.price, Decimal::new(160000, 0));
        assert_eq!(after_price.name, "Casa de Playa");
        assert_eq!(after_price.address, created.address);
        assert_eq!(after_price.year, created.year);
        assert_eq!(after_price.owner_id, Some(2));
        assert!(!after_price.for_sale);

        let cleared = set_owner(&store, created.id, None).await.unwrap();
        assert_eq!(cleared.owner_id, None);
    }

    #[tokio::test]
    async fn test_set_price_keeps_price_positive() {
        let store = setup_store().await;
        let created = create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();

        let err = set_price(&store, created.id, Decimal::new(-1, 0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let stored = get_by_id(&store, created.id).await.unwrap().unwrap();
        assert_eq!(stored.price, Decimal::new(150000, 0));
    }

    #[tokio::test]
    async fn test_delete_removes_property() {
        let store = setup_store().await;
        let created = create(&store, property_request("Casa de Playa", 150000, None)).await.unwrap();
        delete(&store, created.id).await.unwrap();
        assert!(get_by_id(&store, created.id).await.unwrap().is_none());
    }
}
