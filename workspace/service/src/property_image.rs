//! Images attached to properties.

use common::{PropertyImageRequest, PropertyImageResponse};
use model::entities::property_image;
use sea_orm::{ColumnTrait, Condition};
use tracing::{debug, info, instrument, warn};

use crate::converters::image_response;
use crate::error::{Result, ServiceError};
use crate::store::Store;

const ENTITY: &str = "Property image";

pub async fn list_all(store: &Store) -> Result<Vec<PropertyImageResponse>> {
    let images = store.collection::<property_image::Entity>().get_all().await?;
    debug!("Loaded {} property images", images.len());
    Ok(images.into_iter().map(image_response).collect())
}

#[instrument(skip(store))]
pub async fn list_for_property(store: &Store, property_id: i32) -> Result<Vec<PropertyImageResponse>> {
    let images = store
        .collection::<property_image::Entity>()
        .find(Condition::all().add(property_image::Column::PropertyId.eq(property_id)))
        .await?;
    debug!("Property {} has {} images", property_id, images.len());
    Ok(images.into_iter().map(image_response).collect())
}

pub async fn get_by_id(store: &Store, id: i32) -> Result<Option<PropertyImageResponse>> {
    let image = store.collection::<property_image::Entity>().get_by_id(id).await?;
    Ok(image.map(image_response))
}

fn build(request: &PropertyImageRequest) -> Result<property_image::Model> {
    Ok(property_image::Model::new(
        request.property_id,
        &request.file_url,
        request.enabled,
    )?)
}

#[instrument(skip(store))]
pub async fn create(store: &Store, request: PropertyImageRequest) -> Result<PropertyImageResponse> {
    let stored = store
        .collection::<property_image::Entity>()
        .add(build(&request)?)
        .await?;
    info!("Image {} attached to property {}", stored.id, stored.property_id);
    Ok(image_response(stored))
}

#[instrument(skip(store))]
pub async fn update(
    store: &Store,
    id: i32,
    request: PropertyImageRequest,
) -> Result<PropertyImageResponse> {
    let mut model = build(&request)?;
    model.id = id;
    match store.collection::<property_image::Entity>().update(model).await? {
        Some(updated) => {
            info!("Property image {} updated", id);
            Ok(image_response(updated))
        }
        None => {
            warn!("Property image {} not found for update", id);
            Err(ServiceError::not_found(ENTITY, id))
        }
    }
}

pub async fn delete(store: &Store, id: i32) -> Result<()> {
    if store.collection::<property_image::Entity>().remove_by_id(id).await? {
        info!("Property image {} deleted", id);
        Ok(())
    } else {
        warn!("Property image {} not found for delete", id);
        Err(ServiceError::not_found(ENTITY, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_store;

    fn request(property_id: i32, file_url: &str) -> PropertyImageRequest {
        PropertyImageRequest {
            property_id,
            file_url: file_url.to_string(),
            enabled: true,
        }
    }

    #[tokio::test]
    async fn test_images_are_listed_per_property() {
        let store = setup_store().await;
        create(&store, request(1, "https://img/1a.jpg")).await.unwrap();
        create(&store, request(1, "https://img/1b.jpg")).await.unwrap();
        create(&store, request(2, "https://img/2.jpg")).await.unwrap();

        let first = list_for_property(&store, 1).await.unwrap();
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|image| image.property_id == 1));
        assert!(list_for_property(&store, 3).await.unwrap().is_empty());
        assert_eq!(list_all(&store).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_image_needs_property_and_file() {
        let store = setup_store().await;
        assert!(matches!(
            create(&store, request(0, "https://img/1.jpg")).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(create(&store, request(1, "")).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_disable_image_through_update() {
        let store = setup_store().await;
        let image = create(&store, request(1, "https://img/1.jpg")).await.unwrap();

        let mut change = request(1, "https://img/1.jpg");
        change.enabled = false;
        let updated = update(&store, image.id, change).await.unwrap();
        assert!(!updated.enabled);
        assert_eq!(get_by_id(&store, image.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_missing_image_is_not_found() {
        let store = setup_store().await;
        assert!(get_by_id(&store, 8).await.unwrap().is_none());
        assert!(matches!(
            update(&store, 8, request(1, "https://img/1.jpg")).await,
            Err(ServiceError::NotFound { id: 8, .. })
        ));
        assert!(matches!(delete(&store, 8).await, Err(ServiceError::NotFound { .. })));
    }
}
