//! Sale records. A property can carry at most one trace.

use chrono::Utc;
use common::{PropertyTraceRequest, PropertyTraceResponse};
use model::entities::property_trace;
use sea_orm::{ColumnTrait, Condition, ConnectionTrait};
use tracing::{debug, info, instrument, warn};

use crate::converters::trace_response;
use crate::error::{Result, ServiceError, is_unique_violation};
use crate::repository::Repository;
use crate::store::Store;

const ENTITY: &str = "Property trace";

/// The trace already recorded for `property_id`, if any.
pub(crate) async fn existing_for_property<C: ConnectionTrait>(
    conn: &C,
    property_id: i32,
) -> Result<Option<property_trace::Model>> {
    let mut traces = Repository::<property_trace::Entity, C>::new(conn)
        .find(Condition::all().add(property_trace::Column::PropertyId.eq(property_id)))
        .await?;
    Ok(traces.pop())
}

/// Maps a unique-index hit on `property_id` to the purchase conflict.
pub(crate) fn map_write_error(err: sea_orm::DbErr, property_id: i32) -> ServiceError {
    if is_unique_violation(&err) {
        warn!("Concurrent trace for property {} rejected by the store", property_id);
        ServiceError::AlreadyPurchased { property_id }
    } else {
        err.into()
    }
}

pub async fn list_all(store: &Store) -> Result<Vec<PropertyTraceResponse>> {
    let traces = store.collection::<property_trace::Entity>().get_all().await?;
    debug!("Loaded {} property traces", traces.len());
    Ok(traces.into_iter().map(trace_response).collect())
}

pub async fn list_for_property(store: &Store, property_id: i32) -> Result<Vec<PropertyTraceResponse>> {
    Ok(existing_for_property(store.connection(), property_id)
        .await?
        .map(trace_response)
        .into_iter()
        .collect())
}

pub async fn get_by_id(store: &Store, id: i32) -> Result<Option<PropertyTraceResponse>> {
    let trace = store.collection::<property_trace::Entity>().get_by_id(id).await?;
    Ok(trace.map(trace_response))
}

/// Records a sale, stamped with the current time.
///
/// Fails with `AlreadyPurchased` when the property already has a trace.
#[instrument(skip(store))]
pub async fn create(store: &Store, request: PropertyTraceRequest) -> Result<PropertyTraceResponse> {
    if existing_for_property(store.connection(), request.property_id)
        .await?
        .is_some()
    {
        warn!("Property {} already has a trace", request.property_id);
        return Err(ServiceError::AlreadyPurchased {
            property_id: request.property_id,
        });
    }

    let model = property_trace::Model::new(
        Utc::now(),
        &request.name,
        request.value,
        request.tax,
        request.property_id,
    )?;
    let stored = store
        .collection::<property_trace::Entity>()
        .add(model)
        .await
        .map_err(|err| map_write_error(err, request.property_id))?;

    info!("Trace {} recorded for property {}", stored.id, stored.property_id);
    Ok(trace_response(stored))
}

/// Replaces the trace. Keeps the stored sale date unless a new one is given.
#[instrument(skip(store))]
pub async fn update(
    store: &Store,
    id: i32,
    request: PropertyTraceRequest,
) -> Result<PropertyTraceResponse> {
    let repo = store.collection::<property_trace::Entity>();
    let Some(current) = repo.get_by_id(id).await? else {
        warn!("Property trace {} not found for update", id);
        return Err(ServiceError::not_found(ENTITY, id));
    };

    if let Some(other) = existing_for_property(store.connection(), request.property_id).await? {
        if other.id != id {
            warn!(
                "Property {} already has trace {}",
                request.property_id, other.id
            );
            return Err(ServiceError::AlreadyPurchased {
                property_id: request.property_id,
            });
        }
    }

    let mut model = property_trace::Model::new(
        request.date_sale.unwrap_or(current.date_sale),
        &request.name,
        request.value,
        request.tax,
        request.property_id,
    )?;
    model.id = id;

    match repo.update(model).await {
        Ok(Some(updated)) => {
            info!("Property trace {} updated", id);
            Ok(trace_response(updated))
        }
        Ok(None) => Err(ServiceError::not_found(ENTITY, id)),
        Err(err) => Err(map_write_error(err, request.property_id)),
    }
}

/// Deleting a trace lets the property be purchased again.
pub async fn delete(store: &Store, id: i32) -> Result<()> {
    if store.collection::<property_trace::Entity>().remove_by_id(id).await? {
        info!("Property trace {} deleted", id);
        Ok(())
    } else {
        warn!("Property trace {} not found for delete", id);
        Err(ServiceError::not_found(ENTITY, id))
    }
}
