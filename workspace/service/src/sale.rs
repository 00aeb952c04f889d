//! Property purchase: ownership transfer plus its sale trace, in one transaction.

use chrono::Utc;
use common::PurchaseResponse;
use model::entities::{owner, property, property_trace};
use rust_decimal::Decimal;
use sea_orm::DatabaseTransaction;
use tracing::{debug, error, info, instrument, warn};

use crate::converters::{property_response, trace_response};
use crate::error::{Result, ServiceError};
use crate::property_trace::{existing_for_property, map_write_error};
use crate::repository::Repository;
use crate::store::Store;

/// Share of the sale price recorded as tax (10%).
pub const TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

pub fn tax_for(price: Decimal) -> Decimal {
    (price * TAX_RATE).round_dp(4)
}

/// Transfers the property to the buyer and records the sale.
///
/// Repeating a completed purchase with the same buyer returns the recorded outcome.
/// Any failure leaves the property and the trace table untouched.
#[instrument(skip(store))]
pub async fn purchase(store: &Store, property_id: i32, buyer_id: i32) -> Result<PurchaseResponse> {
    let txn = store.begin().await?;
    match purchase_in(&txn, property_id, buyer_id).await {
        Ok(outcome) => {
            txn.commit().await?;
            Ok(outcome)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                error!("Rollback of purchase failed: {}", rollback_err);
            }
            Err(err)
        }
    }
}

async fn purchase_in(
    txn: &DatabaseTransaction,
    property_id: i32,
    buyer_id: i32,
) -> Result<PurchaseResponse> {
    let properties = Repository::<property::Entity, _>::new(txn);
    let Some(mut listing) = properties.get_by_id(property_id).await? else {
        warn!("Property {} not found for purchase", property_id);
        return Err(ServiceError::not_found("Property", property_id));
    };
    let Some(buyer) = Repository::<owner::Entity, _>::new(txn).get_by_id(buyer_id).await? else {
        warn!("Buyer {} not found", buyer_id);
        return Err(ServiceError::not_found("Owner", buyer_id));
    };

    let recorded = existing_for_property(txn, property_id).await?;
    if let Some(trace) = recorded.as_ref() {
        if listing.owner_id == Some(buyer.id) && !listing.for_sale {
            debug!("Property {} was already bought by owner {}", property_id, buyer.id);
            return Ok(PurchaseResponse {
                property: property_response(listing),
                trace: trace_response(trace.clone()),
            });
        }
    }

    if !listing.for_sale {
        warn!("Property {} is not for sale", property_id);
        return Err(ServiceError::NotForSale { property_id });
    }
    if recorded.is_some() {
        warn!("Property {} already has a trace", property_id);
        return Err(ServiceError::AlreadyPurchased { property_id });
    }

    listing.owner_id = Some(buyer.id);
    listing.for_sale = false;
    let Some(listing) = properties.update(listing).await? else {
        return Err(ServiceError::not_found("Property", property_id));
    };

    let trace = property_trace::Model::new(
        Utc::now(),
        &format!("Purchase of property by {}", buyer.name),
        listing.price,
        tax_for(listing.price),
        property_id,
    )?;
    let trace = Repository::<property_trace::Entity, _>::new(txn)
        .add(trace)
        .await
        .map_err(|err| map_write_error(err, property_id))?;

    info!(
        "Property {} purchased by owner {} for {}",
        property_id, buyer.id, listing.price
    );
    Ok(PurchaseResponse {
        property: property_response(listing),
        trace: trace_response(trace),
    })
}
