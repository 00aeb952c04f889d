//! Transport-layer types shared between the services and the HTTP handlers.
//! Field names go over the wire in camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

// ===================== Owners =====================

/// Request body for registering or fully replacing an owner.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub name: String,
    pub address: String,
    /// Photo URL
    pub photo: String,
    pub birthday: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub username: String,
    /// Clear-text password; only its hash is stored.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Owner as returned by the API. Never carries the password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: NaiveDate,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Bearer token plus the owner it was issued for.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub owner: OwnerResponse,
}

// ===================== Properties =====================

/// Request body for creating or fully replacing a property.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    pub name: String,
    pub address: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    /// Year built
    pub year: i32,
    pub owner_id: Option<i32>,
    /// Defaults to true for unowned properties, false otherwise.
    pub for_sale: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub year: i32,
    pub owner_id: Option<i32>,
    pub for_sale: bool,
}

/// Filters for listing properties. Text filters are case-insensitive substring matches,
/// price bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, PartialEq)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    pub name: Option<String>,
    pub address: Option<String>,
    #[param(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[param(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

impl PropertyFilter {
    pub fn matches(&self, property: &PropertyResponse) -> bool {
        let contains = |haystack: &str, needle: &Option<String>| match needle.as_deref() {
            None | Some("") => true,
            Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        };

        contains(&property.name, &self.name)
            && contains(&property.address, &self.address)
            && self.min_price.map_or(true, |min| property.price >= min)
            && self.max_price.map_or(true, |max| property.price <= max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateForSaleRequest {
    pub for_sale: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerRequest {
    /// `null` marks the property as unowned.
    pub owner_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdatePriceRequest {
    #[schema(value_type = f64)]
    pub price: Decimal,
}

/// Request body for buying a property.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// Buyer owner id. Defaults to the authenticated owner.
    pub buyer_id: Option<i32>,
}

/// Outcome of a purchase: the property after the transfer and its sale trace.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PurchaseResponse {
    pub property: PropertyResponse,
    pub trace: PropertyTraceResponse,
}

// ===================== Property images =====================

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImageRequest {
    pub property_id: i32,
    pub file_url: String,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyImageResponse {
    pub id: i32,
    pub property_id: i32,
    pub file_url: String,
    pub enabled: bool,
}

// ===================== Property traces =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTraceRequest {
    /// Ignored on creation, where the sale is stamped with the current time.
    pub date_sale: Option<DateTime<Utc>>,
    pub name: String,
    #[schema(value_type = f64)]
    pub value: Decimal,
    #[serde(default)]
    #[schema(value_type = f64)]
    pub tax: Decimal,
    pub property_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyTraceResponse {
    pub id: i32,
    pub date_sale: DateTime<Utc>,
    pub name: String,
    #[schema(value_type = f64)]
    pub value: Decimal,
    #[schema(value_type = f64)]
    pub tax: Decimal,
    pub property_id: i32,
}
