//! Conversions from stored rows to the transport types in `common`.

use common::{OwnerResponse, PropertyImageResponse, PropertyResponse, PropertyTraceResponse};
use model::entities::{owner, property, property_image, property_trace};

/// Drops the password hash.
pub fn owner_response(model: owner::Model) -> OwnerResponse {
    OwnerResponse {
        id: model.id,
        name: model.name,
        address: model.address,
        photo: model.photo,
        birthday: model.birthday,
        username: model.username,
    }
}

pub fn property_response(model: property::Model) -> PropertyResponse {
    PropertyResponse {
        id: model.id,
        name: model.name,
        address: model.address,
        price: model.price,
        year: model.year,
        owner_id: model.owner_id,
        for_sale: model.for_sale,
    }
}

pub fn image_response(model: property_image::Model) -> PropertyImageResponse {
    PropertyImageResponse {
        id: model.id,
        property_id: model.property_id,
        file_url: model.file,
        enabled: model.enabled,
    }
}

pub fn trace_response(model: property_trace::Model) -> PropertyTraceResponse {
    PropertyTraceResponse {
        id: model.id,
        date_sale: model.date_sale,
        name: model.name,
        value: model.value,
        tax: model.tax,
        property_id: model.property_id,
    }
}
