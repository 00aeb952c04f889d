use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::identity::Identified;
use crate::validation::{require_positive, require_text, ValidationError};

/// A listed property.
///
/// `owner_id` is a plain reference to an owner row; `None` means nobody owns it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub price: Decimal,
    /// Year the property was built.
    pub year: i32,
    pub owner_id: Option<i32>,
    pub for_sale: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Identified for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}

impl Model {
    /// Builds an unsaved property (id 0).
    ///
    /// When `for_sale` is not given, an unowned property is for sale and an owned one is not.
    pub fn new(
        name: &str,
        address: &str,
        price: Decimal,
        year: i32,
        owner_id: Option<i32>,
        for_sale: Option<bool>,
    ) -> Result<Self, ValidationError> {
        require_text("Name", name)?;
        require_text("Address", address)?;
        require_positive("Price", price)?;

        Ok(Self {
            id: 0,
            name: name.to_string(),
            address: address.to_string(),
            price,
            year,
            owner_id,
            for_sale: for_sale.unwrap_or(owner_id.is_none()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unowned_property_defaults_to_for_sale() {
        let property = Model::new("Casa de Playa", "Calle 123", Decimal::new(150000, 0), 2010, None, None).unwrap();
        assert!(property.for_sale);
        assert_eq!(property.id, 0);
    }

    #[test]
    fn test_owned_property_defaults_to_not_for_sale() {
        let property = Model::new("Casa de Campo", "Vereda 7", Decimal::new(350000, 0), 2020, Some(1), None).unwrap();
        assert!(!property.for_sale);
    }

    #[test]
    fn test_explicit_for_sale_wins_over_owner() {
        let owned = Model::new("A", "B", Decimal::ONE, 2000, Some(3), Some(true)).unwrap();
        assert!(owned.for_sale);

        let unowned = Model::new("A", "B", Decimal::ONE, 2000, None, Some(false)).unwrap();
        assert!(!unowned.for_sale);
    }

    #[test]
    fn test_blank_name_and_address_are_rejected() {
        let err = Model::new("  ", "Calle 123", Decimal::ONE, 2000, None, None).unwrap_err();
        assert_eq!(err, ValidationError::Blank("Name"));

        let err = Model::new("Casa", "", Decimal::ONE, 2000, None, None).unwrap_err();
        assert_eq!(err, ValidationError::Blank("Address"));
    }

    #[test]
    fn test_non_positive_price_is_rejected() {
        let err = Model::new("Casa", "Calle 123", Decimal::ZERO, 2000, None, None).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive("Price"));

        let err = Model::new("Casa", "Calle 123", Decimal::new(-5, 0), 2000, None, None).unwrap_err();
        assert_eq!(err, ValidationError::NotPositive("Price"));
    }
}
