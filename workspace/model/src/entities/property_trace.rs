use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use crate::identity::Identified;
use crate::validation::{require_positive, require_text, ValidationError};

/// The record of a property sale.
///
/// A property has at most one trace; the `property_id` column carries a unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "property_traces")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub date_sale: DateTimeUtc,
    /// Buyer or transaction label.
    pub name: String,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub value: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub tax: Decimal,
    #[sea_orm(unique)]
    pub property_id: i32,
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
    pub fn new(
        date_sale: DateTimeUtc,
        name: &str,
        value: Decimal,
        tax: Decimal,
        property_id: i32,
    ) -> Result<Self, ValidationError> {
        require_text("Name", name)?;
        require_positive("Value", value)?;

        Ok(Self {
            id: 0,
            date_sale,
            name: name.to_string(),
            value,
            tax,
            property_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_trace_requires_name_and_positive_value() {
        let now = Utc::now();
        assert_eq!(
            Model::new(now, "", Decimal::ONE, Decimal::ZERO, 1).unwrap_err(),
            ValidationError::Blank("Name")
        );
        assert_eq!(
            Model::new(now, "Sale", Decimal::ZERO, Decimal::ZERO, 1).unwrap_err(),
            ValidationError::NotPositive("Value")
        );

        let trace = Model::new(now, "Sale", Decimal::new(150000, 0), Decimal::new(15000, 0), 1).unwrap();
        assert_eq!(trace.tax, Decimal::new(15000, 0));
        assert_eq!(trace.date_sale, now);
    }
}
