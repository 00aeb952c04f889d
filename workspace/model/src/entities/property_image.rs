use sea_orm::entity::prelude::*;

use crate::identity::Identified;
use crate::validation::{require_positive_id, require_text, ValidationError};

/// A picture attached to a property.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "property_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub property_id: i32,
    /// URL of the image file.
    pub file: String,
    /// Disabled images are kept but not shown.
    pub enabled: bool,
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
    pub fn new(property_id: i32, file: &str, enabled: bool) -> Result<Self, ValidationError> {
        require_positive_id("Property ID", property_id)?;
        require_text("File", file)?;

        Ok(Self {
            id: 0,
            property_id,
            file: file.to_string(),
            enabled,
        })
    }
}
