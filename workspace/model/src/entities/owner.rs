use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::identity::Identified;
use crate::validation::{require_text, ValidationError};

/// A person who can log into the API and hold properties.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    /// URL of the owner's photo.
    pub photo: String,
    pub birthday: NaiveDate,
    #[sea_orm(unique)]
    pub username: String,
    /// Argon2id hash in PHC string format. Never the clear-text password.
    pub password_hash: String,
}

// Properties reference owners by id only; nothing is enforced or cascaded.
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
    /// Builds an owner that has not been stored yet (id 0).
    ///
    /// The caller hashes the password; only the hash is kept.
    pub fn new(
        name: &str,
        address: &str,
        photo: &str,
        birthday: NaiveDate,
        username: &str,
        password_hash: String,
    ) -> Result<Self, ValidationError> {
        require_text("Username", username)?;
        require_text("Password hash", &password_hash)?;

        Ok(Self {
            id: 0,
            name: name.to_string(),
            address: address.to_string(),
            photo: photo.to_string(),
            birthday,
            username: username.to_string(),
            password_hash,
        })
    }
}
