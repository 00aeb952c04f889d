use model::ValidationError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::error;

/// Fixed message for a second sale of the same property.
pub const ALREADY_PURCHASED_MESSAGE: &str =
    "The property has already been purchased and cannot be purchased again.";

/// Error types for the service layer
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(DbErr),

    /// A field value was rejected when building an entity
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{entity} with ID {id} not found.")]
    NotFound { entity: &'static str, id: i32 },

    /// The property already has a sale trace
    #[error("{}", ALREADY_PURCHASED_MESSAGE)]
    AlreadyPurchased { property_id: i32 },

    #[error("Property with ID {property_id} is not for sale.")]
    NotForSale { property_id: i32 },

    #[error("Username '{0}' already exists")]
    UsernameTaken(String),

    /// Hashing or parsing a stored password hash failed
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Signing or verifying a bearer token failed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        ServiceError::NotFound { entity, id }
    }

    /// Stable machine-readable code, used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Database(_) => "DATABASE_ERROR",
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::AlreadyPurchased { .. } => "PROPERTY_ALREADY_PURCHASED",
            ServiceError::NotForSale { .. } => "PROPERTY_NOT_FOR_SALE",
            ServiceError::UsernameTaken(_) => "USERNAME_ALREADY_EXISTS",
            ServiceError::PasswordHash(_) => "PASSWORD_HASH_ERROR",
            ServiceError::Token(_) => "TOKEN_ERROR",
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        error!(?err, "Database error");
        ServiceError::Database(err)
    }
}

/// True when the store refused a write because of a unique index.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Type alias for Result with ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;
