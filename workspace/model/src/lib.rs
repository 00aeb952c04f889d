pub mod entities;
pub mod identity;
pub mod validation;

pub use identity::Identified;
pub use validation::ValidationError;
