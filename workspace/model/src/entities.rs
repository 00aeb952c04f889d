//! SeaORM entities for the four stored collections.
//!
//! References between them (property → owner, image/trace → property) are plain
//! integer columns. No foreign keys are declared and nothing cascades.

pub mod owner;
pub mod property;
pub mod property_image;
pub mod property_trace;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::owner::Entity as Owner;
    pub use super::property::Entity as Property;
    pub use super::property_image::Entity as PropertyImage;
    pub use super::property_trace::Entity as PropertyTrace;
}
