pub mod health;
pub mod owners;
pub mod properties;
pub mod property_images;
pub mod property_traces;
