use sea_orm::EntityTrait;

/// An entity whose rows are addressed by a single integer id column.
///
/// The generic repository relies on this instead of looking the id up at runtime.
pub trait Identified: EntityTrait {
    fn id_column() -> Self::Column;

    fn id_of(model: &Self::Model) -> i32;
}
