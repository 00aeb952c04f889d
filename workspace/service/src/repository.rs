//! Generic CRUD over any entity with an integer id column.

use std::marker::PhantomData;

use model::Identified;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityName, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};
use tracing::{debug, trace};

/// Table accessor for entity `E` over connection `C`.
///
/// `C` is either the pooled connection or an open transaction.
pub struct Repository<'c, E, C> {
    conn: &'c C,
    entity: PhantomData<E>,
}

impl<'c, E, C> Repository<'c, E, C> {
    pub fn new(conn: &'c C) -> Self {
        Self {
            conn,
            entity: PhantomData,
        }
    }
}

impl<'c, E, C> Repository<'c, E, C>
where
    E: Identified,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: Send,
    C: ConnectionTrait,
{
    /// Point lookup. A missing row is `None`, not an error.
    pub async fn get_by_id(&self, id: i32) -> Result<Option<E::Model>, DbErr> {
        trace!("Loading {} with ID {}", E::default().table_name(), id);
        E::find()
            .filter(E::id_column().eq(id))
            .one(self.conn)
            .await
    }

    pub async fn get_all(&self) -> Result<Vec<E::Model>, DbErr> {
        E::find().order_by_asc(E::id_column()).all(self.conn).await
    }

    /// Rows matching `condition`, ordered by id.
    pub async fn find(&self, condition: Condition) -> Result<Vec<E::Model>, DbErr> {
        E::find()
            .filter(condition)
            .order_by_asc(E::id_column())
            .all(self.conn)
            .await
    }

    /// Inserts `model` and returns the stored row.
    ///
    /// An id of 0 is left to the database to assign.
    pub async fn add(&self, model: E::Model) -> Result<E::Model, DbErr> {
        let id = E::id_of(&model);
        let mut active = model.into_active_model().reset_all();
        if id == 0 {
            active.not_set(E::id_column());
        }
        let stored = active.insert(self.conn).await?;
        debug!(
            "Inserted into {} with ID {}",
            E::default().table_name(),
            E::id_of(&stored)
        );
        Ok(stored)
    }

    /// Replaces the whole row with the same id. `None` if no such row exists.
    pub async fn update(&self, model: E::Model) -> Result<Option<E::Model>, DbErr> {
        let id = E::id_of(&model);
        if self.get_by_id(id).await?.is_none() {
            return Ok(None);
        }
        match model.into_active_model().reset_all().update(self.conn).await {
            Ok(updated) => Ok(Some(updated)),
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn remove(&self, model: &E::Model) -> Result<bool, DbErr> {
        self.remove_by_id(E::id_of(model)).await
    }

    /// Deletes the row with `id`. `false` when nothing was deleted.
    pub async fn remove_by_id(&self, id: i32) -> Result<bool, DbErr> {
        let result = E::delete_many()
            .filter(E::id_column().eq(id))
            .exec(self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_store;
    use model::entities::{owner, property, property_image};
    use rust_decimal::Decimal;
    use sea_orm::TransactionTrait;

    fn house(name: &str, price: i64) -> property::Model {
        property::Model::new(name, "Calle 123", Decimal::new(price, 0), 2010, None, None).unwrap()
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let store = setup_store().await;
        let repo = store.collection::<property::Entity>();

        let first = repo.add(house("Casa de Playa", 150000)).await.unwrap();
        let second = repo.add(house("Casa de Campo", 350000)).await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_add_keeps_explicit_id() {
        let store = setup_store().await;
        let repo = store.collection::<property_image::Entity>();

        let mut image = property_image::Model::new(1, "https://img/1.jpg", true).unwrap();
        image.id = 42;
        let stored = repo.add(image).await.unwrap();

        assert_eq!(stored.id, 42);
        assert!(repo.get_by_id(42).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_none() {
        let store = setup_store().await;
        let repo = store.collection::<owner::Entity>();
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_applies_condition() {
        let store = setup_store().await;
        let repo = store.collection::<property_image::Entity>();
        for (property_id, file) in [(1, "a.jpg"), (2, "b.jpg"), (1, "c.jpg")] {
            repo.add(property_image::Model::new(property_id, file, true).unwrap())
                .await
                .unwrap();
        }

        let found = repo
            .find(Condition::all().add(property_image::Column::PropertyId.eq(1)))
            .await
            .unwrap();
        let files: Vec<_> = found.iter().map(|image| image.file.as_str()).collect();
        assert_eq!(files, vec!["a.jpg", "c.jpg"]);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_row() {
        let store = setup_store().await;
        let repo = store.collection::<property::Entity>();
        let mut stored = repo.add(house("Casa de Playa", 150000)).await.unwrap();

        stored.price = Decimal::new(175000, 0);
        stored.for_sale = false;
        let updated = repo.update(stored.clone()).await.unwrap();

        assert_eq!(updated, Some(stored.clone()));
        assert_eq!(repo.get_by_id(stored.id).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_update_missing_row_is_none() {
        let store = setup_store().await;
        let repo = store.collection::<property::Entity>();

        let mut ghost = house("Ghost", 1);
        ghost.id = 77;
        assert_eq!(repo.update(ghost).await.unwrap(), None);
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_reports_whether_row_existed() {
        let store = setup_store().await;
        let repo = store.collection::<property::Entity>();
        let stored = repo.add(house("Casa de Playa", 150000)).await.unwrap();

        assert!(repo.remove(&stored).await.unwrap());
        assert!(!repo.remove(&stored).await.unwrap());
        assert!(!repo.remove_by_id(12345).await.unwrap());
    }

    #[tokio::test]
    async fn test_repository_over_rolled_back_transaction() {
        let store = setup_store().await;

        let txn = store.begin().await.unwrap();
        Repository::<property::Entity, _>::new(&txn)
            .add(house("Casa de Playa", 150000))
            .await
            .unwrap();
        txn.rollback().await.unwrap();

        assert!(store.collection::<property::Entity>().get_all().await.unwrap().is_empty());

        // Same write committed through a transaction is visible.
        let txn = store.connection().begin().await.unwrap();
        Repository::<property::Entity, _>::new(&txn)
            .add(house("Casa de Campo", 350000))
            .await
            .unwrap();
        txn.commit().await.unwrap();
        assert_eq!(store.collection::<property::Entity>().get_all().await.unwrap().len(), 1);
    }
}
