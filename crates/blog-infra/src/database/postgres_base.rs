use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    DbConn, DbErr, EntityTrait, IntoActiveModel, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
    SqlErr,
};

use blog_core::error::RepoError;
use blog_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Map a SeaORM error onto the repository taxonomy. Unique and foreign key
/// violations become `Constraint`, which handlers treat as a failed write.
pub(crate) fn map_db_error(err: DbErr) -> RepoError {
    if let Some(violation) = err.sql_err().and_then(constraint_violation) {
        return violation;
    }
    match err {
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

pub(crate) fn constraint_violation(err: SqlErr) -> Option<RepoError> {
    match err {
        SqlErr::UniqueConstraintViolation(msg) | SqlErr::ForeignKeyConstraintViolation(msg) => {
            Some(RepoError::Constraint(msg))
        }
        _ => None,
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync + Send,
    E::ActiveModel: sea_orm::ActiveModelTrait<Entity = E> + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: From<E::Model> + Into<E::ActiveModel> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_error)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<T>, RepoError> {
        let result = E::find().all(&self.db).await.map_err(map_db_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        // Single-statement upsert keyed on the primary key. Other unique
        // indexes still reject the row.
        let on_conflict = OnConflict::columns(E::PrimaryKey::iter().map(|key| key.into_column()))
            .update_columns(E::Column::iter())
            .to_owned();

        let active_model: E::ActiveModel = entity.into();
        let model = E::insert(active_model)
            .on_conflict(on_conflict)
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_error)?;

        Ok(model.into())
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
