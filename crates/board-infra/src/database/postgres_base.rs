use std::marker::PhantomData;

use sea_orm::{ConnectionTrait, DbErr, EntityTrait, PrimaryKeyTrait, SqlErr};

use board_core::error::RepoError;

/// Map a SeaORM error onto the repository error kinds.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    if let Some(SqlErr::ForeignKeyConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}

/// Table access shared by the PostgreSQL repositories.
///
/// Borrows any SeaORM connection: a pooled `DbConn` or an open
/// `DatabaseTransaction`.
pub struct PostgresBaseRepository<'c, C, E> {
    pub(crate) db: &'c C,
    _entity: PhantomData<fn() -> E>,
}

impl<'c, C, E> PostgresBaseRepository<'c, C, E>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    pub fn new(db: &'c C) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) async fn find_model(&self, id: i64) -> Result<Option<E::Model>, RepoError>
    where
        i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        E::find_by_id(id).one(self.db).await.map_err(map_db_err)
    }

    /// Delete one row by primary key; a missing row is `RepoError::NotFound`.
    pub(crate) async fn delete_model(&self, id: i64) -> Result<(), RepoError>
    where
        i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
    {
        let result = E::delete_by_id(id)
            .exec(self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
