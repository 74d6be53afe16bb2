//! Member entity for SeaORM.

use sea_orm::entity::prelude::*;

use board_core::domain::{Member, MemberId};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub nickname: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Member.
impl From<Model> for Member {
    fn from(model: Model) -> Self {
        Member::restore(
            MemberId(model.id),
            model.nickname,
            model.created_at.into(),
            model.updated_at.into(),
        )
    }
}
