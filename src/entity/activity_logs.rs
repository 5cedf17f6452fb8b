//! Entitas log aktivitas (append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub spj_id: i64,
    pub user_id: i64,
    pub action: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spj_submissions::Entity",
        from = "Column::SpjId",
        to = "super::spj_submissions::Column::Id"
    )]
    Submission,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::spj_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Konversi model basis data ke entitas bisnis
impl Model {
    pub fn into_entry(self) -> crate::models::activity_logs::entities::ActivityLogEntry {
        use chrono::{DateTime, Utc};

        crate::models::activity_logs::entities::ActivityLogEntry {
            id: self.id,
            spj_id: self.spj_id,
            user_id: self.user_id,
            action: self.action,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
