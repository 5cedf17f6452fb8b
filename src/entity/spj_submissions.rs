//! Entitas pengajuan SPJ

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "spj_submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub rup_id: String,
    pub year: i32,
    pub activity_name: String,
    #[sea_orm(column_type = "Text")]
    pub activity: String,
    pub status: String,
    pub operator_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OperatorId",
        to = "super::users::Column::Id"
    )]
    Operator,
    #[sea_orm(has_many = "super::spj_forms::Entity")]
    Forms,
    #[sea_orm(has_one = "super::verification_sheets::Entity")]
    VerificationSheet,
    #[sea_orm(has_many = "super::activity_logs::Entity")]
    ActivityLogs,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Operator.def()
    }
}

impl Related<super::spj_forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Forms.def()
    }
}

impl Related<super::verification_sheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::VerificationSheet.def()
    }
}

impl Related<super::activity_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Konversi model basis data ke entitas bisnis
impl Model {
    pub fn into_submission(self) -> crate::models::spj::entities::SpjSubmission {
        use crate::models::spj::entities::{SpjStatus, SpjSubmission};
        use chrono::{DateTime, Utc};

        SpjSubmission {
            id: self.id,
            rup_id: self.rup_id,
            year: self.year,
            activity_name: self.activity_name,
            activity: self.activity,
            status: self.status.parse::<SpjStatus>().unwrap_or(SpjStatus::Draft),
            operator_id: self.operator_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }

    pub fn into_metadata(self) -> crate::models::spj::entities::SpjMetadata {
        use crate::models::spj::entities::{SpjMetadata, SpjStatus};

        SpjMetadata {
            rup_id: self.rup_id,
            year: self.year,
            activity_name: self.activity_name,
            activity: self.activity,
            status: self.status.parse::<SpjStatus>().unwrap_or(SpjStatus::Draft),
        }
    }
}
