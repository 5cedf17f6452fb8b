//! Entitas lembar verifikasi (maksimal satu per pengajuan)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "verification_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub spj_id: i64,
    #[sea_orm(nullable)]
    pub validator_id: Option<i64>,
    #[sea_orm(nullable)]
    pub verifier_id: Option<i64>,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub final_notes: Option<String>,
    #[sea_orm(nullable)]
    pub signed_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
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
        from = "Column::ValidatorId",
        to = "super::users::Column::Id"
    )]
    Validator,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::VerifierId",
        to = "super::users::Column::Id"
    )]
    Verifier,
}

impl Related<super::spj_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Konversi model basis data ke entitas bisnis
impl Model {
    pub fn into_sheet(self) -> crate::models::spj::entities::VerificationSheet {
        use chrono::{DateTime, Utc};

        crate::models::spj::entities::VerificationSheet {
            id: self.id,
            spj_id: self.spj_id,
            validator_id: self.validator_id,
            verifier_id: self.verifier_id,
            status: self.status,
            notes: self.notes,
            final_notes: self.final_notes,
            signed_at: self
                .signed_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
        }
    }
}
