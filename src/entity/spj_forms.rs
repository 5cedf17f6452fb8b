//! Entitas form SPJ (11 form per pengajuan)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "spj_forms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub spj_id: i64,
    pub form_type: i32,
    pub data: Json,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(nullable)]
    pub scan_url: Option<String>,
    #[sea_orm(nullable)]
    pub scan_file_type: Option<String>,
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
    #[sea_orm(has_many = "super::signature_records::Entity")]
    SignatureRecords,
}

impl Related<super::spj_submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl Related<super::signature_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SignatureRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// Konversi model basis data ke entitas bisnis
impl Model {
    pub fn into_form(self) -> crate::models::spj::entities::SpjForm {
        use crate::models::spj::entities::{FormStatus, SpjForm};
        use chrono::{DateTime, Utc};

        SpjForm {
            id: self.id,
            spj_id: self.spj_id,
            form_type: self.form_type,
            data: self.data,
            status: self
                .status
                .parse::<FormStatus>()
                .unwrap_or(FormStatus::Filled),
            notes: self.notes,
            scan_url: self.scan_url,
            scan_file_type: self.scan_file_type,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
