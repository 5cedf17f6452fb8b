//! Entitas rekam tanda tangan elektronik (append-only)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "signature_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub form_id: i64,
    pub signer_id: i64,
    #[sea_orm(column_type = "Text")]
    pub signature_data: String,
    pub signed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::spj_forms::Entity",
        from = "Column::FormId",
        to = "super::spj_forms::Column::Id"
    )]
    Form,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SignerId",
        to = "super::users::Column::Id"
    )]
    Signer,
}

impl Related<super::spj_forms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Form.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Signer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
