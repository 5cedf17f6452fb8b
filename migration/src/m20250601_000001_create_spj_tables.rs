use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Tabel pengguna
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Nip).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Tabel pengajuan SPJ
        manager
            .create_table(
                Table::create()
                    .table(SpjSubmissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpjSubmissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpjSubmissions::RupId).string().not_null())
                    .col(ColumnDef::new(SpjSubmissions::Year).integer().not_null())
                    .col(
                        ColumnDef::new(SpjSubmissions::ActivityName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SpjSubmissions::Activity).text().not_null())
                    .col(ColumnDef::new(SpjSubmissions::Status).string().not_null())
                    .col(
                        ColumnDef::new(SpjSubmissions::OperatorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpjSubmissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SpjSubmissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SpjSubmissions::Table, SpjSubmissions::OperatorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tabel form SPJ: 11 form per pengajuan, unik per (spj_id, form_type)
        manager
            .create_table(
                Table::create()
                    .table(SpjForms::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SpjForms::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SpjForms::SpjId).big_integer().not_null())
                    .col(ColumnDef::new(SpjForms::FormType).integer().not_null())
                    .col(ColumnDef::new(SpjForms::Data).json().not_null())
                    .col(ColumnDef::new(SpjForms::Status).string().not_null())
                    .col(ColumnDef::new(SpjForms::Notes).text().null())
                    .col(ColumnDef::new(SpjForms::ScanUrl).string().null())
                    .col(ColumnDef::new(SpjForms::ScanFileType).string().null())
                    .col(ColumnDef::new(SpjForms::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(SpjForms::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(SpjForms::Table, SpjForms::SpjId)
                            .to(SpjSubmissions::Table, SpjSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spj_forms_spj_id_form_type")
                    .table(SpjForms::Table)
                    .col(SpjForms::SpjId)
                    .col(SpjForms::FormType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Tabel rekam tanda tangan elektronik (append-only)
        manager
            .create_table(
                Table::create()
                    .table(SignatureRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SignatureRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SignatureRecords::FormId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SignatureRecords::SignerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SignatureRecords::SignatureData)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SignatureRecords::SignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SignatureRecords::Table, SignatureRecords::FormId)
                            .to(SpjForms::Table, SpjForms::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SignatureRecords::Table, SignatureRecords::SignerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Tabel lembar verifikasi: maksimal satu per pengajuan
        manager
            .create_table(
                Table::create()
                    .table(VerificationSheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VerificationSheets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::SpjId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::ValidatorId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::VerifierId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(VerificationSheets::Notes).text().null())
                    .col(ColumnDef::new(VerificationSheets::FinalNotes).text().null())
                    .col(
                        ColumnDef::new(VerificationSheets::SignedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VerificationSheets::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(VerificationSheets::Table, VerificationSheets::SpjId)
                            .to(SpjSubmissions::Table, SpjSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Tabel log aktivitas (append-only)
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::SpjId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string().not_null())
                    .col(
                        ColumnDef::new(ActivityLogs::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ActivityLogs::Table, ActivityLogs::SpjId)
                            .to(SpjSubmissions::Table, SpjSubmissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_spj_id")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::SpjId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VerificationSheets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SignatureRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpjForms::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SpjSubmissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    Role,
    Nip,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SpjSubmissions {
    Table,
    Id,
    RupId,
    Year,
    ActivityName,
    Activity,
    Status,
    OperatorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SpjForms {
    Table,
    Id,
    SpjId,
    FormType,
    Data,
    Status,
    Notes,
    ScanUrl,
    ScanFileType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SignatureRecords {
    Table,
    Id,
    FormId,
    SignerId,
    SignatureData,
    SignedAt,
}

#[derive(DeriveIden)]
enum VerificationSheets {
    Table,
    Id,
    SpjId,
    ValidatorId,
    VerifierId,
    Status,
    Notes,
    FinalNotes,
    SignedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    SpjId,
    UserId,
    Action,
    CreatedAt,
}
