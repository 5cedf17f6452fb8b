use super::SeaOrmStorage;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{Result, SuperjeError};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
    responses::UserSummary,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// Membuat pengguna; `req.password` sudah berupa hash Argon2
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            password_hash: Set(req.password),
            role: Set(req.role.to_string()),
            nip: Set(req.nip),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal membuat pengguna: {e}")))?;

        Ok(result.into_user())
    }

    /// Mengambil pengguna berdasarkan ID
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil pengguna: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// Mengambil pengguna berdasarkan email
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil pengguna: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// Daftar seluruh pengguna, terbaru dulu
    pub async fn list_users_impl(&self) -> Result<Vec<UserSummary>> {
        let users = Users::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil daftar pengguna: {e}")))?;

        Ok(users
            .into_iter()
            .map(|m| UserSummary::from(m.into_user()))
            .collect())
    }

    /// Memperbarui data pengguna
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // Pastikan pengguna ada
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(update.name),
            email: Set(update.email),
            nip: Set(update.nip),
            role: Set(update.role.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal memperbarui pengguna: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// Menghapus pengguna
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menghapus pengguna: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Mengganti hash kata sandi pengguna
    pub async fn update_password_impl(&self, id: i64, password_hash: &str) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(
                Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengganti kata sandi: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// Menghitung jumlah pengguna
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal menghitung pengguna: {e}")))?;

        Ok(count)
    }
}
