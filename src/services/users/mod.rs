pub mod manage;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// Layanan manajemen pengguna (khusus ADMIN)
pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // Daftar seluruh pengguna
    pub async fn list_users(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        manage::handle_list_users(self, request).await
    }

    // Perbarui data pengguna
    pub async fn update_user(
        &self,
        user_id: i64,
        update_request: crate::models::users::requests::UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_update_user(self, user_id, update_request, request).await
    }

    // Hapus pengguna
    pub async fn delete_user(
        &self,
        user_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_delete_user(self, user_id, request).await
    }
}
