use super::SeaOrmStorage;
use crate::entity::prelude::{ActivityLogs, SpjSubmissions, Users};
use crate::entity::activity_logs;
use crate::errors::{Result, SuperjeError};
use crate::models::activity_logs::responses::{
    ActivityLogListItem, ActivityLogSpj, ActivityLogUser,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// Daftar log aktivitas, terbaru dulu, digabung identitas pelaku dan
    /// ringkasan SPJ. Entri yang pelakunya atau SPJ-nya sudah terhapus
    /// dilewati.
    pub async fn list_activity_logs_impl(&self) -> Result<Vec<ActivityLogListItem>> {
        let logs = ActivityLogs::find()
            .order_by_desc(activity_logs::Column::CreatedAt)
            .order_by_desc(activity_logs::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil log aktivitas: {e}")))?;

        if logs.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = logs.iter().map(|l| l.user_id).collect();
        let spj_ids: Vec<i64> = logs.iter().map(|l| l.spj_id).collect();

        let users: HashMap<i64, ActivityLogUser> = Users::find()
            .filter(crate::entity::users::Column::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil pengguna log: {e}")))?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    ActivityLogUser {
                        id: u.id,
                        name: u.name,
                        role: u.role,
                        nip: u.nip,
                    },
                )
            })
            .collect();

        let submissions: HashMap<i64, ActivityLogSpj> = SpjSubmissions::find()
            .filter(crate::entity::spj_submissions::Column::Id.is_in(spj_ids))
            .all(&self.db)
            .await
            .map_err(|e| SuperjeError::database_operation(format!("Gagal mengambil SPJ log: {e}")))?
            .into_iter()
            .map(|s| {
                (
                    s.id,
                    ActivityLogSpj {
                        id: s.id,
                        rup_id: s.rup_id,
                        year: s.year,
                        activity_name: s.activity_name,
                        status: s.status,
                    },
                )
            })
            .collect();

        Ok(logs
            .into_iter()
            .filter_map(|log| {
                let user = users.get(&log.user_id)?.clone();
                let spj = submissions.get(&log.spj_id)?.clone();
                let entry = log.into_entry();
                Some(ActivityLogListItem {
                    id: entry.id,
                    spj_id: entry.spj_id,
                    action: entry.action,
                    created_at: entry.created_at,
                    user,
                    spj,
                })
            })
            .collect())
    }
}
