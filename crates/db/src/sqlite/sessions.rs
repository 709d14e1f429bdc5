//! SQLite-Implementierung des SessionRepository

use async_trait::async_trait;
use miauw_core::AccountId;

use crate::error::{ist_eindeutigkeitsverletzung, DbError, DbResult};
use crate::models::Session;
use crate::repository::SessionRepository;
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl SessionRepository for SqliteDb {
    async fn create(&self, session: &Session) -> DbResult<()> {
        sqlx::query("INSERT INTO sessions (id, account_id, created_at) VALUES (?, ?, ?)")
            .bind(session.id.to_string())
            .bind(session.account_id.to_string())
            .bind(session.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let fremdschluessel = e
                    .as_database_error()
                    .map(|db| db.is_foreign_key_violation() || db.message().contains("FOREIGN KEY"))
                    .unwrap_or(false);
                if fremdschluessel {
                    DbError::nicht_gefunden(format!("Konto {}", session.account_id))
                } else if ist_eindeutigkeitsverletzung(&e) {
                    DbError::Konflikt(format!("Session {}", session.id))
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        Ok(())
    }
}

impl SqliteDb {
    /// Zaehlt die Sessions eines Kontos
    pub async fn session_count_for(&self, account_id: AccountId) -> DbResult<i64> {
        use sqlx::Row as _;

        let row = sqlx::query("SELECT COUNT(*) AS anzahl FROM sessions WHERE account_id = ?")
            .bind(account_id.to_string())
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("anzahl")?)
    }
}
