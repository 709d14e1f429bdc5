//! SQLite-Implementierung des AccountRepository

use async_trait::async_trait;
use chrono::Utc;
use miauw_core::AccountId;
use uuid::Uuid;

use crate::error::{ist_eindeutigkeitsverletzung, DbError, DbResult};
use crate::models::Account;
use crate::repository::AccountRepository;
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl AccountRepository for SqliteDb {
    async fn create(&self, account: &Account) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO accounts (id, password_hash, verified, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(account.id.to_string())
        .bind(&account.password_hash)
        .bind(account.verified as i64)
        .bind(account.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_eindeutigkeitsverletzung(&e) {
                DbError::Konflikt(format!("Konto {}", account.id))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> DbResult<Option<Account>> {
        let row = sqlx::query(
            "SELECT id, password_hash, verified, created_at
             FROM accounts WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_account(&r)).transpose()
    }
}

impl SqliteDb {
    /// Setzt das `verified`-Flag eines Kontos
    ///
    /// Einstiegspunkt fuer den externen Verifikationsprozess. Gibt `false`
    /// zurueck wenn das Konto nicht existiert.
    pub async fn mark_verified(&self, id: AccountId) -> DbResult<bool> {
        let affected = sqlx::query("UPDATE accounts SET verified = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_account(row: &sqlx::sqlite::SqliteRow) -> DbResult<Account> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let verified: i64 = row.try_get("verified")?;

    Ok(Account {
        id: AccountId(id),
        password_hash: row.try_get("password_hash")?,
        verified: verified != 0,
        created_at,
    })
}
