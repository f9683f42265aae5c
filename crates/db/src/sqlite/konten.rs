//! SQLite-Implementierung des KontoRepository

use chrono::Utc;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{KontoRecord, NeuesKonto};
use crate::repository::{DbResult, KontoRepository};
use crate::sqlite::pool::SqliteDb;

impl KontoRepository for SqliteDb {
    async fn erstellen(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO konten (id, name, email, password_hash, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.name)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // UNIQUE-Verletzung auf email ist das massgebliche Duplikat-Signal
            if e.as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false)
            {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits registriert", data.email))
            } else {
                DbError::from(e)
            }
        })?;

        Ok(KontoRecord {
            id,
            name: data.name.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            created_at: now,
        })
    }

    async fn laden_nach_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let row = sqlx::query(
            "SELECT id, name, email, password_hash, created_at
             FROM konten WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| zeile_zu_konto(&r)).transpose()
    }

    async fn anzahl(&self) -> DbResult<i64> {
        use sqlx::Row as _;

        let row = sqlx::query("SELECT COUNT(*) AS n FROM konten")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("n")?)
    }
}

fn zeile_zu_konto(row: &sqlx::sqlite::SqliteRow) -> DbResult<KontoRecord> {
    use sqlx::Row as _;

    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(KontoRecord {
        id,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at,
    })
}
