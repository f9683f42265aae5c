//! Fehlertypen fuer das Datenbank-Crate

use thiserror::Error;

/// Datenbank-Fehlertypen
#[derive(Debug, Error)]
pub enum DbError {
    #[error("Datensatz nicht gefunden: {0}")]
    NichtGefunden(String),

    #[error("Eindeutigkeitsverletzung: {0}")]
    Eindeutigkeit(String),

    #[error("Datenbank nicht erreichbar: {0}")]
    NichtErreichbar(String),

    #[error("SQLx-Fehler: {0}")]
    Sqlx(sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Interner DB-Fehler: {0}")]
    Intern(String),
}

impl DbError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// Gibt true zurueck wenn es sich um einen Eindeutigkeitsfehler handelt
    pub fn ist_eindeutigkeit(&self) -> bool {
        matches!(self, Self::Eindeutigkeit(_))
            || matches!(self, Self::Sqlx(e) if {
                e.as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false)
            })
    }

    /// Gibt true zurueck wenn der Speicher nicht erreichbar war (Pool-Timeout,
    /// abgelehnte Verbindung). Solche Fehler duerfen vom Aufrufer wiederholt werden.
    pub fn ist_nicht_erreichbar(&self) -> bool {
        matches!(self, Self::NichtErreichbar(_))
    }
}

/// Klassifiziert SQLx-Fehler: Verbindungsprobleme werden von generischen
/// Fehlern getrennt, damit der HTTP-Layer 503 statt 500 melden kann.
impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::NichtErreichbar(e.to_string())
            }
            sqlx::Error::Io(io) => Self::NichtErreichbar(io.to_string()),
            andere => Self::Sqlx(andere),
        }
    }
}

/// Result-Alias fuer das Datenbank-Crate
pub type DbResult<T> = Result<T, DbError>;
