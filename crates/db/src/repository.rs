//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Der Auth-Service arbeitet ausschliesslich
//! gegen `KontoRepository`; die SQLite-Implementierung liegt in `sqlite/`.

pub use crate::error::DbResult;

use crate::models::{KontoRecord, NeuesKonto};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://gobar.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
    /// Wartezeit auf eine freie Pool-Verbindung in Sekunden
    pub timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://gobar.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
            timeout_secs: 5,
        }
    }
}

/// Repository fuer Konto-Datenzugriffe
///
/// Alle Operationen sind blockierende I/O und muessen von mehreren
/// gleichzeitigen Requests sicher aufrufbar sein.
#[allow(async_fn_in_trait)]
pub trait KontoRepository: Send + Sync {
    /// Legt ein neues Konto an.
    ///
    /// Die UNIQUE-Constraint auf `email` ist das massgebliche
    /// Duplikat-Signal: ein gleichzeitiger Insert derselben Adresse
    /// schlaegt mit `DbError::Eindeutigkeit` fehl, niemals still.
    async fn erstellen(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord>;

    /// Laedt ein Konto anhand der E-Mail-Adresse (exakter Byte-Vergleich,
    /// keine Normalisierung von Gross-/Kleinschreibung).
    async fn laden_nach_email(&self, email: &str) -> DbResult<Option<KontoRecord>>;

    /// Anzahl aller Konten
    async fn anzahl(&self) -> DbResult<i64>;
}
