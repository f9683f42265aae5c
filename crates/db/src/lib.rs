//! gobar-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern fuer den Kontenspeicher
//! bereit: SQLite-Pool mit Migrationen, das `KontoRepository`-Trait und
//! dessen SQLite-Implementierung.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use models::{KontoRecord, NeuesKonto};
pub use repository::{DatabaseConfig, KontoRepository};
pub use sqlite::SqliteDb;
