//! SQLite-Backend-Implementierung fuer das Konto-Repository

pub mod konten;
pub mod pool;

pub use pool::SqliteDb;
