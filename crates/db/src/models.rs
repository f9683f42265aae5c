//! Datenbankmodelle fuer Gobar
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank und dienen
//! als reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Konto-Datensatz aus der Datenbank
///
/// `password_hash` verlaesst dieses Crate nur in Richtung Auth-Service
/// und taucht in keiner HTTP-Antwort auf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKonto<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
}
