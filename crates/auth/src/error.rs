//! Fehlertypen fuer den Auth-Service

use thiserror::Error;

use crate::validierung::ValidierungsFehler;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error(transparent)]
    Validierung(#[from] ValidierungsFehler),

    // --- Registrierung ---
    #[error("E-Mail bereits registriert: {0}")]
    EmailVergeben(String),

    // --- Anmeldung ---
    #[error("Konto nicht gefunden")]
    KontoNichtGefunden,

    #[error("Passwort falsch")]
    PasswortFalsch,

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Token ---
    #[error("Token-Signierung fehlgeschlagen: {0}")]
    TokenSignierung(String),

    #[error("Token ungueltig oder abgelaufen: {0}")]
    TokenUngueltig(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] gobar_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }

    /// HTTP-Statuscode fuer diesen Fehler
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validierung(_) | Self::EmailVergeben(_) => 400,
            Self::KontoNichtGefunden | Self::PasswortFalsch | Self::TokenUngueltig(_) => 401,
            Self::Datenbank(e) if e.ist_nicht_erreichbar() => 503,
            Self::Datenbank(_)
            | Self::PasswortHashing(_)
            | Self::TokenSignierung(_)
            | Self::Intern(_) => 500,
        }
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
