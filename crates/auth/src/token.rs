//! Token-Ausstellung (signierte Bearer-Tokens)
//!
//! Stellt kompakte, zeitlich begrenzte JWTs (HS256) aus. Das Signier-Secret
//! wird einmal beim Start geladen; ein leeres Secret ist ein fataler
//! Startfehler und niemals ein Request-Fehler. Das Secret wird weder
//! geloggt noch serialisiert.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Standard-Gueltigkeitsdauer eines Tokens in Sekunden
pub const STANDARD_TTL_SECS: u64 = 3600;

/// Standard-Aussteller-Kennung
pub const STANDARD_ISSUER: &str = "gobar-api";

/// Claims eines ausgestellten Tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Konto-ID fuer die der Token Identitaet behauptet
    pub sub: Uuid,
    /// Ausstellungszeitpunkt (Unix-Sekunden)
    pub iat: i64,
    /// Ablaufzeitpunkt (iat + TTL)
    pub exp: i64,
    /// Aussteller-Kennung
    pub iss: String,
    /// Zeitpunkt der eigentlichen Authentifizierung
    pub auth_time: i64,
}

/// Stellt signierte Tokens aus und prueft sie
///
/// Haelt die Schluessel prozessweit; wird per `Arc` an die Handler gereicht.
pub struct TokenAussteller {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: u64,
    issuer: String,
}

impl TokenAussteller {
    /// Baut den Aussteller aus Secret, TTL und Aussteller-Kennung
    ///
    /// Schlaegt bei leerem Secret fehl – der Prozess darf dann nicht starten.
    pub fn neu(secret: &str, ttl_secs: u64, issuer: impl Into<String>) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::TokenSignierung(
                "Signier-Secret ist nicht konfiguriert".into(),
            ));
        }

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
            issuer: issuer.into(),
        })
    }

    /// Gueltigkeitsdauer in Sekunden (fuer `expires_in` in Antworten)
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }

    /// Stellt einen Token fuer das gegebene Konto aus
    pub fn ausstellen(&self, subject: Uuid) -> AuthResult<String> {
        self.ausstellen_mit_zeit(subject, Utc::now())
    }

    /// Stellt einen Token mit explizitem Ausstellungszeitpunkt aus
    pub fn ausstellen_mit_zeit(
        &self,
        subject: Uuid,
        jetzt: DateTime<Utc>,
    ) -> AuthResult<String> {
        let iat = jetzt.timestamp();
        let claims = TokenClaims {
            sub: subject,
            iat,
            exp: iat + self.ttl_secs as i64,
            iss: self.issuer.clone(),
            auth_time: iat,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenSignierung(e.to_string()))
    }

    /// Prueft Signatur, Ablauf und Aussteller eines Tokens
    pub fn pruefen(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);

        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|daten| daten.claims)
            .map_err(|e| AuthError::TokenUngueltig(e.to_string()))
    }
}

impl std::fmt::Debug for TokenAussteller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Schluesselmaterial bleibt aussen vor
        f.debug_struct("TokenAussteller")
            .field("ttl_secs", &self.ttl_secs)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
