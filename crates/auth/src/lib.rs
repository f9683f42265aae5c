//! gobar-auth – Auth-Service
//!
//! Dieses Crate implementiert:
//! - Eingabe-Validierung (Pflichtfelder, E-Mail-Format, Passwortstaerke)
//! - Passwort-Hashing mit Argon2id
//! - KontoService (Registrierung und Anmeldung gegen das KontoRepository)
//! - TokenAussteller (signierte, zeitlich begrenzte Bearer-Tokens)

pub mod error;
pub mod passwort;
pub mod service;
pub mod token;
pub mod validierung;

// Bequeme Re-Exporte
pub use error::{AuthError, AuthResult};
pub use passwort::{passwort_hashen, passwort_pruefen};
pub use service::{Anmeldung, KontoService};
pub use token::{TokenAussteller, TokenClaims};
pub use validierung::{
    anmeldung_pruefen, registrierung_pruefen, LoginEingabe, SignupEingabe, ValidierungsFehler,
};
