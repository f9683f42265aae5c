//! Eingabe-Validierung fuer Registrierung und Anmeldung
//!
//! Laeuft vor jeglichem I/O. Fehlende Pflichtfelder werden gesammelt
//! gemeldet (alle auf einmal, nicht nur das erste); Format- und
//! Staerkepruefungen folgen danach in fester Reihenfolge.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Muster: <lokal>@<domain>.<tld>, jeweils ohne Whitespace und '@'
static EMAIL_MUSTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("E-Mail-Muster ungueltig")
});

/// Mindestlaenge fuer Passwoerter (Zeichen)
const PASSWORT_MIN_ZEICHEN: usize = 8;

/// Validierungsfehler – immer ein Client-Fehler (400)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidierungsFehler {
    #[error("Request-Body ist leer")]
    LeereEingabe,

    #[error("Pflichtfelder fehlen: {}", .0.join(", "))]
    FelderFehlen(Vec<&'static str>),

    #[error("Ungueltiges E-Mail-Format")]
    EmailFormat,

    #[error("Passwort muss mindestens {PASSWORT_MIN_ZEICHEN} Zeichen haben")]
    PasswortZuSchwach,
}

impl ValidierungsFehler {
    /// Die Namen der fehlenden Felder (leer bei anderen Varianten)
    pub fn fehlende_felder(&self) -> &[&'static str] {
        match self {
            Self::FelderFehlen(felder) => felder,
            _ => &[],
        }
    }
}

/// Validierte Registrierungs-Eingabe
#[derive(Debug, Clone)]
pub struct SignupEingabe {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Validierte Anmelde-Eingabe
#[derive(Debug, Clone)]
pub struct LoginEingabe {
    pub email: String,
    pub password: String,
}

/// Prueft die Registrierungs-Eingabe vollstaendig
///
/// Reihenfolge: leerer Body, fehlende Felder (gesammelt), E-Mail-Format,
/// Passwortstaerke.
pub fn registrierung_pruefen(body: &Value) -> Result<SignupEingabe, ValidierungsFehler> {
    nicht_leer(body)?;

    let name = feld(body, "name");
    let email = feld(body, "email");
    let password = feld(body, "password");

    let fehlend: Vec<&'static str> = [
        ("name", &name),
        ("email", &email),
        ("password", &password),
    ]
    .iter()
    .filter(|(_, wert)| wert.is_none())
    .map(|(feldname, _)| *feldname)
    .collect();

    if !fehlend.is_empty() {
        return Err(ValidierungsFehler::FelderFehlen(fehlend));
    }

    let (name, email, password) = (name.unwrap(), email.unwrap(), password.unwrap());

    if !EMAIL_MUSTER.is_match(&email) {
        return Err(ValidierungsFehler::EmailFormat);
    }

    if password.chars().count() < PASSWORT_MIN_ZEICHEN {
        return Err(ValidierungsFehler::PasswortZuSchwach);
    }

    Ok(SignupEingabe {
        name,
        email,
        password,
    })
}

/// Prueft die Anmelde-Eingabe
///
/// Nur Praesenz von `email` und `password`; Format und Staerke werden beim
/// Login nicht erneut geprueft (das gespeicherte Konto war bereits gueltig).
pub fn anmeldung_pruefen(body: &Value) -> Result<LoginEingabe, ValidierungsFehler> {
    nicht_leer(body)?;

    let email = feld(body, "email");
    let password = feld(body, "password");

    let fehlend: Vec<&'static str> = [("email", &email), ("password", &password)]
        .iter()
        .filter(|(_, wert)| wert.is_none())
        .map(|(feldname, _)| *feldname)
        .collect();

    if !fehlend.is_empty() {
        return Err(ValidierungsFehler::FelderFehlen(fehlend));
    }

    Ok(LoginEingabe {
        email: email.unwrap(),
        password: password.unwrap(),
    })
}

/// Liest ein String-Feld; leere Strings gelten als fehlend
fn feld(body: &Value, name: &str) -> Option<String> {
    body.get(name)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn nicht_leer(body: &Value) -> Result<(), ValidierungsFehler> {
    match body.as_object() {
        Some(obj) if !obj.is_empty() => Ok(()),
        _ => Err(ValidierungsFehler::LeereEingabe),
    }
}
