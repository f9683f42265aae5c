//! Passwort-Hashing mit Argon2id
//!
//! Jeder Hash bekommt einen frischen Zufalls-Salt; der PHC-String traegt
//! Algorithmus, Parameter und Salt, sodass nur der Hash selbst gespeichert
//! werden muss. Die Kostenparameter sind fest und begrenzen den
//! Brute-Force-Durchsatz bei interaktiv vertretbarer Latenz.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::error::AuthError;

/// Argon2id-Parameter (OWASP-Profil fuer interaktive Logins)
///
/// - Speicher: 19 MiB
/// - Iterationen: 2
/// - Parallelismus: 1
fn argon2_instanz() -> Argon2<'static> {
    let params = Params::new(
        19 * 1024, // m_cost: 19 MiB
        2,         // t_cost: 2 Iterationen
        1,         // p_cost: 1 Thread
        None,      // output_len: Standard (32 Bytes)
    )
    .expect("Argon2-Parameter ungueltig");

    Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params)
}

/// Hasht ein Passwort mit frischem Zufalls-Salt
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    argon2_instanz()
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Prueft ein Klartext-Passwort gegen einen gespeicherten PHC-Hash
///
/// `Ok(false)` bedeutet falsches Passwort; ein unlesbarer Hash ist ein Fehler.
pub fn passwort_pruefen(passwort: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

    match argon2_instanz().verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashen_und_pruefen() {
        let passwort = "mindestens_acht_zeichen";
        let hash = passwort_hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(hash.starts_with("$argon2id$"));
        assert_ne!(hash, passwort, "Hash darf nie dem Klartext entsprechen");

        let korrekt = passwort_pruefen(passwort, &hash).expect("Pruefung fehlgeschlagen");
        assert!(korrekt);
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hash = passwort_hashen("richtiges_passwort").unwrap();
        let korrekt = passwort_pruefen("falsches_passwort", &hash).unwrap();
        assert!(!korrekt);
    }

    #[test]
    fn gleiches_passwort_verschiedene_hashes() {
        let passwort = "gleiches_passwort";
        let hash1 = passwort_hashen(passwort).unwrap();
        let hash2 = passwort_hashen(passwort).unwrap();

        // Salt-Eindeutigkeit: zwei Hashes desselben Klartexts unterscheiden sich
        assert_ne!(hash1, hash2);
        // beide verifizieren trotzdem gegen den Klartext
        assert!(passwort_pruefen(passwort, &hash1).unwrap());
        assert!(passwort_pruefen(passwort, &hash2).unwrap());
        // und lehnen einen fremden Klartext ab
        assert!(!passwort_pruefen("anderes_passwort", &hash1).unwrap());
        assert!(!passwort_pruefen("anderes_passwort", &hash2).unwrap());
    }

    #[test]
    fn ungueltiges_hash_format_gibt_fehler() {
        let ergebnis = passwort_pruefen("passwort", "kein_gueltiger_hash");
        assert!(matches!(ergebnis, Err(AuthError::PasswortHashing(_))));
    }
}
