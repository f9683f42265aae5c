//! Konto-Service fuer Gobar
//!
//! Zentraler Service fuer Registrierung und Anmeldung. Nutzt das
//! KontoRepository fuer die Persistenz und den TokenAussteller fuer die
//! Bearer-Tokens. Der Ablauf pro Request ist strikt linear:
//! Lookup/Insert -> Hash/Pruefung -> Token.

use std::sync::Arc;

use gobar_db::{models::NeuesKonto, repository::KontoRepository, KontoRecord};

use crate::{
    error::{AuthError, AuthResult},
    passwort::{passwort_hashen, passwort_pruefen},
    token::TokenAussteller,
    validierung::{LoginEingabe, SignupEingabe},
};

/// Ergebnis einer erfolgreichen Registrierung oder Anmeldung
#[derive(Debug)]
pub struct Anmeldung {
    pub konto: KontoRecord,
    pub token: String,
}

/// Konto-Service – Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct KontoService<R: KontoRepository> {
    repo: Arc<R>,
    token: Arc<TokenAussteller>,
}

impl<R: KontoRepository> KontoService<R> {
    /// Erstellt einen neuen KontoService
    pub fn neu(repo: Arc<R>, token: Arc<TokenAussteller>) -> Self {
        Self { repo, token }
    }

    /// Registriert ein neues Konto und stellt direkt einen Token aus
    ///
    /// Der Vorab-Lookup ist nur ein Schnellpfad fuer die Fehlermeldung;
    /// massgeblich ist die UNIQUE-Constraint beim Insert. Ein
    /// gleichzeitiger Insert derselben E-Mail wird dort als
    /// `EmailVergeben` gemeldet.
    pub async fn registrieren(&self, eingabe: SignupEingabe) -> AuthResult<Anmeldung> {
        if self
            .repo
            .laden_nach_email(&eingabe.email)
            .await?
            .is_some()
        {
            return Err(AuthError::EmailVergeben(eingabe.email));
        }

        let passwort_hash = passwort_hashen(&eingabe.password)?;

        let konto = match self
            .repo
            .erstellen(NeuesKonto {
                name: &eingabe.name,
                email: &eingabe.email,
                password_hash: &passwort_hash,
            })
            .await
        {
            Ok(konto) => konto,
            Err(e) if e.ist_eindeutigkeit() => {
                // Rennen mit einem gleichzeitigen Insert verloren
                return Err(AuthError::EmailVergeben(eingabe.email));
            }
            Err(e) => return Err(e.into()),
        };

        let token = self.token.ausstellen(konto.id)?;

        tracing::info!(
            konto_id = %konto.id,
            email = %konto.email,
            "Neues Konto registriert"
        );

        Ok(Anmeldung { konto, token })
    }

    /// Meldet ein Konto an und stellt einen Token aus
    ///
    /// Unbekannte E-Mail und falsches Passwort sind getrennte Fehler;
    /// beide Pfade werden serverseitig unterscheidbar geloggt.
    pub async fn anmelden(&self, eingabe: LoginEingabe) -> AuthResult<Anmeldung> {
        let konto = match self.repo.laden_nach_email(&eingabe.email).await? {
            Some(konto) => konto,
            None => {
                tracing::warn!(email = %eingabe.email, "Login fuer unbekanntes Konto");
                return Err(AuthError::KontoNichtGefunden);
            }
        };

        let korrekt = passwort_pruefen(&eingabe.password, &konto.password_hash)?;
        if !korrekt {
            tracing::warn!(
                konto_id = %konto.id,
                email = %konto.email,
                "Fehlgeschlagener Login-Versuch (falsches Passwort)"
            );
            return Err(AuthError::PasswortFalsch);
        }

        let token = self.token.ausstellen(konto.id)?;

        tracing::info!(konto_id = %konto.id, "Konto angemeldet");

        Ok(Anmeldung { konto, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use chrono::Utc;
    use uuid::Uuid;

    use gobar_db::{DbError, DbResult};

    use crate::token::{STANDARD_ISSUER, STANDARD_TTL_SECS};

    // Minimales In-Memory KontoRepository; erzwingt die Eindeutigkeit
    // atomar unter dem Mutex, wie es die UNIQUE-Constraint im Store tut.
    #[derive(Default)]
    struct TestKontoRepo {
        konten: Mutex<Vec<KontoRecord>>,
    }

    impl KontoRepository for TestKontoRepo {
        async fn erstellen(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord> {
            let mut konten = self.konten.lock().unwrap();
            if konten.iter().any(|k| k.email == data.email) {
                return Err(DbError::Eindeutigkeit(format!(
                    "E-Mail '{}' bereits registriert",
                    data.email
                )));
            }
            let record = KontoRecord {
                id: Uuid::new_v4(),
                name: data.name.to_string(),
                email: data.email.to_string(),
                password_hash: data.password_hash.to_string(),
                created_at: Utc::now(),
            };
            konten.push(record.clone());
            Ok(record)
        }

        async fn laden_nach_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
            Ok(self
                .konten
                .lock()
                .unwrap()
                .iter()
                .find(|k| k.email == email)
                .cloned())
        }

        async fn anzahl(&self) -> DbResult<i64> {
            Ok(self.konten.lock().unwrap().len() as i64)
        }
    }

    fn test_service() -> KontoService<TestKontoRepo> {
        let repo = Arc::new(TestKontoRepo::default());
        let token = Arc::new(
            TokenAussteller::neu("test-secret", STANDARD_TTL_SECS, STANDARD_ISSUER).unwrap(),
        );
        KontoService::neu(repo, token)
    }

    fn signup(name: &str, email: &str, password: &str) -> SignupEingabe {
        SignupEingabe {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn login(email: &str, password: &str) -> LoginEingabe {
        LoginEingabe {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn registrieren_und_anmelden() {
        let service = test_service();

        let registriert = service
            .registrieren(signup("Ada", "ada@example.com", "sicheres_passwort"))
            .await
            .expect("Registrierung fehlgeschlagen");

        assert_eq!(registriert.konto.name, "Ada");
        assert_ne!(registriert.konto.password_hash, "sicheres_passwort");
        assert!(!registriert.token.is_empty());

        let angemeldet = service
            .anmelden(login("ada@example.com", "sicheres_passwort"))
            .await
            .expect("Anmeldung fehlgeschlagen");

        assert_eq!(angemeldet.konto.id, registriert.konto.id);
    }

    #[tokio::test]
    async fn token_behauptet_das_richtige_konto() {
        let service = test_service();
        let anmeldung = service
            .registrieren(signup("Ada", "ada@example.com", "sicheres_passwort"))
            .await
            .unwrap();

        let claims = service.token.pruefen(&anmeldung.token).unwrap();
        assert_eq!(claims.sub, anmeldung.konto.id);
    }

    #[tokio::test]
    async fn doppelte_registrierung_schlaegt_fehl() {
        let service = test_service();
        service
            .registrieren(signup("Erste", "doppelt@example.com", "passwort_eins"))
            .await
            .unwrap();

        let ergebnis = service
            .registrieren(signup("Zweite", "doppelt@example.com", "passwort_zwei"))
            .await;
        assert!(matches!(ergebnis, Err(AuthError::EmailVergeben(_))));

        // genau ein Konto gespeichert
        assert_eq!(service.repo.anzahl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unbekanntes_konto_und_falsches_passwort_sind_getrennte_fehler() {
        let service = test_service();
        service
            .registrieren(signup("Ada", "ada@example.com", "richtiges_pw"))
            .await
            .unwrap();

        let nicht_gefunden = service
            .anmelden(login("fremd@example.com", "richtiges_pw"))
            .await;
        assert!(matches!(nicht_gefunden, Err(AuthError::KontoNichtGefunden)));

        let falsches_pw = service
            .anmelden(login("ada@example.com", "falsches_pw"))
            .await;
        assert!(matches!(falsches_pw, Err(AuthError::PasswortFalsch)));

        // beide 401, aber unterscheidbare Meldungen
        assert_eq!(AuthError::KontoNichtGefunden.http_status(), 401);
        assert_eq!(AuthError::PasswortFalsch.http_status(), 401);
        assert_ne!(
            AuthError::KontoNichtGefunden.to_string(),
            AuthError::PasswortFalsch.to_string()
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn gleichzeitige_registrierung_gewinnt_genau_einer() {
        let service = Arc::new(test_service());

        let a = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .registrieren(signup("A", "rennen@example.com", "passwort_a1"))
                    .await
            })
        };
        let b = {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                service
                    .registrieren(signup("B", "rennen@example.com", "passwort_b1"))
                    .await
            })
        };

        let ergebnisse = [a.await.unwrap(), b.await.unwrap()];
        let erfolge = ergebnisse.iter().filter(|r| r.is_ok()).count();
        assert_eq!(erfolge, 1, "genau ein Insert darf gewinnen");
        assert!(ergebnisse
            .iter()
            .any(|r| matches!(r, Err(AuthError::EmailVergeben(_)))));

        assert_eq!(service.repo.anzahl().await.unwrap(), 1);
    }
}
