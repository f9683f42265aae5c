//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist – mit Ausnahme des Signier-Secrets, das gesetzt sein
//! muss (Datei oder `GOBAR_TOKEN_SECRET`).

use serde::Deserialize;

use gobar_db::DatabaseConfig;

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token-Einstellungen
    pub token: TokenEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Bind-Adresse fuer die HTTP-API
    pub bind_adresse: String,
    /// Port fuer die HTTP-API
    pub port: u16,
    /// Ob Fehlerantworten die zugrundeliegende Fehlermeldung enthalten
    /// (nur ausserhalb von Produktion aktivieren)
    pub fehlerdetails: bool,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 3000,
            fehlerdetails: true,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub sqlite_wal: bool,
    /// Wartezeit auf eine freie Pool-Verbindung in Sekunden
    pub timeout_secs: u64,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://gobar.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
            timeout_secs: 5,
        }
    }
}

impl DatenbankEinstellungen {
    /// Uebersetzt die Einstellungen in die DB-Crate-Konfiguration
    pub fn als_db_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_verbindungen: self.max_verbindungen,
            sqlite_wal: self.sqlite_wal,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// Token-Einstellungen
///
/// Kein `Serialize`: das Secret darf in keiner Antwort und keinem Log
/// auftauchen.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// Signier-Secret (leer = Startfehler)
    pub secret: String,
    /// Gueltigkeitsdauer der Tokens in Sekunden
    pub ttl_secs: u64,
    /// Aussteller-Kennung in den Claims
    pub issuer: String,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: gobar_auth::token::STANDARD_TTL_SECS,
            issuer: gobar_auth::token::STANDARD_ISSUER.into(),
        }
    }
}

impl std::fmt::Debug for TokenEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEinstellungen")
            .field("secret", &"<redacted>")
            .field("ttl_secs", &self.ttl_secs)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    /// `GOBAR_TOKEN_SECRET` ueberschreibt das Secret aus der Datei.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let mut config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };

        if let Ok(secret) = std::env::var("GOBAR_TOKEN_SECRET") {
            config.token.secret = secret;
        }

        Ok(config)
    }

    /// Gibt die vollstaendige Bind-Adresse fuer die HTTP-API zurueck
    pub fn bind_adresse(&self) -> String {
        format!("{}:{}", self.server.bind_adresse, self.server.port)
    }
}
