//! gobar-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und stellt den oeffentlichen
//! Einstiegspunkt fuer Integrationstests bereit.

use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use gobar_auth::{KontoService, TokenAussteller};
use gobar_db::SqliteDb;

pub mod config;
pub mod handlers;
pub mod routes;

use config::ServerConfig;

/// Geteilter Zustand der Handler
///
/// Pool, Service und Token-Aussteller sind die einzigen geteilten
/// Ressourcen; alle sind intern synchronisiert bzw. unveraenderlich und
/// werden per Clone/`Arc` an jeden Request gereicht.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<KontoService<SqliteDb>>,
    pub token: Arc<TokenAussteller>,
    pub db: SqliteDb,
    pub fehlerdetails: bool,
}

impl AppState {
    /// Baut den Zustand aus Pool, Token-Aussteller und Fehlerdetail-Flag
    pub fn neu(db: SqliteDb, token: Arc<TokenAussteller>, fehlerdetails: bool) -> Self {
        let service = Arc::new(KontoService::neu(Arc::new(db.clone()), Arc::clone(&token)));
        Self {
            service,
            token,
            db,
            fehlerdetails,
        }
    }
}

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet den Server und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Token-Aussteller bauen (leeres Secret = fataler Startfehler)
    /// 2. Datenbankpool oeffnen und Migrationen ausfuehren
    /// 3. HTTP-Listener starten
    /// 4. Auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        let token = Arc::new(
            TokenAussteller::neu(
                &self.config.token.secret,
                self.config.token.ttl_secs,
                self.config.token.issuer.clone(),
            )
            .context("Token-Aussteller konnte nicht gebaut werden")?,
        );

        let db = SqliteDb::oeffnen(&self.config.datenbank.als_db_config())
            .await
            .context("Datenbankverbindung fehlgeschlagen")?;

        let state = AppState::neu(db, token, self.config.server.fehlerdetails);

        let app = routes::api_router()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state);

        let bind = self.config.bind_adresse();
        let listener = tokio::net::TcpListener::bind(&bind).await?;
        tracing::info!(addr = %bind, "Auth-Server gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server beendet");
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
}
