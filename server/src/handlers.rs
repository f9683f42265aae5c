//! HTTP-Handler fuer die Auth-Endpunkte
//!
//! Jeder Handler ist strikt linear: Body pruefen, Service aufrufen,
//! Antwort bauen. Fehler laufen durch die eine Formatierungsgrenze
//! `fehler_antwort`, die das `fehlerdetails`-Flag konsultiert.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::{json, Value};

use gobar_auth::{anmeldung_pruefen, registrierung_pruefen, AuthError};

use crate::AppState;

/// POST /api/auth/signup
pub async fn signup(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    let eingabe = match registrierung_pruefen(&body) {
        Ok(eingabe) => eingabe,
        Err(f) => {
            return fehler_antwort(state.fehlerdetails, "Registrierung fehlgeschlagen", f.into())
        }
    };

    match state.service.registrieren(eingabe).await {
        Ok(anmeldung) => (
            StatusCode::CREATED,
            Json(json!({
                "user": {
                    "id": anmeldung.konto.id,
                    "name": anmeldung.konto.name,
                    "email": anmeldung.konto.email,
                    "createdAt": anmeldung.konto.created_at.to_rfc3339(),
                },
                "token": anmeldung.token,
            })),
        )
            .into_response(),
        Err(e) => fehler_antwort(state.fehlerdetails, "Registrierung fehlgeschlagen", e),
    }
}

/// POST /api/auth/login
pub async fn login(State(state): State<AppState>, body: Option<Json<Value>>) -> Response {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);

    let eingabe = match anmeldung_pruefen(&body) {
        Ok(eingabe) => eingabe,
        Err(f) => return fehler_antwort(state.fehlerdetails, "Anmeldung fehlgeschlagen", f.into()),
    };

    match state.service.anmelden(eingabe).await {
        Ok(anmeldung) => (
            StatusCode::OK,
            Json(json!({
                "token": anmeldung.token,
                "token_type": "Bearer",
                "expires_in": state.token.ttl_secs(),
                "user": {
                    "id": anmeldung.konto.id,
                    "name": anmeldung.konto.name,
                    "email": anmeldung.konto.email,
                },
            })),
        )
            .into_response(),
        Err(e) => fehler_antwort(state.fehlerdetails, "Anmeldung fehlgeschlagen", e),
    }
}

/// GET /api/health – Erreichbarkeitspruefung inkl. Datenbank
pub async fn health(State(state): State<AppState>) -> Response {
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "timestamp": Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(fehler = %e, "Health-Check: Datenbank nicht erreichbar");
            let mut body = json!({
                "status": "unhealthy",
                "database": "disconnected",
            });
            if state.fehlerdetails {
                body["error"] = json!(e.to_string());
            }
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

/// Die eine Fehler-Formatierungsgrenze: AuthError -> Status + JSON-Body
///
/// 500er-Antworten tragen die zugrundeliegende Meldung nur wenn
/// `fehlerdetails` gesetzt ist; 503 bleibt immer generisch.
fn fehler_antwort(fehlerdetails: bool, kontext: &str, fehler: AuthError) -> Response {
    let status = StatusCode::from_u16(fehler.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match &fehler {
        AuthError::Validierung(v) => {
            let mut body = json!({ "error": v.to_string() });
            let felder = v.fehlende_felder();
            if !felder.is_empty() {
                body["missing"] = json!(felder);
            }
            body
        }
        _ if status == StatusCode::SERVICE_UNAVAILABLE => {
            tracing::error!(fehler = %fehler, kontext, "Datenbank nicht erreichbar");
            json!({ "error": "Dienst nicht verfuegbar" })
        }
        _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!(fehler = %fehler, kontext, "Unerwarteter Fehler");
            if fehlerdetails {
                json!({ "error": kontext, "details": fehler.to_string() })
            } else {
                json!({ "error": kontext })
            }
        }
        _ => json!({ "error": fehler.to_string() }),
    };

    (status, Json(body)).into_response()
}
