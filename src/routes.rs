//! API routes for iscd

use crate::error::ApiError;
use crate::registry::{self, ProcedureEntry, DEFAULT_SURVEILLANCE_DAYS, DEFAULT_WOUND_CLASS};
use crate::server::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

/// Fixed guidance text included in every classification response
const AJUDA_ISC: &str = "ISC incisional superficial (pele/subcutâneo, 30d); \
    ISC incisional profunda (fáscia/músculo, 30–90d); \
    ISC órgão/cavidade (30–90d). Considerar o plano mais profundo.";

/// Fixed disclaimer included in every classification response
const AVISO: &str = "MVP simplificado. Classe de ferida depende do ato operatório \
    e achados intraoperatórios. Ajuste a lista conforme NT vigente.";

// ============================================================================
// Classification Routes
// ============================================================================

/// Request to classify a surgical procedure name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub cirurgia: String,
}

/// Classification response. Field names are the public contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub entrada: String,
    pub nome_normalizado: String,
    pub obrigatoria_nacional: bool,
    pub periodo_vigilancia_dias: u32,
    pub classe_ferida_sugerida: String,
    pub ajuda_isc: String,
    pub aviso: String,
}

impl Classification {
    /// Assemble a response from the matcher outcome
    pub fn assemble(
        entrada: String,
        nome_normalizado: String,
        matched: Option<&ProcedureEntry>,
    ) -> Self {
        let (obrigatoria, periodo, classe) = match matched {
            Some(entry) => (
                true,
                entry.surveillance_days,
                registry::wound_class_for(entry),
            ),
            None => (false, DEFAULT_SURVEILLANCE_DAYS, DEFAULT_WOUND_CLASS),
        };

        Self {
            entrada,
            nome_normalizado,
            obrigatoria_nacional: obrigatoria,
            periodo_vigilancia_dias: periodo,
            classe_ferida_sugerida: classe.to_string(),
            ajuda_isc: AJUDA_ISC.to_string(),
            aviso: AVISO.to_string(),
        }
    }
}

/// Validate the raw request term. Rejects empty/whitespace-only input
/// before any normalization or matching happens.
fn validate_term(raw: &str) -> Result<&str, ApiError> {
    let termo = raw.trim();
    if termo.is_empty() {
        return Err(ApiError::EmptyTerm);
    }
    Ok(termo)
}

pub fn classify_routes() -> Router<AppStateArc> {
    Router::new().route("/classificar", post(classify))
}

async fn classify(
    State(state): State<AppStateArc>,
    Json(req): Json<ClassifyRequest>,
) -> Result<Json<Classification>, ApiError> {
    let termo = validate_term(&req.cirurgia)?;

    let nome_norm = state.normalizer.normalize(termo).await;
    let matched = registry::match_procedure(&nome_norm);

    info!(
        "Classify: '{}' -> '{}' (match: {})",
        termo,
        nome_norm,
        matched.map(|e| e.canonical).unwrap_or("none")
    );

    Ok(Json(Classification::assemble(
        termo.to_string(),
        nome_norm,
        matched,
    )))
}

// ============================================================================
// Root Routes
// ============================================================================

/// Health/usage hint response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub ok: bool,
    pub como_usar: String,
}

pub fn root_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(root))
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        como_usar: "POST /classificar { 'cirurgia': 'ATQ' }".to_string(),
    })
}
