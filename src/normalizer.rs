//! Remote term normalization with deterministic local fallback.
//!
//! Maps a free-text procedure name to a standardized clinical term via an
//! OpenAI-compatible chat endpoint. Any remote failure degrades to the
//! trimmed, lowercased input - normalization never fails.

use crate::config::{self, LlmConfig};
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// System prompt with exemplar mappings for the normalizer model
const SYSTEM_PROMPT: &str = "Você é um normalizador de termos cirúrgicos em português do Brasil. \
    Receba um nome livre (com gírias, abreviações) e devolva APENAS o nome clínico padronizado, \
    sem comentários. Exemplos: \
    'ATQ' -> 'artroplastia de quadril'; \
    'CRM' -> 'revascularização do miocárdio'; \
    'catarata' -> 'facectomia'; \
    'implante mamário' -> 'prótese de mama'.";

/// Chat completion request (OpenAI-compatible)
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Chat completion response
#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Why a normalization attempt fell back to the local rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No credential configured - remote normalization disabled
    NotConfigured,
    /// Remote call failed (network, non-2xx, timeout, malformed body)
    RemoteFailed(String),
}

/// Outcome of a normalization attempt.
///
/// The public contract only ever yields a string; the outcome keeps the
/// failure cause visible so the never-fails guarantee stays auditable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Remote service returned a term (trusted verbatim, lowercased)
    Remote(String),
    /// Local fallback: trimmed, lowercased input
    Local { term: String, reason: FallbackReason },
}

impl NormalizeOutcome {
    /// Collapse to the normalized term
    pub fn into_term(self) -> String {
        match self {
            NormalizeOutcome::Remote(term) => term,
            NormalizeOutcome::Local { term, .. } => term,
        }
    }
}

/// Term normalizer with optional remote capability
pub struct Normalizer {
    client: reqwest::Client,
    config: LlmConfig,
    api_key: Option<String>,
}

impl Normalizer {
    /// Create a normalizer with an explicit credential (None disables
    /// remote normalization)
    pub fn new(config: LlmConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// Create a normalizer with the credential from the environment
    pub fn from_env(config: LlmConfig) -> Result<Self> {
        let api_key = config::api_key_from_env();
        Self::new(config, api_key)
    }

    /// Whether remote normalization is configured
    pub fn remote_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// Normalize a raw term to a trimmed, lowercase clinical term.
    /// Never fails: remote errors degrade to the local rule.
    pub async fn normalize(&self, raw: &str) -> String {
        self.attempt(raw).await.into_term()
    }

    /// Normalize, keeping the fallback cause visible
    pub async fn attempt(&self, raw: &str) -> NormalizeOutcome {
        let trimmed = raw.trim();
        let local = trimmed.to_lowercase();

        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => {
                return NormalizeOutcome::Local {
                    term: local,
                    reason: FallbackReason::NotConfigured,
                }
            }
        };

        match self.remote_normalize(trimmed, &api_key).await {
            Ok(term) => {
                info!("Normalizer: '{}' -> '{}'", trimmed, term);
                NormalizeOutcome::Remote(term)
            }
            Err(e) => {
                warn!("Normalizer: remote call failed, using local fallback: {}", e);
                NormalizeOutcome::Local {
                    term: local,
                    reason: FallbackReason::RemoteFailed(e.to_string()),
                }
            }
        }
    }

    /// Issue the single outbound chat request for a term
    async fn remote_normalize(&self, term: &str, api_key: &str) -> Result<String> {
        let body = ChatRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_user_prompt(term),
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.chat_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("chat request failed: {}", response.status()));
        }

        let reply: ChatResponse = response.json().await?;
        extract_term(&reply)
    }
}

/// Build the user message for a term
fn build_user_prompt(term: &str) -> String {
    format!("Termo: {}\nResponda só com o nome clínico padronizado.", term)
}

/// Pull the normalized term out of the first choice, trimmed and lowercased
fn extract_term(reply: &ChatResponse) -> Result<String> {
    let choice = reply
        .choices
        .first()
        .ok_or_else(|| anyhow!("chat response has no choices"))?;

    Ok(choice.message.content.trim().to_lowercase())
}
