//! Golden tests for the classification contract.
//!
//! Verifies the response shape, the registry match order, and the local
//! normalization fallback used when no credential is configured.

use iscd::config::LlmConfig;
use iscd::normalizer::{FallbackReason, NormalizeOutcome, Normalizer};
use iscd::registry;
use iscd::routes::Classification;

/// Normalizer with remote normalization disabled, as when the credential
/// is absent from the environment
fn local_normalizer() -> Normalizer {
    Normalizer::new(LlmConfig::default(), None).expect("client build")
}

#[tokio::test]
async fn atq_is_mandatory_with_90_day_surveillance() {
    let normalizer = local_normalizer();

    let nome_norm = normalizer.normalize("ATQ").await;
    assert_eq!(nome_norm, "atq");

    let matched = registry::match_procedure(&nome_norm);
    assert_eq!(matched.expect("alias match").canonical, "artroplastia de quadril");

    let resp = Classification::assemble("ATQ".to_string(), nome_norm, matched);
    assert!(resp.obrigatoria_nacional);
    assert_eq!(resp.periodo_vigilancia_dias, 90);
    assert_eq!(resp.classe_ferida_sugerida, "Limpa (com implante)");
}

#[tokio::test]
async fn unknown_procedure_gets_defaults() {
    let normalizer = local_normalizer();

    let nome_norm = normalizer.normalize("Cirurgia totalmente desconhecida").await;
    let matched = registry::match_procedure(&nome_norm);
    assert!(matched.is_none());

    let resp = Classification::assemble(
        "Cirurgia totalmente desconhecida".to_string(),
        nome_norm,
        matched,
    );
    assert!(!resp.obrigatoria_nacional);
    assert_eq!(resp.periodo_vigilancia_dias, 30);
    assert_eq!(resp.classe_ferida_sugerida, registry::DEFAULT_WOUND_CLASS);
}

#[tokio::test]
async fn response_always_has_all_seven_fields() {
    let normalizer = local_normalizer();

    for input in ["ATQ", "cesárea", "procedimento inexistente", "x"] {
        let nome_norm = normalizer.normalize(input).await;
        let matched = registry::match_procedure(&nome_norm);
        let resp = Classification::assemble(input.to_string(), nome_norm, matched);

        let value = serde_json::to_value(&resp).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7, "input '{}'", input);
        assert!(obj["entrada"].is_string());
        assert!(obj["nome_normalizado"].is_string());
        assert!(obj["obrigatoria_nacional"].is_boolean());
        assert!(obj["periodo_vigilancia_dias"].is_u64());
        assert!(obj["classe_ferida_sugerida"].is_string());
        assert!(obj["ajuda_isc"].is_string());
        assert!(obj["aviso"].is_string());
    }
}

#[tokio::test]
async fn matching_is_idempotent_without_remote_variability() {
    let normalizer = local_normalizer();

    for _ in 0..3 {
        let nome_norm = normalizer.normalize("  Prótese de Joelho ").await;
        assert_eq!(nome_norm, "prótese de joelho");

        let matched = registry::match_procedure(&nome_norm).expect("alias match");
        assert_eq!(matched.canonical, "artroplastia de joelho");
    }
}

#[tokio::test]
async fn unconfigured_normalizer_reports_explicit_fallback() {
    let normalizer = local_normalizer();

    let outcome = normalizer.attempt("  ATQ ").await;
    assert_eq!(
        outcome,
        NormalizeOutcome::Local {
            term: "atq".to_string(),
            reason: FallbackReason::NotConfigured,
        }
    );
}

#[test]
fn exact_alias_match_wins_over_substring() {
    // "atq" must resolve via the alias pass, not fall through unmatched
    // or land on an accidental substring of another entry.
    let entry = registry::match_procedure("atq").expect("alias match");
    assert_eq!(entry.canonical, "artroplastia de quadril");
}

#[test]
fn aliases_match_case_insensitively_after_normalization() {
    // The normalizer lowercases before matching; every alias must be
    // reachable from its lowercased form.
    for entry in registry::PROCEDURES {
        for alias in entry.aliases {
            let matched = registry::match_procedure(&alias.to_lowercase())
                .unwrap_or_else(|| panic!("alias '{}' did not match", alias));
            assert_eq!(matched.surveillance_days, entry.surveillance_days);
        }
    }
}
