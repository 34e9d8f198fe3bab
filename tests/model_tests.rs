//! Tests for model selection.

use lumo::models::*;

#[test]
fn default_model_parses_to_gemini_pro() {
    let model: LanguageModel = DEFAULT_MODEL.parse().unwrap();
    assert_eq!(model.provider_name(), "google");
    assert_eq!(model.model_id(), "gemini-pro");
    assert_eq!(model.to_string(), DEFAULT_MODEL);
}

#[test]
fn gemini_alias_selects_google() {
    let model: LanguageModel = "gemini:gemini-2.5-flash".parse().unwrap();
    assert_eq!(
        model,
        LanguageModel::Google(google::GoogleModel::Gemini25Flash)
    );
}

#[test]
fn unknown_gemini_model_is_kept_as_custom_id() {
    let model: LanguageModel = "google:gemini-3-preview".parse().unwrap();
    assert_eq!(model.model_id(), "gemini-3-preview");
    assert_eq!(model.provider_name(), "google");
}

#[test]
fn unknown_provider_becomes_custom() {
    let model: LanguageModel = "acme:rocket-1".parse().unwrap();
    assert_eq!(
        model,
        LanguageModel::Custom {
            provider: "acme".into(),
            model_id: "rocket-1".into(),
        }
    );
}

#[test]
fn selector_without_provider_is_rejected() {
    assert!("gemini-pro".parse::<LanguageModel>().is_err());
    assert!("google:".parse::<LanguageModel>().is_err());
}

#[test]
fn known_gemini_models_include_the_default() {
    assert!(google::GoogleModel::known().contains(&"gemini-pro"));
}

#[cfg(feature = "openai-compatible")]
#[test]
fn openai_compatible_selector() {
    let model: LanguageModel = "openai-compatible:llama3.2".parse().unwrap();
    assert_eq!(model.provider_name(), "openai-compatible");
    assert_eq!(model.model_id(), "llama3.2");
}
