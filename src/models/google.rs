//! Google Gemini model definitions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Google Gemini models.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
pub enum GoogleModel {
    #[strum(serialize = "gemini-pro")]
    GeminiPro,
    #[strum(serialize = "gemini-1.5-pro")]
    Gemini15Pro,
    #[strum(serialize = "gemini-1.5-flash")]
    Gemini15Flash,
    #[strum(serialize = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,
    /// Custom/unknown Google model.
    #[strum(default)]
    Custom(String),
}

impl GoogleModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::GeminiPro => "gemini-pro",
            Self::Gemini15Pro => "gemini-1.5-pro",
            Self::Gemini15Flash => "gemini-1.5-flash",
            Self::Gemini20Flash => "gemini-2.0-flash",
            Self::Gemini25Pro => "gemini-2.5-pro",
            Self::Gemini25Flash => "gemini-2.5-flash",
            Self::Gemini25FlashLite => "gemini-2.5-flash-lite",
            Self::Custom(s) => s,
        }
    }

    /// Identifiers of every built-in model, in declaration order.
    pub fn known() -> Vec<&'static str> {
        vec![
            "gemini-pro",
            "gemini-1.5-pro",
            "gemini-1.5-flash",
            "gemini-2.0-flash",
            "gemini-2.5-pro",
            "gemini-2.5-flash",
            "gemini-2.5-flash-lite",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn known_ids_parse_to_builtin_variants() {
        for id in GoogleModel::known() {
            let model = GoogleModel::from_str(id).unwrap();
            assert!(!matches!(model, GoogleModel::Custom(_)), "{id} fell through");
            assert_eq!(model.as_str(), id);
        }
    }

    #[test]
    fn known_list_covers_every_builtin_variant() {
        let builtin = GoogleModel::iter()
            .filter(|m| !matches!(m, GoogleModel::Custom(_)))
            .count();
        assert_eq!(builtin, GoogleModel::known().len());
    }

    #[test]
    fn unknown_id_becomes_custom() {
        let model = GoogleModel::from_str("gemini-9-ultra").unwrap();
        assert_eq!(model, GoogleModel::Custom("gemini-9-ultra".into()));
        assert_eq!(model.as_str(), "gemini-9-ultra");
    }
}
