//! Backend model identities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity of a backend large-language-model service.
///
/// Used as the key that distinguishes which backend produced a response.
/// Parsing is case-insensitive, so `"GPT"`, `"gpt"` and `"Gpt"` are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LlmModel {
    Gpt,
    Claude,
    Grok,
}

impl LlmModel {
    /// All known models, in display order.
    pub const ALL: [LlmModel; 3] = [LlmModel::Gpt, LlmModel::Claude, LlmModel::Grok];

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmModel::Gpt => "gpt",
            LlmModel::Claude => "claude",
            LlmModel::Grok => "grok",
        }
    }
}

impl fmt::Display for LlmModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown model: {0}")]
pub struct ParseModelError(pub String);

impl FromStr for LlmModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt" | "openai" => Ok(LlmModel::Gpt),
            "claude" | "anthropic" => Ok(LlmModel::Claude),
            "grok" | "xai" => Ok(LlmModel::Grok),
            _ => Err(ParseModelError(s.to_string())),
        }
    }
}

impl TryFrom<String> for LlmModel {
    type Error = ParseModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LlmModel> for String {
    fn from(model: LlmModel) -> Self {
        model.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("GPT".parse::<LlmModel>().unwrap(), LlmModel::Gpt);
        assert_eq!("Claude".parse::<LlmModel>().unwrap(), LlmModel::Claude);
        assert_eq!(" grok ".parse::<LlmModel>().unwrap(), LlmModel::Grok);
        assert!("gemini".parse::<LlmModel>().is_err());
    }

    #[test]
    fn test_serde_roundtrip_as_map_key() {
        let mut map = HashMap::new();
        map.insert(LlmModel::Claude, 1);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"claude":1}"#);

        let models: Vec<LlmModel> = serde_json::from_str(r#"["GPT","claude"]"#).unwrap();
        assert_eq!(models, vec![LlmModel::Gpt, LlmModel::Claude]);
    }
}
