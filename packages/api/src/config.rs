use serde::{Deserialize, Serialize};

use crate::ApiResult;

pub const DEFAULT_BASE_URL: &str = "http://0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Backend origin without a trailing slash
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_json(json: &str) -> ApiResult<Self> {
        let config: ApiConfig = serde_json::from_str(json)?;
        Ok(Self::new(config.base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url, "http://0.0.0.0:8000");
        assert_eq!(ApiConfig::from_json("{}").unwrap(), ApiConfig::default());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = ApiConfig::from_json(r#"{"baseUrl": "https://recipes.example/"}"#).unwrap();
        assert_eq!(config.base_url, "https://recipes.example");
    }
}
