use crate::adapters::trello::{DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, DelayRules};
use crate::domain::model::DEFAULT_DELAY_DAYS;
use crate::utils::error::{Result, UpkeepError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest delay, in days, a rule or the default may ask for.
pub const MAX_DELAY_DAYS: i64 = 3650;

/// Run configuration. `delay` is written as `[[delay]]` tables; their order is the
/// order in which rules are tried.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board_id: String,
    pub app_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub member_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_delay_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
    pub delay: DelayRules,
}

impl BoardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| UpkeepError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| UpkeepError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Writes the configuration back, e.g. after a token has been obtained.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| UpkeepError::ConfigError {
            message: format!("TOML serialization error: {}", e),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// A token still reading `${VAR}` counts as absent.
    pub fn has_token(&self) -> bool {
        self.token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty() && !t.contains("${"))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout_seconds(&self) -> u64 {
        self.request_timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("board_id", &self.board_id)?;
        validation::validate_resolved("board_id", &self.board_id)?;
        validation::validate_non_empty_string("app_key", &self.app_key)?;
        validation::validate_resolved("app_key", &self.app_key)?;
        if let Some(token) = &self.token {
            validation::validate_resolved("token", token)?;
        }

        validation::validate_non_empty_list("member_ids", &self.member_ids)?;
        for member in &self.member_ids {
            validation::validate_non_empty_string("member_ids", member)?;
            validation::validate_resolved("member_ids", member)?;
        }

        for rule in self.delay.iter() {
            validation::validate_non_empty_string("delay.pattern", &rule.pattern)?;
            validation::validate_range("delay.days", rule.days, -MAX_DELAY_DAYS, MAX_DELAY_DAYS)?;
        }

        if let Some(days) = self.default_delay_days {
            validation::validate_range("default_delay_days", days, -MAX_DELAY_DAYS, MAX_DELAY_DAYS)?;
        }

        validation::validate_url("api_base_url", self.api_base_url())?;
        validation::validate_positive_number(
            "request_timeout_seconds",
            self.request_timeout_seconds(),
            1,
        )?;

        Ok(())
    }
}

impl ConfigProvider for BoardConfig {
    fn board_id(&self) -> &str {
        &self.board_id
    }

    fn delay_rules(&self) -> &DelayRules {
        &self.delay
    }

    fn member_ids(&self) -> &[String] {
        &self.member_ids
    }

    fn default_delay_days(&self) -> i64 {
        self.default_delay_days.unwrap_or(DEFAULT_DELAY_DAYS)
    }
}

impl Validate for BoardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
