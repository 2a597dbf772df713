use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub llm: Option<LlmConfig>,
    pub smtp: Option<SmtpConfig>,
}

pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;

        // Provider is optional: without a base URL or key the pipeline
        // serves the built-in fallback menu.
        let llm = if std::env::var("LLM_BASE_URL").is_ok() || std::env::var("LLM_API_KEY").is_ok() {
            Some(LlmConfig {
                base_url: std::env::var("LLM_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
                api_key: std::env::var("LLM_API_KEY").ok(),
                model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
                timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_LLM_TIMEOUT_SECS),
            })
        } else {
            None
        };

        let smtp = match std::env::var("SMTP_HOST") {
            Ok(host) => Some(SmtpConfig {
                host,
                username: std::env::var("SMTP_USERNAME").unwrap_or_default(),
                password: std::env::var("SMTP_PASSWORD").unwrap_or_default(),
                from: std::env::var("SMTP_FROM").unwrap_or_else(|_| "menumind@localhost".into()),
            }),
            Err(_) => None,
        };

        Ok(Self {
            database_url,
            llm,
            smtp,
        })
    }
}
