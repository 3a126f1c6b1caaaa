use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub elevenlabs_agent_id: String,
    pub xi_api_key: String,
    pub elevenlabs_base_url: String,
    pub elevenlabs_timeout_secs: u64,
    /// Log raw lead bodies, names and phone numbers verbatim.
    pub log_lead_payloads: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_source<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            elevenlabs_agent_id: lookup("ELEVENLABS_AGENT_ID")
                .ok_or_else(|| anyhow::anyhow!("ELEVENLABS_AGENT_ID environment variable required"))
                .and_then(|agent| {
                    let agent = agent.trim();
                    if agent.is_empty() {
                        anyhow::bail!("ELEVENLABS_AGENT_ID cannot be empty");
                    }
                    // Used as a URL path segment
                    if !agent
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                    {
                        anyhow::bail!(
                            "ELEVENLABS_AGENT_ID may only contain letters, digits, '_' and '-'"
                        );
                    }
                    Ok(agent.to_string())
                })?,
            xi_api_key: lookup("XI_API_KEY")
                .ok_or_else(|| anyhow::anyhow!("XI_API_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("XI_API_KEY cannot be empty");
                    }
                    Ok(key.trim().to_string())
                })?,
            elevenlabs_base_url: lookup("ELEVENLABS_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string(),
            elevenlabs_timeout_secs: lookup("ELEVENLABS_TIMEOUT_SECS")
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.trim().parse::<u64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("ELEVENLABS_TIMEOUT_SECS must be a whole number of seconds"))?
                .unwrap_or(30),
            log_lead_payloads: lookup("LOG_LEAD_PAYLOADS")
                .map(|flag| parse_flag(&flag))
                .transpose()?
                .unwrap_or(false),
        };

        if !config.elevenlabs_base_url.starts_with("http://")
            && !config.elevenlabs_base_url.starts_with("https://")
        {
            anyhow::bail!("ELEVENLABS_BASE_URL must start with http:// or https://");
        }
        if config.elevenlabs_timeout_secs == 0 {
            anyhow::bail!("ELEVENLABS_TIMEOUT_SECS must be greater than zero");
        }

        // Never log the API key itself
        tracing::debug!("ElevenLabs Base URL: {}", config.elevenlabs_base_url);
        tracing::debug!("ElevenLabs Agent ID: {}", config.elevenlabs_agent_id);
        tracing::debug!("Server Port: {}", config.port);
        if config.log_lead_payloads {
            tracing::warn!("LOG_LEAD_PAYLOADS enabled: lead names and phone numbers will be logged");
        }

        Ok(config)
    }

    pub fn elevenlabs_timeout(&self) -> Duration {
        Duration::from_secs(self.elevenlabs_timeout_secs)
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        other => anyhow::bail!("LOG_LEAD_PAYLOADS must be true or false, got '{}'", other),
    }
}
