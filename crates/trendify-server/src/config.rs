//! Server configuration
//!
//! Read once at startup from the Shuttle secret store. Providers without an
//! API key are simply not configured.

use std::collections::HashMap;

use trendify::{ModelConfig, PaymentGateway, Provider};

/// Everything the server needs from secrets
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub api_key: Option<String>,
    /// Configured providers, in fallback order (Google first)
    pub models: Vec<ModelConfig>,
    pub webhook_secrets: HashMap<PaymentGateway, String>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

impl ServerConfig {
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> Result<Self, ConfigError> {
        Self::from_lookup(|name| secrets.get(name))
    }

    /// Build from any name -> value lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let temperature = match get("AI_TEMPERATURE") {
            Some(raw) => Some(raw.trim().parse::<f32>().map_err(|_| ConfigError::Invalid {
                name: "AI_TEMPERATURE",
                value: raw.clone(),
            })?),
            None => None,
        };
        let timeout_ms = match get("AI_TIMEOUT_MS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "AI_TIMEOUT_MS",
                value: raw.clone(),
            })?),
            None => None,
        };

        let mut models = Vec::new();
        for (provider, prefix) in [(Provider::Google, "GEMINI"), (Provider::OpenAI, "OPENAI")] {
            let Some(key) = get(&format!("{}_API_KEY", prefix)) else {
                continue;
            };
            let mut config = ModelConfig::new(provider, key);
            if let Some(model) = get(&format!("{}_MODEL", prefix)) {
                config = config.with_model(model);
            }
            if let Some(endpoint) = get(&format!("{}_ENDPOINT", prefix)) {
                config = config.with_endpoint(endpoint);
            }
            if let Some(temperature) = temperature {
                config = config.with_temperature(temperature);
            }
            if let Some(timeout_ms) = timeout_ms {
                config = config.with_timeout_ms(timeout_ms);
            }
            models.push(config);
        }

        let webhook_secrets = [PaymentGateway::Asaas, PaymentGateway::AbacatePay]
            .into_iter()
            .filter_map(|gateway| get(gateway.secret_name()).map(|secret| (gateway, secret)))
            .collect();

        Ok(Self {
            api_key: get("TRENDIFY_API_KEY"),
            models,
            webhook_secrets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_secrets() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.models.is_empty());
        assert!(config.webhook_secrets.is_empty());
    }

    #[test]
    fn test_providers_and_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRENDIFY_API_KEY", "svc-key"),
            ("OPENAI_API_KEY", "sk-1"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("GEMINI_API_KEY", "g-1"),
            ("GEMINI_ENDPOINT", "http://localhost:9000/models/"),
            ("AI_TEMPERATURE", "0.3"),
            ("AI_TIMEOUT_MS", "20000"),
            ("ASAAS_WEBHOOK_SECRET", "whsec"),
        ]))
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("svc-key"));
        assert_eq!(config.models.len(), 2);

        let gemini = &config.models[0];
        assert_eq!(gemini.provider, Provider::Google);
        assert_eq!(gemini.endpoint, "http://localhost:9000/models");
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.timeout_ms, Some(20000));

        let openai = &config.models[1];
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.temperature, 0.3);

        assert_eq!(
            config.webhook_secrets.get(&PaymentGateway::Asaas).map(String::as_str),
            Some("whsec")
        );
        assert!(!config.webhook_secrets.contains_key(&PaymentGateway::AbacatePay));
    }

    #[test]
    fn test_invalid_number() {
        let err = ServerConfig::from_lookup(lookup(&[("AI_TIMEOUT_MS", "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "AI_TIMEOUT_MS",
                value: "soon".to_string()
            }
        );
    }
}
