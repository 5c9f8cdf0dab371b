use anyhow::{Context, Result};

use crate::layout::Branding;

/// Application configuration loaded from environment variables.
/// Every variable is optional; branding falls back to the built-in company text.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub branding: Branding,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Branding::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            branding: Branding {
                brand_name: text("LABEL_BRAND_NAME", defaults.brand_name),
                subtitle: text("LABEL_SUBTITLE", defaults.subtitle),
                tagline: text("LABEL_TAGLINE", defaults.tagline),
                contact: text("LABEL_CONTACT", defaults.contact),
                website: text("LABEL_WEBSITE", defaults.website),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.branding, Branding::default());
    }

    #[test]
    fn test_branding_overrides() {
        let config = config_from(&[
            ("LABEL_BRAND_NAME", "ACME FREIGHT"),
            ("LABEL_WEBSITE", "acme.example"),
        ])
        .unwrap();
        assert_eq!(config.branding.brand_name, "ACME FREIGHT");
        assert_eq!(config.branding.website, "acme.example");
        assert_eq!(config.branding.subtitle, Branding::default().subtitle);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
