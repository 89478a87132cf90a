//! Connection settings for the beer store, read from the environment.

use thiserror::Error;

pub const URL_VARS: [&str; 2] = ["SUPABASE_URL", "EXPO_PUBLIC_SUPABASE_URL"];
pub const KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "EXPO_PUBLIC_SUPABASE_ANON_KEY"];
pub const TABLE_VAR: &str = "BEER_TABLE";
pub const DEFAULT_TABLE: &str = "beers";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source; the first non-empty name in
    /// each list wins.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&'static str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|value| !value.trim().is_empty()))
        };

        let url = first(&URL_VARS).ok_or(ConfigError::Missing(URL_VARS[0]))?;
        let anon_key = first(&KEY_VARS).ok_or(ConfigError::Missing(KEY_VARS[0]))?;
        let table = lookup(TABLE_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        Ok(Self {
            url: url.trim().to_string(),
            anon_key: anon_key.trim().to_string(),
            table,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_primary_names() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://demo.supabase.co");
        assert_eq!(config.anon_key, "anon");
        assert_eq!(config.table, DEFAULT_TABLE);
    }

    #[test]
    fn falls_back_to_expo_names() {
        let config = ProviderConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", " "),
            ("EXPO_PUBLIC_SUPABASE_URL", "https://expo.supabase.co"),
            ("EXPO_PUBLIC_SUPABASE_ANON_KEY", "expo-key"),
            ("BEER_TABLE", "drafts"),
        ]))
        .unwrap();
        assert_eq!(config.url, "https://expo.supabase.co");
        assert_eq!(config.anon_key, "expo-key");
        assert_eq!(config.table, "drafts");
    }

    #[test]
    fn missing_key_is_reported() {
        let err = ProviderConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SUPABASE_ANON_KEY"));
    }
}
