//! Client configuration read from the environment.

use std::path::PathBuf;

pub const API_URL_VAR: &str = "GROCETERIA_API_URL";
pub const PAGE_SIZE_VAR: &str = "GROCETERIA_PAGE_SIZE";
pub const SESSION_FILE_VAR: &str = "GROCETERIA_SESSION_FILE";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_PAGE_SIZE: u32 = 5;
pub const DEFAULT_SESSION_FILE: &str = ".groceteria-session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub page_size: u32,
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Unset, empty or unparsable
    /// values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let page_size = match var(PAGE_SIZE_VAR).map(|raw| raw.trim().parse::<u32>()) {
            Some(Ok(size)) if size > 0 => size,
            Some(_) => {
                tracing::warn!(var = PAGE_SIZE_VAR, "ignoring invalid page size");
                defaults.page_size
            }
            None => defaults.page_size,
        };

        Self {
            api_url: var(API_URL_VAR).unwrap_or(defaults.api_url),
            page_size,
            session_file: var(SESSION_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
    }

    #[test]
    fn reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://shop.test/api/v1"),
            (PAGE_SIZE_VAR, "20"),
            (SESSION_FILE_VAR, "/tmp/s.json"),
        ]));
        assert_eq!(config.api_url, "https://shop.test/api/v1");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn bad_page_size_falls_back() {
        let config = ClientConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "zero")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        let config = ClientConfig::from_lookup(lookup(&[(PAGE_SIZE_VAR, "0")]));
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
