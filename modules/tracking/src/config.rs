use serde::{Deserialize, Serialize};

/// Configuration section for the tracking module, read from the `tracking`
/// entry of the application's module configuration bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// People-directory lookup service.
    #[serde(default)]
    pub people_api: PeopleApiConfig,
    /// Page size used when the list request does not specify a limit.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,
    /// Hard cap on requested page sizes.
    #[serde(default = "default_page_size")]
    pub max_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeopleApiConfig {
    /// Base URL of the people-directory service; empty means unconfigured.
    #[serde(default)]
    pub base_url: String,
    /// Client-side timeout for one lookup call, in seconds.
    #[serde(default = "default_lookup_timeout")]
    pub timeout_sec: u64,
}

fn default_page_size() -> u32 {
    10
}

fn default_lookup_timeout() -> u64 {
    4
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            people_api: PeopleApiConfig::default(),
            default_page_size: default_page_size(),
            max_page_size: default_page_size(),
        }
    }
}

impl Default for PeopleApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_sec: default_lookup_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_clamp_pages_to_ten() {
        let config = TrackingConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, 10);
        assert_eq!(config.people_api.timeout_sec, 4);
    }

    #[test]
    fn deserializes_partial_sections() {
        let json = r#"{"people_api": {"base_url": "http://people.local"}}"#;
        let config: TrackingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.people_api.base_url, "http://people.local");
        assert_eq!(config.people_api.timeout_sec, 4);
        assert_eq!(config.default_page_size, 10);
    }
}
