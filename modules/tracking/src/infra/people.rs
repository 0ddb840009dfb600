use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::config::PeopleApiConfig;
use crate::domain::error::DomainError;
use crate::domain::model::PersonInfo;
use crate::domain::ports::PeopleDirectory;

/// HTTP adapter implementing the people-directory port against
/// `GET {base}/info?passportSerie=S&passportNumber=N`.
///
/// The whole call is bounded by a client-side timeout; there are no retries —
/// a failed lookup fails the enclosing operation.
pub struct HttpPeopleDirectory {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpPeopleDirectory {
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(cfg: &PeopleApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&cfg.base_url)?;
        Self::new(base_url, Duration::from_secs(cfg.timeout_sec))
    }
}

#[derive(Debug, Deserialize)]
struct PersonInfoResponse {
    #[serde(default)]
    surname: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    patronymic: String,
    #[serde(default)]
    address: String,
}

#[async_trait]
impl PeopleDirectory for HttpPeopleDirectory {
    #[instrument(
        name = "tracking.people.lookup",
        skip_all,
        fields(base_url = %self.base_url)
    )]
    async fn lookup(&self, serie: &str, number: &str) -> Result<PersonInfo, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::lookup("invalid people API base URL"))?
            .pop_if_empty()
            .push("info");
        url.query_pairs_mut()
            .append_pair("passportSerie", serie)
            .append_pair("passportNumber", number);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::lookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DomainError::lookup(format!("HTTP {}", response.status())));
        }

        let info: PersonInfoResponse = response
            .json()
            .await
            .map_err(|e| DomainError::lookup(e.to_string()))?;

        Ok(PersonInfo {
            surname: info.surname,
            name: info.name,
            patronymic: info.patronymic,
            address: info.address,
        })
    }
}

/// Canned people directory for `--mock` runs: every passport resolves to the
/// same identity.
#[derive(Debug, Clone)]
pub struct FixedPeopleDirectory {
    info: PersonInfo,
}

impl FixedPeopleDirectory {
    pub fn new(info: PersonInfo) -> Self {
        Self { info }
    }
}

impl Default for FixedPeopleDirectory {
    fn default() -> Self {
        Self::new(PersonInfo {
            surname: "Mock".to_string(),
            name: "Mock".to_string(),
            patronymic: "Mock".to_string(),
            address: "127.0.0.1, Mock Street".to_string(),
        })
    }
}

#[async_trait]
impl PeopleDirectory for FixedPeopleDirectory {
    async fn lookup(&self, _serie: &str, _number: &str) -> Result<PersonInfo, DomainError> {
        Ok(self.info.clone())
    }
}
