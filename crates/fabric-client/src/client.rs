//! Fabric controller API client
//!
//! Implements the REST client for the fabric controller's managed-object
//! tree: fetch by DN, idempotent create-or-modify, delete by DN, and the
//! relation sub-object reads/writes.

use crate::dn::Dn;
use crate::error::FabricError;
use crate::fabric_trait::FabricApi;
use crate::models::{MoResponse, ObjectAttributes, RelationKind};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Credential bundle handed to the connector by the host.
///
/// Shape matches the provider secret: `{"url": ..., "username": ...,
/// "password": ..., "insecure": bool}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Base URL of the fabric controller (e.g. "https://apic.example.com")
    pub url: String,
    /// API username
    pub username: String,
    /// API password
    pub password: String,
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
}

impl Credentials {
    /// Parse a raw credential payload.
    pub fn from_json(data: &[u8]) -> Result<Self, FabricError> {
        serde_json::from_slice(data)
            .map_err(|e| FabricError::InvalidRequest(format!("malformed credential payload: {e}")))
    }
}

/// Fabric controller API client
pub struct FabricClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl FabricClient {
    /// Create a new fabric client from a credential bundle.
    ///
    /// Pure construction: no network call is made here. Failures are limited
    /// to HTTP client build errors.
    pub fn new(credentials: Credentials) -> Result<Self, FabricError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .danger_accept_invalid_certs(credentials.insecure)
            .build()
            .map_err(FabricError::Http)?;

        Ok(Self {
            client,
            base_url: credentials.url.trim_end_matches('/').to_string(),
            username: credentials.username,
            password: credentials.password,
        })
    }

    fn mo_url(&self, dn: &Dn) -> String {
        format!("{}/api/mo/{}.json", self.base_url, dn)
    }

    fn relation_url(&self, dn: &Dn, relation: &RelationKind) -> String {
        format!("{}/api/mo/{}/{}.json", self.base_url, dn, relation.rn)
    }

    /// GET a managed-object URL, mapping the empty-count envelope and
    /// HTTP 404 to `Ok(None)`.
    async fn get_mo(&self, url: &str) -> Result<Option<ObjectAttributes>, FabricError> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FabricError::Http)?;

        let status = response.status();
        if status == 404 {
            return Ok(None);
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Authentication(format!("{status} - {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Api(format!(
                "Failed to fetch {url}: {status} - {body}"
            )));
        }

        let envelope: MoResponse = response.json().await?;
        if envelope.is_empty() {
            return Ok(None);
        }
        envelope
            .first_attributes()
            .map(Some)
            .ok_or_else(|| FabricError::Api(format!("Malformed object envelope from {url}")))
    }

    /// POST a managed-object payload to a URL.
    async fn post_mo(&self, url: &str, payload: &Value) -> Result<(), FabricError> {
        debug!("Posting to {}", url);
        let response = self
            .client
            .post(url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(FabricError::Http)?;

        let status = response.status();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Authentication(format!("{status} - {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Api(format!(
                "Failed to post {url}: {status} - {body}"
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl FabricApi for FabricClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_session(&self) -> Result<(), FabricError> {
        // The tree root is a lightweight authenticated read.
        let url = format!("{}/api/mo/{}.json", self.base_url, crate::dn::DN_ROOT);
        debug!("Validating fabric credentials and connectivity");
        self.get_mo(&url).await?;
        debug!("Fabric session validated");
        Ok(())
    }

    async fn get(&self, dn: &Dn) -> Result<Option<ObjectAttributes>, FabricError> {
        self.get_mo(&self.mo_url(dn)).await
    }

    async fn upsert(
        &self,
        class: &str,
        dn: &Dn,
        attributes: ObjectAttributes,
    ) -> Result<(), FabricError> {
        let mut attrs = attributes.0;
        attrs.insert("dn".to_string(), Value::String(dn.to_string()));
        // "created,modified" makes the write act as create-or-update.
        attrs.insert("status".to_string(), Value::String("created,modified".to_string()));
        let payload = json!({ class: { "attributes": attrs } });
        self.post_mo(&self.mo_url(dn), &payload).await
    }

    async fn delete_by_dn(&self, dn: &Dn, class: &str) -> Result<(), FabricError> {
        let url = self.mo_url(dn);
        debug!("Deleting {} ({})", dn, class);
        let response = self
            .client
            .delete(&url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FabricError::Http)?;

        let status = response.status();
        if status == 404 {
            return Err(FabricError::NotFound(format!("{class} {dn} not found")));
        }
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Authentication(format!("{status} - {body}")));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FabricError::Api(format!(
                "Failed to delete {dn}: {status} - {body}"
            )));
        }
        Ok(())
    }

    async fn get_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
    ) -> Result<Option<String>, FabricError> {
        let url = self.relation_url(dn, relation);
        let attrs = match self.get_mo(&url).await? {
            Some(attrs) => attrs,
            None => return Ok(None),
        };
        Ok(attrs.get("tDn").map(str::to_owned))
    }

    async fn set_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
        target_name: &str,
    ) -> Result<(), FabricError> {
        let url = self.relation_url(dn, relation);
        let payload = json!({
            relation.class: {
                "attributes": {
                    "dn": format!("{}/{}", dn, relation.rn),
                    relation.name_attr: target_name,
                    "status": "created,modified",
                }
            }
        });
        self.post_mo(&url, &payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_parse() {
        let data =
            br#"{"url": "https://apic:443/", "username": "admin", "password": "s", "insecure": true}"#;
        let creds = Credentials::from_json(data).unwrap();
        assert_eq!(creds.url, "https://apic:443/");
        assert!(creds.insecure);
    }

    #[test]
    fn credentials_insecure_defaults_false() {
        let data = br#"{"url": "https://apic", "username": "admin", "password": "s"}"#;
        let creds = Credentials::from_json(data).unwrap();
        assert!(!creds.insecure);
    }

    #[test]
    fn malformed_credentials_rejected() {
        let err = Credentials::from_json(b"not-json").unwrap_err();
        assert!(matches!(err, FabricError::InvalidRequest(_)));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = FabricClient::new(Credentials {
            url: "https://apic/".to_string(),
            username: "admin".to_string(),
            password: "s".to_string(),
            insecure: false,
        })
        .unwrap();
        assert_eq!(client.base_url(), "https://apic");
    }
}
