//! Mock FabricApi for unit testing
//!
//! Stores objects and relations in memory, keyed by DN, so reconciliation
//! logic can be tested without a running fabric controller. Failure
//! injection switches let tests exercise transport-error and
//! partial-failure paths.

use crate::dn::{DN_ROOT, Dn, TENANT_PREFIX};
use crate::error::FabricError;
use crate::fabric_trait::FabricApi;
use crate::models::{ObjectAttributes, RelationKind};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
struct StoredObject {
    class: String,
    attributes: ObjectAttributes,
}

/// Mock fabric client for testing
#[derive(Clone)]
pub struct MockFabricClient {
    base_url: String,
    objects: Arc<Mutex<HashMap<String, StoredObject>>>,
    // dn -> relation class -> target DN
    relations: Arc<Mutex<HashMap<String, HashMap<String, String>>>>,
    fail_get: Arc<Mutex<Option<String>>>,
    fail_upsert: Arc<Mutex<Option<String>>>,
    fail_get_relation: Arc<Mutex<Option<String>>>,
    fail_set_relation: Arc<Mutex<Option<String>>>,
}

impl MockFabricClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            relations: Arc::new(Mutex::new(HashMap::new())),
            fail_get: Arc::new(Mutex::new(None)),
            fail_upsert: Arc::new(Mutex::new(None)),
            fail_get_relation: Arc::new(Mutex::new(None)),
            fail_set_relation: Arc::new(Mutex::new(None)),
        }
    }

    /// Seed an object in the mock store (for test setup)
    pub fn add_object(&self, class: &str, dn: &Dn, attributes: ObjectAttributes) {
        self.objects.lock().unwrap().insert(
            dn.to_string(),
            StoredObject {
                class: class.to_string(),
                attributes,
            },
        );
    }

    /// Seed a relation target DN (for test setup)
    pub fn add_relation(&self, dn: &Dn, relation: &RelationKind, target_dn: &str) {
        self.relations
            .lock()
            .unwrap()
            .entry(dn.to_string())
            .or_default()
            .insert(relation.class.to_string(), target_dn.to_string());
    }

    /// Read back a stored object's attributes (for assertions)
    pub fn object(&self, dn: &Dn) -> Option<ObjectAttributes> {
        self.objects
            .lock()
            .unwrap()
            .get(dn.as_str())
            .map(|o| o.attributes.clone())
    }

    /// Read back a stored relation target DN (for assertions)
    pub fn relation(&self, dn: &Dn, relation: &RelationKind) -> Option<String> {
        self.relations
            .lock()
            .unwrap()
            .get(dn.as_str())
            .and_then(|rels| rels.get(relation.class).cloned())
    }

    /// Make every `get` fail with a transport-style error
    pub fn fail_get(&self, message: &str) {
        *self.fail_get.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `upsert` fail
    pub fn fail_upsert(&self, message: &str) {
        *self.fail_upsert.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `get_relation` fail
    pub fn fail_get_relation(&self, message: &str) {
        *self.fail_get_relation.lock().unwrap() = Some(message.to_string());
    }

    /// Make every `set_relation` fail
    pub fn fail_set_relation(&self, message: &str) {
        *self.fail_set_relation.lock().unwrap() = Some(message.to_string());
    }

    /// Clear all failure injection
    pub fn clear_failures(&self) {
        *self.fail_get.lock().unwrap() = None;
        *self.fail_upsert.lock().unwrap() = None;
        *self.fail_get_relation.lock().unwrap() = None;
        *self.fail_set_relation.lock().unwrap() = None;
    }
}

#[async_trait::async_trait]
impl FabricApi for MockFabricClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_session(&self) -> Result<(), FabricError> {
        Ok(())
    }

    async fn get(&self, dn: &Dn) -> Result<Option<ObjectAttributes>, FabricError> {
        if let Some(msg) = self.fail_get.lock().unwrap().clone() {
            return Err(FabricError::Api(msg));
        }
        let stored = match self.objects.lock().unwrap().get(dn.as_str()) {
            Some(stored) => stored.clone(),
            None => return Ok(None),
        };
        // The controller echoes the DN back as an attribute on reads.
        let mut attrs = stored.attributes;
        attrs
            .0
            .insert("dn".to_string(), Value::String(dn.to_string()));
        Ok(Some(attrs))
    }

    async fn upsert(
        &self,
        class: &str,
        dn: &Dn,
        attributes: ObjectAttributes,
    ) -> Result<(), FabricError> {
        if let Some(msg) = self.fail_upsert.lock().unwrap().clone() {
            return Err(FabricError::Api(msg));
        }
        self.objects.lock().unwrap().insert(
            dn.to_string(),
            StoredObject {
                class: class.to_string(),
                attributes,
            },
        );
        Ok(())
    }

    async fn delete_by_dn(&self, dn: &Dn, class: &str) -> Result<(), FabricError> {
        let removed = self.objects.lock().unwrap().remove(dn.as_str());
        if removed.is_none() {
            return Err(FabricError::NotFound(format!("{class} {dn} not found")));
        }
        // The controller cascade-deletes children, relations included.
        self.relations.lock().unwrap().remove(dn.as_str());
        Ok(())
    }

    async fn get_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
    ) -> Result<Option<String>, FabricError> {
        if let Some(msg) = self.fail_get_relation.lock().unwrap().clone() {
            return Err(FabricError::Api(msg));
        }
        Ok(self.relation(dn, relation))
    }

    async fn set_relation(
        &self,
        dn: &Dn,
        relation: &RelationKind,
        target_name: &str,
    ) -> Result<(), FabricError> {
        if let Some(msg) = self.fail_set_relation.lock().unwrap().clone() {
            return Err(FabricError::Api(msg));
        }
        // Targets resolve under the owning object's tenant.
        let tenant = dn.tenant_name().ok_or_else(|| {
            FabricError::InvalidRequest(format!("DN {dn} carries no tenant segment"))
        })?;
        let target_dn = format!(
            "{DN_ROOT}/{TENANT_PREFIX}{tenant}/{}{target_name}",
            relation.target_prefix
        );
        self.relations
            .lock()
            .unwrap()
            .entry(dn.to_string())
            .or_default()
            .insert(relation.class.to_string(), target_dn);
        Ok(())
    }
}
