//! Access to the remote collection store.
//!
//! Every entity lives in a named collection of JSON documents keyed by `_id`.
//! The store offers whole-collection reads and single-document writes only;
//! there are no transactions and no server-side filtering.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Scheme selecting the in-process store.
pub const MEMORY_STORE_URL: &str = "memory://";

/// Raw document operations against named collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get_all(&self, collection: &str) -> RepositoryResult<Vec<Value>>;
    async fn get_by_id(&self, collection: &str, id: &str) -> RepositoryResult<Option<Value>>;
    async fn create(&self, collection: &str, document: Value) -> RepositoryResult<Value>;
    /// Merges the fields of `document` into the stored document named by its `_id`.
    async fn update(&self, collection: &str, document: Value) -> RepositoryResult<Value>;
    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<()>;
}

fn document_id(document: &Value) -> RepositoryResult<String> {
    document
        .get("_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RepositoryError::ValidationError("document has no _id".to_string()))
}

#[derive(Deserialize)]
struct ItemsEnvelope {
    items: Vec<Value>,
}

/// REST client for a hosted collection store.
///
/// Layout: `GET|POST {base}/collections/{collection}/items` and
/// `GET|PATCH|DELETE {base}/collections/{collection}/items/{id}`.
pub struct HttpDocumentStore {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpDocumentStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> RepositoryResult<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(RepositoryError::ConnectionError(
                "store url not configured".to_string(),
            ));
        }
        let base_url = Url::parse(base_url)
            .map_err(|e| RepositoryError::ConnectionError(format!("invalid store url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(RepositoryError::ConnectionError(format!(
                "invalid store url: {base_url}"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Appends percent-encoded path segments to the base url.
    fn url(&self, segments: &[&str]) -> RepositoryResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RepositoryError::ConnectionError(format!("invalid store url: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn items_url(&self, collection: &str) -> RepositoryResult<Url> {
        self.url(&["collections", collection, "items"])
    }

    fn item_url(&self, collection: &str, id: &str) -> RepositoryResult<Url> {
        self.url(&["collections", collection, "items", id])
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> RepositoryResult<reqwest::Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }

        let body = response.text().await.unwrap_or_default();
        log::warn!("Store request failed with {status}: {body}");
        Err(RepositoryError::StoreError(format!(
            "HTTP {status} - {}",
            body.chars().take(200).collect::<String>()
        )))
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get_all(&self, collection: &str) -> RepositoryResult<Vec<Value>> {
        let response = self.send(self.client.get(self.items_url(collection)?)).await?;
        let envelope: ItemsEnvelope = response.json().await?;
        Ok(envelope.items)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> RepositoryResult<Option<Value>> {
        match self.send(self.client.get(self.item_url(collection, id)?)).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, collection: &str, document: Value) -> RepositoryResult<Value> {
        let request = self.client.post(self.items_url(collection)?).json(&document);
        Ok(self.send(request).await?.json().await?)
    }

    async fn update(&self, collection: &str, document: Value) -> RepositoryResult<Value> {
        let id = document_id(&document)?;
        let request = self
            .client
            .patch(self.item_url(collection, &id)?)
            .json(&document);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<()> {
        self.send(self.client.delete(self.item_url(collection, id)?))
            .await?;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryState {
    collections: HashMap<String, Vec<Value>>,
    clock: Option<DateTime<Utc>>,
}

impl MemoryState {
    /// Strictly increasing timestamps so creation order stays observable.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.clock {
            Some(last) if now <= last => last + chrono::Duration::milliseconds(1),
            _ => now,
        };
        self.clock = Some(stamp);
        stamp
    }
}

/// In-process store used for tests and local runs.
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: Mutex<MemoryState>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|e| RepositoryError::Unexpected(format!("store lock poisoned: {e}")))
    }
}

fn has_id(document: &Value, id: &str) -> bool {
    document.get("_id").and_then(Value::as_str) == Some(id)
}

fn as_object(document: Value) -> RepositoryResult<Map<String, Value>> {
    match document {
        Value::Object(map) => Ok(map),
        other => Err(RepositoryError::ValidationError(format!(
            "expected a document object, got {other}"
        ))),
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get_all(&self, collection: &str) -> RepositoryResult<Vec<Value>> {
        let state = self.lock()?;
        Ok(state
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> RepositoryResult<Option<Value>> {
        let state = self.lock()?;
        Ok(state.collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|doc| has_id(doc, id))
                .cloned()
        }))
    }

    async fn create(&self, collection: &str, document: Value) -> RepositoryResult<Value> {
        let id = document_id(&document)?;
        let mut map = as_object(document)?;
        let mut state = self.lock()?;

        let exists = state
            .collections
            .get(collection)
            .is_some_and(|docs| docs.iter().any(|d| has_id(d, &id)));
        if exists {
            return Err(RepositoryError::StoreError(format!(
                "document {id} already exists in {collection}"
            )));
        }

        let stamp = state.tick();
        map.entry("_createdDate")
            .or_insert_with(|| Value::String(stamp.to_rfc3339()));
        map.insert("_updatedDate".to_string(), Value::String(stamp.to_rfc3339()));

        let stored = Value::Object(map);
        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, collection: &str, document: Value) -> RepositoryResult<Value> {
        let id = document_id(&document)?;
        let changes = as_object(document)?;
        let mut state = self.lock()?;
        let stamp = state.tick();

        let stored = state
            .collections
            .get_mut(collection)
            .and_then(|docs| {
                docs.iter_mut().find(|d| has_id(d, &id))
            })
            .ok_or(RepositoryError::NotFound)?;

        if let Value::Object(existing) = stored {
            for (key, value) in changes {
                if key != "_createdDate" {
                    existing.insert(key, value);
                }
            }
            existing.insert("_updatedDate".to_string(), Value::String(stamp.to_rfc3339()));
        }
        Ok(stored.clone())
    }

    async fn delete(&self, collection: &str, id: &str) -> RepositoryResult<()> {
        let mut state = self.lock()?;
        let docs = state
            .collections
            .get_mut(collection)
            .ok_or(RepositoryError::NotFound)?;
        let position = docs
            .iter()
            .position(|d| has_id(d, id))
            .ok_or(RepositoryError::NotFound)?;
        docs.remove(position);
        Ok(())
    }
}
