//! Live adapter for the `EntityDataClient` port using the GraphQL
//! entity-data service.

use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::ports::entity_data::{EntityDataClient, EntityFuture, EntityRecord, RevisionFuture};
use crate::tags::EntityKind;

/// Default GraphQL endpoint of the entity-data service.
pub const DEFAULT_ENDPOINT: &str = "https://data.loathers.net/graphql";

/// Live client that queries the entity-data GraphQL service.
pub struct LiveEntityDataClient {
    client: Client,
    endpoint: String,
}

impl LiveEntityDataClient {
    /// Creates a client for the default endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Creates a client for a custom endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self { client: Client::new(), endpoint: endpoint.to_string() }
    }

    async fn query<T: DeserializeOwned>(
        &self,
        query: String,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query })
            .send()
            .await
            .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("entity-data request failed: {e}").into()
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
            format!("Failed to read entity-data response: {e}").into()
        })?;
        if !status.is_success() {
            return Err(format!("entity-data service error ({}): {text}", status.as_u16()).into());
        }

        let body: GraphQlResponse<T> = serde_json::from_str(&text).map_err(
            |e| -> Box<dyn std::error::Error + Send + Sync> {
                format!("Failed to parse entity-data response: {e}").into()
            },
        )?;
        if let Some(error) = body.errors.first() {
            return Err(format!("entity-data query error: {}", error.message).into());
        }
        body.data.ok_or_else(|| "entity-data response has no data".into())
    }
}

impl Default for LiveEntityDataClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Request body for a GraphQL query.
#[derive(Serialize)]
struct GraphQlRequest {
    query: String,
}

/// Top-level GraphQL response envelope.
#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaQuery {
    meta_by_id: Option<Meta>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    last_revision: Option<u64>,
}

#[derive(Deserialize)]
struct Connection {
    nodes: Vec<Option<EntityRecord>>,
}

/// Root field listing every entity of `kind`, e.g. `allItems`.
fn collection_field(kind: EntityKind) -> String {
    let plural = kind.plural();
    let mut chars = plural.chars();
    let head = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
    format!("all{head}{}", chars.as_str())
}

/// Builds the query for one kind. Only kinds with shared display names ask
/// for the `ambiguous` flag.
fn entities_query(kind: EntityKind) -> String {
    let fields = if kind.requires_disambiguation() { "id name ambiguous" } else { "id name" };
    format!("{{ {} {{ nodes {{ {fields} }} }} }}", collection_field(kind))
}

impl EntityDataClient for LiveEntityDataClient {
    fn last_revision(&self) -> RevisionFuture<'_> {
        Box::pin(async move {
            let meta: MetaQuery = self.query("{ metaById(id: 1) { lastRevision } }".into()).await?;
            Ok(meta.meta_by_id.and_then(|m| m.last_revision).unwrap_or(0))
        })
    }

    fn fetch_entities(&self, kind: EntityKind) -> EntityFuture<'_> {
        Box::pin(async move {
            let field = collection_field(kind);
            let mut data: HashMap<String, Option<Connection>> =
                self.query(entities_query(kind)).await?;
            let nodes = data.remove(&field).flatten().map(|c| c.nodes).unwrap_or_default();
            Ok(nodes.into_iter().flatten().collect())
        })
    }
}
