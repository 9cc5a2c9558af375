//! HTTP-based Sourcegraph API client
//!
//! Direct implementation of the `BatchChangesClient` trait speaking GraphQL
//! over HTTP POST to a Sourcegraph instance. Cancellation races the token
//! against the in-flight request, so a superseded fetch stops occupying the
//! connection pool almost immediately.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::client::{BatchChangesClient, PAGE_SIZE};
use crate::error::{ClientError, ClientResult};
use crate::graphql::{
    GraphqlRequest, GraphqlResponse, BATCH_CHANGES_QUERY, CHANGESETS_QUERY,
    PUBLISH_CHANGESETS_MUTATION,
};
use crate::types::{BatchChange, Changeset};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bodies of failed responses are kept short; they end up in log lines and
/// status bar messages.
const MAX_ERROR_BODY_LEN: usize = 300;

/// Direct HTTP client for the Sourcegraph batch changes API
///
/// This is the base implementation that makes actual API calls. Requests
/// authenticate with a Sourcegraph access token.
#[derive(Debug, Clone)]
pub struct HttpBatchChangesClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl HttpBatchChangesClient {
    /// Create a new client for the given instance
    ///
    /// # Arguments
    ///
    /// * `instance_url` - Base URL of the Sourcegraph instance, with or
    ///   without a trailing slash
    /// * `access_token` - Sourcegraph access token used for every request
    pub fn new(instance_url: &str, access_token: &str) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint: format!("{}/.api/graphql", instance_url.trim_end_matches('/')),
            token: access_token.to_string(),
            http,
        })
    }

    /// GraphQL endpoint URL this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs one GraphQL request, racing it against the cancellation token.
    async fn execute(
        &self,
        cancel: &CancellationToken,
        query: &'static str,
        variables: Value,
    ) -> ClientResult<GraphqlResponse> {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("request to {} cancelled", self.endpoint);
                Err(ClientError::Cancelled)
            }
            result = self.post(query, variables) => result,
        }
    }

    async fn post(&self, query: &str, variables: Value) -> ClientResult<GraphqlResponse> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("token {}", self.token),
            )
            .json(&GraphqlRequest { query, variables })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BatchChangesClient for HttpBatchChangesClient {
    async fn fetch_batch_changes(
        &self,
        cancel: &CancellationToken,
    ) -> ClientResult<Vec<BatchChange>> {
        debug!("fetching batch changes from {}", self.endpoint);

        let variables = json!({ "first": PAGE_SIZE });
        let response = self.execute(cancel, BATCH_CHANGES_QUERY, variables).await?;
        let data: BatchChangesData = response.into_data()?;
        let batch_changes = data.into_nodes();

        debug!("fetched {} batch changes", batch_changes.len());
        Ok(batch_changes)
    }

    async fn fetch_changesets(
        &self,
        cancel: &CancellationToken,
        namespace_id: &str,
        batch_change_name: &str,
    ) -> ClientResult<Vec<Changeset>> {
        debug!(
            "fetching changesets of {} in namespace {}",
            batch_change_name, namespace_id
        );

        let variables = json!({
            "namespace": namespace_id,
            "name": batch_change_name,
            "first": PAGE_SIZE,
        });
        let response = self.execute(cancel, CHANGESETS_QUERY, variables).await?;
        let data: ChangesetsData = response.into_data()?;
        let changesets = data.into_changesets()?;

        debug!("fetched {} changesets", changesets.len());
        Ok(changesets)
    }

    async fn publish_changeset(
        &self,
        cancel: &CancellationToken,
        batch_change_id: &str,
        changeset_id: &str,
    ) -> ClientResult<()> {
        debug!(
            "publishing changeset {} of batch change {}",
            changeset_id, batch_change_id
        );

        let variables = json!({
            "batchChange": batch_change_id,
            "changesets": [changeset_id],
        });
        let response = self
            .execute(cancel, PUBLISH_CHANGESETS_MUTATION, variables)
            .await?;
        // The mutation answers with a bulk operation id; nothing in it is
        // needed here, but a well-formed data field still gets checked.
        response.into_data::<Value>()?;
        Ok(())
    }
}

/// `data` shape of the batch changes list query.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchChangesData {
    batch_changes: Option<NodeList<BatchChange>>,
}

impl BatchChangesData {
    fn into_nodes(self) -> Vec<BatchChange> {
        self.batch_changes
            .and_then(|list| list.nodes)
            .unwrap_or_default()
    }
}

/// `data` shape of the changesets query. `batchChange` is null when the
/// batch change was deleted between the list fetch and this one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangesetsData {
    batch_change: Option<BatchChangeNode>,
}

#[derive(Debug, Deserialize)]
struct BatchChangeNode {
    changesets: Option<NodeList<Value>>,
}

impl ChangesetsData {
    fn into_changesets(self) -> ClientResult<Vec<Changeset>> {
        let nodes = self
            .batch_change
            .and_then(|bc| bc.changesets)
            .and_then(|list| list.nodes)
            .unwrap_or_default();
        decode_changeset_nodes(nodes)
    }
}

#[derive(Debug, Deserialize)]
struct NodeList<T> {
    nodes: Option<Vec<T>>,
}

/// Decodes changeset nodes one by one. Changesets on code hosts the viewer
/// has no access to come back as empty objects because the inline fragment
/// in the query does not match them; those are skipped, not errors.
fn decode_changeset_nodes(nodes: Vec<Value>) -> ClientResult<Vec<Changeset>> {
    let mut changesets = Vec::with_capacity(nodes.len());
    for node in nodes {
        if node.as_object().is_some_and(|obj| obj.is_empty()) {
            debug!("skipping hidden changeset node");
            continue;
        }
        let changeset =
            serde_json::from_value(node).map_err(|e| ClientError::Decode(e.to_string()))?;
        changesets.push(changeset);
    }
    Ok(changesets)
}

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body.to_string();
    }
    let mut cut = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…", &body[..cut])
}
