//! GraphQL request and response envelopes
//!
//! The Sourcegraph API speaks GraphQL over plain HTTP POST. Queries are kept
//! as string constants here rather than generated code; the shapes involved
//! are small and stable.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

/// Query for the batch changes overview list.
pub const BATCH_CHANGES_QUERY: &str = r#"
query BatchChanges($first: Int!) {
  batchChanges(first: $first) {
    nodes {
      id
      name
      state
      url
      namespace {
        id
        namespaceName
      }
      creator {
        displayName
        username
      }
      changesetsStats {
        total
        open
        closed
        merged
        failed
      }
      updatedAt
    }
  }
}
"#;

/// Query for the changesets of one batch change, addressed by namespace
/// and name.
pub const CHANGESETS_QUERY: &str = r#"
query BatchChangeChangesets($namespace: ID!, $name: String!, $first: Int!) {
  batchChange(namespace: $namespace, name: $name) {
    changesets(first: $first) {
      nodes {
        ... on ExternalChangeset {
          id
          state
          reviewState
          externalID
          externalURL {
            url
          }
          repository {
            name
          }
          updatedAt
        }
      }
    }
  }
}
"#;

/// Mutation that (re)publishes changesets to their code host. The server
/// uses the same mutation for first publishes and retries of failed ones.
pub const PUBLISH_CHANGESETS_MUTATION: &str = r#"
mutation PublishChangesets($batchChange: ID!, $changesets: [ID!]!) {
  publishChangesets(batchChange: $batchChange, changesets: $changesets) {
    id
  }
}
"#;

/// Request body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphqlRequest<'a> {
    /// Query or mutation document
    pub query: &'a str,
    /// Variables referenced by the document
    pub variables: Value,
}

/// One error entry in a GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphqlError {
    /// Human-readable message from the server
    pub message: String,
}

/// Response body of a GraphQL POST. `data` and `errors` can each be absent;
/// a response with errors may still carry partial data, which this client
/// discards.
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse {
    pub data: Option<Value>,
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// Extracts `data` decoded as `T`, turning GraphQL-level errors into
    /// [`ClientError::Api`] and shape mismatches into [`ClientError::Decode`].
    pub fn into_data<T: DeserializeOwned>(self) -> ClientResult<T> {
        if let Some(errors) = self.errors {
            if !errors.is_empty() {
                let combined = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(ClientError::Api(combined));
            }
        }
        let data = self
            .data
            .ok_or_else(|| ClientError::Decode("response carried no data".to_string()))?;
        serde_json::from_value(data).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        answer: u32,
    }

    #[test]
    fn test_into_data_decodes_payload() {
        let response: GraphqlResponse =
            serde_json::from_value(json!({ "data": { "answer": 42 } })).unwrap();
        let payload: Payload = response.into_data().unwrap();
        assert_eq!(payload, Payload { answer: 42 });
    }

    #[test]
    fn test_into_data_collects_error_messages() {
        let response: GraphqlResponse = serde_json::from_value(json!({
            "data": null,
            "errors": [
                { "message": "batch change not found" },
                { "message": "insufficient permissions" }
            ]
        }))
        .unwrap();
        let err = response.into_data::<Payload>().unwrap_err();
        match err {
            ClientError::Api(message) => {
                assert_eq!(message, "batch change not found; insufficient permissions");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_into_data_missing_data_is_decode_error() {
        let response: GraphqlResponse = serde_json::from_value(json!({})).unwrap();
        let err = response.into_data::<Payload>().unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_into_data_wrong_shape_is_decode_error() {
        let response: GraphqlResponse =
            serde_json::from_value(json!({ "data": { "answer": "not a number" } })).unwrap();
        let err = response.into_data::<Payload>().unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_request_serializes_query_and_variables() {
        let request = GraphqlRequest {
            query: "query { x }",
            variables: json!({ "first": 100 }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["query"], "query { x }");
        assert_eq!(body["variables"]["first"], 100);
    }
}
