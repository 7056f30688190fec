use thiserror::Error;

use crate::graphql::{GraphqlError, INTERNAL_SERVER_ERROR_CODE, UNAUTHORIZED_CODE};
use crate::notification::NotificationError;

/// Failure to move a request body to the server and back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("server responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("graphql error: {}", join_messages(.0))]
    Graphql(Vec<GraphqlError>),

    #[error("response carried no data")]
    MissingData,

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] NotificationError),
}

impl ApiError {
    /// Extension codes carried by a GraphQL error response.
    pub fn codes(&self) -> Vec<&str> {
        match self {
            ApiError::Graphql(errors) => errors.iter().filter_map(GraphqlError::code).collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.codes().contains(&UNAUTHORIZED_CODE)
    }

    pub fn is_internal(&self) -> bool {
        self.codes().contains(&INTERNAL_SERVER_ERROR_CODE)
    }
}

fn join_messages(errors: &[GraphqlError]) -> String {
    errors
        .iter()
        .map(|error| match error.code() {
            Some(code) => format!("{} ({code})", error.message),
            None => error.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::ErrorExtensions;

    fn graphql_error(message: &str, code: Option<&str>) -> GraphqlError {
        GraphqlError {
            message: message.to_string(),
            path: None,
            extensions: code.map(|code| ErrorExtensions {
                code: Some(code.to_string()),
            }),
        }
    }

    #[test]
    fn unauthorized_is_recognized_by_code() {
        let error = ApiError::Graphql(vec![graphql_error("no session", Some("UNAUTHORIZED"))]);
        assert!(error.is_unauthorized());
        assert!(!error.is_internal());
        assert_eq!(error.to_string(), "graphql error: no session (UNAUTHORIZED)");
    }

    #[test]
    fn other_failures_are_not_authorization_errors() {
        let internal = ApiError::Graphql(vec![graphql_error("db down", Some("INTERNAL_SERVER_ERROR"))]);
        assert!(!internal.is_unauthorized());
        assert!(internal.is_internal());

        let transport = ApiError::Transport(TransportError::Request("offline".into()));
        assert!(!transport.is_unauthorized());
        assert!(transport.codes().is_empty());
    }
}
