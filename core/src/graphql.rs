//! Operation documents and request/response envelopes of the dashboard's GraphQL API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Notification, SymbolEntry};

/// Extension code attached by the server's auth directive.
pub const UNAUTHORIZED_CODE: &str = "UNAUTHORIZED";
/// Default code the server's error presenter assigns to everything else.
pub const INTERNAL_SERVER_ERROR_CODE: &str = "INTERNAL_SERVER_ERROR";

pub const GET_SYMBOLS: &str = r#"query GetSymbols($chartInput: ChartInput!) {
  symbols {
    id
    symbol
    detail {
      symbol
      shortName
      longName
      price
      change
      changePercent
      volume
      marketCap
      currencySymbol
    }
    chart(input: $chartInput) {
      symbol
      timestamp
      price
    }
  }
}"#;

pub const GET_NOTIFICATION: &str = r#"query getNotification {
  notification {
    id
    time
    targets {
      id
      symbol
      shortName
    }
  }
}"#;

pub const CREATE_NOTIFICATION: &str = r#"mutation createNotification($createNotificationInput: NotificationInput!) {
  createNotification(input: $createNotificationInput) {
    id
    time
    targets {
      id
      symbol
      shortName
    }
  }
}"#;

pub const DELETE_NOTIFICATION: &str = r#"mutation deleteNotification {
  deleteNotification
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetSymbols,
    GetNotification,
    CreateNotification,
    DeleteNotification,
}

impl Operation {
    pub fn name(self) -> &'static str {
        match self {
            Operation::GetSymbols => "GetSymbols",
            Operation::GetNotification => "getNotification",
            Operation::CreateNotification => "createNotification",
            Operation::DeleteNotification => "deleteNotification",
        }
    }

    pub fn document(self) -> &'static str {
        match self {
            Operation::GetSymbols => GET_SYMBOLS,
            Operation::GetNotification => GET_NOTIFICATION,
            Operation::CreateNotification => CREATE_NOTIFICATION,
            Operation::DeleteNotification => DELETE_NOTIFICATION,
        }
    }

    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            Operation::CreateNotification | Operation::DeleteNotification
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest<'a, V> {
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: &'a V,
}

impl<'a, V> GraphqlRequest<'a, V> {
    pub fn new(operation: Operation, variables: &'a V) -> Self {
        Self {
            operation_name: operation.name(),
            query: operation.document(),
            variables,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

impl GraphqlError {
    pub fn code(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.code.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolsVariables<'a> {
    pub chart_input: &'a crate::period::ChartRange,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationVariables<'a> {
    pub create_notification_input: &'a crate::notification::NotificationInput,
}

/// Variables of operations that take none; serializes as `{}`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, Deserialize)]
pub struct SymbolsData {
    pub symbols: Vec<SymbolEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationData {
    pub notification: Option<Notification>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationData {
    pub create_notification: Notification,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNotificationData {
    pub delete_notification: String,
}
