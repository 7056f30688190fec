//! Typed access to the dashboard's GraphQL API over any [`Transport`].

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::cache::{QueryCache, QueryKey};
use crate::error::{ApiError, TransportError};
use crate::graphql::{
    CreateNotificationData, CreateNotificationVariables, DeleteNotificationData, GraphqlRequest,
    GraphqlResponse, NoVariables, NotificationData, Operation, SymbolsData, SymbolsVariables,
};
use crate::model::{Notification, SymbolEntry};
use crate::notification::NotificationInput;
use crate::period::ChartRange;

/// How many times a response flagged `INTERNAL_SERVER_ERROR` is re-sent.
pub const INTERNAL_ERROR_RETRIES: u32 = 1;

/// Raw HTTP reply to a GraphQL POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves a serialized GraphQL request to the server. Implementations carry the
/// session credentials (browser cookies, or an explicit cookie header).
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, body: String) -> Result<HttpReply, TransportError>;
}

pub struct Api<T> {
    transport: T,
    cache: RefCell<QueryCache>,
    /// End of the day the cached symbol lists were requested for.
    symbols_day: Cell<Option<DateTime<Utc>>>,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            cache: RefCell::new(QueryCache::default()),
            symbols_day: Cell::new(None),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// All symbols, each with its chart for `range` (charts are only populated
    /// for `range.symbol` when one is given).
    pub async fn symbols(&self, range: &ChartRange) -> Result<Vec<SymbolEntry>, ApiError> {
        // Ranges are anchored on the current day; lists from earlier days are dead.
        let previous_day = self.symbols_day.replace(Some(range.end));
        if previous_day.is_some_and(|day| day != range.end) {
            let dropped = self.invalidate(Operation::GetSymbols);
            log::debug!(target: "api.cache", "day changed, dropped {dropped} symbol lists");
        }

        let variables = SymbolsVariables { chart_input: range };
        let data: SymbolsData = self.query(Operation::GetSymbols, &variables).await?;
        Ok(data.symbols)
    }

    pub async fn notification(&self) -> Result<Option<Notification>, ApiError> {
        let data: NotificationData = self
            .query(Operation::GetNotification, &NoVariables {})
            .await?;
        Ok(data.notification)
    }

    /// Register `input`, replacing any existing notification.
    pub async fn create_notification(&self, input: &NotificationInput) -> Result<Notification, ApiError> {
        let variables = CreateNotificationVariables {
            create_notification_input: input,
        };
        let data: CreateNotificationData = self
            .mutate(Operation::CreateNotification, &variables)
            .await?;
        Ok(data.create_notification)
    }

    /// Remove the current notification; returns the deleted id.
    pub async fn delete_notification(&self) -> Result<String, ApiError> {
        let data: DeleteNotificationData = self
            .mutate(Operation::DeleteNotification, &NoVariables {})
            .await?;
        Ok(data.delete_notification)
    }

    /// Forget cached results of `operation` so the next read goes to the server.
    pub fn invalidate(&self, operation: Operation) -> usize {
        self.cache.borrow_mut().invalidate(operation)
    }

    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }

    async fn query<V, D>(&self, operation: Operation, variables: &V) -> Result<D, ApiError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let key = QueryKey::new(operation, variables)?;
        let cached = self.cache.borrow().get(&key).cloned();
        if let Some(data) = cached {
            log::debug!(target: "api.cache", "{} served from cache", operation.name());
            return Ok(serde_json::from_value(data)?);
        }

        let data = self.execute(operation, variables).await?;
        let parsed = serde_json::from_value(data.clone())?;
        self.cache.borrow_mut().insert(key, data);
        Ok(parsed)
    }

    async fn mutate<V, D>(&self, operation: Operation, variables: &V) -> Result<D, ApiError>
    where
        V: Serialize,
        D: DeserializeOwned,
    {
        let data = self.execute(operation, variables).await?;
        let dropped = self.invalidate(Operation::GetNotification);
        log::debug!(
            target: "api.cache",
            "{} invalidated {dropped} notification entries",
            operation.name()
        );
        Ok(serde_json::from_value(data)?)
    }

    async fn execute<V: Serialize>(&self, operation: Operation, variables: &V) -> Result<Value, ApiError> {
        let body = serde_json::to_string(&GraphqlRequest::new(operation, variables))?;
        let mut attempt = 0;

        loop {
            match self.send(body.clone()).await {
                Err(err) if err.is_internal() && attempt < INTERNAL_ERROR_RETRIES => {
                    attempt += 1;
                    log::warn!(
                        target: "api.retry",
                        "{} failed with an internal error, retrying ({attempt}/{INTERNAL_ERROR_RETRIES}): {err}",
                        operation.name()
                    );
                }
                result => return result,
            }
        }
    }

    async fn send(&self, body: String) -> Result<Value, ApiError> {
        let reply = self.transport.post(body).await?;

        let response: GraphqlResponse = match serde_json::from_str(&reply.body) {
            Ok(response) => response,
            Err(err) if reply.is_success() => return Err(err.into()),
            Err(_) => {
                return Err(TransportError::Status {
                    status: reply.status,
                    body: reply.body,
                }
                .into())
            }
        };

        if !response.errors.is_empty() {
            return Err(ApiError::Graphql(response.errors));
        }

        match response.data {
            None | Some(Value::Null) => Err(ApiError::MissingData),
            Some(data) => Ok(data),
        }
    }
}
