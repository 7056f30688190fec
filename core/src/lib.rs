//! Client-side state and data shaping for the stock dashboard: period
//! resolution, symbol search and paging, selection, chart formatting,
//! notification handling and a cached GraphQL client.

pub mod cache;
pub mod chart;
pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod graphql;
pub mod model;
pub mod notification;
pub mod pagination;
pub mod period;
pub mod search;
pub mod selection;

pub use chart::{ChartPoint, ChartSeries, ChartView};
pub use client::{Api, HttpReply, Transport};
pub use config::DashboardConfig;
pub use error::{ApiError, TransportError};
pub use generation::{RequestGeneration, Ticket};
pub use model::{Notification, NotificationTarget, RawChartPoint, SymbolDetail, SymbolEntry};
pub use notification::{
    NotificationDraft, NotificationError, NotificationInput, NotificationState, NotificationStatus,
    NotificationView,
};
pub use pagination::{PageState, PAGE_SIZE};
pub use period::{ChartRange, Period};
pub use selection::{SelectedSymbol, Selection};
