//! Terminal client for the stock dashboard GraphQL API.

pub mod chart;
pub mod cli;
pub mod logging;
pub mod notification;
pub mod symbols;
pub mod transport;
