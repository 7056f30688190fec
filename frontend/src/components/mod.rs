pub mod dashboard;
pub mod not_found;
pub mod notification;
pub mod pagination;
pub mod period_selector;
pub mod search_box;
pub mod stock_card;
pub mod stock_chart;
