use serde::Serialize;

use super::checkout::OrderReceipt;
use super::product::CategoryFilter;

/// Which top-level screen is active. Exactly one at a time; the session
/// starts in `Browsing` and cycles for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Browsing,
    Checkout,
    Success,
}

/// Read surface the rendering layer consumes: the active screen plus the
/// browsing sub-state and checkout progress.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub view: ViewState,
    pub cart_panel_open: bool,
    pub search_query: String,
    pub category_filter: CategoryFilter,
    pub processing: bool,
    pub receipt: Option<OrderReceipt>,
}
