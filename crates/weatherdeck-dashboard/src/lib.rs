//! Dashboard state for WeatherDeck.
//!
//! `DashboardController` owns the search state, the unit preference and the
//! favorites, and is the only way to change them. Front ends render from
//! `DashboardController::view()` and forward user actions to it.

pub mod controller;
pub mod error;
pub mod notification;
pub mod service;

pub use controller::{
    AddFavoriteOutcome, DashboardController, SearchPhase, SearchState, SearchTicket, ViewState,
};
pub use error::SearchError;
pub use notification::{Notification, NotificationKind, DEFAULT_NOTIFICATION_TTL};
pub use service::{apply_message, spawn_search, DashboardMessage};
