//! Application state management module.
//!
//! This module contains the core state management for the application, including:
//! - Main `State` struct that holds the active view and everything drawn for it
//! - Navigation types (ViewState, ViewEvent, DashboardFocus)
//! - Auth form editing types
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::{AuthForm, FormField};
pub use navigation::{DashboardFocus, ViewState};

#[path = "state_impl.rs"]
mod state_impl;

pub use state_impl::{State, MARKET_DATA_FAILED, REGISTRATION_CONFIRMED};
