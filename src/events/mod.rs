//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Network events: authentication and dashboard data requests
//! - Terminal events: user input and ticks

pub mod network;
pub mod terminal;
