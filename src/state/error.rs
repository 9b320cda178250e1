//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Network event could not be queued
    #[error("Network event channel closed")]
    ChannelClosed,

    /// Selected news entry has no link to follow
    #[error("No link to open for the selected entry")]
    NoLinkSelected,
}
