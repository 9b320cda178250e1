//! Navigation-related state types.
//!
//! `ViewState` is the mutually exclusive mode of the client. Its transition
//! function is pure; `State` applies the visible side effects afterwards.

/// Specifying the different views. Exactly one is active at a time.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViewState {
    Login,
    Register,
    Dashboard,
}

/// Specifying the events that move between views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViewEvent {
    ShowLogin,
    ShowRegister,
    ShowDashboard,
    Logout,
}

impl ViewState {
    /// Return the view that follows this one after the event. Logging out
    /// only has an effect from the dashboard.
    ///
    pub fn transition(self, event: ViewEvent) -> ViewState {
        match (self, event) {
            (_, ViewEvent::ShowLogin) => ViewState::Login,
            (_, ViewEvent::ShowRegister) => ViewState::Register,
            (_, ViewEvent::ShowDashboard) => ViewState::Dashboard,
            (ViewState::Dashboard, ViewEvent::Logout) => ViewState::Login,
            (view, ViewEvent::Logout) => view,
        }
    }
}

/// Specifying which dashboard widget receives key input.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DashboardFocus {
    News,
    Search,
}
