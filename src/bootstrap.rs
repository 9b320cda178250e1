//! Initial view selection at startup.

use crate::state::State;
use log::*;

/// Username shown for a session restored from disk, whose owner is unknown.
pub const RESTORED_USERNAME: &str = "User";

/// Enter the dashboard when a session token is already stored, which starts
/// both data fetches. Otherwise stay on the login form.
///
pub fn bootstrap(state: &mut State) {
    if state.is_logged_in() {
        info!("Restoring stored session...");
        state.show_dashboard(RESTORED_USERNAME);
    } else {
        info!("No stored session; showing login.");
        state.show_login();
    }
}
