use crate::state::{DashboardFocus, State, ViewState};
use anyhow::Result;
use crossterm::{
    event,
    event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use log::*;
use std::{sync::mpsc, thread, time::Duration};

/// Specify terminal event poll rate in milliseconds.
///
const TICK_RATE_IN_MS: u64 = 60;

/// Specify different terminal event types.
///
#[derive(Debug)]
pub enum Event<I> {
    Input(I),
    Tick,
}

/// Specify struct for managing terminal events channel.
///
pub struct Handler {
    rx: mpsc::Receiver<Event<KeyEvent>>,
    _tx: mpsc::Sender<Event<KeyEvent>>,
}

impl Handler {
    /// Return new instance after spawning new input polling thread. The
    /// thread stops once the terminal can no longer be read or the handler
    /// is gone.
    ///
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();
        thread::spawn(move || loop {
            let tick_rate = Duration::from_millis(TICK_RATE_IN_MS);
            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        if tx_clone.send(Event::Input(key)).is_err() {
                            break;
                        }
                    }
                    Ok(_) => (),
                    Err(e) => {
                        error!("Failed to read terminal event: {}", e);
                        break;
                    }
                },
                Ok(false) => (),
                Err(e) => {
                    error!("Failed to poll terminal events: {}", e);
                    break;
                }
            }
            if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });
        Handler { rx, _tx: tx }
    }

    /// Receive next terminal event and handle it accordingly. Returns result
    /// with value true if should continue or false if exit was requested.
    ///
    pub fn handle_next(&self, state: &mut State) -> Result<bool> {
        match self.rx.recv()? {
            Event::Input(key) => Ok(handle_key(state, key)),
            Event::Tick => {
                state.advance_spinner_index();
                Ok(true)
            }
        }
    }
}

/// Apply a key press to the state. Returns false if exit was requested.
///
pub fn handle_key(state: &mut State, key: KeyEvent) -> bool {
    let KeyEvent {
        code, modifiers, ..
    } = key;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        debug!("Processing exit terminal event '{:?}'...", key);
        return false;
    }
    if code == KeyCode::F(2) {
        state.toggle_log();
        return true;
    }
    if state.current_alert().is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc) {
            state.dismiss_alert();
        }
        return true;
    }

    match state.current_view() {
        ViewState::Login | ViewState::Register => handle_form_key(state, code, modifiers),
        ViewState::Dashboard => match state.dashboard_focus() {
            DashboardFocus::Search => {
                handle_search_key(state, code, modifiers);
                true
            }
            DashboardFocus::News => handle_news_key(state, code),
        },
    }
}

fn is_text(modifiers: KeyModifiers) -> bool {
    modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT
}

fn handle_form_key(state: &mut State, code: KeyCode, modifiers: KeyModifiers) -> bool {
    let view = state.current_view();
    match code {
        KeyCode::Char('r') if modifiers == KeyModifiers::CONTROL && view == ViewState::Login => {
            state.show_register();
        }
        KeyCode::Char('l') if modifiers == KeyModifiers::CONTROL && view == ViewState::Register => {
            state.show_login();
        }
        KeyCode::Esc if view == ViewState::Register => {
            state.show_login();
        }
        KeyCode::Esc => {
            debug!("Received exit request from login view.");
            return false;
        }
        KeyCode::Enter if view == ViewState::Login => {
            state.submit_login();
        }
        KeyCode::Enter => {
            state.submit_register();
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            if let Some(form) = state.active_form_mut() {
                form.toggle_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = state.active_form_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) if is_text(modifiers) => {
            if let Some(form) = state.active_form_mut() {
                form.push_char(c);
            }
        }
        _ => (),
    }
    true
}

fn handle_search_key(state: &mut State, code: KeyCode, modifiers: KeyModifiers) {
    match code {
        KeyCode::Enter => {
            state.submit_search();
        }
        KeyCode::Esc | KeyCode::Tab => {
            state.focus_news();
        }
        KeyCode::Backspace => {
            state.remove_search_char();
        }
        KeyCode::Char(c) if is_text(modifiers) => {
            state.add_search_char(c);
        }
        _ => (),
    }
}

fn handle_news_key(state: &mut State, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => {
            debug!("Received exit request from dashboard.");
            return false;
        }
        KeyCode::Char('/') | KeyCode::Tab => {
            state.focus_search();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.next_news();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.previous_news();
        }
        KeyCode::Enter | KeyCode::Char('o') => open_selected_link(state),
        KeyCode::Char('l') => {
            state.logout();
        }
        _ => (),
    }
    true
}

/// Open the selected entry in the system browser.
///
fn open_selected_link(state: &State) {
    match state.selected_link() {
        Ok(link) => {
            info!("Opening {}...", link.href);
            if let Err(e) = open::that(&link.href) {
                error!("Failed to open {}: {}", link.href, e);
            }
        }
        Err(e) => warn!("{}", e),
    }
}
