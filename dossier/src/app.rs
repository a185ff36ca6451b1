//! Main application state and logic

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use dossier_core::{QueryStatus, Record, SearchEngine};
use tracing::{debug, info};

use crate::details::RecordDetails;
use crate::ui::theme::DossierTheme;

/// How long a message box stays up before dismissing itself
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(1);

/// Main menu entries, in display order
pub const MENU_ITEMS: [&str; 6] = [
    "Search Records",
    "Modify Record",
    "Delete Record",
    "Access Logs",
    "Administrative Settings",
    "LOG OUT",
];

const MENU_SEARCH: usize = 0;
const MENU_LOG_OUT: usize = 5;

/// Facts about the loaded dataset shown around the screens
#[derive(Debug, Clone, Default)]
pub struct SessionInfo {
    pub stage: i64,
    pub stage_caption: Option<String>,
    pub legacy_cutoff: Option<String>,
}

/// One screen in the navigation stack
#[derive(Debug, Clone)]
pub enum View<'a> {
    Menu {
        selected: usize,
    },
    Search,
    Results {
        selector: String,
        results: Vec<&'a Record>,
        selected: usize,
    },
    Record {
        record: &'a Record,
        scroll: u16,
    },
    Related {
        record: &'a Record,
        selected: usize,
    },
    Events {
        record: &'a Record,
        selected: usize,
    },
}

/// A transient message box
#[derive(Debug, Clone)]
pub struct Message {
    pub title: &'static str,
    pub body: &'static str,
    shown_at: Instant,
}

impl Message {
    pub fn new(title: &'static str, body: &'static str) -> Self {
        Self {
            title,
            body,
            shown_at: Instant::now(),
        }
    }

    pub fn expired(&self) -> bool {
        self.shown_at.elapsed() >= MESSAGE_TIMEOUT
    }
}

pub const ACCESS_DENIED: (&str, &str) = ("ACCESS DENIED", "You do not have access to this function.");
pub const TOO_MANY_RESULTS: (&str, &str) = (
    "TOO MANY RESULTS",
    "Your search selector was insufficiently precise and matched too many results to display. Please refine your search and try again.",
);
pub const NON_RESPONSIVE: (&str, &str) = (
    "NON-RESPONSIVE QUERY",
    "No records were responsive to your search selector",
);
pub const UNAVAILABLE: (&str, &str) = ("UNAVAILABLE", "The referenced record is not available.");

/// Title and body of the box shown for a rejected query, if any
pub fn status_message(status: QueryStatus) -> Option<(&'static str, &'static str)> {
    match status {
        QueryStatus::Ok => None,
        QueryStatus::TooImprecise => Some(TOO_MANY_RESULTS),
        QueryStatus::NoResults => Some(NON_RESPONSIVE),
        // Worded exactly like any other denied function.
        QueryStatus::Denied => Some(ACCESS_DENIED),
    }
}

/// Main application state
pub struct App<'a> {
    engine: &'a SearchEngine,
    pub session: SessionInfo,

    // UI state
    pub theme: DossierTheme,
    views: Vec<View<'a>>,
    message: Option<Message>,

    // Input state
    input_buffer: String,
    cursor_position: usize,
    pub input_history: VecDeque<String>,
    pub history_index: Option<usize>,
    pub saved_input: Option<String>, // Saved current input when browsing history

    // Status
    status_message: Option<String>,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    /// Create a new application at the main menu
    pub fn new(engine: &'a SearchEngine, session: SessionInfo) -> Self {
        Self {
            engine,
            session,
            theme: DossierTheme::default(),
            views: vec![View::Menu { selected: 0 }],
            message: None,
            input_buffer: String::new(),
            cursor_position: 0,
            input_history: VecDeque::with_capacity(100),
            history_index: None,
            saved_input: None,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &'a SearchEngine {
        self.engine
    }

    /// The screen on top of the stack
    pub fn view(&self) -> &View<'a> {
        // The menu is never popped, so the stack is never empty.
        &self.views[self.views.len() - 1]
    }

    fn view_mut(&mut self) -> &mut View<'a> {
        let top = self.views.len() - 1;
        &mut self.views[top]
    }

    fn push_view(&mut self, view: View<'a>) {
        self.status_message = None;
        self.views.push(view);
    }

    /// Return to the previous screen; escaping the menu quits
    pub fn back(&mut self) {
        self.status_message = None;
        if self.views.len() > 1 {
            self.views.pop();
        } else {
            self.should_quit = true;
        }
    }

    // =========================================================================
    // Messages
    // =========================================================================

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    pub fn show_message(&mut self, (title, body): (&'static str, &'static str)) {
        self.message = Some(Message::new(title, body));
    }

    pub fn dismiss_message(&mut self) {
        self.message = None;
    }

    /// Advance timers
    pub fn tick(&mut self) {
        if self.message.as_ref().is_some_and(Message::expired) {
            self.message = None;
        }
    }

    /// Set status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Get status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move the selection or scroll position of the current screen
    pub fn move_selection(&mut self, delta: isize) {
        let cutoff = self.session.legacy_cutoff.clone();
        match self.view_mut() {
            View::Menu { selected } => *selected = step(*selected, delta, MENU_ITEMS.len()),
            View::Results {
                results, selected, ..
            } => *selected = step(*selected, delta, results.len()),
            View::Record { record, scroll } => {
                let max = RecordDetails::new(record, cutoff.as_deref()).line_count();
                let next = (*scroll as isize).saturating_add(delta).clamp(0, max as isize);
                *scroll = u16::try_from(next).unwrap_or(u16::MAX);
            }
            View::Related { record, selected } => {
                *selected = step(*selected, delta, record.related.len())
            }
            View::Events { record, selected } => {
                *selected = step(*selected, delta, record.events.len())
            }
            View::Search => {}
        }
    }

    /// Activate the selected entry of the current screen
    pub fn select(&mut self) {
        match self.view().clone() {
            View::Menu { selected } => self.select_menu(selected),
            View::Search => self.submit_search(),
            View::Results {
                results, selected, ..
            } => {
                if let Some(&record) = results.get(selected) {
                    self.open_record(record);
                }
            }
            View::Related { record, selected } => {
                let engine = self.engine;
                if let Some(relation) = record.related.get(selected) {
                    match engine.follow(relation) {
                        Ok(target) => self.open_record(target),
                        Err(e) => {
                            debug!(%e, "dangling relation");
                            self.show_message(UNAVAILABLE);
                        }
                    }
                }
            }
            View::Record { .. } | View::Events { .. } => {}
        }
    }

    fn select_menu(&mut self, index: usize) {
        match index {
            MENU_SEARCH => {
                self.clear_input();
                self.push_view(View::Search);
            }
            MENU_LOG_OUT => self.should_quit = true,
            _ => self.show_message(ACCESS_DENIED),
        }
    }

    fn open_record(&mut self, record: &'a Record) {
        info!(id = %record.id, "record opened");
        self.push_view(View::Record { record, scroll: 0 });
    }

    /// Open the related-records list of the record on screen
    pub fn open_related(&mut self) {
        if let View::Record { record, .. } = *self.view() {
            if record.related.is_empty() {
                self.set_status("No related records");
            } else {
                self.push_view(View::Related {
                    record,
                    selected: 0,
                });
            }
        }
    }

    /// Open the event log of the record on screen
    pub fn open_events(&mut self) {
        if let View::Record { record, .. } = *self.view() {
            if record.events.is_empty() {
                self.set_status("No logged events");
            } else {
                self.push_view(View::Events {
                    record,
                    selected: 0,
                });
            }
        }
    }

    /// Run the search prompt's selector
    pub fn submit_search(&mut self) {
        let Some(selector) = self.submit_input() else {
            return;
        };

        let outcome = self.engine.query(&selector);
        info!(
            selector = %selector,
            status = ?outcome.status,
            matched = outcome.matched,
            "search"
        );

        match status_message(outcome.status) {
            Some(message) => {
                // Keep the selector so the operator can refine it.
                self.set_input(selector);
                self.show_message(message);
            }
            None => self.push_view(View::Results {
                selector,
                results: outcome.results,
                selected: 0,
            }),
        }
    }

    // =========================================================================
    // Input editing
    // =========================================================================

    /// Get the input buffer contents
    pub fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    /// Get cursor position
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Set input buffer contents
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input_buffer = text.into();
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Clear input buffer
    pub fn clear_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }

    /// Take the current input, recording it in history. Empty input is ignored.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.input_buffer.is_empty() {
            return None;
        }

        let input = std::mem::take(&mut self.input_buffer);
        self.cursor_position = 0;

        if self.input_history.front() != Some(&input) {
            self.input_history.push_front(input.clone());
            if self.input_history.len() > 100 {
                self.input_history.pop_back();
            }
        }
        self.history_index = None;
        self.saved_input = None;

        Some(input)
    }

    /// Handle a typed character (unicode-safe)
    pub fn type_char(&mut self, c: char) {
        // Convert cursor position (character index) to byte index
        let byte_pos = self
            .input_buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.input_buffer.len());
        self.input_buffer.insert(byte_pos, c);
        self.cursor_position += 1;
    }

    /// Handle backspace (unicode-safe)
    pub fn backspace(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position)
            {
                self.input_buffer
                    .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
            }
        }
    }

    /// Handle delete (unicode-safe)
    pub fn delete(&mut self) {
        if let Some((byte_pos, ch)) = self.input_buffer.char_indices().nth(self.cursor_position) {
            self.input_buffer
                .replace_range(byte_pos..byte_pos + ch.len_utf8(), "");
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        let char_count = self.input_buffer.chars().count();
        self.cursor_position = (self.cursor_position + 1).min(char_count);
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    /// Move cursor to end (unicode-safe)
    pub fn cursor_end(&mut self) {
        self.cursor_position = self.input_buffer.chars().count();
    }

    /// Navigate to previous input in history
    pub fn history_prev(&mut self) {
        if self.input_history.is_empty() {
            return;
        }

        // Save current input if we're just starting to browse history
        if self.history_index.is_none() && !self.input_buffer.is_empty() {
            self.saved_input = Some(self.input_buffer.clone());
        }

        let new_index = match self.history_index {
            None => 0,
            Some(i) if i + 1 < self.input_history.len() => i + 1,
            Some(i) => i, // Already at oldest
        };

        if let Some(entry) = self.input_history.get(new_index) {
            self.input_buffer = entry.clone();
            self.cursor_position = self.input_buffer.chars().count();
            self.history_index = Some(new_index);
        }
    }

    /// Navigate to next input in history
    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(0) => {
                // Return to saved input or empty
                self.input_buffer = self.saved_input.take().unwrap_or_default();
                self.cursor_position = self.input_buffer.chars().count();
                self.history_index = None;
            }
            Some(i) => {
                if let Some(entry) = self.input_history.get(i - 1) {
                    self.input_buffer = entry.clone();
                    self.cursor_position = self.input_buffer.chars().count();
                    self.history_index = Some(i - 1);
                }
            }
        }
    }
}

/// Move `current` by `delta` within `0..len`, clamping at both ends
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    current.saturating_add_signed(delta).min(len - 1)
}
