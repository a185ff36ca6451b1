//! TUI widgets for the dossier screens

pub mod events;
pub mod input;
pub mod menu;
pub mod message;
pub mod record;
pub mod related;
pub mod results;
pub mod status_bar;

pub use events::EventsWidget;
pub use input::InputWidget;
pub use menu::MenuWidget;
pub use message::MessageWidget;
pub use record::RecordWidget;
pub use related::RelatedWidget;
pub use results::ResultsWidget;
pub use status_bar::{screen_name, HotkeyBarWidget, MenuBarWidget, StatusBarWidget};
