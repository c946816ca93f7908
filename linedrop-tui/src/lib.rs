pub mod app;
pub mod keys;
pub mod mode;
pub mod paste;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use keys::{key_code, KeySpec};
pub use mode::{AppMode, Pane};
pub use paste::PasteBox;
