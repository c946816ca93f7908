pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod dispatcher;
pub mod error;
pub mod slots;
pub mod text;

pub use config::LinedropConfig;
pub use cursor::{CursorKind, CursorProvider, HostCapabilities, LegacySelection, NoSelection, SelectionRange};
pub use dispatch::{dispatch, dispatch_at_cursor, dispatch_first_line, Dispatch, Variant};
pub use dispatcher::{DispatchSettings, DrainReport, DrainStop, KeyOutcome, LineDispatcher, ENTER_KEY_CODE};
pub use error::{LinedropError, Result};
pub use slots::{ColumnSpec, SlotTable};
