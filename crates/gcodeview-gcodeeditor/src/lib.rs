//! # GCodeView Editor
//!
//! Editing side of GCodeView: the document text, its undo/redo history,
//! find/replace and the session that keeps the derived views in sync.
//!
//! ## Core Components
//!
//! ### Text Management
//! - **TextBuffer**: Rope-based text storage with `'\n'`-only line indexing
//! - Character-indexed replace with line/column mapping
//!
//! ### History
//! - **TextHistory**: Bounded whole-text snapshots (50 by default)
//! - A new edit clears the redo stack
//!
//! ### Find / Replace
//! - **SearchState**: Regex queries with case and whole-word options
//! - Invalid expressions are reported, never panic
//!
//! ### Session
//! - **EditorSession**: Re-parses after every change and publishes
//!   [`AppEvent`](gcodeview_core::AppEvent)s for the surfaces
//!
//! ## Architecture
//!
//! ```text
//! EditorSession (public API)
//!   ├── TextBuffer (rope-based text storage)
//!   ├── TextHistory (snapshot undo/redo)
//!   ├── SearchState (find/replace)
//!   ├── Analysis (interpretation + projection)
//!   ├── TableModel (row view)
//!   └── InteractionResolver (canvas clicks)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gcodeview_gcodeeditor::{EditorSession, SessionConfig};
//!
//! let mut session = EditorSession::with_text(SessionConfig::default(), "G1 X10 Y10");
//! session.on_user_edit("G1 X10 Y10\nG1 X20").unwrap();
//! assert_eq!(session.analysis().interpretation.len(), 2);
//!
//! session.undo().unwrap();
//! assert_eq!(session.text(), "G1 X10 Y10");
//! ```

pub mod error;
pub mod search;
pub mod session;
mod text_buffer;
mod undo_manager;

pub use error::{EditorError, EditorResult, SearchError};
pub use search::{find_matches, replace_all, SearchMatch, SearchOptions, SearchState};
pub use session::{Analysis, EditorSession, LineSelection, SessionConfig, SessionState};
pub use text_buffer::TextBuffer;
pub use undo_manager::TextHistory;
