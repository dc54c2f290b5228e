//! Low-level tokenizer for the tsc template language.
//!
//! The crate turns a source string into a lossless stream of
//! [`RawToken`]s: `(Tag, len)` pairs whose lengths always sum to the source
//! length. Scanning is driven by a stack of lexical [`Mode`]s and a
//! declarative [`ModeTable`]; the [`ModalScanner`] owns the stack and tries
//! each rule of the active mode in order, anchored at the cursor.
//!
//! Nothing here allocates per token, logs, or fails. Unrecognized input is
//! reported as [`Tag::Unclassified`] tokens, one UTF-8 scalar at a time.
//!
//! # Layers
//!
//! - [`SourceBuffer`]: sentinel-terminated copy of the source.
//! - [`Cursor`]: `Copy` byte cursor with memchr-accelerated skips.
//! - [`ModeTable`]: per-dialect rule lists, built once and shared.
//! - [`ModalScanner`]: the mode-stack scanner itself.

mod cursor;
mod mode;
mod scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use mode::{Action, Dialect, Mode, ModeTable, Pattern, Rule, ScanConfig};
pub use scanner::{tokenize, Frame, ModalScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawToken, Tag};
