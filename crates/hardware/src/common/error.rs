//! Caller-level error definitions.
//!
//! The decoder, classifier and pipeline have no error channel: unknown words
//! degrade to an invalid record and out-of-window fetches return the
//! terminator. The failures collected here belong to the code that *drives*
//! the pipeline:
//! 1. **Run Loop:** Exhausting the safety cap without seeing the terminator retire.
//! 2. **Window Setup:** Asking to measure a window the program image does not cover.
//! 3. **Configuration:** Reading or parsing a JSON configuration file.

use thiserror::Error;

/// Errors reported by the simulation driver and configuration loader.
#[derive(Debug, Error)]
pub enum SimError {
    /// The run loop stepped `cap` times without the terminator retiring.
    ///
    /// Indicates a generator or test bug: every window is bracketed by an
    /// out-of-window terminator, so a correct run always finishes.
    #[error("pipeline did not retire the terminator within {cap} cycles")]
    CycleCapExceeded {
        /// The iteration cap that was hit.
        cap: u64,
    },

    /// The measurement window is misaligned or extends past the program image.
    #[error("window {start:#05x}..{end:#05x} is not a word-aligned range inside a {len}-byte image")]
    WindowOutOfRange {
        /// First byte address of the window.
        start: u32,
        /// One past the last byte address of the window.
        end: u32,
        /// Length of the program image in bytes.
        len: usize,
    },

    /// The configuration JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
