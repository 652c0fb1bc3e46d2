//! Non-fatal notices about conflicting options.
//!
//! Rendering never fails because of conflicting command-input options; the
//! losing option is dropped and reported here. Every notice is also emitted
//! through `tracing::warn!` when the owning node renders, so an installed
//! subscriber can capture or silence them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the command input the notice is about.
    pub input: String,
    /// The option that was ignored.
    pub ignored: &'static str,
    /// The option that took precedence.
    pub winner: &'static str,
}

impl Diagnostic {
    #[must_use]
    pub fn ignored(input: impl Into<String>, ignored: &'static str, winner: &'static str) -> Self {
        Self {
            input: input.into(),
            ignored,
            winner,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command input '{}': {} takes precedence over {}, ignoring {}",
            self.input, self.winner, self.ignored, self.ignored
        )
    }
}
