use serde::{Deserialize, Serialize};

/// Per-card lifecycle tag stored by the session.
///
/// `Hidden -> Revealed -> Matched` is the forward path; a mismatch revert
/// takes `Revealed` back to `Hidden`. `Matched` is terminal.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CardState {
    Hidden,
    Revealed,
    Matched,
}

impl CardState {
    /// Matched cards are permanently non-interactive.
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Hidden | Self::Revealed)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardState {
    fn default() -> Self {
        Self::Hidden
    }
}
