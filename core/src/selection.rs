use serde::{Deserialize, Serialize};

use crate::Coord2;

/// Which half of the mismatch revert is still outstanding.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RevertPhase {
    /// Both cards are still face up, waiting out the display hold.
    Hold,
    /// Cards are covered again; input stays blocked until the final clear.
    Cover,
}

/// Selection state machine for a single turn.
///
/// `Resolving` is the only suspension in the engine: it is entered when a
/// second pick mismatches and left after two host-scheduled continuations,
/// never by player input.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    /// No card pending, accepting input.
    Idle,
    /// One revealed card awaiting a second pick.
    OnePicked(Coord2),
    /// A mismatched pair is mid-revert; all selections are ignored.
    Resolving {
        first: Coord2,
        second: Coord2,
        phase: RevertPhase,
    },
}

impl Selection {
    /// The revealed-but-unmatched card awaiting its partner, if any.
    pub const fn pending(self) -> Option<Coord2> {
        match self {
            Self::OnePicked(cell) => Some(cell),
            _ => None,
        }
    }

    pub const fn is_resolving(self) -> bool {
        matches!(self, Self::Resolving { .. })
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::Idle
    }
}
