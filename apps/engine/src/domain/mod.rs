//! Domain layer: pure session logic, no I/O.

pub mod cards;
pub mod dealing;
pub mod deck;
pub mod interpretation;
pub mod readiness;
pub mod seed_derivation;
pub mod selection;
pub mod session;

#[cfg(test)]
mod tests_interpretation;
#[cfg(test)]
mod tests_props_dealing;
#[cfg(test)]
mod tests_selection;
#[cfg(test)]
mod tests_session;

// Re-exports for ergonomics
pub use cards::{Card, CardId, Orientation, SelectedCard, SpreadPosition};
pub use dealing::{deal_spread, SPREAD_SIZE};
pub use deck::{full_deck, DECK_SIZE};
pub use interpretation::{fallback_reading, DisplaySegment, Interpretation, SegmentKind};
pub use readiness::{strip_readiness_marker, READINESS_MARKER};
pub use seed_derivation::{
    derive_dealing_seed, derive_next_session_seed, derive_orientation_seed,
};
pub use selection::{SelectionState, ToggleOutcome, SELECTION_SIZE};
pub use session::{validate_transition, Message, Phase, Role, Session};
