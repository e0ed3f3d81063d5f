//! Deterministic spread dealing.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::Card;
use crate::errors::domain::{DomainError, ValidationKind};

/// Number of cards dealt face-down for the user to pick from.
pub const SPREAD_SIZE: usize = 9;

/// Deal the selectable spread from `source`.
///
/// Shuffles a copy of `source` (the source deck is never mutated) with a
/// Fisher-Yates shuffle driven by a seeded ChaCha generator, then takes the
/// first [`SPREAD_SIZE`] cards. Every dealt card id is therefore unique,
/// drawn without replacement.
pub fn deal_spread(source: &[Card], seed: u64) -> Result<Vec<Card>, DomainError> {
    if source.len() < SPREAD_SIZE {
        return Err(DomainError::validation(
            ValidationKind::DeckTooSmall,
            format!(
                "Source deck has {} cards, spread needs {SPREAD_SIZE}",
                source.len()
            ),
        ));
    }

    let mut deck: Vec<Card> = source.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
    deck.truncate(SPREAD_SIZE);
    Ok(deck)
}
