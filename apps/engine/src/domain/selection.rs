//! Card selection over the dealt spread.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::domain::cards::{Card, CardId, Orientation, SelectedCard, SpreadPosition};
use crate::errors::domain::{DomainError, ValidationKind};

/// Maximum (and required) size of the selection set.
pub const SELECTION_SIZE: usize = 3;

/// Result of toggling a card in or out of the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Card added with a freshly drawn orientation.
    Added { orientation: Orientation },
    /// Card removed from the selection.
    Removed,
    /// Selection already full; nothing changed.
    Rejected,
}

/// The dealt spread plus the 0..=3 selection set.
///
/// Orientation is drawn with an independent 50/50 flip every time a card is
/// added, including re-adds after a removal. A removed card's earlier draw
/// is never remembered.
#[derive(Debug, Clone)]
pub struct SelectionState {
    available: Vec<Card>,
    selected: Vec<SelectedCard>,
    rng: ChaCha8Rng,
}

impl SelectionState {
    pub fn new(available: Vec<Card>, orientation_seed: u64) -> Self {
        Self {
            available,
            selected: Vec::with_capacity(SELECTION_SIZE),
            rng: ChaCha8Rng::seed_from_u64(orientation_seed),
        }
    }

    /// An empty placeholder used before the spread is dealt.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }

    pub fn available(&self) -> &[Card] {
        &self.available
    }

    pub fn selected(&self) -> &[SelectedCard] {
        &self.selected
    }

    pub fn is_full(&self) -> bool {
        self.selected.len() == SELECTION_SIZE
    }

    /// Toggle `card_id` in or out of the selection.
    ///
    /// Errors only when the id is not part of the dealt spread; a full
    /// selection is reported as [`ToggleOutcome::Rejected`] without mutation
    /// so the caller can emit a rejection effect.
    pub fn toggle(&mut self, card_id: CardId) -> Result<ToggleOutcome, DomainError> {
        let card = self
            .available
            .iter()
            .find(|c| c.id == card_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::CardNotInSpread,
                    format!("Card {card_id} is not in the dealt spread"),
                )
            })?;

        if let Some(pos) = self.selected.iter().position(|s| s.card.id == card_id) {
            self.selected.remove(pos);
            return Ok(ToggleOutcome::Removed);
        }

        if self.is_full() {
            return Ok(ToggleOutcome::Rejected);
        }

        let orientation = if self.rng.random_bool(0.5) {
            Orientation::Reversed
        } else {
            Orientation::Upright
        };
        self.selected.push(SelectedCard {
            card,
            orientation,
            position: None,
        });
        Ok(ToggleOutcome::Added { orientation })
    }

    /// Fix spread positions and return the confirmed selection.
    ///
    /// Valid only at exactly [`SELECTION_SIZE`] cards; positions are
    /// assigned past/present/future in selection order.
    pub fn confirm(&mut self) -> Result<[SelectedCard; SELECTION_SIZE], DomainError> {
        if self.selected.len() != SELECTION_SIZE {
            return Err(DomainError::validation(
                ValidationKind::SelectionIncomplete,
                format!(
                    "Selection holds {} cards, confirmation needs {SELECTION_SIZE}",
                    self.selected.len()
                ),
            ));
        }

        for (selected, position) in self.selected.iter_mut().zip(SpreadPosition::ALL) {
            selected.position = Some(position);
        }

        let confirmed: [SelectedCard; SELECTION_SIZE] = self
            .selected
            .clone()
            .try_into()
            .map_err(|_| DomainError::validation_other("selection size checked above"))?;
        Ok(confirmed)
    }
}
