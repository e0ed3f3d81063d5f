//! Reading (interpretation) shape, display segmentation, and local fallback.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{SelectedCard, SpreadPosition};
use crate::domain::selection::SELECTION_SIZE;

/// Meaning of one card at its spread position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardMeaning {
    pub card_name: String,
    pub position: SpreadPosition,
    pub meaning: String,
}

/// Optional yes/no style verdict for question readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub short_answer: String,
}

/// The complete structured reading returned by the interpretation service
/// (or synthesized locally on failure).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub overall: String,
    pub card_meanings: Vec<CardMeaning>,
    pub advice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judgment: Option<Judgment>,
    pub summary: String,
}

/// What a display segment contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Card(SpreadPosition),
    Overall,
    Advice,
    Judgment,
}

/// One paced unit of reading text for the display queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySegment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Interpretation {
    /// Display segments in their fixed script order: the three card
    /// meanings by position, then overall, advice, and the judgment if the
    /// reading carries one.
    pub fn segments(&self) -> Vec<DisplaySegment> {
        let mut segments = Vec::with_capacity(self.card_meanings.len() + 3);
        for meaning in &self.card_meanings {
            segments.push(DisplaySegment {
                kind: SegmentKind::Card(meaning.position),
                text: format!("{} ({}): {}", meaning.card_name, meaning.position.label(), meaning.meaning),
            });
        }
        segments.push(DisplaySegment {
            kind: SegmentKind::Overall,
            text: self.overall.clone(),
        });
        segments.push(DisplaySegment {
            kind: SegmentKind::Advice,
            text: self.advice.clone(),
        });
        if let Some(judgment) = &self.judgment {
            segments.push(DisplaySegment {
                kind: SegmentKind::Judgment,
                text: judgment.short_answer.clone(),
            });
        }
        segments
    }
}

/// Fixed generic overall text used when the interpretation service fails.
pub const FALLBACK_OVERALL: &str =
    "The cards speak plainly tonight: what you carry into this moment shapes what comes of it.";

/// Fixed generic advice text used when the interpretation service fails.
pub const FALLBACK_ADVICE: &str =
    "Take the smallest honest step suggested by the present card, and let the rest follow.";

/// Fixed generic summary text used when the interpretation service fails.
pub const FALLBACK_SUMMARY: &str = "A three-card reading completed with the reader's own notes.";

/// Synthesize a deterministic local reading from the confirmed cards.
///
/// Used whenever the interpretation service fails: the session must always
/// reach a complete reading, never a visible error. Meanings come from each
/// card's upright text; overall/advice/summary are fixed.
pub fn fallback_reading(cards: &[SelectedCard]) -> Interpretation {
    debug_assert_eq!(cards.len(), SELECTION_SIZE);

    let card_meanings = cards
        .iter()
        .zip(SpreadPosition::ALL)
        .map(|(selected, fallback_position)| CardMeaning {
            card_name: selected.card.name.clone(),
            position: selected.position.unwrap_or(fallback_position),
            meaning: selected.card.upright_meaning.clone(),
        })
        .collect();

    Interpretation {
        overall: FALLBACK_OVERALL.to_string(),
        card_meanings,
        advice: FALLBACK_ADVICE.to_string(),
        judgment: None,
        summary: FALLBACK_SUMMARY.to_string(),
    }
}
