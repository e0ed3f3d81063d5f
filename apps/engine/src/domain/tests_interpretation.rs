//! Reading segmentation order and the local fallback guarantee.

use crate::domain::cards::{Orientation, SelectedCard, SpreadPosition};
use crate::domain::dealing::deal_spread;
use crate::domain::deck::full_deck;
use crate::domain::interpretation::{
    fallback_reading, CardMeaning, Interpretation, Judgment, SegmentKind,
};
use crate::domain::selection::SELECTION_SIZE;

fn confirmed_cards() -> Vec<SelectedCard> {
    let spread = deal_spread(full_deck(), 42).unwrap();
    spread
        .into_iter()
        .take(SELECTION_SIZE)
        .zip(SpreadPosition::ALL)
        .map(|(card, position)| SelectedCard {
            card,
            orientation: Orientation::Reversed,
            position: Some(position),
        })
        .collect()
}

fn sample_reading(judgment: Option<Judgment>) -> Interpretation {
    Interpretation {
        overall: "overall".into(),
        card_meanings: vec![
            CardMeaning {
                card_name: "A".into(),
                position: SpreadPosition::Past,
                meaning: "m0".into(),
            },
            CardMeaning {
                card_name: "B".into(),
                position: SpreadPosition::Present,
                meaning: "m1".into(),
            },
            CardMeaning {
                card_name: "C".into(),
                position: SpreadPosition::Future,
                meaning: "m2".into(),
            },
        ],
        advice: "advice".into(),
        judgment,
        summary: "summary".into(),
    }
}

#[test]
fn segments_follow_fixed_script_order() {
    let reading = sample_reading(Some(Judgment {
        short_answer: "yes, with patience".into(),
    }));
    let kinds: Vec<SegmentKind> = reading.segments().iter().map(|s| s.kind).collect();

    assert_eq!(
        kinds,
        vec![
            SegmentKind::Card(SpreadPosition::Past),
            SegmentKind::Card(SpreadPosition::Present),
            SegmentKind::Card(SpreadPosition::Future),
            SegmentKind::Overall,
            SegmentKind::Advice,
            SegmentKind::Judgment,
        ]
    );
}

#[test]
fn judgment_segment_only_when_present() {
    let reading = sample_reading(None);
    let kinds: Vec<SegmentKind> = reading.segments().iter().map(|s| s.kind).collect();
    assert_eq!(kinds.len(), 5);
    assert!(!kinds.contains(&SegmentKind::Judgment));
}

#[test]
fn fallback_reading_is_always_complete() {
    let cards = confirmed_cards();
    let reading = fallback_reading(&cards);

    assert_eq!(reading.card_meanings.len(), 3);
    assert!(!reading.advice.is_empty());
    assert!(!reading.overall.is_empty());
    assert!(!reading.summary.is_empty());
    assert!(reading.judgment.is_none());
}

#[test]
fn fallback_uses_upright_meanings_and_positions() {
    let cards = confirmed_cards();
    let reading = fallback_reading(&cards);

    for (meaning, selected) in reading.card_meanings.iter().zip(&cards) {
        assert_eq!(meaning.card_name, selected.card.name);
        assert_eq!(Some(meaning.position), selected.position);
        // Upright text even though the card was drawn reversed.
        assert_eq!(meaning.meaning, selected.card.upright_meaning);
    }
}

#[test]
fn fallback_is_deterministic() {
    let cards = confirmed_cards();
    assert_eq!(fallback_reading(&cards), fallback_reading(&cards));
}
