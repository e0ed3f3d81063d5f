//! Selection invariants: toggle semantics, the 3-card cap, orientation
//! redraw on re-add, and position assignment on confirm.

use crate::domain::cards::{Orientation, SpreadPosition};
use crate::domain::dealing::deal_spread;
use crate::domain::deck::full_deck;
use crate::domain::selection::{SelectionState, ToggleOutcome, SELECTION_SIZE};

fn spread_selection(orientation_seed: u64) -> SelectionState {
    let spread = deal_spread(full_deck(), 42).expect("full deck covers the spread");
    SelectionState::new(spread, orientation_seed)
}

#[test]
fn toggle_adds_then_removes() {
    let mut selection = spread_selection(1);
    let id = selection.available()[0].id;

    assert!(matches!(
        selection.toggle(id).unwrap(),
        ToggleOutcome::Added { .. }
    ));
    assert_eq!(selection.selected().len(), 1);

    assert_eq!(selection.toggle(id).unwrap(), ToggleOutcome::Removed);
    assert!(selection.selected().is_empty());
}

#[test]
fn fourth_card_is_rejected_without_mutation() {
    let mut selection = spread_selection(1);
    let ids: Vec<u8> = selection.available().iter().map(|c| c.id).collect();

    for id in &ids[..SELECTION_SIZE] {
        assert!(matches!(
            selection.toggle(*id).unwrap(),
            ToggleOutcome::Added { .. }
        ));
    }
    assert!(selection.is_full());

    assert_eq!(selection.toggle(ids[3]).unwrap(), ToggleOutcome::Rejected);
    assert_eq!(selection.selected().len(), SELECTION_SIZE);

    // Deselecting while full still works.
    assert_eq!(selection.toggle(ids[0]).unwrap(), ToggleOutcome::Removed);
    assert_eq!(selection.selected().len(), SELECTION_SIZE - 1);
}

#[test]
fn unknown_card_id_is_an_error() {
    let mut selection = spread_selection(1);
    let missing = (0u8..=77)
        .find(|id| selection.available().iter().all(|c| c.id != *id))
        .expect("spread holds 9 of 78 cards");
    assert!(selection.toggle(missing).is_err());
}

#[test]
fn orientation_is_redrawn_on_every_re_add() {
    // Re-selecting a card draws a fresh coin flip rather than remembering
    // the first one. Toggle the same card on and off repeatedly; over
    // enough redraws both orientations must appear.
    let mut selection = spread_selection(7);
    let id = selection.available()[0].id;

    let mut seen_upright = false;
    let mut seen_reversed = false;
    for _ in 0..64 {
        match selection.toggle(id).unwrap() {
            ToggleOutcome::Added { orientation } => match orientation {
                Orientation::Upright => seen_upright = true,
                Orientation::Reversed => seen_reversed = true,
            },
            other => panic!("expected Added, got {other:?}"),
        }
        assert_eq!(selection.toggle(id).unwrap(), ToggleOutcome::Removed);
    }

    assert!(seen_upright && seen_reversed);
}

#[test]
fn orientation_stream_is_seed_deterministic() {
    let draws = |seed: u64| -> Vec<Orientation> {
        let mut selection = spread_selection(seed);
        let id = selection.available()[0].id;
        (0..16)
            .map(|_| {
                let ToggleOutcome::Added { orientation } = selection.toggle(id).unwrap() else {
                    panic!("expected Added");
                };
                selection.toggle(id).unwrap();
                orientation
            })
            .collect()
    };

    assert_eq!(draws(99), draws(99));
    assert_ne!(draws(99), draws(100));
}

#[test]
fn confirm_requires_exactly_three() {
    let mut selection = spread_selection(1);
    assert!(selection.confirm().is_err());

    let ids: Vec<u8> = selection.available().iter().map(|c| c.id).collect();
    selection.toggle(ids[0]).unwrap();
    selection.toggle(ids[1]).unwrap();
    assert!(selection.confirm().is_err());

    selection.toggle(ids[2]).unwrap();
    let confirmed = selection.confirm().unwrap();

    assert_eq!(confirmed.len(), SELECTION_SIZE);
    assert_eq!(confirmed[0].position, Some(SpreadPosition::Past));
    assert_eq!(confirmed[1].position, Some(SpreadPosition::Present));
    assert_eq!(confirmed[2].position, Some(SpreadPosition::Future));
    // Positions follow selection order.
    assert_eq!(confirmed[0].card.id, ids[0]);
    assert_eq!(confirmed[1].card.id, ids[1]);
    assert_eq!(confirmed[2].card.id, ids[2]);
}
