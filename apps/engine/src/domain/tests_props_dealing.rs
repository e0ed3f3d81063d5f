//! Property-based tests for dealing and selection invariants.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::domain::dealing::{deal_spread, SPREAD_SIZE};
use crate::domain::deck::full_deck;
use crate::domain::selection::{SelectionState, SELECTION_SIZE};
use crate::domain::test_prelude;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: for any seed, the spread is 9 unique ids drawn without
    /// replacement from the 78-card source.
    #[test]
    fn prop_spread_is_nine_unique_cards(seed in any::<u64>()) {
        let spread = deal_spread(full_deck(), seed).unwrap();
        prop_assert_eq!(spread.len(), SPREAD_SIZE);

        let ids: HashSet<u8> = spread.iter().map(|c| c.id).collect();
        prop_assert_eq!(ids.len(), SPREAD_SIZE);
        prop_assert!(ids.iter().all(|id| (*id as usize) < full_deck().len()));
    }

    /// Property: under any toggle script, the selection never exceeds 3
    /// cards, never holds duplicates, and only holds dealt cards.
    #[test]
    fn prop_selection_never_exceeds_three(
        deal_seed in any::<u64>(),
        orientation_seed in any::<u64>(),
        script in proptest::collection::vec(0usize..SPREAD_SIZE, 0..40),
    ) {
        let spread = deal_spread(full_deck(), deal_seed).unwrap();
        let dealt: HashSet<u8> = spread.iter().map(|c| c.id).collect();
        let mut selection = SelectionState::new(spread, orientation_seed);

        for index in script {
            let id = selection.available()[index].id;
            selection.toggle(id).unwrap();

            prop_assert!(selection.selected().len() <= SELECTION_SIZE);

            let selected_ids: HashSet<u8> =
                selection.selected().iter().map(|s| s.card.id).collect();
            prop_assert_eq!(selected_ids.len(), selection.selected().len());
            prop_assert!(selected_ids.is_subset(&dealt));
        }
    }

    /// Property: confirm is a no-op error unless the selection holds
    /// exactly 3 cards.
    #[test]
    fn prop_confirm_only_at_three(
        picks in proptest::collection::hash_set(0usize..SPREAD_SIZE, 0..=SPREAD_SIZE),
    ) {
        let spread = deal_spread(full_deck(), 11).unwrap();
        let mut selection = SelectionState::new(spread, 12);

        let mut added = 0usize;
        for index in picks {
            let id = selection.available()[index].id;
            let outcome = selection.toggle(id).unwrap();
            if matches!(outcome, crate::domain::selection::ToggleOutcome::Added { .. }) {
                added += 1;
            }
        }
        let added = added.min(SELECTION_SIZE);
        prop_assert_eq!(selection.selected().len(), added);

        let result = selection.confirm();
        if added == SELECTION_SIZE {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
