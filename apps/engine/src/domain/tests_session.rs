//! Phase edge validation and session latches.

use crate::domain::session::{validate_transition, Phase, Session};

const ALL_PHASES: [Phase; 5] = [
    Phase::Monologue,
    Phase::Conversation,
    Phase::Selection,
    Phase::Reveal,
    Phase::Interpretation,
];

#[test]
fn forward_edges_are_allowed() {
    assert!(validate_transition(Phase::Monologue, Phase::Conversation).is_ok());
    assert!(validate_transition(Phase::Conversation, Phase::Selection).is_ok());
    assert!(validate_transition(Phase::Selection, Phase::Reveal).is_ok());
    assert!(validate_transition(Phase::Reveal, Phase::Interpretation).is_ok());
}

#[test]
fn reset_to_monologue_is_allowed_from_anywhere() {
    for from in ALL_PHASES {
        assert!(validate_transition(from, Phase::Monologue).is_ok());
    }
}

#[test]
fn skipping_and_backward_edges_are_rejected() {
    assert!(validate_transition(Phase::Monologue, Phase::Selection).is_err());
    assert!(validate_transition(Phase::Monologue, Phase::Interpretation).is_err());
    assert!(validate_transition(Phase::Conversation, Phase::Reveal).is_err());
    assert!(validate_transition(Phase::Selection, Phase::Interpretation).is_err());
    assert!(validate_transition(Phase::Reveal, Phase::Conversation).is_err());
    assert!(validate_transition(Phase::Interpretation, Phase::Selection).is_err());
}

#[test]
fn no_phase_transitions_to_itself_except_reset() {
    for phase in ALL_PHASES {
        let result = validate_transition(phase, phase);
        if phase == Phase::Monologue {
            assert!(result.is_ok());
        } else {
            assert!(result.is_err());
        }
    }
}

#[test]
fn reveal_latch_fires_once() {
    let mut session = Session::new(1);
    assert!(session.try_latch_reveal());
    assert!(!session.try_latch_reveal());
    assert!(!session.try_latch_reveal());
}

#[test]
fn reading_latch_fires_once() {
    let mut session = Session::new(1);
    assert!(!session.reading_requested());
    assert!(session.try_latch_reading());
    assert!(session.reading_requested());
    assert!(!session.try_latch_reading());
}

#[test]
fn reset_rearms_latches_and_clears_fields() {
    let mut session = Session::new(1);
    session.turn_count = 5;
    session.summary = "some summary".into();
    session.ready_for_selection = true;
    session.try_latch_reveal();
    session.try_latch_reading();

    session.reset(2);

    assert_eq!(session.phase, Phase::Monologue);
    assert_eq!(session.turn_count, 0);
    assert!(session.summary.is_empty());
    assert!(!session.ready_for_selection);
    assert!(session.history.is_empty());
    assert!(session.revealed.is_empty());
    assert!(session.reading.is_none());
    assert_eq!(session.seed, 2);
    assert!(session.try_latch_reveal());
    assert!(session.try_latch_reading());
}
