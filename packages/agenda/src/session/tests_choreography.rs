use crate::errors::AgendaError;
use crate::phase::Phase;
use crate::ports::TurnOrderProvider;
use crate::session::test_support::{make_session, started_session, FakeBoard};

#[test]
fn start_enters_choose_outcome_and_bumps_epoch() {
    let mut session = make_session(4, 0, FakeBoard::default());
    assert_eq!(session.epoch(), 0);
    assert!(!session.is_active());

    session.init(["For", "Against"]).unwrap();
    session.start().unwrap();
    assert_eq!(session.phase(), Phase::ChooseOutcomeType);
    assert_eq!(session.epoch(), 1);
    assert!(session.is_active());
    assert!(session.current_order().is_empty());
}

#[test]
fn clear_returns_to_dormant_and_bumps_epoch() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For", "Against"]);
    assert_eq!(session.epoch(), 1);

    session.clear();
    assert!(!session.is_active());
    assert_eq!(session.phase(), Phase::Idle);
    assert_eq!(session.epoch(), 2);
    assert!(session.outcomes().is_empty());
    assert!(session.seats().is_empty());

    // Idempotent on a dormant session.
    session.clear();
    assert_eq!(session.epoch(), 2);
}

#[test]
fn advancing_past_finish_tears_the_round_down() {
    let mut session = started_session(4, 1, FakeBoard::default(), &["For", "Against"]);
    assert_eq!(session.epoch(), 1);
    session.set_phase(Phase::Finish).unwrap();

    session.advance_phase().unwrap();

    // The wrap back to Idle is a full teardown: no catalog or seat state
    // lingers, and the epoch records the round's end.
    assert_eq!(session.phase(), Phase::Idle);
    assert!(!session.is_active());
    assert!(session.outcomes().is_empty());
    assert!(session.seats().is_empty());
    assert_eq!(session.epoch(), 2);

    // The dormant session is ready for a fresh init/start pair.
    session.init(["For"]).unwrap();
    session.start().unwrap();
    assert_eq!(session.phase(), Phase::ChooseOutcomeType);
    assert_eq!(session.epoch(), 3);
}

#[test]
fn init_posts_a_change_notification() {
    let mut session = make_session(3, 0, FakeBoard::default());
    assert!(!session.take_invalidate());

    session.init(["For"]).unwrap();
    assert!(session.take_invalidate());
}

#[test]
fn init_while_active_is_an_invariant_error() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For"]);
    assert!(matches!(
        session.init(["Against"]),
        Err(AgendaError::Invariant(_))
    ));
}

#[test]
fn entering_when_seeds_resolve_order_on_the_speaker() {
    let mut session = started_session(6, 2, FakeBoard::default(), &["For", "Against"]);
    session.advance_phase().unwrap();

    assert_eq!(session.phase(), Phase::When);
    assert_eq!(session.current_order(), &[2, 3, 4, 5, 0, 1]);
    assert_eq!(session.provider().current_turn(), Some(2));
}

#[test]
fn pass_hands_the_turn_to_the_next_unpassed_seat() {
    let mut session = started_session(4, 1, FakeBoard::default(), &["For"]);
    session.advance_phase().unwrap();
    assert_eq!(session.provider().current_turn(), Some(1));

    assert!(session.pass_for_phase(1, Phase::When).unwrap());
    assert_eq!(session.phase(), Phase::When);
    assert_eq!(session.provider().current_turn(), Some(2));

    assert!(session.pass_for_phase(2, Phase::When).unwrap());
    assert!(session.pass_for_phase(3, Phase::When).unwrap());
    assert_eq!(session.provider().current_turn(), Some(0));

    // Final pass exhausts the order and advances the phase.
    assert!(session.pass_for_phase(0, Phase::When).unwrap());
    assert_eq!(session.phase(), Phase::After);
    assert_eq!(session.provider().current_turn(), Some(1));
}

#[test]
fn early_act_guard_absorbs_stale_input() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For"]);
    session.advance_phase().unwrap();

    // Wrong phase.
    assert!(!session.pass_for_phase(0, Phase::Vote).unwrap());
    // Not this seat's turn.
    assert!(!session.pass_for_phase(2, Phase::When).unwrap());
    // Repeated click after the turn moved on.
    assert!(session.pass_for_phase(0, Phase::When).unwrap());
    assert!(!session.pass_for_phase(0, Phase::When).unwrap());
    assert_eq!(session.provider().current_turn(), Some(1));

    // Out-of-range seat is a programming error, not stale input.
    assert_eq!(
        session.pass_for_phase(9, Phase::When).unwrap_err(),
        AgendaError::SeatOutOfRange(9)
    );
}

#[test]
fn preset_no_reactions_skip_the_whole_phase() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For"]);
    for seat in 0..4 {
        session.set_no_whens(seat, true).unwrap();
    }

    session.advance_phase().unwrap();

    // When was invisible; the turn landed on the first seat eligible in
    // After.
    assert_eq!(session.phase(), Phase::After);
    assert_eq!(session.provider().current_turn(), Some(0));
}

#[test]
fn preset_no_reactions_are_honored_as_carried_passes() {
    let mut session = started_session(4, 1, FakeBoard::default(), &["For"]);
    session.set_no_whens(1, true).unwrap();
    session.set_no_whens(2, true).unwrap();

    session.advance_phase().unwrap();
    assert_eq!(session.phase(), Phase::When);
    // Speaker (1) and seat 2 are pre-passed; the turn starts on seat 3.
    assert_eq!(session.provider().current_turn(), Some(3));

    assert!(session.pass_for_phase(3, Phase::When).unwrap());
    assert_eq!(session.provider().current_turn(), Some(0));
}

#[test]
fn skip_ahead_cascades_through_consecutive_phases() {
    let mut session = started_session(3, 0, FakeBoard::default(), &["For"]);
    for seat in 0..3 {
        session.set_no_whens(seat, true).unwrap();
        session.set_no_afters(seat, true).unwrap();
    }

    session.advance_phase().unwrap();

    // Both reaction windows were invisible; voting opened directly, with the
    // vote order starting after the speaker.
    assert_eq!(session.phase(), Phase::Vote);
    assert_eq!(session.current_order(), &[1, 2, 0]);
    assert_eq!(session.provider().current_turn(), Some(1));
}

#[test]
fn fully_locked_vote_phase_is_skipped_to_finish() {
    let mut session = started_session(3, 0, FakeBoard::default(), &["For"]);
    for seat in 0..3 {
        session.set_no_whens(seat, true).unwrap();
        session.set_no_afters(seat, true).unwrap();
        session.set_vote_locked(seat, true).unwrap();
    }

    session.advance_phase().unwrap();
    assert_eq!(session.phase(), Phase::Finish);
}

#[test]
fn missing_speaker_is_fatal_when_an_order_is_needed() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For"]);
    session.provider_mut().speaker = None;

    assert_eq!(
        session.advance_phase().unwrap_err(),
        AgendaError::SpeakerNotFound
    );
}

#[test]
fn set_phase_recovers_and_post_seeds_no_order() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For"]);

    session.set_phase(Phase::Post).unwrap();
    assert_eq!(session.phase(), Phase::Post);
    assert!(session.current_order().is_empty());

    session.set_phase_by_name("When").unwrap();
    assert_eq!(session.phase(), Phase::When);
    assert_eq!(session.provider().current_turn(), Some(0));

    assert_eq!(
        session.set_phase_by_name("Bribery").unwrap_err(),
        AgendaError::UnknownPhase("Bribery".to_string())
    );
    assert!(matches!(
        session.set_phase(Phase::Idle),
        Err(AgendaError::Invariant(_))
    ));
}

#[test]
fn mutations_batch_into_one_notification() {
    let mut session = started_session(4, 0, FakeBoard::default(), &["For", "Against"]);
    assert!(session.take_invalidate());

    // Five independent mutations inside one tick.
    session.set_no_whens(0, true).unwrap();
    session.set_no_afters(1, true).unwrap();
    session.set_outcome(2, Some(1)).unwrap();
    session.set_votes(2, 3).unwrap();
    session.set_prediction(3, 0, 2).unwrap();

    assert!(session.take_invalidate());
    // Drained: nothing further pending.
    assert!(!session.take_invalidate());
}
