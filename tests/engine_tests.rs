//! Engine integration tests.
//!
//! Whole turns driven through the public command surface: wins, god
//! powers, stalemate, hints, placement and the terminal state.

use santorini_rules::advisor::Suggestion;
use santorini_rules::board::Level;
use santorini_rules::cards::{CardDeal, GodCard};
use santorini_rules::core::{Placement, PlayerId, Position, Rejection, SessionConfig, BOARD_SIZE};
use santorini_rules::pieces::{CYAN, MAGENTA};
use santorini_rules::rules::{Action, Engine, EngineEvent, Phase, SecondAction, WinReason};

type Levels = [[Level; BOARD_SIZE]; BOARD_SIZE];

fn p(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

fn flat() -> Levels {
    [[Level::Ground; BOARD_SIZE]; BOARD_SIZE]
}

/// First seat's workers, then the second seat's.
fn engine_with(
    levels: Levels,
    spots: [(i32, i32); 4],
    first: GodCard,
    second: GodCard,
) -> Engine {
    let config = SessionConfig::default()
        .without_clock()
        .with_seed(7)
        .with_placement(Placement::Fixed(spots.map(Position::from)));
    let mut engine = Engine::builder()
        .config(config)
        .cards(CardDeal::Fixed(first, second))
        .levels(levels)
        .build();
    engine.start().unwrap();
    engine
}

/// Corners and edges, clear of each other.
const HOME: [(i32, i32); 4] = [(0, 0), (4, 0), (4, 4), (4, 3)];

fn plain() -> Engine {
    engine_with(flat(), HOME, GodCard::None, GodCard::None)
}

fn game_overs(events: &[EngineEvent]) -> usize {
    events.iter().filter(|e| matches!(e, EngineEvent::GameOver(_))).count()
}

// =============================================================================
// Winning and Building
// =============================================================================

/// Stepping from level 2 onto level 3 wins on the spot.
#[test]
fn test_height_win() {
    let mut levels = flat();
    levels[2][2] = Level::Level2;
    levels[2][3] = Level::Level3;
    let spots = [(2, 2), (0, 0), (4, 4), (4, 0)];
    let mut engine = engine_with(levels, spots, GodCard::None, GodCard::None);

    assert_eq!(engine.click(p(2, 2)), Ok(Phase::Move));
    assert_eq!(engine.click(p(2, 3)), Ok(Phase::GameOver));

    let outcome = engine.outcome().unwrap();
    assert_eq!(outcome.winner, PlayerId::FIRST);
    assert_eq!(outcome.reason, WinReason::Height);
    assert_eq!(engine.winner().map(|w| w.name()), Some("Player 1"));
    assert!(engine.last_move().unwrap().is_winning());
    assert_eq!(game_overs(&engine.take_events()), 1);
}

/// After a win every command is refused and nothing moves.
#[test]
fn test_game_over_refuses_everything() {
    let mut levels = flat();
    levels[2][2] = Level::Level2;
    levels[2][3] = Level::Level3;
    let spots = [(2, 2), (0, 0), (4, 4), (4, 0)];
    let mut engine = engine_with(levels, spots, GodCard::Zeus, GodCard::None);
    engine.click(p(2, 2)).unwrap();
    engine.click(p(2, 3)).unwrap();
    let before = engine.board().clone();

    assert_eq!(engine.click(p(0, 0)), Err(Rejection::GameOver));
    assert_eq!(engine.skip(), Err(Rejection::GameOver));
    assert_eq!(engine.activate_power(PlayerId::FIRST), Err(Rejection::GameOver));
    assert_eq!(engine.request_hint(), Err(Rejection::GameOver));
    assert_eq!(engine.board(), &before);
    assert_eq!(engine.phase(), Phase::GameOver);
    assert_eq!(engine.hints_remaining(PlayerId::FIRST), 3);
}

/// Building on level 3 through the engine places a dome.
#[test]
fn test_build_dome_through_engine() {
    let mut levels = flat();
    levels[1][1] = Level::Level3;
    let mut engine = plain_with_levels(levels);

    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 0)).unwrap();
    assert_eq!(engine.click(p(1, 1)), Ok(Phase::Select));
    assert_eq!(engine.board().tile(p(1, 1)).unwrap().level(), Level::Dome);
    assert!(matches!(
        engine.take_events().iter().find(|e| matches!(e, EngineEvent::Built { .. })),
        Some(EngineEvent::Built { level: Level::Dome, .. })
    ));
}

fn plain_with_levels(levels: Levels) -> Engine {
    engine_with(levels, HOME, GodCard::None, GodCard::None)
}

/// Moving somewhere illegal is refused with the phase unchanged.
#[test]
fn test_illegal_move_and_build_rejected() {
    let mut engine = plain();
    engine.click(p(0, 0)).unwrap();

    assert_eq!(engine.click(p(3, 3)), Err(Rejection::IllegalMove(p(3, 3))));
    assert_eq!(engine.phase(), Phase::Move);

    engine.click(p(1, 1)).unwrap();
    assert_eq!(engine.click(p(1, 1)), Err(Rejection::IllegalBuild(p(1, 1))));
    assert_eq!(engine.click(p(3, 3)), Err(Rejection::IllegalBuild(p(3, 3))));
    assert_eq!(engine.phase(), Phase::Build);
    assert!(engine.board().iter().all(|(_, t)| t.level() == Level::Ground));
}

/// A completed turn is recorded and passes control to the other seat.
#[test]
fn test_history_and_turn_order() {
    let mut engine = plain();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();
    engine.click(p(2, 2)).unwrap();

    assert_eq!(engine.current_player_id(), PlayerId::SECOND);
    assert_eq!(engine.turn_count(), 2);

    let history: Vec<_> = engine.history().iter().cloned().collect();
    assert_eq!(history.len(), 2);
    assert!(matches!(history[0].action, Action::Move(_)));
    assert!(matches!(history[1].action, Action::Build(_)));
    assert!(history.iter().all(|r| r.player == PlayerId::FIRST && r.turn == 1));
    assert_eq!(history[1].sequence, 1);

    let worker = engine.player(PlayerId::FIRST).worker(0).unwrap();
    assert_eq!(worker.position(), Some(p(1, 1)));
    assert_eq!(worker.previous_position(), Some(p(0, 0)));
}

/// Selecting the opponent's worker or an empty square is refused.
#[test]
fn test_select_rejections() {
    let mut engine = plain();
    assert_eq!(
        engine.click(p(4, 4)),
        Err(Rejection::OpponentWorker("Player 2".into()))
    );
    assert_eq!(engine.click(p(2, 2)), Err(Rejection::NoWorkerThere));

    let rejected = engine
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::Rejected { .. }))
        .count();
    assert_eq!(rejected, 2);
}

/// A boxed-in worker cannot be selected but its partner can.
#[test]
fn test_stuck_worker_not_selectable() {
    let mut levels = flat();
    levels[0][1] = Level::Dome;
    levels[1][0] = Level::Dome;
    levels[1][1] = Level::Dome;
    let mut engine = plain_with_levels(levels);

    assert_eq!(engine.click(p(0, 0)), Err(Rejection::WorkerStuck("P1".into())));
    assert_eq!(engine.legal_targets(), vec![p(4, 0)]);
    assert_eq!(engine.click(p(4, 0)), Ok(Phase::Move));
}

// =============================================================================
// God Powers
// =============================================================================

/// Demeter: a second build anywhere but the first square; skip ends the turn.
#[test]
fn test_demeter_second_build_and_skip() {
    let mut engine = engine_with(flat(), HOME, GodCard::Demeter, GodCard::None);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();

    assert_eq!(engine.click(p(0, 0)), Ok(Phase::SecondBuild));
    assert_eq!(engine.second_action(), Some(SecondAction::Build { first: p(0, 0) }));

    let targets = engine.legal_targets();
    assert_eq!(targets.len(), 7);
    assert!(!targets.contains(&p(0, 0)));

    assert_eq!(engine.click(p(0, 0)), Err(Rejection::IllegalBuild(p(0, 0))));
    assert_eq!(engine.board().tile(p(0, 0)).unwrap().level(), Level::Level1);

    assert_eq!(engine.skip(), Ok(Phase::Select));
    assert_eq!(engine.current_player_id(), PlayerId::SECOND);
    assert_eq!(engine.board().tile(p(0, 0)).unwrap().level(), Level::Level1);
    assert!(!engine.god_power_active());
}

/// Demeter: taking the second build also ends the turn.
#[test]
fn test_demeter_second_build_taken() {
    let mut engine = engine_with(flat(), HOME, GodCard::Demeter, GodCard::None);
    engine.click(p(0, 0)).unwrap();
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(1, 1)).unwrap();
    engine.click(p(0, 0)).unwrap();

    assert_eq!(engine.click(p(2, 2)), Ok(Phase::Select));
    assert_eq!(engine.board().tile(p(2, 2)).unwrap().level(), Level::Level1);
    assert_eq!(engine.current_player_id(), PlayerId::SECOND);
}

/// Without activation Demeter builds once like anyone else.
#[test]
fn test_demeter_inactive_builds_once() {
    let mut engine = engine_with(flat(), HOME, GodCard::Demeter, GodCard::None);
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();
    assert_eq!(engine.click(p(0, 0)), Ok(Phase::Select));
}

/// Artemis: a second move, never back to the starting square.
#[test]
fn test_artemis_second_move() {
    let mut engine = engine_with(flat(), HOME, GodCard::Artemis, GodCard::None);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();

    assert_eq!(engine.click(p(1, 1)), Ok(Phase::SecondMove));
    assert!(!engine.legal_targets().contains(&p(0, 0)));
    assert_eq!(engine.click(p(0, 0)), Err(Rejection::IllegalMove(p(0, 0))));

    assert_eq!(engine.click(p(2, 2)), Ok(Phase::Build));
    assert_eq!(engine.selected_worker().and_then(|w| w.position()), Some(p(2, 2)));
    assert_eq!(engine.click(p(3, 3)), Ok(Phase::Select));
}

/// Artemis: skipping the second move goes straight to building.
#[test]
fn test_artemis_skip() {
    let mut engine = engine_with(flat(), HOME, GodCard::Artemis, GodCard::None);
    engine.click(p(0, 0)).unwrap();
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(1, 1)).unwrap();

    assert_eq!(engine.skip(), Ok(Phase::Build));
    assert_eq!(engine.second_action(), None);
    assert_eq!(engine.skip(), Err(Rejection::NothingToSkip));
}

/// Artemis: the second move can also win.
#[test]
fn test_artemis_second_move_wins() {
    let mut levels = flat();
    levels[0][0] = Level::Level2;
    levels[1][1] = Level::Level2;
    levels[2][2] = Level::Level3;
    let mut engine = engine_with(levels, HOME, GodCard::Artemis, GodCard::None);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();

    assert_eq!(engine.click(p(2, 2)), Ok(Phase::GameOver));
    assert_eq!(engine.outcome().map(|o| o.reason), Some(WinReason::Height));
}

/// Zeus: building under oneself, worker stays put.
#[test]
fn test_zeus_builds_beneath() {
    let spots = [(2, 2), (4, 0), (4, 4), (4, 3)];
    let mut engine = engine_with(flat(), spots, GodCard::Zeus, GodCard::None);
    engine.click(p(2, 2)).unwrap();
    engine.click(p(2, 3)).unwrap();

    assert_eq!(engine.click(p(2, 3)), Err(Rejection::IllegalBuild(p(2, 3))));
    engine.activate_power(PlayerId::FIRST).unwrap();
    assert!(engine.legal_targets().contains(&p(2, 3)));

    assert_eq!(engine.click(p(2, 3)), Ok(Phase::Select));
    let tile = engine.board().tile(p(2, 3)).unwrap();
    assert_eq!(tile.level(), Level::Level1);
    assert!(tile.is_occupied());
    assert!(engine.last_build().unwrap().is_beneath());
}

/// Activation is refused a second time in the same turn.
#[test]
fn test_power_activation_once_per_turn() {
    let mut engine = engine_with(flat(), HOME, GodCard::Zeus, GodCard::Artemis);
    assert_eq!(engine.activate_power(PlayerId::FIRST), Ok(()));
    assert_eq!(engine.activate_power(PlayerId::FIRST), Err(Rejection::PowerAlreadyActive));
    assert_eq!(
        engine.activate_power(PlayerId::SECOND),
        Err(Rejection::NotYourTurn(PlayerId::SECOND))
    );

    let activations = engine
        .take_events()
        .into_iter()
        .filter(|e| matches!(e, EngineEvent::PowerActivated { .. }))
        .count();
    assert_eq!(activations, 1);
}

/// Power is only available in select, move and build.
#[test]
fn test_power_unavailable_in_bonus_phase() {
    let mut engine = engine_with(flat(), HOME, GodCard::Artemis, GodCard::None);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();
    assert_eq!(engine.phase(), Phase::SecondMove);

    // Already active, but the phase check comes first.
    assert_eq!(
        engine.activate_power(PlayerId::FIRST),
        Err(Rejection::PowerUnavailable("second_move"))
    );
}

/// Zeus cannot activate while the selected worker stands on level 3.
#[test]
fn test_power_not_applicable() {
    let mut levels = flat();
    levels[0][0] = Level::Level3;
    let mut engine = engine_with(levels, HOME, GodCard::Zeus, GodCard::None);
    engine.click(p(0, 0)).unwrap();

    assert_eq!(engine.activate_power(PlayerId::FIRST), Err(Rejection::PowerNotApplicable("Zeus")));
    assert!(!engine.god_power_active());
}

/// The power flag resets at the end of the turn.
#[test]
fn test_power_resets_each_turn() {
    let mut engine = engine_with(flat(), HOME, GodCard::Zeus, GodCard::Zeus);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();
    engine.click(p(2, 2)).unwrap();

    assert!(!engine.god_power_active());
    assert_eq!(engine.activate_power(PlayerId::SECOND), Ok(()));
}

// =============================================================================
// Stalemate
// =============================================================================

fn boxed_corner() -> Levels {
    let mut levels = flat();
    levels[3][2] = Level::Dome;
    levels[3][3] = Level::Dome;
    levels[3][4] = Level::Dome;
    levels[4][2] = Level::Dome;
    levels
}

/// The second seat is walled in; it loses as soon as its turn begins.
#[test]
fn test_stalemate_after_turn() {
    let spots = [(0, 0), (0, 1), (4, 4), (4, 3)];
    let mut engine = engine_with(boxed_corner(), spots, GodCard::None, GodCard::None);
    engine.take_events();

    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 0)).unwrap();
    assert_eq!(engine.click(p(2, 0)), Ok(Phase::GameOver));

    let outcome = engine.outcome().unwrap();
    assert_eq!(outcome.winner, PlayerId::FIRST);
    assert_eq!(outcome.reason, WinReason::Stalemate);
    assert_eq!(outcome.loser(), PlayerId::SECOND);
    assert_eq!(game_overs(&engine.take_events()), 1);
}

/// Stalemate is also detected before the very first move.
#[test]
fn test_stalemate_at_first_turn() {
    let config = SessionConfig::default()
        .without_clock()
        .with_placement(Placement::Fixed([(4, 4), (4, 3), (0, 0), (0, 1)].map(Position::from)));
    let mut engine = Engine::builder()
        .config(config)
        .cards(CardDeal::Fixed(GodCard::None, GodCard::None))
        .levels(boxed_corner())
        .build();

    assert_eq!(engine.start(), Ok(Phase::GameOver));
    assert_eq!(engine.outcome().map(|o| o.winner), Some(PlayerId::SECOND));
    assert_eq!(engine.turn_count(), 1);
}

// =============================================================================
// Hints
// =============================================================================

/// Each successful hint costs exactly one credit; the fourth is refused.
#[test]
fn test_hint_accounting() {
    let mut engine = plain();

    for expected in [2u8, 1, 0] {
        let hint = engine.request_hint().unwrap();
        assert!(matches!(hint, Suggestion::Select { .. }));
        assert_eq!(engine.hints_remaining(PlayerId::FIRST), expected);
    }

    assert_eq!(
        engine.request_hint(),
        Err(Rejection::NoHintsRemaining("Player 1".into()))
    );
    assert_eq!(engine.hints_remaining(PlayerId::FIRST), 0);
    assert_eq!(engine.hints_remaining(PlayerId::SECOND), 3);
}

/// No suggestion means no charge.
#[test]
fn test_hint_without_suggestion_is_free() {
    let mut engine = engine_with(flat(), HOME, GodCard::Demeter, GodCard::None);
    engine.activate_power(PlayerId::FIRST).unwrap();
    engine.click(p(0, 0)).unwrap();
    engine.click(p(1, 1)).unwrap();
    engine.click(p(0, 0)).unwrap();
    assert_eq!(engine.phase(), Phase::SecondBuild);

    assert_eq!(engine.request_hint(), Err(Rejection::NoSuggestion));
    assert_eq!(engine.hints_remaining(PlayerId::FIRST), 3);
}

/// A move hint points at a legal square and following it works.
#[test]
fn test_hint_is_playable() {
    let mut levels = flat();
    levels[1][1] = Level::Level1;
    let mut engine = plain_with_levels(levels);
    engine.click(p(0, 0)).unwrap();

    let hint = engine.request_hint().unwrap();
    assert_eq!(hint, Suggestion::Move { to: p(1, 1) });
    assert!(engine.legal_targets().contains(&hint.position()));
    assert_eq!(engine.click(hint.position()), Ok(Phase::Build));

    let given = engine
        .take_events()
        .into_iter()
        .find_map(|e| match e {
            EngineEvent::HintGiven { remaining, .. } => Some(remaining),
            _ => None,
        });
    assert_eq!(given, Some(2));
}

// =============================================================================
// Placement
// =============================================================================

/// Manual placement alternates seats, then the first seat starts.
#[test]
fn test_manual_placement() {
    let config = SessionConfig::default().without_clock().with_placement(Placement::Manual);
    let mut engine = Engine::builder().config(config).build();
    assert_eq!(engine.start(), Ok(Phase::Place));
    assert_eq!(engine.legal_targets().len(), 25);

    assert_eq!(engine.click(p(0, 0)), Ok(Phase::Place));
    assert_eq!(engine.click(p(0, 1)), Ok(Phase::Place));
    assert_eq!(engine.current_player_id(), PlayerId::SECOND);

    assert_eq!(engine.click(p(0, 0)), Err(Rejection::PlacementBlocked(p(0, 0))));
    assert_eq!(engine.click(p(4, 4)), Ok(Phase::Place));
    assert_eq!(engine.click(p(4, 3)), Ok(Phase::Select));

    assert_eq!(engine.current_player_id(), PlayerId::FIRST);
    assert_eq!(engine.turn_count(), 1);
    let occupant = engine.board().occupant(p(4, 3)).unwrap();
    assert_eq!(occupant.map(|w| w.owner()), Some(PlayerId::SECOND));
}

/// Random placement is reproducible from the seed and never stacks workers.
#[test]
fn test_random_placement_seeded() {
    let build = |seed| {
        let mut engine = Engine::builder()
            .config(SessionConfig::default().without_clock().with_seed(seed))
            .build();
        engine.start().unwrap();
        engine
    };
    let a = build(11);
    let b = build(11);

    assert_eq!(a.board(), b.board());
    assert_eq!(a.board().iter().filter(|(_, t)| t.is_occupied()).count(), 4);
    assert_eq!(a.phase(), Phase::Select);
}

/// The random deal gives exactly one seat a special card.
#[test]
fn test_random_deal() {
    for seed in 0..20 {
        let engine = Engine::builder()
            .config(SessionConfig::default().without_clock().with_seed(seed))
            .build();
        let cards: Vec<GodCard> = engine.players().iter().map(|(_, pl)| pl.god_card()).collect();
        assert_eq!(cards.iter().filter(|c| c.is_special()).count(), 1);
    }
}

/// Commands before `start` are refused.
#[test]
fn test_click_before_start() {
    let mut engine = Engine::builder()
        .config(SessionConfig::default().without_clock())
        .build();
    assert_eq!(engine.click(p(0, 0)), Err(Rejection::WrongPhase("setup")));
}

/// The text grid names workers after their owner's initial.
#[test]
fn test_board_text_uses_player_names() {
    let config = SessionConfig::default()
        .without_clock()
        .with_placement(Placement::Fixed([(0, 0), (0, 4), (4, 0), (4, 4)].map(Position::from)));
    let mut engine = Engine::builder()
        .config(config)
        .player(PlayerId::FIRST, "Zed", CYAN)
        .player(PlayerId::SECOND, "Yara", MAGENTA)
        .build();
    engine.start().unwrap();

    let text = engine.board().to_string();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows[0], "Z10 0 0 0 Z20");
    assert_eq!(rows[4], "Y10 0 0 0 Y20");
}
