//! The turn state machine.
//!
//! `Engine` owns the board, both players, the clock and the advisor, and
//! is the only thing that changes any of them. Every externally triggered
//! transition goes through one of its command methods:
//!
//! - [`Engine::start`]: place workers, begin the first turn
//! - [`Engine::click`]: a board square was chosen; meaning depends on phase
//! - [`Engine::skip`]: decline a bonus move or build
//! - [`Engine::activate_power`]: switch on the god power for this turn
//! - [`Engine::request_hint`]: ask the advisor, spending a hint credit
//! - [`Engine::poll_clock`]: drain the background timer's inbox
//!
//! Commands return `Err(Rejection)` for anything inapplicable. A rejected
//! command changes nothing except queueing a `Rejected` event. Once a
//! winner exists every command is rejected.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::action::{Action, ActionRecord, Build, BuildRules, Move, MoveRules};
use super::event::{EngineEvent, GameOutcome, WinReason};
use super::phase::{Phase, SecondAction};
use crate::advisor::{AdviceContext, Advisor, HeuristicAdvisor, Suggestion};
use crate::board::{Board, Level};
use crate::cards::{CardDeal, GodCard};
use crate::clock::{Clock, ClockEvent};
use crate::core::{
    GameRng, Placement, PlayerId, PlayerMap, Position, Rejection, SessionConfig, BOARD_SIZE,
};
use crate::pieces::{Color, Player, Worker, WorkerId, CYAN, MAGENTA, WORKERS_PER_PLAYER};

const SECOND_MOVE_PROMPT: &str =
    "Artemis power: you can move again (not back). Select position or skip.";
const SECOND_BUILD_PROMPT: &str =
    "Demeter power: build again (not on the same space). Select position or skip.";

/// Name and colour for one seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub color: Color,
}

/// Builder for an [`Engine`].
#[derive(Debug)]
pub struct EngineBuilder {
    config: SessionConfig,
    specs: PlayerMap<PlayerSpec>,
    deal: CardDeal,
    levels: [[Level; BOARD_SIZE]; BOARD_SIZE],
    advisor: Box<dyn Advisor>,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            config: SessionConfig::default(),
            specs: PlayerMap::from_pair(
                PlayerSpec {
                    name: "Player 1".into(),
                    color: CYAN,
                },
                PlayerSpec {
                    name: "Player 2".into(),
                    color: MAGENTA,
                },
            ),
            deal: CardDeal::Random,
            levels: [[Level::Ground; BOARD_SIZE]; BOARD_SIZE],
            advisor: Box::new(HeuristicAdvisor),
        }
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session configuration.
    #[must_use]
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Name and colour of one seat.
    #[must_use]
    pub fn player(mut self, seat: PlayerId, name: impl Into<String>, color: Color) -> Self {
        self.specs[seat] = PlayerSpec {
            name: name.into(),
            color,
        };
        self
    }

    /// God-card assignment policy.
    #[must_use]
    pub fn cards(mut self, deal: CardDeal) -> Self {
        self.deal = deal;
        self
    }

    /// Start from pre-built levels instead of a flat board.
    #[must_use]
    pub fn levels(mut self, levels: [[Level; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        self.levels = levels;
        self
    }

    /// Replace the built-in advisor.
    #[must_use]
    pub fn advisor(mut self, advisor: impl Advisor + 'static) -> Self {
        self.advisor = Box::new(advisor);
        self
    }

    /// Seat the players and deal the cards. The engine is left in `setup`.
    pub fn build(self) -> Engine {
        let mut rng = self.config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let cards = self.deal.deal(&mut rng);
        let hints = self.config.hint_credits;
        let players = PlayerMap::new(|seat| {
            let spec = &self.specs[seat];
            Player::new(seat, spec.name.clone(), spec.color, cards[seat], hints)
        });
        let clock = Clock::new(
            self.config.clock_budget,
            self.config.poll_interval,
            self.config.clock_enabled,
        );

        info!(
            seed = rng.seed(),
            first = %players[PlayerId::FIRST].god_card(),
            second = %players[PlayerId::SECOND].god_card(),
            "session created"
        );

        Engine {
            config: self.config,
            board: Board::with_levels(self.levels),
            players,
            current: PlayerId::FIRST,
            phase: Phase::Setup,
            selected: None,
            second_action: None,
            god_power_active: false,
            outcome: None,
            turn_count: 0,
            clock,
            advisor: self.advisor,
            rng,
            history: Vector::new(),
            events: Vec::new(),
        }
    }
}

/// One game session.
#[derive(Debug)]
pub struct Engine {
    config: SessionConfig,
    board: Board,
    players: PlayerMap<Player>,
    current: PlayerId,
    phase: Phase,
    selected: Option<WorkerId>,
    second_action: Option<SecondAction>,
    god_power_active: bool,
    outcome: Option<GameOutcome>,
    turn_count: u32,
    clock: Clock,
    advisor: Box<dyn Advisor>,
    rng: GameRng,
    history: Vector<ActionRecord>,
    events: Vec<EngineEvent>,
}

impl Engine {
    /// Shorthand for [`EngineBuilder::new`].
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    // === Commands ===

    /// Put the workers on the board according to the placement policy.
    ///
    /// With `Random` or `Fixed` placement the first turn begins at once;
    /// with `Manual` the engine enters the `place` phase.
    pub fn start(&mut self) -> Result<Phase, Rejection> {
        let result = self.try_start();
        result.map_err(|r| self.reject(r))
    }

    /// A board square was clicked.
    pub fn click(&mut self, pos: Position) -> Result<Phase, Rejection> {
        self.poll_clock();
        let result = self.try_click(pos);
        result.map_err(|r| self.reject(r))
    }

    /// Decline the pending bonus move or build.
    pub fn skip(&mut self) -> Result<Phase, Rejection> {
        self.poll_clock();
        let result = self.try_skip();
        result.map_err(|r| self.reject(r))
    }

    /// Switch on `player`'s god power for the rest of this turn.
    pub fn activate_power(&mut self, player: PlayerId) -> Result<(), Rejection> {
        self.poll_clock();
        let result = self.try_activate(player);
        result.map_err(|r| self.reject(r))
    }

    /// Ask the advisor for the active player's next action.
    ///
    /// Spends one hint credit on success only.
    pub fn request_hint(&mut self) -> Result<Suggestion, Rejection> {
        self.poll_clock();
        let result = self.try_hint();
        result.map_err(|r| self.reject(r))
    }

    /// Drain the clock inbox, turning an expiry into a timeout loss.
    pub fn poll_clock(&mut self) {
        for event in self.clock.poll() {
            match event {
                ClockEvent::Tick { player, remaining } => {
                    self.events.push(EngineEvent::ClockTick { player, remaining });
                }
                ClockEvent::Expired { player } => {
                    if self.outcome.is_some() {
                        continue;
                    }
                    let name = self.players[player].name().to_string();
                    self.status(format!("Time's up! {name} loses!"));
                    self.declare_winner(player.opponent(), WinReason::Timeout);
                }
            }
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        self.current
    }

    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    #[must_use]
    pub fn player(&self, seat: PlayerId) -> &Player {
        &self.players[seat]
    }

    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    /// Worker chosen this turn.
    #[must_use]
    pub fn selected_worker(&self) -> Option<&Worker> {
        self.selected.and_then(|id| self.worker(id))
    }

    #[must_use]
    pub fn second_action(&self) -> Option<SecondAction> {
        self.second_action
    }

    #[must_use]
    pub fn god_power_active(&self) -> bool {
        self.god_power_active
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn winner(&self) -> Option<&Player> {
        self.outcome.map(|o| &self.players[o.winner])
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Turns begun so far; 1 during the first turn.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn hints_remaining(&self, seat: PlayerId) -> u8 {
        self.players[seat].hints_remaining()
    }

    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Every executed move and build, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.iter().rev().find_map(|r| match r.action {
            Action::Move(m) => Some(m),
            Action::Build(_) => None,
        })
    }

    #[must_use]
    pub fn last_build(&self) -> Option<Build> {
        self.history.iter().rev().find_map(|r| match r.action {
            Action::Build(b) => Some(b),
            Action::Move(_) => None,
        })
    }

    /// Squares a click would currently be accepted on.
    #[must_use]
    pub fn legal_targets(&self) -> Vec<Position> {
        match self.phase {
            Phase::Place => self
                .board
                .iter()
                .filter(|(_, t)| !t.is_occupied() && !t.is_dome())
                .map(|(p, _)| p)
                .collect(),
            Phase::Select => self.players[self.current]
                .worker_positions()
                .filter(|&p| self.can_move_from(p))
                .collect(),
            Phase::Move | Phase::SecondMove => self
                .selected_position()
                .and_then(|from| Move::legal_targets(&self.board, from, self.move_rules()).ok())
                .map(|t| t.to_vec())
                .unwrap_or_default(),
            Phase::Build | Phase::SecondBuild => self
                .selected_position()
                .and_then(|from| Build::legal_targets(&self.board, from, self.build_rules()).ok())
                .map(|t| t.to_vec())
                .unwrap_or_default(),
            Phase::Setup | Phase::GameOver => Vec::new(),
        }
    }

    /// Take all queued events, oldest first.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // === Setup ===

    fn try_start(&mut self) -> Result<Phase, Rejection> {
        if self.phase != Phase::Setup {
            return Err(Rejection::WrongPhase(self.phase.name()));
        }

        match self.config.placement.clone() {
            Placement::Random => {
                self.place_randomly();
                self.begin_play();
            }
            Placement::Fixed(spots) => {
                self.check_spots(&spots)?;
                let slots = 0..WORKERS_PER_PLAYER as u8;
                let ids = PlayerId::all().flat_map(|seat| {
                    slots.clone().map(move |slot| WorkerId::new(seat, slot))
                });
                for (id, at) in ids.zip(spots) {
                    self.put_worker(id, at);
                }
                self.begin_play();
            }
            Placement::Manual => {
                self.phase = Phase::Place;
                self.events.push(EngineEvent::PhaseChanged { phase: Phase::Place });
                let name = self.players[self.current].name().to_string();
                self.status(format!("{name}, place your workers."));
            }
        }
        Ok(self.phase)
    }

    fn place_randomly(&mut self) {
        let mut spots: Vec<Position> = self
            .board
            .iter()
            .filter(|(_, t)| !t.is_occupied() && !t.is_dome())
            .map(|(p, _)| p)
            .collect();
        self.rng.shuffle(&mut spots);

        for seat in PlayerId::all() {
            for slot in 0..WORKERS_PER_PLAYER as u8 {
                let Some(at) = spots.pop() else {
                    return;
                };
                self.put_worker(WorkerId::new(seat, slot), at);
            }
        }
    }

    fn check_spots(&self, spots: &[Position]) -> Result<(), Rejection> {
        for (i, &at) in spots.iter().enumerate() {
            let tile = self.board.tile(at)?;
            if tile.is_dome() || tile.is_occupied() || spots[..i].contains(&at) {
                return Err(Rejection::PlacementBlocked(at));
            }
        }
        Ok(())
    }

    fn put_worker(&mut self, id: WorkerId, at: Position) -> bool {
        let Some(worker) = self.players[id.owner()].worker_mut(id.slot()) else {
            return false;
        };
        if !self.board.place_worker(worker, at) {
            return false;
        }
        self.events.push(EngineEvent::WorkerPlaced { worker: id, at });
        true
    }

    fn begin_play(&mut self) {
        self.current = PlayerId::FIRST;
        self.turn_count = 1;
        self.start_turn();
    }

    // === Turn flow ===

    fn start_turn(&mut self) {
        self.selected = None;
        self.second_action = None;
        self.god_power_active = false;
        self.phase = Phase::Select;

        let seat = self.current;
        let name = self.players[seat].name().to_string();
        if !self.has_legal_move(seat) {
            debug!(player = %seat, "no legal moves at turn start");
            self.status(format!("{name} has no valid moves!"));
            self.declare_winner(seat.opponent(), WinReason::Stalemate);
            return;
        }

        self.clock.start(seat);
        info!(player = %seat, turn = self.turn_count, "turn started");
        self.events.push(EngineEvent::TurnStarted {
            player: seat,
            turn: self.turn_count,
        });
        self.events.push(EngineEvent::PhaseChanged { phase: Phase::Select });
        self.status(format!("{name}'s turn. Select a worker."));
    }

    fn end_turn(&mut self) {
        self.clock.stop();
        // Stopping may reveal that the departing player's time just ran out.
        self.poll_clock();
        if self.outcome.is_some() {
            return;
        }

        self.current = self.current.opponent();
        self.turn_count += 1;
        self.start_turn();
    }

    fn declare_winner(&mut self, winner: PlayerId, reason: WinReason) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = GameOutcome { winner, reason };
        self.outcome = Some(outcome);
        self.phase = Phase::GameOver;
        self.selected = None;
        self.second_action = None;
        self.clock.stop();

        let name = self.players[winner].name().to_string();
        info!(winner = %winner, ?reason, turn = self.turn_count, "game over");
        self.events.push(EngineEvent::GameOver(outcome));
        self.events.push(EngineEvent::PhaseChanged { phase: Phase::GameOver });
        self.status(format!("{name} wins! ({reason})"));
    }

    // === Click dispatch ===

    fn try_click(&mut self, pos: Position) -> Result<Phase, Rejection> {
        self.ensure_live()?;
        self.board.tile(pos)?;

        match self.phase {
            Phase::Place => self.click_place(pos),
            Phase::Select => self.click_select(pos),
            Phase::Move => self.click_move(pos),
            Phase::SecondMove => self.click_second_move(pos),
            Phase::Build => self.click_build(pos),
            Phase::SecondBuild => self.click_second_build(pos),
            Phase::Setup | Phase::GameOver => Err(Rejection::WrongPhase(self.phase.name())),
        }
    }

    fn click_place(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let seat = self.current;
        let id = self.players[seat]
            .next_unplaced()
            .ok_or(Rejection::WrongPhase(Phase::Place.name()))?;
        if !self.put_worker(id, pos) {
            return Err(Rejection::PlacementBlocked(pos));
        }

        let name = self.players[seat].name().to_string();
        if self.players[seat].next_unplaced().is_some() {
            self.status(format!("{name}, place your next worker."));
            return Ok(self.phase);
        }

        self.current = seat.opponent();
        if self.players.iter().all(|(_, p)| p.next_unplaced().is_none()) {
            self.begin_play();
        } else {
            let next = self.players[self.current].name().to_string();
            self.status(format!("{next}, place your workers."));
        }
        Ok(self.phase)
    }

    fn click_select(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let id = self.board.occupant(pos)?.ok_or(Rejection::NoWorkerThere)?;
        if id.owner() != self.current {
            let owner = self.players[id.owner()].name().to_string();
            return Err(Rejection::OpponentWorker(owner));
        }
        let name = self.worker(id).map(|w| w.name().to_string()).unwrap_or_default();
        if !self.can_move_from(pos) {
            return Err(Rejection::WorkerStuck(name));
        }

        self.selected = Some(id);
        self.phase = Phase::Move;
        debug!(worker = %id, %pos, "worker selected");
        self.events.push(EngineEvent::WorkerSelected { worker: id, at: pos });
        self.events.push(EngineEvent::PhaseChanged { phase: Phase::Move });
        self.status(format!("Selected {name}. Choose where to move."));
        Ok(self.phase)
    }

    fn click_move(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let id = self.selected_id()?;
        let origin = self.selected_position().ok_or(Rejection::IllegalMove(pos))?;
        let mv = self.execute_move(id, pos, self.move_rules())?;

        if mv.is_winning() {
            self.declare_winner(self.current, WinReason::Height);
            return Ok(self.phase);
        }

        let card = self.players[self.current].god_card();
        let offer_second = match card {
            GodCard::Artemis => {
                let rules = MoveRules {
                    forbidden: Some(origin),
                    ..MoveRules::default()
                };
                self.god_power_active
                    && Move::legal_targets(&self.board, pos, rules).is_ok_and(|t| !t.is_empty())
            }
            GodCard::None | GodCard::Demeter | GodCard::Zeus => false,
        };

        if offer_second {
            self.second_action = Some(SecondAction::Move { origin });
            self.phase = Phase::SecondMove;
            self.events.push(EngineEvent::PhaseChanged { phase: Phase::SecondMove });
            self.status(SECOND_MOVE_PROMPT.into());
        } else {
            self.enter_build();
        }
        Ok(self.phase)
    }

    fn click_second_move(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let id = self.selected_id()?;
        let mv = self.execute_move(id, pos, self.move_rules())?;
        self.second_action = None;

        if mv.is_winning() {
            self.declare_winner(self.current, WinReason::Height);
        } else {
            self.enter_build();
        }
        Ok(self.phase)
    }

    fn click_build(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let id = self.selected_id()?;
        let build = self.execute_build(id, pos, self.build_rules())?;

        let card = self.players[self.current].god_card();
        let offer_second = match card {
            GodCard::Demeter => {
                let rules = BuildRules {
                    beneath_allowed: false,
                    forbidden: Some(pos),
                };
                self.god_power_active
                    && !build.is_beneath()
                    && self
                        .selected_position()
                        .and_then(|from| Build::legal_targets(&self.board, from, rules).ok())
                        .is_some_and(|t| !t.is_empty())
            }
            GodCard::None | GodCard::Artemis | GodCard::Zeus => false,
        };

        if offer_second {
            self.second_action = Some(SecondAction::Build { first: pos });
            self.phase = Phase::SecondBuild;
            self.events.push(EngineEvent::PhaseChanged { phase: Phase::SecondBuild });
            self.status(SECOND_BUILD_PROMPT.into());
        } else {
            self.end_turn();
        }
        Ok(self.phase)
    }

    fn click_second_build(&mut self, pos: Position) -> Result<Phase, Rejection> {
        let id = self.selected_id()?;
        self.execute_build(id, pos, self.build_rules())?;
        self.second_action = None;
        self.end_turn();
        Ok(self.phase)
    }

    fn enter_build(&mut self) {
        self.phase = Phase::Build;
        self.events.push(EngineEvent::PhaseChanged { phase: Phase::Build });
        self.status("Select position to build.".into());
    }

    fn execute_move(
        &mut self,
        id: WorkerId,
        to: Position,
        rules: MoveRules,
    ) -> Result<Move, Rejection> {
        let worker = self.players[id.owner()]
            .worker_mut(id.slot())
            .ok_or(Rejection::IllegalMove(to))?;
        let mut mv =
            Move::propose(&self.board, worker, to, rules).ok_or(Rejection::IllegalMove(to))?;
        if !mv.execute(&mut self.board, worker) {
            return Err(Rejection::IllegalMove(to));
        }

        debug!(worker = %id, from = %mv.from(), %to, winning = mv.is_winning(), "worker moved");
        self.record(Action::Move(mv));
        self.events.push(EngineEvent::WorkerMoved {
            worker: id,
            from: mv.from(),
            to,
        });
        Ok(mv)
    }

    fn execute_build(
        &mut self,
        id: WorkerId,
        at: Position,
        rules: BuildRules,
    ) -> Result<Build, Rejection> {
        let worker = self.worker(id).ok_or(Rejection::IllegalBuild(at))?;
        let build =
            Build::propose(&self.board, worker, at, rules).ok_or(Rejection::IllegalBuild(at))?;
        if !build.execute(&mut self.board) {
            return Err(Rejection::IllegalBuild(at));
        }

        self.record(Action::Build(build));
        if let Ok(tile) = self.board.tile(at) {
            debug!(worker = %id, %at, level = %tile.level(), beneath = build.is_beneath(), "built");
            self.events.push(EngineEvent::Built {
                worker: id,
                at,
                level: tile.level(),
            });
        }
        Ok(build)
    }

    // === Other commands ===

    fn try_skip(&mut self) -> Result<Phase, Rejection> {
        self.ensure_live()?;
        match self.phase {
            Phase::SecondMove => {
                self.second_action = None;
                self.enter_build();
            }
            Phase::SecondBuild => {
                self.second_action = None;
                self.end_turn();
            }
            _ => return Err(Rejection::NothingToSkip),
        }
        Ok(self.phase)
    }

    fn try_activate(&mut self, seat: PlayerId) -> Result<(), Rejection> {
        self.ensure_live()?;
        if seat != self.current {
            return Err(Rejection::NotYourTurn(seat));
        }

        let player = &self.players[seat];
        let card = player.god_card();
        if !card.is_special() {
            return Err(Rejection::NoGodCard(player.name().to_string()));
        }
        if !self.phase.allows_power() {
            return Err(Rejection::PowerUnavailable(self.phase.name()));
        }
        if self.god_power_active {
            return Err(Rejection::PowerAlreadyActive);
        }

        let applicable = match self.selected_worker() {
            Some(worker) => card.can_activate(worker, &self.board),
            None => player.workers().iter().any(|w| card.can_activate(w, &self.board)),
        };
        if !applicable {
            return Err(Rejection::PowerNotApplicable(card.name()));
        }

        self.god_power_active = true;
        info!(player = %seat, %card, phase = %self.phase, "god power activated");
        self.events.push(EngineEvent::PowerActivated { player: seat, card });
        self.status(format!("{card} power activated!"));
        Ok(())
    }

    fn try_hint(&mut self) -> Result<Suggestion, Rejection> {
        self.ensure_live()?;
        let seat = self.current;
        if self.players[seat].hints_remaining() == 0 {
            return Err(Rejection::NoHintsRemaining(self.players[seat].name().to_string()));
        }

        let targets = self.legal_targets();
        let ctx = AdviceContext {
            board: &self.board,
            phase: self.phase,
            player: &self.players[seat],
            selected: self.selected_worker(),
            targets: &targets,
        };
        let suggestion = self.advisor.propose(&ctx).ok_or(Rejection::NoSuggestion)?;

        self.players[seat].consume_hint();
        let remaining = self.players[seat].hints_remaining();
        debug!(player = %seat, %suggestion, remaining, "hint given");
        self.events.push(EngineEvent::HintGiven {
            player: seat,
            suggestion,
            remaining,
        });
        self.status(format!("Hint: {suggestion} ({remaining} hints remaining)"));
        Ok(suggestion)
    }

    // === Helpers ===

    fn ensure_live(&self) -> Result<(), Rejection> {
        if self.outcome.is_some() {
            Err(Rejection::GameOver)
        } else {
            Ok(())
        }
    }

    fn reject(&mut self, reason: Rejection) -> Rejection {
        debug!(phase = %self.phase, %reason, "command rejected");
        self.events.push(EngineEvent::Rejected {
            message: reason.to_string(),
        });
        reason
    }

    fn status(&mut self, message: String) {
        self.events.push(EngineEvent::Status(message));
    }

    fn record(&mut self, action: Action) {
        let sequence = self.history.len() as u32;
        self.history
            .push_back(ActionRecord::new(self.current, action, self.turn_count, sequence));
    }

    fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.players[id.owner()].worker(id.slot())
    }

    fn selected_id(&self) -> Result<WorkerId, Rejection> {
        self.selected.ok_or(Rejection::WrongPhase(self.phase.name()))
    }

    fn selected_position(&self) -> Option<Position> {
        self.selected_worker().and_then(Worker::position)
    }

    /// Move constraints for the current phase.
    fn move_rules(&self) -> MoveRules {
        MoveRules {
            restrict_upward: false,
            forbidden: self.second_action.map(SecondAction::forbidden),
        }
    }

    /// Build constraints for the current phase.
    fn build_rules(&self) -> BuildRules {
        match self.second_action {
            Some(SecondAction::Build { first }) => BuildRules {
                beneath_allowed: false,
                forbidden: Some(first),
            },
            _ => BuildRules {
                beneath_allowed: self.god_power_active
                    && self.players[self.current].god_card() == GodCard::Zeus,
                forbidden: None,
            },
        }
    }

    fn can_move_from(&self, pos: Position) -> bool {
        self.board.valid_moves(pos, false).is_ok_and(|m| !m.is_empty())
    }

    fn has_legal_move(&self, seat: PlayerId) -> bool {
        self.players[seat].worker_positions().any(|p| self.can_move_from(p))
    }
}
