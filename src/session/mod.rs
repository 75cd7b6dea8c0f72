//! The boundary between the engine and whatever draws it.
//!
//! A [`Session`] owns exactly one live [`Engine`]. Input arrives through
//! the `on_*` entry points; output leaves as [`EngineEvent`]s pushed to
//! subscribed observers and as [`Snapshot`]s taken on demand. Starting a
//! new game replaces the engine wholesale, so nothing of the old session
//! (board, clock thread, hint pools) survives into the next.
//!
//! - `request`: `SessionRequest`, what a new game is built from
//! - `snapshot`: owned read-only views for redrawing

pub mod request;
pub mod snapshot;

use tracing::{info, instrument};

use crate::advisor::Suggestion;
use crate::core::{PlayerId, Position, Rejection};
use crate::rules::{Engine, EngineEvent, Phase};

pub use request::SessionRequest;
pub use snapshot::{PlayerView, Snapshot, TileView};

/// Receives engine events in the order they happened.
pub trait EventObserver {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EventObserver for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}

/// One game at a time, plus its observers.
pub struct Session {
    engine: Engine,
    observers: Vec<Box<dyn EventObserver>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("engine", &self.engine)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Session {
    /// Build and start a session.
    ///
    /// Fails only when a fixed placement names an unusable square.
    pub fn new(request: &SessionRequest) -> Result<Self, Rejection> {
        let mut engine = request.build_engine();
        engine.start()?;
        Ok(Self {
            engine,
            observers: Vec::new(),
        })
    }

    /// Register an observer. It receives every event not yet delivered,
    /// which right after `new` includes the opening turn's.
    pub fn subscribe(&mut self, observer: impl EventObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Current state, for redrawing.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.engine)
    }

    // === Entry points ===

    #[instrument(level = "debug", skip(self))]
    pub fn on_tile_clicked(&mut self, row: i32, col: i32) -> Result<Phase, Rejection> {
        let result = self.engine.click(Position::new(row, col));
        self.flush();
        result
    }

    #[instrument(level = "debug", skip(self))]
    pub fn on_skip_requested(&mut self) -> Result<Phase, Rejection> {
        let result = self.engine.skip();
        self.flush();
        result
    }

    /// Only honoured for the player on turn.
    #[instrument(level = "debug", skip(self))]
    pub fn on_activate_power_requested(&mut self, player_index: usize) -> Result<(), Rejection> {
        let result = match PlayerId::from_index(player_index) {
            Some(seat) => self.engine.activate_power(seat),
            None => Err(Rejection::UnknownSeat(player_index)),
        };
        self.flush();
        result
    }

    #[instrument(level = "debug", skip(self))]
    pub fn on_hint_requested(&mut self) -> Result<Suggestion, Rejection> {
        let result = self.engine.request_hint();
        self.flush();
        result
    }

    /// Throw the current game away and start another.
    ///
    /// On failure the current game is kept.
    #[instrument(level = "debug", skip_all)]
    pub fn on_new_session_requested(
        &mut self,
        request: &SessionRequest,
    ) -> Result<Phase, Rejection> {
        let mut engine = request.build_engine();
        if let Err(reason) = engine.start() {
            let events = engine.take_events();
            self.dispatch(&events);
            return Err(reason);
        }

        // Dropping the old engine cancels its clock thread.
        self.engine = engine;
        info!(
            first = %request.players[PlayerId::FIRST].name,
            second = %request.players[PlayerId::SECOND].name,
            "new session"
        );
        self.flush();
        Ok(self.engine.phase())
    }

    /// Periodic poll from the host's event loop: picks up clock ticks and
    /// a possible timeout.
    pub fn on_tick(&mut self) {
        self.engine.poll_clock();
        self.flush();
    }

    fn flush(&mut self) {
        let events = self.engine.take_events();
        self.dispatch(&events);
    }

    fn dispatch(&mut self, events: &[EngineEvent]) {
        for event in events {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }
}
