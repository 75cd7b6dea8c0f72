//! Per-player countdown with a single background timer.
//!
//! At most one player's time runs at once. Each enabled clock owns one
//! timer thread for its whole life, driven by start/stop messages. While a
//! run is active the thread wakes every `poll_interval` and posts either a
//! tick (time left) or a one-shot expiry into an inbox; while idle it sleeps
//! on its control channel. The thread never touches engine state; the owner
//! drains the inbox with [`Clock::poll`] on its own thread.
//!
//! Every run gets a generation number. Messages from a run that has since
//! been stopped are dropped on drain, so a cancelled timer can never fire.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::core::{PlayerId, PlayerMap};

/// Seconds left at or below which the readout turns critical.
const CRITICAL_SECS: u64 = 60;
/// Seconds left at or below which the readout turns low.
const LOW_SECS: u64 = 180;

/// What the clock has to report after a drain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// Latest time left for the running player.
    Tick {
        player: PlayerId,
        remaining: Duration,
    },
    /// `player` ran out of time. Raised at most once per clock.
    Expired { player: PlayerId },
}

/// Urgency of a player's remaining time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWarning {
    Normal,
    Low,
    Critical,
}

/// Timer thread to owner.
#[derive(Debug)]
enum Message {
    Tick {
        generation: u64,
        player: PlayerId,
        remaining: Duration,
    },
    Expired {
        generation: u64,
        player: PlayerId,
    },
}

/// Owner to timer thread.
#[derive(Debug)]
enum Control {
    Start {
        generation: u64,
        player: PlayerId,
        deadline: Instant,
    },
    Stop,
    Shutdown,
}

#[derive(Debug)]
struct Run {
    player: PlayerId,
    started: Instant,
    generation: u64,
}

#[derive(Debug)]
struct Timer {
    control: Sender<Control>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    fn spawn(interval: Duration, outbox: Sender<Message>) -> Self {
        let (control, commands) = mpsc::channel();
        let handle = thread::spawn(move || timer_loop(interval, &commands, &outbox));
        Self {
            control,
            handle: Some(handle),
        }
    }

    fn send(&self, command: Control) {
        if self.control.send(command).is_err() {
            warn!("clock timer thread is gone");
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        // Wakes the thread at once whether it is idle or counting.
        let _ = self.control.send(Control::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("clock timer thread panicked");
            }
        }
    }
}

/// Two-player chess-style clock.
#[derive(Debug)]
pub struct Clock {
    enabled: bool,
    remaining: PlayerMap<Duration>,
    run: Option<Run>,
    generation: u64,
    expired: Option<PlayerId>,
    pending: Vec<ClockEvent>,
    inbox: Receiver<Message>,
    timer: Option<Timer>,
}

impl Clock {
    /// A stopped clock giving each player `budget`.
    ///
    /// An enabled clock spawns its timer thread here; a disabled one never
    /// spawns anything.
    #[must_use]
    pub fn new(budget: Duration, poll_interval: Duration, enabled: bool) -> Self {
        let (outbox, inbox) = mpsc::channel();
        let timer = enabled.then(|| Timer::spawn(poll_interval, outbox));
        Self {
            enabled,
            remaining: PlayerMap::with_value(budget),
            run: None,
            generation: 0,
            expired: None,
            pending: Vec::new(),
            inbox,
            timer,
        }
    }

    /// A clock that never runs.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO, Duration::from_millis(100), false)
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whose time is running, if anyone's.
    #[must_use]
    pub fn running_player(&self) -> Option<PlayerId> {
        self.run.as_ref().map(|r| r.player)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// The player whose time ran out, if it happened.
    #[must_use]
    pub fn expired_player(&self) -> Option<PlayerId> {
        self.expired
    }

    /// Start `player`'s time.
    ///
    /// No-op (returns false) when disabled, already running, or after an
    /// expiry.
    pub fn start(&mut self, player: PlayerId) -> bool {
        let Some(timer) = &self.timer else {
            return false;
        };
        if self.run.is_some() || self.expired.is_some() {
            return false;
        }

        self.generation += 1;
        let generation = self.generation;
        let started = Instant::now();
        timer.send(Control::Start {
            generation,
            player,
            deadline: started + self.remaining[player],
        });

        debug!(%player, generation, remaining = ?self.remaining[player], "clock started");
        self.run = Some(Run {
            player,
            started,
            generation,
        });
        true
    }

    /// Stop the running time, charging the elapsed time to its player.
    ///
    /// Returns without waiting on the timer thread. Idempotent. If the
    /// charge exhausts the budget, the expiry is queued for the next
    /// [`poll`](Self::poll).
    pub fn stop(&mut self) {
        let Some(run) = self.run.take() else {
            return;
        };
        if let Some(timer) = &self.timer {
            timer.send(Control::Stop);
        }
        let player = run.player;
        let left = self.remaining[player].saturating_sub(run.started.elapsed());
        self.remaining[player] = left;

        debug!(%player, remaining = ?left, "clock stopped");
        if left.is_zero() {
            self.mark_expired(player);
        }
    }

    /// Drain the inbox.
    ///
    /// Ticks are coalesced to the latest one. An expiry halts the clock,
    /// pins the player's time at zero, and is reported exactly once.
    pub fn poll(&mut self) -> Vec<ClockEvent> {
        let mut events = std::mem::take(&mut self.pending);
        let mut latest_tick = None;

        loop {
            let message = match self.inbox.try_recv() {
                Ok(message) => message,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            };
            match message {
                Message::Tick {
                    generation,
                    player,
                    remaining,
                } if self.is_current(generation) => {
                    latest_tick = Some(ClockEvent::Tick { player, remaining });
                }
                Message::Expired { generation, player } if self.is_current(generation) => {
                    // The timer has already gone idle for this run.
                    self.run = None;
                    self.remaining[player] = Duration::ZERO;
                    latest_tick = None;
                    self.mark_expired(player);
                    events.append(&mut self.pending);
                }
                _ => {}
            }
        }

        if let Some(tick) = latest_tick {
            events.push(tick);
        }
        events
    }

    /// Time left for `player`, including the running segment.
    #[must_use]
    pub fn remaining(&self, player: PlayerId) -> Duration {
        match &self.run {
            Some(run) if run.player == player => {
                self.remaining[player].saturating_sub(run.started.elapsed())
            }
            _ => self.remaining[player],
        }
    }

    /// Time left for `player` in fractional seconds.
    #[must_use]
    pub fn remaining_secs(&self, player: PlayerId) -> f64 {
        self.remaining(player).as_secs_f64()
    }

    /// `MM:SS` readout, clamped at zero.
    #[must_use]
    pub fn display(&self, player: PlayerId) -> String {
        let secs = self.remaining(player).as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    /// How urgent the readout should look.
    #[must_use]
    pub fn warning(&self, player: PlayerId) -> TimeWarning {
        match self.remaining(player).as_secs() {
            s if s <= CRITICAL_SECS => TimeWarning::Critical,
            s if s <= LOW_SECS => TimeWarning::Low,
            _ => TimeWarning::Normal,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.run.as_ref().is_some_and(|r| r.generation == generation)
    }

    fn mark_expired(&mut self, player: PlayerId) {
        if self.expired.is_some() {
            return;
        }
        info!(%player, "clock expired");
        self.expired = Some(player);
        self.pending.push(ClockEvent::Expired { player });
    }
}

/// Body of the timer thread.
///
/// Blocks on the control channel while idle; while a run is active the
/// same wait doubles as the poll interval, so start/stop/shutdown are
/// picked up immediately.
fn timer_loop(interval: Duration, commands: &Receiver<Control>, outbox: &Sender<Message>) {
    let mut active: Option<(u64, PlayerId, Instant)> = None;
    loop {
        let received = if active.is_some() {
            commands.recv_timeout(interval)
        } else {
            commands.recv().map_err(|_| RecvTimeoutError::Disconnected)
        };

        match received {
            Ok(Control::Start {
                generation,
                player,
                deadline,
            }) => active = Some((generation, player, deadline)),
            Ok(Control::Stop) => active = None,
            Ok(Control::Shutdown) | Err(RecvTimeoutError::Disconnected) => return,
            Err(RecvTimeoutError::Timeout) => {
                let Some((generation, player, deadline)) = active else {
                    continue;
                };
                let now = Instant::now();
                let message = if now >= deadline {
                    active = None;
                    Message::Expired { generation, player }
                } else {
                    Message::Tick {
                        generation,
                        player,
                        remaining: deadline - now,
                    }
                };
                if outbox.send(message).is_err() {
                    return;
                }
            }
        }
    }
}
