//! Greedy one-ply heuristic.
//!
//! Scores (higher is better, first strictly better candidate wins):
//! - select: number of legal moves of the worker
//! - move: `5 * max(0, climb)`, plus 100 for stepping onto level 3
//! - build: `3 - level` of the target
//!
//! No suggestion in bonus phases or outside of play.

use tracing::trace;

use super::{AdviceContext, Advisor, Suggestion};
use crate::board::Level;
use crate::core::Position;
use crate::rules::Phase;

const CLIMB_WEIGHT: i32 = 5;
const WIN_BONUS: i32 = 100;

/// The built-in advisor.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicAdvisor;

impl HeuristicAdvisor {
    fn best_worker(ctx: &AdviceContext<'_>) -> Option<Suggestion> {
        let mut best: Option<(usize, Suggestion)> = None;

        for worker in ctx.player.workers() {
            let Some(at) = worker.position() else {
                continue;
            };
            let Ok(moves) = ctx.board.valid_moves(at, false) else {
                continue;
            };
            if moves.is_empty() {
                continue;
            }
            if best.map_or(true, |(score, _)| moves.len() > score) {
                best = Some((moves.len(), Suggestion::Select { worker: worker.id(), at }));
            }
        }

        best.map(|(_, s)| s)
    }

    fn best_target(ctx: &AdviceContext<'_>, score: impl Fn(i32) -> i32) -> Option<Position> {
        let mut best: Option<(i32, Position)> = None;

        for &target in ctx.targets {
            let Ok(tile) = ctx.board.tile(target) else {
                continue;
            };
            let s = score(tile.height());
            trace!(%target, score = s, "scored target");
            if best.map_or(true, |(b, _)| s > b) {
                best = Some((s, target));
            }
        }

        best.map(|(_, p)| p)
    }
}

impl Advisor for HeuristicAdvisor {
    fn propose(&self, ctx: &AdviceContext<'_>) -> Option<Suggestion> {
        match ctx.phase {
            Phase::Select => Self::best_worker(ctx),
            Phase::Move => {
                let from = ctx.selected?.position()?;
                let here = ctx.board.tile(from).ok()?.height();
                Self::best_target(ctx, |there| {
                    let climb = CLIMB_WEIGHT * (there - here).max(0);
                    let win = if there == Level::Level3.value() { WIN_BONUS } else { 0 };
                    climb + win
                })
                .map(|to| Suggestion::Move { to })
            }
            Phase::Build => Self::best_target(ctx, |level| Level::Level3.value() - level)
                .map(|at| Suggestion::Build { at }),
            _ => None,
        }
    }
}
