use crate::agent::Agent;
use crate::pathfinder::Pathfinder;
use crate::types::{Cell, Direction};
use rand::Rng;
use std::collections::HashSet;

/// Throttled path planning for the bot-controlled agent.
#[derive(Debug, Clone)]
pub struct BotController {
    pathfinder: Pathfinder,
    decision_interval: f64,
    last_decision: Option<f64>,
}

impl BotController {
    pub fn new(pathfinder: Pathfinder, decision_interval: f64) -> Self {
        BotController {
            pathfinder,
            decision_interval,
            last_decision: None,
        }
    }

    fn due(&self, now: f64) -> bool {
        self.last_decision
            .is_none_or(|last| now - last > self.decision_interval)
    }

    /// Plans and steers `bot` towards `food` if a decision is due.
    /// Returns the planned direction when a search ran this tick.
    pub fn update<R: Rng>(&mut self, now: f64, bot: &mut Agent, opponent: &Agent, food: Cell, rng: &mut R) -> Option<Direction> {
        if bot.is_frozen(now) || !self.due(now) {
            return None;
        }

        let obstacles: HashSet<Cell> = bot
            .obstacle_cells()
            .chain(opponent.obstacle_cells())
            .collect();
        let direction = self
            .pathfinder
            .next_direction(bot.head(), food, &obstacles, rng);

        if !bot.steer(direction) {
            crate::debug_bot!(bot.id, now, "Planned reversal {:?} ignored", direction);
        }
        self.last_decision = Some(now);
        Some(direction)
    }
}
