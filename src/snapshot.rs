//! What the simulation hands to its collaborators: per-tick snapshots and
//! events, and the final result.

use crate::agent::{Agent, Controller};
use crate::powerup::PowerUp;
use crate::types::{AgentId, Cell, Direction};

/// Things that happened during a tick, for audio and HUD feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchEvent {
    FoodEaten { by: AgentId, at: Cell },
    FoodSpawned(Cell),
    PowerUpSpawned(PowerUp),
    SpeedCollected(AgentId),
    SpeedExpired(AgentId),
    FreezeCollected { by: AgentId, frozen: AgentId },
    Thawed(AgentId),
    MuteToggled,
    PauseToggled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentView {
    pub id: AgentId,
    pub controller: Controller,
    pub body: Vec<Cell>, // Tail first, head last
    pub direction: Direction,
    pub frozen: bool,
    pub speed_multiplier: f64,
    pub score: u32,
}

impl AgentView {
    pub fn capture(agent: &Agent, now: f64) -> Self {
        AgentView {
            id: agent.id,
            controller: agent.controller,
            body: agent.body().iter().copied().collect(),
            direction: agent.direction(),
            frozen: agent.is_frozen(now),
            speed_multiplier: agent.speed_multiplier(),
            score: agent.score,
        }
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.last().copied()
    }

    pub fn is_boosted(&self) -> bool {
        self.speed_multiplier > 1.0
    }
}

/// Read-only view of one tick, enough to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub agents: [AgentView; 2],
    pub food: Option<Cell>,
    pub power_ups: Vec<PowerUp>,
    pub elapsed: f64,
    pub remaining: f64,
    pub duration: f64,
}

impl RenderSnapshot {
    pub fn agent(&self, id: AgentId) -> &AgentView {
        &self.agents[id.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        [self.agents[0].score, self.agents[1].score]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    Quit,
}

/// Final outcome, handed to the presentation layer once.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub scores: [u32; 2],
    pub bot: Option<AgentId>,
    pub end_reason: EndReason,
    pub elapsed: f64,
}

impl MatchResult {
    pub fn score(&self, id: AgentId) -> u32 {
        self.scores[id.index()]
    }

    /// Higher score wins; `None` on a tie.
    pub fn winner(&self) -> Option<AgentId> {
        match self.scores[0].cmp(&self.scores[1]) {
            std::cmp::Ordering::Greater => Some(AgentId::Player1),
            std::cmp::Ordering::Less => Some(AgentId::Player2),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn display_name(&self, id: AgentId) -> &'static str {
        match id {
            AgentId::Player1 => "Player 1",
            AgentId::Player2 if self.bot == Some(AgentId::Player2) => "Bot",
            AgentId::Player2 => "Player 2",
        }
    }

    /// Agents ordered by score, highest first; Player 1 first on a tie.
    pub fn standings(&self) -> [(AgentId, u32); 2] {
        let mut standings = AgentId::BOTH.map(|id| (id, self.score(id)));
        standings.sort_by(|a, b| b.1.cmp(&a.1));
        standings
    }

    pub fn headline(&self) -> String {
        match self.winner() {
            Some(id) => format!("{} Wins!", self.display_name(id)),
            None => "It's a Tie!".to_string(),
        }
    }
}
