//! Power-up scheduling: spawn gating, pickup detection and timed effects.
//!
//! SPEED boosts whoever touches it for a few seconds and only respawns once
//! nobody holds the boost. FREEZE stops the *other* agent and respawns after
//! a cooldown measured from the last pickup.

use crate::agent::Agent;
use crate::config::{
    FREEZE_COOLDOWN, FREEZE_DURATION, FREEZE_FOOTPRINT, FREEZE_SPAWN_AFTER, POWERUP_SPAWN_PITCH,
    SPEED_EFFECT_DURATION, SPEED_FOOTPRINT, SPEED_MULTIPLIER, SPEED_SPAWN_AFTER,
};
use crate::grid::Grid;
use crate::snapshot::MatchEvent;
use crate::types::{AgentId, Cell};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Speed,
    Freeze,
}

impl PowerUpKind {
    /// Edge length of the square footprint, in cells.
    pub fn footprint(self) -> i32 {
        match self {
            PowerUpKind::Speed => SPEED_FOOTPRINT,
            PowerUpKind::Freeze => FREEZE_FOOTPRINT,
        }
    }
}

/// A power-up lying on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub position: Cell, // Top-left cell of the footprint
    pub active: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, position: Cell) -> Self {
        PowerUp {
            kind,
            position,
            active: true,
        }
    }

    /// Axis-aligned test of `head`'s pixel position against the footprint rectangle.
    pub fn covers(&self, grid: &Grid, head: Cell) -> bool {
        let origin = grid.to_pixel(self.position);
        let point = grid.to_pixel(head);
        let size = self.kind.footprint() * grid.cell_size;
        (origin.x..origin.x + size).contains(&point.x) && (origin.y..origin.y + size).contains(&point.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum SpeedPhase {
    Inactive,
    Spawned(PowerUp),
    Boosting { holder: AgentId, until: f64 },
}

#[derive(Debug, Clone)]
pub struct PowerUpManager {
    speed: SpeedPhase,
    freeze: Option<PowerUp>,
    last_freeze_pickup: Option<f64>,
}

impl Default for PowerUpManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PowerUpManager {
    pub fn new() -> Self {
        PowerUpManager {
            speed: SpeedPhase::Inactive,
            freeze: None,
            last_freeze_pickup: None,
        }
    }

    /// Power-ups currently lying on the grid.
    pub fn spawned(&self) -> Vec<PowerUp> {
        let speed = match self.speed {
            SpeedPhase::Spawned(p) => Some(p),
            _ => None,
        };
        speed.into_iter().chain(self.freeze).collect()
    }

    /// The agent holding the speed boost, and when it runs out.
    pub fn speed_holder(&self) -> Option<(AgentId, f64)> {
        match self.speed {
            SpeedPhase::Boosting { holder, until } => Some((holder, until)),
            _ => None,
        }
    }

    /// Spawns each kind whose gating conditions hold at `now`.
    pub fn update_spawns<R: Rng>(&mut self, now: f64, elapsed: f64, grid: &Grid, rng: &mut R, events: &mut Vec<MatchEvent>) {
        if elapsed > SPEED_SPAWN_AFTER && self.speed == SpeedPhase::Inactive {
            let power_up = PowerUp::new(PowerUpKind::Speed, spawn_position(grid, rng));
            crate::debug_powerup!("Speed spawned at {} (t={:.3})", power_up.position, now);
            self.speed = SpeedPhase::Spawned(power_up);
            events.push(MatchEvent::PowerUpSpawned(power_up));
        }

        let cooled_down = self
            .last_freeze_pickup
            .is_none_or(|t| now - t > FREEZE_COOLDOWN);
        if elapsed > FREEZE_SPAWN_AFTER && self.freeze.is_none() && cooled_down {
            let power_up = PowerUp::new(PowerUpKind::Freeze, spawn_position(grid, rng));
            crate::debug_powerup!("Freeze spawned at {} (t={:.3})", power_up.position, now);
            self.freeze = Some(power_up);
            events.push(MatchEvent::PowerUpSpawned(power_up));
        }
    }

    /// Resolves pickups against each agent's head; Player 1 is checked first.
    pub fn check_pickups(&mut self, now: f64, grid: &Grid, agents: &mut [Agent; 2], events: &mut Vec<MatchEvent>) {
        if let SpeedPhase::Spawned(power_up) = self.speed {
            if let Some(agent) = agents.iter_mut().find(|a| power_up.covers(grid, a.head())) {
                agent.set_speed_multiplier(SPEED_MULTIPLIER);
                self.speed = SpeedPhase::Boosting {
                    holder: agent.id,
                    until: now + SPEED_EFFECT_DURATION,
                };
                crate::debug_powerup!(agent.id, now, "Picked up speed");
                events.push(MatchEvent::SpeedCollected(agent.id));
            }
        }

        if let Some(power_up) = self.freeze {
            if let Some(toucher) = agents
                .iter()
                .find(|a| power_up.covers(grid, a.head()))
                .map(|a| a.id)
            {
                let victim = toucher.other();
                agents[victim.index()].freeze(now, FREEZE_DURATION);
                self.freeze = None;
                self.last_freeze_pickup = Some(now);
                crate::debug_powerup!(toucher, now, "Picked up freeze, {} frozen", victim.tag());
                events.push(MatchEvent::FreezeCollected { by: toucher, frozen: victim });
            }
        }
    }

    /// Ends a speed boost whose time is up.
    pub fn expire_effects(&mut self, now: f64, agents: &mut [Agent; 2], events: &mut Vec<MatchEvent>) {
        if let SpeedPhase::Boosting { holder, until } = self.speed {
            if now >= until {
                agents[holder.index()].set_speed_multiplier(1.0);
                self.speed = SpeedPhase::Inactive;
                crate::debug_powerup!(holder, now, "Speed boost expired");
                events.push(MatchEvent::SpeedExpired(holder));
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, power_up: PowerUp) {
        match power_up.kind {
            PowerUpKind::Speed => self.speed = SpeedPhase::Spawned(power_up),
            PowerUpKind::Freeze => self.freeze = Some(power_up),
        }
    }
}

// Top-left corner on the spawn pitch, never on the first pitch row/column
fn spawn_axis<R: Rng>(cells: i32, rng: &mut R) -> i32 {
    let slots = cells / POWERUP_SPAWN_PITCH;
    if slots > 1 {
        rng.gen_range(1..slots) * POWERUP_SPAWN_PITCH
    } else {
        0
    }
}

fn spawn_position<R: Rng>(grid: &Grid, rng: &mut R) -> Cell {
    Cell::new(spawn_axis(grid.width, rng), spawn_axis(grid.height, rng))
}
