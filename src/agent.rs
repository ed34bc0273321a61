use crate::grid::Grid;
use crate::types::{AgentId, Cell, Direction};
use std::collections::VecDeque;

// Who steers an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controller {
    Human,
    Bot,
}

/// Result of one accepted movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub head: Cell,
    pub ate: bool,
}

// Represents one snake on the grid
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub controller: Controller,
    body: VecDeque<Cell>, // Tail at the front, head at the back
    direction: Direction,
    speed_multiplier: f64,
    frozen_until: Option<f64>,
    last_move_time: Option<f64>, // None until the first step
    pub score: u32,
    pub steps: u32,
}

impl Agent {
    /// Creates a two-cell agent heading in `direction`.
    pub fn new(id: AgentId, controller: Controller, tail: Cell, head: Cell, direction: Direction) -> Self {
        Agent {
            id,
            controller,
            body: VecDeque::from([tail, head]),
            direction,
            speed_multiplier: 1.0,
            frozen_until: None,
            last_move_time: None,
            score: 0,
            steps: 0,
        }
    }

    pub fn head(&self) -> Cell {
        // Body never shrinks below two cells
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_bot(&self) -> bool {
        self.controller == Controller::Bot
    }

    /// Request a new heading. Reversals are ignored; returns whether the heading was accepted.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        debug_assert!(multiplier > 0.0, "speed multiplier must stay positive");
        self.speed_multiplier = multiplier;
    }

    pub fn frozen_until(&self) -> Option<f64> {
        self.frozen_until
    }

    pub fn is_frozen(&self, now: f64) -> bool {
        self.frozen_until.is_some_and(|until| now < until)
    }

    pub fn freeze(&mut self, now: f64, duration: f64) {
        self.frozen_until = Some(now + duration);
    }

    /// Clears an expired freeze. Returns true if the agent thawed on this call.
    pub fn thaw_if_expired(&mut self, now: f64) -> bool {
        match self.frozen_until {
            Some(until) if now >= until => {
                self.frozen_until = None;
                true
            }
            _ => false,
        }
    }

    pub fn last_move_time(&self) -> Option<f64> {
        self.last_move_time
    }

    pub fn effective_interval(&self, base_interval: f64) -> f64 {
        base_interval / self.speed_multiplier
    }

    pub fn ready_to_move(&self, now: f64, base_interval: f64) -> bool {
        if self.is_frozen(now) {
            return false;
        }
        match self.last_move_time {
            Some(last) => now - last > self.effective_interval(base_interval),
            None => true,
        }
    }

    /// Advance one cell if the agent's own cadence allows it.
    /// Eating `food` grows the body by one; otherwise the tail is dropped.
    pub fn advance(&mut self, now: f64, base_interval: f64, grid: &Grid, food: Option<Cell>) -> Option<Step> {
        if !self.ready_to_move(now, base_interval) {
            return None;
        }

        let head = grid.step(self.head(), self.direction);
        self.body.push_back(head);

        let ate = food == Some(head);
        if ate {
            self.score += 1;
        } else {
            self.body.pop_front();
        }

        self.last_move_time = Some(now);
        self.steps += 1;
        Some(Step { head, ate })
    }

    /// Cells another agent's path must avoid: the body minus the tail, which vacates next step.
    pub fn obstacle_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().skip(1).copied()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: f64 = 0.1;
    const FRAME: f64 = 1.0 / 60.0;

    fn grid() -> Grid {
        Grid::new(40, 30, 20)
    }

    fn agent_at(tail: Cell, head: Cell, direction: Direction) -> Agent {
        Agent::new(AgentId::Player1, Controller::Human, tail, head, direction)
    }

    #[test]
    fn test_reversal_rejected() {
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        assert!(!agent.steer(Direction::Left));
        assert_eq!(agent.direction(), Direction::Right);
        assert!(agent.steer(Direction::Up));
        assert_eq!(agent.direction(), Direction::Up);
        // Same direction is not a reversal
        assert!(agent.steer(Direction::Up));
    }

    #[test]
    fn test_reversal_ignored_across_tick() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        agent.steer(Direction::Left);
        let step = agent.advance(0.0, BASE, &g, None).unwrap();
        assert_eq!(step.head, Cell::new(6, 2));
        assert_eq!(agent.direction(), Direction::Right);
    }

    #[test]
    fn test_move_keeps_length() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        let step = agent.advance(0.0, BASE, &g, Some(Cell::new(20, 20))).unwrap();
        assert!(!step.ate);
        assert_eq!(agent.len(), 2);
        assert_eq!(agent.head(), Cell::new(6, 2));
        assert_eq!(agent.tail(), Cell::new(5, 2));
    }

    #[test]
    fn test_grows_on_food() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        let step = agent.advance(0.0, BASE, &g, Some(Cell::new(6, 2))).unwrap();
        assert!(step.ate);
        assert_eq!(agent.len(), 3);
        assert_eq!(agent.score, 1);
        assert_eq!(agent.tail(), Cell::new(4, 2));
        assert_eq!(agent.last_move_time(), Some(0.0));
    }

    #[test]
    fn test_wraps_off_east_edge() {
        let g = grid();
        let mut agent = agent_at(Cell::new(38, 7), Cell::new(39, 7), Direction::Right);
        agent.advance(0.0, BASE, &g, None);
        assert_eq!(agent.head(), Cell::new(0, 7));
        assert!(agent.body().iter().all(|c| g.contains(*c)));
    }

    #[test]
    fn test_cadence_gating() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        assert!(agent.advance(1.0, BASE, &g, None).is_some());
        assert!(agent.advance(1.05, BASE, &g, None).is_none());
        assert!(agent.advance(1.09, BASE, &g, None).is_none());
        assert!(agent.advance(1.11, BASE, &g, None).is_some());
        // Speed boost shortens the interval
        agent.set_speed_multiplier(1.3);
        assert!(agent.advance(1.19, BASE, &g, None).is_some());
    }

    #[test]
    fn test_independent_cadence() {
        let g = grid();
        let mut fast = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        let mut slow = agent_at(Cell::new(4, 9), Cell::new(5, 9), Direction::Right);
        fast.set_speed_multiplier(1.3);

        for frame in 0..=60 {
            let now = frame as f64 * FRAME;
            fast.advance(now, BASE, &g, None);
            slow.advance(now, BASE, &g, None);
        }
        assert!(
            fast.steps > slow.steps,
            "fast={} slow={}",
            fast.steps,
            slow.steps
        );
    }

    #[test]
    fn test_freeze_suppresses_movement() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        let t = 1.0;
        agent.freeze(t, 3.0);

        let mut frame = 0;
        loop {
            let now = t + frame as f64 * FRAME;
            if now >= t + 3.0 {
                break;
            }
            assert!(agent.is_frozen(now));
            assert!(agent.advance(now, BASE, &g, None).is_none(), "moved at {}", now);
            frame += 1;
        }
        assert_eq!(agent.steps, 0);

        // Never moved before, so the first unfrozen tick steps immediately
        assert!(agent.thaw_if_expired(t + 3.0));
        assert!(agent.advance(t + 3.0, BASE, &g, None).is_some());
        assert_eq!(agent.frozen_until(), None);
    }

    #[test]
    fn test_thaw_only_after_deadline() {
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        agent.freeze(10.0, 3.0);
        assert!(!agent.thaw_if_expired(12.9));
        assert!(agent.is_frozen(12.9));
        assert!(agent.thaw_if_expired(13.0));
        assert!(!agent.is_frozen(13.0));
        assert!(!agent.thaw_if_expired(14.0));
    }

    #[test]
    fn test_obstacle_cells_skip_tail() {
        let g = grid();
        let mut agent = agent_at(Cell::new(4, 2), Cell::new(5, 2), Direction::Right);
        agent.advance(0.0, BASE, &g, Some(Cell::new(6, 2)));
        let obstacles: Vec<Cell> = agent.obstacle_cells().collect();
        assert_eq!(obstacles, vec![Cell::new(5, 2), Cell::new(6, 2)]);
    }
}
