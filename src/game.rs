use crate::agent::{Agent, Controller};
use crate::bot::BotController;
use crate::clock::MatchClock;
use crate::config::MatchConfig;
use crate::error::ConfigError;
use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::input::{InputFrame, Intent};
use crate::pathfinder::Pathfinder;
use crate::powerup::PowerUpManager;
use crate::snapshot::{AgentView, EndReason, MatchEvent, MatchResult, RenderSnapshot};
use crate::types::{AgentId, Cell, Direction};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What one tick produced.
#[derive(Debug, Clone)]
pub struct TickOutcome {
    pub snapshot: RenderSnapshot,
    pub events: Vec<MatchEvent>,
    /// Set on the tick the match ends and on every tick after it.
    pub result: Option<MatchResult>,
}

/// The MatchLoop owns every piece of match state and advances it one tick at a time.
pub struct MatchLoop {
    config: MatchConfig,
    grid: Grid,
    clock: MatchClock,
    agents: [Agent; 2],
    food: FoodSpawner,
    power_ups: PowerUpManager,
    bot: Option<BotController>,
    rng: StdRng,
    result: Option<MatchResult>,
}

impl MatchLoop {
    /// Start a match at `start_time` (seconds on the caller's clock).
    pub fn new(config: MatchConfig, start_time: f64) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width, config.grid_height, config.cell_size);
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let agents = Self::starting_agents(&grid, config.bot_enabled);
        let occupied: Vec<Cell> = agents.iter().flat_map(|a| a.body().iter().copied()).collect();
        let food = FoodSpawner::new(&mut rng, &grid, &occupied);

        let bot = config
            .bot_enabled
            .then(|| BotController::new(Pathfinder::new(grid), config.bot_decision_interval));

        info!(
            "Match started: {}x{} grid, {:.0}s, {}",
            grid.width,
            grid.height,
            config.duration_secs,
            if config.bot_enabled { "player vs bot" } else { "player vs player" }
        );

        Ok(MatchLoop {
            clock: MatchClock::new(start_time, config.duration_secs),
            config,
            grid,
            agents,
            food,
            power_ups: PowerUpManager::new(),
            bot,
            rng,
            result: None,
        })
    }

    // Player 1 starts near the top-left heading right; Player 2 mirrors it
    fn starting_agents(grid: &Grid, bot_enabled: bool) -> [Agent; 2] {
        let col = grid.width / 8;
        let row = grid.height / 10;
        let p1 = Agent::new(
            AgentId::Player1,
            Controller::Human,
            Cell::new(col, row),
            Cell::new(col + 1, row),
            Direction::Right,
        );
        let p2_head = Cell::new(grid.width - 2 - col, grid.height - 1 - row);
        let p2 = Agent::new(
            AgentId::Player2,
            if bot_enabled { Controller::Bot } else { Controller::Human },
            p2_head.offset(Direction::Right),
            p2_head,
            Direction::Left,
        );
        [p1, p2]
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn bot_agent(&self) -> Option<AgentId> {
        self.agents.iter().find(|a| a.is_bot()).map(|a| a.id)
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    /// Advance the match to `now`. `now` is read once by the caller and used for
    /// every decision in the tick.
    pub fn tick(&mut self, now: f64, input: &InputFrame) -> TickOutcome {
        let mut events = Vec::new();

        if self.result.is_some() {
            return self.outcome(now, events);
        }

        if input.quit_requested() {
            crate::debug_match!("Quit requested at t={:.3}", now);
            self.finish(now, EndReason::Quit);
            return self.outcome(now, events);
        }
        self.apply_input(input, &mut events);

        self.update_bot(now);

        for agent in self.agents.iter_mut() {
            if agent.thaw_if_expired(now) {
                crate::debug_agent!(agent.id, now, "Thawed");
                events.push(MatchEvent::Thawed(agent.id));
            }
        }

        self.move_agents(now, &mut events);

        let occupied = self.occupied_cells();
        if let Some(cell) = self.food.respawn_if_consumed(&mut self.rng, &self.grid, &occupied) {
            events.push(MatchEvent::FoodSpawned(cell));
        }

        let elapsed = self.clock.elapsed(now);
        self.power_ups
            .update_spawns(now, elapsed, &self.grid, &mut self.rng, &mut events);
        self.power_ups
            .check_pickups(now, &self.grid, &mut self.agents, &mut events);
        self.power_ups
            .expire_effects(now, &mut self.agents, &mut events);

        if self.clock.is_over(now) {
            crate::debug_match!("Time up at t={:.3}", now);
            self.finish(now, EndReason::TimeUp);
        }

        self.outcome(now, events)
    }

    fn apply_input(&mut self, input: &InputFrame, events: &mut Vec<MatchEvent>) {
        for intent in input.iter() {
            match *intent {
                Intent::Move { agent, direction } => {
                    let agent = &mut self.agents[agent.index()];
                    // The bot ignores the keyboard
                    if agent.controller == Controller::Human {
                        agent.steer(direction);
                    }
                }
                // Handled before any input is applied
                Intent::Quit => {}
                Intent::ToggleMute => events.push(MatchEvent::MuteToggled),
                Intent::TogglePause => events.push(MatchEvent::PauseToggled),
            }
        }
    }

    fn update_bot(&mut self, now: f64) {
        let Some(bot) = self.bot.as_mut() else {
            return;
        };
        let Some(bot_id) = self.agents.iter().find(|a| a.is_bot()).map(|a| a.id) else {
            return;
        };
        // Planning targets the food cell even while it waits to respawn
        let food = self.food.cell();
        let [p1, p2] = &mut self.agents;
        let (me, opponent) = match bot_id {
            AgentId::Player1 => (p1, &*p2),
            AgentId::Player2 => (p2, &*p1),
        };
        if let Some(direction) = bot.update(now, me, opponent, food, &mut self.rng) {
            crate::debug_bot!(bot_id, now, "Heading {:?} towards food at {}", direction, food);
        }
    }

    fn move_agents(&mut self, now: f64, events: &mut Vec<MatchEvent>) {
        let base = self.config.base_move_interval;
        for agent in self.agents.iter_mut() {
            let Some(step) = agent.advance(now, base, &self.grid, self.food.edible()) else {
                continue;
            };
            if step.ate {
                self.food.consume();
                crate::debug_agent!(agent.id, now, "Ate food at {}, score {}", step.head, agent.score);
                events.push(MatchEvent::FoodEaten {
                    by: agent.id,
                    at: step.head,
                });
            }
        }
    }

    fn occupied_cells(&self) -> Vec<Cell> {
        self.agents
            .iter()
            .flat_map(|a| a.body().iter().copied())
            .collect()
    }

    fn finish(&mut self, now: f64, end_reason: EndReason) {
        let result = MatchResult {
            scores: [self.agents[0].score, self.agents[1].score],
            bot: self.bot_agent(),
            end_reason,
            elapsed: self.clock.elapsed(now).min(self.clock.duration),
        };
        info!(
            "Match over ({:?}): Player 1 {} - {} {}",
            end_reason,
            result.scores[0],
            result.scores[1],
            result.display_name(AgentId::Player2)
        );
        self.result = Some(result);
    }

    pub fn snapshot(&self, now: f64) -> RenderSnapshot {
        RenderSnapshot {
            agents: [
                AgentView::capture(&self.agents[0], now),
                AgentView::capture(&self.agents[1], now),
            ],
            food: self.food.edible(),
            power_ups: self.power_ups.spawned(),
            elapsed: self.clock.elapsed(now).min(self.clock.duration),
            remaining: self.clock.remaining(now),
            duration: self.clock.duration,
        }
    }

    fn outcome(&self, now: f64, events: Vec<MatchEvent>) -> TickOutcome {
        TickOutcome {
            snapshot: self.snapshot(now),
            events,
            result: self.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerup::{PowerUp, PowerUpKind};
    use assert_approx_eq::assert_approx_eq;

    const FRAME: f64 = 1.0 / 60.0;

    fn pvp(duration: f64) -> MatchLoop {
        let config = MatchConfig::default()
            .with_duration(duration)
            .with_bot(false)
            .with_seed(17);
        MatchLoop::new(config, 0.0).unwrap()
    }

    // Food on a row neither agent travels, so nothing is ever eaten
    fn park_food(game: &mut MatchLoop) {
        game.food.place(Cell::new(20, 15));
    }

    fn run_until(game: &mut MatchLoop, from_frame: u32, until: f64) -> (u32, Option<MatchResult>) {
        let mut frame = from_frame;
        loop {
            let now = frame as f64 * FRAME;
            let outcome = game.tick(now, &InputFrame::new());
            frame += 1;
            if outcome.result.is_some() || now >= until {
                return (frame, outcome.result);
            }
        }
    }

    #[test]
    fn test_starting_layout() {
        let game = pvp(60.0);
        let p1 = game.agent(AgentId::Player1);
        let p2 = game.agent(AgentId::Player2);
        assert_eq!(p1.head(), Cell::new(6, 3));
        assert_eq!(p1.tail(), Cell::new(5, 3));
        assert_eq!(p1.direction(), Direction::Right);
        assert_eq!(p2.head(), Cell::new(33, 26));
        assert_eq!(p2.tail(), Cell::new(34, 26));
        assert_eq!(p2.direction(), Direction::Left);
        assert_eq!(game.bot_agent(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchConfig::default().with_duration(-1.0);
        assert!(matches!(
            MatchLoop::new(config, 0.0),
            Err(ConfigError::NonPositiveDuration(_))
        ));
    }

    #[test]
    fn test_match_ends_after_duration() {
        let mut game = pvp(5.0);
        park_food(&mut game);
        let (_, result) = run_until(&mut game, 0, 10.0);
        let result = result.unwrap();
        assert_eq!(result.scores, [0, 0]);
        assert_eq!(result.end_reason, EndReason::TimeUp);
        assert_eq!(result.bot, None);
        assert_approx_eq!(result.elapsed, 5.0);
        assert!(game.is_finished());
    }

    #[test]
    fn test_no_mutation_after_end() {
        let mut game = pvp(1.0);
        park_food(&mut game);
        run_until(&mut game, 0, 5.0);
        let before = game.snapshot(2.0);
        let outcome = game.tick(2.0, &InputFrame::new().with(Intent::Move {
            agent: AgentId::Player1,
            direction: Direction::Up,
        }));
        assert_eq!(outcome.snapshot.agents, before.agents);
        assert!(outcome.events.is_empty());
        assert!(outcome.result.is_some());
    }

    #[test]
    fn test_quit_ends_immediately() {
        let mut game = pvp(60.0);
        let head = game.agent(AgentId::Player1).head();
        let outcome = game.tick(0.5, &InputFrame::new().with(Intent::Quit));
        let result = outcome.result.unwrap();
        assert_eq!(result.end_reason, EndReason::Quit);
        // Quit lands before any movement in that tick
        assert_eq!(game.agent(AgentId::Player1).head(), head);
    }

    #[test]
    fn test_quit_discards_earlier_intents() {
        let mut game = pvp(60.0);
        let input = InputFrame::new()
            .with(Intent::Move {
                agent: AgentId::Player1,
                direction: Direction::Down,
            })
            .with(Intent::ToggleMute)
            .with(Intent::Quit);
        let outcome = game.tick(0.0, &input);
        assert_eq!(outcome.result.unwrap().end_reason, EndReason::Quit);
        assert!(outcome.events.is_empty());
        assert_eq!(game.agent(AgentId::Player1).direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_input_ignored() {
        let mut game = pvp(60.0);
        park_food(&mut game);
        let input = InputFrame::new().with(Intent::Move {
            agent: AgentId::Player1,
            direction: Direction::Left,
        });
        game.tick(0.0, &input);
        assert_eq!(game.agent(AgentId::Player1).direction(), Direction::Right);
        assert_eq!(game.agent(AgentId::Player1).head(), Cell::new(7, 3));
    }

    #[test]
    fn test_eating_grows_and_respawns() {
        let mut game = pvp(60.0);
        game.food.place(Cell::new(7, 3));
        let outcome = game.tick(0.0, &InputFrame::new());

        let p1 = game.agent(AgentId::Player1);
        assert_eq!(p1.len(), 3);
        assert_eq!(p1.score, 1);
        assert!(outcome.events.contains(&MatchEvent::FoodEaten {
            by: AgentId::Player1,
            at: Cell::new(7, 3)
        }));
        // Respawned in the same tick, somewhere free
        let food = outcome.snapshot.food.unwrap();
        assert!(!game.agent(AgentId::Player1).occupies(food));
        assert_eq!(game.agent(AgentId::Player2).len(), 2);
    }

    #[test]
    fn test_bot_ignores_keyboard_and_chases_food() {
        let config = MatchConfig::default().with_seed(3);
        let mut game = MatchLoop::new(config, 0.0).unwrap();
        assert_eq!(game.bot_agent(), Some(AgentId::Player2));
        game.food.place(Cell::new(33, 20));

        let input = InputFrame::new().with(Intent::Move {
            agent: AgentId::Player2,
            direction: Direction::Down,
        });
        game.tick(0.0, &input);
        // Path to food above the bot wins over the keyboard request
        assert_eq!(game.agent(AgentId::Player2).direction(), Direction::Up);

        run_until(&mut game, 1, 1.0);
        assert!(game.agent(AgentId::Player2).score >= 1);
    }

    #[test]
    fn test_speed_pickup_through_tick() {
        let mut game = pvp(60.0);
        park_food(&mut game);
        // P1 head reaches (7, 3) on the first step
        game.power_ups
            .place(PowerUp::new(PowerUpKind::Speed, Cell::new(7, 2)));
        let outcome = game.tick(12.0, &InputFrame::new());
        assert!(outcome.events.contains(&MatchEvent::SpeedCollected(AgentId::Player1)));
        assert_approx_eq!(outcome.snapshot.agent(AgentId::Player1).speed_multiplier, 1.3);

        game.tick(16.99, &InputFrame::new());
        assert_approx_eq!(game.agent(AgentId::Player1).speed_multiplier(), 1.3);
        game.tick(17.0001, &InputFrame::new());
        assert_approx_eq!(game.agent(AgentId::Player1).speed_multiplier(), 1.0);
    }

    #[test]
    fn test_freeze_pickup_through_tick() {
        let mut game = pvp(60.0);
        park_food(&mut game);
        game.power_ups
            .place(PowerUp::new(PowerUpKind::Freeze, Cell::new(7, 2)));
        let outcome = game.tick(20.0, &InputFrame::new());
        assert!(outcome.snapshot.agent(AgentId::Player2).frozen);

        let p2_steps = game.agent(AgentId::Player2).steps;
        let p1_steps = game.agent(AgentId::Player1).steps;
        let mut frame = 1;
        loop {
            let now = 20.0 + frame as f64 * FRAME;
            if now >= 23.0 {
                break;
            }
            game.tick(now, &InputFrame::new());
            frame += 1;
        }
        assert_eq!(game.agent(AgentId::Player2).steps, p2_steps);
        assert!(game.agent(AgentId::Player1).steps > p1_steps);

        let outcome = game.tick(23.0, &InputFrame::new());
        assert!(outcome.events.contains(&MatchEvent::Thawed(AgentId::Player2)));
        assert_eq!(game.agent(AgentId::Player2).steps, p2_steps + 1);
    }

    #[test]
    fn test_mute_and_pause_forwarded() {
        let mut game = pvp(60.0);
        let input = InputFrame::new()
            .with(Intent::ToggleMute)
            .with(Intent::TogglePause);
        let outcome = game.tick(0.0, &input);
        assert!(outcome.events.contains(&MatchEvent::MuteToggled));
        assert!(outcome.events.contains(&MatchEvent::PauseToggled));
        assert!(outcome.result.is_none());
    }

    #[test]
    fn test_snapshot_times() {
        let mut game = pvp(60.0);
        let outcome = game.tick(12.5, &InputFrame::new());
        assert_approx_eq!(outcome.snapshot.elapsed, 12.5);
        assert_approx_eq!(outcome.snapshot.remaining, 47.5);
        assert_approx_eq!(outcome.snapshot.duration, 60.0);
    }
}
