use chaser::agent::Controller;
use chaser::grid::Grid;
use chaser::powerup::{PowerUp, PowerUpKind};
use chaser::snapshot::{AgentView, MatchResult, RenderSnapshot};
use chaser::types::{AgentId, Cell};
use macroquad::prelude::*;

const BACKGROUND: Color = Color::new(0.08, 0.09, 0.11, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.04);
const HUD_FONT_SIZE: u16 = 20;

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

fn agent_color(agent: &AgentView) -> Color {
    match (agent.id, agent.controller) {
        (_, Controller::Bot) => YELLOW,
        (AgentId::Player1, _) => RED,
        (AgentId::Player2, _) => BLUE,
    }
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Speed => ORANGE,
        PowerUpKind::Freeze => SKYBLUE,
    }
}

fn agent_label(agent: &AgentView) -> &'static str {
    match (agent.id, agent.controller) {
        (_, Controller::Bot) => "Bot",
        (AgentId::Player1, _) => "Player 1",
        (AgentId::Player2, _) => "Player 2",
    }
}

// Draws match snapshots and the overlays around them using macroquad
pub struct Renderer {
    grid: Grid,
    ui_font: Option<Font>,
}

impl Renderer {
    pub fn new(grid: Grid) -> Self {
        Renderer { grid, ui_font: None }
    }

    pub async fn load_ui_font(&mut self) {
        match load_ttf_font("assets/default.ttf").await {
            Ok(font) => self.ui_font = Some(font),
            Err(e) => log::warn!("Failed to load UI font assets/default.ttf: {}", e),
        }
    }

    fn width(&self) -> f32 {
        self.grid.pixel_width() as f32
    }

    fn height(&self) -> f32 {
        self.grid.pixel_height() as f32
    }

    fn text_params(&self, font_size: u16, color: Color) -> TextParams<'_> {
        TextParams {
            font: self.ui_font.as_ref(),
            font_size,
            color,
            ..Default::default()
        }
    }

    fn draw_cell(&self, cell: Cell, color: Color) {
        let p = self.grid.to_pixel(cell);
        let size = self.grid.cell_size as f32;
        draw_rectangle(p.x as f32 + 1.0, p.y as f32 + 1.0, size - 2.0, size - 2.0, color);
    }

    fn draw_background(&self) {
        clear_background(BACKGROUND);
        let size = self.grid.cell_size as f32;
        for col in 1..self.grid.width {
            let x = col as f32 * size;
            draw_line(x, 0.0, x, self.height(), 1.0, GRID_LINE);
        }
        for row in 1..self.grid.height {
            let y = row as f32 * size;
            draw_line(0.0, y, self.width(), y, 1.0, GRID_LINE);
        }
    }

    fn draw_power_up(&self, power_up: &PowerUp) {
        let p = self.grid.to_pixel(power_up.position);
        let size = (power_up.kind.footprint() * self.grid.cell_size) as f32;
        let color = power_up_color(power_up.kind);
        draw_rectangle(p.x as f32, p.y as f32, size, size, faded_color(color, 0.6));
        draw_rectangle_lines(p.x as f32, p.y as f32, size, size, 2.0, color);
    }

    fn draw_agent(&self, agent: &AgentView) {
        let color = if agent.frozen {
            faded_color(agent_color(agent), 0.5)
        } else {
            agent_color(agent)
        };
        let (head, body) = match agent.body.split_last() {
            Some(parts) => parts,
            None => return,
        };
        for cell in body {
            self.draw_cell(*cell, color);
        }
        self.draw_cell(*head, WHITE);

        let p = self.grid.to_pixel(*head);
        if agent.frozen {
            draw_text_ex("FROZEN!", p.x as f32, p.y as f32 - 4.0, self.text_params(16, SKYBLUE));
        } else if agent.is_boosted() {
            draw_text_ex(">>", p.x as f32, p.y as f32 - 4.0, self.text_params(16, ORANGE));
        }
    }

    fn draw_hud(&self, snapshot: &RenderSnapshot, muted: bool) {
        let mut y = HUD_FONT_SIZE as f32 + 4.0;
        for agent in &snapshot.agents {
            let line = format!("{}: {}", agent_label(agent), agent.score);
            draw_text_ex(&line, 8.0, y, self.text_params(HUD_FONT_SIZE, agent_color(agent)));
            y += HUD_FONT_SIZE as f32 + 2.0;
        }

        let time_left = format!("Time Left: {}s", snapshot.remaining.ceil() as u32);
        let dims = measure_text(&time_left, self.ui_font.as_ref(), HUD_FONT_SIZE, 1.0);
        draw_text_ex(
            &time_left,
            self.width() - dims.width - 8.0,
            HUD_FONT_SIZE as f32 + 4.0,
            self.text_params(HUD_FONT_SIZE, WHITE),
        );
        if muted {
            draw_text_ex(
                "Muted",
                self.width() - 60.0,
                2.0 * HUD_FONT_SIZE as f32 + 6.0,
                self.text_params(16, LIGHTGRAY),
            );
        }
    }

    pub fn draw_match(&self, snapshot: &RenderSnapshot, paused: bool, muted: bool) {
        self.draw_background();
        if let Some(food) = snapshot.food {
            self.draw_cell(food, GREEN);
        }
        for power_up in &snapshot.power_ups {
            self.draw_power_up(power_up);
        }
        for agent in &snapshot.agents {
            self.draw_agent(agent);
        }
        self.draw_hud(snapshot, muted);

        if paused {
            self.draw_announcement("Paused", "Press P to resume");
        }
    }

    pub fn draw_preparation(&self, seconds_left: f64, against_bot: bool) {
        self.draw_background();
        let title = format!("Get ready: {}", seconds_left.ceil() as u32);
        let hint = if against_bot {
            "WASD to steer, chase the food. Space to start"
        } else {
            "P1: WASD, P2: arrows. Space to start"
        };
        self.draw_announcement(&title, hint);
    }

    pub fn draw_end(&self, snapshot: &RenderSnapshot, result: &MatchResult) {
        self.draw_match(snapshot, false, false);
        self.draw_announcement(&result.headline(), "Space to play again, ESC to exit");

        let mut y = self.height() / 2.0 + 90.0;
        for (rank, (id, score)) in result.standings().iter().enumerate() {
            let line = format!("{}. {}: {}", rank + 1, result.display_name(*id), score);
            let dims = measure_text(&line, self.ui_font.as_ref(), HUD_FONT_SIZE, 1.0);
            draw_text_ex(
                &line,
                (self.width() - dims.width) / 2.0,
                y,
                self.text_params(HUD_FONT_SIZE, WHITE),
            );
            y += HUD_FONT_SIZE as f32 + 4.0;
        }
    }

    fn draw_announcement(&self, msg: &str, hint: &str) {
        let rect_width = (self.width() - 40.0).min(500.0);
        let rect_height = 120.0;
        let x = (self.width() - rect_width) / 2.0;
        let y = (self.height() - rect_height) / 2.0;
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let font_size = 32.0;
        let dims = measure_text(msg, self.ui_font.as_ref(), font_size as u16, 1.0);
        let text_x = x + (rect_width - dims.width) / 2.0;
        let text_y = y + (rect_height - font_size) / 2.0 + font_size * 0.7;
        draw_text_ex(msg, text_x, text_y, self.text_params(font_size as u16, WHITE));

        let hint_size = 18.0;
        let hint_dims = measure_text(hint, self.ui_font.as_ref(), hint_size as u16, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        draw_text_ex(hint, hint_x, y + rect_height - hint_size - 10.0, self.text_params(hint_size as u16, LIGHTGRAY));
    }
}
