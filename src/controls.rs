use chaser::input::{InputFrame, Intent};
use chaser::types::{AgentId, Direction};
use macroquad::prelude::*;

const PLAYER1_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::W, Direction::Up),
    (KeyCode::S, Direction::Down),
    (KeyCode::A, Direction::Left),
    (KeyCode::D, Direction::Right),
];

const PLAYER2_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::Up, Direction::Up),
    (KeyCode::Down, Direction::Down),
    (KeyCode::Left, Direction::Left),
    (KeyCode::Right, Direction::Right),
];

// Keys pressed this frame, turned into intents for the match
pub fn read_frame() -> InputFrame {
    let mut frame = InputFrame::new();

    for (agent, keys) in [(AgentId::Player1, PLAYER1_KEYS), (AgentId::Player2, PLAYER2_KEYS)] {
        for (key, direction) in keys {
            if is_key_pressed(key) {
                frame.push(Intent::Move { agent, direction });
            }
        }
    }

    push_system_keys(&mut frame);
    frame
}

// While paused the snakes are not steered; only resume, mute and quit count
pub fn read_paused_frame() -> InputFrame {
    let mut frame = InputFrame::new();
    push_system_keys(&mut frame);
    frame
}

fn push_system_keys(frame: &mut InputFrame) {
    if is_key_pressed(KeyCode::M) {
        frame.push(Intent::ToggleMute);
    }
    if is_key_pressed(KeyCode::P) {
        frame.push(Intent::TogglePause);
    }
    if quit_requested() {
        frame.push(Intent::Quit);
    }
}

pub fn quit_requested() -> bool {
    is_key_pressed(KeyCode::Escape) || is_quit_requested()
}

pub fn skip_requested() -> bool {
    is_key_pressed(KeyCode::Space)
}
