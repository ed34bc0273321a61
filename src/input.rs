use crate::types::{AgentId, Direction};

/// A discrete request from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Move { agent: AgentId, direction: Direction },
    Quit,
    ToggleMute,
    TogglePause,
}

/// Intents gathered during one frame, applied in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFrame {
    intents: Vec<Intent>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    pub fn with(mut self, intent: Intent) -> Self {
        self.push(intent);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    pub fn quit_requested(&self) -> bool {
        self.intents.contains(&Intent::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_keeps_order() {
        let frame = InputFrame::new()
            .with(Intent::Move {
                agent: AgentId::Player1,
                direction: Direction::Up,
            })
            .with(Intent::ToggleMute);
        let intents: Vec<_> = frame.iter().copied().collect();
        assert_eq!(intents.len(), 2);
        assert_eq!(intents[1], Intent::ToggleMute);
        assert!(!frame.quit_requested());
        assert!(frame.with(Intent::Quit).quit_requested());
    }
}
