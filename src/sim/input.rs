//! Player input: held movement keys and one-shot actions

use serde::{Deserialize, Serialize};

use super::fsm::apply_action;
use super::state::{Difficulty, GameState, Phase, Side};

/// Level state of the four movement keys, read once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputLatch {
    /// Arrow up (right paddle)
    pub up: bool,
    /// Arrow down (right paddle)
    pub down: bool,
    /// W (left paddle)
    pub w: bool,
    /// S (left paddle)
    pub s: bool,
}

impl InputLatch {
    /// Vertical direction requested for a side: -1 up, 0 none, +1 down
    pub fn direction(&self, side: Side) -> f32 {
        let (up, down) = match side {
            Side::Left => (self.w, self.s),
            Side::Right => (self.up, self.down),
        };
        (if up { -1.0 } else { 0.0 }) + (if down { 1.0 } else { 0.0 })
    }

    pub fn release_all(&mut self) {
        *self = Self::default();
    }
}

/// One-shot commands, applied immediately on receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SelectPlayers(u8),
    SelectDifficulty(Difficulty),
    TogglePause,
    Reset,
    /// Serve toward a random side
    Serve,
    ToggleCpuSide,
}

/// Physical keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    W,
    S,
    P,
    Escape,
    R,
    Digit1,
    Digit2,
    E,
    M,
    H,
    Space,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a game key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "Escape" => Some(Key::Escape),
            " " | "Space" => Some(Key::Space),
            "1" => Some(Key::Digit1),
            "2" => Some(Key::Digit2),
            _ => match name.to_lowercase().as_str() {
                "w" => Some(Key::W),
                "s" => Some(Key::S),
                "p" => Some(Key::P),
                "r" => Some(Key::R),
                "e" => Some(Key::E),
                "m" => Some(Key::M),
                "h" => Some(Key::H),
                _ => None,
            },
        }
    }
}

/// Route a key press: menu keys while a menu is up, otherwise movement and actions
///
/// Returns true if the press changed anything.
pub fn key_down(state: &mut GameState, key: Key) -> bool {
    match state.phase {
        Phase::SelectingPlayers => {
            return match key {
                Key::Digit1 => apply_action(state, Action::SelectPlayers(1)),
                Key::Digit2 => apply_action(state, Action::SelectPlayers(2)),
                _ => false,
            };
        }
        Phase::SelectingDifficulty => {
            return match key {
                Key::E => apply_action(state, Action::SelectDifficulty(Difficulty::Easy)),
                Key::M => apply_action(state, Action::SelectDifficulty(Difficulty::Medium)),
                Key::H => apply_action(state, Action::SelectDifficulty(Difficulty::Hard)),
                _ => false,
            };
        }
        Phase::Active { .. } | Phase::Won { .. } => {}
    }

    match key {
        Key::ArrowUp => latch(&mut state.input.up),
        Key::ArrowDown => latch(&mut state.input.down),
        Key::W => latch(&mut state.input.w),
        Key::S => latch(&mut state.input.s),
        Key::P | Key::Escape => apply_action(state, Action::TogglePause),
        Key::R => apply_action(state, Action::Reset),
        Key::Digit1 => apply_action(state, Action::ToggleCpuSide),
        Key::Space => apply_action(state, Action::Serve),
        Key::Digit2 | Key::E | Key::M | Key::H => false,
    }
}

/// Release a movement key (always honoured, even in menus)
pub fn key_up(state: &mut GameState, key: Key) {
    match key {
        Key::ArrowUp => state.input.up = false,
        Key::ArrowDown => state.input.down = false,
        Key::W => state.input.w = false,
        Key::S => state.input.s = false,
        _ => {}
    }
}

fn latch(flag: &mut bool) -> bool {
    let changed = !*flag;
    *flag = true;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    fn active_state() -> GameState {
        let mut state = GameState::new(Settings::default(), 7);
        key_down(&mut state, Key::Digit2);
        state
    }

    #[test]
    fn test_direction() {
        let latch = InputLatch {
            up: true,
            s: true,
            ..Default::default()
        };
        assert_eq!(latch.direction(Side::Right), -1.0);
        assert_eq!(latch.direction(Side::Left), 1.0);

        let both = InputLatch {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(both.direction(Side::Right), 0.0);
    }

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("ArrowUp"), Some(Key::ArrowUp));
        assert_eq!(Key::from_name("W"), Some(Key::W));
        assert_eq!(Key::from_name("w"), Some(Key::W));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("x"), None);
    }

    #[test]
    fn test_menu_ignores_gameplay_keys() {
        let mut state = GameState::new(Settings::default(), 7);
        assert!(!key_down(&mut state, Key::W));
        assert!(!key_down(&mut state, Key::Space));
        assert!(!state.input.w);
        assert_eq!(state.phase, Phase::SelectingPlayers);

        assert!(key_down(&mut state, Key::Digit1));
        assert_eq!(state.phase, Phase::SelectingDifficulty);

        // Player keys are ignored while choosing difficulty
        assert!(!key_down(&mut state, Key::Digit2));
        assert!(key_down(&mut state, Key::H));
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.phase, Phase::Active { paused: false });
    }

    #[test]
    fn test_movement_keys_latch_and_release() {
        let mut state = active_state();
        assert!(key_down(&mut state, Key::ArrowUp));
        // Repeated key-down is not a change
        assert!(!key_down(&mut state, Key::ArrowUp));
        assert!(state.input.up);
        key_up(&mut state, Key::ArrowUp);
        assert!(!state.input.up);
    }

    #[test]
    fn test_action_keys() {
        let mut state = active_state();
        assert!(key_down(&mut state, Key::Space));
        assert!(state.ball.in_play);

        assert!(key_down(&mut state, Key::Escape));
        assert!(state.is_paused());
        assert!(key_down(&mut state, Key::P));
        assert!(!state.is_paused());

        assert!(key_down(&mut state, Key::R));
        assert_eq!(state.phase, Phase::SelectingPlayers);
    }
}
