/// One of the five tracked movement keys.
///
/// The desktop app maps host key codes onto this vocabulary; anything it
/// cannot map is dropped before reaching the input state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Advance along the heading.
    Forward,
    /// Retreat against the heading.
    Backward,
    /// Decrease the heading angle.
    TurnLeft,
    /// Increase the heading angle.
    TurnRight,
    /// Speed modifier: doubles the per-frame displacement while held.
    Boost,
}

/// Pressed/released state for the five tracked keys.
///
/// Written by key events, read once per frame by the player update. Writes
/// and reads never interleave within a frame; the frame callback is the only
/// reader.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    forward: bool,
    backward: bool,
    turn_left: bool,
    turn_right: bool,
    boost: bool,
}

impl InputState {
    /// All keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transition a key to pressed. Pressing an already-pressed key is a no-op.
    pub fn press(&mut self, key: Key) {
        let flag = self.flag_mut(key);
        if !*flag {
            *flag = true;
            tracing::debug!(?key, "key pressed");
        }
    }

    /// Transition a key to released. Releasing a released key is a no-op.
    pub fn release(&mut self, key: Key) {
        let flag = self.flag_mut(key);
        if *flag {
            *flag = false;
            tracing::debug!(?key, "key released");
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        match key {
            Key::Forward => self.forward,
            Key::Backward => self.backward,
            Key::TurnLeft => self.turn_left,
            Key::TurnRight => self.turn_right,
            Key::Boost => self.boost,
        }
    }

    fn flag_mut(&mut self, key: Key) -> &mut bool {
        match key {
            Key::Forward => &mut self.forward,
            Key::Backward => &mut self.backward,
            Key::TurnLeft => &mut self.turn_left,
            Key::TurnRight => &mut self.turn_right,
            Key::Boost => &mut self.boost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KEYS: [Key; 5] = [
        Key::Forward,
        Key::Backward,
        Key::TurnLeft,
        Key::TurnRight,
        Key::Boost,
    ];

    #[test]
    fn starts_all_released() {
        let input = InputState::new();
        for key in ALL_KEYS {
            assert!(!input.is_pressed(key));
        }
    }

    #[test]
    fn press_then_release_round_trip() {
        let mut input = InputState::new();
        for key in ALL_KEYS {
            input.press(key);
            assert!(input.is_pressed(key));
            input.release(key);
            assert!(!input.is_pressed(key));
        }
    }

    #[test]
    fn release_of_never_pressed_key_changes_nothing() {
        let mut input = InputState::new();
        input.release(Key::Forward);
        assert_eq!(input, InputState::new());
    }

    #[test]
    fn repeated_press_is_idempotent() {
        let mut input = InputState::new();
        input.press(Key::Boost);
        let snapshot = input;
        input.press(Key::Boost);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn keys_are_independent() {
        let mut input = InputState::new();
        input.press(Key::Forward);
        input.press(Key::TurnLeft);
        input.release(Key::Forward);
        assert!(!input.is_pressed(Key::Forward));
        assert!(input.is_pressed(Key::TurnLeft));
    }
}
