use std::collections::HashSet;

use crate::coords::Vector2;

use super::types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState};

/// Per-tick sampled input.
///
/// Events are applied as they arrive; [`step`](Self::step) runs once at the
/// start of each tick and publishes the edge flags gathered since the last
/// step. Edge flags are visible for exactly one tick.
#[derive(Debug)]
pub struct InputState {
    mouse_position: Vector2,
    mouse_down: bool,
    mouse_click: bool,
    keys_down: HashSet<Key>,
    key_press: Option<Key>,
    buttons_down: HashSet<MouseButton>,
    focused: bool,

    pending_click: bool,
    pending_press: Option<Key>,
    // Cleared by any key release; while false only a different key may fire.
    press_armed: bool,
    last_pressed: Option<Key>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_position: Vector2::ORIGIN,
            mouse_down: false,
            mouse_click: false,
            keys_down: HashSet::new(),
            key_press: None,
            buttons_down: HashSet::new(),
            focused: true,
            pending_click: false,
            pending_press: None,
            press_armed: true,
            last_pressed: None,
        }
    }
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::PointerMoved { x, y } => {
                self.mouse_position = Vector2::new(x, y);
            }

            InputEvent::PointerLeft => {}

            InputEvent::PointerButton { button, state } => match state {
                MouseButtonState::Pressed => {
                    self.buttons_down.insert(button);
                    self.mouse_down = true;
                    self.pending_click = true;
                }
                MouseButtonState::Released => {
                    self.buttons_down.remove(&button);
                    self.mouse_down = !self.buttons_down.is_empty();
                }
            },

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    self.keys_down.insert(key);
                    if self.press_armed || self.last_pressed != Some(key) {
                        self.pending_press = Some(key);
                    }
                    self.last_pressed = Some(key);
                    self.press_armed = false;
                }
                KeyState::Released => {
                    self.keys_down.remove(&key);
                    self.press_armed = true;
                }
            },

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                    self.mouse_down = false;
                    self.press_armed = true;
                }
            }
        }
    }

    /// Publishes edges gathered since the previous step and clears the
    /// ones published before.
    pub fn step(&mut self) {
        self.mouse_click = std::mem::take(&mut self.pending_click);
        self.key_press = self.pending_press.take();
    }

    #[inline]
    pub fn mouse_position(&self) -> Vector2 {
        self.mouse_position
    }

    #[inline]
    pub fn mouse_down(&self) -> bool {
        self.mouse_down
    }

    /// True only on the tick a click began.
    #[inline]
    pub fn mouse_click(&self) -> bool {
        self.mouse_click
    }

    pub fn keys_down(&self) -> &HashSet<Key> {
        &self.keys_down
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// The key whose press began on this tick, if any.
    #[inline]
    pub fn key_press(&self) -> Option<Key> {
        self.key_press
    }

    pub fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(k: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key: k, state, repeat: false }
    }

    fn click(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state }
    }

    // ── mouse ─────────────────────────────────────────────────────────────

    #[test]
    fn click_edge_lasts_one_tick() {
        let mut s = InputState::new();
        s.apply_event(&click(MouseButtonState::Pressed));
        assert!(!s.mouse_click(), "edge is published by step");
        s.step();
        assert!(s.mouse_click());
        assert!(s.mouse_down());
        s.step();
        assert!(!s.mouse_click());
        assert!(s.mouse_down(), "held state persists");
        s.apply_event(&click(MouseButtonState::Released));
        assert!(!s.mouse_down());
    }

    #[test]
    fn pointer_position_tracks_moves() {
        let mut s = InputState::new();
        s.apply_event(&InputEvent::PointerMoved { x: 12.0, y: 34.0 });
        assert_eq!(s.mouse_position(), Vector2::new(12.0, 34.0));
    }

    // ── keyboard ──────────────────────────────────────────────────────────

    #[test]
    fn auto_repeat_is_suppressed_for_the_same_key() {
        let a = Key::char('a');
        let mut s = InputState::new();
        s.apply_event(&key(a, KeyState::Pressed));
        s.step();
        assert_eq!(s.key_press(), Some(a));

        s.apply_event(&InputEvent::Key { key: a, state: KeyState::Pressed, repeat: true });
        s.step();
        assert_eq!(s.key_press(), None);
        assert!(s.key_down(a));

        s.apply_event(&key(a, KeyState::Released));
        s.apply_event(&key(a, KeyState::Pressed));
        s.step();
        assert_eq!(s.key_press(), Some(a), "fresh press after release fires");
    }

    #[test]
    fn different_key_fires_while_another_is_held() {
        let (a, b) = (Key::char('a'), Key::char('b'));
        let mut s = InputState::new();
        s.apply_event(&key(a, KeyState::Pressed));
        s.step();
        s.apply_event(&key(b, KeyState::Pressed));
        s.step();
        assert_eq!(s.key_press(), Some(b));
        assert_eq!(s.keys_down().len(), 2);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut s = InputState::new();
        s.apply_event(&key(Key::Space, KeyState::Pressed));
        s.apply_event(&click(MouseButtonState::Pressed));
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.keys_down().is_empty());
        assert!(!s.mouse_down());
    }
}
