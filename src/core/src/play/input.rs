use crate::Coordinate;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Left = 0,
    Right = 2,
}

impl PointerButton {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PointerButton::Left),
            2 => Some(PointerButton::Right),
            _ => None,
        }
    }
}

/// Pointer event in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Coordinate,
    pub button: Option<PointerButton>,
}

impl PointerEvent {
    pub fn new(position: Coordinate, button: Option<PointerButton>) -> Self {
        PointerEvent { position, button }
    }
}

/// Filled by the windowing layer between frames, drained by the actors.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    down: Option<PointerEvent>,
    moved: Option<PointerEvent>,
    up: Option<PointerEvent>,
    keys: BTreeSet<String>,
}

impl InputBuffer {
    pub fn new() -> Self {
        InputBuffer::default()
    }

    pub fn pointer_down(&mut self, position: Coordinate, button: PointerButton) {
        self.down = Some(PointerEvent::new(position, Some(button)));
    }

    pub fn pointer_move(&mut self, position: Coordinate) {
        self.moved = Some(PointerEvent::new(position, None));
    }

    pub fn pointer_up(&mut self, position: Coordinate, button: PointerButton) {
        self.up = Some(PointerEvent::new(position, Some(button)));
    }

    pub fn press_key(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn take_down(&mut self) -> Option<PointerEvent> {
        self.down.take()
    }

    pub fn take_move(&mut self) -> Option<PointerEvent> {
        self.moved.take()
    }

    pub fn take_up(&mut self) -> Option<PointerEvent> {
        self.up.take()
    }

    /// Distinct keys pressed since the last `clear_keys`.
    pub fn pressed_keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    #[inline]
    pub fn is_pressed(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_codes() {
        assert_eq!(PointerButton::from_code(0), Some(PointerButton::Left));
        assert_eq!(PointerButton::from_code(2), Some(PointerButton::Right));
        assert_eq!(PointerButton::from_code(1), None);
        assert_eq!(PointerButton::Right as u8, 2);
    }

    #[test]
    fn test_events_are_taken_once() {
        let mut input = InputBuffer::new();
        input.pointer_down(Coordinate::new(1.0, 1.0), PointerButton::Left);
        input.pointer_move(Coordinate::new(2.0, 2.0));
        input.pointer_move(Coordinate::new(3.0, 3.0));

        assert_eq!(input.take_down().map(|e| e.button), Some(Some(PointerButton::Left)));
        assert_eq!(input.take_down(), None);
        assert_eq!(input.take_move().map(|e| e.position), Some(Coordinate::new(3.0, 3.0)));
        assert_eq!(input.take_up(), None);
    }

    #[test]
    fn test_keys_are_distinct_until_cleared() {
        let mut input = InputBuffer::new();
        input.press_key("2");
        input.press_key("2");
        input.press_key("Delete");

        assert_eq!(input.pressed_keys().count(), 2);
        assert!(input.is_pressed("Delete"));

        input.clear_keys();
        assert_eq!(input.pressed_keys().count(), 0);
    }
}
