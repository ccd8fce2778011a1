use core::cell::Cell;

use heapless::Vec;

use super::event::Edge;

/// Observer of debounced keypad events
///
/// All methods have empty default implementations, so a listener only needs
/// to implement the events it is interested in. Keycode events are only
/// delivered when the keypad has a key map.
pub trait KeypadListener {
    fn button_pressed(&self, _row: u8, _col: u8) {}
    fn button_released(&self, _row: u8, _col: u8) {}
    fn key_pressed(&self, _key: u8) {}
    fn key_released(&self, _key: u8) {}
}

/// Fixed capacity list of listeners, notified in registration order
pub struct Listeners<'a, const N: usize> {
    list: Vec<&'a dyn KeypadListener, N>,
}

impl<'a, const N: usize> Listeners<'a, N> {
    pub const fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Append a listener, gives it back if there is no space left
    pub fn push(&mut self, listener: &'a dyn KeypadListener) -> Result<(), &'a dyn KeypadListener> {
        self.list.push(listener)
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Notify all listeners about an edge at given coordinates
    ///
    /// Position based callbacks are called first for all listeners, then the
    /// keycode based ones if the key has a keycode.
    pub fn dispatch(&self, edge: Edge, (row, col): (u8, u8), key: Option<u8>) {
        for listener in self.list.iter() {
            match edge {
                Edge::Press(_) => listener.button_pressed(row, col),
                Edge::Release(_) => listener.button_released(row, col),
            }
        }
        if let Some(key) = key {
            for listener in self.list.iter() {
                match edge {
                    Edge::Press(_) => listener.key_pressed(key),
                    Edge::Release(_) => listener.key_released(key),
                }
            }
        }
    }
}

impl<'a, const N: usize> Default for Listeners<'a, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Selects the key observed by a [`KeySwitch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeySelector {
    /// Key at matrix coordinates (row, col)
    Coords(u8, u8),
    /// Key with given keycode (requires a key map)
    Keycode(u8),
}

/// Listener that tracks whether a single key is held
///
/// Behaves like a binary sensor bound to one key of the keypad.
pub struct KeySwitch {
    selector: KeySelector,
    pressed: Cell<bool>,
}

impl KeySwitch {
    pub const fn new(selector: KeySelector) -> Self {
        Self { selector, pressed: Cell::new(false) }
    }

    /// Track the key at given matrix coordinates
    pub const fn at(row: u8, col: u8) -> Self {
        Self::new(KeySelector::Coords(row, col))
    }

    /// Track the key with given keycode
    pub const fn key(key: u8) -> Self {
        Self::new(KeySelector::Keycode(key))
    }

    pub fn selector(&self) -> KeySelector {
        self.selector
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    fn on_coords(&self, row: u8, col: u8, pressed: bool) {
        if self.selector == KeySelector::Coords(row, col) {
            self.pressed.set(pressed);
        }
    }

    fn on_key(&self, key: u8, pressed: bool) {
        if self.selector == KeySelector::Keycode(key) {
            self.pressed.set(pressed);
        }
    }
}

impl KeypadListener for KeySwitch {
    fn button_pressed(&self, row: u8, col: u8) {
        self.on_coords(row, col, true);
    }

    fn button_released(&self, row: u8, col: u8) {
        self.on_coords(row, col, false);
    }

    fn key_pressed(&self, key: u8) {
        self.on_key(key, true);
    }

    fn key_released(&self, key: u8) {
        self.on_key(key, false);
    }
}
