//! Matrix keypad
//!
//! Scans a row×column switch matrix, debounces the readings and notifies
//! listeners about key presses and releases. Only a single key at a time is
//! supported; when more keys are closed the whole scan is discarded.
//!
//! The keypad has no notion of time on its own - [`Keypad::tick`] has to be
//! called periodically with a millisecond timestamp, faster than the debounce
//! time.

/// Debouncing and edge detection
pub mod debounce;
/// Key positions and events
pub mod event;
/// Observers of keypad events
pub mod listener;
/// Keyboard matrix scanner
pub mod matrix;
#[cfg(test)]
pub(crate) mod sim;

use crate::hal_ext::pins::MatrixPin;
use debounce::Debouncer;
use listener::Listeners;
use matrix::{Matrix, Scan};

pub use event::{Edge, KeyMap, Position};
pub use listener::{KeypadListener, KeySelector, KeySwitch};

/// Default number of listeners that can be registered
pub const MAX_LISTENERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// No space left for another listener
    TooManyListeners,
}

/// Keypad configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadConfig<'a> {
    /// Matrix has diodes, so rows can be driven all the time
    pub has_diodes: bool,
    /// Time that a key must be read unchanged to be reported as pressed
    pub debounce_ms: u32,
    /// Keycodes for each position, may be empty
    pub keys: KeyMap<'a>,
}

/// Keypad scanner with debouncing and listeners
pub struct Keypad<'a, R, C, const NROWS: usize, const NCOLS: usize, const L: usize = MAX_LISTENERS> {
    matrix: Matrix<R, C, NROWS, NCOLS>,
    debouncer: Debouncer,
    keys: KeyMap<'a>,
    listeners: Listeners<'a, L>,
}

impl<'a, R, C, const NROWS: usize, const NCOLS: usize, const L: usize> Keypad<'a, R, C, NROWS, NCOLS, L>
where
    R: MatrixPin,
    C: MatrixPin,
{
    // Positions must fit in u16 and coordinates in u8
    const VALID_SIZE: () = assert!(
        NROWS > 0 && NCOLS > 0
        && NROWS <= u8::MAX as usize && NCOLS <= u8::MAX as usize
        && NROWS * NCOLS <= u16::MAX as usize
    );

    /// Configure the pins and create the keypad
    pub fn new(rows: [R; NROWS], cols: [C; NCOLS], config: &KeypadConfig<'a>) -> Self {
        let () = Self::VALID_SIZE;

        if !config.keys.is_empty() && config.keys.len() != NROWS * NCOLS {
            warn!("Key map has {=usize} keys but matrix has {=usize} positions",
                config.keys.len(), NROWS * NCOLS);
        }

        Self {
            matrix: Matrix::new(rows, cols, config.has_diodes),
            debouncer: Debouncer::new(config.debounce_ms),
            keys: config.keys,
            listeners: Listeners::new(),
        }
    }

    /// Add a listener; listeners are notified in registration order
    pub fn register_listener(&mut self, listener: &'a dyn KeypadListener) -> Result<(), Error> {
        self.listeners.push(listener)
            .map_err(|_| Error::TooManyListeners)
    }

    /// Scan the matrix, update debouncing state and notify listeners
    ///
    /// Must be called periodically with a millisecond timestamp `now` from a
    /// monotonic clock (which may wrap around). Returns the event that has
    /// been dispatched to listeners, if any.
    pub fn tick(&mut self, now: u32) -> Option<Edge> {
        let scan = self.matrix.scan();
        if scan == Scan::Ambiguous {
            trace!("Multiple keys pressed, ignoring scan");
        }

        let edge = self.debouncer.update(scan, now)?;
        let position = edge.position();
        let (row, col) = self.coords(position);
        let key = self.keys.get(position);

        match edge {
            Edge::Press(_) => {
                debug!("key @ row {=u8}, col {=u8} pressed", row, col);
                if let Some(key) = key {
                    debug!("key '{=char}' pressed", key as char);
                }
            },
            Edge::Release(_) => {
                debug!("key @ row {=u8}, col {=u8} released", row, col);
                if let Some(key) = key {
                    debug!("key '{=char}' released", key as char);
                }
            },
        }

        self.listeners.dispatch(edge, (row, col), key);
        Some(edge)
    }

    /// Key that is currently reported as pressed
    pub fn pressed(&self) -> Option<Position> {
        self.debouncer.pressed()
    }

    /// Matrix coordinates (row, col) of a position
    pub fn coords(&self, position: Position) -> (u8, u8) {
        position.coords(NCOLS)
    }

    /// Keycode of a position, if there is a key map
    pub fn keycode(&self, position: Position) -> Option<u8> {
        self.keys.get(position)
    }

    pub fn keys(&self) -> &KeyMap<'a> {
        &self.keys
    }

    pub fn listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Log keypad configuration
    pub fn dump_config(&self) {
        info!("Keypad:");
        info!(" Rows:");
        for pin in self.matrix.rows().iter() {
            info!("  Pin: {=str}", pin.label());
        }
        info!(" Cols:");
        for pin in self.matrix.cols().iter() {
            info!("  Pin: {=str}", pin.label());
        }
        info!(" Diodes: {=bool}", self.matrix.has_diodes());
        info!(" Debounce: {=u32} ms", self.debouncer.debounce_ms());
        info!(" Keys: {=usize}", self.keys.len());
        if self.listeners.is_empty() {
            warn!("No keypad listeners registered");
        }
    }

    /// Give up the pins
    pub fn release(self) -> ([R; NROWS], [C; NCOLS]) {
        self.matrix.release()
    }
}
