/// Index of a key in the matrix: `row * ncols + col`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Position(u16);

impl Position {
    /// Encode matrix coordinates for a matrix with `ncols` columns
    pub const fn from_coords((row, col): (u8, u8), ncols: usize) -> Self {
        Self(row as u16 * ncols as u16 + col as u16)
    }

    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Decode (row, col) for a matrix with `ncols` columns
    pub const fn coords(&self, ncols: usize) -> (u8, u8) {
        let ncols = ncols as u16;
        ((self.0 / ncols) as u8, (self.0 % ncols) as u8)
    }
}

/// Debounced key edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Press(Position),
    Release(Position),
}

impl Edge {
    pub const fn position(&self) -> Position {
        match self {
            Self::Press(p) | Self::Release(p) => *p,
        }
    }

    pub const fn is_press(&self) -> bool {
        matches!(self, Self::Press(_))
    }
}

/// Mapping from key position to a character keycode
///
/// Keycodes are stored in position order, so `b"123456789*0#"` describes a
/// classic 4x3 phone keypad. An empty map disables keycode events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMap<'a> {
    keys: &'a [u8],
}

impl<'a> KeyMap<'a> {
    pub const EMPTY: KeyMap<'static> = KeyMap { keys: &[] };

    pub const fn new(keys: &'a [u8]) -> Self {
        Self { keys }
    }

    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Keycode for a position, `None` if not mapped
    pub fn get(&self, position: Position) -> Option<u8> {
        self.keys.get(position.index()).copied()
    }
}
