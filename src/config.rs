//! Keypad configuration
//!
//! Uses the built-in configuration unless the `json-config` feature is enabled,
//! in which case the configuration is generated from JSON by the build script.

#[cfg(feature = "json-config")]
pub use generated::{CONFIG, NCOLS, NROWS};

#[cfg(not(feature = "json-config"))]
pub use code::{CONFIG, NCOLS, NROWS};

#[cfg(feature = "json-config")]
mod generated {
    include!(concat!(env!("OUT_DIR"), "/config.rs"));
}

#[cfg(not(feature = "json-config"))]
mod code {
    use static_assertions as sa;

    use crate::keypad::{KeyMap, KeypadConfig};

    pub const NROWS: usize = 4;
    pub const NCOLS: usize = 3;

    // Classic phone keypad
    const KEYS: &[u8] = b"123456789*0#";
    sa::const_assert_eq!(KEYS.len(), NROWS * NCOLS);

    pub static CONFIG: KeypadConfig<'static> = KeypadConfig {
        has_diodes: false,
        debounce_ms: 50,
        keys: KeyMap::new(KEYS),
    };
}
