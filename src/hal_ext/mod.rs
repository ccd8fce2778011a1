//! Hardware Abstraction Layer
//!
//! This module is an extension to `embedded-hal` that covers GPIO capabilities
//! needed by the keypad scanner - mainly pins with switchable direction.

pub mod pins;
