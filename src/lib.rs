#![no_std]

// Use std when running tests, see: https://stackoverflow.com/a/28186509
// Make sure to use different target when testing, e.g.
//   cargo test --target x86_64-unknown-linux-gnu
#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "firmware")]
use stm32f0xx_hal as hal;

#[macro_use]
mod logging;

#[cfg(feature = "firmware")]
pub mod bsp;
pub mod config;
pub mod hal_ext;
pub mod keypad;
pub mod utils;
