//! Board support package
//!
//! Keypad wiring of the STM32F072 board. Rows use open-drain outputs so that
//! they can be released (high impedance) when there are no diodes in the
//! matrix; columns are inputs with internal pull-ups.

use crate::hal::gpio::{self, gpioa, gpiob, gpioc};
use crate::hal_ext::pins::{OpenDrain, PullUpInput};
use crate::config::{NCOLS, NROWS};

// Board wiring below has fixed pin counts, the keypad config must match
const _: () = assert!(
    NROWS == 4 && NCOLS == 3,
    "Board is wired for a 4x3 keypad, configure rows = 4 and columns = 3",
);

pub type RowPin = OpenDrain<gpio::Pin<gpio::Output<gpio::OpenDrain>>>;
pub type ColPin = PullUpInput<gpio::Pin<gpio::Input<gpio::PullUp>>>;

/// Configure keypad pins
///
/// The number of pins must match the compiled-in configuration.
pub fn keypad_pins(
    gpioa: gpioa::Parts,
    gpiob: gpiob::Parts,
    gpioc: gpioc::Parts,
) -> ([RowPin; NROWS], [ColPin; NCOLS]) {
    cortex_m::interrupt::free(|cs| {
        let rows = [
            RowPin::new(gpiob.pb6.into_open_drain_output(cs).downgrade(), "PB6"),
            RowPin::new(gpiob.pb7.into_open_drain_output(cs).downgrade(), "PB7"),
            RowPin::new(gpioc.pc13.into_open_drain_output(cs).downgrade(), "PC13"),
            RowPin::new(gpioc.pc14.into_open_drain_output(cs).downgrade(), "PC14"),
        ];
        let cols = [
            ColPin::new(gpiob.pb1.into_pull_up_input(cs).downgrade(), "PB1"),
            ColPin::new(gpiob.pb0.into_pull_up_input(cs).downgrade(), "PB0"),
            ColPin::new(gpioa.pa7.into_pull_up_input(cs).downgrade(), "PA7"),
        ];
        (rows, cols)
    })
}
