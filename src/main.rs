#![no_main]
#![no_std]

use panic_probe as _;
use defmt_rtt as _;
use stm32f0xx_hal as hal;
use keypad as lib;

use lib::keypad::KeypadListener;

/// Prints all keypad events
pub struct LogListener;

impl KeypadListener for LogListener {
    fn button_pressed(&self, row: u8, col: u8) {
        defmt::info!("Button ({=u8}, {=u8}) pressed", row, col);
    }

    fn button_released(&self, row: u8, col: u8) {
        defmt::info!("Button ({=u8}, {=u8}) released", row, col);
    }

    fn key_pressed(&self, key: u8) {
        defmt::info!("Key '{=char}' pressed", key as char);
    }

    fn key_released(&self, key: u8) {
        defmt::info!("Key '{=char}' released", key as char);
    }
}

static LOGGER: LogListener = LogListener;

#[rtic::app(device = crate::hal::pac)]
mod app {
    use super::hal;
    use hal::prelude::*;

    use super::lib;
    use lib::bsp::{self, ColPin, RowPin};
    use lib::config::{CONFIG, NCOLS, NROWS};
    use lib::keypad::Keypad;

    type Keys = Keypad<'static, RowPin, ColPin, NROWS, NCOLS>;
    type Pins = ([RowPin; NROWS], [ColPin; NCOLS]);

    /// Keypad scanning frequency, must be faster than the debounce time
    const SCAN_FREQ_KHZ: u32 = 1;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        timer: hal::timers::Timer<hal::pac::TIM15>,
        pins: Option<Pins>,
    }

    #[monotonic(binds = SysTick, default = true)]
    type Mono = systick_monotonic::Systick<MONO_HZ>;
    /// Monotonic timer ticks are used as milliseconds for debouncing
    pub const MONO_HZ: u32 = 1000;

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        let core = cx.core;
        let mut dev = cx.device;

        let sysclk: hal::time::Hertz = 48.mhz().into();
        let pclk: hal::time::Hertz = 24.mhz().into();

        let mut rcc = dev.RCC
            .configure()
            .enable_crs(dev.CRS)
            .sysclk(sysclk)
            .pclk(pclk)
            .hsi48()
            .freeze(&mut dev.FLASH);

        // Pinout
        let gpioa = dev.GPIOA.split(&mut rcc);
        let gpiob = dev.GPIOB.split(&mut rcc);
        let gpioc = dev.GPIOC.split(&mut rcc);

        // Keypad matrix
        let pins = bsp::keypad_pins(gpioa, gpiob, gpioc);

        // configure periodic timer
        let mut timer = hal::timers::Timer::tim15(dev.TIM15, SCAN_FREQ_KHZ.khz(), &mut rcc);
        timer.listen(hal::timers::Event::TimeOut);

        defmt::info!("Liftoff!");

        let mono = systick_monotonic::Systick::new(core.SYST, sysclk.0);

        (Shared {}, Local { timer, pins: Some(pins) }, init::Monotonics(mono))
    }

    #[task(binds = TIM15, priority = 2, local = [timer, pins, keypad: Option<Keys> = None])]
    fn tick(cx: tick::Context) {
        // Clears interrupt flag
        if cx.local.timer.wait().is_err() {
            return;
        }

        // Listener references are not Send, so the keypad never leaves this task
        if let Some((rows, cols)) = cx.local.pins.take() {
            let mut keypad = Keypad::new(rows, cols, &CONFIG);
            keypad.register_listener(&super::LOGGER).unwrap();
            keypad.dump_config();
            *cx.local.keypad = Some(keypad);
        }

        if let Some(keypad) = cx.local.keypad.as_mut() {
            // Truncation is fine, debouncing uses wrapping arithmetic
            let now = monotonics::now().ticks() as u32;
            keypad.tick(now);
        }
    }
}
