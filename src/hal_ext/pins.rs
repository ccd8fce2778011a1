use core::convert::Infallible;
use embedded_hal::digital::v2::{InputPin, OutputPin};

use crate::utils::InfallibleResult;

/// Electrical configuration of a matrix pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// High impedance input
    Input,
    /// Input with internal pull-up, reads high when nothing drives it
    InputPullUp,
    /// Output driving the last written level
    Output,
}

/// GPIO capability used by the matrix scanner
///
/// Levels are logical: `true` is high, `false` is low. Keys pull columns low,
/// so `false` means "active".
pub trait MatrixPin {
    /// Switch pin direction/pull configuration
    fn set_mode(&mut self, mode: PinMode);
    /// Set output level; in the input modes the level is only latched and
    /// gets driven after switching to [`PinMode::Output`]
    fn write(&mut self, level: bool);
    /// Read current pin level
    fn read(&self) -> bool;
    /// Human readable pin name used in configuration dumps
    fn label(&self) -> &'static str;
}

/// Open-drain GPIO that can both drive and sense the line
///
/// Open-drain outputs can only pull the line low. Releasing the line is
/// electrically the same as an input, so in the input modes the pin is
/// released and writes are only latched. Switching to output drives the
/// latched level. External or internal pull-up is required.
pub struct OpenDrain<P> {
    pin: P,
    label: &'static str,
    mode: PinMode,
    level: bool,
}

impl<P> OpenDrain<P>
where
    P: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
{
    pub fn new(pin: P, label: &'static str) -> Self {
        Self { pin, label, mode: PinMode::Input, level: true }
    }

    /// Give up the underlying pin
    pub fn release(self) -> P {
        self.pin
    }

    fn apply(&mut self) {
        if self.mode == PinMode::Output && !self.level {
            self.pin.set_low().infallible()
        } else {
            self.pin.set_high().infallible()
        }
    }
}

impl<P> MatrixPin for OpenDrain<P>
where
    P: InputPin<Error = Infallible> + OutputPin<Error = Infallible>,
{
    fn set_mode(&mut self, mode: PinMode) {
        self.mode = mode;
        self.apply();
    }

    fn write(&mut self, level: bool) {
        self.level = level;
        self.apply();
    }

    fn read(&self) -> bool {
        self.pin.is_high().infallible()
    }

    fn label(&self) -> &'static str {
        self.label
    }
}

/// Input-only GPIO already configured with a pull-up
///
/// Such pins have their mode fixed by the HAL type-state, so mode changes and
/// writes are ignored.
pub struct PullUpInput<P> {
    pin: P,
    label: &'static str,
}

impl<P> PullUpInput<P>
where
    P: InputPin<Error = Infallible>,
{
    pub fn new(pin: P, label: &'static str) -> Self {
        Self { pin, label }
    }

    /// Give up the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> MatrixPin for PullUpInput<P>
where
    P: InputPin<Error = Infallible>,
{
    fn set_mode(&mut self, mode: PinMode) {
        debug_assert!(mode != PinMode::Output, "Input-only pin cannot drive the line");
    }

    fn write(&mut self, _level: bool) {}

    fn read(&self) -> bool {
        self.pin.is_high().infallible()
    }

    fn label(&self) -> &'static str {
        self.label
    }
}
