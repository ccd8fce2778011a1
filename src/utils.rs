use core::convert::Infallible;

/// Helper trait to resolve Infallible Results
pub trait InfallibleResult<T> {
    fn infallible(self) -> T;
}

impl<T> InfallibleResult<T> for Result<T, Infallible> {
    fn infallible(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => match e {},
        }
    }
}

/// Time elapsed since `since` on a free-running millisecond clock
///
/// The clock is allowed to overflow; the difference is correct as long as
/// less than `u32::MAX` milliseconds passed between the readings.
#[inline(always)]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}
