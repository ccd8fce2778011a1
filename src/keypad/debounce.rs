use crate::utils::elapsed_ms;
use super::event::{Edge, Position};
use super::matrix::Scan;

/// Single-key debouncer and edge detector
///
/// The raw reading becomes a candidate as soon as it changes, which also
/// releases the previously confirmed key. A candidate is confirmed (pressed)
/// only after it has been read unchanged for at least `debounce_ms`.
///
/// ```text
/// text on arrows is input
/// [] surround output events
/// K - a key read in this scan, K' - a different key, 0 - no key
/// S - key has been read unchanged for the debounce time
///
/// {Idle} ──K──> {Candidate(K)} ──K,S──> {Pressed(K)}[Press K]
///   ^             │  │   ^                  │  │
///   └──────0──────┘  └K'─┘                  │  K'──> {Candidate(K')}[Release K]
///   ^                                       │
///   └──────────────────0────────────────────┘[Release K]
/// ```
///
/// Ambiguous scans are ignored entirely, the state (including a pressed key)
/// stays as it was before.
#[derive(Debug, Clone)]
pub struct Debouncer {
    debounce_ms: u32,
    /// Last raw reading
    active: Option<Position>,
    /// Time when `active` was first read
    active_start: u32,
    /// Key that has been reported as pressed
    pressed: Option<Position>,
}

impl Debouncer {
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            active: None,
            active_start: 0,
            pressed: None,
        }
    }

    pub const fn debounce_ms(&self) -> u32 {
        self.debounce_ms
    }

    /// Currently pressed key
    pub const fn pressed(&self) -> Option<Position> {
        self.pressed
    }

    /// Current raw candidate
    pub const fn active(&self) -> Option<Position> {
        self.active
    }

    /// Advance the state machine with a new scan taken at time `now` (ms)
    pub fn update(&mut self, scan: Scan, now: u32) -> Option<Edge> {
        let key = match scan {
            Scan::Ambiguous => return None,
            Scan::Idle => None,
            Scan::Key(p) => Some(p),
        };

        if key != self.active {
            let released = match self.active {
                Some(active) if self.pressed == Some(active) => {
                    self.pressed = None;
                    Some(Edge::Release(active))
                },
                _ => None,
            };
            self.active = key;
            if key.is_some() {
                self.active_start = now;
            }
            return released;
        }

        match key {
            // idle or already reported
            None => None,
            Some(_) if self.pressed == key => None,
            Some(_) if elapsed_ms(now, self.active_start) < self.debounce_ms => None,
            Some(p) => {
                self.pressed = Some(p);
                Some(Edge::Press(p))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    const P5: Position = Position::new(5);
    const P7: Position = Position::new(7);

    // Test case is a sequence of:
    // time: scan => expected edge;
    macro_rules! test_debounce {
        (
            DEBOUNCE = $debounce:literal;
            $( $time:literal: $scan:expr => $edge:expr );+ $(;)?
        ) => {
            {
                let mut deb = Debouncer::new($debounce);
                $(
                    assert_eq!(deb.update($scan, $time), $edge, "at t={}", $time);
                )+
                deb
            }
        };
    }

    #[test]
    fn idle_stays_idle() {
        let deb = test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Idle => None;
            100: Scan::Idle => None;
        };
        assert_eq!(deb.pressed(), None);
        assert_eq!(deb.active(), None);
    }

    #[test]
    fn press_after_debounce() {
        let deb = test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            10: Scan::Key(P5) => None;
            49: Scan::Key(P5) => None;
            50: Scan::Key(P5) => Some(Edge::Press(P5));
            60: Scan::Key(P5) => None;
            1000: Scan::Key(P5) => None;
        };
        assert_eq!(deb.pressed(), Some(P5));
    }

    #[test]
    fn release_when_key_opens() {
        let deb = test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            60: Scan::Key(P5) => Some(Edge::Press(P5));
            70: Scan::Idle => Some(Edge::Release(P5));
            80: Scan::Idle => None;
        };
        assert_eq!(deb.pressed(), None);
    }

    #[test]
    fn short_contact_is_ignored() {
        test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            20: Scan::Key(P5) => None;
            30: Scan::Idle => None;
            100: Scan::Idle => None;
        };
    }

    #[test]
    fn bounce_restarts_debounce() {
        test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            30: Scan::Idle => None;
            40: Scan::Key(P5) => None;
            80: Scan::Key(P5) => None;
            90: Scan::Key(P5) => Some(Edge::Press(P5));
        };
    }

    #[test]
    fn other_key_supersedes_pressed() {
        let deb = test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            50: Scan::Key(P5) => Some(Edge::Press(P5));
            60: Scan::Key(P7) => Some(Edge::Release(P5));
            100: Scan::Key(P7) => None;
            110: Scan::Key(P7) => Some(Edge::Press(P7));
        };
        assert_eq!(deb.pressed(), Some(P7));
    }

    #[test]
    fn other_key_drops_pending_candidate() {
        test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            30: Scan::Key(P7) => None;
            60: Scan::Key(P7) => None;
            70: Scan::Idle => None;
        };
    }

    #[test]
    fn ambiguous_is_inert() {
        let deb = test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            50: Scan::Key(P5) => Some(Edge::Press(P5));
            60: Scan::Ambiguous => None;
            70: Scan::Ambiguous => None;
        };
        assert_eq!(deb.pressed(), Some(P5));
        assert_eq!(deb.active(), Some(P5));
    }

    #[test]
    fn ambiguous_does_not_restart_candidate() {
        test_debounce! {
            DEBOUNCE = 50;
            0: Scan::Key(P5) => None;
            20: Scan::Ambiguous => None;
            50: Scan::Key(P5) => Some(Edge::Press(P5));
        };
    }

    #[test]
    fn zero_debounce_presses_on_second_scan() {
        test_debounce! {
            DEBOUNCE = 0;
            0: Scan::Key(P5) => None;
            0: Scan::Key(P5) => Some(Edge::Press(P5));
            1: Scan::Idle => Some(Edge::Release(P5));
        };
    }

    #[test]
    fn clock_wraparound() {
        let start = u32::MAX - 20;
        let mut deb = Debouncer::new(50);
        assert_eq!(deb.update(Scan::Key(P5), start), None);
        assert_eq!(deb.update(Scan::Key(P5), start.wrapping_add(40)), None);
        assert_eq!(deb.update(Scan::Key(P5), start.wrapping_add(50)), Some(Edge::Press(P5)));
        assert_eq!(deb.update(Scan::Idle, start.wrapping_add(60)), Some(Edge::Release(P5)));
    }

    fn random_scan(rng: &mut StdRng) -> Scan {
        match rng.gen_range(0..10) {
            0..=3 => Scan::Idle,
            4..=5 => Scan::Key(P5),
            6..=7 => Scan::Key(P7),
            8 => Scan::Key(Position::new(rng.gen_range(0..12))),
            _ => Scan::Ambiguous,
        }
    }

    #[test]
    fn random_bounce_keeps_edges_paired() {
        let mut rng = StdRng::seed_from_u64(0x6b65_7970_6164);
        for _ in 0..50 {
            let debounce = rng.gen_range(0..20);
            let mut deb = Debouncer::new(debounce);
            let mut now: u32 = rng.gen();
            let mut pressed: Option<Position> = None;
            let mut edges = Vec::new();
            for _ in 0..2000 {
                now = now.wrapping_add(rng.gen_range(0..5));
                let scan = random_scan(&mut rng);
                let before = deb.pressed();
                let edge = deb.update(scan, now);
                match edge {
                    Some(Edge::Press(p)) => {
                        assert_eq!(pressed, None, "press while another key is pressed");
                        pressed = Some(p);
                    },
                    Some(Edge::Release(p)) => {
                        assert_eq!(pressed, Some(p), "release without matching press");
                        pressed = None;
                    },
                    None => {},
                }
                if scan == Scan::Ambiguous {
                    assert_eq!(deb.pressed(), before);
                }
                assert_eq!(deb.pressed(), pressed);
                edges.extend(edge);
            }
            // two edges of the same kind never follow each other
            for pair in edges.windows(2) {
                assert_ne!(pair[0].is_press(), pair[1].is_press());
            }
        }
    }
}
