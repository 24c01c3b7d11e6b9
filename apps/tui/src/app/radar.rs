//! Scan timers and the decorative blip set.
//!
//! The radar is presentation only: one one-shot countdown ends the scan, one
//! repeating metronome adds random blips. Both live inside [`RadarScan`], so
//! dropping the scan tears both down and nothing can fire after teardown.

use std::time::{Duration, Instant};

use rand::Rng;

/// Fixed scan length before the mesh "finds" the chat.
pub const SCAN_DURATION: Duration = Duration::from_secs(4);

/// Cadence of decorative blips during the scan.
pub const BLIP_INTERVAL: Duration = Duration::from_millis(800);

/// Rolling cap on visible blips; oldest are dropped beyond this.
pub const BLIP_CAP: usize = 10;

/// One-shot timer. [`Countdown::fire`] returns true exactly once, no matter
/// how often it is polled afterwards.
#[derive(Debug)]
pub struct Countdown {
    deadline: Instant,
    fired: bool,
}

impl Countdown {
    pub fn new(now: Instant, after: Duration) -> Self {
        Self {
            deadline: now + after,
            fired: false,
        }
    }

    pub fn fire(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Repeating timer. [`Metronome::ticks`] reports how many whole periods
/// elapsed since the last poll, catching up if polls were slow.
#[derive(Debug)]
pub struct Metronome {
    next: Instant,
    period: Duration,
}

impl Metronome {
    pub fn new(now: Instant, period: Duration) -> Self {
        Self {
            next: now + period,
            period,
        }
    }

    pub fn ticks(&mut self, now: Instant) -> u32 {
        let mut elapsed = 0;
        while now >= self.next {
            self.next += self.period;
            elapsed += 1;
        }
        elapsed
    }
}

/// A randomly positioned visual marker, in percent coordinates (10..90 on
/// both axes, keeping dots off the rim).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarDot {
    pub x: f64,
    pub y: f64,
}

impl RadarDot {
    fn random() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            x: rng.gen_range(10.0..90.0),
            y: rng.gen_range(10.0..90.0),
        }
    }
}

/// One activation of the radar: completion countdown, blip metronome and the
/// rolling dot set.
#[derive(Debug)]
pub struct RadarScan {
    completion: Countdown,
    blips: Metronome,
    pub dots: Vec<RadarDot>,
}

impl RadarScan {
    pub fn activate(now: Instant) -> Self {
        Self {
            completion: Countdown::new(now, SCAN_DURATION),
            blips: Metronome::new(now, BLIP_INTERVAL),
            dots: Vec::new(),
        }
    }

    /// Advance both timers. Returns true on the single poll where the scan
    /// completes, regardless of how many blip intervals elapsed.
    pub fn tick(&mut self, now: Instant) -> bool {
        for _ in 0..self.blips.ticks(now) {
            self.dots.push(RadarDot::random());
        }
        if self.dots.len() > BLIP_CAP {
            let excess = self.dots.len() - BLIP_CAP;
            self.dots.drain(..excess);
        }

        self.completion.fire(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_fires_exactly_once() {
        let start = Instant::now();
        let mut countdown = Countdown::new(start, Duration::from_secs(4));

        assert!(!countdown.fire(start));
        assert!(!countdown.fire(start + Duration::from_secs(3)));
        assert!(countdown.fire(start + Duration::from_secs(4)));
        assert!(!countdown.fire(start + Duration::from_secs(5)));
        assert!(!countdown.fire(start + Duration::from_secs(500)));
    }

    #[test]
    fn metronome_counts_whole_periods() {
        let start = Instant::now();
        let mut metronome = Metronome::new(start, Duration::from_millis(800));

        assert_eq!(metronome.ticks(start + Duration::from_millis(700)), 0);
        assert_eq!(metronome.ticks(start + Duration::from_millis(900)), 1);
        // A slow poll catches up on missed periods
        assert_eq!(metronome.ticks(start + Duration::from_millis(3300)), 3);
        assert_eq!(metronome.ticks(start + Duration::from_millis(3400)), 0);
    }

    #[test]
    fn scan_completes_once_regardless_of_blip_ticks() {
        let start = Instant::now();
        let mut scan = RadarScan::activate(start);

        let mut completions = 0;
        for ms in (0..10_000).step_by(50) {
            if scan.tick(start + Duration::from_millis(ms)) {
                completions += 1;
            }
        }

        assert_eq!(completions, 1);
    }

    #[test]
    fn dots_respect_the_rolling_cap_and_bounds() {
        let start = Instant::now();
        let mut scan = RadarScan::activate(start);

        // Far more blip intervals than the cap
        scan.tick(start + Duration::from_secs(60));

        assert_eq!(scan.dots.len(), BLIP_CAP);
        for dot in &scan.dots {
            assert!(dot.x >= 10.0 && dot.x < 90.0);
            assert!(dot.y >= 10.0 && dot.y < 90.0);
        }
    }
}
