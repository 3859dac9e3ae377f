use crate::lap::Lap;
use std::time::{Duration, Instant};

/// Outcome of pressing the lap key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LapEvent {
    Started { lap: u32 },
    Recorded { lap: Lap, next: u32 },
}

/// Elapsed-time bookkeeping across pause, resume, and lap boundaries.
///
/// While running, `anchor` holds the instant of the last start, resume, or
/// split; everything earlier is folded into the accumulators. Paused wall
/// time is excluded from both the total and the current lap.
#[derive(Default)]
pub struct Stopwatch {
    anchor: Option<Instant>,
    total: Duration,
    lap_time: Duration,
    lap_number: u32,
    laps: Vec<Lap>,
}

impl Stopwatch {
    pub fn is_running(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn is_idle(&self) -> bool {
        self.lap_number == 0
    }

    pub fn lap_number(&self) -> u32 {
        self.lap_number
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }

    pub fn lap_elapsed(&self) -> Duration {
        self.lap_elapsed_at(Instant::now())
    }

    pub fn press_lap(&mut self) -> LapEvent {
        self.press_lap_at(Instant::now())
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn elapsed_at(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self.total + now.saturating_duration_since(anchor),
            None => self.total,
        }
    }

    pub(crate) fn lap_elapsed_at(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self.lap_time + now.saturating_duration_since(anchor),
            None => self.lap_time,
        }
    }

    pub(crate) fn press_lap_at(&mut self, now: Instant) -> LapEvent {
        if self.is_idle() {
            self.anchor = Some(now);
            self.lap_number = 1;

            return LapEvent::Started { lap: 1 };
        }

        let lap = Lap {
            number: self.lap_number,
            duration: self.lap_elapsed_at(now),
            total: self.elapsed_at(now),
        };

        // Re-anchor so the total keeps running while the lap clock restarts.
        // A paused stopwatch stays paused.
        if let Some(anchor) = self.anchor {
            self.total += now.saturating_duration_since(anchor);
            self.anchor = Some(now);
        }
        self.lap_time = Duration::default();
        self.lap_number += 1;
        self.laps.push(lap);

        LapEvent::Recorded {
            lap,
            next: self.lap_number,
        }
    }

    pub(crate) fn toggle_at(&mut self, now: Instant) {
        if self.is_idle() {
            return;
        }

        match self.anchor.take() {
            Some(anchor) => {
                let running = now.saturating_duration_since(anchor);
                self.total += running;
                self.lap_time += running;
            }
            None => {
                self.anchor = Some(now);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn idle_stopwatch_reads_zero() {
        let watch = Stopwatch::default();

        assert!(watch.is_idle());
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_at(Instant::now()), Duration::default());
        assert_eq!(watch.lap_elapsed_at(Instant::now()), Duration::default());
        assert!(watch.laps().is_empty());
    }

    #[test]
    fn first_press_starts_the_first_lap() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();

        assert_eq!(watch.press_lap_at(start), LapEvent::Started { lap: 1 });
        assert!(watch.is_running());
        assert_eq!(watch.lap_number(), 1);
        assert!(watch.laps().is_empty());
        assert_eq!(watch.elapsed_at(start + millis(250)), millis(250));
        assert_eq!(watch.lap_elapsed_at(start + millis(250)), millis(250));
    }

    #[test]
    fn pressing_again_records_a_lap_and_restarts_the_lap_clock() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);

        let event = watch.press_lap_at(start + millis(1_500));
        let expected = Lap {
            number: 1,
            duration: millis(1_500),
            total: millis(1_500),
        };
        assert_eq!(
            event,
            LapEvent::Recorded {
                lap: expected,
                next: 2
            }
        );
        assert_eq!(watch.laps(), &[expected]);

        // The total keeps running while the lap clock starts over.
        assert_eq!(watch.elapsed_at(start + millis(2_000)), millis(2_000));
        assert_eq!(watch.lap_elapsed_at(start + millis(2_000)), millis(500));
    }

    #[test]
    fn pause_excludes_wall_time_from_both_clocks() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);

        watch.toggle_at(start + millis(1_000));
        assert!(!watch.is_running());

        // Frozen while paused.
        assert_eq!(watch.elapsed_at(start + millis(5_000)), millis(1_000));
        assert_eq!(watch.lap_elapsed_at(start + millis(5_000)), millis(1_000));

        watch.toggle_at(start + millis(5_000));
        assert!(watch.is_running());
        assert_eq!(watch.elapsed_at(start + millis(5_250)), millis(1_250));
        assert_eq!(watch.lap_elapsed_at(start + millis(5_250)), millis(1_250));
    }

    #[test]
    fn lap_recorded_while_paused_uses_accumulated_time() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);
        watch.toggle_at(start + millis(800));

        let event = watch.press_lap_at(start + millis(9_000));
        let expected = Lap {
            number: 1,
            duration: millis(800),
            total: millis(800),
        };
        assert_eq!(
            event,
            LapEvent::Recorded {
                lap: expected,
                next: 2
            }
        );
        assert!(!watch.is_running());
        assert_eq!(watch.lap_elapsed_at(start + millis(9_500)), millis(0));
    }

    #[test]
    fn totals_equal_the_sum_of_lap_durations_plus_the_current_lap() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);
        watch.press_lap_at(start + millis(400));
        watch.toggle_at(start + millis(700));
        watch.toggle_at(start + millis(2_700));
        watch.press_lap_at(start + millis(3_000));

        let now = start + millis(3_100);
        let recorded: Duration = watch.laps().iter().map(|lap| lap.duration).sum();
        assert_eq!(recorded + watch.lap_elapsed_at(now), watch.elapsed_at(now));
    }

    #[test]
    fn lap_numbers_are_contiguous_and_totals_non_decreasing() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);
        for i in 1..=5u64 {
            watch.press_lap_at(start + millis(i * 300));
        }

        let numbers: Vec<u32> = watch.laps().iter().map(|lap| lap.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(watch
            .laps()
            .windows(2)
            .all(|pair| pair[0].total <= pair[1].total));
        assert_eq!(watch.lap_number(), 6);
    }

    #[test]
    fn toggle_is_a_no_op_while_idle() {
        let mut watch = Stopwatch::default();
        watch.toggle_at(Instant::now());

        assert!(watch.is_idle());
        assert!(!watch.is_running());
    }

    #[test]
    fn reset_returns_to_the_idle_state() {
        let start = Instant::now();
        let mut watch = Stopwatch::default();
        watch.press_lap_at(start);
        watch.press_lap_at(start + millis(100));
        watch.reset();

        assert!(watch.is_idle());
        assert!(!watch.is_running());
        assert_eq!(watch.lap_number(), 0);
        assert!(watch.laps().is_empty());
        assert_eq!(watch.elapsed_at(start + millis(200)), Duration::default());
    }
}
