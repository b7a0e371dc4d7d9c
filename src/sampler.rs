use std::thread;
use std::time::{Duration, Instant};

use crate::position::{PositionSource, Sample};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&mut self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Polls a [`PositionSource`] once per interval until `duration` has elapsed.
pub struct Sampler<S, C> {
    source: S,
    clock: C,
    duration: Duration,
    interval: Duration,
}

impl<S: PositionSource, C: Clock> Sampler<S, C> {
    pub fn new(source: S, clock: C, duration: Duration, interval: Duration) -> Self {
        Self {
            source,
            clock,
            duration,
            interval,
        }
    }

    /// Failed readings are logged and dropped; the wait still happens so a
    /// failing endpoint is not hammered.
    pub fn collect(&mut self) -> Vec<Sample> {
        let start = self.clock.now();
        let mut samples = Vec::new();
        let mut dropped = 0usize;

        while self.clock.now().duration_since(start) < self.duration {
            match self.source.fetch() {
                Ok(sample) => {
                    log::info!(
                        "Reading {}: t={} lat={} lon={}",
                        samples.len(),
                        sample.timestamp,
                        sample.latitude,
                        sample.longitude
                    );
                    samples.push(sample);
                }
                Err(e) => {
                    dropped += 1;
                    log::warn!("Dropping reading: {}", e);
                }
            }
            self.clock.sleep(self.interval);
        }

        log::info!(
            "Collected {} samples ({} dropped) over {}",
            samples.len(),
            dropped,
            humantime::format_duration(self.clock.now().duration_since(start))
        );
        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::FetchError;
    use std::collections::VecDeque;

    struct ManualClock {
        base: Instant,
        offset: Duration,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                base: Instant::now(),
                offset: Duration::ZERO,
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.base + self.offset
        }

        fn sleep(&mut self, duration: Duration) {
            self.offset += duration;
        }
    }

    /// Replays scripted outcomes, then keeps succeeding.
    struct ScriptedSource {
        script: VecDeque<bool>,
        calls: i64,
    }

    impl ScriptedSource {
        fn always_ok() -> Self {
            Self::new(&[])
        }

        fn new(script: &[bool]) -> Self {
            Self {
                script: script.iter().copied().collect(),
                calls: 0,
            }
        }
    }

    impl PositionSource for ScriptedSource {
        fn fetch(&mut self) -> Result<Sample, FetchError> {
            self.calls += 1;
            if self.script.pop_front().unwrap_or(true) {
                Ok(Sample {
                    timestamp: 1_700_000_000 + self.calls,
                    latitude: 0.0,
                    longitude: self.calls as f64,
                })
            } else {
                Err(FetchError::Unsuccessful("failure".to_string()))
            }
        }
    }

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn polls_once_per_interval_until_duration() {
        let mut sampler = Sampler::new(
            ScriptedSource::always_ok(),
            ManualClock::new(),
            secs(60),
            secs(5),
        );
        let samples = sampler.collect();
        assert_eq!(samples.len(), 12);
        assert_eq!(sampler.clock.offset, secs(60));
    }

    #[test]
    fn sample_count_is_bounded_by_duration_over_interval() {
        for (duration, interval) in [(7u64, 3u64), (15, 5), (10, 9), (100, 7), (2, 1)] {
            let mut sampler = Sampler::new(
                ScriptedSource::always_ok(),
                ManualClock::new(),
                secs(duration),
                secs(interval),
            );
            let count = sampler.collect().len() as u64;
            assert!(
                count <= duration / interval + 1,
                "{} samples for duration={} interval={}",
                count,
                duration,
                interval
            );
        }
    }

    #[test]
    fn failed_readings_are_dropped_in_order() {
        let mut sampler = Sampler::new(
            ScriptedSource::new(&[true, false, true, false]),
            ManualClock::new(),
            secs(20),
            secs(5),
        );
        let samples = sampler.collect();
        let longitudes: Vec<f64> = samples.iter().map(|s| s.longitude).collect();
        assert_eq!(longitudes, vec![1.0, 3.0]);
        assert_eq!(sampler.source.calls, 4);
    }

    #[test]
    fn all_failures_yield_empty_sequence() {
        let mut sampler = Sampler::new(
            ScriptedSource::new(&[false; 3]),
            ManualClock::new(),
            secs(15),
            secs(5),
        );
        assert!(sampler.collect().is_empty());
    }
}
