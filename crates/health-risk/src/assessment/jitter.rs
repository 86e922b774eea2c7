use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the per-cell perturbation added to a biased risk.
pub trait JitterSource: Send + Sync {
    /// Draw a value from `[-amplitude, amplitude)`.
    fn draw(&self, amplitude: f64) -> f64;
}

fn sample<R: Rng + ?Sized>(rng: &mut R, amplitude: f64) -> f64 {
    if amplitude.partial_cmp(&0.0) != Some(std::cmp::Ordering::Greater) {
        return 0.0;
    }
    rng.gen_range(-amplitude..amplitude)
}

/// Unseeded draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyJitter;

impl JitterSource for EntropyJitter {
    fn draw(&self, amplitude: f64) -> f64 {
        sample(&mut rand::thread_rng(), amplitude)
    }
}

/// Reproducible stream of draws from a seeded generator.
#[derive(Debug)]
pub struct SeededJitter {
    rng: Mutex<StdRng>,
}

impl SeededJitter {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl JitterSource for SeededJitter {
    fn draw(&self, amplitude: f64) -> f64 {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        sample(&mut *rng, amplitude)
    }
}

/// Returns the same value on every draw regardless of amplitude.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FixedJitter(pub f64);

impl FixedJitter {
    pub const fn none() -> Self {
        Self(0.0)
    }
}

impl JitterSource for FixedJitter {
    fn draw(&self, _amplitude: f64) -> f64 {
        self.0
    }
}

/// Runtime-selected source so callers can pick a strategy from configuration.
#[derive(Debug)]
pub enum ConfiguredJitter {
    Entropy(EntropyJitter),
    Seeded(SeededJitter),
    Fixed(FixedJitter),
}

impl ConfiguredJitter {
    pub fn from_settings(enabled: bool, seed: Option<u64>) -> Self {
        match (enabled, seed) {
            (false, _) => Self::Fixed(FixedJitter::none()),
            (true, Some(seed)) => Self::Seeded(SeededJitter::new(seed)),
            (true, None) => Self::Entropy(EntropyJitter),
        }
    }

    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Entropy(_) => "entropy",
            Self::Seeded(_) => "seeded",
            Self::Fixed(_) => "fixed",
        }
    }
}

impl JitterSource for ConfiguredJitter {
    fn draw(&self, amplitude: f64) -> f64 {
        match self {
            Self::Entropy(source) => source.draw(amplitude),
            Self::Seeded(source) => source.draw(amplitude),
            Self::Fixed(source) => source.draw(amplitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_draws_stay_within_amplitude() {
        let source = EntropyJitter;
        for _ in 0..500 {
            let value = source.draw(0.1);
            assert!((-0.1..0.1).contains(&value), "draw {value} out of range");
        }
    }

    #[test]
    fn seeded_streams_repeat_for_the_same_seed() {
        let first = SeededJitter::new(42);
        let second = SeededJitter::new(42);

        let a: Vec<f64> = (0..15).map(|_| first.draw(0.1)).collect();
        let b: Vec<f64> = (0..15).map(|_| second.draw(0.1)).collect();

        assert_eq!(a, b);
        assert!(a.iter().all(|value| (-0.1..0.1).contains(value)));
    }

    #[test]
    fn zero_amplitude_draws_nothing() {
        assert_eq!(EntropyJitter.draw(0.0), 0.0);
        assert_eq!(SeededJitter::new(7).draw(-1.0), 0.0);
    }

    #[test]
    fn configured_jitter_picks_strategy_from_settings() {
        assert_eq!(ConfiguredJitter::from_settings(false, Some(9)).describe(), "fixed");
        assert_eq!(ConfiguredJitter::from_settings(true, Some(9)).describe(), "seeded");
        assert_eq!(ConfiguredJitter::from_settings(true, None).describe(), "entropy");
        assert_eq!(ConfiguredJitter::from_settings(false, None).draw(0.1), 0.0);
    }
}
