//! Injectable source of uniform randomness.

use std::collections::VecDeque;

use rand::Rng;
use rand::rngs::StdRng;

/// A provider of uniform floats in `[0, 1)`.
///
/// Every selector in this crate draws through this trait so tests can
/// substitute a fixed sequence and assert exact picks.
pub trait RandomSource {
    /// Next uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// A random source that replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)` on construction.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: VecDeque<f64>,
}

impl ScriptedRandom {
    /// Create a scripted source. An empty script always yields `0.0`.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let values = values
            .into_iter()
            .map(|v| {
                if v.is_nan() {
                    0.0
                } else {
                    v.clamp(0.0, 1.0 - f64::EPSILON)
                }
            })
            .collect();
        Self { values }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        match self.values.pop_front() {
            Some(v) => {
                self.values.push_back(v);
                v
            }
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn scripted_replays_in_order_and_cycles() {
        let mut r = ScriptedRandom::new([0.1, 0.5, 0.9]);
        let got: Vec<f64> = (0..5).map(|_| r.next_f64()).collect();
        assert_eq!(got, vec![0.1, 0.5, 0.9, 0.1, 0.5]);
    }

    #[test]
    fn scripted_clamps_out_of_range() {
        let mut r = ScriptedRandom::new([-1.0, 2.0, f64::NAN]);
        assert_eq!(r.next_f64(), 0.0);
        assert!(r.next_f64() < 1.0);
        assert_eq!(r.next_f64(), 0.0);
    }

    #[test]
    fn empty_script_yields_zero() {
        let mut r = ScriptedRandom::new([]);
        assert_eq!(r.next_f64(), 0.0);
    }

    #[test]
    fn std_rng_stays_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
