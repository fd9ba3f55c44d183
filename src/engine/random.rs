//! Injectable randomness seam
//!
//! The original implementation called ambient entropy directly, which made
//! outcomes impossible to reproduce in tests. Every draw now goes through
//! `UnitSource` so tests can replay fixed sequences.

use rand::Rng;

/// Source of uniform random values in `[0, 1)`.
pub trait UnitSource {
    fn next_unit(&mut self) -> f64;
}

impl UnitSource for rand::rngs::ThreadRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

impl UnitSource for rand::rngs::StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of values, then keeps returning the last one.
/// Intended for tests.
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f64>,
    pos: usize,
}

impl FixedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self { values: values.into(), pos: 0 }
    }
}

impl UnitSource for FixedSequence {
    fn next_unit(&mut self) -> f64 {
        let value = match self.values.get(self.pos) {
            Some(v) => *v,
            None => self.values.last().copied().unwrap_or(0.0),
        };
        self.pos += 1;
        value
    }
}
