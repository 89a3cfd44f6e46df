//! Name-driven sample values for function parameters.
//!
//! Each parameter name is matched case-insensitively against an ordered rule
//! table; the first rule whose needle is a substring wins. Unmatched names
//! get a fixed placeholder string.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprout_core::{FunctionDescriptor, SampleValue, TestData};

/// Placeholder for parameters no rule recognizes.
pub const PLACEHOLDER: &str = "test_value";

/// What kind of value a parameter name asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    /// Integer in `1..=1000`.
    Identifier,
    /// Fraction in `0..=1`, two decimals.
    Rate,
    /// Three integers in `1..=100`.
    Items,
    /// Amount in `10..=1000`, two decimals.
    Price,
}

const RULES: &[(&str, Heuristic)] = &[
    ("id", Heuristic::Identifier),
    ("rate", Heuristic::Rate),
    ("items", Heuristic::Items),
    ("price", Heuristic::Price),
];

impl Heuristic {
    /// First rule matching `parameter`, if any.
    #[must_use]
    pub fn classify(parameter: &str) -> Option<Self> {
        let name = parameter.to_lowercase();
        RULES
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|&(_, heuristic)| heuristic)
    }
}

/// Produces sample arguments for a function.
///
/// The random source is a type parameter so tests can pin it; the default
/// [`StdRng`] is seeded from the OS unless [`TestDataSynthesizer::with_seed`]
/// is used. One synthesizer per thread.
#[derive(Debug, Clone)]
pub struct TestDataSynthesizer<R = StdRng> {
    rng: R,
}

impl TestDataSynthesizer<StdRng> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible synthesizer: equal seeds give equal values.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for TestDataSynthesizer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TestDataSynthesizer<R> {
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Map every parameter a caller passes (receivers excluded) to a value.
    pub fn synthesize(&mut self, function: &FunctionDescriptor) -> TestData {
        function
            .call_parameters()
            .iter()
            .map(|p| (p.name.clone(), self.sample_for(&p.name)))
            .collect()
    }

    /// Sample value for one parameter name.
    pub fn sample_for(&mut self, parameter: &str) -> SampleValue {
        match Heuristic::classify(parameter) {
            Some(Heuristic::Identifier) => SampleValue::Int(self.rng.random_range(1..=1000)),
            Some(Heuristic::Rate) => SampleValue::Float(round2(self.rng.random_range(0.0..=1.0))),
            Some(Heuristic::Items) => SampleValue::List(
                (0..3)
                    .map(|_| SampleValue::Int(self.rng.random_range(1..=100)))
                    .collect(),
            ),
            Some(Heuristic::Price) => {
                SampleValue::Float(round2(self.rng.random_range(10.0..=1000.0)))
            }
            None => SampleValue::Str(PLACEHOLDER.to_string()),
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
