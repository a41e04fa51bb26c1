//! Character frequency statistics.

use crate::entropy::EntropySource;
use crate::token::{CharsetKind, GenerationRequest, TokenError, TokenGenerator};
use std::collections::HashMap;

/// Frequency statistics of a sample against an alphabet.
#[derive(Debug, Clone)]
pub struct UniformityReport {
    /// Observed count per alphabet character, in alphabet order.
    pub counts: Vec<u64>,
    /// Characters in the sample that are not in the alphabet.
    pub out_of_alphabet: u64,
    /// Number of in-alphabet characters analyzed.
    pub sample_size: u64,
    /// Pearson's chi-square statistic against a uniform distribution.
    pub chi_square: f64,
    /// Degrees of freedom (alphabet size minus one).
    pub degrees_of_freedom: usize,
}

impl UniformityReport {
    /// Tallies `sample` against `alphabet` and computes the statistic.
    ///
    /// A character repeated in `alphabet` is one bucket, placed where it
    /// first appears.
    pub fn analyze(sample: &str, alphabet: &str) -> Self {
        let mut index: HashMap<char, usize> = HashMap::new();
        for c in alphabet.chars() {
            let next = index.len();
            index.entry(c).or_insert(next);
        }
        let mut counts = vec![0u64; index.len()];
        let mut out_of_alphabet = 0u64;

        for c in sample.chars() {
            match index.get(&c) {
                Some(&i) => counts[i] += 1,
                None => out_of_alphabet += 1,
            }
        }

        let sample_size: u64 = counts.iter().sum();
        Self {
            chi_square: Self::compute_chi_square(&counts, sample_size),
            degrees_of_freedom: counts.len().saturating_sub(1),
            counts,
            out_of_alphabet,
            sample_size,
        }
    }

    fn compute_chi_square(counts: &[u64], sample_size: u64) -> f64 {
        if counts.is_empty() || sample_size == 0 {
            return 0.0;
        }

        let expected = sample_size as f64 / counts.len() as f64;
        counts
            .iter()
            .map(|&observed| (observed as f64 - expected).powi(2) / expected)
            .sum()
    }

    /// Expected count per character under a uniform distribution.
    pub fn expected_per_bucket(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        self.sample_size as f64 / self.counts.len() as f64
    }
}

/// Generates `samples` single-character tokens over `charset` and
/// analyzes their distribution.
pub fn audit_charset<E: EntropySource>(
    generator: &TokenGenerator<E>,
    charset: CharsetKind,
    samples: usize,
) -> Result<UniformityReport, TokenError> {
    let request = GenerationRequest::new(1, charset)?;
    let mut sample = String::with_capacity(samples);
    for _ in 0..samples {
        sample.push_str(&generator.generate(&request)?);
    }

    let report = UniformityReport::analyze(&sample, charset.alphabet());
    tracing::debug!(
        charset = %charset,
        samples,
        chi_square = report.chi_square,
        "uniformity audit sampled"
    );
    Ok(report)
}
