//! Acceptance thresholds for the uniformity check.

use super::statistics::UniformityReport;
use serde::{Deserialize, Serialize};

/// Thresholds for accepting a sample as uniform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniformityThresholds {
    /// Standard-normal quantile of the significance level. The chi-square
    /// critical value is derived from it with the Wilson-Hilferty
    /// approximation.
    pub z_score: f64,
    /// Minimum expected count per character before the test is meaningful.
    pub min_expected_per_bucket: f64,
}

impl Default for UniformityThresholds {
    fn default() -> Self {
        Self {
            z_score: 4.753,               // alpha ~ 1e-6
            min_expected_per_bucket: 5.0, // Cochran's rule
        }
    }
}

impl UniformityThresholds {
    /// Tighter thresholds: rejects at alpha ~ 1e-3.
    pub fn strict() -> Self {
        Self {
            z_score: 3.090,
            min_expected_per_bucket: 10.0,
        }
    }

    /// Critical chi-square value for `degrees_of_freedom`.
    pub fn critical_value(&self, degrees_of_freedom: usize) -> f64 {
        if degrees_of_freedom == 0 {
            return 0.0;
        }
        let k = degrees_of_freedom as f64;
        let h = 2.0 / (9.0 * k);
        k * (1.0 - h + self.z_score * h.sqrt()).powi(3)
    }

    /// Number of samples needed to test an alphabet of `alphabet_len`.
    pub fn required_samples(&self, alphabet_len: usize) -> u64 {
        (self.min_expected_per_bucket * alphabet_len as f64).ceil() as u64
    }

    /// Checks a report against the thresholds.
    pub fn check(&self, report: &UniformityReport) -> Result<(), UniformityViolation> {
        if report.out_of_alphabet > 0 {
            return Err(UniformityViolation::ForeignCharacters {
                count: report.out_of_alphabet,
            });
        }

        let required = self.required_samples(report.counts.len());
        if report.sample_size < required {
            return Err(UniformityViolation::InsufficientSamples {
                observed: report.sample_size,
                required,
            });
        }

        let critical = self.critical_value(report.degrees_of_freedom);
        if report.chi_square > critical {
            return Err(UniformityViolation::ChiSquareExceeded {
                observed: report.chi_square,
                critical,
                degrees_of_freedom: report.degrees_of_freedom,
            });
        }

        Ok(())
    }
}

/// Uniformity violation types.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UniformityViolation {
    /// The sample contains characters the alphabet does not.
    #[error("{count} characters fall outside the alphabet")]
    ForeignCharacters {
        /// Number of foreign characters.
        count: u64,
    },

    /// Too few samples for the expected count per character.
    #[error("sample of {observed} is below the {required} needed for a meaningful test")]
    InsufficientSamples {
        /// Samples analyzed.
        observed: u64,
        /// Samples needed.
        required: u64,
    },

    /// The distribution deviates from uniform beyond the critical value.
    #[error("chi-square {observed:.2} exceeds critical value {critical:.2} ({degrees_of_freedom} dof)")]
    ChiSquareExceeded {
        /// Observed statistic.
        observed: f64,
        /// Critical value at the configured significance.
        critical: f64,
        /// Degrees of freedom of the test.
        degrees_of_freedom: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::audit_charset;
    use crate::token::{CharsetKind, ShuffleStrategy, TokenGenerator};

    #[test]
    fn test_critical_value_matches_tables() {
        // chi2(0.95, 10) = 18.307
        let thresholds = UniformityThresholds {
            z_score: 1.645,
            ..Default::default()
        };
        assert!((thresholds.critical_value(10) - 18.307).abs() < 0.1);

        // chi2(0.999, 61) = 100.9
        assert!((UniformityThresholds::strict().critical_value(61) - 100.9).abs() < 0.5);
    }

    #[test]
    fn test_generated_mixed_characters_are_uniform() {
        let thresholds = UniformityThresholds::default();
        for shuffle in [ShuffleStrategy::FisherYates, ShuffleStrategy::RepeatedSortKey] {
            let generator = TokenGenerator::new().with_shuffle(shuffle);
            let report = audit_charset(&generator, CharsetKind::Mixed, 20_000).unwrap();

            assert!(thresholds.check(&report).is_ok(), "{shuffle}: {report:?}");
        }
    }

    #[test]
    fn test_every_charset_is_uniform() {
        let thresholds = UniformityThresholds::default();
        let generator = TokenGenerator::new();
        for charset in CharsetKind::ALL {
            let report = audit_charset(&generator, charset, 10_000).unwrap();
            assert!(thresholds.check(&report).is_ok(), "{charset}: {report:?}");
        }
    }

    #[test]
    fn test_biased_sample_fails() {
        let mut sample = "0123456789".repeat(100);
        sample.push_str(&"7".repeat(200));
        let report = UniformityReport::analyze(&sample, "0123456789");

        assert!(matches!(
            UniformityThresholds::default().check(&report),
            Err(UniformityViolation::ChiSquareExceeded { .. })
        ));
    }

    #[test]
    fn test_small_sample_fails() {
        let report = UniformityReport::analyze("0123456789", "0123456789");

        assert!(matches!(
            UniformityThresholds::default().check(&report),
            Err(UniformityViolation::InsufficientSamples {
                observed: 10,
                required: 50
            })
        ));
    }

    #[test]
    fn test_foreign_characters_fail() {
        let sample = "0123456789".repeat(10) + "x";
        let report = UniformityReport::analyze(&sample, "0123456789");

        assert!(matches!(
            UniformityThresholds::default().check(&report),
            Err(UniformityViolation::ForeignCharacters { count: 1 })
        ));
    }
}
