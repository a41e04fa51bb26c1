//! Metrics collection and registry.

use crate::analysis::UniformityReport;
use crate::token::TokenError;
use prometheus::{Encoder, Gauge, IntCounter, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    /// Registration or encoding failed inside prometheus.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics registry for credential operations.
pub struct MetricsRegistry {
    registry: Registry,

    // Generation metrics
    tokens_generated: IntCounter,
    token_chars: IntCounter,
    generation_failures: IntCounter,

    // Validation metrics
    validations_passed: IntCounter,
    validations_failed: IntCounter,

    // Audit metrics
    uniformity_chi_square: Gauge,
}

impl MetricsRegistry {
    /// Creates a new registry with all metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let tokens_generated = IntCounter::new(
            "credential_tokens_generated_total",
            "Total number of tokens generated",
        )?;
        let token_chars = IntCounter::new(
            "credential_token_chars_total",
            "Total characters across all generated tokens",
        )?;
        let generation_failures = IntCounter::new(
            "credential_generation_failures_total",
            "Total number of failed generation calls",
        )?;

        let validations_passed = IntCounter::new(
            "credential_validations_passed_total",
            "Total candidates that satisfied the policy",
        )?;
        let validations_failed = IntCounter::new(
            "credential_validations_failed_total",
            "Total candidates that did not satisfy the policy",
        )?;

        let uniformity_chi_square = Gauge::new(
            "credential_uniformity_chi_square",
            "Chi-square statistic from the latest uniformity audit",
        )?;

        registry.register(Box::new(tokens_generated.clone()))?;
        registry.register(Box::new(token_chars.clone()))?;
        registry.register(Box::new(generation_failures.clone()))?;
        registry.register(Box::new(validations_passed.clone()))?;
        registry.register(Box::new(validations_failed.clone()))?;
        registry.register(Box::new(uniformity_chi_square.clone()))?;

        Ok(Self {
            registry,
            tokens_generated,
            token_chars,
            generation_failures,
            validations_passed,
            validations_failed,
            uniformity_chi_square,
        })
    }

    /// Records the outcome of one generation call.
    pub fn record_generation(&self, outcome: &Result<String, TokenError>) {
        match outcome {
            Ok(token) => {
                self.tokens_generated.inc();
                self.token_chars.inc_by(token.chars().count() as u64);
            }
            Err(_) => self.generation_failures.inc(),
        }
    }

    /// Records the outcome of one policy validation.
    pub fn record_validation(&self, passed: bool) {
        if passed {
            self.validations_passed.inc();
        } else {
            self.validations_failed.inc();
        }
    }

    /// Records the statistic from a uniformity audit.
    pub fn record_uniformity(&self, report: &UniformityReport) {
        self.uniformity_chi_square.set(report.chi_square);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
