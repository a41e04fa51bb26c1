//! Credential Forge CLI
//!
//! Command-line interface for minting tokens, checking candidate
//! passwords against a policy, and auditing generator uniformity.

use clap::{Args, Parser, Subcommand};
use credential_forge::{
    analysis::audit_charset, metrics::MetricsRegistry, CharsetKind, FileConfig, OsEntropySource,
    PolicyRules, PolicyValidator, ShuffleStrategy,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

/// Generate secure tokens and validate credential strength
#[derive(Parser, Debug)]
#[command(name = "credential-forge", version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print Prometheus metrics when the command finishes
    #[arg(long, global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate random tokens
    Generate {
        /// Token length
        #[arg(short, long)]
        length: Option<usize>,

        /// Alphabet: mixed, upper, lower or number
        #[arg(long)]
        charset: Option<CharsetKind>,

        /// Permutation: fisher-yates or repeated-sort-key
        #[arg(long)]
        shuffle: Option<ShuffleStrategy>,

        /// Number of tokens to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Check a candidate password against a policy
    Validate {
        /// Candidate secret
        candidate: String,

        #[command(flatten)]
        rules: RuleFlags,

        /// List every rule the candidate fails
        #[arg(long)]
        explain: bool,
    },

    /// Sample single characters and run a chi-square uniformity check
    Audit {
        /// Number of characters to sample
        #[arg(long)]
        samples: Option<usize>,

        /// Alphabet to audit
        #[arg(long, default_value = "mixed")]
        charset: CharsetKind,
    },
}

/// Policy flags. When any is given they replace the configured policy.
#[derive(Args, Debug)]
struct RuleFlags {
    /// Require a letter
    #[arg(long)]
    alpha: bool,
    /// Require a digit
    #[arg(long)]
    numeric: bool,
    /// Require an uppercase letter
    #[arg(long)]
    caps: bool,
    /// Require a symbol
    #[arg(long)]
    symbols: bool,
    /// Forbid identical adjacent characters
    #[arg(long)]
    consecutive: bool,
    /// Minimum length
    #[arg(long)]
    min_length: Option<usize>,
}

impl RuleFlags {
    fn into_rules(self, configured: PolicyRules) -> PolicyRules {
        let rules = PolicyRules {
            alpha: self.alpha,
            numeric: self.numeric,
            caps: self.caps,
            symbols: self.symbols,
            consecutive: self.consecutive,
            min_length: self.min_length,
        };
        if rules.is_empty() {
            configured
        } else {
            rules
        }
    }
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => FileConfig::default(),
    };

    let registry = match MetricsRegistry::new() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to create metrics registry: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = run(cli.command, config, &registry);

    if cli.metrics {
        match registry.encode() {
            Ok(output) => print!("{}", output),
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    code
}

fn run(command: Command, mut config: FileConfig, registry: &MetricsRegistry) -> ExitCode {
    match command {
        Command::Generate {
            length,
            charset,
            shuffle,
            count,
        } => {
            if let Some(length) = length {
                config.token.length = length;
            }
            if let Some(charset) = charset {
                config.token.charset = charset;
            }
            if let Some(shuffle) = shuffle {
                config.token.shuffle = shuffle;
            }

            let request = match config.token.request() {
                Ok(request) => request,
                Err(e) => {
                    eprintln!("{}", e);
                    return ExitCode::FAILURE;
                }
            };
            let generator = config.token.generator(OsEntropySource::new());

            for _ in 0..count {
                let outcome = generator.generate(&request);
                registry.record_generation(&outcome);
                match outcome {
                    Ok(token) => println!("{}", token),
                    Err(e) => {
                        eprintln!("Token generation failed: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }

        Command::Validate {
            candidate,
            rules,
            explain,
        } => {
            let validator = PolicyValidator::new(rules.into_rules(config.policy));
            let passed = validator.validate(&candidate);
            registry.record_validation(passed);

            if passed {
                println!("ok");
                return ExitCode::SUCCESS;
            }

            println!("rejected");
            if explain {
                for rule in validator.violations(&candidate) {
                    println!("  - {}", rule);
                }
            }
            ExitCode::FAILURE
        }

        Command::Audit { samples, charset } => {
            let samples = samples.unwrap_or(config.audit.samples);
            let thresholds = config.audit.thresholds();
            let generator = config.token.generator(OsEntropySource::new());

            info!(%charset, samples, shuffle = %generator.shuffle_strategy(), "Running uniformity audit");

            let report = match audit_charset(&generator, charset, samples) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("Audit sampling failed: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            registry.record_uniformity(&report);

            println!(
                "chi-square {:.2} over {} samples ({} dof, critical {:.2})",
                report.chi_square,
                report.sample_size,
                report.degrees_of_freedom,
                thresholds.critical_value(report.degrees_of_freedom)
            );

            match thresholds.check(&report) {
                Ok(()) => {
                    println!("uniform");
                    ExitCode::SUCCESS
                }
                Err(violation) => {
                    warn!("Uniformity check failed: {}", violation);
                    println!("not uniform: {}", violation);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_rules(args: &[&str]) -> RuleFlags {
        let mut argv = vec!["credential-forge", "validate", "secret"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Command::Validate { rules, .. } => rules,
            other => panic!("expected validate, got {other:?}"),
        }
    }

    #[test]
    fn test_no_flags_keep_configured_policy() {
        let configured = PolicyRules::strong(12);
        assert_eq!(parse_rules(&[]).into_rules(configured), configured);
    }

    #[test]
    fn test_zero_min_length_keeps_configured_policy() {
        let configured = PolicyRules::strong(12);
        assert_eq!(parse_rules(&["--min-length", "0"]).into_rules(configured), configured);
    }

    #[test]
    fn test_flags_replace_configured_policy() {
        let configured = PolicyRules::strong(12);
        assert_eq!(
            parse_rules(&["--numeric", "--min-length", "4"]).into_rules(configured),
            PolicyRules::none().with_numeric().with_min_length(4)
        );
    }
}
