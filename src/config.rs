use clap::Parser;

use crate::error::ConfigError;
use crate::scope::ScopeFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Normalize WHOIS lookup results into flat per-domain records", long_about = None)]
pub struct Args {
    /// Input encoding: `jsonl` (one result per line) or `json`
    #[arg(short, long, default_value = "jsonl")]
    pub preset: String,

    #[arg(short, long, default_value = "stdout")]
    pub output: String,

    /// Lookup results to normalize, `-` for stdin
    #[arg(value_name = "FILE", default_value = "-")]
    pub file: String,

    #[arg(long, default_value = "1000")]
    pub batch_size: usize,

    /// Only emit domains matching this regex (matched from the start)
    #[arg(long)]
    pub scope_domain_regex: Option<String>,

    #[arg(long)]
    pub benchmark: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

/// Validated runtime settings.
#[derive(Debug)]
pub struct Settings {
    pub preset: String,
    pub output: String,
    pub file: String,
    pub batch_size: usize,
    pub scope: ScopeFilter,
    pub benchmark: bool,
}

impl Settings {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        if args.batch_size == 0 {
            return Err(ConfigError::BatchSize);
        }
        let scope = ScopeFilter::new(args.scope_domain_regex.as_deref())?;
        Ok(Self {
            preset: args.preset,
            output: args.output,
            file: args.file,
            batch_size: args.batch_size,
            scope,
            benchmark: args.benchmark,
        })
    }

    pub fn reads_stdin(&self) -> bool {
        self.file == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["whoisnorm"]);
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.preset, "jsonl");
        assert_eq!(settings.output, "stdout");
        assert_eq!(settings.batch_size, 1000);
        assert!(settings.reads_stdin());
        assert!(settings.scope.is_in_scope("example.com"));
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let args = Args::parse_from(["whoisnorm", "--batch-size", "0", "results.jsonl"]);
        assert!(matches!(
            Settings::from_args(args),
            Err(ConfigError::BatchSize)
        ));
    }

    #[test]
    fn scope_regex_is_compiled() {
        let args = Args::parse_from([
            "whoisnorm",
            "--scope-domain-regex",
            ".*ostorlab.co",
            "-p",
            "json",
            "results.json",
        ]);
        let settings = Settings::from_args(args).unwrap();
        assert_eq!(settings.preset, "json");
        assert!(!settings.reads_stdin());
        assert!(settings.scope.is_in_scope("test.ostorlab.co"));
        assert!(!settings.scope.is_in_scope("example.com"));
    }
}
