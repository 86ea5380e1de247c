use clap::Parser;
use mimalloc::MiMalloc;
use std::io::Write;

use vcfmean::{summarize, Options};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Print the mean of an integer INFO field across a bgzipped VCF.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the bgzipped VCF.
    #[arg(value_name = "VCF")]
    path: String,

    /// INFO field to average.
    #[arg(short, long, default_value = "AN")]
    field: String,

    /// Number of decompression threads.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    threads: u32,
}

impl From<&Cli> for Options {
    fn from(cli: &Cli) -> Self {
        Options {
            field: cli.field.clone(),
            threads: cli.threads as usize,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut stderr = std::io::stderr();
    match summarize(&cli.path, &Options::from(&cli)) {
        Ok(summary) => {
            _ = writeln!(stderr, "{:.3}", summary.mean);
        }
        Err(e) => {
            _ = writeln!(stderr, "error: {}", e);
            std::process::exit(e.kind().exit_code());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["vcfmean", "in.vcf.gz"]).unwrap();
        let opts = Options::from(&cli);
        assert_eq!(cli.path, "in.vcf.gz");
        assert_eq!(opts.field, "AN");
        assert_eq!(opts.threads, 1);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["vcfmean", "-f", "DP", "--threads", "4", "x.vcf.gz"]).unwrap();
        let opts = Options::from(&cli);
        assert_eq!(opts.field, "DP");
        assert_eq!(opts.threads, 4);
    }

    #[test]
    fn test_cli_requires_path_and_positive_threads() {
        assert!(Cli::try_parse_from(["vcfmean"]).is_err());
        assert!(Cli::try_parse_from(["vcfmean", "-t", "0", "x.vcf.gz"]).is_err());
    }

    #[test]
    fn test_cli_asserts() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
