use std::path::PathBuf;

use clap::Parser;

/// Collect EC2 CPU utilization stats across regions and summarize fleet
/// efficiency via the analysis server.
#[derive(Parser, Debug)]
#[command(name = "ec2stats", version, about)]
pub struct Args {
    /// AWS access key id (prompted for when omitted)
    #[arg(short = 'k', long = "access-key")]
    pub access_key: Option<String>,

    /// AWS secret access key (prompted for when omitted)
    #[arg(short = 's', long = "secret-key")]
    pub secret_key: Option<String>,

    /// Analysis server URL
    #[arg(short = 'u', long = "url")]
    pub url: Option<String>,

    /// Regions to scan (comma-separated), overriding the config
    #[arg(short = 'r', long = "regions", value_delimiter = ',')]
    pub regions: Option<Vec<String>>,

    /// Load a previously saved stats file instead of collecting live
    #[arg(short = 'l', long = "load-stats", value_name = "FILE")]
    pub load_stats: Option<PathBuf>,

    /// Average and maximum CPU thresholds for the under-utilized listing
    #[arg(short = 't', long = "threshold", num_args = 2, value_names = ["AVG", "MAX"])]
    pub threshold: Option<Vec<u32>>,

    /// Collect only; skip the upload/analysis stage
    #[arg(long = "no-analyze")]
    pub no_analyze: bool,

    /// Don't print the summary returned by the analyzer
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Skip TLS certificate verification for the analysis endpoint
    #[arg(long = "insecure")]
    pub insecure: bool,

    /// Config file path (default: EC2STATS_CONFIG, then ./ec2stats.toml)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
