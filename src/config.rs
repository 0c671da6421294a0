use std::path::Path;

use serde::Deserialize;

use crate::cli::Args;
use crate::models::Threshold;

/// All knobs in one place, passed into each component at construction time.
/// File values come from a TOML config; CLI flags override them.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub aws: AwsConfig,
    #[serde(default)]
    pub collection: CollectionConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsConfig {
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionConfig {
    /// Days of history to fetch per instance.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Seconds between samples; must be a whole number of minutes.
    #[serde(default = "default_period_secs")]
    pub period_secs: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Certificate verification for the analysis endpoint. The original tool
    /// shipped with this off; here off requires an explicit opt-in.
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
    #[serde(default = "default_threshold_avg")]
    pub threshold_avg: u32,
    #[serde(default = "default_threshold_max")]
    pub threshold_max: u32,
}

fn default_regions() -> Vec<String> {
    ["us-east-1", "us-west-2", "us-west-1", "us-east-2"]
        .map(String::from)
        .to_vec()
}

fn default_lookback_days() -> u32 {
    14
}

fn default_period_secs() -> u32 {
    900
}

fn default_url() -> String {
    "https://analyzer.example.com/v1/ec2stats".into()
}

fn default_verify_tls() -> bool {
    true
}

fn default_threshold_avg() -> u32 {
    5
}

fn default_threshold_max() -> u32 {
    30
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            access_key: None,
            secret_key: None,
            regions: default_regions(),
        }
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            lookback_days: default_lookback_days(),
            period_secs: default_period_secs(),
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            verify_tls: default_verify_tls(),
            threshold_avg: default_threshold_avg(),
            threshold_max: default_threshold_max(),
        }
    }
}

impl AppConfig {
    /// File resolution order: explicit `--config`, then `EC2STATS_CONFIG`,
    /// then `ec2stats.toml` if present, else pure defaults. CLI overrides
    /// are applied afterwards and the result is validated.
    pub fn resolve(args: &Args) -> anyhow::Result<Self> {
        let mut config = match Self::config_path(args) {
            Some(path) => {
                let s = std::fs::read_to_string(&path)?;
                toml::from_str(&s)?
            }
            None => Self::default(),
        };
        config.apply_cli(args);
        config.validate()?;
        Ok(config)
    }

    fn config_path(args: &Args) -> Option<std::path::PathBuf> {
        if let Some(path) = &args.config {
            return Some(path.clone());
        }
        if let Ok(path) = std::env::var("EC2STATS_CONFIG") {
            return Some(path.into());
        }
        let default = Path::new("ec2stats.toml");
        default.exists().then(|| default.to_path_buf())
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, args: &Args) {
        if let Some(key) = &args.access_key {
            self.aws.access_key = Some(key.clone());
        }
        if let Some(key) = &args.secret_key {
            self.aws.secret_key = Some(key.clone());
        }
        if let Some(regions) = &args.regions {
            self.aws.regions = regions.clone();
        }
        if let Some(url) = &args.url {
            self.analyzer.url = url.clone();
        }
        if let Some(threshold) = &args.threshold
            && let [avg, max] = threshold[..]
        {
            self.analyzer.threshold_avg = avg;
            self.analyzer.threshold_max = max;
        }
        if args.insecure {
            self.analyzer.verify_tls = false;
        }
    }

    pub fn threshold(&self) -> Threshold {
        Threshold {
            avg: self.analyzer.threshold_avg,
            max: self.analyzer.threshold_max,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.aws.regions.is_empty(),
            "aws.regions must name at least one region"
        );
        anyhow::ensure!(
            self.collection.lookback_days > 0,
            "collection.lookback_days must be > 0, got {}",
            self.collection.lookback_days
        );
        anyhow::ensure!(
            self.collection.period_secs >= 60 && self.collection.period_secs % 60 == 0,
            "collection.period_secs must be a positive multiple of 60, got {}",
            self.collection.period_secs
        );
        anyhow::ensure!(
            !self.analyzer.url.is_empty(),
            "analyzer.url must be non-empty"
        );
        Ok(())
    }
}
