// Upload the snapshot to the analysis endpoint and parse the summary.
//
// The original tool disabled TLS certificate verification for this call.
// Verification is on by default here; `verify_tls = false` (--insecure)
// restores the old behavior and logs a warning.

use anyhow::{Context, Result};
use tracing::warn;

use crate::models::{FleetSnapshot, SummaryResult, Threshold};

pub struct AnalyzerClient {
    endpoint: String,
    client: reqwest::Client,
}

impl AnalyzerClient {
    pub fn new(endpoint: &str, verify_tls: bool) -> Result<Self> {
        if !verify_tls {
            warn!("TLS certificate verification disabled for the analysis endpoint");
        }
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!verify_tls)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    /// POSTs the snapshot with `threshold` stamped in and returns the
    /// server-computed summary. Errors here propagate: an unreachable or
    /// misbehaving analyzer ends the run.
    pub async fn analyze(
        &self,
        snapshot: &FleetSnapshot,
        threshold: Threshold,
    ) -> Result<SummaryResult> {
        let mut payload = snapshot.clone();
        payload.threshold = threshold;

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("POST {} failed", self.endpoint))?
            .error_for_status()
            .context("analysis endpoint returned an error status")?;

        resp.json::<SummaryResult>()
            .await
            .context("failed to parse analyzer response")
    }
}
