use crate::config::ScanConfig;
use crate::error::Result;
use rand::Rng;
use rand::seq::IndexedRandom;
use reqwest::Client;
use reqwest::header::USER_AGENT;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Classified result of probing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The path is present: any status outside the excluded set.
    Hit {
        status: u16,
        length: u64,
        fingerprint: String,
    },
    /// Status in the excluded set, the expected negative signal.
    Filtered(u16),
    /// Network failure that survived every retry.
    Failed,
}

/// Build the long-lived client a single worker owns for the whole run.
/// Redirects are never followed; a redirect status is a result in itself.
pub fn build_client(config: &ScanConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.timeout)
        .connect_timeout(config.timeout)
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .redirect(reqwest::redirect::Policy::none())
        .build()?;
    Ok(client)
}

/// Issue one GET against `url` with retry and post-response throttling.
///
/// Transient network errors are retried up to `config.max_retries` extra
/// attempts with a fixed pause between them; exhaustion yields `Failed`.
/// Nothing here panics on network trouble.
pub async fn probe(client: &Client, url: &Url, config: &ScanConfig) -> ProbeOutcome {
    let mut attempt = 0;
    let response = loop {
        let identity = pick_user_agent(config);
        debug!("GET {} (attempt {})", url, attempt + 1);

        match client
            .get(url.clone())
            .header(USER_AGENT, identity)
            .send()
            .await
        {
            Ok(response) => break response,
            Err(e) => {
                if attempt >= config.max_retries {
                    warn!("{} failed after {} attempts: {}", url, attempt + 1, e);
                    return ProbeOutcome::Failed;
                }
                attempt += 1;
                debug!(
                    "{}: retry {}/{} ({})",
                    url, attempt, config.max_retries, e
                );
                tokio::time::sleep(config.retry_pause).await;
            }
        }
    };

    let status = response.status().as_u16();
    let length = match response.bytes().await {
        Ok(body) => body.len() as u64,
        Err(e) => {
            // Connection died mid-body; treat like any other transport loss.
            warn!("{}: body read failed: {}", url, e);
            return ProbeOutcome::Failed;
        }
    };

    // Pace this worker's request rate before handing the outcome back.
    if let Some(delay) = throttle_delay(config) {
        tokio::time::sleep(delay).await;
    }

    classify(status, length, config)
}

/// Map a received response onto an outcome.
pub fn classify(status: u16, length: u64, config: &ScanConfig) -> ProbeOutcome {
    if config.is_excluded(status) {
        ProbeOutcome::Filtered(status)
    } else {
        ProbeOutcome::Hit {
            status,
            length,
            fingerprint: format!("{status}-{length}"),
        }
    }
}

fn pick_user_agent(config: &ScanConfig) -> String {
    config
        .user_agents
        .choose(&mut rand::rng())
        .cloned()
        .unwrap_or_default()
}

fn throttle_delay(config: &ScanConfig) -> Option<Duration> {
    let (min, max) = config.throttle_ms;
    if max == 0 {
        return None;
    }
    let millis = rand::rng().random_range(min..=max);
    Some(Duration::from_millis(millis))
}
