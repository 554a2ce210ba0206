use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::probe::{self, ProbeOutcome};
use crate::progress::ProgressTracker;
use crate::queue::WorkQueue;
use crate::sink::{Finding, ResultSink};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Called from the progress poll task with (processed, total).
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Called the moment a finding is recorded.
pub type FoundCallback = Arc<dyn Fn(&Finding) + Send + Sync>;

/// How often the reporting task samples the progress counter.
const PROGRESS_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Drives a scan: loads the queue, runs the worker pool and the progress
/// poll task, waits for drain, and returns the sorted findings.
pub struct Scanner {
    config: ScanConfig,
    progress_callback: Option<ProgressCallback>,
    found_callback: Option<FoundCallback>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            progress_callback: None,
            found_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn with_found_callback(mut self, callback: FoundCallback) -> Self {
        self.found_callback = Some(callback);
        self
    }

    /// Validate the base URL and give it the trailing slash `Url::join`
    /// needs so candidate paths resolve under it, not beside it.
    pub fn normalize_base_url(raw: &str) -> Result<Url> {
        let mut url = Url::parse(raw)
            .map_err(|e| ScanError::InvalidUrl(format!("'{raw}': {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ScanError::InvalidUrl(format!(
                    "'{raw}': unsupported scheme '{other}'"
                )));
            }
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Run the full scan against `base_url` with the given candidate paths.
    ///
    /// Returns once the queue is drained and every worker has joined; the
    /// findings come back sorted ascending by (status, length).
    pub async fn scan(&self, base_url: &str, paths: Vec<String>) -> Result<Vec<Finding>> {
        let base = Self::normalize_base_url(base_url)?;
        let total = paths.len();

        let queue = Arc::new(WorkQueue::new(paths));
        let sink = Arc::new(ResultSink::new());
        let progress = Arc::new(ProgressTracker::new());
        let failed = Arc::new(AtomicUsize::new(0));

        info!(
            "Scanning {} with {} workers over {} paths",
            base, self.config.workers, total
        );

        // One connection-reusing client per worker for the whole run,
        // built up front so a client error aborts before anything spawns.
        let mut clients = Vec::with_capacity(self.config.workers);
        for _ in 0..self.config.workers {
            clients.push(probe::build_client(&self.config)?);
        }

        // Reporting task: read-only poll of the counter, never blocks a
        // worker and no worker ever waits on it.
        let reporter = self.progress_callback.clone().map(|callback| {
            let progress = progress.clone();
            tokio::spawn(async move {
                let mut tick = tokio::time::interval(PROGRESS_POLL_INTERVAL);
                loop {
                    tick.tick().await;
                    callback(progress.value(), total);
                }
            })
        });

        let mut worker_handles = Vec::with_capacity(self.config.workers);
        for (worker_id, client) in clients.into_iter().enumerate() {
            let base = base.clone();
            let config = self.config.clone();
            let queue = queue.clone();
            let sink = sink.clone();
            let progress = progress.clone();
            let failed = failed.clone();
            let found_callback = self.found_callback.clone();

            let handle = tokio::spawn(async move {
                debug!("Worker {} started", worker_id);

                while let Some(path) = queue.try_pull() {
                    let target = match base.join(path.trim_start_matches('/')) {
                        Ok(url) => url,
                        Err(e) => {
                            warn!("Worker {}: skipping '{}': {}", worker_id, path, e);
                            progress.increment();
                            continue;
                        }
                    };

                    let outcome = probe::probe(&client, &target, &config).await;
                    progress.increment();

                    match outcome {
                        ProbeOutcome::Hit {
                            status,
                            length,
                            fingerprint,
                        } => {
                            let finding = Finding {
                                path,
                                status,
                                length,
                                fingerprint,
                            };
                            if let Some(ref callback) = found_callback {
                                callback(&finding);
                            }
                            sink.record(finding);
                        }
                        ProbeOutcome::Filtered(status) => {
                            debug!("Worker {}: {} filtered ({})", worker_id, target, status);
                        }
                        ProbeOutcome::Failed => {
                            failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                }

                debug!("Worker {} finished", worker_id);
            });

            worker_handles.push(handle);
        }

        // Drain: queue exhausted and every worker joined. Only after this
        // is the sink safe to read.
        for handle in worker_handles {
            handle.await?;
        }

        if let Some(reporter) = reporter {
            reporter.abort();
        }
        // Final update so the display lands on 100% rather than one poll
        // interval short of it.
        if let Some(ref callback) = self.progress_callback {
            callback(progress.value(), total);
        }

        let failed = failed.load(Ordering::Relaxed);
        if failed > 0 {
            warn!(
                "{} paths failed after {} retries and were dropped from the report",
                failed, self.config.max_retries
            );
        }

        let mut findings = sink.snapshot();
        sort_findings(&mut findings);

        info!(
            "Scan complete: {} findings from {} paths ({} failed)",
            findings.len(),
            total,
            failed
        );
        Ok(findings)
    }
}

/// Deterministic export order: ascending by (status, length), stable for
/// equal keys.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by_key(|f| (f.status, f.length));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_trailing_slash() {
        let url = Scanner::normalize_base_url("http://example.com/api").unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/");
    }

    #[test]
    fn normalize_keeps_existing_slash() {
        let url = Scanner::normalize_base_url("http://example.com/api/").unwrap();
        assert_eq!(url.path(), "/api/");
    }

    #[test]
    fn normalize_handles_bare_host() {
        let url = Scanner::normalize_base_url("http://example.com").unwrap();
        assert_eq!(url.path(), "/");
        assert_eq!(url.join("admin").unwrap().as_str(), "http://example.com/admin");
    }

    #[test]
    fn normalized_base_joins_under_its_path() {
        let url = Scanner::normalize_base_url("http://example.com/api").unwrap();
        assert_eq!(
            url.join("users").unwrap().as_str(),
            "http://example.com/api/users"
        );
    }

    #[test]
    fn normalize_rejects_garbage() {
        assert!(matches!(
            Scanner::normalize_base_url("not a url"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn normalize_rejects_non_http_schemes() {
        assert!(matches!(
            Scanner::normalize_base_url("ftp://example.com/"),
            Err(ScanError::InvalidUrl(_))
        ));
    }

    #[test]
    fn sort_is_ascending_by_status_then_length() {
        let mut findings = vec![
            Finding::new("e1".into(), 500, 10),
            Finding::new("e2".into(), 200, 50),
            Finding::new("e3".into(), 200, 20),
        ];
        sort_findings(&mut findings);
        let order: Vec<(u16, u64)> = findings.iter().map(|f| (f.status, f.length)).collect();
        assert_eq!(order, vec![(200, 20), (200, 50), (500, 10)]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let mut findings = vec![
            Finding::new("first".into(), 200, 10),
            Finding::new("second".into(), 200, 10),
        ];
        sort_findings(&mut findings);
        assert_eq!(findings[0].path, "first");
        assert_eq!(findings[1].path, "second");
    }
}
