use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One confirmed path on the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub path: String,
    pub status: u16,
    pub length: u64,
    pub fingerprint: String,
}

impl Finding {
    pub fn new(path: String, status: u16, length: u64) -> Self {
        let fingerprint = format!("{status}-{length}");
        Self {
            path,
            status,
            length,
            fingerprint,
        }
    }
}

/// Append-only accumulator of findings, shared by all workers.
#[derive(Debug, Default)]
pub struct ResultSink {
    findings: Mutex<Vec<Finding>>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, finding: Finding) {
        self.findings.lock().unwrap().push(finding);
    }

    /// Point-in-time copy. The orchestrator calls this only after every
    /// worker has joined.
    pub fn snapshot(&self) -> Vec<Finding> {
        self.findings.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.findings.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[test]
    fn fingerprint_combines_status_and_length() {
        let finding = Finding::new("admin".to_string(), 200, 1234);
        assert_eq!(finding.fingerprint, "200-1234");
    }

    #[test]
    fn snapshot_copies_current_contents() {
        let sink = ResultSink::new();
        sink.record(Finding::new("a".to_string(), 200, 10));
        let snap = sink.snapshot();
        sink.record(Finding::new("b".to_string(), 301, 0));
        assert_eq!(snap.len(), 1);
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn concurrent_records_are_not_lost() {
        let sink = Arc::new(ResultSink::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let sink = sink.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..500 {
                    sink.record(Finding::new(format!("{t}-{i}"), 200, i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let snap = sink.snapshot();
        assert_eq!(snap.len(), 4_000);

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for finding in &snap {
            *counts.entry(finding.path.as_str()).or_default() += 1;
        }
        assert!(counts.values().all(|&c| c == 1), "duplicated record");
    }
}
