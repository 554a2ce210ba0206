// Report rendering for the final sorted findings

use crate::error::Result;
use crate::sink::Finding;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Html,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "html" => Some(ReportFormat::Html),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Html => "html",
        }
    }
}

/// Plain-text report: the classic one-line-per-finding listing.
pub fn render_text(target: &str, findings: &[Finding]) -> String {
    let mut report = String::new();

    report.push_str("═══════════════════════════════════════════════════════════════\n");
    report.push_str("                     DIRHOUND SCAN RESULTS\n");
    report.push_str("═══════════════════════════════════════════════════════════════\n\n");
    report.push_str(&format!("Target:   {}\n", target));
    report.push_str(&format!("Findings: {}\n\n", findings.len()));

    for finding in findings {
        report.push_str(&format!(
            "{} - {} bytes - /{}\n",
            finding.status,
            finding.length,
            finding.path.trim_start_matches('/')
        ));
    }

    report.push_str("\n═══════════════════════════════════════════════════════════════\n");
    report.push_str("                        End of Report\n");
    report.push_str("═══════════════════════════════════════════════════════════════\n");

    report
}

/// JSON report: run metadata plus the findings array.
pub fn render_json(target: &str, findings: &[Finding]) -> Result<String> {
    let report = serde_json::json!({
        "generator": "dirhound",
        "version": env!("CARGO_PKG_VERSION"),
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "target": target,
        "total_findings": findings.len(),
        "findings": findings,
    });

    Ok(serde_json::to_string_pretty(&report)?)
}

/// HTML report: one table, same rows and order as the other formats.
pub fn render_html(target: &str, findings: &[Finding]) -> String {
    let mut rows = String::new();
    for finding in findings {
        rows.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td><td>/{}</td><td>{}</td></tr>\n",
            finding.status,
            finding.length,
            html_escape(finding.path.trim_start_matches('/')),
            html_escape(&finding.fingerprint)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>dirhound scan - {target}</title>
  <style>
    body {{ font-family: monospace; margin: 2em; }}
    table {{ border-collapse: collapse; }}
    th, td {{ border: 1px solid #999; padding: 4px 10px; text-align: left; }}
    th {{ background: #eee; }}
  </style>
</head>
<body>
  <h1>dirhound scan results</h1>
  <p>Target: {target}<br>Findings: {count}</p>
  <table>
    <thead>
      <tr><th>Status</th><th>Length</th><th>Path</th><th>Fingerprint</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        target = html_escape(target),
        count = findings.len(),
        rows = rows
    )
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// Write all three renderings of the same findings to `dir`, one
/// timestamped file per format. Returns the paths written.
pub fn write_reports(dir: &Path, target: &str, findings: &[Finding]) -> Result<Vec<PathBuf>> {
    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
    let mut written = Vec::new();

    for format in [ReportFormat::Text, ReportFormat::Json, ReportFormat::Html] {
        let content = match format {
            ReportFormat::Text => render_text(target, findings),
            ReportFormat::Json => render_json(target, findings)?,
            ReportFormat::Html => render_html(target, findings),
        };
        let path = dir.join(format!("dirhound-{}.{}", stamp, format.extension()));
        save_report(&content, &path)?;
        written.push(path);
    }

    Ok(written)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
