use clap::ArgMatches;
use colored::Colorize;
use dirhound_scanner::wordlist::load_wordlist;
use dirhound_scanner::{Finding, ScanConfig, Scanner, report};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Parse a comma-separated list of status codes, e.g. "400,404,500".
pub fn parse_status_codes(raw: &str) -> Result<Vec<u16>, String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u16>()
                .map_err(|_| format!("invalid status code '{s}'"))
        })
        .collect()
}

fn fail(message: &str) -> ! {
    eprintln!("{} {}", "✗".red().bold(), message);
    std::process::exit(1);
}

pub async fn handle_scan(args: &ArgMatches, quiet: bool) {
    let url = args.get_one::<Url>("url").unwrap();
    let wordlist_path = args.get_one::<PathBuf>("wordlist").unwrap();
    let threads = *args.get_one::<usize>("threads").unwrap();
    let timeout = *args.get_one::<u64>("timeout").unwrap();
    let retries = *args.get_one::<usize>("retries").unwrap();
    let throttle_min = *args.get_one::<u64>("throttle-min").unwrap();
    let throttle_max = *args.get_one::<u64>("throttle-max").unwrap();
    let exclude = args.get_one::<String>("exclude").unwrap();
    let output_dir = args.get_one::<PathBuf>("output").unwrap();
    let no_progress = args.get_flag("no-progress");

    // All configuration problems surface here, before any worker starts.
    let excluded_statuses = match parse_status_codes(exclude) {
        Ok(codes) => codes,
        Err(e) => fail(&e),
    };

    let words = match load_wordlist(wordlist_path) {
        Ok(words) => words,
        Err(e) => fail(&e.to_string()),
    };
    let total = words.len();

    if !output_dir.is_dir() {
        fail(&format!(
            "output directory {} does not exist",
            output_dir.display()
        ));
    }

    if !quiet {
        println!(
            "Probing {} paths on {} with {} workers\n",
            total.to_string().bright_white(),
            url.as_str().bright_white(),
            threads.to_string().bright_white()
        );
    }

    let config = ScanConfig::default()
        .with_workers(threads)
        .with_timeout(Duration::from_secs(timeout))
        .with_max_retries(retries)
        .with_throttle_ms(throttle_min, throttle_max)
        .with_excluded_statuses(excluded_statuses);

    let progress_bar = if no_progress {
        None
    } else {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb.set_message("0.00%");
        Some(Arc::new(pb))
    };

    let mut scanner = Scanner::new(config);

    if let Some(ref pb) = progress_bar {
        let pb_progress = pb.clone();
        scanner = scanner.with_progress_callback(Arc::new(move |processed, total| {
            pb_progress.set_position(processed as u64);
            let pct = if total == 0 {
                100.0
            } else {
                processed as f64 / total as f64 * 100.0
            };
            pb_progress.set_message(format!("{:.2}%", pct));
        }));

        let pb_found = pb.clone();
        scanner = scanner.with_found_callback(Arc::new(move |finding: &Finding| {
            pb_found.println(format!(
                "{} {} - {} bytes - /{}",
                "[+]".green().bold(),
                finding.status,
                finding.length,
                finding.path.trim_start_matches('/')
            ));
        }));
    } else {
        scanner = scanner.with_found_callback(Arc::new(|finding: &Finding| {
            println!(
                "[+] {} - {} bytes - /{}",
                finding.status,
                finding.length,
                finding.path.trim_start_matches('/')
            );
        }));
    }

    let findings = match scanner.scan(url.as_str(), words).await {
        Ok(findings) => findings,
        Err(e) => {
            if let Some(ref pb) = progress_bar {
                pb.finish_and_clear();
            }
            fail(&format!("scan failed: {e}"));
        }
    };

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message("100.00%");
    }

    println!("\n=== Results ===");
    for finding in &findings {
        println!(
            "{} - {} bytes - /{}",
            finding.status,
            finding.length,
            finding.path.trim_start_matches('/')
        );
    }

    match report::write_reports(output_dir, url.as_str(), &findings) {
        Ok(written) => {
            if !quiet {
                println!();
                for path in written {
                    println!("{} Report written to {}", "→".blue(), path.display());
                }
            }
        }
        Err(e) => fail(&format!("failed to write reports: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_codes() {
        assert_eq!(parse_status_codes("400,404"), Ok(vec![400, 404]));
        assert_eq!(parse_status_codes(" 301 , 404 "), Ok(vec![301, 404]));
    }

    #[test]
    fn rejects_non_numeric_codes() {
        assert!(parse_status_codes("404,abc").is_err());
    }

    #[test]
    fn ignores_empty_segments() {
        assert_eq!(parse_status_codes("404,,400,"), Ok(vec![404, 400]));
    }
}
