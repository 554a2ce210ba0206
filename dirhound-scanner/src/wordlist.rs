use crate::error::{Result, ScanError};
use std::fs;
use std::path::Path;

/// Load candidate paths from a wordlist file.
///
/// One candidate per non-empty trimmed line; `#` lines are comments.
/// Duplicates are kept as-is and will simply be probed twice.
pub fn load_wordlist(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        ScanError::WordlistError(format!("failed to read {}: {}", path.display(), e))
    })?;

    let words: Vec<String> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .filter(|line| !line.starts_with('#'))
        .map(|line| line.to_string())
        .collect();

    if words.is_empty() {
        return Err(ScanError::WordlistError(format!(
            "{} is empty or contains only comments",
            path.display()
        )));
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_trimmed_lines_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordlist.txt");
        fs::write(&path, "admin\n  backup \nconfig\n").unwrap();

        let words = load_wordlist(&path).unwrap();
        assert_eq!(words, vec!["admin", "backup", "config"]);
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordlist.txt");
        fs::write(&path, "# header\nadmin\n\n# note\nlogin\n").unwrap();

        let words = load_wordlist(&path).unwrap();
        assert_eq!(words, vec!["admin", "login"]);
    }

    #[test]
    fn keeps_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordlist.txt");
        fs::write(&path, "admin\nadmin\n").unwrap();

        let words = load_wordlist(&path).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.txt");
        assert!(matches!(
            load_wordlist(&path),
            Err(ScanError::WordlistError(_))
        ));
    }

    #[test]
    fn comment_only_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wordlist.txt");
        fs::write(&path, "# nothing\n# here\n").unwrap();
        assert!(matches!(
            load_wordlist(&path),
            Err(ScanError::WordlistError(_))
        ));
    }
}
