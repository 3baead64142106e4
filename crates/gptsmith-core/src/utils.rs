//! Utility helpers — path resolution, timestamps, filename sanitizing.

use std::path::PathBuf;

use chrono::{DateTime, SubsecRound, Utc};

/// Get the GPT Smith data directory (e.g. `~/.gptsmith/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".gptsmith")
}

/// Get the REPL history directory (e.g. `~/.gptsmith/history/`).
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Current UTC time truncated to milliseconds.
pub fn now_millis() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Sanitize a string for use as a filename.
pub fn safe_filename(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Expand `~` to the home directory in a path string.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_next::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs_next::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_filename() {
        assert_eq!(safe_filename("hello world!"), "hello world!");
        assert_eq!(safe_filename("a/b\\c"), "a_b_c");
        assert_eq!(safe_filename("what?: <this>|\"that\"*"), "what__ _this___that__");
        assert_eq!(safe_filename("tab\there"), "tab_here");
        assert_eq!(safe_filename("my-gpt_v2.json"), "my-gpt_v2.json");
    }

    #[test]
    fn test_expand_home_tilde() {
        let expanded = expand_home("~/exports");
        assert!(!expanded.starts_with("~"));
        assert!(expanded.ends_with("exports"));
    }

    #[test]
    fn test_expand_home_absolute() {
        assert_eq!(expand_home("/tmp/out"), PathBuf::from("/tmp/out"));
        assert_eq!(expand_home("relative"), PathBuf::from("relative"));
    }

    #[test]
    fn test_now_millis_has_no_sub_millisecond_part() {
        let ts = now_millis();
        assert_eq!(ts.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn test_data_path_ends_with_gptsmith() {
        assert!(get_data_path().ends_with(".gptsmith"));
        assert!(get_history_path().ends_with("history"));
    }
}
