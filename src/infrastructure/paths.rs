//! Path helpers for the data directory.
//!
//! The data directory holds the trace file. It is configurable and may start
//! with `~`, which is resolved against `$HOME`.

use std::path::PathBuf;

/// Default data directory before tilde expansion.
pub const DEFAULT_DATA_DIR: &str = "~/.local/share/panenav";

/// Expands a leading `~` using the `HOME` environment variable.
///
/// Paths without a leading tilde, or a missing `HOME`, are returned unchanged.
///
/// # Examples
///
/// ```
/// use panenav::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/var/lib/panenav"), "/var/lib/panenav");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let home = std::env::var("HOME").ok();
    expand_tilde_with(path, home.as_deref())
}

fn expand_tilde_with(path: &str, home: Option<&str>) -> String {
    let Some(home) = home else {
        return path.to_string();
    };
    let home = home.trim_end_matches('/');

    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

/// Resolves the configured data directory to a concrete path.
#[must_use]
pub fn data_dir(configured: Option<&str>) -> PathBuf {
    PathBuf::from(expand_tilde(configured.unwrap_or(DEFAULT_DATA_DIR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_forms_expand_against_home() {
        assert_eq!(expand_tilde_with("~", Some("/home/ada/")), "/home/ada");
        assert_eq!(expand_tilde_with("~/notes", Some("/home/ada")), "/home/ada/notes");
        assert_eq!(expand_tilde_with("~other/x", Some("/home/ada")), "~other/x");
        assert_eq!(expand_tilde_with("~/notes", None), "~/notes");
    }
}
