//! Path handling inside the Zellij plugin sandbox.
//!
//! The host filesystem is mounted under `/host`, which points at the cwd of the
//! last focused terminal (or wherever Zellij was started). Exports default to
//! that directory; trace output goes under the Zellij data directory.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Returns the data directory used for trace output.
///
/// Resolves to `/host/.local/share/zellij/userdeck`, which is
/// `~/.local/share/zellij/userdeck` when Zellij was started from the home
/// directory.
///
/// # Examples
///
/// ```
/// use userdeck::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/userdeck"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("userdeck")
}

/// Expands `~` to the sandbox host root.
///
/// # Examples
///
/// ```
/// use userdeck::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/exports"), "/host/exports");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/exports"), "/tmp/exports");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Removes the `/host` prefix so a sandbox path reads like a host path.
///
/// # Examples
///
/// ```
/// use userdeck::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/exports/users.csv"), "/exports/users.csv");
/// assert_eq!(strip_host_prefix("/host"), "/");
/// assert_eq!(strip_host_prefix("/tmp/users.csv"), "/tmp/users.csv");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    match path.strip_prefix(HOST_ROOT) {
        Some("") => "/".to_string(),
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        _ => path.to_string(),
    }
}

/// Resolves the configured export directory to a sandbox path.
///
/// Blank values fall back to the host root.
#[must_use]
pub fn resolve_export_dir(configured: Option<&str>) -> String {
    match configured.map(str::trim) {
        Some(dir) if !dir.is_empty() => expand_tilde(dir),
        _ => HOST_ROOT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_dir_defaults_to_host_root() {
        assert_eq!(resolve_export_dir(None), "/host");
        assert_eq!(resolve_export_dir(Some("   ")), "/host");
        assert_eq!(resolve_export_dir(Some("~/Downloads")), "/host/Downloads");
        assert_eq!(resolve_export_dir(Some("/data")), "/data");
    }

    #[test]
    fn host_prefix_only_strips_whole_components() {
        assert_eq!(strip_host_prefix("/hostname/x"), "/hostname/x");
    }
}
