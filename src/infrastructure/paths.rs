//! Paths inside the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox mount point of the host directory Zellij was started from.
const HOST_ROOT: &str = "/host";

/// Directory holding Pixellij's trace files.
///
/// Resolves to `~/.local/share/zellij/pixellij` on the host when Zellij was
/// started from the home directory.
///
/// # Examples
///
/// ```
/// use pixellij::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/pixellij"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/pixellij")
}

/// Maps a `~`-relative path from the plugin configuration into the sandbox.
///
/// Other paths are returned unchanged.
///
/// # Examples
///
/// ```
/// use pixellij::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/.config/pixellij/theme.toml"), "/host/.config/pixellij/theme.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}
