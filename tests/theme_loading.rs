use pixellij::{Config, PixellijError, Theme};
use std::io::Write;
use tempfile::NamedTempFile;

const CUSTOM_THEME: &str = r##"
name = "paper"

[colors]
header_fg = "#111111"
selection_fg = "#ffffff"
selection_bg = "#333333"
text_normal = "#111111"
text_dim = "#777777"
border = "#cccccc"
search_bar_border = "#333333"
id_fg = "#aa5500"
url_fg = "#0055aa"
loading_fg = "#aa8800"
error_fg = "#cc0000"
empty_state_fg = "#0000cc"
overlay_border = "#333333"
"##;

fn theme_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write theme");
    file
}

#[test]
fn custom_theme_file_is_loaded() {
    let file = theme_file(CUSTOM_THEME);

    let theme = Theme::from_file(file.path()).expect("valid theme");

    assert_eq!(theme.name, "paper");
    assert_eq!(theme.colors.error_fg, "#cc0000");
    assert_eq!(theme.colors.overlay_bg, None);
}

#[test]
fn invalid_theme_file_is_a_theme_error() {
    let file = theme_file("name = \"broken\"\n[colors]\nheader_fg = 3\n");

    let err = Theme::from_file(file.path()).expect_err("missing colors");

    assert!(matches!(err, PixellijError::Theme(_)), "{err:?}");
}

#[test]
fn missing_theme_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");

    let err = Theme::from_file(dir.path().join("nope.toml")).expect_err("no such file");

    assert!(matches!(err, PixellijError::Io(_)), "{err:?}");
}

#[test]
fn config_prefers_theme_file_over_name() {
    let file = theme_file(CUSTOM_THEME);
    let config = Config {
        theme_name: "catppuccin-latte".to_string(),
        theme_file: Some(file.path().display().to_string()),
        ..Config::default()
    };

    assert_eq!(config.load_theme().name, "paper");
}

#[test]
fn broken_theme_file_falls_back_to_named_theme() {
    let file = theme_file("not toml at all [");
    let config = Config {
        theme_name: "catppuccin-latte".to_string(),
        theme_file: Some(file.path().display().to_string()),
        ..Config::default()
    };

    assert_eq!(config.load_theme().name, "catppuccin-latte");
}
