use super::*;
use std::fs;
use std::path::PathBuf;

#[test]
fn test_default_config() {
    let config = WindowsConfig::default();
    assert_eq!(config.default_width, DEFAULT_WINDOW_WIDTH);
    assert_eq!(config.default_height, DEFAULT_WINDOW_HEIGHT);
    assert_eq!(config.background_color, DEFAULT_BACKGROUND_COLOR);
    assert_eq!(config.partition, DEFAULT_PARTITION);
    assert_eq!(config.default_route, DEFAULT_ROUTE);
    assert_eq!(config.index_policy, IndexPolicy::Monotonic);
    assert!(config.clamp_to_displays);
}

#[test]
fn test_default_geometry_is_unplaced() {
    let geometry = WindowsConfig::default().default_geometry();
    assert_eq!(geometry.position, None);
    assert_eq!(geometry.size.width, 1200);
    assert_eq!(geometry.size.height, 800);
}

#[test]
fn test_partial_json_fills_defaults() {
    let json = r#"{"defaultWidth": 640, "indexPolicy": "activeCount"}"#;
    let config: WindowsConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.default_width, 640);
    assert_eq!(config.default_height, DEFAULT_WINDOW_HEIGHT);
    assert_eq!(config.index_policy, IndexPolicy::ActiveCount);
    assert_eq!(config.background_color, "#00A2DF");
}

#[test]
fn test_optional_paths_are_skipped_when_unset() {
    let json = serde_json::to_string(&WindowsConfig::default()).unwrap();
    assert!(!json.contains("pagePath"));
    assert!(!json.contains("sessionFile"));
    assert!(json.contains("defaultRoute"));
}

#[test]
fn test_explicit_paths_win() {
    let config = WindowsConfig {
        page_path: Some(PathBuf::from("/opt/arc/app.html")),
        session_file: Some(PathBuf::from("/tmp/arc-session.json")),
        ..Default::default()
    };
    assert_eq!(config.page_path(), PathBuf::from("/opt/arc/app.html"));
    assert_eq!(config.session_file(), PathBuf::from("/tmp/arc-session.json"));
}

#[test]
fn test_default_page_is_app_html() {
    let page = WindowsConfig::default().page_path();
    assert_eq!(page.file_name().unwrap(), "app.html");
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(&dir.path().join("nope.json")));
    assert_eq!(config.default_width, DEFAULT_WINDOW_WIDTH);
}

#[test]
fn test_load_invalid_json_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windows.json");
    fs::write(&path, "{ not json").unwrap();
    let config = load_config(Some(&path));
    assert_eq!(config.partition, DEFAULT_PARTITION);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("windows.json");
    fs::write(
        &path,
        r##"{"backgroundColor": "#222222", "clampToDisplays": false, "defaultRoute": "/home"}"##,
    )
    .unwrap();
    let config = load_config(Some(&path));
    assert_eq!(config.background_color, "#222222");
    assert!(!config.clamp_to_displays);
    assert_eq!(config.default_route, "/home");
}
