use std::path::Path;
use std::process::{Command, Output};

fn vidsub(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vidsub"))
        .args(args)
        .arg("--config")
        .arg(config)
        .output()
        .expect("failed to run vidsub")
}

fn empty_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, "{}\n").unwrap();
    path
}

#[test]
fn no_arguments_prints_usage_and_languages() {
    let dir = tempfile::tempdir().unwrap();
    let out = vidsub(&[], &empty_config(dir.path()));

    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage: vidsub <video_file> [language]"));
    assert!(stdout.contains("  en: English"));
    assert!(stdout.contains("  es: Spanish"));
}

#[test]
fn avi_is_rejected_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.avi");
    std::fs::write(&video, b"not really a video").unwrap();

    let out = vidsub(&[video.to_str().unwrap()], &empty_config(dir.path()));

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unsupported file format"), "{stderr}");
    assert!(!stderr.contains("[1/4]"));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("[1/4]"));
    assert!(!dir.path().join("clip.wav").exists());
}

#[test]
fn unknown_language_is_rejected_before_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"not really a video").unwrap();

    let out = vidsub(&[video.to_str().unwrap(), "xx"], &empty_config(dir.path()));

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unsupported language: xx"), "{stderr}");
    assert!(stderr.contains("Supported languages:"));
    assert!(stderr.contains("  fr: French"));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("[1/4]"));
    assert!(!dir.path().join("clip.wav").exists());
}

#[test]
fn missing_file_lists_searched_locations() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("absent.mp4");

    let out = vidsub(&[video.to_str().unwrap()], &empty_config(dir.path()));

    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file does not exist"), "{stderr}");
    assert!(stderr.contains("/videos/absent.mp4"), "{stderr}");
}

#[test]
fn malformed_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.yaml");
    std::fs::write(&config, "model_size: gigantic\n").unwrap();
    let video = dir.path().join("clip.mp4");
    std::fs::write(&video, b"").unwrap();

    let out = vidsub(&[video.to_str().unwrap()], &config);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to load config"));
}
