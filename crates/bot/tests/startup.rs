use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use tempfile::NamedTempFile;
use tokio::time::timeout;

/// Run the binary with a controlled environment and wait for it to exit.
async fn run_bot(config_path: &std::path::Path, token: Option<&str>) -> std::process::ExitStatus {
    let mut command = tokio::process::Command::new(env!("CARGO_BIN_EXE_kakaogram"));
    command
        .env("KAKAOGRAM_CONFIG", config_path)
        .env("RUST_LOG", "error")
        .env_remove("TELEGRAM_TOKEN")
        .env_remove("KAKAOGRAM_TELEGRAM__TOKEN")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true);
    if let Some(token) = token {
        command.env("TELEGRAM_TOKEN", token);
    }

    let mut child = command.spawn().expect("Failed to spawn bot");
    timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("bot did not exit")
        .expect("failed to wait for bot")
}

#[tokio::test]
async fn test_exits_without_token() {
    let missing = std::env::temp_dir().join("kakaogram-missing-config.toml");

    let status = run_bot(&missing, None).await;

    assert!(!status.success());
}

#[tokio::test]
async fn test_exits_on_invalid_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[sticker]\ncanvas_size = 0").unwrap();

    let status = run_bot(file.path(), Some("123:abc")).await;

    assert!(!status.success());
}

#[tokio::test]
async fn test_exits_on_malformed_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[telegram\nnot toml").unwrap();

    let status = run_bot(file.path(), Some("123:abc")).await;

    assert!(!status.success());
}
