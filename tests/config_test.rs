// tests/config_test.rs
use git_shortcuts::config::{load_config, Config, LOCAL_CONFIG_FILE};
use serial_test::serial;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

struct CwdGuard {
    previous: std::path::PathBuf,
}

impl CwdGuard {
    fn enter(dir: &std::path::Path) -> Self {
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir).unwrap();
        CwdGuard { previous }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

#[test]
fn test_load_from_explicit_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[git]
remote = "upstream"
branch = "main"

[commit]
default_message = "Checkpoint"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.branch, "main");
    assert_eq!(config.git.program, "git");
    assert_eq!(config.commit.default_message, "Checkpoint");
}

#[test]
fn test_missing_explicit_file_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    let err = load_config(Some(path.to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_invalid_explicit_file_is_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[git]\nbranch = \"\"\n").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().contains("git.branch"));
}

#[test]
#[serial]
fn test_local_file_in_current_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[git]\nremote = \"mirror\"\n",
    )
    .unwrap();

    let _cwd = CwdGuard::enter(dir.path());
    let config = load_config(None).unwrap();
    assert_eq!(config.git.remote, "mirror");
    assert_eq!(config.git.branch, "master");
}

#[test]
#[serial]
fn test_explicit_path_wins_over_local_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(LOCAL_CONFIG_FILE),
        "[git]\nremote = \"mirror\"\n",
    )
    .unwrap();
    let explicit = dir.path().join("other.toml");
    std::fs::write(&explicit, "[git]\nremote = \"backup\"\n").unwrap();

    let _cwd = CwdGuard::enter(dir.path());
    let config = load_config(Some(explicit.to_str().unwrap())).unwrap();
    assert_eq!(config.git.remote, "backup");
}

#[test]
fn test_overrides_apply_after_loading() {
    let config = Config::default().with_overrides(Some("upstream".into()), Some("trunk".into()));
    assert_eq!(config.git.remote, "upstream");
    assert_eq!(config.git.branch, "trunk");
    assert!(config.validate().is_ok());
}
