//! Integration tests for Vox

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Command isolated from the user's config, cache, .env and token
    fn vox(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("vox");
        cmd.current_dir(temp.path())
            .env("VOX_CONFIG", temp.path().join("config.toml"))
            .env("VOX_CACHE", temp.path().join("handles.json"))
            .env_remove("BOT_TOKEN");
        cmd
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("upload-handle cache"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("vox"));
    }

    #[test]
    fn cache_path_uses_override() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .args(["cache", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("handles.json"));
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached handles"));
    }

    #[test]
    fn cache_set_get_roundtrip() {
        let temp = TempDir::new().unwrap();

        vox(&temp)
            .args(["cache", "set", "clip.ogg", "ABC123"])
            .assert()
            .success();

        vox(&temp)
            .args(["cache", "get", "clip.ogg"])
            .assert()
            .success()
            .stdout("ABC123\n");

        let content = std::fs::read_to_string(temp.path().join("handles.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["clip.ogg"], "ABC123");
    }

    #[test]
    fn cache_get_missing_fails() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .args(["cache", "get", "other.ogg"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("No handle cached for other.ogg"));
    }

    #[test]
    fn cache_reads_existing_artifact() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("handles.json"), r#"{"clip.ogg": "XYZ"}"#).unwrap();

        vox(&temp)
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("clip.ogg\tXYZ\n");
    }

    #[test]
    fn cache_malformed_warns_but_succeeds() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("handles.json"), "{not json").unwrap();

        vox(&temp)
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No cached handles"))
            .stderr(predicate::str::contains("malformed"));
    }

    #[test]
    fn cache_set_replaces_malformed_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("handles.json"), "{not json").unwrap();

        vox(&temp)
            .args(["cache", "set", "clip.ogg", "ABC123"])
            .assert()
            .success();

        vox(&temp)
            .args(["cache", "get", "clip.ogg"])
            .assert()
            .success()
            .stdout("ABC123\n");
    }

    #[test]
    fn cache_remove_and_clear() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("handles.json"),
            r#"{"a": "1", "b": "2"}"#,
        )
        .unwrap();

        vox(&temp).args(["cache", "remove", "a"]).assert().success();
        vox(&temp)
            .args(["cache", "list", "--format", "plain"])
            .assert()
            .success()
            .stdout("b\t2\n");

        vox(&temp).args(["cache", "clear"]).assert().success();
        assert!(!temp.path().join("handles.json").exists());
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[voice]"));
    }

    #[test]
    fn config_init_then_path() {
        let temp = TempDir::new().unwrap();
        vox(&temp).args(["config", "init"]).assert().success();
        assert!(temp.path().join("config.toml").exists());

        vox(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn send_without_token_fails() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .args(["send", "--chat", "42"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Bot token not set"));
    }

    #[test]
    fn serve_without_token_fails() {
        let temp = TempDir::new().unwrap();
        vox(&temp)
            .arg("serve")
            .assert()
            .failure()
            .stderr(predicate::str::contains("BOT_TOKEN"));
    }
}
