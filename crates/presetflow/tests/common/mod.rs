use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_manifest(&self, content: &str) {
        let path = self.root.path().join("presets.kdl");
        fs::write(path, content).unwrap();
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// プロジェクト内で実行する `preset`（開発者の設定からは隔離）
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("preset").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env("NO_COLOR", "1")
            .env_remove("PRESETFLOW__EMAIL")
            .env_remove("PRESETFLOW__PROJECT")
            .env_remove("PRESETFLOW__STORE_DIR")
            .env_remove("PRESETFLOW_PRESETS_PATH");
        cmd
    }
}
