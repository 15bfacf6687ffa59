use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const POSTGRES_MANIFEST: &str = r#"apiVersion: oplat/v1
kind: Postgres
metadata:
  name: mydb
spec:
  username: app
  password: s3cret
  dbname: orders
  port: 15432
"#;

/// Compose file as `resource create` would have rendered it
pub const RENDERED_COMPOSE: &str = r#"name: shop
services:
  mydbDb:
    image: postgres:16
    environment:
      POSTGRES_USER: app
      POSTGRES_PASSWORD: s3cret
      POSTGRES_DB: orders
    ports:
      - "15432:5432"
    volumes:
      - mydbData:/var/lib/postgresql/data
volumes:
  mydbData: {}
"#;

pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    pub fn write_manifest(&self, content: &str) -> PathBuf {
        let path = self.root.path().join("resources.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[allow(dead_code)]
    pub fn write_rendered_compose(&self, content: &str) {
        let dir = self.root.path().join(".oplat");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("docker-compose.yaml"), content).unwrap();
    }

    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    /// `oplat` run inside the project, isolated from the user's config
    #[allow(deprecated)]
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("oplat").unwrap();
        cmd.current_dir(self.path())
            .env("OPLAT_CONFIG_PATH", self.path().join("no-config.yaml"))
            .env("OPLAT_STACK_NAME", "shop")
            .env_remove("OPLAT_PROVIDER")
            .env_remove("RUST_LOG");
        cmd
    }
}
