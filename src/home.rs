use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};

use crate::fsops;

const HOME_DIRNAME: &str = ".firelib";
const HOME_ENV: &str = "FIRELIB_HOME";

/// Directory layout under the Firelib home (`~/.firelib` by default).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HomeLayout {
    pub root: Utf8PathBuf,
    pub config: Utf8PathBuf,
    pub data: Utf8PathBuf,
    pub logs: Utf8PathBuf,
}

/// Resolve the Firelib home: `$FIRELIB_HOME` when set, else `~/.firelib`.
pub fn firelib_home() -> Result<Utf8PathBuf> {
    if let Some(value) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Utf8PathBuf::from_path_buf(value.into())
            .map_err(|_| anyhow!("{HOME_ENV} must be valid UTF-8"));
    }

    let mut path = dirs::home_dir().ok_or_else(|| anyhow!("unable to determine home directory"))?;
    path.push(HOME_DIRNAME);
    Utf8PathBuf::from_path_buf(path).map_err(|_| anyhow!("home path must be valid UTF-8"))
}

impl HomeLayout {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join("config"),
            data: root.join("data"),
            logs: root.join("logs"),
            root,
        }
    }

    pub fn discover() -> Result<Self> {
        firelib_home().map(Self::new)
    }

    pub fn config_path(&self, name: &str) -> Utf8PathBuf {
        self.config.join(name)
    }

    pub fn data_path(&self, name: &str) -> Utf8PathBuf {
        self.data.join(name)
    }

    pub fn log_path(&self, name: &str) -> Utf8PathBuf {
        self.logs.join(name)
    }

    fn dirs(&self) -> [&Utf8Path; 4] {
        [
            self.root.as_path(),
            self.config.as_path(),
            self.data.as_path(),
            self.logs.as_path(),
        ]
    }

    pub fn is_initialized(&self) -> bool {
        self.dirs().iter().all(|dir| dir.is_dir())
    }

    /// Create the home directory and its subdirectories. Safe to repeat.
    pub fn init(&self) -> Result<()> {
        for dir in self.dirs() {
            fsops::make_dir_all(dir).with_context(|| format!("creating directory {}", dir))?;
        }
        tracing::info!(home = %self.root, "firelib home ready");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn layout_paths_join_under_root() {
        let layout = HomeLayout::new("/opt/fire");
        assert_eq!(layout.config_path("firelib.toml"), "/opt/fire/config/firelib.toml");
        assert_eq!(layout.data_path("cache.db"), "/opt/fire/data/cache.db");
        assert_eq!(layout.log_path("fire.log"), "/opt/fire/logs/fire.log");
    }

    #[test]
    fn init_creates_layout_and_can_repeat() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().join("home")).unwrap();
        let layout = HomeLayout::new(root);

        assert!(!layout.is_initialized());
        layout.init().unwrap();
        assert!(layout.is_initialized());
        layout.init().unwrap();
        assert!(layout.logs.is_dir());
    }

    #[test]
    fn init_fails_when_a_file_is_in_the_way() {
        let tmp = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).unwrap();
        std::fs::write(root.join("data"), "not a dir").unwrap();

        let err = HomeLayout::new(root).init().unwrap_err();
        let fs_err = err.downcast_ref::<crate::FsError>().unwrap();
        assert!(matches!(fs_err, crate::FsError::NameCollision { .. }));
    }
}
