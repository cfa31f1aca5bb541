use derive_new::new;
use std::path::{Path, PathBuf};

const GIT_ENV: &str = "VC_GIT";
const REMOTE_ENV: &str = "VC_REMOTE";
const BACKUP_DIR_ENV: &str = "VC_BACKUP_DIR";
const NO_BACKUP_ENV: &str = "VC_NO_BACKUP";

pub const DEFAULT_GIT: &str = "git";
pub const DEFAULT_REMOTE: &str = "origin";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Config {
    /// The git executable to invoke
    pub git: String,
    /// The remote that `push` publishes to and `pull` fetches from
    pub remote: String,
    /// Parent directory for backups; `<root>-backups` when unset
    pub backup_dir: Option<PathBuf>,
    pub backups_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_GIT.to_string(), DEFAULT_REMOTE.to_string(), None, true)
    }
}

impl Config {
    pub fn load_from_env() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let git = non_empty(GIT_ENV).unwrap_or_else(|| DEFAULT_GIT.to_string());
        let remote = non_empty(REMOTE_ENV).unwrap_or_else(|| DEFAULT_REMOTE.to_string());
        let backup_dir = non_empty(BACKUP_DIR_ENV).map(PathBuf::from);
        let backups_enabled = !matches!(
            non_empty(NO_BACKUP_ENV).as_deref().map(str::trim),
            Some("1" | "true" | "yes")
        );

        Config::new(git, remote, backup_dir, backups_enabled)
    }

    /// Directory that receives timestamped backups of `root`
    pub fn backup_parent(&self, root: &Path) -> PathBuf {
        match &self.backup_dir {
            Some(dir) => dir.clone(),
            None => {
                let mut name = root.file_name().unwrap_or_default().to_os_string();
                name.push("-backups");
                root.with_file_name(name)
            }
        }
    }
}
