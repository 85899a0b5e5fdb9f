//! Local state kept under the data directory: profiles, the active profile
//! name, default scan configs and downloaded reports. Concurrent writers are
//! not coordinated; the last write wins.

pub mod profile;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::FalcoriaError;

pub use profile::{Profile, SETTABLE_FIELDS};

pub const DEFAULT_PROFILE: &str = "default";
const ACTIVE_PROFILE_FILE: &str = "active_profile.txt";

pub struct StateStore {
    root: PathBuf,
}

impl StateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `--data-dir` (or `FALCORIA_HOME`, read by clap), then the platform
    /// data directory, then `./data`.
    pub fn resolve_root(flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| dirs::data_dir().map(|d| d.join("falcoria")))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    pub fn scan_configs_dir(&self) -> PathBuf {
        self.root.join("scan_configs")
    }

    pub fn default_scan_config(&self) -> PathBuf {
        self.scan_configs_dir().join("default.yaml")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.root.join("reports")
    }

    fn profile_path(&self, name: &str) -> Result<PathBuf, FalcoriaError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !valid {
            return Err(FalcoriaError::Profile(format!("Invalid profile name '{}'", name)));
        }
        Ok(self.profiles_dir().join(format!("{}.yaml", name)))
    }

    pub async fn list_profiles(&self) -> Result<Vec<String>, FalcoriaError> {
        let dir = self.profiles_dir();
        tokio::fs::create_dir_all(&dir).await?;

        let mut names = Vec::new();
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().into_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub async fn profile_exists(&self, name: &str) -> Result<bool, FalcoriaError> {
        Ok(self.profile_path(name)?.exists())
    }

    pub async fn load_profile(&self, name: &str) -> Result<Profile, FalcoriaError> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Err(FalcoriaError::Profile(format!(
                "Profile '{}' not found. Create it with: falcoria profile create {} <ledger-url> <tasker-url> <token>",
                name, name
            )));
        }
        let content = tokio::fs::read_to_string(&path).await?;
        Profile::from_yaml(&content)
            .map_err(|e| FalcoriaError::Profile(format!("Failed to load profile '{}': {}", name, e)))
    }

    pub async fn save_profile(&self, name: &str, profile: &Profile) -> Result<(), FalcoriaError> {
        let path = self.profile_path(name)?;
        tokio::fs::create_dir_all(self.profiles_dir()).await?;
        tokio::fs::write(&path, serde_yaml::to_string(profile)?).await?;
        debug!(profile = name, path = %path.display(), "Profile saved");
        Ok(())
    }

    pub async fn delete_profile(&self, name: &str) -> Result<(), FalcoriaError> {
        let path = self.profile_path(name)?;
        if !path.exists() {
            return Err(FalcoriaError::Profile(format!("Profile '{}' not found.", name)));
        }
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    /// Name of the active profile; records `default` on first use.
    pub async fn active_profile_name(&self) -> Result<String, FalcoriaError> {
        let path = self.profiles_dir().join(ACTIVE_PROFILE_FILE);
        if !path.exists() {
            self.set_active_profile(DEFAULT_PROFILE).await?;
            return Ok(DEFAULT_PROFILE.to_string());
        }
        let name = tokio::fs::read_to_string(&path).await?;
        let name = name.trim();
        Ok(if name.is_empty() { DEFAULT_PROFILE } else { name }.to_string())
    }

    pub async fn set_active_profile(&self, name: &str) -> Result<(), FalcoriaError> {
        self.profile_path(name)?;
        tokio::fs::create_dir_all(self.profiles_dir()).await?;
        tokio::fs::write(self.profiles_dir().join(ACTIVE_PROFILE_FILE), name).await?;
        Ok(())
    }
}
