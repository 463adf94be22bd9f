use crate::error::{KitError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `agentkit.yaml` at the source repository root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the symlink created inside each component directory.
    #[serde(default = "default_link_name")]
    pub link_name: String,
    /// Component directories to link, in order.
    #[serde(default = "default_components")]
    pub components: Vec<String>,
}

fn default_link_name() -> String {
    paths::DEFAULT_LINK_NAME.to_string()
}

fn default_components() -> Vec<String> {
    paths::DEFAULT_COMPONENTS
        .iter()
        .map(|c| c.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_name: default_link_name(),
            components: default_components(),
        }
    }
}

impl Config {
    /// Load `agentkit.yaml`, falling back to defaults when the file is absent.
    pub fn load(source_root: &Path) -> Result<Self> {
        let path = paths::config_path(source_root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, source_root: &Path) -> Result<()> {
        let path = paths::config_path(source_root);
        crate::io::atomic_write(&path, self.to_yaml()?.as_bytes())
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Err(e) = paths::validate_link_name(&self.link_name) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: e.to_string(),
            });
        }

        if self.components.is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "components is empty: nothing to link".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for component in &self.components {
            if component.is_empty()
                || component.contains('/')
                || component.contains('\\')
                || component.contains("..")
            {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("component '{component}' must be a plain directory name"),
                });
                continue;
            }
            if !paths::is_known_component(component) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!(
                        "unknown component '{component}' (expected one of {})",
                        paths::DEFAULT_COMPONENTS.join(", ")
                    ),
                });
            }
            if !seen.insert(component.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("component '{component}' listed more than once"),
                });
            }
        }

        warnings
    }

    /// Fail with the first error-level warning, if any.
    pub fn ensure_valid(&self) -> Result<()> {
        match self
            .validate()
            .into_iter()
            .find(|w| w.level == WarnLevel::Error)
        {
            Some(w) => Err(KitError::InvalidConfig(w.message)),
            None => Ok(()),
        }
    }
}
