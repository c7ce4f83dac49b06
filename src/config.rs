//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/topictree/topictree.toml`
//! 3. Local config: `<dir>/.topictree.toml`
//! 4. Environment variables: `TOPICTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{
    SourceGroups, SourcePrefix, TopicDisplayMode, DEFAULT_AUX_NODE, DEFAULT_SOURCE_PREFIX,
};
use crate::infrastructure::traits::{FileSystem, RealFileSystem};
use crate::util::path::expand_env_vars;

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub source_prefix: Option<String>,
    pub primary_group: Option<String>,
    pub secondary_group: Option<String>,
    pub aux_node: Option<String>,
    pub display_mode: Option<TopicDisplayMode>,
    pub base_tree: Option<PathBuf>,
}

/// Unified configuration for topictree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Topic prefix of the second data source
    pub source_prefix: String,
    /// Group node for the first source when two are loaded
    pub primary_group: String,
    /// Group node for the second source (default: "Bag 2 <source_prefix>")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_group: Option<String>,
    /// Name of the transform-tree pseudo node
    pub aux_node: String,
    /// Display mode used when none is given on the command line
    pub display_mode: TopicDisplayMode,
    /// Base tree definition (TOML or JSON)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_tree: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_prefix: DEFAULT_SOURCE_PREFIX.to_string(),
            primary_group: SourceGroups::PRIMARY_GROUP.to_string(),
            secondary_group: None,
            aux_node: DEFAULT_AUX_NODE.to_string(),
            display_mode: TopicDisplayMode::default(),
            base_tree: None,
        }
    }
}

/// Get the XDG config directory for topictree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "topictree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("topictree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".topictree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(fs: &dyn FileSystem, path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = fs.read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Source prefix and group names derived from these settings.
    pub fn source_groups(&self) -> SourceGroups {
        let prefix = SourcePrefix::new(self.source_prefix.as_str());
        let mut groups = SourceGroups::for_prefix(prefix);
        groups.primary = self.primary_group.clone();
        if let Some(secondary) = &self.secondary_group {
            groups.secondary = secondary.clone();
        }
        groups
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(base_tree) = &self.base_tree {
            let expanded = expand_env_vars(base_tree.to_string_lossy().as_ref());
            self.base_tree = Some(PathBuf::from(expanded));
        }
    }

    /// Overlay wins for every field it specifies.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            source_prefix: overlay
                .source_prefix
                .clone()
                .unwrap_or_else(|| self.source_prefix.clone()),
            primary_group: overlay
                .primary_group
                .clone()
                .unwrap_or_else(|| self.primary_group.clone()),
            secondary_group: overlay
                .secondary_group
                .clone()
                .or_else(|| self.secondary_group.clone()),
            aux_node: overlay
                .aux_node
                .clone()
                .unwrap_or_else(|| self.aux_node.clone()),
            display_mode: overlay.display_mode.unwrap_or(self.display_mode),
            base_tree: overlay
                .base_tree
                .clone()
                .or_else(|| self.base_tree.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.topictree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/topictree/topictree.toml`
    /// 3. Local config: `<local_dir>/.topictree.toml`
    /// 4. Environment variables: `TOPICTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(&RealFileSystem, global.as_deref(), local_dir)
    }

    /// Load settings from explicit config file locations.
    ///
    /// `global` is a config file, `local_dir` a directory holding a
    /// `.topictree.toml`. Missing files are skipped; env overrides still apply.
    pub fn load_from(
        fs: &dyn FileSystem,
        global: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global {
            if fs.is_file(global_path) {
                let raw = load_raw_settings(fs, global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if fs.is_file(&local_path) {
                let raw = load_raw_settings(fs, &local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply TOPICTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TOPICTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            source_prefix: config.get_string("source_prefix").ok(),
            primary_group: config.get_string("primary_group").ok(),
            secondary_group: config.get_string("secondary_group").ok(),
            aux_node: config.get_string("aux_node").ok(),
            display_mode: match config.get_string("display_mode") {
                Ok(mode) => Some(mode.parse().map_err(|e| ApplicationError::Config {
                    message: format!("TOPICTREE_DISPLAY_MODE: {e}"),
                })?),
                Err(_) => None,
            },
            base_tree: config.get_string("base_tree").ok().map(PathBuf::from),
        };

        Ok(settings.merge_with(&raw))
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# topictree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/topictree/topictree.toml
#   Local:  ./.topictree.toml
#   Env:    TOPICTREE_* environment variables

# Topic prefix used by the player for the second data source
# source_prefix = "/webviz_bag_2"

# Group nodes used when two data sources are loaded
# primary_group = "Bag"
# secondary_group = "Bag 2 /webviz_bag_2"

# Name of the transform-tree pseudo node
# aux_node = "TF"

# One of SHOW_TREE, SHOW_ALL, SHOW_SELECTED, SHOW_AVAILABLE
# display_mode = "SHOW_TREE"

# Base tree definition (TOML or JSON)
# base_tree = "~/.config/topictree/base_tree.toml"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_deriving_groups_then_secondary_mentions_prefix() {
        let groups = Settings::default().source_groups();
        assert_eq!(groups.primary, "Bag");
        assert_eq!(groups.secondary, "Bag 2 /webviz_bag_2");
        assert_eq!(groups.prefix.as_str(), "/webviz_bag_2");
    }

    #[test]
    fn given_custom_prefix_when_deriving_groups_then_default_secondary_follows() {
        let settings = Settings {
            source_prefix: "/second".into(),
            ..Settings::default()
        };
        assert_eq!(settings.source_groups().secondary, "Bag 2 /second");
    }

    #[test]
    fn given_explicit_secondary_group_when_deriving_groups_then_it_wins() {
        let settings = Settings {
            secondary_group: Some("Comparison".into()),
            ..Settings::default()
        };
        assert_eq!(settings.source_groups().secondary, "Comparison");
    }

    #[test]
    fn given_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            aux_node: Some("Transforms".into()),
            display_mode: Some(TopicDisplayMode::ShowAvailable),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.aux_node, "Transforms");
        assert_eq!(merged.display_mode, TopicDisplayMode::ShowAvailable);
        assert_eq!(merged.source_prefix, base.source_prefix);
        assert_eq!(merged.primary_group, base.primary_group);
    }

    #[test]
    fn given_tilde_in_base_tree_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            base_tree: Some(PathBuf::from("~/trees/base.toml")),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.base_tree.unwrap();
        assert!(path.to_string_lossy().starts_with(&home));
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let settings = Settings {
            display_mode: TopicDisplayMode::ShowSelected,
            ..Settings::default()
        };

        let text = settings.to_toml().unwrap();
        assert!(text.contains("display_mode = \"SHOW_SELECTED\""));

        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.source_prefix.is_none());
    }
}
