//! Analysis options and the optional `tagcheck.yaml` config file.
//!
//! The file is YAML (plain JSON is accepted too):
//!
//! ```yaml
//! ignoreCapitalization: false
//! ignoreEntities: false
//! ignoreUnrecognized: false
//! dataDir: data
//! data:
//!   items: [gausie]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::data::DataDirectory;
use crate::ports::filesystem::FileSystem;
use crate::registry::RegistrySet;
use crate::tags::EntityKind;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tagcheck.yaml";

/// Directory holding the vocabulary files when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Switches that change what the engine reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Suppress wrong-capitalization reports.
    pub ignore_capitalization: bool,
    /// Suppress HTML-entity reports.
    pub ignore_entities: bool,
    /// Suppress unrecognized-value reports.
    pub ignore_unrecognized: bool,
    /// Vocabularies replacing the reference data for their kind.
    pub data: DataOverrides,
}

/// Per-kind vocabulary overrides, keyed by plural kind name in the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>")]
pub struct DataOverrides(BTreeMap<EntityKind, Vec<String>>);

impl DataOverrides {
    /// The override for `kind`, if one was given. An empty list still
    /// counts as an override.
    #[must_use]
    pub fn get(&self, kind: EntityKind) -> Option<&[String]> {
        self.0.get(&kind).map(Vec::as_slice)
    }

    /// Every override in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKind, &[String])> {
        self.0.iter().map(|(kind, names)| (*kind, names.as_slice()))
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for DataOverrides {
    type Error = String;

    fn try_from(raw: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(name, names)| match EntityKind::from_plural(&name) {
                Some(kind) => Ok((kind, names)),
                None => Err(format!("unknown entity kind `{name}` in data overrides")),
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(DataOverrides)
    }
}

impl FromIterator<(EntityKind, Vec<String>)> for DataOverrides {
    fn from_iter<I: IntoIterator<Item = (EntityKind, Vec<String>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct ConfigFile {
    ignore_capitalization: bool,
    ignore_entities: bool,
    ignore_unrecognized: bool,
    data: DataOverrides,
    data_dir: Option<PathBuf>,
}

/// Resolved configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Engine options.
    pub options: Options,
    /// Directory of `<plural>.json` vocabularies; `None` means the default.
    pub data_dir: Option<PathBuf>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Self {
            options: Options {
                ignore_capitalization: file.ignore_capitalization,
                ignore_entities: file.ignore_entities,
                ignore_unrecognized: file.ignore_unrecognized,
                data: file.data,
            },
            data_dir: file.data_dir,
        }
    }
}

impl Config {
    /// Parses config text. `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed YAML, unknown keys, or unknown kind
    /// names under `data`.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str::<ConfigFile>(text)
            .map(Self::from)
            .map_err(|e| format!("Failed to parse config {}: {e}", origin.display()))
    }

    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, String> {
        let text = fs
            .read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        let config = Self::parse(&text, path)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `tagcheck.yaml` from `dir` when present, else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn discover(fs: &dyn FileSystem, dir: &Path) -> Result<Self, String> {
        let path = dir.join(CONFIG_FILE_NAME);
        if fs.exists(&path) {
            Self::load(fs, &path)
        } else {
            Ok(Self::default())
        }
    }

    /// The vocabulary directory in effect.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_deref().unwrap_or(Path::new(DEFAULT_DATA_DIR))
    }

    /// Builds the registry set for this configuration: vocabularies come
    /// from the data directory unless overridden under `data`.
    #[must_use]
    pub fn registries(&self, fs: Arc<dyn FileSystem>) -> RegistrySet {
        let mut set = RegistrySet::new(Arc::new(DataDirectory::new(fs, self.data_dir())));
        for (kind, names) in self.options.data.iter() {
            set.override_vocabulary(kind, names);
        }
        set
    }
}
