//! Configuration of atlas categories and the folders they are collected from.
//! Key notes:
//!   - a category selects icons by exact pixel width (`cell_size`)
//!   - `glob` filters by path relative to the theme folder being scanned
//!   - `max_side` caps every page; overflow spills into `{name}_2`, `{name}_3`, ...

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which subdirectories of a base directory hold `Dark`/`Light` theme folders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubdirSelection {
    /// Use `base/<Theme>` directly when it exists, otherwise every subdirectory of `base`.
    #[default]
    AllSubdirs,
    /// Only `base/<name>/<Theme>` for the listed names, in the listed order.
    ExplicitList(Vec<String>),
}

impl SubdirSelection {
    /// An empty list means "no restriction", same as `AllSubdirs`.
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::AllSubdirs
        } else {
            Self::ExplicitList(names)
        }
    }
}

/// Root of an icon tree plus the subdirectory selection applied under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSet {
    pub base_dir: PathBuf,
    #[serde(default)]
    pub subdirs: SubdirSelection,
}

impl SourceSet {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            subdirs: SubdirSelection::AllSubdirs,
        }
    }

    pub fn with_subdirs<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.subdirs = SubdirSelection::from_names(names.into_iter().map(Into::into).collect());
        self
    }
}

/// One atlas category: which icons go in and how the output is named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Exact icon width in pixels selected for this category.
    pub cell_size: u32,
    /// Output base name (`{name}.png`, `{name}_{n}.png`, `{name} info.txt`).
    pub name: String,
    /// Optional glob matched against paths relative to the theme folder.
    #[serde(default)]
    pub glob: Option<String>,
    /// Also write the `name=index` ordering table.
    #[serde(default)]
    pub save_info: bool,
    /// Also write a JSON manifest with per-icon cell rectangles.
    #[serde(default)]
    pub export_manifest: bool,
    /// Largest allowed page side; must be a power of two.
    #[serde(default = "default_max_side")]
    pub max_side: u32,
    /// Directory levels walked below each theme folder.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Number of lines the ordering table is spread across.
    #[serde(default = "default_info_columns")]
    pub info_columns: usize,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            cell_size: 16,
            name: "New Atlas".into(),
            glob: None,
            save_info: false,
            export_manifest: false,
            max_side: default_max_side(),
            max_depth: default_max_depth(),
            info_columns: default_info_columns(),
        }
    }
}

impl CategoryConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if the cell size or name is empty, `max_side` is not a
    /// power of two, `info_columns` is zero, or the glob does not parse.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.cell_size == 0 {
            return Err(AtlasError::InvalidConfig(format!(
                "cell_size of category '{}' must be non-zero",
                self.name
            )));
        }
        if self.name.trim().is_empty() {
            return Err(AtlasError::InvalidConfig("category name is empty".into()));
        }
        if !self.max_side.is_power_of_two() {
            return Err(AtlasError::InvalidConfig(format!(
                "max_side ({}) must be a non-zero power of two",
                self.max_side
            )));
        }
        if self.info_columns == 0 {
            return Err(AtlasError::InvalidConfig(
                "info_columns must be at least 1".into(),
            ));
        }
        if let Some(pattern) = &self.glob {
            crate::catalog::compile_glob(pattern)?;
        }
        Ok(())
    }

    /// Create a fluent builder for `CategoryConfig`.
    pub fn builder(cell_size: u32, name: impl Into<String>) -> CategoryConfigBuilder {
        CategoryConfigBuilder::new(cell_size, name)
    }
}

fn default_max_side() -> u32 {
    1024
}
fn default_max_depth() -> usize {
    2
}
fn default_info_columns() -> usize {
    4
}

/// Builder for `CategoryConfig` for ergonomic construction.
#[derive(Debug, Clone)]
pub struct CategoryConfigBuilder {
    cfg: CategoryConfig,
}

impl CategoryConfigBuilder {
    pub fn new(cell_size: u32, name: impl Into<String>) -> Self {
        Self {
            cfg: CategoryConfig {
                cell_size,
                name: name.into(),
                ..Default::default()
            },
        }
    }
    pub fn glob(mut self, v: impl Into<String>) -> Self {
        self.cfg.glob = Some(v.into());
        self
    }
    pub fn save_info(mut self, v: bool) -> Self {
        self.cfg.save_info = v;
        self
    }
    pub fn export_manifest(mut self, v: bool) -> Self {
        self.cfg.export_manifest = v;
        self
    }
    pub fn max_side(mut self, v: u32) -> Self {
        self.cfg.max_side = v;
        self
    }
    pub fn max_depth(mut self, v: usize) -> Self {
        self.cfg.max_depth = v;
        self
    }
    pub fn info_columns(mut self, v: usize) -> Self {
        self.cfg.info_columns = v;
        self
    }
    pub fn build(self) -> CategoryConfig {
        self.cfg
    }
}

/// A source tree and the ordered categories built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtlasJob {
    pub source: SourceSet,
    pub categories: Vec<CategoryConfig>,
}
