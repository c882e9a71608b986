//! Discovery and validation of themed icon sets.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::{CategoryConfig, SourceSet, SubdirSelection};
use crate::error::{AtlasError, Result};
use crate::header::read_png_dimensions;
use crate::model::{ImageRecord, Theme};
use crate::ordering::NameOrdering;

/// Scale suffixes stripped from file stems, in the order they are removed.
const SCALE_SUFFIXES: [&str; 2] = ["@2x", "@3x"];

/// Removes a trailing `@2x`, then a trailing `@3x`.
pub fn strip_scale_suffix(stem: &str) -> &str {
    SCALE_SUFFIXES
        .iter()
        .fold(stem, |s, suffix| s.strip_suffix(suffix).unwrap_or(s))
}

/// Compiles a path glob. `*` does not cross `/`; use `**` for that.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Ok(GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()?
        .compile_matcher())
}

/// Filters applied while walking a theme folder.
#[derive(Debug, Clone)]
pub struct DiscoveryFilter {
    pub cell_size: u32,
    pub max_depth: usize,
    pub glob: Option<GlobMatcher>,
}

impl DiscoveryFilter {
    pub fn new(cell_size: u32, max_depth: usize, glob: Option<&str>) -> Result<Self> {
        Ok(Self {
            cell_size,
            max_depth,
            glob: glob.map(compile_glob).transpose()?,
        })
    }

    pub fn from_config(cfg: &CategoryConfig) -> Result<Self> {
        Self::new(cfg.cell_size, cfg.max_depth, cfg.glob.as_deref())
    }

    fn matches_path(&self, relative: &str) -> bool {
        self.glob.as_ref().is_none_or(|g| g.is_match(relative))
    }
}

fn is_png(p: &Path) -> bool {
    p.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Walks `root` (files in folders at most `max_depth` levels below it) and
/// returns every PNG whose width equals the filter's cell size and whose
/// root-relative path matches the glob. Unreadable headers are skipped.
pub fn discover(root: &Path, filter: &DiscoveryFilter, theme: Theme) -> Vec<ImageRecord> {
    let mut images = Vec::new();
    // A file at walk depth `d` lives in a folder `d - 1` levels below `root`.
    let walker = WalkDir::new(root)
        .max_depth(filter.max_depth.saturating_add(1))
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skip unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file() || !is_png(path) {
            continue;
        }
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");
        if !filter.matches_path(&relative) {
            continue;
        }
        match read_png_dimensions(path) {
            Ok((width, height)) if width == filter.cell_size => {
                images.push(ImageRecord::new(path, width, height, theme));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "skip image"),
        }
    }
    debug!(root = %root.display(), %theme, count = images.len(), "discovered images");
    images
}

/// Collects one theme's icons under `source`.
///
/// With `AllSubdirs` and an existing `base/<theme>` folder, only that folder is
/// scanned. Otherwise each candidate subdirectory contributes its
/// `<subdir>/<theme>` folder; missing ones are skipped with a warning.
pub fn build_theme_images(
    source: &SourceSet,
    theme: Theme,
    filter: &DiscoveryFilter,
) -> Vec<ImageRecord> {
    let base = &source.base_dir;
    let direct = base.join(theme.dir_name());

    let candidates: Vec<PathBuf> = match &source.subdirs {
        SubdirSelection::AllSubdirs if direct.is_dir() => {
            return discover(&direct, filter, theme);
        }
        SubdirSelection::AllSubdirs => match fs::read_dir(base) {
            Ok(entries) => {
                let mut dirs: Vec<PathBuf> = entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.is_dir())
                    .collect();
                dirs.sort();
                dirs
            }
            Err(e) => {
                skip_search_path(base, e.to_string());
                Vec::new()
            }
        },
        SubdirSelection::ExplicitList(names) => names.iter().map(|n| base.join(n)).collect(),
    };

    let mut images = Vec::new();
    for subdir in candidates {
        if !subdir.is_dir() {
            skip_search_path(&subdir, "not a directory".into());
            continue;
        }
        let theme_path = subdir.join(theme.dir_name());
        if !theme_path.is_dir() {
            skip_search_path(&subdir, format!("{theme} theme not found"));
            continue;
        }
        images.extend(discover(&theme_path, filter, theme));
    }
    images
}

fn skip_search_path(path: &Path, reason: String) {
    let err = AtlasError::InvalidSearchPath {
        path: path.to_path_buf(),
        reason,
    };
    warn!(error = %err, "skip search path");
}

/// Validated packing input for one category.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Sorted Dark images followed by sorted Light images.
    pub images: Vec<ImageRecord>,
    /// Base names of the sorted Dark images; position is the icon id.
    pub ordering: NameOrdering,
}

impl Catalog {
    /// Discovers both themes for `cfg` under `source` and validates the pair.
    #[instrument(skip_all, fields(category = %cfg.name))]
    pub fn collect(source: &SourceSet, cfg: &CategoryConfig) -> Result<Catalog> {
        let start = Instant::now();
        let filter = DiscoveryFilter::from_config(cfg)?;
        let dark = build_theme_images(source, Theme::Dark, &filter);
        let light = build_theme_images(source, Theme::Light, &filter);
        info!(
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            dark = dark.len(),
            light = light.len(),
            "image retrieval"
        );
        validate_and_combine(dark, light, &source.base_dir)
    }
}

/// Checks the Dark/Light pair and produces the combined, deterministically
/// ordered packing input.
///
/// Fails with `ThemeMismatch` (carrying the names present in only one theme)
/// when the counts differ, and with `EmptyCatalog` when there are no images.
pub fn validate_and_combine(
    mut dark: Vec<ImageRecord>,
    mut light: Vec<ImageRecord>,
    base_dir: &Path,
) -> Result<Catalog> {
    if dark.len() != light.len() {
        return Err(AtlasError::ThemeMismatch {
            only_in_one: names_in_one_theme(&dark, &light),
        });
    }
    if dark.is_empty() {
        return Err(AtlasError::EmptyCatalog {
            base_dir: base_dir.to_path_buf(),
        });
    }
    let differing = names_in_one_theme(&dark, &light);
    if !differing.is_empty() {
        warn!(names = ?differing, "Dark and Light sets have equal counts but different names");
    }

    dark.sort_by(|a, b| a.path.cmp(&b.path));
    light.sort_by(|a, b| a.path.cmp(&b.path));

    let ordering: NameOrdering = dark.iter().map(|r| r.base_name.clone()).collect();
    let duplicates = repeated_names(&ordering);
    if !duplicates.is_empty() {
        warn!(names = ?duplicates, "base names appear more than once; each keeps its own index");
    }
    let mut images = dark;
    images.append(&mut light);
    Ok(Catalog { images, ordering })
}

fn names_in_one_theme(dark: &[ImageRecord], light: &[ImageRecord]) -> BTreeSet<String> {
    let dark: BTreeSet<&str> = dark.iter().map(|r| r.base_name.as_str()).collect();
    let light: BTreeSet<&str> = light.iter().map(|r| r.base_name.as_str()).collect();
    dark.symmetric_difference(&light)
        .map(|s| s.to_string())
        .collect()
}

fn repeated_names(ordering: &NameOrdering) -> BTreeSet<&str> {
    let mut seen = BTreeSet::new();
    ordering
        .iter()
        .filter_map(|(_, name)| (!seen.insert(name)).then_some(name))
        .collect()
}
