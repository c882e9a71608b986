use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::batch::{build_all, plan_pages};
use crate::catalog::Catalog;
use crate::config::{AtlasJob, CategoryConfig, SourceSet};
use crate::error::Result;
use crate::export::to_json_manifest;
use crate::model::{PackStats, Page};
use crate::ordering::NameOrdering;
use crate::packer::OutputPage;

/// File name of page `index` (0-based) out of `count` pages:
/// `{name}.png` for a single page, `{name}_{index + 1}.png` otherwise.
pub fn page_file_name(name: &str, index: usize, count: usize) -> String {
    if count > 1 {
        format!("{}_{}.png", name, index + 1)
    } else {
        format!("{}.png", name)
    }
}

/// File name of the ordering table for category `name`.
pub fn info_file_name(name: &str) -> String {
    format!("{} info.txt", name)
}

/// A built category: composited pages plus the ordering, nothing written yet.
pub struct CategoryOutput {
    pub name: String,
    pub pages: Vec<OutputPage>,
    pub ordering: NameOrdering,
    pub save_info: bool,
    pub export_manifest: bool,
    pub info_columns: usize,
}

impl CategoryOutput {
    /// Computes packing statistics over all pages.
    pub fn stats(&self) -> PackStats {
        PackStats::from_pages(self.pages.iter().map(|p| &p.page))
    }

    pub fn page_file_names(&self) -> Vec<String> {
        let count = self.pages.len();
        (0..count)
            .map(|i| page_file_name(&self.name, i, count))
            .collect()
    }

    pub fn info_table(&self) -> String {
        self.ordering.format_table(self.info_columns)
    }
}

/// Layout-only result of a category (dry runs).
#[derive(Debug, Clone)]
pub struct CategoryPlan {
    pub name: String,
    pub pages: Vec<Page>,
    pub ordering: NameOrdering,
}

impl CategoryPlan {
    pub fn stats(&self) -> PackStats {
        PackStats::from_pages(&self.pages)
    }
}

/// Discovers, validates and packs one category. Validation happens before any
/// canvas is allocated, so a failing category produces no pages at all.
#[instrument(skip_all, fields(category = %cfg.name))]
pub fn build_category(source: &SourceSet, cfg: &CategoryConfig) -> Result<CategoryOutput> {
    cfg.validate()?;
    let catalog = Catalog::collect(source, cfg)?;

    let start = Instant::now();
    let pages = build_all(catalog.images, cfg.max_side)?;
    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        pages = pages.len(),
        "creation"
    );

    Ok(CategoryOutput {
        name: cfg.name.clone(),
        pages,
        ordering: catalog.ordering,
        save_info: cfg.save_info,
        export_manifest: cfg.export_manifest,
        info_columns: cfg.info_columns,
    })
}

/// Same discovery and validation as [`build_category`], layout only.
pub fn plan_category(source: &SourceSet, cfg: &CategoryConfig) -> Result<CategoryPlan> {
    cfg.validate()?;
    let catalog = Catalog::collect(source, cfg)?;
    let pages = plan_pages(&catalog.images, cfg.max_side)?;
    Ok(CategoryPlan {
        name: cfg.name.clone(),
        pages,
        ordering: catalog.ordering,
    })
}

/// What a written category produced.
#[derive(Debug, Clone)]
pub struct CategoryReport {
    pub name: String,
    pub files: Vec<PathBuf>,
    pub page_sizes: Vec<u32>,
    pub stats: PackStats,
}

/// Output context. The directory is created once by [`AtlasWorkspace::init`];
/// every category is written into it.
#[derive(Debug, Clone)]
pub struct AtlasWorkspace {
    output_dir: PathBuf,
}

impl AtlasWorkspace {
    pub fn init(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the pages, and the ordering table / manifest when requested.
    pub fn write_category(&self, output: &CategoryOutput) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        let multiple = output.pages.len() > 1;
        for (i, (page, file)) in output.pages.iter().zip(output.page_file_names()).enumerate() {
            let path = self.output_dir.join(file);
            page.rgba.save(&path)?;
            let size = page.page.size;
            if multiple {
                info!(path = %path.display(), "Atlas {} size: {}x{}", i + 1, size, size);
            } else {
                info!(path = %path.display(), "Atlas size: {}x{}", size, size);
            }
            written.push(path);
        }
        if output.save_info {
            let path = self.output_dir.join(info_file_name(&output.name));
            fs::write(&path, output.info_table())?;
            info!(path = %path.display(), "ordering written");
            written.push(path);
        }
        if output.export_manifest {
            let path = self.output_dir.join(format!("{}.json", output.name));
            let json = serde_json::to_string_pretty(&to_json_manifest(output))?;
            fs::write(&path, json)?;
            info!(path = %path.display(), "manifest written");
            written.push(path);
        }
        Ok(written)
    }

    /// Builds and writes one category.
    pub fn run_category(&self, source: &SourceSet, cfg: &CategoryConfig) -> Result<CategoryReport> {
        info!("------ {} ------", cfg.name);
        let output = build_category(source, cfg)?;
        let files = self.write_category(&output)?;
        let stats = output.stats();
        info!(category = %output.name, "{}", stats.summary());
        Ok(CategoryReport {
            name: output.name,
            files,
            page_sizes: output.pages.iter().map(|p| p.page.size).collect(),
            stats,
        })
    }

    /// Processes every category of every job in order. The first failing
    /// category aborts the run. With the `parallel` feature and `parallel`
    /// set, categories are built concurrently; reports keep request order.
    pub fn run(&self, jobs: &[AtlasJob], parallel: bool) -> Result<Vec<CategoryReport>> {
        let requests: Vec<(&SourceSet, &CategoryConfig)> = jobs
            .iter()
            .flat_map(|job| job.categories.iter().map(move |c| (&job.source, c)))
            .collect();

        #[cfg(feature = "parallel")]
        {
            if parallel {
                return requests
                    .par_iter()
                    .map(|(source, cfg)| self.run_category(source, cfg))
                    .collect();
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            if parallel {
                tracing::warn!("built without the `parallel` feature; running sequentially");
            }
        }

        requests
            .into_iter()
            .map(|(source, cfg)| self.run_category(source, cfg))
            .collect()
    }
}
