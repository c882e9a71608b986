use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use icon_atlas_core::prelude::*;
use icon_atlas_core::{info_file_name, page_file_name};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    name = "icon-atlas",
    about = "Pack Dark/Light icon sets into grid atlases",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --no-progress or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Pack one atlas category
    Pack(PackArgs),
    /// Run an ordered list of categories from a YAML manifest
    Run(RunArgs),
}

#[derive(Parser, Debug, Clone)]
struct PackArgs {
    // Input/Output
    /// Base directory holding Dark/Light theme folders (directly or per subdirectory)
    #[arg(help_heading = "Input/Output")]
    base_dir: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png or name_1.png, name_2.png, ...)
    #[arg(short, long, default_value = "New Atlas", help_heading = "Input/Output")]
    name: String,
    /// Only scan these subdirectories of the base directory (repeatable)
    #[arg(long = "subdir", help_heading = "Input/Output")]
    subdirs: Vec<String>,
    /// Glob matched against paths relative to each theme folder, e.g. "**/Standard/*"
    #[arg(long, help_heading = "Input/Output")]
    glob: Option<String>,

    // Layout
    /// Icon width in pixels selected for this atlas
    #[arg(short, long, help_heading = "Layout")]
    size: u32,
    /// Largest page side (power of two); overflow goes to additional pages
    #[arg(long, default_value_t = 1024, help_heading = "Layout")]
    max_side: u32,
    /// Directory levels walked below each theme folder
    #[arg(long, default_value_t = 2, help_heading = "Layout")]
    max_depth: usize,

    // Export
    /// Also write "<name> info.txt" with the name=index ordering
    #[arg(long, default_value_t = false, help_heading = "Export")]
    save_info: bool,
    /// Lines the ordering table is spread across
    #[arg(long, default_value_t = 4, help_heading = "Export")]
    info_columns: usize,
    /// Also write "<name>.json" with per-icon cells
    #[arg(long, default_value_t = false, help_heading = "Export")]
    manifest: bool,
    /// Dry run: plan pages and print sizes but do not decode or write anything
    #[arg(long, default_value_t = false, help_heading = "Export")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct RunArgs {
    /// YAML manifest listing output_dir and jobs
    manifest: PathBuf,
    /// Override the manifest's output directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Build categories concurrently (requires core feature `parallel`)
    #[arg(long, default_value_t = false)]
    parallel: bool,
    /// Print the merged manifest and exit: json|yaml
    #[arg(long, value_parser = ["json", "yaml"])]
    print_config: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    let result = match &cli.command {
        Commands::Pack(args) => run_pack(args),
        Commands::Run(args) => run_manifest(args, cli.progress && !cli.quiet),
    };
    if let Err(e) = &result {
        error!(error = %e, "atlas build failed");
    }
    result
}

fn run_pack(args: &PackArgs) -> anyhow::Result<()> {
    let source = SourceSet::new(&args.base_dir).with_subdirs(args.subdirs.clone());
    let mut builder = CategoryConfig::builder(args.size, args.name.clone())
        .save_info(args.save_info)
        .export_manifest(args.manifest)
        .max_side(args.max_side)
        .max_depth(args.max_depth)
        .info_columns(args.info_columns);
    if let Some(g) = &args.glob {
        builder = builder.glob(g.clone());
    }
    let cfg = builder.build();

    if args.dry_run {
        let plan = plan_category(&source, &cfg)?;
        let count = plan.pages.len();
        for (i, page) in plan.pages.iter().enumerate() {
            println!(
                "{} {}x{} icons={}",
                page_file_name(&plan.name, i, count),
                page.size,
                page.size,
                page.frames.len()
            );
        }
        if cfg.save_info {
            println!("{}", info_file_name(&plan.name));
            println!("{}", plan.ordering.format_table(cfg.info_columns));
        }
        println!("{}", plan.stats().summary());
        return Ok(());
    }

    let workspace = AtlasWorkspace::init(&args.out_dir)
        .with_context(|| format!("create out_dir {}", args.out_dir.display()))?;
    let report = workspace
        .run_category(&source, &cfg)
        .with_context(|| format!("category '{}'", cfg.name))?;
    info!(files = report.files.len(), pages = report.page_sizes.len(), "done");
    Ok(())
}

fn run_manifest(args: &RunArgs, show_progress: bool) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.manifest)
        .with_context(|| format!("read {}", args.manifest.display()))?;
    let manifest: YamlManifest = serde_yaml::from_str(&text)
        .with_context(|| format!("parse {}", args.manifest.display()))?;
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| manifest.output_dir.clone());
    let parallel = args.parallel || manifest.parallel;
    let jobs = manifest.into_jobs();

    if let Some(format) = &args.print_config {
        let merged = MergedConfig {
            output_dir: &out_dir,
            parallel,
            jobs: &jobs,
        };
        match format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&merged)?),
            _ => println!("{}", serde_json::to_string_pretty(&merged)?),
        }
        return Ok(());
    }

    for job in &jobs {
        for cfg in &job.categories {
            cfg.validate()
                .with_context(|| format!("category '{}'", cfg.name))?;
        }
    }

    let workspace = AtlasWorkspace::init(&out_dir)
        .with_context(|| format!("create out_dir {}", out_dir.display()))?;

    if parallel {
        let reports = workspace.run(&jobs, true)?;
        info!(categories = reports.len(), "all categories written");
        return Ok(());
    }

    let total: usize = jobs.iter().map(|j| j.categories.len()).sum();
    let bar = if show_progress {
        use indicatif::{ProgressBar, ProgressStyle};
        let b = ProgressBar::new(total as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} category {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        Some(b)
    } else {
        None
    };
    for job in &jobs {
        for cfg in &job.categories {
            if let Some(b) = &bar {
                b.set_message(cfg.name.clone());
            }
            workspace
                .run_category(&job.source, cfg)
                .with_context(|| format!("category '{}'", cfg.name))?;
            if let Some(b) = &bar {
                b.inc(1);
            }
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    info!(categories = total, "all categories written");
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

/// On-disk manifest. Subdirectories are a plain list; empty means all of them.
#[derive(Debug, Deserialize)]
struct YamlManifest {
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default)]
    parallel: bool,
    jobs: Vec<YamlJob>,
}

#[derive(Debug, Deserialize)]
struct YamlJob {
    base_dir: PathBuf,
    #[serde(default)]
    subdirs: Vec<String>,
    categories: Vec<CategoryConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

impl YamlManifest {
    fn into_jobs(self) -> Vec<AtlasJob> {
        self.jobs
            .into_iter()
            .map(|j| AtlasJob {
                source: SourceSet::new(j.base_dir).with_subdirs(j.subdirs),
                categories: j.categories,
            })
            .collect()
    }
}

#[derive(Serialize)]
struct MergedConfig<'a> {
    output_dir: &'a PathBuf,
    parallel: bool,
    jobs: &'a [AtlasJob],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_defaults_and_subdir_selection() {
        let yaml = r#"
jobs:
  - base_dir: textures/Shared/InsertableObjects
    categories:
      - { cell_size: 16, name: "Classes [x16]", glob: "**/Standard/*", save_info: true }
      - { cell_size: 64, name: "Classes [Large x64]", glob: "**/Large/*" }
  - base_dir: textures/Shared
    subdirs: [Alerts, Utility]
    categories:
      - { cell_size: 16, name: "Other [x16]" }
"#;
        let m: YamlManifest = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(m.output_dir, PathBuf::from("out"));
        assert!(!m.parallel);
        let jobs = m.into_jobs();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].source.subdirs, SubdirSelection::AllSubdirs);
        assert_eq!(
            jobs[1].source.subdirs,
            SubdirSelection::ExplicitList(vec!["Alerts".into(), "Utility".into()])
        );
        let first = &jobs[0].categories[0];
        assert_eq!(first.max_side, 1024);
        assert_eq!(first.max_depth, 2);
        assert_eq!(first.info_columns, 4);
        assert!(first.save_info);
        assert!(!jobs[0].categories[1].save_info);
    }
}
