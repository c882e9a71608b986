use std::fs;
use std::path::Path;

use icon_atlas_core::error::AtlasError;
use icon_atlas_core::prelude::*;
use image::{Rgba, RgbaImage};

const NAMES: [&str; 5] = ["Part", "Model", "Script", "Sound", "Tool"];

fn write_png(path: &Path, size: u32, color: [u8; 4]) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    RgbaImage::from_pixel(size, size, Rgba(color))
        .save(path)
        .expect("save png");
}

/// `base/<Theme>/Standard/<name>.png`, 16px, Dark icons red, Light icons blue.
fn themed_tree(base: &Path, names: &[&str], size: u32) {
    for name in names {
        write_png(&base.join(format!("Dark/Standard/{name}.png")), size, [255, 0, 0, 255]);
        write_png(&base.join(format!("Light/Standard/{name}.png")), size, [0, 0, 255, 255]);
    }
}

#[test]
fn five_plus_five_make_one_64px_atlas() {
    let src = tempfile::tempdir().expect("tempdir");
    let out = tempfile::tempdir().expect("tempdir");
    themed_tree(src.path(), &NAMES, 16);

    let workspace = AtlasWorkspace::init(out.path().join("atlases")).expect("init");
    let cfg = CategoryConfig::builder(16, "Classes [x16]")
        .glob("**/Standard/*")
        .save_info(true)
        .build();
    let report = workspace
        .run_category(&SourceSet::new(src.path()), &cfg)
        .expect("run");

    assert_eq!(report.page_sizes, vec![64]);
    assert_eq!(report.stats.num_frames, 10);
    let png = workspace.output_dir().join("Classes [x16].png");
    let info = workspace.output_dir().join("Classes [x16] info.txt");
    assert!(png.is_file());
    assert!(!workspace.output_dir().join("Classes [x16]_1.png").exists());

    let table = fs::read_to_string(&info).expect("info");
    let ordering = parse_ordering(&table).expect("parse");
    let mut sorted = NAMES.to_vec();
    sorted.sort();
    assert_eq!(ordering.names(), sorted.as_slice());

    let atlas = image::open(&png).expect("open").to_rgba8();
    assert_eq!(atlas.dimensions(), (64, 64));
    // Dark icons fill cells 0..5 (row-major), Light icons cells 5..10.
    assert_eq!(atlas.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(atlas.get_pixel(0, 16), &Rgba([255, 0, 0, 255]));
    assert_eq!(atlas.get_pixel(20, 20), &Rgba([0, 0, 255, 255]));
    assert_eq!(atlas.get_pixel(16, 32), &Rgba([0, 0, 255, 255]));
    assert_eq!(atlas.get_pixel(63, 63), &Rgba([0, 0, 0, 0]));
}

#[test]
fn overflow_writes_numbered_pages_and_manifest() {
    let src = tempfile::tempdir().expect("tempdir");
    let out = tempfile::tempdir().expect("tempdir");
    let names: Vec<String> = (0..40).map(|i| format!("icon{i:02}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    themed_tree(src.path(), &refs, 16);

    let workspace = AtlasWorkspace::init(out.path()).expect("init");
    // 80 cells of 16px, capped at 64: 16 per page -> 5 pages.
    let cfg = CategoryConfig::builder(16, "Other [x16]")
        .max_side(64)
        .export_manifest(true)
        .build();
    let report = workspace
        .run_category(&SourceSet::new(src.path()), &cfg)
        .expect("run");
    assert_eq!(report.page_sizes, vec![64; 5]);
    for n in 1..=5 {
        assert!(out.path().join(format!("Other [x16]_{n}.png")).is_file());
    }
    assert!(!out.path().join("Other [x16].png").exists());
    assert!(!out.path().join("Other [x16] info.txt").exists());

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out.path().join("Other [x16].json")).expect("read"))
            .expect("json");
    assert_eq!(manifest["pages"].as_array().expect("pages").len(), 5);
    assert_eq!(manifest["pages"][0]["file"], "Other [x16]_1.png");
    assert_eq!(manifest["ordering"][7]["name"], "icon07");
    assert_eq!(manifest["ordering"][7]["index"], 7);
    assert_eq!(manifest["stats"]["num_frames"], 80);
}

#[test]
fn mismatch_aborts_before_writing() {
    let src = tempfile::tempdir().expect("tempdir");
    let out = tempfile::tempdir().expect("tempdir");
    themed_tree(src.path(), &NAMES, 16);
    write_png(&src.path().join("Dark/Standard/Extra.png"), 16, [1, 1, 1, 255]);

    let workspace = AtlasWorkspace::init(out.path()).expect("init");
    let cfg = CategoryConfig::builder(16, "Broken").save_info(true).build();
    match workspace.run_category(&SourceSet::new(src.path()), &cfg) {
        Err(AtlasError::ThemeMismatch { only_in_one }) => {
            assert!(only_in_one.contains("Extra"));
        }
        other => panic!("expected ThemeMismatch, got {:?}", other.map(|r| r.files)),
    }
    assert_eq!(fs::read_dir(out.path()).expect("read_dir").count(), 0);
}

#[test]
fn run_processes_jobs_in_order_and_stops_at_first_failure() {
    let src = tempfile::tempdir().expect("tempdir");
    let out = tempfile::tempdir().expect("tempdir");
    themed_tree(src.path(), &NAMES, 16);
    themed_tree(src.path(), &["Big"], 64);

    let job = AtlasJob {
        source: SourceSet::new(src.path()),
        categories: vec![
            CategoryConfig::builder(16, "Small").build(),
            CategoryConfig::builder(64, "Large").build(),
        ],
    };
    let workspace = AtlasWorkspace::init(out.path()).expect("init");
    let reports = workspace.run(std::slice::from_ref(&job), false).expect("run");
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Small", "Large"]);
    assert_eq!(reports[1].page_sizes, vec![128]);

    let failing = AtlasJob {
        source: SourceSet::new(src.path()),
        categories: vec![
            CategoryConfig::builder(32, "Nothing").build(),
            CategoryConfig::builder(16, "Never").build(),
        ],
    };
    assert!(matches!(
        workspace.run(&[failing], false),
        Err(AtlasError::EmptyCatalog { .. })
    ));
    assert!(!out.path().join("Never.png").exists());
}

#[test]
fn plan_matches_build_geometry() {
    let src = tempfile::tempdir().expect("tempdir");
    themed_tree(src.path(), &NAMES, 16);
    let cfg = CategoryConfig::builder(16, "Plan").max_side(32).build();
    let source = SourceSet::new(src.path());

    let plan = plan_category(&source, &cfg).expect("plan");
    let built = build_category(&source, &cfg).expect("build");
    assert_eq!(plan.pages.len(), built.pages.len());
    for (p, b) in plan.pages.iter().zip(&built.pages) {
        assert_eq!(p.size, b.page.size);
        assert_eq!(p.frames, b.page.frames);
    }
    assert_eq!(plan.ordering, built.ordering);
}

#[test]
fn invalid_max_side_is_rejected() {
    let cfg = CategoryConfig::builder(16, "Odd").max_side(1000).build();
    assert!(matches!(cfg.validate(), Err(AtlasError::InvalidConfig(_))));
    let cfg = CategoryConfig::builder(0, "Zero").build();
    assert!(matches!(cfg.validate(), Err(AtlasError::InvalidConfig(_))));
}
