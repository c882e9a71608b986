//! Generates a fixture tree of themed icons:
//!
//! ```text
//! <out>/<Category>/<Dark|Light>/<Group>/<Standard|Large>/<name>[@2x].png
//! ```
//!
//! Usage: cargo run -p icon-atlas-cli --example gen_theme_icons -- [out_dir] [icons_per_category]
use image::{Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};

const CATEGORIES: [&str; 3] = ["Alerts", "Modeling", "Utility"];
const GROUPS: [&str; 2] = ["Common", "Extra"];

fn ensure_dir(p: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(p)?;
    Ok(())
}

fn solid(w: u32, h: u32, c: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(w, h, Rgba(c))
}

fn draw_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, c: [u8; 4]) {
    let (iw, ih) = img.dimensions();
    for yy in y.min(ih)..(y.saturating_add(h)).min(ih) {
        for xx in x.min(iw)..(x.saturating_add(w)).min(iw) {
            img.put_pixel(xx, yy, Rgba(c));
        }
    }
}

/// Same glyph for both themes, inverted background.
fn themed_icon(size: u32, glyph: [u8; 4], dark: bool) -> RgbaImage {
    let bg = if dark { [30, 30, 30, 255] } else { [235, 235, 235, 255] };
    let mut img = solid(size, size, bg);
    let inset = (size / 4).max(1);
    draw_rect(&mut img, inset, inset, size - 2 * inset, size - 2 * inset, glyph);
    img
}

fn write_icon(dir: &Path, name: &str, img: &RgbaImage) -> anyhow::Result<()> {
    ensure_dir(dir)?;
    img.save(dir.join(format!("{name}.png")))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let out = PathBuf::from(args.next().unwrap_or_else(|| "fixtures/icons".into()));
    let per_category: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(12);
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);

    for category in CATEGORIES {
        for i in 0..per_category {
            let group = GROUPS[i % GROUPS.len()];
            let name = format!("{}{}", category.trim_end_matches('s'), i);
            let glyph = [rng.r#gen(), rng.r#gen(), rng.r#gen(), 255];
            for (theme, dark) in [("Dark", true), ("Light", false)] {
                let base = out.join(category).join(theme).join(group);
                write_icon(&base.join("Standard"), &name, &themed_icon(16, glyph, dark))?;
                write_icon(&base.join("Standard"), &format!("{name}@2x"), &themed_icon(32, glyph, dark))?;
                write_icon(&base.join("Large"), &name, &themed_icon(64, glyph, dark))?;
            }
        }
    }
    println!(
        "wrote {} icons per theme into {}",
        CATEGORIES.len() * per_category * 3,
        out.display()
    );
    Ok(())
}
