use serde_json::{Value, json};

use crate::model::Page;
use crate::ordering::NameOrdering;
use crate::pipeline::CategoryOutput;

/// Serialize a built category as `{ name, ordering, pages, stats }`.
/// `ordering` lists `{ name, index }` in icon id order; every page lists its file
/// name, side length and the cell of each icon (Dark and Light alike).
pub fn to_json_manifest(output: &CategoryOutput) -> Value {
    let page_files = output.page_file_names();
    let pages: Vec<Value> = output
        .pages
        .iter()
        .zip(&page_files)
        .map(|(p, file)| page_json(&p.page, file))
        .collect();
    json!({
        "name": output.name,
        "ordering": ordering_json(&output.ordering),
        "pages": pages,
        "stats": output.stats(),
    })
}

// A list rather than a map: base names may repeat across subdirectories.
fn ordering_json(ordering: &NameOrdering) -> Value {
    ordering
        .iter()
        .map(|(index, name)| json!({"name": name, "index": index}))
        .collect()
}

fn page_json(page: &Page, file: &str) -> Value {
    let frames: Vec<Value> = page
        .frames
        .iter()
        .map(|fr| {
            json!({
                "key": fr.key,
                "theme": fr.theme,
                "x": fr.cell.x,
                "y": fr.cell.y,
                "w": fr.cell.w,
                "h": fr.cell.h,
            })
        })
        .collect();
    json!({
        "id": page.id,
        "file": file,
        "size": {"w": page.size, "h": page.size},
        "frames": frames,
    })
}
