//! Core library for packing themed icon sets into grid atlases.
//!
//! - Catalog: walk a tree of `Dark`/`Light` theme folders, keep icons of one width, validate the pair
//! - Sizing + packing: smallest power-of-two square page, fixed-stride row fill, overflow into more pages
//! - Ordering: stable `name=index` table derived from the Dark icons
//! - Pipeline: `AtlasWorkspace` builds and writes categories; exporters are provided for JSON manifests.
//!
//! Quick example:
//! ```ignore
//! use icon_atlas_core::prelude::*;
//! # fn main() -> icon_atlas_core::Result<()> {
//! let workspace = AtlasWorkspace::init("out")?;
//! let source = SourceSet::new("textures/Shared/InsertableObjects");
//! let cfg = CategoryConfig::builder(16, "Classes [x16]")
//!     .glob("**/Standard/*")
//!     .save_info(true)
//!     .build();
//! let report = workspace.run_category(&source, &cfg)?;
//! println!("pages: {:?}", report.page_sizes);
//! # Ok(()) }
//! ```

pub mod batch;
pub mod catalog;
pub mod compositing;
pub mod config;
pub mod error;
pub mod export;
pub mod header;
pub mod model;
pub mod ordering;
pub mod packer;
pub mod pipeline;
pub mod sizing;

pub use batch::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use ordering::*;
pub use pipeline::*;
pub use sizing::*;

/// Convenience prelude for common types and functions.
/// Importing `icon_atlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::catalog::{Catalog, DiscoveryFilter, validate_and_combine};
    pub use crate::config::{AtlasJob, CategoryConfig, CategoryConfigBuilder, SourceSet, SubdirSelection};
    pub use crate::model::{Frame, ImageRecord, PackStats, Page, Rect, Theme};
    pub use crate::ordering::{NameOrdering, parse_ordering};
    pub use crate::packer::{OutputPage, PageLayout, layout_page, pack_page};
    pub use crate::sizing::{AtlasSizing, compute_sizing};
    pub use crate::{
        AtlasWorkspace, CategoryOutput, CategoryPlan, CategoryReport, build_all, build_category,
        plan_category, plan_pages,
    };
}
