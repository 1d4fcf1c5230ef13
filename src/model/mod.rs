//! Document model types.
//!
//! This module defines the canonical representation of a converted
//! document: an ordered stream of tagged items with provenance, plus the
//! page geometry needed to interpret bounding boxes. Whatever shape the
//! conversion engine produces is normalized into these types at the
//! boundary (see [`crate::ingest`]) before any pass runs.

mod document;
mod item;
mod page;
mod table;

pub use document::{Document, ItemEntry};
pub use item::{
    DocumentItem, GroupItem, GroupKind, ImageRef, ItemLabel, ListItem, PictureItem, TableItem,
    TextItem, UnknownItem,
};
pub use page::{BoundingBox, CoordOrigin, Page, PageSize, Provenance};
pub use table::{GridCell, TableGrid};
