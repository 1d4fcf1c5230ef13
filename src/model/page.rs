//! Page geometry and provenance types.

use serde::{Deserialize, Serialize};

/// A single page of the source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in source units (points for PDF)
    pub width: f32,

    /// Page height in source units
    pub height: f32,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(number: u32) -> Self {
        Self::new(number, 612.0, 792.0) // 8.5 * 72, 11 * 72
    }

    /// Create a new page with standard A4 size (210 x 297 mm).
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0) // 210mm * 2.834, 297mm * 2.834
    }

    /// Get page dimensions as a [`PageSize`].
    pub fn size(&self) -> PageSize {
        PageSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::letter(1)
    }
}

/// Page dimensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Width in source units
    pub width: f32,
    /// Height in source units
    pub height: f32,
}

/// Origin of a bounding box coordinate system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CoordOrigin {
    /// Y grows upwards from the bottom edge (PDF native)
    #[default]
    BottomLeft,
    /// Y grows downwards from the top edge (screen/HTML)
    TopLeft,
}

/// An axis-aligned box on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x0: f32,
    /// First vertical edge (top in bottom-left origin)
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Second vertical edge (bottom in bottom-left origin)
    pub y1: f32,
    /// Coordinate system the box is expressed in
    #[serde(default)]
    pub origin: CoordOrigin,
}

impl BoundingBox {
    /// Create a box in bottom-left origin coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            origin: CoordOrigin::BottomLeft,
        }
    }

    /// Convert to a top-left origin using the owning page's height.
    ///
    /// Both vertical edges become `page_height - y`. A box already in
    /// top-left origin is returned unchanged.
    pub fn to_top_left_origin(&self, page_height: f32) -> Self {
        match self.origin {
            CoordOrigin::TopLeft => *self,
            CoordOrigin::BottomLeft => Self {
                x0: self.x0,
                y0: page_height - self.y0,
                x1: self.x1,
                y1: page_height - self.y1,
                origin: CoordOrigin::TopLeft,
            },
        }
    }

    /// Edges as `[x0, y0, x1, y1]`.
    pub fn as_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x0, self.y0, self.x1, self.y1)
    }
}

/// Where an item appears in the rendered source document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Page number (1-indexed)
    pub page_no: u32,

    /// Region on the page, when the engine reported one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl Provenance {
    /// Create a provenance entry with a bounding box.
    pub fn new(page_no: u32, bbox: BoundingBox) -> Self {
        Self {
            page_no,
            bbox: Some(bbox),
        }
    }

    /// Create a provenance entry that only knows its page.
    pub fn page_only(page_no: u32) -> Self {
        Self {
            page_no,
            bbox: None,
        }
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> u32 {
        self.page_no.saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(1, 612.0, 792.0);
        assert_eq!(page.number, 1);
        assert_eq!(page.size().height, 792.0);
        assert!(!page.is_landscape());
    }

    #[test]
    fn test_bbox_top_left_conversion() {
        let bbox = BoundingBox::new(72.0, 700.0, 540.0, 680.0);
        let converted = bbox.to_top_left_origin(792.0);

        assert_eq!(converted.as_array(), [72.0, 92.0, 540.0, 112.0]);
        assert_eq!(converted.origin, CoordOrigin::TopLeft);

        // Converting again is a no-op
        assert_eq!(converted.to_top_left_origin(792.0), converted);
    }

    #[test]
    fn test_bbox_display() {
        let bbox = BoundingBox::new(1.0, 2.5, 3.0, 4.0);
        assert_eq!(bbox.to_string(), "[1, 2.5, 3, 4]");
    }

    #[test]
    fn test_provenance_page_index() {
        assert_eq!(Provenance::page_only(1).page_index(), 0);
        assert_eq!(Provenance::page_only(7).page_index(), 6);
    }
}
