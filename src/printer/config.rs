//! # Page Configuration
//!
//! This module defines the physical pages overprint prints onto.
//!
//! ## Supported Pages
//!
//! | Profile | Size (mm) | Size (CSS px @ 96/in) |
//! |---------|-----------|-----------------------|
//! | A4      | 210 x 297 | 793.7 x 1122.5        |
//! | Letter  | 215.9 x 279.4 | 816 x 1056        |
//!
//! ## Usage
//!
//! ```
//! use overprint::printer::PageProfile;
//!
//! let page = PageProfile::A4;
//! println!("Page: {} ({} x {} mm)", page.name, page.width_mm, page.height_mm);
//! ```

use serde::Serialize;

use crate::geometry::Size;

/// CSS reference pixels per inch.
pub const CSS_PX_PER_INCH: f64 = 96.0;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// # Page Profile
///
/// A fixed portrait page. Placements are anchored at percentages of this
/// page's width and height when printing, whatever the template image's own
/// aspect ratio.
///
/// ## Calculations
///
/// ```text
/// px_per_mm = 96 / 25.4 ≈ 3.78
///
/// For A4:
///   width_px  = 210 * 3.78 ≈ 793.7
///   height_px = 297 * 3.78 ≈ 1122.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageProfile {
    /// Display name, also used as the CSS `@page` size keyword
    pub name: &'static str,

    /// Page width in millimeters
    pub width_mm: f64,

    /// Page height in millimeters
    pub height_mm: f64,
}

impl PageProfile {
    /// # ISO A4 Portrait
    ///
    /// The pre-printed settlement forms are A4.
    pub const A4: Self = Self {
        name: "A4",
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// # US Letter Portrait
    pub const LETTER: Self = Self {
        name: "Letter",
        width_mm: 215.9,
        height_mm: 279.4,
    };

    /// Page size in millimeters.
    #[inline]
    pub fn size_mm(&self) -> Size {
        Size::new(self.width_mm, self.height_mm)
    }

    /// Page size in CSS pixels.
    #[inline]
    pub fn size_px(&self) -> Size {
        Size::new(mm_to_px(self.width_mm), mm_to_px(self.height_mm))
    }

    /// Parse a page name (CLI args or display name).
    ///
    /// Accepts `"a4"`, `"letter"` and any built-in display name,
    /// case-insensitively.
    pub fn parse(s: &str) -> Result<Self, String> {
        let wanted = s.trim().to_lowercase();
        Self::built_in()
            .into_iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown page '{}'. Use 'a4' or 'letter'", s))
    }

    /// List all built-in pages.
    pub fn built_in() -> Vec<Self> {
        vec![Self::A4, Self::LETTER]
    }
}

impl Default for PageProfile {
    fn default() -> Self {
        Self::A4
    }
}

/// Convert millimeters to CSS pixels
#[inline]
pub fn mm_to_px(mm: f64) -> f64 {
    mm * CSS_PX_PER_INCH / MM_PER_INCH
}

/// Convert CSS pixels to millimeters
#[inline]
pub fn px_to_mm(px: f64) -> f64 {
    px * MM_PER_INCH / CSS_PX_PER_INCH
}

// ============================================================================
// TESTS
// ============================================================================
