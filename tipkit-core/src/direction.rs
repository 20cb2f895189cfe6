// SPDX-License-Identifier: MIT OR Apache-2.0

/// Horizontal layout direction reported by the host.
///
/// Under [LayoutDirection::Rtl] every horizontal quantity the placement engine
/// computes as a left-side offset is applied as a right-side offset instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Left-to-right (LTR) layout direction.
    #[default]
    Ltr,

    /// Right-to-left (RTL) layout direction.
    ///
    /// Used for languages like Arabic, Hebrew, and Urdu.
    Rtl,

    /// Automatic direction detection. Currently resolves to LTR.
    Auto,
}

impl LayoutDirection {
    /// Check if this is RTL direction.
    pub fn is_rtl(&self) -> bool {
        matches!(self.resolve(), LayoutDirection::Rtl)
    }

    /// Check if this is LTR direction.
    pub fn is_ltr(&self) -> bool {
        !self.is_rtl()
    }

    /// Get the resolved direction (Auto becomes Ltr).
    pub fn resolve(&self) -> LayoutDirection {
        match self {
            LayoutDirection::Auto => LayoutDirection::Ltr,
            other => *other,
        }
    }

    /// Mirror an item position for RTL.
    ///
    /// Given the offset of an item from its leading edge, returns the
    /// physical left coordinate. For LTR, returns `offset` unchanged.
    ///
    /// # Parameters
    ///
    /// - `offset`: The offset from the leading edge
    /// - `item_width`: The width of the item being positioned
    /// - `parent_width`: The width of the parent (usually the viewport)
    pub fn mirror_position(&self, offset: f64, item_width: f64, parent_width: f64) -> f64 {
        if self.is_rtl() {
            parent_width - offset - item_width
        } else {
            offset
        }
    }
}

impl From<bool> for LayoutDirection {
    /// Maps an `is_rtl` flag onto a direction.
    fn from(is_rtl: bool) -> Self {
        if is_rtl {
            LayoutDirection::Rtl
        } else {
            LayoutDirection::Ltr
        }
    }
}
