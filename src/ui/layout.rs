//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! Rows and columns here are 1-indexed terminal cells, matching the ANSI
//! cursor positioning used by the components. Zellij reports mouse positions
//! 0-indexed, so callers add one before asking these types anything.
//!
//! ```text
//! row 1      (blank)
//! row 2      header
//! row 3      border
//! rows 4-6   search bar (search mode only)
//! ...        result list
//! ...        status line
//! rows-1     border
//! rows       footer
//! ```

/// Rows used by the fixed chrome: blank, header, two borders, status, footer.
const CHROME_ROWS: usize = 6;

/// Rows used by the search bar box.
pub const SEARCH_BAR_ROWS: usize = 3;

/// First row below the header border.
const BODY_FIRST_ROW: usize = 4;

/// Overlay box height: border, blank, caption, blank, url, hint, border.
const OVERLAY_HEIGHT: usize = 7;

/// Narrowest overlay box drawn.
const OVERLAY_MIN_WIDTH: usize = 24;

/// Region of the screen that shows result rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListArea {
    pub first_row: usize,
    pub height: usize,
}

impl ListArea {
    /// Computes the list area for a pane of `rows` rows.
    #[must_use]
    pub const fn for_pane(rows: usize, search_visible: bool) -> Self {
        let search_rows = if search_visible { SEARCH_BAR_ROWS } else { 0 };
        Self {
            first_row: BODY_FIRST_ROW + search_rows,
            height: rows.saturating_sub(CHROME_ROWS + search_rows),
        }
    }

    /// Row of the status line directly below the list.
    #[must_use]
    pub const fn status_row(&self) -> usize {
        self.first_row + self.height
    }

    /// Index of the result drawn at `row`, given the first visible result.
    #[must_use]
    pub const fn item_at(&self, row: usize, viewport_top: usize) -> Option<usize> {
        if row < self.first_row || row >= self.first_row + self.height {
            return None;
        }
        Some(viewport_top + (row - self.first_row))
    }
}

/// Bounds of the centered overlay content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBox {
    pub top: usize,
    pub left: usize,
    pub width: usize,
    pub height: usize,
}

impl OverlayBox {
    /// Centers the overlay box in a `rows` x `cols` pane.
    #[must_use]
    pub fn for_pane(rows: usize, cols: usize) -> Self {
        let width = (cols * 3 / 4).max(OVERLAY_MIN_WIDTH).min(cols);
        let height = OVERLAY_HEIGHT.min(rows);
        Self {
            top: rows.saturating_sub(height) / 2 + 1,
            left: cols.saturating_sub(width) / 2 + 1,
            width,
            height,
        }
    }

    /// Width available for text between the side borders and padding.
    #[must_use]
    pub const fn inner_width(&self) -> usize {
        self.width.saturating_sub(4)
    }

    /// Whether the cell at (`row`, `col`) is part of the content box.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.top && row < self.top + self.height && col >= self.left && col < self.left + self.width
    }
}
