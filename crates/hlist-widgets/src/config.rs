#![forbid(unsafe_code)]

//! Behaviour switches for the list box.

/// Default column width in pixels.
pub const DEFAULT_COLUMN_WIDTH: u32 = 22;

/// Selection and layout behaviour of a [`HorizontalListBox`](crate::HorizontalListBox).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBoxConfig {
    /// Width of every column in pixels, at least 1 (default: 22).
    pub column_width: u32,
    /// Allow more than one selected column (default: false).
    pub multiple_selection: bool,
    /// Plain clicks flip the clicked column instead of replacing the
    /// selection. Only applies with multiple selection (default: false).
    pub clicking_toggles_selection: bool,
    /// Select on mouse-down rather than mouse-up (default: true).
    pub select_on_mouse_down: bool,
    /// Hovering selects the column under the pointer (default: false).
    pub mouse_move_selects: bool,
    /// Lower bound for the scrollable content width (default: 0).
    pub min_content_width: u32,
}

impl Default for ListBoxConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            multiple_selection: false,
            clicking_toggles_selection: false,
            select_on_mouse_down: true,
            mouse_move_selects: false,
            min_content_width: 0,
        }
    }
}

impl ListBoxConfig {
    /// Set the column width. Zero is clamped to 1.
    #[must_use]
    pub fn with_column_width(mut self, width: u32) -> Self {
        self.column_width = width.max(1);
        self
    }

    #[must_use]
    pub fn with_multiple_selection(mut self, enabled: bool) -> Self {
        self.multiple_selection = enabled;
        self
    }

    #[must_use]
    pub fn with_clicking_toggles_selection(mut self, enabled: bool) -> Self {
        self.clicking_toggles_selection = enabled;
        self
    }

    #[must_use]
    pub fn with_select_on_mouse_down(mut self, enabled: bool) -> Self {
        self.select_on_mouse_down = enabled;
        self
    }

    #[must_use]
    pub fn with_mouse_move_selects(mut self, enabled: bool) -> Self {
        self.mouse_move_selects = enabled;
        self
    }

    #[must_use]
    pub fn with_min_content_width(mut self, width: u32) -> Self {
        self.min_content_width = width;
        self
    }
}
