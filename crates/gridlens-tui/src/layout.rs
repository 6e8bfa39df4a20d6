//! Layout constants for the gridlens UI.

/// Main layout constants.
pub mod main {
    /// Header panel height in rows.
    pub const HEADER_HEIGHT: u16 = 3;

    /// Status bar height in rows.
    pub const STATUS_BAR_HEIGHT: u16 = 3;

    /// Table list width in columns.
    pub const TABLE_LIST_WIDTH: u16 = 28;
}

/// Grid panel sizing.
pub mod grid {
    /// Narrowest a data column is drawn.
    pub const MIN_COLUMN_WIDTH: u16 = 8;

    /// Widest a data column is drawn before its text is clipped.
    pub const MAX_COLUMN_WIDTH: u16 = 40;

    /// Rows taken by the pager footer inside the grid block.
    pub const PAGER_HEIGHT: u16 = 1;
}

/// Input prompt height, borders included.
pub const INPUT_BAR_HEIGHT: u16 = 3;
