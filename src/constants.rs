//! Default layout values for canvas nodes
//!
//! Centralized location for the hard-coded spacing and sizing numbers that
//! seed [`crate::preferences::Preferences`].

/// Port band sizing
pub mod port {
    /// Height of the input band at the top and the output band at the bottom
    pub const HEIGHT: f32 = 12.0;

    /// Amount trimmed off the node width to get the port width
    pub const WIDTH_TRIM: f32 = 16.0;
}

/// Content spacing
pub mod content {
    /// Uniform padding around the header and body text
    pub const PADDING: f32 = 4.0;

    /// Extra padding applied on the left and right only
    pub const EXTRA_PADDING_X: f32 = 8.0;

    /// Edge length of the square header icon
    pub const ICON_SIZE: f32 = 16.0;
}

/// Font sizes used when measuring text
pub mod font {
    pub const HEADER_SIZE: f32 = 13.0;
    pub const BODY_SIZE: f32 = 11.0;
}

/// Directory and file name of the persisted preferences
pub mod config {
    pub const APP_DIR: &str = "behave-canvas";
    pub const PREFERENCES_FILE: &str = "preferences.json";
}
