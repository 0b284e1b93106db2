use std::path::PathBuf;

/// File loaded at startup, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "Cleaned_Package_Data_County.csv";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Startup settings for the dashboard.  Only the defaults are used; nothing
/// is read from the environment or from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    /// Package CSV loaded before the window opens.
    pub data_path: PathBuf,
    pub window_title: String,
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            window_title: "Advanced Package Analytics Dashboard".to_string(),
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
        }
    }
}
