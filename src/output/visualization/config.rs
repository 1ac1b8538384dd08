//! Plot configuration shared across visualization functions

use plotters::prelude::*;

use crate::simulation::DEFAULT_MAX_VOLUME_ML;

/// Configuration for customizing titration plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `max_volume_ml`: Upper bound of the volume axis (burette capacity)
/// - `line_color`: Line color for single-curve plots
/// - `series_colors`: Optional colors for comparison plots (one per curve)
/// - `equivalence_color`: Color of the dashed equivalence marker
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust
/// use titration_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::titration_curve("Acetic acid vs NaOH");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.ylabel, "pH");
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Titration Curve")
    pub title: String,

    /// X-axis label (default: "Volume of Titrant (mL)")
    pub xlabel: String,

    /// Y-axis label (default: "pH")
    pub ylabel: String,

    /// Upper bound of the volume axis in mL (default: 50)
    pub max_volume_ml: f64,

    /// Line color for single-curve plots (default: BLUE)
    pub line_color: RGBColor,

    /// Optional colors for comparison plots (one per curve)
    ///
    /// If None, uses the default palette: [BLUE, RED, GREEN, MAGENTA, ...]
    pub series_colors: Option<Vec<RGBColor>>,

    /// Equivalence marker color (default: RED)
    pub equivalence_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Titration Curve".to_string(),
            xlabel: "Volume of Titrant (mL)".to_string(),
            ylabel: "pH".to_string(),
            max_volume_ml: DEFAULT_MAX_VOLUME_ML,
            line_color: BLUE,
            series_colors: None,
            equivalence_color: RED,
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
///
/// # Example
///
/// ```rust
/// use titration_rs::output::visualization::{PlotConfig, NO_TITLE};
///
/// let config = PlotConfig::titration_curve(NO_TITLE);
/// assert_eq!(config.title, "Titration Curve");
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for a single titration curve with optional custom title
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::titration_curve("HCl vs NaOH");
    /// let config = PlotConfig::titration_curve(format!("{} run", regime));
    /// let config = PlotConfig::titration_curve(NO_TITLE);
    /// ```
    pub fn titration_curve(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Titration Curve".to_string());
        config
    }

    /// Create config for overlaid curves with optional custom title
    pub fn comparison(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Titration Comparison".to_string());
        config
    }

    /// Builder pattern: set the volume axis bound
    pub fn with_max_volume(mut self, max_volume_ml: f64) -> Self {
        self.max_volume_ml = max_volume_ml;
        self
    }

    /// Create config for comparison plots with custom colors
    pub fn series_colors(colors: Vec<RGBColor>) -> Self {
        let mut config = Self::comparison(NO_TITLE);
        config.series_colors = Some(colors);
        config
    }

    /// Get color for the curve at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const PALETTE: [RGBColor; 8] = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];

        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
