//! Acid-base indicators and flask colour mapping
//!
//! An indicator changes colour over a characteristic pH range. Below the
//! range the solution shows the acid colour, above it the base colour, and
//! inside it either a dedicated middle colour or a transition between the two.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TitrationError};

/// Opacity used to render a coloured (non-transparent) flask
pub const FLASK_FILL_OPACITY: f64 = 0.5;

// =================================================================================================
// Colour
// =================================================================================================

/// 8-bit RGB colour with a floating-point alpha channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(255, 255, 255, 0.0);
    pub const PINK: Rgba = Rgba::opaque(255, 192, 203);
    pub const RED: Rgba = Rgba::opaque(255, 0, 0);
    pub const YELLOW: Rgba = Rgba::opaque(255, 255, 0);
    pub const GREEN: Rgba = Rgba::opaque(0, 128, 0);
    pub const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Fully transparent colours carry no hue
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }

    /// Same colour with a different alpha (clamped to `[0, 1]`)
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { a: alpha.clamp(0.0, 1.0), ..self }
    }

    /// Component-wise linear interpolation, `t` clamped to `[0, 1]`
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |from: u8, to: u8| -> u8 {
            (from as f64 + (to as f64 - from as f64) * t).round() as u8
        };
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Opacity of the liquid layer when this colour fills the flask
    pub fn fill_opacity(&self) -> f64 {
        if self.is_transparent() { 0.0 } else { FLASK_FILL_OPACITY }
    }

    /// CSS `rgba(...)` notation
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

// =================================================================================================
// Indicator specification
// =================================================================================================

/// How an indicator without a middle colour behaves inside its range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTransition {
    /// Switch from the acid to the base colour at the middle of the range
    #[default]
    Snap,

    /// Blend the two colours proportionally to the position in the range
    Linear,
}

/// pH range and colours of an indicator dye
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    pub name: String,
    pub low_ph: f64,
    pub high_ph: f64,
    /// Colour below `low_ph`
    pub below: Rgba,
    /// Colour above `high_ph`
    pub above: Rgba,
    /// Colour shown anywhere inside the range, if the dye has one
    pub mid: Option<Rgba>,
    #[serde(default)]
    pub transition: ColorTransition,
}

impl IndicatorSpec {
    /// Create a custom indicator
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when the range is empty, inverted or not finite.
    pub fn new(
        name: impl Into<String>,
        low_ph: f64,
        high_ph: f64,
        below: Rgba,
        above: Rgba,
    ) -> Result<Self> {
        if !low_ph.is_finite() || !high_ph.is_finite() || low_ph >= high_ph {
            return Err(TitrationError::InvalidConfig(format!(
                "indicator range must satisfy low < high, got [{}, {}]",
                low_ph, high_ph
            )));
        }
        Ok(Self {
            name: name.into(),
            low_ph,
            high_ph,
            below,
            above,
            mid: None,
            transition: ColorTransition::Snap,
        })
    }

    /// Builder: add a middle colour
    pub fn with_mid(mut self, mid: Rgba) -> Self {
        self.mid = Some(mid);
        self
    }

    /// Builder: choose the in-range transition
    pub fn with_transition(mut self, transition: ColorTransition) -> Self {
        self.transition = transition;
        self
    }

    /// Whether `ph` falls inside the colour-change range (inclusive)
    pub fn in_range(&self, ph: f64) -> bool {
        ph >= self.low_ph && ph <= self.high_ph
    }
}

// =================================================================================================
// Built-in indicators
// =================================================================================================

/// Indicators shipped with the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    /// 8.2 - 10.0, colourless to pink
    Phenolphthalein,
    /// 6.0 - 7.6, yellow / green / blue
    BromothymolBlue,
    /// 3.1 - 4.4, red to yellow
    MethylOrange,
    /// 4.5 - 8.3, red to blue
    Litmus,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Phenolphthalein,
        Indicator::BromothymolBlue,
        Indicator::MethylOrange,
        Indicator::Litmus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Indicator::Phenolphthalein => "Phenolphthalein",
            Indicator::BromothymolBlue => "Bromothymol Blue",
            Indicator::MethylOrange => "Methyl Orange",
            Indicator::Litmus => "Litmus",
        }
    }

    /// Range and colours of this indicator
    pub fn spec(&self) -> IndicatorSpec {
        let (low_ph, high_ph, below, above, mid) = match self {
            Indicator::Phenolphthalein => (8.2, 10.0, Rgba::TRANSPARENT, Rgba::PINK, None),
            Indicator::BromothymolBlue => (6.0, 7.6, Rgba::YELLOW, Rgba::BLUE, Some(Rgba::GREEN)),
            Indicator::MethylOrange => (3.1, 4.4, Rgba::RED, Rgba::YELLOW, None),
            Indicator::Litmus => (4.5, 8.3, Rgba::RED, Rgba::BLUE, None),
        };
        IndicatorSpec {
            name: self.label().to_string(),
            low_ph,
            high_ph,
            below,
            above,
            mid,
            transition: ColorTransition::Snap,
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =================================================================================================
// Colour mapping
// =================================================================================================

/// Colour of the flask contents at `ph` with the given indicator
///
/// - below the range: `below`
/// - above the range: `above`
/// - inside the range: `mid` when present; otherwise a transparent `below`
///   fades in towards `above` proportionally to the position in the range,
///   and opaque colours follow the indicator's [`ColorTransition`]
///
/// # Example
/// ```
/// use titration_rs::chemistry::{indicator_color, Indicator, Rgba};
///
/// let methyl_orange = Indicator::MethylOrange.spec();
/// assert_eq!(indicator_color(2.0, &methyl_orange), Rgba::RED);
/// assert_eq!(indicator_color(5.0, &methyl_orange), Rgba::YELLOW);
///
/// let phenolphthalein = Indicator::Phenolphthalein.spec();
/// let halfway = indicator_color(9.1, &phenolphthalein);
/// assert!((halfway.a - 0.5).abs() < 1e-9);
/// ```
pub fn indicator_color(ph: f64, indicator: &IndicatorSpec) -> Rgba {
    if ph.is_nan() || ph < indicator.low_ph {
        return indicator.below;
    }
    if ph > indicator.high_ph {
        return indicator.above;
    }

    if let Some(mid) = indicator.mid {
        return mid;
    }

    let span = indicator.high_ph - indicator.low_ph;
    let progress = if span > 0.0 { ((ph - indicator.low_ph) / span).clamp(0.0, 1.0) } else { 1.0 };

    if indicator.below.is_transparent() {
        return indicator.above.with_alpha(indicator.above.a * progress);
    }

    match indicator.transition {
        ColorTransition::Snap => {
            if progress > 0.5 { indicator.above } else { indicator.below }
        }
        ColorTransition::Linear => indicator.below.lerp(indicator.above, progress),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
