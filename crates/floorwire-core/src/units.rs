//! Unit conversion utilities
//!
//! Handles the document's display units (mm or inches) and the mapping
//! between canvas pixels and real-world lengths through the floorplan's
//! `pxPerMeter` calibration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Calibration used when a document does not carry `pxPerMeter`.
pub const DEFAULT_PX_PER_METER: f64 = 100.0;

/// Display units of a floorplan document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    /// Millimetres
    #[default]
    Mm,
    /// Inches
    In,
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Units {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "metric" => Ok(Self::Mm),
            "in" | "inch" | "imperial" => Ok(Self::In),
            _ => Err(format!("Unknown units: {}", s)),
        }
    }
}

impl Units {
    /// Short label ("mm" or "in")
    pub fn label(self) -> &'static str {
        match self {
            Self::Mm => "mm",
            Self::In => "in",
        }
    }
}

/// Converts a canvas distance in pixels to millimetres.
///
/// Falls back to [`DEFAULT_PX_PER_METER`] for a non-positive calibration.
pub fn px_to_mm(px: f64, px_per_meter: f64) -> f64 {
    let scale = if px_per_meter > 0.0 {
        px_per_meter
    } else {
        DEFAULT_PX_PER_METER
    };
    px / scale * 1000.0
}

/// Converts millimetres to a canvas distance in pixels.
pub fn mm_to_px(mm: f64, px_per_meter: f64) -> f64 {
    let scale = if px_per_meter > 0.0 {
        px_per_meter
    } else {
        DEFAULT_PX_PER_METER
    };
    mm / 1000.0 * scale
}

/// Format a length given in millimetres for display
///
/// * `value_mm` - Value in millimetres
/// * `units` - Target display units
pub fn format_length(value_mm: f64, units: Units) -> String {
    match units {
        Units::Mm => format!("{:.0} mm", value_mm),
        Units::In => format!("{:.2} in", value_mm / MM_PER_INCH),
    }
}

/// Parse a length string to millimetres
///
/// Inches accept decimals ("1.5") and mixed fractions ("1 1/2").
/// An empty string parses as zero.
pub fn parse_length(input: &str, units: Units) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(0.0);
    }

    match units {
        Units::Mm => input.parse::<f64>().map_err(|e| e.to_string()),
        Units::In => {
            let mut total_inches = 0.0;
            for part in input.split_whitespace() {
                if let Some((num, den)) = part.split_once('/') {
                    let num = num.parse::<f64>().map_err(|_| "Invalid numerator")?;
                    let den = den.parse::<f64>().map_err(|_| "Invalid denominator")?;
                    if den == 0.0 {
                        return Err("Division by zero".to_string());
                    }
                    total_inches += num / den;
                } else {
                    total_inches += part.parse::<f64>().map_err(|_| "Invalid number part")?;
                }
            }
            Ok(total_inches * MM_PER_INCH)
        }
    }
}
