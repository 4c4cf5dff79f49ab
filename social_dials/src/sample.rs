//! Control samples as they arrive from sliders, dials, the temperature sensor
//! and the hand tracker, plus the line syntax used by external feeds.

use std::fmt;
use std::str::FromStr;

use chladni_field::{remap, DIAL_MAX, DIAL_MIN};
use thiserror::Error;

/// Top of a raw hardware dial reading.
pub const RAW_DIAL_MAX: f32 = 255.0;

/// Temperature window (°C) spread across the climate dial.
pub const TEMPERATURE_RANGE_C: (f32, f32) = (15.0, 35.0);

// ════════════════════════════════════════════════════════════════════════════
// Dial
// ════════════════════════════════════════════════════════════════════════════

/// The three social parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dial {
    Equity,
    Climate,
    Surveillance,
}

impl Dial {
    pub const ALL: [Dial; 3] = [Dial::Equity, Dial::Climate, Dial::Surveillance];

    pub fn name(self) -> &'static str {
        match self {
            Dial::Equity       => "equity",
            Dial::Climate      => "climate",
            Dial::Surveillance => "surveillance",
        }
    }
}

impl fmt::Display for Dial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dial {
    type Err = SampleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equity"                  => Ok(Dial::Equity),
            "climate"                 => Ok(Dial::Climate),
            "surveillance" | "surveil" => Ok(Dial::Surveillance),
            _ => Err(SampleParseError::UnknownDial(s.to_string())),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ControlSample
// ════════════════════════════════════════════════════════════════════════════

/// One reading from an input device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlSample {
    /// A slider already on the 1–10 dial scale.
    Level { dial: Dial, value: f32 },
    /// A hardware dial reading on the 0–255 scale.
    RawDial { dial: Dial, raw: f32 },
    /// Room temperature; drives the climate dial.
    Temperature { celsius: f32 },
    /// Requested number of particles on the wall.
    ParticleCount(usize),
    /// Normalized palm x position from the hand tracker, 0–1.
    Palm { x: f32 },
}

/// Raw dial reading (0–255) onto the dial scale.  Out-of-range readings clamp.
pub fn raw_dial_level(raw: f32) -> f32 {
    remap(raw.clamp(0.0, RAW_DIAL_MAX), 0.0, RAW_DIAL_MAX, DIAL_MIN, DIAL_MAX)
}

/// Temperature in °C onto the climate scale, clamped at the window edges.
pub fn temperature_level(celsius: f32) -> f32 {
    let (lo, hi) = TEMPERATURE_RANGE_C;
    remap(celsius.clamp(lo, hi), lo, hi, DIAL_MIN, DIAL_MAX)
}

/// Clamp a slider value onto the dial scale.
pub fn clamp_level(value: f32) -> f32 {
    value.clamp(DIAL_MIN, DIAL_MAX)
}

impl ControlSample {
    /// The dial this sample moves and its value on the 1–10 scale, if any.
    ///
    /// Returns `None` for non-dial samples and for non-finite readings.
    pub fn dial_level(&self) -> Option<(Dial, f32)> {
        match *self {
            ControlSample::Level { dial, value } if value.is_finite() => {
                Some((dial, clamp_level(value)))
            }
            ControlSample::RawDial { dial, raw } if raw.is_finite() => {
                Some((dial, raw_dial_level(raw)))
            }
            ControlSample::Temperature { celsius } if celsius.is_finite() => {
                Some((Dial::Climate, temperature_level(celsius)))
            }
            _ => None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Line syntax
// ════════════════════════════════════════════════════════════════════════════

/// Why a control line was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SampleParseError {
    #[error("empty control line")]
    Empty,
    #[error("unknown control `{0}`")]
    UnknownControl(String),
    #[error("unknown dial `{0}`")]
    UnknownDial(String),
    #[error("missing value after `{0}`")]
    MissingValue(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unexpected trailing input `{0}`")]
    Trailing(String),
}

fn number(token: Option<&str>, after: &str) -> Result<f32, SampleParseError> {
    let token = token.ok_or_else(|| SampleParseError::MissingValue(after.to_string()))?;
    match token.parse::<f32>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SampleParseError::InvalidNumber(token.to_string())),
    }
}

/// Parses one feed line:
///
/// ```text
/// equity 7.5          slider level (also climate / surveillance / surveil)
/// dial climate 200    raw 0–255 dial reading
/// temp 24.5           temperature in °C
/// count 4000          particle-count target
/// palm 0.42           normalized palm x
/// ```
impl FromStr for ControlSample {
    type Err = SampleParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut tokens = line.split_whitespace();
        let head = tokens.next().ok_or(SampleParseError::Empty)?;

        let sample = match head.to_ascii_lowercase().as_str() {
            "dial" => {
                let dial: Dial = tokens.next()
                    .ok_or_else(|| SampleParseError::MissingValue(head.to_string()))?
                    .parse()?;
                ControlSample::RawDial { dial, raw: number(tokens.next(), dial.name())? }
            }
            "temp" | "temperature" => {
                ControlSample::Temperature { celsius: number(tokens.next(), head)? }
            }
            "count" => {
                let token = tokens.next()
                    .ok_or_else(|| SampleParseError::MissingValue(head.to_string()))?;
                let n = token.parse::<usize>()
                    .map_err(|_| SampleParseError::InvalidNumber(token.to_string()))?;
                ControlSample::ParticleCount(n)
            }
            "palm" => {
                ControlSample::Palm { x: number(tokens.next(), head)?.clamp(0.0, 1.0) }
            }
            other => match other.parse::<Dial>() {
                Ok(dial) => ControlSample::Level { dial, value: number(tokens.next(), head)? },
                Err(_)   => return Err(SampleParseError::UnknownControl(head.to_string())),
            },
        };

        match tokens.next() {
            Some(extra) => Err(SampleParseError::Trailing(extra.to_string())),
            None        => Ok(sample),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_dial_endpoints() {
        assert_eq!(raw_dial_level(0.0), 1.0);
        assert_eq!(raw_dial_level(255.0), 10.0);
        assert!((raw_dial_level(127.5) - 5.5).abs() < 1e-4);
    }

    #[test]
    fn raw_dial_clamps() {
        assert_eq!(raw_dial_level(-40.0), 1.0);
        assert_eq!(raw_dial_level(1000.0), 10.0);
    }

    #[test]
    fn temperature_scale() {
        assert_eq!(temperature_level(15.0), 1.0);
        assert_eq!(temperature_level(35.0), 10.0);
        assert_eq!(temperature_level(-3.0), 1.0);
        assert_eq!(temperature_level(50.0), 10.0);
        assert!((temperature_level(25.0) - 5.5).abs() < 1e-4);
    }

    #[test]
    fn dial_level_clamps_sliders() {
        let s = ControlSample::Level { dial: Dial::Equity, value: 14.0 };
        assert_eq!(s.dial_level(), Some((Dial::Equity, 10.0)));
        let s = ControlSample::Level { dial: Dial::Climate, value: -2.0 };
        assert_eq!(s.dial_level(), Some((Dial::Climate, 1.0)));
    }

    #[test]
    fn dial_level_rejects_non_finite() {
        let s = ControlSample::Level { dial: Dial::Equity, value: f32::NAN };
        assert_eq!(s.dial_level(), None);
        let s = ControlSample::Temperature { celsius: f32::INFINITY };
        assert_eq!(s.dial_level(), None);
    }

    #[test]
    fn temperature_moves_climate() {
        let s = ControlSample::Temperature { celsius: 35.0 };
        assert_eq!(s.dial_level(), Some((Dial::Climate, 10.0)));
    }

    #[test]
    fn parse_levels() {
        assert_eq!(
            "equity 7.5".parse::<ControlSample>(),
            Ok(ControlSample::Level { dial: Dial::Equity, value: 7.5 })
        );
        assert_eq!(
            "  SURVEIL   9 ".parse::<ControlSample>(),
            Ok(ControlSample::Level { dial: Dial::Surveillance, value: 9.0 })
        );
    }

    #[test]
    fn parse_device_lines() {
        assert_eq!(
            "dial climate 200".parse::<ControlSample>(),
            Ok(ControlSample::RawDial { dial: Dial::Climate, raw: 200.0 })
        );
        assert_eq!(
            "temp 24.5".parse::<ControlSample>(),
            Ok(ControlSample::Temperature { celsius: 24.5 })
        );
        assert_eq!("count 4000".parse::<ControlSample>(), Ok(ControlSample::ParticleCount(4000)));
        assert_eq!("palm 1.7".parse::<ControlSample>(), Ok(ControlSample::Palm { x: 1.0 }));
    }

    #[test]
    fn parse_rejects_malformed() {
        assert_eq!("".parse::<ControlSample>(), Err(SampleParseError::Empty));
        assert_eq!(
            "volume 3".parse::<ControlSample>(),
            Err(SampleParseError::UnknownControl("volume".into()))
        );
        assert_eq!(
            "dial mood 3".parse::<ControlSample>(),
            Err(SampleParseError::UnknownDial("mood".into()))
        );
        assert_eq!(
            "equity".parse::<ControlSample>(),
            Err(SampleParseError::MissingValue("equity".into()))
        );
        assert_eq!(
            "dial".parse::<ControlSample>(),
            Err(SampleParseError::MissingValue("dial".into()))
        );
        assert_eq!(
            "equity high".parse::<ControlSample>(),
            Err(SampleParseError::InvalidNumber("high".into()))
        );
        assert_eq!(
            "climate NaN".parse::<ControlSample>(),
            Err(SampleParseError::InvalidNumber("NaN".into()))
        );
        assert_eq!(
            "count -4".parse::<ControlSample>(),
            Err(SampleParseError::InvalidNumber("-4".into()))
        );
        assert_eq!(
            "temp 20 21".parse::<ControlSample>(),
            Err(SampleParseError::Trailing("21".into()))
        );
    }
}
