//! Bucketing of the numeric light controls into fixed prompt phrases.
//!
//! All ranges are half-open and lower-inclusive unless noted; a value that
//! sits exactly on a boundary belongs to the higher bucket.

/// Eight 45° compass sectors; `Front` straddles the 0°/360° wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzimuthSector {
    Front,
    FrontRight,
    Right,
    BackRight,
    Back,
    BackLeft,
    Left,
    FrontLeft,
}

impl AzimuthSector {
    /// Classify any angle in degrees, wrapping it into [0, 360) first.
    pub fn from_degrees(degrees: f64) -> Self {
        let az = degrees.rem_euclid(360.0);
        if !(22.5..337.5).contains(&az) {
            Self::Front
        } else if az < 67.5 {
            Self::FrontRight
        } else if az < 112.5 {
            Self::Right
        } else if az < 157.5 {
            Self::BackRight
        } else if az < 202.5 {
            Self::Back
        } else if az < 247.5 {
            Self::BackLeft
        } else if az < 292.5 {
            Self::Left
        } else {
            Self::FrontLeft
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Self::Front => "light hitting from the front",
            Self::FrontRight => "light hitting from the front-right side",
            Self::Right => "light hitting from the right (90 degrees)",
            Self::BackRight => "light hitting from the back-right",
            Self::Back => "backlighting, light from behind",
            Self::BackLeft => "light hitting from the back-left",
            Self::Left => "light hitting from the left (90 degrees)",
            Self::FrontLeft => "light hitting from the front-left side",
        }
    }
}

/// Vertical placement of the light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationBand {
    /// `<= -60`
    ExtremeLow,
    /// `(-60, -30)`
    Low,
    /// `[-30, 20)`
    Horizontal,
    /// `[20, 60)`
    High,
    /// `>= 60`
    Overhead,
}

impl ElevationBand {
    pub fn from_degrees(elevation: i32) -> Self {
        if elevation <= -60 {
            Self::ExtremeLow
        } else if elevation < -30 {
            Self::Low
        } else if elevation < 20 {
            Self::Horizontal
        } else if elevation < 60 {
            Self::High
        } else {
            Self::Overhead
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Self::ExtremeLow => "extreme low-angle light source, strong bottom-up shadow",
            Self::Low => "low-level light source, bottom-up shadow",
            Self::Horizontal => "horizontal light source",
            Self::High => "high-positioned light source",
            Self::Overhead => "top-down ceiling light source",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityLevel {
    Soft,
    Bright,
    Dramatic,
}

impl IntensityLevel {
    pub fn from_value(intensity: f64) -> Self {
        if intensity < 3.0 {
            Self::Soft
        } else if intensity < 7.0 {
            Self::Bright
        } else {
            // NaN fails both comparisons above and lands here, same as the host.
            Self::Dramatic
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Self::Soft => "soft ambient",
            Self::Bright => "bright directional",
            Self::Dramatic => "strong dramatic contrast",
        }
    }
}

pub fn classify_azimuth(azimuth: i32) -> &'static str {
    AzimuthSector::from_degrees(f64::from(azimuth)).phrase()
}

pub fn classify_elevation(elevation: i32) -> &'static str {
    ElevationBand::from_degrees(elevation).phrase()
}

pub fn classify_intensity(intensity: f64) -> &'static str {
    IntensityLevel::from_value(intensity).phrase()
}
