//! Letter grades and grade points

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade derived from numeric marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    /// 90 and above
    S,
    /// 80 to below 90
    A,
    /// 70 to below 80
    B,
    /// 60 to below 70
    C,
    /// 50 to below 60
    D,
    /// Below 50
    F,
}

/// Grade bands as (inclusive lower bound, grade), checked top-down.
const BANDS: [(f64, Grade); 5] = [
    (90.0, Grade::S),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
];

impl Grade {
    /// All grades from best to worst
    pub const ALL: [Self; 6] = [Self::S, Self::A, Self::B, Self::C, Self::D, Self::F];

    /// Map marks onto a grade band.
    ///
    /// Bounds are inclusive-low and the first matching band wins. Marks outside
    /// 0..=100 are not rejected: negative marks fall through to `F` and anything
    /// above 100 is `S`.
    #[must_use]
    pub fn from_marks(marks: f64) -> Self {
        BANDS
            .iter()
            .find(|(floor, _)| marks >= *floor)
            .map_or(Self::F, |(_, grade)| *grade)
    }

    /// Grade points used for GPA averaging (S=5 down to F=0)
    #[must_use]
    pub const fn gpa_point(self) -> f64 {
        match self {
            Self::S => 5.0,
            Self::A => 4.0,
            Self::B => 3.0,
            Self::C => 2.0,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Single-letter label as stored in the records table
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            _ => Err(format!("Unknown grade: '{s}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive_low() {
        assert_eq!(Grade::from_marks(90.0), Grade::S);
        assert_eq!(Grade::from_marks(89.99), Grade::A);
        assert_eq!(Grade::from_marks(80.0), Grade::A);
        assert_eq!(Grade::from_marks(79.99), Grade::B);
        assert_eq!(Grade::from_marks(70.0), Grade::B);
        assert_eq!(Grade::from_marks(60.0), Grade::C);
        assert_eq!(Grade::from_marks(50.0), Grade::D);
        assert_eq!(Grade::from_marks(49.99), Grade::F);
    }

    #[test]
    fn test_out_of_range_marks_still_map() {
        assert_eq!(Grade::from_marks(-12.0), Grade::F);
        assert_eq!(Grade::from_marks(150.0), Grade::S);
    }

    #[test]
    fn test_gpa_points() {
        let points: Vec<f64> = Grade::ALL.iter().map(|g| g.gpa_point()).collect();
        assert_eq!(points, vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("s".parse::<Grade>(), Ok(Grade::S));
        assert_eq!(" B ".parse::<Grade>(), Ok(Grade::B));
        assert!("E".parse::<Grade>().is_err());
        assert!("".parse::<Grade>().is_err());
    }
}
