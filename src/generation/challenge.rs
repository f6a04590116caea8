//! # Challenge Ratings
//!
//! Rational challenge ratings such as `"1/4"` or `"5"`.

use crate::{WayfarerError, WayfarerResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A creature's challenge rating, kept as a reduced fraction.
///
/// The canonical text form is the bare numerator for whole ratings and
/// `"n/d"` otherwise, so `"2/4"` parses to the same value as `"1/2"`.
///
/// # Examples
///
/// ```
/// use wayfarer::ChallengeRating;
///
/// let quarter: ChallengeRating = "1/4".parse().unwrap();
/// assert_eq!(quarter.to_string(), "1/4");
/// assert_eq!(quarter.as_f64(), 0.25);
/// assert!(quarter < ChallengeRating::whole(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChallengeRating {
    numerator: u32,
    denominator: u32,
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl ChallengeRating {
    /// Builds a rating from a fraction, reducing it.
    pub fn new(numerator: u32, denominator: u32) -> WayfarerResult<Self> {
        if denominator == 0 {
            return Err(WayfarerError::InvalidParameter(format!(
                "Challenge rating {}/0 has a zero denominator",
                numerator
            )));
        }
        let divisor = gcd(numerator, denominator).max(1);
        Ok(Self {
            numerator: numerator / divisor,
            denominator: denominator / divisor,
        })
    }

    /// A whole-number rating.
    pub const fn whole(value: u32) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Whether the rating has no fractional part.
    pub fn is_whole(&self) -> bool {
        self.denominator == 1
    }

    /// Numeric value of the rating.
    pub fn as_f64(&self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

impl Default for ChallengeRating {
    fn default() -> Self {
        Self::whole(0)
    }
}

impl Ord for ChallengeRating {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.numerator) * u64::from(other.denominator);
        let rhs = u64::from(other.numerator) * u64::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for ChallengeRating {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChallengeRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_whole() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for ChallengeRating {
    type Err = WayfarerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid =
            || WayfarerError::InvalidParameter(format!("Invalid challenge rating: {:?}", s));
        let parse_part = |part: &str| part.trim().parse::<u32>().map_err(|_| invalid());

        match text.split_once('/') {
            Some((numerator, denominator)) => {
                Self::new(parse_part(numerator)?, parse_part(denominator)?)
            }
            None => Ok(Self::whole(parse_part(text)?)),
        }
    }
}

impl TryFrom<String> for ChallengeRating {
    type Error = WayfarerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChallengeRating> for String {
    fn from(value: ChallengeRating) -> Self {
        value.to_string()
    }
}

impl From<u32> for ChallengeRating {
    fn from(value: u32) -> Self {
        Self::whole(value)
    }
}
