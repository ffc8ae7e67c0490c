use std::{fmt, num::IntErrorKind, str::FromStr};

use crate::ModelError;

/// Maximum tolerated running time, in whole seconds.
///
/// Zero is valid and flags every task with a nonzero running time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u64);

impl Threshold {
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub const fn as_secs(&self) -> u64 {
        self.0
    }
}

impl FromStr for Threshold {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let unsigned = match trimmed.parse::<u64>() {
            Ok(secs) => return Ok(Threshold(secs)),
            Err(e) => e,
        };
        if *unsigned.kind() == IntErrorKind::PosOverflow {
            return Err(ModelError::ThresholdOutOfRange(s.to_string()));
        }

        match trimmed.parse::<i64>() {
            Ok(value) => u64::try_from(value)
                .map(Threshold)
                .map_err(|_| ModelError::NegativeThreshold(value)),
            Err(e) if *e.kind() == IntErrorKind::NegOverflow => {
                Err(ModelError::ThresholdOutOfRange(s.to_string()))
            }
            Err(_) => Err(ModelError::InvalidThreshold(s.to_string())),
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
