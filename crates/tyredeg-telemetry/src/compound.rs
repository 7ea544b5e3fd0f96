use std::str::FromStr;

/// Slick and wet-weather tire compounds, with their fixed integer codes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display,
)]
pub enum Compound {
    #[display("SOFT")]
    Soft,
    #[display("MEDIUM")]
    Medium,
    #[display("HARD")]
    Hard,
    #[display("INTERMEDIATE")]
    Intermediate,
    #[display("WET")]
    Wet,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown tire compound '{value}'")]
pub struct UnknownCompoundError {
    pub value: String,
}

impl Compound {
    pub const ALL: [Self; 5] = [
        Self::Soft,
        Self::Medium,
        Self::Hard,
        Self::Intermediate,
        Self::Wet,
    ];

    /// Fixed encoding: SOFT=0, MEDIUM=1, HARD=2, INTERMEDIATE=3, WET=4.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Soft => 0,
            Self::Medium => 1,
            Self::Hard => 2,
            Self::Intermediate => 3,
            Self::Wet => 4,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl FromStr for Compound {
    type Err = UnknownCompoundError;

    /// Matches the provider's upper-case names exactly; `UNKNOWN` and
    /// `TEST_UNKNOWN` are rejected like any other unlisted value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOFT" => Ok(Self::Soft),
            "MEDIUM" => Ok(Self::Medium),
            "HARD" => Ok(Self::Hard),
            "INTERMEDIATE" => Ok(Self::Intermediate),
            "WET" => Ok(Self::Wet),
            _ => Err(UnknownCompoundError {
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_fixed() {
        let codes: Vec<u8> = Compound::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4]);
        for compound in Compound::ALL {
            assert_eq!(Compound::from_code(compound.code()), Some(compound));
            assert_eq!(compound.to_string().parse::<Compound>(), Ok(compound));
        }
        assert_eq!(Compound::from_code(5), None);
    }

    #[test]
    fn test_unlisted_values_are_rejected() {
        for value in ["UNKNOWN", "TEST_UNKNOWN", "soft", "", "HYPERSOFT"] {
            assert_eq!(
                value.parse::<Compound>(),
                Err(UnknownCompoundError {
                    value: value.to_owned()
                })
            );
        }
    }
}
