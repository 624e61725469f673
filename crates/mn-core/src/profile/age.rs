use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgeError {
    #[error("Please enter a valid age")]
    Invalid,
}

/// Age in whole years. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Age(u8);

impl Age {
    pub fn new(years: u8) -> Result<Self, AgeError> {
        if years == 0 {
            return Err(AgeError::Invalid);
        }
        Ok(Self(years))
    }

    /// Parse free-text input from the age screen.
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let years: u8 = input.trim().parse().map_err(|_| AgeError::Invalid)?;
        Self::new(years)
    }

    pub fn years(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u16> for Age {
    type Error = AgeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let years = u8::try_from(value).map_err(|_| AgeError::Invalid)?;
        Self::new(years)
    }
}

impl From<Age> for u16 {
    fn from(age: Age) -> Self {
        age.0 as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_positive_numbers() {
        assert_eq!(Age::parse(" 29 ").unwrap().years(), 29);
    }

    #[test]
    fn parse_rejects_zero_negative_and_text() {
        assert_eq!(Age::parse("0"), Err(AgeError::Invalid));
        assert_eq!(Age::parse("-4"), Err(AgeError::Invalid));
        assert_eq!(Age::parse("abc"), Err(AgeError::Invalid));
        assert_eq!(Age::parse(""), Err(AgeError::Invalid));
        assert_eq!(Age::parse("300"), Err(AgeError::Invalid));
    }

    #[test]
    fn deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Age>("0").is_err());
        assert_eq!(serde_json::from_str::<Age>("42").unwrap().years(), 42);
    }
}
