use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Custom error type for parsing term codes
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ParseTermCodeError {
    InvalidLength(usize),
    InvalidDigit,
}

impl Display for ParseTermCodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidLength(len) => write!(f, "Term code must be 5 digits, got {len}"),
            Self::InvalidDigit => write!(f, "Term code must be numeric"),
        }
    }
}

/// An academic term code, e.g. "20142" is the spring semester of 2015
///
/// Codes are five digits: the academic year followed by a semester digit.
/// The fixed width makes lexicographic order equal to chronological order,
/// which `derive(Ord)` on the inner string relies on; the greatest code is
/// the most recent offering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermCode(String);

impl TermCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The academic year the code starts in
    pub fn year(&self) -> u16 {
        self.0[..4].parse().unwrap_or(0)
    }

    /// Semester digit within the academic year (1 fall, 2 spring, 3 summer)
    pub fn semester(&self) -> u8 {
        self.0[4..].parse().unwrap_or(0)
    }
}

impl FromStr for TermCode {
    type Err = ParseTermCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 5 {
            return Err(ParseTermCodeError::InvalidLength(s.len()));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseTermCodeError::InvalidDigit);
        }
        Ok(Self(s.to_string()))
    }
}

impl Display for TermCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_term_code() {
        let code = TermCode::from_str("20142").unwrap();
        assert_eq!(code.as_str(), "20142");
        assert_eq!(code.year(), 2014);
        assert_eq!(code.semester(), 2);
        assert_eq!(code.to_string(), "20142");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            TermCode::from_str("2014"),
            Err(ParseTermCodeError::InvalidLength(4))
        );
        assert_eq!(
            TermCode::from_str("2014x"),
            Err(ParseTermCodeError::InvalidDigit)
        );
        assert!(TermCode::from_str("").is_err());
    }

    #[test]
    fn test_ordering_is_chronological() {
        let fall = TermCode::from_str("20141").unwrap();
        let spring = TermCode::from_str("20142").unwrap();
        let next_fall = TermCode::from_str("20151").unwrap();

        assert!(fall < spring);
        assert!(spring < next_fall);

        let mut codes = vec![next_fall.clone(), fall.clone(), spring.clone()];
        codes.sort();
        assert_eq!(codes, vec![fall, spring, next_fall]);
    }
}
