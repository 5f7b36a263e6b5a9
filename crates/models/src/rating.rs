use serde::Serialize;
use std::{
    cmp::Ordering,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Custom error type for review scores outside their fixed domain
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum ScoreError {
    OutOfRange { field: &'static str, value: i32 },
}

impl Display for ScoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::OutOfRange { field, value } => {
                write!(f, "Score '{field}' out of range: {value}")
            }
        }
    }
}

/// The five scores carried by one review
///
/// Difficulty, homework, grading and gain are three-point scales (1-3);
/// the overall rate is a five-point scale (1-5). Construction validates the
/// domains so a tally can never absorb an out-of-range contribution.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ReviewScores {
    difficulty: i32,
    homework: i32,
    grading: i32,
    gain: i32,
    rate: i32,
}

fn check(field: &'static str, value: i32, max: i32) -> Result<i32, ScoreError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ScoreError::OutOfRange { field, value })
    }
}

impl ReviewScores {
    pub fn new(
        difficulty: i32,
        homework: i32,
        grading: i32,
        gain: i32,
        rate: i32,
    ) -> Result<Self, ScoreError> {
        Ok(Self {
            difficulty: check("difficulty", difficulty, 3)?,
            homework: check("homework", homework, 3)?,
            grading: check("grading", grading, 3)?,
            gain: check("gain", gain, 3)?,
            rate: check("rate", rate, 5)?,
        })
    }

    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }

    pub fn homework(&self) -> i32 {
        self.homework
    }

    pub fn grading(&self) -> i32 {
        self.grading
    }

    pub fn gain(&self) -> i32 {
        self.gain
    }

    pub fn rate(&self) -> i32 {
        self.rate
    }
}

/// Round `sum / count` to the nearest integer, ties to even
///
/// Done in exact integer arithmetic; the tie behavior changes which bucket a
/// mean of exactly n.5 lands in, so it cannot be left to float rounding.
fn round_half_even(sum: i64, count: i64) -> i64 {
    let quotient = sum.div_euclid(count);
    let remainder = sum.rem_euclid(count);

    match (2 * remainder).cmp(&count) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => {
            if quotient % 2 == 0 {
                quotient
            } else {
                quotient + 1
            }
        }
    }
}

/// Mean difficulty bucket
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn from_rank(rank: i64) -> Self {
        match rank {
            1 => Self::Easy,
            2 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

/// Mean homework-load bucket
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Homework {
    Light,
    Moderate,
    Heavy,
}

impl Homework {
    fn from_rank(rank: i64) -> Self {
        match rank {
            1 => Self::Light,
            2 => Self::Moderate,
            _ => Self::Heavy,
        }
    }
}

impl Display for Homework {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Light => write!(f, "light"),
            Self::Moderate => write!(f, "moderate"),
            Self::Heavy => write!(f, "heavy"),
        }
    }
}

/// Mean grading-strictness bucket
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Grading {
    Lenient,
    Fair,
    Harsh,
}

impl Grading {
    fn from_rank(rank: i64) -> Self {
        match rank {
            1 => Self::Lenient,
            2 => Self::Fair,
            _ => Self::Harsh,
        }
    }
}

impl Display for Grading {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Fair => write!(f, "fair"),
            Self::Harsh => write!(f, "harsh"),
        }
    }
}

/// Mean gain bucket (1 is the best score, so High comes first)
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Gain {
    High,
    Moderate,
    Low,
}

impl Gain {
    fn from_rank(rank: i64) -> Self {
        match rank {
            1 => Self::High,
            2 => Self::Moderate,
            _ => Self::Low,
        }
    }
}

impl Display for Gain {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::High => write!(f, "high"),
            Self::Moderate => write!(f, "moderate"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Mean overall rate with exactly one decimal place
///
/// Stored as tenths so display and equality never go through a binary float.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AverageRate(i64);

impl AverageRate {
    pub fn tenths(self) -> i64 {
        self.0
    }
}

impl Display for AverageRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Running rating statistics for one course
///
/// Five running sums plus the number of reviews that contributed to them.
/// `add` and `subtract` are exact inverses; an edited review is reverted and
/// re-applied, never patched differentially, so the sums cannot drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    pub difficulty_total: i64,
    pub homework_total: i64,
    pub grading_total: i64,
    pub gain_total: i64,
    pub rate_total: i64,
    pub review_count: i64,
}

impl RatingTally {
    /// Fold one review into the running sums
    pub fn add(&mut self, scores: &ReviewScores) {
        self.review_count += 1;
        self.difficulty_total += i64::from(scores.difficulty());
        self.homework_total += i64::from(scores.homework());
        self.grading_total += i64::from(scores.grading());
        self.gain_total += i64::from(scores.gain());
        self.rate_total += i64::from(scores.rate());
    }

    /// Remove one previously added review from the running sums
    pub fn subtract(&mut self, scores: &ReviewScores) {
        self.review_count -= 1;
        self.difficulty_total -= i64::from(scores.difficulty());
        self.homework_total -= i64::from(scores.homework());
        self.grading_total -= i64::from(scores.grading());
        self.gain_total -= i64::from(scores.gain());
        self.rate_total -= i64::from(scores.rate());
    }

    fn mean_rank(&self, total: i64) -> Option<i64> {
        if self.review_count == 0 {
            None
        } else {
            Some(round_half_even(total, self.review_count))
        }
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.mean_rank(self.difficulty_total).map(Difficulty::from_rank)
    }

    pub fn homework(&self) -> Option<Homework> {
        self.mean_rank(self.homework_total).map(Homework::from_rank)
    }

    pub fn grading(&self) -> Option<Grading> {
        self.mean_rank(self.grading_total).map(Grading::from_rank)
    }

    pub fn gain(&self) -> Option<Gain> {
        self.mean_rank(self.gain_total).map(Gain::from_rank)
    }

    pub fn average_rate(&self) -> Option<AverageRate> {
        if self.review_count == 0 {
            None
        } else {
            Some(AverageRate(round_half_even(
                self.rate_total * 10,
                self.review_count,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(difficulty: i32, homework: i32, grading: i32, gain: i32, rate: i32) -> ReviewScores {
        ReviewScores::new(difficulty, homework, grading, gain, rate).unwrap()
    }

    #[test]
    fn test_score_validation() {
        assert!(ReviewScores::new(1, 2, 3, 1, 5).is_ok());
        assert_eq!(
            ReviewScores::new(0, 2, 3, 1, 5),
            Err(ScoreError::OutOfRange {
                field: "difficulty",
                value: 0
            })
        );
        assert!(ReviewScores::new(1, 4, 3, 1, 5).is_err());
        assert!(ReviewScores::new(1, 2, 3, 1, 6).is_err());
        // rate uses the wider five-point scale
        assert!(ReviewScores::new(1, 2, 3, 1, 4).is_ok());
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(6, 3), 2);
        assert_eq!(round_half_even(7, 3), 2);
        assert_eq!(round_half_even(8, 3), 3);
        // ties go to the even neighbor
        assert_eq!(round_half_even(3, 2), 2); // 1.5 -> 2
        assert_eq!(round_half_even(5, 2), 2); // 2.5 -> 2
        assert_eq!(round_half_even(7, 2), 4); // 3.5 -> 4
    }

    #[test]
    fn test_empty_tally_has_no_statistics() {
        let tally = RatingTally::default();
        assert_eq!(tally.difficulty(), None);
        assert_eq!(tally.homework(), None);
        assert_eq!(tally.grading(), None);
        assert_eq!(tally.gain(), None);
        assert_eq!(tally.average_rate(), None);
    }

    #[test]
    fn test_add_subtract_ledger() {
        let mut tally = RatingTally::default();
        let first = scores(1, 1, 2, 3, 5);
        let second = scores(3, 2, 2, 1, 1);

        tally.add(&first);
        tally.add(&second);
        assert_eq!(tally.review_count, 2);
        assert_eq!(tally.difficulty_total, 4);
        assert_eq!(tally.rate_total, 6);

        tally.subtract(&first);
        assert_eq!(tally.review_count, 1);
        assert_eq!(tally.difficulty_total, 3);
        assert_eq!(tally.rate_total, 1);

        tally.subtract(&second);
        assert_eq!(tally, RatingTally::default());
    }

    #[test]
    fn test_bucket_mapping() {
        let mut tally = RatingTally::default();
        tally.add(&scores(1, 3, 2, 2, 3));
        assert_eq!(tally.difficulty(), Some(Difficulty::Easy));
        assert_eq!(tally.homework(), Some(Homework::Heavy));
        assert_eq!(tally.grading(), Some(Grading::Fair));
        assert_eq!(tally.gain(), Some(Gain::Moderate));

        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!(Homework::Light.to_string(), "light");
        assert_eq!(Grading::Lenient.to_string(), "lenient");
        assert_eq!(Gain::Low.to_string(), "low");
    }

    #[test]
    fn test_bucket_boundary_rounds_half_to_even() {
        // difficulty sum 3 over 2 reviews is exactly 1.5 -> medium, not easy
        let mut tally = RatingTally::default();
        tally.add(&scores(1, 1, 1, 1, 1));
        tally.add(&scores(2, 1, 1, 1, 1));
        assert_eq!(tally.difficulty(), Some(Difficulty::Medium));

        // sum 5 over 2 reviews is exactly 2.5 -> medium again, not hard
        let mut tally = RatingTally::default();
        tally.add(&scores(2, 1, 1, 1, 1));
        tally.add(&scores(3, 1, 1, 1, 1));
        assert_eq!(tally.difficulty(), Some(Difficulty::Medium));
    }

    #[test]
    fn test_average_rate_fixed_point() {
        let mut tally = RatingTally::default();
        tally.add(&scores(1, 1, 1, 1, 4));
        tally.add(&scores(1, 1, 1, 1, 3));
        let average = tally.average_rate().unwrap();
        assert_eq!(average.tenths(), 35);
        assert_eq!(average.to_string(), "3.5");

        tally.add(&scores(1, 1, 1, 1, 3));
        // 10/3 = 3.333... -> 3.3
        assert_eq!(tally.average_rate().unwrap().to_string(), "3.3");
    }

    #[test]
    fn test_review_removal_scenario() {
        let mut tally = RatingTally::default();
        tally.add(&scores(1, 2, 2, 2, 3));
        tally.add(&scores(2, 2, 2, 2, 3));
        tally.add(&scores(3, 2, 2, 2, 3));
        assert_eq!(tally.review_count, 3);
        assert_eq!(tally.difficulty(), Some(Difficulty::Medium));

        tally.subtract(&scores(3, 2, 2, 2, 3));
        assert_eq!(tally.review_count, 2);
        assert_eq!(tally.difficulty_total, 3);
        // 3/2 = 1.5 still rounds to the medium bucket
        assert_eq!(tally.difficulty(), Some(Difficulty::Medium));
    }
}
