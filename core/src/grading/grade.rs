use serde::Serialize;

use super::compare::Similarity;

/// Terminal classification of one submission.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GradeReason {
    Excellent,
    Similar,
    Wrong,
    Timeout,
    CompilationError,
    #[strum(serialize = "NO_C_FILE")]
    #[serde(rename = "NO_C_FILE")]
    NoCFile,
}

impl GradeReason {
    pub fn score(self) -> u32 {
        use GradeReason::*;
        match self {
            Excellent => 100,
            Similar => 75,
            Wrong => 50,
            Timeout => 20,
            CompilationError => 10,
            NoCFile => 0,
        }
    }
}

impl From<Similarity> for GradeReason {
    fn from(value: Similarity) -> Self {
        match value {
            Similarity::Equal => Self::Excellent,
            Similarity::Similar => Self::Similar,
            Similarity::Different => Self::Wrong,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grade {
    pub submission: String,
    pub score: u32,
    pub reason: GradeReason,
}

impl Grade {
    pub fn new(submission: impl Into<String>, reason: GradeReason) -> Self {
        Self {
            submission: submission.into(),
            score: reason.score(),
            reason,
        }
    }

    /// `name,score,reason` followed by a newline.
    pub fn to_csv_line(&self) -> String {
        format!("{},{},{}\n", self.submission, self.score, self.reason)
    }
}
