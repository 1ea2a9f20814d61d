//! A scored movie on its way through the filter pipeline.

/// One movie column with its aggregate score
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Column index in the rating matrix
    pub column: usize,
    pub title: String,
    pub score: f32,
}

impl Candidate {
    pub fn new(column: usize, title: impl Into<String>, score: f32) -> Self {
        Self {
            column,
            title: title.into(),
            score,
        }
    }
}
