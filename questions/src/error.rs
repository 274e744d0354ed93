use thiserror::Error;
use womansplain_identity::IdentityError;

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("question {0} does not exist")]
    QuestionNotFound(u64),

    #[error("question {0} is already answered")]
    AlreadyAnswered(u64),

    #[error("address {0} is not a verified woman")]
    NotVerified(String),

    #[error("content must not be empty")]
    EmptyContent,

    #[error("content is {len} bytes, maximum is {max}")]
    ContentTooLong { len: usize, max: usize },

    #[error("screenshot reference is {len} bytes, maximum is {max}")]
    ScreenshotTooLong { len: usize, max: usize },

    #[error("red-flag score {0} is outside [0, 100]")]
    ScoreOutOfRange(u64),

    #[error("address {voter} has already voted on question {question_id}")]
    DuplicateVote { question_id: u64, voter: String },

    #[error(transparent)]
    Identity(#[from] IdentityError),
}
