use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("nullifier {0} is already bound to another address")]
    DuplicateIdentity(String),

    #[error("address {0} is already verified")]
    AlreadyVerified(String),

    #[error("caller {0} is not authorized to award points")]
    Unauthorized(String),

    #[error("points authority is already bound")]
    AuthorityAlreadyBound,

    #[error("identity hub rejected the proof: {0}")]
    ProofRejected(String),

    #[error("scope seed is {len} bytes, maximum is {max}")]
    ScopeTooLong { len: usize, max: usize },
}
