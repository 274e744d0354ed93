use thiserror::Error;
use womansplain_identity::IdentityError;
use womansplain_types::AddressParseError;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error(transparent)]
    Address(#[from] AddressParseError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}
