use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Contest not found")]
    ContestNotFound {},

    #[error("Contest already inactive")]
    AlreadyInactive {},

    #[error("Contest is not active")]
    ContestInactive {},

    #[error("Deposit amount must be greater than zero")]
    InvalidAmount {},

    #[error("Participant has already finished")]
    AlreadyFinished {},

    #[error("No deposit to accrue interest on")]
    NoDeposit {},

    #[error("Voting period has closed")]
    VotingClosed {},

    #[error("Caller is not a participant in this contest")]
    NotAParticipant {},

    #[error("Caller has already voted in this contest")]
    AlreadyVoted {},

    #[error("Nominee is not a participant in this contest")]
    NomineeNotParticipant {},

    #[error("Voting period is still open")]
    VotingStillOpen {},

    #[error("Contest is still active")]
    ContestStillActive {},
}

impl From<ContractError> for StdError {
    fn from(err: ContractError) -> Self {
        StdError::generic_err(err.to_string())
    }
}
