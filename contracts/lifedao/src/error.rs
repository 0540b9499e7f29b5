use cosmwasm_std::{OverflowError, StdError, Uint128};
use cw20_base::ContractError as Cw20ContractError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("{0}")]
    Cw20(#[from] Cw20ContractError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid zero amount")]
    InvalidZeroAmount {},

    #[error("Lock duration must be at least one day")]
    InvalidLockDuration {},

    #[error("Lock duration is higher than {max_days} days")]
    LockTooLong { max_days: u64 },

    #[error("Insufficient balance: {balance} < {required}")]
    InsufficientBalance { balance: Uint128, required: Uint128 },

    #[error("no locked")]
    NoLockedTranches {},

    #[error("non-releasable")]
    NothingMatured {},
}
