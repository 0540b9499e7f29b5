//! Spendable balances. These are the cw20 balances, so plain transfers and
//! time-locked transfers move the same funds.

use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw20_base::state::BALANCES;

use crate::error::ContractError;

pub fn balance_of(store: &dyn Storage, account: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(store, account)?.unwrap_or_default())
}

pub fn credit(
    store: &mut dyn Storage,
    account: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    BALANCES.update(store, account, |balance| -> Result<_, ContractError> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })
}

/// Fails without writing anything when `account` holds less than `amount`.
pub fn debit(
    store: &mut dyn Storage,
    account: &Addr,
    amount: Uint128,
) -> Result<Uint128, ContractError> {
    BALANCES.update(store, account, |balance| -> Result<_, ContractError> {
        let balance = balance.unwrap_or_default();
        if balance < amount {
            return Err(ContractError::InsufficientBalance {
                balance,
                required: amount,
            });
        }
        Ok(balance - amount)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn debit_never_goes_negative() {
        let mut store = MockStorage::new();
        let admin = Addr::unchecked("admin");

        assert_eq!(Uint128::zero(), balance_of(&store, &admin).unwrap());
        credit(&mut store, &admin, Uint128::new(10)).unwrap();

        let res = debit(&mut store, &admin, Uint128::new(11));
        match res {
            Err(ContractError::InsufficientBalance { balance, required }) => {
                assert_eq!(Uint128::new(10), balance);
                assert_eq!(Uint128::new(11), required);
            }
            _ => panic!("Must return InsufficientBalance error"),
        }
        assert_eq!(Uint128::new(10), balance_of(&store, &admin).unwrap());

        let left = debit(&mut store, &admin, Uint128::new(10)).unwrap();
        assert_eq!(Uint128::zero(), left);
    }
}
