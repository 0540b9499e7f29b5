use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ContractError;
use cosmwasm_std::{Addr, Order, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::{Bound, Item, Map};

pub const ONE_DAY: u64 = 24 * 60 * 60;

// settings for pagination
pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 30;
// tranches released by one unlock
pub const DEFAULT_UNLOCK_LIMIT: u32 = 30;
pub const MAX_UNLOCK_LIMIT: u32 = 100;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    /// Supply minted at instantiation, unaffected by later burns
    pub init_supply: Uint128,
    /// Longest lock accepted by transfer_and_lock, in days
    pub max_lock_days: u64,
}

/// One locked deposit. Released whole once `release_time` is reached.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct LockTranche {
    pub amount: Uint128,
    pub release_time: Timestamp,
}

/// Outcome of one release pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Released {
    pub amount: Uint128,
    pub tranches: u32,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TRANCHE_SEQ: Item<u64> = Item::new("tranche_seq");
// ids only grow, so ascending keys under one holder follow creation order
pub const TRANCHES: Map<(&Addr, u64), LockTranche> = Map::new("tranches");
// (holder, release time in nanos, id) -> amount, walked up to "now" on release
pub const RELEASES: Map<(&Addr, u64, u64), Uint128> = Map::new("releases");
pub const LOCKED: Map<&Addr, Uint128> = Map::new("locked");

fn next_tranche_id(store: &mut dyn Storage) -> StdResult<u64> {
    let id = TRANCHE_SEQ.may_load(store)?.unwrap_or_default() + 1;
    TRANCHE_SEQ.save(store, &id)?;
    Ok(id)
}

pub fn add_tranche(
    store: &mut dyn Storage,
    holder: &Addr,
    amount: Uint128,
    release_time: Timestamp,
) -> Result<u64, ContractError> {
    let id = next_tranche_id(store)?;
    let tranche = LockTranche {
        amount,
        release_time,
    };
    TRANCHES.save(store, (holder, id), &tranche)?;
    RELEASES.save(store, (holder, release_time.nanos(), id), &amount)?;
    LOCKED.update(store, holder, |locked| -> Result<_, ContractError> {
        Ok(locked.unwrap_or_default().checked_add(amount)?)
    })?;
    Ok(id)
}

/// Tranches of `holder` in creation order, paginated by tranche id.
pub fn list_tranches(
    store: &dyn Storage,
    holder: &Addr,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<(u64, LockTranche)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    TRANCHES
        .prefix(holder)
        .range(store, start, None, Order::Ascending)
        .take(limit)
        .collect()
}

pub fn locked_balance(store: &dyn Storage, holder: &Addr) -> StdResult<Uint128> {
    Ok(LOCKED.may_load(store, holder)?.unwrap_or_default())
}

pub fn releasable_balance(
    store: &dyn Storage,
    holder: &Addr,
    now: Timestamp,
) -> Result<Uint128, ContractError> {
    let mut total = Uint128::zero();
    for item in matured(store, holder, now) {
        let (_, amount) = item?;
        total = total.checked_add(amount)?;
    }
    Ok(total)
}

/// Removes up to `limit` tranches of `holder` matured at `now`, earliest release first.
/// Only matured entries are read. Nothing is removed when no tranche has matured yet.
pub fn release_matured(
    store: &mut dyn Storage,
    holder: &Addr,
    now: Timestamp,
    limit: u32,
) -> Result<Released, ContractError> {
    let locked = locked_balance(store, holder)?;
    if locked.is_zero() {
        return Err(ContractError::NoLockedTranches {});
    }

    let batch: Vec<_> = matured(store, holder, now)
        .take(limit as usize)
        .collect::<StdResult<_>>()?;

    let mut released = Released::default();
    for (_, amount) in batch.iter() {
        released.amount = released.amount.checked_add(*amount)?;
        released.tranches += 1;
    }
    if released.tranches == 0 {
        return Ok(released);
    }

    for ((release_nanos, id), _) in batch {
        RELEASES.remove(store, (holder, release_nanos, id));
        TRANCHES.remove(store, (holder, id));
    }
    let left = locked.checked_sub(released.amount)?;
    if left.is_zero() {
        LOCKED.remove(store, holder);
    } else {
        LOCKED.save(store, holder, &left)?;
    }
    Ok(released)
}

fn matured<'a>(
    store: &'a dyn Storage,
    holder: &Addr,
    now: Timestamp,
) -> Box<dyn Iterator<Item = StdResult<((u64, u64), Uint128)>> + 'a> {
    let end = Bound::inclusive((now.nanos(), u64::MAX));
    RELEASES
        .sub_prefix(holder)
        .range(store, None, Some(end), Order::Ascending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    fn all_tranches(store: &dyn Storage, holder: &Addr) -> Vec<(u64, LockTranche)> {
        list_tranches(store, holder, None, Some(MAX_LIMIT)).unwrap()
    }

    #[test]
    fn tranches_keep_creation_order() {
        let mut store = MockStorage::new();
        let holder = Addr::unchecked("chris");

        add_tranche(
            &mut store,
            &holder,
            Uint128::new(2_000_000),
            Timestamp::from_seconds(500),
        )
        .unwrap();
        add_tranche(
            &mut store,
            &holder,
            Uint128::new(1_000_000),
            Timestamp::from_seconds(100),
        )
        .unwrap();

        let tranches = all_tranches(&store, &holder);
        assert_eq!(2, tranches.len());
        assert_eq!(Uint128::new(2_000_000), tranches[0].1.amount);
        assert_eq!(Uint128::new(1_000_000), tranches[1].1.amount);
        assert!(tranches[0].0 < tranches[1].0);

        // next page starts after the first id
        let page = list_tranches(&store, &holder, Some(tranches[0].0), Some(1)).unwrap();
        assert_eq!(vec![tranches[1].clone()], page);

        // other holders see nothing
        let other = Addr::unchecked("other");
        assert!(all_tranches(&store, &other).is_empty());
        assert_eq!(Uint128::zero(), locked_balance(&store, &other).unwrap());
    }

    #[test]
    fn release_only_matured() {
        let mut store = MockStorage::new();
        let holder = Addr::unchecked("chris");

        let res = release_matured(&mut store, &holder, Timestamp::from_seconds(0), 10);
        match res {
            Err(ContractError::NoLockedTranches {}) => {}
            _ => panic!("Must return NoLockedTranches error"),
        }

        add_tranche(&mut store, &holder, Uint128::new(7), Timestamp::from_seconds(300)).unwrap();
        add_tranche(&mut store, &holder, Uint128::new(5), Timestamp::from_seconds(100)).unwrap();

        // nothing matured, nothing removed
        let released =
            release_matured(&mut store, &holder, Timestamp::from_seconds(99), 10).unwrap();
        assert_eq!(Released::default(), released);
        assert_eq!(Uint128::new(12), locked_balance(&store, &holder).unwrap());

        // release time itself is inclusive
        assert_eq!(
            Uint128::new(5),
            releasable_balance(&store, &holder, Timestamp::from_seconds(100)).unwrap()
        );
        let released =
            release_matured(&mut store, &holder, Timestamp::from_seconds(100), 10).unwrap();
        assert_eq!(Uint128::new(5), released.amount);
        assert_eq!(1, released.tranches);

        let left = all_tranches(&store, &holder);
        assert_eq!(1, left.len());
        assert_eq!(Uint128::new(7), left[0].1.amount);
        assert_eq!(Uint128::new(7), locked_balance(&store, &holder).unwrap());

        let released =
            release_matured(&mut store, &holder, Timestamp::from_seconds(1000), 10).unwrap();
        assert_eq!(Uint128::new(7), released.amount);
        assert!(all_tranches(&store, &holder).is_empty());
        assert_eq!(Uint128::zero(), locked_balance(&store, &holder).unwrap());
    }

    #[test]
    fn release_reads_only_matured_tranches() {
        let mut store = MockStorage::new();
        let holder = Addr::unchecked("chris");

        for _ in 0..500 {
            add_tranche(
                &mut store,
                &holder,
                Uint128::new(1),
                Timestamp::from_seconds(u32::MAX as u64),
            )
            .unwrap();
        }
        for _ in 0..3 {
            add_tranche(&mut store, &holder, Uint128::new(10), Timestamp::from_seconds(50))
                .unwrap();
        }

        // the matured range ends before the far future entries
        let now = Timestamp::from_seconds(60);
        assert_eq!(3, matured(&store, &holder, now).count());

        // bounded batches, earliest release first
        let released = release_matured(&mut store, &holder, now, 2).unwrap();
        assert_eq!(Uint128::new(20), released.amount);
        assert_eq!(2, released.tranches);
        let released = release_matured(&mut store, &holder, now, 2).unwrap();
        assert_eq!(Uint128::new(10), released.amount);
        assert_eq!(1, released.tranches);
        let released = release_matured(&mut store, &holder, now, 2).unwrap();
        assert_eq!(0, released.tranches);

        assert_eq!(Uint128::new(500), locked_balance(&store, &holder).unwrap());
    }
}
