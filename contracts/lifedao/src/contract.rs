use cosmwasm_std::{
    entry_point, to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult, Uint128,
};

use crate::error::ContractError;
use crate::ledger::{credit, debit};
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, LockDetail, LockedBalanceResponse,
    LockedDetailsResponse, QueryMsg, ReleasableBalanceResponse,
};
use crate::state::{
    add_tranche, list_tranches, locked_balance, releasable_balance, release_matured, Config,
    CONFIG, DEFAULT_UNLOCK_LIMIT, MAX_UNLOCK_LIMIT, ONE_DAY,
};

use cw2::set_contract_version;
use cw20_base::allowances::{
    execute_burn_from, execute_decrease_allowance, execute_increase_allowance, execute_send_from,
    execute_transfer_from, query_allowance,
};
use cw20_base::contract::{
    execute_burn, execute_send, execute_transfer, query_balance, query_token_info,
};
use cw20_base::enumerable::{query_all_accounts, query_owner_allowances};
use cw20_base::state::{TokenInfo, TOKEN_INFO};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:cw-dagen-lifedao";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MAX_LOCK_DAYS: u64 = 10 * 365;
/// Upper bound for max_lock_days, keeps release times far from Timestamp overflow
pub const MAX_LOCK_DAYS: u64 = 100 * 365;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let max_lock_days = msg.max_lock_days.unwrap_or(DEFAULT_MAX_LOCK_DAYS);
    check_max_lock_days(max_lock_days)?;

    // store token info
    let data = TokenInfo {
        name: msg.name,
        symbol: msg.symbol,
        decimals: msg.decimals,
        total_supply: msg.init_supply,
        mint: None,
    };
    TOKEN_INFO.save(deps.storage, &data)?;

    // admin gets the whole supply
    if !msg.init_supply.is_zero() {
        credit(deps.storage, &info.sender, msg.init_supply)?;
    }

    let config = Config {
        owner: info.sender.clone(),
        init_supply: msg.init_supply,
        max_lock_days,
    };
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("init_supply", msg.init_supply);
    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::TransferAndLock {
            recipient,
            amount,
            duration_days,
        } => try_transfer_and_lock(deps, env, info, recipient, amount, duration_days),
        ExecuteMsg::Unlock { address, limit } => try_unlock(deps, env, address, limit),
        ExecuteMsg::UpdateConfig { max_lock_days } => {
            try_update_config(deps, info, max_lock_days)
        }

        // cw20 standard
        ExecuteMsg::Transfer { recipient, amount } => {
            Ok(execute_transfer(deps, env, info, recipient, amount)?)
        }
        ExecuteMsg::Burn { amount } => Ok(execute_burn(deps, env, info, amount)?),
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => Ok(execute_send(deps, env, info, contract, amount, msg)?),
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_increase_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => Ok(execute_decrease_allowance(
            deps, env, info, spender, amount, expires,
        )?),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => Ok(execute_transfer_from(
            deps, env, info, owner, recipient, amount,
        )?),
        ExecuteMsg::BurnFrom { owner, amount } => {
            Ok(execute_burn_from(deps, env, info, owner, amount)?)
        }
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => Ok(execute_send_from(
            deps, env, info, owner, contract, amount, msg,
        )?),
    }
}

pub fn try_transfer_and_lock(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
    duration_days: u64,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    if duration_days == 0 {
        return Err(ContractError::InvalidLockDuration {});
    }

    let config = CONFIG.load(deps.storage)?;
    if duration_days > config.max_lock_days {
        return Err(ContractError::LockTooLong {
            max_days: config.max_lock_days,
        });
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let release_time = env.block.time.plus_seconds(duration_days * ONE_DAY);

    debit(deps.storage, &info.sender, amount)?;
    add_tranche(deps.storage, &recipient, amount, release_time)?;

    let res = Response::new()
        .add_attribute("action", "transfer_and_lock")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient)
        .add_attribute("amount", amount)
        .add_attribute("release_time", release_time.seconds().to_string());
    Ok(res)
}

pub fn try_unlock(
    deps: DepsMut,
    env: Env,
    address: String,
    limit: Option<u32>,
) -> Result<Response, ContractError> {
    let holder = deps.api.addr_validate(&address)?;
    let limit = limit.unwrap_or(DEFAULT_UNLOCK_LIMIT).min(MAX_UNLOCK_LIMIT);

    let released = release_matured(deps.storage, &holder, env.block.time, limit)?;
    if released.amount.is_zero() {
        return Err(ContractError::NothingMatured {});
    }
    credit(deps.storage, &holder, released.amount)?;

    let res = Response::new()
        .add_attribute("action", "unlock")
        .add_attribute("address", holder)
        .add_attribute("released", released.amount)
        .add_attribute("tranches", released.tranches.to_string());
    Ok(res)
}

pub fn try_update_config(
    deps: DepsMut,
    info: MessageInfo,
    max_lock_days: u64,
) -> Result<Response, ContractError> {
    check_max_lock_days(max_lock_days)?;

    CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
        if info.sender != config.owner {
            return Err(ContractError::Unauthorized {});
        }
        config.max_lock_days = max_lock_days;
        Ok(config)
    })?;

    let res = Response::new()
        .add_attribute("action", "update_config")
        .add_attribute("max_lock_days", max_lock_days.to_string());
    Ok(res)
}

fn check_max_lock_days(max_lock_days: u64) -> Result<(), ContractError> {
    if max_lock_days > MAX_LOCK_DAYS {
        return Err(ContractError::LockTooLong {
            max_days: MAX_LOCK_DAYS,
        });
    }
    Ok(())
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LockedBalance { address } => to_binary(&query_locked_balance(deps, address)?),
        QueryMsg::LockedDetails {
            address,
            start_after,
            limit,
        } => to_binary(&query_locked_details(deps, address, start_after, limit)?),
        QueryMsg::ReleasableBalance { address } => {
            to_binary(&query_releasable_balance(deps, env, address)?)
        }
        QueryMsg::Config {} => to_binary(&query_config(deps)?),

        // cw20 standard
        QueryMsg::Balance { address } => to_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_binary(&query_token_info(deps)?),
        QueryMsg::Allowance { owner, spender } => {
            to_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::AllAllowances {
            owner,
            start_after,
            limit,
        } => to_binary(&query_owner_allowances(deps, owner, start_after, limit)?),
        QueryMsg::AllAccounts { start_after, limit } => {
            to_binary(&query_all_accounts(deps, start_after, limit)?)
        }
    }
}

fn query_locked_balance(deps: Deps, address: String) -> StdResult<LockedBalanceResponse> {
    let holder = deps.api.addr_validate(&address)?;
    let locked = locked_balance(deps.storage, &holder)?;

    Ok(LockedBalanceResponse { locked })
}

fn query_locked_details(
    deps: Deps,
    address: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<LockedDetailsResponse> {
    let holder = deps.api.addr_validate(&address)?;
    let locks = list_tranches(deps.storage, &holder, start_after, limit)?
        .into_iter()
        .map(|(id, tranche)| LockDetail {
            id,
            amount: tranche.amount,
            release_time: tranche.release_time,
        })
        .collect();

    Ok(LockedDetailsResponse { locks })
}

fn query_releasable_balance(
    deps: Deps,
    env: Env,
    address: String,
) -> StdResult<ReleasableBalanceResponse> {
    let holder = deps.api.addr_validate(&address)?;
    let releasable = releasable_balance(deps.storage, &holder, env.block.time).map_err(to_std)?;

    Ok(ReleasableBalanceResponse { releasable })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        init_supply: config.init_supply,
        max_lock_days: config.max_lock_days,
    })
}

fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        ContractError::Overflow(err) => err.into(),
        err => StdError::generic_err(err.to_string()),
    }
}
