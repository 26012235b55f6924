#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_binary, Addr, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo, Response,
    StdResult, Storage, Timestamp, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw20::Cw20ExecuteMsg;

use crate::error::ContractError;
use crate::msg::{ContestResponse, ExecuteMsg, InstantiateMsg, QueryMsg, WinnerResponse};
use crate::state::{
    Config, Contest, Participant, CONFIG, CONTESTS, CONTEST_COUNT, PARTICIPANTS, ROSTER,
};

const CONTRACT_NAME: &str = "crates.io:contest-ledger";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const DEFAULT_INTEREST_RATE: u64 = 5;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    let owner = msg.owner.unwrap_or(info.sender.to_string());
    let config = Config {
        owner: deps.api.addr_validate(&owner)?,
        deposit_denom: msg.deposit_denom,
        reward_token: deps.api.addr_validate(&msg.reward_token)?,
        interest_rate: msg.interest_rate.unwrap_or(DEFAULT_INTEREST_RATE),
    };
    CONFIG.save(deps.storage, &config)?;
    CONTEST_COUNT.save(deps.storage, &0)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreateContest {
            title,
            description,
            goals,
            voting_duration,
        } => try_create_contest(deps, env, info, title, description, goals, voting_duration),
        ExecuteMsg::EndContest { contest_id } => try_end_contest(deps, info, contest_id),
        ExecuteMsg::Deposit { contest_id } => try_deposit(deps, env, info, contest_id),
        ExecuteMsg::ClaimInterest { contest_id } => try_claim_interest(deps, env, info, contest_id),
        ExecuteMsg::Vote {
            contest_id,
            nominee,
        } => try_vote(deps, env, info, contest_id, nominee),
    }
}

fn try_create_contest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    description: String,
    goals: String,
    voting_duration: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let contest_id = CONTEST_COUNT.load(deps.storage)? + 1;
    CONTEST_COUNT.save(deps.storage, &contest_id)?;

    let contest = Contest {
        title: title.clone(),
        description,
        goals,
        total_deposited: Uint128::zero(),
        total_interest_generated: Uint128::zero(),
        participants_count: 0,
        voting_deadline: env.block.time.plus_seconds(voting_duration),
        active: true,
    };
    CONTESTS.save(deps.storage, contest_id, &contest)?;

    Ok(Response::new()
        .add_attribute("action", "create_contest")
        .add_attribute("contest_id", contest_id.to_string())
        .add_event(
            Event::new("contest_created")
                .add_attribute("contest_id", contest_id.to_string())
                .add_attribute("title", title)
                .add_attribute("voting_deadline", contest.voting_deadline.seconds().to_string()),
        ))
}

fn try_end_contest(
    deps: DepsMut,
    info: MessageInfo,
    contest_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    let mut contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    if !contest.active {
        return Err(ContractError::AlreadyInactive {});
    }
    contest.active = false;
    CONTESTS.save(deps.storage, contest_id, &contest)?;

    let (winner, votes) = resolve_winner(deps.storage, contest_id)?;

    Ok(Response::new()
        .add_attribute("action", "end_contest")
        .add_attribute("contest_id", contest_id.to_string())
        .add_event(
            Event::new("winner_announced")
                .add_attribute("contest_id", contest_id.to_string())
                .add_attribute(
                    "winner",
                    winner.map_or_else(|| "none".to_string(), |w| w.to_string()),
                )
                .add_attribute("votes_received", votes.to_string()),
        ))
}

fn try_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    contest_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let amount = info
        .funds
        .iter()
        .find(|c| c.denom == config.deposit_denom)
        .map(|c| c.amount)
        .unwrap_or_default();
    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let mut contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    if !contest.active {
        return Err(ContractError::ContestInactive {});
    }

    let now = env.block.time;
    let mut messages: Vec<CosmosMsg> = Vec::new();
    let mut events: Vec<Event> = Vec::new();

    let participant = match PARTICIPANTS.may_load(deps.storage, (contest_id, &info.sender))? {
        Some(mut participant) => {
            if participant.has_finished {
                return Err(ContractError::AlreadyFinished {});
            }
            // Settle outstanding interest before the new principal exists,
            // so it cannot earn for time it was not deposited.
            let accrued = settle_interest(&config, &mut contest, &mut participant, now);
            if !accrued.is_zero() {
                messages.push(mint_reward(&config, &info.sender, accrued)?);
                events.push(interest_claimed_event(contest_id, &info.sender, accrued));
            }
            participant.deposit_amount += amount;
            participant.deposit_timestamp = now;
            participant
        }
        None => {
            let mut roster = ROSTER.may_load(deps.storage, contest_id)?.unwrap_or_default();
            roster.push(info.sender.clone());
            ROSTER.save(deps.storage, contest_id, &roster)?;
            contest.participants_count += 1;
            Participant {
                deposit_amount: amount,
                deposit_timestamp: now,
                last_interest_claim_time: now,
                votes_received: 0,
                has_voted: false,
                has_finished: false,
            }
        }
    };
    PARTICIPANTS.save(deps.storage, (contest_id, &info.sender), &participant)?;

    contest.total_deposited += amount;
    CONTESTS.save(deps.storage, contest_id, &contest)?;

    events.push(
        Event::new("participant_joined")
            .add_attribute("contest_id", contest_id.to_string())
            .add_attribute("participant", info.sender.to_string())
            .add_attribute("amount", amount),
    );

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "deposit")
        .add_attribute("contest_id", contest_id.to_string())
        .add_attribute("amount", amount)
        .add_events(events))
}

fn try_claim_interest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    contest_id: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    if !contest.active {
        return Err(ContractError::ContestInactive {});
    }

    let mut participant = PARTICIPANTS
        .may_load(deps.storage, (contest_id, &info.sender))?
        .ok_or(ContractError::NoDeposit {})?;
    if participant.deposit_amount.is_zero() {
        return Err(ContractError::NoDeposit {});
    }

    let accrued = settle_interest(&config, &mut contest, &mut participant, env.block.time);
    PARTICIPANTS.save(deps.storage, (contest_id, &info.sender), &participant)?;
    CONTESTS.save(deps.storage, contest_id, &contest)?;

    let mut response = Response::new()
        .add_attribute("action", "claim_interest")
        .add_attribute("contest_id", contest_id.to_string())
        .add_attribute("amount", accrued);
    if !accrued.is_zero() {
        response = response
            .add_message(mint_reward(&config, &info.sender, accrued)?)
            .add_event(interest_claimed_event(contest_id, &info.sender, accrued));
    }
    Ok(response)
}

fn try_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    contest_id: u64,
    nominee: String,
) -> Result<Response, ContractError> {
    let contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    if env.block.time > contest.voting_deadline {
        return Err(ContractError::VotingClosed {});
    }
    if !contest.active {
        return Err(ContractError::ContestInactive {});
    }

    let mut voter = PARTICIPANTS
        .may_load(deps.storage, (contest_id, &info.sender))?
        .ok_or(ContractError::NotAParticipant {})?;
    if voter.has_voted {
        return Err(ContractError::AlreadyVoted {});
    }

    let nominee_addr = deps.api.addr_validate(&nominee)?;
    if nominee_addr == info.sender {
        // Self-votes are legal; same record receives the flag and the vote.
        voter.has_voted = true;
        voter.votes_received += 1;
        PARTICIPANTS.save(deps.storage, (contest_id, &info.sender), &voter)?;
    } else {
        let mut nominee_rec = PARTICIPANTS
            .may_load(deps.storage, (contest_id, &nominee_addr))?
            .ok_or(ContractError::NomineeNotParticipant {})?;
        voter.has_voted = true;
        nominee_rec.votes_received += 1;
        PARTICIPANTS.save(deps.storage, (contest_id, &info.sender), &voter)?;
        PARTICIPANTS.save(deps.storage, (contest_id, &nominee_addr), &nominee_rec)?;
    }

    Ok(Response::new()
        .add_attribute("action", "vote")
        .add_attribute("contest_id", contest_id.to_string())
        .add_event(
            Event::new("voted")
                .add_attribute("contest_id", contest_id.to_string())
                .add_attribute("voter", info.sender.to_string())
                .add_attribute("nominee", nominee_addr.to_string()),
        ))
}

/// Accrue and reset the settlement clock. The claim time moves to `now`
/// even when nothing accrued, so zero-elapsed settlement is idempotent.
fn settle_interest(
    config: &Config,
    contest: &mut Contest,
    participant: &mut Participant,
    now: Timestamp,
) -> Uint128 {
    let accrued = accrued_interest(participant, config.interest_rate, now);
    participant.last_interest_claim_time = now;
    if !accrued.is_zero() {
        contest.total_interest_generated += accrued;
    }
    accrued
}

/// Simple interest with two truncating divisions: the annual amount is
/// truncated first, then prorated over elapsed seconds and truncated again.
fn accrued_interest(participant: &Participant, rate: u64, now: Timestamp) -> Uint128 {
    if participant.deposit_amount.is_zero() {
        return Uint128::zero();
    }
    let elapsed = now
        .seconds()
        .saturating_sub(participant.last_interest_claim_time.seconds());
    participant
        .deposit_amount
        .multiply_ratio(rate, 100u64)
        .multiply_ratio(elapsed, SECONDS_PER_YEAR)
}

fn mint_reward(config: &Config, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.reward_token.to_string(),
        msg: to_binary(&Cw20ExecuteMsg::Mint {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }))
}

fn interest_claimed_event(contest_id: u64, participant: &Addr, amount: Uint128) -> Event {
    Event::new("interest_claimed")
        .add_attribute("contest_id", contest_id.to_string())
        .add_attribute("participant", participant.to_string())
        .add_attribute("amount", amount)
}

/// Walk the roster in enrollment order and keep the strictly highest vote
/// count; on a tie the earliest-enrolled participant wins. Returns None
/// when nobody received a vote.
fn resolve_winner(storage: &dyn Storage, contest_id: u64) -> StdResult<(Option<Addr>, u64)> {
    let roster = ROSTER.may_load(storage, contest_id)?.unwrap_or_default();
    let mut winner: Option<Addr> = None;
    let mut best_votes = 0u64;
    for addr in roster {
        let participant = PARTICIPANTS.load(storage, (contest_id, &addr))?;
        if participant.votes_received > best_votes {
            best_votes = participant.votes_received;
            winner = Some(addr);
        }
    }
    Ok((winner, best_votes))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::GetConfig {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::GetContest { contest_id } => to_binary(&query_contest(deps, contest_id)?),
        QueryMsg::GetParticipant {
            contest_id,
            address,
        } => to_binary(&query_participant(deps, contest_id, address)?),
        QueryMsg::GetAccruedInterest {
            contest_id,
            address,
        } => to_binary(&query_accrued_interest(deps, env, contest_id, address)?),
        QueryMsg::GetWinner { contest_id } => to_binary(&query_winner(deps, env, contest_id)?),
    }
}

fn query_contest(deps: Deps, contest_id: u64) -> StdResult<ContestResponse> {
    let contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    Ok(ContestResponse {
        id: contest_id,
        title: contest.title,
        description: contest.description,
        goals: contest.goals,
        total_deposited: contest.total_deposited,
        total_interest_generated: contest.total_interest_generated,
        participants_count: contest.participants_count,
        voting_deadline: contest.voting_deadline,
        active: contest.active,
    })
}

fn query_participant(deps: Deps, contest_id: u64, address: String) -> StdResult<Participant> {
    let addr = deps.api.addr_validate(&address)?;
    PARTICIPANTS
        .may_load(deps.storage, (contest_id, &addr))?
        .ok_or_else(|| ContractError::NotAParticipant {}.into())
}

/// Read-only projection of the accrual formula at current block time.
fn query_accrued_interest(
    deps: Deps,
    env: Env,
    contest_id: u64,
    address: String,
) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    if !CONTESTS.has(deps.storage, contest_id) {
        return Err(ContractError::ContestNotFound {}.into());
    }
    let addr = deps.api.addr_validate(&address)?;
    let accrued = match PARTICIPANTS.may_load(deps.storage, (contest_id, &addr))? {
        Some(participant) => accrued_interest(&participant, config.interest_rate, env.block.time),
        None => Uint128::zero(),
    };
    Ok(accrued)
}

fn query_winner(deps: Deps, env: Env, contest_id: u64) -> StdResult<WinnerResponse> {
    let contest = CONTESTS
        .may_load(deps.storage, contest_id)?
        .ok_or(ContractError::ContestNotFound {})?;
    if env.block.time <= contest.voting_deadline {
        return Err(ContractError::VotingStillOpen {}.into());
    }
    if contest.active {
        return Err(ContractError::ContestStillActive {}.into());
    }
    let (winner, votes_received) = resolve_winner(deps.storage, contest_id)?;
    Ok(WinnerResponse {
        winner,
        votes_received,
    })
}
