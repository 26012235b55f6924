use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub owner: Addr,
    pub deposit_denom: String,
    /// cw20 token this contract mints interest rewards in.
    pub reward_token: Addr,
    /// Annual simple-interest rate, whole percent.
    pub interest_rate: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Contest {
    pub title: String,
    pub description: String,
    pub goals: String,
    pub total_deposited: Uint128,
    pub total_interest_generated: Uint128,
    pub participants_count: u64,
    pub voting_deadline: Timestamp,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Participant {
    pub deposit_amount: Uint128,
    pub deposit_timestamp: Timestamp,
    pub last_interest_claim_time: Timestamp,
    pub votes_received: u64,
    pub has_voted: bool,
    /// Reserved completion flag. Nothing sets it yet; deposits reject when true.
    pub has_finished: bool,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Last allocated contest id; ids are sequential starting at 1.
pub const CONTEST_COUNT: Item<u64> = Item::new("contest_count");

pub const CONTESTS: Map<u64, Contest> = Map::new("contests");

/// Participants keyed by (contest id, address).
pub const PARTICIPANTS: Map<(u64, &Addr), Participant> = Map::new("participants");

/// Participant addresses per contest in enrollment order.
/// Winner resolution walks this list; ties keep the earliest entry.
pub const ROSTER: Map<u64, Vec<Addr>> = Map::new("roster");
