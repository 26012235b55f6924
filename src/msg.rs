use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use cosmwasm_std::{Addr, Timestamp, Uint128};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    pub deposit_denom: String,
    pub reward_token: String,
    /// Annual simple-interest rate in whole percent; defaults to 5.
    pub interest_rate: Option<u64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    CreateContest {
        title: String,
        description: String,
        goals: String,
        /// Voting window in seconds from creation.
        voting_duration: u64,
    },
    EndContest {
        contest_id: u64,
    },
    /// Deposit the attached funds of the configured denom into a contest.
    Deposit {
        contest_id: u64,
    },
    ClaimInterest {
        contest_id: u64,
    },
    Vote {
        contest_id: u64,
        nominee: String,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetConfig {},
    GetContest { contest_id: u64 },
    GetParticipant { contest_id: u64, address: String },
    /// Interest accrued since the last settlement, projected at current block time.
    GetAccruedInterest { contest_id: u64, address: String },
    GetWinner { contest_id: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ContestResponse {
    pub id: u64,
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
pub struct WinnerResponse {
    /// None when no participant received any vote.
    pub winner: Option<Addr>,
    pub votes_received: u64,
}
