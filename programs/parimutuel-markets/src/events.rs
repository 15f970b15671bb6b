use anchor_lang::prelude::*;

use crate::state::{BetSide, GlobalParameters, Outcome};

#[event]
pub struct ConfigUpdated {
    pub authority: Pubkey,
    pub treasury: Pubkey,
    pub params: GlobalParameters,
}

#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub market_id: u64,
    pub creator: Pubkey,
    pub title: String,
    pub end_date: i64,
}

#[event]
pub struct BetPlaced {
    pub market: Pubkey,
    pub market_id: u64,
    pub bettor: Pubkey,
    pub sequence: u64,
    pub side: BetSide,
    pub amount: u64,
    pub amount_to_pool: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub odds_at_bet: u16,
    pub new_yes_pool: u64,
    pub new_no_pool: u64,
}

#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub market_id: u64,
    pub outcome: Outcome,
    pub yes_pool: u64,
    pub no_pool: u64,
    pub platform_fees: u64,
    pub creator_fees: u64,
    pub creator_fees_released: u64,
}

#[event]
pub struct CreatorFeesClaimed {
    pub market: Pubkey,
    pub market_id: u64,
    pub creator: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PayoutClaimed {
    pub market: Pubkey,
    pub market_id: u64,
    pub bettor: Pubkey,
    pub sequence: u64,
    pub payout: u64,
    pub total_claimed: u64,
}

#[event]
pub struct MarketCancelled {
    pub market: Pubkey,
    pub market_id: u64,
    pub cancelled_by: Pubkey,
}

#[event]
pub struct RefundClaimed {
    pub market: Pubkey,
    pub market_id: u64,
    pub bettor: Pubkey,
    pub sequence: u64,
    pub amount: u64,
}
