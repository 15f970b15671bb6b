use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;
use state::*;

declare_id!("9a8du6Yuv7U6v4LZaPLS4k3TPf8Kh8FtC8JfukbK7M6N");

#[program]
pub mod parimutuel_markets {
    use super::*;

    /// Create the singleton config holding fees, bet bounds and the
    /// protocol authority.
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        params: GlobalParameters,
    ) -> Result<()> {
        instructions::initialize_config::handler(ctx, params)
    }

    /// Replace the global parameters (authority only).
    pub fn update_config(ctx: Context<UpdateConfig>, params: GlobalParameters) -> Result<()> {
        instructions::update_config::handler(ctx, params)
    }

    /// Create a new binary prediction market.
    ///
    /// The market vault is seeded with its rent-exempt minimum by the creator.
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        instructions::create_market::handler(ctx, params)
    }

    /// Place a bet on YES or NO.
    ///
    /// Transfers the gross `amount` into the market vault. Platform and
    /// creator fees are split off in basis points (floored); the rest joins
    /// the chosen pool.
    pub fn place_bet(
        ctx: Context<PlaceBet>,
        _market_id: u64,
        side: BetSide,
        amount: u64,
    ) -> Result<BetReceipt> {
        instructions::place_bet::handler(ctx, side, amount)
    }

    /// Resolve the market outcome.
    ///
    /// Callable by the creator or the protocol authority once `end_date`
    /// has passed. Releases accumulated fees in the same transaction; creator
    /// fees that would leave the creator wallet below the rent floor stay in
    /// the vault for `claim_creator_fees`.
    pub fn resolve_market(
        ctx: Context<ResolveMarket>,
        _market_id: u64,
        outcome: Outcome,
    ) -> Result<ResolutionReceipt> {
        instructions::resolve::handler(ctx, outcome)
    }

    /// Claim a winning bet's share of the pool.
    ///
    ///   payout = stake + floor(stake × losing_pool / winning_pool)
    ///
    /// The last winning claim receives the exact remainder instead, so the
    /// sum of all payouts equals the total pool.
    pub fn claim_payout(
        ctx: Context<ClaimPayout>,
        _market_id: u64,
        _bet_sequence: u64,
    ) -> Result<u64> {
        instructions::claim_payout::handler(ctx)
    }

    /// Release creator fees that resolution held back because the creator
    /// wallet was below the rent-exempt minimum (creator only).
    pub fn claim_creator_fees(ctx: Context<ClaimCreatorFees>, _market_id: u64) -> Result<u64> {
        instructions::claim_creator_fees::handler(ctx)
    }

    /// Cancel a market before resolution (creator or authority only).
    ///
    /// All bettors can claim a full refund via `claim_refund`.
    pub fn cancel_market(ctx: Context<CancelMarket>, _market_id: u64) -> Result<()> {
        instructions::cancel::handler(ctx)
    }

    /// Claim refund of a bet's gross stake from a cancelled market.
    pub fn claim_refund(
        ctx: Context<ClaimRefund>,
        _market_id: u64,
        _bet_sequence: u64,
    ) -> Result<u64> {
        instructions::claim_refund::handler(ctx)
    }

    /// Read-only snapshot of a market's committed state and current odds.
    pub fn get_market_state(
        ctx: Context<GetMarketState>,
        _market_id: u64,
    ) -> Result<MarketSnapshot> {
        instructions::get_market_state::handler(ctx)
    }
}
