use anchor_lang::prelude::*;

use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct GetMarketState<'info> {
    #[account(
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<GetMarketState>) -> Result<MarketSnapshot> {
    Ok(ctx.accounts.market.snapshot()?)
}
