use anchor_lang::prelude::*;

use crate::events::MarketCancelled;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct CancelMarket<'info> {
    /// Market creator or protocol authority.
    pub authority: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to cancel.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

pub fn handler(ctx: Context<CancelMarket>) -> Result<()> {
    let market_key = ctx.accounts.market.key();
    let authority = ctx.accounts.authority.key();
    let market = &mut ctx.accounts.market;
    market.cancel(&authority, &ctx.accounts.config.authority)?;

    emit!(MarketCancelled {
        market: market_key,
        market_id: market.market_id,
        cancelled_by: authority,
    });

    msg!(
        "Market #{} cancelled by {} ({} bets to refund)",
        market.market_id,
        authority,
        market.total_bets,
    );

    Ok(())
}
