use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::ConfigUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    /// Protocol authority: pays for the config account.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = GlobalConfig::SIZE,
        seeds = [b"config"],
        bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Platform fee destination. Must already hold its rent-exempt minimum.
    pub treasury: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeConfig>, params: GlobalParameters) -> Result<()> {
    params.validate()?;
    require!(
        ctx.accounts.treasury.lamports() >= Rent::get()?.minimum_balance(0),
        MarketError::RecipientNotRentExempt
    );

    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.treasury = ctx.accounts.treasury.key();
    config.params = params;
    config.next_market_id = 0;
    config.total_markets = 0;
    config.bump = ctx.bumps.config;

    emit!(ConfigUpdated {
        authority: config.authority,
        treasury: config.treasury,
        params,
    });

    msg!(
        "Config initialized: fees={}+{}bps bets=[{}, {}] duration=[{}, {}]s",
        params.platform_fee_bps,
        params.creator_fee_bps,
        params.min_bet,
        params.max_bet,
        params.min_duration,
        params.max_duration,
    );

    Ok(())
}
