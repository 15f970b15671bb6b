use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::ConfigUpdated;
use crate::state::*;

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    #[account(
        constraint = authority.key() == config.authority @ MarketError::Unauthorized,
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// New platform fee destination (may be unchanged). Must already hold
    /// its rent-exempt minimum.
    pub treasury: SystemAccount<'info>,
}

/// Replace the global parameters. Markets already created keep their
/// recorded bets; new bets use the new fees and bounds.
pub fn handler(ctx: Context<UpdateConfig>, params: GlobalParameters) -> Result<()> {
    params.validate()?;
    require!(
        ctx.accounts.treasury.lamports() >= Rent::get()?.minimum_balance(0),
        MarketError::RecipientNotRentExempt
    );

    let config = &mut ctx.accounts.config;
    config.params = params;
    config.treasury = ctx.accounts.treasury.key();

    emit!(ConfigUpdated {
        authority: config.authority,
        treasury: config.treasury,
        params,
    });

    msg!(
        "Config updated by {}: fees={}+{}bps bets=[{}, {}]",
        config.authority,
        params.platform_fee_bps,
        params.creator_fee_bps,
        params.min_bet,
        params.max_bet,
    );

    Ok(())
}
