use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::CreatorFeesClaimed;
use crate::instructions::pay_from_vault;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ClaimCreatorFees<'info> {
    #[account(
        mut,
        constraint = creator.key() == market.creator @ MarketError::Unauthorized,
    )]
    pub creator: Signer<'info>,

    /// The resolved market whose creator fees were held back.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Release creator fees that resolution left in the vault because the
/// creator wallet was below the rent floor at the time.
pub fn handler(ctx: Context<ClaimCreatorFees>) -> Result<u64> {
    let rent_floor = Rent::get()?.minimum_balance(0);
    let market_key = ctx.accounts.market.key();
    let creator_balance = ctx.accounts.creator.lamports();

    let market = &mut ctx.accounts.market;
    let amount = market.release_creator_fees(creator_balance, rent_floor)?;

    pay_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        ctx.accounts.creator.to_account_info(),
        &market_key,
        market.vault_bump,
        amount,
    )?;

    emit!(CreatorFeesClaimed {
        market: market_key,
        market_id: market.market_id,
        creator: market.creator,
        amount,
    });

    msg!(
        "Market #{}: creator {} claimed {} lamports of fees",
        market.market_id,
        market.creator,
        amount,
    );

    Ok(amount)
}
