use anchor_lang::prelude::*;

use crate::events::RefundClaimed;
use crate::instructions::pay_from_vault;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64, bet_sequence: u64)]
pub struct ClaimRefund<'info> {
    /// The bettor claiming their refund.
    #[account(mut)]
    pub claimer: Signer<'info>,

    /// The cancelled market.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    #[account(
        mut,
        seeds = [
            b"bet",
            market.key().as_ref(),
            claimer.key().as_ref(),
            bet_sequence.to_le_bytes().as_ref(),
        ],
        bump = bet_record.bump,
    )]
    pub bet_record: Account<'info, BetRecord>,

    /// Market vault.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimRefund>) -> Result<u64> {
    let market_key = ctx.accounts.market.key();
    let claimer_key = ctx.accounts.claimer.key();

    let market = &mut ctx.accounts.market;
    let record = &mut ctx.accounts.bet_record;
    let refund = market.claim_refund(&market_key, record, &claimer_key)?;

    pay_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        ctx.accounts.claimer.to_account_info(),
        &market_key,
        market.vault_bump,
        refund,
    )?;

    emit!(RefundClaimed {
        market: market_key,
        market_id: market.market_id,
        bettor: claimer_key,
        sequence: record.sequence,
        amount: refund,
    });

    msg!(
        "Refund: {} lamports returned to {} for bet #{} of market #{}",
        refund,
        claimer_key,
        record.sequence,
        market.market_id,
    );

    Ok(refund)
}
