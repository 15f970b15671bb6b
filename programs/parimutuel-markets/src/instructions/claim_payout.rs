use anchor_lang::prelude::*;

use crate::events::PayoutClaimed;
use crate::instructions::pay_from_vault;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64, bet_sequence: u64)]
pub struct ClaimPayout<'info> {
    /// The bettor claiming their payout.
    #[account(mut)]
    pub claimer: Signer<'info>,

    /// The resolved market.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// The claimer's bet record; the seeds bind it to this claimer.
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

    /// Market vault: source of payout funds.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<ClaimPayout>) -> Result<u64> {
    let market_key = ctx.accounts.market.key();
    let claimer_key = ctx.accounts.claimer.key();

    // Effects first: the record is marked claimed and the ledger debited
    // before any lamports leave the vault.
    let market = &mut ctx.accounts.market;
    let record = &mut ctx.accounts.bet_record;
    let payout = market.claim_payout(&market_key, record, &claimer_key)?;

    pay_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        ctx.accounts.claimer.to_account_info(),
        &market_key,
        market.vault_bump,
        payout,
    )?;

    emit!(PayoutClaimed {
        market: market_key,
        market_id: market.market_id,
        bettor: claimer_key,
        sequence: record.sequence,
        payout,
        total_claimed: market.total_claimed,
    });

    msg!(
        "Claimed: bet #{} paid {} lamports (stake {}), market #{} claimed {}/{}",
        record.sequence,
        payout,
        record.amount_to_pool,
        market.market_id,
        market.total_claimed,
        market.yes_pool.saturating_add(market.no_pool),
    );

    Ok(payout)
}
