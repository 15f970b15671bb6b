use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::events::BetPlaced;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct PlaceBet<'info> {
    /// The bettor placing the wager.
    #[account(mut)]
    pub bettor: Signer<'info>,

    /// Fees and bet bounds. Read-only, so bets on different markets never
    /// contend on it.
    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The prediction market.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// One record per stake, keyed by the market's bet counter.
    #[account(
        init,
        payer = bettor,
        space = BetRecord::SIZE,
        seeds = [
            b"bet",
            market.key().as_ref(),
            bettor.key().as_ref(),
            market.total_bets.to_le_bytes().as_ref(),
        ],
        bump,
    )]
    pub bet_record: Account<'info, BetRecord>,

    /// Market vault: receives the gross stake.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<PlaceBet>, side: BetSide, amount: u64) -> Result<BetReceipt> {
    let clock = Clock::get()?;
    let params = ctx.accounts.config.params;
    let market_key = ctx.accounts.market.key();
    let bettor_key = ctx.accounts.bettor.key();

    let market = &mut ctx.accounts.market;
    let mut record = market.place_bet(
        &params,
        market_key,
        bettor_key,
        side,
        amount,
        clock.unix_timestamp,
    )?;
    record.bump = ctx.bumps.bet_record;

    // Fees stay in the vault until resolution.
    transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.bettor.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    let receipt = BetReceipt::new(market.market_id, &record);

    emit!(BetPlaced {
        market: market_key,
        market_id: market.market_id,
        bettor: bettor_key,
        sequence: record.sequence,
        side,
        amount,
        amount_to_pool: record.amount_to_pool,
        platform_fee: record.platform_fee,
        creator_fee: record.creator_fee,
        odds_at_bet: record.odds_at_bet,
        new_yes_pool: market.yes_pool,
        new_no_pool: market.no_pool,
    });

    msg!(
        "Bet #{} placed: {} lamports ({} to pool) on {:?} for market #{}",
        record.sequence,
        amount,
        record.amount_to_pool,
        side,
        market.market_id,
    );

    ctx.accounts.bet_record.set_inner(record);

    Ok(receipt)
}
