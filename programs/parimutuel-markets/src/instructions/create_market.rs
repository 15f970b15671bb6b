use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

use crate::errors::MarketError;
use crate::events::MarketCreated;
use crate::state::*;

/// Parameters for creating a new prediction market.
#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct CreateMarketParams {
    /// Human-readable prediction question (1–128 bytes).
    pub title: String,

    /// Unix timestamp at which betting closes.
    pub end_date: i64,
}

#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator: pays for account allocation and the vault seed.
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global config: provides next_market_id and duration bounds.
    #[account(
        mut,
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// Market PDA: the ledger for this prediction market.
    #[account(
        init,
        payer = creator,
        space = Market::SIZE,
        seeds = [b"market", config.next_market_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Account<'info, Market>,

    /// Vault PDA: holds every lamport staked on this market.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump,
    )]
    pub vault: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
    let clock = Clock::get()?;
    let config = &mut ctx.accounts.config;

    let mut market = Market::open(
        config.next_market_id,
        ctx.accounts.creator.key(),
        params.title,
        params.end_date,
        &config.params,
        clock.unix_timestamp,
    )?;
    market.vault_bump = ctx.bumps.vault;
    market.bump = ctx.bumps.market;

    // The vault keeps its rent-exempt seed for life, so draining every
    // stake never leaves it below the rent floor.
    let rent_floor = Rent::get()?.minimum_balance(0);
    let vault_balance = ctx.accounts.vault.lamports();
    if vault_balance < rent_floor {
        transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.creator.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            rent_floor - vault_balance,
        )?;
    }

    config.next_market_id = config
        .next_market_id
        .checked_add(1)
        .ok_or(MarketError::ArithmeticOverflow)?;
    config.total_markets = config
        .total_markets
        .checked_add(1)
        .ok_or(MarketError::ArithmeticOverflow)?;

    emit!(MarketCreated {
        market: ctx.accounts.market.key(),
        market_id: market.market_id,
        creator: market.creator,
        title: market.title.clone(),
        end_date: market.end_date,
    });

    msg!(
        "Market #{} created: {} | end_date: {}",
        market.market_id,
        market.title,
        market.end_date,
    );

    ctx.accounts.market.set_inner(market);

    Ok(())
}
