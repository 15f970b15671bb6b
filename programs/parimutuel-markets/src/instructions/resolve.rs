use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::events::MarketResolved;
use crate::instructions::pay_from_vault;
use crate::math;
use crate::state::*;

#[derive(Accounts)]
#[instruction(market_id: u64)]
pub struct ResolveMarket<'info> {
    /// Market creator or protocol authority.
    pub resolver: Signer<'info>,

    #[account(
        seeds = [b"config"],
        bump = config.bump,
    )]
    pub config: Account<'info, GlobalConfig>,

    /// The market to resolve.
    #[account(
        mut,
        seeds = [b"market", market_id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,

    /// Market vault: source of the fee release.
    #[account(
        mut,
        seeds = [b"vault", market.key().as_ref()],
        bump = market.vault_bump,
    )]
    pub vault: SystemAccount<'info>,

    /// Receives the platform fees.
    #[account(
        mut,
        address = config.treasury,
    )]
    pub treasury: SystemAccount<'info>,

    /// Receives the creator fees when the credit leaves it rent-exempt.
    #[account(
        mut,
        address = market.creator,
    )]
    pub creator: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Fix the outcome and release accumulated fees in one transaction.
///
/// The treasury must end up rent-exempt or the whole resolution fails with
/// `RecipientNotRentExempt`. A creator wallet that cannot take the credit
/// does not block resolution: its fees stay in the vault for
/// `claim_creator_fees`.
pub fn handler(ctx: Context<ResolveMarket>, outcome: Outcome) -> Result<ResolutionReceipt> {
    let clock = Clock::get()?;
    let rent_floor = Rent::get()?.minimum_balance(0);
    let market_key = ctx.accounts.market.key();
    let platform_authority = ctx.accounts.config.authority;
    let creator_balance = ctx.accounts.creator.lamports();

    let market = &mut ctx.accounts.market;
    let mut receipt = market.resolve(
        outcome,
        &ctx.accounts.resolver.key(),
        &platform_authority,
        clock.unix_timestamp,
    )?;

    require!(
        math::credit_keeps_rent_exempt(
            ctx.accounts.treasury.lamports(),
            receipt.platform_fees,
            rent_floor,
        ),
        MarketError::RecipientNotRentExempt
    );
    receipt.creator_fees_released =
        match market.release_creator_fees(creator_balance, rent_floor) {
            Ok(amount) => amount,
            Err(MarketError::RecipientNotRentExempt) => {
                msg!(
                    "Creator {} below rent floor; {} lamports of fees held in vault",
                    market.creator,
                    receipt.creator_fees,
                );
                0
            }
            Err(err) => return Err(err.into()),
        };

    pay_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        ctx.accounts.treasury.to_account_info(),
        &market_key,
        market.vault_bump,
        receipt.platform_fees,
    )?;
    pay_from_vault(
        &ctx.accounts.system_program,
        &ctx.accounts.vault,
        ctx.accounts.creator.to_account_info(),
        &market_key,
        market.vault_bump,
        receipt.creator_fees_released,
    )?;

    emit!(MarketResolved {
        market: market_key,
        market_id: receipt.market_id,
        outcome,
        yes_pool: receipt.yes_pool,
        no_pool: receipt.no_pool,
        platform_fees: receipt.platform_fees,
        creator_fees: receipt.creator_fees,
        creator_fees_released: receipt.creator_fees_released,
    });

    msg!(
        "Market #{} resolved: outcome={:?}, yes_pool={}, no_pool={}, winners={}, fees={}+{} (released {})",
        receipt.market_id,
        outcome,
        receipt.yes_pool,
        receipt.no_pool,
        receipt.winning_bets,
        receipt.platform_fees,
        receipt.creator_fees,
        receipt.creator_fees_released,
    );

    Ok(receipt)
}
