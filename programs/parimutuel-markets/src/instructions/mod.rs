pub mod initialize_config;
pub mod update_config;
pub mod create_market;
pub mod place_bet;
pub mod resolve;
pub mod claim_payout;
pub mod claim_creator_fees;
pub mod cancel;
pub mod claim_refund;
pub mod get_market_state;

pub use initialize_config::*;
pub use update_config::*;
pub use create_market::*;
pub use place_bet::*;
pub use resolve::*;
pub use claim_payout::*;
pub use claim_creator_fees::*;
pub use cancel::*;
pub use claim_refund::*;
pub use get_market_state::*;

use anchor_lang::prelude::*;
use anchor_lang::system_program::{transfer, Transfer};

/// Move lamports out of a market vault PDA, signing with its seeds.
pub(crate) fn pay_from_vault<'info>(
    system_program: &Program<'info, System>,
    vault: &SystemAccount<'info>,
    to: AccountInfo<'info>,
    market_key: &Pubkey,
    vault_bump: u8,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let bump = [vault_bump];
    let vault_seeds: &[&[u8]] = &[b"vault", market_key.as_ref(), &bump];

    transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to,
            },
            &[vault_seeds],
        ),
        amount,
    )
}
