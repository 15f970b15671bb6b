use anchor_lang::prelude::*;

/// Custom error codes for the pari-mutuel markets program.
///
/// Error codes are offset from 6000 (Anchor convention).
#[error_code]
pub enum MarketError {
    // ─── Validation ───
    /// Market title is empty or longer than `Market::MAX_TITLE_LEN` bytes.
    #[msg("Invalid market title (1-128 bytes)")]
    InvalidTitle,

    /// End date falls outside the configured duration bounds.
    #[msg("End date outside allowed duration")]
    InvalidEndDate,

    /// Stake below `min_bet`.
    #[msg("Bet amount below minimum")]
    BetTooSmall,

    /// Stake above `max_bet`.
    #[msg("Bet amount above maximum")]
    BetTooLarge,

    /// Global parameters violate their own bounds.
    #[msg("Invalid global parameters")]
    InvalidConfig,

    #[msg("Outcome must be Yes or No")]
    InvalidOutcome,

    /// A fee recipient would be left holding less than the rent-exempt
    /// minimum after the transfer.
    #[msg("Fee recipient is not rent-exempt")]
    RecipientNotRentExempt,

    // ─── State ───
    /// Market is not accepting this operation in its current status.
    #[msg("Market is not active")]
    MarketNotActive,

    /// Market end date has passed; no more bets accepted.
    #[msg("Market has ended")]
    MarketEnded,

    /// Market end date has not been reached; cannot resolve yet.
    #[msg("Market has not ended")]
    MarketNotEnded,

    #[msg("Market already resolved")]
    MarketAlreadyResolved,

    #[msg("Market not resolved")]
    MarketNotResolved,

    #[msg("Market not cancelled")]
    MarketNotCancelled,

    // ─── Authorization ───
    /// Caller is neither the owner nor an authority allowed to act.
    #[msg("Unauthorized")]
    Unauthorized,

    // ─── Claim ───
    #[msg("Bet already claimed")]
    AlreadyClaimed,

    /// The bet is on the losing side; nothing to pay.
    #[msg("Bet is on the losing side")]
    BetLost,

    /// The winning pool is empty; refusing to divide by zero.
    #[msg("Winning pool is empty; no claims possible")]
    NoWinnersCannotClaim,

    /// Bet record belongs to a different market.
    #[msg("Bet record does not belong to this market")]
    BetMarketMismatch,

    // ─── Arithmetic ───
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
