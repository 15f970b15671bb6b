use anchor_lang::prelude::*;

use crate::errors::MarketError;
use crate::math::{self, FeeSplit};

/// ─── Global Parameters ────────────────────────────────────────────
///
/// Fee rates and bounds supplied by the protocol authority. Every ledger
/// operation receives these explicitly; nothing reads a hidden global.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GlobalParameters {
    /// Smallest accepted stake (lamports, inclusive).
    pub min_bet: u64,

    /// Largest accepted stake (lamports, inclusive).
    pub max_bet: u64,

    /// Platform fee taken from every stake, basis points.
    pub platform_fee_bps: u16,

    /// Creator fee taken from every stake, basis points.
    pub creator_fee_bps: u16,

    /// Shortest market lifetime in seconds.
    pub min_duration: i64,

    /// Longest market lifetime in seconds.
    pub max_duration: i64,

    /// Seconds after `end_date` reserved for disputing an outcome.
    ///
    /// Reserved: validated and stored, but no instruction reads it yet.
    /// Resolution opens at `end_date` and claims open at resolution.
    pub dispute_window: i64,
}

impl GlobalParameters {
    pub const SIZE: usize = 8 // min_bet
        + 8                    // max_bet
        + 2                    // platform_fee_bps
        + 2                    // creator_fee_bps
        + 8                    // min_duration
        + 8                    // max_duration
        + 8;                   // dispute_window

    pub fn validate(&self) -> core::result::Result<(), MarketError> {
        let total_fee_bps = self.platform_fee_bps as u64 + self.creator_fee_bps as u64;
        if total_fee_bps > math::BPS_DENOMINATOR {
            return Err(MarketError::InvalidConfig);
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(MarketError::InvalidConfig);
        }
        if self.min_duration <= 0 || self.min_duration > self.max_duration {
            return Err(MarketError::InvalidConfig);
        }
        if self.dispute_window < 0 {
            return Err(MarketError::InvalidConfig);
        }
        Ok(())
    }
}

/// ─── Global Config ────────────────────────────────────────────────
///
/// PDA: seeds = [b"config"]
///
/// Protocol-level settings.
#[account]
#[derive(Default)]
pub struct GlobalConfig {
    /// Protocol authority (can update config, resolve and cancel any market).
    pub authority: Pubkey,

    /// Receives platform fees at resolution.
    pub treasury: Pubkey,

    pub params: GlobalParameters,

    /// Next market ID to assign.
    pub next_market_id: u64,

    /// Total markets created.
    pub total_markets: u64,

    /// Bump seed.
    pub bump: u8,

    /// Reserved.
    pub _reserved: [u8; 32],
}

impl GlobalConfig {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // authority
        + 32                    // treasury
        + GlobalParameters::SIZE
        + 8                     // next_market_id
        + 8                     // total_markets
        + 1                     // bump
        + 32;                   // reserved
}

/// ─── Market Status ────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MarketStatus {
    /// Market is accepting bets.
    #[default]
    Active,

    /// Outcome has been fixed; winners may claim.
    Resolved,

    /// Market was cancelled; every bettor may claim a full refund.
    Cancelled,
}

/// ─── Outcome ──────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Unresolved,
    Yes,
    No,
}

impl Outcome {
    /// The side that wins under this outcome, if any.
    pub fn winning_side(self) -> Option<BetSide> {
        match self {
            Outcome::Yes => Some(BetSide::Yes),
            Outcome::No => Some(BetSide::No),
            Outcome::Unresolved => None,
        }
    }
}

/// ─── Bet Side ─────────────────────────────────────────────────────
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BetSide {
    #[default]
    Yes,
    No,
}

impl BetSide {
    pub fn opposite(self) -> Self {
        match self {
            BetSide::Yes => BetSide::No,
            BetSide::No => BetSide::Yes,
        }
    }
}

/// ─── Market Account ───────────────────────────────────────────────
///
/// PDA: seeds = [b"market", market_id.to_le_bytes()]
///
/// The ledger for a single binary market. Every instruction that touches a
/// market write-locks this account, so all mutations of one market are
/// serialized by the runtime and markets never contend with each other.
///
/// # Invariants
/// - `total_volume == yes_pool + no_pool + total_platform_fees + total_creator_fees`
/// - `status == Active` ⇒ `resolved_outcome == Unresolved`
/// - `total_claimed <= yes_pool + no_pool`, with equality once every winner
///   has claimed
/// - `creator_fees_paid <= total_creator_fees`
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct Market {
    /// Unique numeric identifier (incrementing).
    pub market_id: u64,

    /// Creator's public key. Receives creator fees at resolution.
    pub creator: Pubkey,

    /// Human-readable question (max 128 bytes).
    pub title: String,

    pub created_at: i64,

    /// Betting closes at this Unix timestamp; resolution opens.
    pub end_date: i64,

    pub status: MarketStatus,

    /// Only valid when status == Resolved.
    pub resolved_outcome: Outcome,

    pub resolved_at: i64,

    // ─── Pool accounting ───
    /// Net-of-fee lamports staked on YES.
    pub yes_pool: u64,

    /// Net-of-fee lamports staked on NO.
    pub no_pool: u64,

    pub yes_bet_count: u64,
    pub no_bet_count: u64,

    /// Bets placed on either side; the next bet's sequence number.
    pub total_bets: u64,

    /// Gross lamports staked, fees included.
    pub total_volume: u64,

    pub total_platform_fees: u64,
    pub total_creator_fees: u64,

    // ─── Settlement state ───
    /// Lamports paid to winners so far.
    pub total_claimed: u64,

    /// Winning bets not yet claimed. Set at resolution.
    pub remaining_winners: u64,

    /// Lamports returned to bettors of a cancelled market.
    pub total_refunded: u64,

    /// Creator fees already moved out of the vault. Trails
    /// `total_creator_fees` while the creator wallet is below the rent floor.
    pub creator_fees_paid: u64,

    /// Vault bump seed.
    pub vault_bump: u8,

    /// Market PDA bump seed.
    pub bump: u8,

    /// Reserved space for future upgrades.
    pub _reserved: [u8; 32],
}

impl Market {
    pub const MAX_TITLE_LEN: usize = 128;

    /// Account size for Anchor allocation.
    pub const SIZE: usize = 8  // discriminator
        + 8                     // market_id
        + 32                    // creator
        + (4 + Self::MAX_TITLE_LEN) // title
        + 8                     // created_at
        + 8                     // end_date
        + 1                     // status
        + 1                     // resolved_outcome
        + 8                     // resolved_at
        + 8                     // yes_pool
        + 8                     // no_pool
        + 8                     // yes_bet_count
        + 8                     // no_bet_count
        + 8                     // total_bets
        + 8                     // total_volume
        + 8                     // total_platform_fees
        + 8                     // total_creator_fees
        + 8                     // total_claimed
        + 8                     // remaining_winners
        + 8                     // total_refunded
        + 8                     // creator_fees_paid
        + 1                     // vault_bump
        + 1                     // bump
        + 32;                   // reserved

    /// Build a fresh, empty market after validating title and lifetime.
    pub fn open(
        market_id: u64,
        creator: Pubkey,
        title: String,
        end_date: i64,
        params: &GlobalParameters,
        now: i64,
    ) -> core::result::Result<Self, MarketError> {
        if title.is_empty() || title.len() > Self::MAX_TITLE_LEN {
            return Err(MarketError::InvalidTitle);
        }

        let earliest = now
            .checked_add(params.min_duration)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let latest = now
            .checked_add(params.max_duration)
            .ok_or(MarketError::ArithmeticOverflow)?;
        if end_date < earliest || end_date > latest {
            return Err(MarketError::InvalidEndDate);
        }

        Ok(Self {
            market_id,
            creator,
            title,
            created_at: now,
            end_date,
            ..Default::default()
        })
    }

    pub fn pool(&self, side: BetSide) -> u64 {
        match side {
            BetSide::Yes => self.yes_pool,
            BetSide::No => self.no_pool,
        }
    }

    pub fn bet_count(&self, side: BetSide) -> u64 {
        match side {
            BetSide::Yes => self.yes_bet_count,
            BetSide::No => self.no_bet_count,
        }
    }

    pub fn total_pool(&self) -> core::result::Result<u64, MarketError> {
        self.yes_pool
            .checked_add(self.no_pool)
            .ok_or(MarketError::ArithmeticOverflow)
    }

    /// Opposing pool's share of the total pool, in bps. Display only.
    pub fn odds_bps(&self, side: BetSide) -> core::result::Result<u16, MarketError> {
        math::share_bps(self.pool(side.opposite()), self.total_pool()?)
    }

    /// Creator or protocol authority.
    pub fn is_administered_by(&self, caller: &Pubkey, platform_authority: &Pubkey) -> bool {
        *caller == self.creator || *caller == *platform_authority
    }

    /// Ledger invariants that must hold at every committed state.
    pub fn ledger_balanced(&self) -> bool {
        let pools = self.yes_pool as u128 + self.no_pool as u128;
        let fees = self.total_platform_fees as u128 + self.total_creator_fees as u128;
        let outcome_consistent = match self.status {
            MarketStatus::Active | MarketStatus::Cancelled => {
                self.resolved_outcome == Outcome::Unresolved
            }
            MarketStatus::Resolved => self.resolved_outcome != Outcome::Unresolved,
        };

        self.total_volume as u128 == pools + fees
            && self.total_claimed as u128 <= pools
            && self.total_refunded <= self.total_volume
            && self.creator_fees_paid <= self.total_creator_fees
            && self.yes_bet_count as u128 + self.no_bet_count as u128
                == self.total_bets as u128
            && outcome_consistent
    }

    /// Apply a stake to the ledger and return the record to persist.
    ///
    /// All new values are computed before any field is written, so an error
    /// leaves the market untouched.
    pub fn place_bet(
        &mut self,
        params: &GlobalParameters,
        market_key: Pubkey,
        bettor: Pubkey,
        side: BetSide,
        amount: u64,
        now: i64,
    ) -> core::result::Result<BetRecord, MarketError> {
        if self.status != MarketStatus::Active {
            return Err(MarketError::MarketNotActive);
        }
        if now >= self.end_date {
            return Err(MarketError::MarketEnded);
        }
        if amount < params.min_bet {
            return Err(MarketError::BetTooSmall);
        }
        if amount > params.max_bet {
            return Err(MarketError::BetTooLarge);
        }

        let FeeSplit {
            platform_fee,
            creator_fee,
            amount_to_pool,
            ..
        } = math::split_stake(amount, params.platform_fee_bps, params.creator_fee_bps)?;

        // Frozen into the record before this stake moves the pools.
        let odds_at_bet = self.odds_bps(side)?;

        let pool = self
            .pool(side)
            .checked_add(amount_to_pool)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let bet_count = self
            .bet_count(side)
            .checked_add(1)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let total_volume = self
            .total_volume
            .checked_add(amount)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let total_platform_fees = self
            .total_platform_fees
            .checked_add(platform_fee)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let total_creator_fees = self
            .total_creator_fees
            .checked_add(creator_fee)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let sequence = self.total_bets;
        let total_bets = sequence
            .checked_add(1)
            .ok_or(MarketError::ArithmeticOverflow)?;

        match side {
            BetSide::Yes => {
                self.yes_pool = pool;
                self.yes_bet_count = bet_count;
            }
            BetSide::No => {
                self.no_pool = pool;
                self.no_bet_count = bet_count;
            }
        }
        self.total_volume = total_volume;
        self.total_platform_fees = total_platform_fees;
        self.total_creator_fees = total_creator_fees;
        self.total_bets = total_bets;

        Ok(BetRecord {
            market: market_key,
            bettor,
            sequence,
            side,
            amount,
            amount_to_pool,
            platform_fee,
            creator_fee,
            odds_at_bet,
            claimed: false,
            payout: 0,
            timestamp: now,
            bump: 0,
        })
    }

    /// Fix the outcome. The returned receipt carries the fee totals the
    /// caller must release in the same transaction.
    pub fn resolve(
        &mut self,
        outcome: Outcome,
        resolver: &Pubkey,
        platform_authority: &Pubkey,
        now: i64,
    ) -> core::result::Result<ResolutionReceipt, MarketError> {
        let winning_side = outcome.winning_side().ok_or(MarketError::InvalidOutcome)?;

        if !self.is_administered_by(resolver, platform_authority) {
            return Err(MarketError::Unauthorized);
        }
        if now < self.end_date {
            return Err(MarketError::MarketNotEnded);
        }
        match self.status {
            MarketStatus::Active => {}
            MarketStatus::Resolved => return Err(MarketError::MarketAlreadyResolved),
            MarketStatus::Cancelled => return Err(MarketError::MarketNotActive),
        }

        self.status = MarketStatus::Resolved;
        self.resolved_outcome = outcome;
        self.resolved_at = now;
        self.remaining_winners = self.bet_count(winning_side);

        Ok(ResolutionReceipt {
            market_id: self.market_id,
            outcome,
            yes_pool: self.yes_pool,
            no_pool: self.no_pool,
            platform_fees: self.total_platform_fees,
            creator_fees: self.total_creator_fees,
            creator_fees_released: 0,
            winning_bets: self.remaining_winners,
        })
    }

    /// Mark the creator's outstanding fees as paid and return the lamports
    /// to move, provided the credit leaves the creator wallet rent-exempt.
    ///
    /// Fails with `RecipientNotRentExempt` otherwise; the fees stay in the
    /// vault and can be released later through `claim_creator_fees`.
    pub fn release_creator_fees(
        &mut self,
        creator_balance: u64,
        rent_floor: u64,
    ) -> core::result::Result<u64, MarketError> {
        if self.status != MarketStatus::Resolved {
            return Err(MarketError::MarketNotResolved);
        }
        let owed = self
            .total_creator_fees
            .checked_sub(self.creator_fees_paid)
            .ok_or(MarketError::ArithmeticOverflow)?;
        if owed == 0 {
            return Ok(0);
        }
        if !math::credit_keeps_rent_exempt(creator_balance, owed, rent_floor) {
            return Err(MarketError::RecipientNotRentExempt);
        }

        self.creator_fees_paid = self.total_creator_fees;
        Ok(owed)
    }

    /// Settle one winning bet and return the lamports owed to its owner.
    ///
    /// Non-final claims receive `stake + floor(stake * losing / winning)`.
    /// The final winning claim receives whatever is left of the total pool,
    /// which absorbs every earlier floor so the sum of payouts equals
    /// `yes_pool + no_pool` exactly.
    ///
    /// The record and the ledger are marked before the caller moves any
    /// lamports.
    pub fn claim_payout(
        &mut self,
        market_key: &Pubkey,
        record: &mut BetRecord,
        claimer: &Pubkey,
    ) -> core::result::Result<u64, MarketError> {
        if self.status != MarketStatus::Resolved {
            return Err(MarketError::MarketNotResolved);
        }
        if record.market != *market_key {
            return Err(MarketError::BetMarketMismatch);
        }
        if record.bettor != *claimer {
            return Err(MarketError::Unauthorized);
        }
        if record.claimed {
            return Err(MarketError::AlreadyClaimed);
        }

        let winning_side = self
            .resolved_outcome
            .winning_side()
            .ok_or(MarketError::MarketNotResolved)?;
        if record.side != winning_side {
            return Err(MarketError::BetLost);
        }

        let winning_pool = self.pool(winning_side);
        let losing_pool = self.pool(winning_side.opposite());
        if winning_pool == 0 {
            return Err(MarketError::NoWinnersCannotClaim);
        }

        let payout = if self.remaining_winners == 1 {
            self.total_pool()?
                .checked_sub(self.total_claimed)
                .ok_or(MarketError::ArithmeticOverflow)?
        } else {
            math::pro_rata_payout(record.amount_to_pool, losing_pool, winning_pool)?
        };

        let total_claimed = self
            .total_claimed
            .checked_add(payout)
            .ok_or(MarketError::ArithmeticOverflow)?;
        let remaining_winners = self
            .remaining_winners
            .checked_sub(1)
            .ok_or(MarketError::ArithmeticOverflow)?;

        record.claimed = true;
        record.payout = payout;
        self.total_claimed = total_claimed;
        self.remaining_winners = remaining_winners;

        Ok(payout)
    }

    pub fn cancel(
        &mut self,
        caller: &Pubkey,
        platform_authority: &Pubkey,
    ) -> core::result::Result<(), MarketError> {
        if !self.is_administered_by(caller, platform_authority) {
            return Err(MarketError::Unauthorized);
        }
        match self.status {
            MarketStatus::Active => {}
            MarketStatus::Resolved => return Err(MarketError::MarketAlreadyResolved),
            MarketStatus::Cancelled => return Err(MarketError::MarketNotActive),
        }

        self.status = MarketStatus::Cancelled;
        Ok(())
    }

    /// Return the gross stake of a bet in a cancelled market. Fees were
    /// never released, so the refund includes them.
    pub fn claim_refund(
        &mut self,
        market_key: &Pubkey,
        record: &mut BetRecord,
        claimer: &Pubkey,
    ) -> core::result::Result<u64, MarketError> {
        if self.status != MarketStatus::Cancelled {
            return Err(MarketError::MarketNotCancelled);
        }
        if record.market != *market_key {
            return Err(MarketError::BetMarketMismatch);
        }
        if record.bettor != *claimer {
            return Err(MarketError::Unauthorized);
        }
        if record.claimed {
            return Err(MarketError::AlreadyClaimed);
        }

        let refund = record.amount;
        let total_refunded = self
            .total_refunded
            .checked_add(refund)
            .ok_or(MarketError::ArithmeticOverflow)?;

        record.claimed = true;
        record.payout = refund;
        self.total_refunded = total_refunded;

        Ok(refund)
    }

    pub fn snapshot(&self) -> core::result::Result<MarketSnapshot, MarketError> {
        Ok(MarketSnapshot {
            market_id: self.market_id,
            creator: self.creator,
            end_date: self.end_date,
            status: self.status,
            resolved_outcome: self.resolved_outcome,
            yes_pool: self.yes_pool,
            no_pool: self.no_pool,
            yes_bet_count: self.yes_bet_count,
            no_bet_count: self.no_bet_count,
            total_volume: self.total_volume,
            total_platform_fees: self.total_platform_fees,
            total_creator_fees: self.total_creator_fees,
            creator_fees_paid: self.creator_fees_paid,
            total_claimed: self.total_claimed,
            remaining_winners: self.remaining_winners,
            total_refunded: self.total_refunded,
            yes_odds_bps: self.odds_bps(BetSide::Yes)?,
            no_odds_bps: self.odds_bps(BetSide::No)?,
        })
    }
}

/// ─── Bet Record ───────────────────────────────────────────────────
///
/// PDA: seeds = [b"bet", market.key, bettor.key, sequence.to_le_bytes()]
///
/// One record per stake. Never closed; kept as settlement history.
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct BetRecord {
    /// The market this bet belongs to.
    pub market: Pubkey,

    /// The wallet that placed the bet.
    pub bettor: Pubkey,

    /// Market's bet counter at placement.
    pub sequence: u64,

    pub side: BetSide,

    /// Gross stake, fees included.
    pub amount: u64,

    /// Stake credited to the pool after fees.
    pub amount_to_pool: u64,

    pub platform_fee: u64,
    pub creator_fee: u64,

    /// Opposing pool's share in bps when the bet landed. Never recomputed.
    pub odds_at_bet: u16,

    /// Set once by a payout or refund.
    pub claimed: bool,

    /// Lamports released for this bet (0 until claimed).
    pub payout: u64,

    pub timestamp: i64,

    /// Bump seed.
    pub bump: u8,
}

impl BetRecord {
    pub const SIZE: usize = 8  // discriminator
        + 32                    // market
        + 32                    // bettor
        + 8                     // sequence
        + 1                     // side
        + 8                     // amount
        + 8                     // amount_to_pool
        + 8                     // platform_fee
        + 8                     // creator_fee
        + 2                     // odds_at_bet
        + 1                     // claimed
        + 8                     // payout
        + 8                     // timestamp
        + 1;                    // bump
}

/// ─── Receipts ─────────────────────────────────────────────────────
///
/// Returned to callers through Anchor return data.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BetReceipt {
    pub market_id: u64,
    pub sequence: u64,
    pub side: BetSide,
    pub amount: u64,
    pub amount_to_pool: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub odds_at_bet: u16,
}

impl BetReceipt {
    pub fn new(market_id: u64, record: &BetRecord) -> Self {
        Self {
            market_id,
            sequence: record.sequence,
            side: record.side,
            amount: record.amount,
            amount_to_pool: record.amount_to_pool,
            platform_fee: record.platform_fee,
            creator_fee: record.creator_fee,
            odds_at_bet: record.odds_at_bet,
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionReceipt {
    pub market_id: u64,
    pub outcome: Outcome,
    pub yes_pool: u64,
    pub no_pool: u64,
    pub platform_fees: u64,
    /// Creator fees accrued over the market's life.
    pub creator_fees: u64,
    /// Part of `creator_fees` transferred during resolution. Zero when the
    /// creator wallet could not take the credit.
    pub creator_fees_released: u64,
    /// Winning bets entitled to claim.
    pub winning_bets: u64,
}

/// Read-only view of a market's committed state plus current odds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketSnapshot {
    pub market_id: u64,
    pub creator: Pubkey,
    pub end_date: i64,
    pub status: MarketStatus,
    pub resolved_outcome: Outcome,
    pub yes_pool: u64,
    pub no_pool: u64,
    pub yes_bet_count: u64,
    pub no_bet_count: u64,
    pub total_volume: u64,
    pub total_platform_fees: u64,
    pub total_creator_fees: u64,
    pub creator_fees_paid: u64,
    pub total_claimed: u64,
    pub remaining_winners: u64,
    pub total_refunded: u64,
    pub yes_odds_bps: u16,
    pub no_odds_bps: u16,
}
