//! Integer math for fee splits and pro-rata payouts.
//!
//! Every multiplication widens to `u128` before dividing and every division
//! floors. Nothing here wraps: overflow surfaces as
//! `MarketError::ArithmeticOverflow`.

use crate::errors::MarketError;

/// 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Odds reported when neither side has any stake yet.
pub const EVEN_ODDS_BPS: u16 = 5_000;

/// Gross stake broken into its fee and pool components.
///
/// `platform_fee + creator_fee + amount_to_pool == amount` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeSplit {
    pub amount: u64,
    pub platform_fee: u64,
    pub creator_fee: u64,
    pub amount_to_pool: u64,
}

/// floor(a * b / denominator) computed in `u128`.
#[inline]
pub fn mul_div_floor(a: u64, b: u64, denominator: u64) -> Result<u64, MarketError> {
    let product = (a as u128)
        .checked_mul(b as u128)
        .ok_or(MarketError::ArithmeticOverflow)?;
    let quotient = product
        .checked_div(denominator as u128)
        .ok_or(MarketError::ArithmeticOverflow)?;
    u64::try_from(quotient).map_err(|_| MarketError::ArithmeticOverflow)
}

/// floor(amount * bps / 10_000)
#[inline]
pub fn bps_of(amount: u64, bps: u16) -> Result<u64, MarketError> {
    mul_div_floor(amount, bps as u64, BPS_DENOMINATOR)
}

/// Split a gross stake into platform fee, creator fee and the remainder that
/// goes to the pool. Both fees floor; the pool absorbs the rounding.
pub fn split_stake(
    amount: u64,
    platform_fee_bps: u16,
    creator_fee_bps: u16,
) -> Result<FeeSplit, MarketError> {
    let platform_fee = bps_of(amount, platform_fee_bps)?;
    let creator_fee = bps_of(amount, creator_fee_bps)?;
    let amount_to_pool = amount
        .checked_sub(platform_fee)
        .and_then(|rest| rest.checked_sub(creator_fee))
        .ok_or(MarketError::ArithmeticOverflow)?;

    Ok(FeeSplit {
        amount,
        platform_fee,
        creator_fee,
        amount_to_pool,
    })
}

/// `part`'s share of `total` in basis points, floored.
///
/// Returns `EVEN_ODDS_BPS` for an empty total.
pub fn share_bps(part: u64, total: u64) -> Result<u16, MarketError> {
    if total == 0 {
        return Ok(EVEN_ODDS_BPS);
    }
    let bps = mul_div_floor(part, BPS_DENOMINATOR, total)?;
    u16::try_from(bps).map_err(|_| MarketError::ArithmeticOverflow)
}

/// Pro-rata winnings for a stake: the stake itself plus its proportional
/// share of the losing pool.
///
///   payout = stake + floor(stake * losing_pool / winning_pool)
///
/// Caller must reject `winning_pool == 0` first.
pub fn pro_rata_payout(
    stake: u64,
    losing_pool: u64,
    winning_pool: u64,
) -> Result<u64, MarketError> {
    let winnings = mul_div_floor(stake, losing_pool, winning_pool)?;
    stake
        .checked_add(winnings)
        .ok_or(MarketError::ArithmeticOverflow)
}

/// Whether crediting `amount` to an account holding `balance` leaves it at
/// or above `rent_floor`. A zero credit never changes the account.
pub fn credit_keeps_rent_exempt(balance: u64, amount: u64, rent_floor: u64) -> bool {
    amount == 0 || balance as u128 + amount as u128 >= rent_floor as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn split_three_percent() {
        let split = split_stake(1_000_000_000, 200, 100).unwrap();
        assert_eq!(split.platform_fee, 20_000_000);
        assert_eq!(split.creator_fee, 10_000_000);
        assert_eq!(split.amount_to_pool, 970_000_000);
    }

    #[test]
    fn split_floors_fees_and_pool_absorbs_dust() {
        // 333 * 150 / 10_000 = 4.995 -> 4
        let split = split_stake(333, 150, 150).unwrap();
        assert_eq!(split.platform_fee, 4);
        assert_eq!(split.creator_fee, 4);
        assert_eq!(split.amount_to_pool, 325);
    }

    #[test]
    fn split_full_fee_leaves_nothing_for_pool() {
        let split = split_stake(10_000, 6_000, 4_000).unwrap();
        assert_eq!(split.amount_to_pool, 0);
    }

    #[test]
    fn split_u64_max_does_not_overflow() {
        let split = split_stake(u64::MAX, 10_000, 0).unwrap();
        assert_eq!(split.platform_fee, u64::MAX);
        assert_eq!(split.amount_to_pool, 0);
    }

    #[test]
    fn share_of_empty_total_is_even() {
        assert_eq!(share_bps(0, 0).unwrap(), EVEN_ODDS_BPS);
        assert_eq!(share_bps(1, 4).unwrap(), 2_500);
        assert_eq!(share_bps(7, 7).unwrap(), 10_000);
    }

    #[test]
    fn pro_rata_zero_winning_pool_is_an_error() {
        assert!(matches!(
            pro_rata_payout(10, 10, 0),
            Err(MarketError::ArithmeticOverflow)
        ));
    }

    #[test]
    fn pro_rata_overflow_is_caught() {
        assert!(matches!(
            pro_rata_payout(u64::MAX, u64::MAX, 1),
            Err(MarketError::ArithmeticOverflow)
        ));
    }

    #[test]
    fn credit_below_rent_floor_into_empty_account_is_refused() {
        let floor = 890_880;
        assert!(!credit_keeps_rent_exempt(0, 20_000, floor));
        assert!(credit_keeps_rent_exempt(0, floor, floor));
        assert!(credit_keeps_rent_exempt(floor, 1, floor));
        assert!(credit_keeps_rent_exempt(870_880, 20_000, floor));
        assert!(credit_keeps_rent_exempt(0, 0, floor));
        assert!(credit_keeps_rent_exempt(u64::MAX, u64::MAX, floor));
    }

    proptest! {
        #[test]
        fn fee_split_is_exact(
            amount in any::<u64>(),
            platform in 0u16..=10_000,
            creator_frac in 0u16..=10_000,
        ) {
            let creator = ((10_000 - platform) as u32 * creator_frac as u32 / 10_000) as u16;
            let split = split_stake(amount, platform, creator).unwrap();
            prop_assert_eq!(
                split.platform_fee as u128 + split.creator_fee as u128 + split.amount_to_pool as u128,
                amount as u128
            );
        }

        #[test]
        fn pro_rata_never_exceeds_total_pool(
            stake in 1u64..1_000_000_000_000,
            extra in 0u64..1_000_000_000_000,
            losing in 0u64..1_000_000_000_000,
        ) {
            let winning = stake + extra;
            let payout = pro_rata_payout(stake, losing, winning).unwrap();
            prop_assert!(payout >= stake);
            prop_assert!(payout <= winning + losing);
        }
    }
}
