//! Property-based fuzzing of the market ledger.
//!
//! Increase cases: PROPTEST_CASES=2000 cargo test --test fuzzing
//!
//! Every generated run places an arbitrary bet sequence, resolves (or
//! cancels), then settles every record in a shuffled order while checking:
//! - fee exactness per record and ledger balance after every bet
//! - no mutation on any rejected operation
//! - no double claims
//! - exact conservation once every winner has claimed

use anchor_lang::prelude::Pubkey;
use parimutuel_markets::errors::MarketError;
use parimutuel_markets::state::*;
use proptest::prelude::*;

const NOW: i64 = 1_700_000_000;
const END: i64 = NOW + 3_600;
const BETTORS: usize = 4;

#[derive(Clone, Debug)]
struct BetAction {
    bettor: usize,
    yes: bool,
    amount: u64,
}

fn bet_strategy() -> impl Strategy<Value = BetAction> {
    (0..BETTORS, any::<bool>(), 1u64..5_000_000_000).prop_map(|(bettor, yes, amount)| BetAction {
        bettor,
        yes,
        amount,
    })
}

/// Bets plus a shuffled claim order over their indices.
fn run_strategy() -> impl Strategy<Value = (Vec<BetAction>, Vec<usize>)> {
    prop::collection::vec(bet_strategy(), 0..40).prop_flat_map(|bets| {
        let order: Vec<usize> = (0..bets.len()).collect();
        (Just(bets), Just(order).prop_shuffle())
    })
}

fn fee_strategy() -> impl Strategy<Value = (u16, u16)> {
    (0u16..=10_000).prop_flat_map(|platform| (Just(platform), 0u16..=(10_000 - platform)))
}

fn params(platform_fee_bps: u16, creator_fee_bps: u16) -> GlobalParameters {
    GlobalParameters {
        min_bet: 1,
        max_bet: 4_000_000_000,
        platform_fee_bps,
        creator_fee_bps,
        min_duration: 60,
        max_duration: 86_400,
        dispute_window: 0,
    }
}

struct FuzzState {
    key: Pubkey,
    creator: Pubkey,
    bettors: Vec<Pubkey>,
    params: GlobalParameters,
    market: Market,
    records: Vec<BetRecord>,
}

impl FuzzState {
    fn new(params: GlobalParameters) -> Self {
        let creator = Pubkey::new_unique();
        let market = Market::open(1, creator, "fuzz".into(), END, &params, NOW).unwrap();
        Self {
            key: Pubkey::new_unique(),
            creator,
            bettors: (0..BETTORS).map(|_| Pubkey::new_unique()).collect(),
            params,
            market,
            records: Vec::new(),
        }
    }

    /// Place a bet; a rejected bet must leave the market untouched.
    fn place(&mut self, action: &BetAction) -> Result<(), TestCaseError> {
        let side = if action.yes { BetSide::Yes } else { BetSide::No };
        let before = self.market.clone();
        match self.market.place_bet(
            &self.params,
            self.key,
            self.bettors[action.bettor],
            side,
            action.amount,
            NOW,
        ) {
            Ok(record) => {
                prop_assert_eq!(
                    record.platform_fee + record.creator_fee + record.amount_to_pool,
                    record.amount
                );
                prop_assert_eq!(record.sequence, self.records.len() as u64);
                self.records.push(record);
            }
            Err(err) => {
                prop_assert!(matches!(err, MarketError::BetTooLarge), "unexpected {:?}", err);
                prop_assert_eq!(&self.market, &before);
            }
        }
        prop_assert!(self.market.ledger_balanced());
        Ok(())
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fuzz_settlement_conserves_pool(
        (platform, creator) in fee_strategy(),
        (bets, order) in run_strategy(),
        outcome_yes in any::<bool>(),
    ) {
        let mut state = FuzzState::new(params(platform, creator));
        for action in &bets {
            state.place(action)?;
        }

        let outcome = if outcome_yes { Outcome::Yes } else { Outcome::No };
        let winning_side = outcome.winning_side().unwrap();
        let receipt = state
            .market
            .resolve(outcome, &state.creator, &Pubkey::default(), END)
            .unwrap();
        prop_assert_eq!(receipt.winning_bets, state.market.bet_count(winning_side));

        let total_pool = state.market.yes_pool + state.market.no_pool;
        let winning_pool = state.market.pool(winning_side);
        let mut paid: u64 = 0;

        let record_count = state.records.len();
        for &i in order.iter().filter(|&&i| i < record_count) {
            let mut record = state.records[i].clone();
            let owner = record.bettor;
            let odds = record.odds_at_bet;

            // A stranger never gets paid.
            let before = state.market.clone();
            let stranger = Pubkey::new_unique();
            let err = state.market.claim_payout(&state.key, &mut record, &stranger).unwrap_err();
            prop_assert!(matches!(err, MarketError::Unauthorized));
            prop_assert_eq!(&state.market, &before);

            match state.market.claim_payout(&state.key, &mut record, &owner) {
                Ok(payout) => {
                    prop_assert_eq!(record.side, winning_side);
                    prop_assert!(record.claimed);
                    paid += payout;

                    let again = state.market.claim_payout(&state.key, &mut record, &owner);
                    prop_assert!(matches!(again, Err(MarketError::AlreadyClaimed)));
                }
                Err(MarketError::BetLost) => {
                    prop_assert_ne!(record.side, winning_side);
                    prop_assert_eq!(&state.market, &before);
                }
                Err(MarketError::NoWinnersCannotClaim) => {
                    prop_assert_eq!(winning_pool, 0);
                    prop_assert_eq!(&state.market, &before);
                }
                Err(other) => prop_assert!(false, "unexpected claim error {:?}", other),
            }

            prop_assert_eq!(record.odds_at_bet, odds);
            prop_assert!(state.market.total_claimed <= total_pool);
            state.records[i] = record;
        }

        prop_assert_eq!(paid, state.market.total_claimed);
        if winning_pool > 0 {
            prop_assert_eq!(state.market.total_claimed, total_pool);
            prop_assert_eq!(state.market.remaining_winners, 0);
        } else {
            prop_assert_eq!(state.market.total_claimed, 0);
        }
        prop_assert!(state.market.ledger_balanced());
    }

    #[test]
    fn fuzz_cancellation_refunds_volume(
        (platform, creator) in fee_strategy(),
        (bets, order) in run_strategy(),
    ) {
        let mut state = FuzzState::new(params(platform, creator));
        for action in &bets {
            state.place(action)?;
        }

        state.market.cancel(&state.creator, &Pubkey::default()).unwrap();

        let mut refunded: u64 = 0;
        let record_count = state.records.len();
        for &i in order.iter().filter(|&&i| i < record_count) {
            let mut record = state.records[i].clone();
            let owner = record.bettor;
            refunded += state.market.claim_refund(&state.key, &mut record, &owner).unwrap();

            let before = state.market.clone();
            let again = state.market.claim_refund(&state.key, &mut record, &owner);
            prop_assert!(matches!(again, Err(MarketError::AlreadyClaimed)));
            prop_assert_eq!(&state.market, &before);
        }

        prop_assert_eq!(refunded, state.market.total_volume);
        prop_assert_eq!(state.market.total_refunded, state.market.total_volume);
        prop_assert_eq!(state.market.total_claimed, 0);
    }

    #[test]
    fn fuzz_bets_after_end_or_close_are_rejected(
        bets in prop::collection::vec(bet_strategy(), 1..10),
        late in 0i64..10_000,
    ) {
        let mut state = FuzzState::new(params(250, 50));
        for action in &bets {
            let before = state.market.clone();
            let side = if action.yes { BetSide::Yes } else { BetSide::No };
            let err = state
                .market
                .place_bet(&state.params, state.key, state.bettors[action.bettor], side, action.amount, END + late)
                .unwrap_err();
            prop_assert!(matches!(err, MarketError::MarketEnded));
            prop_assert_eq!(&state.market, &before);
        }

        state.market.resolve(Outcome::Yes, &state.creator, &Pubkey::default(), END).unwrap();
        let action = &bets[0];
        let err = state
            .market
            .place_bet(&state.params, state.key, state.bettors[action.bettor], BetSide::Yes, action.amount, NOW)
            .unwrap_err();
        prop_assert!(matches!(err, MarketError::MarketNotActive));
    }
}
