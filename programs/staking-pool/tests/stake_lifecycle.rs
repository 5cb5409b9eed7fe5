use staking_pool::error::StakingError;
use staking_pool::state::{Staker, StakingPool};

const RATE: u64 = 10_000_000_000;

fn pool_at(slot: u64) -> StakingPool {
    StakingPool {
        reward_rate_per_slot: RATE,
        last_rewarded_slot: slot,
        ..Default::default()
    }
}

/// Ledger-level deposit: accrue, settle, credit, in the same order the
/// deposit handlers run. Returns the settled payout.
fn deposit(pool: &mut StakingPool, staker: &mut Staker, scaled: u64, slot: u64) -> u64 {
    pool.accrue(slot).unwrap();
    let acc = pool.acc_reward_per_share;
    let pending = staker.pending_rewards(acc).unwrap();
    staker.record_payout(pending).unwrap();
    staker.record_deposit(scaled, acc).unwrap();
    pool.total_scaled_amount += scaled;
    pending
}

/// Ledger-level withdrawal, mirroring the withdraw handlers.
fn withdraw(pool: &mut StakingPool, staker: &mut Staker, scaled: u64, slot: u64) -> u64 {
    pool.accrue(slot).unwrap();
    let acc = pool.acc_reward_per_share;
    let pending = staker.pending_rewards(acc).unwrap();
    staker.record_payout(pending).unwrap();
    staker.record_withdraw(scaled, acc).unwrap();
    pool.total_scaled_amount -= scaled;
    pending
}

fn pending_at(pool: &StakingPool, staker: &Staker, slot: u64) -> u64 {
    let projected = pool.projected_acc_reward_per_share(slot).unwrap();
    staker.pending_rewards(projected).unwrap()
}

// --- the sum invariant ---

#[test]
fn total_tracks_the_sum_of_positions() {
    let mut pool = pool_at(100);
    let mut a = Staker::default();
    let mut b = Staker::default();

    deposit(&mut pool, &mut a, 5_000_000, 101);
    assert_eq!(pool.total_scaled_amount, a.scaled_amount + b.scaled_amount);

    deposit(&mut pool, &mut b, 3_000_000, 102);
    assert_eq!(pool.total_scaled_amount, a.scaled_amount + b.scaled_amount);

    withdraw(&mut pool, &mut a, 2_000_000, 104);
    assert_eq!(pool.total_scaled_amount, a.scaled_amount + b.scaled_amount);

    deposit(&mut pool, &mut a, 7_000_000, 104);
    withdraw(&mut pool, &mut b, 3_000_000, 107);
    assert_eq!(pool.total_scaled_amount, a.scaled_amount + b.scaled_amount);
    assert_eq!(b.scaled_amount, 0);
}

// --- failure atomicity ---

#[test]
fn over_withdrawal_fails_and_leaves_the_position_unchanged() {
    let mut pool = pool_at(100);
    let mut staker = Staker::default();
    deposit(&mut pool, &mut staker, 5_000_000, 101);

    let scaled_before = staker.scaled_amount;
    let debt_before = staker.reward_debt;

    let acc = pool.acc_reward_per_share;
    assert_eq!(
        staker.record_withdraw(5_000_001, acc),
        Err(StakingError::InsufficientStake.into())
    );
    assert_eq!(staker.scaled_amount, scaled_before);
    assert_eq!(staker.reward_debt, debt_before);
}

// --- empty positions ---

#[test]
fn withdrawing_to_zero_is_equivalent_to_no_position() {
    let mut pool = pool_at(100);
    let mut staker = Staker::default();

    deposit(&mut pool, &mut staker, 5_000_000, 101);
    withdraw(&mut pool, &mut staker, 5_000_000, 103);
    assert_eq!(staker.scaled_amount, 0);
    assert_eq!(pool.total_scaled_amount, 0);

    // no accrual attributed to the emptied record, ever
    assert_eq!(pending_at(&pool, &staker, 200), 0);

    // and the record is re-usable like a fresh one
    deposit(&mut pool, &mut staker, 1_000_000, 205);
    assert_eq!(pending_at(&pool, &staker, 206), RATE);
}

#[test]
fn late_staker_earns_nothing_retroactively() {
    let mut pool = pool_at(100);
    let mut a = Staker::default();
    let mut b = Staker::default();

    deposit(&mut pool, &mut a, 10_000_000, 101);

    // B arrives ten slots later; the accumulator has grown but B's debt
    // snapshot cancels all of it
    let paid = deposit(&mut pool, &mut b, 10_000_000, 111);
    assert_eq!(paid, 0);
    assert_eq!(pending_at(&pool, &b, 111), 0);
}

// --- pro-rata distribution ---

#[test]
fn concurrent_stakers_split_rewards_pro_rata() {
    let mut pool = pool_at(100);
    let mut a = Staker::default();
    let mut b = Staker::default();

    // A alone for three slots, then a 60/40 split for three more
    deposit(&mut pool, &mut a, 600_000, 100);
    deposit(&mut pool, &mut b, 400_000, 103);

    assert_eq!(pending_at(&pool, &a, 106), RATE * 3 + RATE * 3 * 6 / 10);
    assert_eq!(pending_at(&pool, &b, 106), RATE * 3 * 4 / 10);
}

#[test]
fn interleaved_deposits_settle_the_shared_interval_pro_rata() {
    // A deposits 9.5 scaled at slot 101 (alone), B deposits 10.0 at 103,
    // A deposits again at 106. A's cumulative payout is two sole-staker
    // slots plus a 9.5/19.5 share of the three shared ones.
    let mut pool = pool_at(100);
    let mut a = Staker::default();
    let mut b = Staker::default();

    let scaled_a = 9_500_000u64;
    let scaled_b = 10_000_000u64;

    let mut a_received = deposit(&mut pool, &mut a, scaled_a, 101);
    deposit(&mut pool, &mut b, scaled_b, 103);
    a_received += deposit(&mut pool, &mut a, 10_000_000, 106);

    let expected = RATE * 2
        + ((RATE as u128) * 3 * (scaled_a as u128) / ((scaled_a + scaled_b) as u128)) as u64;
    assert_eq!(a_received, expected);
    assert_eq!(a.rewards_claimed, expected);
}
