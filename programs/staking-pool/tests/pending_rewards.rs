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

fn pending_at(pool: &StakingPool, staker: &Staker, slot: u64) -> u64 {
    let projected = pool.projected_acc_reward_per_share(slot).unwrap();
    staker.pending_rewards(projected).unwrap()
}

// --- zero positions ---

#[test]
fn zero_position_is_always_zero() {
    let pool = pool_at(100);
    let staker = Staker::default();
    assert_eq!(pending_at(&pool, &staker, 100), 0);
    assert_eq!(pending_at(&pool, &staker, 1_000_000), 0);
}

#[test]
fn non_staker_is_zero_even_against_a_grown_accumulator() {
    let mut pool = pool_at(100);
    let mut staker_a = Staker::default();
    deposit(&mut pool, &mut staker_a, 10_000_000, 101);
    pool.accrue(200).unwrap();

    let outsider = Staker::default();
    assert_eq!(outsider.pending_rewards(pool.acc_reward_per_share).unwrap(), 0);
}

// --- sole staker exactness ---

#[test]
fn sole_staker_earns_rate_times_elapsed() {
    let mut pool = pool_at(100);
    let mut staker = Staker::default();

    deposit(&mut pool, &mut staker, 10_000_000, 101);
    assert_eq!(pending_at(&pool, &staker, 106), RATE * 5);
}

#[test]
fn deposit_into_empty_pool_earns_nothing_for_the_empty_interval() {
    // pool idle from slot 100; the 9.5-unit deposit lands at 101 and the
    // forfeited slot is never backfilled
    let mut pool = pool_at(100);
    let mut staker = Staker::default();

    let paid = deposit(&mut pool, &mut staker, 9_500_000, 101);
    assert_eq!(paid, 0);
    assert_eq!(pool.last_rewarded_slot, 101);
    assert_eq!(pending_at(&pool, &staker, 101), 0);

    // four staked slots later: rate * 4, short at most one unit from the
    // accumulator floor
    let pending = pending_at(&pool, &staker, 105);
    assert!(pending <= RATE * 4);
    assert!(RATE * 4 - pending <= 1);
}

// --- conservation across settlements ---

#[test]
fn settled_plus_pending_equals_the_whole_emission() {
    let mut pool = pool_at(100);
    let mut staker = Staker::default();

    deposit(&mut pool, &mut staker, 10_000_000, 101);

    // the second deposit settles the first two slots
    let paid = deposit(&mut pool, &mut staker, 10_000_000, 103);
    assert_eq!(paid, RATE * 2);

    // three more slots on the doubled position
    assert_eq!(pending_at(&pool, &staker, 106), RATE * 3);
    assert_eq!(staker.rewards_claimed + pending_at(&pool, &staker, 106), RATE * 5);
}

#[test]
fn settlement_resets_pending_without_losing_anything() {
    let mut pool = pool_at(100);
    let mut staker = Staker::default();

    deposit(&mut pool, &mut staker, 10_000_000, 101);
    let before = pending_at(&pool, &staker, 104);

    // settling via a further deposit pays out exactly what was pending
    let paid = deposit(&mut pool, &mut staker, 1_000_000, 104);
    assert_eq!(paid, before);
    assert_eq!(pending_at(&pool, &staker, 104), 0);
}
