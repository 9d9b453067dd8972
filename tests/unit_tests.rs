//! Transition scenarios through the public entry point
//! Run with: cargo test

use utxo_amm::*;

const NOW: u64 = 1_700_000_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ctx(authorized: bool) -> TransitionContext {
    EngineConfig::default().context(NOW, authorized)
}

fn empty_pool() -> PoolState {
    PoolState::uninitialized(
        AssetClass::new(PolicyId([0xa1; 28]), AssetName::from(&b"TOKEN"[..])),
        AssetClass::new(PolicyId([0xb2; 28]), AssetName::from(&b"TOKEN_LP"[..])),
        Identity([0xc3; 28]),
        0,
    )
}

fn create(ada: u64, token: u64) -> PoolState {
    let action = Action::CreatePool {
        initial_ada: ada,
        initial_token: token,
        fee_bps: 30,
    };
    validate_transition(&empty_pool(), &action, &ctx(true)).unwrap().pool
}

/// Reserves used by the reference swap scenarios
fn reference_pool() -> PoolState {
    create(100_000_000_000, 2_301_952_000_000)
}

fn swap(amount_in: u64, direction: SwapDirection, min_out: u64) -> Action {
    Action::Swap {
        amount_in,
        direction,
        min_out,
        deadline: NOW + 60,
    }
}

fn add(ada_amount: u64, token_amount: u64) -> Action {
    Action::AddLiquidity {
        ada_amount,
        token_amount,
        min_lp_out: 0,
        deadline: NOW + 60,
    }
}

fn remove(lp_amount: u64) -> Action {
    Action::RemoveLiquidity {
        lp_amount,
        min_ada_out: 0,
        min_token_out: 0,
        deadline: NOW + 60,
    }
}

fn swapped(post: &PostState) -> SwapResult {
    match post.outcome {
        Outcome::Swapped(result) => result,
        other => panic!("expected a swap outcome, got {:?}", other),
    }
}

// ============================================================================
// Swaps
// ============================================================================

#[test]
fn test_ada_to_token_reference_swap() {
    init_logging();
    let pool = reference_pool();

    let post = validate_transition(&pool, &swap(1_000_000, SwapDirection::AdaToToken, 0), &ctx(false)).unwrap();
    let result = swapped(&post);

    assert!(result.amount_out > 22_000_000 && result.amount_out < 25_000_000);
    assert_eq!(post.pool.ada_reserve, pool.ada_reserve + 1_000_000);
    assert_eq!(post.pool.token_reserve, pool.token_reserve - result.amount_out);
    assert!(post.pool.k() >= pool.k());
}

#[test]
fn test_token_to_ada_reference_swap() {
    init_logging();
    let pool = reference_pool();

    let post = validate_transition(&pool, &swap(23_019_520, SwapDirection::TokenToAda, 0), &ctx(false)).unwrap();
    let result = swapped(&post);

    assert!(result.amount_out > 900_000 && result.amount_out < 1_000_000);
    assert!(post.pool.k() >= pool.k());
}

#[test]
fn test_zero_swap_is_invalid() {
    let pool = reference_pool();
    let snapshot = pool.clone();

    for direction in [SwapDirection::AdaToToken, SwapDirection::TokenToAda] {
        assert_eq!(
            validate_transition(&pool, &swap(0, direction, 0), &ctx(false)),
            Err(TransitionError::InvalidAmount)
        );
    }
    assert_eq!(pool, snapshot);
}

#[test]
fn test_swap_slippage_rejected_without_mutation() {
    let pool = reference_pool();
    let snapshot = pool.clone();

    let err = validate_transition(
        &pool,
        &swap(1_000_000, SwapDirection::AdaToToken, 25_000_000),
        &ctx(false),
    )
    .unwrap_err();

    assert!(matches!(err, TransitionError::SlippageExceeded { minimum: 25_000_000, .. }));
    assert_eq!(pool, snapshot);
}

#[test]
fn test_swap_after_deadline() {
    let pool = reference_pool();
    let action = Action::Swap {
        amount_in: 1_000_000,
        direction: SwapDirection::AdaToToken,
        min_out: 0,
        deadline: NOW - 1,
    };

    assert_eq!(
        validate_transition(&pool, &action, &ctx(false)),
        Err(TransitionError::DeadlineExceeded {
            deadline: NOW - 1,
            current_time: NOW,
        })
    );
}

#[test]
fn test_swap_cannot_drain_ada_below_floor() {
    // Thin ADA side: a large token sale would leave less than the floor
    let pool = create(2_000_000, 1_000_000_000);
    let err = validate_transition(&pool, &swap(500_000_000, SwapDirection::TokenToAda, 0), &ctx(false))
        .unwrap_err();

    assert!(matches!(err, TransitionError::PoolUnderfunded { .. }));
}

#[test]
fn test_quote_matches_validated_swap() {
    let pool = reference_pool();
    let preview = quote_swap(&pool, 5_000_000, SwapDirection::AdaToToken).unwrap();
    let min_out = min_out_with_tolerance(preview.amount_out, 50);

    let post = validate_transition(&pool, &swap(5_000_000, SwapDirection::AdaToToken, min_out), &ctx(false)).unwrap();
    assert_eq!(swapped(&post).amount_out, preview.amount_out);
}

// ============================================================================
// Liquidity
// ============================================================================

#[test]
fn test_initial_deposit_mints_sqrt_supply() {
    let pool = create(1_000_000_000, 2_301_952_000_000);

    assert_eq!(pool.lp_total_supply, 47_978_661_923);
    assert_eq!(pool.ada_reserve, 1_000_000_000);
    assert_eq!(pool.token_reserve, 2_301_952_000_000);
    assert_eq!(pool.phase(), PoolPhase::Active);
}

#[test]
fn test_add_liquidity_outcome() {
    let pool = create(4_000_000, 9_000_000);
    let post = validate_transition(&pool, &add(40_000, 90_000), &ctx(false)).unwrap();

    assert_eq!(
        post.outcome,
        Outcome::LiquidityAdded(Deposit {
            lp_minted: 60_000,
            new_ada_reserve: 4_040_000,
            new_token_reserve: 9_090_000,
            new_lp_supply: 6_060_000,
        })
    );
    assert_eq!(post.pool.lp_total_supply, 6_060_000);
}

#[test]
fn test_add_liquidity_min_lp_out() {
    let pool = create(4_000_000, 9_000_000);
    let action = Action::AddLiquidity {
        ada_amount: 40_000,
        token_amount: 90_000,
        min_lp_out: 60_001,
        deadline: NOW,
    };

    assert_eq!(
        validate_transition(&pool, &action, &ctx(false)),
        Err(TransitionError::SlippageExceeded { minimum: 60_001, actual: 60_000 })
    );
}

#[test]
fn test_round_trip_loss_is_one_unit_on_cheap_side() {
    // One LP unit is worth ~0.02 ADA and ~48 tokens here
    let pool = create(1_000_000_000, 2_301_952_000_000);

    let added = validate_transition(&pool, &add(1_000_000, 2_301_952_000), &ctx(false)).unwrap();
    let minted = match added.outcome {
        Outcome::LiquidityAdded(deposit) => deposit.lp_minted,
        other => panic!("unexpected outcome {:?}", other),
    };

    let removed = validate_transition(&added.pool, &remove(minted), &ctx(false)).unwrap();
    let withdrawal = match removed.outcome {
        Outcome::LiquidityRemoved(withdrawal) => withdrawal,
        other => panic!("unexpected outcome {:?}", other),
    };

    assert!(withdrawal.ada_out <= 1_000_000);
    assert!(1_000_000 - withdrawal.ada_out <= 1);

    let per_lp_unit = added.pool.token_reserve.div_ceil(added.pool.lp_total_supply);
    assert!(withdrawal.token_out <= 2_301_952_000);
    assert!(2_301_952_000 - withdrawal.token_out <= per_lp_unit);
}

#[test]
fn test_full_withdrawal_drains_to_zero() {
    let pool = create(4_000_000, 9_000_000);
    let post = validate_transition(&pool, &remove(pool.lp_total_supply), &ctx(false)).unwrap();

    assert_eq!((post.pool.ada_reserve, post.pool.token_reserve), (0, 0));
    assert_eq!(post.pool.lp_total_supply, 0);
    assert_eq!(post.pool.phase(), PoolPhase::Uninitialized);
}

#[test]
fn test_drained_pool_only_accepts_create() {
    let pool = create(4_000_000, 9_000_000);
    let drained = validate_transition(&pool, &remove(pool.lp_total_supply), &ctx(false))
        .unwrap()
        .pool;

    assert_eq!(
        validate_transition(&drained, &add(1_000_000, 1_000_000), &ctx(false)),
        Err(TransitionError::InvalidTransition {
            phase: PoolPhase::Uninitialized,
            action: ActionKind::AddLiquidity,
        })
    );

    let revived = validate_transition(
        &drained,
        &Action::CreatePool {
            initial_ada: 5_000_000,
            initial_token: 5_000_000,
            fee_bps: 10,
        },
        &ctx(true),
    )
    .unwrap();
    assert_eq!(revived.pool.lp_total_supply, 5_000_000);
    assert_eq!(revived.pool.fee_bps, 10);
}

#[test]
fn test_partial_withdrawal_below_floor_rejected() {
    let pool = create(2_000_000, 2_000_000);
    let floor = engine_floor(&pool);
    assert!(floor > 1_800_000 && floor < 1_900_000);

    let err = validate_transition(&pool, &remove(200_000), &ctx(false)).unwrap_err();
    assert_eq!(
        err,
        TransitionError::PoolUnderfunded {
            required: floor,
            available: 1_800_000,
        }
    );

    // A smaller withdrawal that stays above the floor goes through
    assert!(validate_transition(&pool, &remove(50_000), &ctx(false)).is_ok());
}

fn engine_floor(pool: &PoolState) -> u64 {
    calculate_min_reserve(pool.asset_count(), pool.state_size_bytes(), &MinReserveProfile::default()).unwrap()
}

#[test]
fn test_remove_more_than_supply() {
    let pool = create(4_000_000, 9_000_000);
    assert_eq!(
        validate_transition(&pool, &remove(pool.lp_total_supply + 1), &ctx(false)),
        Err(TransitionError::InvalidAmount)
    );
}

// ============================================================================
// Admin and lifecycle
// ============================================================================

#[test]
fn test_paused_pool_rejects_everything_but_unpause() {
    init_logging();
    let pool = reference_pool();
    let paused = validate_transition(&pool, &Action::Pause, &ctx(true)).unwrap().pool;
    let snapshot = paused.clone();

    let blocked = [
        swap(1_000_000, SwapDirection::AdaToToken, 0),
        add(1_000_000, 23_019_520),
        remove(1_000),
        Action::CreatePool {
            initial_ada: 1,
            initial_token: 1,
            fee_bps: 30,
        },
        Action::Pause,
    ];
    for action in blocked.iter() {
        assert_eq!(
            validate_transition(&paused, action, &ctx(true)),
            Err(TransitionError::PoolPaused),
            "{:?} must be blocked while paused",
            action
        );
    }
    assert_eq!(paused, snapshot);

    let resumed = validate_transition(&paused, &Action::Unpause, &ctx(true)).unwrap();
    assert_eq!(resumed.pool.status, PoolStatus::Active);
}

#[test]
fn test_admin_actions_require_authorization() {
    let pool = reference_pool();
    assert_eq!(
        validate_transition(&pool, &Action::Pause, &ctx(false)),
        Err(TransitionError::Unauthorized)
    );

    let create = Action::CreatePool {
        initial_ada: 10_000_000,
        initial_token: 10_000_000,
        fee_bps: 30,
    };
    assert_eq!(
        validate_transition(&empty_pool(), &create, &ctx(false)),
        Err(TransitionError::Unauthorized)
    );
}

#[test]
fn test_swap_on_uninitialized_pool() {
    assert_eq!(
        validate_transition(&empty_pool(), &swap(1, SwapDirection::AdaToToken, 0), &ctx(false)),
        Err(TransitionError::InvalidTransition {
            phase: PoolPhase::Uninitialized,
            action: ActionKind::Swap,
        })
    );
}

#[test]
fn test_identity_mismatch_in_pre_state() {
    let mut pool = reference_pool();
    pool.identity_token_count = 0;

    assert_eq!(
        validate_transition(&pool, &swap(1_000, SwapDirection::AdaToToken, 0), &ctx(false)),
        Err(TransitionError::IdentityMismatch { count: 0 })
    );
}

#[test]
fn test_config_fields_survive_every_action() {
    let pool = reference_pool();
    let actions = [
        swap(1_000_000, SwapDirection::AdaToToken, 0),
        add(1_000_000, 23_019_520),
        remove(1_000_000),
        Action::Pause,
    ];

    for action in actions.iter() {
        let post = validate_transition(&pool, action, &ctx(true)).unwrap().pool;
        assert_eq!(post.fee_bps, pool.fee_bps);
        assert_eq!(post.protocol_fee_bps, pool.protocol_fee_bps);
        assert_eq!(post.token_id, pool.token_id);
        assert_eq!(post.lp_token_id, pool.lp_token_id);
        assert_eq!(post.admin, pool.admin);
        assert_eq!(post.identity_token_count, 1);
    }
}
