//! Tests for the composite plus basket

use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv};
use odra::prelude::*;
use crate::composite::composite_plus::{CompositePlusHostRef, CompositePlusInitArgs};
use crate::composite::{CompositeError, CompositePlus};
use crate::errors::VaultError;
use crate::math::WAD;
use crate::mocks::{ReentrantToken, ReentrantTokenInitArgs};
use crate::testing::{assert_close, wad, PlusSetup};

struct Basket {
    composite: CompositePlusHostRef,
    usdc: PlusSetup,
    dai: PlusSetup,
    wbtc: PlusSetup,
    governance: Address,
    strategist: Address,
    user1: Address,
    user2: Address,
}

impl Basket {
    fn address(&self) -> Address {
        self.composite.address().clone()
    }
}

/// Three single plus vaults; the composite supports the USDC and DAI ones
fn setup(env: &HostEnv) -> Basket {
    let governance = env.get_account(0);
    env.set_caller(governance);

    let usdc = PlusSetup::deploy(env, "USDC", 6);
    let dai = PlusSetup::deploy(env, "DAI", 18);
    let wbtc = PlusSetup::deploy(env, "WBTC", 8);

    let mut composite = CompositePlus::deploy(
        env,
        CompositePlusInitArgs {
            name: String::from("Stable Plus"),
            symbol: String::from("SP"),
        },
    );
    composite.add_token(usdc.address());
    composite.add_token(dai.address());
    let strategist = env.get_account(1);
    composite.set_strategist(strategist, true);

    Basket {
        composite,
        usdc,
        dai,
        wbtc,
        governance,
        strategist,
        user1: env.get_account(2),
        user2: env.get_account(3),
    }
}

/// Deposit underlying into a single vault and approve the composite to pull
/// the credited value. Leaves `user` as the caller.
fn join(env: &HostEnv, plus: &mut PlusSetup, composite: Address, user: Address, value: &str) -> U256 {
    let credited = plus.deposit(env, user, value);
    plus.plus.approve(composite, credited);
    credited
}

/// user1 holds 50 composite: 20 from USDC+ and 30 from DAI+
fn seed(env: &HostEnv, basket: &mut Basket) {
    let composite = basket.address();
    let user1 = basket.user1;
    let usdc_value = join(env, &mut basket.usdc, composite, user1, "20");
    let dai_value = join(env, &mut basket.dai, composite, user1, "30");

    let minted = basket.composite.mint(
        vec![basket.usdc.address(), basket.dai.address()],
        vec![usdc_value, dai_value],
    );
    assert_eq!(minted, wad("50"));
}

/// Seed, invest both vaults, accrue 2 USDC and 8 DAI of yield and rebase
/// everything so the composite index reaches 1.2. Then user2 joins with 6 DAI.
fn seed_with_yield(env: &HostEnv, basket: &mut Basket) {
    seed(env, basket);

    env.set_caller(basket.governance);
    basket.usdc.plus.invest();
    basket.dai.plus.invest();
    basket.usdc.accrue("2");
    basket.dai.accrue("8");
    basket.usdc.plus.rebase();
    basket.dai.plus.rebase();
    basket.composite.rebase();
    assert_eq!(basket.composite.index(), wad("1.2"));

    let composite = basket.address();
    let user2 = basket.user2;
    let value = join(env, &mut basket.dai, composite, user2, "6");
    basket.composite.mint(vec![basket.dai.address()], vec![value]);

    assert_eq!(basket.composite.total_supply(), wad("66"));
    assert_eq!(basket.composite.total_shares(), wad("55"));
    assert_eq!(basket.composite.user_share(user2), wad("5"));
    assert_eq!(basket.composite.balance_of(user2), wad("6"));
}

#[test]
fn test_initialization() {
    let env = odra_test::env();
    let basket = setup(&env);

    assert_eq!(basket.composite.name(), "Stable Plus");
    assert_eq!(basket.composite.symbol(), "SP");
    assert_eq!(basket.composite.decimals(), 18);
    assert_eq!(basket.composite.total_supply(), U256::zero());
    assert_eq!(basket.composite.index(), U256::from(WAD));
    assert_eq!(basket.composite.governance(), basket.governance);
    assert!(basket.composite.is_strategist(basket.strategist));

    assert_eq!(
        basket.composite.token_list(),
        vec![basket.usdc.address(), basket.dai.address()]
    );
    assert!(basket.composite.token_supported(basket.dai.address()));
    assert!(!basket.composite.token_supported(basket.wbtc.address()));
}

#[test]
fn test_mint_at_initial_index() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);

    let user1 = basket.user1;
    assert_eq!(basket.composite.index(), U256::from(WAD));
    assert_eq!(basket.composite.balance_of(user1), wad("50"));
    assert_eq!(basket.composite.user_share(user1), wad("50"));
    assert_eq!(basket.composite.total_supply(), wad("50"));
    assert_eq!(basket.composite.total_shares(), wad("50"));

    let composite = basket.address();
    assert_eq!(basket.usdc.plus.balance_of(composite), wad("20"));
    assert_eq!(basket.dai.plus.balance_of(composite), wad("30"));
    assert_eq!(basket.usdc.plus.balance_of(user1), U256::zero());
}

#[test]
fn test_harvest_raises_index() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);

    let user1 = basket.user1;
    env.set_caller(basket.strategist);
    // The single vaults have their own strategist sets
    assert_eq!(
        basket.dai.plus.try_invest(),
        Err(VaultError::NotStrategist.into())
    );

    env.set_caller(basket.governance);
    basket.usdc.plus.invest();
    basket.dai.plus.invest();
    let gained = basket.dai.plus.harvest();
    assert_eq!(gained, wad("6"));
    basket.composite.rebase();

    assert_eq!(basket.composite.index(), wad("1.12"));
    assert_eq!(basket.composite.balance_of(user1), wad("56"));
    assert_eq!(basket.composite.user_share(user1), wad("50"));
    assert_eq!(basket.composite.total_supply(), wad("56"));

    let composite = basket.address();
    let user2 = basket.user2;
    let value = join(&env, &mut basket.dai, composite, user2, "5.6");
    assert_eq!(value, wad("5.6"));
    let user1_before = basket.composite.balance_of(user1);
    assert_eq!(
        basket.composite.get_mint_amount(
            vec![basket.dai.address(), basket.usdc.address()],
            vec![value, U256::zero()]
        ),
        wad("5.6")
    );
    basket.composite.mint(
        vec![basket.dai.address(), basket.usdc.address()],
        vec![value, U256::zero()],
    );

    assert_eq!(basket.composite.index(), wad("1.12"));
    assert_close(basket.composite.balance_of(user2), wad("5.6"));
    assert_close(basket.composite.user_share(user2), wad("5"));
    assert_close(basket.composite.total_supply(), wad("61.6"));
    assert_close(basket.composite.total_shares(), wad("55"));
    // Minting above index 1 leaves existing holders untouched
    assert_eq!(basket.composite.balance_of(user1), user1_before);
    assert_eq!(basket.composite.user_share(user1), wad("50"));
}

#[test]
fn test_rebase_spreads_loss() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);

    let composite = basket.address();
    let (user1, user2) = (basket.user1, basket.user2);
    let value = join(&env, &mut basket.dai, composite, user2, "10");
    basket.composite.mint(vec![basket.dai.address()], vec![value]);
    assert_eq!(basket.composite.total_supply(), wad("60"));

    env.set_caller(basket.governance);
    basket.dai.plus.invest();
    basket.dai.slash("6");
    basket.dai.plus.rebase();
    assert_eq!(basket.dai.plus.index(), wad("0.85"));
    basket.composite.rebase();

    assert_eq!(basket.composite.total_supply(), wad("54"));
    assert_eq!(basket.composite.index(), wad("0.9"));
    assert_eq!(basket.composite.balance_of(user1), wad("45"));
    assert_eq!(basket.composite.balance_of(user2), wad("9"));
    assert_eq!(basket.composite.user_share(user1), wad("50"));
    assert_eq!(basket.composite.user_share(user2), wad("10"));
    assert_eq!(basket.composite.total_shares(), wad("60"));
}

#[test]
fn test_reentrant_constituent_is_rejected() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);
    let composite = basket.address();

    env.set_caller(basket.governance);
    let mut hook = ReentrantToken::deploy(
        &env,
        ReentrantTokenInitArgs {
            name: String::from("Hook"),
            symbol: String::from("HOOK"),
        },
    );
    hook.set_target(composite);
    let hook_address = hook.address().clone();
    basket.composite.add_token(hook_address);

    let user2 = basket.user2;
    hook.mint(user2, wad("5"));
    env.set_caller(user2);
    hook.approve(composite, wad("5"));

    assert_eq!(
        basket.composite.try_mint(vec![hook_address], vec![wad("5")]),
        Err(VaultError::Reentrant.into())
    );
    assert_eq!(basket.composite.total_supply(), wad("50"));
    assert_eq!(basket.composite.total_shares(), wad("50"));
    assert_eq!(basket.composite.user_share(user2), U256::zero());
    assert_eq!(hook.balance_of(user2), wad("5"));
    assert_eq!(hook.balance_of(composite), U256::zero());

    // The failed call leaves the vault unlocked
    basket.composite.rebase();
    assert_eq!(basket.composite.index(), U256::from(WAD));
}

#[test]
fn test_mint_amount_ignores_order() {
    let env = odra_test::env();
    let basket = setup(&env);
    let (usdc, dai) = (basket.usdc.address(), basket.dai.address());

    let forward = basket
        .composite
        .get_mint_amount(vec![usdc, dai], vec![wad("1.5"), wad("2")]);
    let backward = basket
        .composite
        .get_mint_amount(vec![dai, usdc], vec![wad("2"), wad("1.5")]);
    assert_eq!(forward, wad("3.5"));
    assert_eq!(forward, backward);
}

#[test]
fn test_mint_rejects_bad_input() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let (usdc, dai, wbtc) = (
        basket.usdc.address(),
        basket.dai.address(),
        basket.wbtc.address(),
    );
    env.set_caller(basket.user1);

    assert_eq!(
        basket.composite.try_mint(vec![usdc, dai], vec![wad("1")]),
        Err(VaultError::LengthMismatch.into())
    );
    assert_eq!(
        basket.composite.try_mint(vec![wbtc], vec![wad("1")]),
        Err(CompositeError::TokenNotExists.into())
    );
    assert_eq!(
        basket.composite.try_mint(vec![usdc, dai], vec![U256::zero(), U256::zero()]),
        Err(VaultError::InvalidAmount.into())
    );
    assert_eq!(
        basket.composite.try_mint(vec![], vec![]),
        Err(VaultError::InvalidAmount.into())
    );
}

#[test]
fn test_redeem_partial() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed_with_yield(&env, &mut basket);

    let user2 = basket.user2;
    env.set_caller(user2);
    let quote = basket.composite.get_redeem_amount(wad("2.4"));
    assert_eq!(quote.tokens, vec![basket.usdc.address(), basket.dai.address()]);
    assert_eq!(quote.shares, wad("2"));
    assert_eq!(quote.value, wad("2.4"));
    assert_eq!(quote.fee, U256::zero());
    assert_close(quote.amounts[0], wad("0.8"));
    assert_close(quote.amounts[1], wad("1.6"));

    let paid = basket.composite.redeem(wad("2.4"));
    assert_eq!(paid, wad("2.4"));

    assert_close(basket.usdc.plus.balance_of(user2), wad("0.8"));
    assert_close(basket.dai.plus.balance_of(user2), wad("1.6"));
    assert_eq!(basket.composite.user_share(user2), wad("3"));
    assert_eq!(basket.composite.balance_of(user2), wad("3.6"));
    assert_eq!(basket.composite.total_supply(), wad("63.6"));
    assert_eq!(basket.composite.total_shares(), wad("53"));
    assert_eq!(basket.composite.index(), wad("1.2"));
}

#[test]
fn test_redeem_partial_with_fee() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed_with_yield(&env, &mut basket);

    env.set_caller(basket.governance);
    basket.composite.set_redeem_fee(100);
    assert_eq!(basket.composite.redeem_fee(), 100);

    let user2 = basket.user2;
    env.set_caller(user2);
    let quote = basket.composite.get_redeem_amount(wad("2.4"));
    assert_eq!(quote.fee, wad("0.024"));
    assert_close(quote.amounts[0], wad("0.792"));
    assert_close(quote.amounts[1], wad("1.584"));

    let paid = basket.composite.redeem(wad("2.4"));
    assert_eq!(paid, wad("2.376"));
    assert_close(basket.usdc.plus.balance_of(user2), wad("0.792"));
    assert_close(basket.dai.plus.balance_of(user2), wad("1.584"));
    assert_eq!(basket.composite.total_supply(), wad("63.6"));
    assert_eq!(basket.composite.total_shares(), wad("53"));

    // The fee stays in the basket until the next rebase
    basket.composite.rebase();
    assert_close(basket.composite.total_supply(), wad("63.624"));
    let expected_index = wad("63.624") * U256::from(WAD) / wad("53");
    assert_close(basket.composite.index(), expected_index);
    assert!(basket.composite.index() > wad("1.2"));
}

#[test]
fn test_redeem_full_balance() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed_with_yield(&env, &mut basket);

    let user2 = basket.user2;
    env.set_caller(user2);
    let quote = basket.composite.get_redeem_amount(U256::MAX);
    assert_eq!(quote.shares, wad("5"));
    assert_eq!(quote.value, wad("6"));

    basket.composite.redeem(U256::MAX);

    assert_eq!(basket.composite.user_share(user2), U256::zero());
    assert_eq!(basket.composite.balance_of(user2), U256::zero());
    assert_eq!(basket.composite.total_shares(), wad("50"));
    assert_eq!(basket.composite.total_supply(), wad("60"));
    assert_close(basket.usdc.plus.balance_of(user2), wad("2"));
    assert_close(basket.dai.plus.balance_of(user2), wad("4"));

    assert_eq!(
        basket.composite.try_redeem(U256::MAX),
        Err(VaultError::InvalidAmount.into())
    );
}

#[test]
fn test_redeem_full_balance_with_fee() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed_with_yield(&env, &mut basket);

    env.set_caller(basket.governance);
    basket.composite.set_redeem_fee(250);

    let user2 = basket.user2;
    env.set_caller(user2);
    let paid = basket.composite.redeem(U256::MAX);
    assert_eq!(paid, wad("5.85"));
    assert_close(basket.usdc.plus.balance_of(user2), wad("1.95"));
    assert_close(basket.dai.plus.balance_of(user2), wad("3.9"));
    assert_eq!(basket.composite.total_shares(), wad("50"));
    assert_eq!(basket.composite.total_supply(), wad("60"));

    basket.composite.rebase();
    assert_close(basket.composite.total_supply(), wad("60.15"));
    assert_close(basket.composite.index(), wad("1.203"));
    assert_close(basket.composite.balance_of(basket.user1), wad("60.15"));
}

#[test]
fn test_transfer_moves_shares() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed_with_yield(&env, &mut basket);

    let (user1, user2) = (basket.user1, basket.user2);
    env.set_caller(user1);
    assert!(basket.composite.transfer(user2, wad("2.4")));

    assert_eq!(basket.composite.user_share(user2), wad("7"));
    assert_eq!(basket.composite.balance_of(user2), wad("8.4"));
    assert_eq!(basket.composite.user_share(user1), wad("48"));
    assert_eq!(basket.composite.balance_of(user1), wad("57.6"));
    assert_eq!(basket.composite.total_shares(), wad("55"));

    let total = basket.composite.user_share(user1) + basket.composite.user_share(user2);
    assert_eq!(total, basket.composite.total_shares());
}

#[test]
fn test_transfer_from_spends_allowance() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);

    let (user1, user2) = (basket.user1, basket.user2);
    env.set_caller(user1);
    basket.composite.approve(user2, wad("10"));
    assert_eq!(basket.composite.allowance(user1, user2), wad("10"));

    env.set_caller(user2);
    basket.composite.transfer_from(user1, user2, wad("10"));
    assert_eq!(basket.composite.allowance(user1, user2), U256::zero());
    assert_eq!(basket.composite.balance_of(user2), wad("10"));
    assert_eq!(basket.composite.balance_of(user1), wad("40"));

    assert_eq!(
        basket.composite.try_transfer_from(user1, user2, wad("1")),
        Err(VaultError::InsufficientAllowance.into())
    );
}

#[test]
fn test_transfer_over_balance_fails() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    seed(&env, &mut basket);

    env.set_caller(basket.user2);
    assert_eq!(
        basket.composite.try_transfer(basket.user1, wad("1")),
        Err(VaultError::InsufficientShares.into())
    );
}

#[test]
fn test_add_and_remove_token() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let (usdc, dai, wbtc) = (
        basket.usdc.address(),
        basket.dai.address(),
        basket.wbtc.address(),
    );

    env.set_caller(basket.governance);
    assert_eq!(
        basket.composite.try_add_token(dai),
        Err(CompositeError::TokenExists.into())
    );
    basket.composite.add_token(wbtc);
    assert_eq!(basket.composite.token_list(), vec![usdc, dai, wbtc]);

    // The last constituent takes the freed position
    basket.composite.remove_token(usdc);
    assert_eq!(basket.composite.token_list(), vec![wbtc, dai]);
    assert!(!basket.composite.token_supported(usdc));

    basket.composite.remove_token(wbtc);
    assert_eq!(basket.composite.token_list(), vec![dai]);
    assert_eq!(basket.composite.tokens(0), dai);
    assert_eq!(
        basket.composite.try_tokens(1),
        Err(CompositeError::TokenNotExists.into())
    );
    assert_eq!(
        basket.composite.try_remove_token(wbtc),
        Err(CompositeError::TokenNotExists.into())
    );
}

#[test]
fn test_remove_token_with_balance() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let composite = basket.address();
    let user1 = basket.user1;
    let dai = basket.dai.address();

    let value = join(&env, &mut basket.dai, composite, user1, "30");
    basket.composite.mint(vec![dai], vec![value]);

    env.set_caller(basket.governance);
    assert_eq!(
        basket.composite.try_remove_token(dai),
        Err(CompositeError::NonzeroBalance.into())
    );

    env.set_caller(user1);
    basket.composite.redeem(U256::MAX);
    assert_eq!(basket.dai.plus.balance_of(composite), U256::zero());
    assert_eq!(basket.dai.plus.balance_of(user1), wad("30"));

    env.set_caller(basket.governance);
    basket.composite.remove_token(dai);
    assert!(!basket.composite.token_supported(dai));
}

#[test]
fn test_rebalancers() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let rebalancer = env.get_account(4);

    env.set_caller(basket.governance);
    basket.composite.add_rebalancer(rebalancer);
    assert!(basket.composite.rebalancers(rebalancer));
    basket.composite.remove_rebalancer(rebalancer);
    assert!(!basket.composite.rebalancers(rebalancer));
}

#[test]
fn test_governance_only_operations() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let wbtc = basket.wbtc.address();
    let usdc = basket.usdc.address();

    env.set_caller(basket.strategist);
    assert_eq!(
        basket.composite.try_add_rebalancer(basket.strategist),
        Err(VaultError::NotGovernance.into())
    );
    assert_eq!(
        basket.composite.try_set_min_liquidity_ratio(9990),
        Err(VaultError::NotGovernance.into())
    );
    assert_eq!(
        basket.composite.try_set_redeem_fee(10),
        Err(VaultError::NotGovernance.into())
    );
    assert_eq!(
        basket.composite.try_add_token(wbtc),
        Err(VaultError::NotGovernance.into())
    );
    assert_eq!(
        basket.composite.try_remove_token(usdc),
        Err(VaultError::NotGovernance.into())
    );
    assert_eq!(
        basket.composite.try_set_strategist(basket.user1, true),
        Err(VaultError::NotGovernance.into())
    );
}

#[test]
fn test_config_bounds() {
    let env = odra_test::env();
    let mut basket = setup(&env);

    env.set_caller(basket.governance);
    basket.composite.set_min_liquidity_ratio(9990);
    assert_eq!(basket.composite.min_liquidity_ratio(), 9990);
    assert_eq!(
        basket.composite.try_set_min_liquidity_ratio(10_001),
        Err(VaultError::InvalidRatio.into())
    );
    assert_eq!(
        basket.composite.try_set_redeem_fee(10_000),
        Err(VaultError::InvalidFee.into())
    );
}

#[test]
fn test_governance_handover() {
    let env = odra_test::env();
    let mut basket = setup(&env);
    let successor = basket.user1;

    env.set_caller(basket.governance);
    basket.composite.set_governance(successor);
    assert_eq!(basket.composite.governance(), successor);
    assert_eq!(
        basket.composite.try_add_rebalancer(successor),
        Err(VaultError::NotGovernance.into())
    );

    env.set_caller(successor);
    basket.composite.add_rebalancer(successor);
    assert!(basket.composite.rebalancers(successor));
}
