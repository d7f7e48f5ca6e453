#![no_std]

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Vec};

mod auth;
mod circle;
mod enrollment;
mod errors;
mod payout;
mod randomness;
mod storage;
mod types;

pub use errors::ContractError;
pub use randomness::{RandomnessOracle, RandomnessOracleClient, RandomnessSource};
pub use types::*;

#[contract]
pub struct HomeCircleContract;

#[contractimpl]
impl HomeCircleContract {
    /// Record the deploying admin, the payment token and the randomness oracle.
    pub fn __constructor(env: Env, admin: Address, token: Address, oracle: Address) {
        storage::set_config(&env, &admin, &token, &oracle);
    }

    // ─── Lifecycle ──────────────────────────────────────────────────

    /// Open the circle with its savings target and the exact monthly payment.
    /// Admin only; a second call fails with `AlreadyInitialized`.
    pub fn initialize(
        env: Env,
        admin: Address,
        target: u64,
        monthly: u64,
    ) -> Result<(), ContractError> {
        circle::initialize(&env, admin, target, monthly)
    }

    /// Join the circle, or top up an existing membership, by paying exactly
    /// one monthly contribution from `payment.sender`.
    pub fn enroll(env: Env, payment: Payment) -> Result<(), ContractError> {
        enrollment::enroll(&env, payment)
    }

    /// Draw a winner through the oracle, pay out the whole balance and close
    /// the circle. Admin only. Returns the winner.
    pub fn select_winner(env: Env, admin: Address) -> Result<Address, ContractError> {
        payout::select_winner(&env, admin)
    }

    // ─── Queries ────────────────────────────────────────────────────

    /// Get the full circle state.
    pub fn get_circle(env: Env) -> Result<CircleState, ContractError> {
        circle::get_circle(&env)
    }

    /// Get members in enrollment order.
    pub fn get_members(env: Env) -> Result<Vec<Address>, ContractError> {
        circle::get_members(&env)
    }

    /// Get a member's cumulative contribution (0 for non-members).
    pub fn get_contribution(env: Env, member: Address) -> Result<u64, ContractError> {
        circle::get_contribution(&env, member)
    }

    /// Check whether an address has enrolled.
    pub fn is_member(env: Env, member: Address) -> Result<bool, ContractError> {
        circle::is_member(&env, member)
    }

    /// Get the draw outcome once the circle has closed.
    pub fn get_payout(env: Env) -> Result<Option<PayoutRecord>, ContractError> {
        circle::get_payout(&env)
    }

    /// Whether the pooled balance has reached the target. Informational only.
    pub fn is_target_reached(env: Env) -> Result<bool, ContractError> {
        circle::is_target_reached(&env)
    }

    /// Get the admin recorded at deployment.
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        storage::get_admin(&env).ok_or(ContractError::NotInitialized)
    }

    /// Get the token used for payments and the payout.
    pub fn get_token(env: Env) -> Result<Address, ContractError> {
        storage::get_token(&env).ok_or(ContractError::NotInitialized)
    }

    /// Get the randomness oracle contract.
    pub fn get_oracle(env: Env) -> Result<Address, ContractError> {
        storage::get_oracle(&env).ok_or(ContractError::NotInitialized)
    }
}
