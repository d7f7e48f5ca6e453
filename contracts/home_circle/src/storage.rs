use soroban_sdk::{Address, Env};

use crate::types::{CircleState, DataKey};

const INSTANCE_TTL_THRESHOLD: u32 = 100;
const INSTANCE_TTL_EXTEND: u32 = 500;
const PERSISTENT_TTL_THRESHOLD: u32 = 100;
const PERSISTENT_TTL_EXTEND: u32 = 1000;

// --- Deployment config ---

pub fn set_config(env: &Env, admin: &Address, token: &Address, oracle: &Address) {
    let instance = env.storage().instance();
    instance.set(&DataKey::Admin, admin);
    instance.set(&DataKey::Token, token);
    instance.set(&DataKey::Oracle, oracle);
    extend_instance_ttl(env);
}

pub fn get_admin(env: &Env) -> Option<Address> {
    read_instance(env, &DataKey::Admin)
}

pub fn get_token(env: &Env) -> Option<Address> {
    read_instance(env, &DataKey::Token)
}

pub fn get_oracle(env: &Env) -> Option<Address> {
    read_instance(env, &DataKey::Oracle)
}

fn read_instance(env: &Env, key: &DataKey) -> Option<Address> {
    let result = env.storage().instance().get(key);
    if result.is_some() {
        extend_instance_ttl(env);
    }
    result
}

// --- Circle ---

pub fn get_circle(env: &Env) -> Option<CircleState> {
    let key = DataKey::Circle;
    let result = env.storage().persistent().get(&key);
    if result.is_some() {
        extend_persistent_ttl(env, &key);
    }
    result
}

pub fn set_circle(env: &Env, circle: &CircleState) {
    let key = DataKey::Circle;
    env.storage().persistent().set(&key, circle);
    extend_persistent_ttl(env, &key);
}

// --- TTL Management ---

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}
