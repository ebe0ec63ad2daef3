use soroban_sdk::{Address, Env, Symbol, Vec, contracttype, symbol_short};

use crate::error::Error;
use crate::types::{Asset, AssetClearance, AssetRepayStatus, AssetTypeConfig, GlobalStatus, Investing};

const STORAGE: Symbol = symbol_short!("STORAGE");

/// Instance storage: role record, collaborator addresses, draw reserve
/// configuration and the aggregate counters.
#[contracttype]
#[derive(Clone, Debug)]
pub struct FinanceStorage {
    /// Operator role: registers types and tokens, drives deliveries,
    /// onboardings, draws, slashes and final clearance
    pub manager: Address,
    /// Approval authority co-signing collateral withdrawals
    pub authority: Address,
    /// Receiver of forfeited collateral at final clearance
    pub slash_receiver: Address,
    /// Receiver of the protocol fund share at final clearance
    pub fund_receiver: Address,
    /// Collateral token; the protocol's native value unit
    pub akre_token: Address,
    /// Tick oracle consumed during clearance settlement
    pub tick_oracle: Address,
    /// Quota units withheld from every manager principal draw
    pub invest_reserve_quota: u32,
    /// Flat AKRE incentive paid to the clearance-settlement caller
    pub clearance_fee: i128,
    pub status: GlobalStatus,
}

impl FinanceStorage {
    pub fn get_state(env: &Env) -> FinanceStorage {
        env.storage().instance().get(&STORAGE).unwrap()
    }

    pub fn set_state(env: &Env, storage: &FinanceStorage) {
        env.storage().instance().set(&STORAGE, &storage);
    }

    pub fn require_manager(&self) {
        self.manager.require_auth();
    }

    pub fn require_authority(&self) {
        self.authority.require_auth();
    }
}

/// Key of an investing position: (asset id, record index).
#[contracttype]
#[derive(Clone)]
pub struct InvestingKey(pub u64, pub u32);

// Persistent storage keys
#[contracttype]
pub enum DataKey {
    /// Write-once asset type templates
    AssetType(u32),
    /// One record per financed asset
    Asset(u64),
    /// Investment positions, keyed per asset and record index
    Investing(InvestingKey),
    /// Monthly due schedule of an onboarded asset
    RepayStatus(u64),
    /// Slash counters and clearance accounting, created on first slash
    Clearance(u64),
    /// Per-second compound rate, scaled by RATE_BASE
    InterestRate(u32),
    /// Registered payment currencies of one token type
    TokenBucket(u32),
    /// Round-robin cursor into a token bucket
    TokenCursor(u32),
}

fn extend(env: &Env, key: &DataKey) {
    let ttl = env.storage().max_ttl();
    env.storage().persistent().extend_ttl(key, ttl, ttl);
}

pub fn get_asset_type(env: &Env, type_id: u32) -> Result<AssetTypeConfig, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::AssetType(type_id))
        .ok_or(Error::AssetTypeNotFound)
}

pub fn set_asset_type(env: &Env, type_id: u32, config: &AssetTypeConfig) {
    let key = DataKey::AssetType(type_id);
    env.storage().persistent().set(&key, config);
    extend(env, &key);
}

pub fn get_asset(env: &Env, asset_id: u64) -> Result<Asset, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Asset(asset_id))
        .ok_or(Error::AssetNotFound)
}

pub fn set_asset(env: &Env, asset_id: u64, asset: &Asset) {
    let key = DataKey::Asset(asset_id);
    env.storage().persistent().set(&key, asset);
    extend(env, &key);
}

pub fn get_investing(env: &Env, asset_id: u64, index: u32) -> Result<Investing, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::Investing(InvestingKey(asset_id, index)))
        .ok_or(Error::InvestingNotFound)
}

pub fn set_investing(env: &Env, asset_id: u64, index: u32, investing: &Investing) {
    let key = DataKey::Investing(InvestingKey(asset_id, index));
    env.storage().persistent().set(&key, investing);
    extend(env, &key);
}

pub fn get_repay_status(env: &Env, asset_id: u64) -> Result<AssetRepayStatus, Error> {
    env.storage()
        .persistent()
        .get(&DataKey::RepayStatus(asset_id))
        .ok_or(Error::AssetNotFound)
}

pub fn set_repay_status(env: &Env, asset_id: u64, status: &AssetRepayStatus) {
    let key = DataKey::RepayStatus(asset_id);
    env.storage().persistent().set(&key, status);
    extend(env, &key);
}

pub fn get_clearance(env: &Env, asset_id: u64) -> Option<AssetClearance> {
    env.storage().persistent().get(&DataKey::Clearance(asset_id))
}

pub fn set_clearance(env: &Env, asset_id: u64, clearance: &AssetClearance) {
    let key = DataKey::Clearance(asset_id);
    env.storage().persistent().set(&key, clearance);
    extend(env, &key);
}

/// Per-second compound rate for an interest id. Unset ids read as
/// RATE_BASE, i.e. zero growth.
pub fn get_interest_rate(env: &Env, interest_id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::InterestRate(interest_id))
        .unwrap_or(crate::math::RATE_BASE)
}

pub fn set_interest_rate(env: &Env, interest_id: u32, rate: i128) {
    let key = DataKey::InterestRate(interest_id);
    env.storage().persistent().set(&key, &rate);
    extend(env, &key);
}

pub fn get_token_bucket(env: &Env, token_type: u32) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&DataKey::TokenBucket(token_type))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_token_bucket(env: &Env, token_type: u32, bucket: &Vec<Address>) {
    let key = DataKey::TokenBucket(token_type);
    env.storage().persistent().set(&key, bucket);
    extend(env, &key);
}

/// Pick the next payment token of a bucket round-robin, advancing the cursor.
pub fn next_payment_token(env: &Env, token_type: u32) -> Result<Address, Error> {
    let bucket = get_token_bucket(env, token_type);
    if bucket.is_empty() {
        return Err(Error::NoPaymentToken);
    }
    let cursor: u32 = env
        .storage()
        .persistent()
        .get(&DataKey::TokenCursor(token_type))
        .unwrap_or(0);
    let token = bucket.get_unchecked(cursor % bucket.len());
    let key = DataKey::TokenCursor(token_type);
    env.storage()
        .persistent()
        .set(&key, &(cursor.wrapping_add(1)));
    extend(env, &key);
    Ok(token)
}
