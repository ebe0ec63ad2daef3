use soroban_sdk::{Address, BytesN, Env};

use crate::error::Error;
use crate::index_types::AssetState;
use crate::types::Asset;

/// Asset registry and lifecycle state machine.
///
/// Deposited -> Cancelled (authority-approved withdrawal), or
/// Deposited -> Delivered -> Onboarded -> Clearing -> ClearedFinal.
/// Every transition checks the exact predecessor status; a rejected call
/// leaves no partial effects.
pub trait IsAssetLifecycle {
    /// Post collateral against a registered asset type and create the
    /// asset record. Returns the new asset id.
    fn deposit_for_asset(env: &Env, owner: Address, type_id: u32) -> Result<u64, Error>;

    /// Withdraw posted collateral before delivery. Requires the owner's
    /// auth and the authority's co-signature, bounded by `deadline`.
    fn withdraw_deposit(env: &Env, owner: Address, asset_id: u64, deadline: u64)
    -> Result<(), Error>;

    /// Attach the off-chain delivery proof reference. Manager-only.
    fn deliver_asset(env: &Env, asset_id: u64, proof: BytesN<32>) -> Result<(), Error>;

    /// Mark the asset live and start the monthly repayment schedule, with
    /// month 1 due one calendar month after onboarding. Manager-only.
    fn onboard_asset(env: &Env, asset_id: u64) -> Result<(), Error>;
}

pub(crate) fn publish_state(env: &Env, asset_id: u64, asset: &Asset) {
    AssetState {
        asset_id,
        status: asset.status,
        num_quota_total: asset.num_quota_total,
        ledger: env.ledger().sequence(),
        timestamp: env.ledger().timestamp(),
    }
    .publish(env);
}
