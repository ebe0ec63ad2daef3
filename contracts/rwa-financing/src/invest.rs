use soroban_sdk::{Address, Env};

use crate::error::Error;

/// Investment pool: quota sales, pre-onboarding exits and manager
/// principal draw-downs.
pub trait IsInvestPool {
    /// Buy `num_quota` units of an asset at the type's per-unit price.
    /// Allowed while Delivered, or Onboarded within the type's
    /// `max_invest_overdue` window. Returns the position index.
    fn invest_asset(
        env: &Env,
        investor: Address,
        asset_id: u64,
        num_quota: u32,
    ) -> Result<u32, Error>;

    /// Exit a position before onboarding, after the minimum holding
    /// period. Refunds the original principal and frees the quota.
    fn invest_exit(env: &Env, investor: Address, asset_id: u64, index: u32) -> Result<(), Error>;

    /// Release newly-sold principal above the configured reserve quota to
    /// the manager. Manager-only, Onboarded only. Returns the amount.
    fn take_invest(env: &Env, asset_id: u64) -> Result<i128, Error>;
}
