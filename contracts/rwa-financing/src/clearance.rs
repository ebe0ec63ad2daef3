use soroban_sdk::{Address, Env};

use crate::error::Error;
use crate::math::SECONDS_PER_DAY;
use crate::types::{Asset, AssetClearance, AssetTypeConfig};

/// A slash within this window of the previous one counts as consecutive.
pub(crate) const LINE_SLASH_WINDOW: u64 = 2 * SECONDS_PER_DAY;

/// Slashing and clearance settlement: collateral forfeiture against asset
/// underperformance, forced transition into `Clearing` when either slash
/// counter reaches its cap or the debt-overdue product passes the type's
/// threshold, and the final split of remaining collateral.
pub trait IsClearance {
    /// Forfeit up to `amount` of remaining collateral. Manager-only,
    /// Onboarded only. Returns the amount actually slashed.
    fn execute_slash(env: &Env, asset_id: u64, amount: i128) -> Result<i128, Error>;

    /// Settle investor compensation for a clearing asset. Open to anyone;
    /// pays the caller a flat AKRE incentive, prices the remaining yield
    /// obligation via the oracle tick and reserves the AKRE equivalent.
    fn execute_invest_clearance(env: &Env, caller: Address, asset_id: u64) -> Result<i128, Error>;

    /// Terminal distribution of unreserved collateral between the slash
    /// receiver, the fund receiver and the asset owner. Manager-only.
    fn execute_final_clearance(
        env: &Env,
        asset_id: u64,
        amount_slash: i128,
        amount_fund: i128,
    ) -> Result<(), Error>;
}

pub(crate) fn new_clearance(asset: &Asset, config: &AssetTypeConfig) -> Result<AssetClearance, Error> {
    let product_to_trigger = config
        .params_clearance
        .amount_debt
        .checked_mul(i128::from(config.params_clearance.num_overdue_days))
        .and_then(|v| v.checked_mul(i128::from(SECONDS_PER_DAY)))
        .ok_or(Error::ArithmeticError)?;
    Ok(AssetClearance {
        product_to_trigger,
        amount_debt_overdue_product: 0,
        amount_akre_available: asset.amount_deposit,
        amount_akre_for_invester: 0,
        quota_pending: 0,
        slash_caps: config.slash_caps,
        times_slashed: 0,
        times_line_slashed: 0,
        timestamp_last_slash: 0,
        amount_slashed: 0,
        price_tick_on_clearance: 0,
        price_on_clearance: 0,
        timestamp_clearance: 0,
    })
}
