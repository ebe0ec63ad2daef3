use soroban_sdk::{Address, Env};

use crate::error::Error;

/// Monthly yield distribution to investors, pro-rata to quota held.
///
/// On an onboarded asset each matured month pays
/// `amount_yield_per_invest x num_quota` in the payment currency. On a
/// clearing asset the position instead collects its matured currency
/// yield plus a pro-rata share of the reserved AKRE compensation pool and
/// completes.
pub trait IsYieldDistribution {
    /// Withdraw all matured yield for one investing position. Returns the
    /// currency amount and the AKRE compensation amount paid.
    fn take_yield(
        env: &Env,
        investor: Address,
        asset_id: u64,
        index: u32,
    ) -> Result<(i128, i128), Error>;
}
