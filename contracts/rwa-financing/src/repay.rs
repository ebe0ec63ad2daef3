use soroban_sdk::{Address, Env};

use crate::error::Error;
use crate::math;
use crate::storage;
use crate::types::{Asset, AssetRepayStatus, AssetTypeConfig};

/// Repayment and debt-accrual engine.
///
/// One monthly due schedule per onboarded asset. Payments apply in strict
/// priority order: compound-inflated debt, then the current due amount,
/// then prepay credit. Period rollover, debt creation at missed
/// boundaries and yield maturity are evaluated lazily from ledger time at
/// the head of every repay/draw/yield/slash call.
pub trait IsRepayEngine {
    /// Apply a monthly repayment from the asset owner.
    fn repay_monthly(env: &Env, owner: Address, asset_id: u64, amount: i128) -> Result<(), Error>;

    /// Release repaid funds to the manager, keeping back the matured but
    /// unclaimed investor yield plus one forward month's obligation.
    /// Returns the released amount.
    fn take_repayment(env: &Env, asset_id: u64) -> Result<i128, Error>;
}

/// Months already matured for yield purposes: every period whose due
/// boundary has been rolled past, capped by tenure.
pub(crate) fn matured_months(rs: &AssetRepayStatus, config: &AssetTypeConfig) -> u32 {
    (rs.month_due_repay - 1).min(config.tenure)
}

/// Total monthly yield obligation across all sold quota.
pub(crate) fn monthly_yield_total(asset: &Asset, config: &AssetTypeConfig) -> Result<i128, Error> {
    config
        .amount_yield_per_invest
        .checked_mul(i128::from(asset.num_quota_total))
        .ok_or(Error::ArithmeticError)
}

/// Inflate outstanding debt by compound interest up to `until`. Keeps the
/// invariant that `amount_debt` and `timestamp_debt` are zero together.
pub(crate) fn accrue_debt(
    env: &Env,
    rs: &mut AssetRepayStatus,
    config: &AssetTypeConfig,
    until: u64,
) -> Result<(), Error> {
    if rs.amount_debt > 0 && until > rs.timestamp_debt {
        let rate = storage::get_interest_rate(env, config.interest_id);
        rs.amount_debt = math::compound(rs.amount_debt, rate, until - rs.timestamp_debt)
            .ok_or(Error::ArithmeticError)?;
        rs.timestamp_debt = until;
    }
    Ok(())
}

/// Roll the due schedule forward over every boundary that has passed.
/// Prepay credit is consumed first; any unpaid remainder of a closed
/// period is folded into debt at the boundary, and the matured yield
/// obligation accrues to the asset. Call before reading or mutating the
/// schedule; the caller persists both records.
pub(crate) fn settle_periods(
    env: &Env,
    asset: &mut Asset,
    rs: &mut AssetRepayStatus,
    config: &AssetTypeConfig,
) -> Result<(), Error> {
    let now = env.ledger().timestamp();
    while rs.month_due_repay <= config.tenure && now > rs.timestamp_next_due {
        let boundary = rs.timestamp_next_due;
        if rs.amount_pre_pay > 0 && rs.amount_repay_due > 0 {
            let pay = rs.amount_pre_pay.min(rs.amount_repay_due);
            rs.amount_pre_pay -= pay;
            rs.amount_repay_due -= pay;
        }
        if rs.amount_repay_due > 0 {
            accrue_debt(env, rs, config, boundary)?;
            rs.amount_debt = rs
                .amount_debt
                .checked_add(rs.amount_repay_due)
                .ok_or(Error::ArithmeticError)?;
            rs.timestamp_debt = boundary;
            rs.amount_repay_due = 0;
        }
        asset.amount_for_invest_withdraw = asset
            .amount_for_invest_withdraw
            .checked_add(monthly_yield_total(asset, config)?)
            .ok_or(Error::ArithmeticError)?;
        rs.month_due_repay += 1;
        if rs.month_due_repay <= config.tenure {
            rs.timestamp_next_due = math::month_boundary(asset.onboard_timestamp, rs.month_due_repay);
            rs.amount_repay_due = config.amount_repay_monthly;
        } else {
            // Tenure exhausted; the schedule stops rolling and the due
            // stays zero. timestamp_next_due keeps its last boundary.
            rs.amount_repay_due = 0;
        }
    }
    Ok(())
}
