use soroban_sdk::{Address, BytesN, Env, contract, contractimpl, token::TokenClient};

use crate::asset::{IsAssetLifecycle, publish_state};
use crate::clearance::{IsClearance, LINE_SLASH_WINDOW, new_clearance};
use crate::error::Error;
use crate::index_types::{ClearanceSettled, InvestChanged, RepayReceived, SlashExecuted, YieldTaken};
use crate::invest::IsInvestPool;
use crate::math::{self, SECONDS_PER_DAY};
use crate::oracle::TickOracleClient;
use crate::repay::{self, IsRepayEngine};
use crate::storage::{self, FinanceStorage};
use crate::types::{
    Asset, AssetClearance, AssetRepayStatus, AssetStatus, AssetTypeConfig, GlobalStatus, Investing,
    InvestingStatus,
};
use crate::yields::IsYieldDistribution;

#[contract]
pub struct RWAFinancingContract;

#[contractimpl]
impl RWAFinancingContract {
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: &Env,
        manager: Address,
        authority: Address,
        slash_receiver: Address,
        fund_receiver: Address,
        akre_token: Address,
        tick_oracle: Address,
        invest_reserve_quota: u32,
        clearance_fee: i128,
    ) {
        FinanceStorage::set_state(
            env,
            &FinanceStorage {
                manager,
                authority,
                slash_receiver,
                fund_receiver,
                akre_token,
                tick_oracle,
                invest_reserve_quota,
                clearance_fee,
                status: GlobalStatus::default(),
            },
        );
    }

    /// Register a new asset type. Manager-only; the returned id is assigned
    /// monotonically and the template is never modified afterwards.
    pub fn add_asset_type(env: &Env, config: AssetTypeConfig) -> Result<u32, Error> {
        let mut state = FinanceStorage::get_state(env);
        state.require_manager();
        if config.tenure == 0
            || config.invest_quota == 0
            || config.value_per_invest <= 0
            || config.amount_repay_monthly <= 0
            || config.amount_yield_per_invest <= 0
            || config.amount_deposit <= 0
        {
            return Err(Error::InvalidAmount);
        }
        state.status.num_asset_type += 1;
        let type_id = state.status.num_asset_type;
        storage::set_asset_type(env, type_id, &config);
        FinanceStorage::set_state(env, &state);
        Ok(type_id)
    }

    /// Register a payment currency under a token-type bucket. Manager-only.
    /// Assets of a type draw their currency from the type's bucket
    /// round-robin at creation.
    pub fn add_payment_token(env: &Env, token_type: u32, token: Address) -> Result<u32, Error> {
        let mut state = FinanceStorage::get_state(env);
        state.require_manager();
        let mut bucket = storage::get_token_bucket(env, token_type);
        bucket.push_back(token);
        storage::set_token_bucket(env, token_type, &bucket);
        state.status.num_tokens += 1;
        FinanceStorage::set_state(env, &state);
        Ok(bucket.len())
    }

    /// Set the per-second compound rate for an interest id, scaled by
    /// RATE_BASE. Manager-only; read-only to the accrual engine.
    pub fn set_interest_rate(env: &Env, interest_id: u32, rate: i128) -> Result<(), Error> {
        let state = FinanceStorage::get_state(env);
        state.require_manager();
        if rate < math::RATE_BASE {
            return Err(Error::InvalidAmount);
        }
        storage::set_interest_rate(env, interest_id, rate);
        Ok(())
    }

    pub fn interest_rate(env: &Env, interest_id: u32) -> i128 {
        storage::get_interest_rate(env, interest_id)
    }

    // Read-only state getters

    pub fn asset_type(env: &Env, type_id: u32) -> Result<AssetTypeConfig, Error> {
        storage::get_asset_type(env, type_id)
    }

    pub fn asset(env: &Env, asset_id: u64) -> Result<Asset, Error> {
        storage::get_asset(env, asset_id)
    }

    pub fn investing(env: &Env, asset_id: u64, index: u32) -> Result<Investing, Error> {
        storage::get_investing(env, asset_id, index)
    }

    pub fn repay_status(env: &Env, asset_id: u64) -> Result<AssetRepayStatus, Error> {
        storage::get_repay_status(env, asset_id)
    }

    pub fn clearance(env: &Env, asset_id: u64) -> Result<AssetClearance, Error> {
        storage::get_clearance(env, asset_id).ok_or(Error::AssetNotFound)
    }

    pub fn global_status(env: &Env) -> GlobalStatus {
        FinanceStorage::get_state(env).status
    }
}

#[contractimpl]
impl IsAssetLifecycle for RWAFinancingContract {
    fn deposit_for_asset(env: &Env, owner: Address, type_id: u32) -> Result<u64, Error> {
        owner.require_auth();
        let mut state = FinanceStorage::get_state(env);
        let config = storage::get_asset_type(env, type_id)?;
        let payment_token = storage::next_payment_token(env, config.invest_token_type)?;

        TokenClient::new(env, &state.akre_token).transfer(
            &owner,
            &env.current_contract_address(),
            &config.amount_deposit,
        );

        state.status.num_asset += 1;
        let asset_id = state.status.num_asset;
        let asset = Asset {
            owner,
            status: AssetStatus::Deposited,
            type_asset: type_id,
            delivery_proof: None,
            payment_token,
            num_investings: 0,
            num_quota_total: 0,
            amount_deposit: config.amount_deposit,
            onboard_timestamp: 0,
            sum_amount_repaid: 0,
            amount_for_invest_withdraw: 0,
            amount_invest_withdrawn: 0,
        };
        storage::set_asset(env, asset_id, &asset);
        FinanceStorage::set_state(env, &state);
        publish_state(env, asset_id, &asset);
        Ok(asset_id)
    }

    fn withdraw_deposit(
        env: &Env,
        owner: Address,
        asset_id: u64,
        deadline: u64,
    ) -> Result<(), Error> {
        owner.require_auth();
        let mut state = FinanceStorage::get_state(env);
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.owner != owner {
            return Err(Error::NotAssetOwner);
        }
        if asset.status != AssetStatus::Deposited {
            return Err(Error::StatusNotAllowed);
        }
        if env.ledger().timestamp() > deadline {
            return Err(Error::ExpiredApproval);
        }
        state.require_authority();

        TokenClient::new(env, &state.akre_token).transfer(
            &env.current_contract_address(),
            &asset.owner,
            &asset.amount_deposit,
        );

        asset.status = AssetStatus::Cancelled;
        state.status.num_cancelled += 1;
        storage::set_asset(env, asset_id, &asset);
        FinanceStorage::set_state(env, &state);
        publish_state(env, asset_id, &asset);
        Ok(())
    }

    fn deliver_asset(env: &Env, asset_id: u64, proof: BytesN<32>) -> Result<(), Error> {
        let mut state = FinanceStorage::get_state(env);
        state.require_manager();
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Deposited {
            return Err(Error::StatusNotAllowed);
        }
        asset.status = AssetStatus::Delivered;
        asset.delivery_proof = Some(proof);
        state.status.num_delivered += 1;
        storage::set_asset(env, asset_id, &asset);
        FinanceStorage::set_state(env, &state);
        publish_state(env, asset_id, &asset);
        Ok(())
    }

    fn onboard_asset(env: &Env, asset_id: u64) -> Result<(), Error> {
        let mut state = FinanceStorage::get_state(env);
        state.require_manager();
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Delivered {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let now = env.ledger().timestamp();

        asset.status = AssetStatus::Onboarded;
        asset.onboard_timestamp = now;
        storage::set_repay_status(
            env,
            asset_id,
            &AssetRepayStatus {
                month_due_repay: 1,
                timestamp_next_due: math::month_boundary(now, 1),
                amount_repay_due: config.amount_repay_monthly,
                amount_debt: 0,
                timestamp_debt: 0,
                amount_pre_pay: 0,
                amount_repay_taken: 0,
                num_invest_taken: 0,
            },
        );
        state.status.num_onboarded += 1;
        storage::set_asset(env, asset_id, &asset);
        FinanceStorage::set_state(env, &state);
        publish_state(env, asset_id, &asset);
        Ok(())
    }
}

#[contractimpl]
impl IsInvestPool for RWAFinancingContract {
    fn invest_asset(
        env: &Env,
        investor: Address,
        asset_id: u64,
        num_quota: u32,
    ) -> Result<u32, Error> {
        investor.require_auth();
        if num_quota == 0 {
            return Err(Error::InvalidAmount);
        }
        let mut state = FinanceStorage::get_state(env);
        let mut asset = storage::get_asset(env, asset_id)?;
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let now = env.ledger().timestamp();

        // Late joiners start with already-matured months marked taken so
        // they cannot claim yield from before their purchase.
        let mut month_taken = 0;
        match asset.status {
            AssetStatus::Delivered => {}
            AssetStatus::Onboarded => {
                let window = u64::from(config.max_invest_overdue) * SECONDS_PER_DAY;
                if now > asset.onboard_timestamp + window {
                    return Err(Error::InvestOverdued);
                }
                let mut rs = storage::get_repay_status(env, asset_id)?;
                repay::settle_periods(env, &mut asset, &mut rs, &config)?;
                storage::set_repay_status(env, asset_id, &rs);
                month_taken = repay::matured_months(&rs, &config);
            }
            _ => return Err(Error::StatusNotAllowed),
        }
        let new_total = asset
            .num_quota_total
            .checked_add(num_quota)
            .ok_or(Error::InvestOverflowed)?;
        if new_total > config.invest_quota {
            return Err(Error::InvestOverflowed);
        }

        let amount = config
            .value_per_invest
            .checked_mul(i128::from(num_quota))
            .ok_or(Error::ArithmeticError)?;
        TokenClient::new(env, &asset.payment_token).transfer(
            &investor,
            &env.current_contract_address(),
            &amount,
        );

        let index = asset.num_investings;
        asset.num_investings += 1;
        asset.num_quota_total = new_total;
        storage::set_investing(
            env,
            asset_id,
            index,
            &Investing {
                investor: investor.clone(),
                timestamp: now,
                status: InvestingStatus::Active,
                num_quota,
                month_taken,
            },
        );
        state.status.num_invest += 1;
        storage::set_asset(env, asset_id, &asset);
        FinanceStorage::set_state(env, &state);
        InvestChanged {
            asset_id,
            investor,
            index,
            num_quota,
            amount,
            exit: false,
        }
        .publish(env);
        Ok(index)
    }

    fn invest_exit(env: &Env, investor: Address, asset_id: u64, index: u32) -> Result<(), Error> {
        investor.require_auth();
        let mut asset = storage::get_asset(env, asset_id)?;
        let mut investing = storage::get_investing(env, asset_id, index)?;
        if investing.investor != investor {
            return Err(Error::NotInvestor);
        }
        if investing.status != InvestingStatus::Active {
            return Err(Error::WrongStatus);
        }
        // Exits are pre-onboarding only; once live the position is locked in.
        if asset.status != AssetStatus::Delivered {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let held = env.ledger().timestamp() - investing.timestamp;
        if held < u64::from(config.min_invest_exit) * SECONDS_PER_DAY {
            return Err(Error::NeedToStay);
        }

        let amount = config
            .value_per_invest
            .checked_mul(i128::from(investing.num_quota))
            .ok_or(Error::ArithmeticError)?;
        TokenClient::new(env, &asset.payment_token).transfer(
            &env.current_contract_address(),
            &investor,
            &amount,
        );

        investing.status = InvestingStatus::Aborted;
        asset.num_quota_total -= investing.num_quota;
        storage::set_investing(env, asset_id, index, &investing);
        storage::set_asset(env, asset_id, &asset);
        InvestChanged {
            asset_id,
            investor,
            index,
            num_quota: investing.num_quota,
            amount,
            exit: true,
        }
        .publish(env);
        Ok(())
    }

    fn take_invest(env: &Env, asset_id: u64) -> Result<i128, Error> {
        let state = FinanceStorage::get_state(env);
        state.require_manager();
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Onboarded {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let mut rs = storage::get_repay_status(env, asset_id)?;
        repay::settle_periods(env, &mut asset, &mut rs, &config)?;

        let sellable = asset
            .num_quota_total
            .saturating_sub(state.invest_reserve_quota);
        if sellable <= rs.num_invest_taken {
            return Err(Error::LowInvestment);
        }
        let delta = sellable - rs.num_invest_taken;
        let amount = config
            .value_per_invest
            .checked_mul(i128::from(delta))
            .ok_or(Error::ArithmeticError)?;
        TokenClient::new(env, &asset.payment_token).transfer(
            &env.current_contract_address(),
            &state.manager,
            &amount,
        );
        rs.num_invest_taken = sellable;
        storage::set_asset(env, asset_id, &asset);
        storage::set_repay_status(env, asset_id, &rs);
        Ok(amount)
    }
}

#[contractimpl]
impl IsRepayEngine for RWAFinancingContract {
    fn repay_monthly(env: &Env, owner: Address, asset_id: u64, amount: i128) -> Result<(), Error> {
        owner.require_auth();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.owner != owner {
            return Err(Error::NotAssetOwner);
        }
        if asset.status != AssetStatus::Onboarded {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let mut rs = storage::get_repay_status(env, asset_id)?;
        repay::settle_periods(env, &mut asset, &mut rs, &config)?;

        TokenClient::new(env, &asset.payment_token).transfer(
            &owner,
            &env.current_contract_address(),
            &amount,
        );

        // (a) debt first, inflated by compound interest up to now
        let mut remaining = amount;
        if rs.amount_debt > 0 {
            repay::accrue_debt(env, &mut rs, &config, env.ledger().timestamp())?;
            let pay = remaining.min(rs.amount_debt);
            rs.amount_debt -= pay;
            remaining -= pay;
            if rs.amount_debt == 0 {
                rs.timestamp_debt = 0;
            }
        }
        // (b) current due, with existing prepay credit folded in
        remaining = remaining
            .checked_add(rs.amount_pre_pay)
            .ok_or(Error::ArithmeticError)?;
        rs.amount_pre_pay = 0;
        if rs.amount_repay_due > 0 && remaining > 0 {
            let pay = remaining.min(rs.amount_repay_due);
            rs.amount_repay_due -= pay;
            remaining -= pay;
        }
        // (d) surplus carries forward against future dues
        rs.amount_pre_pay = remaining;
        asset.sum_amount_repaid = asset
            .sum_amount_repaid
            .checked_add(amount)
            .ok_or(Error::ArithmeticError)?;

        storage::set_asset(env, asset_id, &asset);
        storage::set_repay_status(env, asset_id, &rs);
        RepayReceived {
            asset_id,
            amount,
            month_due_repay: rs.month_due_repay,
            amount_debt: rs.amount_debt,
            amount_pre_pay: rs.amount_pre_pay,
        }
        .publish(env);
        Ok(())
    }

    fn take_repayment(env: &Env, asset_id: u64) -> Result<i128, Error> {
        let state = FinanceStorage::get_state(env);
        state.require_manager();
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Onboarded {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let mut rs = storage::get_repay_status(env, asset_id)?;
        repay::settle_periods(env, &mut asset, &mut rs, &config)?;

        // Matured-but-unclaimed yield stays in the contract, plus one
        // forward month while the schedule is still running.
        let pending_yield = asset.amount_for_invest_withdraw - asset.amount_invest_withdrawn;
        let forward = if rs.month_due_repay <= config.tenure {
            repay::monthly_yield_total(&asset, &config)?
        } else {
            0
        };
        let reserve = pending_yield
            .checked_add(forward)
            .ok_or(Error::ArithmeticError)?;
        let releasable = asset.sum_amount_repaid - rs.amount_repay_taken - reserve;
        if releasable <= 0 {
            return Err(Error::NoMatureRepayment);
        }

        TokenClient::new(env, &asset.payment_token).transfer(
            &env.current_contract_address(),
            &state.manager,
            &releasable,
        );
        rs.amount_repay_taken += releasable;
        storage::set_asset(env, asset_id, &asset);
        storage::set_repay_status(env, asset_id, &rs);
        Ok(releasable)
    }
}

#[contractimpl]
impl IsYieldDistribution for RWAFinancingContract {
    fn take_yield(
        env: &Env,
        investor: Address,
        asset_id: u64,
        index: u32,
    ) -> Result<(i128, i128), Error> {
        investor.require_auth();
        let state = FinanceStorage::get_state(env);
        let mut asset = storage::get_asset(env, asset_id)?;
        let mut investing = storage::get_investing(env, asset_id, index)?;
        if investing.investor != investor {
            return Err(Error::NotInvestor);
        }
        if investing.status != InvestingStatus::Active {
            return Err(Error::WrongStatus);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let mut rs = storage::get_repay_status(env, asset_id)?;

        let mut amount_akre: i128 = 0;
        let matured = match asset.status {
            AssetStatus::Onboarded => {
                repay::settle_periods(env, &mut asset, &mut rs, &config)?;
                let matured = repay::matured_months(&rs, &config);
                if matured <= investing.month_taken {
                    return Err(Error::NotMature);
                }
                matured
            }
            AssetStatus::Clearing | AssetStatus::ClearedFinal => {
                // Compensation claims need the settled AKRE pool.
                let mut clearance =
                    storage::get_clearance(env, asset_id).ok_or(Error::ClearanceNotReady)?;
                if clearance.price_on_clearance == 0 {
                    return Err(Error::ClearanceNotReady);
                }
                if clearance.quota_pending > 0 {
                    // Last claimant sweeps the rounding dust.
                    amount_akre = clearance
                        .amount_akre_for_invester
                        .checked_mul(i128::from(investing.num_quota))
                        .ok_or(Error::ArithmeticError)?
                        / i128::from(clearance.quota_pending);
                    clearance.amount_akre_for_invester -= amount_akre;
                    clearance.amount_akre_available -= amount_akre;
                    clearance.quota_pending -= investing.num_quota;
                    storage::set_clearance(env, asset_id, &clearance);
                }
                if amount_akre > 0 {
                    TokenClient::new(env, &state.akre_token).transfer(
                        &env.current_contract_address(),
                        &investor,
                        &amount_akre,
                    );
                }
                // Plus whatever currency yield matured before clearing
                repay::matured_months(&rs, &config)
            }
            _ => return Err(Error::StatusNotAllowed),
        };

        let months = matured - investing.month_taken;
        let mut amount: i128 = 0;
        if months > 0 {
            amount = config
                .amount_yield_per_invest
                .checked_mul(i128::from(investing.num_quota))
                .ok_or(Error::ArithmeticError)?
                .checked_mul(i128::from(months))
                .ok_or(Error::ArithmeticError)?;
            TokenClient::new(env, &asset.payment_token).transfer(
                &env.current_contract_address(),
                &investor,
                &amount,
            );
            asset.amount_invest_withdrawn = asset
                .amount_invest_withdrawn
                .checked_add(amount)
                .ok_or(Error::ArithmeticError)?;
        }

        investing.month_taken = matured;
        if matured >= config.tenure || asset.status != AssetStatus::Onboarded {
            // Tenure reached, or compensated at clearance: position done.
            investing.month_taken = config.tenure;
            investing.status = InvestingStatus::Complete;
        }
        storage::set_investing(env, asset_id, index, &investing);
        storage::set_asset(env, asset_id, &asset);
        storage::set_repay_status(env, asset_id, &rs);
        YieldTaken {
            asset_id,
            investor,
            index,
            amount,
            amount_akre,
            month_taken: investing.month_taken,
        }
        .publish(env);
        Ok((amount, amount_akre))
    }
}

#[contractimpl]
impl IsClearance for RWAFinancingContract {
    fn execute_slash(env: &Env, asset_id: u64, amount: i128) -> Result<i128, Error> {
        let state = FinanceStorage::get_state(env);
        state.require_manager();
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Onboarded {
            return Err(Error::StatusNotAllowed);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let mut rs = storage::get_repay_status(env, asset_id)?;
        repay::settle_periods(env, &mut asset, &mut rs, &config)?;

        let mut clearance = match storage::get_clearance(env, asset_id) {
            Some(clearance) => clearance,
            None => new_clearance(&asset, &config)?,
        };
        let now = env.ledger().timestamp();
        if now <= clearance.timestamp_last_slash {
            return Err(Error::CannotSlashTwice);
        }

        let slashed = amount.min(clearance.amount_akre_available);
        if slashed > 0 {
            TokenClient::new(env, &state.akre_token).transfer(
                &env.current_contract_address(),
                &state.slash_receiver,
                &slashed,
            );
        }
        clearance.amount_akre_available -= slashed;
        clearance.amount_slashed += slashed;
        clearance.times_slashed += 1;
        clearance.times_line_slashed = if clearance.timestamp_last_slash > 0
            && now < clearance.timestamp_last_slash + LINE_SLASH_WINDOW
        {
            clearance.times_line_slashed + 1
        } else {
            1
        };
        // Debt-overdue pressure towards the clearance trigger
        if rs.amount_debt > 0 && now > rs.timestamp_debt {
            let overdue = rs
                .amount_debt
                .checked_mul(i128::from(now - rs.timestamp_debt))
                .ok_or(Error::ArithmeticError)?;
            clearance.amount_debt_overdue_product = clearance
                .amount_debt_overdue_product
                .checked_add(overdue)
                .ok_or(Error::ArithmeticError)?;
        }
        clearance.timestamp_last_slash = now;

        if clearance.times_slashed >= clearance.slash_caps.max_total
            || clearance.times_line_slashed >= clearance.slash_caps.max_consecutive
            || clearance.amount_debt_overdue_product > clearance.product_to_trigger
        {
            asset.status = AssetStatus::Clearing;
            clearance.timestamp_clearance = now;
        }

        storage::set_asset(env, asset_id, &asset);
        storage::set_repay_status(env, asset_id, &rs);
        storage::set_clearance(env, asset_id, &clearance);
        SlashExecuted {
            asset_id,
            amount: slashed,
            times_slashed: clearance.times_slashed,
            times_line_slashed: clearance.times_line_slashed,
            amount_debt_overdue_product: clearance.amount_debt_overdue_product,
        }
        .publish(env);
        if asset.status == AssetStatus::Clearing {
            publish_state(env, asset_id, &asset);
        }
        Ok(slashed)
    }

    fn execute_invest_clearance(env: &Env, caller: Address, asset_id: u64) -> Result<i128, Error> {
        caller.require_auth();
        let state = FinanceStorage::get_state(env);
        let asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Clearing {
            return Err(Error::StatusNotAllowed);
        }
        let mut clearance = storage::get_clearance(env, asset_id).ok_or(Error::ClearanceNotReady)?;
        if clearance.price_on_clearance != 0 {
            return Err(Error::AlreadyCleared);
        }
        let config = storage::get_asset_type(env, asset.type_asset)?;
        let rs = storage::get_repay_status(env, asset_id)?;

        let tick = TickOracleClient::new(env, &state.tick_oracle).get_tick();
        let price = math::tick_to_price(tick).ok_or(Error::ArithmeticError)?;

        // Flat incentive for whoever triggers settlement
        let fee = state.clearance_fee.min(clearance.amount_akre_available);
        if fee > 0 {
            TokenClient::new(env, &state.akre_token).transfer(
                &env.current_contract_address(),
                &caller,
                &fee,
            );
            clearance.amount_akre_available -= fee;
        }

        // Remaining un-matured months across all active quota, converted
        // to AKRE at the tick price, capped by what is left.
        let remaining_months = config.tenure - repay::matured_months(&rs, &config);
        let value_due = config
            .amount_yield_per_invest
            .checked_mul(i128::from(asset.num_quota_total))
            .and_then(|v| v.checked_mul(i128::from(remaining_months)))
            .ok_or(Error::ArithmeticError)?;
        let akre_equiv = value_due
            .checked_mul(math::RATE_BASE)
            .ok_or(Error::ArithmeticError)?
            / price;
        clearance.amount_akre_for_invester = akre_equiv.min(clearance.amount_akre_available);
        clearance.quota_pending = asset.num_quota_total;
        clearance.price_tick_on_clearance = tick;
        clearance.price_on_clearance = price;
        storage::set_clearance(env, asset_id, &clearance);
        ClearanceSettled {
            asset_id,
            price_tick: tick,
            price,
            amount_akre_for_invester: clearance.amount_akre_for_invester,
        }
        .publish(env);
        Ok(clearance.amount_akre_for_invester)
    }

    fn execute_final_clearance(
        env: &Env,
        asset_id: u64,
        amount_slash: i128,
        amount_fund: i128,
    ) -> Result<(), Error> {
        let state = FinanceStorage::get_state(env);
        state.require_manager();
        if amount_slash < 0 || amount_fund < 0 {
            return Err(Error::InvalidAmount);
        }
        let mut asset = storage::get_asset(env, asset_id)?;
        if asset.status != AssetStatus::Clearing {
            return Err(Error::StatusNotAllowed);
        }
        let mut clearance = storage::get_clearance(env, asset_id).ok_or(Error::ClearanceNotReady)?;
        if clearance.price_on_clearance == 0 {
            return Err(Error::ClearanceNotReady);
        }

        // Everything not reserved for investors is distributable.
        let distributable = clearance.amount_akre_available - clearance.amount_akre_for_invester;
        let split = amount_slash
            .checked_add(amount_fund)
            .ok_or(Error::ArithmeticError)?;
        if split > distributable {
            return Err(Error::AmountNotEnough);
        }

        let akre = TokenClient::new(env, &state.akre_token);
        let this = env.current_contract_address();
        if amount_slash > 0 {
            akre.transfer(&this, &state.slash_receiver, &amount_slash);
        }
        if amount_fund > 0 {
            akre.transfer(&this, &state.fund_receiver, &amount_fund);
        }
        let remainder = distributable - split;
        if remainder > 0 {
            akre.transfer(&this, &asset.owner, &remainder);
        }

        clearance.amount_akre_available = clearance.amount_akre_for_invester;
        asset.status = AssetStatus::ClearedFinal;
        storage::set_asset(env, asset_id, &asset);
        storage::set_clearance(env, asset_id, &clearance);
        publish_state(env, asset_id, &asset);
        Ok(())
    }
}
