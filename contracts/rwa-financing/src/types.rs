use soroban_sdk::{Address, BytesN, contracttype};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AssetStatus {
    /// Collateral posted; physical asset not yet delivered
    Deposited,
    /// Deposit withdrawn with authority approval before delivery
    Cancelled,
    /// Delivery proof attached; open for investment
    Delivered,
    /// Live and repaying on the monthly schedule
    Onboarded,
    /// Forced out of service by slashing; collateral being distributed
    Clearing,
    /// Remaining collateral fully distributed
    ClearedFinal,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InvestingStatus {
    Active,
    /// Exited pre-onboarding; principal refunded, quota freed
    Aborted,
    /// All tenure months of yield withdrawn, or compensated at clearance
    Complete,
}

/// Debt-overdue trigger for forced clearing. An asset whose running
/// debt x overdue-seconds product exceeds `amount_debt * num_overdue_days`
/// (expressed in seconds) is forced into `Clearing`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClearanceParams {
    pub amount_debt: i128,
    pub num_overdue_days: u32,
}

/// Slash escalation caps. Either counter reaching its cap forces clearing.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlashCaps {
    /// Maximum cumulative slashes over the asset's lifetime
    pub max_total: u32,
    /// Maximum "line" slashes, each within the cooldown window of the last
    pub max_consecutive: u32,
}

/// Economics of a class of assets. Write-once; a new type id is assigned
/// on registration and the record never changes afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetTypeConfig {
    /// Total number of monthly yield periods
    pub tenure: u32,
    /// Maximum sellable quota units
    pub invest_quota: u32,
    /// Price of one quota unit, in the assigned payment currency
    pub value_per_invest: i128,
    /// Required monthly repayment
    pub amount_repay_monthly: i128,
    /// Yield per quota unit per matured month
    pub amount_yield_per_invest: i128,
    /// Collateral required from the asset owner, in AKRE
    pub amount_deposit: i128,
    /// Payment-currency bucket assigned round-robin to instances
    pub invest_token_type: u32,
    /// Days after onboarding during which investment is still accepted
    pub max_invest_overdue: u32,
    /// Minimum holding days before a pre-onboarding exit
    pub min_invest_exit: u32,
    /// Reference into the interest-rate table
    pub interest_id: u32,
    pub params_clearance: ClearanceParams,
    pub slash_caps: SlashCaps,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Asset {
    pub owner: Address,
    pub status: AssetStatus,
    pub type_asset: u32,
    /// Off-chain delivery proof reference, set on delivery
    pub delivery_proof: Option<BytesN<32>>,
    /// Payment currency assigned from the type's bucket at creation
    pub payment_token: Address,
    /// Count of investment records created, including aborted ones
    pub num_investings: u32,
    /// Sum of active quota sold; never exceeds the type's invest_quota
    pub num_quota_total: u32,
    /// Collateral held; copied from the type at creation for immutability
    pub amount_deposit: i128,
    pub onboard_timestamp: u64,
    /// Lifetime total repaid
    pub sum_amount_repaid: i128,
    /// Matured yield obligation accrued towards investors
    pub amount_for_invest_withdraw: i128,
    /// Yield actually withdrawn by investors
    pub amount_invest_withdrawn: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Investing {
    pub investor: Address,
    /// Purchase timestamp; exits are gated on the holding period from here
    pub timestamp: u64,
    pub status: InvestingStatus,
    pub num_quota: u32,
    /// Last month index for which yield was withdrawn; capped by tenure
    pub month_taken: u32,
}

/// Monthly due schedule for an onboarded asset.
///
/// `amount_debt` and `timestamp_debt` are both zero or both non-zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetRepayStatus {
    /// Current due-period index; starts at 1 at onboarding
    pub month_due_repay: u32,
    /// End-of-day boundary closing the current due period
    pub timestamp_next_due: u64,
    /// Remaining obligation for the current period
    pub amount_repay_due: i128,
    /// Carried-over unpaid balance accruing compound interest
    pub amount_debt: i128,
    /// Timestamp interest accrues from
    pub timestamp_debt: u64,
    /// Over-payment credit, consumed before future due amounts
    pub amount_pre_pay: i128,
    /// Cumulative repayment released to the manager
    pub amount_repay_taken: i128,
    /// Cumulative quota count whose invested principal has been released
    pub num_invest_taken: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetClearance {
    /// Debt x overdue-seconds threshold forcing clearing
    pub product_to_trigger: i128,
    /// Running debt x overdue-seconds accumulated at each slash
    pub amount_debt_overdue_product: i128,
    /// Remaining collateral; only ever decremented once clearing
    pub amount_akre_available: i128,
    /// Unclaimed collateral reserved for investor compensation
    pub amount_akre_for_invester: i128,
    /// Quota units whose compensation has not been claimed yet
    pub quota_pending: u32,
    pub slash_caps: SlashCaps,
    pub times_slashed: u32,
    pub times_line_slashed: u32,
    pub timestamp_last_slash: u64,
    pub amount_slashed: i128,
    pub price_tick_on_clearance: i32,
    /// `1.0001^tick` in RATE_BASE scale; zero until settlement runs
    pub price_on_clearance: i128,
    pub timestamp_clearance: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GlobalStatus {
    pub num_asset_type: u32,
    pub num_asset: u64,
    pub num_cancelled: u64,
    pub num_delivered: u64,
    pub num_onboarded: u64,
    pub num_tokens: u32,
    pub num_invest: u64,
}
