use soroban_sdk::{Address, contractevent};

use crate::types::AssetStatus;

#[contractevent(topics = ["asset"])]
pub struct AssetState {
    #[topic]
    pub asset_id: u64,
    pub status: AssetStatus,
    pub num_quota_total: u32,
    pub ledger: u32,
    pub timestamp: u64,
}

#[contractevent(topics = ["invest"])]
pub struct InvestChanged {
    #[topic]
    pub asset_id: u64,
    pub investor: Address,
    pub index: u32,
    pub num_quota: u32,
    pub amount: i128,
    pub exit: bool,
}

#[contractevent(topics = ["repay"])]
pub struct RepayReceived {
    #[topic]
    pub asset_id: u64,
    pub amount: i128,
    pub month_due_repay: u32,
    pub amount_debt: i128,
    pub amount_pre_pay: i128,
}

#[contractevent(topics = ["yield"])]
pub struct YieldTaken {
    #[topic]
    pub asset_id: u64,
    pub investor: Address,
    pub index: u32,
    pub amount: i128,
    pub amount_akre: i128,
    pub month_taken: u32,
}

#[contractevent(topics = ["slash"])]
pub struct SlashExecuted {
    #[topic]
    pub asset_id: u64,
    pub amount: i128,
    pub times_slashed: u32,
    pub times_line_slashed: u32,
    pub amount_debt_overdue_product: i128,
}

#[contractevent(topics = ["clearance"])]
pub struct ClearanceSettled {
    #[topic]
    pub asset_id: u64,
    pub price_tick: i32,
    pub price: i128,
    pub amount_akre_for_invester: i128,
}
