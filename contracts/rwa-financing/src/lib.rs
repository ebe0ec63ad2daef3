#![no_std]

mod asset;
mod clearance;
mod contract;
mod error;
mod index_types;
mod invest;
mod math;
mod oracle;
mod repay;
mod storage;
mod types;
mod yields;

pub use asset::IsAssetLifecycle;
pub use clearance::IsClearance;
pub use contract::{RWAFinancingContract, RWAFinancingContractClient};
pub use error::Error;
pub use invest::IsInvestPool;
pub use repay::IsRepayEngine;
pub use types::*;
pub use yields::IsYieldDistribution;
