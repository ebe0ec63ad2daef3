use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Referenced asset type has not been registered
    AssetTypeNotFound = 1,

    /// Referenced asset has not been registered
    AssetNotFound = 2,

    /// Referenced investing position does not exist
    InvestingNotFound = 3,

    /// Operation not allowed for the asset's current status
    StatusNotAllowed = 4,

    /// Operation not allowed for the investing position's current status
    WrongStatus = 5,

    /// Caller is not the asset owner
    NotAssetOwner = 6,

    /// Caller is not the investor behind this position
    NotInvestor = 7,

    /// Minimum holding period before an investment exit has not elapsed
    NeedToStay = 8,

    /// Investment window after onboarding has closed
    InvestOverdued = 9,

    /// No additional month has matured for this position
    NotMature = 10,

    /// The authority approval deadline has passed
    ExpiredApproval = 11,

    /// Purchase would push sold quota above the type's limit
    InvestOverflowed = 12,

    /// Sold quota does not exceed the reserve plus what was already drawn
    LowInvestment = 13,

    /// Nothing is releasable beyond the investor yield reserve
    NoMatureRepayment = 14,

    /// Requested amount exceeds what is available for distribution
    AmountNotEnough = 15,

    /// A slash was already recorded at this timestamp
    CannotSlashTwice = 16,

    /// Investor clearance has already been settled
    AlreadyCleared = 17,

    /// Investor clearance has not been settled yet
    ClearanceNotReady = 18,

    /// No payment token registered under the type's currency bucket
    NoPaymentToken = 19,

    /// Amount must be positive and quota non-zero
    InvalidAmount = 20,

    /// Arithmetic overflow or underflow occurred
    ArithmeticError = 21,
}
