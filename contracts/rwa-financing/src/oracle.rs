use soroban_sdk::{Env, contractclient};

/// Price feed consumed only during clearance settlement. The tick is a
/// log-scaled price coordinate; `1.0001^tick` converts it to the AKRE
/// price used to size investor compensation.
#[contractclient(name = "TickOracleClient")]
pub trait TickFeed {
    fn get_tick(env: Env) -> i32;
}
