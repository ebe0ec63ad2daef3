#![no_std]
use soroban_sdk::{
    Address, Env, Symbol, contract, contracterror, contractimpl, contracttype, symbol_short,
};


#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// No tick has been published yet
    TickNotSet = 1,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TickData {
    /// Log-scaled price coordinate; `1.0001^tick` converts it to a price
    pub tick: i32,
    /// Ledger timestamp the tick was recorded at
    pub timestamp: u64,
}

const ADMIN_KEY: Symbol = symbol_short!("ADMIN");
const TICK_KEY: Symbol = symbol_short!("TICK");

#[contract]
pub struct TickOracle;

#[contractimpl]
impl TickOracle {
    pub fn __constructor(env: &Env, admin: Address) {
        env.storage().instance().set(&ADMIN_KEY, &admin);
    }

    fn require_admin(env: &Env) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN_KEY)
            .expect("admin must be set");
        admin.require_auth();
    }

    /// Publish a new tick. Admin-only.
    pub fn set_tick(env: &Env, tick: i32) {
        Self::require_admin(env);
        env.storage().instance().set(
            &TICK_KEY,
            &TickData {
                tick,
                timestamp: env.ledger().timestamp(),
            },
        );
    }

    /// Most recently published tick value.
    pub fn get_tick(env: &Env) -> Result<i32, Error> {
        Self::last_tick(env).map(|data| data.tick)
    }

    /// Most recently published tick with its recording timestamp.
    pub fn last_tick(env: &Env) -> Result<TickData, Error> {
        env.storage()
            .instance()
            .get(&TICK_KEY)
            .ok_or(Error::TickNotSet)
    }
}
