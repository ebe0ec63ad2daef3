//! Fixed-point compounding and civil-calendar arithmetic.
//!
//! All rates and prices are scaled by [`RATE_BASE`]. Compounding is a
//! binary exponentiation by squaring with half-base rounding on every
//! intermediate multiplication, so a given (rate, seconds) pair always
//! produces the same result regardless of call pattern.

/// Fixed-point scale for per-second rates and clearance prices
pub const RATE_BASE: i128 = 1_000_000_000;

pub const SECONDS_PER_DAY: u64 = 86_400;

const END_OF_DAY: u64 = SECONDS_PER_DAY - 1;

// 1.0001 in RATE_BASE scale, the tick step of the price oracle
const TICK_RATE: i128 = RATE_BASE + RATE_BASE / 10_000;

const HALF_BASE: i128 = RATE_BASE / 2;

/// `rate^seconds` scaled by RATE_BASE. `rpow(rate, 0) == RATE_BASE` for any
/// rate; `rpow(RATE_BASE, n) == RATE_BASE` for any n. None on overflow.
pub fn rpow(rate: i128, seconds: u64) -> Option<i128> {
    if seconds == 0 {
        return Some(RATE_BASE);
    }
    let mut z = if seconds % 2 != 0 { rate } else { RATE_BASE };
    let mut x = rate;
    let mut n = seconds / 2;
    while n > 0 {
        x = x.checked_mul(x)?.checked_add(HALF_BASE)? / RATE_BASE;
        if n % 2 != 0 {
            z = z.checked_mul(x)?.checked_add(HALF_BASE)? / RATE_BASE;
        }
        n /= 2;
    }
    Some(z)
}

/// Grow `amount` at `rate` per second over `seconds`.
pub fn compound(amount: i128, rate: i128, seconds: u64) -> Option<i128> {
    amount
        .checked_mul(rpow(rate, seconds)?)?
        .checked_add(HALF_BASE)
        .map(|v| v / RATE_BASE)
}

/// Convert an oracle tick to a price in RATE_BASE scale: `1.0001^tick`,
/// negative ticks via the reciprocal. None on overflow or underflow to zero.
pub fn tick_to_price(tick: i32) -> Option<i128> {
    let grown = rpow(TICK_RATE, u64::from(tick.unsigned_abs()))?;
    let price = if tick < 0 {
        RATE_BASE.checked_mul(RATE_BASE)? / grown
    } else {
        grown
    };
    if price > 0 { Some(price) } else { None }
}

// Civil-calendar day arithmetic over the proleptic Gregorian calendar,
// after Howard Hinnant's chrono-compatible algorithms.

pub fn days_from_civil(y: i64, m: u32, d: u32) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as i64;
    let mp = i64::from((m + 9) % 12);
    let doy = (153 * mp + 2) / 5 + i64::from(d) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let y = yoe + era * 400;
    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn is_leap(y: i64) -> bool {
    y % 4 == 0 && (y % 100 != 0 || y % 400 == 0)
}

fn last_day_of_month(y: i64, m: u32) -> u32 {
    match m {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap(y) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

/// Due boundary of period `months_after` for an asset onboarded at
/// `onboard`: the onboarding date plus that many calendar months, anchored
/// to the onboarding day-of-month (clamped to the target month's length)
/// and normalized to end-of-day.
pub fn month_boundary(onboard: u64, months_after: u32) -> u64 {
    let (y, m, d) = civil_from_days((onboard / SECONDS_PER_DAY) as i64);
    let months = y * 12 + i64::from(m) - 1 + i64::from(months_after);
    let (ny, nm) = (months.div_euclid(12), (months.rem_euclid(12) + 1) as u32);
    let nd = d.min(last_day_of_month(ny, nm));
    days_from_civil(ny, nm, nd) as u64 * SECONDS_PER_DAY + END_OF_DAY
}
