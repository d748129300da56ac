//! Unit Conversion Functions
//!
//! Provides conversion functions for powertrain tuning:
//! - Torque: lb-ft ↔ N·m
//! - Power: hp ↔ kW
//! - Torque implied by a power target at a given engine speed
//!
//! The core holds torque in newton-meters; every imperial figure shown to
//! the user goes through these helpers.

/// Newton-meters per pound-foot
pub const NM_PER_FT_LB: f64 = 1.355818;

/// Pound-feet per newton-meter
pub const FT_LB_PER_NM: f64 = 0.73756;

/// Constant relating horsepower, torque (lb-ft) and RPM: hp = tq * rpm / 5252
pub const HP_TORQUE_CONSTANT: f64 = 5252.0;

/// Kilowatts per mechanical horsepower
pub const KW_PER_HP: f64 = 0.7457;

/// Convert pound-feet to newton-meters
pub fn ft_lb_to_nm(ft_lb: f64) -> f64 {
    ft_lb * NM_PER_FT_LB
}

/// Convert newton-meters to pound-feet
pub fn nm_to_ft_lb(nm: f64) -> f64 {
    nm * FT_LB_PER_NM
}

/// Convert horsepower to kilowatts
pub fn hp_to_kw(hp: f64) -> f64 {
    hp * KW_PER_HP
}

/// Convert kilowatts to horsepower
pub fn kw_to_hp(kw: f64) -> f64 {
    kw / KW_PER_HP
}

/// Torque in lb-ft implied by a horsepower figure at a given RPM
///
/// Returns 0 for zero RPM rather than dividing.
pub fn torque_ft_lb_at(hp: f64, rpm: f64) -> f64 {
    if rpm == 0.0 {
        return 0.0;
    }
    hp * HP_TORQUE_CONSTANT / rpm
}

/// Torque in whole newton-meters implied by a horsepower figure at an RPM
pub fn torque_nm_at(hp: f64, rpm: f64) -> f64 {
    ft_lb_to_nm(torque_ft_lb_at(hp, rpm)).round()
}

/// Recommended peak-torque choices (lb-ft) for a horsepower target
///
/// The ladder follows the figures real truck engines in this power class
/// ship with, which differ from the raw physics ceiling.
pub fn recommended_torque_ft_lb(hp: u32) -> &'static [u32] {
    match hp {
        0..=374 => &[1250, 1450],
        375..=424 => &[1450, 1550, 1650],
        425..=474 => &[1550, 1650, 1750],
        475..=524 => &[1650, 1850],
        525..=574 => &[1850, 2050],
        575..=624 => &[2050, 2250],
        _ => &[2250, 2450],
    }
}
