//! Gearing math
//!
//! Road speed, engine speed and ratio calculations used by the transmission
//! editor's assistant features. All functions are pure; zero gear or
//! differential ratios yield 0 rather than dividing.

use std::f64::consts::PI;

/// Inches per mile
const INCHES_PER_MILE: f64 = 63_360.0;

/// Kilometers per hour in one mile per hour
const KPH_PER_MPH: f64 = 1.60934;

/// Road speed at an engine speed for a given drivetrain
///
/// `tire_diameter` is in inches (41.5 for a standard 11R22.5 tire). Returns
/// mph, or km/h when `imperial` is false.
pub fn speed_at_rpm(
    rpm: f64,
    gear_ratio: f64,
    diff_ratio: f64,
    tire_diameter: f64,
    imperial: bool,
) -> f64 {
    if gear_ratio == 0.0 || diff_ratio == 0.0 {
        return 0.0;
    }

    let circumference = PI * tire_diameter;
    let wheel_rpm = rpm / (gear_ratio * diff_ratio);
    let inches_per_hour = wheel_rpm * circumference * 60.0;
    let mph = inches_per_hour / INCHES_PER_MILE;

    if imperial {
        mph
    } else {
        mph * KPH_PER_MPH
    }
}

/// Engine speed needed to hold a road speed with a given drivetrain
///
/// `speed` is mph, or km/h when `imperial` is false.
pub fn rpm_at_speed(
    speed: f64,
    gear_ratio: f64,
    diff_ratio: f64,
    tire_diameter: f64,
    imperial: bool,
) -> f64 {
    if gear_ratio == 0.0 || diff_ratio == 0.0 || tire_diameter == 0.0 {
        return 0.0;
    }
    let speed_mph = if imperial { speed } else { speed / KPH_PER_MPH };
    speed_mph * gear_ratio * diff_ratio * INCHES_PER_MILE / (60.0 * PI * tire_diameter)
}

/// Gear ratio needed to hit a target speed at a specific engine speed
pub fn required_ratio(target_mph: f64, rpm: f64, diff_ratio: f64, tire_diameter: f64) -> f64 {
    if target_mph == 0.0 || rpm == 0.0 {
        return 0.0;
    }
    let circumference = PI * tire_diameter;
    let wheel_rpm = target_mph * INCHES_PER_MILE / 60.0 / circumference;
    rpm / (wheel_rpm * diff_ratio)
}

/// Differential ratio that puts the top gear at a cruise RPM for a target speed
///
/// "Sweet spot" RPM is where the engine's power band sits at cruise.
pub fn suggest_diff_ratio(
    target_mph: f64,
    sweet_spot_rpm: f64,
    top_gear_ratio: f64,
    tire_diameter: f64,
) -> f64 {
    if target_mph == 0.0 || sweet_spot_rpm == 0.0 || top_gear_ratio == 0.0 {
        return 0.0;
    }
    let circumference = PI * tire_diameter;
    let wheel_rpm = target_mph * INCHES_PER_MILE / 60.0 / circumference;
    sweet_spot_rpm / (wheel_rpm * top_gear_ratio)
}
