//! Torque curve synthesis
//!
//! Builds normalized torque curves (1.0 = peak torque) for heavy-duty
//! diesel engines in the SCS style: a low-RPM ramp out of idle, a flat peak
//! plateau, and a taper above the point where holding peak torque would
//! exceed the engine's advertised power.

use crate::sii::CurvePoint;
use crate::unit_conversion::{ft_lb_to_nm, torque_ft_lb_at};

/// RPM grid used for synthesized curves
const CURVE_RPMS: [u32; 17] = [
    300, 600, 1000, 1100, 1200, 1300, 1400, 1500, 1600, 1700, 1800, 1900, 2000, 2100, 2200, 2400,
    2600,
];

/// Default curve for a typical heavy-duty diesel engine
pub fn default_curve() -> Vec<CurvePoint> {
    vec![
        CurvePoint::new(300, 0.0),
        CurvePoint::new(440, 0.5),
        CurvePoint::new(1000, 1.0),
        CurvePoint::new(1100, 1.0),
        CurvePoint::new(1400, 1.0),
        CurvePoint::new(1900, 0.77),
        CurvePoint::new(2400, 0.5),
        CurvePoint::new(2600, 0.0),
    ]
}

/// Synthesize a curve that holds peak torque as long as the power target allows
///
/// Below 1000 rpm the ratio follows the standard SCS ramp out of idle. From
/// 1000 rpm up, the ratio is capped so that torque at that engine speed
/// never implies more than `target_hp`; once the cap falls below the peak
/// the curve tapers. Ratios are clamped to `[0, 1]` and rounded to three
/// decimals.
pub fn smart_curve(target_hp: u32, peak_torque_nm: u32) -> Vec<CurvePoint> {
    let peak_nm = peak_torque_nm as f64;
    let mut points = Vec::with_capacity(CURVE_RPMS.len());

    for &rpm in &CURVE_RPMS {
        let ratio = if rpm < 1000 {
            match rpm {
                300 => 0.0,
                600 => 0.7,
                _ => 0.9 + (rpm as f64 - 600.0) / 400.0 * 0.1,
            }
        } else if peak_nm > 0.0 {
            let max_allowed_nm = ft_lb_to_nm(torque_ft_lb_at(target_hp as f64, rpm as f64));
            (max_allowed_nm / peak_nm).min(1.0)
        } else {
            0.0
        };

        let clamped = ratio.clamp(0.0, 1.0);
        points.push(CurvePoint::new(rpm, (clamped * 1000.0).round() / 1000.0));
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curve_shape() {
        let curve = default_curve();
        assert!(curve.len() >= 2);
        assert!(curve.windows(2).all(|w| w[0].rpm < w[1].rpm));
        assert_eq!(curve.first().unwrap().ratio, 0.0);
        assert_eq!(curve.last().unwrap().ratio, 0.0);
    }

    #[test]
    fn test_smart_curve_holds_peak_then_tapers() {
        // 600 hp / 2050 N·m: peak power allows full torque up to ~2078 rpm
        let curve = smart_curve(600, 2050);
        let at = |rpm: u32| curve.iter().find(|p| p.rpm == rpm).unwrap().ratio;

        assert_eq!(at(300), 0.0);
        assert_eq!(at(600), 0.7);
        assert_eq!(at(1400), 1.0);
        assert_eq!(at(2000), 1.0);
        // Above the crossover the cap bites
        assert!(at(2200) < 1.0);
        assert!(at(2600) < at(2400));
    }

    #[test]
    fn test_smart_curve_ratios_bounded() {
        for point in smart_curve(450, 2508) {
            assert!((0.0..=1.0).contains(&point.ratio), "ratio out of range at {}", point.rpm);
        }
    }
}
