use log::trace;

use crate::error::EphemerisResult;

pub const MINUTES_PER_DAY: u32 = 1440;

/// First upward and downward zero crossings, in minutes from the start of
/// the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Crossings {
    pub rising: Option<f64>,
    pub setting: Option<f64>,
}

impl Crossings {
    pub fn is_complete(&self) -> bool {
        self.rising.is_some() && self.setting.is_some()
    }
}

pub fn intervals_per_day(step_minutes: u32) -> u32 {
    MINUTES_PER_DAY.div_ceil(step_minutes.max(1))
}

/// Sample offsets covering [0, 1440] inclusive. The last step is shortened
/// when `step_minutes` does not divide a day.
pub fn sample_minutes(step_minutes: u32) -> impl Iterator<Item = u32> {
    let step = step_minutes.max(1);
    (0..=intervals_per_day(step)).map(move |k| (k * step).min(MINUTES_PER_DAY))
}

/// Position of the zero of the line through `(t1, v1)` and `(t2, v2)`.
pub fn interpolate_zero(t1: f64, v1: f64, t2: f64, v2: f64) -> f64 {
    let fraction = v1 / (v1 - v2);
    t1 + fraction * (t2 - t1)
}

/// Walk the window and report the first rising and first setting crossing
/// of `value_at`. A rise is negative to non-negative, a set is positive to
/// non-positive. Sampling stops once both are found.
pub fn first_crossings<F>(step_minutes: u32, mut value_at: F) -> EphemerisResult<Crossings>
where
    F: FnMut(u32) -> EphemerisResult<f64>,
{
    let mut crossings = Crossings::default();
    let mut previous: Option<(u32, f64)> = None;

    for minute in sample_minutes(step_minutes) {
        let value = value_at(minute)?;
        trace!("sample minute={} value={:.4}", minute, value);

        if let Some((m1, v1)) = previous {
            let (t1, t2) = (m1 as f64, minute as f64);
            if crossings.rising.is_none() && v1 < 0.0 && value >= 0.0 {
                crossings.rising = Some(interpolate_zero(t1, v1, t2, value));
            } else if crossings.setting.is_none() && v1 > 0.0 && value <= 0.0 {
                crossings.setting = Some(interpolate_zero(t1, v1, t2, value));
            }
            if crossings.is_complete() {
                break;
            }
        }
        previous = Some((minute, value));
    }
    Ok(crossings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_include_both_ends() {
        let one: Vec<u32> = sample_minutes(1).collect();
        assert_eq!(one.len(), 1441);
        assert_eq!(one.first(), Some(&0));
        assert_eq!(one.last(), Some(&1440));

        let seven: Vec<u32> = sample_minutes(7).collect();
        assert_eq!(seven.last(), Some(&1440));
        assert_eq!(seven[seven.len() - 2], 1435);
    }

    #[test]
    fn zero_step_behaves_like_one_minute() {
        assert_eq!(sample_minutes(0).count(), 1441);
    }

    #[test]
    fn interpolation_is_linear() {
        assert!((interpolate_zero(10.0, -1.0, 11.0, 3.0) - 10.25).abs() < 1e-12);
    }

    #[test]
    fn finds_first_rise_and_set_of_a_sine() {
        // Period of 12 hours: rises at 0+, sets at 360, rises again at 720.
        let crossings = first_crossings(1, |m| {
            Ok((m as f64 / 720.0 * std::f64::consts::TAU - 0.001).sin())
        })
        .unwrap();
        let rising = crossings.rising.unwrap();
        let setting = crossings.setting.unwrap();
        assert!(rising < 1.0, "rising={}", rising);
        assert!((setting - 360.0).abs() < 0.5, "setting={}", setting);
    }

    #[test]
    fn stops_after_both_crossings() {
        let mut evaluations = 0;
        first_crossings(1, |m| {
            evaluations += 1;
            Ok(if (100..200).contains(&m) { 1.0 } else { -1.0 })
        })
        .unwrap();
        assert_eq!(evaluations, 201);
    }

    #[test]
    fn no_crossing_when_always_positive() {
        let crossings = first_crossings(5, |_| Ok(10.0)).unwrap();
        assert_eq!(crossings, Crossings::default());
    }
}
