// easing.rs
//
// Pure easing curves for widget interpolation.
// No dependencies on the pool or the directory — just math.

use std::f32::consts::PI;

/// Easing curve, selectable by its index in [`Easing::ALL`].
///
/// Scripts address curves by integer; any index outside the table resolves
/// to [`Easing::Linear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    SineIn,
    SineOut,
    SineInOut,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    /// Exponential easing (dramatic).
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    /// Quarter-circle arcs.
    CircIn,
    CircOut,
    CircInOut,
    /// Overshoot then settle.
    BackIn,
    BackOut,
    BackInOut,
    /// Elastic spring.
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    /// Bouncy finish.
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easing {
    /// Number of selectable curves, Linear included.
    pub const COUNT: usize = 31;

    /// Selection table. The position of a curve here is its script index.
    pub const ALL: [Easing; Easing::COUNT] = [
        Easing::Linear,
        Easing::SineIn,
        Easing::SineOut,
        Easing::SineInOut,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicIn,
        Easing::CubicOut,
        Easing::CubicInOut,
        Easing::QuartIn,
        Easing::QuartOut,
        Easing::QuartInOut,
        Easing::QuintIn,
        Easing::QuintOut,
        Easing::QuintInOut,
        Easing::ExpoIn,
        Easing::ExpoOut,
        Easing::ExpoInOut,
        Easing::CircIn,
        Easing::CircOut,
        Easing::CircInOut,
        Easing::BackIn,
        Easing::BackOut,
        Easing::BackInOut,
        Easing::ElasticIn,
        Easing::ElasticOut,
        Easing::ElasticInOut,
        Easing::BounceIn,
        Easing::BounceOut,
        Easing::BounceInOut,
    ];

    /// Resolve a script-provided curve index. Out-of-range indices yield Linear.
    pub fn from_index(index: i32) -> Easing {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Easing::Linear)
    }

    /// Index of this curve in [`Easing::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Apply the curve to a normalized time value `t` in [0, 1].
    /// Most curves return values in [0, 1]; Back and Elastic overshoot.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,

            // Sine
            Easing::SineIn => 1.0 - (t * PI / 2.0).cos(),
            Easing::SineOut => (t * PI / 2.0).sin(),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,

            // Polynomial families
            Easing::QuadIn => t.powi(2),
            Easing::QuadOut => poly_out(t, 2),
            Easing::QuadInOut => poly_in_out(t, 2),
            Easing::CubicIn => t.powi(3),
            Easing::CubicOut => poly_out(t, 3),
            Easing::CubicInOut => poly_in_out(t, 3),
            Easing::QuartIn => t.powi(4),
            Easing::QuartOut => poly_out(t, 4),
            Easing::QuartInOut => poly_in_out(t, 4),
            Easing::QuintIn => t.powi(5),
            Easing::QuintOut => poly_out(t, 5),
            Easing::QuintInOut => poly_in_out(t, 5),

            // Exponential
            Easing::ExpoIn => {
                if t == 0.0 { 0.0 } else { 2.0_f32.powf(10.0 * t - 10.0) }
            }
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
            Easing::ExpoInOut => {
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }

            // Circular
            Easing::CircIn => 1.0 - (1.0 - t * t).sqrt(),
            Easing::CircOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::CircInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }

            // Back (overshoot)
            Easing::BackIn => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
            Easing::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
            }
            Easing::BackInOut => {
                const C1: f32 = 1.70158;
                const C2: f32 = C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2) + 2.0) / 2.0
                }
            }

            // Elastic
            Easing::ElasticIn => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2.0_f32.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * C4).sin()
                }
            }
            Easing::ElasticOut => {
                const C4: f32 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
            Easing::ElasticInOut => {
                const C5: f32 = (2.0 * PI) / 4.5;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2.0_f32.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0
                } else {
                    (2.0_f32.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * C5).sin()) / 2.0 + 1.0
                }
            }

            // Bounce
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::BounceInOut => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }
}

#[inline]
fn poly_out(t: f32, n: i32) -> f32 {
    1.0 - (1.0 - t).powi(n)
}

#[inline]
fn poly_in_out(t: f32, n: i32) -> f32 {
    if t < 0.5 {
        2.0_f32.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

#[inline]
fn bounce_out(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 11] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];

    #[test]
    fn table_order_matches_index() {
        for (i, easing) in Easing::ALL.iter().enumerate() {
            assert_eq!(easing.index(), i, "{:?} is out of place", easing);
        }
    }

    #[test]
    fn every_curve_hits_endpoints() {
        for easing in Easing::ALL {
            assert!(easing.apply(0.0).abs() < 1e-4, "{:?} at 0 = {}", easing, easing.apply(0.0));
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{:?} at 1 = {}", easing, easing.apply(1.0));
        }
    }

    #[test]
    fn out_of_range_index_is_linear() {
        for index in [-1, 31, 32, 1000, i32::MIN, i32::MAX] {
            let easing = Easing::from_index(index);
            assert_eq!(easing, Easing::Linear);
            for t in SAMPLES {
                assert_eq!(easing.apply(t), Easing::Linear.apply(t));
            }
        }
    }

    #[test]
    fn in_range_index_resolves() {
        assert_eq!(Easing::from_index(0), Easing::Linear);
        assert_eq!(Easing::from_index(5), Easing::QuadOut);
        assert_eq!(Easing::from_index(30), Easing::BounceInOut);
    }

    #[test]
    fn in_out_curves_are_symmetric_at_midpoint() {
        let in_outs = [
            Easing::SineInOut,
            Easing::QuadInOut,
            Easing::CubicInOut,
            Easing::QuartInOut,
            Easing::QuintInOut,
            Easing::ExpoInOut,
            Easing::CircInOut,
            Easing::BounceInOut,
        ];
        for easing in in_outs {
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-4, "{:?} at 0.5 = {}", easing, easing.apply(0.5));
        }
    }

    #[test]
    fn back_overshoots() {
        assert!(Easing::BackIn.apply(0.2) < 0.0);
        assert!(Easing::BackOut.apply(0.8) > 1.0);
    }

    #[test]
    fn elastic_out_overshoots() {
        let peak = SAMPLES.iter().map(|&t| Easing::ElasticOut.apply(t)).fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "ElasticOut never overshot, peak {}", peak);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadIn.apply(-2.0), 0.0);
        assert_eq!(Easing::QuadIn.apply(3.0), 1.0);
    }
}
