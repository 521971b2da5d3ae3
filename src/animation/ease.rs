/// Maps linear activity progress to eased progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    /// No easing.
    #[default]
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in/out.
    EaseInOut,
    /// Constant acceleration over the first `accelerate` fraction and constant deceleration
    /// over the last `decelerate` fraction, with uniform speed in between.
    #[serde(rename_all = "camelCase")]
    AccelerateDecelerate {
        /// Fraction of the duration spent accelerating.
        accelerate: f64,
        /// Fraction of the duration spent decelerating.
        decelerate: f64,
    },
}

impl Ease {
    /// Apply this easing to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::AccelerateDecelerate {
                accelerate,
                decelerate,
            } => accelerate_decelerate(t, accelerate, decelerate),
        }
    }
}

fn accelerate_decelerate(t: f64, acc: f64, dec: f64) -> f64 {
    let acc = acc.clamp(0.0, 1.0);
    let dec = dec.clamp(0.0, 1.0);
    // Fractions that overlap cannot describe a valid speed profile; treat as linear.
    if acc + dec > 1.0 || (acc == 0.0 && dec == 0.0) {
        return t;
    }

    // Peak speed keeps the covered distance at exactly 1.
    let c = 1.0 - 0.5 * acc - 0.5 * dec;

    let mut covered = 0.0;
    if t < acc {
        covered += 0.5 * t * t / acc;
    } else {
        covered += 0.5 * acc;
        if t <= 1.0 - dec {
            covered += t - acc;
        } else {
            covered += 1.0 - acc - dec;
            let rel = t - 1.0 + dec;
            covered += rel - 0.5 * rel * rel / dec;
        }
    }
    covered / c
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
