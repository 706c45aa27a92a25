//! Drive state DTOs shared between `drive-engine` and its callers (spec §3,
//! §4.8). The decay/random-walk math lives in `drive-engine`; this module
//! only carries the wire shapes plus the pure `categorize`/`derive_focus`
//! helpers that both sides need to agree on.

use serde::{Deserialize, Serialize};

/// Per-user five-dimension mood vector (spec §3 "Drive State").
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DriveVector {
    pub energy: f64,
    pub sociability: f64,
    pub curiosity: f64,
    pub empathy_reserve: f64,
    pub novelty_seek: f64,
}

impl DriveVector {
    pub const BASELINE: f64 = 0.5;

    pub fn baseline() -> Self {
        Self {
            energy: Self::BASELINE,
            sociability: Self::BASELINE,
            curiosity: Self::BASELINE,
            empathy_reserve: Self::BASELINE,
            novelty_seek: Self::BASELINE,
        }
    }

    /// Clamps every dimension to `[0, 1]` (spec §3 invariant).
    pub fn clamp(&mut self) {
        self.energy = self.energy.clamp(0.0, 1.0);
        self.sociability = self.sociability.clamp(0.0, 1.0);
        self.curiosity = self.curiosity.clamp(0.0, 1.0);
        self.empathy_reserve = self.empathy_reserve.clamp(0.0, 1.0);
        self.novelty_seek = self.novelty_seek.clamp(0.0, 1.0);
    }
}

/// Named deltas accepted by `POST /drive/update` (spec §6).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct DriveDelta {
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub sociability: f64,
    #[serde(default)]
    pub curiosity: f64,
    #[serde(default)]
    pub empathy_reserve: f64,
    #[serde(default)]
    pub novelty_seek: f64,
}

/// One of the five qualitative buckets a dimension's value falls into
/// (SPEC_FULL §10.7 thresholds: 0.25 / 0.4 / 0.6 / 0.75).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

pub fn categorize(value: f64) -> DriveLevel {
    if value < 0.25 {
        DriveLevel::VeryLow
    } else if value < 0.4 {
        DriveLevel::Low
    } else if value < 0.6 {
        DriveLevel::Moderate
    } else if value < 0.75 {
        DriveLevel::High
    } else {
        DriveLevel::VeryHigh
    }
}

/// Derived `focus` used by Policy Guardrails' `{focus}` placeholder (spec
/// §4.5, Open Question resolved in SPEC_FULL §12.2): the drive model has no
/// `focus` dimension, so it is computed from curiosity and empathy_reserve.
pub fn derive_focus(v: &DriveVector) -> f64 {
    v.curiosity * (1.0 - (1.0 - v.empathy_reserve) / 2.0)
}

/// Style-hint policy returned by `POST /drive/policy` (spec §4.8).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrivePolicy {
    pub energy_level: DriveLevel,
    pub social_style: DriveLevel,
    pub curiosity_level: DriveLevel,
    pub empathy_approach: DriveLevel,
    pub novelty_preference: DriveLevel,
    pub focus: f64,
    pub style_hints: Vec<String>,
}

/// Builds the style-hint list from a drive vector, per SPEC_FULL §10.7 /
/// original `_generate_style_hints`: each dimension contributes a hint only
/// past the 0.3/0.7 thresholds; falls back to one neutral hint if none fire.
pub fn style_hints(v: &DriveVector) -> Vec<String> {
    let mut hints = Vec::new();
    if v.energy < 0.3 {
        hints.push("Keep responses brief and focused".to_string());
    } else if v.energy > 0.7 {
        hints.push("Provide detailed, energetic responses".to_string());
    }
    if v.sociability < 0.3 {
        hints.push("Minimize social chit-chat".to_string());
    } else if v.sociability > 0.7 {
        hints.push("Include friendly, conversational elements".to_string());
    }
    if v.curiosity < 0.3 {
        hints.push("Stick to practical, direct information".to_string());
    } else if v.curiosity > 0.7 {
        hints.push("Include interesting facts and connections".to_string());
    }
    if v.empathy_reserve < 0.3 {
        hints.push("Focus on solutions over emotional support".to_string());
    } else if v.empathy_reserve > 0.7 {
        hints.push("Show understanding and emotional awareness".to_string());
    }
    if v.novelty_seek < 0.3 {
        hints.push("Use familiar, established approaches".to_string());
    } else if v.novelty_seek > 0.7 {
        hints.push("Introduce novel ideas and perspectives".to_string());
    }
    if hints.is_empty() {
        hints.push("Maintain balanced, neutral communication style".to_string());
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_thresholds() {
        assert_eq!(categorize(0.1), DriveLevel::VeryLow);
        assert_eq!(categorize(0.25), DriveLevel::Low);
        assert_eq!(categorize(0.39), DriveLevel::Low);
        assert_eq!(categorize(0.4), DriveLevel::Moderate);
        assert_eq!(categorize(0.59), DriveLevel::Moderate);
        assert_eq!(categorize(0.6), DriveLevel::High);
        assert_eq!(categorize(0.74), DriveLevel::High);
        assert_eq!(categorize(0.75), DriveLevel::VeryHigh);
    }

    #[test]
    fn style_hints_default_when_all_moderate() {
        let v = DriveVector::baseline();
        assert_eq!(style_hints(&v), vec!["Maintain balanced, neutral communication style"]);
    }

    #[test]
    fn clamp_bounds_values() {
        let mut v = DriveVector {
            energy: 1.4,
            sociability: -0.3,
            curiosity: 0.5,
            empathy_reserve: 0.5,
            novelty_seek: 0.5,
        };
        v.clamp();
        assert_eq!(v.energy, 1.0);
        assert_eq!(v.sociability, 0.0);
    }
}
