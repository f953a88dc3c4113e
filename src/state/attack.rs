use crate::model::AttackKind;

use super::Target;

// One in-flight attack: travel towards the target, hit, then clear.
#[derive(Debug, Clone)]
pub struct AttackAnim {
    pub kind: AttackKind,
    pub started_at: f64,
    /// Where the weapon flies to (target position when the attack began).
    pub travel_to: Target,
    pub points: u32,
    pub hit: bool,
}

impl AttackAnim {
    pub fn new(kind: AttackKind, now: f64, travel_to: Target, points: u32) -> Self {
        Self {
            kind,
            started_at: now,
            travel_to,
            points,
            hit: false,
        }
    }

    pub fn hit_at(&self, hit_delay_ms: f64) -> f64 {
        self.started_at + hit_delay_ms
    }

    pub fn clear_at(&self, clear_ms: f64) -> f64 {
        self.started_at + clear_ms
    }

    /// Impact text, shown from the hit until the attack clears.
    pub fn effect_text(&self) -> Option<&'static str> {
        self.hit.then(|| self.kind.effect_text())
    }
}
