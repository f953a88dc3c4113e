use rand::Rng;
use yew::prelude::*;

use crate::config::CelebrationPreset;

const PALETTE: [&str; 6] = [
    "#f85149", "#d4af37", "#58a6ff", "#3fb950", "#bc8cff", "#ff9bce",
];

/// How long a burst stays mounted.
pub const BURST_LIFETIME_MS: f64 = 2_000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Landing offset from the origin, in vmin.
    pub dx: f64,
    pub dy: f64,
    pub spin_deg: f64,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Burst {
    pub id: u64,
    pub origin_y: f64,
    pub expires_at: f64,
    pub particles: Vec<Particle>,
}

impl Burst {
    pub fn new<R: Rng + ?Sized>(id: u64, preset: CelebrationPreset, now: f64, rng: &mut R) -> Self {
        let half = preset.spread_deg.clamp(0.0, 360.0) / 2.0;
        let particles = (0..preset.particle_count)
            .map(|_| {
                // 0 deg points straight up
                let angle = rng.gen_range(-half..=half).to_radians();
                let dist = rng.gen_range(15.0..=55.0);
                Particle {
                    dx: dist * angle.sin(),
                    dy: -dist * angle.cos(),
                    spin_deg: rng.gen_range(-540.0..=540.0),
                    color: PALETTE[rng.gen_range(0..PALETTE.len())],
                }
            })
            .collect();
        Self {
            id,
            origin_y: preset.origin_y,
            expires_at: now + BURST_LIFETIME_MS,
            particles,
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ConfettiLayerProps {
    pub bursts: Vec<Burst>,
}

#[function_component]
pub fn ConfettiLayer(props: &ConfettiLayerProps) -> Html {
    if props.bursts.is_empty() {
        return html! {};
    }
    html! {
        <div style="position:fixed; inset:0; pointer-events:none; overflow:hidden; z-index:55;">
            { for props.bursts.iter().map(|b| html! {
                <div key={b.id}>
                    { for b.particles.iter().map(|p| html! {
                        <span class="confetti-piece" style={format!(
                            "left:50%; top:{:.1}%; background:{}; --dx:{:.2}vmin; --dy:{:.2}vmin; --spin:{:.0}deg;",
                            b.origin_y * 100.0, p.color, p.dx, p.dy, p.spin_deg
                        )}></span>
                    }) }
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn presets_control_particle_count_and_cone() {
        let mut rng = StdRng::seed_from_u64(3);
        let minor = CelebrationPreset {
            particle_count: 100,
            spread_deg: 70.0,
            origin_y: 0.6,
        };
        let b = Burst::new(1, minor, 0.0, &mut rng);
        assert_eq!(b.particles.len(), 100);
        assert_eq!(b.expires_at, BURST_LIFETIME_MS);
        for p in &b.particles {
            // within 35 deg of vertical, always upwards
            assert!(p.dy < 0.0);
            assert!(p.dx.abs() <= -p.dy * 35f64.to_radians().tan() + 1e-9);
        }
    }
}
