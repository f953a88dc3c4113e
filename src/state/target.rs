use rand::Rng;

// Target location in percent of the arena, centre anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub x: f64,
    pub y: f64,
}

impl Default for Target {
    fn default() -> Self {
        Self { x: 50.0, y: 50.0 }
    }
}

impl Target {
    /// Sample both axes independently and uniformly from `min..=max`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Self {
        Self {
            x: rng.gen_range(min..=max),
            y: rng.gen_range(min..=max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    proptest! {
        #[test]
        fn stays_inside_the_band(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let t = Target::random(&mut rng, 20.0, 80.0);
            prop_assert!((20.0..=80.0).contains(&t.x));
            prop_assert!((20.0..=80.0).contains(&t.y));
        }
    }

    #[test]
    fn axes_are_independent() {
        let mut rng = StdRng::seed_from_u64(7);
        let same = (0..64)
            .map(|_| Target::random(&mut rng, 20.0, 80.0))
            .filter(|t| t.x == t.y)
            .count();
        assert_eq!(same, 0);
    }
}
