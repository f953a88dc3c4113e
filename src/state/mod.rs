pub mod attack;
pub mod round;
pub mod splash;
pub mod target;

pub use attack::AttackAnim;
pub use round::{RoundClock, RoundTick};
pub use splash::SplashClock;
pub use target::Target;
