pub mod app;
pub mod arena;
pub mod confetti;
pub mod hud;
pub mod idle_panel;
pub mod splash_screen;
pub mod toast;

pub use app::App;
