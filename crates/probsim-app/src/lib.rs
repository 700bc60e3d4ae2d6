pub mod config;
pub mod controller;
pub mod debug;
pub mod logging;
pub mod platform;
pub mod scheduler;

pub use controller::{Command, Progress, SimulatorController};
pub use scheduler::{Scheduler, TimerQueue, TimerTask};

pub const BUILD_DATE: &str = env!("PROBSIM_BUILD_DATE");
