pub mod model;
pub mod sampler;
pub mod sequencer;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "probsim"
    }

    pub const fn title() -> &'static str {
        "Probability Simulator"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
