pub mod settings;

pub use settings::{BusSettings, ENV_PREFIX};
