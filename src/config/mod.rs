pub mod settings;

pub use settings::{AppConfig, Preset, RatingSettings};
