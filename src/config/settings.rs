use clap::ValueEnum;

/// Knobs of the two-phase rating algorithm.
///
/// The presets reproduce the successive revisions of the scheme so older
/// results can be recomputed exactly. `improved` is the one to use for new
/// tournaments.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSettings {
    pub max_iterations_phase1: usize,
    pub max_iterations_phase2: usize,
    pub convergence_threshold: f64,
    /// Run the second bonus pass after phase-2 re-estimation.
    pub allow_phase2_new_bonuses: bool,
    /// Refresh bonus-adjusted ratings when re-rating in phase 2.
    pub refresh_bonus_ratings: bool,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self::legacy()
    }
}

impl RatingSettings {
    /// The original scheme: a single phase-2 sweep and a second bonus pass.
    pub fn legacy() -> Self {
        Self {
            max_iterations_phase1: 30,
            max_iterations_phase2: 1,
            convergence_threshold: 0.5,
            allow_phase2_new_bonuses: true,
            refresh_bonus_ratings: false,
        }
    }

    /// Legacy plus full convergence after bonuses are applied.
    pub fn iterated() -> Self {
        Self {
            max_iterations_phase2: 30,
            ..Self::legacy()
        }
    }

    /// No new bonuses in the second pass and a tighter threshold.
    pub fn improved() -> Self {
        Self {
            max_iterations_phase1: 30,
            max_iterations_phase2: 30,
            convergence_threshold: 0.1,
            allow_phase2_new_bonuses: false,
            refresh_bonus_ratings: true,
        }
    }

    pub fn from_version(version: u32) -> Self {
        match version {
            0 => Self::legacy(),
            1 => Self::iterated(),
            _ => Self::improved(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    #[default]
    Legacy,
    Iterated,
    Improved,
}

impl Preset {
    pub fn settings(self) -> RatingSettings {
        match self {
            Preset::Legacy => RatingSettings::legacy(),
            Preset::Iterated => RatingSettings::iterated(),
            Preset::Improved => RatingSettings::improved(),
        }
    }
}

pub struct OutputSettings {
    pub decimals: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { decimals: 1 }
    }
}

pub struct AppConfig {
    pub rating: RatingSettings,
    pub output: OutputSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            output: OutputSettings::default(),
        }
    }

    pub fn with_preset(preset: Preset) -> Self {
        Self {
            rating: preset.settings(),
            output: OutputSettings::default(),
        }
    }
}
