//! File persistence configuration

/// Configuration for Application State Persistence
pub struct AppPersistenceConfig {
    /// Path for saving/loading application UI state
    pub state_path: &'static str,
}

/// Where bar files live when no `--data-dir` is given.
pub struct BarDataConfig {
    pub directory: &'static str,
    pub extension: &'static str,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub bars: BarDataConfig,
    pub app: AppPersistenceConfig,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    bars: BarDataConfig {
        directory: "data",
        extension: "json",
    },
    app: AppPersistenceConfig {
        state_path: ".states.json",
    },
};
