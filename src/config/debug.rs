//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Shape creation, selection, drags and history moves.
    pub log_annotations: bool,

    /// Which indicator series came out empty after a recompute.
    pub log_indicators: bool,

    /// Bar source requests, stale results and parse drops.
    pub log_loader: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_annotations: true,
    log_loader: true,

    log_indicators: false,
    log_performance: false,
};
