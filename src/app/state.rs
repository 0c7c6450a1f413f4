// src/app/state.rs

/// Where the chart data stands. Drives the central panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) enum LoadStatus {
    #[default]
    Idle,
    Loading(String),
    Ready,
    /// The source answered but had no usable bars.
    Empty(String),
    Failed(String),
}

impl LoadStatus {
    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }
}
