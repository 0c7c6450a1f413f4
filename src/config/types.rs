//! Small enums shared by the engines and the UI.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The four annotation shape families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum ShapeKind {
    HorizontalLine,
    VerticalLine,
    TrendLine,
    Channel,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl ShapeKind {
    /// Display name used to build shape ids ("Linia Trendu 3").
    pub fn label(&self) -> &'static str {
        match self {
            Self::HorizontalLine => "Pozioma",
            Self::VerticalLine => "Pionowa",
            Self::TrendLine => "Linia Trendu",
            Self::Channel => "Kanał",
        }
    }

    /// Clicks needed before a shape of this kind is complete.
    pub fn clicks_required(&self) -> usize {
        match self {
            Self::HorizontalLine | Self::VerticalLine => 1,
            Self::TrendLine => 2,
            Self::Channel => 3,
        }
    }

    pub(crate) fn counter_slot(&self) -> usize {
        match self {
            Self::HorizontalLine => 0,
            Self::VerticalLine => 1,
            Self::TrendLine => 2,
            Self::Channel => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter, Display)]
pub enum DrawingMode {
    #[default]
    #[strum(to_string = "Kursor")]
    None,
    #[strum(to_string = "Pozioma")]
    HorizontalLine,
    #[strum(to_string = "Pionowa")]
    VerticalLine,
    #[strum(to_string = "Linia trendu")]
    TrendLine,
    #[strum(to_string = "Kanał")]
    Channel,
}

impl DrawingMode {
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Self::None => None,
            Self::HorizontalLine => Some(ShapeKind::HorizontalLine),
            Self::VerticalLine => Some(ShapeKind::VerticalLine),
            Self::TrendLine => Some(ShapeKind::TrendLine),
            Self::Channel => Some(ShapeKind::Channel),
        }
    }
}

impl From<ShapeKind> for DrawingMode {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::HorizontalLine => Self::HorizontalLine,
            ShapeKind::VerticalLine => Self::VerticalLine,
            ShapeKind::TrendLine => Self::TrendLine,
            ShapeKind::Channel => Self::Channel,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display)]
pub enum MovingAverageKind {
    #[strum(to_string = "SMA")]
    Sma,
    #[strum(to_string = "EMA")]
    Ema,
    #[strum(to_string = "WMA")]
    Wma,
}
