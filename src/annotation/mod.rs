//! Chart annotations: shapes in chart space, the interaction state machine
//! that creates and edits them, undo/redo, and a renderer-agnostic frame
//! description for painting.

mod engine;
mod geometry;
mod history;
mod mapping;
mod render;
mod shape;

pub use engine::AnnotationEngine;
pub use history::History;
pub use mapping::{CoordinateMapper, LinearMapper};
pub use render::{HandleMarker, RenderFrame, StrokePath};
pub use shape::{
    Channel, ChannelAnchor, Geometry, HorizontalLine, Point, Shape, ShapeStyle, TrendLine,
    VerticalLine,
};
