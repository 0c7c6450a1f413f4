mod maths_utils;
mod perf;
mod time_utils;

pub use time_utils::{TimeUtils, epoch_sec_to_date_string, parse_date_to_epoch_sec};

pub(crate) use maths_utils::{lerp, remap, safe_ratio};

pub type AppInstant = web_time::Instant;
