mod root;
mod state;

pub(crate) use state::LoadStatus;

pub use root::App;
