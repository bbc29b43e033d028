mod component;
mod render;
mod state;
mod types;

pub use component::TreeCanvas;
pub use types::ViewCommand;
