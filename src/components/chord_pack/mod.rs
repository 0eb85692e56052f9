//! Canvas chord diagram whose columns are drawn as packed circles.

mod aggregate;
mod arc;
mod component;
mod config;
mod error;
mod layout;
mod model;
mod pack;
mod path;
mod render;
mod ribbon;
mod scale;
mod selection;
mod state;
mod types;

pub use component::ChordPackCanvas;
pub use config::ChordPackConfig;
pub use error::ChordPackError;
pub use types::{ChordPackData, DataItem, ItemInfo, LinkInfo};
