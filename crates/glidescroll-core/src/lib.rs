pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod page;
pub mod scroll;

pub use config::{AnimationConfig, AppConfig};
pub use error::{Error, Result};
pub use geometry::{ScrollExtent, ScrollOffset};
pub use host::ScrollHost;
pub use page::{NodeId, VirtualPage};
pub use scroll::{
    AnimateOptions, Clock, ElementScrollOptions, ManualClock, Outcome, Scroller, SystemClock,
};
