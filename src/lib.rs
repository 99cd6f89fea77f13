//! Live-video "toon" filter core.
//!
//! Each camera frame goes through a simplified gradient test against its
//! right-and-below neighbor; edges are painted a solid color and everything
//! else is replaced by one of sixteen swappable stylizations.
//!
//! The camera and the window live in the binary; this crate works on raw
//! BGRA buffers only.

pub mod config;
pub mod convert;
pub mod edge;
pub mod error;
pub mod logging;
pub mod sampler;
pub mod session;
pub mod types;

pub use config::Config;
pub use edge::{detect, detect_in_place, edge_metric, is_edge, neighbor};
pub use error::Error;
pub use sampler::{DownSampler, SamplerKind, SamplerMask, DEFAULT_FACTOR};
pub use session::ToonSession;
pub use types::{Color, FrameBuffer, VideoFormat};
