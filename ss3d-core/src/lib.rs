/// SS3D Core Library - Software rendering pipeline for the character grid
///
/// This library provides the frame-loop core: geometry primitives, the
/// rotation/camera transform, perspective projection, a z-buffered
/// rasterizer and the parallax star field. Presentation lives elsewhere.

pub mod buffer;
pub mod config;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod scene;
pub mod shading;
pub mod stars;
pub mod transform;

// Re-export commonly used types
pub use buffer::{DepthBuffer, FrameBuffer};
pub use config::{CameraConfig, RenderConfig, RotationStep, StarConfig};
pub use error::{RenderError, RenderResult};
pub use frame::{FrameLoop, FrameSink, FrameStats, Pacer, SleepPacer};
pub use geometry::{Barycentric, BoundingBox, Mesh, Triangle};
pub use projection::{Projector, ScreenPoint};
pub use raster::{Rasterizer, TriangleOutcome};
pub use stars::StarField;
pub use transform::{RotationState, Transform};
