#![forbid(unsafe_code)]

pub mod api;
pub mod frames;
pub mod memory;

pub use api::{HostApi, HostError, SharedHostApi, NO_ERROR};
pub use frames::{FrameId, FrameRef, FrameTree};
pub use memory::{CallCounts, InMemoryHost, Primitive};
