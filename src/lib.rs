//! Animated 2D solar system with pointer hit-testing.
//!
//! The library holds everything that does not need a terminal: the body
//! catalog, the two coordinate projections, the braille pixel canvas, the
//! frame painter, the animation driver and the hit-tester. The binary wires
//! them to crossterm.

pub mod canvas;
pub mod catalog;
pub mod config;
pub mod driver;
pub mod frame;
pub mod mapper;
pub mod params;
pub mod render;
pub mod surface;

pub use catalog::{Body, BodyInfo, Catalog};
pub use driver::{AnimationDriver, Clock, DriverState, FrameOutcome, StopToken, WallClock};
pub use frame::{Frame, FrameCache, Placement};
pub use hit_test::{hit_test, Interaction, PointerEvent};
pub use mapper::{compute_frame, Geometry};
pub use params::{Control, Parameters, ViewMode};
pub use surface::{Rgba, Surface};
