//! Time subsystem.
//!
//! Provides frame timing utilities without coupling to the frame loop.
//! Intended usage:
//! - one `DeltaClock` per loop; call `sample()` exactly once per frame
//! - feed the same delta into `FpsEstimator::update`

mod delta_clock;
mod fps;

pub use delta_clock::{DeltaClock, MIN_DELTA};
pub use fps::{FpsEstimator, FPS_ALPHA};
