//! Screens drawn by the simulator outside the watchface itself.
//!
//! - **Debug Page** ([`debug`]): face state, frame timing and the controller
//!   log (toggle with `Tab`)

mod debug;

pub use debug::{DebugView, draw_debug_page};
