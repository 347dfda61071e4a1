//! Weather dashboard: refresh loop, view state and text rendering
//!
//! The refresh loop polls a `SnapshotSource`, reconciles every outcome into
//! an immutable `ViewState` (live data or the fixed fallback snapshot) and
//! publishes it on a watch channel. The view renders whatever state is
//! current next to the decorative matrix.

pub mod refresh;
pub mod state;
pub mod view;

pub use refresh::*;
pub use state::*;
pub use view::*;
