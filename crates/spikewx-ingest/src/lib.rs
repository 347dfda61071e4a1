//! Snapshot sources for the dashboard
//!
//! Provides the transports behind `SnapshotSource`: the HTTP client used
//! against the weather backend, the decoder that turns its JSON body into
//! a complete `WeatherSnapshot`, and an offline source for runs without a
//! configured backend.

pub mod http;
pub mod offline;
pub mod wire;

pub use http::*;
pub use offline::*;
pub use wire::*;

pub use spikewx_core::{FetchError, FetchResult, SnapshotSource};
