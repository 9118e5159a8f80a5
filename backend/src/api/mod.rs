//! HTTP API module.
//!
//! The axum server, its response types, the Plotly adapter and the log
//! stream shared with the CLI.

pub mod logs;
pub mod plotly;
pub mod server;
pub mod types;

pub use logs::*;
pub use plotly::{to_plotly, to_plotly_all};
pub use server::{router, start_server, AppState};
pub use types::*;
