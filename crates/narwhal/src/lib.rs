#![forbid(unsafe_code)]

//! `narwhal` turns a title plus a JSON array of records into a self-contained SVG chart.
//!
//! The pipeline is `validate → resolve style → layout → serialize → write`; only the last step
//! touches the filesystem, and it never leaves a partially written document behind.
//!
//! ```no_run
//! use narwhal::render::HeadlessRenderer;
//! use narwhal::{ChartKind, ChartRequest};
//!
//! let request = ChartRequest::from_json(
//!     ChartKind::Bar,
//!     "Coverage",
//!     r#"[{"label": "core", "value": 92}, {"label": "cli", "value": 71}]"#,
//!     "coverage.svg",
//! )?;
//! let summary = HeadlessRenderer::new().render(&request)?;
//! println!("{}", summary.path.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use narwhal_core::*;

pub mod render;
pub mod writer;

pub use writer::{WriteError, write_document};
