//! Backend worker: owns the tokio runtime, the API client and the gallery
//! controller; talks to the UI thread over bounded channels.

pub mod commands;
pub mod images;
pub mod runtime;
