// Presentation layer: wiring at startup, rendering of the page model and
// the HTTP routes serving it.

pub mod bootstrap;
pub mod render;
pub mod server;

pub use bootstrap::build_service;
pub use render::{render, OutputFormat};
pub use server::serve;
