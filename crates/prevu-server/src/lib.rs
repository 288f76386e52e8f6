//! Static preview servers for local web front-end development.
//!
//! Provides two flavors of throwaway HTTP server: one that serves a build
//! output directory as-is, and one that serves a generated diagnostic page
//! with permissive CORS headers and a client-side routing fallback.

pub mod page;
pub mod preview;
pub mod server;

pub use page::{preview_document, write_preview_page, PREVIEW_PAGE};
pub use preview::{preview_router, ROOT_DOCUMENT};
pub use server::{ServerConfig, ServerError, StaticServer};
