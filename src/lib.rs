//! Books portal
//!
//! Client-side routing and session guarding for a small books library, plus
//! the HTTP servers that host it: the frontend host resolving application
//! paths to views, and a demo server with a handful of JSON endpoints.

pub mod app;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod navigation;
pub mod routing;
pub mod server;
pub mod session;

pub use app::BooksApp;
