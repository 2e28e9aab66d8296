// file: src/web/mod.rs
// description: single-page web ui and json api exports
// reference: https://docs.rs/axum

pub mod handlers;
pub mod page;
pub mod server;

pub use page::{Notice, PageView};
pub use server::{router, serve};
