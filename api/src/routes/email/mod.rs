//! Email route handlers

pub mod attachment;

pub use attachment::send_with_attachment;
