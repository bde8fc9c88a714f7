//! Bookshelf application library
//!
//! Feature modules and the wiring that boots them on top of the kernel.

pub mod app;
pub mod modules;

pub use modules::books;
