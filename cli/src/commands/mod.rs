//! # CLI Command Implementations
//!
//! Each submodule implements one top-level command or command group.
//!
//! ## Available Commands
//!
//! - [`check`] - Report which files carry a header
//! - [`config`] - Show and edit identity, width and auto-insert
//! - [`count`] - Count C function definitions
//! - [`insert`] - Insert or refresh headers in files
//! - [`lsp`] - Language Server Protocol server for editor integration

pub mod check;
pub mod config;
pub mod count;
pub mod insert;
pub mod lsp;
