//! Spanmark Core
//!
//! This crate provides the value types shared by the spanmark parsing
//! engine and every language built on it.
//!
//! # Overview
//!
//! The core crate contains:
//! - [`Token`] and the [`TokenKind`] trait - lexical units with source ranges
//! - [`TreeNode`] - the owned-children tree contract the driver appends to
//! - [`Diagnostic`], [`ParseError`], [`Severity`] - collected parse diagnostics
//! - [`SpanmarkError`] - Error types for I/O and configuration
//! - [`Position`], [`Span`] - Source location types

pub mod diagnostic;
pub mod error;
pub mod node;
pub mod token;
pub mod types;

pub use diagnostic::{Diagnostic, Severity};
pub use error::{ParseError, Result, SpanmarkError};
pub use node::TreeNode;
pub use token::{Token, TokenKind};
pub use types::{Position, Span};
