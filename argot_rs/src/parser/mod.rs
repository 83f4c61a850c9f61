//! Token parser.
//!
//! Turns a raw token vector into a [`ParseResult`] for one [`Grammar`].
//!
//! # Token forms
//!
//! ```text
//! --name          long option (boolean: true, otherwise its default)
//! --name=value    long option with inline value
//! -n              short alias, resolved to its long option
//! -n=value        short alias with inline value
//! anything else   positional, bound to arguments by declaration order
//! ```
//!
//! Values are never taken from the following token and short flags cannot
//! be bundled (`-xvz` is an unknown option).
//!
//! # Module Structure
//!
//! - [`core`] - `parse` and the binding passes
//! - [`helpers`] - token classification and coercion
//! - [`result`] - the `ParseResult` type
//!
//! [`Grammar`]: crate::grammar::Grammar

mod core;
mod helpers;
mod result;

pub use self::core::parse;
pub use self::result::ParseResult;
