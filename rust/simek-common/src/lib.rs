#![warn(missing_docs)]

//! This crate constitutes a library of light weight helpers that are shared
//! across the other šimek crates. Their chief quality is that they have
//! virtually zero dependencies.

mod sync;
pub use sync::*;

mod lane;
pub use lane::*;
