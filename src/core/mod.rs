//! Core engine – selection, snapping, indicator interpolation and the
//! controller that drives them.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! plugs in through the traits in [`controller`].

pub mod cell;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod indicator;
pub mod selection;
pub mod snap;
