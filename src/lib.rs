//! Snap-to-cell horizontal carousel.
//!
//! The [`core`] module holds the platform-neutral pieces: the selection
//! model, snap resolution, the indicator interpolator and the controller
//! that ties them to a host scroll surface.  The `snap-carousel` binary
//! hosts it in a terminal.

pub mod core;
