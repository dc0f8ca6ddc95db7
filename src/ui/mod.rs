//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the controller's geometry and frame values and turns
//! them into cells on the terminal.  No carousel logic happens here.

pub mod carousel_widget;
pub mod layout;
pub mod overlay;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;
