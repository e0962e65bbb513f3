//! Unified input mode and spatial focus.
//!
//! Pointer, keyboard and controller input are classified into one
//! authoritative [`InputMode`] and a stream of edge-triggered
//! [`SemanticAction`]s. Focus moves between registered leaves through a
//! [`navigator::SpatialNavigator`], grouped by named scopes that can trap
//! directional movement and remember their last focused leaf. CANCEL is
//! resolved by the escape cascade: trapping overlay first, then text entry,
//! then the page's pane stack.
//!
//! Everything is owned by one [`FocusEngine`]; the UI only ever reads the mode
//! through a [`ModeHandle`].

pub mod action;
pub mod announce;
pub mod bus;
pub mod classifier;
pub mod engine;
pub mod escape;
pub mod gamepad;
pub mod leaf;
pub mod mode;
pub mod navigator;
pub mod scope;

pub use action::SemanticAction;
pub use engine::FocusEngine;
pub use mode::{InputMode, ModeHandle};
