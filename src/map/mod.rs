//! Map view: tiles, check-in markers and the popup overlay.
//!
//! The composer builds the walkers map once, paints it every frame and
//! resolves click pixels against the markers painted in that frame.

pub mod composer;
pub mod markers;
pub mod popup;
pub mod tiles;

pub use composer::{MapClick, MapComposer, MapOptions};
pub use popup::PopupAction;
