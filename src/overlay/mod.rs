//! Video Overlay
//!
//! Single-instance celebration overlay. [`controller`] holds the lifecycle,
//! [`dom`] renders it into the page.

pub mod controller;
pub mod dom;

#[cfg(test)]
pub mod fake;

pub use controller::{
    OverlayController, OverlayEvent, OverlayId, OverlayMedia, OverlayState, OverlaySurface,
    DEFAULT_FALLBACK,
};
pub use dom::{create_dom_overlay, DomOverlaySurface, SharedOverlay, MODAL_OPEN_CLASS, OVERLAY_CLASS};
