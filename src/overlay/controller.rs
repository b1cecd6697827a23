//! Overlay Controller
//!
//! Lifecycle of the single full-viewport video overlay. The controller is a
//! plain state machine; every side effect goes through an [`OverlaySurface`],
//! and every asynchronous callback comes back as an [`OverlayEvent`] tagged
//! with the [`OverlayId`] of the instance that produced it.

use std::fmt;
use std::time::Duration;

/// Default delay before a still-open overlay is closed
pub const DEFAULT_FALLBACK: Duration = Duration::from_secs(70);

/// Identity of one overlay instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Video shown in the overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OverlayMedia {
    pub source: String,
    pub poster: Option<String>,
}

impl OverlayMedia {
    pub fn new(source: impl Into<String>, poster: Option<&str>) -> Self {
        Self {
            source: source.into(),
            poster: poster.map(str::to_string),
        }
    }
}

/// Overlay lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayState {
    Closed,
    /// Mounted, waiting for playback to start
    Opening {
        id: OverlayId,
        /// A tap-to-play handler is armed after a blocked play attempt
        resume_armed: bool,
    },
    Playing { id: OverlayId },
}

impl OverlayState {
    /// Instance currently on screen
    pub fn current(&self) -> Option<OverlayId> {
        match *self {
            OverlayState::Closed => None,
            OverlayState::Opening { id, .. } | OverlayState::Playing { id } => Some(id),
        }
    }
}

/// Callbacks delivered back to the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The play attempt succeeded
    PlaybackStarted(OverlayId),
    /// The platform refused unattended playback
    PlaybackBlocked(OverlayId),
    /// The user tapped the overlay after a blocked attempt
    ResumeRequested(OverlayId),
    /// The video reached its end
    PlaybackEnded(OverlayId),
    /// The fallback timer fired
    FallbackElapsed(OverlayId),
}

impl OverlayEvent {
    pub fn id(&self) -> OverlayId {
        match *self {
            OverlayEvent::PlaybackStarted(id)
            | OverlayEvent::PlaybackBlocked(id)
            | OverlayEvent::ResumeRequested(id)
            | OverlayEvent::PlaybackEnded(id)
            | OverlayEvent::FallbackElapsed(id) => id,
        }
    }
}

/// DOM and media primitives the controller drives
pub trait OverlaySurface {
    /// Build the overlay with a muted, inline video and attach it to the page.
    fn mount(&mut self, id: OverlayId, media: &OverlayMedia);

    /// Remove the overlay element. Page-level modal state is left alone.
    fn unmount(&mut self, id: OverlayId);

    /// Start a play attempt; the outcome arrives as `PlaybackStarted` or `PlaybackBlocked`.
    fn request_play(&mut self, id: OverlayId);

    /// Deliver `FallbackElapsed` after `after`.
    fn arm_fallback(&mut self, id: OverlayId, after: Duration);

    fn cancel_fallback(&mut self, id: OverlayId);

    /// Deliver `ResumeRequested` on the next tap, once.
    fn arm_resume_on_click(&mut self, id: OverlayId);
}

/// Single-instance overlay state machine
pub struct OverlayController<S: OverlaySurface> {
    surface: S,
    state: OverlayState,
    next_id: u64,
    fallback: Duration,
}

impl<S: OverlaySurface> OverlayController<S> {
    pub fn new(surface: S) -> Self {
        Self::with_fallback(surface, DEFAULT_FALLBACK)
    }

    pub fn with_fallback(surface: S, fallback: Duration) -> Self {
        Self {
            surface,
            state: OverlayState::Closed,
            next_id: 0,
            fallback,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Open a new overlay, replacing any instance already on screen.
    pub fn open(&mut self, media: OverlayMedia) -> OverlayId {
        if let Some(previous) = self.state.current() {
            tracing::debug!(%previous, "Superseding open overlay");
            self.teardown(previous);
        }

        self.next_id += 1;
        let id = OverlayId(self.next_id);

        self.surface.mount(id, &media);
        self.surface.arm_fallback(id, self.fallback);
        self.state = OverlayState::Opening {
            id,
            resume_armed: false,
        };
        self.surface.request_play(id);

        tracing::info!(%id, source = %media.source, "Overlay opened");
        id
    }

    /// Apply a callback. Events from instances that are no longer current are ignored.
    pub fn handle(&mut self, event: OverlayEvent) {
        let id = event.id();
        if self.state.current() != Some(id) {
            tracing::debug!(?event, "Ignoring event for stale overlay");
            return;
        }

        match event {
            OverlayEvent::PlaybackStarted(_) => {
                self.state = OverlayState::Playing { id };
            }
            OverlayEvent::PlaybackBlocked(_) => {
                if let OverlayState::Opening { resume_armed, .. } = self.state {
                    if !resume_armed {
                        tracing::info!(%id, "Autoplay blocked; waiting for a tap");
                        self.surface.arm_resume_on_click(id);
                        self.state = OverlayState::Opening {
                            id,
                            resume_armed: true,
                        };
                    }
                }
            }
            OverlayEvent::ResumeRequested(_) => {
                if let OverlayState::Opening { .. } = self.state {
                    self.state = OverlayState::Opening {
                        id,
                        resume_armed: false,
                    };
                    self.surface.request_play(id);
                }
            }
            OverlayEvent::PlaybackEnded(_) | OverlayEvent::FallbackElapsed(_) => {
                tracing::info!(%id, reason = ?event, "Overlay closed");
                self.teardown(id);
            }
        }
    }

    /// Close the current overlay, if any.
    pub fn close(&mut self) {
        if let Some(id) = self.state.current() {
            self.teardown(id);
        }
    }

    fn teardown(&mut self, id: OverlayId) {
        self.surface.cancel_fallback(id);
        self.surface.unmount(id);
        self.state = OverlayState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::fake::FakeSurface;

    fn media() -> OverlayMedia {
        OverlayMedia::new("assets/gacha.mp4", Some("assets/gacha.jpg"))
    }

    #[test]
    fn test_open_then_play() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let id = overlay.open(media());

        assert_eq!(
            overlay.state(),
            OverlayState::Opening {
                id,
                resume_armed: false
            }
        );
        assert_eq!(overlay.surface().play_requests, vec![id]);

        overlay.handle(OverlayEvent::PlaybackStarted(id));
        assert_eq!(overlay.state(), OverlayState::Playing { id });
    }

    #[test]
    fn test_double_open_keeps_one_instance() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let first = overlay.open(media());
        let second = overlay.open(media());

        assert_ne!(first, second);
        let surface = overlay.surface();
        assert_eq!(surface.fallback_delays, vec![DEFAULT_FALLBACK, DEFAULT_FALLBACK]);
        assert_eq!(surface.mounted.iter().copied().collect::<Vec<_>>(), vec![second]);
        assert_eq!(surface.timers.iter().copied().collect::<Vec<_>>(), vec![second]);
    }

    #[test]
    fn test_ended_closes_and_cancels_timer() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let id = overlay.open(media());
        overlay.handle(OverlayEvent::PlaybackStarted(id));
        overlay.handle(OverlayEvent::PlaybackEnded(id));

        assert_eq!(overlay.state(), OverlayState::Closed);
        assert!(overlay.surface().mounted.is_empty());
        assert!(overlay.surface().timers.is_empty());
    }

    #[test]
    fn test_fallback_after_natural_close_is_noop() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let id = overlay.open(media());
        overlay.handle(OverlayEvent::PlaybackEnded(id));
        overlay.handle(OverlayEvent::FallbackElapsed(id));

        assert_eq!(overlay.state(), OverlayState::Closed);
        assert_eq!(overlay.surface().unmount_calls, 1);
    }

    #[test]
    fn test_stale_timer_does_not_close_newer_overlay() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let first = overlay.open(media());
        let second = overlay.open(media());

        overlay.handle(OverlayEvent::FallbackElapsed(first));
        overlay.handle(OverlayEvent::PlaybackEnded(first));

        assert_eq!(overlay.state().current(), Some(second));
        assert!(overlay.surface().mounted.contains(&second));
    }

    #[test]
    fn test_fallback_closes_stuck_overlay() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let id = overlay.open(media());
        overlay.handle(OverlayEvent::PlaybackStarted(id));
        overlay.handle(OverlayEvent::FallbackElapsed(id));

        assert_eq!(overlay.state(), OverlayState::Closed);
        assert!(overlay.surface().mounted.is_empty());
    }

    #[test]
    fn test_blocked_play_arms_resume_once() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        let id = overlay.open(media());

        overlay.handle(OverlayEvent::PlaybackBlocked(id));
        overlay.handle(OverlayEvent::PlaybackBlocked(id));
        assert_eq!(
            overlay.state(),
            OverlayState::Opening {
                id,
                resume_armed: true
            }
        );
        assert!(overlay.surface().resume_handlers.contains(&id));

        overlay.handle(OverlayEvent::ResumeRequested(id));
        assert_eq!(overlay.surface().play_requests, vec![id, id]);

        overlay.handle(OverlayEvent::PlaybackStarted(id));
        assert_eq!(overlay.state(), OverlayState::Playing { id });
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut overlay = OverlayController::new(FakeSurface::default());
        overlay.close();
        overlay.open(media());
        overlay.close();
        overlay.close();

        assert_eq!(overlay.state(), OverlayState::Closed);
        assert_eq!(overlay.surface().unmount_calls, 1);
    }
}
