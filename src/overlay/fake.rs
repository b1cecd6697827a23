//! Recording surface for overlay tests

use std::collections::BTreeSet;
use std::time::Duration;

use super::controller::{OverlayId, OverlayMedia, OverlaySurface};

#[derive(Default)]
pub struct FakeSurface {
    pub mounted: BTreeSet<OverlayId>,
    pub timers: BTreeSet<OverlayId>,
    pub resume_handlers: BTreeSet<OverlayId>,
    pub play_requests: Vec<OverlayId>,
    pub sources: Vec<String>,
    pub fallback_delays: Vec<Duration>,
    pub unmount_calls: usize,
}

impl OverlaySurface for FakeSurface {
    fn mount(&mut self, id: OverlayId, media: &OverlayMedia) {
        self.mounted.insert(id);
        self.sources.push(media.source.clone());
    }

    fn unmount(&mut self, id: OverlayId) {
        assert!(self.mounted.remove(&id), "unmount of absent overlay {}", id);
        self.resume_handlers.remove(&id);
        self.unmount_calls += 1;
    }

    fn request_play(&mut self, id: OverlayId) {
        self.play_requests.push(id);
    }

    fn arm_fallback(&mut self, id: OverlayId, after: Duration) {
        self.fallback_delays.push(after);
        self.timers.insert(id);
    }

    fn cancel_fallback(&mut self, id: OverlayId) {
        self.timers.remove(&id);
    }

    fn arm_resume_on_click(&mut self, id: OverlayId) {
        self.resume_handlers.insert(id);
    }
}
