use crate::config::channels::KEY_EVENTS;

use super::types::{KeyEdge, KeyEvent};

// Enable switch and edge-claiming hook, both owned by the host platform.
pub trait HostControl {
    fn is_enabled(&self) -> bool;
    fn suppress_default_handling(&mut self);
}

// Debounces the raw edge stream down to alternating press/release pairs.
#[derive(Clone, Copy, Debug)]
pub struct KeyIntake {
    pressed: bool,
}

impl KeyIntake {
    pub const fn new() -> Self {
        Self { pressed: false }
    }

    // Every enabled edge is claimed from the host, including screened ones;
    // a repeat that slipped through would pop the platform volume overlay.
    pub fn admit<H: HostControl>(
        &mut self,
        host: &mut H,
        edge: KeyEdge,
        t_ms: u64,
    ) -> Option<KeyEvent> {
        if !host.is_enabled() {
            // A press cut off by a disable must not leave a stale latch
            // behind; its release will be screened out as stray.
            self.pressed = false;
            return None;
        }
        host.suppress_default_handling();

        let admitted = match edge {
            KeyEdge::Down => !self.pressed,
            KeyEdge::Up => self.pressed,
        };
        if !admitted {
            log::debug!(
                "button: edge screened out edge={} t_ms={}",
                edge.label(),
                t_ms
            );
            return None;
        }

        self.pressed = matches!(edge, KeyEdge::Down);
        Some(KeyEvent { edge, t_ms })
    }
}

impl Default for KeyIntake {
    fn default() -> Self {
        Self::new()
    }
}

// Never blocks the caller; the host's key hook cannot wait on the pipeline.
pub fn offer_key_event(event: KeyEvent) {
    if KEY_EVENTS.try_send(event).is_err() {
        log::warn!(
            "button: key event dropped edge={} t_ms={}",
            event.edge.label(),
            event.t_ms
        );
    }
}
