/// Down-to-down pairing window, also the short-press confirmation delay.
pub const BUTTON_DOUBLE_WINDOW_MS: u64 = 300;
/// Hold time before a held press classifies as long.
pub const BUTTON_LONG_PRESS_MS: u64 = 1_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PressTimings {
    pub double_window_ms: u64,
    pub long_press_ms: u64,
}

impl Default for PressTimings {
    fn default() -> Self {
        Self {
            double_window_ms: BUTTON_DOUBLE_WINDOW_MS,
            long_press_ms: BUTTON_LONG_PRESS_MS,
        }
    }
}
