use crate::button::types::Intent;

/// Finger travel time for either swipe.
pub const GESTURE_SWIPE_MS: u64 = 200;
/// Finger-down time for each tap of the double tap.
pub const GESTURE_TAP_HOLD_MS: u64 = 50;
/// Pause between the two taps.
pub const GESTURE_DOUBLE_TAP_GAP_MS: u64 = 100;

// Swipes span 3/10 to 7/10 of the screen height along the vertical centre
// line, clear of system edge gestures on both ends.
const SWIPE_NEAR_TENTHS: u32 = 3;
const SWIPE_FAR_TENTHS: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenMetrics {
    pub width: u16,
    pub height: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

// Taps keep `from` and `to` equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
    pub delay_ms: u64,
    pub duration_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GesturePlan {
    len: usize,
    slots: [Option<Stroke>; Self::MAX],
}

impl GesturePlan {
    pub const MAX: usize = 2;

    pub const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    fn push(&mut self, stroke: Stroke) {
        if self.len < Self::MAX {
            self.slots[self.len] = Some(stroke);
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stroke> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }
}

impl Default for GesturePlan {
    fn default() -> Self {
        Self::new()
    }
}

pub fn plan_for(intent: Intent, screen: ScreenMetrics) -> GesturePlan {
    let mut plan = GesturePlan::new();
    match intent {
        Intent::ShortPress => {
            plan.push(swipe(screen, SWIPE_FAR_TENTHS, SWIPE_NEAR_TENTHS));
        }
        Intent::LongPress => {
            plan.push(swipe(screen, SWIPE_NEAR_TENTHS, SWIPE_FAR_TENTHS));
        }
        Intent::DoubleTap => {
            let centre = Point {
                x: screen.width / 2,
                y: screen.height / 2,
            };
            plan.push(tap(centre, 0));
            plan.push(tap(centre, GESTURE_DOUBLE_TAP_GAP_MS));
        }
    }
    plan
}

fn swipe(screen: ScreenMetrics, start_tenths: u32, end_tenths: u32) -> Stroke {
    let x = screen.width / 2;
    Stroke {
        from: Point {
            x,
            y: height_tenths(screen, start_tenths),
        },
        to: Point {
            x,
            y: height_tenths(screen, end_tenths),
        },
        delay_ms: 0,
        duration_ms: GESTURE_SWIPE_MS,
    }
}

fn tap(at: Point, delay_ms: u64) -> Stroke {
    Stroke {
        from: at,
        to: at,
        delay_ms,
        duration_ms: GESTURE_TAP_HOLD_MS,
    }
}

fn height_tenths(screen: ScreenMetrics, tenths: u32) -> u16 {
    (u32::from(screen.height) * tenths / 10) as u16
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;

    const PHONE: ScreenMetrics = ScreenMetrics {
        width: 1_080,
        height: 2_400,
    };

    fn strokes(plan: GesturePlan) -> Vec<Stroke> {
        plan.iter().copied().collect()
    }

    #[test]
    fn short_press_swipes_up_along_the_centre_line() {
        let plan = plan_for(Intent::ShortPress, PHONE);
        assert!(!plan.is_empty());
        let strokes = strokes(plan);
        assert_eq!(
            strokes,
            [Stroke {
                from: Point { x: 540, y: 1_680 },
                to: Point { x: 540, y: 720 },
                delay_ms: 0,
                duration_ms: GESTURE_SWIPE_MS,
            }]
        );
    }

    #[test]
    fn long_press_swipes_down_over_the_same_span() {
        let plan = plan_for(Intent::LongPress, PHONE);
        let strokes = strokes(plan);
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].from, Point { x: 540, y: 720 });
        assert_eq!(strokes[0].to, Point { x: 540, y: 1_680 });
        assert_eq!(strokes[0].duration_ms, GESTURE_SWIPE_MS);
    }

    #[test]
    fn double_tap_replays_two_centre_taps_with_a_gap() {
        let plan = plan_for(Intent::DoubleTap, PHONE);
        assert_eq!(plan.len(), 2);
        let strokes = strokes(plan);
        let centre = Point { x: 540, y: 1_200 };
        assert_eq!(
            strokes,
            [
                Stroke {
                    from: centre,
                    to: centre,
                    delay_ms: 0,
                    duration_ms: GESTURE_TAP_HOLD_MS,
                },
                Stroke {
                    from: centre,
                    to: centre,
                    delay_ms: GESTURE_DOUBLE_TAP_GAP_MS,
                    duration_ms: GESTURE_TAP_HOLD_MS,
                },
            ]
        );
    }

    #[test]
    fn tall_screens_stay_clear_of_both_edges() {
        let tall = ScreenMetrics {
            width: 1_440,
            height: 3_200,
        };
        let plan = plan_for(Intent::ShortPress, tall);
        let stroke = strokes(plan)[0];
        assert_eq!(stroke.from.y, 2_240);
        assert_eq!(stroke.to.y, 960);
        assert!(stroke.from.y < tall.height);
        assert!(stroke.to.y > 0);
    }

    #[test]
    fn odd_dimensions_round_toward_zero() {
        let odd = ScreenMetrics {
            width: 1_081,
            height: 2_401,
        };
        let plan = plan_for(Intent::LongPress, odd);
        let stroke = strokes(plan)[0];
        assert_eq!(stroke.from.x, 540);
        assert_eq!(stroke.from.y, 720);
        assert_eq!(stroke.to.y, 1_680);
    }
}
