use embassy_time::{Duration, Timer};

use crate::config::channels::INTENT_EVENTS;

use super::plan::{plan_for, GesturePlan, ScreenMetrics, Stroke};

// Dispatch is fire-and-forget; the return value only says whether the
// platform took the stroke.
pub trait InputInjector {
    fn dispatch_stroke(&mut self, stroke: &Stroke) -> bool;
}

pub async fn run_gesture_executor<I: InputInjector>(mut injector: I, screen: ScreenMetrics) -> ! {
    log::info!(
        "gesture: executor up width={} height={}",
        screen.width,
        screen.height
    );

    loop {
        let event = INTENT_EVENTS.receive().await;
        log::info!(
            "gesture: perform kind={} at_ms={}",
            event.intent.label(),
            event.at_ms
        );
        perform(&mut injector, plan_for(event.intent, screen)).await;
    }
}

// A rejected stroke still lets the rest of the plan run.
async fn perform<I: InputInjector>(injector: &mut I, plan: GesturePlan) {
    for stroke in plan.iter() {
        if stroke.delay_ms > 0 {
            Timer::after(Duration::from_millis(stroke.delay_ms)).await;
        }
        if !injector.dispatch_stroke(stroke) {
            log::warn!(
                "gesture: stroke rejected from=({},{}) to=({},{}) duration_ms={}",
                stroke.from.x,
                stroke.from.y,
                stroke.to.x,
                stroke.to.y,
                stroke.duration_ms
            );
        }
        Timer::after(Duration::from_millis(stroke.duration_ms)).await;
    }
}
