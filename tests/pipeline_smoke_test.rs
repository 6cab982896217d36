//! Minimal pass over the public surface: raw edges through the classifier,
//! classified intents through the gesture planner.

use keymote::button::config::BUTTON_DOUBLE_WINDOW_MS;
use keymote::button::types::{Intent, IntentEvent, KeyEdge, KeyEvent};
use keymote::gesture::plan::{plan_for, ScreenMetrics};
use keymote::PressEngine;

const SCREEN: ScreenMetrics = ScreenMetrics {
    width: 1_080,
    height: 2_400,
};

fn key(edge: KeyEdge, t_ms: u64) -> KeyEvent {
    KeyEvent { edge, t_ms }
}

fn sole_intent(events: Vec<IntentEvent>) -> IntentEvent {
    assert_eq!(events.len(), 1);
    events[0]
}

#[test]
fn short_press_plans_an_upward_swipe() {
    let mut engine = PressEngine::default();
    let _ = engine.handle_key(key(KeyEdge::Down, 0));
    let _ = engine.handle_key(key(KeyEdge::Up, 80));

    let output = engine.advance(80 + BUTTON_DOUBLE_WINDOW_MS);
    let event = sole_intent(output.intents.iter().copied().collect());
    assert_eq!(event.intent, Intent::ShortPress);
    assert_eq!(engine.outstanding_timers(), 0);

    let plan = plan_for(event.intent, SCREEN);
    let strokes: Vec<_> = plan.iter().copied().collect();
    assert_eq!(strokes.len(), 1);
    assert!(strokes[0].from.y > strokes[0].to.y);
    assert_eq!(strokes[0].from.x, strokes[0].to.x);
}

#[test]
fn long_press_plans_a_downward_swipe() {
    let mut engine = PressEngine::default();
    let _ = engine.handle_key(key(KeyEdge::Down, 0));

    let output = engine.advance(2_000);
    let event = sole_intent(output.intents.iter().copied().collect());
    assert_eq!(event.intent, Intent::LongPress);
    let _ = engine.handle_key(key(KeyEdge::Up, 2_100));
    assert_eq!(engine.outstanding_timers(), 0);

    let plan = plan_for(event.intent, SCREEN);
    let strokes: Vec<_> = plan.iter().copied().collect();
    assert_eq!(strokes.len(), 1);
    assert!(strokes[0].from.y < strokes[0].to.y);
}

#[test]
fn double_tap_plans_two_taps_at_one_point() {
    let mut engine = PressEngine::default();
    let _ = engine.handle_key(key(KeyEdge::Down, 0));
    let _ = engine.handle_key(key(KeyEdge::Up, 60));

    let output = engine.handle_key(key(KeyEdge::Down, 160));
    let event = sole_intent(output.intents.iter().copied().collect());
    assert_eq!(event.intent, Intent::DoubleTap);
    let _ = engine.handle_key(key(KeyEdge::Up, 220));
    assert_eq!(engine.outstanding_timers(), 0);

    let plan = plan_for(event.intent, SCREEN);
    let strokes: Vec<_> = plan.iter().copied().collect();
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0].from, strokes[0].to);
    assert_eq!(strokes[0].from, strokes[1].from);
    assert!(strokes[1].delay_ms > 0);
}
