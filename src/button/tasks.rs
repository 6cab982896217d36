use embassy_futures::select::{select, Either};
use embassy_time::{Instant, Timer};

use crate::config::channels::{INTENT_EVENTS, KEY_EVENTS};

use super::core::{EngineOutput, PressEngine};

// Sleeps on the earliest engine deadline so timer fires land on time even
// when the button stays quiet.
#[embassy_executor::task]
pub async fn button_pipeline_task() {
    let mut engine = PressEngine::default();
    log::info!("button: pipeline up");

    loop {
        let output = match engine.next_deadline() {
            Some(deadline_ms) => {
                let wakeup = Timer::at(Instant::from_millis(deadline_ms));
                match select(KEY_EVENTS.receive(), wakeup).await {
                    Either::First(event) => engine.handle_key(event),
                    // Advancing to the deadline rather than the wall clock
                    // keeps intent timestamps exact; a late wakeup converges
                    // over further loop turns.
                    Either::Second(()) => engine.advance(deadline_ms),
                }
            }
            None => engine.handle_key(KEY_EVENTS.receive().await),
        };
        forward_intents(output).await;
    }
}

async fn forward_intents(output: EngineOutput) {
    for event in output.intents.iter() {
        log::info!(
            "button: intent kind={} at_ms={}",
            event.intent.label(),
            event.at_ms
        );
        INTENT_EVENTS.send(*event).await;
    }
}
