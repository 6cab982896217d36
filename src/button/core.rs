use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::config::PressTimings;
use super::sched::{TimerFire, TimerQueue, TimerRole, TimerToken};
use super::types::{Intent, IntentBuffer, IntentEvent, KeyEdge, KeyEvent};

#[derive(Clone, Copy, Debug)]
enum PressHsmEvent {
    Down { t_ms: u64 },
    Up { t_ms: u64 },
    Poll { now_ms: u64 },
}

#[derive(Default)]
struct DispatchContext {
    intents: IntentBuffer,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOutput {
    pub intents: IntentBuffer,
}

pub struct PressEngine {
    machine: statig::blocking::StateMachine<PressHsm>,
}

impl Default for PressEngine {
    fn default() -> Self {
        Self::new(PressTimings::default())
    }
}

impl PressEngine {
    pub fn new(timings: PressTimings) -> Self {
        Self {
            machine: PressHsm::new(timings).state_machine(),
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> EngineOutput {
        let hsm_event = match event.edge {
            KeyEdge::Down => PressHsmEvent::Down { t_ms: event.t_ms },
            KeyEdge::Up => PressHsmEvent::Up { t_ms: event.t_ms },
        };
        let mut context = DispatchContext::default();
        // Fires whose deadlines precede the edge land first; a fresh press
        // must not cancel a confirmation that already lapsed.
        self.drain_due(event.t_ms, &mut context);
        self.machine.handle_with_context(&hsm_event, &mut context);
        EngineOutput {
            intents: context.intents,
        }
    }

    pub fn advance(&mut self, now_ms: u64) -> EngineOutput {
        let mut context = DispatchContext::default();
        self.drain_due(now_ms, &mut context);
        EngineOutput {
            intents: context.intents,
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.machine.inner().timers.next_deadline()
    }

    // Zero whenever no cycle is open.
    pub fn outstanding_timers(&self) -> usize {
        self.machine.inner().timers.outstanding()
    }

    // Delivers due fires in deadline order, stamped with their deadlines.
    // Each poll pops exactly one due fire and fire handlers never schedule,
    // so one pass per slot covers everything due.
    fn drain_due(&mut self, now_ms: u64, context: &mut DispatchContext) {
        for _ in 0..TimerRole::COUNT {
            if !self.machine.inner().timers.has_due(now_ms) {
                break;
            }
            self.machine
                .handle_with_context(&PressHsmEvent::Poll { now_ms }, context);
        }
    }
}

struct PressHsm {
    timings: PressTimings,
    timers: TimerQueue,
    last_press_ms: u64,
    press_count: u8,
    long_token: Option<TimerToken>,
    window_token: Option<TimerToken>,
    short_token: Option<TimerToken>,
}

impl PressHsm {
    fn new(timings: PressTimings) -> Self {
        Self {
            timings,
            timers: TimerQueue::new(),
            last_press_ms: 0,
            press_count: 0,
            long_token: None,
            window_token: None,
            short_token: None,
        }
    }

    fn cancel_long(&mut self) {
        if let Some(token) = self.long_token.take() {
            self.timers.cancel(token);
        }
    }

    fn cancel_window(&mut self) {
        if let Some(token) = self.window_token.take() {
            self.timers.cancel(token);
        }
    }

    fn cancel_short(&mut self) {
        if let Some(token) = self.short_token.take() {
            self.timers.cancel(token);
        }
    }

    // Shared down-edge path. A pairing press emits here and lands in
    // double_latched with nothing scheduled; any other press arms the long
    // and window timers.
    fn begin_press(&mut self, context: &mut DispatchContext, t_ms: u64) -> Outcome<State> {
        self.cancel_long();
        self.cancel_window();
        self.cancel_short();

        if t_ms.saturating_sub(self.last_press_ms) <= self.timings.double_window_ms {
            self.press_count = self.press_count.saturating_add(1);
            if self.press_count == 2 {
                self.press_count = 0;
                self.last_press_ms = t_ms;
                Self::emit(context, Intent::DoubleTap, t_ms);
                return Transition(State::double_latched());
            }
        } else {
            self.press_count = 1;
        }

        self.last_press_ms = t_ms;
        self.long_token = Some(self.timers.schedule(
            TimerRole::LongPress,
            t_ms,
            self.timings.long_press_ms,
        ));
        self.window_token = Some(self.timers.schedule(
            TimerRole::DoubleWindow,
            t_ms,
            self.timings.double_window_ms,
        ));
        Transition(State::held())
    }

    fn owns(&self, fire: TimerFire) -> bool {
        let stored = match fire.token.role() {
            TimerRole::LongPress => self.long_token,
            TimerRole::DoubleWindow => self.window_token,
            TimerRole::ShortConfirm => self.short_token,
        };
        stored == Some(fire.token)
    }

    fn clear_token(&mut self, role: TimerRole) {
        match role {
            TimerRole::LongPress => self.long_token = None,
            TimerRole::DoubleWindow => self.window_token = None,
            TimerRole::ShortConfirm => self.short_token = None,
        }
    }

    fn emit(context: &mut DispatchContext, intent: Intent, at_ms: u64) {
        context.intents.push(IntentEvent { intent, at_ms });
    }
}

#[state_machine(initial = "State::idle()")]
impl PressHsm {
    #[state(superstate = "running")]
    fn idle(&mut self, context: &mut DispatchContext, event: &PressHsmEvent) -> Outcome<State> {
        match event {
            PressHsmEvent::Down { t_ms } => self.begin_press(context, *t_ms),
            _ => Super,
        }
    }

    #[state(superstate = "running")]
    fn held(&mut self, context: &mut DispatchContext, event: &PressHsmEvent) -> Outcome<State> {
        match event {
            PressHsmEvent::Up { t_ms } => {
                // Release ends long-press candidacy; the short-confirm timer
                // now supersedes the double window as the authority on
                // whether a second press still arrives.
                self.cancel_long();
                self.short_token = Some(self.timers.schedule(
                    TimerRole::ShortConfirm,
                    *t_ms,
                    self.timings.double_window_ms,
                ));
                self.cancel_window();
                Transition(State::await_short())
            }
            PressHsmEvent::Poll { now_ms } => {
                let Some(fire) = self.timers.pop_due(*now_ms) else {
                    return Handled;
                };
                if !self.owns(fire) {
                    return Handled;
                }
                self.clear_token(fire.token.role());
                match fire.token.role() {
                    TimerRole::LongPress => {
                        self.press_count = 0;
                        self.cancel_window();
                        self.cancel_short();
                        Self::emit(context, Intent::LongPress, fire.at_ms);
                        Transition(State::long_active())
                    }
                    TimerRole::DoubleWindow => {
                        // Window closed with the button still held: this
                        // press can no longer pair.
                        self.press_count = 0;
                        Handled
                    }
                    TimerRole::ShortConfirm => Handled,
                }
            }
            // A repeated down edge while held must not restart the cycle.
            PressHsmEvent::Down { .. } => Super,
        }
    }

    #[state(superstate = "running")]
    fn long_active(
        &mut self,
        context: &mut DispatchContext,
        event: &PressHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            PressHsmEvent::Up { .. } => {
                // The intent already left while the button was held; the
                // release only closes the cycle.
                self.press_count = 0;
                Transition(State::idle())
            }
            _ => Super,
        }
    }

    #[state(superstate = "running")]
    fn await_short(
        &mut self,
        context: &mut DispatchContext,
        event: &PressHsmEvent,
    ) -> Outcome<State> {
        match event {
            PressHsmEvent::Down { t_ms } => self.begin_press(context, *t_ms),
            PressHsmEvent::Poll { now_ms } => {
                let Some(fire) = self.timers.pop_due(*now_ms) else {
                    return Handled;
                };
                if !self.owns(fire) {
                    return Handled;
                }
                self.clear_token(fire.token.role());
                match fire.token.role() {
                    TimerRole::ShortConfirm => {
                        // Nothing disproved a short press before the window
                        // ran out. The press count deliberately survives: a
                        // follow-up landing exactly on the window boundary
                        // can still pair.
                        Self::emit(context, Intent::ShortPress, fire.at_ms);
                        Transition(State::idle())
                    }
                    _ => Handled,
                }
            }
            PressHsmEvent::Up { .. } => Super,
        }
    }

    #[state(superstate = "running")]
    fn double_latched(
        &mut self,
        context: &mut DispatchContext,
        event: &PressHsmEvent,
    ) -> Outcome<State> {
        let _ = context;
        match event {
            PressHsmEvent::Up { .. } => Transition(State::idle()),
            _ => Super,
        }
    }

    #[superstate]
    fn running(&mut self, context: &mut DispatchContext, event: &PressHsmEvent) -> Outcome<State> {
        let _ = context;
        // Stray edges land here: repeats while held, releases with no press
        // open. A fire no state claims must still leave the queue.
        match event {
            PressHsmEvent::Poll { now_ms } => {
                let _ = self.timers.pop_due(*now_ms);
                Handled
            }
            _ => Handled,
        }
    }
}
