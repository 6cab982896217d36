use embassy_sync::{blocking_mutex::raw::CriticalSectionRawMutex, channel::Channel};

use crate::button::types::{IntentEvent, KeyEvent};

// Host hook to classifier task.
pub(crate) static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, 8> = Channel::new();

// Classifier task to gesture executor.
pub(crate) static INTENT_EVENTS: Channel<CriticalSectionRawMutex, IntentEvent, 4> = Channel::new();
