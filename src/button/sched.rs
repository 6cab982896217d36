#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum TimerRole {
    LongPress = 0,
    DoubleWindow = 1,
    ShortConfirm = 2,
}

impl TimerRole {
    pub const COUNT: usize = 3;

    pub const fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerToken {
    role: TimerRole,
    seq: u16,
}

impl TimerToken {
    pub const fn role(self) -> TimerRole {
        self.role
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimerFire {
    pub token: TimerToken,
    pub at_ms: u64,
}

#[derive(Clone, Copy, Debug)]
struct TimerSlot {
    token: TimerToken,
    deadline_ms: u64,
}

#[derive(Clone, Copy, Debug)]
pub struct TimerQueue {
    slots: [Option<TimerSlot>; TimerRole::COUNT],
    seqs: [u16; TimerRole::COUNT],
}

impl TimerQueue {
    pub const fn new() -> Self {
        Self {
            slots: [None; TimerRole::COUNT],
            seqs: [0; TimerRole::COUNT],
        }
    }

    // Replaces any outstanding schedule for the same role.
    pub fn schedule(&mut self, role: TimerRole, now_ms: u64, delay_ms: u64) -> TimerToken {
        let idx = role.index();
        self.seqs[idx] = self.seqs[idx].wrapping_add(1);
        let token = TimerToken {
            role,
            seq: self.seqs[idx],
        };
        self.slots[idx] = Some(TimerSlot {
            token,
            deadline_ms: now_ms.saturating_add(delay_ms),
        });
        token
    }

    // Only clears the slot while it still holds exactly this token, so
    // cancelling a fired or superseded token changes nothing.
    pub fn cancel(&mut self, token: TimerToken) {
        let idx = token.role.index();
        if self.slots[idx].is_some_and(|slot| slot.token == token) {
            self.slots[idx] = None;
        }
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.slots.iter().flatten().map(|slot| slot.deadline_ms).min()
    }

    pub fn has_due(&self, now_ms: u64) -> bool {
        self.slots
            .iter()
            .flatten()
            .any(|slot| slot.deadline_ms <= now_ms)
    }

    // Earliest deadline wins; ties resolve in role declaration order.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerFire> {
        let mut best: Option<(usize, u64)> = None;
        for (idx, slot) in self.slots.iter().enumerate() {
            if let Some(slot) = slot {
                if slot.deadline_ms <= now_ms
                    && best.map_or(true, |(_, deadline)| slot.deadline_ms < deadline)
                {
                    best = Some((idx, slot.deadline_ms));
                }
            }
        }
        let (idx, _) = best?;
        let slot = self.slots[idx].take()?;
        Some(TimerFire {
            token: slot.token,
            at_ms: slot.deadline_ms,
        })
    }

    pub fn outstanding(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl Default for TimerQueue {
    fn default() -> Self {
        Self::new()
    }
}
