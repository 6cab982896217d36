#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyEdge {
    Down,
    Up,
}

impl KeyEdge {
    pub const fn label(self) -> &'static str {
        match self {
            KeyEdge::Down => "down",
            KeyEdge::Up => "up",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct KeyEvent {
    pub edge: KeyEdge,
    pub t_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Intent {
    ShortPress,
    LongPress,
    DoubleTap,
}

impl Intent {
    pub const fn label(self) -> &'static str {
        match self {
            Intent::ShortPress => "short_press",
            Intent::LongPress => "long_press",
            Intent::DoubleTap => "double_tap",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntentEvent {
    pub intent: Intent,
    pub at_ms: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IntentBuffer {
    len: usize,
    slots: [Option<IntentEvent>; Self::MAX],
}

impl IntentBuffer {
    pub const MAX: usize = 2;

    pub const fn new() -> Self {
        Self {
            len: 0,
            slots: [None; Self::MAX],
        }
    }

    pub fn push(&mut self, event: IntentEvent) {
        if self.len >= Self::MAX {
            return;
        }
        self.slots[self.len] = Some(event);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntentEvent> {
        self.slots[..self.len].iter().filter_map(Option::as_ref)
    }
}

impl Default for IntentBuffer {
    fn default() -> Self {
        Self::new()
    }
}
