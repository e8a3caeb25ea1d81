//! Input latch
//!
//! Key events arrive asynchronously from the terminal; the simulation samples
//! them exactly once per playing tick. The latch holds per-action held state
//! plus the jump edge detector, so key auto-repeat (or holding jump across a
//! modal screen) can never fire more than one jump per press.

/// Logical actions the simulation understands. Key codes that map to none of
/// these are never observed as held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Held-action state, written by the host event loop and read by the sim.
/// Last writer wins; there is no queue.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    jump: bool,
    /// Jump state at the previous sample, for rising-edge detection
    jump_was_down: bool,
}

/// One tick's worth of input, snapshotted by [`InputState::sample`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// True only on the tick where jump went from released to held
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key-down from the host
    pub fn press(&mut self, action: Action) {
        self.set(action, true);
    }

    /// Key-up from the host
    pub fn release(&mut self, action: Action) {
        self.set(action, false);
    }

    pub fn set(&mut self, action: Action, held: bool) {
        match action {
            Action::MoveLeft => self.left = held,
            Action::MoveRight => self.right = held,
            Action::Jump => self.jump = held,
        }
    }

    pub fn is_held(&self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Jump => self.jump,
        }
    }

    /// Snapshot the held state for one tick and advance the jump edge latch.
    ///
    /// Only a tick that actually runs may call this: modal states skip it, so
    /// a press made and held during a quiz still registers on the first
    /// resumed tick.
    pub fn sample(&mut self) -> TickInput {
        let jump_edge = self.jump && !self.jump_was_down;
        self.jump_was_down = self.jump;
        TickInput {
            left: self.left,
            right: self.right,
            jump: jump_edge,
        }
    }
}
