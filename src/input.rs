//! Input channels.
//!
//! Directions are level-triggered: the browser flips held flags on press and
//! release and the loop samples them once per frame. Interact and close are
//! edge-triggered commands queued by event handlers and drained by the next
//! tick, so a single key press fires exactly once.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    /// Unit step in screen coordinates (y grows down).
    pub fn vector(self) -> (f64, f64) {
        match self {
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }

    /// DOM `KeyboardEvent.key` name.
    pub fn key_name(self) -> &'static str {
        match self {
            Direction::Left => "ArrowLeft",
            Direction::Right => "ArrowRight",
            Direction::Up => "ArrowUp",
            Direction::Down => "ArrowDown",
        }
    }

    /// Id of the on-screen button mirroring this direction.
    pub fn button_id(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Discrete, one-shot inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Interact,
    ClosePopup,
}

/// Id of the on-screen interact button.
pub const INTERACT_BUTTON_ID: &str = "f-key";

/// What a keyboard key means to the game, if anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    Interact,
}

pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "f" | "F" => Some(KeyAction::Interact),
        _ => Direction::ALL
            .into_iter()
            .find(|d| d.key_name() == key)
            .map(KeyAction::Move),
    }
}

/// Held state of the four directions plus the pending command queue.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    held: [bool; 4],
    commands: VecDeque<Command>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the direction was not already held (a fresh press).
    pub fn press(&mut self, dir: Direction) -> bool {
        !std::mem::replace(&mut self.held[dir.index()], true)
    }

    /// Returns true if the direction was held before.
    pub fn release(&mut self, dir: Direction) -> bool {
        std::mem::replace(&mut self.held[dir.index()], false)
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held[dir.index()]
    }

    pub fn release_all(&mut self) {
        self.held = [false; 4];
    }

    /// Sum of the held directions scaled by `amount`. Not normalized, so a
    /// diagonal moves `amount` on both axes.
    pub fn delta(&self, amount: f64) -> (f64, f64) {
        Direction::ALL
            .into_iter()
            .filter(|d| self.is_held(*d))
            .fold((0.0, 0.0), |(dx, dy), d| {
                let (vx, vy) = d.vector();
                (dx + vx * amount, dy + vy * amount)
            })
    }

    pub fn push_command(&mut self, cmd: Command) {
        self.commands.push_back(cmd);
    }

    pub fn drain_commands(&mut self) -> impl Iterator<Item = Command> + '_ {
        self.commands.drain(..)
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }
}
