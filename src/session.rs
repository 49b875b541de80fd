//! Per-frame interaction loop.
//!
//! A `Session` owns everything that changes while the page is open: actor
//! position, held inputs, which door/sign is being touched and whether the
//! popup is up. The browser layer feeds it input, calls [`Session::tick`] once
//! per animation frame and applies the returned [`Tick`] to the DOM. Nothing
//! here touches the DOM, so the whole loop runs under plain `cargo test`.
//!
//! Each tick:
//! 1. If the popup is closed, step the actor: try `position + delta`, test the
//!    attempted box against walls, doors and signs, commit it unless a wall is
//!    hit, clamp to the viewport, then refresh touch state and messages.
//! 2. Drain queued commands (interact / close popup) against the fresh touch
//!    state.
//!
//! Touch detection uses the attempted box, not the committed one, so pushing
//! against a wall into a door still counts as touching the door.
//!
//! Hosts that must act inside an input event (opening a link is only allowed
//! during a user gesture) call [`Session::interact`] directly instead of
//! queueing [`Command::Interact`].

use crate::config::Config;
use crate::geometry::{Rect, Viewport};
use crate::input::{Command, Direction, InputState};
use crate::world::{World, first_overlap};

/// Role of the most recent region the actor started touching.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Collision {
    #[default]
    None,
    Door,
    Sign,
}

/// Coarse view of the loop, derived from the touch flags and popup state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    TouchingDoor,
    TouchingSign,
    PopupOpen,
}

/// Which hint panel is visible. At most one field is ever true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Messages {
    pub door: bool,
    pub sign: bool,
}

/// Side effect the host must perform.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Open the URL in a new browsing context.
    OpenLink(String),
    /// Fill the popup with this text and show it together with the overlay.
    ShowPopup(String),
    HidePopup,
}

/// Result of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub x: f64,
    pub y: f64,
    pub messages: Messages,
    pub effects: Vec<Effect>,
    /// True when the popup suppressed movement this frame.
    pub frozen: bool,
}

#[derive(Clone, Debug)]
pub struct Session {
    config: Config,
    actor: Rect,
    input: InputState,
    current_door: Option<usize>,
    current_sign: Option<usize>,
    last_collision: Collision,
    messages: Messages,
    popup: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        let actor = Rect::new(config.start_x, config.start_y, 0.0, 0.0);
        Self {
            config,
            actor,
            input: InputState::new(),
            current_door: None,
            current_sign: None,
            last_collision: Collision::None,
            messages: Messages::default(),
            popup: None,
        }
    }

    pub fn with_actor_size(mut self, width: f64, height: f64) -> Self {
        self.set_actor_size(width, height);
        self
    }

    /// The rendered footprint can change (fonts, zoom); the host refreshes it.
    pub fn set_actor_size(&mut self, width: f64, height: f64) {
        self.actor.width = width;
        self.actor.height = height;
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn position(&self) -> (f64, f64) {
        (self.actor.x, self.actor.y)
    }
    pub fn actor(&self) -> Rect {
        self.actor
    }
    pub fn input(&self) -> &InputState {
        &self.input
    }
    pub fn messages(&self) -> Messages {
        self.messages
    }
    pub fn last_collision(&self) -> Collision {
        self.last_collision
    }
    pub fn current_door(&self) -> Option<usize> {
        self.current_door
    }
    pub fn current_sign(&self) -> Option<usize> {
        self.current_sign
    }
    pub fn touching_door(&self) -> bool {
        self.current_door.is_some()
    }
    pub fn touching_sign(&self) -> bool {
        self.current_sign.is_some()
    }
    pub fn is_popup_open(&self) -> bool {
        self.popup.is_some()
    }
    pub fn popup_text(&self) -> Option<&str> {
        self.popup.as_deref()
    }

    pub fn state(&self) -> LoopState {
        if self.popup.is_some() {
            return LoopState::PopupOpen;
        }
        // Hint panels can be hidden while the touch persists; go by the flags.
        match self.last_collision {
            Collision::Door if self.current_door.is_some() => LoopState::TouchingDoor,
            Collision::Sign if self.current_sign.is_some() => LoopState::TouchingSign,
            _ => LoopState::Idle,
        }
    }

    // --- Input ---------------------------------------------------------------

    /// Returns true on a fresh press (false for key repeat).
    pub fn press(&mut self, dir: Direction) -> bool {
        self.input.press(dir)
    }

    /// Returns true if the direction had been held.
    pub fn release(&mut self, dir: Direction) -> bool {
        self.input.release(dir)
    }

    /// Queue a one-shot command for the next tick.
    pub fn queue(&mut self, cmd: Command) {
        self.input.push_command(cmd);
    }

    // --- Frame ---------------------------------------------------------------

    pub fn tick(&mut self, world: &World, viewport: Viewport) -> Tick {
        let frozen = self.popup.is_some();
        if !frozen {
            self.step(world, viewport);
        }

        let mut effects = Vec::new();
        let commands: Vec<Command> = self.input.drain_commands().collect();
        for cmd in commands {
            match cmd {
                Command::Interact => effects.extend(self.interact(world)),
                Command::ClosePopup => {
                    if self.close_popup() {
                        effects.push(Effect::HidePopup);
                    }
                }
            }
        }

        Tick {
            x: self.actor.x,
            y: self.actor.y,
            messages: self.messages,
            effects,
            frozen,
        }
    }

    fn step(&mut self, world: &World, viewport: Viewport) {
        let (dx, dy) = self.input.delta(self.config.move_amount);
        let next = self.actor.moved_to(self.actor.x + dx, self.actor.y + dy);

        let wall = first_overlap(&next, &world.walls);
        self.current_door = first_overlap(&next, &world.doors).map(|(i, _)| i);
        self.current_sign = first_overlap(&next, &world.signs).map(|(i, _)| i);

        if wall.is_none() {
            self.actor = next;
        }
        let (cx, cy) = viewport.clamp(self.actor.x, self.actor.y, self.actor.width, self.actor.height);
        self.actor.x = cx;
        self.actor.y = cy;

        // Door first, then sign: touching both leaves the sign in charge.
        if self.current_door.is_some() {
            self.last_collision = Collision::Door;
        } else if self.last_collision == Collision::Door {
            self.last_collision = Collision::None;
        }
        if self.current_sign.is_some() {
            self.last_collision = Collision::Sign;
        } else if self.last_collision == Collision::Sign {
            self.last_collision = Collision::None;
        }

        self.messages = Messages {
            door: self.last_collision == Collision::Door && self.current_door.is_some(),
            sign: self.last_collision == Collision::Sign && self.current_sign.is_some(),
        };
    }

    /// Act on the touched door or sign. Ignored while the popup is open.
    ///
    /// A door opens its link (and hides the door hint until the next frame
    /// recomputes it); a door without a link does nothing. Otherwise a touched
    /// sign opens the popup with its text or the configured fallback.
    pub fn interact(&mut self, world: &World) -> Option<Effect> {
        if self.popup.is_some() {
            return None;
        }
        if let Some(idx) = self.current_door {
            let link = world.doors.get(idx).and_then(|d| d.link())?;
            self.messages.door = false;
            return Some(Effect::OpenLink(link.to_owned()));
        }
        let idx = self.current_sign?;
        let text = world
            .signs
            .get(idx)
            .and_then(|s| s.content())
            .unwrap_or(self.config.default_sign_text.as_str())
            .to_owned();
        self.popup = Some(text.clone());
        self.messages.sign = false;
        Some(Effect::ShowPopup(text))
    }

    /// Returns true if a popup was actually open.
    pub fn close_popup(&mut self) -> bool {
        self.popup.take().is_some()
    }
}
