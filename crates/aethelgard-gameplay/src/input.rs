//! Input sampling for the frame loop.
//!
//! Platform input never touches simulation state directly. The host holds an
//! [`InputHandle`] and posts [`Intent`]s into a bounded mailbox owned by an
//! [`InputSession`]. Once per frame the [`InputSampler`] drains that mailbox
//! and reduces it to the held-key set, at most one click, at most one zone
//! request and the single-slot action trigger.
//!
//! Dropping the session closes the mailbox. Every handle then fails with
//! [`InputError::SessionClosed`], however the session ended.

use aethelgard_common::{GroundPos, Vec2};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, trace};

use crate::config::SimConfig;
use crate::zone::Zone;

/// Errors raised when posting input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    /// The session that owned the mailbox has ended
    #[error("input session closed")]
    SessionClosed,

    /// More intents were posted in one frame than the mailbox holds
    #[error("input mailbox full")]
    MailboxFull,
}

/// Movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKey {
    /// Toward -z
    Forward,
    /// Toward +z
    Back,
    /// Toward -x
    Left,
    /// Toward +x
    Right,
}

/// The set of held movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
}

impl MoveIntent {
    /// Marks a key as held.
    pub fn press(&mut self, key: MoveKey) {
        *self.slot(key) = true;
    }

    /// Marks a key as released.
    pub fn release(&mut self, key: MoveKey) {
        *self.slot(key) = false;
    }

    /// Returns true if `key` is held.
    #[must_use]
    pub fn is_held(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Back => self.back,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
        }
    }

    /// Returns true if no key is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.forward || self.back || self.left || self.right)
    }

    /// Per-axis direction.
    ///
    /// Each held key contributes a unit step on its own axis; opposing keys
    /// cancel. The vector is not normalized, so diagonals cover both axes at
    /// full speed.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
        Vec2::new(axis(self.left, self.right), axis(self.forward, self.back))
    }

    fn slot(&mut self, key: MoveKey) -> &mut bool {
        match key {
            MoveKey::Forward => &mut self.forward,
            MoveKey::Back => &mut self.back,
            MoveKey::Left => &mut self.left,
            MoveKey::Right => &mut self.right,
        }
    }
}

/// Discrete player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Basic attack
    Attack,
    /// Mana-costing skill
    Skill,
}

/// Single-slot action mailbox.
///
/// Setting it repeatedly before it is drained keeps only the latest action.
/// Draining empties it, so one set produces at most one resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionTrigger {
    slot: Option<ActionKind>,
}

impl ActionTrigger {
    /// Sets the pending action, replacing any earlier one.
    pub fn set(&mut self, action: ActionKind) {
        self.slot = Some(action);
    }

    /// Takes the pending action, leaving the slot empty.
    pub fn take(&mut self) -> Option<ActionKind> {
        self.slot.take()
    }

    /// Pending action, if any.
    #[must_use]
    pub const fn peek(&self) -> Option<ActionKind> {
        self.slot
    }
}

/// One raw input message from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// A movement key went down
    KeyDown(MoveKey),
    /// A movement key went up
    KeyUp(MoveKey),
    /// Pointer click, already projected onto the ground plane
    Click(GroundPos),
    /// Scroll wheel delta
    Scroll(f32),
    /// Attack or skill request
    Action(ActionKind),
    /// Rebuild the world for another zone
    ZoneRequest(Zone),
}

/// Host-side sender for intents. Cheap to clone.
#[derive(Debug, Clone)]
pub struct InputHandle {
    sender: Sender<Intent>,
}

impl InputHandle {
    /// Posts an intent.
    pub fn send(&self, intent: Intent) -> Result<(), InputError> {
        self.sender.try_send(intent).map_err(|err| match err {
            TrySendError::Full(_) => InputError::MailboxFull,
            TrySendError::Disconnected(_) => InputError::SessionClosed,
        })
    }

    /// Posts a key press.
    pub fn key_down(&self, key: MoveKey) -> Result<(), InputError> {
        self.send(Intent::KeyDown(key))
    }

    /// Posts a key release.
    pub fn key_up(&self, key: MoveKey) -> Result<(), InputError> {
        self.send(Intent::KeyUp(key))
    }

    /// Posts a ground click.
    pub fn click(&self, pos: GroundPos) -> Result<(), InputError> {
        self.send(Intent::Click(pos))
    }

    /// Posts a scroll delta.
    pub fn scroll(&self, delta: f32) -> Result<(), InputError> {
        self.send(Intent::Scroll(delta))
    }

    /// Sets the action trigger.
    pub fn trigger(&self, action: ActionKind) -> Result<(), InputError> {
        self.send(Intent::Action(action))
    }

    /// Requests a zone load.
    pub fn request_zone(&self, zone: Zone) -> Result<(), InputError> {
        self.send(Intent::ZoneRequest(zone))
    }
}

/// Owner of the inbound intent mailbox.
///
/// Lives exactly as long as the simulation session.
#[derive(Debug)]
pub struct InputSession {
    receiver: Receiver<Intent>,
    handle: InputHandle,
}

impl InputSession {
    /// Opens a session with a mailbox of `capacity` intents.
    #[must_use]
    pub fn open(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        info!(capacity, "Input session opened");
        Self {
            receiver,
            handle: InputHandle { sender },
        }
    }

    /// Returns a new handle for posting intents.
    #[must_use]
    pub fn handle(&self) -> InputHandle {
        self.handle.clone()
    }

    /// Takes every pending intent, oldest first.
    pub fn drain(&self) -> Vec<Intent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending intents.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

impl Drop for InputSession {
    fn drop(&mut self) {
        info!(discarded = self.receiver.len(), "Input session closed");
    }
}

/// Intents reduced for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameIntents {
    /// Held movement keys after this frame's key events
    pub movement: MoveIntent,
    /// Last click posted since the previous frame
    pub click: Option<GroundPos>,
    /// Last zone request posted since the previous frame
    pub zone_request: Option<Zone>,
}

/// Reduces mailbox contents into per-frame intents.
#[derive(Debug, Clone)]
pub struct InputSampler {
    held: MoveIntent,
    trigger: ActionTrigger,
    zoom: f32,
    zoom_min: f32,
    zoom_max: f32,
    zoom_per_scroll: f32,
}

impl InputSampler {
    /// Creates a sampler with nothing held and the default zoom.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            held: MoveIntent::default(),
            trigger: ActionTrigger::default(),
            zoom: config.zoom_default.clamp(config.zoom_min, config.zoom_max),
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_per_scroll: config.zoom_per_scroll,
        }
    }

    /// Drains `session` and folds its intents into this frame's view.
    ///
    /// Key state and zoom persist across frames. An action lands in the
    /// trigger slot and stays there until [`Self::take_action`].
    pub fn sample(&mut self, session: &InputSession) -> FrameIntents {
        let mut frame = FrameIntents::default();
        for intent in session.drain() {
            trace!(?intent, "Intent");
            match intent {
                Intent::KeyDown(key) => self.held.press(key),
                Intent::KeyUp(key) => self.held.release(key),
                Intent::Click(pos) => frame.click = Some(pos),
                // Positive scroll (wheel down) zooms out.
                Intent::Scroll(delta) => {
                    self.zoom = (self.zoom - delta * self.zoom_per_scroll)
                        .clamp(self.zoom_min, self.zoom_max);
                }
                Intent::Action(action) => self.trigger.set(action),
                Intent::ZoneRequest(zone) => frame.zone_request = Some(zone),
            }
        }
        frame.movement = self.held;
        frame
    }

    /// Drains the action trigger.
    pub fn take_action(&mut self) -> Option<ActionKind> {
        self.trigger.take()
    }

    /// Pending action without draining it.
    #[must_use]
    pub const fn pending_action(&self) -> Option<ActionKind> {
        self.trigger.peek()
    }

    /// Held movement keys.
    #[must_use]
    pub const fn held(&self) -> MoveIntent {
        self.held
    }

    /// Releases every held key.
    pub fn release_all(&mut self) {
        self.held = MoveIntent::default();
    }

    /// Current camera zoom.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aethelgard_common::ground;

    #[test]
    fn test_direction_per_axis() {
        let mut intent = MoveIntent::default();
        assert_eq!(intent.direction(), Vec2::ZERO);
        intent.press(MoveKey::Forward);
        intent.press(MoveKey::Right);
        assert_eq!(intent.direction(), Vec2::new(1.0, -1.0));
        intent.press(MoveKey::Left);
        assert_eq!(intent.direction(), Vec2::new(0.0, -1.0));
        intent.release(MoveKey::Forward);
        assert!(!intent.is_held(MoveKey::Forward));
    }

    #[test]
    fn test_trigger_last_write_wins_and_drains_once() {
        let mut trigger = ActionTrigger::default();
        trigger.set(ActionKind::Attack);
        trigger.set(ActionKind::Skill);
        assert_eq!(trigger.take(), Some(ActionKind::Skill));
        assert_eq!(trigger.take(), None);
    }

    #[test]
    fn test_sampler_folds_mailbox() {
        let session = InputSession::open(16);
        let handle = session.handle();
        let mut sampler = InputSampler::new(&SimConfig::default());

        handle.key_down(MoveKey::Back).expect("send");
        handle.click(ground(1.0, 1.0)).expect("send");
        handle.click(ground(2.0, 2.0)).expect("send");
        handle.trigger(ActionKind::Attack).expect("send");
        handle.request_zone(Zone::Forest).expect("send");

        let frame = sampler.sample(&session);
        assert!(frame.movement.is_held(MoveKey::Back));
        assert_eq!(frame.click, Some(ground(2.0, 2.0)));
        assert_eq!(frame.zone_request, Some(Zone::Forest));
        assert_eq!(sampler.take_action(), Some(ActionKind::Attack));

        // Held keys persist, one-shot intents do not.
        let frame = sampler.sample(&session);
        assert!(frame.movement.is_held(MoveKey::Back));
        assert_eq!(frame.click, None);
        assert_eq!(sampler.take_action(), None);
    }

    #[test]
    fn test_zoom_clamped() {
        let session = InputSession::open(4);
        let handle = session.handle();
        let mut sampler = InputSampler::new(&SimConfig::default());
        handle.scroll(100_000.0).expect("send");
        sampler.sample(&session);
        assert!((sampler.zoom() - 0.3).abs() < 1e-6);
        handle.scroll(-100_000.0).expect("send");
        sampler.sample(&session);
        assert!((sampler.zoom() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_full_mailbox() {
        let session = InputSession::open(1);
        let handle = session.handle();
        assert_eq!(handle.scroll(1.0), Ok(()));
        assert_eq!(handle.scroll(1.0), Err(InputError::MailboxFull));
    }

    #[test]
    fn test_handle_fails_after_session_drop() {
        let session = InputSession::open(4);
        let handle = session.handle();
        drop(session);
        assert_eq!(
            handle.key_down(MoveKey::Left),
            Err(InputError::SessionClosed)
        );
    }
}
