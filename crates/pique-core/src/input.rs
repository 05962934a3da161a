use bitflags::bitflags;
use web_time::Instant;

use crate::Vec2;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PointerButtons: u8 {
        const PRIMARY = 1 << 0;
        const SECONDARY = 1 << 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// A pointer sample in global (screen) coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PointerEvent {
    pub position: Vec2,
    pub phase: PointerPhase,
    pub buttons: PointerButtons,
    pub time: Instant,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, position: Vec2, time: Instant) -> Self {
        PointerEvent {
            position,
            phase,
            buttons: PointerButtons::PRIMARY,
            time,
        }
    }
}
