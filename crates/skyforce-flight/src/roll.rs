//! Roll frame selection for aircraft with banking sprites.

use skyforce_core::types::IntRect;

/// Which of the three frames in a roll strip to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollFrame {
    Level,
    BankLeft,
    BankRight,
}

impl RollFrame {
    /// Pick the frame from the sign of the horizontal velocity.
    pub fn from_velocity_x(vx: f32) -> Self {
        if vx < 0.0 {
            RollFrame::BankLeft
        } else if vx > 0.0 {
            RollFrame::BankRight
        } else {
            RollFrame::Level
        }
    }

    /// Texture rect of this frame, given the rect of the level frame.
    /// Frames are laid out left to right: level, bank left, bank right.
    pub fn texture_rect(self, base: IntRect) -> IntRect {
        let step = match self {
            RollFrame::Level => 0,
            RollFrame::BankLeft => 1,
            RollFrame::BankRight => 2,
        };
        IntRect {
            left: base.left + step * base.width,
            ..base
        }
    }
}
