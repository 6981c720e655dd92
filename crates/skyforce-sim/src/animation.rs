//! Frame-strip animation used for explosions.

use skyforce_core::types::IntRect;

#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frame_size: (i32, i32),
    /// Frames per row in the sheet.
    columns: u32,
    num_frames: u32,
    duration_secs: f32,
    elapsed_secs: f32,
}

impl Animation {
    pub fn new(frame_size: (i32, i32), columns: u32, num_frames: u32, duration_secs: f32) -> Self {
        Self {
            frame_size,
            columns: columns.max(1),
            num_frames,
            duration_secs,
            elapsed_secs: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.elapsed_secs += dt;
    }

    /// Index of the frame showing now. Equals `num_frames` once played out.
    pub fn current_frame(&self) -> u32 {
        if self.num_frames == 0 || self.duration_secs <= 0.0 {
            return self.num_frames;
        }
        let time_per_frame = self.duration_secs / self.num_frames as f32;
        ((self.elapsed_secs / time_per_frame) as u32).min(self.num_frames)
    }

    pub fn is_finished(&self) -> bool {
        self.current_frame() >= self.num_frames
    }

    /// Texture rect of the current frame; the last frame is held once finished.
    pub fn frame_rect(&self) -> IntRect {
        let frame = self.current_frame().min(self.num_frames.saturating_sub(1));
        let (w, h) = self.frame_size;
        IntRect::new(
            (frame % self.columns) as i32 * w,
            (frame / self.columns) as i32 * h,
            w,
            h,
        )
    }
}
