/// A sequence of atlas frames played at a fixed rate.
///
/// The frame shown is derived from how long the owner has been in its current
/// state, so no per-frame bookkeeping is needed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSequence {
    frames: &'static [&'static str],
    frame_duration: f32,
    looping: bool,
}

impl FrameSequence {
    pub const fn new(frames: &'static [&'static str], frame_duration: f32, looping: bool) -> Self {
        Self {
            frames,
            frame_duration,
            looping,
        }
    }

    /// A sequence that always shows the same frame.
    pub const fn still(frames: &'static [&'static str]) -> Self {
        Self::new(frames, 0.0, false)
    }

    /// The frame shown `time` seconds into the sequence.
    pub fn frame_at(&self, time: f32) -> &'static str {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return "";
        };

        let index = if self.frame_duration > 0.0 {
            (time.max(0.0) / self.frame_duration) as usize
        } else {
            0
        };
        let index = if self.looping { index % self.frames.len() } else { index.min(last) };
        self.frames[index]
    }

    pub fn frames(&self) -> &'static [&'static str] {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAMES: &[&str] = &["a", "b", "c"];

    #[test]
    fn test_looping_sequence_wraps() {
        let sequence = FrameSequence::new(FRAMES, 0.1, true);
        assert_eq!(sequence.frame_at(0.0), "a");
        assert_eq!(sequence.frame_at(0.15), "b");
        assert_eq!(sequence.frame_at(0.35), "a");
    }

    #[test]
    fn test_non_looping_sequence_holds_last_frame() {
        let sequence = FrameSequence::new(FRAMES, 0.1, false);
        assert_eq!(sequence.frame_at(10.0), "c");
    }

    #[test]
    fn test_still_sequence() {
        let sequence = FrameSequence::still(&["only"]);
        assert_eq!(sequence.frame_at(3.0), "only");
    }
}
