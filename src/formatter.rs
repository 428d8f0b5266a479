//! Log line timestamps stamped with the frame they were written in.
//!
//! The stock `tracing_subscriber` formatter does the rest of the line; this
//! module only supplies the timer, so every event reads
//! `12:04:31.52113 f0x01A4  INFO platformer::level: ...`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Frames run by the app so far.
static FRAME_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits of the frame number are shown.
const FRAME_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:5]");

/// Wall-clock time followed by the current frame number.
///
/// Log lines written before the first frame (level loading, window setup)
/// show frame `0x0000`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer;

impl FrameTimer {
    fn write_stamp(writer: &mut Writer<'_>, now: OffsetDateTime, frame: u64) -> fmt::Result {
        let clock = now.format(&TIMESTAMP_FORMAT).map_err(|_| fmt::Error)?;
        let stamp = format!("{clock} {}", frame_label(frame));
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[2m{stamp}\x1b[0m")
        } else {
            writer.write_str(&stamp)
        }
    }
}

impl FormatTime for FrameTimer {
    fn format_time(&self, writer: &mut Writer<'_>) -> fmt::Result {
        Self::write_stamp(writer, OffsetDateTime::now_utc(), frame_count())
    }
}

/// Formats a frame number the way it is shown in log lines.
fn frame_label(frame: u64) -> String {
    format!("f0x{:04X}", frame & FRAME_DISPLAY_MASK)
}

/// Advances the frame counter; called once per frame from the app's loop.
pub fn increment_frame() {
    FRAME_COUNTER.fetch_add(1, Ordering::Relaxed);
}

pub fn frame_count() -> u64 {
    FRAME_COUNTER.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    fn stamp(frame: u64) -> String {
        let mut out = String::new();
        let mut writer = Writer::new(&mut out);
        FrameTimer::write_stamp(&mut writer, datetime!(2024-05-01 13:07:09.123456 UTC), frame).unwrap();
        out
    }

    #[test]
    fn test_stamp_shows_clock_and_frame() {
        assert_eq!(stamp(0x2A), "13:07:09.12345 f0x002A");
    }

    #[test]
    fn test_frame_label_wraps_at_sixteen_bits() {
        assert_eq!(frame_label(0x1_0001), "f0x0001");
        assert_eq!(stamp(0xFFFF), "13:07:09.12345 f0xFFFF");
    }

    #[test]
    fn test_increment_frame() {
        let before = frame_count();
        increment_frame();
        assert!(frame_count() > before);
    }
}
