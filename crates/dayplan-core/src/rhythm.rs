//! Focus/break rhythm over free windows.
//!
//! With chunking enabled, each free window is carved left-to-right into
//! focus slots separated by breaks. A single chunk counter rolls across
//! windows within a pass, so the long-break cadence survives window
//! boundaries. Break tasks are synthetic, immovable, and tagged with the
//! system break project so downstream accounting skips them.

use chrono::Duration;

use crate::grid::{minutes_between, round_15, GRID_MINUTES};
use crate::settings::PlannerSettings;
use crate::task::{Slot, Task};

/// Work slots plus the synthetic break tasks carved out between them.
#[derive(Debug, Clone)]
pub struct RhythmOutput {
    pub slots: Vec<Slot>,
    pub breaks: Vec<Task>,
}

/// Subdivides free windows into alternating focus and break intervals.
pub struct RhythmEngine;

impl RhythmEngine {
    /// Carve `windows` according to `settings`.
    ///
    /// With chunking disabled the windows pass through untouched and no
    /// breaks are emitted.
    pub fn chunk(windows: &[Slot], settings: &PlannerSettings) -> RhythmOutput {
        if !settings.enable_chunking {
            return RhythmOutput {
                slots: windows.to_vec(),
                breaks: Vec::new(),
            };
        }

        let focus_len = round_15(settings.focus_chunk_minutes as i64);
        let cadence = settings.long_break_cadence.max(2) as u64;
        let mut slots = Vec::new();
        let mut breaks = Vec::new();
        let mut chunk_count: u64 = 0;

        for window in windows {
            let mut cursor = window.start;
            while minutes_between(cursor, window.end) >= GRID_MINUTES {
                let remaining = minutes_between(cursor, window.end);
                let len = focus_len.min(remaining - remaining % GRID_MINUTES);
                let focus_end = cursor + Duration::minutes(len);
                slots.push(Slot::new(cursor, focus_end));
                cursor = focus_end;
                chunk_count += 1;

                let after = minutes_between(cursor, window.end);
                if after < GRID_MINUTES {
                    continue;
                }
                let long = chunk_count % cadence == 0;
                let base = if long {
                    round_15(settings.long_break_minutes as i64)
                } else {
                    round_15(settings.short_break_minutes as i64)
                };
                let clamped = base.min(after - after % GRID_MINUTES);
                if clamped >= GRID_MINUTES {
                    let break_end = cursor + Duration::minutes(clamped);
                    breaks.push(Task::break_task(cursor, break_end, long));
                    cursor = break_end;
                } else {
                    cursor = window.end;
                }
            }
        }

        RhythmOutput { slots, breaks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    fn chunk_settings() -> PlannerSettings {
        PlannerSettings {
            enable_chunking: true,
            focus_chunk_minutes: 30,
            short_break_minutes: 15,
            long_break_minutes: 30,
            long_break_cadence: 2,
            ..Default::default()
        }
    }

    #[test]
    fn disabled_chunking_passes_windows_through() {
        let windows = vec![Slot::new(at(9, 0), at(12, 0))];
        let settings = PlannerSettings {
            enable_chunking: false,
            ..Default::default()
        };
        let out = RhythmEngine::chunk(&windows, &settings);
        assert_eq!(out.slots, windows);
        assert!(out.breaks.is_empty());
    }

    #[test]
    fn carves_focus_and_breaks_with_cadence() {
        let windows = vec![Slot::new(at(9, 0), at(12, 0))];
        let out = RhythmEngine::chunk(&windows, &chunk_settings());

        assert_eq!(out.slots[0], Slot::new(at(9, 0), at(9, 30)));
        assert_eq!(out.slots[1], Slot::new(at(9, 45), at(10, 15)));
        assert_eq!(out.slots[2], Slot::new(at(10, 45), at(11, 15)));
        assert_eq!(out.slots[3], Slot::new(at(11, 30), at(12, 0)));
        assert_eq!(out.slots.len(), 4);

        // Breaks alternate short, long, short under cadence 2
        assert_eq!(out.breaks.len(), 3);
        assert_eq!(out.breaks[0].title, "Short break");
        assert_eq!(out.breaks[0].scheduled_interval(), Some((at(9, 30), at(9, 45))));
        assert_eq!(out.breaks[1].title, "Long break");
        assert_eq!(out.breaks[1].scheduled_interval(), Some((at(10, 15), at(10, 45))));
        assert_eq!(out.breaks[2].title, "Short break");
        assert!(out.breaks.iter().all(|b| b.is_break() && b.is_fixed));
    }

    #[test]
    fn cadence_counter_rolls_across_windows() {
        let windows = vec![
            Slot::new(at(9, 0), at(9, 45)),
            Slot::new(at(13, 0), at(14, 0)),
        ];
        let out = RhythmEngine::chunk(&windows, &chunk_settings());

        // First window: one 30m focus + 15m short break (chunk #1)
        assert_eq!(out.slots[0], Slot::new(at(9, 0), at(9, 30)));
        assert_eq!(out.breaks[0].title, "Short break");
        // Second window opens with chunk #2, so its break is long
        assert_eq!(out.slots[1], Slot::new(at(13, 0), at(13, 30)));
        assert_eq!(out.breaks[1].title, "Long break");
    }

    #[test]
    fn short_tail_becomes_trailing_focus_without_break() {
        let windows = vec![Slot::new(at(9, 0), at(9, 40))];
        let out = RhythmEngine::chunk(&windows, &chunk_settings());
        // 30m focus, then a 10m remainder: too small for a break or slot
        assert_eq!(out.slots, vec![Slot::new(at(9, 0), at(9, 30))]);
        assert!(out.breaks.is_empty());
    }

    #[test]
    fn window_smaller_than_chunk_yields_single_focus() {
        let windows = vec![Slot::new(at(9, 0), at(9, 15))];
        let out = RhythmEngine::chunk(&windows, &chunk_settings());
        assert_eq!(out.slots, vec![Slot::new(at(9, 0), at(9, 15))]);
        assert!(out.breaks.is_empty());
    }
}
