//! Animation playback for the character's single full-body slot.
//!
//! A deliberately small mixer: named clips with fixed durations, one active
//! playback at a time, rate-scaled advance. Completion is reported as
//! events so the simulation can notify the vault executor exactly once per
//! playback, whether the clip ran out or something cut it short.

use std::collections::HashMap;

use parapet_physics::vault::{AnimationPlayer, ClipId, PlaybackHandle};

/// A finished playback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipEnded {
    pub handle: PlaybackHandle,
    pub clip: ClipId,
    /// True when the playback was cut short instead of running out.
    pub interrupted: bool,
}

#[derive(Debug, Clone)]
struct ActivePlayback {
    handle: PlaybackHandle,
    clip: ClipId,
    rate: f32,
    elapsed: f32,
    duration: f32,
}

/// Single-slot animation mixer.
///
/// Starting a clip while another is playing interrupts the old one, the way
/// a full-body montage slot behaves.
#[derive(Debug, Clone, Default)]
pub struct AnimationMixer {
    /// Clip durations in seconds, keyed by clip name.
    clips: HashMap<String, f32>,

    active: Option<ActivePlayback>,
    pending: Vec<ClipEnded>,
    next_handle: u64,
}

impl AnimationMixer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a clip with its duration in seconds.
    pub fn register_clip(&mut self, name: &str, duration: f32) {
        self.clips.insert(name.to_string(), duration);
    }

    /// Whether a clip with this name is registered.
    pub fn has_clip(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Whether any playback is in flight.
    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }

    /// Normalized progress (0..1) of a playback, if it is the active one.
    pub fn progress(&self, handle: PlaybackHandle) -> Option<f32> {
        let active = self.active.as_ref()?;
        if active.handle != handle {
            return None;
        }
        Some((active.elapsed / active.duration).clamp(0.0, 1.0))
    }

    /// Normalized progress of whatever is playing now.
    pub fn current_progress(&self) -> Option<f32> {
        let active = self.active.as_ref()?;
        Some((active.elapsed / active.duration).clamp(0.0, 1.0))
    }

    /// Advance playback by `dt` seconds and drain completion events.
    pub fn advance(&mut self, dt: f32) -> Vec<ClipEnded> {
        if let Some(active) = self.active.as_mut() {
            active.elapsed += dt * active.rate;
            if active.elapsed >= active.duration {
                let finished = self.active.take();
                if let Some(finished) = finished {
                    self.pending.push(ClipEnded {
                        handle: finished.handle,
                        clip: finished.clip,
                        interrupted: false,
                    });
                }
            }
        }

        std::mem::take(&mut self.pending)
    }

    /// Cut the active playback short.
    ///
    /// The interruption event is delivered from the next [`advance`] call,
    /// in the same batch as any natural completions.
    ///
    /// [`advance`]: AnimationMixer::advance
    pub fn interrupt(&mut self) {
        if let Some(active) = self.active.take() {
            self.pending.push(ClipEnded {
                handle: active.handle,
                clip: active.clip,
                interrupted: true,
            });
        }
    }
}

impl AnimationPlayer for AnimationMixer {
    fn play(&mut self, clip: &ClipId, rate: f32) -> PlaybackHandle {
        // Replacing the active playback interrupts it
        self.interrupt();

        // Unknown clips play with a nominal duration rather than panicking;
        // the executor already refused to start without a configured clip
        let duration = self.clips.get(clip.as_str()).copied().unwrap_or(1.0);

        self.next_handle += 1;
        let handle = PlaybackHandle(self.next_handle);

        log::debug!(
            "playing clip '{}' at rate {:.2} (handle {:?})",
            clip.as_str(),
            rate,
            handle
        );

        self.active = Some(ActivePlayback {
            handle,
            clip: clip.clone(),
            rate,
            elapsed: 0.0,
            duration,
        });

        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixer_with_vault_clip() -> AnimationMixer {
        let mut mixer = AnimationMixer::new();
        mixer.register_clip("vault_over", 1.2);
        mixer
    }

    #[test]
    fn test_clip_finishes_after_scaled_duration() {
        let mut mixer = mixer_with_vault_clip();
        let handle = mixer.play(&ClipId::new("vault_over"), 1.5);

        // 1.2s at 1.5x rate = 0.8s wall time
        let events = mixer.advance(0.5);
        assert!(events.is_empty());
        assert!(mixer.is_playing());

        let events = mixer.advance(0.5);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].handle, handle);
        assert!(!events[0].interrupted);
        assert!(!mixer.is_playing());
    }

    #[test]
    fn test_interrupt_reports_on_next_advance() {
        let mut mixer = mixer_with_vault_clip();
        let handle = mixer.play(&ClipId::new("vault_over"), 1.5);

        mixer.advance(0.1);
        mixer.interrupt();
        assert!(!mixer.is_playing());

        let events = mixer.advance(0.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].handle, handle);
        assert!(events[0].interrupted);
    }

    #[test]
    fn test_replacement_interrupts_previous_playback() {
        let mut mixer = mixer_with_vault_clip();
        let first = mixer.play(&ClipId::new("vault_over"), 1.0);
        let second = mixer.play(&ClipId::new("vault_over"), 1.0);

        assert_ne!(first, second);

        let events = mixer.advance(0.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].handle, first);
        assert!(events[0].interrupted);
        assert!(mixer.is_playing());
    }

    #[test]
    fn test_progress_tracks_active_playback_only() {
        let mut mixer = mixer_with_vault_clip();
        let handle = mixer.play(&ClipId::new("vault_over"), 1.0);

        mixer.advance(0.6);
        let progress = mixer.progress(handle).unwrap();
        assert!((progress - 0.5).abs() < 0.001);

        assert!(mixer.progress(PlaybackHandle(999)).is_none());
    }
}
