//! Property-based tests for the playlist controller
//!
//! Random command sequences must never break the playlist invariants:
//! no duplicate paths, a selection that always points into the playlist,
//! and a persisted copy that matches memory.

mod common;

use cadence_core::{PlaybackState, RepeatMode, Track};
use cadence_playback::{DeviceNotification, PlayerConfig, PlaylistController};
use cadence_storage::MemorySessionStore;
use common::RecordingDevice;
use proptest::prelude::*;
use std::collections::HashSet;

// ===== Helpers =====

#[derive(Debug, Clone)]
enum Op {
    Open(Vec<u8>),
    RemoveTrack(u8),
    RemoveAt(usize),
    Select(usize),
    Next,
    Previous,
    Shuffle,
    PlayPause,
    Stop,
    ToggleRepeat,
    Report(PlaybackState),
    Error,
}

/// Small path space so duplicates are common
fn path(id: u8) -> Track {
    Track::new(format!("/music/{:02}.mp3", id % 16))
}

fn arbitrary_state() -> impl Strategy<Value = PlaybackState> {
    prop_oneof![
        Just(PlaybackState::Stopped),
        Just(PlaybackState::Playing),
        Just(PlaybackState::Paused),
    ]
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => prop::collection::vec(any::<u8>(), 0..6).prop_map(Op::Open),
        1 => any::<u8>().prop_map(Op::RemoveTrack),
        1 => (0usize..20).prop_map(Op::RemoveAt),
        2 => (0usize..20).prop_map(Op::Select),
        2 => Just(Op::Next),
        2 => Just(Op::Previous),
        1 => Just(Op::Shuffle),
        1 => Just(Op::PlayPause),
        1 => Just(Op::Stop),
        1 => Just(Op::ToggleRepeat),
        3 => arbitrary_state().prop_map(Op::Report),
        1 => Just(Op::Error),
    ]
}

fn apply(controller: &mut PlaylistController<RecordingDevice, MemorySessionStore>, op: Op) {
    match op {
        Op::Open(ids) => controller.open(ids.into_iter().map(path)),
        Op::RemoveTrack(id) => {
            controller.remove_track(&path(id));
        }
        Op::RemoveAt(index) => {
            let _ = controller.remove_at(index);
        }
        Op::Select(index) => {
            let _ = controller.select_index(index);
        }
        Op::Next => controller.next(),
        Op::Previous => controller.previous(),
        Op::Shuffle => controller.shuffle(),
        Op::PlayPause => controller.play_pause(),
        Op::Stop => controller.stop(),
        Op::ToggleRepeat => {
            controller.toggle_repeat_mode();
        }
        Op::Report(state) => controller.handle_notification(DeviceNotification::StateChanged(state)),
        Op::Error => controller.handle_notification(DeviceNotification::Error("boom".to_string())),
    }
}

fn controller() -> (
    PlaylistController<RecordingDevice, MemorySessionStore>,
    MemorySessionStore,
) {
    let store = MemorySessionStore::new();
    let controller =
        PlaylistController::new(RecordingDevice::new(), store.clone(), &PlayerConfig::default());
    (controller, store)
}

// ===== Property Tests =====

proptest! {
    /// Property: Playlist never holds the same path twice
    #[test]
    fn playlist_has_no_duplicates(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let (mut controller, _store) = controller();

        for op in ops {
            apply(&mut controller, op);
            let unique: HashSet<&Track> = controller.tracks().iter().collect();
            prop_assert_eq!(unique.len(), controller.tracks().len());
        }
    }

    /// Property: Selection is always None or a valid index
    #[test]
    fn selection_always_in_bounds(ops in prop::collection::vec(arbitrary_op(), 0..60)) {
        let (mut controller, _store) = controller();

        for op in ops {
            apply(&mut controller, op);
            if let Some(index) = controller.current_index() {
                prop_assert!(index < controller.tracks().len());
            }
            if controller.tracks().is_empty() {
                prop_assert_eq!(controller.current_index(), None);
            }
        }
    }

    /// Property: Persisted playlist mirrors the in-memory one after every change
    #[test]
    fn persisted_playlist_matches_memory(ops in prop::collection::vec(arbitrary_op(), 1..60)) {
        let (mut controller, store) = controller();

        for op in ops {
            apply(&mut controller, op);
        }

        if store.save_count() > 0 {
            prop_assert_eq!(store.tracks(), controller.tracks().to_vec());
        } else {
            prop_assert!(controller.tracks().is_empty());
        }
    }

    /// Property: next() followed by previous() returns to the same index
    #[test]
    fn next_then_previous_round_trips(len in 2usize..30, start in 0usize..30) {
        let start = start % (len - 1);
        let (mut controller, _store) = controller();
        controller.open((0..len).map(|i| format!("/t/{}.ogg", i)));
        controller.select_index(start).unwrap();

        controller.next();
        prop_assert_eq!(controller.current_index(), Some(start + 1));
        controller.previous();
        prop_assert_eq!(controller.current_index(), Some(start));
    }

    /// Property: Shuffle yields a permutation with the first track selected
    #[test]
    fn shuffle_is_permutation(len in 1usize..40) {
        let (mut controller, _store) = controller();
        controller.open((0..len).map(|i| format!("/t/{}.wav", i)));
        let before: HashSet<Track> = controller.tracks().iter().cloned().collect();

        controller.shuffle();

        let after: HashSet<Track> = controller.tracks().iter().cloned().collect();
        prop_assert_eq!(before, after);
        prop_assert_eq!(controller.tracks().len(), len);
        prop_assert_eq!(controller.current_index(), Some(0));
    }

    /// Property: N repeat toggles advance N mod 3 steps from any starting mode
    #[test]
    fn repeat_toggle_cycles(start in 0usize..3, n in 0usize..50) {
        let cycle = [RepeatMode::Off, RepeatMode::All, RepeatMode::One];
        let config = PlayerConfig {
            repeat: cycle[start],
            ..PlayerConfig::default()
        };
        let mut controller =
            PlaylistController::new(RecordingDevice::new(), MemorySessionStore::new(), &config);
        prop_assert_eq!(controller.repeat_mode(), cycle[start]);

        for _ in 0..n {
            controller.toggle_repeat_mode();
        }

        prop_assert_eq!(controller.repeat_mode(), cycle[(start + n) % 3]);
    }

    /// Property: With repeat-all, natural completion always selects (i + 1) mod len
    #[test]
    fn repeat_all_wraps(len in 1usize..20, start in 0usize..20) {
        let start = start % len;
        let (mut controller, _store) = controller();
        controller.open((0..len).map(|i| format!("/t/{}.flac", i)));
        controller.set_repeat_mode(RepeatMode::All);
        controller.select_index(start).unwrap();
        controller.handle_notification(DeviceNotification::StateChanged(PlaybackState::Playing));

        controller.handle_notification(DeviceNotification::StateChanged(PlaybackState::Stopped));

        prop_assert_eq!(controller.current_index(), Some((start + 1) % len));
    }
}
