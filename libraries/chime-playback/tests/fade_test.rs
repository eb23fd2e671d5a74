//! Fade tests through the player
//!
//! Verifies the exact decoder command sequence for fade-in and fade-out,
//! notification timing, and what happens when requests interrupt a fade.

use chime_core::{Decoder, DecoderEvent, DecoderFault, ManualClock};
use chime_playback::{
    PlaybackControl, PlaybackObserver, PlayerConfig, PlayerService, QueueEntry, FADE_INTERVAL,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Volume(u8),
    Play(u8, u8),
    Pause,
}

#[derive(Default)]
struct RecordingDecoder {
    commands: Vec<Command>,
}

impl RecordingDecoder {
    fn take(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }
}

impl Decoder for RecordingDecoder {
    fn set_volume(&mut self, level: u8) {
        self.commands.push(Command::Volume(level));
    }

    fn play_folder_file(&mut self, folder: u8, file: u8) {
        self.commands.push(Command::Play(folder, file));
    }

    fn pause(&mut self) {
        self.commands.push(Command::Pause);
    }

    fn query_track_count(&mut self, _folder: u8) -> Result<u16, DecoderFault> {
        Ok(3)
    }

    fn poll_event(&mut self) -> Option<DecoderEvent> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Note {
    Play(QueueEntry),
    Stop,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Note>>>);

impl Recorder {
    fn notes(&self) -> Vec<Note> {
        self.0.lock().unwrap().clone()
    }
}

impl PlaybackObserver for Recorder {
    fn on_play(&mut self, entry: QueueEntry) {
        self.0.lock().unwrap().push(Note::Play(entry));
    }

    fn on_stop(&mut self) {
        self.0.lock().unwrap().push(Note::Stop);
    }
}

struct Harness {
    player: PlayerService<RecordingDecoder, ManualClock>,
    clock: ManualClock,
    notes: Recorder,
}

impl Harness {
    fn new(volume: u8) -> Self {
        let clock = ManualClock::default();
        let config = PlayerConfig {
            volume,
            ..PlayerConfig::default()
        };
        let mut player = PlayerService::new(RecordingDecoder::default(), clock.clone(), config);
        let notes = Recorder::default();
        player.set_observer(notes.clone());
        Self {
            player,
            clock,
            notes,
        }
    }

    /// Step the clock one fade interval and poll, `n` times
    fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.clock.advance(FADE_INTERVAL);
            self.player.update();
        }
    }

    fn volumes(commands: &[Command]) -> Vec<u8> {
        commands
            .iter()
            .filter_map(|c| match c {
                Command::Volume(level) => Some(*level),
                _ => None,
            })
            .collect()
    }
}

// ===== Fade-In Tests =====

#[test]
fn test_fade_in_command_sequence() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 4);
    h.tick(31);

    let commands = h.player.decoder_mut().take();
    assert_eq!(commands[0], Command::Volume(0));
    assert_eq!(commands[1], Command::Play(1, 4));

    let ramp = Harness::volumes(&commands[2..]);
    assert_eq!(ramp, (0..=30).collect::<Vec<u8>>());
}

#[test]
fn test_fade_in_levels_round_to_nearest() {
    let mut h = Harness::new(15);
    h.player.play_file(1, 1);
    h.tick(31);

    let commands = h.player.decoder_mut().take();
    let ramp = Harness::volumes(&commands[2..]);
    assert_eq!(ramp.len(), 31);
    let expected: Vec<u8> = (0..=30u16).map(|i| ((15 * i * 2 + 30) / 60) as u8).collect();
    assert_eq!(ramp, expected);
}

#[test]
fn test_play_notification_one_interval_after_last_step() {
    let mut h = Harness::new(30);
    h.player.play_file(2, 2);

    h.tick(30);
    assert!(h.player.is_fading());
    assert!(h.notes.notes().is_empty());

    h.tick(1);
    assert!(!h.player.is_fading());
    assert_eq!(h.notes.notes(), vec![Note::Play(QueueEntry::new(2, 2))]);
}

#[test]
fn test_fade_in_takes_at_least_620ms() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 1);

    // Polling much faster than the step interval never speeds the ramp up
    let mut elapsed = Duration::ZERO;
    while h.player.is_fading() {
        h.clock.advance(Duration::from_millis(5));
        elapsed += Duration::from_millis(5);
        h.player.update();
    }
    assert!(elapsed >= Duration::from_millis(620));
    assert_eq!(Harness::volumes(&h.player.decoder_mut().take()).len(), 32);
}

// ===== Fade-Out Tests =====

#[test]
fn test_stop_fades_out_then_pauses() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 1);
    h.tick(31);
    h.player.decoder_mut().take();

    h.player.stop();
    assert!(h.player.is_playing());
    h.tick(31);

    let commands = h.player.decoder_mut().take();
    assert_eq!(commands.len(), 32);
    assert_eq!(Harness::volumes(&commands), (0..=30).rev().collect::<Vec<u8>>());
    assert_eq!(commands.last(), Some(&Command::Pause));
    assert!(!h.player.is_playing());
    assert_eq!(h.player.current_entry(), None);
    assert_eq!(h.notes.notes().last(), Some(&Note::Stop));
}

#[test]
fn test_pause_one_interval_after_last_step() {
    let mut h = Harness::new(20);
    h.player.play_file(1, 1);
    h.tick(31);

    h.player.stop();
    h.tick(30);
    assert!(!h.player.decoder_mut().take().contains(&Command::Pause));

    h.tick(1);
    assert_eq!(h.player.decoder_mut().take(), vec![Command::Pause]);
}

// ===== Interruption Tests =====

#[test]
fn test_stop_during_fade_in_starts_from_last_level() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 1);
    h.tick(10);
    h.player.decoder_mut().take();

    h.player.stop();
    h.tick(31);

    let commands = h.player.decoder_mut().take();
    let ramp = Harness::volumes(&commands);
    assert_eq!(ramp.first(), Some(&10));
    assert_eq!(ramp.last(), Some(&0));
    assert_eq!(commands.last(), Some(&Command::Pause));
    assert_eq!(h.notes.notes(), vec![Note::Stop]);
}

#[test]
fn test_stop_during_fade_out_is_ignored() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 1);
    h.tick(31);

    h.player.stop();
    h.tick(5);
    h.player.stop();
    h.tick(26);

    let commands = h.player.decoder_mut().take();
    let pauses = commands.iter().filter(|c| **c == Command::Pause).count();
    assert_eq!(pauses, 1);
    assert_eq!(h.notes.notes().iter().filter(|n| **n == Note::Stop).count(), 1);
}

#[test]
fn test_play_during_fade_out_abandons_it() {
    let mut h = Harness::new(30);
    h.player.play_file(1, 1);
    h.tick(31);

    h.player.stop();
    h.tick(5);
    h.player.decoder_mut().take();

    h.player.play_file(2, 2);
    h.tick(40);

    let commands = h.player.decoder_mut().take();
    assert!(!commands.contains(&Command::Pause));
    assert_eq!(commands[1], Command::Play(2, 2));
    assert!(h.player.is_playing());
    assert_eq!(h.notes.notes().last(), Some(&Note::Play(QueueEntry::new(2, 2))));
}

#[test]
fn test_set_volume_when_idle_applies_immediately() {
    let mut h = Harness::new(15);
    h.player.set_volume(25);
    h.player.set_volume(25);

    assert_eq!(h.player.decoder_mut().take(), vec![Command::Volume(25)]);
}
