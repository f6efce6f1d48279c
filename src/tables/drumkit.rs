//! User drum kit layout: a 16-byte name, then one [`DRUM_NOTE_STRIDE`]-byte block per key.

use crate::bitfield::{field, FieldDescriptor};

pub const DRUM_NOTE_COUNT: usize = 128;
pub const DRUM_NOTE_STRIDE: usize = 32;
pub const DRUMKIT_SIZE: usize = 16 + DRUM_NOTE_COUNT * DRUM_NOTE_STRIDE;

/// Kit numbers stored above this are shifted by [`DRUMKIT_NUMBER_GAP`] in the oscillator field.
pub const DRUMKIT_NUMBER_LIMIT: i32 = 127;
pub const DRUMKIT_NUMBER_GAP: i32 = 9;

/// Fields of the first key (C-1). Every other key repeats the layout one stride later.
pub static DRUM_NOTE: &[FieldDescriptor] = &[
    field("higher_sample_no.", 16, 0, 5).with_lsb(17, 0, 7).unsigned(),
    field("higher_reverse", 16, 6, 6),
    field("higher_start_offset", 16, 7, 7),
    field("higher_bank", 18, 0, 7).unsigned().bank_remap(),
    field("higher_level", 19, 0, 7),
    field("lower_sample_no.", 20, 0, 5).with_lsb(21, 0, 7).unsigned(),
    field("lower_reverse", 20, 6, 6),
    field("lower_start_offset", 20, 7, 7),
    field("lower_bank", 22, 0, 7).unsigned().bank_remap(),
    field("lower_level", 23, 0, 7),
    field("velocity_sample_switch", 24, 0, 7).unsigned(),
    field("transpose", 25, 0, 7),
    field("tune", 26, 0, 7).with_lsb(27, 0, 7),
    field("filter_cutoff", 28, 0, 7),
    field("filter_resonance", 29, 0, 7),
    field("filter_eg_intensity", 30, 0, 7),
    field("eg_attack_time", 31, 0, 7),
    field("eg_decay_time", 32, 0, 7),
    field("pan", 33, 0, 6).unsigned(),
    field("bus_select", 34, 0, 3),
    field("fx_control_bus", 34, 4, 5),
    field("mfx1_send_level", 35, 0, 7).unsigned(),
    field("mfx2_send_level", 36, 0, 7).unsigned(),
    field("exclusive_group", 37, 0, 6).unsigned(),
    field("single_trigger", 37, 7, 7),
    field("note_on_receive", 38, 0, 0),
    field("note_off_receive", 38, 1, 1),
];

const PITCH_CLASSES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Key name of MIDI note `note`, from `C-1` to `G9`.
pub fn note_name(note: usize) -> String {
    format!("{}{}", PITCH_CLASSES[note % 12], note as i32 / 12 - 1)
}

pub fn note_key(prefix: &str, note: usize, name: &str) -> String {
    format!("{}user_drumkit_parameter_{}_{}", prefix, note_name(note), name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_names() {
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(13), "C#0");
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(127), "G9");
        assert_eq!(note_key("prog_", 36, "pan"), "prog_user_drumkit_parameter_C2_pan");
    }

    #[test]
    fn test_last_note_fits_record() {
        let last = DRUM_NOTE.iter()
            .map(|f| f.shifted(DRUM_NOTE_STRIDE * (DRUM_NOTE_COUNT - 1)).last_offset())
            .max()
            .unwrap();
        assert!(last < DRUMKIT_SIZE);
        assert_eq!(DRUMKIT_SIZE, 4112);
    }
}
