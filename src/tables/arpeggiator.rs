//! User arpeggio pattern layout. The 16-byte name is followed by the pattern globals, then
//! [`ARP_STEP_COUNT`] steps of [`ARP_STEP_STRIDE`] bytes each.

use crate::bitfield::{field, FieldDescriptor};

pub const ARP_STEP_COUNT: usize = 48;
pub const ARP_STEP_STRIDE: usize = 6;
pub const ARP_TONE_COUNT: usize = 12;
pub const ARP_RECORD_SIZE: usize = 32 + ARP_STEP_COUNT * ARP_STEP_STRIDE;

/// Pattern numbers below this are the preset patterns built into the instrument.
pub const FACTORY_PATTERN_COUNT: i32 = 5;

pub static ARP_GLOBAL: &[FieldDescriptor] = &[
    field("octave_motion", 16, 0, 1).unsigned(),
    field("arpeggio_type", 16, 2, 3).unsigned(),
    field("tone_mode", 16, 4, 4).unsigned(),
    field("fixed_note_mode", 16, 5, 5).unsigned(),
    field("length", 17, 0, 7).unsigned(),
    field("tone_note_no.1", 20, 0, 7),
    field("tone_note_no.2", 21, 0, 7),
    field("tone_note_no.3", 22, 0, 7),
    field("tone_note_no.4", 23, 0, 7),
    field("tone_note_no.5", 24, 0, 7),
    field("tone_note_no.6", 25, 0, 7),
    field("tone_note_no.7", 26, 0, 7),
    field("tone_note_no.8", 27, 0, 7),
    field("tone_note_no.9", 28, 0, 7),
    field("tone_note_no.10", 29, 0, 7),
    field("tone_note_no.11", 30, 0, 7),
    field("tone_note_no.12", 31, 0, 7),
];

/// Step 0; step `i` sits `i * ARP_STEP_STRIDE` bytes later.
pub static ARP_STEP: &[FieldDescriptor] = &[
    field("pitch_offset", 32, 0, 7),
    field("gate", 33, 0, 7).unsigned(),
    field("velocity", 34, 0, 7).unsigned(),
    field("flam", 35, 0, 7),
    field("tone_0", 37, 0, 0),
    field("tone_1", 37, 1, 1),
    field("tone_2", 37, 2, 2),
    field("tone_3", 37, 3, 3),
    field("tone_4", 37, 4, 4),
    field("tone_5", 37, 5, 5),
    field("tone_6", 37, 6, 6),
    field("tone_7", 37, 7, 7),
    field("tone_8", 36, 0, 0),
    field("tone_9", 36, 1, 1),
    field("tone_10", 36, 2, 2),
    field("tone_11", 36, 3, 3),
];

pub fn global_key(prefix: &str, name: &str) -> String {
    format!("{}pattern_parameter_{}", prefix, name)
}

pub fn step_key(prefix: &str, step: usize, name: &str) -> String {
    format!("{}pattern_parameter_step_{}_{}", prefix, step, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_step_fits_record() {
        let last = ARP_STEP.iter()
            .map(|f| f.shifted(ARP_STEP_STRIDE * (ARP_STEP_COUNT - 1)).last_offset())
            .max()
            .unwrap();
        assert!(last < ARP_RECORD_SIZE);
        assert_eq!(ARP_STEP.iter().filter(|f| f.name.starts_with("tone_")).count(), ARP_TONE_COUNT);
    }

    #[test]
    fn test_keys() {
        assert_eq!(global_key("prog_user_arp_", "length"), "prog_user_arp_pattern_parameter_length");
        assert_eq!(step_key("combi_user_arp_b_", 47, "tone_11"), "combi_user_arp_b_pattern_parameter_step_47_tone_11");
    }
}
