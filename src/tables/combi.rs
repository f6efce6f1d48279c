//! Combination record layout. The effect chain sits where it does in a program record; the
//! arpeggiators, switches and the eight timbres follow it.

use crate::bitfield::{field, FieldDescriptor};

pub static COMBI_COMMON: &[FieldDescriptor] = &[
    field("combi_arpeggiator_tempo", 192, 0, 7).unsigned(),
    field("combi_arpeggiator_switch", 193, 0, 7),
    field("combi_arpeggiator_a_pattern_no.", 194, 0, 7).unsigned(),
    field("combi_arpeggiator_a_resolution", 195, 2, 4),
    field("combi_arpeggiator_a_octave", 195, 0, 1),
    field("combi_arpeggiator_a_gate", 196, 0, 7),
    field("combi_arpeggiator_a_velocity", 197, 0, 7).unsigned(),
    field("combi_arpeggiator_a_swing", 198, 0, 7),
    field("combi_arpeggiator_a_sort_onoff", 199, 0, 0),
    field("combi_arpeggiator_a_latch_onoff", 199, 1, 1),
    field("combi_arpeggiator_a_keysync_onoff", 199, 2, 2),
    field("combi_arpeggiator_a_keyboard_onoff", 199, 3, 3),
    field("combi_arpeggiator_b_pattern_no.", 200, 0, 7).unsigned(),
    field("combi_arpeggiator_b_resolution", 201, 2, 4),
    field("combi_arpeggiator_b_octave", 201, 0, 1),
    field("combi_arpeggiator_b_gate", 202, 0, 7),
    field("combi_arpeggiator_b_velocity", 203, 0, 7).unsigned(),
    field("combi_arpeggiator_b_swing", 204, 0, 7),
    field("combi_arpeggiator_b_sort_onoff", 205, 0, 0),
    field("combi_arpeggiator_b_latch_onoff", 205, 1, 1),
    field("combi_arpeggiator_b_keysync_onoff", 205, 2, 2),
    field("combi_arpeggiator_b_keyboard_onoff", 205, 3, 3),
    field("combi_category", 206, 0, 7),
    field("combi_scale_type", 207, 0, 7),
    field("combi_scale_key", 208, 0, 7),
    field("combi_random_intensity", 209, 0, 7),
    field("combi_sw1_assign_type", 210, 0, 5),
    field("combi_sw1_togglemomentary", 210, 6, 6),
    field("combi_sw1_onoff", 210, 7, 7),
    field("combi_sw2_assign_type", 211, 0, 5),
    field("combi_sw2_togglemomentary", 211, 6, 6),
    field("combi_sw2_onoff", 211, 7, 7),
    field("combi_knob1_assign_type", 212, 0, 6),
    field("combi_knob2_assign_type", 213, 0, 7),
    field("combi_knob3_assign_type", 214, 0, 7),
    field("combi_knob4_assign_type", 215, 0, 7),
];

pub const TIMBRE_COUNT: usize = 8;
pub const TIMBRE_START: usize = 216;
pub const TIMBRE_STRIDE: usize = 28;

pub const PROGRAM_BANK_FIELD: &str = "program_bank";
pub const PROGRAM_NO_FIELD: &str = "program_no";

/// One timbre slot, relative to the start of the slot.
pub static TIMBRE: &[FieldDescriptor] = &[
    field(PROGRAM_BANK_FIELD, 0, 0, 7).unsigned(),
    field(PROGRAM_NO_FIELD, 1, 0, 7).unsigned(),
    field("status", 2, 0, 2).unsigned(),
    field("midi_channel", 2, 3, 7).unsigned(),
    field("volume", 3, 0, 7).unsigned(),
    field("pan", 4, 0, 6).unsigned(),
    field("transpose", 5, 0, 7),
    field("detune", 6, 0, 7).with_lsb(7, 0, 7),
    field("bus_select", 8, 0, 3),
    field("send1_level", 9, 0, 7).unsigned(),
    field("send2_level", 10, 0, 7).unsigned(),
    field("key_zone_top", 11, 0, 7).unsigned(),
    field("key_zone_bottom", 12, 0, 7).unsigned(),
    field("velocity_zone_top", 13, 0, 7).unsigned(),
    field("velocity_zone_bottom", 14, 0, 7).unsigned(),
    field("arpeggiator_assign", 15, 0, 1).unsigned(),
    field("force_oscillator_mode", 16, 0, 1).unsigned(),
    field("bend_range", 17, 0, 7),
    field("portamento", 18, 0, 7),
    field("delay", 19, 0, 7).unsigned(),
    field("use_program_scale", 20, 0, 0),
    field("midi_filter_program_change", 20, 1, 1),
    field("midi_filter_after_touch", 20, 2, 2),
    field("midi_filter_control_change", 20, 3, 3),
];

/// Start of timbre slot `n`, 1-based.
pub fn timbre_offset(n: usize) -> usize {
    TIMBRE_START + TIMBRE_STRIDE * (n - 1)
}
