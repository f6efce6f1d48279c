//! Program record layout: common block, both oscillators, the effect chain and the Triton
//! Extreme valve force section.

use crate::bitfield::{field, FieldDescriptor};

/// Oscillator mode, 0 single, 1 double, 2 drum kit.
pub const OSCILLATOR_MODE: FieldDescriptor = field("common_oscillator_mode", 204, 0, 1).unsigned();
pub const OSC_MODE_DRUM_KIT: i32 = 2;

pub const OSCILLATOR_COUNT: usize = 2;
/// Distance between the two oscillator blocks.
pub const OSCILLATOR_STRIDE: usize = 154;

pub static PROGRAM_COMMON: &[FieldDescriptor] = &[
    field("common_category", 206, 0, 7),
    OSCILLATOR_MODE,
    field("common_legato", 204, 3, 3),
    field("common_priority", 204, 4, 5).unsigned(),
    field("common_single_trigger", 204, 6, 6),
    field("common_hold", 204, 7, 7),
    field("common_bus_select", 205, 0, 6),
    field("common_use_drum_kit_setting", 205, 7, 7),
    field("common_scale_type", 207, 0, 7),
    field("common_scale_key", 208, 0, 7),
    field("common_random_intensity", 209, 0, 7),
    field("common_sw1_assign_type", 210, 0, 5),
    field("common_sw2_assign_type", 211, 0, 5),
    field("common_sw1_onoff", 210, 7, 7),
    field("common_sw2_onoff", 211, 7, 7),
    field("common_sw1_togglemomentary", 210, 6, 6),
    field("common_sw2_togglemomentary", 211, 6, 6),
    field("common_knob1_assign_type", 212, 0, 6),
    field("common_knob2_assign_type", 213, 0, 7),
    field("common_knob3_assign_type", 214, 0, 7),
    field("common_knob4_assign_type", 215, 0, 7),
    field("common_pitch_eg_start_level", 216, 0, 7),
    field("common_pitch_eg_attack_time", 217, 0, 7),
    field("common_pitch_eg_attack_level", 218, 0, 7),
    field("common_pitch_eg_decay_time", 219, 0, 7),
    field("common_pitch_eg_release_time", 220, 0, 7),
    field("common_pitch_eg_release_level", 221, 0, 7),
    field("common_pitch_eg_time_mod_ams_source", 226, 0, 7),
    field("common_pitch_eg_time_mod_ams_intensity", 227, 0, 7),
    field("common_pitch_eg_level_mod_ams1_source", 222, 0, 7),
    field("common_pitch_eg_level_mod_ams1_intensity", 223, 0, 7),
    field("common_pitch_eg_level_mod_ams2_source", 224, 0, 7),
    field("common_pitch_eg_level_mod_ams2_intensity", 225, 0, 7),
    field("common_pitch_eg_time_mod_ams_attack_direction", 229, 0, 1),
    field("common_pitch_eg_time_mod_ams_decay_direction", 229, 2, 3),
    field("common_pitch_eg_level_mod_ams1_start_direction", 228, 0, 1),
    field("common_pitch_eg_level_mod_ams1_attack_direction", 228, 2, 3),
    field("common_pitch_eg_level_mod_ams2_start_direction", 228, 4, 5),
    field("common_pitch_eg_level_mod_ams2_attack_direction", 228, 6, 7),
    // Arpeggiator
    field("arpeggiator_tempo", 192, 0, 7).unsigned(),
    field("arpeggiator_switch", 193, 0, 7),
    field("arpeggiator_pattern_no.", 194, 0, 7).unsigned(),
    field("arpeggiator_resolution", 195, 2, 4),
    field("arpeggiator_octave", 195, 0, 1),
    field("arpeggiator_gate", 196, 0, 7),
    field("arpeggiator_velocity", 197, 0, 7).unsigned(),
    field("arpeggiator_swing", 198, 0, 7),
    field("arpeggiator_sort_onoff", 199, 0, 0),
    field("arpeggiator_latch_onoff", 199, 1, 1),
    field("arpeggiator_keysync_onoff", 199, 2, 2),
    field("arpeggiator_keyboard_onoff", 199, 3, 3),
    field("arpeggiator_top_key", 200, 0, 7),
    field("arpeggiator_bottom_key", 201, 0, 7),
    field("arpeggiator_top_velocity", 202, 0, 7),
    field("arpeggiator_bottom_velocity", 203, 0, 7),
];

/// Oscillator 1 block. Oscillator 2 is the same layout [`OSCILLATOR_STRIDE`] bytes later.
pub static OSCILLATOR: &[FieldDescriptor] = &[
    field("hi_bank", 232, 0, 7).unsigned().bank_remap(),
    field("hi_sample_no.", 230, 0, 6).with_lsb(231, 0, 7).unsigned(),
    field("hi_start_offset", 230, 7, 7),
    field("hi_reverse", 230, 6, 6),
    field("hi_level", 233, 0, 7),
    field("low_bank", 236, 0, 7).unsigned().bank_remap(),
    field("low_sample_no.", 234, 0, 6).with_lsb(235, 0, 7).unsigned(),
    field("low_start_offset", 234, 7, 7),
    field("low_reverse", 234, 6, 6),
    field("low_level", 237, 0, 7),
    field("delay_start", 238, 0, 7),
    field("velocity_multisample_switch_lo->hi", 239, 0, 7),
    field("velocity_zone_bottom", 240, 0, 7),
    field("velocity_zone_top", 241, 0, 7),
    field("lfo_1_waveform", 242, 0, 4),
    field("lfo_1_key_sync", 242, 7, 7),
    field("lfo_1_frequency", 243, 0, 7),
    field("lfo_1_offset", 244, 0, 7),
    field("lfo_1_delay", 245, 0, 7),
    field("lfo_1_fade", 246, 0, 7),
    field("lfo_1_time_mod_ams1_source", 248, 0, 7),
    field("lfo_1_time_mod_ams1_intensity", 249, 0, 7),
    field("lfo_1_time_mod_ams2_source", 250, 0, 7),
    field("lfo_1_time_mod_ams2_intensity", 251, 0, 7),
    field("lfo_1_miditempo_sync", 247, 7, 7),
    field("lfo_1_sync_base_note", 247, 4, 6),
    field("lfo_1_times", 248, 0, 3),
    field("lfo_2_waveform", 252, 0, 4),
    field("lfo_2_key_sync", 252, 7, 7),
    field("lfo_2_frequency", 253, 0, 7),
    field("lfo_2_offset", 254, 0, 7),
    field("lfo_2_delay", 255, 0, 7),
    field("lfo_2_fade", 256, 0, 7),
    field("lfo_2_time_mod_ams1_source", 258, 0, 7),
    field("lfo_2_time_mod_ams1_intensity", 259, 0, 7),
    field("lfo_2_time_mod_ams2_source", 260, 0, 7),
    field("lfo_2_time_mod_ams2_intensity", 261, 0, 7),
    field("lfo_2_miditempo_sync", 257, 7, 7),
    field("lfo_2_sync_base_note", 257, 4, 6),
    field("lfo_2_times", 258, 0, 3),
    field("octave", 262, 0, 7),
    field("transpose", 263, 0, 7),
    field("tune", 264, 0, 7).with_lsb(265, 0, 7),
    field("pitch_mod_ams_source", 266, 0, 7),
    field("pitch_mod_ams_intensity", 267, 0, 7),
    field("pitch_slope", 268, 0, 7),
    field("pitch_eg_intensity", 269, 0, 7),
    field("pitch_eg_mod_ams_source", 270, 0, 7),
    field("pitch_eg_mod_ams_intensity", 271, 0, 7),
    field("pitch_lfo1_intensity", 272, 0, 7),
    field("pitch_lfo2_intensity", 273, 0, 7),
    field("portamento", 274, 0, 0),
    field("portamento_fingered", 274, 1, 1),
    field("portamento_time", 275, 0, 7),
    field("pitch_js_+x_intensity", 276, 0, 7),
    field("pitch_js_-x_intensity", 277, 0, 7),
    field("pitch_ribbon_intensity", 278, 0, 7),
    field("pitch_lfo1_js_+y_intensity", 280, 0, 7),
    field("pitch_lfo2_js_+y_intensity", 281, 0, 7),
    field("pitch_lfo1_intensity_mod_ams_source", 282, 0, 7),
    field("pitch_lfo1_intensity_mod_ams_intensity", 283, 0, 7),
    field("pitch_lfo2_intensity_mod_ams_source", 284, 0, 7),
    field("pitch_lfo2_intensity_mod_ams_intensity", 285, 0, 7),
    // Filter
    field("filter_type", 286, 0, 7),
    field("filter_trim", 287, 0, 7),
    field("filter_resonance", 288, 0, 7),
    field("filter_resonance_mod_ams_source", 289, 0, 7),
    field("filter_resonance_mod_ams_intensity", 290, 0, 7),
    field("filter_eg_mod_ams_source", 291, 0, 7),
    field("filter_lfo1_mod_ams_source", 292, 0, 7),
    field("filter_lfo2_mod_ams_source", 293, 0, 7),
    field("filter_a_frequency", 294, 0, 7),
    field("filter_a_keyboard_track_intensity", 295, 0, 7),
    field("filter_a_mod_ams1_source", 296, 0, 7),
    field("filter_a_mod_ams1_intensity", 297, 0, 7),
    field("filter_a_mod_ams2_source", 298, 0, 7),
    field("filter_a_mod_ams2_intensity", 299, 0, 7),
    field("filter_a_eg_intensity", 300, 0, 7),
    field("filter_a_velocity_intensity", 301, 0, 7),
    field("filter_a_lfo1_intensity", 302, 0, 7),
    field("filter_a_lfo2_intensity", 303, 0, 7),
    field("filter_a_lfo1_js_-y_intensity", 304, 0, 7),
    field("filter_a_lfo2_js_-y_intensity", 305, 0, 7),
    field("filter_a_eg_mod_ams_intensity", 306, 0, 7),
    field("filter_a_lfo1_mod_ams_intensity", 307, 0, 7),
    field("filter_a_lfo2_mod_ams_intensity", 308, 0, 7),
    field("filter_b_frequency", 309, 0, 7),
    field("filter_b_keyboard_track_intensity", 310, 0, 7),
    field("filter_b_mod_ams1_source", 311, 0, 7),
    field("filter_b_mod_ams1_intensity", 312, 0, 7),
    field("filter_b_mod_ams2_source", 313, 0, 7),
    field("filter_b_mod_ams2_intensity", 314, 0, 7),
    field("filter_b_eg_intensity", 315, 0, 7),
    field("filter_b_velocity_intensity", 316, 0, 7),
    field("filter_b_lfo1_intensity", 317, 0, 7),
    field("filter_b_lfo2_intensity", 318, 0, 7),
    field("filter_b_lfo1_js_-y_intensity", 319, 0, 7),
    field("filter_b_lfo2_js_-y_intensity", 320, 0, 7),
    field("filter_b_eg_mod_ams_intensity", 321, 0, 7),
    field("filter_b_lfo1_mod_ams_intensity", 322, 0, 7),
    field("filter_b_lfo2_mod_ams_intensity", 323, 0, 7),
    field("filter_eg_start_level", 324, 0, 7),
    field("filter_eg_attack_time", 325, 0, 7),
    field("filter_eg_attack_level", 326, 0, 7),
    field("filter_eg_decay_time", 327, 0, 7),
    field("filter_eg_break_point_level", 328, 0, 7),
    field("filter_eg_slope_time", 329, 0, 7),
    field("filter_eg_sustain_level", 330, 0, 7),
    field("filter_eg_release_time", 331, 0, 7),
    field("filter_eg_release_level", 332, 0, 7),
    field("filter_eg_time_mod_ams1_source", 336, 0, 7),
    field("filter_eg_time_mod_ams1_intensity", 337, 0, 7),
    field("filter_eg_time_mod_ams2_source", 338, 0, 7),
    field("filter_eg_time_mod_ams2_intensity", 339, 0, 7),
    field("filter_eg_level_mod_ams_source", 340, 0, 7),
    field("filter_eg_level_mod_ams_intensity", 341, 0, 7),
    field("filter_eg_attack_time_mod_ams1_direction", 333, 0, 1),
    field("filter_eg_decay_time_mod_ams1_direction", 333, 2, 3),
    field("filter_eg_slope_time_mod_ams1_direction", 333, 4, 5),
    field("filter_eg_release_time_mod_ams1_direction", 333, 6, 7),
    field("filter_eg_attack_time_mod_ams2_direction", 334, 0, 1),
    field("filter_eg_decay_time_mod_ams2_direction", 334, 2, 3),
    field("filter_eg_slope_time_mod_ams2_direction", 334, 4, 5),
    field("filter_eg_release_time_mod_ams2_direction", 334, 6, 7),
    field("filter_eg_start_level_mod_ams_direction", 335, 0, 1),
    field("filter_eg_attack_level_mod_ams_direction", 335, 2, 3),
    field("filter_eg_break_level_mod_ams_direction", 335, 4, 5),
    field("filter_keytrack_key_low", 342, 0, 7),
    field("filter_keytrack_ramp_low", 343, 0, 7),
    field("filter_keytrack_key_high", 344, 0, 7),
    field("filter_keytrack_ramp_high", 345, 0, 7),
    // Amp
    field("amp_level", 346, 0, 7),
    field("amp_velocity_intensity", 347, 0, 7),
    field("amp_level_mod_ams_source", 348, 0, 7),
    field("amp_level_mod_ams_intensity", 349, 0, 7),
    field("amp_lfo1_intensity", 350, 0, 7),
    field("amp_lfo2_intensity", 351, 0, 7),
    field("amp_lfo1_intensity_mod_ams_source", 352, 0, 7),
    field("amp_lfo1_intensity_mod_ams_intensity", 353, 0, 7),
    field("amp_lfo2_intensity_mod_ams_source", 354, 0, 7),
    field("amp_lfo2_intensity_mod_ams_intensity", 355, 0, 7),
    field("amp_eg_start_level", 356, 0, 7),
    field("amp_eg_attack_time", 357, 0, 7),
    field("amp_eg_attack_level", 358, 0, 7),
    field("amp_eg_decay_time", 359, 0, 7),
    field("amp_eg_break_point_level", 360, 0, 7),
    field("amp_eg_slope_time", 361, 0, 7),
    field("amp_eg_sustain_level", 362, 0, 7),
    field("amp_eg_release_time", 363, 0, 7),
    field("amp_eg_time_mod_ams1_source", 364, 0, 7),
    field("amp_eg_time_mod_ams1_intensity", 365, 0, 7),
    field("amp_eg_time_mod_ams2_source", 366, 0, 7),
    field("amp_eg_time_mod_ams2_intensity", 367, 0, 7),
    field("amp_eg_level_mod_ams_source", 368, 0, 7),
    field("amp_eg_level_mod_ams_intensity", 369, 0, 7),
    field("amp_eg_attack_time_mod_ams1_direction", 370, 0, 1),
    field("amp_eg_decay_time_mod_ams1_direction", 370, 2, 3),
    field("amp_eg_slope_time_mod_ams1_direction", 370, 4, 5),
    field("amp_eg_release_time_mod_ams1_direction", 370, 6, 7),
    field("amp_eg_attack_time_mod_ams2_direction", 371, 0, 1),
    field("amp_eg_decay_time_mod_ams2_direction", 371, 2, 3),
    field("amp_eg_slope_time_mod_ams2_direction", 371, 4, 5),
    field("amp_eg_release_time_mod_ams2_direction", 371, 6, 7),
    field("amp_eg_start_level_mod_ams_direction", 372, 0, 1),
    field("amp_eg_attack_level_mod_ams_direction", 372, 2, 3),
    field("amp_eg_break_level_mod_ams_direction", 372, 4, 5),
    field("amp_keytrack_key_low", 374, 0, 7),
    field("amp_keytrack_ramp_low", 375, 0, 7),
    field("amp_keytrack_key_high", 376, 0, 7),
    field("amp_keytrack_ramp_high", 377, 0, 7),
    // Output
    field("output_pan", 379, 0, 6).unsigned(),
    field("output_pan_mod_ams_source", 380, 0, 7),
    field("output_pan_mod_ams_intensity", 381, 0, 7),
    field("output_mfx1_send_level", 382, 0, 7),
    field("output_mfx2_send_level", 383, 0, 7),
];

/// Master effects and master EQ, shared by programs and combinations.
pub static SHARED: &[FieldDescriptor] = &[
    field("mfx1_effect_type", 152, 0, 7),
    field("mfx1_onoff", 153, 6, 6),
    field("mfx2_effect_type", 172, 0, 7),
    field("mfx2_onoff", 173, 6, 6),
    field("mfx1_return_level", 176, 0, 7),
    field("mfx2_return_level", 177, 0, 7),
    field("mfx_chain_onoff", 178, 3, 3),
    field("mfx_chain_direction", 178, 2, 2),
    field("mfx_chain_signal", 178, 0, 1),
    field("mfx_chain_level", 179, 0, 7),
    field("master_eq_low_gain", 180, 0, 7),
    field("master_eq_mid_gain", 181, 0, 7),
    field("master_eq_high_gain", 182, 0, 7),
    field("master_eq_low_fc", 183, 0, 7),
    field("master_eq_mid_fc", 184, 0, 7),
    field("master_eq_high_fc", 185, 0, 7),
    field("master_eq_mid_q", 186, 0, 7),
    field("master_eq_low_dmod", 187, 0, 7),
    field("master_eq_high_dmod", 188, 0, 7),
];

/// A master effect slot: the field holding its type and where its private parameters start.
pub struct EffectSlot {
    pub id: usize,
    pub type_field: &'static str,
    pub block_offset: usize,
}

pub static MFX_SLOTS: [EffectSlot; 2] = [
    EffectSlot { id: 1, type_field: "mfx1_effect_type", block_offset: 136 },
    EffectSlot { id: 2, type_field: "mfx2_effect_type", block_offset: 156 },
];

/// Start of the five insert effect blocks. Each block holds 16 bytes of private parameters
/// followed by the fields of [`IFX`].
pub static IFX_OFFSETS: [(usize, usize); 5] = [(1, 16), (2, 40), (3, 64), (4, 88), (5, 112)];

/// Insert effect fields, relative to the start of the effect block.
pub static IFX: &[FieldDescriptor] = &[
    field("effect_type", 16, 0, 7),
    field("control_channel", 17, 0, 5),
    field("onoff", 17, 6, 6),
    field("chain", 17, 7, 7),
    field("pan", 20, 0, 7),
    field("bus_select", 21, 0, 7),
    field("send_1_level", 22, 0, 7),
    field("send_2_level", 23, 0, 7),
];
pub const IFX_TYPE_FIELD: &str = "effect_type";

pub static VALVE_PROGRAM: &[FieldDescriptor] = &[
    field("valveforce_onoff", 34, 0, 0),
    field("valveforce_placement", 34, 1, 1),
    field("valveforce_ultra_boost", 59, 0, 7),
    field("valveforce_gain", 82, 0, 7),
    field("valveforce_output_level", 83, 0, 7),
    field("valveforce_input_trim", 84, 0, 7),
    field("valveforce_pan", 106, 0, 7),
    field("valveforce_send1_level", 130, 0, 7),
    field("valveforce_send2_level", 131, 0, 7),
];

pub static VALVE_COMBI: &[FieldDescriptor] = &[
    field("valveforce_onoff", 34, 0, 0),
    field("valveforce_input_trim", 58, 0, 7),
];
