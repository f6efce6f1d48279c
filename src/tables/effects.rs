//! Private parameters of each effect type, relative to the start of the effect block.
//!
//! The host names these `<slot>_specific_parameter_<n>_24`, where `n` is the position of the
//! parameter on the host's effect page. Gaps in the numbering are parameters the hardware does
//! not store.

use phf::phf_map;

use crate::bitfield::{field, FieldDescriptor};

const fn u(name: &'static str, offset: usize, bit_start: u8, bit_end: u8) -> FieldDescriptor {
    field(name, offset, bit_start, bit_end).unsigned()
}
const fn s(name: &'static str, offset: usize, bit_start: u8, bit_end: u8) -> FieldDescriptor {
    field(name, offset, bit_start, bit_end)
}

/// Effect type 0 leaves the slot empty.
pub const NO_EFFECT: i32 = 0;

const STEREO_AMP_SIMULATION: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 1),
    u("1_24", 1, 0, 6),
    u("2_24", 2, 0, 4),
    s("3_24", 3, 0, 7),
];

const STEREO_COMPRESSOR: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 0),
    u("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 7),
    s("4_24", 4, 0, 5),
    s("5_24", 5, 0, 5),
    u("6_24", 6, 0, 7),
    u("7_24", 7, 0, 7),
    s("8_24", 8, 0, 7),
    u("9_24", 9, 0, 6),
    u("10_24", 10, 0, 4),
    s("11_24", 11, 0, 7),
];

const STEREO_LIMITER: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 1),
    u("1_24", 1, 0, 5),
    s("2_24", 2, 0, 7),
    u("3_24", 3, 0, 6),
    u("4_24", 4, 0, 6),
    s("5_24", 5, 0, 5),
    u("6_24", 6, 0, 7),
    s("7_24", 7, 0, 6),
    u("8_24", 0, 2, 2),
    u("9_24", 0, 3, 3),
    u("10_24", 8, 0, 7),
    u("11_24", 9, 0, 5),
    s("12_24", 10, 0, 7),
    u("13_24", 11, 0, 6),
    u("14_24", 12, 0, 4),
    s("15_24", 13, 0, 7),
];

const MULTIBAND_LIMITER: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 7),
    s("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 7),
    s("4_24", 5, 0, 7),
    s("5_24", 6, 0, 7),
    s("6_24", 7, 0, 7),
    s("7_24", 4, 0, 7),
    u("8_24", 11, 0, 7),
    s("9_24", 12, 0, 7),
    u("10_24", 8, 0, 6),
    u("11_24", 9, 0, 4),
    s("12_24", 10, 0, 7),
];

const OD_HIGAIN_WAH: &[FieldDescriptor] = &[
    u("0_24", 11, 0, 0),
    u("1_24", 11, 1, 5),
    u("2_24", 3, 0, 0),
    s("3_24", 10, 3, 7),
    u("4_24", 10, 0, 2).with_lsb(11, 6, 7),
    u("5_24", 12, 0, 0),
    u("6_24", 13, 0, 6),
    u("7_24", 3, 1, 4),
    u("8_24", 2, 0, 4).with_lsb(3, 7, 7),
    u("9_24", 9, 0, 4),
    s("10_24", 14, 0, 6),
    u("11_24", 1, 0, 3).with_lsb(2, 6, 7),
    s("12_24", 0, 0, 1).with_lsb(1, 4, 7),
    u("13_24", 0, 2, 7),
    u("14_24", 7, 0, 5),
    s("15_24", 6, 0, 3).with_lsb(7, 6, 7),
    u("16_24", 5, 0, 1).with_lsb(6, 4, 7),
    u("17_24", 5, 2, 7),
    s("18_24", 8, 0, 2).with_lsb(9, 5, 7),
    u("19_24", 12, 1, 6),
    u("20_24", 4, 0, 0),
    u("21_24", 4, 1, 7),
    u("22_24", 8, 3, 7),
    s("23_24", 15, 0, 7),
];

const STEREO_PARAMETRIC_4EQ: &[FieldDescriptor] = &[
    u("0_24", 3, 0, 6),
    u("1_24", 9, 0, 0),
    u("2_24", 10, 0, 0),
    u("3_24", 2, 0, 3).with_lsb(3, 7, 7),
    s("4_24", 1, 0, 1).with_lsb(2, 4, 7),
    u("5_24", 7, 0, 5),
    u("6_24", 0, 0, 0).with_lsb(1, 2, 7),
    s("7_24", 0, 1, 7),
    u("8_24", 8, 0, 7),
    u("9_24", 6, 0, 4).with_lsb(7, 6, 7),
    s("10_24", 5, 0, 3).with_lsb(6, 5, 7),
    u("11_24", 4, 0, 2).with_lsb(5, 4, 7),
    u("12_24", 9, 1, 7),
    s("13_24", 10, 1, 7),
    u("14_24", 11, 0, 7),
    u("15_24", 12, 0, 6),
    s("16_24", 13, 0, 6),
    u("17_24", 14, 0, 6),
    u("18_24", 4, 3, 7),
    s("19_24", 15, 0, 7),
];

const STEREO_GRAPHIC_7EQ: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 7),
    u("1_24", 1, 0, 7),
    s("2_24", 2, 0, 7),
    s("3_24", 3, 0, 7),
    s("4_24", 4, 0, 7),
    s("5_24", 5, 0, 7),
    s("6_24", 6, 0, 7),
    s("7_24", 7, 0, 7),
    s("8_24", 8, 0, 7),
    u("9_24", 9, 0, 7),
    u("10_24", 10, 0, 4),
    s("11_24", 11, 0, 7),
];

const TALKING_MODULATOR: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 0),
    u("1_24", 0, 1, 7),
    u("2_24", 1, 0, 4),
    u("11_24", 1, 5, 7),
    u("12_24", 2, 0, 2),
    u("13_24", 2, 3, 5),
    u("3_24", 3, 0, 6),
    u("4_24", 4, 0, 4),
    s("5_24", 5, 0, 7),
    u("6_24", 13, 0, 0),
    s("7_24", 14, 0, 7),
    u("8_24", 15, 0, 2),
    u("9_24", 15, 3, 6),
    s("14_24", 6, 0, 7),
    u("15_24", 7, 0, 6),
    u("16_24", 13, 1, 7),
    u("17_24", 8, 0, 4),
    s("18_24", 9, 0, 7),
];

const STEREO_DECIMATOR: &[FieldDescriptor] = &[
    u("0_24", 4, 0, 0),
    u("4_24", 4, 1, 7),
    u("1_24", 10, 0, 0).with_lsb(11, 0, 7),
    u("2_24", 1, 0, 4),
    s("3_24", 12, 0, 0).with_lsb(13, 0, 7),
    u("12_24", 8, 0, 6),
    u("13_24", 2, 0, 1).with_lsb(3, 5, 7),
    s("14_24", 9, 0, 7),
    u("15_24", 12, 1, 7),
    u("16_24", 2, 2, 6),
    s("17_24", 15, 0, 7),
    u("5_24", 0, 0, 1).with_lsb(1, 5, 7),
    u("6_24", 5, 0, 6),
    u("7_24", 0, 3, 7),
    s("8_24", 6, 0, 7),
    u("9_24", 10, 1, 7),
    u("10_24", 3, 0, 4),
    s("11_24", 7, 0, 7),
];

const STEREO_CHORUS: &[FieldDescriptor] = &[
    u("0_24", 12, 0, 0),
    s("1_24", 12, 1, 6),
    u("2_24", 0, 0, 7),
    u("3_24", 11, 0, 4),
    s("4_24", 1, 0, 7),
    u("5_24", 13, 0, 0),
    u("6_24", 14, 0, 7),
    u("7_24", 15, 0, 2),
    u("8_24", 15, 3, 7),
    u("10_24", 2, 0, 7),
    u("11_24", 3, 0, 7),
    u("12_24", 4, 0, 7),
    u("13_24", 10, 0, 1).with_lsb(11, 5, 7),
    s("14_24", 5, 0, 7),
    u("15_24", 13, 1, 7),
    s("16_24", 10, 2, 7),
    s("17_24", 6, 0, 7),
    u("18_24", 7, 0, 7),
    u("19_24", 8, 0, 4),
    s("20_24", 9, 0, 7),
];

const STEREO_HARMONIC_CHORUS: &[FieldDescriptor] = &[
    u("0_24", 3, 0, 0),
    s("1_24", 3, 1, 5),
    u("2_24", 8, 0, 7),
    u("3_24", 2, 0, 2).with_lsb(3, 6, 7),
    s("4_24", 9, 0, 7),
    u("5_24", 13, 0, 0),
    u("6_24", 14, 0, 7),
    u("7_24", 15, 0, 2),
    u("8_24", 15, 3, 6),
    u("10_24", 10, 0, 7),
    u("11_24", 1, 0, 1).with_lsb(2, 3, 7),
    u("12_24", 7, 0, 4),
    s("13_24", 11, 0, 7),
    u("14_24", 0, 0, 0).with_lsb(1, 2, 7),
    s("15_24", 12, 0, 7),
    u("16_24", 0, 1, 7),
    u("17_24", 6, 0, 3).with_lsb(7, 5, 7),
    u("18_24", 5, 0, 2).with_lsb(6, 4, 7),
    u("19_24", 13, 1, 7),
    u("20_24", 5, 3, 7),
    s("21_24", 4, 0, 7),
];

const MULTITAP_CHORUS_DELAY: &[FieldDescriptor] = &[
    u("0_24", 12, 0, 2).with_lsb(13, 5, 7),
    u("1_24", 14, 0, 5).with_lsb(15, 7, 7),
    u("2_24", 10, 0, 1).with_lsb(11, 5, 7),
    u("3_24", 8, 3, 7),
    s("4_24", 3, 4, 7),
    u("5_24", 8, 0, 2).with_lsb(9, 4, 7),
    u("6_24", 9, 0, 3).with_lsb(10, 7, 7),
    u("7_24", 6, 0, 1).with_lsb(7, 5, 7),
    s("8_24", 4, 4, 7),
    u("9_24", 13, 0, 4).with_lsb(14, 6, 7),
    u("10_24", 10, 2, 6),
    u("11_24", 7, 0, 4),
    s("12_24", 4, 0, 3),
    u("13_24", 15, 0, 6),
    u("14_24", 11, 0, 4),
    u("15_24", 12, 3, 7),
    s("16_24", 3, 0, 3),
    s("17_24", 0, 0, 7),
    s("18_24", 1, 0, 7),
    u("19_24", 5, 0, 5).with_lsb(6, 7, 7),
    u("20_24", 6, 2, 6),
    s("21_24", 2, 0, 7),
];

const ENSEMBLE: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 6),
    u("1_24", 1, 0, 4),
    s("2_24", 2, 0, 7),
    u("3_24", 3, 0, 6),
    u("4_24", 4, 0, 4),
    s("5_24", 5, 0, 7),
    u("6_24", 6, 0, 6),
    u("7_24", 7, 0, 7),
    u("8_24", 8, 0, 4),
    s("9_24", 9, 0, 7),
];

const STEREO_PHASER: &[FieldDescriptor] = &[
    u("0_24", 12, 0, 0),
    s("1_24", 0, 0, 7),
    s("2_24", 12, 1, 5),
    u("3_24", 1, 0, 6),
    u("4_24", 2, 0, 5),
    s("5_24", 3, 0, 7),
    u("6_24", 13, 0, 0),
    s("7_24", 14, 0, 7),
    u("8_24", 15, 0, 2),
    u("9_24", 15, 3, 6),
    u("11_24", 4, 0, 6),
    u("12_24", 5, 0, 6),
    u("13_24", 6, 0, 4),
    s("14_24", 7, 0, 7),
    s("15_24", 8, 0, 7),
    u("16_24", 13, 1, 7),
    u("17_24", 9, 0, 6),
    u("18_24", 10, 0, 4),
    s("19_24", 11, 0, 7),
];

const STEREO_AUTO_PAN: &[FieldDescriptor] = &[
    u("0_24", 12, 0, 0),
    s("1_24", 0, 0, 7),
    s("2_24", 12, 1, 5),
    u("3_24", 1, 0, 6),
    u("4_24", 9, 3, 6),
    s("5_24", 2, 0, 7),
    u("6_24", 13, 0, 0),
    s("7_24", 14, 0, 7),
    u("8_24", 15, 0, 2),
    u("9_24", 15, 3, 6),
    u("11_24", 3, 0, 6),
    u("12_24", 4, 0, 4),
    s("13_24", 5, 0, 7),
    u("14_24", 6, 0, 6),
    u("15_24", 7, 0, 4),
    s("16_24", 8, 0, 7),
];

const STEREO_RING_MODULATOR: &[FieldDescriptor] = &[
    u("0_24", 6, 0, 6),
    u("1_24", 6, 7, 7),
    u("2_24", 7, 0, 7),
    u("3_24", 3, 0, 4),
    s("4_24", 2, 0, 4).with_lsb(3, 5, 7),
    s("5_24", 1, 0, 3).with_lsb(2, 5, 7),
    // Stored by the hardware but not shown on its effect page
    u("6_24", 0, 0, 0).with_lsb(1, 4, 7),
    s("7_24", 8, 0, 7),
    u("8_24", 9, 0, 7),
    u("9_24", 5, 0, 4),
    s("10_24", 10, 0, 7),
    u("11_24", 13, 0, 0),
    u("12_24", 14, 0, 7),
    u("13_24", 15, 0, 2),
    u("14_24", 15, 3, 6),
    u("16_24", 13, 1, 7),
    u("17_24", 4, 0, 1).with_lsb(5, 5, 7),
    s("18_24", 11, 0, 7),
    u("19_24", 0, 1, 7),
    u("20_24", 4, 2, 6),
    s("21_24", 12, 0, 7),
];

const EARLY_REFLECTIONS: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 1),
    u("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 6),
    s("4_24", 4, 0, 7),
    s("5_24", 5, 0, 7),
    u("6_24", 6, 0, 6),
    u("7_24", 7, 0, 4),
    s("8_24", 8, 0, 7),
];

const LCR_DELAY: &[FieldDescriptor] = &[
    u("0_24", 2, 0, 3).with_lsb(3, 0, 7),
    u("1_24", 7, 0, 5),
    u("2_24", 1, 0, 7).with_lsb(2, 4, 7),
    u("3_24", 6, 0, 3).with_lsb(7, 6, 7),
    u("4_24", 5, 0, 7).with_lsb(6, 4, 7),
    u("5_24", 11, 0, 5),
    s("6_24", 0, 0, 7),
    u("7_24", 10, 0, 2).with_lsb(11, 6, 7),
    s("8_24", 4, 0, 7),
    u("9_24", 9, 0, 1).with_lsb(10, 3, 7),
    u("10_24", 15, 0, 6),
    s("11_24", 8, 0, 7),
    u("12_24", 14, 0, 3).with_lsb(15, 7, 7),
    u("13_24", 9, 2, 7),
    u("14_24", 13, 0, 2).with_lsb(14, 4, 7),
    u("15_24", 13, 3, 7),
    s("16_24", 12, 0, 7),
];

const STEREO_BPM_DELAY: &[FieldDescriptor] = &[
    u("0_24", 4, 0, 6),
    u("2_24", 5, 0, 2),
    u("3_24", 5, 3, 6),
    s("4_24", 10, 0, 7).with_lsb(11, 7, 7),
    u("6_24", 6, 0, 2),
    u("7_24", 6, 3, 6),
    s("8_24", 12, 0, 7).with_lsb(13, 7, 7),
    s("13_24", 0, 0, 7),
    u("15_24", 15, 0, 4),
    s("16_24", 2, 0, 7),
    s("14_24", 1, 0, 7),
    s("17_24", 3, 0, 7),
    u("18_24", 11, 0, 6),
    u("19_24", 13, 0, 6),
    s("21_24", 7, 0, 7),
    u("20_24", 14, 0, 1).with_lsb(15, 5, 7),
    u("10_24", 9, 0, 6),
    u("11_24", 14, 2, 6),
    s("12_24", 8, 0, 7),
];

const SEQUENCE_DELAY: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 7),
    u("2_24", 1, 0, 4),
    u("13_24", 11, 0, 6),
    u("14_24", 10, 0, 5).with_lsb(11, 7, 7),
    u("15_24", 9, 0, 4).with_lsb(10, 6, 7),
    u("16_24", 8, 0, 3).with_lsb(9, 5, 7),
    s("3_24", 2, 0, 7),
    u("11_24", 14, 2, 6),
    s("5_24", 3, 0, 7),
    u("6_24", 6, 1, 7),
    u("7_24", 7, 1, 7),
    s("9_24", 4, 0, 7),
    u("8_24", 14, 0, 1).with_lsb(15, 5, 7),
    u("10_24", 13, 0, 6),
    u("4_24", 15, 0, 4),
    s("12_24", 5, 0, 7),
];

/// Hall, smooth hall, wet plate and dry plate reverbs share one layout.
const REVERB_HALL_PLATE: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 6),
    u("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 6),
    u("4_24", 6, 0, 6),
    s("5_24", 7, 0, 4),
    s("6_24", 8, 0, 4),
    u("7_24", 9, 0, 6),
    u("8_24", 10, 0, 4),
    s("9_24", 11, 0, 7),
];

const REVERB_ROOM: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 6),
    u("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 6),
    u("4_24", 4, 0, 6),
    u("5_24", 5, 0, 6),
    u("6_24", 6, 0, 6),
    s("7_24", 7, 0, 4),
    s("8_24", 8, 0, 4),
    u("9_24", 9, 0, 6),
    u("10_24", 10, 0, 4),
    s("11_24", 11, 0, 7),
];

const PIANO_BODY: &[FieldDescriptor] = &[
    u("0_24", 0, 0, 7),
    u("1_24", 1, 0, 7),
    u("2_24", 2, 0, 7),
    u("3_24", 3, 0, 7),
    u("4_24", 4, 0, 7),
    s("8_24", 8, 0, 3),
    u("5_24", 5, 0, 6),
    u("6_24", 6, 0, 4),
    s("7_24", 7, 0, 7),
];

/// Effect type id to its private parameters. Ids missing here are converted without them.
pub static EFFECTS: phf::Map<u32, &'static [FieldDescriptor]> = phf_map! {
    1u32 => STEREO_AMP_SIMULATION,
    2u32 => STEREO_COMPRESSOR,
    3u32 => STEREO_LIMITER,
    4u32 => MULTIBAND_LIMITER,
    6u32 => OD_HIGAIN_WAH,
    7u32 => STEREO_PARAMETRIC_4EQ,
    8u32 => STEREO_GRAPHIC_7EQ,
    13u32 => TALKING_MODULATOR,
    14u32 => STEREO_DECIMATOR,
    16u32 => STEREO_CHORUS,
    17u32 => STEREO_HARMONIC_CHORUS,
    18u32 => MULTITAP_CHORUS_DELAY,
    19u32 => ENSEMBLE,
    23u32 => STEREO_PHASER,
    34u32 => STEREO_AUTO_PAN,
    36u32 => STEREO_RING_MODULATOR,
    41u32 => EARLY_REFLECTIONS,
    43u32 => LCR_DELAY,
    50u32 => STEREO_BPM_DELAY,
    51u32 => SEQUENCE_DELAY,
    52u32 => REVERB_HALL_PLATE,
    53u32 => REVERB_HALL_PLATE,
    54u32 => REVERB_HALL_PLATE,
    55u32 => REVERB_HALL_PLATE,
    56u32 => REVERB_ROOM,
    90u32 => PIANO_BODY,
};

/// Private parameters of `effect_type`, `None` for an empty slot or an unknown type.
pub fn effect_fields(effect_type: i32) -> Option<&'static [FieldDescriptor]> {
    u32::try_from(effect_type).ok().and_then(|id| EFFECTS.get(&id)).copied()
}

/// Every private parameter name any effect uses, in host page order.
pub fn all_parameter_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = EFFECTS.values().flat_map(|t| t.iter().map(|f| f.name)).collect();
    names.sort_by_key(|n| n.split('_').next().and_then(|i| i.parse::<u32>().ok()).unwrap_or(u32::MAX));
    names.dedup();
    names
}
