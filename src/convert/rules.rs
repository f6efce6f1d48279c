//! Fix-ups applied after the raw fields are read: values the host derives differently from the
//! instrument, and parameters the host has but the instrument does not store.

use crate::banks::{is_gm_bank, PatchMode};
use crate::dtype::PCGError;
use crate::params::ParamList;
use crate::tables::combi::{PROGRAM_BANK_FIELD, TIMBRE_COUNT};

use super::timbre_prefix;

pub const KNOB_COUNT: usize = 4;

/// Sample number the instrument uses for "no sample", and the value the host expects for it.
const NO_SAMPLE: i32 = 4095;
const HOST_NO_SAMPLE: i32 = 999;

/// When `when` holds, every `then` entry is written. Names are relative to the record prefix.
struct Trigger {
    when: (&'static str, i32),
    then: &'static [(&'static str, i32)],
}

static TRIGGERS: [Trigger; 3] = [
    Trigger { when: ("common_oscillator_mode", 2), then: &[("osc_1_output_use_drum_kit_setting", 1)] },
    Trigger { when: ("osc_1_low_sample_no.", NO_SAMPLE), then: &[("osc_1_low_sample_no.", HOST_NO_SAMPLE)] },
    Trigger { when: ("osc_2_low_sample_no.", NO_SAMPLE), then: &[("osc_2_low_sample_no.", HOST_NO_SAMPLE)] },
];

/// Timbre parameters the host exposes but a combination never sets.
static COMBI_TIMBRE_DEFAULTS: [(&str, i32); 20] = [
    ("arpeggiator_gate_control", 0),
    ("arpeggiator_velocity_control", 0),
    ("arpeggiator_tempo", 40),
    ("arpeggiator_switch", 0),
    ("arpeggiator_pattern_no.", 0),
    ("arpeggiator_resolution", 0),
    ("arpeggiator_octave", 0),
    ("arpeggiator_gate", 0),
    ("arpeggiator_velocity", 1),
    ("arpeggiator_swing", 0),
    ("arpeggiator_sort_onoff", 0),
    ("arpeggiator_latch_onoff", 0),
    ("arpeggiator_keysync_onoff", 0),
    ("arpeggiator_keyboard_onoff", 0),
    ("arpeggiator_top_key", 0),
    ("arpeggiator_bottom_key", 0),
    ("arpeggiator_top_velocity", 1),
    ("arpeggiator_bottom_velocity", 1),
    ("osc_1_low_start_offset", 0),
    ("osc_2_low_start_offset", 0),
];

fn is_timbre(prefix: &str) -> bool {
    prefix.contains("combi_timbre")
}

/// Initial position of a knob given what it is assigned to.
pub fn knob_default(assign_type: i32) -> i32 {
    match assign_type {
        7 => 100,                  // Volume
        10 => 127,                 // Expression
        8 | 9 | 13..=21 => 64,     // Pans, filter, envelopes, LFO 1
        _ => 0,
    }
}

fn knob_assign_key(prefix: &str, knob: usize) -> String {
    if prefix.contains("combi_") {
        format!("{}knob{}_assign_type", prefix, knob)
    } else {
        format!("{}common_knob{}_assign_type", prefix, knob)
    }
}

fn knob_key(prefix: &str, knob: usize) -> String {
    format!("{}knob{}", prefix, knob)
}

/// Triggers apply to programs and to the programs played by combination timbres; knob
/// defaults apply to everything but timbres.
pub fn apply_program_rules(params: &mut ParamList, mode: PatchMode, prefix: &str) -> Result<(), PCGError> {
    if mode == PatchMode::Program || is_timbre(prefix) {
        for trigger in &TRIGGERS {
            let (name, expected) = trigger.when;
            if params.get(&format!("{}{}", prefix, name))? == expected {
                for (target, value) in trigger.then {
                    params.set(&format!("{}{}", prefix, target), *value)?;
                }
            }
        }
    }

    if !is_timbre(prefix) {
        for knob in 1..=KNOB_COUNT {
            let assign = params.get(&knob_assign_key(prefix, knob))?;
            params.set(&knob_key(prefix, knob), knob_default(assign))?;
        }
    }
    Ok(())
}

pub fn apply_combi_timbre_defaults(params: &mut ParamList, prefix: &str) -> Result<(), PCGError> {
    for (name, value) in &COMBI_TIMBRE_DEFAULTS {
        params.set(&format!("{}{}", prefix, name), *value)?;
    }
    Ok(())
}

/// Moves timbre program banks to the host's numbering, which has a single GM bank and no gap
/// after it.
pub fn finalize_program_banks(params: &mut ParamList) -> Result<(), PCGError> {
    for n in 1..=TIMBRE_COUNT {
        let key = format!("{}{}", timbre_prefix(n), PROGRAM_BANK_FIELD);
        let bank = params.get(&key)?;
        if is_gm_bank(bank) {
            params.set(&key, bank - 2)?;
        } else if bank >= 17 {
            params.set(&key, bank - 1)?;
        }
    }
    Ok(())
}

/// Keys the rules write that no field table produces.
pub(super) fn template_only_keys(mode: PatchMode, prefix: &str, keys: &mut Vec<String>) {
    if mode == PatchMode::Program || is_timbre(prefix) {
        for trigger in &TRIGGERS {
            for (target, _) in trigger.then {
                let key = format!("{}{}", prefix, target);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
    }
    if is_timbre(prefix) {
        keys.extend(COMBI_TIMBRE_DEFAULTS.iter()
            .filter(|(name, _)| name.ends_with("_control"))
            .map(|(name, _)| format!("{}{}", prefix, name)));
    } else {
        keys.extend((1..=KNOB_COUNT).map(|knob| knob_key(prefix, knob)));
    }
}
