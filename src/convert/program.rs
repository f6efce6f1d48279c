use crate::banks::PatchMode;
use crate::bitfield::{read_field, FieldDescriptor, Transform};
use crate::dtype::{ConversionWarning, PCGError};
use crate::tables::effects::{all_parameter_names, effect_fields, NO_EFFECT};
use crate::tables::program::{
    IFX, IFX_OFFSETS, IFX_TYPE_FIELD, MFX_SLOTS, OSCILLATOR, OSCILLATOR_COUNT, OSCILLATOR_MODE,
    OSCILLATOR_STRIDE, PROGRAM_COMMON, SHARED, VALVE_PROGRAM,
};

use super::{Converter, Job};

/// Bank number the instrument stores for internal RAM samples; the host has no equivalent.
pub const RAM_BANK: i32 = 1;

/// Recodes an oscillator or drum kit bank to the host's numbering. `None` for the RAM bank,
/// which is kept as stored.
pub fn remap_osc_bank(bank: i32) -> Option<i32> {
    match bank {
        0 | 2 | 3 | 5 => Some(0),
        6 => Some(8),
        7 => Some(6),
        8 => Some(7),
        9 => Some(2),
        10 => Some(9),
        11 => Some(5),
        12 => Some(4),
        13 => Some(3),
        RAM_BANK => None,
        other => Some(other),
    }
}

/// Inverse of [`remap_osc_bank`]. Host bank 0 goes back to stored bank 0, host bank 4 to 12.
pub fn unmap_osc_bank(bank: i32) -> i32 {
    match bank {
        8 => 6,
        6 => 7,
        7 => 8,
        2 => 9,
        9 => 10,
        5 => 11,
        4 => 12,
        3 => 13,
        other => other,
    }
}

pub(super) fn oscillator_key(prefix: &str, osc: usize, name: &str) -> String {
    format!("{}osc_{}_{}", prefix, osc + 1, name)
}

pub(super) fn effect_key(fx_prefix: &str, name: &str) -> String {
    format!("{}_specific_parameter_{}", fx_prefix, name)
}

pub(super) fn mfx_prefix(prefix: &str, slot: usize) -> String {
    format!("{}mfx{}", prefix, slot)
}

pub(super) fn ifx_prefix(prefix: &str, slot: usize) -> String {
    format!("{}ifx{}", prefix, slot)
}

impl Job {
    /// Bank remap with the RAM bank reported.
    pub(super) fn osc_bank(&mut self, bank: i32, key: &str) -> i32 {
        match remap_osc_bank(bank) {
            Some(mapped) => mapped,
            None => {
                tracing::warn!("Unhandled Bank (RAM)");
                self.warn(ConversionWarning::UnhandledOscBank(key.to_string()));
                bank
            }
        }
    }

    fn read_table(&mut self, prefix: &str, table: &[FieldDescriptor], data: &[u8]) -> Result<(), PCGError> {
        for field in table {
            let value = read_field(data, field)?;
            self.set(&format!("{}{}", prefix, field.name), value)?;
        }
        Ok(())
    }
}

impl<'a> Converter<'a> {
    /// Reads the program-level parameters of `data` under `prefix`. Programs played by a
    /// combination timbre skip the effect chain, which the combination provides.
    pub(crate) fn inner_program(&self, job: &mut Job, prefix: &str, data: &[u8], mode: PatchMode) -> Result<(), PCGError> {
        job.read_table(prefix, PROGRAM_COMMON, data)?;

        if mode == PatchMode::Program {
            self.shared(job, prefix, data)?;
            if self.pcg.model.has_valve_force() {
                job.read_table(prefix, VALVE_PROGRAM, data)?;
            } else {
                for field in VALVE_PROGRAM {
                    job.set(&format!("{}{}", prefix, field.name), 0)?;
                }
            }
        }

        let osc_mode = read_field(data, &OSCILLATOR_MODE)?;
        for osc in 0..OSCILLATOR_COUNT {
            for field in OSCILLATOR {
                let field = field.shifted(osc * OSCILLATOR_STRIDE);
                let key = oscillator_key(prefix, osc, field.name);
                let mut value = read_field(data, &field)?;
                // The second oscillator of a single-oscillator program holds leftovers
                if field.transform == Transform::OscBank && !(osc == 1 && osc_mode == 0) {
                    value = job.osc_bank(value, &key);
                }
                job.set(&key, value)?;
            }
        }
        Ok(())
    }

    /// Master effects, master EQ and the five insert effects.
    pub(crate) fn shared(&self, job: &mut Job, prefix: &str, data: &[u8]) -> Result<(), PCGError> {
        for field in SHARED {
            let value = read_field(data, field)?;
            job.set(&format!("{}{}", prefix, field.name), value)?;
            if let Some(slot) = MFX_SLOTS.iter().find(|s| s.type_field == field.name) {
                self.effect(job, &mfx_prefix(prefix, slot.id), slot.block_offset, data, value)?;
            }
        }

        for (slot, offset) in IFX_OFFSETS {
            let fx_prefix = ifx_prefix(prefix, slot);
            for field in IFX {
                let value = read_field(data, &field.shifted(offset))?;
                job.set(&format!("{}_{}", fx_prefix, field.name), value)?;
                if field.name == IFX_TYPE_FIELD {
                    self.effect(job, &fx_prefix, offset, data, value)?;
                }
            }
        }
        Ok(())
    }

    fn effect(&self, job: &mut Job, fx_prefix: &str, block_offset: usize, data: &[u8], effect_type: i32) -> Result<(), PCGError> {
        if effect_type == NO_EFFECT {
            return Ok(());
        }
        let Some(table) = effect_fields(effect_type) else {
            job.warn(ConversionWarning::UnhandledEffect(effect_type));
            return Ok(());
        };
        for field in table {
            let value = read_field(data, &field.shifted(block_offset))?;
            job.set(&effect_key(fx_prefix, field.name), value)?;
        }
        Ok(())
    }
}

/// Keys written for the effect chain under `prefix`.
pub(super) fn shared_keys(prefix: &str, keys: &mut Vec<String>) {
    let effect_names = all_parameter_names();
    for field in SHARED {
        keys.push(format!("{}{}", prefix, field.name));
        if let Some(slot) = MFX_SLOTS.iter().find(|s| s.type_field == field.name) {
            let fx_prefix = mfx_prefix(prefix, slot.id);
            keys.extend(effect_names.iter().map(|n| effect_key(&fx_prefix, n)));
        }
    }
    for (slot, _) in IFX_OFFSETS {
        let fx_prefix = ifx_prefix(prefix, slot);
        keys.extend(IFX.iter().map(|f| format!("{}_{}", fx_prefix, f.name)));
        keys.extend(effect_names.iter().map(|n| effect_key(&fx_prefix, n)));
    }
}

/// Keys written by [`Converter::inner_program`].
pub(super) fn inner_program_keys(prefix: &str, mode: PatchMode, keys: &mut Vec<String>) {
    keys.extend(PROGRAM_COMMON.iter().map(|f| format!("{}{}", prefix, f.name)));
    if mode == PatchMode::Program {
        shared_keys(prefix, keys);
        keys.extend(VALVE_PROGRAM.iter().map(|f| format!("{}{}", prefix, f.name)));
    }
    for osc in 0..OSCILLATOR_COUNT {
        keys.extend(OSCILLATOR.iter().map(|f| oscillator_key(prefix, osc, f.name)));
    }
}
