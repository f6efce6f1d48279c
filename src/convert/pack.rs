//! Parameter list back to a raw program record.

use crate::bank::{KorgModel, NAME_LEN};
use crate::bitfield::{write_field, FieldDescriptor, Transform};
use crate::deserialize_with::latin1_encode;
use crate::dtype::PCGError;
use crate::params::ParamList;
use crate::tables::effects::{effect_fields, NO_EFFECT};
use crate::tables::program::{
    IFX, IFX_OFFSETS, IFX_TYPE_FIELD, MFX_SLOTS, OSCILLATOR, OSCILLATOR_COUNT, OSCILLATOR_MODE,
    OSCILLATOR_STRIDE, PROGRAM_COMMON, SHARED, VALVE_PROGRAM,
};
use crate::tables::PROGRAM_SIZE;

use super::program::{effect_key, ifx_prefix, mfx_prefix, oscillator_key, unmap_osc_bank};
use super::PROGRAM_PREFIX;

struct Packer<'p> {
    params: &'p ParamList,
    buffer: [u8; PROGRAM_SIZE],
}
impl<'p> Packer<'p> {
    fn put(&mut self, key: &str, field: &FieldDescriptor) -> Result<i32, PCGError> {
        let value = self.params.get(key)?;
        write_field(&mut self.buffer, field, value)?;
        Ok(value)
    }

    fn effect(&mut self, fx_prefix: &str, block_offset: usize, effect_type: i32) -> Result<(), PCGError> {
        if effect_type == NO_EFFECT {
            return Ok(());
        }
        let Some(table) = effect_fields(effect_type) else {
            tracing::debug!("No parameters registered for effect {}, {} left blank", effect_type, fx_prefix);
            return Ok(());
        };
        for field in table {
            self.put(&effect_key(fx_prefix, field.name), &field.shifted(block_offset))?;
        }
        Ok(())
    }
}

/// Writes a standalone program back into its 540-byte record. Only the active effect of each
/// slot gets its private parameters written; the record is otherwise zero past the name.
pub fn pack_program(params: &ParamList, name: &str, model: KorgModel) -> Result<[u8; PROGRAM_SIZE], PCGError> {
    let mut packer = Packer { params, buffer: [0; PROGRAM_SIZE] };
    packer.buffer[..NAME_LEN].copy_from_slice(&latin1_encode(name));
    let prefix = PROGRAM_PREFIX;

    for field in PROGRAM_COMMON {
        packer.put(&format!("{}{}", prefix, field.name), field)?;
    }

    for field in SHARED {
        let value = packer.put(&format!("{}{}", prefix, field.name), field)?;
        if let Some(slot) = MFX_SLOTS.iter().find(|s| s.type_field == field.name) {
            packer.effect(&mfx_prefix(prefix, slot.id), slot.block_offset, value)?;
        }
    }
    for (slot, offset) in IFX_OFFSETS {
        let fx_prefix = ifx_prefix(prefix, slot);
        for field in IFX {
            let value = packer.put(&format!("{}_{}", fx_prefix, field.name), &field.shifted(offset))?;
            if field.name == IFX_TYPE_FIELD {
                packer.effect(&fx_prefix, offset, value)?;
            }
        }
    }

    if model.has_valve_force() {
        for field in VALVE_PROGRAM {
            packer.put(&format!("{}{}", prefix, field.name), field)?;
        }
    }

    let osc_mode = params.get(&format!("{}{}", prefix, OSCILLATOR_MODE.name))?;
    for osc in 0..OSCILLATOR_COUNT {
        for field in OSCILLATOR {
            let field = field.shifted(osc * OSCILLATOR_STRIDE);
            let key = oscillator_key(prefix, osc, field.name);
            let mut value = params.get(&key)?;
            // Single-oscillator programs store the second bank untouched
            if field.transform == Transform::OscBank && !(osc == 1 && osc_mode == 0) {
                value = unmap_osc_bank(value);
            }
            write_field(&mut packer.buffer, &field, value)?;
        }
    }

    Ok(packer.buffer)
}
