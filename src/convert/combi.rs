use crate::bank::KorgPCG;
use crate::banks::{is_gm_bank, letter_for_program_bank, vst_program_bank_name, PatchMode};
use crate::bitfield::read_field;
use crate::dtype::{ConversionWarning, PCGError};
use crate::patch::Timbre;
use crate::tables::combi::{timbre_offset, COMBI_COMMON, PROGRAM_BANK_FIELD, PROGRAM_NO_FIELD, TIMBRE, TIMBRE_COUNT};
use crate::tables::program::VALVE_COMBI;
use crate::tables::PROGRAM_SIZE;

use super::{combi_arpeggiators, record_name, rules, timbre_prefix, Conversion, Converter, Dependency, Job, COMBI_PREFIX};

const UNKNOWN_PROGRAM: &str = "Unknown";

/// Program referenced by a timbre.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TimbreRef {
    bank: i32,
    program: i32,
}

fn program_in<'p>(pcg: &'p KorgPCG, letter: &str, program: i32) -> Option<&'p [u8]> {
    let bank = pcg.program.as_ref()?.find_by_letter(letter)?;
    let item = bank.items.get(usize::try_from(program).ok()?)?;
    Some(&item.data)
}

/// Records too short to hold a program count as missing.
fn full_program(data: &[u8]) -> Option<&[u8]> {
    if data.len() < PROGRAM_SIZE {
        tracing::debug!("Skipping a {}-byte program record", data.len());
        return None;
    }
    Some(data)
}

impl<'a> Converter<'a> {
    pub fn convert_combination(&self, bank_id: u32, index: usize, data: &[u8]) -> Result<Conversion, PCGError> {
        let mut job = self.job(PatchMode::Combi);
        for field in COMBI_COMMON {
            job.set(field.name, read_field(data, field)?)?;
        }
        self.shared(&mut job, COMBI_PREFIX, data)?;
        for field in VALVE_COMBI {
            let value = if self.pcg.model.has_valve_force() { read_field(data, field)? } else { 0 };
            job.set(&format!("{}{}", COMBI_PREFIX, field.name), value)?;
        }

        let mut refs = [TimbreRef::default(); TIMBRE_COUNT];
        for (i, timbre) in refs.iter_mut().enumerate() {
            let prefix = timbre_prefix(i + 1);
            for field in TIMBRE {
                let value = read_field(data, &field.shifted(timbre_offset(i + 1)))?;
                job.set(&format!("{}{}", prefix, field.name), value)?;
                match field.name {
                    PROGRAM_BANK_FIELD => timbre.bank = value,
                    PROGRAM_NO_FIELD => timbre.program = value,
                    _ => {}
                }
            }
        }

        rules::apply_program_rules(&mut job.params, PatchMode::Combi, COMBI_PREFIX)?;

        let mut timbres = Vec::with_capacity(TIMBRE_COUNT);
        for (i, timbre) in refs.iter().enumerate() {
            let prefix = timbre_prefix(i + 1);
            let mut name = UNKNOWN_PROGRAM.to_string();
            if let Some(program) = self.resolve_timbre(&mut job, i + 1, *timbre) {
                name = record_name(program);
                self.inner_program(&mut job, &prefix, program, PatchMode::Combi)?;
                self.drumkit(&mut job, &prefix)?;
                rules::apply_program_rules(&mut job.params, PatchMode::Combi, &prefix)?;
                rules::apply_combi_timbre_defaults(&mut job.params, &prefix)?;
            }
            let bank_name = vst_program_bank_name(timbre.bank, self.ctx.model).unwrap_or_else(|_| {
                tracing::debug!("Timbre {} uses bank {}, which has no name", i + 1, timbre.bank);
                timbre.bank.to_string()
            });
            timbres.push(Timbre { timbre_name: name, bank_name, program_number: timbre.program });
        }

        for (prefix, pattern_key) in combi_arpeggiators() {
            self.arpeggiator(&mut job, &prefix, &pattern_key)?;
        }
        rules::finalize_program_banks(&mut job.params)?;

        Ok(Conversion {
            name: record_name(data),
            mode: PatchMode::Combi,
            bank_id,
            index,
            params: job.params,
            timbres,
            warnings: job.warnings,
        })
    }

    /// Finds the program a timbre plays: the current file first, then the factory PCG, then the
    /// GM programs for GM banks.
    fn resolve_timbre(&self, job: &mut Job, n: usize, timbre: TimbreRef) -> Option<&'a [u8]> {
        let gm_bank = is_gm_bank(timbre.bank);
        let letter = letter_for_program_bank(timbre.bank);

        if let Some(program) = letter.and_then(|l| program_in(self.pcg, l, timbre.program)).and_then(full_program) {
            return Some(program);
        }
        if !gm_bank {
            if let (Some(letter), Some(factory)) = (letter, self.ctx.factory.as_ref()) {
                self.factory_notice(job, Dependency::Program);
                if let Some(program) = program_in(factory, letter, timbre.program).and_then(full_program) {
                    return Some(program);
                }
            }
        } else if let Some(program) = self.ctx.gm.as_ref().and_then(|gm| gm.lookup(timbre.bank, timbre.program)).and_then(full_program) {
            return Some(program);
        }

        let warning = if gm_bank {
            ConversionWarning::MissingGMProgram { timbre: n, bank: timbre.bank, program: timbre.program }
        } else {
            ConversionWarning::UnresolvedTimbre { timbre: n, bank: timbre.bank, program: timbre.program }
        };
        job.warn(warning);
        None
    }
}
