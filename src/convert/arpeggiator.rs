use crate::bitfield::read_field;
use crate::dtype::{ConversionWarning, PCGError};
use crate::tables::arpeggiator::{
    global_key, step_key, ARP_GLOBAL, ARP_RECORD_SIZE, ARP_STEP, ARP_STEP_COUNT, ARP_STEP_STRIDE,
    ARP_TONE_COUNT, FACTORY_PATTERN_COUNT,
};

use super::{Converter, Dependency, Job};

impl<'a> Converter<'a> {
    /// Fills the user pattern parameters under `prefix` from the pattern selected by
    /// `pattern_key`. Preset patterns get neutral values since the host has them built in.
    pub(crate) fn arpeggiator(&self, job: &mut Job, prefix: &str, pattern_key: &str) -> Result<(), PCGError> {
        let pattern = job.params.get(pattern_key)?;
        if pattern < FACTORY_PATTERN_COUNT {
            return preset_pattern(job, prefix);
        }

        let Some(banks) = self.dependency_banks(job, Dependency::Arpeggio) else {
            return Ok(());
        };
        let Some((bank, index)) = banks.locate((pattern - FACTORY_PATTERN_COUNT) as usize) else {
            job.warn(ConversionWarning::UnresolvedArpeggio(pattern));
            return Ok(());
        };
        let data = &bank.items[index].data;
        if data.len() < ARP_RECORD_SIZE {
            tracing::debug!("Arp. pattern {} is {} bytes, expected {}", pattern, data.len(), ARP_RECORD_SIZE);
            job.warn(ConversionWarning::UnresolvedArpeggio(pattern));
            return Ok(());
        }

        for field in ARP_GLOBAL {
            job.set(&global_key(prefix, field.name), read_field(data, field)?)?;
        }
        for step in 0..ARP_STEP_COUNT {
            for field in ARP_STEP {
                let value = read_field(data, &field.shifted(step * ARP_STEP_STRIDE))?;
                job.set(&step_key(prefix, step, field.name), value)?;
            }
        }
        Ok(())
    }
}

fn preset_pattern(job: &mut Job, prefix: &str) -> Result<(), PCGError> {
    job.set(&global_key(prefix, "length"), 1)?;
    job.set(&global_key(prefix, "tone_mode"), 0)?;
    job.set(&global_key(prefix, "fixed_note_mode"), 0)?;
    for tone in 1..=ARP_TONE_COUNT {
        job.set(&global_key(prefix, &format!("tone_note_no.{}", tone)), 0)?;
    }
    for step in 0..ARP_STEP_COUNT {
        job.set(&step_key(prefix, step, "gate"), 0)?;
        job.set(&step_key(prefix, step, "velocity"), 1)?;
        for tone in 0..ARP_TONE_COUNT {
            job.set(&step_key(prefix, step, &format!("tone_{}", tone)), 0)?;
        }
    }
    Ok(())
}

pub(super) fn keys(prefix: &str, keys: &mut Vec<String>) {
    keys.extend(ARP_GLOBAL.iter().map(|f| global_key(prefix, f.name)));
    for step in 0..ARP_STEP_COUNT {
        keys.extend(ARP_STEP.iter().map(|f| step_key(prefix, step, f.name)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{KorgBank, KorgBanks, KorgItem, KorgModel, KorgPCG};
    use crate::banks::PatchMode;
    use crate::bitfield::write_field;
    use crate::context::ConversionContext;
    use crate::dtype::Tag;
    use pretty_assertions::assert_eq;

    fn pattern(length: i32, step_3_gate: i32) -> KorgItem {
        let mut data = vec![0; ARP_RECORD_SIZE];
        write_field(&mut data, &ARP_GLOBAL[4], length).unwrap();
        write_field(&mut data, &ARP_STEP[1].shifted(3 * ARP_STEP_STRIDE), step_3_gate).unwrap();
        write_field(&mut data, &ARP_STEP[0].shifted(3 * ARP_STEP_STRIDE), -5).unwrap();
        KorgItem { data }
    }

    fn run(pcg: &KorgPCG, ctx: &ConversionContext, pattern_no: i32) -> Job {
        let converter = Converter::new(pcg, ctx);
        let mut job = converter.job(PatchMode::Program);
        job.set("prog_arpeggiator_pattern_no.", pattern_no).unwrap();
        converter.arpeggiator(&mut job, "prog_user_arp_", "prog_arpeggiator_pattern_no.").unwrap();
        job
    }

    #[test]
    fn test_preset_pattern_defaults() {
        let pcg = KorgPCG::new(KorgModel::Triton);
        let ctx = ConversionContext::new(KorgModel::Triton);
        let job = run(&pcg, &ctx, 3);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 1);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_step_47_velocity").unwrap(), 1);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_step_0_tone_11").unwrap(), 0);
        assert!(job.warnings.is_empty());
    }

    #[test]
    fn test_user_pattern_spans_banks() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        pcg.arpeggio = Some(KorgBanks { banks: vec![
            KorgBank::new(Tag::ABK1, 0, ARP_RECORD_SIZE as u32, vec![pattern(4, 10), pattern(5, 20)]),
            KorgBank::new(Tag::ABK1, 1, ARP_RECORD_SIZE as u32, vec![pattern(6, 30)]),
        ] });
        let ctx = ConversionContext::new(KorgModel::Triton);

        let job = run(&pcg, &ctx, 7);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 6);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_step_3_gate").unwrap(), 30);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_step_3_pitch_offset").unwrap(), -5);

        let job = run(&pcg, &ctx, 8);
        assert_eq!(job.warnings, vec![ConversionWarning::UnresolvedArpeggio(8)]);
    }

    #[test]
    fn test_factory_fallback() {
        let pcg = KorgPCG::new(KorgModel::Triton);
        let mut factory = KorgPCG::new(KorgModel::Triton);
        factory.arpeggio = Some(KorgBanks { banks: vec![
            KorgBank::new(Tag::ABK1, 0, ARP_RECORD_SIZE as u32, vec![pattern(9, 0), pattern(12, 0)]),
        ] });
        let ctx = ConversionContext::new(KorgModel::Triton).with_factory(factory).unwrap();
        let job = run(&pcg, &ctx, 6);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 12);
        assert_eq!(job.warnings, vec![ConversionWarning::FactoryFallback { category: "user arpeggiator patterns" }]);
    }

    #[test]
    fn test_pattern_number_skips_presets() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        let first: Vec<KorgItem> = (1..=5).map(|length| pattern(length, 0)).collect();
        pcg.arpeggio = Some(KorgBanks { banks: vec![
            KorgBank::new(Tag::ABK1, 0, ARP_RECORD_SIZE as u32, first),
            KorgBank::new(Tag::ABK1, 1, ARP_RECORD_SIZE as u32, vec![pattern(16, 0)]),
        ] });
        let ctx = ConversionContext::new(KorgModel::Triton);

        let job = run(&pcg, &ctx, 7);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 3);
        let job = run(&pcg, &ctx, 10);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 16);
        assert!(job.warnings.is_empty());
    }

    #[test]
    fn test_short_pattern_is_unresolved() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        pcg.arpeggio = Some(KorgBanks { banks: vec![
            KorgBank::new(Tag::ABK1, 0, 32, vec![KorgItem::new(32, &[0xFF; 32])]),
        ] });
        let ctx = ConversionContext::new(KorgModel::Triton);

        let job = run(&pcg, &ctx, 5);
        assert_eq!(job.warnings, vec![ConversionWarning::UnresolvedArpeggio(5)]);
        assert_eq!(job.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 0);
    }
}
