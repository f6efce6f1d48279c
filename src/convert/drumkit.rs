use crate::bitfield::{read_field, Transform};
use crate::dtype::{ConversionWarning, PCGError};
use crate::tables::drumkit::{
    note_key, DRUMKIT_NUMBER_GAP, DRUMKIT_NUMBER_LIMIT, DRUMKIT_SIZE, DRUM_NOTE, DRUM_NOTE_COUNT, DRUM_NOTE_STRIDE,
};
use crate::tables::program::OSC_MODE_DRUM_KIT;

use super::program::oscillator_key;
use super::{Converter, Dependency, Job};

impl<'a> Converter<'a> {
    /// Copies the drum kit played by the program under `prefix`, if it is in drum kit mode.
    pub(crate) fn drumkit(&self, job: &mut Job, prefix: &str) -> Result<(), PCGError> {
        if job.params.get(&format!("{}common_oscillator_mode", prefix))? != OSC_MODE_DRUM_KIT {
            return Ok(());
        }

        let kit_key = oscillator_key(prefix, 0, "hi_sample_no.");
        let mut kit = job.params.get(&kit_key)?;
        if kit > DRUMKIT_NUMBER_LIMIT {
            kit -= DRUMKIT_NUMBER_GAP;
            job.set(&kit_key, kit)?;
        }

        let Some(banks) = self.dependency_banks(job, Dependency::DrumKit) else {
            return Ok(());
        };
        let Some((bank, index)) = banks.locate(kit as usize) else {
            job.warn(ConversionWarning::UnresolvedDrumKit(kit));
            return Ok(());
        };
        let data = &bank.items[index].data;
        if data.len() < DRUMKIT_SIZE {
            tracing::debug!("Drum kit {} is {} bytes, expected {}", kit, data.len(), DRUMKIT_SIZE);
            job.warn(ConversionWarning::UnresolvedDrumKit(kit));
            return Ok(());
        }

        for note in 0..DRUM_NOTE_COUNT {
            for field in DRUM_NOTE {
                let key = note_key(prefix, note, field.name);
                let mut value = read_field(data, &field.shifted(note * DRUM_NOTE_STRIDE))?;
                if field.transform == Transform::OscBank {
                    value = job.osc_bank(value, &key);
                }
                job.set(&key, value)?;
            }
        }
        Ok(())
    }
}

pub(super) fn keys(prefix: &str, keys: &mut Vec<String>) {
    for note in 0..DRUM_NOTE_COUNT {
        keys.extend(DRUM_NOTE.iter().map(|f| note_key(prefix, note, f.name)));
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
    use crate::tables::program::OSCILLATOR_MODE;
    use crate::tables::PROGRAM_SIZE;
    use pretty_assertions::assert_eq;

    fn kit(pan: i32) -> KorgItem {
        let mut data = vec![0; DRUMKIT_SIZE];
        let pan_field = DRUM_NOTE.iter().find(|f| f.name == "pan").unwrap();
        let bank_field = DRUM_NOTE.iter().find(|f| f.name == "lower_bank").unwrap();
        write_field(&mut data, &pan_field.shifted(60 * DRUM_NOTE_STRIDE), pan).unwrap();
        write_field(&mut data, &bank_field.shifted(60 * DRUM_NOTE_STRIDE), 9).unwrap();
        KorgItem { data }
    }

    #[test]
    fn test_kit_number_gap() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        let mut items: Vec<KorgItem> = (0..121).map(|_| kit(1)).collect();
        items.push(kit(99));
        pcg.drumkit = Some(KorgBanks { banks: vec![KorgBank::new(Tag::DBK1, 0, DRUMKIT_SIZE as u32, items)] });
        let ctx = ConversionContext::new(KorgModel::Triton);
        let converter = Converter::new(&pcg, &ctx);

        let mut job = converter.job(PatchMode::Program);
        job.set("prog_common_oscillator_mode", 2).unwrap();
        job.set("prog_osc_1_hi_sample_no.", 130).unwrap();
        converter.drumkit(&mut job, "prog_").unwrap();

        assert_eq!(job.params.get("prog_osc_1_hi_sample_no.").unwrap(), 121);
        assert_eq!(job.params.get("prog_user_drumkit_parameter_C4_pan").unwrap(), 99);
        assert_eq!(job.params.get("prog_user_drumkit_parameter_C4_lower_bank").unwrap(), 2);
        assert!(job.warnings.is_empty());
    }

    #[test]
    fn test_only_drum_kit_mode() {
        let pcg = KorgPCG::new(KorgModel::Triton);
        let ctx = ConversionContext::new(KorgModel::Triton);
        let converter = Converter::new(&pcg, &ctx);
        let mut job = converter.job(PatchMode::Program);
        job.set("prog_common_oscillator_mode", 1).unwrap();
        job.set("prog_osc_1_hi_sample_no.", 130).unwrap();
        converter.drumkit(&mut job, "prog_").unwrap();
        assert_eq!(job.params.get("prog_osc_1_hi_sample_no.").unwrap(), 130);
        assert!(job.warnings.is_empty());
    }

    #[test]
    fn test_unresolved_kit() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        pcg.drumkit = Some(KorgBanks { banks: vec![KorgBank::new(Tag::DBK1, 0, DRUMKIT_SIZE as u32, vec![kit(1)])] });
        let ctx = ConversionContext::new(KorgModel::Triton);
        let converter = Converter::new(&pcg, &ctx);
        let mut job = converter.job(PatchMode::Program);
        job.set("prog_common_oscillator_mode", 2).unwrap();
        job.set("prog_osc_1_hi_sample_no.", 5).unwrap();
        converter.drumkit(&mut job, "prog_").unwrap();
        assert_eq!(job.warnings, vec![ConversionWarning::UnresolvedDrumKit(5)]);
    }

    #[test]
    fn test_short_kit_leaves_bank_converting() {
        let mut pcg = KorgPCG::new(KorgModel::Triton);
        pcg.drumkit = Some(KorgBanks { banks: vec![KorgBank::new(Tag::DBK1, 0, 64, vec![KorgItem::new(64, &[])])] });
        let mut drum_program = vec![0; PROGRAM_SIZE];
        write_field(&mut drum_program, &OSCILLATOR_MODE, OSC_MODE_DRUM_KIT).unwrap();
        let items = vec![KorgItem::new(PROGRAM_SIZE, &[]), KorgItem { data: drum_program }];
        pcg.program = Some(KorgBanks { banks: vec![KorgBank::new(Tag::PBK1, 0, PROGRAM_SIZE as u32, items)] });
        let ctx = ConversionContext::new(KorgModel::Triton);
        let converter = Converter::new(&pcg, &ctx);

        let converted = converter.convert_banks(PatchMode::Program, &["A"]).unwrap();
        let (target, conversions) = &converted[0];
        assert_eq!(*target, "A");
        assert_eq!(conversions.len(), 2);
        assert!(conversions[0].warnings.is_empty());
        assert_eq!(conversions[1].warnings, vec![ConversionWarning::UnresolvedDrumKit(0)]);
        assert_eq!(conversions[1].params.get("prog_user_drumkit_parameter_C4_pan").unwrap(), 0);
    }
}
