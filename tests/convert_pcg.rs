use korg_pcg::bank::{KorgBank, KorgBanks, KorgItem, KorgModel, KorgPCG, NAME_LEN};
use korg_pcg::banks::PatchMode;
use korg_pcg::bitfield::{write_field, FieldDescriptor};
use korg_pcg::context::{ConversionContext, DataPaths};
use korg_pcg::convert::{pack_program, Conversion, Converter};
use korg_pcg::deserialize_with::latin1_encode;
use korg_pcg::dtype::{ConversionWarning, Tag};
use korg_pcg::gm::write_packed;
use korg_pcg::patch::PatchFile;
use korg_pcg::tables::arpeggiator::{ARP_GLOBAL, ARP_RECORD_SIZE, ARP_STEP, ARP_STEP_STRIDE};
use korg_pcg::tables::combi::{timbre_offset, TIMBRE};
use korg_pcg::tables::drumkit::{DRUM_NOTE, DRUM_NOTE_STRIDE};
use korg_pcg::tables::program::{OSCILLATOR, OSCILLATOR_MODE, PROGRAM_COMMON};
use korg_pcg::tables::{COMBI_SIZE, DRUMKIT_SIZE, PROGRAM_SIZE};
use pretty_assertions::assert_eq;

fn field_named(table: &[FieldDescriptor], name: &str) -> FieldDescriptor {
    *table.iter().find(|f| f.name == name).unwrap()
}

fn program(name: &str) -> Vec<u8> {
    let mut data = vec![0; PROGRAM_SIZE];
    data[..NAME_LEN].copy_from_slice(&latin1_encode(name));
    data
}

fn combi(name: &str, timbres: &[(i32, i32)]) -> Vec<u8> {
    let mut data = vec![0; COMBI_SIZE];
    data[..NAME_LEN].copy_from_slice(&latin1_encode(name));
    for (i, (bank, program)) in timbres.iter().enumerate() {
        write_field(&mut data, &TIMBRE[0].shifted(timbre_offset(i + 1)), *bank).unwrap();
        write_field(&mut data, &TIMBRE[1].shifted(timbre_offset(i + 1)), *program).unwrap();
    }
    data
}

fn bank(tag: Tag, bank_id: u32, recordsize: usize, records: Vec<Vec<u8>>) -> KorgBank {
    KorgBank::new(tag, bank_id, recordsize as u32, records.iter().map(|r| KorgItem::new(recordsize, r)).collect())
}

fn arp_pattern(length: i32) -> Vec<u8> {
    let mut data = vec![0; ARP_RECORD_SIZE];
    write_field(&mut data, &ARP_GLOBAL[4], length).unwrap();
    write_field(&mut data, &ARP_STEP[1].shifted(2 * ARP_STEP_STRIDE), 77).unwrap();
    data
}

/// Writes the PCG out and reads it back, so every test goes through the container codec.
fn reload(pcg: &KorgPCG) -> KorgPCG {
    KorgPCG::from_bytes(&pcg.to_bytes().unwrap()).unwrap()
}

fn count_fallbacks(conversions: &[Conversion]) -> usize {
    conversions.iter()
        .flat_map(|c| c.warnings.iter())
        .filter(|w| matches!(w, ConversionWarning::FactoryFallback { .. }))
        .count()
}

#[test]
fn test_program_bank_to_patch_files() {
    let mut first = program("Grand Piano");
    write_field(&mut first, &field_named(PROGRAM_COMMON, "common_category"), 0).unwrap();
    write_field(&mut first, &field_named(PROGRAM_COMMON, "common_knob1_assign_type"), 10).unwrap();
    write_field(&mut first, &field_named(PROGRAM_COMMON, "arpeggiator_pattern_no."), 7).unwrap();
    let mut second = program("Big Kit");
    write_field(&mut second, &field_named(PROGRAM_COMMON, "common_category"), 15).unwrap();
    write_field(&mut second, &OSCILLATOR_MODE, 2).unwrap();
    write_field(&mut second, &field_named(OSCILLATOR, "hi_sample_no."), 130).unwrap();
    write_field(&mut second, &field_named(OSCILLATOR, "low_sample_no."), 4095).unwrap();

    let mut kit = vec![0; DRUMKIT_SIZE];
    write_field(&mut kit, &field_named(DRUM_NOTE, "pan").shifted(36 * DRUM_NOTE_STRIDE), 40).unwrap();

    let mut pcg = KorgPCG::new(KorgModel::Triton);
    pcg.program = Some(KorgBanks { banks: vec![bank(Tag::PBK1, 0x2, PROGRAM_SIZE, vec![first, second])] });
    pcg.drumkit = Some(KorgBanks { banks: vec![bank(Tag::DBK1, 0, DRUMKIT_SIZE, vec![vec![0; 16]; 121].into_iter().chain([kit]).collect())] });
    pcg.arpeggio = Some(KorgBanks { banks: vec![bank(Tag::ABK1, 0, ARP_RECORD_SIZE, vec![arp_pattern(2), arp_pattern(3), arp_pattern(8)])] });
    let pcg = reload(&pcg);

    let ctx = ConversionContext::new(KorgModel::Triton);
    let converter = Converter::new(&pcg, &ctx);
    let converted = converter.convert_banks(PatchMode::Program, &["C"]).unwrap();
    assert_eq!(converted.len(), 1);
    let (target, conversions) = &converted[0];
    assert_eq!(*target, "A");

    let piano = &conversions[0];
    assert!(piano.warnings.is_empty());
    assert_eq!(piano.params.get("prog_knob1").unwrap(), 127);
    assert_eq!(piano.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 8);
    assert_eq!(piano.params.get("prog_user_arp_pattern_parameter_step_2_gate").unwrap(), 77);

    let drums = &conversions[1];
    assert!(drums.warnings.is_empty());
    assert_eq!(drums.params.get("prog_osc_1_hi_sample_no.").unwrap(), 121);
    assert_eq!(drums.params.get("prog_osc_1_low_sample_no.").unwrap(), 999);
    assert_eq!(drums.params.get("prog_osc_1_output_use_drum_kit_setting").unwrap(), 1);
    assert_eq!(drums.params.get("prog_user_drumkit_parameter_C2_pan").unwrap(), 40);
    // Preset pattern defaults
    assert_eq!(drums.params.get("prog_user_arp_pattern_parameter_length").unwrap(), 1);

    let patch = PatchFile::from_conversion(drums, target, KorgModel::Triton).unwrap();
    let info = &patch.general_program_information;
    assert_eq!(info.name, "Big Kit         ");
    assert_eq!(info.category, "Drums           ");
    assert_eq!(info.bank, "USER-A");
    assert_eq!(info.triton_bank_number, 25);
    assert_eq!(info.number, 1);
    assert_eq!(patch.dsp_settings.len(), ctx.template(PatchMode::Program).params.len());
}

#[test]
fn test_combi_falls_back_to_factory_once() {
    let mut pcg = KorgPCG::new(KorgModel::TritonExtreme);
    pcg.combination = Some(KorgBanks { banks: vec![bank(Tag::CBK1, 0x0, COMBI_SIZE, vec![
        combi("Layer", &[(1, 0), (1, 1)]),
        combi("Split", &[(1, 1), (0, 0)]),
    ])] });
    pcg.program = Some(KorgBanks { banks: vec![bank(Tag::PBK1, 0x0, PROGRAM_SIZE, vec![program("Own A000")])] });
    let pcg = reload(&pcg);

    let mut factory = KorgPCG::new(KorgModel::TritonExtreme);
    factory.program = Some(KorgBanks { banks: vec![bank(Tag::PBK1, 0x1, PROGRAM_SIZE, vec![program("Factory B000"), program("Factory B001")])] });
    let ctx = ConversionContext::new(KorgModel::TritonExtreme).with_factory(reload(&factory)).unwrap();

    let converter = Converter::new(&pcg, &ctx);
    let converted = converter.convert_banks(PatchMode::Combi, &["A"]).unwrap();
    let conversions = &converted[0].1;

    assert_eq!(count_fallbacks(conversions), 1);
    let names: Vec<Vec<&str>> = conversions.iter()
        .map(|c| c.timbres[..2].iter().map(|t| t.timbre_name.trim_end()).collect())
        .collect();
    assert_eq!(names, vec![vec!["Factory B000", "Factory B001"], vec!["Factory B001", "Own A000"]]);
    assert_eq!(conversions[0].timbres[0].bank_name, "B");

    let patch = PatchFile::from_conversion(&conversions[1], "B", KorgModel::TritonExtreme).unwrap();
    assert_eq!(patch.general_program_information.triton_bank_number, 13);
    assert_eq!(patch.general_program_information.timbres.as_ref().map(|t| t.len()), Some(8));
    assert_eq!(patch.data_type, "combi");
}

#[test]
fn test_parallel_conversions_share_the_notice() {
    let combis: Vec<Vec<u8>> = (0..16).map(|i| combi(&format!("Combi {}", i), &[(2, i % 3)])).collect();
    let mut pcg = KorgPCG::new(KorgModel::Triton);
    pcg.combination = Some(KorgBanks { banks: vec![bank(Tag::CBK1, 0x1, COMBI_SIZE, combis)] });

    let mut factory = KorgPCG::new(KorgModel::Triton);
    factory.program = Some(KorgBanks { banks: vec![bank(Tag::PBK1, 0x2, PROGRAM_SIZE, vec![program("C0"), program("C1"), program("C2")])] });
    let ctx = ConversionContext::new(KorgModel::Triton).with_factory(factory).unwrap();

    let combis = pcg.combination.as_ref().unwrap();
    let items = &combis.banks[0].items;
    let converter = Converter::new(&pcg, &ctx);
    let parallel: Vec<Conversion> = std::thread::scope(|s| {
        let handles: Vec<_> = items.chunks(4).enumerate().map(|(chunk, items)| {
            let converter = &converter;
            s.spawn(move || {
                items.iter().enumerate()
                    .map(|(i, item)| converter.convert_combination(0x1, chunk * 4 + i, &item.data).unwrap())
                    .collect::<Vec<_>>()
            })
        }).collect();
        handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel.len(), 16);
    assert_eq!(count_fallbacks(&parallel), 1);

    let sequential = Converter::new(&pcg, &ctx).convert_bank(&combis.banks[0], PatchMode::Combi).unwrap();
    for (a, b) in parallel.iter().zip(&sequential) {
        assert_eq!(a.index, b.index);
        assert_eq!(a.params, b.params);
        assert_eq!(a.timbres, b.timbres);
    }
    assert_eq!(parallel[4].timbres[0].timbre_name.trim_end(), "C1");
}

#[test]
fn test_reference_data_from_folder() {
    let dir = tempfile::tempdir().unwrap();
    let paths = DataPaths::in_folder(dir.path());

    let mut factory = KorgPCG::new(KorgModel::Triton);
    factory.program = Some(KorgBanks { banks: vec![bank(Tag::PBK1, 0x3, PROGRAM_SIZE, vec![program("Factory D000")])] });
    std::fs::write(&paths.factory_triton, factory.to_bytes().unwrap()).unwrap();

    let mut packed = Vec::new();
    write_packed(&[(6, 0, program("Piano 1")), (7, 0, program("Piano 1w"))], &mut packed).unwrap();
    std::fs::write(&paths.gm_programs, packed).unwrap();

    let ctx = ConversionContext::load(KorgModel::Triton, &paths).unwrap();
    assert_eq!(ctx.gm.as_ref().map(|gm| gm.len()), Some(2));

    let pcg = KorgPCG::new(KorgModel::Triton);
    let converter = Converter::new(&pcg, &ctx);
    let conv = converter.convert_combination(0, 0, &combi("GM", &[(7, 0), (8, 0), (3, 0), (6, 1)])).unwrap();
    let names: Vec<&str> = conv.timbres[..4].iter().map(|t| t.timbre_name.trim_end()).collect();
    assert_eq!(names, vec!["Piano 1w", "Piano 1", "Factory D000", "Unknown"]);
    assert_eq!(conv.params.get("combi_timbre_1_program_bank").unwrap(), 5);
    assert_eq!(conv.params.get("combi_timbre_3_program_bank").unwrap(), 3);
    assert!(conv.warnings.contains(&ConversionWarning::MissingGMProgram { timbre: 4, bank: 6, program: 1 }));

    let extreme = ConversionContext::load(KorgModel::TritonExtreme, &paths).unwrap();
    assert!(extreme.factory.is_none());
}

#[test]
fn test_patch_file_back_to_program() {
    let mut data = program("Strings");
    write_field(&mut data, &OSCILLATOR_MODE, 1).unwrap();
    write_field(&mut data, &field_named(PROGRAM_COMMON, "common_category"), 3).unwrap();
    write_field(&mut data, &field_named(OSCILLATOR, "hi_bank"), 10).unwrap();
    write_field(&mut data, &field_named(OSCILLATOR, "octave").shifted(154), -2).unwrap();

    let pcg = KorgPCG::new(KorgModel::Triton);
    let ctx = ConversionContext::new(KorgModel::Triton);
    let converter = Converter::new(&pcg, &ctx);
    let conv = converter.convert_program(0, 12, &data).unwrap();

    let json = PatchFile::from_conversion(&conv, "D", KorgModel::Triton).unwrap().to_json().unwrap();
    let patch = PatchFile::from_json(&json).unwrap();
    let record = pack_program(&patch.to_param_list(), patch.name(), KorgModel::Triton).unwrap();

    assert_eq!(record.to_vec(), data);
}
