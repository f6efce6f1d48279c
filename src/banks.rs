//! Bank letters, the several numbering schemes a bank goes by, and the category names shown by
//! the host.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::bank::KorgModel;
use crate::dtype::PCGError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum PatchMode {
    Program,
    Combi,
}

pub struct BankDef {
    /// Bank number as stored in a combination timbre
    pub short_id: i32,
    /// Bank number used by the external schema, `None` for GM variation banks
    pub regular_id: Option<i32>,
    /// Bank id stored in the PCG bank header
    pub hex_id: i64,
    pub name: &'static str,
}

const fn def(short_id: i32, regular_id: Option<i32>, hex_id: i64, name: &'static str) -> BankDef {
    BankDef { short_id, regular_id, hex_id, name }
}

pub static BANK_DEFINITIONS: [BankDef; 24] = [
    def(0, Some(0), 0x0, "A"),
    def(1, Some(1), 0x1, "B"),
    def(2, Some(2), 0x2, "C"),
    def(3, Some(3), 0x3, "D"),
    def(4, Some(4), 0x4, "E"),
    def(5, Some(5), 0x8000, "F"),
    def(6, Some(6), 0xF0000, "GM"),
    def(7, None, 0xF0001, "g(1)"),
    def(8, None, 0xF0002, "g(2)"),
    def(9, None, 0xF0003, "g(3)"),
    def(10, None, 0xF0004, "g(4)"),
    def(11, None, 0xF0005, "g(5)"),
    def(12, None, 0xF0006, "g(6)"),
    def(13, None, 0xF0007, "g(7)"),
    def(14, None, 0xF0008, "g(8)"),
    def(15, None, 0xF0009, "g(9)"),
    def(16, None, 0xF000A, "g(d)"),
    def(17, Some(7), 0x20000, "H"),
    def(18, Some(8), 0x20001, "I"),
    def(19, Some(9), 0x20002, "J"),
    def(20, Some(10), 0x20003, "K"),
    def(21, Some(11), 0x20004, "L"),
    def(22, Some(12), 0x20005, "M"),
    def(23, Some(13), 0x20006, "N"),
];

/// User banks a converted preset can be stored into on the host.
pub const USER_BANK_LETTERS: [&str; 4] = ["A", "B", "C", "D"];

pub const GM_BANK: i32 = 6;

pub fn letter_for_bank_id(hex_id: i64) -> Option<&'static str> {
    BANK_DEFINITIONS.iter().find(|d| d.hex_id == hex_id).map(|d| d.name)
}

pub fn letter_for_program_bank(short_id: i32) -> Option<&'static str> {
    BANK_DEFINITIONS.iter().find(|d| d.short_id == short_id).map(|d| d.name)
}

pub fn short_id_for_letter(letter: &str) -> Option<i32> {
    BANK_DEFINITIONS.iter().find(|d| d.name == letter).map(|d| d.short_id)
}

pub fn regular_id(short_id: i32) -> Option<i32> {
    BANK_DEFINITIONS.iter().find(|d| d.short_id == short_id).and_then(|d| d.regular_id)
}

pub fn is_gm_bank(short_id: i32) -> bool {
    (GM_BANK..=16).contains(&short_id)
}

/// Host bank number of the user bank `letter`.
pub fn vst_bank_number(mode: PatchMode, letter: &str, model: KorgModel) -> Result<i32, PCGError> {
    let start = match (mode, model) {
        (PatchMode::Program, KorgModel::TritonExtreme) => 23,
        (PatchMode::Program, _) => 25,
        (PatchMode::Combi, KorgModel::TritonExtreme) => 12,
        (PatchMode::Combi, _) => 14,
    };
    USER_BANK_LETTERS.iter()
        .position(|&l| l == letter)
        .map(|i| start + i as i32)
        .ok_or_else(|| PCGError::Invalid(format!("\"{}\" is not a user bank", letter)))
}

pub fn vst_program_bank_name(short_id: i32, model: KorgModel) -> Result<String, PCGError> {
    let letter = letter_for_program_bank(short_id).ok_or(PCGError::UnknownBank(short_id as i64))?;
    if model == KorgModel::TritonExtreme {
        Ok(letter.to_string())
    } else {
        Ok(format!("INT-{}", letter))
    }
}

const CATEGORY_NAMES: [(&str, &str); 16] = [
    ("Keyboard", "Keyboard"),
    ("Organ", "Organ"),
    ("Bell/Mallet", "Bell/Mallet/Perc"),
    ("Strings", "Strings"),
    ("Vocal/Airy", "BrassReed"),
    ("Brass", "Orchestral"),
    ("Woodwind/Reed", "World"),
    ("Guitar/Plucked", "Guitar/Plucked"),
    ("Bass", "Pads"),
    ("SlowSynth", "MotionSynth"),
    ("FastSynth", "Synth"),
    ("LeadSynth", "LeadSplits"),
    ("MotionSynth", "BassSplits"),
    ("SE", "Complex & SE"),
    ("Hit/Arpg", "RhythmicPattern"),
    ("Drums", "Ds/Hits"),
];

/// Category id and its name, padded to 16 characters. Combinations of every model but the
/// Triton Extreme use their own category list.
pub fn category(mode: PatchMode, model: KorgModel, id: i32) -> Result<(i32, String), PCGError> {
    let (regular, triton_combi) = usize::try_from(id).ok()
        .and_then(|i| CATEGORY_NAMES.get(i))
        .ok_or(PCGError::UnknownCategory(id))?;
    let name = if mode == PatchMode::Combi && model != KorgModel::TritonExtreme { triton_combi } else { regular };
    Ok((id, format!("{:<16}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_letters() {
        assert_eq!(letter_for_bank_id(0x8000), Some("F"));
        assert_eq!(letter_for_bank_id(0x20006), Some("N"));
        assert_eq!(letter_for_bank_id(0x7), None);
        assert_eq!(letter_for_program_bank(16), Some("g(d)"));
        assert_eq!(short_id_for_letter("H"), Some(17));
        assert_eq!(regular_id(17), Some(7));
        assert_eq!(regular_id(9), None);
        assert!(is_gm_bank(6) && is_gm_bank(16));
        assert!(!is_gm_bank(5) && !is_gm_bank(17));
    }

    #[test]
    fn test_vst_numbering() {
        assert_eq!(vst_bank_number(PatchMode::Program, "A", KorgModel::TritonExtreme).unwrap(), 23);
        assert_eq!(vst_bank_number(PatchMode::Program, "D", KorgModel::Triton).unwrap(), 28);
        assert_eq!(vst_bank_number(PatchMode::Combi, "B", KorgModel::TritonExtreme).unwrap(), 13);
        assert_eq!(vst_bank_number(PatchMode::Combi, "C", KorgModel::Karma).unwrap(), 16);
        assert!(vst_bank_number(PatchMode::Combi, "E", KorgModel::Karma).is_err());
        assert_eq!(vst_program_bank_name(2, KorgModel::TritonExtreme).unwrap(), "C");
        assert_eq!(vst_program_bank_name(6, KorgModel::Triton).unwrap(), "INT-GM");
        assert!(matches!(vst_program_bank_name(40, KorgModel::Triton), Err(PCGError::UnknownBank(40))));
    }

    #[test]
    fn test_categories() {
        assert_eq!(category(PatchMode::Program, KorgModel::Triton, 4).unwrap(), (4, "Vocal/Airy      ".to_string()));
        assert_eq!(category(PatchMode::Combi, KorgModel::Triton, 13).unwrap().1, "Complex & SE    ");
        assert_eq!(category(PatchMode::Combi, KorgModel::TritonExtreme, 13).unwrap().1, "SE              ");
        assert_eq!(category(PatchMode::Combi, KorgModel::Karma, 14).unwrap().1.len(), 16);
        assert!(matches!(category(PatchMode::Program, KorgModel::Triton, 16), Err(PCGError::UnknownCategory(16))));
        assert!(category(PatchMode::Program, KorgModel::Triton, -1).is_err());
    }
}
