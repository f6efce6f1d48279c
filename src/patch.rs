//! `.patch` files: the JSON form the host loads presets from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bank::KorgModel;
use crate::banks::{category, vst_bank_number, PatchMode};
use crate::convert::Conversion;
use crate::deserialize_with::latin1_name;
use crate::dtype::PCGError;
use crate::params::{DspSetting, ParamList};

pub const PATCH_VERSION: i32 = 1280;
pub const PATCH_EXTENSION: &str = "patch";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timbre {
    pub timbre_name: String,
    pub bank_name: String,
    pub program_number: i32,
}

/// Sound character tags. The instrument has no equivalent, every preset gets the same ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characters {
    pub arp_basic_phrase: i32,
    pub bright_dark: i32,
    pub fast_slow: i32,
    pub mono_poly: i32,
    pub percussive_gate: i32,
    pub pitch_mod_filter_mod: i32,
    #[serde(rename = "type")]
    pub kind: i32,
}
impl Default for Characters {
    fn default() -> Self {
        Characters {
            arp_basic_phrase: 0,
            bright_dark: 1,
            fast_slow: 1,
            mono_poly: 2,
            percussive_gate: 2,
            pitch_mod_filter_mod: 0,
            kind: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    /// All 16 characters of the stored name, trailing spaces included
    #[serde(deserialize_with = "latin1_name")]
    pub name: String,
    pub category: String,
    #[serde(rename = "categoryIndex")]
    pub category_index: i32,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timbres: Option<Vec<Timbre>>,
    pub mode: PatchMode,
    /// Target user bank, `USER-A` to `USER-D`
    pub bank: String,
    pub number: i32,
    pub triton_bank_number: i32,
    pub triton_program_number: i32,
    pub characters: Characters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchFile {
    pub version: i32,
    pub general_program_information: GeneralInfo,
    pub dsp_settings: Vec<DspSetting>,
    pub data_type: String,
}

fn data_type(mode: PatchMode) -> &'static str {
    match mode {
        PatchMode::Program => "program",
        PatchMode::Combi => "combi",
    }
}

fn category_key(mode: PatchMode) -> &'static str {
    match mode {
        PatchMode::Program => "prog_common_category",
        PatchMode::Combi => "combi_category",
    }
}

impl PatchFile {
    /// Wraps a conversion for storage in user bank `target_letter` of a `model` host.
    pub fn from_conversion(conv: &Conversion, target_letter: &str, model: KorgModel) -> Result<PatchFile, PCGError> {
        let (category_index, category) = category(conv.mode, model, conv.params.get(category_key(conv.mode))?)?;
        let number = conv.index as i32;
        let timbres = match conv.mode {
            PatchMode::Program => None,
            PatchMode::Combi => Some(conv.timbres.clone()),
        };
        Ok(PatchFile {
            version: PATCH_VERSION,
            general_program_information: GeneralInfo {
                name: conv.name.clone(),
                category,
                category_index,
                author: String::new(),
                timbres,
                mode: conv.mode,
                bank: format!("USER-{}", target_letter),
                number,
                triton_bank_number: vst_bank_number(conv.mode, target_letter, model)?,
                triton_program_number: number,
                characters: Characters::default(),
            },
            dsp_settings: conv.params.to_settings(),
            data_type: data_type(conv.mode).to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String, PCGError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<PatchFile, PCGError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<PatchFile, PCGError> {
        PatchFile::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn name(&self) -> &str {
        &self.general_program_information.name
    }

    pub fn mode(&self) -> PatchMode {
        self.general_program_information.mode
    }

    pub fn to_param_list(&self) -> ParamList {
        ParamList::from_settings(self.dsp_settings.clone())
    }
}

/// `<output>/<Program|Combi>/USER-X/NNN.patch`
pub fn patch_path<P: AsRef<Path>>(output_folder: P, mode: PatchMode, target_letter: &str, index: usize) -> PathBuf {
    let mut path = output_folder.as_ref().to_path_buf();
    path.push(mode.to_string());
    path.push(format!("USER-{}", target_letter));
    path.push(format!("{:03}.{}", index, PATCH_EXTENSION));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn conversion(mode: PatchMode) -> Conversion {
        let mut params = ParamList::new();
        params.push(category_key(mode).to_string(), 13);
        params.push("prog_osc_1_tune".to_string(), -300);
        Conversion {
            name: "Süß \"Pad\"       ".to_string(),
            mode,
            bank_id: 0,
            index: 7,
            params,
            timbres: vec![Timbre { timbre_name: "Unknown".to_string(), bank_name: "INT-A".to_string(), program_number: 3 }],
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_program_header() {
        let patch = PatchFile::from_conversion(&conversion(PatchMode::Program), "B", KorgModel::Triton).unwrap();
        let info = &patch.general_program_information;
        assert_eq!(info.category, "SE              ");
        assert_eq!(info.category_index, 13);
        assert_eq!(info.bank, "USER-B");
        assert_eq!(info.triton_bank_number, 26);
        assert_eq!(info.number, 7);
        assert_eq!(info.timbres, None);
        assert_eq!(patch.data_type, "program");

        let json: serde_json::Value = serde_json::from_str(&patch.to_json().unwrap()).unwrap();
        let info = &json["general_program_information"];
        assert_eq!(json["version"], 1280);
        assert_eq!(info["categoryIndex"], 13);
        assert_eq!(info["mode"], "Program");
        assert_eq!(info["characters"]["type"], 4);
        assert!(info.get("timbres").is_none());
        assert_eq!(json["dsp_settings"][1]["value"], -300);
    }

    #[test]
    fn test_combi_round_trip() {
        let patch = PatchFile::from_conversion(&conversion(PatchMode::Combi), "D", KorgModel::TritonExtreme).unwrap();
        assert_eq!(patch.general_program_information.category, "SE              ");
        assert_eq!(patch.general_program_information.triton_bank_number, 15);

        let parsed = PatchFile::from_json(&patch.to_json().unwrap()).unwrap();
        assert_eq!(parsed, patch);
        assert_eq!(parsed.name(), "Süß \"Pad\"       ");
        assert_eq!(parsed.to_param_list().get("prog_osc_1_tune").unwrap(), -300);
    }

    #[test]
    fn test_name_outside_latin1_is_rejected() {
        let patch = PatchFile::from_conversion(&conversion(PatchMode::Program), "A", KorgModel::Triton).unwrap();
        let json = patch.to_json().unwrap().replace("Süß", "Süß€");
        assert!(matches!(PatchFile::from_json(&json), Err(PCGError::Json(_))));
    }

    #[test]
    fn test_patch_path() {
        let path = patch_path("out", PatchMode::Combi, "C", 5);
        assert_eq!(path, PathBuf::from("out").join("Combi").join("USER-C").join("005.patch"));
    }
}
