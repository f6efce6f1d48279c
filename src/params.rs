//! Name-addressed parameter lists and the templates they are cloned from.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::banks::PatchMode;
use crate::dtype::PCGError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub index: i32,
    pub key: String,
    pub value: i32,
}

/// A parameter as it appears in a patch file's `dsp_settings` array.
pub type DspSetting = Param;

/// Every parameter of one preset, in template index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamList {
    params: IndexMap<String, Param>,
}
impl ParamList {
    pub fn new() -> ParamList {
        ParamList::default()
    }

    /// Builds a list from settings in any order. A key listed twice keeps its last value.
    pub fn from_settings(mut settings: Vec<DspSetting>) -> ParamList {
        settings.sort_by_key(|s| s.index);
        let mut list = ParamList::new();
        for setting in settings {
            list.params.insert(setting.key.clone(), setting);
        }
        list
    }

    /// Appends `key` with the next free index. Existing keys are left alone.
    pub fn push(&mut self, key: String, value: i32) {
        let index = self.params.len() as i32;
        self.params.entry(key.clone()).or_insert(Param { index, key, value });
    }

    pub fn get(&self, key: &str) -> Result<i32, PCGError> {
        self.params.get(key)
            .map(|p| p.value)
            .ok_or_else(|| PCGError::MissingParameter(key.to_string()))
    }

    pub fn set(&mut self, key: &str, value: i32) -> Result<(), PCGError> {
        let param = self.params.get_mut(key).ok_or_else(|| PCGError::MissingParameter(key.to_string()))?;
        param.value = value;
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.values()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_settings(&self) -> Vec<DspSetting> {
        self.params.values().cloned().collect()
    }
}

#[derive(Deserialize)]
struct TemplateFile {
    dsp_settings: Vec<DspSetting>,
}

/// The full parameter universe of one patch mode, with neutral values. Every conversion starts
/// from a fresh copy.
#[derive(Debug, Clone)]
pub struct Template {
    pub mode: PatchMode,
    pub params: ParamList,
}
impl Template {
    pub fn from_json(mode: PatchMode, json: &str) -> Result<Template, PCGError> {
        let file: TemplateFile = serde_json::from_str(json)?;
        if file.dsp_settings.is_empty() {
            return Err(PCGError::Invalid(format!("{} template has no dsp_settings", mode)));
        }
        Ok(Template { mode, params: ParamList::from_settings(file.dsp_settings) })
    }

    pub fn load<P: AsRef<Path>>(mode: PatchMode, path: P) -> Result<Template, PCGError> {
        let json = std::fs::read_to_string(path)?;
        Template::from_json(mode, &json)
    }

    /// Builds a template holding every key the converter can write, all set to 0.
    pub fn synthesize(mode: PatchMode) -> Template {
        let mut params = ParamList::new();
        for key in crate::convert::parameter_keys(mode) {
            params.push(key, 0);
        }
        Template { mode, params }
    }

    pub fn fresh(&self) -> ParamList {
        self.params.clone()
    }
}
