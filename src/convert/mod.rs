//! Turns program and combination records into flat parameter lists, following their references
//! to arpeggio patterns, drum kits and the programs a combination plays.

mod arpeggiator;
mod combi;
mod drumkit;
pub mod pack;
mod program;
pub mod rules;

use std::sync::atomic::{AtomicBool, Ordering};

use crate::bank::{KorgBank, KorgBanks, KorgPCG, NAME_LEN};
use crate::banks::{PatchMode, USER_BANK_LETTERS};
use crate::context::ConversionContext;
use crate::deserialize_with::latin1_decode;
use crate::dtype::{ConversionWarning, PCGError};
use crate::params::ParamList;
use crate::patch::Timbre;
use crate::tables::combi::{COMBI_COMMON, TIMBRE, TIMBRE_COUNT};
use crate::tables::program::VALVE_COMBI;

pub use pack::pack_program;

pub const PROGRAM_PREFIX: &str = "prog_";
pub const COMBI_PREFIX: &str = "combi_";
pub const PROGRAM_ARP_PREFIX: &str = "prog_user_arp_";
pub const PROGRAM_ARP_PATTERN: &str = "prog_arpeggiator_pattern_no.";

pub fn timbre_prefix(n: usize) -> String {
    format!("combi_timbre_{}_", n)
}

/// The two combination arpeggiators: parameter prefix and the key holding their pattern.
pub fn combi_arpeggiators() -> [(String, String); 2] {
    ["a", "b"].map(|l| (format!("combi_user_arp_{}_", l), format!("combi_arpeggiator_{}_pattern_no.", l)))
}

/// One converted program or combination.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub name: String,
    pub mode: PatchMode,
    pub bank_id: u32,
    pub index: usize,
    pub params: ParamList,
    /// The program each timbre plays, combinations only
    pub timbres: Vec<Timbre>,
    pub warnings: Vec<ConversionWarning>,
}

/// Working state of a single conversion.
pub(crate) struct Job {
    pub params: ParamList,
    pub warnings: Vec<ConversionWarning>,
}
impl Job {
    fn warn(&mut self, warning: ConversionWarning) {
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    fn set(&mut self, key: &str, value: i32) -> Result<(), PCGError> {
        self.params.set(key, value)
    }
}

/// Categories a record can depend on, with the notice shown when they come from the factory PCG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dependency {
    Program,
    Arpeggio,
    DrumKit,
}
impl Dependency {
    fn label(&self) -> &'static str {
        match self {
            Dependency::Program => "programs",
            Dependency::Arpeggio => "user arpeggiator patterns",
            Dependency::DrumKit => "user drum kits",
        }
    }

    fn banks<'p>(&self, pcg: &'p KorgPCG) -> Option<&'p KorgBanks> {
        match self {
            Dependency::Program => pcg.program.as_ref(),
            Dependency::Arpeggio => pcg.arpeggio.as_ref(),
            Dependency::DrumKit => pcg.drumkit.as_ref(),
        }
    }
}

/// Converts the records of one PCG. Several conversions may run at once on the same converter;
/// the fallback notices are still shown once per converter.
pub struct Converter<'a> {
    pcg: &'a KorgPCG,
    ctx: &'a ConversionContext,
    program_notice: AtomicBool,
    arpeggio_notice: AtomicBool,
    drumkit_notice: AtomicBool,
}

impl<'a> Converter<'a> {
    pub fn new(pcg: &'a KorgPCG, ctx: &'a ConversionContext) -> Converter<'a> {
        Converter {
            pcg,
            ctx,
            program_notice: AtomicBool::new(false),
            arpeggio_notice: AtomicBool::new(false),
            drumkit_notice: AtomicBool::new(false),
        }
    }

    fn job(&self, mode: PatchMode) -> Job {
        Job { params: self.ctx.template(mode).fresh(), warnings: Vec::new() }
    }

    fn notice_flag(&self, dependency: Dependency) -> &AtomicBool {
        match dependency {
            Dependency::Program => &self.program_notice,
            Dependency::Arpeggio => &self.arpeggio_notice,
            Dependency::DrumKit => &self.drumkit_notice,
        }
    }

    /// Records a factory fallback, once per converter and category.
    fn factory_notice(&self, job: &mut Job, dependency: Dependency) {
        if !self.notice_flag(dependency).swap(true, Ordering::Relaxed) {
            job.warn(ConversionWarning::FactoryFallback { category: dependency.label() });
            tracing::info!("This message is only printed once.");
        }
    }

    /// Banks to resolve `dependency` against: the current file's when it has that category at
    /// all, else the factory PCG's.
    fn dependency_banks(&self, job: &mut Job, dependency: Dependency) -> Option<&'a KorgBanks> {
        if let Some(banks) = dependency.banks(self.pcg) {
            return Some(banks);
        }
        self.factory_notice(job, dependency);
        let banks = self.ctx.factory.as_ref().and_then(|f| dependency.banks(f));
        if banks.is_none() {
            job.warn(ConversionWarning::NoFactoryData(dependency.label()));
        }
        banks
    }

    pub fn convert_program(&self, bank_id: u32, index: usize, data: &[u8]) -> Result<Conversion, PCGError> {
        let mut job = self.job(PatchMode::Program);
        self.inner_program(&mut job, PROGRAM_PREFIX, data, PatchMode::Program)?;
        self.arpeggiator(&mut job, PROGRAM_ARP_PREFIX, PROGRAM_ARP_PATTERN)?;
        self.drumkit(&mut job, PROGRAM_PREFIX)?;
        rules::apply_program_rules(&mut job.params, PatchMode::Program, PROGRAM_PREFIX)?;
        Ok(Conversion {
            name: record_name(data),
            mode: PatchMode::Program,
            bank_id,
            index,
            params: job.params,
            timbres: Vec::new(),
            warnings: job.warnings,
        })
    }

    /// Converts every item of `bank`, logging each one the way the batch tools report progress.
    pub fn convert_bank(&self, bank: &KorgBank, mode: PatchMode) -> Result<Vec<Conversion>, PCGError> {
        let letter = bank.letter().unwrap_or("?");
        bank.items.iter().enumerate().map(|(index, item)| {
            tracing::info!("{} {}:{:03} {}", mode, letter, index, item.name());
            match mode {
                PatchMode::Program => self.convert_program(bank.bank_id, index, &item.data),
                PatchMode::Combi => self.convert_combination(bank.bank_id, index, &item.data),
            }
        }).collect()
    }

    /// Converts the banks whose letter is in `letters`, in file order, pairing each with the next
    /// free user bank of the host.
    pub fn convert_banks(&self, mode: PatchMode, letters: &[&str]) -> Result<Vec<(&'static str, Vec<Conversion>)>, PCGError> {
        let category = match mode {
            PatchMode::Program => self.pcg.program.as_ref(),
            PatchMode::Combi => self.pcg.combination.as_ref(),
        };
        let selected: Vec<&KorgBank> = category.iter()
            .flat_map(|c| c.banks.iter())
            .filter(|b| b.letter().map_or(false, |l| letters.contains(&l)))
            .collect();
        if selected.len() > USER_BANK_LETTERS.len() {
            tracing::warn!("{} {} banks selected, only the first {} are converted", selected.len(), mode, USER_BANK_LETTERS.len());
        }
        selected.into_iter()
            .zip(USER_BANK_LETTERS)
            .map(|(bank, target)| Ok((target, self.convert_bank(bank, mode)?)))
            .collect()
    }
}

pub fn record_name(data: &[u8]) -> String {
    latin1_decode(&data[..NAME_LEN.min(data.len())])
}

/// Every key the converter writes for `mode`, in the order a synthesized template lists them.
pub fn parameter_keys(mode: PatchMode) -> Vec<String> {
    let mut keys = Vec::new();
    match mode {
        PatchMode::Program => {
            program::inner_program_keys(PROGRAM_PREFIX, PatchMode::Program, &mut keys);
            rules::template_only_keys(PatchMode::Program, PROGRAM_PREFIX, &mut keys);
            arpeggiator::keys(PROGRAM_ARP_PREFIX, &mut keys);
            drumkit::keys(PROGRAM_PREFIX, &mut keys);
        }
        PatchMode::Combi => {
            keys.extend(COMBI_COMMON.iter().map(|f| f.name.to_string()));
            program::shared_keys(COMBI_PREFIX, &mut keys);
            keys.extend(VALVE_COMBI.iter().map(|f| format!("{}{}", COMBI_PREFIX, f.name)));
            rules::template_only_keys(PatchMode::Combi, COMBI_PREFIX, &mut keys);
            for n in 1..=TIMBRE_COUNT {
                keys.extend(TIMBRE.iter().map(|f| format!("{}{}", timbre_prefix(n), f.name)));
            }
            for n in 1..=TIMBRE_COUNT {
                let prefix = timbre_prefix(n);
                program::inner_program_keys(&prefix, PatchMode::Combi, &mut keys);
                rules::template_only_keys(PatchMode::Combi, &prefix, &mut keys);
                drumkit::keys(&prefix, &mut keys);
            }
            for (prefix, _) in combi_arpeggiators() {
                arpeggiator::keys(&prefix, &mut keys);
            }
        }
    }
    keys
}
