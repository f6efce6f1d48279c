//! Static field descriptor tables for every record type the converter understands.

pub mod arpeggiator;
pub mod combi;
pub mod drumkit;
pub mod effects;
pub mod program;

use crate::bitfield::{validate, FieldDescriptor};
use crate::dtype::PCGError;

pub const PROGRAM_SIZE: usize = 540;
pub const COMBI_SIZE: usize = 448;
pub use drumkit::DRUMKIT_SIZE;

/// Every fixed table, with the label used when reporting a bad entry.
pub fn all_tables() -> Vec<(&'static str, &'static [FieldDescriptor])> {
    let mut tables: Vec<(&'static str, &'static [FieldDescriptor])> = vec![
        ("program common", program::PROGRAM_COMMON),
        ("oscillator", program::OSCILLATOR),
        ("shared effects", program::SHARED),
        ("insert effect", program::IFX),
        ("program valve force", program::VALVE_PROGRAM),
        ("combi valve force", program::VALVE_COMBI),
        ("combi common", combi::COMBI_COMMON),
        ("timbre", combi::TIMBRE),
        ("arpeggio global", arpeggiator::ARP_GLOBAL),
        ("arpeggio step", arpeggiator::ARP_STEP),
        ("drum kit note", drumkit::DRUM_NOTE),
    ];
    tables.extend(effects::EFFECTS.values().map(|t| ("effect", *t)));
    tables
}

/// Checks every descriptor once. Conversion assumes this has passed.
pub fn validate_all() -> Result<(), PCGError> {
    for (label, table) in all_tables() {
        for field in table {
            validate(field).map_err(|e| {
                tracing::error!("Invalid {} table entry: {}", label, e);
                e
            })?;
        }
    }
    Ok(())
}
