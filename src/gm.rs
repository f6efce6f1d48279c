//! General MIDI programs. The instrument keeps them in ROM, so a combination referencing a GM
//! bank has to be resolved against a separate dump of those programs.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::bank::NAME_LEN;
use crate::banks::{short_id_for_letter, GM_BANK};
use crate::deserialize_with::latin1_decode;
use crate::dtype::PCGError;
use crate::tables::{DRUMKIT_SIZE, PROGRAM_SIZE};

/// Drum kits are stored with their full kit data, every other GM program as a plain program.
const DRUM_KIT_NAMES: [&str; 9] = ["STANDARD", "ROOM", "POWER", "ELECTRONIC", "ANALOG", "JAZZ", "BRUSH", "ORCHESTRA", "SFX"];

/// One line of the GM index: which bank slot a named factory program occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GmIndexEntry {
    pub bank: String,
    /// 1-based program number
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GmEntry {
    pub bank: i32,
    pub program: i32,
    pub offset: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct GmTable {
    pub data: Vec<u8>,
    pub entries: Vec<GmEntry>,
}

fn trim_name(name: &str) -> &str {
    name.trim_end_matches(' ')
}

impl GmTable {
    /// Maps every index entry onto the record with the same name in `data`, a plain
    /// concatenation of program and drum kit records.
    pub fn from_factory(data: Vec<u8>, index: &[GmIndexEntry]) -> Result<GmTable, PCGError> {
        let mut records: Vec<(String, usize, usize)> = Vec::new();
        let mut offset = 0;
        while offset < data.len() {
            let name_end = (offset + NAME_LEN).min(data.len());
            let name = latin1_decode(&data[offset..name_end]);
            let size = if DRUM_KIT_NAMES.contains(&trim_name(&name)) { DRUMKIT_SIZE } else { PROGRAM_SIZE };
            records.push((trim_name(&name).to_string(), offset, size.min(data.len() - offset)));
            offset += size;
        }

        let mut entries = Vec::with_capacity(index.len());
        for info in index {
            let bank = short_id_for_letter(&info.bank)
                .ok_or_else(|| PCGError::Invalid(format!("GM index uses unknown bank \"{}\"", info.bank)))?;
            let name = trim_name(&info.name);
            let (_, offset, len) = records.iter()
                .find(|(n, _, _)| n == name)
                .ok_or_else(|| PCGError::Invalid(format!("GM program \"{}\" is missing from the factory data", name)))?;
            entries.push(GmEntry { bank, program: info.id - 1, offset: *offset, len: *len });
        }
        Ok(GmTable { data, entries })
    }

    pub fn load_factory<P: AsRef<Path>, Q: AsRef<Path>>(data_path: P, index_path: Q) -> Result<GmTable, PCGError> {
        let data = std::fs::read(data_path)?;
        let index: Vec<GmIndexEntry> = serde_json::from_str(&std::fs::read_to_string(index_path)?)?;
        GmTable::from_factory(data, &index)
    }

    /// Reads the packed form written by [`write_packed`].
    pub fn from_packed(bytes: &[u8]) -> Result<GmTable, PCGError> {
        let mut file = Cursor::new(bytes);
        let count = file.read_u8()?;
        let mut table = GmTable::default();
        for _ in 0..count {
            let bank = file.read_u8()? as i32;
            let program = file.read_u8()? as i32;
            let size = file.read_u16::<LittleEndian>()? as usize;
            let mut record = vec![0; size];
            file.read_exact(&mut record)?;
            table.entries.push(GmEntry { bank, program, offset: table.data.len(), len: size });
            table.data.extend_from_slice(&record);
        }
        Ok(table)
    }

    /// Record of `program` in GM bank `bank`. Variation banks without their own copy of the
    /// program fall back to the main GM bank.
    pub fn lookup(&self, bank: i32, program: i32) -> Option<&[u8]> {
        let find = |bank: i32| self.entries.iter().find(|e| e.bank == bank && e.program == program);
        let entry = find(bank).or_else(|| if bank > GM_BANK { find(GM_BANK) } else { None })?;
        self.data.get(entry.offset..entry.offset + entry.len)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Writes `(bank, program, record)` triples in the packed form. Returns the number of bytes
/// written.
pub fn write_packed<W: Write>(programs: &[(u8, u8, Vec<u8>)], writer: &mut W) -> Result<usize, PCGError> {
    let count = u8::try_from(programs.len())
        .map_err(|_| PCGError::Invalid(format!("{} programs do not fit in a packed GM file", programs.len())))?;
    writer.write_u8(count)?;
    let mut written = 1;
    for (bank, program, record) in programs {
        let size = u16::try_from(record.len())
            .map_err(|_| PCGError::Invalid(format!("GM program {}:{} is too large", bank, program)))?;
        writer.write_u8(*bank)?;
        writer.write_u8(*program)?;
        writer.write_u16::<LittleEndian>(size)?;
        writer.write_all(record)?;
        written += 4 + record.len();
    }
    Ok(written)
}
