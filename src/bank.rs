use std::fs;
use std::io::{Read, Seek, Write};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::banks;
use crate::chunk::{parse_root, Chunk};
use crate::deserialize_with::latin1_decode;
use crate::dtype::{PCGError, ReadWrite, Tag};
use crate::tables::DRUMKIT_SIZE;

pub const HEADER_LEN: usize = 16;
/// Preset names occupy the first 16 bytes of program and combination records.
pub const NAME_LEN: usize = 16;
const BANK_HEADER_LEN: usize = 12;
/// Drum kits are the largest records any bank holds.
const MAX_RECORD_SIZE: u32 = DRUMKIT_SIZE as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum KorgModel {
    Triton,
    Karma,
    TritonExtreme,
    TritonLe,
}
impl KorgModel {
    pub fn header(&self) -> [u8; HEADER_LEN] {
        let mut header = [0; HEADER_LEN];
        header[..4].copy_from_slice(b"KORG");
        match self {
            KorgModel::Triton => { header[4] = 0x50; header[7] = 1; }
            KorgModel::Karma => { header[4] = 0x5D; }
            KorgModel::TritonExtreme => { header[4] = 0x50; header[7] = 1; header[8] = 1; }
            KorgModel::TritonLe => { header[4] = 0x63; }
        }
        header
    }
    pub fn from_header(bytes: &[u8]) -> Result<KorgModel, PCGError> {
        let header = bytes.get(..HEADER_LEN).ok_or(PCGError::BadHeader)?;
        KorgModel::iter().find(|m| m.header() == header).ok_or(PCGError::BadHeader)
    }
    /// Only the Triton Extreme stores valve force settings.
    pub fn has_valve_force(&self) -> bool {
        *self == KorgModel::TritonExtreme
    }
}

/// One fixed-size record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KorgItem {
    pub data: Vec<u8>,
}
impl KorgItem {
    /// Copies `source` into a zero-padded record of `recordsize` bytes.
    pub fn new(recordsize: usize, source: &[u8]) -> KorgItem {
        let mut data = vec![0; recordsize];
        let n = source.len().min(recordsize);
        data[..n].copy_from_slice(&source[..n]);
        KorgItem { data }
    }
    pub fn name(&self) -> String {
        latin1_decode(&self.data[..NAME_LEN.min(self.data.len())])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KorgBank {
    pub tag: Tag,
    pub bank_id: u32,
    pub recordsize: u32,
    pub items: Vec<KorgItem>,
}
impl KorgBank {
    pub fn new(tag: Tag, bank_id: u32, recordsize: u32, items: Vec<KorgItem>) -> KorgBank {
        KorgBank { tag, bank_id, recordsize, items }
    }

    /// Reads the `(count, recordsize, bank id)` header and materializes the items that follow.
    pub fn from_chunk(chunk: &Chunk) -> Result<KorgBank, PCGError> {
        let payload = chunk.data;
        if payload.len() < BANK_HEADER_LEN {
            return Err(PCGError::TruncatedBank { tag: chunk.tag, len: payload.len() });
        }
        let count = BigEndian::read_u32(&payload[0..4]);
        let recordsize = BigEndian::read_u32(&payload[4..8]);
        let bank_id = BigEndian::read_u32(&payload[8..12]);
        let body = &payload[BANK_HEADER_LEN..];

        // The last item may be short and gets padded, anything before it must be present.
        let overrun = count > 0 && (recordsize == 0
            || recordsize > MAX_RECORD_SIZE
            || (count as u64 - 1) * recordsize as u64 >= body.len() as u64);
        if overrun {
            return Err(PCGError::BankOverrun { tag: chunk.tag, count, recordsize, len: body.len() });
        }

        let rs = recordsize as usize;
        let items = (0..count as usize)
            .map(|i| {
                let start = i * rs;
                KorgItem::new(rs, &body[start..(start + rs).min(body.len())])
            })
            .collect();
        Ok(KorgBank { tag: chunk.tag, bank_id, recordsize, items })
    }

    pub fn letter(&self) -> Option<&'static str> {
        banks::letter_for_bank_id(self.bank_id as i64)
    }

    fn write_payload<W: Write>(&self, writer: &mut W) -> Result<usize, PCGError> {
        writer.write_u32::<BigEndian>(self.items.len() as u32)?;
        writer.write_u32::<BigEndian>(self.recordsize)?;
        writer.write_u32::<BigEndian>(self.bank_id)?;
        let mut bytes_written = BANK_HEADER_LEN;
        for item in &self.items {
            writer.write_all(&item.data)?;
            bytes_written += item.data.len();
        }
        Ok(bytes_written)
    }
}

/// Banks of one category, in the order the container listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KorgBanks {
    pub banks: Vec<KorgBank>,
}
impl KorgBanks {
    pub fn find_by_letter(&self, letter: &str) -> Option<&KorgBank> {
        self.banks.iter().find(|b| b.letter() == Some(letter))
    }

    /// Addresses an item across all banks by subtracting each bank's item count in turn.
    pub fn locate(&self, index: usize) -> Option<(&KorgBank, usize)> {
        let mut remaining = index;
        for bank in &self.banks {
            if remaining < bank.items.len() {
                return Some((bank, remaining));
            }
            remaining -= bank.items.len();
        }
        None
    }

    pub fn item_count(&self) -> usize {
        self.banks.iter().map(|b| b.items.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KorgBlock {
    pub tag: Tag,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KorgPCG {
    pub model: KorgModel,
    pub program: Option<KorgBanks>,
    pub moss: Option<KorgBanks>,
    pub combination: Option<KorgBanks>,
    pub drumkit: Option<KorgBanks>,
    pub arpeggio: Option<KorgBanks>,
    pub csm1: Option<KorgBlock>,
    pub div1: Option<KorgBlock>,
    pub global: Option<KorgBlock>,
}

impl KorgPCG {
    pub fn new(model: KorgModel) -> KorgPCG {
        KorgPCG {
            model,
            program: None,
            moss: None,
            combination: None,
            drumkit: None,
            arpeggio: None,
            csm1: None,
            div1: None,
            global: None,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<KorgPCG, PCGError> {
        KorgPCG::from_bytes(&fs::read(path)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<KorgPCG, PCGError> {
        let model = KorgModel::from_header(bytes)?;
        let root = parse_root(&bytes[HEADER_LEN..])?;
        KorgPCG::build(model, &root)
    }

    /// Materializes the typed banks and blocks from a parsed root chunk.
    pub fn build(model: KorgModel, root: &Chunk) -> Result<KorgPCG, PCGError> {
        let mut pcg = KorgPCG::new(model);
        for section in &root.children {
            match section.tag {
                Tag::PRG1 | Tag::CMB1 | Tag::DKT1 | Tag::ARP1 => {
                    for bank_chunk in &section.children {
                        let slot = match bank_chunk.tag {
                            Tag::PBK1 => &mut pcg.program,
                            Tag::MBK1 => &mut pcg.moss,
                            Tag::CBK1 => &mut pcg.combination,
                            Tag::DBK1 => &mut pcg.drumkit,
                            Tag::ABK1 => &mut pcg.arpeggio,
                            other => {
                                tracing::warn!("[{}] Unknown tag \"{}\"", section.tag, other);
                                continue;
                            }
                        };
                        let bank = KorgBank::from_chunk(bank_chunk)?;
                        tracing::debug!("[{}] bank {:#X}: {} items of {} bytes", bank_chunk.tag, bank.bank_id, bank.items.len(), bank.recordsize);
                        slot.get_or_insert_with(KorgBanks::default).banks.push(bank);
                    }
                }
                Tag::CSM1 | Tag::DIV1 | Tag::GLB1 => {
                    if !section.is_leaf() {
                        continue;
                    }
                    let block = Some(KorgBlock { tag: section.tag, data: section.data.to_vec() });
                    match section.tag {
                        Tag::CSM1 => pcg.csm1 = block,
                        Tag::DIV1 => pcg.div1 = block,
                        _ => pcg.global = block,
                    }
                }
                other => tracing::warn!("Unknown tag \"{}\" in PCG root", other),
            }
        }
        Ok(pcg)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PCGError> {
        let mut out = Vec::new();
        self.write_to_file(&mut out)?;
        Ok(out)
    }
}

fn write_chunk<W: Write>(writer: &mut W, tag: Tag, payload: &[u8]) -> Result<usize, PCGError> {
    writer.write_all(&tag.0)?;
    writer.write_u32::<BigEndian>(payload.len() as u32)?;
    writer.write_all(payload)?;
    Ok(8 + payload.len())
}

fn write_container<W: Write>(writer: &mut W, tag: Tag, categories: &[(Tag, &Option<KorgBanks>)]) -> Result<usize, PCGError> {
    let mut payload = Vec::new();
    for (bank_tag, banks) in categories {
        for bank in banks.iter().flat_map(|b| b.banks.iter()) {
            let mut bank_payload = Vec::new();
            bank.write_payload(&mut bank_payload)?;
            write_chunk(&mut payload, *bank_tag, &bank_payload)?;
        }
    }
    if payload.is_empty() {
        return Ok(0);
    }
    write_chunk(writer, tag, &payload)
}

impl ReadWrite for KorgPCG {
    fn write_to_file<W: Write>(&self, writer: &mut W) -> Result<usize, PCGError> {
        let mut body = Vec::new();
        write_container(&mut body, Tag::PRG1, &[(Tag::PBK1, &self.program), (Tag::MBK1, &self.moss)])?;
        write_container(&mut body, Tag::CMB1, &[(Tag::CBK1, &self.combination)])?;
        write_container(&mut body, Tag::DKT1, &[(Tag::DBK1, &self.drumkit)])?;
        write_container(&mut body, Tag::ARP1, &[(Tag::ABK1, &self.arpeggio)])?;
        for block in [&self.csm1, &self.div1, &self.global].into_iter().flatten() {
            write_chunk(&mut body, block.tag, &block.data)?;
        }

        writer.write_all(&self.model.header())?;
        let bytes_written = write_chunk(writer, Tag::PCG1, &body)?;
        Ok(HEADER_LEN + bytes_written)
    }
    fn read_from_file<R: Read + Seek>(&mut self, reader: &mut R) -> Result<(), PCGError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        *self = KorgPCG::from_bytes(&bytes)?;
        Ok(())
    }
}
