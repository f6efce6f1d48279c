use std::fmt::Display;
use std::io::{Read, Seek, Write};

use thiserror::Error;

use crate::bank::KorgModel;

#[macro_export]
macro_rules! read_n_bytes {
    ($file:ident, $n:literal) => {{
        let mut buf: [u8; $n] = [0; $n];
        $file.read_exact(&mut buf).map(|_| buf)
    }};
}

/// Four raw bytes naming a chunk. Compared byte for byte, only ever printed for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tag(pub [u8; 4]);
impl Tag {
    pub const PCG1: Tag = Tag(*b"PCG1");
    pub const PRG1: Tag = Tag(*b"PRG1"); // Program banks container
    pub const PBK1: Tag = Tag(*b"PBK1");
    pub const MBK1: Tag = Tag(*b"MBK1"); // MOSS banks, stored next to the programs
    pub const CMB1: Tag = Tag(*b"CMB1");
    pub const CBK1: Tag = Tag(*b"CBK1");
    pub const DKT1: Tag = Tag(*b"DKT1");
    pub const DBK1: Tag = Tag(*b"DBK1");
    pub const ARP1: Tag = Tag(*b"ARP1");
    pub const ABK1: Tag = Tag(*b"ABK1");
    pub const GLB1: Tag = Tag(*b"GLB1");
    pub const CSM1: Tag = Tag(*b"CSM1"); // Triton keyboard
    pub const DIV1: Tag = Tag(*b"DIV1"); // Triton rack

    pub fn from_slice(bytes: &[u8]) -> Option<Tag> {
        Some(Tag(bytes.get(..4)?.try_into().ok()?))
    }
}
impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.0 {
            if b.is_ascii_graphic() || b == b' ' {
                write!(f, "{}", b as char)?;
            } else {
                write!(f, "\\x{:02X}", b)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum PCGError {
    #[error("Not a valid PCG (bad header)")]
    BadHeader,
    #[error("Not a valid PCG (bad root chunk \"{0}\")")]
    BadRootTag(Tag),
    #[error("Not a valid PCG (incorrect size: header says {declared} bytes, {actual} bytes follow)")]
    SizeMismatch { declared: u32, actual: usize },
    #[error("Not a valid PCG (empty PCG?)")]
    EmptyPCG,
    #[error("Bank \"{tag}\" is too short to hold its header ({len} bytes)")]
    TruncatedBank { tag: Tag, len: usize },
    #[error("Bank \"{tag}\" declares {count} items of {recordsize} bytes but only holds {len} bytes")]
    BankOverrun { tag: Tag, count: u32, recordsize: u32, len: usize },
    #[error("Field \"{name}\" reaches byte {offset} of a {len}-byte record")]
    FieldOutOfBounds { name: &'static str, offset: usize, len: usize },
    #[error("Field \"{name}\" is {width} bits wide, sign extension is not supported for that width")]
    UnsupportedWidth { name: &'static str, width: u32 },
    #[error("Invalid field descriptor \"{name}\": {reason}")]
    InvalidDescriptor { name: &'static str, reason: String },
    #[error("Parameter \"{0}\" is not part of the template")]
    MissingParameter(String),
    #[error("Factory PCG is a {found} file, expected {expected}")]
    FactoryModelMismatch { expected: KorgModel, found: KorgModel },
    #[error("Unknown category {0}")]
    UnknownCategory(i32),
    #[error("Unknown bank id {0:#X}")]
    UnknownBank(i64),
    #[error("{0}")]
    Invalid(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

/// Problems that do not stop a preset from being converted. They are logged when raised and
/// handed back with the conversion so batch tools can report them next to the output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionWarning {
    #[error("no {category} in this PCG, defaulting to the factory PCG")]
    FactoryFallback { category: &'static str },
    #[error("couldn't locate GM program for timbre {timbre}: {bank}:{program}")]
    MissingGMProgram { timbre: usize, bank: i32, program: i32 },
    #[error("unknown bank/program for timbre {timbre}: {bank}:{program}")]
    UnresolvedTimbre { timbre: usize, bank: i32, program: i32 },
    #[error("couldn't find arp. pattern {0}")]
    UnresolvedArpeggio(i32),
    #[error("couldn't find user drum kit {0}")]
    UnresolvedDrumKit(i32),
    #[error("factory PCG doesn't contain any {0}")]
    NoFactoryData(&'static str),
    #[error("unhandled effect {0}")]
    UnhandledEffect(i32),
    #[error("unhandled bank (RAM) for {0}")]
    UnhandledOscBank(String),
}

pub trait ReadWrite {
    fn write_to_file<W: Write>(&self, writer: &mut W) -> Result<usize, PCGError>;
    fn read_from_file<R: Read + Seek>(&mut self, reader: &mut R) -> Result<(), PCGError>;
}
