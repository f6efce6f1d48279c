use std::io::{Cursor, Read};

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

use crate::dtype::{PCGError, Tag};
use crate::read_n_bytes;

/// Size of a `(tag, size)` chunk header.
pub const CHUNK_HEADER_LEN: usize = 8;

/// One node of the container tree. Nodes borrow their payload from the buffer the root was
/// parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub tag: Tag,
    pub size: u32,
    pub data: &'a [u8],
    pub children: Vec<Chunk<'a>>,
}

impl<'a> Chunk<'a> {
    /// Parses `data` as a sequence of child chunks. The structure is inferred: when the
    /// `(tag, size, payload)` triples do not tile `data` exactly, the chunk is a leaf.
    pub fn parse(tag: Tag, data: &'a [u8]) -> Chunk<'a> {
        let children = match Self::scan(data) {
            Some(spans) if !spans.is_empty() => spans.into_iter()
                .map(|(tag, payload)| Chunk::parse(tag, payload))
                .collect(),
            _ => Vec::new(),
        };
        Chunk { tag, size: data.len() as u32, data, children }
    }

    /// Returns every child span when they consume `data` to the last byte.
    fn scan(data: &'a [u8]) -> Option<Vec<(Tag, &'a [u8])>> {
        let mut spans = Vec::new();
        let mut rest = data;
        while rest.len() >= CHUNK_HEADER_LEN {
            let tag = Tag::from_slice(rest)?;
            let size = BigEndian::read_u32(&rest[4..CHUNK_HEADER_LEN]) as usize;
            let body = &rest[CHUNK_HEADER_LEN..];
            if size > body.len() {
                break;
            }
            spans.push((tag, &body[..size]));
            rest = &body[size..];
        }
        if rest.is_empty() {
            Some(spans)
        } else {
            None
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Bytes this chunk occupies inside its parent, header included.
    pub fn framed_len(&self) -> usize {
        CHUNK_HEADER_LEN + self.data.len()
    }
}

/// Parses the root chunk that follows the 16-byte model header.
pub fn parse_root(bytes: &[u8]) -> Result<Chunk<'_>, PCGError> {
    let mut cursor = Cursor::new(bytes);
    let tag = Tag(read_n_bytes!(cursor, 4).map_err(|_| PCGError::BadRootTag(Tag::default()))?);
    if tag != Tag::PCG1 {
        return Err(PCGError::BadRootTag(tag));
    }
    let declared = cursor.read_u32::<BigEndian>()
        .map_err(|_| PCGError::SizeMismatch { declared: 0, actual: 0 })?;
    let body = &bytes[CHUNK_HEADER_LEN..];
    if declared as usize != body.len() {
        return Err(PCGError::SizeMismatch { declared, actual: body.len() });
    }
    let root = Chunk::parse(tag, body);
    if root.is_leaf() {
        return Err(PCGError::EmptyPCG);
    }
    Ok(root)
}
