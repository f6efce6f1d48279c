//! Bit-exact reads and writes of the packed integer fields found in PCG records.
//!
//! A field is made of one to three byte-local bit ranges. The first range holds the most
//! significant bits, every following range is appended below it, and sign extension (when the
//! field is signed) happens once over the combined width.

use crate::dtype::PCGError;

/// Inclusive bit range inside one byte, bit 0 being the least significant bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRange {
    pub offset: usize,
    pub bit_start: u8,
    pub bit_end: u8,
}
impl BitRange {
    pub const fn new(offset: usize, bit_start: u8, bit_end: u8) -> BitRange {
        BitRange { offset, bit_start, bit_end }
    }
    pub fn width(&self) -> u32 {
        (self.bit_end as u32 + 1).saturating_sub(self.bit_start as u32)
    }
    fn mask(&self) -> u32 {
        (1 << self.width()) - 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Value recoding applied by the conversion engine after a field is decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    None,
    /// Internal multisample bank index to the external bank numbering
    OscBank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub primary: BitRange,
    pub secondary: Option<BitRange>,
    pub tertiary: Option<BitRange>,
    pub signedness: Signedness,
    pub transform: Transform,
}

/// Signed single-part field, the most common layout in the tables.
pub const fn field(name: &'static str, offset: usize, bit_start: u8, bit_end: u8) -> FieldDescriptor {
    FieldDescriptor {
        name,
        primary: BitRange::new(offset, bit_start, bit_end),
        secondary: None,
        tertiary: None,
        signedness: Signedness::Signed,
        transform: Transform::None,
    }
}

impl FieldDescriptor {
    pub const fn unsigned(mut self) -> FieldDescriptor {
        self.signedness = Signedness::Unsigned;
        self
    }
    pub const fn with_lsb(mut self, offset: usize, bit_start: u8, bit_end: u8) -> FieldDescriptor {
        self.secondary = Some(BitRange::new(offset, bit_start, bit_end));
        self
    }
    pub const fn with_third(mut self, offset: usize, bit_start: u8, bit_end: u8) -> FieldDescriptor {
        self.tertiary = Some(BitRange::new(offset, bit_start, bit_end));
        self
    }
    pub const fn bank_remap(mut self) -> FieldDescriptor {
        self.transform = Transform::OscBank;
        self
    }

    /// Copy of this descriptor with every part moved `base` bytes further into the record.
    pub fn shifted(&self, base: usize) -> FieldDescriptor {
        let shift = |r: BitRange| BitRange { offset: r.offset + base, ..r };
        FieldDescriptor {
            primary: shift(self.primary),
            secondary: self.secondary.map(shift),
            tertiary: self.tertiary.map(shift),
            ..*self
        }
    }

    /// Parts from most to least significant.
    pub fn parts(&self) -> impl DoubleEndedIterator<Item = BitRange> {
        std::iter::once(self.primary).chain(self.secondary).chain(self.tertiary)
    }

    pub fn width(&self) -> u32 {
        self.parts().map(|r| r.width()).sum()
    }

    /// Highest byte offset touched by this field.
    pub fn last_offset(&self) -> usize {
        self.parts().map(|r| r.offset).max().unwrap_or(self.primary.offset)
    }
}

/// Checks a table entry once, when its table is loaded.
pub fn validate(field: &FieldDescriptor) -> Result<(), PCGError> {
    let invalid = |reason: String| PCGError::InvalidDescriptor { name: field.name, reason };
    if field.name.is_empty() {
        return Err(invalid("empty parameter name".to_string()));
    }
    if field.secondary.is_none() && field.tertiary.is_some() {
        return Err(invalid("third part without a second part".to_string()));
    }
    for part in field.parts() {
        if part.bit_end < part.bit_start {
            return Err(invalid(format!("bit range {}-{} at byte {} is reversed", part.bit_start, part.bit_end, part.offset)));
        }
        if part.bit_end > 7 {
            return Err(invalid(format!("bit {} does not exist in byte {}", part.bit_end, part.offset)));
        }
    }
    let width = field.width();
    if width > 16 {
        return Err(invalid(format!("{} bits is wider than 16", width)));
    }
    if field.signedness == Signedness::Signed && !sign_extension_supported(width) {
        return Err(PCGError::UnsupportedWidth { name: field.name, width });
    }
    Ok(())
}

fn sign_extension_supported(width: u32) -> bool {
    matches!(width, 1..=13 | 16)
}

/// Sign-extends the low `width` bits of `value`. Single-bit flags are left untouched.
pub fn sign_extend(value: u32, width: u32, name: &'static str) -> Result<i32, PCGError> {
    match width {
        1 => Ok(value as i32),
        2..=13 | 16 => {
            let shift = 32 - width;
            Ok(((value << shift) as i32) >> shift)
        }
        _ => Err(PCGError::UnsupportedWidth { name, width }),
    }
}

pub fn read_field(buffer: &[u8], field: &FieldDescriptor) -> Result<i32, PCGError> {
    let mut value: u32 = 0;
    for part in field.parts() {
        let byte = *buffer.get(part.offset).ok_or(PCGError::FieldOutOfBounds {
            name: field.name,
            offset: part.offset,
            len: buffer.len(),
        })?;
        value = (value << part.width()) | ((byte as u32 >> part.bit_start) & part.mask());
    }
    match field.signedness {
        Signedness::Unsigned => Ok(value as i32),
        Signedness::Signed => sign_extend(value, field.width(), field.name),
    }
}

/// Inverse of [`read_field`]. Bits are OR-merged, so the record must be zeroed before the first
/// field is written into it.
pub fn write_field(buffer: &mut [u8], field: &FieldDescriptor, value: i32) -> Result<(), PCGError> {
    let len = buffer.len();
    let mut remaining = value as u32;
    for part in field.parts().rev() {
        let byte = buffer.get_mut(part.offset).ok_or(PCGError::FieldOutOfBounds {
            name: field.name,
            offset: part.offset,
            len,
        })?;
        *byte |= ((remaining & part.mask()) << part.bit_start) as u8;
        remaining >>= part.width();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn descriptor_of_width(width: u8, signedness: Signedness) -> FieldDescriptor {
        let mut d = if width <= 8 {
            field("test", 1, 8 - width, 7)
        } else {
            field("test", 1, 0, width - 9).with_lsb(2, 0, 7)
        };
        d.signedness = signedness;
        d
    }

    #[test]
    fn test_round_trip_every_supported_width() {
        for width in (2..=13).chain(std::iter::once(16)) {
            let signed = descriptor_of_width(width, Signedness::Signed);
            let unsigned = descriptor_of_width(width, Signedness::Unsigned);
            validate(&signed).unwrap();
            let min = -(1i32 << (width - 1));
            let max = (1i32 << (width - 1)) - 1;
            for v in [min, min + 1, -1, 0, 1, max - 1, max] {
                let mut buf = [0u8; 4];
                write_field(&mut buf, &signed, v).unwrap();
                assert_eq!(read_field(&buf, &signed).unwrap(), v, "signed width {}", width);
            }
            for v in [0, 1, (1i32 << width) - 1] {
                let mut buf = [0u8; 4];
                write_field(&mut buf, &unsigned, v).unwrap();
                assert_eq!(read_field(&buf, &unsigned).unwrap(), v, "unsigned width {}", width);
            }
        }
    }

    #[test]
    fn test_odd_width_sign_extension() {
        let d = field("three", 0, 2, 4);
        assert_eq!(read_field(&[0b101 << 2], &d).unwrap(), -3);
        assert_eq!(read_field(&[0b011 << 2], &d).unwrap(), 3);
        assert_eq!(read_field(&[0b101 << 2], &d.unsigned()).unwrap(), 5);
    }

    #[test]
    fn test_single_bit_flag_is_not_extended() {
        let d = field("flag", 0, 6, 6);
        assert_eq!(read_field(&[0x40], &d).unwrap(), 1);
    }

    #[test]
    fn test_full_byte_signed() {
        let d = field("byte", 0, 0, 7);
        assert_eq!(read_field(&[0xFF], &d).unwrap(), -1);
        assert_eq!(read_field(&[0x80], &d).unwrap(), -128);
        assert_eq!(read_field(&[0xFF], &d.unsigned()).unwrap(), 255);
    }

    #[test]
    fn test_two_part_assembly() {
        // 7 bits from byte 0, 8 bits from byte 1
        let d = field("sample", 0, 0, 6).with_lsb(1, 0, 7).unsigned();
        let buf = [0b0000_0011, 0b1000_0001];
        assert_eq!(read_field(&buf, &d).unwrap(), (3 << 8) | 0x81);
    }

    #[test]
    fn test_three_part_assembly() {
        let d = field("wide", 0, 0, 1).with_lsb(1, 4, 7).with_third(2, 0, 2).unsigned();
        let buf = [0b10, 0b1011_0000, 0b101];
        let expected = (((0b10 << 4) | 0b1011) << 3) | 0b101;
        assert_eq!(read_field(&buf, &d).unwrap(), expected);

        let mut packed = [0u8; 3];
        write_field(&mut packed, &d, expected).unwrap();
        assert_eq!(packed, buf);
    }

    #[test]
    fn test_multi_part_signed_extends_over_total_width() {
        // 2 + 4 bits, signed, all ones: -1
        let d = field("gain", 0, 0, 1).with_lsb(1, 4, 7);
        assert_eq!(read_field(&[0b11, 0xF0], &d).unwrap(), -1);
        // MSB part alone would look negative in a signed byte read, combined value is positive
        let d = field("adjust", 0, 0, 7).with_lsb(1, 7, 7);
        assert_eq!(read_field(&[0x3F, 0x80], &d).unwrap(), 0x7F);
    }

    #[test]
    fn test_write_merges_with_neighbours() {
        let low = field("low", 0, 0, 3).unsigned();
        let high = field("high", 0, 4, 7).unsigned();
        let mut buf = [0u8; 1];
        write_field(&mut buf, &low, 0xA).unwrap();
        write_field(&mut buf, &high, 0x5).unwrap();
        assert_eq!(buf, [0x5A]);
        assert_eq!(read_field(&buf, &low).unwrap(), 0xA);
        assert_eq!(read_field(&buf, &high).unwrap(), 0x5);
    }

    #[test]
    fn test_out_of_bounds() {
        let d = field("far", 4, 0, 7);
        assert!(matches!(read_field(&[0; 4], &d), Err(PCGError::FieldOutOfBounds { offset: 4, .. })));
        assert!(matches!(write_field(&mut [0; 2], &d, 1), Err(PCGError::FieldOutOfBounds { .. })));
    }

    #[test]
    fn test_unsupported_widths() {
        assert!(matches!(sign_extend(0, 14, "x"), Err(PCGError::UnsupportedWidth { width: 14, .. })));
        assert!(matches!(sign_extend(0, 15, "x"), Err(PCGError::UnsupportedWidth { width: 15, .. })));
        let d = field("fifteen", 0, 0, 6).with_lsb(1, 0, 7);
        assert!(matches!(read_field(&[0, 0], &d), Err(PCGError::UnsupportedWidth { .. })));
        assert!(validate(&d).is_err());
        assert!(validate(&d.unsigned()).is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let d = field("reversed", 333, 1, 0);
        assert!(matches!(validate(&d), Err(PCGError::InvalidDescriptor { .. })));
        assert!(validate(&field("bad_bit", 0, 3, 8)).is_err());
        assert!(validate(&field("", 0, 0, 7)).is_err());
    }

    #[test]
    fn test_shifted() {
        let d = field("tune", 264, 0, 7).with_lsb(265, 0, 7).shifted(154);
        assert_eq!(d.primary.offset, 418);
        assert_eq!(d.secondary.map(|r| r.offset), Some(419));
        assert_eq!(d.last_offset(), 419);
        assert_eq!(d.width(), 16);
    }
}
