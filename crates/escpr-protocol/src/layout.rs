//! Parameter layouts
//!
//! A layout is the ordered list of fixed-width fields that make up a command's
//! parameter block. Multi-byte fields are big-endian. Single unsigned bytes are
//! by far the most common field, so [`Field::byte`] is the default constructor.

use crate::error::ProtocolError;

/// Binary format of a single parameter field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldFormat {
    /// Unsigned byte
    U8,
    /// Big-endian unsigned 16-bit
    U16Be,
    /// Big-endian signed 16-bit
    I16Be,
    /// Big-endian unsigned 32-bit
    U32Be,
    /// Big-endian unsigned 64-bit
    U64Be,
}

impl FieldFormat {
    /// Width of the field in bytes
    pub const fn width(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16Be | Self::I16Be => 2,
            Self::U32Be => 4,
            Self::U64Be => 8,
        }
    }

    /// Read a value from exactly [`width`](Self::width) bytes
    ///
    /// 64-bit fields are carried as the bit pattern of an `i64`.
    pub fn read(self, bytes: &[u8]) -> Option<i64> {
        let value = match self {
            Self::U8 => i64::from(*bytes.first()?),
            Self::U16Be => i64::from(u16::from_be_bytes(bytes.get(..2)?.try_into().ok()?)),
            Self::I16Be => i64::from(i16::from_be_bytes(bytes.get(..2)?.try_into().ok()?)),
            Self::U32Be => i64::from(u32::from_be_bytes(bytes.get(..4)?.try_into().ok()?)),
            Self::U64Be => u64::from_be_bytes(bytes.get(..8)?.try_into().ok()?) as i64,
        };
        Some(value)
    }

    /// Append the big-endian representation of `value`
    ///
    /// Callers validate the range with [`fits`](Self::fits) first; out-of-range
    /// values are truncated to the field width.
    pub fn write(self, value: i64, out: &mut Vec<u8>) {
        match self {
            Self::U8 => out.push(value as u8),
            Self::U16Be => out.extend_from_slice(&(value as u16).to_be_bytes()),
            Self::I16Be => out.extend_from_slice(&(value as i16).to_be_bytes()),
            Self::U32Be => out.extend_from_slice(&(value as u32).to_be_bytes()),
            Self::U64Be => out.extend_from_slice(&(value as u64).to_be_bytes()),
        }
    }

    /// Whether `value` is representable in this format
    pub fn fits(self, value: i64) -> bool {
        match self {
            Self::U8 => u8::try_from(value).is_ok(),
            Self::U16Be => u16::try_from(value).is_ok(),
            Self::I16Be => i16::try_from(value).is_ok(),
            Self::U32Be => u32::try_from(value).is_ok(),
            Self::U64Be => true,
        }
    }

    /// Render a value as `decimal (hex)`
    pub fn render(self, value: i64) -> String {
        match self {
            Self::U64Be => {
                let value = value as u64;
                format!("{} ({:#x})", value, value)
            }
            _ if value < 0 => format!("{} (-{:#x})", value, value.unsigned_abs()),
            _ => format!("{} ({:#x})", value, value),
        }
    }
}

/// A named parameter field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub format: FieldFormat,
}

impl Field {
    /// Unsigned single-byte field
    pub const fn byte(name: &'static str) -> Self {
        Self {
            name,
            format: FieldFormat::U8,
        }
    }

    /// Field with an explicit format
    pub const fn with_format(name: &'static str, format: FieldFormat) -> Self {
        Self { name, format }
    }
}

/// Ordered field layout of a command's parameter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterLayout {
    fields: &'static [Field],
}

impl ParameterLayout {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    pub const fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Sum of all field widths
    pub const fn width(&self) -> usize {
        let mut total = 0;
        let mut i = 0;
        while i < self.fields.len() {
            total += self.fields[i].format.width();
            i += 1;
        }
        total
    }

    /// Byte offset of each field, in declaration order
    pub fn offsets(&self) -> impl Iterator<Item = (usize, &'static Field)> {
        self.fields.iter().scan(0usize, |offset, field| {
            let start = *offset;
            *offset += field.format.width();
            Some((start, field))
        })
    }

    /// Position of a field by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Check the layout against the parameter length declared in the header
    pub fn validate(&self, command: &'static str, declared: usize) -> Result<(), ProtocolError> {
        let computed = self.width();
        if computed != declared {
            return Err(ProtocolError::LayoutMismatch {
                command,
                declared,
                computed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: ParameterLayout = ParameterLayout::new(&[
        Field::with_format("Width", FieldFormat::U32Be),
        Field::with_format("Margin", FieldFormat::I16Be),
        Field::byte("Flag"),
    ]);

    #[test]
    fn test_width_and_offsets() {
        assert_eq!(SAMPLE.width(), 7);
        let offsets: Vec<_> = SAMPLE.offsets().map(|(o, f)| (o, f.name)).collect();
        assert_eq!(offsets, vec![(0, "Width"), (4, "Margin"), (6, "Flag")]);
    }

    #[test]
    fn test_validate_mismatch() {
        assert!(SAMPLE.validate("Sample", 7).is_ok());
        assert_eq!(
            SAMPLE.validate("Sample", 8),
            Err(ProtocolError::LayoutMismatch {
                command: "Sample",
                declared: 8,
                computed: 7
            })
        );
    }

    #[test]
    fn test_read_write_signed() {
        let mut out = Vec::new();
        FieldFormat::I16Be.write(-36, &mut out);
        assert_eq!(out, vec![0xFF, 0xDC]);
        assert_eq!(FieldFormat::I16Be.read(&out), Some(-36));
        assert_eq!(FieldFormat::U16Be.read(&out), Some(0xFFDC));
    }

    #[test]
    fn test_read_short_input() {
        assert_eq!(FieldFormat::U32Be.read(&[0x00, 0x01]), None);
        assert_eq!(FieldFormat::U8.read(&[]), None);
    }

    #[test]
    fn test_fits() {
        assert!(FieldFormat::U8.fits(255));
        assert!(!FieldFormat::U8.fits(256));
        assert!(!FieldFormat::U8.fits(-1));
        assert!(FieldFormat::I16Be.fits(-32768));
        assert!(!FieldFormat::U16Be.fits(-1));
        assert!(FieldFormat::U64Be.fits(-1));
    }

    #[test]
    fn test_render() {
        assert_eq!(FieldFormat::U32Be.render(2976), "2976 (0xba0)");
        assert_eq!(FieldFormat::I16Be.render(-42), "-42 (-0x2a)");
        assert_eq!(FieldFormat::U64Be.render(-1), "18446744073709551615 (0xffffffffffffffff)");
    }
}
