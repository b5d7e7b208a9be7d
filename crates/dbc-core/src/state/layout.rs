//! # Account Layouts
//!
//! Declarative description of packed little-endian account records.
//!
//! A record is declared once with [`account_layout!`]: the field list is the
//! byte layout. The macro derives a [`LayoutField`] implementation that reads,
//! writes, and describes the fields in declaration order through a single
//! cursor, so every record shares the same bounds checks and error reporting.

use solana_program::pubkey::Pubkey;

use crate::constants::DISCRIMINATOR_LEN;
use crate::errors::{CoreResult, DbcCoreError};

/// A value with a fixed encoded width inside an account layout
pub trait LayoutField: Sized {
    /// Encoded width in bytes
    const LEN: usize;

    /// Read the value at the reader's cursor
    fn read_from(reader: &mut LayoutReader<'_>) -> CoreResult<Self>;

    /// Append the encoded value
    fn write_to(&self, writer: &mut LayoutWriter);

    /// Record the leaf fields covered by this value
    fn describe(table: &mut LayoutTable);
}

/// A layout stored on-chain behind an 8-byte discriminator
pub trait AccountRecord: LayoutField {
    /// Tag expected in the first 8 bytes of the account
    const DISCRIMINATOR: [u8; DISCRIMINATOR_LEN];

    /// Full account length including the discriminator
    const ACCOUNT_LEN: usize = DISCRIMINATOR_LEN + Self::LEN;

    /// Decode a record from raw account data.
    ///
    /// The length is checked before anything else, then the discriminator,
    /// then every field in layout order. Trailing bytes past the record are
    /// ignored.
    fn decode(data: &[u8]) -> CoreResult<Self> {
        if data.len() < Self::ACCOUNT_LEN {
            return Err(DbcCoreError::truncated(Self::ACCOUNT_LEN, data.len()));
        }

        let mut found = [0u8; DISCRIMINATOR_LEN];
        found.copy_from_slice(&data[..DISCRIMINATOR_LEN]);
        if found != Self::DISCRIMINATOR {
            return Err(DbcCoreError::InvalidDiscriminator {
                expected: Self::DISCRIMINATOR,
                found,
            });
        }

        let mut reader = LayoutReader::new(data, DISCRIMINATOR_LEN);
        Self::read_from(&mut reader)
    }

    /// Encode the record with its discriminator
    fn encode(&self) -> Vec<u8> {
        let mut writer = LayoutWriter::with_capacity(Self::ACCOUNT_LEN);
        writer.put(&Self::DISCRIMINATOR);
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Leaf fields with their absolute offsets in the account
    fn layout() -> Vec<FieldInfo> {
        let mut table = LayoutTable::new(DISCRIMINATOR_LEN);
        Self::describe(&mut table);
        table.into_fields()
    }
}

// ============================================================================
// Field Paths
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum PathSegment {
    Field(&'static str),
    Index(usize),
}

fn render_path(segments: &[PathSegment]) -> String {
    let mut path = String::new();
    for segment in segments {
        match segment {
            PathSegment::Field(name) => {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(name);
            }
            PathSegment::Index(index) => {
                path.push('[');
                path.push_str(&index.to_string());
                path.push(']');
            }
        }
    }
    path
}

// ============================================================================
// Reader
// ============================================================================

/// Bounds-checked cursor over account bytes
pub struct LayoutReader<'a> {
    data: &'a [u8],
    offset: usize,
    path: Vec<PathSegment>,
}

impl<'a> LayoutReader<'a> {
    /// Create a reader positioned at `offset`
    pub fn new(data: &'a [u8], offset: usize) -> Self {
        Self {
            data,
            offset,
            path: Vec::new(),
        }
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    /// Read a named field
    pub fn read_field<T: LayoutField>(&mut self, name: &'static str) -> CoreResult<T> {
        self.path.push(PathSegment::Field(name));
        let value = T::read_from(self);
        self.path.pop();
        value
    }

    /// Read the element at `index` of an array field
    pub fn read_element<T: LayoutField>(&mut self, index: usize) -> CoreResult<T> {
        self.path.push(PathSegment::Index(index));
        let value = T::read_from(self);
        self.path.pop();
        value
    }

    /// Take exactly `N` bytes from the cursor
    pub fn take_array<const N: usize>(&mut self) -> CoreResult<[u8; N]> {
        let remaining = self.remaining();
        let bytes = self
            .data
            .get(self.offset..self.offset.saturating_add(N))
            .ok_or_else(|| DbcCoreError::FieldReadError {
                field: render_path(&self.path),
                offset: self.offset,
                needed: N,
                remaining,
            })?;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        self.offset += N;
        Ok(out)
    }
}

// ============================================================================
// Writer
// ============================================================================

/// Byte sink used by the inverse encoder
#[derive(Debug, Default)]
pub struct LayoutWriter {
    buf: Vec<u8>,
}

impl LayoutWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

// ============================================================================
// Layout Table
// ============================================================================

/// One leaf field of a layout
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "client", derive(serde::Serialize))]
pub struct FieldInfo {
    /// Dotted path, e.g. `pool_fees.base_fee.cliff_fee_numerator`
    pub path: String,
    /// Absolute offset in the account, discriminator included
    pub offset: usize,
    /// Width in bytes
    pub len: usize,
    /// Primitive type name
    pub kind: &'static str,
}

/// Collects [`FieldInfo`] entries while walking a layout
pub struct LayoutTable {
    offset: usize,
    path: Vec<PathSegment>,
    fields: Vec<FieldInfo>,
}

impl LayoutTable {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            path: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn field<T: LayoutField>(&mut self, name: &'static str) {
        self.path.push(PathSegment::Field(name));
        T::describe(self);
        self.path.pop();
    }

    pub fn element<T: LayoutField>(&mut self, index: usize) {
        self.path.push(PathSegment::Index(index));
        T::describe(self);
        self.path.pop();
    }

    /// Record a primitive at the current path
    pub fn leaf(&mut self, len: usize, kind: &'static str) {
        self.fields.push(FieldInfo {
            path: render_path(&self.path),
            offset: self.offset,
            len,
            kind,
        });
        self.offset += len;
    }

    pub fn into_fields(self) -> Vec<FieldInfo> {
        self.fields
    }
}

// ============================================================================
// Primitive Fields
// ============================================================================

/// Macro to implement little-endian primitive fields
macro_rules! le_primitive {
    ($($type:ty),* $(,)?) => {
        $(
            impl LayoutField for $type {
                const LEN: usize = std::mem::size_of::<$type>();

                fn read_from(reader: &mut LayoutReader<'_>) -> CoreResult<Self> {
                    Ok(<$type>::from_le_bytes(reader.take_array()?))
                }

                fn write_to(&self, writer: &mut LayoutWriter) {
                    writer.put(&self.to_le_bytes());
                }

                fn describe(table: &mut LayoutTable) {
                    table.leaf(Self::LEN, stringify!($type));
                }
            }
        )*
    };
}

le_primitive!(u8, u16, u32, u64);

/// 128-bit values are stored as two little-endian u64 words, low word first
impl LayoutField for u128 {
    const LEN: usize = 16;

    fn read_from(reader: &mut LayoutReader<'_>) -> CoreResult<Self> {
        let lo = u64::from_le_bytes(reader.take_array()?);
        let hi = u64::from_le_bytes(reader.take_array()?);
        Ok(((hi as u128) << 64) | lo as u128)
    }

    fn write_to(&self, writer: &mut LayoutWriter) {
        writer.put(&(*self as u64).to_le_bytes());
        writer.put(&((*self >> 64) as u64).to_le_bytes());
    }

    fn describe(table: &mut LayoutTable) {
        table.leaf(Self::LEN, "u128");
    }
}

impl LayoutField for Pubkey {
    const LEN: usize = 32;

    fn read_from(reader: &mut LayoutReader<'_>) -> CoreResult<Self> {
        Ok(Pubkey::new_from_array(reader.take_array()?))
    }

    fn write_to(&self, writer: &mut LayoutWriter) {
        writer.put(self.as_ref());
    }

    fn describe(table: &mut LayoutTable) {
        table.leaf(Self::LEN, "pubkey");
    }
}

/// Fixed arrays are read element by element, all of them, in order
impl<T: LayoutField + Copy + Default, const N: usize> LayoutField for [T; N] {
    const LEN: usize = T::LEN * N;

    fn read_from(reader: &mut LayoutReader<'_>) -> CoreResult<Self> {
        let mut out = [T::default(); N];
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = reader.read_element(index)?;
        }
        Ok(out)
    }

    fn write_to(&self, writer: &mut LayoutWriter) {
        for item in self {
            item.write_to(writer);
        }
    }

    fn describe(table: &mut LayoutTable) {
        for index in 0..N {
            table.element::<T>(index);
        }
    }
}

/// Declare a packed record. Field order is byte order.
#[macro_export]
macro_rules! account_layout {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                pub $field:ident : $type:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $type,
            )*
        }

        impl $crate::state::layout::LayoutField for $name {
            const LEN: usize = 0 $( + <$type as $crate::state::layout::LayoutField>::LEN )*;

            fn read_from(
                reader: &mut $crate::state::layout::LayoutReader<'_>,
            ) -> $crate::errors::CoreResult<Self> {
                Ok(Self {
                    $( $field: reader.read_field::<$type>(stringify!($field))?, )*
                })
            }

            fn write_to(&self, writer: &mut $crate::state::layout::LayoutWriter) {
                $( $crate::state::layout::LayoutField::write_to(&self.$field, writer); )*
            }

            fn describe(table: &mut $crate::state::layout::LayoutTable) {
                $( table.field::<$type>(stringify!($field)); )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::account_layout! {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct Pair {
            pub tag: u8,
            pub value: u128,
        }
    }

    crate::account_layout! {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct Outer {
            pub count: u16,
            pub pairs: [Pair; 2],
        }
    }

    #[test]
    fn test_u128_is_high_times_two_pow_64_plus_low() {
        let mut data = Vec::new();
        data.extend_from_slice(&7u64.to_le_bytes());
        data.extend_from_slice(&3u64.to_le_bytes());

        let mut reader = LayoutReader::new(&data, 0);
        let value: u128 = reader.read_field("value").unwrap();
        assert_eq!(value, 3 * (1u128 << 64) + 7);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_nested_field_path_in_error() {
        // count + first pair + the tag of the second pair, then 4 stray bytes
        let data = vec![0u8; 2 + 17 + 1 + 4];
        let mut reader = LayoutReader::new(&data, 0);

        let err = reader.read_field::<Outer>("outer").unwrap_err();
        assert_eq!(
            err,
            DbcCoreError::FieldReadError {
                field: "outer.pairs[1].value".to_string(),
                offset: 20,
                needed: 8,
                remaining: 4,
            }
        );
    }

    #[test]
    fn test_layout_table_offsets() {
        let mut table = LayoutTable::new(8);
        table.field::<Outer>("outer");
        let fields = table.into_fields();

        assert_eq!(Outer::LEN, 2 + 2 * 17);
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].path, "outer.count");
        assert_eq!(fields[0].offset, 8);
        assert_eq!(fields[4].path, "outer.pairs[1].value");
        assert_eq!(fields[4].offset, 8 + 2 + 17 + 1);
        assert_eq!(fields[4].kind, "u128");
    }

    #[test]
    fn test_write_matches_read() {
        let outer = Outer {
            count: 513,
            pairs: [
                Pair { tag: 1, value: u128::MAX - 5 },
                Pair { tag: 2, value: 1u128 << 100 },
            ],
        };

        let mut writer = LayoutWriter::default();
        outer.write_to(&mut writer);

        let bytes = writer.into_bytes();
        assert_eq!(bytes.len(), Outer::LEN);
        let mut reader = LayoutReader::new(&bytes, 0);
        assert_eq!(Outer::read_from(&mut reader).unwrap(), outer);
    }
}
