use std::{fmt, str::FromStr};

use crate::error::PointCloudError;

/// Storage kind of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    F32,
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
}

impl PropertyType {
    pub fn byte_size(&self) -> usize {
        match self {
            Self::U8 | Self::I8 => 1,
            Self::U16 | Self::I16 => 2,
            Self::F32 | Self::U32 | Self::I32 => 4,
        }
    }

    // Names as they appear in a PLY header
    pub fn ply_name(&self) -> &'static str {
        match self {
            Self::F32 => "float",
            Self::U8 => "uchar",
            Self::U16 => "ushort",
            Self::U32 => "uint",
            Self::I8 => "char",
            Self::I16 => "short",
            Self::I32 => "int",
        }
    }
}

impl FromStr for PropertyType {
    type Err = PointCloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float" | "float32" => Ok(Self::F32),
            "uchar" | "uint8" => Ok(Self::U8),
            "ushort" | "uint16" => Ok(Self::U16),
            "uint" | "uint32" => Ok(Self::U32),
            "char" | "int8" => Ok(Self::I8),
            "short" | "int16" => Ok(Self::I16),
            "int" | "int32" => Ok(Self::I32),
            _ => Err(PointCloudError::UnknownPropertyType(s.to_string())),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ply_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnBuffer {
    F32(Vec<f32>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
}

macro_rules! with_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            ColumnBuffer::F32($values) => $body,
            ColumnBuffer::U8($values) => $body,
            ColumnBuffer::U16($values) => $body,
            ColumnBuffer::U32($values) => $body,
            ColumnBuffer::I8($values) => $body,
            ColumnBuffer::I16($values) => $body,
            ColumnBuffer::I32($values) => $body,
        }
    };
}

macro_rules! map_buffer {
    ($buffer:expr, $values:ident => $body:expr) => {
        match $buffer {
            ColumnBuffer::F32($values) => ColumnBuffer::F32($body),
            ColumnBuffer::U8($values) => ColumnBuffer::U8($body),
            ColumnBuffer::U16($values) => ColumnBuffer::U16($body),
            ColumnBuffer::U32($values) => ColumnBuffer::U32($body),
            ColumnBuffer::I8($values) => ColumnBuffer::I8($body),
            ColumnBuffer::I16($values) => ColumnBuffer::I16($body),
            ColumnBuffer::I32($values) => ColumnBuffer::I32($body),
        }
    };
}

fn gather_values<T: Copy>(values: &[T], indices: &[usize]) -> Vec<T> {
    let mut gathered = Vec::with_capacity(indices.len());
    gathered.extend(indices.iter().map(|&index| values[index]));
    gathered
}

impl ColumnBuffer {
    pub fn kind(&self) -> PropertyType {
        match self {
            Self::F32(_) => PropertyType::F32,
            Self::U8(_) => PropertyType::U8,
            Self::U16(_) => PropertyType::U16,
            Self::U32(_) => PropertyType::U32,
            Self::I8(_) => PropertyType::I8,
            Self::I16(_) => PropertyType::I16,
            Self::I32(_) => PropertyType::I32,
        }
    }

    pub fn len(&self) -> usize {
        with_buffer!(self, values => values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a value widened to `f64`, or `None` when `index` is out of range.
    pub fn get_f64(&self, index: usize) -> Option<f64> {
        with_buffer!(self, values => values.get(index).map(|&v| f64::from(v)))
    }

    /// Builds a new buffer of the same kind holding `self[indices[k]]` at `k`.
    ///
    /// Every index must be in range.
    pub fn gather(&self, indices: &[usize]) -> ColumnBuffer {
        map_buffer!(self, values => gather_values(values, indices))
    }
}

/// One named column of an element.
///
/// `kind` and `byte_size` are derived from the storage on construction, so
/// they always describe it.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    kind: PropertyType,
    byte_size: usize,
    storage: ColumnBuffer,
}

impl Property {
    pub fn new(name: impl Into<String>, storage: ColumnBuffer) -> Self {
        let kind = storage.kind();
        Property {
            name: name.into(),
            kind,
            byte_size: kind.byte_size(),
            storage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    pub fn byte_size(&self) -> usize {
        self.byte_size
    }

    pub fn storage(&self) -> &ColumnBuffer {
        &self.storage
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Same name and metadata, storage restricted to `indices`.
    pub fn select(&self, indices: &[usize]) -> Property {
        Property {
            name: self.name.clone(),
            kind: self.kind,
            byte_size: self.byte_size,
            storage: self.storage.gather(indices),
        }
    }
}
