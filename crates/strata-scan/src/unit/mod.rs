//! The `.scu` compiled-unit format.
//!
//! A unit file is a compact class-file analogue: one class per file, with a
//! string pool, member table, per-member instruction stream, catch table,
//! and a debug line table mapping instruction offsets to source lines.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! magic "SCU\x01", u16 format version (= 1)
//! string pool: u16 count, per entry u16 len + UTF-8 bytes
//! class:   name idx, source-file idx, u32 decl line,
//!          super idx (0xFFFF = none), u8 interface count + idxs,
//!          suppression block
//! members: u16 count; each: u8 flags (bit0 method, bit1 synthetic),
//!          name idx, descriptor idx, u32 decl line, suppression block,
//!          code, catch table, line table (fields usually have empty
//!          streams; initializer references are attributed to the field)
//! suppression block: u8 mode (0 none / 1 all / 2 listed),
//!          listed: u8 count + check-id string idxs
//! ```
//!
//! Suppression granularity is structural: the format only has class-level
//! and member-level annotation blocks, so nothing narrower than a method
//! can ever carry one.

mod reader;
mod scan;
mod writer;

pub use reader::read_unit;
pub use scan::{scan_unit, UnitScan};
pub use writer::{encode_unit, MemberBuilder, UnitBuilder};

use strata_core::types::Suppression;

pub const MAGIC: [u8; 4] = *b"SCU\x01";
pub const FORMAT_VERSION: u16 = 1;

/// Index value marking "no superclass".
pub(crate) const NO_SUPER: u16 = 0xFFFF;

/// Errors reading one compiled unit or UI document. Per-file: the failing
/// file is recorded and skipped, scanning of other units continues.
#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("cannot read: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a compiled unit (bad magic)")]
    BadMagic,

    #[error("unsupported unit format version {0}")]
    UnsupportedVersion(u16),

    #[error("truncated unit data at offset {0}")]
    Truncated(usize),

    #[error("string pool index {0} out of range")]
    BadStringIndex(u16),

    #[error("string pool entry is not valid UTF-8")]
    BadUtf8,

    #[error("unknown opcode 0x{0:02x}")]
    UnknownOpcode(u8),

    #[error("malformed UI document: {0}")]
    MalformedDocument(String),
}

/// A decoded compiled unit: one class with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledUnit {
    /// Internal class name (`foo/bar/Baz`, nested types with `$`).
    pub class_name: String,
    /// Source file name the compiler recorded (`Baz.java`).
    pub source_file: String,
    /// Line of the class declaration.
    pub decl_line: u32,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub suppression: Suppression,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Method,
}

/// A declared field or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    pub descriptor: String,
    pub decl_line: u32,
    /// Compiler-generated (e.g. enum-switch lookup table members). Scanned
    /// like any other member: its references are genuine.
    pub synthetic: bool,
    pub suppression: Suppression,
    /// Instruction stream. Usually empty for fields; initializer
    /// references may be attributed to the declaring field.
    pub code: Vec<Instruction>,
    /// Exception-handler table: (catch type, handler offset).
    pub catches: Vec<CatchEntry>,
    pub lines: LineTable,
}

impl Member {
    /// Key identifying this member for suppression and enclosing-declaration
    /// lookup: `name + descriptor` for methods, bare name for fields.
    pub fn key(&self) -> String {
        match self.kind {
            MemberKind::Method => format!("{}{}", self.name, self.descriptor),
            MemberKind::Field => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub offset: u32,
    pub op: Op,
}

/// Reference-bearing instructions. The format carries nothing else: pure
/// computation leaves no trace a compatibility check cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Invoke {
        owner: String,
        name: String,
        descriptor: String,
    },
    GetField {
        owner: String,
        name: String,
    },
    PutField {
        owner: String,
        name: String,
    },
    GetStatic {
        owner: String,
        name: String,
    },
    PutStatic {
        owner: String,
        name: String,
    },
    New {
        class: String,
    },
    /// Cast, instance test, class literal, or array element type.
    TypeRef {
        class: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatchEntry {
    pub class: String,
    pub offset: u32,
}

/// Debug line table: (instruction offset, source line) pairs with strictly
/// ascending offsets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTable {
    entries: Vec<(u32, u32)>,
}

impl LineTable {
    pub fn new(entries: Vec<(u32, u32)>) -> Self {
        Self { entries }
    }

    /// Source line for an instruction: the entry with the greatest offset
    /// not exceeding `offset`. 0 when the table is empty or every entry
    /// starts past the instruction.
    pub fn line_for(&self, offset: u32) -> u32 {
        let idx = self.entries.partition_point(|&(o, _)| o <= offset);
        if idx == 0 {
            return 0;
        }
        self.entries[idx - 1].1
    }

    pub fn entries(&self) -> &[(u32, u32)] {
        &self.entries
    }
}
