//! Binary reader for `.scu` compiled units.

use strata_core::types::Suppression;

use super::{
    CatchEntry, CompiledUnit, Instruction, LineTable, Member, MemberKind, Op, UnitError,
    FORMAT_VERSION, MAGIC, NO_SUPER,
};

/// Decode one compiled unit from raw bytes.
pub fn read_unit(data: &[u8]) -> Result<CompiledUnit, UnitError> {
    let mut cursor = Cursor::new(data);

    if cursor.bytes(4)? != MAGIC {
        return Err(UnitError::BadMagic);
    }
    let version = cursor.u16()?;
    if version != FORMAT_VERSION {
        return Err(UnitError::UnsupportedVersion(version));
    }

    let pool = read_pool(&mut cursor)?;

    let class_name = pool.get(cursor.u16()?)?.to_string();
    let source_file = pool.get(cursor.u16()?)?.to_string();
    let decl_line = cursor.u32()?;
    let super_idx = cursor.u16()?;
    let super_class = if super_idx == NO_SUPER {
        None
    } else {
        Some(pool.get(super_idx)?.to_string())
    };
    let interface_count = cursor.u8()?;
    let mut interfaces = Vec::with_capacity(interface_count as usize);
    for _ in 0..interface_count {
        interfaces.push(pool.get(cursor.u16()?)?.to_string());
    }
    let suppression = read_suppression(&mut cursor, &pool)?;

    let member_count = cursor.u16()?;
    let mut members = Vec::with_capacity(member_count as usize);
    for _ in 0..member_count {
        members.push(read_member(&mut cursor, &pool)?);
    }

    Ok(CompiledUnit {
        class_name,
        source_file,
        decl_line,
        super_class,
        interfaces,
        suppression,
        members,
    })
}

fn read_pool<'a>(cursor: &mut Cursor<'a>) -> Result<Pool<'a>, UnitError> {
    let count = cursor.u16()?;
    let mut strings = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let len = cursor.u16()? as usize;
        let bytes = cursor.bytes(len)?;
        strings.push(std::str::from_utf8(bytes).map_err(|_| UnitError::BadUtf8)?);
    }
    Ok(Pool { strings })
}

fn read_suppression(cursor: &mut Cursor<'_>, pool: &Pool<'_>) -> Result<Suppression, UnitError> {
    match cursor.u8()? {
        0 => Ok(Suppression::None),
        1 => Ok(Suppression::All),
        _ => {
            let count = cursor.u8()?;
            let mut ids = Vec::with_capacity(count as usize);
            for _ in 0..count {
                ids.push(pool.get(cursor.u16()?)?.to_string());
            }
            Ok(Suppression::Checks(ids))
        }
    }
}

fn read_member(cursor: &mut Cursor<'_>, pool: &Pool<'_>) -> Result<Member, UnitError> {
    let flags = cursor.u8()?;
    let kind = if flags & 0x01 != 0 {
        MemberKind::Method
    } else {
        MemberKind::Field
    };
    let synthetic = flags & 0x02 != 0;
    let name = pool.get(cursor.u16()?)?.to_string();
    let descriptor = pool.get(cursor.u16()?)?.to_string();
    let decl_line = cursor.u32()?;
    let suppression = read_suppression(cursor, pool)?;

    let instruction_count = cursor.u16()?;
    let mut code = Vec::with_capacity(instruction_count as usize);
    for _ in 0..instruction_count {
        code.push(read_instruction(cursor, pool)?);
    }

    let catch_count = cursor.u8()?;
    let mut catches = Vec::with_capacity(catch_count as usize);
    for _ in 0..catch_count {
        let class = pool.get(cursor.u16()?)?.to_string();
        let offset = cursor.u32()?;
        catches.push(CatchEntry { class, offset });
    }

    let line_count = cursor.u16()?;
    let mut entries = Vec::with_capacity(line_count as usize);
    for _ in 0..line_count {
        let offset = cursor.u32()?;
        let line = cursor.u32()?;
        entries.push((offset, line));
    }
    let lines = LineTable::new(entries);

    Ok(Member {
        kind,
        name,
        descriptor,
        decl_line,
        synthetic,
        suppression,
        code,
        catches,
        lines,
    })
}

fn read_instruction(cursor: &mut Cursor<'_>, pool: &Pool<'_>) -> Result<Instruction, UnitError> {
    let offset = cursor.u32()?;
    let opcode = cursor.u8()?;
    let op = match opcode {
        0x01 => Op::Invoke {
            owner: pool.get(cursor.u16()?)?.to_string(),
            name: pool.get(cursor.u16()?)?.to_string(),
            descriptor: pool.get(cursor.u16()?)?.to_string(),
        },
        0x02..=0x05 => {
            let owner = pool.get(cursor.u16()?)?.to_string();
            let name = pool.get(cursor.u16()?)?.to_string();
            match opcode {
                0x02 => Op::GetField { owner, name },
                0x03 => Op::PutField { owner, name },
                0x04 => Op::GetStatic { owner, name },
                _ => Op::PutStatic { owner, name },
            }
        }
        0x06 => Op::New {
            class: pool.get(cursor.u16()?)?.to_string(),
        },
        0x07 => Op::TypeRef {
            class: pool.get(cursor.u16()?)?.to_string(),
        },
        other => return Err(UnitError::UnknownOpcode(other)),
    };
    Ok(Instruction { offset, op })
}

struct Pool<'a> {
    strings: Vec<&'a str>,
}

impl<'a> Pool<'a> {
    fn get(&self, idx: u16) -> Result<&'a str, UnitError> {
        self.strings
            .get(idx as usize)
            .copied()
            .ok_or(UnitError::BadStringIndex(idx))
    }
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn bytes(&mut self, len: usize) -> Result<&'a [u8], UnitError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or(UnitError::Truncated(self.pos))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, UnitError> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, UnitError> {
        let b = self.bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, UnitError> {
        let b = self.bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
