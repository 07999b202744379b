//! Encoder and builders for `.scu` compiled units.
//!
//! The builders exist for fixture tooling and tests: production units come
//! from the build pipeline, but the scanner's own test suite needs a way to
//! assemble units without one.

use strata_core::types::Suppression;

use super::{
    CatchEntry, CompiledUnit, Instruction, LineTable, Member, MemberKind, Op, FORMAT_VERSION,
    MAGIC, NO_SUPER,
};

/// Serialize a unit to its binary form.
pub fn encode_unit(unit: &CompiledUnit) -> Vec<u8> {
    let mut pool = PoolWriter::default();

    // Intern every string first so the pool serializes ahead of the body.
    pool.intern(&unit.class_name);
    pool.intern(&unit.source_file);
    if let Some(s) = &unit.super_class {
        pool.intern(s);
    }
    for i in &unit.interfaces {
        pool.intern(i);
    }
    intern_suppression(&mut pool, &unit.suppression);
    for m in &unit.members {
        pool.intern(&m.name);
        pool.intern(&m.descriptor);
        intern_suppression(&mut pool, &m.suppression);
        for insn in &m.code {
            match &insn.op {
                Op::Invoke {
                    owner,
                    name,
                    descriptor,
                } => {
                    pool.intern(owner);
                    pool.intern(name);
                    pool.intern(descriptor);
                }
                Op::GetField { owner, name }
                | Op::PutField { owner, name }
                | Op::GetStatic { owner, name }
                | Op::PutStatic { owner, name } => {
                    pool.intern(owner);
                    pool.intern(name);
                }
                Op::New { class } | Op::TypeRef { class } => {
                    pool.intern(class);
                }
            }
        }
        for c in &m.catches {
            pool.intern(&c.class);
        }
    }

    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    pool.write(&mut out);

    write_u16(&mut out, pool.index(&unit.class_name));
    write_u16(&mut out, pool.index(&unit.source_file));
    out.extend_from_slice(&unit.decl_line.to_le_bytes());
    match &unit.super_class {
        Some(s) => write_u16(&mut out, pool.index(s)),
        None => write_u16(&mut out, NO_SUPER),
    }
    out.push(unit.interfaces.len() as u8);
    for i in &unit.interfaces {
        write_u16(&mut out, pool.index(i));
    }
    write_suppression(&mut out, &pool, &unit.suppression);

    write_u16(&mut out, unit.members.len() as u16);
    for m in &unit.members {
        let mut flags = 0u8;
        if m.kind == MemberKind::Method {
            flags |= 0x01;
        }
        if m.synthetic {
            flags |= 0x02;
        }
        out.push(flags);
        write_u16(&mut out, pool.index(&m.name));
        write_u16(&mut out, pool.index(&m.descriptor));
        out.extend_from_slice(&m.decl_line.to_le_bytes());
        write_suppression(&mut out, &pool, &m.suppression);

        write_u16(&mut out, m.code.len() as u16);
        for insn in &m.code {
            out.extend_from_slice(&insn.offset.to_le_bytes());
            match &insn.op {
                Op::Invoke {
                    owner,
                    name,
                    descriptor,
                } => {
                    out.push(0x01);
                    write_u16(&mut out, pool.index(owner));
                    write_u16(&mut out, pool.index(name));
                    write_u16(&mut out, pool.index(descriptor));
                }
                Op::GetField { owner, name } => {
                    out.push(0x02);
                    write_u16(&mut out, pool.index(owner));
                    write_u16(&mut out, pool.index(name));
                }
                Op::PutField { owner, name } => {
                    out.push(0x03);
                    write_u16(&mut out, pool.index(owner));
                    write_u16(&mut out, pool.index(name));
                }
                Op::GetStatic { owner, name } => {
                    out.push(0x04);
                    write_u16(&mut out, pool.index(owner));
                    write_u16(&mut out, pool.index(name));
                }
                Op::PutStatic { owner, name } => {
                    out.push(0x05);
                    write_u16(&mut out, pool.index(owner));
                    write_u16(&mut out, pool.index(name));
                }
                Op::New { class } => {
                    out.push(0x06);
                    write_u16(&mut out, pool.index(class));
                }
                Op::TypeRef { class } => {
                    out.push(0x07);
                    write_u16(&mut out, pool.index(class));
                }
            }
        }
        out.push(m.catches.len() as u8);
        for c in &m.catches {
            write_u16(&mut out, pool.index(&c.class));
            out.extend_from_slice(&c.offset.to_le_bytes());
        }
        write_u16(&mut out, m.lines.entries().len() as u16);
        for &(offset, line) in m.lines.entries() {
            out.extend_from_slice(&offset.to_le_bytes());
            out.extend_from_slice(&line.to_le_bytes());
        }
    }

    out
}

fn intern_suppression(pool: &mut PoolWriter, s: &Suppression) {
    if let Suppression::Checks(ids) = s {
        for id in ids {
            pool.intern(id);
        }
    }
}

fn write_suppression(out: &mut Vec<u8>, pool: &PoolWriter, s: &Suppression) {
    match s {
        Suppression::None => out.push(0),
        Suppression::All => out.push(1),
        Suppression::Checks(ids) => {
            out.push(2);
            out.push(ids.len() as u8);
            for id in ids {
                write_u16(out, pool.index(id));
            }
        }
    }
}

fn write_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

#[derive(Default)]
struct PoolWriter {
    strings: Vec<String>,
    indices: std::collections::HashMap<String, u16>,
}

impl PoolWriter {
    fn intern(&mut self, s: &str) {
        if !self.indices.contains_key(s) {
            let idx = self.strings.len() as u16;
            self.strings.push(s.to_string());
            self.indices.insert(s.to_string(), idx);
        }
    }

    fn index(&self, s: &str) -> u16 {
        self.indices[s]
    }

    fn write(&self, out: &mut Vec<u8>) {
        write_u16(out, self.strings.len() as u16);
        for s in &self.strings {
            write_u16(out, s.len() as u16);
            out.extend_from_slice(s.as_bytes());
        }
    }
}

/// Assembles a [`CompiledUnit`] for encoding.
#[derive(Debug)]
pub struct UnitBuilder {
    unit: CompiledUnit,
}

impl UnitBuilder {
    pub fn new(class_name: &str) -> Self {
        Self {
            unit: CompiledUnit {
                class_name: class_name.to_string(),
                source_file: String::new(),
                decl_line: 1,
                super_class: None,
                interfaces: Vec::new(),
                suppression: Suppression::None,
                members: Vec::new(),
            },
        }
    }

    pub fn source_file(mut self, name: &str) -> Self {
        self.unit.source_file = name.to_string();
        self
    }

    pub fn decl_line(mut self, line: u32) -> Self {
        self.unit.decl_line = line;
        self
    }

    pub fn extends(mut self, super_class: &str) -> Self {
        self.unit.super_class = Some(super_class.to_string());
        self
    }

    pub fn implements(mut self, interface: &str) -> Self {
        self.unit.interfaces.push(interface.to_string());
        self
    }

    pub fn suppress(mut self, suppression: Suppression) -> Self {
        self.unit.suppression = suppression;
        self
    }

    /// Shorthand for a field with no initializer code.
    pub fn field(self, name: &str, descriptor: &str, decl_line: u32) -> Self {
        self.member(MemberBuilder::field(name, descriptor, decl_line))
    }

    pub fn member(mut self, member: MemberBuilder) -> Self {
        self.unit.members.push(member.member);
        self
    }

    pub fn build(self) -> CompiledUnit {
        self.unit
    }

    /// Build and encode in one step.
    pub fn encode(self) -> Vec<u8> {
        encode_unit(&self.build())
    }
}

/// Assembles one member: instructions, catch table, line table.
///
/// Fields take the same shape as methods; their instruction stream holds
/// the initializer expression, if any.
#[derive(Debug)]
pub struct MemberBuilder {
    member: Member,
    next_offset: u32,
}

impl MemberBuilder {
    pub fn method(name: &str, descriptor: &str, decl_line: u32) -> Self {
        Self::new(MemberKind::Method, name, descriptor, decl_line)
    }

    pub fn field(name: &str, descriptor: &str, decl_line: u32) -> Self {
        Self::new(MemberKind::Field, name, descriptor, decl_line)
    }

    fn new(kind: MemberKind, name: &str, descriptor: &str, decl_line: u32) -> Self {
        Self {
            member: Member {
                kind,
                name: name.to_string(),
                descriptor: descriptor.to_string(),
                decl_line,
                synthetic: false,
                suppression: Suppression::None,
                code: Vec::new(),
                catches: Vec::new(),
                lines: LineTable::default(),
            },
            next_offset: 0,
        }
    }

    pub fn synthetic(mut self) -> Self {
        self.member.synthetic = true;
        self
    }

    pub fn suppress(mut self, suppression: Suppression) -> Self {
        self.member.suppression = suppression;
        self
    }

    /// Append an instruction at the next sequential offset, recording the
    /// source line in the debug table.
    pub fn op(mut self, line: u32, op: Op) -> Self {
        let offset = self.record_line(line);
        self.member.code.push(Instruction { offset, op });
        self
    }

    /// Handler offsets share the instruction offset space; record the
    /// line at the current offset.
    pub fn catch(mut self, class: &str, line: u32) -> Self {
        let offset = self.record_line(line);
        self.member.catches.push(CatchEntry {
            class: class.to_string(),
            offset,
        });
        self
    }

    fn record_line(&mut self, line: u32) -> u32 {
        let offset = self.next_offset;
        let mut entries = self.member.lines.entries().to_vec();
        match entries.last() {
            Some(&(_, last_line)) if last_line == line => {}
            _ => entries.push((offset, line)),
        }
        self.member.lines = LineTable::new(entries);
        self.next_offset += 1;
        offset
    }
}
