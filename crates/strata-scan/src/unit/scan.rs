//! Reference extraction from one decoded compiled unit.
//!
//! Emits a candidate [`Reference`] for every external element the unit
//! touches: the declared supertype and interfaces, every reference-bearing
//! instruction (with its line resolved through the debug table), and every
//! catch target. Synthetic members — including compiler-generated
//! enum-switch lookup tables — are scanned like any other; their accesses
//! are genuine references.
//!
//! Known, intentional false negative: a compile-time-constant field whose
//! value was inlined at the use site leaves no field instruction behind and
//! is invisible here.

use strata_core::types::{ApiKind, Enclosing, Reference, Suppression, SuppressionScope};

use super::{CompiledUnit, Member, Op};

/// Everything harvested from one compiled unit.
#[derive(Debug)]
pub struct UnitScan {
    pub references: Vec<Reference>,
    pub suppressions: SuppressionScope,
}

/// Walk a decoded unit. `file` is the originating source path violations
/// will be reported against.
pub fn scan_unit(unit: &CompiledUnit, file: &str) -> UnitScan {
    let mut references = Vec::new();
    let mut suppressions = SuppressionScope::new();

    if !matches!(unit.suppression, Suppression::None) {
        suppressions.insert(&unit.class_name, None, unit.suppression.clone());
    }

    let class_enclosing = Enclosing {
        class: unit.class_name.clone(),
        member: None,
    };

    if let Some(super_class) = &unit.super_class {
        references.push(class_ref(super_class, file, unit.decl_line, &class_enclosing));
    }
    for interface in &unit.interfaces {
        references.push(class_ref(interface, file, unit.decl_line, &class_enclosing));
    }

    for member in &unit.members {
        let key = member.key();
        if !matches!(member.suppression, Suppression::None) {
            suppressions.insert(&unit.class_name, Some(&key), member.suppression.clone());
        }
        scan_member(unit, member, &key, file, &mut references);
    }

    UnitScan {
        references,
        suppressions,
    }
}

fn scan_member(
    unit: &CompiledUnit,
    member: &Member,
    key: &str,
    file: &str,
    references: &mut Vec<Reference>,
) {
    let enclosing = Enclosing {
        class: unit.class_name.clone(),
        member: Some(key.to_string()),
    };

    for insn in &member.code {
        let line = member.lines.line_for(insn.offset);
        match &insn.op {
            Op::Invoke {
                owner,
                name,
                descriptor,
            } => {
                references.push(Reference {
                    kind: ApiKind::Method,
                    owner: owner.clone(),
                    member: Some(format!("{name}{descriptor}")),
                    file: file.to_string(),
                    line,
                    enclosing: Some(enclosing.clone()),
                });
            }
            Op::GetField { owner, name }
            | Op::PutField { owner, name }
            | Op::GetStatic { owner, name }
            | Op::PutStatic { owner, name } => {
                references.push(Reference {
                    kind: ApiKind::Field,
                    owner: owner.clone(),
                    member: Some(name.clone()),
                    file: file.to_string(),
                    line,
                    enclosing: Some(enclosing.clone()),
                });
            }
            Op::New { class } | Op::TypeRef { class } => {
                references.push(class_ref(class, file, line, &enclosing));
            }
        }
    }

    for catch in &member.catches {
        let line = member.lines.line_for(catch.offset);
        references.push(class_ref(&catch.class, file, line, &enclosing));
    }
}

fn class_ref(class: &str, file: &str, line: u32, enclosing: &Enclosing) -> Reference {
    Reference {
        kind: ApiKind::Class,
        owner: class.to_string(),
        member: None,
        file: file.to_string(),
        line,
        enclosing: Some(enclosing.clone()),
    }
}
