//! Type resolution over debug records.
//!
//! Parameters unwrap exactly one typedef level; return types unwrap until
//! a non-typedef record is reached. The asymmetry is observable in
//! generated declarations and call sites, so the two paths are kept
//! distinct.
use crate::types::SizeClass;
use crate::walker;
use anyhow::Result;
use gimli::{Dwarf, Reader, Unit, UnitOffset};

/// Outcome of resolving one type reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// A named scalar or aggregate.
    Named(String),
    /// Unnamed but sized; reported as an opaque pointer.
    Unnamed { byte_size: u64 },
    /// Neither name nor byte size present, or no record to resolve.
    Void,
}

impl ResolvedType {
    pub fn type_name(&self) -> &str {
        match self {
            ResolvedType::Named(name) => name,
            ResolvedType::Unnamed { .. } => "void *",
            ResolvedType::Void => "void",
        }
    }
}

/// Resolve a parameter's type reference, unwrapping a single typedef
/// level. A missing or dangling reference resolves to void.
pub fn resolve_parameter_type<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &Unit<R>,
    offset: Option<UnitOffset<R::Offset>>,
) -> ResolvedType {
    let Some(offset) = offset else {
        return ResolvedType::Void;
    };
    let Some(mut entry) = walker::entry_at_offset(unit, offset) else {
        return ResolvedType::Void;
    };

    if entry.tag() == gimli::DW_TAG_typedef {
        match walker::type_ref(&entry).and_then(|o| walker::entry_at_offset(unit, o)) {
            Some(aliased) => entry = aliased,
            None => return ResolvedType::Void,
        }
    }

    classify(dwarf, unit, &entry)
}

/// Resolve a return type reference through the whole typedef chain and
/// classify its byte size.
///
/// A void return reports the INT16 size class, not a void class. The
/// dispatch side has always been handed that value; the regression test
/// pins it so the assignment is not quietly corrected.
pub fn resolve_return_type<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &Unit<R>,
    offset: Option<UnitOffset<R::Offset>>,
) -> Result<(String, SizeClass)> {
    let Some(offset) = offset else {
        return Ok(void_return());
    };
    let Some(mut entry) = walker::entry_at_offset(unit, offset) else {
        return Ok(void_return());
    };

    while entry.tag() == gimli::DW_TAG_typedef {
        match walker::type_ref(&entry).and_then(|o| walker::entry_at_offset(unit, o)) {
            Some(aliased) => entry = aliased,
            None => return Ok(void_return()),
        }
    }

    match classify(dwarf, unit, &entry) {
        ResolvedType::Named(name) => {
            let size = walker::byte_size(&entry).unwrap_or(0);
            let class = SizeClass::from_byte_size(size)?;
            Ok((name, class))
        }
        ResolvedType::Unnamed { byte_size } => {
            let class = SizeClass::from_byte_size(byte_size)?;
            Ok(("void *".to_string(), class))
        }
        ResolvedType::Void => Ok(void_return()),
    }
}

fn void_return() -> (String, SizeClass) {
    ("void".to_string(), SizeClass::Int16)
}

fn classify<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &Unit<R>,
    entry: &gimli::DebuggingInformationEntry<R>,
) -> ResolvedType {
    if let Some(name) = walker::entry_name(dwarf, unit, entry) {
        return ResolvedType::Named(name);
    }
    match walker::byte_size(entry) {
        Some(byte_size) => ResolvedType::Unnamed { byte_size },
        None => ResolvedType::Void,
    }
}
