//! Flat lookup helpers over a compilation unit's record tree
use gimli::{AttributeValue, DebuggingInformationEntry, Dwarf, Reader, Unit, UnitOffset};

/// Look up the record at `offset` within `unit`.
///
/// Offsets are unique per unit, so the cursor lookup returns the same
/// record a full scan would. A dangling reference yields `None`; callers
/// fall back to void.
pub(crate) fn entry_at_offset<'a, R: Reader>(
    unit: &'a Unit<R>,
    offset: UnitOffset<R::Offset>,
) -> Option<DebuggingInformationEntry<'a, 'a, R>> {
    let mut entries = unit.entries_at_offset(offset).ok()?;
    let (_, entry) = entries.next_dfs().ok()??;
    Some(entry.clone())
}

/// Follow the type reference on `entry`, if it carries one.
pub(crate) fn type_ref<R: Reader>(
    entry: &DebuggingInformationEntry<R>,
) -> Option<UnitOffset<R::Offset>> {
    match entry.attr(gimli::DW_AT_type).ok().flatten()?.value() {
        AttributeValue::UnitRef(offset) => Some(offset),
        _ => None,
    }
}

/// Read a string attribute. `Dwarf::attr_string` handles both inline
/// strings and `.debug_str` references.
pub(crate) fn attr_string<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &Unit<R>,
    value: AttributeValue<R>,
) -> Option<String> {
    let reader = dwarf.attr_string(unit, value).ok()?;
    match reader.to_string_lossy() {
        Ok(cow) => Some(cow.into_owned()),
        Err(e) => {
            log::warn!("failed to decode string attribute: {:?}", e);
            None
        }
    }
}

/// The record's declared name, if present and decodable.
pub(crate) fn entry_name<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &Unit<R>,
    entry: &DebuggingInformationEntry<R>,
) -> Option<String> {
    let attr = entry.attr(gimli::DW_AT_name).ok().flatten()?;
    attr_string(dwarf, unit, attr.value())
}

/// The record's declared byte size, if present.
pub(crate) fn byte_size<R: Reader>(entry: &DebuggingInformationEntry<R>) -> Option<u64> {
    entry
        .attr(gimli::DW_AT_byte_size)
        .ok()
        .flatten()
        .and_then(|attr| attr.udata_value())
}
