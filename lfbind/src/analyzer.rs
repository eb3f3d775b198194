use crate::error::BindError;
use crate::reader;
use crate::resolver;
use crate::sections::{AddressRange, ModuleRegions};
use crate::types::{FunctionSignature, Parameter};
use crate::walker;
use anyhow::Result;
use gimli::{Dwarf, Reader, ReaderOffset, UnitOffset};

/// Reads one module binary and extracts the signatures of every function
/// placed in its function region.
pub struct ModuleAnalyzer {
    data: Vec<u8>,
}

impl ModuleAnalyzer {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Load the module binary from a file path.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let data = reader::load_file(path)?;
        Ok(Self::new(data))
    }

    /// Section ranges of the two module regions.
    pub fn regions(&self) -> Result<ModuleRegions> {
        let object_file = object::File::parse(self.data.as_slice())?;
        Ok(ModuleRegions::from_object(&object_file))
    }

    /// Extract the ordered signature list for the function region.
    ///
    /// Returns `None` when the binary has no located function region; the
    /// caller is expected to generate nothing in that case. A binary with
    /// no DWARF records at all is an error instead.
    pub fn extract_signatures(&self) -> Result<Option<Vec<FunctionSignature>>> {
        let object_file = object::File::parse(self.data.as_slice())?;
        let load_section = reader::dwarf_section_loader(&object_file);
        let dwarf = Dwarf::load(load_section)?;
        log::debug!("DWARF data load success");

        let mut units = dwarf.units();
        if units.next()?.is_none() {
            return Err(BindError::MissingDebugInfo.into());
        }

        let regions = ModuleRegions::from_object(&object_file);
        if !regions.has_function_region() {
            log::info!("no function region in binary, nothing to bind");
            return Ok(None);
        }

        log::debug!(
            "function region {:#010x}+{:#x}, variable region {:#010x}+{:#x}",
            regions.functions.addr,
            regions.functions.size,
            regions.variables.addr,
            regions.variables.size
        );

        let signatures = signatures_from_dwarf(&dwarf, &regions.functions)?;
        Ok(Some(signatures))
    }
}

/// Walk every compilation unit and collect signatures for the functions
/// whose entry address falls inside `functions`, in discovery order.
///
/// Kept separate from [`ModuleAnalyzer`] so debug info held outside the
/// module binary (split debug files) can be fed in directly.
pub fn signatures_from_dwarf<R: Reader>(
    dwarf: &Dwarf<R>,
    functions: &AddressRange,
) -> Result<Vec<FunctionSignature>> {
    let mut signatures = Vec::new();
    let mut unit_iter = dwarf.units();
    let mut unit_count = 0;

    // every unit is scanned, including ones that placed nothing in the
    // function region
    while let Some(header) = unit_iter.next()? {
        unit_count += 1;
        let unit = dwarf.unit(header)?;
        extract_unit(dwarf, &unit, functions, &mut signatures)?;
    }

    log::info!(
        "scanned {} compilation units, {} functions qualify",
        unit_count,
        signatures.len()
    );
    Ok(signatures)
}

fn extract_unit<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &gimli::Unit<R>,
    functions: &AddressRange,
    signatures: &mut Vec<FunctionSignature>,
) -> Result<()> {
    // functions live directly under the unit root; nothing nested can land
    // in the function region
    let mut tree = unit.entries_tree(None)?;
    let root = tree.root()?;
    let mut children = root.children();

    while let Some(child) = children.next()? {
        let entry = child.entry().clone();

        if entry.tag() != gimli::DW_TAG_subprogram {
            continue;
        }

        let Some(address) = entry_address(dwarf, unit, &entry)? else {
            log::trace!(
                "skip subprogram without entry address @{:#010x}",
                entry.offset().0.into_u64()
            );
            continue;
        };
        if !functions.contains(address) {
            log::trace!("skip out-of-region function at {:#010x}", address);
            continue;
        }

        let Some(name) = walker::entry_name(dwarf, unit, &entry) else {
            log::trace!(
                "skip unnamed subprogram @{:#010x}",
                entry.offset().0.into_u64()
            );
            continue;
        };

        let (return_type, return_class) =
            resolver::resolve_return_type(dwarf, unit, walker::type_ref(&entry))?;

        let parameters = extract_parameters(dwarf, unit, entry.offset())?;

        log::debug!("{:>12} {:#010x}: {}()", "function", address, name);

        signatures.push(FunctionSignature {
            name,
            return_type,
            return_class,
            parameters,
        });
    }

    Ok(())
}

/// Entry address of a subprogram record, when it has one.
fn entry_address<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &gimli::Unit<R>,
    entry: &gimli::DebuggingInformationEntry<R>,
) -> Result<Option<u64>> {
    let Some(attr) = entry.attr(gimli::DW_AT_low_pc)? else {
        return Ok(None);
    };
    Ok(dwarf.attr_address(unit, attr.value())?)
}

/// Parameters are direct children of the function record. Anything other
/// than a formal parameter (variables, lexical blocks) is passed over.
fn extract_parameters<R: Reader>(
    dwarf: &Dwarf<R>,
    unit: &gimli::Unit<R>,
    func_offset: UnitOffset<R::Offset>,
) -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    let mut tree = unit.entries_tree(Some(func_offset))?;
    let func_node = tree.root()?;

    let mut children = func_node.children();
    while let Some(child) = children.next()? {
        let child_entry = child.entry();

        if child_entry.tag() != gimli::DW_TAG_formal_parameter {
            log::trace!(
                "non parameter tag {} @{:#010x}",
                child_entry.tag(),
                child_entry.offset().0.into_u64()
            );
            continue;
        }

        let name = walker::entry_name(dwarf, unit, child_entry).unwrap_or_default();
        let resolved =
            resolver::resolve_parameter_type(dwarf, unit, walker::type_ref(child_entry));

        log::debug!(
            "{:>12} {:#010x}: {} {}",
            "parameter",
            child_entry.offset().0.into_u64(),
            resolved.type_name(),
            name
        );

        parameters.push(Parameter {
            type_name: resolved.type_name().to_string(),
            name,
        });
    }

    Ok(parameters)
}
