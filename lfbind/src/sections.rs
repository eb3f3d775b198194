//! Section metadata for the two named module regions
use object::{Object, ObjectSection};
use serde::Serialize;

/// Section holding the module's dispatchable functions.
pub const FUNCTIONS_SECTION: &str = ".lf.funcs";
/// Section holding the module's exported variables.
pub const VARIABLES_SECTION: &str = ".lf.vars";

/// Half-open address interval `[addr, addr + size)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AddressRange {
    pub addr: u64,
    pub size: u64,
}

impl AddressRange {
    pub fn contains(&self, addr: u64) -> bool {
        addr >= self.addr && addr < self.addr + self.size
    }
}

/// Address ranges of the module regions, read from section headers. A
/// missing section leaves its range zeroed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ModuleRegions {
    pub functions: AddressRange,
    pub variables: AddressRange,
}

impl ModuleRegions {
    pub fn from_object(object_file: &object::File) -> Self {
        let mut regions = Self::default();

        for section in object_file.sections() {
            let range = match section.name() {
                Ok(FUNCTIONS_SECTION) => &mut regions.functions,
                Ok(VARIABLES_SECTION) => &mut regions.variables,
                _ => continue,
            };
            range.addr = section.address();
            range.size = section.size();
        }

        regions
    }

    /// A function region that never got an address holds nothing to bind;
    /// the whole run is then expected to produce no output.
    pub fn has_function_region(&self) -> bool {
        self.functions.addr != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let range = AddressRange {
            addr: 0x1000,
            size: 0x100,
        };

        assert!(range.contains(0x1000));
        assert!(range.contains(0x10ff));
        assert!(!range.contains(0x1100));
        assert!(!range.contains(0xfff));
    }

    #[test]
    fn test_zeroed_range_contains_nothing() {
        let range = AddressRange::default();
        assert!(!range.contains(0));
        assert!(!range.contains(1));
    }

    #[test]
    fn test_default_regions_have_no_function_region() {
        assert!(!ModuleRegions::default().has_function_region());
    }

    #[test]
    fn test_addressed_function_region_qualifies() {
        let regions = ModuleRegions {
            functions: AddressRange {
                addr: 0x8000,
                size: 0x40,
            },
            variables: AddressRange::default(),
        };
        assert!(regions.has_function_region());
    }
}
