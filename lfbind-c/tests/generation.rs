//! End-to-end generation over synthesized ELF containers.
use gimli::write::{DwarfUnit, EndianVec, Sections};
use lfbind::BindError;
use lfbind_c::{Templates, generate};
use object::write::Object;
use object::{Architecture, BinaryFormat, Endianness, SectionKind};

/// Serialized DWARF sections for an empty compilation unit: real debug
/// info, but nothing placed anywhere.
fn minimal_dwarf_sections() -> Vec<(&'static str, Vec<u8>)> {
    let encoding = gimli::Encoding {
        format: gimli::Format::Dwarf32,
        version: 4,
        address_size: 8,
    };
    let mut dwarf = DwarfUnit::new(encoding);

    let mut sections = Sections::new(EndianVec::new(gimli::LittleEndian));
    dwarf.write(&mut sections).expect("write DWARF sections");

    let mut out = Vec::new();
    sections
        .for_each(|id, data| {
            if !data.slice().is_empty() {
                out.push((id.name(), data.slice().to_vec()));
            }
            Ok::<_, gimli::Error>(())
        })
        .unwrap();
    out
}

fn elf_with_sections(sections: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut object = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    for (name, data) in sections {
        let id = object.add_section(Vec::new(), name.as_bytes().to_vec(), SectionKind::Debug);
        object.append_section_data(id, data, 1);
    }
    object.write().expect("write ELF")
}

#[test]
fn test_missing_debug_info_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("module.elf");
    std::fs::write(&binary, elf_with_sections(&[])).unwrap();

    let err = generate(&binary, "qux", &Templates::builtin(), dir.path()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<BindError>(),
        Some(BindError::MissingDebugInfo)
    ));
    assert!(!dir.path().join("qux.h").exists());
    assert!(!dir.path().join("qux.c").exists());
}

#[test]
fn test_missing_function_region_generates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("module.elf");
    let sections = minimal_dwarf_sections();
    std::fs::write(&binary, elf_with_sections(&sections)).unwrap();

    let outcome = generate(&binary, "qux", &Templates::builtin(), dir.path()).unwrap();

    assert!(outcome.is_none());
    assert!(!dir.path().join("qux.h").exists());
    assert!(!dir.path().join("qux.c").exists());
}

#[test]
fn test_nonexistent_binary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let binary = dir.path().join("missing/module.elf");

    assert!(generate(&binary, "qux", &Templates::builtin(), dir.path()).is_err());
}
