//! Load module binaries and feed their sections to gimli
use anyhow::{Context, Result};
use gimli::{EndianRcSlice, RunTimeEndian};
use object::{Object, ObjectSection};

pub type DwarfReader = EndianRcSlice<RunTimeEndian>;

pub fn load_file(path: &std::path::Path) -> Result<Vec<u8>> {
    log::debug!("load module binary: {}", path.display());

    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open module binary: {}", path.display()))?;

    let mmap = unsafe { memmap2::Mmap::map(&file)? };
    let data = mmap.to_vec();

    log::debug!("binary load success, size: {} bytes", data.len());
    Ok(data)
}

/// Build the section loader `gimli::Dwarf::load` drives. Missing sections
/// load as empty; an undecompressible section is logged and skipped rather
/// than failing the whole run.
pub fn dwarf_section_loader<'a>(
    object_file: &'a object::File<'a>,
) -> impl Fn(gimli::SectionId) -> Result<DwarfReader> + 'a {
    let endianness = if object_file.is_little_endian() {
        RunTimeEndian::Little
    } else {
        RunTimeEndian::Big
    };

    move |id: gimli::SectionId| -> Result<DwarfReader> {
        let section_name = id.name();
        let section_data = match object_file.section_by_name(section_name) {
            Some(section) => match section.uncompressed_data() {
                Ok(data) => data,
                Err(_) => {
                    log::warn!("decompress section fail, section: {}", section_name);
                    std::borrow::Cow::Borrowed(&[][..])
                }
            },
            None => std::borrow::Cow::Borrowed(&[][..]),
        };

        let rc_data = std::rc::Rc::from(section_data.into_owned());
        Ok(EndianRcSlice::new(rc_data, endianness))
    }
}
