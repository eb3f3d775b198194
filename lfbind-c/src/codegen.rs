//! Render the interface and implementation documents from an ordered
//! signature list.
//!
//! The signature order is the one contract that matters here: the table
//! member block, the declaration block, the tag list and the initializer
//! all walk the same sequence, so ordinal positions line up across both
//! documents.
use crate::templates::{self, Templates};
use anyhow::{Context, Result};
use lfbind::{FunctionSignature, ModuleAnalyzer};
use std::path::{Path, PathBuf};

/// Dispatch slot tag for one function: `_<package>_<name>`. Unique as
/// long as function names are unique within the binary.
fn tag(package: &str, signature: &FunctionSignature) -> String {
    format!("_{}_{}", package, signature.name)
}

/// One function-pointer field per signature, tab-indented.
fn struct_members(signatures: &[FunctionSignature]) -> String {
    let fields: Vec<String> = signatures
        .iter()
        .map(|f| format!("{} (* {})({});", f.return_type, f.name, f.parameter_list()))
        .collect();
    format!("\t{}", fields.join("\n\t"))
}

/// One forward declaration per signature.
fn declarations(signatures: &[FunctionSignature]) -> String {
    signatures
        .iter()
        .map(|f| format!("{};", f))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comma-joined tags in signature order.
fn tag_list(package: &str, signatures: &[FunctionSignature]) -> String {
    signatures
        .iter()
        .map(|f| tag(package, f))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Address-of-function entries, same order as the declarations.
fn table_initializer(signatures: &[FunctionSignature]) -> String {
    let entries: Vec<String> = signatures.iter().map(|f| format!("&{}", f.name)).collect();
    format!("\t{}", entries.join(",\n\t"))
}

/// Weakly-bound forwarding bodies. Argument marshaling types are inferred
/// from the values at call time; the extracted signature only has to make
/// the call site type-check.
fn trampolines(package: &str, signatures: &[FunctionSignature]) -> String {
    let mut bodies = Vec::new();

    for f in signatures {
        let args: Vec<String> = f
            .parameters
            .iter()
            .map(|p| format!("fmr_infer({})", p.name))
            .collect();
        let call = format!(
            "lf_invoke(&_{}, {}, {}, fmr_args({}))",
            package,
            tag(package, f),
            f.return_class.literal(),
            args.join(", ")
        );

        let body = if f.return_type == "void" {
            format!("\t{};\n\treturn;", call)
        } else {
            format!("\treturn {};", call)
        };

        bodies.push(format!("LF_WEAK {} {{\n{}\n}}\n", f, body));
    }

    bodies.join("\n")
}

/// Substitute the interface template. Tokens are verified before any
/// substitution; replacement order matches the token layout, PACKAGE
/// first.
pub fn render_interface(
    templates: &Templates,
    package: &str,
    signatures: &[FunctionSignature],
) -> Result<String> {
    templates::ensure_placeholders(&templates.interface, templates::INTERFACE_PLACEHOLDERS)?;

    Ok(templates
        .interface
        .replace("PACKAGE", package)
        .replace("STRUCT", &struct_members(signatures))
        .replace("FUNCTIONS", &declarations(signatures))
        .replace("TAGS", &tag_list(package, signatures)))
}

/// Substitute the implementation template. No variable bindings are
/// emitted; the VARIABLES block vanishes along with its trailing blank
/// line.
pub fn render_implementation(
    templates: &Templates,
    package: &str,
    signatures: &[FunctionSignature],
) -> Result<String> {
    templates::ensure_placeholders(
        &templates.implementation,
        templates::IMPLEMENTATION_PLACEHOLDERS,
    )?;

    Ok(templates
        .implementation
        .replace("PACKAGE", package)
        .replace("VARIABLES\n\n", "")
        .replace("STRUCT", &table_initializer(signatures))
        .replace("FUNCTIONS", &trampolines(package, signatures)))
}

/// Paths written by one successful generation run.
#[derive(Debug)]
pub struct GeneratedFiles {
    pub header: PathBuf,
    pub source: PathBuf,
}

/// Run the whole pipeline for one binary.
///
/// Returns `Ok(None)` without touching the filesystem when the binary has
/// no locatable function region. Both documents are rendered before
/// either file is written, so a template error never leaves output
/// behind. Existing files are overwritten without confirmation.
pub fn generate(
    binary: &Path,
    package: &str,
    templates: &Templates,
    out_dir: &Path,
) -> Result<Option<GeneratedFiles>> {
    let analyzer = ModuleAnalyzer::from_file(binary)?;
    let Some(signatures) = analyzer.extract_signatures()? else {
        return Ok(None);
    };

    log::info!(
        "binding {} functions from {}",
        signatures.len(),
        binary.display()
    );

    let interface = render_interface(templates, package, &signatures)?;
    let implementation = render_implementation(templates, package, &signatures)?;

    let header = out_dir.join(format!("{package}.h"));
    let source = out_dir.join(format!("{package}.c"));
    std::fs::write(&header, interface)
        .with_context(|| format!("failed to write {}", header.display()))?;
    std::fs::write(&source, implementation)
        .with_context(|| format!("failed to write {}", source.display()))?;

    Ok(Some(GeneratedFiles { header, source }))
}
