use crate::error::BindError;
use serde::Serialize;
use std::fmt;

/// Byte-width classification of a return value, used to pick the matching
/// dispatch marshaling routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeClass {
    Void,
    Int8,
    Int16,
    Int32,
}

impl SizeClass {
    /// Map a declared byte size onto a dispatch class. Any size outside
    /// the table is unrepresentable and surfaces as an error.
    pub fn from_byte_size(size: u64) -> Result<Self, BindError> {
        match size {
            1 => Ok(SizeClass::Int8),
            2 => Ok(SizeClass::Int16),
            4 => Ok(SizeClass::Int32),
            other => Err(BindError::UnsupportedReturnSize(other)),
        }
    }

    /// The FMR type literal spelled into generated dispatch calls.
    pub fn literal(self) -> &'static str {
        match self {
            SizeClass::Void => "fmr_void_t",
            SizeClass::Int8 => "fmr_int8_t",
            SizeClass::Int16 => "fmr_int16_t",
            SizeClass::Int32 => "fmr_int32_t",
        }
    }
}

/// One formal parameter: declared type name and declared name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub type_name: String,
    pub name: String,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_name, self.name)
    }
}

/// A complete function signature. The collection order of signatures is
/// discovery order within the unit scan and is the single source of
/// ordering for everything generated from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: String,
    pub return_class: SizeClass,
    pub parameters: Vec<Parameter>,
}

impl FunctionSignature {
    /// Comma-joined parameter list as it appears between parentheses.
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FunctionSignature {
    /// C-style declaration without the trailing semicolon.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}({})",
            self.return_type,
            self.name,
            self.parameter_list()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int32_signature() -> FunctionSignature {
        FunctionSignature {
            name: "add".to_string(),
            return_type: "int32_t".to_string(),
            return_class: SizeClass::Int32,
            parameters: vec![
                Parameter {
                    type_name: "int32_t".to_string(),
                    name: "a".to_string(),
                },
                Parameter {
                    type_name: "int32_t".to_string(),
                    name: "b".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_size_class_mapping() {
        assert_eq!(SizeClass::from_byte_size(1).unwrap(), SizeClass::Int8);
        assert_eq!(SizeClass::from_byte_size(2).unwrap(), SizeClass::Int16);
        assert_eq!(SizeClass::from_byte_size(4).unwrap(), SizeClass::Int32);
    }

    #[test]
    fn test_size_class_rejects_unknown_widths() {
        for size in [0, 3, 8, 16] {
            let err = SizeClass::from_byte_size(size).unwrap_err();
            assert!(matches!(err, BindError::UnsupportedReturnSize(s) if s == size));
        }
    }

    #[test]
    fn test_size_class_literals() {
        assert_eq!(SizeClass::Void.literal(), "fmr_void_t");
        assert_eq!(SizeClass::Int8.literal(), "fmr_int8_t");
        assert_eq!(SizeClass::Int16.literal(), "fmr_int16_t");
        assert_eq!(SizeClass::Int32.literal(), "fmr_int32_t");
    }

    #[test]
    fn test_declaration_formatting() {
        assert_eq!(
            int32_signature().to_string(),
            "int32_t add(int32_t a, int32_t b)"
        );
    }

    #[test]
    fn test_empty_parameter_list_renders_empty_parens() {
        let sig = FunctionSignature {
            name: "reset".to_string(),
            return_type: "void".to_string(),
            return_class: SizeClass::Int16,
            parameters: vec![],
        };
        assert_eq!(sig.to_string(), "void reset()");
    }
}
