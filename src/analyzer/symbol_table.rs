use std::collections::HashMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarType {
    Number,
    Str,
    Boolean,
    Unknown,
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            VarType::Number => "NUMBER",
            VarType::Str => "STRING",
            VarType::Boolean => "BOOLEAN",
            VarType::Unknown => "UNKNOWN",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VariableInfo {
    pub ty: VarType,
    pub line_declared: usize,
}

/// One entry per declared name; redeclaration is reported by the visitor,
/// never silently overwritten. Rebuilt from scratch for every analysis.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    table: HashMap<String, VariableInfo>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    pub fn declare(&mut self, name: &str, ty: VarType, line: usize) {
        self.table.insert(
            name.to_string(),
            VariableInfo {
                ty,
                line_declared: line,
            },
        );
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.table.get(name)
    }

    pub fn type_of(&self, name: &str) -> VarType {
        self.table
            .get(name)
            .map(|info| info.ty)
            .unwrap_or(VarType::Unknown)
    }
}
