//! MIR modules: the ordered list of functions handed to a backend, plus
//! the textual dump form.

use crate::{MirFunction, PrettyPrint};

#[derive(Debug, Clone, Default)]
pub struct MirModule {
    pub name: String,
    pub functions: Vec<MirFunction>,
}

impl MirModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), functions: Vec::new() }
    }

    pub fn push_function(&mut self, function: MirFunction) {
        self.functions.push(function);
    }

    pub fn function(&self, name: &str) -> Option<&MirFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// spec.md §8 property 3, applied module-wide: every function must be
    /// well-formed for the module as a whole to be handed to a backend.
    pub fn is_well_formed(&self) -> bool {
        self.functions.iter().all(MirFunction::is_well_formed)
    }
}

impl PrettyPrint for MirModule {
    fn pretty_print(&self, indent: usize) -> String {
        let mut out = format!("; module {}\n", self.name);
        for (i, func) in self.functions.iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            out.push_str(&func.pretty_print(indent));
        }
        out
    }
}

impl std::fmt::Display for MirModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pretty_print(0))
    }
}
