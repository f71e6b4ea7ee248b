//! Script line parser.
//!
//! A query script is newline-delimited instructions, one per line:
//! ```text
//! filter-state: CA
//! filter-gt: Ethnicities.Two or More Races : 10
//! population-total
//! percent: Education.Bachelor's Degree or Higher
//! display
//! ```
//!
//! The first colon separates the operation name from its arguments; any
//! further colons separate arguments from each other. Every token is
//! trimmed. The parser is purely syntactic: it never rejects a line, so
//! the interpreter can report unknown operation names distinctly from
//! argument problems.

/// Whether an instruction narrows the working set or reports over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstructionKind {
    Filter,
    Report,
}

/// One parsed script line: colon-free operation name plus trimmed
/// arguments. Ephemeral, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub name: String,
    pub args: Vec<String>,
}

impl Instruction {
    /// Filtering instructions are the ones whose name contains `filter`
    /// (the literal operation names all start with it); anything else is
    /// a report over the current working set.
    pub fn kind(&self) -> InstructionKind {
        if self.name.contains("filter") {
            InstructionKind::Filter
        } else {
            InstructionKind::Report
        }
    }
}

/// Parse one raw script line into an instruction.
pub fn parse_instruction(line: &str) -> Instruction {
    let line = line.trim();
    match line.split_once(':') {
        None => Instruction {
            name: line.to_string(),
            args: Vec::new(),
        },
        Some((name, rest)) => Instruction {
            name: name.trim().to_string(),
            args: rest.split(':').map(|arg| arg.trim().to_string()).collect(),
        },
    }
}
