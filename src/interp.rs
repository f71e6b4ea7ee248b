//! Interpreter for query scripts.
//!
//! Owns the current working set of county records and runs a script one
//! line at a time. Filtering instructions replace the working set with a
//! narrowed copy; reporting instructions write aggregate output and leave
//! it untouched. Errors on one line are reported and never stop the lines
//! after it.
//!
//! Supported operations:
//! - `population-total` - total 2014 population of the working set
//! - `population:<field>` - field percentage weighted by each county's
//!   2014 population, summed
//! - `percent:<field>` - weighted field population as a share of the total
//! - `display` - dump every county with all category fields
//! - `filter-state:<code>` - keep counties in the given state
//! - `filter-gt:<field>:<n>` / `filter-lt:<field>:<n>` - keep counties
//!   whose field value is strictly above / below the threshold

use std::io::{self, Write};

use crate::error::LineError;
use crate::record::CountyRecord;
use crate::script::{Instruction, InstructionKind, parse_instruction};

/// Registry of supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    TotalPopulation,
    FieldPopulation,
    FieldPercentage,
    Display,
    FilterState,
    FilterGt,
    FilterLt,
}

/// Look an operation name up in the registry. Names are colon-free: the
/// colon in `population:<field>` is a separator, not part of the name.
fn lookup(name: &str) -> Option<Op> {
    match name {
        "population-total" => Some(Op::TotalPopulation),
        "population" => Some(Op::FieldPopulation),
        "percent" => Some(Op::FieldPercentage),
        "display" => Some(Op::Display),
        "filter-state" => Some(Op::FilterState),
        "filter-gt" => Some(Op::FilterGt),
        "filter-lt" => Some(Op::FilterLt),
        _ => None,
    }
}

/// A validated instruction, ready to execute.
#[derive(Debug, Clone, PartialEq)]
enum Action {
    TotalPopulation,
    FieldPopulation(String),
    FieldPercentage(String),
    Display,
    FilterState(String),
    FilterGt(String, f64),
    FilterLt(String, f64),
}

/// Resolve a parsed instruction against the registry, checking arity and
/// argument types.
fn resolve(inst: &Instruction) -> Result<Action, LineError> {
    let Some(op) = lookup(&inst.name) else {
        return Err(LineError::UnknownOperation(inst.name.clone()));
    };
    match op {
        Op::TotalPopulation => {
            no_args(inst)?;
            Ok(Action::TotalPopulation)
        }
        Op::Display => {
            no_args(inst)?;
            Ok(Action::Display)
        }
        Op::FieldPopulation => Ok(Action::FieldPopulation(one_arg(inst, "a field name")?)),
        Op::FieldPercentage => Ok(Action::FieldPercentage(one_arg(inst, "a field name")?)),
        Op::FilterState => Ok(Action::FilterState(one_arg(inst, "a state code")?)),
        Op::FilterGt => {
            let (field, threshold) = field_and_threshold(inst)?;
            Ok(Action::FilterGt(field, threshold))
        }
        Op::FilterLt => {
            let (field, threshold) = field_and_threshold(inst)?;
            Ok(Action::FilterLt(field, threshold))
        }
    }
}

fn no_args(inst: &Instruction) -> Result<(), LineError> {
    if inst.args.is_empty() {
        Ok(())
    } else {
        Err(LineError::Argument {
            op: inst.name.clone(),
            expected: "no arguments",
        })
    }
}

fn one_arg(inst: &Instruction, expected: &'static str) -> Result<String, LineError> {
    match inst.args.as_slice() {
        [arg] if !arg.is_empty() => Ok(arg.clone()),
        _ => Err(LineError::Argument {
            op: inst.name.clone(),
            expected,
        }),
    }
}

fn field_and_threshold(inst: &Instruction) -> Result<(String, f64), LineError> {
    let [field, threshold] = inst.args.as_slice() else {
        return Err(LineError::Argument {
            op: inst.name.clone(),
            expected: "a field and a numeric threshold",
        });
    };
    if field.is_empty() {
        return Err(LineError::Argument {
            op: inst.name.clone(),
            expected: "a field and a numeric threshold",
        });
    }
    let threshold: f64 = threshold
        .parse()
        .map_err(|_| LineError::Threshold(threshold.clone()))?;
    Ok((field.clone(), threshold))
}

/// Total 2014 population across the working set.
fn total_population(counties: &[&CountyRecord]) -> u64 {
    counties.iter().map(|c| c.population_2014()).sum()
}

/// Weighted field population: each county's field percentage taken as a
/// fraction of that county's own 2014 population, summed. An estimate,
/// not an exact count.
fn field_population(counties: &[&CountyRecord], field: &str) -> f64 {
    counties
        .iter()
        .map(|c| c.population_2014() as f64 * c.field(field) / 100.0)
        .sum()
}

/// Weighted field population as a percentage of the total population.
/// Zero when the working set has no population (documented policy, not
/// an error).
fn field_percentage(counties: &[&CountyRecord], field: &str) -> f64 {
    let total = total_population(counties) as f64;
    if total > 0.0 {
        field_population(counties, field) / total * 100.0
    } else {
        0.0
    }
}

/// Full dump of every county in the working set: identity, population,
/// then the four categories in fixed order with fields in stored order.
fn display(counties: &[&CountyRecord]) -> String {
    let mut out = String::new();
    for county in counties {
        out.push_str(&format!("[{}]\n", county.name));
        out.push_str(&format!("\tPOPULATION: {}\n", county.population_2014()));
        for (heading, fields) in county.categories() {
            out.push_str(&format!("\t{heading}\n"));
            for (field, value) in fields {
                out.push_str(&format!("\t\t{field}: {value}%\n"));
            }
        }
    }
    out
}

/// Runs a script against a dataset, threading the working set from line
/// to line. The working set starts as the full dataset and is owned
/// exclusively by the interpreter.
pub struct Interpreter<'a> {
    working: Vec<&'a CountyRecord>,
}

impl<'a> Interpreter<'a> {
    pub fn new(counties: &'a [CountyRecord]) -> Self {
        Self {
            working: counties.iter().collect(),
        }
    }

    /// The current working set, in dataset order.
    pub fn working_set(&self) -> &[&'a CountyRecord] {
        &self.working
    }

    /// Execute one parsed instruction. Reports return their text; filters
    /// replace the working set and return nothing.
    pub fn execute(&mut self, inst: &Instruction) -> Result<Option<String>, LineError> {
        match resolve(inst)? {
            Action::TotalPopulation => Ok(Some(format!(
                "2014 Population: {}\n",
                total_population(&self.working)
            ))),
            Action::FieldPopulation(field) => Ok(Some(format!(
                "2014 {field} population: {}\n",
                field_population(&self.working, &field)
            ))),
            Action::FieldPercentage(field) => Ok(Some(format!(
                "2014 {field} percentage: {}%\n",
                field_percentage(&self.working, &field)
            ))),
            Action::Display => Ok(Some(display(&self.working))),
            Action::FilterState(code) => {
                let narrowed: Vec<&CountyRecord> = self
                    .working
                    .iter()
                    .copied()
                    .filter(|c| c.state == code)
                    .collect();
                self.working = narrowed;
                Ok(None)
            }
            Action::FilterGt(field, threshold) => {
                let narrowed: Vec<&CountyRecord> = self
                    .working
                    .iter()
                    .copied()
                    .filter(|c| c.field(&field) > threshold)
                    .collect();
                self.working = narrowed;
                Ok(None)
            }
            Action::FilterLt(field, threshold) => {
                let narrowed: Vec<&CountyRecord> = self
                    .working
                    .iter()
                    .copied()
                    .filter(|c| c.field(&field) < threshold)
                    .collect();
                self.working = narrowed;
                Ok(None)
            }
        }
    }

    /// Run a whole script, writing reports and line-scoped errors to `out`.
    ///
    /// Line numbers are 1-based and count every script line, blank lines
    /// included. An unknown reporting operation gets the short
    /// `Invalid operation` message; every other line-scoped error is
    /// reported with its line number and original text. Neither stops the
    /// remaining lines.
    pub fn run_script<W: Write>(&mut self, script: &str, out: &mut W) -> io::Result<()> {
        for (idx, raw) in script.lines().enumerate() {
            let line = raw.trim();
            let inst = parse_instruction(line);
            let kind = inst.kind();
            match self.execute(&inst) {
                Ok(Some(report)) => write!(out, "{report}")?,
                Ok(None) => {}
                Err(LineError::UnknownOperation(name)) if kind == InstructionKind::Report => {
                    writeln!(out, "Error: Invalid operation '{name}'")?;
                }
                Err(e) => {
                    writeln!(
                        out,
                        "An error occurred at line {}: {}. Error: {e}",
                        idx + 1,
                        line
                    )?;
                }
            }
        }
        Ok(())
    }
}
