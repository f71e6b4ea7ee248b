//! # county-query
//!
//! A line-driven query interpreter over county demographic records.
//!
//! A script is a sequence of newline-delimited instructions run against an
//! in-memory dataset of county records, one record per county. Filtering
//! instructions progressively narrow the current working set; reporting
//! instructions print aggregates over whatever remains selected. State
//! threads through the script: each line sees the working set its
//! predecessors left behind.
//!
//! ## Overview
//!
//! - **Working set**: the current ordered subset of county records,
//!   replaced wholesale by each filter
//! - **Weighted aggregation**: per-record field percentages converted to
//!   absolute counts via each county's 2014 population, then summed
//! - **Per-line isolation**: an error on one script line is reported and
//!   never stops the lines after it
//!
//! ## Example
//!
//! ```
//! use county_query::{CountyRecord, Interpreter, POPULATION_2014};
//!
//! let mut county = CountyRecord::new("King County", "WA");
//! county.population.insert(POPULATION_2014.to_string(), 2079967);
//! county.age.insert("Percent Under 18 Years".to_string(), 21.2);
//! let counties = vec![county];
//!
//! let mut interp = Interpreter::new(&counties);
//! let mut out = Vec::new();
//! interp.run_script("population-total", &mut out).unwrap();
//!
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "2014 Population: 2079967\n"
//! );
//! ```

pub mod error;
pub mod interp;
pub mod load;
pub mod record;
pub mod script;

pub use error::{LineError, SetupError};
pub use interp::Interpreter;
pub use load::load_counties;
pub use record::{CountyRecord, POPULATION_2014};
pub use script::{Instruction, InstructionKind, parse_instruction};
