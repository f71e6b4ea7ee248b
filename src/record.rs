//! County demographic records.
//!
//! Each record carries the county's population counts plus four categories
//! of percentage-valued fields (age, education, ethnicities, income).
//! Category maps preserve insertion order, which the loader takes from the
//! dataset's column order and `display` reports verbatim.

use indexmap::IndexMap;

/// The population entry used as the weighting base for all percentage
/// queries.
pub const POPULATION_2014: &str = "2014 Population";

/// One county's demographics. Field values are percentages in [0, 100] of
/// the county's own population; categories are independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountyRecord {
    pub name: String,
    pub state: String,
    pub population: IndexMap<String, u64>,
    pub age: IndexMap<String, f64>,
    pub education: IndexMap<String, f64>,
    pub ethnicities: IndexMap<String, f64>,
    pub income: IndexMap<String, f64>,
}

impl CountyRecord {
    pub fn new(name: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: state.into(),
            ..Self::default()
        }
    }

    /// 2014 population, or 0 when the entry is absent.
    pub fn population_2014(&self) -> u64 {
        self.population.get(POPULATION_2014).copied().unwrap_or(0)
    }

    /// Look a field up by its category-qualified name, e.g.
    /// `Education.Bachelor's Degree or Higher`. Unqualified names are
    /// scanned across the four categories in category order. Missing
    /// fields read as 0.
    pub fn field(&self, name: &str) -> f64 {
        if let Some((category, field)) = name.split_once('.') {
            let fields = match category {
                "Age" => Some(&self.age),
                "Education" => Some(&self.education),
                "Ethnicities" => Some(&self.ethnicities),
                "Income" => Some(&self.income),
                _ => None,
            };
            if let Some(fields) = fields {
                return fields.get(field).copied().unwrap_or(0.0);
            }
        }
        for (_, fields) in self.categories() {
            if let Some(value) = fields.get(name) {
                return *value;
            }
        }
        0.0
    }

    /// The four categories with their report headings, in the fixed order
    /// `display` enumerates them.
    pub fn categories(&self) -> [(&'static str, &IndexMap<String, f64>); 4] {
        [
            ("AGE", &self.age),
            ("EDUCATION", &self.education),
            ("ETHNICITIES", &self.ethnicities),
            ("INCOME", &self.income),
        ]
    }
}
