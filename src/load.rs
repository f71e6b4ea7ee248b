//! Dataset loader: county demographics CSV to an ordered record sequence.
//!
//! Expected header layout: `County`, `State`, one or more year-population
//! columns (e.g. `2014 Population`), and category-qualified percentage
//! columns written `<Category>.<Field>`, e.g.
//! `Education.Bachelor's Degree or Higher`. Unrecognized columns are
//! skipped. Column order is preserved into each record's category maps;
//! `display` reports fields in that order.

use std::io;
use std::path::Path;

use crate::error::SetupError;
use crate::record::{CountyRecord, POPULATION_2014};

/// What a header cell maps to on each data row.
enum Column {
    County,
    State,
    Population(String),
    Age(String),
    Education(String),
    Ethnicities(String),
    Income(String),
    Skipped,
}

fn classify(header: &str) -> Column {
    match header {
        "County" => Column::County,
        "State" => Column::State,
        h if h.ends_with("Population") => Column::Population(h.to_string()),
        h => match h.split_once('.') {
            Some(("Age", field)) => Column::Age(field.to_string()),
            Some(("Education", field)) => Column::Education(field.to_string()),
            Some(("Ethnicities", field)) => Column::Ethnicities(field.to_string()),
            Some(("Income", field)) => Column::Income(field.to_string()),
            _ => Column::Skipped,
        },
    }
}

/// Load the full dataset, preserving row order.
pub fn load_counties(path: &Path) -> Result<Vec<CountyRecord>, SetupError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| {
            if let csv::ErrorKind::Io(io_err) = e.kind()
                && io_err.kind() == io::ErrorKind::NotFound
            {
                return SetupError::FileNotFound;
            }
            SetupError::Csv(e)
        })?;

    let headers = reader.headers()?.clone();
    let columns: Vec<Column> = headers.iter().map(classify).collect();

    if !columns.iter().any(|c| matches!(c, Column::County)) {
        return Err(SetupError::MissingColumn("County"));
    }
    if !columns.iter().any(|c| matches!(c, Column::State)) {
        return Err(SetupError::MissingColumn("State"));
    }
    if !columns
        .iter()
        .any(|c| matches!(c, Column::Population(label) if label == POPULATION_2014))
    {
        return Err(SetupError::MissingColumn(POPULATION_2014));
    }

    let mut counties = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut county = CountyRecord::default();
        for (column, cell) in columns.iter().zip(row.iter()) {
            match column {
                Column::County => county.name = cell.to_string(),
                Column::State => county.state = cell.to_string(),
                Column::Population(label) => {
                    county
                        .population
                        .insert(label.clone(), parse_count(label, cell)?);
                }
                Column::Age(field) => {
                    county.age.insert(field.clone(), parse_percent(field, cell)?);
                }
                Column::Education(field) => {
                    county
                        .education
                        .insert(field.clone(), parse_percent(field, cell)?);
                }
                Column::Ethnicities(field) => {
                    county
                        .ethnicities
                        .insert(field.clone(), parse_percent(field, cell)?);
                }
                Column::Income(field) => {
                    county
                        .income
                        .insert(field.clone(), parse_percent(field, cell)?);
                }
                Column::Skipped => {}
            }
        }
        counties.push(county);
    }
    Ok(counties)
}

fn parse_count(column: &str, cell: &str) -> Result<u64, SetupError> {
    cell.parse().map_err(|_| SetupError::BadCell {
        column: column.to_string(),
        value: cell.to_string(),
    })
}

fn parse_percent(column: &str, cell: &str) -> Result<f64, SetupError> {
    cell.parse().map_err(|_| SetupError::BadCell {
        column: column.to_string(),
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("counties.csv");
        fs::write(&path, content).unwrap();
        path
    }

    const DATASET: &str = "\
County,State,2014 Population,Age.Percent Under 18 Years,Education.Bachelor's Degree or Higher,Ethnicities.White Alone,Income.Persons Below Poverty Level
King County,WA,2079967,21.2,47.1,70.1,11.3
Multnomah County,OR,776712,19.8,41.4,80.7,16.9
";

    #[test]
    fn test_load_preserves_row_and_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), DATASET);

        let counties = load_counties(&path).unwrap();
        assert_eq!(counties.len(), 2);

        let king = &counties[0];
        assert_eq!(king.name, "King County");
        assert_eq!(king.state, "WA");
        assert_eq!(king.population_2014(), 2079967);
        assert_eq!(king.field("Percent Under 18 Years"), 21.2);
        assert_eq!(king.field("Bachelor's Degree or Higher"), 47.1);
        assert_eq!(king.field("White Alone"), 70.1);
        assert_eq!(king.field("Persons Below Poverty Level"), 11.3);

        assert_eq!(counties[1].name, "Multnomah County");
    }

    #[test]
    fn test_category_fields_keep_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(
            dir.path(),
            "\
County,State,2014 Population,Age.Percent Under 5 Years,Age.Percent Under 18 Years,Age.Percent 65 and Older
King County,WA,2079967,6.2,21.2,11.9
",
        );

        let counties = load_counties(&path).unwrap();
        let fields: Vec<&str> = counties[0].age.keys().map(String::as_str).collect();
        assert_eq!(
            fields,
            vec![
                "Percent Under 5 Years",
                "Percent Under 18 Years",
                "Percent 65 and Older"
            ]
        );
    }

    #[test]
    fn test_loaded_dataset_answers_qualified_queries() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), DATASET);
        let counties = load_counties(&path).unwrap();

        // Multnomah (16.9) is above the poverty threshold, King (11.3) is not.
        let mut interp = crate::Interpreter::new(&counties);
        let mut out = Vec::new();
        interp
            .run_script(
                "filter-gt: Income.Persons Below Poverty Level : 12\npopulation-total",
                &mut out,
            )
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2014 Population: 776712\n"
        );
    }

    #[test]
    fn test_missing_file_is_file_not_found() {
        let err = load_counties(Path::new("no/such/dataset.csv")).unwrap_err();
        assert!(matches!(err, SetupError::FileNotFound));
    }

    #[test]
    fn test_missing_population_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(dir.path(), "County,State\nKing County,WA\n");

        let err = load_counties(&path).unwrap_err();
        assert!(matches!(err, SetupError::MissingColumn(POPULATION_2014)));
    }

    #[test]
    fn test_non_numeric_cell_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(
            dir.path(),
            "County,State,2014 Population\nKing County,WA,lots\n",
        );

        let err = load_counties(&path).unwrap_err();
        match err {
            SetupError::BadCell { column, value } => {
                assert_eq!(column, "2014 Population");
                assert_eq!(value, "lots");
            }
            other => panic!("expected BadCell, got {other:?}"),
        }
    }

    #[test]
    fn test_unrecognized_columns_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_dataset(
            dir.path(),
            "County,State,2014 Population,Notes\nKing County,WA,2079967,irrelevant\n",
        );

        let counties = load_counties(&path).unwrap();
        assert_eq!(counties[0].population_2014(), 2079967);
        assert!(counties[0].age.is_empty());
    }
}
