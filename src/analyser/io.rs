use crate::error::{DrillError, Result, ResultExt as _};
use calamine::{Data, Range, Reader as _};
use polars::prelude::*;
use std::path::Path;

/// Loads a table from a spreadsheet or CSV file.
///
/// Workbooks (`xlsx`, `xlsm`, `xlsb`, `xls`, `ods`) are read with calamine; only
/// the first worksheet is used and its first row is the header. CSV files go
/// through polars' reader.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();

    let df = match ext.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .finish()?
            .collect()?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook(path)?,
        _ => {
            return Err(DrillError::DataProcessing(format!(
                "Unsupported file extension: {ext}"
            )));
        }
    };

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded table"
    );
    Ok(df)
}

fn read_workbook(path: &Path) -> Result<DataFrame> {
    let mut workbook = calamine::open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| {
            DrillError::DataProcessing(format!("{} has no worksheets", path.display()))
        })?;
    let range = workbook.worksheet_range(&sheet)?;
    range_to_dataframe(&range)
}

/// Converts a worksheet range to a dataframe.
///
/// The first row names the columns (blank headers become `column_N`). A column
/// whose non-empty cells are all numbers becomes `Float64`, any other column
/// becomes `String`. Empty cells are null.
pub fn range_to_dataframe(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| DrillError::DataProcessing("worksheet is empty".to_owned()))?;
    let body: Vec<&[Data]> = rows.collect();

    let mut columns = Vec::with_capacity(header.len());
    for (idx, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::Empty => format!("column_{}", idx + 1),
            other => other.to_string().trim().to_owned(),
        };
        let cells: Vec<&Data> = body
            .iter()
            .map(|row| row.get(idx).unwrap_or(&Data::Empty))
            .collect();

        let numeric = cells
            .iter()
            .all(|c| matches!(c, Data::Empty | Data::Int(_) | Data::Float(_)));

        let column = if numeric {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|c| match c {
                    Data::Int(i) => Some(*i as f64),
                    Data::Float(f) => Some(*f),
                    _ => None,
                })
                .collect();
            Column::new(name.as_str().into(), values)
        } else {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|c| match c {
                    Data::Empty => None,
                    Data::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect();
            Column::new(name.as_str().into(), values)
        };
        columns.push(column);
    }

    Ok(DataFrame::new(columns)?)
}
