use crate::error::{DrillError, Result};
use polars::prelude::*;

/// First `n` rows.
pub fn preview(df: &DataFrame, n: usize) -> DataFrame {
    df.head(Some(n))
}

fn require_column(df: &DataFrame, name: &str) -> Result<()> {
    if df.column(name).is_err() {
        let available: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .collect();
        return Err(DrillError::DataProcessing(format!(
            "column {name:?} not found (available: {})",
            available.join(", ")
        )));
    }
    Ok(())
}

/// Mean of each `value` column per distinct `key`, sorted by key.
pub fn group_means(df: &DataFrame, key: &str, values: &[&str]) -> Result<DataFrame> {
    require_column(df, key)?;
    for value in values {
        require_column(df, value)?;
    }

    let aggs: Vec<Expr> = values
        .iter()
        .map(|v| col(*v).cast(DataType::Float64).mean())
        .collect();

    let grouped = df
        .clone()
        .lazy()
        .group_by([col(key)])
        .agg(aggs)
        .sort_by_exprs([col(key)], SortMultipleOptions::default())
        .collect()?;
    Ok(grouped)
}

/// Column cast to `Float64`, nulls kept.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    require_column(df, name)?;
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series.f64()?.clone())
}

/// Column as `f64`, nulls dropped.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(numeric_column(df, name)?.into_iter().flatten().collect())
}

/// Column rendered as text, nulls as empty strings.
pub fn text_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    require_column(df, name)?;
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mortality() -> PolarsResult<DataFrame> {
        df!(
            "Country" => &["Kenya", "Chad", "Kenya", "Chad", "Peru"],
            "MortalityRate" => &[40.0, 110.0, 44.0, 100.0, 12.0],
            "Population" => &[50.0, 16.0, 54.0, 18.0, 33.0]
        )
    }

    #[test]
    fn test_preview_takes_head() -> Result<()> {
        let df = mortality()?;
        assert_eq!(preview(&df, 2).height(), 2);
        assert_eq!(preview(&df, 50).height(), 5);
        Ok(())
    }

    #[test]
    fn test_group_means_sorted_by_key() -> Result<()> {
        let df = mortality()?;
        let grouped = group_means(&df, "Country", &["MortalityRate", "Population"])?;

        assert_eq!(grouped.height(), 3);
        assert_eq!(text_values(&grouped, "Country")?, vec!["Chad", "Kenya", "Peru"]);
        assert_eq!(numeric_values(&grouped, "MortalityRate")?, vec![105.0, 42.0, 12.0]);
        assert_eq!(numeric_values(&grouped, "Population")?, vec![17.0, 52.0, 33.0]);
        Ok(())
    }

    #[test]
    fn test_group_means_missing_column() -> Result<()> {
        let df = mortality()?;
        let err = group_means(&df, "Country", &["Births"]).unwrap_err();
        assert!(err.to_string().contains("column \"Births\" not found"));
        Ok(())
    }

    #[test]
    fn test_numeric_values_drop_nulls() -> Result<()> {
        let df = df!("v" => &[Some(1.0), None, Some(3.0)])?;
        assert_eq!(numeric_values(&df, "v")?, vec![1.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_numeric_column_casts_and_keeps_nulls() -> Result<()> {
        let df = df!("n" => &[Some(2i64), None, Some(5)])?;
        let ca = numeric_column(&df, "n")?;
        assert_eq!(ca.name().as_str(), "n");
        assert_eq!(ca.len(), 3);
        assert_eq!(ca.null_count(), 1);
        assert_eq!(ca.get(2), Some(5.0));
        Ok(())
    }
}
