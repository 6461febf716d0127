//! CSV export of projected days

use std::io::Write;
use std::path::Path;

use super::days::{DayProjection, HorizonProjection};
use crate::error::FinanceResult;

/// Write one CSV row per day with a header line
pub fn write_days_csv<W: Write>(writer: W, days: &[DayProjection]) -> FinanceResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for day in days {
        csv_writer.serialize(day)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write every day of a horizon to a CSV file
pub fn write_projection_csv<P: AsRef<Path>>(path: P, projection: &HorizonProjection) -> FinanceResult<()> {
    let days: Vec<DayProjection> = projection.days().cloned().collect();
    let file = std::fs::File::create(path.as_ref())?;
    write_days_csv(file, &days)?;
    log::info!("wrote {} projected days to {}", days.len(), path.as_ref().display());
    Ok(())
}
