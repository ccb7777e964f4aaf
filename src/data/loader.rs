use crate::data::fetch::FetchError;
use crate::data::series::PricePoint;
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    price: f64,
    #[serde(default)]
    symbol: Option<String>,
}

//loads price points from a csv file with a timestamp,price[,symbol] header
//rows whose symbol differs from the requested one are skipped
//rows without a symbol always match
pub fn load_price_csv<P: AsRef<Path>>(
    path: P,
    symbol: Option<&str>,
) -> Result<Vec<PricePoint>, FetchError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut points = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: CsvRecord = result?;

        if let (Some(wanted), Some(found)) = (symbol, record.symbol.as_deref()) {
            if !found.is_empty() && !found.eq_ignore_ascii_case(wanted) {
                continue;
            }
        }

        //parse timestamp
        let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)
            .map_err(|_| FetchError::InvalidTimestamp {
                line: index + 2,
                value: record.timestamp.clone(),
            })?
            .with_timezone(&Utc);

        points.push(PricePoint::new(timestamp, record.price));
    }

    //sort by timestamp to ensure chronological order
    points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    Ok(points)
}
