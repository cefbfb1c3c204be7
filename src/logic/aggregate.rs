use crate::error::{CropWatchError, Result};
use crate::models::{
    ForecastDay, ForecastSeries, ForecastVariable, MissingDate, SeriesPoint, TemperaturePoint,
};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Merge per-variable forecasts into one record per date.
///
/// All three series must cover exactly the same dates. Any gap fails the merge
/// with every missing (variable, date) pair listed. Negative precipitation is
/// floored to zero. Output is sorted by date.
pub fn aggregate(series: &ForecastSeries) -> Result<Vec<ForecastDay>> {
    let temperature = index_by_date(ForecastVariable::Temperature, &series.temperature, |p| {
        p.date
    })?;
    let humidity = index_by_date(ForecastVariable::Humidity, &series.humidity, |p| p.date)?;
    let precipitation = index_by_date(
        ForecastVariable::Precipitation,
        &series.precipitation,
        |p| p.date,
    )?;

    let all_dates: BTreeSet<NaiveDate> = temperature
        .keys()
        .chain(humidity.keys())
        .chain(precipitation.keys())
        .copied()
        .collect();

    let mut missing = Vec::new();
    for &date in &all_dates {
        for (variable, present) in [
            (ForecastVariable::Temperature, temperature.contains_key(&date)),
            (ForecastVariable::Humidity, humidity.contains_key(&date)),
            (
                ForecastVariable::Precipitation,
                precipitation.contains_key(&date),
            ),
        ] {
            if !present {
                missing.push(MissingDate { variable, date });
            }
        }
    }

    if !missing.is_empty() {
        tracing::warn!(gaps = missing.len(), "forecast series are not aligned");
        return Err(CropWatchError::MisalignedForecast { missing });
    }

    let days: Vec<ForecastDay> = temperature
        .iter()
        .map(|(date, temp)| merge_day(temp, humidity[date], precipitation[date]))
        .collect();

    tracing::debug!(days = days.len(), "merged forecast series");
    Ok(days)
}

/// Keep only days on or after `start`
pub fn forecast_window(days: &[ForecastDay], start: NaiveDate) -> Vec<ForecastDay> {
    days.iter().filter(|d| d.date >= start).copied().collect()
}

fn merge_day(temp: &TemperaturePoint, humidity: &SeriesPoint, precip: &SeriesPoint) -> ForecastDay {
    ForecastDay {
        date: temp.date,
        temperature: temp.value,
        temperature_lower: temp.lower,
        temperature_upper: temp.upper,
        humidity: humidity.value,
        precipitation: clamp_precipitation(precip),
    }
}

/// Floors negative precipitation at zero. NaN passes through so the engine can reject it.
fn clamp_precipitation(point: &SeriesPoint) -> f64 {
    if point.value < 0.0 {
        tracing::debug!(
            date = %point.date,
            raw = point.value,
            "clamping negative precipitation to zero"
        );
        0.0
    } else {
        point.value
    }
}

fn index_by_date<T>(
    variable: ForecastVariable,
    points: &[T],
    date_of: impl Fn(&T) -> NaiveDate,
) -> Result<BTreeMap<NaiveDate, &T>> {
    let mut index = BTreeMap::new();
    for point in points {
        let date = date_of(point);
        if index.insert(date, point).is_some() {
            return Err(CropWatchError::DuplicateDate { variable, date });
        }
    }
    Ok(index)
}
