use common::{CountryDto, CurveDto, ObservationRowDto, TableDto};
use compute::loader::LoadedTable;
use model::{Country, CurveRecord, quarter_label};

/// Country selector entry.
pub fn country_to_dto(country: Country) -> CountryDto {
    CountryDto {
        code: country.code().to_string(),
        name: country.name().to_string(),
        is_default: country == Country::DEFAULT,
    }
}

/// Full table of a country, rows in chronological order.
pub fn loaded_table_to_dto(loaded: &LoadedTable) -> TableDto {
    let table = &loaded.table;
    TableDto {
        country: loaded.country.code().to_string(),
        origin: loaded.origin.clone(),
        horizons: table.horizons().iter().map(|h| h.quarters()).collect(),
        rows: table
            .rows()
            .iter()
            .map(|row| ObservationRowDto {
                time: row.time,
                quarter_label: quarter_label(row.time),
                values: row.values.clone(),
            })
            .collect(),
    }
}

pub fn curve_to_dto(curve: &CurveRecord) -> CurveDto {
    CurveDto {
        date: curve.date,
        quarter_label: curve.quarter_label.clone(),
        horizons: curve.horizons.clone(),
        values: curve.values.clone(),
    }
}

/// Splits a comma-separated quarter list, dropping blanks.
pub fn split_quarters(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}
