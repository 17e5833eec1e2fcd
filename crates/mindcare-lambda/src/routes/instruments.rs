use serde::Serialize;

use mindcare_core::models::assessment::InstrumentKind;
use mindcare_instruments::scoring::{ItemRange, SeverityBand};
use mindcare_instruments::{all_instruments, get_instrument, Instrument};

use crate::error::ApiError;
use crate::extract::{Json, Path};

#[derive(Serialize)]
pub struct InstrumentSummary {
    id: InstrumentKind,
    name: String,
    item_count: usize,
}

#[derive(Serialize)]
pub struct InstrumentDetail {
    id: InstrumentKind,
    name: String,
    item_count: usize,
    item_range: ItemRange,
    bands: Vec<SeverityBand>,
}

impl From<&dyn Instrument> for InstrumentDetail {
    fn from(instrument: &dyn Instrument) -> Self {
        Self {
            id: instrument.kind(),
            name: instrument.name().to_string(),
            item_count: instrument.item_count(),
            item_range: instrument.item_range(),
            bands: instrument.bands().to_vec(),
        }
    }
}

pub async fn list_instruments() -> Json<Vec<InstrumentSummary>> {
    let instruments: Vec<InstrumentSummary> = all_instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.kind(),
            name: i.name().to_string(),
            item_count: i.item_count(),
        })
        .collect();
    Json(instruments)
}

pub async fn get_instrument_detail(
    Path(id): Path<String>,
) -> Result<Json<InstrumentDetail>, ApiError> {
    let kind: InstrumentKind = id
        .parse()
        .map_err(|_| ApiError::NotFound(format!("instrument not found: {id}")))?;
    let instrument = get_instrument(kind);
    Ok(Json(InstrumentDetail::from(instrument.as_ref())))
}
