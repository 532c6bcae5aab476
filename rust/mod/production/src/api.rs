use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::calculation::{CalculationSnapshot, ProductionCalculation};
use crate::efficiency::{match_fabric_structure, DEFAULT_EFFICIENCY};
use crate::model::{
    FabricStructure, MachineParameters, MachineResponseDto, ProductionEstimate, ProductionRates,
    RateDisplay, RateField, SalesOrderItemDto,
};
use crate::rates::{display_rates, estimate_duration, recompute_rates};

/// Display settings shared by the handlers.
#[derive(Debug, Clone)]
pub struct ProductionSettings {
    pub display_decimals: usize,
}

impl Default for ProductionSettings {
    fn default() -> Self {
        Self { display_decimals: 2 }
    }
}

pub type AppState = Arc<ProductionSettings>;

pub fn build_router(settings: AppState) -> Router {
    let api = Router::new()
        .route("/rates", post(rates))
        .route("/efficiency", post(efficiency))
        .route("/calculate", post(calculate));

    Router::new().nest("/production", api).with_state(settings)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RatesResponse {
    rates: ProductionRates,
    display: RateDisplay,
}

/// POST /production/rates
async fn rates(
    State(settings): State<AppState>,
    Json(params): Json<MachineParameters>,
) -> Json<RatesResponse> {
    let rates = recompute_rates(&params);
    Json(RatesResponse {
        display: display_rates(&rates, settings.display_decimals),
        rates,
    })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EfficiencyRequest {
    fabric_type: String,
    #[serde(default)]
    fabric_structures: Vec<FabricStructure>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EfficiencyResponse {
    efficiency: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<String>,
}

/// POST /production/efficiency
async fn efficiency(Json(req): Json<EfficiencyRequest>) -> Json<EfficiencyResponse> {
    let matched = match_fabric_structure(&req.fabric_type, &req.fabric_structures);
    Json(EfficiencyResponse {
        efficiency: matched.map_or(DEFAULT_EFFICIENCY, |s| s.standardeffencny),
        matched: matched.map(|s| s.fabricstr.clone()),
    })
}

/// A raw form edit, applied in order after the machine and item.
#[derive(Debug, Deserialize)]
struct FieldEdit {
    field: RateField,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalculateRequest {
    #[serde(default)]
    machine: MachineResponseDto,
    #[serde(default)]
    item: Option<SalesOrderItemDto>,
    #[serde(default)]
    fabric_structures: Vec<FabricStructure>,
    #[serde(default)]
    edits: Vec<FieldEdit>,
    #[serde(default)]
    required_quantity: Option<f64>,
    #[serde(default = "one_machine")]
    machines: u32,
}

fn one_machine() -> u32 {
    1
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculateResponse {
    #[serde(flatten)]
    snapshot: CalculationSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<ProductionEstimate>,
}

/// POST /production/calculate
///
/// Replays a form session: machine, then item, then field edits.
/// `requiredQuantity` falls back to the item's ordered quantity.
async fn calculate(
    State(settings): State<AppState>,
    Json(req): Json<CalculateRequest>,
) -> Json<CalculateResponse> {
    let mut calc = ProductionCalculation::from_machine(&req.machine);
    if let Some(item) = &req.item {
        calc.select_item(item, &req.fabric_structures);
    }
    for edit in &req.edits {
        calc.set_field(edit.field, &edit.value);
    }

    let required = req
        .required_quantity
        .or_else(|| req.item.as_ref().and_then(|i| i.required_quantity));
    let estimate = required.and_then(|kg| estimate_duration(kg, calc.rates(), req.machines));

    Json(CalculateResponse {
        snapshot: calc.snapshot(settings.display_decimals),
        estimate,
    })
}
