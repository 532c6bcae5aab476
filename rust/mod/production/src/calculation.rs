//! Recompute-on-write production calculation.
//!
//! A [`ProductionCalculation`] owns one set of machine inputs and the rates
//! derived from them. Every mutating method finishes by recomputing all
//! three rates, after any dependent fields (stitch length, efficiency)
//! have been derived.

use serde::Serialize;
use tracing::debug;

use crate::efficiency::{derive_efficiency_from_fabric, DEFAULT_EFFICIENCY};
use crate::input::{extract_leading_number, parse_numeric_input};
use crate::model::{
    FabricStructure, MachineParameters, MachineResponseDto, ProductionRates, RateDisplay,
    RateField, SalesOrderItemDto,
};
use crate::rates::{display_rates, recompute_rates};

#[derive(Debug, Clone)]
pub struct ProductionCalculation {
    params: MachineParameters,
    rates: ProductionRates,
    /// Raw stitch-length text last synced from an item.
    stitch_source: Option<String>,
    /// Fabric type of the selected item, kept for late-arriving structures.
    fabric_type: Option<String>,
}

/// Serializable view of a calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSnapshot {
    pub params: MachineParameters,
    pub rates: ProductionRates,
    pub display: RateDisplay,
}

impl ProductionCalculation {
    pub fn new(params: MachineParameters) -> Self {
        Self {
            rates: recompute_rates(&params),
            params,
            stitch_source: None,
            fabric_type: None,
        }
    }

    /// Seed needle, feeder, rpm, constant and efficiency from a machine
    /// record. Missing numbers are zero; missing efficiency is the default.
    pub fn from_machine(machine: &MachineResponseDto) -> Self {
        let params = MachineParameters {
            needle: machine.needle.unwrap_or(0.0),
            feeder: machine.feeder.unwrap_or(0.0),
            rpm: machine.rpm.unwrap_or(0.0),
            constant: machine.constant.unwrap_or(0.0),
            efficiency: machine.efficiency.unwrap_or(DEFAULT_EFFICIENCY),
            ..Default::default()
        };
        Self::new(params)
    }

    pub fn params(&self) -> &MachineParameters {
        &self.params
    }

    pub fn rates(&self) -> &ProductionRates {
        &self.rates
    }

    /// Write raw form text into one field.
    pub fn set_field(&mut self, field: RateField, raw: &str) {
        self.set_value(field, parse_numeric_input(raw));
    }

    pub fn set_value(&mut self, field: RateField, value: f64) {
        self.params.set(field, value);
        self.recompute();
    }

    /// Select a sales order item: sync stitch length, derive efficiency,
    /// then recompute.
    pub fn select_item(&mut self, item: &SalesOrderItemDto, structures: &[FabricStructure]) {
        self.sync_stitch_length(item.stitch_length.as_deref());
        self.fabric_type = item.fabric_type.clone();
        self.derive_efficiency(structures);
        self.recompute();
    }

    /// Fabric structure list (re)loaded after the item was selected.
    pub fn apply_fabric_structures(&mut self, structures: &[FabricStructure]) {
        self.derive_efficiency(structures);
        self.recompute();
    }

    pub fn snapshot(&self, decimals: usize) -> CalculationSnapshot {
        CalculationSnapshot {
            params: self.params,
            rates: self.rates,
            display: display_rates(&self.rates, decimals),
        }
    }

    /// Runs once per change of the raw text; re-selecting an item with the
    /// same text leaves a manually edited stitch length alone.
    fn sync_stitch_length(&mut self, raw: Option<&str>) {
        if self.stitch_source.as_deref() == raw {
            return;
        }
        self.stitch_source = raw.map(str::to_string);

        if let Some(length) = raw.and_then(extract_leading_number) {
            if length != self.params.stitch_length {
                debug!(
                    "stitch length {} -> {} from item text {:?}",
                    self.params.stitch_length, length, raw
                );
                self.params.stitch_length = length;
            }
        }
    }

    fn derive_efficiency(&mut self, structures: &[FabricStructure]) {
        if let Some(fabric_type) = self.fabric_type.as_deref() {
            self.params.efficiency = derive_efficiency_from_fabric(fabric_type, structures);
        }
    }

    fn recompute(&mut self) {
        self.rates = recompute_rates(&self.params);
    }
}
