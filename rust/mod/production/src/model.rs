use serde::{Deserialize, Serialize};

/// Knitting machine inputs that drive the production formula.
///
/// Every field is a plain `f64`. Blank or garbage form input has already
/// been coerced to `0.0` by [`crate::input::parse_numeric_input`] before it
/// lands here, so nothing downstream sees `NaN` from a parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineParameters {
    /// Needle count.
    pub needle: f64,
    /// Feeder count.
    pub feeder: f64,
    /// Rotations per minute.
    pub rpm: f64,
    /// Machine calibration constant (typically around 0.00001).
    pub constant: f64,
    /// Stitch length in millimetres.
    pub stitch_length: f64,
    /// Yarn count.
    pub count: f64,
    /// Efficiency percentage, 0..=100.
    pub efficiency: f64,
}

/// Output of the rate formula. The three values are always derived together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRates {
    /// kg per minute.
    pub per_minute: f64,
    /// kg per hour.
    pub per_hour: f64,
    /// kg per day.
    pub per_day: f64,
}

/// Rates pre-formatted for display, non-finite values rendered as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateDisplay {
    pub per_minute: String,
    pub per_hour: String,
    pub per_day: String,
}

/// Fabric structure reference record, as served by the backend.
///
/// Field names keep the backend's spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricStructure {
    pub fabricstr: String,
    pub standardeffencny: f64,
}

/// Machine record from the backend. Only the fields the calculator reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineResponseDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feeder: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

/// Sales order line item. `stitch_length` is free text such as `"2.8 mm"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderItemDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stitch_length: Option<String>,
    /// Ordered quantity in kg.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_quantity: Option<f64>,
}

/// One editable input of [`MachineParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RateField {
    Needle,
    Feeder,
    Rpm,
    Constant,
    StitchLength,
    Count,
    Efficiency,
}

impl RateField {
    pub const ALL: [RateField; 7] = [
        RateField::Needle,
        RateField::Feeder,
        RateField::Rpm,
        RateField::Constant,
        RateField::StitchLength,
        RateField::Count,
        RateField::Efficiency,
    ];
}

impl MachineParameters {
    pub fn get(&self, field: RateField) -> f64 {
        match field {
            RateField::Needle => self.needle,
            RateField::Feeder => self.feeder,
            RateField::Rpm => self.rpm,
            RateField::Constant => self.constant,
            RateField::StitchLength => self.stitch_length,
            RateField::Count => self.count,
            RateField::Efficiency => self.efficiency,
        }
    }

    pub fn set(&mut self, field: RateField, value: f64) {
        let slot = match field {
            RateField::Needle => &mut self.needle,
            RateField::Feeder => &mut self.feeder,
            RateField::Rpm => &mut self.rpm,
            RateField::Constant => &mut self.constant,
            RateField::StitchLength => &mut self.stitch_length,
            RateField::Count => &mut self.count,
            RateField::Efficiency => &mut self.efficiency,
        };
        *slot = value;
    }
}

/// Time needed to knit a required quantity on a number of machines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionEstimate {
    pub required_kg: f64,
    pub machines: u32,
    pub hours: f64,
    pub days: f64,
}
