use crate::model::{MachineParameters, ProductionEstimate, ProductionRates, RateDisplay};

const MINUTES_PER_HOUR: f64 = 60.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Apply the production formula.
///
/// ```text
/// per_minute = needle × feeder × rpm × stitch_length × constant × efficiency / count / 1000
/// per_hour   = per_minute × 60
/// per_day    = per_hour × 24
/// ```
///
/// No validation: `count == 0` yields infinity or NaN, which
/// [`format_rate`] renders as zero.
pub fn recompute_rates(params: &MachineParameters) -> ProductionRates {
    let per_minute = (params.needle
        * params.feeder
        * params.rpm
        * params.stitch_length
        * params.constant
        * params.efficiency)
        / params.count
        / 1000.0;
    let per_hour = per_minute * MINUTES_PER_HOUR;
    ProductionRates {
        per_minute,
        per_hour,
        per_day: per_hour * HOURS_PER_DAY,
    }
}

/// Fixed-decimal display string. Infinity and NaN print as zero.
pub fn format_rate(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{:.*}", decimals, value)
}

pub fn display_rates(rates: &ProductionRates, decimals: usize) -> RateDisplay {
    RateDisplay {
        per_minute: format_rate(rates.per_minute, decimals),
        per_hour: format_rate(rates.per_hour, decimals),
        per_day: format_rate(rates.per_day, decimals),
    }
}

/// Hours and days needed to produce `required_kg` across `machines`
/// identical machines. `None` when the output rate can't produce anything.
pub fn estimate_duration(
    required_kg: f64,
    rates: &ProductionRates,
    machines: u32,
) -> Option<ProductionEstimate> {
    if machines == 0 || !required_kg.is_finite() || required_kg < 0.0 {
        return None;
    }
    let hourly = rates.per_hour * f64::from(machines);
    if !hourly.is_finite() || hourly <= 0.0 {
        return None;
    }
    let hours = required_kg / hourly;
    Some(ProductionEstimate {
        required_kg,
        machines,
        hours,
        days: hours / HOURS_PER_DAY,
    })
}
