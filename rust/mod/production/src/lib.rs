//! Production module — knitting machine output rates.
//!
//! # Pieces
//!
//! - **rates** — the kg/minute, kg/hour, kg/day formula and display formatting
//! - **efficiency** — standard efficiency lookup from fabric structures
//! - **input** — form text coercion and stitch-length number extraction
//! - **calculation** — recompute-on-write session tying the above together
//!
//! # Usage
//!
//! ```ignore
//! use production::{ProductionCalculation, RateField};
//!
//! let mut calc = ProductionCalculation::from_machine(&machine);
//! calc.select_item(&item, &fabric_structures);
//! calc.set_field(RateField::Count, "30");
//! println!("{}", calc.snapshot(2).display.per_day);
//! ```

pub mod api;
pub mod calculation;
pub mod efficiency;
pub mod input;
pub mod model;
pub mod rates;

use std::sync::Arc;

use axum::Router;

use knitflow_core::Module;

pub use api::ProductionSettings;
pub use calculation::{CalculationSnapshot, ProductionCalculation};
pub use efficiency::{derive_efficiency_from_fabric, DEFAULT_EFFICIENCY};
pub use input::{extract_leading_number, parse_numeric_input};
pub use model::*;
pub use rates::{estimate_duration, format_rate, recompute_rates};

pub struct ProductionModule {
    settings: Arc<ProductionSettings>,
}

impl ProductionModule {
    pub fn new(settings: ProductionSettings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

impl Module for ProductionModule {
    fn name(&self) -> &str {
        "production"
    }

    fn routes(&self) -> Router {
        api::build_router(self.settings.clone())
    }
}
