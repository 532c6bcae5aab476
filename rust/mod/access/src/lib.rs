//! Access module — role-based page permissions for the dashboard.
//!
//! # Pieces
//!
//! - **navigation** — the static sidebar tree and its flattening
//! - **matrix** — flat page records <-> per-href permission matrix, with
//!   tri-state parent checks for bulk editing
//! - **service** — per-role page access stored in the KV store
//!
//! # Usage
//!
//! ```ignore
//! use access::{AccessModule, navigation};
//!
//! let module = AccessModule::new(kv, navigation());
//! let router = module.routes(); // serves /access/...
//! ```

pub mod api;
pub mod matrix;
pub mod model;
pub mod navigation;
pub mod service;

use std::sync::Arc;

use axum::Router;

use knitflow_core::Module;
use knitflow_kv::KVStore;

pub use matrix::{
    build_matrix, is_parent_permission_fully_checked, is_parent_permission_indeterminate,
    set_bulk_permission, set_parent_permission, set_permission, to_records,
};
pub use model::*;
pub use navigation::{flatten_tree, navigation};
pub use service::{AccessError, AccessService, RolePageAccess};

pub struct AccessModule {
    service: Arc<AccessService>,
}

impl AccessModule {
    pub fn new(kv: Arc<dyn KVStore>, tree: Vec<NavigationItem>) -> Self {
        Self {
            service: Arc::new(AccessService::new(kv, tree)),
        }
    }

    pub fn service(&self) -> &Arc<AccessService> {
        &self.service
    }
}

impl Module for AccessModule {
    fn name(&self) -> &str {
        "access"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
