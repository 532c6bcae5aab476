use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use knitflow_core::now_rfc3339;
use knitflow_kv::{KVError, KVStore};

use crate::matrix::{build_matrix, to_records};
use crate::model::{NavigationItem, PagePermission, PermissionMatrix};

const ROLE_PREFIX: &str = "access:role:";

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation: {0}")]
    Validation(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("internal: {0}")]
    Internal(String),
}

impl From<KVError> for AccessError {
    fn from(e: KVError) -> Self {
        AccessError::Storage(e.to_string())
    }
}

impl From<AccessError> for knitflow_core::ServiceError {
    fn from(e: AccessError) -> Self {
        match e {
            AccessError::NotFound(m) => knitflow_core::ServiceError::NotFound(m),
            AccessError::Validation(m) => knitflow_core::ServiceError::Validation(m),
            AccessError::Storage(m) => knitflow_core::ServiceError::Storage(m),
            AccessError::Internal(m) => knitflow_core::ServiceError::Internal(m),
        }
    }
}

/// Stored page access for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePageAccess {
    pub role: String,
    pub pages: Vec<PagePermission>,
    /// RFC 3339 time of the last save.
    pub updated_at: String,
}

/// Per-role page access, persisted in the KV store under `access:role:{role}`.
///
/// Every write, including read-modify-write updates, runs under `writes`.
pub struct AccessService {
    kv: Arc<dyn KVStore>,
    tree: Vec<NavigationItem>,
    writes: Mutex<()>,
}

impl AccessService {
    pub fn new(kv: Arc<dyn KVStore>, tree: Vec<NavigationItem>) -> Self {
        Self {
            kv,
            tree,
            writes: Mutex::new(()),
        }
    }

    fn write_guard(&self) -> Result<MutexGuard<'_, ()>, AccessError> {
        self.writes
            .lock()
            .map_err(|_| AccessError::Internal("access write lock poisoned".into()))
    }

    pub fn tree(&self) -> &[NavigationItem] {
        &self.tree
    }

    fn key(role: &str) -> Result<String, AccessError> {
        let role = role.trim();
        if role.is_empty() {
            return Err(AccessError::Validation("role cannot be empty".into()));
        }
        if role.contains(':') {
            return Err(AccessError::Validation(format!(
                "role '{}' must not contain ':'",
                role
            )));
        }
        Ok(format!("{}{}", ROLE_PREFIX, role))
    }

    fn load(&self, role: &str) -> Result<Option<RolePageAccess>, AccessError> {
        let key = Self::key(role)?;
        match self.kv.get(&key)? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| AccessError::Internal(format!("corrupt record {}: {}", key, e))),
            None => Ok(None),
        }
    }

    /// Stored records for `role`. A role never saved has no pages.
    pub fn get_role_pages(&self, role: &str) -> Result<Vec<PagePermission>, AccessError> {
        Ok(self.load(role)?.map(|a| a.pages).unwrap_or_default())
    }

    /// Matrix for the navigation tree, filled from the role's records.
    pub fn role_matrix(&self, role: &str) -> Result<PermissionMatrix, AccessError> {
        let pages = self.get_role_pages(role)?;
        Ok(build_matrix(&self.tree, &pages))
    }

    /// Replace a role's page access.
    ///
    /// Records go through the matrix before storage, so only leaf pages
    /// of the current tree are kept, one record each, in tree order.
    pub fn save_role_pages(
        &self,
        role: &str,
        pages: &[PagePermission],
    ) -> Result<RolePageAccess, AccessError> {
        let matrix = build_matrix(&self.tree, pages);
        self.save_matrix(role, &matrix)
    }

    /// Persist the leaf entries of an edited matrix.
    pub fn save_matrix(
        &self,
        role: &str,
        matrix: &PermissionMatrix,
    ) -> Result<RolePageAccess, AccessError> {
        let _guard = self.write_guard()?;
        self.store(role, matrix)
    }

    /// Load the role's matrix, apply `edit`, and store the result, with no
    /// other write to the service in between.
    pub fn update_matrix<F>(&self, role: &str, edit: F) -> Result<RolePageAccess, AccessError>
    where
        F: FnOnce(&PermissionMatrix) -> PermissionMatrix,
    {
        let _guard = self.write_guard()?;
        let current = self.role_matrix(role)?;
        self.store(role, &edit(&current))
    }

    fn store(&self, role: &str, matrix: &PermissionMatrix) -> Result<RolePageAccess, AccessError> {
        let key = Self::key(role)?;
        let access = RolePageAccess {
            role: role.trim().to_string(),
            pages: to_records(matrix),
            updated_at: now_rfc3339(),
        };
        let json =
            serde_json::to_vec(&access).map_err(|e| AccessError::Internal(e.to_string()))?;
        self.kv.set(&key, &json)?;
        debug!("saved {} page records for role {}", access.pages.len(), access.role);
        Ok(access)
    }

    pub fn get_role_access(&self, role: &str) -> Result<RolePageAccess, AccessError> {
        self.load(role)?
            .ok_or_else(|| AccessError::NotFound(format!("role '{}' has no page access", role)))
    }

    pub fn delete_role_pages(&self, role: &str) -> Result<(), AccessError> {
        let key = Self::key(role)?;
        let _guard = self.write_guard()?;
        if self.kv.get(&key)?.is_none() {
            return Err(AccessError::NotFound(format!(
                "role '{}' has no page access",
                role
            )));
        }
        self.kv.invalidate(&key)?;
        Ok(())
    }

    /// Roles with stored page access, sorted.
    pub fn list_roles(&self) -> Result<Vec<String>, AccessError> {
        Ok(self
            .kv
            .scan(ROLE_PREFIX)?
            .into_iter()
            .filter_map(|(key, _)| key.strip_prefix(ROLE_PREFIX).map(str::to_string))
            .collect())
    }
}
