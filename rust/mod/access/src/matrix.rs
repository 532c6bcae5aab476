//! Navigation permission matrix: flat page records <-> per-href matrix.
//!
//! Every function here is pure. Updates take the matrix by reference and
//! return a new one; unknown pages and parent entries are skipped, never
//! an error.

use std::collections::HashMap;

use crate::model::{
    MatrixEntry, NavigationItem, PagePermission, Permission, PermissionMatrix, PermissionSet,
};
use crate::navigation::flatten_tree;

/// Build the matrix for `tree` from persisted records.
///
/// Pages without a record get all-false permissions. When several records
/// name the same page the first one counts.
pub fn build_matrix(tree: &[NavigationItem], records: &[PagePermission]) -> PermissionMatrix {
    let mut by_page: HashMap<&str, PermissionSet> = HashMap::with_capacity(records.len());
    for record in records {
        by_page
            .entry(record.page_name.as_str())
            .or_insert(record.permissions);
    }

    let mut matrix = PermissionMatrix::default();
    for item in flatten_tree(tree) {
        let is_parent = item.is_parent();
        let children =
            is_parent.then(|| item.children.iter().map(|c| c.href.clone()).collect());
        matrix.insert(
            item.href.clone(),
            MatrixEntry {
                item: item.clone(),
                permissions: by_page.get(item.href.as_str()).copied().unwrap_or_default(),
                is_parent,
                children,
            },
        );
    }
    matrix
}

/// Flat records for every leaf entry, in matrix order. Parents are
/// UI groupings and are never emitted.
pub fn to_records(matrix: &PermissionMatrix) -> Vec<PagePermission> {
    matrix
        .iter()
        .filter(|(_, entry)| !entry.is_parent)
        .map(|(href, entry)| PagePermission {
            page_name: href.to_string(),
            permissions: entry.permissions,
        })
        .collect()
}

pub fn set_permission(
    matrix: &PermissionMatrix,
    page_name: &str,
    permission: Permission,
    value: bool,
) -> PermissionMatrix {
    let mut next = matrix.clone();
    next.set(page_name, permission, value);
    next
}

pub fn set_bulk_permission<S: AsRef<str>>(
    matrix: &PermissionMatrix,
    page_names: &[S],
    permission: Permission,
    value: bool,
) -> PermissionMatrix {
    let mut next = matrix.clone();
    for page in page_names {
        next.set(page.as_ref(), permission, value);
    }
    next
}

/// Toggle a parent checkbox: applies to every leaf below `parent_href`,
/// including leaves of nested groups.
pub fn set_parent_permission(
    matrix: &PermissionMatrix,
    parent_href: &str,
    permission: Permission,
    value: bool,
) -> PermissionMatrix {
    let leaves = leaf_descendants(matrix, parent_href);
    set_bulk_permission(matrix, leaves.as_slice(), permission, value)
}

fn leaf_descendants(matrix: &PermissionMatrix, href: &str) -> Vec<String> {
    let mut leaves = Vec::new();
    let mut stack = vec![href.to_string()];
    while let Some(current) = stack.pop() {
        let Some(entry) = matrix.get(&current) else {
            continue;
        };
        match &entry.children {
            Some(children) if entry.is_parent => {
                stack.extend(children.iter().rev().cloned());
            }
            _ if current != href => leaves.push(current),
            _ => {}
        }
    }
    leaves
}

/// `permission` on every leaf below the parent. A nested group counts
/// through its leaves, since group entries never hold permissions of their own.
fn leaf_states(matrix: &PermissionMatrix, parent_href: &str, permission: Permission) -> Vec<bool> {
    leaf_descendants(matrix, parent_href)
        .iter()
        .map(|leaf| matrix.get(leaf).is_some_and(|e| e.permissions.get(permission)))
        .collect()
}

/// True iff the parent has children and every leaf below it has `permission`.
pub fn is_parent_permission_fully_checked(
    matrix: &PermissionMatrix,
    parent_href: &str,
    permission: Permission,
) -> bool {
    let states = leaf_states(matrix, parent_href, permission);
    !states.is_empty() && states.iter().all(|&on| on)
}

/// True iff some but not all leaves below the parent have `permission`.
pub fn is_parent_permission_indeterminate(
    matrix: &PermissionMatrix,
    parent_href: &str,
    permission: Permission,
) -> bool {
    let states = leaf_states(matrix, parent_href, permission);
    let checked = states.iter().filter(|&&on| on).count();
    checked > 0 && checked < states.len()
}
