use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// A node in the dashboard's navigation tree.
///
/// A node with children is a *parent* (a sidebar group); every other node
/// is a leaf page and a permission target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub title: String,
    /// Route path, also the page's permission key.
    pub href: String,
    /// Icon name (Lucide).
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavigationItem>,
}

impl NavigationItem {
    /// Create a leaf page.
    pub fn leaf(title: &str, href: &str, icon: &str) -> Self {
        Self {
            title: title.to_string(),
            href: href.to_string(),
            icon: icon.to_string(),
            description: None,
            children: vec![],
        }
    }

    /// Create a group holding `children`.
    pub fn group(title: &str, href: &str, icon: &str, children: Vec<NavigationItem>) -> Self {
        Self {
            children,
            ..Self::leaf(title, href, icon)
        }
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn is_parent(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One CRUD capability on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Permission {
    CanRead,
    CanCreate,
    CanEdit,
    CanDelete,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::CanRead,
        Permission::CanCreate,
        Permission::CanEdit,
        Permission::CanDelete,
    ];
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PermissionSet {
    pub can_read: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl PermissionSet {
    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::CanRead => self.can_read,
            Permission::CanCreate => self.can_create,
            Permission::CanEdit => self.can_edit,
            Permission::CanDelete => self.can_delete,
        }
    }

    pub fn set(&mut self, permission: Permission, value: bool) {
        match permission {
            Permission::CanRead => self.can_read = value,
            Permission::CanCreate => self.can_create = value,
            Permission::CanEdit => self.can_edit = value,
            Permission::CanDelete => self.can_delete = value,
        }
    }
}

/// Persisted per-page permission record. `page_name` is the page's href.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePermission {
    pub page_name: String,
    #[serde(flatten)]
    pub permissions: PermissionSet,
}

/// One row of a [`PermissionMatrix`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixEntry {
    pub item: NavigationItem,
    pub permissions: PermissionSet,
    pub is_parent: bool,
    /// Hrefs of the static children, in tree order. Parents only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<String>>,
}

/// Permission state for every navigation item, keyed by href.
///
/// Iteration follows insertion order, which is tree flatten order.
/// Serializes as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PermissionMatrix {
    order: Vec<String>,
    entries: HashMap<String, MatrixEntry>,
}

impl PermissionMatrix {
    pub fn get(&self, href: &str) -> Option<&MatrixEntry> {
        self.entries.get(href)
    }

    pub fn contains(&self, href: &str) -> bool {
        self.entries.contains_key(href)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MatrixEntry)> {
        self.order
            .iter()
            .filter_map(|href| self.entries.get(href).map(|e| (href.as_str(), e)))
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub(crate) fn insert(&mut self, href: String, entry: MatrixEntry) {
        if self.entries.insert(href.clone(), entry).is_none() {
            self.order.push(href);
        }
    }

    /// Set one permission on a leaf entry. Returns false (and changes
    /// nothing) for unknown pages and parent entries.
    pub fn set(&mut self, href: &str, permission: Permission, value: bool) -> bool {
        match self.entries.get_mut(href) {
            Some(entry) if !entry.is_parent => {
                entry.permissions.set(permission, value);
                true
            }
            _ => false,
        }
    }
}

impl Serialize for PermissionMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (href, entry) in self.iter() {
            map.serialize_entry(href, entry)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_set_get_set() {
        let mut set = PermissionSet::default();
        for p in Permission::ALL {
            assert!(!set.get(p));
            set.set(p, true);
            assert!(set.get(p));
        }
    }

    #[test]
    fn test_page_permission_wire_format() {
        let record = PagePermission {
            page_name: "/masters/machines".into(),
            permissions: PermissionSet {
                can_read: true,
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pageName": "/masters/machines",
                "canRead": true,
                "canCreate": false,
                "canEdit": false,
                "canDelete": false,
            })
        );
    }

    #[test]
    fn test_page_permission_missing_flags_default_false() {
        let record: PagePermission =
            serde_json::from_str(r#"{"pageName":"/chat","canRead":true}"#).unwrap();
        assert!(record.permissions.can_read);
        assert!(!record.permissions.can_delete);
    }

    #[test]
    fn test_permission_names() {
        let p: Permission = serde_json::from_str(r#""canEdit""#).unwrap();
        assert_eq!(p, Permission::CanEdit);
    }

    #[test]
    fn test_matrix_insert_keeps_first_position() {
        let entry = |title: &str| MatrixEntry {
            item: NavigationItem::leaf(title, "/x", "dot"),
            permissions: PermissionSet::default(),
            is_parent: false,
            children: None,
        };
        let mut matrix = PermissionMatrix::default();
        matrix.insert("/x".into(), entry("first"));
        matrix.insert("/y".into(), entry("other"));
        matrix.insert("/x".into(), entry("second"));

        let order: Vec<&str> = matrix.iter().map(|(h, _)| h).collect();
        assert_eq!(order, vec!["/x", "/y"]);
        assert_eq!(matrix.get("/x").unwrap().item.title, "second");
    }
}
