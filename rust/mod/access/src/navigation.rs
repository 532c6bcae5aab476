//! Static dashboard navigation tree.

use crate::model::NavigationItem;

/// The dashboard sidebar. Not user-editable and never persisted; only the
/// leaf pages' permissions are.
pub fn navigation() -> Vec<NavigationItem> {
    vec![
        NavigationItem::leaf("Dashboard", "/dashboard", "layout-dashboard")
            .describe("Floor overview and daily output"),
        NavigationItem::group(
            "Masters",
            "/masters",
            "database",
            vec![
                NavigationItem::leaf("Machines", "/masters/machines", "cog")
                    .describe("Knitting machines and their parameters"),
                NavigationItem::leaf("Fabric Structures", "/masters/fabric-structures", "grid-3x3")
                    .describe("Knit constructions with standard efficiency"),
                NavigationItem::leaf("Yarn Types", "/masters/yarn-types", "spool"),
                NavigationItem::leaf("Customers", "/masters/customers", "building"),
            ],
        )
        .describe("Reference data"),
        NavigationItem::group(
            "Production",
            "/production",
            "factory",
            vec![
                NavigationItem::leaf("Sales Orders", "/production/sales-orders", "receipt"),
                NavigationItem::leaf("Lot Allotment", "/production/allotment", "layers")
                    .describe("Assign lots to machines and rolls"),
                NavigationItem::leaf("Timing Calculation", "/production/timing", "timer")
                    .describe("Machine output rate calculator"),
                NavigationItem::leaf(
                    "Roll Confirmation",
                    "/production/roll-confirmation",
                    "check-check",
                ),
            ],
        ),
        NavigationItem::group(
            "Quality",
            "/quality",
            "badge-check",
            vec![NavigationItem::leaf("Inspection", "/quality/inspection", "search-check")],
        ),
        NavigationItem::group(
            "Logistics",
            "/logistics",
            "truck",
            vec![
                NavigationItem::leaf("Courier", "/logistics/courier", "package"),
                NavigationItem::leaf("Transport", "/logistics/transport", "truck"),
            ],
        ),
        NavigationItem::leaf("Chat", "/chat", "message-square"),
        NavigationItem::leaf("Notifications", "/notifications", "bell"),
        NavigationItem::group(
            "Administration",
            "/admin",
            "shield",
            vec![
                NavigationItem::leaf("Users", "/admin/users", "users"),
                NavigationItem::leaf("Role Permissions", "/admin/roles", "key-round")
                    .describe("Per-role page access"),
            ],
        ),
    ]
}

/// Depth-first, parent before children, siblings in order.
pub fn flatten_tree(tree: &[NavigationItem]) -> Vec<&NavigationItem> {
    let mut out = Vec::new();
    for item in tree {
        push_preorder(item, &mut out);
    }
    out
}

fn push_preorder<'a>(item: &'a NavigationItem, out: &mut Vec<&'a NavigationItem>) {
    out.push(item);
    for child in &item.children {
        push_preorder(child, out);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_flatten_order() {
        let tree = vec![
            NavigationItem::group(
                "P",
                "/p",
                "folder",
                vec![
                    NavigationItem::leaf("A", "/p/a", "dot"),
                    NavigationItem::group(
                        "Q",
                        "/p/q",
                        "folder",
                        vec![NavigationItem::leaf("C", "/p/q/c", "dot")],
                    ),
                    NavigationItem::leaf("B", "/p/b", "dot"),
                ],
            ),
            NavigationItem::leaf("Z", "/z", "dot"),
        ];
        let hrefs: Vec<&str> = flatten_tree(&tree).iter().map(|i| i.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/p", "/p/a", "/p/q", "/p/q/c", "/p/b", "/z"]);
    }

    #[test]
    fn test_flatten_is_restartable() {
        let tree = navigation();
        assert_eq!(flatten_tree(&tree), flatten_tree(&tree));
        assert!(flatten_tree(&[]).is_empty());
    }

    #[test]
    fn test_navigation_hrefs_unique() {
        let tree = navigation();
        let flat = flatten_tree(&tree);
        let unique: HashSet<&str> = flat.iter().map(|i| i.href.as_str()).collect();
        assert_eq!(unique.len(), flat.len());
    }

    #[test]
    fn test_navigation_has_timing_page() {
        let tree = navigation();
        let timing = flatten_tree(&tree)
            .into_iter()
            .find(|i| i.href == "/production/timing")
            .unwrap();
        assert!(!timing.is_parent());
    }
}
