use tracing::debug;

use crate::model::FabricStructure;

/// Efficiency used when no fabric structure matches.
pub const DEFAULT_EFFICIENCY: f64 = 85.0;

/// Find the fabric structure for an item's fabric type.
///
/// Case-insensitive. A structure matches when the item's fabric type
/// contains the structure name, or the structure name contains the first
/// word of the item's fabric type. Structures are tried in list order and
/// the first match wins. Structures with a blank name never match.
pub fn match_fabric_structure<'a>(
    fabric_type: &str,
    structures: &'a [FabricStructure],
) -> Option<&'a FabricStructure> {
    let fabric_type = fabric_type.trim().to_lowercase();
    let first_word = fabric_type.split_whitespace().next()?;

    structures.iter().find(|s| {
        let name = s.fabricstr.trim().to_lowercase();
        !name.is_empty() && (fabric_type.contains(&name) || name.contains(first_word))
    })
}

/// Standard efficiency for `fabric_type`, or [`DEFAULT_EFFICIENCY`].
pub fn derive_efficiency_from_fabric(fabric_type: &str, structures: &[FabricStructure]) -> f64 {
    match match_fabric_structure(fabric_type, structures) {
        Some(s) => s.standardeffencny,
        None => {
            debug!(
                "no fabric structure matches {:?} among {} entries, using default efficiency",
                fabric_type,
                structures.len()
            );
            DEFAULT_EFFICIENCY
        }
    }
}
