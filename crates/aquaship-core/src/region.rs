//! Region inference and per-region shipping defaults.
//!
//! External postal sources usually return only state/city/district, so the
//! resolver derives region, shipping cost, and delivery time from the state
//! name. The tables here are the single source of truth for those defaults.

use crate::types::Region;

const NORTH_STATES: &[&str] = &[
    "Delhi",
    "Punjab",
    "Haryana",
    "Himachal Pradesh",
    "Uttarakhand",
    "Uttar Pradesh",
    "Jammu and Kashmir",
    "Ladakh",
    "Chandigarh",
];

const WEST_STATES: &[&str] = &[
    "Maharashtra",
    "Gujarat",
    "Goa",
    "Rajasthan",
    "Dadra and Nagar Haveli",
    "Daman and Diu",
];

const SOUTH_STATES: &[&str] = &[
    "Tamil Nadu",
    "Kerala",
    "Karnataka",
    "Andhra Pradesh",
    "Telangana",
    "Puducherry",
    "Lakshadweep",
];

const EAST_STATES: &[&str] = &[
    "West Bengal",
    "Bihar",
    "Odisha",
    "Jharkhand",
    "Andaman and Nicobar",
];

const NORTHEAST_STATES: &[&str] = &[
    "Assam",
    "Meghalaya",
    "Manipur",
    "Mizoram",
    "Nagaland",
    "Tripura",
    "Arunachal Pradesh",
    "Sikkim",
];

/// State-level shipping-cost overrides that beat the region default.
const STATE_COST_OVERRIDES: &[(&str, f64)] = &[("Maharashtra", 80.0), ("Kerala", 90.0)];

/// Infers the delivery region from a state name.
///
/// Matching is a case-insensitive substring test against the group members,
/// so upstream variants like `"DELHI"` or `"Tamil Nadu "` still resolve.
/// States outside every group fall back to [`Region::Central`].
#[must_use]
pub fn derive_region(state: &str) -> Region {
    let needle = state.trim().to_lowercase();
    let groups: [(&[&str], Region); 5] = [
        (NORTH_STATES, Region::North),
        (WEST_STATES, Region::West),
        (SOUTH_STATES, Region::South),
        (EAST_STATES, Region::East),
        (NORTHEAST_STATES, Region::Northeast),
    ];
    for (members, region) in groups {
        if members.iter().any(|m| needle.contains(&m.to_lowercase())) {
            return region;
        }
    }
    Region::Central
}

/// Default shipping cost for a region, in currency units.
#[must_use]
pub fn region_shipping_cost(region: Region) -> f64 {
    match region {
        Region::North => 50.0,
        Region::West => 60.0,
        Region::South => 70.0,
        Region::East => 80.0,
        Region::Northeast => 150.0,
        Region::Central => 100.0,
    }
}

/// Shipping cost for a state: a named override when one exists, otherwise
/// the region default.
#[must_use]
pub fn derive_shipping_cost(state: &str) -> f64 {
    let needle = state.trim().to_lowercase();
    for (name, cost) in STATE_COST_OVERRIDES {
        if needle == name.to_lowercase() {
            return *cost;
        }
    }
    region_shipping_cost(derive_region(state))
}

/// Default delivery-time estimate for a region.
#[must_use]
pub fn region_delivery_time(region: Region) -> &'static str {
    match region {
        Region::North => "1-2 days",
        Region::West => "2-3 days",
        Region::South => "2-3 days",
        Region::East => "3-4 days",
        Region::Northeast => "5-7 days",
        Region::Central => "3-5 days",
    }
}
