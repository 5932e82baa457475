/// Stage names seeded for construction-style project types when no
/// configuration snapshot exists.
pub const CONSTRUCTION_STAGES: [&str; 5] = [
    "Proposal",
    "Procurement",
    "Implementation",
    "Completed",
    "Inventory",
];

/// Stage names seeded for delivery-style project types (machinery).
pub const DELIVERY_STAGES: [&str; 5] = [
    "Proposal",
    "Procurement",
    "For Delivery",
    "Delivered",
    "Inventory",
];

/// Project type name that selects the delivery stage vocabulary.
pub const MACHINERY_TYPE: &str = "Machinery";

/// Project types seeded by `harrow init` and used as the fallback catalog.
pub const DEFAULT_PROJECT_TYPES: [&str; 2] = ["Infrastructure", MACHINERY_TYPE];

/// Options given to a newly created select or radio field.
pub const DEFAULT_FIELD_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];
