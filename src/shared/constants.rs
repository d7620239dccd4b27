/// Glyphs an operator may pick for a category, in selection order
pub const CATEGORY_ICONS: &[&str] = &[
    "📊", "📈", "📉", "📋", "📞", "💰", "👥", "🌡️", "📱", "💻", "🔧", "🎯", "🚀", "⚡", "🔍",
];

/// Icon used when a category is created without one
pub const DEFAULT_CATEGORY_ICON: &str = "📊";

/// Sort key used when a category is created without one
pub const DEFAULT_DISPLAY_ORDER: i32 = 999;

/// Version pre-filled in the create-work form
pub const DEFAULT_WORK_VERSION: &str = "1.0";

/// Structured config stored when a work is created without one
pub const DEFAULT_CONFIG_JSON: &str = "{}";

/// Placeholder shown for missing timestamps
pub const DATE_PLACEHOLDER: &str = "N/A";

/// Display format for timestamps in list views
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Timestamp suffix appended to generated identifiers
pub const ID_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

pub fn is_known_icon(icon: &str) -> bool {
    CATEGORY_ICONS.contains(&icon)
}
