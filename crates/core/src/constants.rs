/// Decimal precision for display and aggregate rounding.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Bucket name used for occurrences whose category can no longer be resolved.
pub const UNCATEGORIZED_LABEL: &str = "Sem Categoria";

/// Sentinel filter value that disables filtering by responsible.
pub const RESPONSIBLE_ALL: &str = "Todos";

/// Responsible assigned to an expense when none is provided.
pub const DEFAULT_RESPONSIBLE: &str = "Eu";
