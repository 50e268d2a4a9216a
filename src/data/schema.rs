/// Column-name constants for the NFHS survey table.
/// Single source of truth for everything that addresses columns by name.

// ── Selector columns as they appear in the source file ──────────────────────
pub mod source {
    pub const STATE: &str = "India/States/UTs";
    pub const SURVEY: &str = "Survey";
    pub const AREA: &str = "Area";
}

// ── Canonical selector columns after normalization ──────────────────────────
pub mod canonical {
    pub const STATE: &str = "State";
    pub const SURVEY: &str = "Survey";
    pub const AREA: &str = "Area";

    pub const ALL: [&str; 3] = [STATE, SURVEY, AREA];
}

/// Source → canonical rename map applied once per load. The identity
/// entries still assert that the column is present.
pub const RENAME: [(&str, &str); 3] = [
    (source::STATE, canonical::STATE),
    (source::SURVEY, canonical::SURVEY),
    (source::AREA, canonical::AREA),
];

// ── Fixed key-indicator set ─────────────────────────────────────────────────

/// One of the dashboard's key indicators: a short tile label plus the full
/// column name used in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub label: &'static str,
    pub column: &'static str,
}

pub const INDICATORS: [Indicator; 3] = [
    Indicator {
        label: "Female attended school (%)",
        column: "Population and Household Profile - Population (female) age 6 years and above who ever attended school (%)",
    },
    Indicator {
        label: "Population below 15 (%)",
        column: "Population and Household Profile - Population below age 15 years (%)",
    },
    Indicator {
        label: "Urban population (%)",
        column: "Population and Household Profile - Urban population (%)",
    },
];
