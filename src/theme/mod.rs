//! Account-type theming derived from a small hand-authored palette.
//!
//! Only `label`, `primary_color` and `badge_class` are authored per
//! category. Glow variants and the sparkline colour are derived once, on
//! first access, and stay fixed for the life of the process.

pub mod color;

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::models::AccountTypeName;

pub use color::{derive_line_color, parse_color, to_rgba, Rgb, FALLBACK_RGB};

/// Alpha of the regular glow colour.
pub const GLOW_ALPHA: f64 = 0.55;

/// Alpha of the emphasised glow colour.
pub const GLOW_EMPHASIS_ALPHA: f64 = 0.85;

/// Line colour used when none can be derived.
pub const NEUTRAL_LINE_COLOR: &str = "#94A3B8";

/// Badge classes used for unknown categories.
pub const NEUTRAL_BADGE_CLASS: &str = "bg-elevated text-default ring-accented";

/// Shared prefix of every badge class list.
pub const BADGE_RING_PREFIX: &str = "ring ring-inset";

/// Hand-authored palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryConfig {
    /// Display label.
    pub label: &'static str,
    /// Primary colour as hex, used by the allocation chart.
    pub primary_color: &'static str,
    /// Badge classes without the shared ring prefix.
    pub badge_class: &'static str,
}

/// Palette entry plus derived colours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTheme {
    /// Display label.
    pub label: String,
    /// Primary colour as hex.
    pub primary_color: String,
    /// Badge classes without the shared ring prefix.
    pub badge_class: String,
    /// Primary colour at [`GLOW_ALPHA`].
    pub glow: String,
    /// Primary colour at [`GLOW_EMPHASIS_ALPHA`].
    pub glow_emphasis: String,
    /// Sparkline colour taken from the badge foreground colour.
    pub line_color: String,
}

/// Palette for every account type.
pub const ACCOUNT_TYPE_CONFIG: [(AccountTypeName, CategoryConfig); 8] = [
    (
        AccountTypeName::Current,
        CategoryConfig {
            label: "Current",
            primary_color: "#3b82f6",
            badge_class: "bg-[#3B82F6]/20 text-[#93C5FD] ring-[#3B82F6]/45",
        },
    ),
    (
        AccountTypeName::Savings,
        CategoryConfig {
            label: "Savings",
            primary_color: "#22c55e",
            badge_class: "bg-[#16A34A]/15 text-[#4ADE80] ring-[#16A34A]/35",
        },
    ),
    (
        AccountTypeName::CreditCard,
        CategoryConfig {
            label: "Credit card",
            primary_color: "#ef4444",
            badge_class: "bg-[#DC2626]/15 text-[#FCA5A5] ring-[#DC2626]/35",
        },
    ),
    (
        AccountTypeName::Isa,
        CategoryConfig {
            label: "ISA",
            primary_color: "#f97316",
            badge_class: "bg-[#EA580C]/15 text-[#FDBA74] ring-[#EA580C]/35",
        },
    ),
    (
        AccountTypeName::Investment,
        CategoryConfig {
            label: "Investment",
            primary_color: "#a855f7",
            badge_class: "bg-[#7C3AED]/15 text-[#C4B5FD] ring-[#7C3AED]/35",
        },
    ),
    (
        AccountTypeName::Pension,
        CategoryConfig {
            label: "Pension",
            primary_color: "#db2777",
            badge_class: "bg-[#DB2777]/15 text-[#FDA4AF] ring-[#DB2777]/35",
        },
    ),
    (
        AccountTypeName::Cash,
        CategoryConfig {
            label: "Cash",
            primary_color: "#eab308",
            badge_class: "bg-[#CA8A04]/15 text-[#FDE047] ring-[#CA8A04]/35",
        },
    ),
    (
        AccountTypeName::Loan,
        CategoryConfig {
            label: "Loan",
            primary_color: "#14b8a6",
            badge_class: "bg-[#0F766E]/15 text-[#5EEAD4] ring-[#0F766E]/35",
        },
    ),
];

static ACCOUNT_TYPE_THEMES: LazyLock<BTreeMap<&'static str, CategoryTheme>> = LazyLock::new(|| {
    ACCOUNT_TYPE_CONFIG
        .iter()
        .map(|(kind, config)| (kind.as_str(), build_theme(config)))
        .collect()
});

/// Derive the full theme of one palette entry.
#[must_use]
pub fn build_theme(config: &CategoryConfig) -> CategoryTheme {
    CategoryTheme {
        label: config.label.to_owned(),
        primary_color: config.primary_color.to_owned(),
        badge_class: config.badge_class.to_owned(),
        glow: to_rgba(config.primary_color, GLOW_ALPHA),
        glow_emphasis: to_rgba(config.primary_color, GLOW_EMPHASIS_ALPHA),
        line_color: derive_line_color(config.badge_class)
            .unwrap_or_else(|| NEUTRAL_LINE_COLOR.to_owned()),
    }
}

/// Every account-type theme, keyed by wire key.
#[must_use]
pub fn account_type_themes() -> &'static BTreeMap<&'static str, CategoryTheme> {
    &ACCOUNT_TYPE_THEMES
}

/// Theme for `kind`, if it is a known account type.
#[must_use]
pub fn account_type_meta(kind: &str) -> Option<&'static CategoryTheme> {
    ACCOUNT_TYPE_THEMES.get(kind)
}

/// Display label for `kind`; unknown keys are returned unchanged.
#[must_use]
pub fn account_type_label(kind: &str) -> &str {
    account_type_meta(kind).map_or(kind, |theme| theme.label.as_str())
}

/// Full badge class list for `kind`, neutral for unknown keys.
#[must_use]
pub fn account_type_badge_class(kind: &str) -> String {
    let badge_class = account_type_meta(kind).map_or(NEUTRAL_BADGE_CLASS, |theme| {
        theme.badge_class.as_str()
    });
    format!("{BADGE_RING_PREFIX} {badge_class}")
}

/// Sparkline colour for `kind`, neutral for unknown keys.
#[must_use]
pub fn account_type_line_color(kind: &str) -> &'static str {
    account_type_meta(kind).map_or(NEUTRAL_LINE_COLOR, |theme| theme.line_color.as_str())
}
