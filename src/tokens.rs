//! Design tokens shared by every rendered component.
//!
//! Plain constant tables; the renderer reads the callout palettes and divider
//! styles, and `GET /api/v1/public/design-tokens` serves the whole set.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Scale {
    pub s50: &'static str,
    pub s100: &'static str,
    pub s200: &'static str,
    pub s300: &'static str,
    pub s400: &'static str,
    pub s500: &'static str,
    pub s600: &'static str,
    pub s700: &'static str,
    pub s800: &'static str,
    pub s900: &'static str,
}

pub mod colors {
    use super::Scale;

    /// Brand blue, 500 is the primary.
    pub const BLUE: Scale = Scale {
        s50: "#E6F2FF",
        s100: "#CCE5FF",
        s200: "#99CCFF",
        s300: "#66B3FF",
        s400: "#3399FF",
        s500: "#013A81",
        s600: "#012E68",
        s700: "#01224F",
        s800: "#011636",
        s900: "#000A1D",
    };

    pub const YELLOW: Scale = Scale {
        s50: "#FFFBF0",
        s100: "#FFF7E0",
        s200: "#FFEFC1",
        s300: "#FFE782",
        s400: "#FFDF43",
        s500: "#DEB408",
        s600: "#C2A007",
        s700: "#A68C06",
        s800: "#8A7805",
        s900: "#6E6404",
    };

    pub const DARK_BLUE: Scale = Scale {
        s50: "#E6E7F0",
        s100: "#CCCFE1",
        s200: "#999FC3",
        s300: "#666FA5",
        s400: "#333F87",
        s500: "#020747",
        s600: "#02063A",
        s700: "#01052D",
        s800: "#010420",
        s900: "#000313",
    };

    pub const COOL_GREY: Scale = Scale {
        s50: "#F5F5F5",
        s100: "#EBEBEB",
        s200: "#D7D7D7",
        s300: "#C3C3C3",
        s400: "#AFAFAF",
        s500: "#8D8A88",
        s600: "#716E6C",
        s700: "#555250",
        s800: "#393634",
        s900: "#1D1A18",
    };

    pub const SUCCESS: Scale = Scale {
        s50: "#F0FDF4",
        s100: "#DCFCE7",
        s200: "#BBF7D0",
        s300: "#86EFAC",
        s400: "#4ADE80",
        s500: "#22C55E",
        s600: "#16A34A",
        s700: "#15803D",
        s800: "#166534",
        s900: "#14532D",
    };

    pub const WARNING: Scale = Scale {
        s50: "#FFFBEB",
        s100: "#FEF3C7",
        s200: "#FDE68A",
        s300: "#FCD34D",
        s400: "#FBBF24",
        s500: "#F59E0B",
        s600: "#D97706",
        s700: "#B45309",
        s800: "#92400E",
        s900: "#78350F",
    };

    pub const ERROR: Scale = Scale {
        s50: "#FEF2F2",
        s100: "#FEE2E2",
        s200: "#FECACA",
        s300: "#FCA5A5",
        s400: "#F87171",
        s500: "#EF4444",
        s600: "#DC2626",
        s700: "#B91C1C",
        s800: "#991B1B",
        s900: "#7F1D1D",
    };

    pub const INFO: Scale = Scale {
        s50: "#EFF6FF",
        s100: "#DBEAFE",
        s200: "#BFDBFE",
        s300: "#93C5FD",
        s400: "#60A5FA",
        s500: "#3B82F6",
        s600: "#2563EB",
        s700: "#1D4ED8",
        s800: "#1E40AF",
        s900: "#1E3A8A",
    };

    pub const NEUTRAL: Scale = Scale {
        s50: "#FAFAFA",
        s100: "#F5F5F5",
        s200: "#E5E5E5",
        s300: "#D4D4D4",
        s400: "#A3A3A3",
        s500: "#737373",
        s600: "#525252",
        s700: "#404040",
        s800: "#262626",
        s900: "#171717",
    };
}

pub mod spacing {
    // 8px grid
    pub const PX: &str = "1px";
    pub const S1: &str = "0.25rem";
    pub const S2: &str = "0.5rem";
    pub const S3: &str = "0.75rem";
    pub const S4: &str = "1rem";
    pub const S6: &str = "1.5rem";
    pub const S8: &str = "2rem";
    pub const S12: &str = "3rem";
    pub const S16: &str = "4rem";
    pub const S24: &str = "6rem";

    pub const COMPONENT_TIGHT: &str = S2;
    pub const COMPONENT_NORMAL: &str = S4;
    pub const COMPONENT_RELAXED: &str = S6;
    pub const SECTION_NORMAL: &str = S12;
}

pub mod typography {
    pub const FONT_PRIMARY: &[&str] = &["Futura PT", "system-ui", "sans-serif"];
    pub const FONT_SECONDARY: &[&str] = &["AdelleSans", "system-ui", "sans-serif"];
    pub const FONT_MONO: &[&str] = &["SF Mono", "Monaco", "Inconsolata", "Roboto Mono", "monospace"];

    /// (name, size, line height)
    pub const FONT_SIZES: &[(&str, &str, &str)] = &[
        ("xs", "0.75rem", "1rem"),
        ("sm", "0.875rem", "1.25rem"),
        ("base", "1rem", "1.5rem"),
        ("lg", "1.125rem", "1.75rem"),
        ("xl", "1.25rem", "1.75rem"),
        ("2xl", "1.5rem", "2rem"),
        ("3xl", "1.875rem", "2.25rem"),
        ("4xl", "2.25rem", "2.5rem"),
    ];

    pub const WEIGHT_NORMAL: &str = "400";
    pub const WEIGHT_MEDIUM: &str = "500";
    pub const WEIGHT_SEMIBOLD: &str = "600";
    pub const WEIGHT_BOLD: &str = "700";
}

pub mod motion {
    pub const DURATION_FAST: &str = "150ms";
    pub const DURATION_NORMAL: &str = "250ms";
    pub const DURATION_SLOW: &str = "400ms";
    pub const EASE_OUT: &str = "cubic-bezier(0, 0, 0.2, 1)";
    pub const EASE_IN_OUT: &str = "cubic-bezier(0.4, 0, 0.2, 1)";
}

/// Icon and utility classes for one callout kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalloutPalette {
    pub icon: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

pub mod callout {
    use super::CalloutPalette;

    pub const INFO: CalloutPalette = CalloutPalette {
        icon: "info",
        background: "bg-gray-50 dark:bg-gray-900/20 border-gray-200 dark:border-gray-800",
        text: "text-gray-800 dark:text-gray-200",
    };
    pub const WARNING: CalloutPalette = CalloutPalette {
        icon: "alert-triangle",
        background: "bg-yellow-50 dark:bg-yellow-900/20 border-yellow-200 dark:border-yellow-800",
        text: "text-yellow-800 dark:text-yellow-200",
    };
    pub const ERROR: CalloutPalette = CalloutPalette {
        icon: "alert-circle",
        background: "bg-red-50 dark:bg-red-900/20 border-red-200 dark:border-red-800",
        text: "text-red-800 dark:text-red-200",
    };
    pub const SUCCESS: CalloutPalette = CalloutPalette {
        icon: "check-circle",
        background: "bg-green-50 dark:bg-green-900/20 border-green-200 dark:border-green-800",
        text: "text-green-800 dark:text-green-200",
    };
    pub const TIP: CalloutPalette = CalloutPalette {
        icon: "lightbulb",
        background: "bg-blue-50 dark:bg-blue-900/20 border-blue-200 dark:border-blue-800",
        text: "text-blue-800 dark:text-blue-200",
    };
}

pub mod divider {
    pub const DEFAULT: &str = "border-t border-border my-6";
    pub const DOTTED: &str = "border-t-2 border-dotted border-border my-6";
    pub const THICK: &str = "border-t-4 border-border my-6";
}

pub mod hero {
    pub const GRADIENT_BLUE: &str = "bg-gradient-to-r from-blue-600 to-blue-800";
    pub const GRADIENT_GRAY: &str = "bg-gradient-to-r from-gray-600 to-gray-800";
}

/// Serializable snapshot of the token tables.
#[derive(Debug, Serialize)]
pub struct DesignTokens {
    colors: Vec<(&'static str, Scale)>,
    spacing: Vec<(&'static str, &'static str)>,
    font_families: Vec<(&'static str, &'static [&'static str])>,
    font_sizes: &'static [(&'static str, &'static str, &'static str)],
    motion: Vec<(&'static str, &'static str)>,
    callouts: Vec<(&'static str, CalloutPalette)>,
}

impl DesignTokens {
    pub fn snapshot() -> Self {
        Self {
            colors: vec![
                ("blue", colors::BLUE),
                ("yellow", colors::YELLOW),
                ("darkBlue", colors::DARK_BLUE),
                ("coolGrey", colors::COOL_GREY),
                ("success", colors::SUCCESS),
                ("warning", colors::WARNING),
                ("error", colors::ERROR),
                ("info", colors::INFO),
                ("neutral", colors::NEUTRAL),
            ],
            spacing: vec![
                ("px", spacing::PX),
                ("1", spacing::S1),
                ("2", spacing::S2),
                ("3", spacing::S3),
                ("4", spacing::S4),
                ("6", spacing::S6),
                ("8", spacing::S8),
                ("12", spacing::S12),
                ("16", spacing::S16),
                ("24", spacing::S24),
            ],
            font_families: vec![
                ("primary", typography::FONT_PRIMARY),
                ("secondary", typography::FONT_SECONDARY),
                ("mono", typography::FONT_MONO),
            ],
            font_sizes: typography::FONT_SIZES,
            motion: vec![
                ("fast", motion::DURATION_FAST),
                ("normal", motion::DURATION_NORMAL),
                ("slow", motion::DURATION_SLOW),
                ("easeOut", motion::EASE_OUT),
                ("easeInOut", motion::EASE_IN_OUT),
            ],
            callouts: vec![
                ("info", callout::INFO),
                ("warning", callout::WARNING),
                ("error", callout::ERROR),
                ("success", callout::SUCCESS),
                ("tip", callout::TIP),
            ],
        }
    }
}
