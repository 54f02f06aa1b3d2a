//! Static styling tokens for the frontend build.
//!
//! Shaped like a Tailwind config object so the build can consume
//! `GET /api/theme` directly: DaisyUI themes, a `sans` override, the two
//! brand color scales, and the keyframes behind the loading and navigation
//! indicators.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

pub const DAISYUI_THEMES: &[&str] = &["business", "light", "dark"];
pub const PLUGINS: &[&str] = &["daisyui"];
pub const CONTENT_GLOBS: &[&str] = &["./src/**/*.{html,js,svelte,ts}"];

/// Tailwind's default sans stack, appended after the brand face.
pub const DEFAULT_SANS: &[&str] = &[
    "ui-sans-serif",
    "system-ui",
    "sans-serif",
    "\"Apple Color Emoji\"",
    "\"Segoe UI Emoji\"",
    "\"Segoe UI Symbol\"",
    "\"Noto Color Emoji\"",
];
pub const BRAND_SANS: &str = "Helvetica-Roman";

/// One named color ramp, light (50) to dark (950).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale(pub &'static [(u16, &'static str)]);

impl ColorScale {
    #[must_use]
    pub fn shade(&self, step: u16) -> Option<&'static str> {
        self.0.iter().find(|(s, _)| *s == step).map(|(_, hex)| *hex)
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (step, hex) in self.0 {
            map.serialize_entry(&step.to_string(), hex)?;
        }
        map.end()
    }
}

pub const BIZBLUE: ColorScale = ColorScale(&[
    (50, "#E6E9EF"),
    (100, "#CDD4DF"),
    (200, "#9BA8C0"),
    (300, "#697DA0"),
    (400, "#495974"),
    (500, "#293241"),
    (600, "#222935"),
    (700, "#181D26"),
    (800, "#101319"),
    (900, "#080A0D"),
    (950, "#040506"),
]);

pub const BIZORANGE: ColorScale = ColorScale(&[
    (50, "#FFECEB"),
    (100, "#FFD9D6"),
    (200, "#FFAEA9"),
    (300, "#FE8880"),
    (400, "#FE5E52"),
    (500, "#FE382A"),
    (600, "#EA1101"),
    (700, "#B20D01"),
    (800, "#750801"),
    (900, "#3D0400"),
    (950, "#1E0200"),
]);

#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    pub content: &'static [&'static str],
    pub daisyui: DaisyUi,
    pub theme: Theme,
    pub plugins: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct DaisyUi {
    pub themes: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Theme {
    pub extend: ThemeExtend,
    pub colors: Colors,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeExtend {
    pub font_family: FontFamily,
    pub keyframes: serde_json::Value,
    pub animation: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FontFamily {
    pub sans: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Colors {
    pub bizblue: ColorScale,
    pub bizorange: ColorScale,
}

impl ThemeConfig {
    #[must_use]
    pub fn standard() -> Self {
        let mut sans = vec![BRAND_SANS];
        sans.extend_from_slice(DEFAULT_SANS);

        Self {
            content: CONTENT_GLOBS,
            daisyui: DaisyUi { themes: DAISYUI_THEMES },
            theme: Theme {
                extend: ThemeExtend {
                    font_family: FontFamily { sans },
                    keyframes: serde_json::json!({
                        "loading-pulse": {
                            "0%, 100%": { "opacity": "1" },
                            "50%": { "opacity": ".4" },
                        },
                        "nav-progress": {
                            "0%": { "transform": "translateX(-100%)" },
                            "100%": { "transform": "translateX(100%)" },
                        },
                    }),
                    animation: serde_json::json!({
                        "loading-pulse": "loading-pulse 1.5s ease-in-out infinite",
                        "nav-progress": "nav-progress 1s linear infinite",
                    }),
                },
                colors: Colors { bizblue: BIZBLUE, bizorange: BIZORANGE },
            },
            plugins: PLUGINS,
        }
    }
}
