//! Theme descriptions and the palette derived from them.
//!
//! A theme file is plain markdown:
//!
//! ```text
//! # Golden Hour
//! - **Mustard Yellow**: `#F4A900`
//! - **Terracotta**: `#C1666B`
//! - **Headers**: DejaVu Sans Bold
//! - **Body Text**: DejaVu Sans
//! ```

use crate::color::{mix, normalize_hex, BLACK, WHITE};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static COLOR_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-\s+\*\*([^*]+)\*\*:\s+`(#[0-9a-fA-F]{6})`").unwrap());

static HEADER_FONT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)-\s+\*\*Headers\*\*:\s+(.+?)\s*$").unwrap());

static BODY_FONT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)-\s+\*\*Body Text\*\*:\s+(.+?)\s*$").unwrap());

static THEME_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+?)\s*$").unwrap());

const DEFAULT_THEME_NAME: &str = "Theme";

/// Regular and semibold families written to every deck.
const BODY_FAMILY: &str = "Segoe UI";
const BOLD_HEADER_FAMILY: &str = "Segoe UI Semibold";

/// Font labels as written in the theme file. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub header: Option<String>,
    pub body: Option<String>,
}

/// A parsed theme description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    /// Role name -> uppercase `RRGGBB`. Roles are not guaranteed present.
    pub colors: BTreeMap<String, String>,

    pub fonts: ThemeFonts,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: DEFAULT_THEME_NAME.to_string(),
            colors: BTreeMap::new(),
            fonts: ThemeFonts::default(),
        }
    }
}

impl Theme {
    /// Parse a theme description. Never fails: missing patterns leave the
    /// corresponding fields empty. A role listed twice keeps its last color.
    pub fn parse(text: &str) -> Self {
        let mut colors = BTreeMap::new();
        for line in text.lines() {
            if let Some(caps) = COLOR_LINE_REGEX.captures(line) {
                colors.insert(caps[1].trim().to_string(), normalize_hex(&caps[2]));
            }
        }

        let capture = |re: &Regex| {
            re.captures(text)
                .map(|c| c[1].trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let theme = Self {
            name: capture(&THEME_NAME_REGEX).unwrap_or_else(|| DEFAULT_THEME_NAME.to_string()),
            colors,
            fonts: ThemeFonts {
                header: capture(&HEADER_FONT_REGEX),
                body: capture(&BODY_FONT_REGEX),
            },
        };
        log::debug!(
            "Parsed theme '{}' with {} color roles",
            theme.name,
            theme.colors.len()
        );
        theme
    }

    /// Look up the first role present among `roles`.
    pub fn first_color(&self, roles: &[&str]) -> Option<&str> {
        roles
            .iter()
            .find_map(|role| self.colors.get(*role))
            .map(String::as_str)
    }
}

/// Location of a theme file under a user profile directory.
pub fn theme_path(profile_dir: &Path, theme_id: &str) -> PathBuf {
    profile_dir
        .join(".agents")
        .join("skills")
        .join("theme-factory")
        .join("themes")
        .join(format!("{theme_id}.md"))
}

/// Font families actually written to the deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPair {
    pub header: String,
    pub body: String,
}

impl FontPair {
    /// Theme font labels name families that are rarely installed, so the
    /// deck always uses Segoe UI. A header label mentioning "bold" selects the
    /// semibold face; anything else keeps the regular face.
    pub fn for_theme(fonts: &ThemeFonts) -> Self {
        let wants_bold = fonts
            .header
            .as_deref()
            .is_some_and(|label| label.to_lowercase().contains("bold"));

        Self {
            header: if wants_bold {
                BOLD_HEADER_FAMILY
            } else {
                BODY_FAMILY
            }
            .to_string(),
            body: BODY_FAMILY.to_string(),
        }
    }
}

impl Default for FontPair {
    fn default() -> Self {
        Self::for_theme(&ThemeFonts::default())
    }
}

/// Colors used by the layout, derived once per build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub accent1: String,
    pub accent2: String,
    pub background: String,
    pub card: String,
    pub text: String,
    pub dark: String,
    pub background_text: String,
}

impl Palette {
    /// Derive the palette from a theme's base roles, falling back to the
    /// golden-hour defaults for any role the theme lacks.
    pub fn from_theme(theme: &Theme) -> Self {
        let pick = |roles: &[&str], fallback: &'static str| match theme.first_color(roles) {
            Some(color) => color.to_string(),
            None => {
                log::debug!("Theme has none of {roles:?}; using {fallback}");
                fallback.to_string()
            }
        };

        let accent1 = pick(&["Mustard Yellow", "Electric Blue"], "F4A900");
        let accent2 = pick(&["Terracotta", "Neon Cyan"], "C1666B");
        let beige = pick(&["Warm Beige", "Cream", "White"], "D4B896");
        let chocolate = pick(&["Chocolate Brown", "Dark Gray", "Deep Navy"], "4A403A");

        Self {
            background: mix(&beige, WHITE, 0.68),
            card: mix(WHITE, &beige, 0.12),
            dark: mix(&chocolate, BLACK, 0.30),
            background_text: mix(WHITE, &beige, 0.08),
            text: chocolate,
            accent1,
            accent2,
        }
    }

    /// Alternate between the two accents, starting with `accent1`.
    pub fn alternate(&self, index: usize) -> &str {
        if index % 2 == 0 {
            &self.accent1
        } else {
            &self.accent2
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_theme(&Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLDEN_HOUR: &str = "# Golden Hour\n\
        \n\
        ## Color Palette\n\
        - **Mustard Yellow**: `#f4a900` - warm accent\n\
        - **Terracotta**: `#C1666B`\n\
        - **Warm Beige**: `#D4B896`\n\
        - **Chocolate Brown**: `#4A403A`\n\
        \n\
        ## Typography\n\
        - **Headers**: DejaVu Sans Bold\n\
        - **Body Text**: DejaVu Sans\n";

    #[test]
    fn test_parse_colors_uppercase_without_hash() {
        let theme = Theme::parse(GOLDEN_HOUR);
        assert_eq!(theme.name, "Golden Hour");
        assert_eq!(theme.colors.get("Mustard Yellow").map(String::as_str), Some("F4A900"));
        assert_eq!(theme.colors.len(), 4);
    }

    #[test]
    fn test_parse_fonts() {
        let theme = Theme::parse(GOLDEN_HOUR);
        assert_eq!(theme.fonts.header.as_deref(), Some("DejaVu Sans Bold"));
        assert_eq!(theme.fonts.body.as_deref(), Some("DejaVu Sans"));
    }

    #[test]
    fn test_repeated_role_last_wins() {
        let theme = Theme::parse("- **X**: `#111111`\n- **X**: `#aabbcc`\n");
        assert_eq!(theme.colors.get("X").map(String::as_str), Some("AABBCC"));
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        let theme = Theme::parse("nothing to see\n- **Bad**: #12345\n");
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn test_font_pair_bold_and_regular() {
        let bold = FontPair::for_theme(&ThemeFonts {
            header: Some("Lato BOLD".into()),
            body: None,
        });
        assert_eq!(bold.header, "Segoe UI Semibold");
        assert_eq!(bold.body, "Segoe UI");

        let regular = FontPair::for_theme(&ThemeFonts {
            header: Some("Lato".into()),
            body: None,
        });
        assert_eq!(regular.header, "Segoe UI");
        assert_eq!(FontPair::default().header, "Segoe UI");
    }

    #[test]
    fn test_palette_from_theme() {
        let palette = Palette::from_theme(&Theme::parse(GOLDEN_HOUR));
        assert_eq!(palette.accent1, "F4A900");
        assert_eq!(palette.accent2, "C1666B");
        assert_eq!(palette.text, "4A403A");
        assert_eq!(palette.background, mix("D4B896", WHITE, 0.68));
        assert_eq!(palette.dark, mix("4A403A", BLACK, 0.30));
    }

    #[test]
    fn test_palette_secondary_roles_and_fallbacks() {
        let theme = Theme::parse("- **Electric Blue**: `#0066FF`\n- **Deep Navy**: `#1A2238`\n");
        let palette = Palette::from_theme(&theme);
        assert_eq!(palette.accent1, "0066FF");
        assert_eq!(palette.accent2, "C1666B");
        assert_eq!(palette.text, "1A2238");
        assert_eq!(palette.card, mix(WHITE, "D4B896", 0.12));
        assert_eq!(palette.alternate(0), "0066FF");
        assert_eq!(palette.alternate(3), "C1666B");
    }

    #[test]
    fn test_theme_path() {
        let path = theme_path(Path::new("/home/me"), "golden-hour");
        assert_eq!(
            path,
            Path::new("/home/me/.agents/skills/theme-factory/themes/golden-hour.md")
        );
    }
}
