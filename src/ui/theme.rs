//! Light and dark colour themes

use egui::{Color32, Visuals};

/// Accent used for selections and links in the dark theme
pub const DARK_ACCENT: Color32 = Color32::from_rgb(0xb0, 0x26, 0xff);

/// Accent used for selections and links in the light theme
pub const LIGHT_ACCENT: Color32 = Color32::from_rgb(0xfd, 0xa0, 0x85);

pub fn accent(dark: bool) -> Color32 {
    if dark {
        DARK_ACCENT
    } else {
        LIGHT_ACCENT
    }
}

/// Colour for error messages in the status bar
pub fn error_color(dark: bool) -> Color32 {
    if dark {
        Color32::from_rgb(0xff, 0x41, 0x6c)
    } else {
        Color32::from_rgb(0xc6, 0x28, 0x28)
    }
}

/// Visuals for the requested theme
pub fn visuals(dark: bool) -> Visuals {
    let mut visuals = if dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    visuals.selection.bg_fill = accent(dark);
    visuals.hyperlink_color = accent(dark);
    if dark {
        visuals.panel_fill = Color32::from_rgb(0x24, 0x24, 0x3e);
        visuals.window_fill = Color32::from_rgb(0x1e, 0x1e, 0x2e);
    } else {
        visuals.panel_fill = Color32::from_rgb(0xfd, 0xfb, 0xf7);
        visuals.window_fill = Color32::from_rgb(0xff, 0xf1, 0xeb);
    }
    visuals
}

/// Switch the whole UI to the requested theme
pub fn apply(ctx: &egui::Context, dark: bool) {
    ctx.set_visuals(visuals(dark));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_follow_mode() {
        assert!(visuals(true).dark_mode);
        assert!(!visuals(false).dark_mode);
        assert_eq!(visuals(true).selection.bg_fill, DARK_ACCENT);
        assert_eq!(visuals(false).hyperlink_color, LIGHT_ACCENT);
    }
}
