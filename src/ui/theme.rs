//! Feathers theme and shared text styles

use bevy::prelude::*;
use bevy_feathers::dark_theme::create_dark_theme;
use bevy_feathers::palette;
use bevy_feathers::theme::UiTheme;

/// Cyan accent used by pins, glow and UI highlights
pub const ACCENT: Color = Color::srgb(0.0, 0.83, 1.0);
pub const TEXT_MAIN: Color = Color::srgb(0.92, 0.95, 0.98);
pub const TEXT_DIM: Color = Color::srgb(0.6, 0.68, 0.75);
pub const PANEL_BG: Color = Color::srgba(0.02, 0.05, 0.09, 0.82);

/// Dark theme with the accent applied to focus rings and buttons.
///
/// Feathers initializes `UiTheme` but does not populate it; unset tokens render
/// with the missing-token fallback color.
pub fn journey_theme() -> UiTheme {
    let mut theme = UiTheme(create_dark_theme());
    theme.set_color("feathers.text.main", palette::LIGHT_GRAY_1);
    theme.set_color("feathers.text.dim", palette::LIGHT_GRAY_2);
    theme.set_color("feathers.focus", ACCENT);
    theme.set_color("feathers.button.bg", Color::srgba(0.04, 0.09, 0.14, 0.85));
    theme.set_color(
        "feathers.button.bg.hover",
        Color::srgba(0.05, 0.18, 0.26, 0.95),
    );
    theme.set_color(
        "feathers.button.bg.pressed",
        Color::srgba(0.0, 0.3, 0.4, 0.95),
    );
    theme.set_color(
        "feathers.button.bg.disabled",
        Color::srgba(0.06, 0.09, 0.12, 0.5),
    );
    theme.set_color("feathers.button.txt", Color::srgba(0.75, 0.95, 1.0, 1.0));
    theme.set_color(
        "feathers.button.txt.disabled",
        Color::srgba(0.45, 0.55, 0.6, 0.7),
    );
    theme.set_color("feathers.button.primary.bg", Color::srgba(0.0, 0.55, 0.7, 0.95));
    theme.set_color(
        "feathers.button.primary.bg.hover",
        Color::srgba(0.0, 0.65, 0.82, 0.98),
    );
    theme.set_color(
        "feathers.button.primary.bg.pressed",
        Color::srgba(0.0, 0.75, 0.92, 1.0),
    );
    theme.set_color(
        "feathers.button.primary.bg.disabled",
        Color::srgba(0.05, 0.2, 0.26, 0.6),
    );
    theme.set_color("feathers.button.primary.txt", Color::WHITE);
    theme.set_color(
        "feathers.button.primary.txt.disabled",
        Color::srgba(0.5, 0.6, 0.65, 0.7),
    );
    theme
}

pub fn text_style(size: f32, color: Color) -> (TextFont, TextColor) {
    (TextFont::from_font_size(size), TextColor(color))
}

/// Scales the alpha of `base` by `opacity`.
pub fn faded(base: Color, opacity: f32) -> Color {
    let alpha = base.alpha() * opacity.clamp(0.0, 1.0);
    base.with_alpha(alpha)
}
