use std::path::PathBuf;

use clap::Subcommand;
use pomowidget_core::appearance::{IconSlot, Shape, Theme, PRESETS};
use pomowidget_core::{Background, BackgroundProvider, Config};

#[derive(Subcommand)]
pub enum AppearanceAction {
    /// Print font and background
    Show,
    /// Set the font family (CSS font-family syntax)
    Font {
        family: String,
    },
    /// Set the text color (#rgb or #rrggbb)
    Color {
        color: String,
    },
    /// Switch between the light and dark theme
    Theme {
        theme: Theme,
    },
    /// Set the panel outline (rounded, square, circle)
    Shape {
        shape: Shape,
    },
    /// Set the goal line shown under the clock; omit to clear it
    Goal {
        text: Option<String>,
    },
    /// Use a custom image for a button (reset, settings); omit the URL to
    /// go back to the built-in glyph
    Icon {
        slot: IconSlot,
        url: Option<String>,
    },
    /// Use one of the built-in backgrounds
    Preset {
        /// 1-based preset number
        number: usize,
    },
    /// List the built-in backgrounds
    Presets,
    /// Use an image file as background
    Upload {
        path: PathBuf,
    },
    /// Go back to the default background
    Restore,
}

pub fn run(action: AppearanceAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load();

    match action {
        AppearanceAction::Show => {
            let a = &config.appearance;
            println!("font: {} ({})", a.font, a.font_color);
            println!("theme: {}", a.theme);
            println!("shape: {}", a.shape);
            if !a.goal.is_empty() {
                println!("goal: {}", a.goal);
            }
            println!("reset icon: {}", icon_or_builtin(&a.icons.reset));
            println!("settings icon: {}", icon_or_builtin(&a.icons.settings));
            println!("background: {}", describe(a.background()));
            return Ok(());
        }
        AppearanceAction::Presets => {
            for (i, url) in PRESETS.iter().enumerate() {
                println!("{}  {url}", i + 1);
            }
            return Ok(());
        }
        AppearanceAction::Font { family } => {
            if !config.appearance.set_font(&family) {
                return Err("font family must not be blank".into());
            }
        }
        AppearanceAction::Color { color } => {
            if !config.appearance.set_font_color(&color) {
                return Err(format!("'{color}' is not a hex color like #ffffff").into());
            }
        }
        AppearanceAction::Theme { theme } => config.appearance.theme = theme,
        AppearanceAction::Shape { shape } => config.appearance.shape = shape,
        AppearanceAction::Goal { text } => {
            config.appearance.set_goal(text.as_deref().unwrap_or_default());
        }
        AppearanceAction::Icon { slot, url } => {
            config.appearance.set_icon(slot, url.as_deref().unwrap_or_default());
        }
        AppearanceAction::Preset { number } => {
            let ok = number
                .checked_sub(1)
                .is_some_and(|i| config.appearance.select_preset(i));
            if !ok {
                return Err(format!("preset must be between 1 and {}", PRESETS.len()).into());
            }
        }
        AppearanceAction::Upload { path } => {
            config.appearance.background = Background::from_file(&path)?;
        }
        AppearanceAction::Restore => config.appearance.restore_background(),
    }

    config.save()?;
    println!("{}", serde_json::to_string_pretty(&config.appearance)?);
    Ok(())
}

fn icon_or_builtin(url: &str) -> &str {
    if url.is_empty() {
        "built-in"
    } else {
        url
    }
}

fn describe(background: &Background) -> String {
    match background {
        Background::Preset(url) => format!("preset {url}"),
        Background::Upload(uri) => format!("uploaded image ({} bytes inline)", uri.len()),
    }
}
