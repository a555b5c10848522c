//! Tray icons reflecting the screen's status colors.

use std::collections::HashMap;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use parking_lot::Mutex;

use crate::color::Color;
use crate::view::ScreenView;

const ICON_SIZE: u32 = 32;
/// Width of the permission ring around the status disc.
const RING_WIDTH: f32 = 4.0;

static ICONS: LazyLock<Mutex<HashMap<(Color, Color), tray_icon::Icon>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// The tray icon for a view: a disc in the microphone status color inside a
/// ring in the permission color.
pub fn icon(view: &ScreenView) -> Result<tray_icon::Icon> {
    let key = (view.status_color, view.permission_color);
    let mut icons = ICONS.lock();
    if let Some(icon) = icons.get(&key) {
        return Ok(icon.clone());
    }
    let icon = load_icon(key.0, key.1)?;
    icons.insert(key, icon.clone());
    Ok(icon)
}

fn render(status: Color, permission: Color) -> RgbaImage {
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let outer = ICON_SIZE as f32 / 2.0 - 1.0;
    let inner = outer - RING_WIDTH;
    RgbaImage::from_fn(ICON_SIZE, ICON_SIZE, |x, y| {
        let dx = x as f32 - center;
        let dy = y as f32 - center;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance <= inner {
            Rgba([status.r, status.g, status.b, 255])
        } else if distance <= outer {
            Rgba([permission.r, permission.g, permission.b, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

fn load_icon(status: Color, permission: Color) -> Result<tray_icon::Icon> {
    let image = render(status, permission);
    let (width, height) = image.dimensions();
    tray_icon::Icon::from_rgba(image.into_raw(), width, height).with_context(|| {
        format!(
            "Failed to build icon for {} on {}",
            status.hex(),
            permission.hex()
        )
    })
}
