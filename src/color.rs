//! Status colors shown on the screen and the tray icon.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Microphone on, permission granted, and the "Turn ON" button.
pub static GREEN: Color = Color::rgb(40, 167, 69);

/// Microphone off, permission missing, and the "Turn OFF" button.
pub static RED: Color = Color::rgb(220, 53, 69);
