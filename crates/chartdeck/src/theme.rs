use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub muted: Color32,
    pub grid: Color32,
    pub panel: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub body_size: f32,
    pub chrome_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x1F, 0xB8, 0xCD),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            grid: Color32::from_rgba_unmultiplied(0xFF, 0xFF, 0xFF, 26),
            panel: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            h1_size: 96.0,
            h2_size: 64.0,
            body_size: 40.0,
            chrome_size: 22.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            heading_color: Color32::from_rgb(0x16, 0x21, 0x3E),
            accent: Color32::from_rgb(0x1F, 0xB8, 0xCD),
            muted: Color32::from_rgb(0x8A, 0x8A, 0x96),
            grid: Color32::from_rgba_unmultiplied(0, 0, 0, 26),
            panel: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            h1_size: 96.0,
            h2_size: 64.0,
            body_size: 40.0,
            chrome_size: 22.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        let [r, g, b, a] = color.to_srgba_unmultiplied();
        Color32::from_rgba_unmultiplied(r, g, b, (opacity * a as f32) as u8)
    }
}
