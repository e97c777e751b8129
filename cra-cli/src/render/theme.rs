use termimad::{
    Alignment, MadSkin,
    crossterm::style::{Attribute, Color},
};

/// Colors of the shell output: tables, headings and status lines.
pub struct Theme;

const fn rgb(hex: u32) -> Color {
    Color::Rgb {
        r: (hex >> 16) as u8,
        g: (hex >> 8) as u8,
        b: hex as u8,
    }
}

impl Theme {
    pub const TEXT: Color = rgb(0xABB2BF);
    pub const HEADING: Color = rgb(0x61AFEF);
    pub const BORDER: Color = rgb(0x5C6370);
    /// Durations and amounts.
    pub const FIGURE: Color = rgb(0x98C379);
    pub const TOTAL: Color = rgb(0xE5C07B);

    pub const ERROR: Color = rgb(0xE06C75);
    pub const WARNING: Color = rgb(0xD19A66);
    pub const SUCCESS: Color = rgb(0x98C379);

    pub fn skin() -> MadSkin {
        let mut skin = MadSkin::default();

        skin.paragraph.set_fg(Self::TEXT);
        skin.bold.set_fg(Self::TOTAL);

        // `#` titles the month, `##` its sections.
        for header in &mut skin.headers[..2] {
            header.set_fg(Self::HEADING);
            header.add_attr(Attribute::Bold);
            header.align = Alignment::Left;
        }

        skin.table.set_fg(Self::BORDER);
        skin.table.align = Alignment::Left;
        skin.bullet.set_fg(Self::HEADING);
        skin.inline_code.set_fg(Self::FIGURE);

        skin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_splits_the_channels() {
        assert_eq!(
            rgb(0xE06C75),
            Color::Rgb {
                r: 0xE0,
                g: 0x6C,
                b: 0x75
            }
        );
        assert_eq!(Theme::ERROR, rgb(0xE06C75));
    }
}
