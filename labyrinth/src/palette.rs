//! Colours and glyphs for every marker and tool.

use labyrinth_core::{AttrMask, Color, Style};
use labyrinth_model::{CellKind, Marker};

pub const WALL: Color = Color::from_rgb(0x1E, 0x3A, 0x5F);
pub const OPEN: Color = Color::from_rgb(0xFF, 0xFF, 0xFF);
pub const START: Color = Color::from_rgb(0x4C, 0xAF, 0x50);
pub const END: Color = Color::from_rgb(0xF4, 0x43, 0x36);
pub const FRONTIER: Color = Color::from_rgb(0xAE, 0xD6, 0xF1);
pub const VISITED: Color = Color::from_rgb(0xD6, 0xEA, 0xF8);
pub const PATH: Color = Color::from_rgb(0xFF, 0xD7, 0x00);

// -- Chrome --

pub const FG_TEXT: Color = Color::DEFAULT;
pub const FG_DIM: Color = Color::from_rgb(120, 124, 134);
pub const FG_ERROR: Color = Color::from_rgb(255, 110, 100);
pub const BG_BAR: Color = Color::from_rgb(40, 42, 54);
pub const FG_BAR: Color = Color::from_rgb(248, 248, 242);

pub const fn marker_color(marker: Marker) -> Color {
    match marker {
        Marker::Wall => WALL,
        Marker::Open => OPEN,
        Marker::Start => START,
        Marker::End => END,
        Marker::Frontier => FRONTIER,
        Marker::Visited => VISITED,
        Marker::PathFinal => PATH,
    }
}

/// Text rendering of a marker, used by headless output.
pub const fn marker_glyph(marker: Marker) -> char {
    match marker {
        Marker::Wall => '#',
        Marker::Open => '.',
        Marker::Start => 'S',
        Marker::End => 'E',
        Marker::Frontier => '+',
        Marker::Visited => ':',
        Marker::PathFinal => '*',
    }
}

/// Style of a maze cell on screen. Endpoints carry their letter, so they
/// stay readable on terminals without true colour.
pub fn marker_style(marker: Marker) -> (char, Style) {
    let bg = marker_color(marker);
    let fg = if bg.is_light() { Color::BLACK } else { FG_BAR };
    let ch = match marker {
        Marker::Start => 'S',
        Marker::End => 'E',
        _ => ' ',
    };
    let attrs = match marker {
        Marker::Start | Marker::End => AttrMask::BOLD,
        _ => AttrMask::NONE,
    };
    (ch, Style { fg, bg, attrs })
}

/// Key that selects each tool, as shown in the header.
pub const fn tool_key(kind: CellKind) -> char {
    match kind {
        CellKind::Wall => '1',
        CellKind::Open => '2',
        CellKind::Start => '3',
        CellKind::End => '4',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_lettered() {
        assert_eq!(marker_style(Marker::Start).0, 'S');
        assert_eq!(marker_style(Marker::End).0, 'E');
        assert_eq!(marker_style(Marker::Visited).0, ' ');
    }

    #[test]
    fn text_contrasts_with_background() {
        assert_eq!(marker_style(Marker::Open).1.fg, Color::BLACK);
        assert_eq!(marker_style(Marker::Wall).1.fg, FG_BAR);
        assert_eq!(marker_style(Marker::PathFinal).1.bg, PATH);
    }

    #[test]
    fn glyphs_match_cell_kinds() {
        for kind in CellKind::ALL {
            assert_eq!(marker_glyph(kind.into()), kind.glyph());
        }
    }
}
