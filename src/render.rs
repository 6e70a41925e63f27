//! Terminal rendering of a highlighted document
//!
//! Prints each line with highlighted columns coloured in the style's
//! border colour, and a ruler marker in the right lane of every line
//! holding a highlight.

use std::io::Write;

use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::document::Document;
use crate::error::Result;
use crate::highlight::Region;
use crate::style::StyleConfig;

/// Character drawn in the ruler lane
const RULER_MARK: char = '▐';

/// Map a CSS-style colour name or `#rrggbb` to a terminal colour
pub fn parse_color(name: &str) -> Color {
    let name = name.trim().to_lowercase();
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() == 6 {
            if let Ok(rgb) = u32::from_str_radix(hex, 16) {
                return Color::Rgb {
                    r: (rgb >> 16) as u8,
                    g: (rgb >> 8) as u8,
                    b: rgb as u8,
                };
            }
        }
        return Color::Reset;
    }

    match name.as_str() {
        "black" => Color::Black,
        "red" | "darkred" => Color::DarkRed,
        "lightred" | "pink" => Color::Red,
        "green" | "darkgreen" => Color::DarkGreen,
        "lightgreen" | "lime" => Color::Green,
        "yellow" | "orange" => Color::Yellow,
        "darkyellow" | "olive" => Color::DarkYellow,
        "blue" | "lightblue" => Color::Blue,
        "darkblue" | "navy" => Color::DarkBlue,
        "magenta" | "purple" => Color::DarkMagenta,
        "cyan" | "aqua" => Color::Cyan,
        "darkcyan" | "teal" => Color::DarkCyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Grey,
        "darkgray" | "darkgrey" => Color::DarkGrey,
        _ => Color::Reset,
    }
}

/// Column ranges highlighted on a line, sorted and merged
fn line_highlights(regions: &[Region], line: usize, line_len: usize) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = regions
        .iter()
        .filter_map(|r| r.columns_on_line(line, line_len))
        .filter(|(start, end)| start < end)
        .collect();
    ranges.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Write the document with highlights to `out`
pub fn render<W: Write>(
    out: &mut W,
    document: &Document,
    regions: &[Region],
    style: &StyleConfig,
    dark: bool,
) -> Result<()> {
    let highlight = parse_color(style.border_color(dark));
    let ruler = parse_color(&style.ruler_color);

    let text_width = (0..document.line_count())
        .filter_map(|i| document.line(i))
        .map(|l| l.width())
        .max()
        .unwrap_or(0);

    for idx in 0..document.line_count() {
        let line = document.line(idx).unwrap_or("");
        let chars: Vec<char> = line.chars().collect();
        let ranges = line_highlights(regions, idx, chars.len());

        let mut col = 0;
        for (start, end) in &ranges {
            let plain: String = chars[col..*start].iter().collect();
            let marked: String = chars[*start..*end].iter().collect();
            queue!(
                out,
                Print(plain),
                SetForegroundColor(highlight),
                SetAttribute(Attribute::Underlined),
                Print(marked),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
            col = *end;
        }
        let rest: String = chars[col..].iter().collect();
        queue!(out, Print(rest))?;

        if !ranges.is_empty() {
            let pad = text_width - line.width() + 1;
            queue!(
                out,
                Print(" ".repeat(pad)),
                SetForegroundColor(ruler),
                Print(RULER_MARK),
                ResetColor
            )?;
        }
        queue!(out, Print('\n'))?;
    }

    out.flush()?;
    Ok(())
}
