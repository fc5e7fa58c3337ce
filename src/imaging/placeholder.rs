//! Placeholder rendering for failed generations.
//!
//! When the backend returns nothing usable, the batch still has to produce a
//! file: a plain background annotated with the offending prompt so whoever
//! reviews the pack can see at a glance which picture needs regenerating.
//! Text is drawn with the embedded `font8x8` bitmap glyphs scaled up, which
//! keeps the binary free of font assets.
//!
//! This path must never fail; it is the floor the whole batch stands on.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use image::{DynamicImage, Rgb, RgbImage};

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const TEXT_COLOR: Rgb<u8> = Rgb([50, 50, 50]);
/// Pixel multiplier applied to the 8x8 glyphs.
const GLYPH_SCALE: u32 = 2;
const MARGIN: u32 = 10;
/// Prompts are truncated to this many characters before drawing.
const MAX_PROMPT_CHARS: usize = 40;

/// Render a placeholder image of exactly `size`, annotated with the prompt.
pub fn render(prompt: &str, size: (u32, u32)) -> DynamicImage {
    let (width, height) = size;
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let text = truncate_prompt(prompt);
    let glyph_px = 8 * GLYPH_SCALE;
    let line_height = glyph_px + GLYPH_SCALE;
    let per_line = chars_per_line(width);

    for (line_no, line) in wrap_text(&text, per_line).iter().enumerate() {
        let y = MARGIN + line_no as u32 * line_height;
        if y + glyph_px > height {
            break;
        }
        for (col, ch) in line.chars().enumerate() {
            let x = MARGIN + col as u32 * glyph_px;
            if x + glyph_px > width {
                break;
            }
            draw_glyph(&mut img, ch, x, y);
        }
    }

    DynamicImage::ImageRgb8(img)
}

/// Truncate to [`MAX_PROMPT_CHARS`], appending `...` if shortened.
fn truncate_prompt(prompt: &str) -> String {
    if prompt.chars().count() <= MAX_PROMPT_CHARS {
        prompt.to_string()
    } else {
        let head: String = prompt.chars().take(MAX_PROMPT_CHARS).collect();
        format!("{head}...")
    }
}

/// How many glyphs fit on one line inside the margins. At least 1 so tiny
/// test images still draw something.
fn chars_per_line(width: u32) -> usize {
    let usable = width.saturating_sub(2 * MARGIN);
    ((usable / (8 * GLYPH_SCALE)) as usize).max(1)
}

/// Word-wrap into lines of at most `per_line` characters. Words longer than
/// a line are hard-split.
fn wrap_text(text: &str, per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > per_line {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(per_line).collect();
            let rest: String = word.chars().skip(per_line).collect();
            lines.push(head);
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > per_line && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Stamp one scaled glyph at (x, y). Unknown characters draw as a blank.
fn draw_glyph(img: &mut RgbImage, ch: char, x: u32, y: u32) {
    let Some(glyph) = BASIC_FONTS.get(ch) else {
        return;
    };
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8u32 {
            if bits & (1 << col) == 0 {
                continue;
            }
            for dy in 0..GLYPH_SCALE {
                for dx in 0..GLYPH_SCALE {
                    let px = x + col * GLYPH_SCALE + dx;
                    let py = y + row as u32 * GLYPH_SCALE + dy;
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, TEXT_COLOR);
                    }
                }
            }
        }
    }
}
