use pdf_writer::{Content, Name, Str};

use crate::error::Error;
use crate::fonts::{FontEntry, encode_as_gids};
use crate::style::Alignment;

pub(super) struct WordChunk {
    pub(super) text: String,
    pub(super) x_offset: f32, // x relative to line start
    pub(super) width: f32,
}

pub(super) struct TextLine {
    pub(super) chunks: Vec<WordChunk>,
    pub(super) total_width: f32,
}

impl TextLine {
    pub(super) fn text(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn finish_line(chunks: &mut Vec<WordChunk>) -> TextLine {
    let total_width = chunks.last().map(|c| c.x_offset + c.width).unwrap_or(0.0);
    TextLine {
        chunks: std::mem::take(chunks),
        total_width,
    }
}

/// Greedy line filling. Any run of whitespace, newlines included, is one word gap.
/// The first line is shortened by `first_line_indent`.
pub(super) fn build_paragraph_lines(
    text: &str,
    entry: &FontEntry,
    font_size: f32,
    max_width: f32,
    first_line_indent: f32,
) -> Result<Vec<TextLine>, Error> {
    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_chunks: Vec<WordChunk> = Vec::new();
    let mut current_x: f32 = 0.0;
    let space_w = entry.space_width(font_size);

    for word in text.split_whitespace() {
        let ww = entry.word_width(word, font_size);
        let line_max = if lines.is_empty() {
            max_width - first_line_indent
        } else {
            max_width
        };

        let proposed_x = if current_chunks.is_empty() {
            0.0
        } else {
            current_x + space_w
        };

        if !current_chunks.is_empty() && proposed_x + ww > line_max {
            lines.push(finish_line(&mut current_chunks));
            current_x = 0.0;
        } else {
            current_x = proposed_x;
        }

        // A word alone on a line must fit the narrowest line it can land on.
        let fits_alone = if lines.is_empty() {
            ww <= max_width - first_line_indent
        } else {
            ww <= max_width
        };
        if current_chunks.is_empty() && !fits_alone {
            return Err(Error::Render(format!(
                "word '{word}' is {ww:.1}pt wide, frame is {max_width:.1}pt"
            )));
        }

        current_chunks.push(WordChunk {
            text: word.to_string(),
            x_offset: current_x,
            width: ww,
        });
        current_x += ww;
    }

    if !current_chunks.is_empty() {
        lines.push(finish_line(&mut current_chunks));
    }
    Ok(lines)
}

/// Draw a slice of a paragraph's lines. `first_line_index` is the index of
/// `lines[0]` within the whole paragraph, so the indent and justification
/// rules stay correct across page breaks.
pub(super) fn render_paragraph_lines(
    content: &mut Content,
    lines: &[TextLine],
    alignment: Alignment,
    margin_left: f32,
    text_width: f32,
    first_baseline_y: f32,
    leading: f32,
    total_line_count: usize,
    first_line_index: usize,
    first_line_indent: f32,
    entry: &FontEntry,
    font_size: f32,
) {
    let last_line_idx = total_line_count.saturating_sub(1);

    content.begin_text();
    content.set_font(Name(entry.pdf_name.as_bytes()), font_size);
    let mut td_x = 0.0_f32;
    let mut td_y = 0.0_f32;

    for (line_num, line) in lines.iter().enumerate() {
        let y = first_baseline_y - line_num as f32 * leading;
        let global_line_idx = first_line_index + line_num;

        let (eff_margin, eff_width) = if global_line_idx == 0 {
            (margin_left + first_line_indent, text_width - first_line_indent)
        } else {
            (margin_left, text_width)
        };

        let is_justified = alignment == Alignment::Justify
            && global_line_idx != last_line_idx
            && line.chunks.len() > 1;

        let line_start_x = match alignment {
            Alignment::Center => eff_margin + (eff_width - line.total_width) / 2.0,
            Alignment::Right => eff_margin + eff_width - line.total_width,
            Alignment::Left | Alignment::Justify => eff_margin,
        };

        let extra_per_gap = if is_justified {
            (eff_width - line.total_width) / (line.chunks.len() - 1) as f32
        } else {
            0.0
        };

        for (chunk_idx, chunk) in line.chunks.iter().enumerate() {
            let x = line_start_x + chunk.x_offset + chunk_idx as f32 * extra_per_gap;
            content.next_line(x - td_x, y - td_y);
            td_x = x;
            td_y = y;
            let bytes = encode_as_gids(&chunk.text, &entry.char_to_gid);
            content.show(Str(&bytes));
        }
    }
    content.end_text();
}
