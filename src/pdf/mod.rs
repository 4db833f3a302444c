mod layout;

use std::collections::{BTreeSet, HashMap};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, TextStr};

use crate::error::Error;
use crate::fonts::{FontEntry, FontRegistry, embed_font};
use crate::model::{DocumentInfo, Flowable, Margins, PageSize, PageText};

use layout::{build_paragraph_lines, render_paragraph_lines};

/// Tolerance for float drift when checking whether a line still fits the frame.
const FIT_EPSILON: f32 = 0.01;

pub(crate) struct Rendered {
    pub(crate) bytes: Vec<u8>,
    pub(crate) pages: Vec<PageText>,
}

struct PageCursor {
    frame_top: f32,
    frame_bottom: f32,
    y: f32,
    at_top: bool,
    contents: Vec<Content>,
    texts: Vec<PageText>,
    current: Content,
    current_text: PageText,
}

impl PageCursor {
    fn new(frame_top: f32, frame_bottom: f32) -> Self {
        Self {
            frame_top,
            frame_bottom,
            y: frame_top,
            at_top: true,
            contents: Vec::new(),
            texts: Vec::new(),
            current: Content::new(),
            current_text: PageText::default(),
        }
    }

    fn new_page(&mut self) {
        self.contents
            .push(std::mem::replace(&mut self.current, Content::new()));
        self.texts.push(std::mem::take(&mut self.current_text));
        self.y = self.frame_top;
        self.at_top = true;
    }

    /// Whole lines of pitch `leading` that fit between the cursor and the frame bottom.
    fn lines_that_fit(&self, leading: f32) -> usize {
        let room = self.y - self.frame_bottom + FIT_EPSILON;
        if room <= 0.0 {
            0
        } else {
            (room / leading).floor() as usize
        }
    }

    fn finish(mut self) -> (Vec<Content>, Vec<PageText>) {
        // A break with nothing after it leaves an empty page behind.
        if !self.at_top || self.contents.is_empty() {
            self.new_page();
        }
        (self.contents, self.texts)
    }
}

pub(crate) fn render(
    flowables: &[Flowable],
    registry: &FontRegistry,
    page_size: PageSize,
    margins: Margins,
    info: &DocumentInfo,
) -> Result<Rendered, Error> {
    let t0 = std::time::Instant::now();
    let (page_width, page_height) = page_size.dimensions();
    let text_width = margins.frame_width(page_width);
    let (frame_top, frame_bottom) = margins.frame_vertical(page_height);
    let frame_height = frame_top - frame_bottom;
    if text_width <= 0.0 || frame_height <= 0.0 {
        return Err(Error::Render(format!(
            "margins leave no printable area on a {page_width:.1}x{page_height:.1}pt page"
        )));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Phase 1: collect characters per font and embed each font once
    let mut font_order: Vec<&str> = Vec::new();
    let mut used_chars_per_font: HashMap<&str, BTreeSet<char>> = HashMap::new();
    for flowable in flowables {
        if let Flowable::Paragraph { text, style } = flowable {
            let chars = used_chars_per_font
                .entry(style.font.as_str())
                .or_insert_with(|| {
                    font_order.push(style.font.as_str());
                    BTreeSet::new()
                });
            chars.extend(text.chars().filter(|c| !c.is_whitespace()));
            chars.insert(' ');
        }
    }

    let mut seen_fonts: HashMap<&str, FontEntry> = HashMap::new();
    for (i, &name) in font_order.iter().enumerate() {
        let resource = registry
            .get(name)
            .ok_or_else(|| Error::UnknownFont(name.to_string()))?;
        let entry = embed_font(
            &mut pdf,
            resource,
            format!("F{}", i + 1),
            &used_chars_per_font[name],
            &mut alloc,
        )?;
        seen_fonts.insert(name, entry);
    }

    let t_fonts = t0.elapsed();

    // Phase 2: flow paragraphs and spacers into pages
    let mut cursor = PageCursor::new(frame_top, frame_bottom);

    for flowable in flowables {
        match flowable {
            Flowable::Spacer { height } => {
                if cursor.at_top {
                    continue;
                }
                if cursor.y - height < cursor.frame_bottom - FIT_EPSILON {
                    cursor.new_page();
                } else {
                    cursor.y -= height;
                    cursor.at_top = false;
                }
            }
            Flowable::Paragraph { text, style } => {
                let entry = &seen_fonts[style.font.as_str()];
                let lines = build_paragraph_lines(
                    text,
                    entry,
                    style.font_size,
                    text_width,
                    style.first_line_indent,
                )?;
                if lines.is_empty() {
                    continue;
                }

                if !cursor.at_top {
                    cursor.y -= style.space_before;
                }

                let ascent = style.font_size * entry.ascender_ratio;
                let mut idx = 0;
                while idx < lines.len() {
                    let fit = cursor.lines_that_fit(style.leading);
                    if fit == 0 {
                        if cursor.at_top {
                            return Err(Error::Render(format!(
                                "leading {}pt does not fit the {frame_height:.1}pt frame",
                                style.leading
                            )));
                        }
                        cursor.new_page();
                        continue;
                    }
                    let take = fit.min(lines.len() - idx);
                    let slice = &lines[idx..idx + take];
                    render_paragraph_lines(
                        &mut cursor.current,
                        slice,
                        style.alignment,
                        margins.frame_left(),
                        text_width,
                        cursor.y - ascent,
                        style.leading,
                        lines.len(),
                        idx,
                        style.first_line_indent,
                        entry,
                        style.font_size,
                    );
                    cursor
                        .current_text
                        .lines
                        .extend(slice.iter().map(|l| l.text()));
                    cursor.y -= take as f32 * style.leading;
                    cursor.at_top = false;
                    idx += take;
                    if idx < lines.len() {
                        cursor.new_page();
                    }
                }
                cursor.y -= style.space_after;
            }
        }
    }

    let (all_contents, page_texts) = cursor.finish();
    let t_layout = t0.elapsed();

    // Phase 3: page tree
    let n = all_contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in all_contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let font_pairs: Vec<(&str, Ref)> = font_order
        .iter()
        .map(|name| {
            let entry = &seen_fonts[name];
            (entry.pdf_name.as_str(), entry.font_ref)
        })
        .collect();

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, page_width, page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for (name, font_ref) in &font_pairs {
            fonts.pair(Name(name.as_bytes()), *font_ref);
        }
    }

    {
        let mut doc_info = pdf.document_info(info_id);
        doc_info.producer(TextStr(concat!("petition-pdf ", env!("CARGO_PKG_VERSION"))));
        if let Some(title) = &info.title {
            doc_info.title(TextStr(title));
        }
        if let Some(author) = &info.author {
            doc_info.author(TextStr(author));
        }
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: font_embed={:.1}ms, layout={:.1}ms, assembly={:.1}ms, {} pages",
        t_fonts.as_secs_f64() * 1000.0,
        (t_layout - t_fonts).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
        n,
    );

    Ok(Rendered {
        bytes: pdf.finish(),
        pages: page_texts,
    })
}
