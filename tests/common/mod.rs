#![allow(dead_code)]

use std::path::{Path, PathBuf};

use petition_pdf::{DocumentComposer, StyleOverrides, StyleSpec};

pub const TEST_FONT_NAME: &str = "Test";

const CANDIDATE_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

/// A real TrueType font for layout tests. `PETITION_TEST_FONT` wins over the
/// built-in candidate list. Returns `None` (and the caller skips) when the
/// machine has none of them.
pub fn test_font() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("PETITION_TEST_FONT") {
        let p = PathBuf::from(p);
        if p.is_file() {
            return Some(p);
        }
    }
    CANDIDATE_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Composer with the test font registered as `Test`, or `None` to skip.
pub fn composer_with_font() -> Option<DocumentComposer> {
    let Some(path) = test_font() else {
        println!("SKIP: no test font found (set PETITION_TEST_FONT)");
        return None;
    };
    let mut composer = DocumentComposer::new();
    composer
        .register_font(TEST_FONT_NAME, &path)
        .expect("register test font");
    Some(composer)
}

/// `{font: Test, size: 12, leading: 16, space_after: 12}` on top of `Normal`.
pub fn test_style(composer: &DocumentComposer) -> StyleSpec {
    composer
        .define_style(
            "Normal",
            &StyleOverrides {
                font: Some(TEST_FONT_NAME.into()),
                font_size: Some(12.0),
                leading: Some(16.0),
                space_after: Some(12.0),
                ..StyleOverrides::default()
            },
        )
        .expect("define test style")
}

pub fn pdf_page_count(pdf: &Path) -> usize {
    let doc = lopdf::Document::load(pdf).expect("parse generated PDF");
    doc.get_pages().len()
}

pub fn pdf_page_count_mem(bytes: &[u8]) -> usize {
    let doc = lopdf::Document::load_mem(bytes).expect("parse generated PDF");
    doc.get_pages().len()
}

/// (width, height) of the first page's MediaBox.
pub fn pdf_mediabox(pdf: &Path) -> (f32, f32) {
    let doc = lopdf::Document::load(pdf).expect("parse generated PDF");
    let (_, &page_id) = doc.get_pages().iter().next().expect("at least one page");
    let page = doc
        .get_object(page_id)
        .and_then(|o| o.as_dict())
        .expect("page dictionary");
    let nums: Vec<f32> = page
        .get(b"MediaBox")
        .and_then(|o| o.as_array())
        .expect("MediaBox")
        .iter()
        .map(|o| o.as_float().expect("numeric MediaBox entry"))
        .collect();
    (nums[2] - nums[0], nums[3] - nums[1])
}

pub fn dir_is_empty(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

/// One line of placed text: its baseline and the x origin of every word on it.
pub struct PlacedLine {
    pub y: f32,
    pub xs: Vec<f32>,
}

/// Word origins per page, read back from the `Td` operators of the decoded
/// content streams. Each word is drawn after its own `Td`, and every text
/// object starts from the page origin.
pub fn pdf_placed_lines(bytes: &[u8]) -> Vec<Vec<PlacedLine>> {
    let doc = lopdf::Document::load_mem(bytes).expect("parse generated PDF");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let raw = doc.get_page_content(page_id).expect("page content");
            let content = lopdf::content::Content::decode(&raw).expect("decode content stream");
            let mut lines: Vec<PlacedLine> = Vec::new();
            let (mut x, mut y) = (0.0_f32, 0.0_f32);
            for op in &content.operations {
                match op.operator.as_str() {
                    "BT" => (x, y) = (0.0, 0.0),
                    "Td" => {
                        x += op.operands[0].as_float().expect("Td x");
                        y += op.operands[1].as_float().expect("Td y");
                        match lines.last_mut() {
                            Some(line) if (line.y - y).abs() < 0.01 => line.xs.push(x),
                            _ => lines.push(PlacedLine { y, xs: vec![x] }),
                        }
                    }
                    _ => {}
                }
            }
            lines
        })
        .collect()
}

/// The ToUnicode CMap of the first Type0 font in the document.
pub fn pdf_tounicode_cmap(pdf: &Path) -> String {
    let doc = lopdf::Document::load(pdf).expect("parse generated PDF");
    let cmap_id = doc
        .objects
        .values()
        .filter_map(|o| o.as_dict().ok())
        .find(|d| {
            d.get(b"Subtype")
                .and_then(|s| s.as_name())
                .is_ok_and(|s| s == b"Type0")
        })
        .and_then(|d| d.get(b"ToUnicode").and_then(|r| r.as_reference()).ok())
        .expect("Type0 font with a ToUnicode CMap");
    let stream = doc
        .get_object(cmap_id)
        .and_then(|o| o.as_stream())
        .expect("ToUnicode stream");
    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());
    String::from_utf8_lossy(&data).into_owned()
}

pub fn assert_close(actual: f32, expected: f32, what: &str) {
    assert!(
        (actual - expected).abs() < 0.05,
        "{what}: expected {expected}, got {actual}"
    );
}
