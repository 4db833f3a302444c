use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::error::Error;

/// A logical font name bound to the bytes of a TrueType/OpenType file.
pub struct FontResource {
    name: String,
    path: PathBuf,
    data: Vec<u8>,
    face_index: u32,
    postscript_name: String,
    units_per_em: f32,
    ascender: f32,
    descender: f32,
}

impl FontResource {
    fn load(name: &str, path: &Path) -> Result<Self, Error> {
        if !path.is_file() {
            return Err(Error::ResourceNotFound(path.to_path_buf()));
        }
        let data =
            std::fs::read(path).map_err(|_| Error::ResourceNotFound(path.to_path_buf()))?;
        if data.is_empty() {
            return Err(Error::Format(format!("{} is empty", path.display())));
        }

        // Collections embed their first face.
        let face_index = 0;
        if let Some(count) = ttf_parser::fonts_in_collection(&data) {
            log::debug!("{} is a collection of {count} faces, using face 0", path.display());
        }

        let face = Face::parse(&data, face_index)
            .map_err(|e| Error::Format(format!("{}: {e}", path.display())))?;

        let postscript_name =
            postscript_name(&face).unwrap_or_else(|| name.replace(' ', ""));
        let units_per_em = face.units_per_em() as f32;
        let ascender = face.ascender() as f32;
        let descender = face.descender() as f32;
        drop(face);

        Ok(Self {
            name: name.to_string(),
            path: path.to_path_buf(),
            data,
            face_index,
            postscript_name,
            units_per_em,
            ascender,
            descender,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn postscript_name(&self) -> &str {
        &self.postscript_name
    }

    /// Ascent as a fraction of the font size.
    pub fn ascender_ratio(&self) -> f32 {
        self.ascender / self.units_per_em
    }

    fn face(&self) -> Result<Face<'_>, Error> {
        Face::parse(&self.data, self.face_index)
            .map_err(|e| Error::Format(format!("{}: {e}", self.path.display())))
    }
}

fn postscript_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME
            && let Some(s) = name.to_string()
            && !s.is_empty()
        {
            return Some(s);
        }
    }
    None
}

/// Single-owner map of logical font names to loaded font files.
///
/// Names are write-once: registering the same name twice is an error.
#[derive(Default)]
pub struct FontRegistry {
    fonts: HashMap<String, FontResource>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), Error> {
        let t0 = std::time::Instant::now();
        if self.fonts.contains_key(name) {
            return Err(Error::DuplicateFont(name.to_string()));
        }
        let resource = FontResource::load(name, path.as_ref())?;
        log::debug!(
            "register_font: {name} -> {} ({}, {} bytes) {:.1}ms",
            resource.path.display(),
            resource.postscript_name,
            resource.data.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        self.fonts.insert(name.to_string(), resource);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FontResource> {
        self.fonts.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// A font as embedded into one PDF, with the metrics the layout needs.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    pub(crate) ascender_ratio: f32,
    pub(crate) char_to_gid: HashMap<char, u16>,
    pub(crate) char_widths_1000: HashMap<char, f32>,
}

impl FontEntry {
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        self.char_widths_1000.get(&ch).copied().unwrap_or(0.0)
    }

    pub(crate) fn word_width(&self, word: &str, font_size: f32) -> f32 {
        word.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    pub(crate) fn space_width(&self, font_size: f32) -> f32 {
        self.char_width_1000(' ') * font_size / 1000.0
    }
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

/// Embed a registered font as a CIDFont (Type0 composite) with Identity-H encoding.
/// The font data is subsetted to only include glyphs for `used_chars`; a character
/// the font cannot draw is a render error.
pub(crate) fn embed_font(
    pdf: &mut Pdf,
    resource: &FontResource,
    pdf_name: String,
    used_chars: &BTreeSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Result<FontEntry, Error> {
    let t0 = std::time::Instant::now();
    let face = resource.face()?;
    let font_ref = alloc();
    let descriptor_ref = alloc();
    let data_ref = alloc();

    let units = resource.units_per_em;
    let to_1000 = |v: f32| v / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| to_1000(h as f32))
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        to_1000(bb.x_min as f32),
        to_1000(bb.y_min as f32),
        to_1000(bb.x_max as f32),
        to_1000(bb.y_max as f32),
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut char_widths_1000 = HashMap::new();
    for &ch in used_chars {
        let gid = face.glyph_index(ch).ok_or_else(|| {
            Error::Render(format!(
                "character {ch:?} (U+{:04X}) has no glyph in font '{}'",
                ch as u32, resource.name
            ))
        })?;
        let new_gid = remapper.remap(gid.0);
        char_to_gid.insert(ch, new_gid);
        let w = face
            .glyph_hor_advance(gid)
            .map(|adv| to_1000(adv as f32))
            .unwrap_or(0.0);
        char_widths_1000.insert(ch, w);
    }

    let subset_data = subsetter::subset(&resource.data, resource.face_index, &remapper)
        .unwrap_or_else(|e| {
            log::warn!(
                "Font subsetting failed for {}: {e}, embedding full font",
                resource.name
            );
            resource.data.clone()
        });

    let data_len = i32::try_from(subset_data.len())
        .map_err(|_| Error::Render(format!("font '{}' is too large to embed", resource.name)))?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = resource.postscript_name.as_bytes();

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(to_1000(resource.ascender))
        .descent(to_1000(resource.descender))
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let system_info = || pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };

    let cid_font_ref = alloc();
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name));
        cid.system_info(system_info());
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut gid_widths: Vec<(u16, f32)> = char_to_gid
            .iter()
            .map(|(ch, &new_gid)| (new_gid, char_widths_1000[ch]))
            .collect();
        gid_widths.sort_by_key(|&(gid, _)| gid);
        gid_widths.dedup_by_key(|&mut (gid, _)| gid);
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", resource.postscript_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(Name(cmap_name.as_bytes()), system_info());
    for (&ch, &new_gid) in &char_to_gid {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    log::debug!(
        "embed_font: {} as {pdf_name}, {} glyphs, {} bytes → {:.1}ms",
        resource.name,
        char_to_gid.len(),
        subset_data.len(),
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(FontEntry {
        pdf_name,
        font_ref,
        ascender_ratio: resource.ascender_ratio(),
        char_to_gid,
        char_widths_1000,
    })
}
