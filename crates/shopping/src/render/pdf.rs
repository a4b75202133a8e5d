use std::{
    borrow::Cow,
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use pdf_writer::{
    Content, Date as PdfDate, Finish, Name, Pdf, Rect, Ref, Str, TextStr,
    types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap},
};
use ttf_parser::{Face, GlyphId, name_id};

use crate::{ExportFormat, ShoppingError};

use super::{Render, ShoppingListDocument};

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
// 20 mm
const MARGIN: f32 = 56.69;
const FONT_SIZE: f32 = 11.0;
const LEADING: f32 = 15.0;
const FONT_NAME: Name<'static> = Name(b"F1");

/// Where the pdf renderer gets its TrueType font from.
pub trait FontSource: Send + Sync {
    fn load(&self) -> crate::Result<Cow<'static, [u8]>>;
}

impl<F: FontSource + ?Sized> FontSource for Box<F> {
    fn load(&self) -> crate::Result<Cow<'static, [u8]>> {
        (**self).load()
    }
}

/// A font read from disk on every render.
#[derive(Debug, Clone)]
pub struct FontFile(pub PathBuf);

impl FontFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_path_buf())
    }
}

impl FontSource for FontFile {
    fn load(&self) -> crate::Result<Cow<'static, [u8]>> {
        std::fs::read(&self.0)
            .map(Cow::Owned)
            .map_err(|_| ShoppingError::MissingFont(self.0.display().to_string()))
    }
}

/// Single-column A4 layout with a monospace font; long lines wrap and
/// pages break automatically.
pub struct PdfRenderer {
    font: Box<dyn FontSource>,
}

impl PdfRenderer {
    pub fn new(font: impl FontSource + 'static) -> Self {
        Self {
            font: Box::new(font),
        }
    }
}

impl Render for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn render(&self, document: &ShoppingListDocument) -> crate::Result<Vec<u8>> {
        let data = self.font.load()?;
        let face =
            Face::parse(&data, 0).map_err(|err| ShoppingError::InvalidFont(err.to_string()))?;
        let metrics = FontMetrics::new(&face)?;

        let columns =
            ((PAGE_WIDTH - 2.0 * MARGIN) / metrics.char_width(FONT_SIZE)).floor() as usize;
        let rows = ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING).floor() as usize;

        let lines = document
            .text_lines()
            .iter()
            .flat_map(|line| wrap(line, columns.max(1)))
            .collect::<Vec<_>>();

        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let page_tree_id = alloc.bump();
        let info_id = alloc.bump();
        let type0_id = alloc.bump();
        let cid_id = alloc.bump();
        let descriptor_id = alloc.bump();
        let cmap_id = alloc.bump();
        let font_file_id = alloc.bump();

        let pages = lines
            .chunks(rows.max(1))
            .map(|chunk| (alloc.bump(), alloc.bump(), chunk))
            .collect::<Vec<_>>();

        let mut pdf = Pdf::new();
        let mut used = BTreeMap::new();

        pdf.catalog(catalog_id).pages(page_tree_id);
        pdf.pages(page_tree_id)
            .kids(pages.iter().map(|(page_id, _, _)| *page_id))
            .count(pages.len() as i32);

        for (page_id, content_id, chunk) in pages.iter() {
            let mut page = pdf.page(*page_id);
            page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
            page.parent(page_tree_id);
            page.contents(*content_id);
            page.resources().fonts().pair(FONT_NAME, type0_id);
            page.finish();

            let mut content = Content::new();
            content.begin_text();
            content.set_font(FONT_NAME, FONT_SIZE);
            content.next_line(MARGIN, PAGE_HEIGHT - MARGIN - FONT_SIZE);

            for line in chunk.iter() {
                content.show(Str(&encode(&face, line, &mut used)));
                content.next_line(0.0, -LEADING);
            }

            content.end_text();
            pdf.stream(*content_id, &content.finish());
        }

        let base_font = Name(metrics.postscript_name.as_bytes());

        pdf.type0_font(type0_id)
            .base_font(base_font)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_id)
            .to_unicode(cmap_id);

        let mut cid = pdf.cid_font(cid_id);
        cid.subtype(CidFontType::Type2);
        cid.base_font(base_font);
        cid.system_info(system_info());
        cid.font_descriptor(descriptor_id);
        cid.default_width(metrics.advance);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        cid.finish();

        let mut descriptor = pdf.font_descriptor(descriptor_id);
        descriptor
            .name(base_font)
            .flags(FontFlags::FIXED_PITCH | FontFlags::NON_SYMBOLIC)
            .bbox(metrics.bbox)
            .italic_angle(0.0)
            .ascent(metrics.ascent)
            .descent(metrics.descent)
            .cap_height(metrics.cap_height)
            .stem_v(80.0)
            .font_file2(font_file_id);
        descriptor.finish();

        let mut cmap = UnicodeCmap::new(Name(b"Custom"), system_info());
        for (glyph, c) in used.iter() {
            cmap.pair(*glyph, *c);
        }
        pdf.cmap(cmap_id, &cmap.finish());

        pdf.stream(font_file_id, &data)
            .pair(Name(b"Length1"), data.len() as i32);

        let date = pdf_date(document);
        pdf.document_info(info_id)
            .title(TextStr("Список покупок"))
            .producer(TextStr("foodgram"))
            .creation_date(date)
            .modified_date(date);

        Ok(pdf.finish())
    }
}

struct FontMetrics {
    postscript_name: String,
    advance: f32,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    bbox: Rect,
}

impl FontMetrics {
    fn new(face: &Face) -> crate::Result<Self> {
        let scale = 1000.0 / f32::from(face.units_per_em());
        let reference = face
            .glyph_index('0')
            .and_then(|glyph| face.glyph_hor_advance(glyph))
            .ok_or_else(|| ShoppingError::InvalidFont("missing digit glyph".to_owned()))?;

        let postscript_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string())
            .map(|name| {
                name.chars()
                    .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Monospace".to_owned());

        let bbox = face.global_bounding_box();

        Ok(Self {
            postscript_name,
            advance: f32::from(reference) * scale,
            ascent: f32::from(face.ascender()) * scale,
            descent: f32::from(face.descender()) * scale,
            cap_height: f32::from(face.capital_height().unwrap_or(face.ascender())) * scale,
            bbox: Rect::new(
                f32::from(bbox.x_min) * scale,
                f32::from(bbox.y_min) * scale,
                f32::from(bbox.x_max) * scale,
                f32::from(bbox.y_max) * scale,
            ),
        })
    }

    fn char_width(&self, font_size: f32) -> f32 {
        self.advance * font_size / 1000.0
    }
}

fn system_info() -> SystemInfo<'static> {
    SystemInfo {
        registry: Str(b"Adobe"),
        ordering: Str(b"Identity"),
        supplement: 0,
    }
}

fn pdf_date(document: &ShoppingListDocument) -> PdfDate {
    PdfDate::new(u16::try_from(document.date.year()).unwrap_or_default())
        .month(u8::from(document.date.month()))
        .day(document.date.day())
}

// Identity-H: two bytes of glyph id per character.
fn encode(face: &Face, line: &str, used: &mut BTreeMap<u16, char>) -> Vec<u8> {
    let mut out = Vec::with_capacity(line.len() * 2);

    for c in line.chars() {
        let GlyphId(glyph) = face.glyph_index(c).unwrap_or(GlyphId(0));
        if glyph != 0 {
            used.entry(glyph).or_insert(c);
        }
        out.extend_from_slice(&glyph.to_be_bytes());
    }

    out
}

/// Breaks `line` into chunks of at most `columns` characters, on whitespace
/// where possible.
fn wrap(line: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut width = 0;

    for word in line.split(' ') {
        let len = word.chars().count();

        if width > 0 && width + 1 + len <= columns {
            current.push(' ');
            current.push_str(word);
            width += 1 + len;
            continue;
        }

        if width > 0 {
            out.push(std::mem::take(&mut current));
        }

        let chars = word.chars().collect::<Vec<_>>();
        let mut pieces = chars.chunks(columns).peekable();
        width = 0;

        while let Some(piece) = pieces.next() {
            if pieces.peek().is_some() {
                out.push(piece.iter().collect());
            } else {
                current = piece.iter().collect();
                width = piece.len();
            }
        }
    }

    if width > 0 || out.is_empty() {
        out.push(current);
    }

    out
}
