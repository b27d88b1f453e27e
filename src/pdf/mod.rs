//! A `DocumentWriter` that paints onto an in-memory `lopdf` document.
//!
//! The writer owns the page geometry the flow engine never sees. It keeps a cursor measured
//! down from the top of the content area, wraps each `put` greedily into lines, and starts
//! a new page whenever a line or an image would cross the bottom margin. Pages share one
//! resources dictionary holding the base-14 fonts and any embedded images.

pub mod fonts;
pub mod jpeg;

use self::fonts::{BuiltinFont, Family, encode_win_ansi};
use crate::config::RenderConfig;
use inkflow_style::{Margins, StyleToken, TextAlign, TextStyles};
use inkflow_traits::{
    Canvas, DocumentWriter, Fragment, ImageOptions, PutOptions, RuleOptions, TextRun,
    WriterError,
};
use inkflow_types::{BoundingBox, Color, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::HashMap;
use std::path::PathBuf;

/// Line height as a multiple of the tallest font size on the line.
const LINE_HEIGHT: f32 = 1.2;
/// Baseline offset below the line top, as a multiple of the font size.
const ASCENT: f32 = 0.8;
/// Font size of sub- and superscript text relative to the run.
const SCRIPT_SCALE: f32 = 0.7;

pub struct PdfWriter {
    document: Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page: PageState,
    page_width: f32,
    page_height: f32,
    margins: Margins,
    base_font: Family,
    base_font_size: f32,
    resource_dir: Option<PathBuf>,
    /// Embedded images by resolved path: resource name and natural size.
    images: HashMap<PathBuf, (String, f32, f32)>,
    xobjects: Dictionary,
    /// Distance from the top of the content area.
    cursor: f32,
}

#[derive(Default)]
struct PageState {
    operations: Vec<Operation>,
    annotations: Vec<ObjectId>,
}

/// One word, space or hard break of a run, measured.
struct Piece {
    run: usize,
    text: String,
    width: f32,
    kind: PieceKind,
}

#[derive(Clone, Copy, PartialEq)]
enum PieceKind {
    Word,
    Space,
    Break,
}

#[derive(Default)]
struct Line {
    pieces: Vec<Piece>,
    width: f32,
    size: f32,
}

impl Line {
    fn trim_end(&mut self) {
        while self.pieces.last().is_some_and(|piece| piece.kind == PieceKind::Space) {
            if let Some(piece) = self.pieces.pop() {
                self.width -= piece.width;
            }
        }
    }
}

/// How a run is drawn, resolved once per run.
struct RunFace {
    font: BuiltinFont,
    size: f32,
    rise: f32,
    color: Color,
    spacing: f32,
}

impl PdfWriter {
    pub fn new(config: &RenderConfig) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        let resources_id = document.new_object_id();
        let (page_width, page_height) = config.page.size.dimensions_pt();

        Self {
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
            page: PageState::default(),
            page_width,
            page_height,
            margins: config.page.margins,
            base_font: Family::from_name(&config.base_font),
            base_font_size: config.base_font_size,
            resource_dir: config.resource_dir.clone(),
            images: HashMap::new(),
            xobjects: Dictionary::new(),
            cursor: 0.0,
        }
    }

    /// Number of pages so far, counting the one being painted.
    pub fn page_count(&self) -> usize {
        self.page_ids.len() + 1
    }

    /// Closes the last page and serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, WriterError> {
        self.close_page()?;

        let mut fonts = Dictionary::new();
        for font in BuiltinFont::all() {
            fonts.set(
                font.resource_name().into_bytes(),
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.postscript_name(),
                    "Encoding" => "WinAnsiEncoding",
                },
            );
        }
        let mut resources = dictionary! { "Font" => fonts };
        if !self.images.is_empty() {
            resources.set("XObject", std::mem::take(&mut self.xobjects));
        }
        self.document
            .objects
            .insert(self.resources_id, Object::Dictionary(resources));

        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages));
        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        self.document
            .save_to(&mut bytes)
            .map_err(|e| WriterError::Pdf(e.to_string()))?;
        log::info!(
            "Wrote {} page(s), {} bytes",
            self.page_ids.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn content_width(&self) -> f32 {
        self.page_width - self.margins.horizontal()
    }

    fn content_height(&self) -> f32 {
        self.page_height - self.margins.vertical()
    }

    /// Page y of the top of the content area.
    fn content_top(&self) -> f32 {
        self.page_height - self.margins.top
    }

    fn close_page(&mut self) -> Result<(), WriterError> {
        let page = std::mem::take(&mut self.page);
        let content = Content {
            operations: page.operations,
        };
        let encoded = content
            .encode()
            .map_err(|e| WriterError::Pdf(e.to_string()))?;
        let content_id = self
            .document
            .add_object(Stream::new(Dictionary::new(), encoded));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0.into(), 0.0.into(), self.page_width.into(), self.page_height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        if !page.annotations.is_empty() {
            page_dict.set(
                "Annots",
                Object::Array(page.annotations.into_iter().map(Object::Reference).collect()),
            );
        }
        let page_id = self.document.add_object(page_dict);
        self.page_ids.push(page_id);
        Ok(())
    }

    fn face(&self, styles: &TextStyles) -> RunFace {
        let family = styles
            .font
            .as_deref()
            .map(Family::from_name)
            .unwrap_or(self.base_font);
        let font = BuiltinFont::new(
            family,
            styles.has(StyleToken::Bold),
            styles.has(StyleToken::Italic),
        );
        let size = styles.size.unwrap_or(self.base_font_size);
        let (size, rise) = if styles.has(StyleToken::Superscript) {
            (size * SCRIPT_SCALE, size * 0.33)
        } else if styles.has(StyleToken::Subscript) {
            (size * SCRIPT_SCALE, -size * 0.2)
        } else {
            (size, 0.0)
        };
        RunFace {
            font,
            size,
            rise,
            color: styles.color.unwrap_or(Color::BLACK),
            spacing: styles.character_spacing.unwrap_or(0.0),
        }
    }

    fn split_pieces(runs: &[TextRun], faces: &[RunFace]) -> Vec<Piece> {
        let mut pieces = Vec::new();
        for (index, (run, face)) in runs.iter().zip(faces).enumerate() {
            let mut push = |text: &str, kind: PieceKind| {
                let width = match kind {
                    PieceKind::Break => 0.0,
                    _ => face.font.text_width(text, face.size, face.spacing),
                };
                pieces.push(Piece {
                    run: index,
                    text: text.to_string(),
                    width,
                    kind,
                });
            };

            for (n, line) in run.text.split('\n').enumerate() {
                if n > 0 {
                    push("", PieceKind::Break);
                }
                let mut start = 0;
                let mut in_space = None;
                for (i, c) in line.char_indices() {
                    let space = c == ' ' || c == '\t';
                    if in_space != Some(space) {
                        if let Some(was_space) = in_space {
                            push(&line[start..i], kind_of(was_space));
                        }
                        start = i;
                        in_space = Some(space);
                    }
                }
                if let Some(was_space) = in_space {
                    push(&line[start..], kind_of(was_space));
                }
            }
        }
        pieces
    }

    fn wrap(pieces: Vec<Piece>, faces: &[RunFace], available: f32) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut line = Line::default();
        for piece in pieces {
            let size = faces[piece.run].size;
            match piece.kind {
                PieceKind::Break => {
                    line.size = line.size.max(size);
                    line.trim_end();
                    lines.push(std::mem::take(&mut line));
                }
                PieceKind::Space if line.pieces.is_empty() => {}
                PieceKind::Space => {
                    line.width += piece.width;
                    line.pieces.push(piece);
                }
                PieceKind::Word => {
                    if line.width + piece.width > available
                        && line.pieces.iter().any(|p| p.kind == PieceKind::Word)
                    {
                        line.trim_end();
                        lines.push(std::mem::take(&mut line));
                    }
                    line.size = line.size.max(size);
                    line.width += piece.width;
                    line.pieces.push(piece);
                }
            }
        }
        line.trim_end();
        if !line.pieces.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn draw_line(
        &mut self,
        line: &Line,
        runs: &[TextRun],
        faces: &[RunFace],
        x: f32,
        top: f32,
    ) -> Result<(), WriterError> {
        let baseline = top - line.size * ASCENT;
        let mut x = x;
        let mut pieces = line.pieces.iter().peekable();
        while let Some(first) = pieces.next() {
            let mut text = first.text.clone();
            let mut width = first.width;
            while let Some(next) = pieces.next_if(|p| p.run == first.run) {
                text.push_str(&next.text);
                width += next.width;
            }
            self.draw_segment(&runs[first.run], &faces[first.run], &text, x, baseline, width)?;
            x += width;
        }
        Ok(())
    }

    fn draw_segment(
        &mut self,
        run: &TextRun,
        face: &RunFace,
        text: &str,
        x: f32,
        baseline: f32,
        width: f32,
    ) -> Result<(), WriterError> {
        if text.is_empty() {
            return Ok(());
        }
        let y = baseline + face.rise;
        let fragment = Fragment {
            text: text.to_string(),
            rect: Rect::new(x, y - face.size * 0.2, width, face.size),
        };
        if let Some(callback) = &run.callback {
            callback.render_behind(&fragment, &mut PageCanvas(&mut self.page.operations));
        }

        let (r, g, b) = face.color.to_unit_rgb();
        let ops = &mut self.page.operations;
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(face.font.resource_name().into_bytes()),
                face.size.into(),
            ],
        ));
        ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        if face.spacing != 0.0 {
            ops.push(Operation::new("Tc", vec![face.spacing.into()]));
        }
        ops.push(Operation::new(
            "Tm",
            vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ));
        ops.push(Operation::new("ET", vec![]));

        let styles = &run.styles;
        if styles.has(StyleToken::Underline) {
            stroke_line(ops, x, y - face.size * 0.1, width, face.size * 0.05, face.color);
        }
        if styles.has(StyleToken::Strikethrough) {
            stroke_line(ops, x, y + face.size * 0.3, width, face.size * 0.05, face.color);
        }
        if let Some(callback) = &run.callback {
            callback.render_in_front(&fragment, &mut PageCanvas(&mut self.page.operations));
        }
        if let Some(href) = &styles.link {
            self.add_link(fragment.rect, href);
        }
        Ok(())
    }

    fn add_link(&mut self, rect: Rect, href: &str) {
        let annotation = dictionary! {
            "Type" => "Annot",
            "Subtype" => "Link",
            "Rect" => vec![rect.x.into(), rect.y.into(), rect.right().into(), rect.top().into()],
            "Border" => vec![0.into(), 0.into(), 0.into()],
            "A" => dictionary! {
                "S" => "URI",
                "URI" => Object::String(href.as_bytes().to_vec(), StringFormat::Literal),
            },
        };
        let id = self.document.add_object(annotation);
        self.page.annotations.push(id);
    }

    /// Starts a new page if `height` more points would not fit below the cursor.
    fn ensure_room(&mut self, height: f32) -> Result<(), WriterError> {
        if self.cursor > 0.0 && self.cursor + height > self.content_height() {
            self.start_new_page()?;
        }
        Ok(())
    }

    fn resolve_image(&self, src: &str) -> PathBuf {
        let path = PathBuf::from(src.strip_prefix("file://").unwrap_or(src));
        match &self.resource_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path,
        }
    }

    /// Embeds the JPEG at `path` once. `None` when the file is not a JPEG.
    fn load_image(&mut self, path: PathBuf) -> Result<Option<(String, f32, f32)>, WriterError> {
        if let Some(cached) = self.images.get(&path) {
            return Ok(Some(cached.clone()));
        }
        let bytes = std::fs::read(&path).map_err(|e| WriterError::Resource {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let Some(info) = jpeg::inspect(&bytes) else {
            log::warn!(
                "{}",
                WriterError::UnsupportedImage(path.display().to_string())
            );
            return Ok(None);
        };

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(info.width),
                "Height" => i64::from(info.height),
                "ColorSpace" => info.color_space(),
                "BitsPerComponent" => i64::from(info.bits_per_component),
                "Filter" => "DCTDecode",
            },
            bytes,
        );
        let id = self.document.add_object(stream);
        let name = format!("Im{}", self.images.len() + 1);
        self.xobjects.set(name.clone().into_bytes(), id);

        let entry = (name, info.width as f32, info.height as f32);
        self.images.insert(path, entry.clone());
        Ok(Some(entry))
    }
}

fn kind_of(space: bool) -> PieceKind {
    if space { PieceKind::Space } else { PieceKind::Word }
}

fn stroke_line(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, thickness: f32, color: Color) {
    let (r, g, b) = color.to_unit_rgb();
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
    ops.push(Operation::new("w", vec![thickness.into()]));
    ops.push(Operation::new("m", vec![x.into(), y.into()]));
    ops.push(Operation::new("l", vec![(x + width).into(), y.into()]));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

/// Lets callbacks paint straight into the page's content stream.
struct PageCanvas<'a>(&'a mut Vec<Operation>);

impl Canvas for PageCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (r, g, b) = color.to_unit_rgb();
        self.0.push(Operation::new("q", vec![]));
        self.0.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
        self.0.push(Operation::new(
            "re",
            vec![rect.x.into(), rect.y.into(), rect.width.into(), rect.height.into()],
        ));
        self.0.push(Operation::new("f", vec![]));
        self.0.push(Operation::new("Q", vec![]));
    }
}

impl DocumentWriter for PdfWriter {
    fn advance_cursor(&mut self, amount: f32) -> Result<(), WriterError> {
        self.cursor += amount;
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), WriterError> {
        self.close_page()?;
        self.cursor = 0.0;
        log::debug!("Started page {}", self.page_count());
        Ok(())
    }

    fn put(
        &mut self,
        runs: &[TextRun],
        options: &PutOptions,
        bounding_box: Option<&BoundingBox>,
    ) -> Result<(), WriterError> {
        let faces: Vec<RunFace> = runs.iter().map(|run| self.face(&run.styles)).collect();
        let indent = options.indent_paragraphs.unwrap_or(0.0);
        let (origin_x, width) = match bounding_box {
            Some(bbox) => (self.margins.left + bbox.top_left.x, bbox.width),
            None => (self.margins.left, self.content_width()),
        };
        let available = (width - indent).max(0.0);
        let lines = Self::wrap(Self::split_pieces(runs, &faces), &faces, available);
        let leading = options.leading.unwrap_or(0.0);

        // Absolute boxes paint at their own position and leave the cursor alone.
        let mut box_top = bounding_box.map(|bbox| self.margins.bottom + bbox.top_left.y);
        for line in &lines {
            let height = line.size * LINE_HEIGHT + leading;
            let top = match box_top.as_mut() {
                Some(top) => {
                    let current = *top;
                    *top -= height;
                    current
                }
                None => {
                    self.ensure_room(height)?;
                    let current = self.content_top() - self.cursor;
                    self.cursor += height;
                    current
                }
            };
            let offset = match options.align {
                Some(TextAlign::Right) => available - line.width,
                Some(TextAlign::Center) => (available - line.width) / 2.0,
                _ => 0.0,
            };
            self.draw_line(line, runs, &faces, origin_x + indent + offset.max(0.0), top)?;
        }
        Ok(())
    }

    fn bounds(&self) -> Size {
        Size::new(self.content_width(), self.content_height())
    }

    fn horizontal_rule(&mut self, options: &RuleOptions) -> Result<(), WriterError> {
        self.ensure_room(1.0)?;
        let y = self.content_top() - self.cursor;
        let width = self.content_width();
        stroke_line(
            &mut self.page.operations,
            self.margins.left,
            y,
            width,
            1.0,
            options.color.unwrap_or(Color::BLACK),
        );
        self.cursor += 1.0;
        Ok(())
    }

    fn image(&mut self, src: &str, options: &ImageOptions) -> Result<(), WriterError> {
        if src.starts_with("http://") || src.starts_with("https://") || src.starts_with("data:") {
            log::warn!("Skipping image '{}': only local files are supported", src);
            return Ok(());
        }
        let Some((name, natural_width, natural_height)) = self.load_image(self.resolve_image(src))?
        else {
            return Ok(());
        };

        let (mut width, mut height) = match (options.width, options.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, natural_height * w / natural_width),
            (None, Some(h)) => (natural_width * h / natural_height, h),
            (None, None) => (natural_width, natural_height),
        };
        let max_width = self.content_width();
        if width > max_width {
            height *= max_width / width;
            width = max_width;
        }

        self.ensure_room(height)?;
        let x = self.margins.left
            + match options.align {
                Some(TextAlign::Right) => max_width - width,
                Some(TextAlign::Center) => (max_width - width) / 2.0,
                _ => 0.0,
            };
        let y = self.content_top() - self.cursor - height;
        let ops = &mut self.page.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![width.into(), 0.into(), 0.into(), height.into(), x.into(), y.into()],
        ));
        ops.push(Operation::new("Do", vec![Object::Name(name.into_bytes())]));
        ops.push(Operation::new("Q", vec![]));
        self.cursor += height;
        Ok(())
    }
}
