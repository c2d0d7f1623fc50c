//! PDF rendering for review reports.
//!
//! Layout runs in two steps: `lay_out` places every line on a page (pure,
//! testable), `export_pdf` writes the placed lines with lopdf. A4 portrait,
//! 10 mm margins, a new page whenever the next line would cross the 15 mm
//! bottom break margin.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tracing::debug;

use crate::export::font_metrics::{get_metrics, FontFamily};
use crate::export::{ExportError, Report};

const MM: f32 = 72.0 / 25.4;
const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN: f32 = 10.0 * MM;
const BREAK_MARGIN: f32 = 15.0 * MM;
/// Horizontal padding inside a cell.
const CELL_PADDING: f32 = 1.0 * MM;

const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 12.0;

const TITLE_HEIGHT: f32 = 10.0 * MM;
const HEADING_HEIGHT: f32 = 8.0 * MM;
const BODY_LINE_HEIGHT: f32 = 6.0 * MM;
const AFTER_TITLE: f32 = 5.0 * MM;
const AFTER_SECTION: f32 = 3.0 * MM;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// A single line of text at its final position. `baseline` is measured from
/// the bottom of the page, as PDF coordinates are.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub font: FontFamily,
    pub size: f32,
    pub x: f32,
    pub baseline: f32,
    pub text: String,
}

struct PageLayout {
    pages: Vec<Vec<PlacedText>>,
    /// Distance of the cursor from the top edge.
    y: f32,
}

impl PageLayout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: MARGIN,
        }
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y + height > PAGE_HEIGHT - BREAK_MARGIN {
            self.pages.push(Vec::new());
            self.y = MARGIN;
        }
    }

    fn cell(&mut self, font: FontFamily, size: f32, height: f32, text: &str, align: Align) {
        self.ensure_room(height);

        let width = get_metrics(font).measure_str(text) * size;
        let x = match align {
            Align::Left => MARGIN + CELL_PADDING,
            Align::Center => ((PAGE_WIDTH - width) / 2.0).max(MARGIN),
        };
        let baseline_from_top = self.y + height / 2.0 + 0.3 * size;

        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedText {
                font,
                size,
                x,
                baseline: PAGE_HEIGHT - baseline_from_top,
                text: text.to_string(),
            });
        }
        self.y += height;
    }

    /// Word-wrapped paragraph, one cell per wrapped line.
    fn multi_cell(&mut self, font: FontFamily, size: f32, line_height: f32, text: &str) {
        let max_width_em = (PAGE_WIDTH - 2.0 * MARGIN - 2.0 * CELL_PADDING) / size;
        for line in get_metrics(font).wrap(text, max_width_em) {
            self.cell(font, size, line_height, &line, Align::Left);
        }
    }

    fn heading(&mut self, text: &str) {
        self.cell(
            FontFamily::HelveticaBold,
            HEADING_SIZE,
            HEADING_HEIGHT,
            text,
            Align::Left,
        );
    }

    fn bullet(&mut self, text: &str) {
        self.multi_cell(
            FontFamily::Helvetica,
            BODY_SIZE,
            BODY_LINE_HEIGHT,
            &format!("- {text}"),
        );
    }

    fn ln(&mut self, height: f32) {
        self.y += height;
    }
}

/// Places every line of the report on pages.
pub fn lay_out(report: &Report) -> Vec<Vec<PlacedText>> {
    let mut layout = PageLayout::new();

    layout.cell(
        FontFamily::HelveticaBold,
        TITLE_SIZE,
        TITLE_HEIGHT,
        &report.title,
        Align::Center,
    );
    layout.ln(AFTER_TITLE);

    for section in &report.sections {
        layout.heading(&section.heading);
        for line in section.feedback.lines() {
            let line = line.trim();
            if !line.is_empty() {
                layout.bullet(line);
            }
        }
        layout.ln(AFTER_SECTION);
    }

    if let Some(role) = &report.role {
        let heading = if role.inferred {
            format!("Target Role: {} (inferred)", role.role)
        } else {
            format!("Target Role: {}", role.role)
        };
        layout.heading(&heading);
        layout.multi_cell(
            FontFamily::Helvetica,
            BODY_SIZE,
            BODY_LINE_HEIGHT,
            &format!("Present Keywords: {}", join_or_none(&role.matches.present)),
        );
        layout.multi_cell(
            FontFamily::Helvetica,
            BODY_SIZE,
            BODY_LINE_HEIGHT,
            &format!("Missing Keywords: {}", join_or_none(&role.matches.missing)),
        );
        layout.ln(AFTER_SECTION);
    }

    if !report.suggestions.is_empty() {
        layout.heading("Overall Suggestions");
        for suggestion in &report.suggestions {
            layout.bullet(suggestion);
        }
    }

    layout.pages
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

/// Renders the report as PDF bytes.
pub fn export_pdf(report: &Report) -> Result<Vec<u8>, ExportError> {
    let pages = lay_out(report);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for font in [FontFamily::Helvetica, FontFamily::HelveticaBold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for placed in &pages {
        let content = Content {
            operations: page_operations(placed),
        };
        let encoded = content
            .encode()
            .map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.0_f32.into(),
        0.0_f32.into(),
        PAGE_WIDTH.into(),
        PAGE_HEIGHT.into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(&report.title)),
        "Producer" => Object::string_literal(concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(report.generated_at.format("D:%Y%m%d%H%M%SZ").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    debug!(
        report_id = %report.report_id,
        pages = page_count,
        bytes = buf.len(),
        "PDF report rendered"
    );
    Ok(buf)
}

fn page_operations(placed: &[PlacedText]) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(placed.len() * 5);
    for text in placed {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![text.font.resource_name().into(), text.size.into()],
        ));
        ops.push(Operation::new("Td", vec![text.x.into(), text.baseline.into()]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&text.text))],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
    ops
}

/// Maps text onto WinAnsiEncoding. Characters outside it become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}
