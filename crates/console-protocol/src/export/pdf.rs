//! Printable PDF reports
//!
//! Layout is fixed-position text in the built-in Helvetica faces: a title, a
//! generation line and a table that breaks onto new pages as needed.

use super::{ExportFile, ExportFormat, Table};
use console_types::entities::Invoice;
use console_types::{AppError, AppResult};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

const MARGIN: f32 = 15.0;
const ROW_HEIGHT: f32 = 6.0;
const BODY_SIZE: f32 = 9.0;
const TITLE_SIZE: f32 = 16.0;
/// Approximate advance of a Helvetica glyph at 1pt, in mm
const GLYPH_WIDTH_PER_PT: f32 = 0.18;

/// Page dimensions in millimetres
#[derive(Debug, Clone, Copy)]
struct PageSize {
    width: f32,
    height: f32,
}

const A4_LANDSCAPE: PageSize = PageSize {
    width: 297.0,
    height: 210.0,
};

const A4_PORTRAIT: PageSize = PageSize {
    width: 210.0,
    height: 297.0,
};

/// A document being laid out top to bottom
struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    size: PageSize,
    cursor: f32,
    pages: usize,
}

impl Canvas {
    fn new(title: &str, size: PageSize) -> AppResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(size.width), Mm(size.height), "Layer 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            size,
            cursor: size.height - MARGIN,
            pages: 1,
        })
    }

    fn usable_width(&self) -> f32 {
        self.size.width - 2.0 * MARGIN
    }

    fn text(&self, text: &str, font_size: f32, x: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(printable(text), font_size, Mm(x), Mm(self.cursor), font);
    }

    fn advance(&mut self, height: f32) {
        self.cursor -= height;
    }

    /// Start a new page when fewer than `height` mm remain; returns whether
    /// a page was added
    fn ensure_space(&mut self, height: f32) -> bool {
        if self.cursor - height >= MARGIN {
            return false;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.size.width),
            Mm(self.size.height),
            format!("Layer {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = self.size.height - MARGIN;
        true
    }

    /// Draw one row of cells at evenly spaced columns
    fn row(&mut self, cells: &[&str], widths: &[f32], bold: bool) {
        let mut x = MARGIN;
        for (cell, width) in cells.iter().zip(widths) {
            self.text(&fit(cell, *width, BODY_SIZE), BODY_SIZE, x, bold);
            x += width;
        }
        self.advance(ROW_HEIGHT);
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(error: printpdf::Error) -> AppError {
    AppError::Export(format!("pdf write failed: {error}"))
}

/// Built-in fonts only cover Latin-1
fn printable(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if u32::from(c) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

/// Truncate text to what fits in `width` mm at `font_size`
fn fit(text: &str, width: f32, font_size: f32) -> String {
    let glyph = GLYPH_WIDTH_PER_PT * font_size;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let max_chars = ((width - 2.0) / glyph).max(1.0) as usize;
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(2)).collect();
        format!("{kept}..")
    }
}

/// Write the table as a landscape report
///
/// # Errors
///
/// Returns [`AppError::Export`] if the document cannot be serialized.
pub fn write(table: &Table, title: &str, generated_on: Option<&str>) -> AppResult<Vec<u8>> {
    let mut canvas = Canvas::new(title, A4_LANDSCAPE)?;

    canvas.text(title, TITLE_SIZE, MARGIN, true);
    canvas.advance(8.0);
    let generated = match generated_on {
        Some(stamp) => format!("Generated {stamp} - {} rows", table.rows.len()),
        None => format!("{} rows", table.rows.len()),
    };
    canvas.text(&generated, BODY_SIZE, MARGIN, false);
    canvas.advance(10.0);

    #[allow(clippy::cast_precision_loss)]
    let column = canvas.usable_width() / table.headers.len().max(1) as f32;
    let widths = vec![column; table.headers.len()];

    canvas.row(&table.headers, &widths, true);
    for row in &table.rows {
        if canvas.ensure_space(ROW_HEIGHT) {
            canvas.row(&table.headers, &widths, true);
        }
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        canvas.row(&cells, &widths, false);
    }

    canvas.finish()
}

/// Render one invoice: header, billing block, line items and total
///
/// # Errors
///
/// Returns [`AppError::Export`] if the document cannot be serialized.
pub fn invoice_pdf(invoice: &Invoice, generated_on: Option<&str>) -> AppResult<ExportFile> {
    let number = if invoice.invoice_number.trim().is_empty() {
        "draft"
    } else {
        invoice.invoice_number.trim()
    };
    let mut canvas = Canvas::new(&format!("Invoice {number}"), A4_PORTRAIT)?;

    canvas.text("INVOICE", 22.0, MARGIN, true);
    canvas.advance(10.0);
    canvas.text(&format!("Invoice #: {number}"), 11.0, MARGIN, false);
    canvas.advance(ROW_HEIGHT);
    if let Some(issued) = &invoice.issued_on {
        canvas.text(&format!("Issued: {issued}"), 11.0, MARGIN, false);
        canvas.advance(ROW_HEIGHT);
    }
    if let Some(status) = &invoice.status {
        canvas.text(&format!("Status: {status}"), 11.0, MARGIN, false);
        canvas.advance(ROW_HEIGHT);
    }
    canvas.advance(4.0);

    canvas.text("Bill to", 11.0, MARGIN, true);
    canvas.advance(ROW_HEIGHT);
    canvas.text(&invoice.customer_name, 11.0, MARGIN, false);
    canvas.advance(ROW_HEIGHT);
    if let Some(email) = &invoice.customer_email {
        canvas.text(email, 11.0, MARGIN, false);
        canvas.advance(ROW_HEIGHT);
    }
    canvas.advance(6.0);

    let usable = canvas.usable_width();
    let widths = [usable * 0.52, usable * 0.12, usable * 0.18, usable * 0.18];
    let header = ["Description", "Qty", "Unit price", "Amount"];
    canvas.row(&header, &widths, true);
    for item in &invoice.items {
        if canvas.ensure_space(ROW_HEIGHT) {
            canvas.row(&header, &widths, true);
        }
        let quantity = trim_number(item.quantity);
        let unit = format!("{:.2}", item.unit_price);
        let amount = format!("{:.2}", item.amount());
        canvas.row(
            &[
                item.description.as_str(),
                quantity.as_str(),
                unit.as_str(),
                amount.as_str(),
            ],
            &widths,
            false,
        );
    }

    canvas.ensure_space(ROW_HEIGHT * 3.0);
    canvas.advance(4.0);
    let total_x = MARGIN + widths.iter().take(2).sum::<f32>();
    canvas.text(
        &format!("Total: {:.2}", invoice.grand_total()),
        12.0,
        total_x,
        true,
    );
    if let Some(stamp) = generated_on {
        canvas.advance(ROW_HEIGHT * 2.0);
        canvas.text(&format!("Generated {stamp}"), 8.0, MARGIN, false);
    }

    Ok(ExportFile {
        filename: format!("invoice_{}.{}", file_safe(number), ExportFormat::Pdf.extension()),
        mime: ExportFormat::Pdf.mime(),
        bytes: canvas.finish()?,
    })
}

fn trim_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn file_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}
