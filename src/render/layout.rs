use crate::core::{DocumentConfig, OrganizationConfig};
use crate::domain::document::Totals;
use crate::render::text::{heading_for, money, text_width, to_latin1, truncate_to_width};
use crate::utils::error::Result;
use lopdf::content::Operation;
use lopdf::Object;

// A4 in points.
pub const PAGE_WIDTH: i64 = 595;
pub const PAGE_HEIGHT: i64 = 842;

const MARGIN: i64 = 50;
const TOP: i64 = PAGE_HEIGHT - MARGIN;
const BOTTOM: i64 = MARGIN + 40;
const RIGHT: i64 = PAGE_WIDTH - MARGIN;
const ORG_COLUMN: i64 = 360;

const ROW_HEIGHT: i64 = 16;
const TABLE_SIZE: i64 = 9;
const COL_INDEX: i64 = MARGIN;
const COL_TITLE: i64 = MARGIN + 22;
const COL_QTY_RIGHT: i64 = 330;
const COL_UNIT: i64 = 340;
const COL_PRICE_RIGHT: i64 = 460;
const COL_AMOUNT_RIGHT: i64 = RIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const REGULAR_RESOURCE: &'static str = "F1";
    pub const BOLD_RESOURCE: &'static str = "F2";

    fn resource(self) -> &'static str {
        match self {
            Font::Regular => Self::REGULAR_RESOURCE,
            Font::Bold => Self::BOLD_RESOURCE,
        }
    }
}

/// Content-stream operations for one page.
#[derive(Debug, Default)]
pub struct Page {
    operations: Vec<Operation>,
}

impl Page {
    pub fn text(&mut self, font: Font, size: i64, x: i64, y: i64, text: &str) {
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font.resource().as_bytes().to_vec()),
                    Object::Integer(size),
                ],
            ),
            Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
            Operation::new("Tj", vec![Object::string_literal(to_latin1(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    pub fn text_right(&mut self, font: Font, size: i64, right: i64, y: i64, text: &str) {
        self.text(font, size, right - text_width(text, size), y, text);
    }

    pub fn rule(&mut self, x1: i64, x2: i64, y: i64) {
        self.operations.extend([
            Operation::new("w", vec![Object::Real(0.5)]),
            Operation::new("m", vec![Object::Integer(x1), Object::Integer(y)]),
            Operation::new("l", vec![Object::Integer(x2), Object::Integer(y)]),
            Operation::new("S", vec![]),
        ]);
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

struct Layout<'a> {
    document: &'a DocumentConfig,
    finished: Vec<Page>,
    page: Page,
    y: i64,
}

impl<'a> Layout<'a> {
    fn new(document: &'a DocumentConfig) -> Self {
        Self {
            document,
            finished: Vec::new(),
            page: Page::default(),
            y: TOP,
        }
    }

    fn money(&self, amount: i64) -> String {
        money(&self.document.currency, amount, self.document.decimal_places)
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.page));
        self.y = TOP;
    }

    /// Starts a new page unless `height` points still fit above the bottom margin.
    fn reserve(&mut self, height: i64) -> bool {
        if self.y - height < BOTTOM {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn header(&mut self, organization: &OrganizationConfig) {
        let part = &self.document.first_part;

        self.page
            .text(Font::Bold, 22, MARGIN, TOP - 10, &heading_for(&part.doc_type));
        if !part.date.is_empty() {
            self.page.text_right(
                Font::Regular,
                10,
                RIGHT,
                TOP - 10,
                &format!("Date: {}", part.date),
            );
        }

        let mut org_y = TOP - 44;
        self.page
            .text(Font::Bold, 11, ORG_COLUMN, org_y, &organization.name);
        let contact = organization
            .address
            .iter()
            .cloned()
            .chain(organization.phone.iter().map(|p| format!("Tel: {}", p)))
            .chain(organization.email.iter().cloned());
        for line in contact {
            org_y -= 12;
            self.page.text(Font::Regular, 9, ORG_COLUMN, org_y, &line);
        }

        let mut left_y = TOP - 56;
        if !part.name.is_empty() {
            self.page.text(Font::Bold, 14, MARGIN, left_y, &part.name);
            self.page.rule(MARGIN, ORG_COLUMN - 30, left_y - 6);
            left_y -= 28;
        }
        if !part.title.is_empty() {
            self.page.text(
                Font::Regular,
                11,
                MARGIN,
                left_y,
                &format!("Subject: {}", part.title),
            );
            left_y -= 26;
        }

        self.y = left_y.min(org_y - 12);
    }

    fn total_banner(&mut self, totals: &Totals) {
        let banner = format!("Total: {}", self.money(totals.total));
        self.page.text(Font::Bold, 13, MARGIN, self.y, &banner);
        self.y -= 34;
    }

    fn table_header(&mut self) {
        let y = self.y;
        self.page.text(Font::Bold, TABLE_SIZE, COL_INDEX, y, "#");
        self.page
            .text(Font::Bold, TABLE_SIZE, COL_TITLE, y, "Description");
        self.page
            .text_right(Font::Bold, TABLE_SIZE, COL_QTY_RIGHT, y, "Qty");
        self.page.text(Font::Bold, TABLE_SIZE, COL_UNIT, y, "Unit");
        self.page
            .text_right(Font::Bold, TABLE_SIZE, COL_PRICE_RIGHT, y, "Unit price");
        self.page
            .text_right(Font::Bold, TABLE_SIZE, COL_AMOUNT_RIGHT, y, "Amount");
        self.page.rule(MARGIN, RIGHT, y - 6);
        self.y -= 20;
    }

    fn rows(&mut self) -> Result<()> {
        let document = self.document;
        for (index, item) in document.first_part.items.iter().enumerate() {
            if self.reserve(ROW_HEIGHT) {
                self.table_header();
            }

            let y = self.y;
            let title = truncate_to_width(&item.title, TABLE_SIZE, COL_QTY_RIGHT - COL_TITLE - 40);
            let unit = truncate_to_width(&item.unit, TABLE_SIZE, COL_PRICE_RIGHT - COL_UNIT - 60);
            let price = self.money(item.unit_price);
            let amount = self.money(item.amount()?);

            self.page.text(
                Font::Regular,
                TABLE_SIZE,
                COL_INDEX,
                y,
                &(index + 1).to_string(),
            );
            self.page.text(Font::Regular, TABLE_SIZE, COL_TITLE, y, &title);
            self.page.text_right(
                Font::Regular,
                TABLE_SIZE,
                COL_QTY_RIGHT,
                y,
                &item.quantity.to_string(),
            );
            self.page.text(Font::Regular, TABLE_SIZE, COL_UNIT, y, &unit);
            self.page
                .text_right(Font::Regular, TABLE_SIZE, COL_PRICE_RIGHT, y, &price);
            self.page
                .text_right(Font::Regular, TABLE_SIZE, COL_AMOUNT_RIGHT, y, &amount);
            self.y -= ROW_HEIGHT;
        }
        Ok(())
    }

    fn summary(&mut self, totals: &Totals) {
        self.reserve(3 * ROW_HEIGHT + 10);
        self.page.rule(COL_UNIT, RIGHT, self.y + 10);
        self.y -= 6;

        let lines = [
            (Font::Regular, "Subtotal".to_string(), totals.subtotal),
            (
                Font::Regular,
                format!("Tax ({}%)", self.document.tax_rate),
                totals.tax,
            ),
            (Font::Bold, "Total".to_string(), totals.total),
        ];
        for (font, label, amount) in lines {
            let value = self.money(amount);
            self.page
                .text_right(font, 10, COL_PRICE_RIGHT, self.y, &label);
            self.page
                .text_right(font, 10, COL_AMOUNT_RIGHT, self.y, &value);
            self.y -= ROW_HEIGHT;
        }
        self.y -= 14;
    }

    fn footnotes(&mut self, organization: &OrganizationConfig) {
        let document = self.document;
        let lines = document
            .notes
            .iter()
            .cloned()
            .chain(
                organization
                    .bank_account
                    .iter()
                    .map(|account| format!("Bank account: {}", account)),
            );
        for line in lines {
            self.reserve(12);
            self.page.text(Font::Regular, 9, MARGIN, self.y, &line);
            self.y -= 12;
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.page);
        let total = self.finished.len();
        for (index, page) in self.finished.iter_mut().enumerate() {
            page.text_right(
                Font::Regular,
                8,
                RIGHT,
                MARGIN - 20,
                &format!("Page {} / {}", index + 1, total),
            );
        }
        self.finished
    }
}

/// Lays out the first part of `document` across as many A4 pages as it needs.
pub fn lay_out(
    document: &DocumentConfig,
    organization: &OrganizationConfig,
    totals: &Totals,
) -> Result<Vec<Page>> {
    let mut layout = Layout::new(document);
    layout.header(organization);
    layout.total_banner(totals);
    layout.table_header();
    layout.rows()?;
    layout.summary(totals);
    layout.footnotes(organization);
    Ok(layout.finish())
}
