//! Built-in PDF renderer.
//!
//! Uses the 14 standard fonts so no font files need to ship with the function.

pub mod layout;
pub mod text;

use crate::core::{DocumentConfig, OrganizationConfig, Part, Renderer};
use crate::domain::document::Totals;
use crate::utils::error::{DocgenError, Result};
use layout::{Font, Page, PAGE_HEIGHT, PAGE_WIDTH};
use lopdf::content::Content;
use lopdf::{dictionary, Document, Object, Stream};
use std::io::{BufWriter, Write};

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    producer: String,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self {
            producer: concat!("docgen-lambda ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl PdfRenderer {
    pub fn new(producer: impl Into<String>) -> Self {
        Self {
            producer: producer.into(),
        }
    }

    fn assemble(&self, pages: Vec<Page>, part: &Part) -> Result<Document> {
        let mut pdf = Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let regular_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = pdf.add_object(dictionary! {
            "Font" => dictionary! {
                Font::REGULAR_RESOURCE => regular_id,
                Font::BOLD_RESOURCE => bold_id,
            },
        });

        let mut kids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = Content {
                operations: page.into_operations(),
            };
            let encoded = content
                .encode()
                .map_err(|e| DocgenError::render(format!("Failed to encode page content: {}", e)))?;
            let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(PAGE_WIDTH),
                    Object::Integer(PAGE_HEIGHT),
                ],
            }),
        );

        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let title = if part.title.is_empty() {
            text::heading_for(&part.doc_type)
        } else {
            part.title.clone()
        };
        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_id = pdf.add_object(dictionary! {
            "Title" => Object::string_literal(text::to_latin1(&title)),
            "Producer" => Object::string_literal(self.producer.clone()),
            "CreationDate" => Object::string_literal(created),
        });

        pdf.trailer.set("Root", catalog_id);
        pdf.trailer.set("Info", info_id);
        pdf.compress();
        Ok(pdf)
    }
}

/// Characters in the rendered text that the standard fonts cannot show.
fn unencodable_chars(document: &DocumentConfig, organization: &OrganizationConfig) -> usize {
    let part = &document.first_part;
    let fields = [&part.title, &part.date, &part.name, &part.doc_type]
        .into_iter()
        .chain(part.items.iter().flat_map(|item| [&item.title, &item.unit]))
        .chain(&document.notes)
        .chain([&document.currency, &organization.name])
        .chain(&organization.address)
        .chain(organization.phone.iter())
        .chain(organization.email.iter())
        .chain(organization.bank_account.iter());

    fields.map(|field| text::unencodable_count(field)).sum()
}

impl Renderer for PdfRenderer {
    fn render(
        &self,
        document: &DocumentConfig,
        organization: &OrganizationConfig,
        sink: &mut dyn Write,
    ) -> Result<()> {
        let part = &document.first_part;
        let replaced = unencodable_chars(document, organization);
        if replaced > 0 {
            tracing::warn!(
                replaced,
                "Text outside Latin-1 is rendered as '?' by the standard fonts"
            );
        }

        let totals = Totals::compute(part, document.tax_rate)?;
        let pages = layout::lay_out(document, organization, &totals)?;
        tracing::debug!(
            items = part.items.len(),
            pages = pages.len(),
            total = totals.total,
            "Laid out document"
        );

        let mut pdf = self.assemble(pages, part)?;
        let mut writer = BufWriter::new(sink);
        pdf.save_to(&mut writer)
            .map_err(|e| DocgenError::render(format!("Failed to write PDF: {}", e)))?;
        writer
            .flush()
            .map_err(|e| DocgenError::render(format!("Failed to flush PDF: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::LineItem;

    fn invoice(items: usize) -> DocumentConfig {
        DocumentConfig {
            currency: "$".to_string(),
            decimal_places: 2,
            tax_rate: 8,
            notes: vec!["Payment due within 30 days.".to_string()],
            first_part: Part {
                title: "Website redesign".to_string(),
                date: "2024-05-31".to_string(),
                name: "Example Corp.".to_string(),
                items: (0..items)
                    .map(|i| LineItem {
                        title: format!("Task {}", i + 1),
                        unit_price: 12_500,
                        quantity: 2,
                        unit: "hour".to_string(),
                    })
                    .collect(),
                doc_type: "invoice".to_string(),
            },
        }
    }

    fn organization() -> OrganizationConfig {
        OrganizationConfig {
            name: "Acme Studio".to_string(),
            email: Some("billing@acme.example".to_string()),
            ..OrganizationConfig::default()
        }
    }

    fn render(document: &DocumentConfig) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PdfRenderer::default().render(document, &organization(), &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_renders_parseable_pdf() {
        let bytes = render(&invoice(4)).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let parsed = Document::load_mem(&bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1);
    }

    #[test]
    fn test_page_count_grows_with_items() {
        let bytes = render(&invoice(150)).unwrap();
        let parsed = Document::load_mem(&bytes).unwrap();
        assert!(parsed.get_pages().len() > 1);
    }

    #[test]
    fn test_counts_characters_the_fonts_cannot_show() {
        let mut document = invoice(2);
        assert_eq!(unencodable_chars(&document, &organization()), 0);

        document.first_part.name = "株式会社".to_string();
        document.first_part.items[1].unit = "時間".to_string();
        assert_eq!(unencodable_chars(&document, &organization()), 6);

        let bytes = render(&document).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_overflowing_amount_fails() {
        let mut document = invoice(1);
        document.first_part.items[0].unit_price = i64::MAX;

        assert!(matches!(
            render(&document),
            Err(DocgenError::RenderError { .. })
        ));
    }
}
