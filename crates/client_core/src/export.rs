//! CSV export of the visible page.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use shared::domain::Product;
use thiserror::Error;

const HEADER: [&str; 5] = ["id", "title", "price", "category", "images"];
const IMAGE_SEPARATOR: &str = " | ";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Flush(String),
}

pub fn export_file_name(page: usize) -> String {
    format!("products_page_{page}.csv")
}

/// Every cell is quoted, inner quotes doubled, rows separated by `\n` without a trailing one.
pub fn export_csv(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for product in products {
        writer.write_record([
            product.id.to_string(),
            product.title.clone(),
            product.price.to_string(),
            product.category_name().to_string(),
            product.images.join(IMAGE_SEPARATOR),
        ])?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use shared::domain::{Category, CategoryId, ProductId};

    use super::*;

    fn product(id: i64, title: &str, images: &[&str]) -> Product {
        Product {
            id: ProductId(id),
            title: title.to_string(),
            price: 19.5,
            description: "ignored".to_string(),
            category: Some(Category {
                id: CategoryId(2),
                name: "Electronics".to_string(),
            }),
            images: images.iter().map(|image| image.to_string()).collect(),
        }
    }

    #[test]
    fn quotes_titles_and_joins_images() {
        let bytes = export_csv(&[product(
            3,
            "He said \"hi\", ok",
            &["https://a/1.png", "https://a/2.png"],
        )])
        .expect("export");
        let text = String::from_utf8(bytes).expect("utf8");
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(
            lines,
            vec![
                r#""id","title","price","category","images""#,
                r#""3","He said ""hi"", ok","19.5","Electronics","https://a/1.png | https://a/2.png""#,
            ]
        );
    }

    #[test]
    fn empty_page_is_header_only_without_trailing_newline() {
        let text = String::from_utf8(export_csv(&[]).expect("export")).expect("utf8");
        assert_eq!(text, r#""id","title","price","category","images""#);
    }

    #[test]
    fn missing_category_exports_empty_cell() {
        let mut bare = product(8, "Bare", &[]);
        bare.category = None;
        bare.price = 10.0;
        let text = String::from_utf8(export_csv(&[bare]).expect("export")).expect("utf8");

        assert!(text.ends_with(r#""8","Bare","10","","""#), "unexpected csv: {text}");
    }

    #[test]
    fn file_name_carries_page_number() {
        assert_eq!(export_file_name(4), "products_page_4.csv");
    }
}
