use financial_document_qa::*;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, Stream};
use rust_xlsxwriter::Workbook;

/// Builds a PDF with one page per entry; `None` is a page with no text layer.
fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    save_pdf(build_pdf_document(pages))
}

fn save_pdf(mut doc: lopdf::Document) -> Vec<u8> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn build_pdf_document(pages: &[Option<&str>]) -> lopdf::Document {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => vec![],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

fn build_workbook(sheets: &[(&str, &[(&str, f64)])]) -> anyhow::Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(*name)?;
        sheet.write_string(0, 0, "Item")?;
        sheet.write_string(0, 1, "Amount")?;
        for (i, (label, amount)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, *label)?;
            sheet.write_number(row, 1, *amount)?;
        }
    }
    Ok(workbook.save_to_buffer()?)
}

#[test]
fn test_pdf_pages_in_order() {
    let bytes = build_pdf(&[
        Some("Total Revenue: $1,234,567.89"),
        Some("Net income was $45,000"),
    ]);
    let result = process_document(Document::new(bytes, DocumentFormat::Pdf)).unwrap();

    let first = result.raw_text.find("Total Revenue").unwrap();
    let second = result.raw_text.find("Net income").unwrap();
    assert!(first < second);

    assert_eq!(
        result.metrics.get("revenue"),
        Some(&MetricValue::Number(1_234_567.89))
    );
    assert_eq!(result.metrics.get("profit"), Some(&MetricValue::Number(45_000.0)));
    assert!(!result.metrics.contains("assets"));
    assert!(result.sheets.is_none());
    assert_eq!(result.format, DocumentFormat::Pdf);
}

#[test]
fn test_pdf_page_without_text_layer() {
    let bytes = build_pdf(&[None, Some("Total assets: 2,000,000")]);
    let pages = PdfExtractor.extract_pages(&bytes).unwrap();

    assert_eq!(pages.len(), 2);
    assert!(pages[0].1.trim().is_empty());
    assert!(pages[1].1.contains("Total assets"));

    let text = extract_text(&Document::new(bytes, DocumentFormat::Pdf)).unwrap();
    assert!(text.starts_with('\n'));
    assert_eq!(
        extract_metrics(&text).get("assets"),
        Some(&MetricValue::Number(2_000_000.0))
    );
}

#[test]
fn test_encrypted_pdf_is_read_error() {
    let mut doc = build_pdf_document(&[Some("Total Revenue: 500")]);
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "Length" => 40,
        "P" => -4,
        "O" => Object::string_literal(vec![0u8; 32]),
        "U" => Object::string_literal(vec![0u8; 32]),
    });
    doc.trailer.set("Encrypt", encrypt_id);
    let bytes = save_pdf(doc);

    let result = process_document(Document::new(bytes, DocumentFormat::Pdf));
    assert!(matches!(
        result,
        Err(FinancialDocumentError::DocumentRead {
            format: DocumentFormat::Pdf,
            ..
        })
    ));
}

#[test]
fn test_document_from_path_detects_format() -> anyhow::Result<()> {
    let bytes = build_workbook(&[("Balance", &[("Total liabilities", 1250.5)])])?;
    let path = std::env::temp_dir().join(format!("findoc-test-{}.xlsx", std::process::id()));
    std::fs::write(&path, &bytes)?;

    let document = Document::from_path(&path);
    std::fs::remove_file(&path)?;
    let document = document?;

    assert_eq!(document.format(), DocumentFormat::Spreadsheet);
    assert!(document.name().unwrap().ends_with(".xlsx"));

    let result = process_document(document)?;
    assert_eq!(
        result.metrics.get("liabilities"),
        Some(&MetricValue::Number(1250.5))
    );
    Ok(())
}

#[test]
fn test_workbook_sheets_in_order() -> anyhow::Result<()> {
    let bytes = build_workbook(&[
        ("A", &[("Revenue", 1500.0), ("Costs", 400.0)]),
        ("B", &[("Total assets", 9000.0), ("Revenue", 99.0)]),
    ])?;

    let result = DocumentPipeline::new().process(Document::new(bytes, DocumentFormat::Spreadsheet))?;

    let sheets = result.sheets.as_ref().unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);

    assert_eq!(
        result.raw_text,
        "Item\tAmount\nRevenue\t1500\nCosts\t400\n\
         Item\tAmount\nTotal assets\t9000\nRevenue\t99\n"
    );

    assert_eq!(result.metrics.get("revenue"), Some(&MetricValue::Number(1500.0)));
    assert_eq!(result.metrics.get("expenses"), Some(&MetricValue::Number(400.0)));
    assert_eq!(result.metrics.get("assets"), Some(&MetricValue::Number(9000.0)));
    assert_eq!(
        result.metrics.names().collect::<Vec<_>>(),
        vec!["revenue", "expenses", "assets"]
    );

    assert_eq!(sheets[1].rows[1][1], CellValue::Number(9000.0));
    assert_eq!(sheets[0].preview(1).len(), 1);
    Ok(())
}

#[test]
fn test_session_replaces_result_wholesale() -> anyhow::Result<()> {
    let pipeline = DocumentPipeline::new();
    let mut session = ExtractionSession::new();

    let workbook = build_workbook(&[("Summary", &[("Equity", 700.0)])])?;
    session.load(&pipeline, Document::new(workbook, DocumentFormat::Spreadsheet))?;
    assert!(session.result().unwrap().metrics.contains("equity"));

    let pdf = build_pdf(&[Some("Liabilities: 300")]);
    let result = session.load(&pipeline, Document::new(pdf, DocumentFormat::Pdf))?;
    assert!(result.sheets.is_none());
    assert!(!result.metrics.contains("equity"));
    assert_eq!(
        result.metrics.get("liabilities"),
        Some(&MetricValue::Number(300.0))
    );
    Ok(())
}

#[test]
fn test_result_serializes_for_the_shell() -> anyhow::Result<()> {
    let bytes = build_workbook(&[("A", &[("Revenue", 1500.0)])])?;
    let result = process_document(Document::new(bytes, DocumentFormat::Spreadsheet))?;

    let json = serde_json::to_value(&result)?;
    assert_eq!(json["format"], "spreadsheet");
    assert_eq!(json["metrics"][0]["name"], "revenue");
    assert_eq!(json["sheets"][0]["name"], "A");

    let back: ExtractionResult = serde_json::from_value(json)?;
    assert_eq!(back, result);
    Ok(())
}
