//! Shared fixtures: PDFs built on the fly with lopdf.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// What to draw on one generated page.
pub enum PageSpec<'a> {
    /// A single line of text.
    Text(&'a str),
    /// A filled rectangle and no text, like a scanned page.
    NoText,
}

/// Builds a PDF with one page per entry in `pages`.
pub fn build_pdf(pages: &[PageSpec<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for spec in pages {
        let operations = match spec {
            PageSpec::Text(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            PageSpec::NoText => vec![
                Operation::new("re", vec![0.into(), 0.into(), 595.into(), 842.into()]),
                Operation::new("f", vec![]),
            ],
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// PDF whose pages each carry one line of text.
pub fn text_pdf(lines: &[&str]) -> Vec<u8> {
    let specs: Vec<PageSpec<'_>> = lines.iter().map(|l| PageSpec::Text(l)).collect();
    build_pdf(&specs)
}

/// Writes `bytes` to `<root>/<owner>/<title>.pdf`, creating directories.
pub fn write_document(root: &Path, owner: &str, title: &str, bytes: &[u8]) -> PathBuf {
    let dir = root.join(owner);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{title}.pdf"));
    fs::write(&path, bytes).unwrap();
    path
}

/// Text PDF whose trailer declares Standard security handler encryption.
///
/// The `/O` and `/U` entries are arbitrary, so no password opens it.
pub fn encrypted_pdf(line: &str) -> Vec<u8> {
    let mut doc = Document::load_mem(&text_pdf(&[line])).unwrap();
    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1,
        "R" => 2,
        "O" => Object::string_literal(vec![0x4f_u8; 32]),
        "U" => Object::string_literal(vec![0x55_u8; 32]),
        "P" => -44,
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![
            Object::string_literal(vec![0x01_u8; 16]),
            Object::string_literal(vec![0x01_u8; 16]),
        ],
    );

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// First half of a valid text PDF: the header survives, the xref table and
/// trailer do not.
pub fn truncated_pdf(line: &str) -> Vec<u8> {
    let mut bytes = text_pdf(&[line]);
    bytes.truncate(bytes.len() / 2);
    bytes
}
