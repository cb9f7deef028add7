#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::SimpleFileOptions;

pub const DOC_PART: &str = "word/document.xml";
pub const RELS_PART: &str = "word/_rels/document.xml.rels";

/// 1x1 PNG header bytes; enough for format sniffing.
pub const PNG_BYTES: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00,
];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00];

/// Wrap body content in a `w:document` declaring the usual Word namespaces.
pub fn document_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:wpc="http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas""#,
            r#" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships""#,
            r#" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#,
            r#" xmlns:w14="http://schemas.microsoft.com/office/word/2010/wordml""#,
            r#" xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing""#,
            r#" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main""#,
            r#" xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
            "<w:body>{}</w:body></w:document>"
        ),
        body
    )
}

pub fn rels_xml(entries: &[(&str, &str)]) -> String {
    let mut xml = String::from(concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
    ));
    for (id, target) in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="{target}"/>"#
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// An inline picture the way Word writes it, blip nested five levels down.
pub fn drawing(rel_id: &str) -> String {
    format!(
        concat!(
            "<w:drawing><wp:inline distT=\"0\" distB=\"0\">",
            "<wp:extent cx=\"914400\" cy=\"914400\"/><wp:docPr id=\"1\" name=\"Picture 1\"/>",
            "<a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">",
            "<pic:pic><pic:nvPicPr><pic:cNvPr id=\"0\" name=\"image.png\"/><pic:cNvPicPr/></pic:nvPicPr>",
            "<pic:blipFill><a:blip r:embed=\"{}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>",
            "</pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"
        ),
        rel_id
    )
}

/// A drawing with no embed attribute anywhere (e.g. a chart or shape).
pub fn drawing_without_embed() -> String {
    concat!(
        "<w:drawing><wp:inline><wp:docPr id=\"2\" name=\"Chart\"/>",
        "<a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/chart\"/>",
        "</a:graphic></wp:inline></w:drawing>"
    )
    .to_string()
}

pub fn run(inner: &str) -> String {
    format!("<w:r>{inner}</w:r>")
}

pub fn text_run(text: &str) -> String {
    format!("<w:r><w:t>{text}</w:t></w:r>")
}

pub fn paragraph(para_id: Option<&str>, runs: &[String]) -> String {
    match para_id {
        Some(id) => format!(
            r#"<w:p w14:paraId="{id}" w14:textId="77777777">{}</w:p>"#,
            runs.concat()
        ),
        None => format!("<w:p>{}</w:p>", runs.concat()),
    }
}

/// Zip `entries` into an in-memory container, in the order given.
pub fn build_docx(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).expect("start zip entry");
        zip.write_all(data).expect("write zip entry");
    }
    zip.finish().expect("finish zip").into_inner()
}

/// A minimal package: content types, document, optional relationships, media.
pub fn docx_with(document: &str, rels: Option<&str>, media: &[(&str, &[u8])]) -> Vec<u8> {
    let content_types = br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#;
    let mut entries: Vec<(&str, &[u8])> = vec![
        ("[Content_Types].xml", content_types.as_slice()),
        (DOC_PART, document.as_bytes()),
    ];
    if let Some(rels) = rels {
        entries.push((RELS_PART, rels.as_bytes()));
    }
    entries.extend_from_slice(media);
    build_docx(&entries)
}

/// Write fixture bytes under tests/output/<name>.docx and return the path.
pub fn write_fixture(name: &str, bytes: &[u8]) -> PathBuf {
    let dir = PathBuf::from("tests/output");
    fs::create_dir_all(&dir).expect("create tests/output");
    let path = dir.join(format!("{name}.docx"));
    fs::write(&path, bytes).expect("write fixture");
    path
}

/// Fresh output directory tests/output/<name>/.
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    let _ = fs::remove_dir_all(&dir);
    dir
}
