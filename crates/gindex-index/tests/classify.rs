//! Tests for blob classification

mod common;

use common::{CountingReader, UnreadableReader};
use gindex_core::ClassificationError;
use gindex_index::{Classifier, FileType, DEFAULT_SNIFF_LEN};

const ODML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<odML version="1.1">
  <section><name>Recording</name></section>
</odML>
"#;

fn classifier() -> Classifier {
    Classifier::new(DEFAULT_SNIFF_LEN).unwrap()
}

// ── decisive extensions ──────────────────────────────────────────────────────

#[test]
fn test_decisive_extensions_do_not_read() {
    let cases = [
        ("data/notes.txt", FileType::Text),
        ("README.MD", FileType::Text),
        ("meta/session.odml", FileType::OdmlXml),
        ("raw/trace.bin", FileType::Binary),
        ("img/figure.PNG", FileType::Binary),
    ];
    for (path, expected) in cases {
        let reader = CountingReader::new(b"\0\0\0");
        assert_eq!(classifier().classify(path, &reader).unwrap(), expected, "{}", path);
        assert_eq!(*reader.sniffed.lock().unwrap(), None, "{} was sniffed", path);
    }
}

// ── content sniffing ─────────────────────────────────────────────────────────

#[test]
fn test_xml_is_sniffed_for_odml_root() {
    let c = classifier();
    assert_eq!(c.classify("meta/session.xml", ODML.as_bytes()).unwrap(), FileType::OdmlXml);
    assert_eq!(
        c.classify("pom.xml", b"<project><odMLish/></project>".as_slice()).unwrap(),
        FileType::Text
    );
}

#[test]
fn test_unknown_extension_sniffs_bounded_prefix() {
    let reader = CountingReader::new(&vec![b'a'; 10_000]);
    let c = Classifier::new(256).unwrap();

    assert_eq!(c.classify("Makefile", &reader).unwrap(), FileType::Text);
    assert_eq!(*reader.sniffed.lock().unwrap(), Some(256));
    assert_eq!(*reader.full_reads.lock().unwrap(), 0);
}

#[test]
fn test_binary_content_without_extension() {
    let c = classifier();
    assert_eq!(c.classify("blob", [0x7f, b'E', b'L', b'F', 0, 1].as_slice()).unwrap(), FileType::Binary);
    assert_eq!(c.classify("latin1", [b'c', b'a', b'f', 0xe9, b' ', b'x'].as_slice()).unwrap(), FileType::Binary);
}

#[test]
fn test_empty_blob_is_text() {
    assert_eq!(classifier().classify("empty", b"".as_slice()).unwrap(), FileType::Text);
}

#[test]
fn test_odml_beyond_sniff_window_is_plain_text() {
    let mut content = " ".repeat(64).into_bytes();
    content.extend_from_slice(ODML.as_bytes());
    let c = Classifier::new(16).unwrap();
    assert_eq!(c.classify("session.xml", &content).unwrap(), FileType::Text);
}

// ── failures ─────────────────────────────────────────────────────────────────

#[test]
fn test_empty_path_is_classification_error() {
    let err = classifier().classify("", b"hello".as_slice()).unwrap_err();
    assert!(matches!(err, ClassificationError::Path(_)));
}

#[test]
fn test_sniff_failure_is_classification_error() {
    let err = classifier().classify("LICENSE", &UnreadableReader).unwrap_err();
    assert!(matches!(err, ClassificationError::Sniff { .. }));
}

#[test]
fn test_only_text_types_have_content() {
    assert!(FileType::Text.has_content());
    assert!(FileType::OdmlXml.has_content());
    assert!(!FileType::Binary.has_content());
}
