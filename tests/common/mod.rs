//! Common test utilities for integration tests

use std::fs;
use std::path::Path;

/// Helper function to write a single dataset file, creating parent directories
#[allow(dead_code)]
pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Writes a complete dataset into `dir`: a manifest referencing one file per
/// chunk payload (named `records_000.json`, `records_001.json`, ...), the
/// chunk files themselves, and the CPV taxonomy.
#[allow(dead_code)]
pub fn write_dataset(dir: &Path, chunks: &[&str], taxonomy: &str) {
    let entries: Vec<String> = (0..chunks.len())
        .map(|i| format!(r#"{{"file": "records_{i:03}.json"}}"#))
        .collect();
    let manifest = format!(r#"{{"chunks": [{}]}}"#, entries.join(", "));
    write_file(&dir.join("records_manifest.json"), &manifest);

    for (i, chunk) in chunks.iter().enumerate() {
        write_file(&dir.join(format!("records_{i:03}.json")), chunk);
    }

    write_file(&dir.join("cpv_nodes.json"), taxonomy);
}

/// A small CPV subtree: two divisions, with one chain drilled all the way
/// down to an item
#[allow(dead_code)]
pub const SAMPLE_TAXONOMY: &str = r#"[
  {"code": "03000000", "parent_code": "", "level": 2, "label": "Agricultural and farming products"},
  {"code": "30000000", "parent_code": "", "level": 2, "label": "Office and computing machinery"},
  {"code": "30100000", "parent_code": "30000000", "level": 3, "label": "Office machinery and supplies"},
  {"code": "30190000", "parent_code": "30100000", "level": 4, "label": "Various office equipment"},
  {"code": "30192000", "parent_code": "30190000", "level": 5, "label": "Office supplies"},
  {"code": "30192100", "parent_code": "30192000", "level": 8, "label": "Erasers"}
]"#;

/// Chunk with a direct-award contract in Attica, CPV-tagged down to item level
#[allow(dead_code)]
pub const CHUNK_CONTRACT: &str = r#"[
  {
    "kind": "contract",
    "title": "Προμήθεια γραφικής ύλης",
    "date": "2024-01-01",
    "referenceNumber": "24SYMV001",
    "protocolNumber": "100/2024",
    "organization": "Δήμος Αθηναίων",
    "procedureType": "Απευθείας ανάθεση",
    "contractType": "Supplies",
    "amount_num": 12500.0,
    "pdf_url": "https://example.com/24SYMV001.pdf",
    "location": {"nuts_label": "Αττική", "city": "Αθήνα", "postal_code": "10431", "text": "Αθήνα Αττική"},
    "cpvs": [
      {
        "cpv_item": "301921001-5",
        "cpv_division": "30000000",
        "cpv_group": "30100000",
        "cpv_class": "30190000",
        "cpv_category": "30192000"
      }
    ]
  }
]"#;

/// Chunk with an open-competition payment and an untyped notice
#[allow(dead_code)]
pub const CHUNK_PAYMENT_AND_NOTICE: &str = r#"[
  {
    "kind": "payment",
    "title": "Πληρωμή συντήρησης",
    "date": "2024-03-01",
    "referenceNumber": "24PAY002",
    "protocolNumber": "200/2024",
    "organization": "Περιφέρεια Κρήτης",
    "procedureType": "Ανοιχτός διαγωνισμός",
    "contractType": "Services",
    "amount_num": 4300.5,
    "location": {"nuts_label": "Κρήτη", "city": "Ηράκλειο", "postal_code": "71201", "text": "Ηράκλειο Κρήτη"},
    "cpvs": []
  },
  {
    "kind": "notice",
    "title": "Προκήρυξη έργου οδοποιίας",
    "date": "2024-02-01",
    "referenceNumber": "24PROC003",
    "protocolNumber": "300/2024",
    "organization": "Δήμος Χανίων",
    "location": {"nuts_label": "Κρήτη", "city": "Χανιά", "text": "Χανιά Κρήτη"}
  }
]"#;
