//! Integration tests for block graph reconstruction and rendering.

use untextract::render::{render_grid, to_export_text, write_export};
use untextract::{
    reconstruct, reconstruct_detection, reconstruct_json, reconstruct_with_options, Block,
    BlockGraph, BlockType, EntityType, Error, ReconstructOptions,
};

/// Page with a line, a 2x3 table, and two form pairs, built from raw response JSON.
const INVOICE: &str = r#"{
  "JobStatus": "SUCCEEDED",
  "Blocks": [
    {"BlockType": "PAGE", "Id": "page-1", "Page": 1,
     "Relationships": [{"Type": "CHILD", "Ids": ["line-1", "line-2", "table-1", "key-1", "key-2"]}]},
    {"BlockType": "LINE", "Id": "line-1", "Text": "Invoice #123"},
    {"BlockType": "LINE", "Id": "line-2", "Text": "Date: 2024-01-01"},
    {"BlockType": "TABLE", "Id": "table-1",
     "Relationships": [{"Type": "CHILD", "Ids": ["c11", "c12", "c13", "c21", "c22", "c23"]}]},
    {"BlockType": "CELL", "Id": "c11", "RowIndex": 1, "ColumnIndex": 1,
     "Relationships": [{"Type": "CHILD", "Ids": ["w-item"]}]},
    {"BlockType": "CELL", "Id": "c12", "RowIndex": 1, "ColumnIndex": 2,
     "Relationships": [{"Type": "CHILD", "Ids": ["w-qty"]}]},
    {"BlockType": "CELL", "Id": "c13", "RowIndex": 1, "ColumnIndex": 3,
     "Relationships": [{"Type": "CHILD", "Ids": ["w-price"]}]},
    {"BlockType": "CELL", "Id": "c21", "RowIndex": 2, "ColumnIndex": 1,
     "Relationships": [{"Type": "CHILD", "Ids": ["w-pen"]}]},
    {"BlockType": "CELL", "Id": "c22", "RowIndex": 2, "ColumnIndex": 2,
     "Relationships": [{"Type": "CHILD", "Ids": ["w-two"]}]},
    {"BlockType": "CELL", "Id": "c23", "RowIndex": 2, "ColumnIndex": 3},
    {"BlockType": "WORD", "Id": "w-item", "Text": "Item"},
    {"BlockType": "WORD", "Id": "w-qty", "Text": "Qty"},
    {"BlockType": "WORD", "Id": "w-price", "Text": "Price"},
    {"BlockType": "WORD", "Id": "w-pen", "Text": "Pen"},
    {"BlockType": "WORD", "Id": "w-two", "Text": "2"},
    {"BlockType": "KEY_VALUE_SET", "Id": "key-1", "EntityTypes": ["KEY"],
     "Relationships": [{"Type": "CHILD", "Ids": ["w-name"]}, {"Type": "VALUE", "Ids": ["val-1"]}]},
    {"BlockType": "KEY_VALUE_SET", "Id": "val-1", "EntityTypes": ["VALUE"],
     "Relationships": [{"Type": "CHILD", "Ids": ["w-ada"]}]},
    {"BlockType": "WORD", "Id": "w-name", "Text": "Name"},
    {"BlockType": "WORD", "Id": "w-ada", "Text": "Ada"},
    {"BlockType": "KEY_VALUE_SET", "Id": "key-2", "EntityTypes": ["KEY"],
     "Relationships": [{"Type": "CHILD", "Ids": ["w-total"]}, {"Type": "VALUE", "Ids": ["val-2"]}]},
    {"BlockType": "KEY_VALUE_SET", "Id": "val-2", "EntityTypes": ["VALUE"],
     "Relationships": [{"Type": "CHILD", "Ids": ["w-50"]}]},
    {"BlockType": "WORD", "Id": "w-total", "Text": "Total"},
    {"BlockType": "WORD", "Id": "w-50", "Text": "$50"}
  ]
}"#;

fn page(id: &str, children: &[&str]) -> Block {
    Block::new(id, BlockType::Page).with_children(children.iter().copied())
}

fn line(id: &str, text: &str) -> Block {
    Block::new(id, BlockType::Line).with_text(text)
}

fn word(id: &str, text: &str) -> Block {
    Block::new(id, BlockType::Word).with_text(text)
}

fn key(id: &str, word_id: &str, value_id: &str) -> Block {
    Block::new(id, BlockType::KeyValueSet)
        .with_entity(EntityType::Key)
        .with_children([word_id])
        .with_values([value_id])
}

fn value(id: &str, word_id: &str) -> Block {
    Block::new(id, BlockType::KeyValueSet)
        .with_entity(EntityType::Value)
        .with_children([word_id])
}

#[test]
fn test_invoice_from_json() {
    let doc = reconstruct_json(INVOICE).unwrap();

    assert_eq!(doc.page_count(), 1);
    let page = &doc.pages[0];
    assert_eq!(page.lines, vec!["Invoice #123", "Date: 2024-01-01"]);

    assert_eq!(page.tables.len(), 1);
    let table = &page.tables[0];
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.rows[0], vec!["Item", "Qty", "Price"]);
    assert_eq!(table.rows[1], vec!["Pen", "2", ""]);

    assert_eq!(page.form.get("Name"), Some("Ada"));
    assert_eq!(page.form.get("Total"), Some("$50"));
    assert_eq!(doc.first_date_line.as_deref(), Some("Date: 2024-01-01"));
}

#[test]
fn test_invoice_export() {
    let doc = reconstruct_json(INVOICE).unwrap();
    let expected = [
        "Extracted Tables:",
        "Table 1:",
        "      0    1      2",
        "0  Item  Qty  Price",
        "1   Pen    2       ",
        "",
        "Extracted Key-Value Pairs:",
        "Name: Ada",
        "Total: $50",
        "Date: Date: 2024-01-01",
        "",
    ]
    .join("\n");
    assert_eq!(to_export_text(&doc), expected);
}

#[test]
fn test_write_export_names_file_after_source() {
    let doc = reconstruct_json(INVOICE).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    let path = write_export(&doc, dir.path(), "march invoice.pdf", date).unwrap();
    assert_eq!(path.file_name().unwrap(), "march_invoice_2024-01-02.txt");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), to_export_text(&doc));
}

#[test]
fn test_sparse_table_is_densified() {
    let graph = BlockGraph::from_blocks([
        page("p", &["t"]),
        Block::new("t", BlockType::Table).with_children(["a", "b"]),
        Block::new("a", BlockType::Cell).at(1, 1).with_children(["w1"]),
        Block::new("b", BlockType::Cell).at(3, 2).with_children(["w2"]),
        word("w1", "top"),
        word("w2", "bottom"),
    ]);

    let doc = reconstruct(&graph).unwrap();
    let table = &doc.pages[0].tables[0];
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.rows[0], vec!["top", ""]);
    assert_eq!(table.rows[1], vec!["", ""]);
    assert_eq!(table.rows[2], vec!["", "bottom"]);
}

#[test]
fn test_table_without_cells() {
    let graph = BlockGraph::from_blocks([
        page("p", &["t"]),
        Block::new("t", BlockType::Table),
    ]);

    let doc = reconstruct(&graph).unwrap();
    let table = &doc.pages[0].tables[0];
    assert!(table.is_empty());
    assert_eq!(render_grid(table), "Empty DataFrame\nColumns: []\nIndex: []");
}

#[test]
fn test_form_last_write_wins_across_pages() {
    let graph = BlockGraph::from_blocks([
        page("p1", &["k1"]),
        page("p2", &["k2"]),
        key("k1", "kw1", "v1"),
        value("v1", "vw1"),
        key("k2", "kw2", "v2"),
        value("v2", "vw2"),
        word("kw1", "Total"),
        word("vw1", "$10"),
        word("kw2", "Total"),
        word("vw2", "$20"),
    ]);

    let doc = reconstruct(&graph).unwrap();
    let form = doc.form_fields();
    assert_eq!(form.len(), 1);
    assert_eq!(form.get("Total"), Some("$20"));
}

#[test]
fn test_first_date_line_spans_pages() {
    let graph = BlockGraph::from_blocks([
        page("p1", &["l1"]),
        page("p2", &["l2", "l3"]),
        line("l1", "Invoice"),
        line("l2", "Due Date: 2024-02-01"),
        line("l3", "Date: 2024-01-01"),
    ]);

    let doc = reconstruct(&graph).unwrap();
    assert_eq!(doc.first_date_line.as_deref(), Some("Due Date: 2024-02-01"));
}

#[test]
fn test_first_date_line_is_case_sensitive() {
    let graph = BlockGraph::from_blocks([page("p", &["l"]), line("l", "dated yesterday")]);
    let doc = reconstruct(&graph).unwrap();
    assert_eq!(doc.first_date_line, None);
}

#[test]
fn test_dangling_reference_fails_whole_document() {
    let graph = BlockGraph::from_blocks([
        page("p1", &["l1"]),
        page("p2", &["missing"]),
        line("l1", "fine"),
    ]);

    match reconstruct(&graph) {
        Err(Error::MalformedGraph { block_id, .. }) => assert_eq!(block_id, "p2"),
        other => panic!("expected malformed graph, got {:?}", other),
    }
}

#[test]
fn test_reconstruction_is_deterministic() {
    let first = reconstruct_json(INVOICE).unwrap();
    let second = reconstruct_json(INVOICE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let mut blocks = Vec::new();
    for p in 0..8 {
        let line_id = format!("l{}", p);
        blocks.push(page(&format!("p{}", p), &[line_id.as_str()]));
        blocks.push(line(&line_id, &format!("Line on page {}", p)));
    }
    let graph = BlockGraph::from_blocks(blocks);

    let parallel = reconstruct_with_options(&graph, &ReconstructOptions::new()).unwrap();
    let sequential =
        reconstruct_with_options(&graph, &ReconstructOptions::new().sequential()).unwrap();
    assert_eq!(parallel, sequential);
    assert_eq!(parallel.pages[7].lines, vec!["Line on page 7"]);
}

#[test]
fn test_detection_skips_unresolved_cells_and_date() {
    let blocks = vec![
        Block::new("p", BlockType::Page),
        line("l", "Receipt Date: 2024-03-03"),
        Block::new("t", BlockType::Table).with_children(["c1", "gone"]),
        Block::new("c1", BlockType::Cell).at(1, 1).with_children(["w"]),
        word("w", "Tea"),
    ];

    let doc = reconstruct_detection(&blocks).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert!(doc.pages[0].form.is_empty());
    assert_eq!(doc.pages[0].tables[0].rows, vec![vec!["Tea".to_string()]]);
    assert_eq!(doc.first_date_line, None);
    assert_eq!(
        to_export_text(&doc),
        "Extracted Tables:\nTable 1:\n     0\n0  Tea\n\nExtracted Key-Value Pairs:\n"
    );
}

#[test]
fn test_huge_cell_index_is_rejected() {
    let json = r#"{"Blocks": [
        {"BlockType": "PAGE", "Id": "p", "Relationships": [{"Type": "CHILD", "Ids": ["t"]}]},
        {"BlockType": "TABLE", "Id": "t", "Relationships": [{"Type": "CHILD", "Ids": ["c"]}]},
        {"BlockType": "CELL", "Id": "c", "RowIndex": 4000000000, "ColumnIndex": 4000000000, "Text": "x"}
    ]}"#;

    match reconstruct_json(json) {
        Err(Error::MalformedGraph { block_id, .. }) => assert_eq!(block_id, "t"),
        other => panic!("expected malformed graph, got {:?}", other),
    }
}
