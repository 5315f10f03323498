use hotkey_sheet::*;
use std::collections::BTreeSet;

const EPSILON: f32 = 1e-3;

fn entries(prefix: &str, n: usize) -> Vec<HotkeyEntry> {
    (0..n)
        .map(|i| HotkeyEntry::new(format!("{prefix}{i}"), format!("{prefix} action number {i}")))
        .collect()
}

/// A mixed document with subsections, direct entries and descriptions of
/// varying length
fn editor_document(config: LayoutConfig) -> Document {
    let mut doc = Document::new("Editor Shortcuts").with_config(config);

    for s in 0..12 {
        let mut section = Section::new(format!("Section {s}"));
        for c in 0..(s % 4 + 1) {
            if c % 2 == 0 {
                section = section.with_subsection(Subsection::new(
                    format!("Group {s}.{c}"),
                    entries(&format!("S{s}G{c}K"), 3 + (s + c) % 7),
                ));
            } else {
                let long = "move the selection one word further along the line ".repeat(c + s % 3);
                section = section.with_entry(format!("Ctrl+Alt+{s}{c}"), long);
            }
        }
        doc = doc.with_section(section);
    }

    doc
}

fn sample_configs() -> Vec<LayoutConfig> {
    vec![
        LayoutConfig::default(),
        LayoutConfig {
            columns: 1,
            ..Default::default()
        },
        LayoutConfig {
            columns: 5,
            font_size: 7.0,
            row_height: 9.0,
            margin: 20.0,
            ..Default::default()
        },
        LayoutConfig {
            columns: 2,
            font_size: 14.0,
            header_font_size: 18.0,
            row_height: 20.0,
            margin: 0.0,
            ..Default::default()
        },
    ]
}

fn assert_plan_ordered(plan: &PlacementPlan) {
    for pair in plan.items.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            (a.page, a.column) <= (b.page, b.column),
            "items out of grid order: {a:?} then {b:?}"
        );
        if (a.page, a.column) == (b.page, b.column) {
            assert!(
                b.offset + EPSILON >= a.bottom(),
                "items overlap: {a:?} then {b:?}"
            );
        }
    }
}

fn assert_no_orphan_headings(plan: &PlacementPlan) {
    for (i, item) in plan.items.iter().enumerate() {
        if !item.is_heading() {
            continue;
        }
        let next = plan.items[i + 1..]
            .iter()
            .find(|candidate| candidate.is_drawable())
            .unwrap_or_else(|| panic!("heading ends the plan: {item:?}"));
        assert_eq!(
            (next.page, next.column),
            (item.page, item.column),
            "heading left alone at the bottom of its column: {item:?}"
        );
    }
}

fn assert_pages_contiguous(plan: &PlacementPlan) {
    let pages: BTreeSet<usize> = plan.items.iter().map(|item| item.page).collect();
    let expected: BTreeSet<usize> = (0..plan.page_count()).collect();
    assert_eq!(pages, expected);

    for page in 0..plan.page_count() {
        let kinds: Vec<_> = plan.page_items(page).take(2).map(|i| &i.kind).collect();
        assert_eq!(kinds, vec![&ItemKind::PageStart, &ItemKind::ColumnStart(0)]);
    }
}

#[test]
fn test_single_entry_scenario() {
    let doc = Document::new("Vim").with_section(Section::new("Motion").with_entry("h", "left"));

    let plan = plan(&doc).unwrap();
    assert_eq!(estimate_pages(&doc).unwrap(), 1);

    let count = |pred: fn(&ItemKind) -> bool| plan.items.iter().filter(|i| pred(&i.kind)).count();
    assert_eq!(count(|k| matches!(k, ItemKind::PageStart)), 1);
    assert_eq!(count(|k| matches!(k, ItemKind::ColumnStart(0))), 1);
    assert_eq!(count(|k| matches!(k, ItemKind::Header(_))), 1);
    assert_eq!(count(|k| matches!(k, ItemKind::Row(_))), 1);
    assert_eq!(plan.items.len(), 4);

    let row = plan.rows().next().unwrap();
    assert_eq!(row.keys, "h");
    assert_eq!(row.description, "left");
    assert_eq!(row.line_count, 1);
    assert_eq!(plan.title, "Vim");
}

#[test]
fn test_empty_title_is_rejected_before_planning() {
    let doc = Document::new("").with_section(Section::new("Motion").with_entry("h", "left"));

    let violations = doc.validate();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].path, "title");

    match plan(&doc) {
        Err(SheetError::Validation(v)) => assert_eq!(v, violations),
        other => panic!("Expected Validation error, got {other:?}"),
    }
}

#[test]
fn test_zero_columns_is_a_config_error() {
    let config = LayoutConfig {
        columns: 0,
        ..Default::default()
    };
    let doc = Document::new("Vim")
        .with_config(config)
        .with_section(Section::new("Motion").with_entry("h", "left"));

    match plan(&doc) {
        Err(SheetError::Config(v)) => {
            assert_eq!(v.len(), 1);
            assert_eq!(v[0].path, "config.columns");
        }
        other => panic!("Expected Config error, got {other:?}"),
    }
    assert!(matches!(estimate_pages(&doc), Err(SheetError::Config(_))));
}

#[test]
fn test_many_entries_span_contiguous_pages() {
    let doc = Document::new("Big").with_section(Section {
        name: "Everything".to_string(),
        children: entries("k", 500)
            .into_iter()
            .map(SectionChild::Entry)
            .collect(),
    });

    let plan = plan(&doc).unwrap();
    assert!(estimate_pages(&doc).unwrap() > 1);
    assert_eq!(plan.rows().count(), 500);
    assert_pages_contiguous(&plan);
    assert_plan_ordered(&plan);

    // Every column on every page but the last one is used
    let columns: BTreeSet<(usize, usize)> =
        plan.items.iter().map(|item| (item.page, item.column)).collect();
    let full_pages = plan.page_count() - 1;
    assert!(columns.len() >= full_pages * 3 + 1);
}

#[test]
fn test_overlong_word_is_placed_without_error() {
    let config = LayoutConfig {
        columns: 10,
        ..Default::default()
    };
    let word = "x".repeat(500);
    let doc = Document::new("Narrow")
        .with_config(config)
        .with_section(Section::new("Words").with_entry("w", word.clone()));

    let plan = plan(&doc).unwrap();
    let row = plan.rows().next().unwrap();
    assert_eq!(row.line_count, 1);
    assert_eq!(row.description_lines, vec![word]);
    assert_eq!(plan.page_count(), 1);
}

#[test]
fn test_row_taller_than_column_gets_its_own_column() {
    let config = LayoutConfig {
        columns: 10,
        ..Default::default()
    };
    let huge = "lorem ".repeat(400);
    let doc = Document::new("Narrow").with_config(config).with_section(
        Section::new("Words")
            .with_entry("a", "before")
            .with_entry("b", huge)
            .with_entry("c", "after"),
    );

    let plan = plan(&doc).unwrap();
    let geometry = plan.geometry;

    let placed: Vec<&PlacedItem> = plan.items.iter().filter(|i| i.as_row().is_some()).collect();
    assert_eq!(placed.len(), 3);
    let (before, big, after) = (placed[0], placed[1], placed[2]);

    assert!(big.height > geometry.column_height(big.page));
    assert_eq!(big.offset, 0.0);
    assert_ne!((before.page, before.column), (big.page, big.column));
    assert_ne!((after.page, after.column), (big.page, big.column));
    assert_eq!(after.offset, 0.0);

    assert_plan_ordered(&plan);
    assert_no_orphan_headings(&plan);
}

/// Rows of the plan that sit in the same column as `item`
fn drawables_in_column<'a>(plan: &'a PlacementPlan, item: &PlacedItem) -> Vec<&'a PlacedItem> {
    plan.items
        .iter()
        .filter(|i| (i.page, i.column) == (item.page, item.column) && i.is_drawable())
        .collect()
}

#[test]
fn test_oversized_first_row_stays_under_its_header() {
    let config = LayoutConfig {
        columns: 10,
        ..Default::default()
    };
    let huge = "lorem ".repeat(400);
    let doc = Document::new("Narrow")
        .with_config(config)
        .with_section(Section::new("Intro").with_entry("i", "short"))
        .with_section(
            Section::new("Words")
                .with_entry("b", huge)
                .with_entry("c", "after"),
        );

    let plan = plan(&doc).unwrap();
    let header = plan
        .items
        .iter()
        .find(|i| matches!(&i.kind, ItemKind::Header(h) if h.text == "Words"))
        .unwrap();
    let rows: Vec<&PlacedItem> = plan
        .items
        .iter()
        .filter(|i| i.as_row().is_some_and(|r| r.keys != "i"))
        .collect();
    let (big, after) = (rows[0], rows[1]);

    // The header moves to a fresh column and the oversized row follows it there
    assert_eq!(header.offset, 0.0);
    assert_eq!((big.page, big.column), (header.page, header.column));
    assert_eq!(big.offset, header.bottom());
    assert!(big.height > plan.geometry.column_height(big.page));
    assert_eq!(drawables_in_column(&plan, big).len(), 2);

    assert_ne!((after.page, after.column), (big.page, big.column));
    assert_eq!(after.offset, 0.0);
    assert_no_orphan_headings(&plan);
    assert_plan_ordered(&plan);
}

#[test]
fn test_oversized_first_row_stays_under_header_and_subheader() {
    let config = LayoutConfig {
        columns: 10,
        ..Default::default()
    };
    let huge = "lorem ".repeat(400);
    let doc = Document::new("Narrow").with_config(config).with_section(
        Section::new("Words")
            .with_subsection(Subsection::new(
                "Long",
                vec![HotkeyEntry::new("b", huge), HotkeyEntry::new("c", "after")],
            ))
            .with_entry("d", "last"),
    );

    let plan = plan(&doc).unwrap();
    let big = plan.items.iter().find(|i| i.as_row().is_some()).unwrap();
    let column = drawables_in_column(&plan, big);

    assert!(matches!(column[0].kind, ItemKind::Header(_)));
    assert!(matches!(column[1].kind, ItemKind::Subheader(_)));
    assert_eq!(column[2], big);
    assert_eq!(column.len(), 3);

    let following: Vec<&PlacedItem> = plan
        .items
        .iter()
        .filter(|i| i.as_row().is_some_and(|r| r.keys != "b"))
        .collect();
    assert_eq!(following.len(), 2);
    assert!(following.iter().all(|i| (i.page, i.column) != (big.page, big.column)));
    assert_no_orphan_headings(&plan);
    assert_plan_ordered(&plan);
}

#[test]
fn test_planning_is_deterministic() {
    for config in sample_configs() {
        let doc = editor_document(config);
        assert_eq!(plan(&doc).unwrap(), plan(&doc).unwrap());
    }
}

#[test]
fn test_estimate_matches_plan() {
    for config in sample_configs() {
        let doc = editor_document(config);
        let plan = plan(&doc).unwrap();
        let max_page = plan.items.iter().map(|i| i.page).max().unwrap();
        assert_eq!(estimate_pages(&doc).unwrap(), max_page + 1);
    }
}

#[test]
fn test_layout_invariants_hold() {
    for config in sample_configs() {
        let doc = editor_document(config);
        let plan = plan(&doc).unwrap();
        assert_plan_ordered(&plan);
        assert_no_orphan_headings(&plan);
        assert_pages_contiguous(&plan);
    }
}

#[test]
fn test_rows_fit_their_columns() {
    for config in sample_configs() {
        let doc = editor_document(config);
        let plan = plan(&doc).unwrap();
        for item in plan.items.iter().filter(|i| i.is_drawable()) {
            assert!(
                item.bottom() <= plan.geometry.column_height(item.page) + EPSILON,
                "item overflows its column: {item:?}"
            );
        }
    }
}

#[test]
fn test_rows_keep_source_order() {
    let doc = editor_document(LayoutConfig::default());
    let plan = plan(&doc).unwrap();

    let planned: Vec<&str> = plan.rows().map(|r| r.keys.as_str()).collect();
    let source: Vec<&str> = doc
        .sections
        .iter()
        .flat_map(|s| s.entries())
        .map(|e| e.keys.as_str())
        .collect();
    assert_eq!(planned, source);

    let headers: Vec<&str> = plan
        .items
        .iter()
        .filter_map(|i| match &i.kind {
            ItemKind::Header(heading) => Some(heading.text.as_str()),
            _ => None,
        })
        .collect();
    let names: Vec<&str> = doc.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(headers, names);
}

#[test]
fn test_wider_columns_never_add_lines() {
    let narrow = LayoutConfig {
        columns: 6,
        ..Default::default()
    };
    let wide = LayoutConfig {
        columns: 3,
        ..Default::default()
    };

    let narrow_plan = plan(&editor_document(narrow)).unwrap();
    let wide_plan = plan(&editor_document(wide)).unwrap();

    assert!(wide_plan.geometry.column_width > narrow_plan.geometry.column_width);
    for (w, n) in wide_plan.rows().zip(narrow_plan.rows()) {
        assert_eq!(w.keys, n.keys);
        assert!(w.line_count <= n.line_count);
    }
}

#[test]
fn test_first_page_loses_title_height() {
    let doc = Document::new("Big").with_section(Section {
        name: "Everything".to_string(),
        children: entries("k", 400)
            .into_iter()
            .map(SectionChild::Entry)
            .collect(),
    });
    let plan = plan(&doc).unwrap();
    assert!(plan.page_count() > 1);

    let rows_in = |page: usize, column: usize| {
        plan.items
            .iter()
            .filter(|i| i.page == page && i.column == column && i.as_row().is_some())
            .count()
    };
    // Column 0 of page 0 also carries the section header
    assert!(rows_in(1, 1) > rows_in(0, 1));
}

#[test]
fn test_subsection_heading_moves_with_its_first_row() {
    // Fill most of the first column, then start a subsection near the bottom
    let config = LayoutConfig::default();
    let geometry = PageGeometry::new(&config);
    let rows_that_fit = ((geometry.column_height(0) - geometry.header_height) / 14.0) as usize;

    let doc = Document::new("Sheet").with_config(config).with_section(
        Section::new("Long")
            .with_subsection(Subsection::new("First", entries("a", rows_that_fit - 2)))
            .with_subsection(Subsection::new("Second", entries("b", 4))),
    );
    let plan = plan(&doc).unwrap();

    let second = plan
        .items
        .iter()
        .find(|i| matches!(&i.kind, ItemKind::Subheader(h) if h.text == "Second"))
        .unwrap();
    assert_eq!(second.column, 1);
    assert_eq!(second.offset, 0.0);
    assert_no_orphan_headings(&plan);
}
