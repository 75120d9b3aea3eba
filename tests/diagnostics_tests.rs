//! Diagnostic rendering for errors produced by real parses.

use brisk::diagnostics::format_error;
use brisk::{ErrorKind, SourceFile, parse_source};

fn render(name: &str, text: &str) -> String {
    let source = SourceFile::new(name, text);
    let err = parse_source(&source.text).unwrap_err();
    format_error(&source, &err)
}

#[test]
fn test_missing_type_annotation_frame() {
    insta::assert_snapshot!(render("main.bk", "var x = 1;"), @r"
    +-----------------------------+
    | syntax error at main.bk:1:7 |
    +-----------------------------+
     1 | var x [=] 1;
       |        ^
       = Expected ':' after variable name, found '='
    ");
}

#[test]
fn test_frame_points_at_later_line() {
    let rendered = render("lib.bk", "fn f() {\n    switch (x) { default -> { } default -> { } }\n}\n");
    let header = rendered.lines().nth(1).unwrap();
    assert!(header.starts_with("| semantic error at lib.bk:2:"), "{rendered}");
    assert!(rendered.contains(" 2 |     switch (x)"), "{rendered}");
}

#[test]
fn test_miette_report_carries_code_and_source() {
    let source = SourceFile::new("main.bk", "let x: i32 = (1 + 2;");
    let err = parse_source(&source.text).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ImbalancedClosure);

    let report = err.to_report(&source);
    assert_eq!(
        report.code().map(|c| c.to_string()).as_deref(),
        Some("brisk::parse::imbalanced_closure")
    );
    assert!(report.help().is_some());
    assert!(report.source_code().is_some());
}
