#![no_main]

use brisk_syntax::diagnostics::{SourceFile, format_error};
use brisk_syntax::{lexer, parser};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        let result = lexer::lex(s).and_then(|tokens| parser::parse(&tokens));
        // Rendering must cope with any span the front end reports.
        if let Err(err) = result {
            let _ = format_error(&SourceFile::new("fuzz.bk", s), &err);
        }
    }
});
