#![no_main]

use arbitrary::Arbitrary;
use fmtscan::{ArgStore, Cursor, LocaleRef, ScanOptions, SliceStream, UnicodeLocale, scan_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Style {
    Brace,
    Percent,
    Positional,
}

#[derive(Debug, Arbitrary)]
enum Target {
    I32(i32),
    U64(u64),
    F64(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

#[derive(Debug, Arbitrary)]
struct Case {
    style: Style,
    unicode: bool,
    format: String,
    input: Vec<u8>,
    targets: Vec<Target>,
}

fn run(mut case: Case) {
    let n = case.targets.len();
    let mut store = ArgStore::with_capacity(n);
    for target in &mut case.targets {
        match target {
            Target::I32(v) => store.push(v),
            Target::U64(v) => store.push(v),
            Target::F64(v) => store.push(v),
            Target::Bool(v) => store.push(v),
            Target::Char(v) => store.push(v),
            Target::Str(v) => store.push(v),
        };
    }

    let cursor = match case.style {
        Style::Brace => Cursor::brace(&case.format),
        Style::Percent => Cursor::percent(&case.format),
        Style::Positional => Cursor::positional(n),
    };
    let options = ScanOptions {
        locale: if case.unicode {
            LocaleRef::new(&UnicodeLocale)
        } else {
            LocaleRef::classic()
        },
        ..Default::default()
    };

    let mut stream = SliceStream::from_bytes(&case.input);
    let result = scan_with(&mut stream, cursor, &store, options);
    if let (Ok(scanned), Style::Positional) = (result, &case.style) {
        assert_eq!(scanned, n, "positional scan stopped early without an error");
    }
}

fuzz_target!(|case: Case| run(case));
