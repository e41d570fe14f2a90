//! Parses a few access-log lines with named directives; lines that do not
//! match are reported on stderr.
#![allow(missing_docs)]

use fmtscan::{SliceStream, arg, args, scan};

const LOG: &str = "\
GET /index.html 200 512
POST /api/items 201 64
GET /missing 404 0
BROKEN line
";

fn main() {
    for (lineno, line) in LOG.lines().enumerate() {
        let mut method = String::new();
        let mut path = String::new();
        let mut status = 0u16;
        let mut bytes = 0u64;
        let mut input = SliceStream::new(line);
        let result = scan(
            &mut input,
            "{method} {path} {status} {bytes}",
            &args![
                arg("method", &mut method),
                arg("path", &mut path),
                arg("status", &mut status),
                arg("bytes", &mut bytes),
            ],
        );
        match result {
            Ok(_) => println!("{method:6} {path:20} {status} {bytes:>6}B"),
            Err(e) => eprintln!("line {}: {e}", lineno + 1),
        }
    }
}
