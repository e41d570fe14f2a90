use alloc::string::String;

use rstest::rstest;

use super::*;
use crate::{
    args, error::ErrorKind, locale::LocaleRef, options::ScanOptions, spec::ScanSpec,
    stream::SliceStream,
};

fn scan_arg(arg: Arg<'_, '_>, input: &str) -> Result<()> {
    let options = ScanOptions::default();
    let mut stream = SliceStream::new(input);
    let mut cx = ScanCx {
        stream: &mut stream,
        locale: LocaleRef::classic(),
        options: &options,
    };
    arg.scan(&ScanSpec::default(), &mut cx)
}

#[test]
fn slots_record_type_and_name() {
    let mut n = 0u64;
    let mut s = String::new();
    let mut store = ArgStore::with_capacity(2);
    store.push(&mut n).push_named("s", &mut s);
    let args = store.args();
    assert_eq!(args.len(), 2);
    assert_eq!(args.get(0).arg_type(), Some(ArgType::U64));
    assert_eq!(args.get(0).name(), None);
    assert_eq!(args.get(1).arg_type(), Some(ArgType::String));
    assert_eq!(args.get(1).name(), Some("s"));
    assert!(args.get(2).is_empty());
    assert!(args.check_id(1));
    assert!(!args.check_id(2));
    assert_eq!(args.iter().count(), 2);
}

#[test]
fn handle_scans_into_caller_storage() {
    let mut n = 0i16;
    let store = args![&mut n];
    scan_arg(store.args().get(0), "-12").unwrap();
    drop(store);
    assert_eq!(n, -12);
}

#[test]
fn empty_handle_cannot_be_scanned() {
    let err = scan_arg(Arg::empty(), "1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(Arg::default().arg_type(), None);
}

#[test]
fn slot_in_use_reports_invalid_operation() {
    let mut n = 0u8;
    let store = args![&mut n];
    let _busy = store.slots[0].value.borrow_mut();
    let err = scan_arg(store.args().get(0), "1").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidOperation);
}

#[test]
fn named_arg_downcasts_to_its_own_type() {
    let mut port = 80u16;
    let named = arg("port", &mut port);
    assert_eq!(named.arg_type(), ArgType::U16);
    *named.downcast::<u16>().unwrap() = 8080;
    assert_eq!(port, 8080);
}

#[rstest]
#[case::signedness(arg_type_mismatch::<i16>())]
#[case::width(arg_type_mismatch::<u32>())]
#[case::custom(arg_type_mismatch::<Marker>())]
fn named_arg_downcast_mismatch(#[case] kind: ErrorKind) {
    assert_eq!(kind, ErrorKind::InvalidArgument);
}

fn arg_type_mismatch<T: 'static>() -> ErrorKind {
    let mut port = 0u16;
    arg("port", &mut port)
        .downcast::<T>()
        .map(|_| ())
        .unwrap_err()
        .kind()
}

#[derive(Debug, Default, PartialEq)]
struct Marker(char);

impl Scan for Marker {
    fn scan(&mut self, _spec: &ScanSpec, cx: &mut ScanCx<'_, '_>) -> Result<()> {
        self.0 = cx.read_char()?;
        Ok(())
    }
}

crate::scannable!(Marker);

#[test]
fn custom_targets_are_tagged_custom_and_downcast() {
    let mut m = Marker::default();
    let named = arg("m", &mut m);
    assert_eq!(named.arg_type(), ArgType::Custom);
    assert!(alloc::format!("{named:?}").contains("Marker"));
    let inner = named.downcast::<Marker>().unwrap();
    inner.0 = 'q';
    assert_eq!(m, Marker('q'));
}

#[test]
fn custom_target_scans_through_handle() {
    let mut m = Marker::default();
    let store = args![&mut m];
    assert_eq!(store.args().get(0).arg_type(), Some(ArgType::Custom));
    scan_arg(store.args().get(0), "z").unwrap();
    drop(store);
    assert_eq!(m, Marker('z'));
}

#[test]
fn arg_map_indexes_only_named_slots() {
    let (mut a, mut b, mut c) = (0u8, 0u8, 0u8);
    let store = args![&mut a, arg("b", &mut b), arg("c", &mut c)];
    let map = ArgMap::new(store.args()).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("c").name(), Some("c"));
    assert!(map.get("a").is_empty());
    assert_eq!(map.find("zz").unwrap_err().kind(), ErrorKind::InvalidArgument);
}

#[test]
fn arg_map_rejects_duplicates() {
    let (mut a, mut b) = (0u8, 0u8);
    let store = args![arg("x", &mut a), arg("x", &mut b)];
    let err = ArgMap::new(store.args()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[test]
fn empty_args_view() {
    let args = Args::empty();
    assert!(args.is_empty());
    assert!(args.get(0).is_empty());
    assert!(ArgMap::new(args).unwrap().is_empty());
}
