//! Black-box end-to-end scenarios (spec.md §8, S1-S6) against
//! `Database::load_bytes`. No on-disk fixtures: the core's only I/O
//! dependency is a byte slice, so every scenario is an inline literal.

use assert_matches::assert_matches;

use dbginfo65::{Database, LoadError, LoadOptions};

fn load(src: &str) -> Result<Database, LoadError> {
    let mut sink = |_: &dbginfo65::Diagnostic| {};
    Database::load_bytes("scenario.dbg", src.as_bytes(), LoadOptions::default(), &mut sink)
}

/// S1 — minimal file: load succeeds, every listing is empty.
#[test]
fn s1_minimal_file() {
    let src = "version major=2,minor=0\n\
               info file=0,line=0,mod=0,scope=0,seg=0,span=0,sym=0,lib=0\n";
    let db = load(src).expect("minimal file should load");
    let q = db.query();
    assert_eq!(q.list_files().len(), 0);
    assert_eq!(q.list_modules().len(), 0);
    assert_eq!(q.list_segments().len(), 0);
    assert_eq!(q.list_spans().len(), 0);
    assert_eq!(q.list_symbols().len(), 0);
}

/// S2 — segment + span + address query, including the exactly-at-boundary
/// behaviour of testable property 12.
#[test]
fn s2_segment_span_address_query() {
    let src = "version major=2,minor=0\n\
               seg id=0,name=\"CODE\",start=0x1000,size=0x100,addrsize=abs,type=rw\n\
               span id=0,seg=0,start=0,size=16\n";
    let db = load(src).expect("segment+span file should load");
    let q = db.query();

    let at_start = q.spans_by_address(0x1000);
    assert_eq!(at_start.len(), 1);
    assert_eq!(at_start[0].start, 0x1000);
    assert_eq!(at_start[0].end, 0x100F);

    assert!(q.spans_by_address(0x0FFF).is_empty());
    assert_eq!(q.spans_by_address(0x100F).len(), 1);
    assert!(q.spans_by_address(0x1010).is_empty());
}

/// S3 — overlapping spans preserve start order in the covering set.
#[test]
fn s3_overlapping_spans_preserve_start_order() {
    let src = "version major=2,minor=0\n\
               seg id=0,name=\"CODE\",start=0,size=0x100,addrsize=abs,type=rw\n\
               span id=0,seg=0,start=0x2000,size=16\n\
               span id=1,seg=0,start=0x2008,size=16\n";
    let db = load(src).expect("overlapping spans should load");
    let q = db.query();

    let shared = q.spans_by_address(0x2008);
    assert_eq!(shared.len(), 2);
    assert_eq!(shared[0].id, 0);
    assert_eq!(shared[1].id, 1);

    let tail = q.spans_by_address(0x2010);
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].id, 1);
}

/// S4 — symbol lookup by name and by value range.
#[test]
fn s4_symbol_lookup_by_name_and_value() {
    let src = "version major=2,minor=0\n\
               module id=0,name=\"m\",file=0\n\
               scope id=0,name=\"main\",mod=0\n\
               sym id=0,name=\"foo\",type=lab,val=5,addrsize=abs,scope=0\n\
               sym id=1,name=\"foo\",type=lab,val=9,addrsize=abs,scope=0\n\
               file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
    let db = load(src).expect("symbol file should load");
    let q = db.query();

    let by_name = q.symbols_by_name("foo");
    assert_eq!(by_name.len(), 2);
    assert_eq!(by_name[0].id, 0);
    assert_eq!(by_name[1].id, 1);

    assert_eq!(q.symbols_in_range(5, 9).len(), 2);
    assert!(q.symbols_in_range(6, 8).is_empty());
}

/// S5 — an obsolete major version fails the whole load with a fatal
/// diagnostic and no usable handle.
#[test]
fn s5_version_rejection() {
    let src = "version major=1,minor=0\n";
    let err = load(src).expect_err("obsolete version must fail the load");
    assert_matches!(err, LoadError::FailedWithDiagnostics { errors, .. } if errors > 0);
}

/// S6 — a symbol with only `parent` set inherits its effective scope from
/// the parent's chain.
#[test]
fn s6_symbol_scope_inheritance() {
    let src = "version major=2,minor=0\n\
               module id=0,name=\"m\",file=0\n\
               scope id=0,name=\"main\",mod=0\n\
               sym id=0,name=\"p\",type=lab,val=1,addrsize=abs,scope=0\n\
               sym id=1,name=\"c\",type=lab,val=2,addrsize=abs,parent=0\n\
               file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
    let db = load(src).expect("scope inheritance file should load");
    let q = db.query();

    let child = q.symbol_by_id(1).expect("symbol 1 should resolve");
    assert_eq!(child.scope, Some(0));
}

/// Testable property 10: an empty-body file (just `version`) loads and
/// every listing is empty, independent of an `info` line being present.
#[test]
fn boundary_empty_file_without_info() {
    let db = load("version major=2,minor=0\n").expect("bare version-only file should load");
    let q = db.query();
    assert_eq!(q.list_files().len(), 0);
    assert_eq!(q.list_symbols().len(), 0);
}

/// Testable property 11: unknown directive/attribute keywords warn but do
/// not fail the load.
#[test]
fn boundary_unknown_directive_and_attribute_warn_only() {
    let src = "version major=2,minor=0\n\
               totallynewdirective foo=1\n\
               seg id=0,name=\"CODE\",start=0,size=0x10,addrsize=abs,type=rw,bogus=123\n";
    let db = load(src).expect("unknown directive/attribute should only warn");
    assert_eq!(db.query().list_segments().len(), 1);
    assert!(db.warning_count() >= 2);
}

/// Testable property 3 / invariant check: a symbol with neither `scope`
/// nor a parent chain leading to one is a load error, not a silent gap.
#[test]
fn symbol_without_effective_scope_is_an_error() {
    let src = "version major=2,minor=0\n\
               module id=0,name=\"m\",file=0\n\
               scope id=0,name=\"main\",mod=0\n\
               sym id=0,name=\"orphan\",type=equ,val=1,addrsize=abs,parent=999\n\
               file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
    let err = load(src).expect_err("symbol with a dangling parent chain must fail the load");
    assert_matches!(err, LoadError::FailedWithDiagnostics { errors, .. } if errors > 0);
}

/// Loading the same bytes twice yields pairwise identical query results
/// (testable property 7), restricted to the deterministic parts of the
/// public surface (ids, names, counts, orderings).
#[test]
fn reloading_same_bytes_is_deterministic() {
    let src = "version major=2,minor=0\n\
               module id=0,name=\"m\",file=0\n\
               scope id=0,name=\"main\",mod=0\n\
               sym id=0,name=\"foo\",type=lab,val=5,addrsize=abs,scope=0\n\
               file id=0,name=\"a.s\",size=1,mtime=1,mod=0\n";
    let a = load(src).unwrap();
    let b = load(src).unwrap();
    let (qa, qb) = (a.query(), b.query());
    assert_eq!(qa.list_files(), qb.list_files());
    assert_eq!(qa.list_symbols(), qb.list_symbols());
    assert_eq!(qa.list_modules(), qb.list_modules());
}
