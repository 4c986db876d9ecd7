//! Recursive-descent directive parser (spec.md §4.2).
//!
//! Reads one directive per logical line from a `Scanner`, collects its
//! attributes into a small map, validates the required-attribute set for
//! that directive, and appends a raw record to the `RawDatabase`. Any
//! syntactic error recovers at the next end-of-line; any directive that
//! fails its semantic checks is dropped (not inserted), its error already
//! reported.

use fnv::FnvHashMap;

use crate::database::LoadOptions;
use crate::diag::{Diagnostic, DiagnosticCollector, Severity};
use crate::entity::{LineType, ScopeType, SymbolType};
use crate::ids::INVALID;
use crate::raw::{
    FileVersion, InfoCounts, RawDatabase, RawFile, RawLibrary, RawLine, RawModule, RawScope,
    RawSegment, RawSpan, RawSymbol,
};
use crate::scanner::{Keyword, Scanner, Token, TokenKind};

const SUPPORTED_MAJOR: u32 = 2;
const SUPPORTED_MINOR: u32 = 0;

/// One parsed attribute value, still untyped with respect to its owning
/// directive (the per-directive builder below interprets it).
#[derive(Debug, Clone)]
enum AttrValue {
    Int(u64),
    Str(String),
    Keyword(Keyword),
    Ident(String),
    IdList(Vec<u32>),
}

impl AttrValue {
    fn as_u64(&self) -> Option<u64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Any bare identifier, keyword or not, rendered as text. Used for
    /// fields the core records but does not validate (spec.md §9).
    fn as_text(&self) -> Option<String> {
        match self {
            AttrValue::Keyword(kw) => Some(kw.text().to_string()),
            AttrValue::Ident(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn as_id_list(&self) -> Option<Vec<u32>> {
        match self {
            AttrValue::IdList(v) => Some(v.clone()),
            AttrValue::Int(v) => Some(vec![*v as u32]),
            _ => None,
        }
    }

    fn as_single_id(&self) -> Option<u32> {
        match self {
            AttrValue::Int(v) => Some(*v as u32),
            _ => None,
        }
    }
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    file_name: String,
    peeked: Option<Token>,
    version_seen: bool,
    fatal: bool,
    options: LoadOptions,
}

impl<'a> Parser<'a> {
    pub fn new(file_name: impl Into<String>, input: &'a [u8], options: LoadOptions) -> Self {
        let file_name = file_name.into();
        Parser {
            scanner: Scanner::new(file_name.clone(), input, options.log_tokens),
            file_name,
            peeked: None,
            version_seen: false,
            fatal: false,
            options,
        }
    }

    fn next(&mut self, diags: &mut DiagnosticCollector<'_>) -> Token {
        if let Some(tok) = self.peeked.take() {
            return tok;
        }
        self.scanner.next_token(diags)
    }

    fn err(&self, diags: &mut DiagnosticCollector<'_>, tok: &Token, message: impl Into<String>) {
        diags.emit(Diagnostic::new(
            Severity::Error,
            self.file_name.clone(),
            tok.line,
            tok.column,
            message,
            "",
        ));
    }

    fn warn(&self, diags: &mut DiagnosticCollector<'_>, tok: &Token, message: impl Into<String>) {
        diags.emit(Diagnostic::new(
            Severity::Warning,
            self.file_name.clone(),
            tok.line,
            tok.column,
            message,
            "",
        ));
    }

    /// Consumes tokens through (and including) the next end-of-line, the
    /// error-recovery boundary used throughout spec.md §4.2.
    fn skip_to_eol(&mut self, diags: &mut DiagnosticCollector<'_>) {
        loop {
            match self.next(diags).kind {
                TokenKind::Eol | TokenKind::Eof => break,
                _ => continue,
            }
        }
    }

    /// Parses the full input into a `RawDatabase`. The returned error count
    /// tracking lives in `diags`; callers decide what a non-zero count
    /// means (spec.md §7: the whole load fails).
    pub fn parse(mut self, diags: &mut DiagnosticCollector<'_>) -> RawDatabase {
        let mut db = RawDatabase::default();
        loop {
            if self.fatal {
                break;
            }
            let tok = self.next(diags);
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Eol => continue,
                TokenKind::Keyword(kw) if is_directive_keyword(kw) => {
                    self.check_version_first(diags, kw, &tok);
                    self.parse_directive(kw, &tok, &mut db, diags);
                }
                TokenKind::Keyword(kw) => {
                    self.check_version_first(diags, kw, &tok);
                    self.warn(diags, &tok, format!("unknown directive `{}`", kw.text()));
                    self.skip_to_eol(diags);
                }
                TokenKind::Ident(ref name) => {
                    let name = name.clone();
                    self.version_seen_guard(diags, &tok);
                    self.warn(diags, &tok, format!("unknown directive `{}`", name));
                    self.skip_to_eol(diags);
                }
                _ => {
                    self.version_seen_guard(diags, &tok);
                    self.err(diags, &tok, "expected a directive keyword");
                    self.skip_to_eol(diags);
                }
            }
        }
        db
    }

    fn check_version_first(&mut self, diags: &mut DiagnosticCollector<'_>, kw: Keyword, tok: &Token) {
        if !self.version_seen && kw != Keyword::Version {
            self.err(diags, tok, "the first directive in the file must be `version`");
        }
        self.version_seen = true;
    }

    fn version_seen_guard(&mut self, diags: &mut DiagnosticCollector<'_>, tok: &Token) {
        if !self.version_seen {
            self.err(diags, tok, "the first directive in the file must be `version`");
        }
        self.version_seen = true;
    }

    /// Reads `attr=value[, attr=value]* EOL`, returning the collected
    /// attributes, or `None` if the directive was malformed and already
    /// skipped to EOL.
    fn parse_attrs(
        &mut self,
        diags: &mut DiagnosticCollector<'_>,
    ) -> Option<FnvHashMap<Keyword, AttrValue>> {
        let mut attrs: FnvHashMap<Keyword, AttrValue> = FnvHashMap::default();
        loop {
            let name_tok = self.next(diags);
            let key = match name_tok.kind {
                TokenKind::Eol | TokenKind::Eof => return Some(attrs),
                TokenKind::Keyword(kw) => Some(kw),
                TokenKind::Ident(ref s) => {
                    let name = s.clone();
                    // Unknown attribute: forward-compatibility skip.
                    let eq = self.next(diags);
                    if eq.kind == TokenKind::Equals {
                        self.warn(
                            diags,
                            &name_tok,
                            format!("unknown attribute `{}`, skipped", name),
                        );
                        self.skip_value(diags);
                        match self.next(diags).kind {
                            TokenKind::Comma => continue,
                            TokenKind::Eol | TokenKind::Eof => return Some(attrs),
                            _ => {
                                self.err(diags, &name_tok, "extra tokens on line");
                                self.skip_to_eol(diags);
                                return None;
                            }
                        }
                    } else {
                        self.warn(
                            diags,
                            &name_tok,
                            format!("unknown attribute `{}`, skipped", name),
                        );
                        self.skip_to_eol(diags);
                        return None;
                    }
                }
                _ => {
                    self.err(diags, &name_tok, "expected an attribute name");
                    self.skip_to_eol(diags);
                    return None;
                }
            };
            let key = key.unwrap();

            let eq = self.next(diags);
            if eq.kind != TokenKind::Equals {
                self.err(diags, &eq, "expected `=` after attribute name");
                self.skip_to_eol(diags);
                return None;
            }

            let value = match self.parse_value(diags) {
                Some(v) => v,
                None => {
                    self.skip_to_eol(diags);
                    return None;
                }
            };

            if attrs.contains_key(&key) {
                self.warn(
                    diags,
                    &name_tok,
                    format!("attribute `{}` repeated, using the last value", key.text()),
                );
            }
            attrs.insert(key, value);

            match self.next(diags).kind {
                TokenKind::Comma => continue,
                TokenKind::Eol | TokenKind::Eof => return Some(attrs),
                _ => {
                    self.err(diags, &name_tok, "extra tokens on line, expected `,` or end of line");
                    self.skip_to_eol(diags);
                    return None;
                }
            }
        }
    }

    /// Parses one attribute value: an integer (possibly the start of a
    /// `N+N+N` id list), a string, or a bare identifier/keyword.
    fn parse_value(&mut self, diags: &mut DiagnosticCollector<'_>) -> Option<AttrValue> {
        let tok = self.next(diags);
        match tok.kind {
            TokenKind::Int(v, _) => {
                let mut list = vec![v as u32];
                loop {
                    let peeked = self.next(diags);
                    if peeked.kind == TokenKind::Plus {
                        let next_tok = self.next(diags);
                        match next_tok.kind {
                            TokenKind::Int(v2, _) => list.push(v2 as u32),
                            _ => {
                                self.err(diags, &next_tok, "expected integer after `+`");
                                return None;
                            }
                        }
                    } else {
                        self.peeked = Some(peeked);
                        break;
                    }
                }
                if list.len() > 1 {
                    Some(AttrValue::IdList(list))
                } else {
                    Some(AttrValue::Int(v))
                }
            }
            TokenKind::Str(s) => Some(AttrValue::Str(s)),
            TokenKind::Keyword(kw) => Some(AttrValue::Keyword(kw)),
            TokenKind::Ident(s) => Some(AttrValue::Ident(s)),
            _ => {
                self.err(diags, &tok, "expected a value");
                None
            }
        }
    }

    /// Consumes one (unexamined) value for an unknown attribute.
    fn skip_value(&mut self, diags: &mut DiagnosticCollector<'_>) {
        let _ = self.parse_value(diags);
    }

    fn parse_directive(
        &mut self,
        kw: Keyword,
        start_tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        let attrs = match self.parse_attrs(diags) {
            Some(a) => a,
            None => return,
        };

        match kw {
            Keyword::Version => self.handle_version(&attrs, start_tok, diags),
            Keyword::Info => self.handle_info(&attrs, db),
            Keyword::File => self.handle_file(&attrs, start_tok, db, diags),
            Keyword::Library => self.handle_library(&attrs, start_tok, db, diags),
            Keyword::Module => self.handle_module(&attrs, start_tok, db, diags),
            Keyword::Scope => self.handle_scope(&attrs, start_tok, db, diags),
            Keyword::Segment => self.handle_segment(&attrs, start_tok, db, diags),
            Keyword::Span => self.handle_span(&attrs, start_tok, db, diags),
            Keyword::Line => self.handle_line(&attrs, start_tok, db, diags),
            Keyword::Sym => self.handle_sym(&attrs, start_tok, db, diags),
            _ => unreachable!("not a directive keyword"),
        }
    }

    fn handle_version(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        let major = attrs.get(&Keyword::Major).and_then(AttrValue::as_u64);
        let minor = attrs.get(&Keyword::Minor).and_then(AttrValue::as_u64);
        let (major, minor) = match (major, minor) {
            (Some(maj), Some(min)) => (maj as u32, min as u32),
            _ => {
                self.err(diags, tok, "`version` requires `major` and `minor`");
                return;
            }
        };

        if major < SUPPORTED_MAJOR {
            self.err(
                diags,
                tok,
                format!(
                    "file format version {}.{} is older than the oldest supported major version {}; format obsolete",
                    major, minor, SUPPORTED_MAJOR
                ),
            );
            self.fatal = true;
        } else if major == SUPPORTED_MAJOR && minor > SUPPORTED_MINOR {
            self.err(
                diags,
                tok,
                format!(
                    "file format version {}.{} is newer than supported {}.{}",
                    major, minor, SUPPORTED_MAJOR, SUPPORTED_MINOR
                ),
            );
        } else if major > SUPPORTED_MAJOR {
            self.warn(
                diags,
                tok,
                format!(
                    "file format major version {} is newer than supported {}; proceeding at risk",
                    major, SUPPORTED_MAJOR
                ),
            );
        }
    }

    fn handle_info(&mut self, attrs: &FnvHashMap<Keyword, AttrValue>, db: &mut RawDatabase) {
        let get = |k: Keyword| attrs.get(&k).and_then(AttrValue::as_u64).map(|v| v as usize);
        let info = InfoCounts {
            file: get(Keyword::File),
            line: get(Keyword::Line),
            module: get(Keyword::Mod),
            scope: get(Keyword::Scope),
            segment: get(Keyword::Seg),
            span: get(Keyword::Span),
            symbol: get(Keyword::Sym),
            library: get(Keyword::Lib),
        };
        if self.options.info_capacity_hints {
            if let Some(n) = info.file {
                db.files.reserve(n);
            }
            if let Some(n) = info.line {
                db.lines.reserve(n);
            }
            if let Some(n) = info.module {
                db.modules.reserve(n);
            }
            if let Some(n) = info.scope {
                db.scopes.reserve(n);
            }
            if let Some(n) = info.segment {
                db.segments.reserve(n);
            }
            if let Some(n) = info.span {
                db.spans.reserve(n);
            }
            if let Some(n) = info.symbol {
                db.symbols.reserve(n);
            }
            if let Some(n) = info.library {
                db.libraries.reserve(n);
            }
        }
        db.info = info;
    }

    fn handle_file(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::Name, Keyword::Size, Keyword::Mtime, Keyword::Mod], "file", self, tok, diags) {
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawFile {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
            size: attrs[&Keyword::Size].as_u64().unwrap_or(0),
            mtime: attrs[&Keyword::Mtime].as_u64().unwrap_or(0),
            // `mod` is a set per spec.md §3, so it takes the same
            // `id+id+...` list grammar as `scope.span`/`line.span`.
            module: attrs[&Keyword::Mod].as_id_list().unwrap_or_default(),
        };
        if db.files.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `file` id {}, overwriting", id));
        }
    }

    fn handle_library(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::Name], "library", self, tok, diags) {
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawLibrary {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
        };
        if db.libraries.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `library` id {}, overwriting", id));
        }
    }

    fn handle_module(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::Name, Keyword::File], "module", self, tok, diags) {
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawModule {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
            file: attrs[&Keyword::File].as_single_id().unwrap_or(INVALID),
            library: attrs.get(&Keyword::Lib).and_then(AttrValue::as_single_id),
        };
        if db.modules.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `module` id {}, overwriting", id));
        }
    }

    fn handle_scope(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::Name, Keyword::Mod], "scope", self, tok, diags) {
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let ty = match attrs.get(&Keyword::Type) {
            None => ScopeType::Scope,
            Some(AttrValue::Keyword(Keyword::Global)) => ScopeType::Global,
            Some(AttrValue::Keyword(Keyword::File)) => ScopeType::Module,
            Some(AttrValue::Keyword(Keyword::Scope)) => ScopeType::Scope,
            Some(AttrValue::Keyword(Keyword::Struct)) => ScopeType::Struct,
            Some(AttrValue::Keyword(Keyword::Enum)) => ScopeType::Enum,
            Some(_) => {
                self.err(diags, tok, "invalid `scope.type` value");
                return;
            }
        };
        let record = RawScope {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
            ty,
            size: attrs.get(&Keyword::Size).and_then(AttrValue::as_u64).unwrap_or(0),
            module: attrs[&Keyword::Mod].as_single_id().unwrap_or(INVALID),
            parent: attrs.get(&Keyword::Parent).and_then(AttrValue::as_single_id),
            label: attrs.get(&Keyword::Lab).and_then(AttrValue::as_single_id),
            spans: attrs.get(&Keyword::Span).and_then(AttrValue::as_id_list).unwrap_or_default(),
        };
        if db.scopes.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `scope` id {}, overwriting", id));
        }
    }

    fn handle_segment(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(
            attrs,
            &[Keyword::Id, Keyword::Name, Keyword::Start, Keyword::Size, Keyword::Addrsize, Keyword::Type],
            "segment",
            self,
            tok,
            diags,
        ) {
            return;
        }
        let oname = attrs.get(&Keyword::Oname).and_then(AttrValue::as_str).map(|s| s.to_string());
        let ooffs = attrs.get(&Keyword::Ooffs).and_then(AttrValue::as_u64);
        if oname.is_some() != ooffs.is_some() {
            self.err(diags, tok, "`oname` and `ooffs` must both be present or both absent");
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawSegment {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
            start: attrs[&Keyword::Start].as_u64().unwrap_or(0),
            size: attrs[&Keyword::Size].as_u64().unwrap_or(0),
            addrsize: attrs[&Keyword::Addrsize].as_text().unwrap_or_default(),
            kind: attrs[&Keyword::Type].as_text().unwrap_or_default(),
            output_name: oname,
            output_offset: ooffs,
        };
        if db.segments.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `segment` id {}, overwriting", id));
        }
    }

    fn handle_span(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::Seg, Keyword::Start, Keyword::Size], "span", self, tok, diags) {
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawSpan {
            id,
            segment: attrs[&Keyword::Seg].as_single_id().unwrap_or(INVALID),
            start: attrs[&Keyword::Start].as_u64().unwrap_or(0),
            size: attrs[&Keyword::Size].as_u64().unwrap_or(0),
        };
        if db.spans.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `span` id {}, overwriting", id));
        }
    }

    fn handle_line(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(attrs, &[Keyword::Id, Keyword::File, Keyword::Line], "line", self, tok, diags) {
            return;
        }
        let ty = match attrs.get(&Keyword::Type).and_then(AttrValue::as_text) {
            None => LineType::Assembly,
            Some(ref s) if s == "asm" => LineType::Assembly,
            Some(ref s) if s == "c" => LineType::C,
            Some(ref s) if s == "macro" => LineType::Macro,
            Some(_) => {
                self.err(diags, tok, "invalid `line.type` value");
                return;
            }
        };
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawLine {
            id,
            file: attrs[&Keyword::File].as_single_id().unwrap_or(INVALID),
            line: attrs[&Keyword::Line].as_u64().unwrap_or(0) as u32,
            ty,
            count: attrs.get(&Keyword::Count).and_then(AttrValue::as_u64).unwrap_or(0) as u32,
            spans: attrs.get(&Keyword::Span).and_then(AttrValue::as_id_list).unwrap_or_default(),
        };
        if db.lines.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `line` id {}, overwriting", id));
        }
    }

    fn handle_sym(
        &mut self,
        attrs: &FnvHashMap<Keyword, AttrValue>,
        tok: &Token,
        db: &mut RawDatabase,
        diags: &mut DiagnosticCollector<'_>,
    ) {
        if !require(
            attrs,
            &[Keyword::Id, Keyword::Name, Keyword::Type, Keyword::Val, Keyword::Addrsize],
            "sym",
            self,
            tok,
            diags,
        ) {
            return;
        }
        let ty = match attrs.get(&Keyword::Type) {
            Some(AttrValue::Keyword(Keyword::Equ)) => SymbolType::Equate,
            Some(AttrValue::Keyword(Keyword::Lab)) => SymbolType::Label,
            _ => {
                self.err(diags, tok, "invalid `sym.type` value, expected `equ` or `lab`");
                return;
            }
        };
        let scope = attrs.get(&Keyword::Scope).and_then(AttrValue::as_single_id);
        let parent = attrs.get(&Keyword::Parent).and_then(AttrValue::as_single_id);
        if scope.is_some() == parent.is_some() {
            self.err(diags, tok, "`sym` requires exactly one of `scope` or `parent`");
            return;
        }
        let id = attrs[&Keyword::Id].as_single_id().unwrap();
        let record = RawSymbol {
            id,
            name: attrs[&Keyword::Name].as_str().unwrap_or_default().to_string(),
            ty,
            value: attrs[&Keyword::Val].as_u64().unwrap_or(0) as i64,
            size: attrs.get(&Keyword::Size).and_then(AttrValue::as_u64).unwrap_or(0),
            addrsize: attrs[&Keyword::Addrsize].as_text().unwrap_or_default(),
            segment: attrs.get(&Keyword::Seg).and_then(AttrValue::as_single_id),
            scope,
            parent,
        };
        if db.symbols.insert(id, record).is_some() {
            self.warn(diags, tok, format!("duplicate `sym` id {}, overwriting", id));
        }
    }
}

fn is_directive_keyword(kw: Keyword) -> bool {
    matches!(
        kw,
        Keyword::Version
            | Keyword::Info
            | Keyword::File
            | Keyword::Library
            | Keyword::Line
            | Keyword::Module
            | Keyword::Scope
            | Keyword::Segment
            | Keyword::Span
            | Keyword::Sym
    )
}

/// Checks that every key in `required` is present in `attrs`; emits a
/// missing-required-attribute error and returns `false` (the record must
/// be dropped) otherwise.
fn require(
    attrs: &FnvHashMap<Keyword, AttrValue>,
    required: &[Keyword],
    directive: &str,
    parser: &Parser<'_>,
    tok: &Token,
    diags: &mut DiagnosticCollector<'_>,
) -> bool {
    let missing: Vec<&str> = required
        .iter()
        .filter(|k| !attrs.contains_key(k))
        .map(|k| k.text())
        .collect();
    if missing.is_empty() {
        true
    } else {
        parser.err(
            diags,
            tok,
            format!("`{}` is missing required attribute(s): {}", directive, missing.join(", ")),
        );
        false
    }
}
