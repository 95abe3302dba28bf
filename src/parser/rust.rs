//! Annotated Rust source scanner.
//!
//! Builds type metadata from `#[api_*]` attributes in `.rs` files:
//! - attributes before `struct` / `enum` / `union` / `trait` → type annotations
//! - `fn` items inside `impl Type`, `impl Trait for Type` and trait bodies → methods
//! - attributes before a parameter → parameter annotations
//! - `#[api_return(..)]` on a method → return position annotations
//!
//! Comments, literals and function bodies are skipped, so nothing inside
//! them is mistaken for an item.

use super::annotation::{parse_attribute, Attribute};
use super::lex::{
    angle_len, balanced_len, is_ident_char, literal_len, split_top_level, strip_comments,
};
use super::merge;
use crate::metadata::{Annotations, MethodMetadata, ParamMetadata, TypeMetadata, Visibility};
use regex::Regex;
use std::sync::LazyLock;

static RE_RECEIVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&?\s*(?:'\w+\s+)?(?:mut\s+)?self$").unwrap());

static RE_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:ref\s+)?(?:mut\s+)?(\S.*)$").unwrap());

static RE_WHERE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\swhere\s").unwrap());

static RE_FOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\sfor\s").unwrap());

static RE_SELF_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:&\s*(?:'\w+\s+)?(?:mut\s+)?)?(?:dyn\s+)?((?:\w+::)*\w+)").unwrap()
});

/// Parse a Rust source file into type metadata, one entry per type name.
pub fn parse(input: &str) -> Vec<TypeMetadata> {
    let src = strip_comments(input);
    let mut scanner = Scanner::new(&src);
    while !scanner.at_end() {
        scanner.module_items();
    }
    merge::merge(scanner.types)
}

/// Attributes seen but not yet attached to an item.
#[derive(Default)]
struct Pending {
    item: Annotations,
    ret: Annotations,
}

impl Pending {
    fn clear(&mut self) {
        *self = Self::default();
    }
}

struct Scanner<'s> {
    src: &'s str,
    pos: usize,
    pending: Pending,
    types: Vec<TypeMetadata>,
}

impl<'s> Scanner<'s> {
    fn new(src: &'s str) -> Self {
        Self {
            src,
            pos: 0,
            pending: Pending::default(),
            types: Vec::new(),
        }
    }

    // -- Cursor ---------------------------------------------------------------

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn skip_balanced(&mut self) {
        self.pos += balanced_len(self.rest()).max(1);
    }

    fn skip_literal(&mut self) -> bool {
        match literal_len(self.rest()) {
            Some(n) => {
                self.pos += n;
                true
            }
            None => false,
        }
    }

    /// Identifier or keyword at the cursor (`r#` prefix dropped).
    fn word(&mut self) -> Option<&'s str> {
        let rest = self.rest();
        let (rest, prefix) = match rest.strip_prefix("r#") {
            Some(raw) => (raw, 2),
            None => (rest, 0),
        };
        if !rest.starts_with(|c: char| is_ident_char(c) && !c.is_ascii_digit()) {
            return None;
        }
        let len = rest
            .char_indices()
            .find(|&(_, c)| !is_ident_char(c))
            .map_or(rest.len(), |(i, _)| i);
        self.pos += prefix + len;
        Some(&rest[..len])
    }

    /// Advance to the `{` opening an item body (not consumed). Returns false
    /// when the item ends with `;` (consumed) or the input ends.
    fn seek_block(&mut self) -> bool {
        loop {
            if self.skip_literal() {
                continue;
            }
            match self.peek() {
                Some('{') => return true,
                Some(';') => {
                    self.bump();
                    return false;
                }
                Some('(' | '[') => self.skip_balanced(),
                Some(_) => self.bump(),
                None => return false,
            }
        }
    }

    /// Consume an attribute at the cursor into the pending set.
    fn attribute(&mut self) -> bool {
        let rest = self.rest();
        let open = if rest.starts_with("#[") {
            1
        } else if rest.starts_with("#![") {
            2
        } else {
            return false;
        };
        let len = balanced_len(&rest[open..]);
        self.pos += open + len;
        if open == 2 {
            // inner attributes describe the enclosing module
            return true;
        }
        match parse_attribute(group_inner(&rest[open..open + len])) {
            Attribute::Item(annotation) => self.pending.item.push(annotation),
            Attribute::Return(annotations) => self.pending.ret.extend(annotations.into()),
        }
        true
    }

    // -- Items ----------------------------------------------------------------

    /// Module-level items, until the end of input or the `}` closing the
    /// current block.
    fn module_items(&mut self) {
        loop {
            self.skip_ws();
            let Some(c) = self.peek() else { return };
            if c == '}' {
                self.bump();
                self.pending.clear();
                return;
            }
            if self.attribute() || self.skip_literal() {
                continue;
            }
            if let Some(word) = self.word() {
                match word {
                    "struct" | "enum" | "union" | "trait" => self.type_decl(word),
                    "impl" => self.impl_block(),
                    "fn" => {
                        // free function: not a method of any type
                        self.function();
                    }
                    _ => {}
                }
                continue;
            }
            match c {
                '{' => {
                    self.bump();
                    self.pending.clear();
                    self.module_items();
                }
                ';' => {
                    self.bump();
                    self.pending.clear();
                }
                '(' | '[' => self.skip_balanced(),
                _ => self.bump(),
            }
        }
    }

    fn type_decl(&mut self, kind: &str) {
        self.skip_ws();
        let Some(name) = self.word() else {
            self.pending.clear();
            return;
        };
        let mut ty = TypeMetadata::new(name);
        ty.annotations = std::mem::take(&mut self.pending.item);
        self.pending.clear();

        if self.seek_block() {
            if kind == "trait" {
                self.bump();
                ty.methods = self.body_items(true);
            } else {
                self.skip_balanced();
            }
        }
        self.types.push(ty);
    }

    fn impl_block(&mut self) {
        self.pending.clear();
        let start = self.pos;
        if !self.seek_block() {
            return;
        }
        let src = self.src;
        let header = &src[start..self.pos];
        let Some((name, trait_impl)) = impl_target(header) else {
            self.skip_balanced();
            return;
        };
        self.bump();
        let mut ty = TypeMetadata::new(name);
        ty.methods = self.body_items(trait_impl);
        self.types.push(ty);
    }

    /// Items of an `impl` or trait body, after its `{`, through the closing
    /// `}`. Methods of trait impls and trait bodies are always public.
    fn body_items(&mut self, always_public: bool) -> Vec<MethodMetadata> {
        let mut methods = Vec::new();
        let mut public = false;
        loop {
            self.skip_ws();
            let Some(c) = self.peek() else { break };
            if c == '}' {
                self.bump();
                break;
            }
            if self.attribute() || self.skip_literal() {
                continue;
            }
            if let Some(word) = self.word() {
                match word {
                    "pub" => {
                        self.skip_ws();
                        if self.peek() == Some('(') {
                            // pub(crate), pub(super), ... stay private
                            self.skip_balanced();
                        } else {
                            public = true;
                        }
                    }
                    "fn" => {
                        if let Some(mut method) = self.function() {
                            if public || always_public {
                                method.visibility = Visibility::Public;
                            }
                            methods.push(method);
                        }
                        public = false;
                    }
                    _ => {}
                }
                continue;
            }
            match c {
                ';' => {
                    self.bump();
                    self.pending.clear();
                    public = false;
                }
                '{' | '(' | '[' => self.skip_balanced(),
                _ => self.bump(),
            }
        }
        self.pending.clear();
        methods
    }

    /// A `fn` item after its keyword: name, generics, parameters, return
    /// type and body. Visibility defaults to private.
    fn function(&mut self) -> Option<MethodMetadata> {
        let annotations = std::mem::take(&mut self.pending.item);
        let return_annotations = std::mem::take(&mut self.pending.ret);

        self.skip_ws();
        let name = self.word()?;
        self.skip_ws();
        if self.peek() == Some('<') {
            self.pos += angle_len(self.rest());
            self.skip_ws();
        }
        if self.peek() != Some('(') {
            return None;
        }
        let rest = self.rest();
        let len = balanced_len(rest);
        self.pos += len;
        let params = parse_params(group_inner(&rest[..len]));

        if self.seek_block() {
            self.skip_balanced();
        }

        Some(MethodMetadata {
            name: name.to_string(),
            visibility: Visibility::Private,
            annotations,
            params,
            return_annotations,
        })
    }
}

/// Strip the outer bracket pair from a bracket group.
fn group_inner(group: &str) -> &str {
    let inner = group.strip_prefix(&['(', '[', '{'][..]).unwrap_or(group);
    inner.strip_suffix(&[')', ']', '}'][..]).unwrap_or(inner)
}

/// Self type of an impl header (text between `impl` and `{`), and whether
/// it is a trait impl.
fn impl_target(header: &str) -> Option<(String, bool)> {
    let mut header = header.trim_start();
    if header.starts_with('<') {
        header = header[angle_len(header)..].trim_start();
    }
    let header = match RE_WHERE.find(header) {
        Some(m) => &header[..m.start()],
        None => header,
    };
    let (self_ty, trait_impl) = match RE_FOR.find(header) {
        Some(m) => (&header[m.end()..], true),
        None => (header, false),
    };
    let caps = RE_SELF_TYPE.captures(self_ty.trim())?;
    let path = &caps[1];
    let name = path.rsplit("::").next().unwrap_or(path);
    Some((name.to_string(), trait_impl))
}

fn parse_params(src: &str) -> Vec<ParamMetadata> {
    split_top_level(src, ',')
        .into_iter()
        .filter_map(parse_param)
        .collect()
}

/// One parameter: leading attributes, then `pattern: Type`. The receiver
/// is not a parameter.
fn parse_param(chunk: &str) -> Option<ParamMetadata> {
    let mut rest = chunk.trim();
    let mut annotations = Annotations::new();
    while rest.starts_with("#[") {
        let len = balanced_len(&rest[1..]);
        if let Attribute::Item(annotation) = parse_attribute(group_inner(&rest[1..1 + len])) {
            annotations.push(annotation);
        }
        rest = rest[1 + len..].trim_start();
    }

    let parts = split_top_level(rest, ':');
    let pattern = parts.first()?.trim();
    if pattern.is_empty() || RE_RECEIVER.is_match(pattern) || parts.len() < 2 {
        return None;
    }
    let name = RE_BINDING
        .captures(pattern)
        .map_or(pattern, |caps| caps.get(1).map_or(pattern, |m| m.as_str()));

    Some(ParamMetadata {
        name: name.trim().to_string(),
        annotations,
    })
}
