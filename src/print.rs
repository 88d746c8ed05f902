//! Deterministic pretty-printer for arbitrary values.
//!
//! Any type implementing `serde::Serialize` can be rendered to stable,
//! multi-line text. The output is meant for diffing, so it never contains
//! memory addresses or capacities, map keys are sorted, and every value
//! carries a short type label so that `1` and `"1"` never print alike.
//!
//! # Examples
//!
//! ```
//! use assay::print::render;
//!
//! let text = render(&vec!["a"]).unwrap();
//! assert_eq!(text, "(Vec<&str>) (len=1) {\n  (string) (len=1) \"a\"\n}\n");
//! ```

use crate::error::PrintError;
use serde::ser::{self, Serialize};
use std::any::type_name;
use std::cmp::Ordering;

/// Options for rendering values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintConfig {
    /// Indentation added for every nesting level
    pub indent: String,
    /// Sort map entries (and `HashSet` elements) by their rendering
    pub sort_keys: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            sort_keys: true,
        }
    }
}

/// Renders a value with the default configuration.
///
/// The result always ends with a newline.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, PrintError> {
    render_with(value, &PrintConfig::default())
}

/// Renders a value with an explicit configuration.
pub fn render_with<T: Serialize + ?Sized>(
    value: &T,
    config: &PrintConfig,
) -> Result<String, PrintError> {
    let printer = Printer {
        config,
        ty: strip_refs(type_name::<T>()),
    };
    let mut output = value.serialize(printer)?;
    output.push('\n');
    Ok(output)
}

/// Strips module paths from a type name.
///
/// `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub fn short_type_name(full: &str) -> String {
    let mut output = String::with_capacity(full.len());
    let mut segment_start = 0;
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            output.truncate(segment_start);
        } else {
            output.push(c);
            if !(c.is_alphanumeric() || c == '_') {
                segment_start = output.len();
            }
        }
    }

    output
}

/// Drops leading `&` and `&mut ` from a type name.
///
/// Serde hands container elements over by reference, so `Vec<HashSet<u8>>`
/// yields elements typed `&HashSet<u8>`; labels name the referent.
fn strip_refs(mut ty: &'static str) -> &'static str {
    while let Some(rest) = ty.strip_prefix('&') {
        ty = rest.strip_prefix("mut ").unwrap_or(rest);
    }
    ty
}

/// Serializer producing the text of a single value.
///
/// `ty` is the Rust type of the value being printed; it labels sequences,
/// maps, tuples and `None`, which serde does not name.
#[derive(Clone, Copy)]
struct Printer<'a> {
    config: &'a PrintConfig,
    ty: &'static str,
}

impl<'a> Printer<'a> {
    fn child(&self, ty: &'static str) -> Self {
        Self {
            config: self.config,
            ty: strip_refs(ty),
        }
    }

    fn label(&self) -> String {
        short_type_name(self.ty)
    }

    fn compound(self, header: String, kind: CompoundKind) -> Compound<'a> {
        Compound {
            printer: self,
            header,
            kind,
            entries: Vec::new(),
            pending_key: None,
        }
    }
}

macro_rules! print_primitive {
    ($($method:ident: $ty:ty => $kind:literal),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<String, PrintError> {
                Ok(format!(concat!("(", $kind, ") {}"), v))
            }
        )*
    };
}

impl<'a> ser::Serializer for Printer<'a> {
    type Ok = String;
    type Error = PrintError;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    print_primitive! {
        serialize_bool: bool => "bool",
        serialize_i8: i8 => "i8",
        serialize_i16: i16 => "i16",
        serialize_i32: i32 => "i32",
        serialize_i64: i64 => "i64",
        serialize_i128: i128 => "i128",
        serialize_u8: u8 => "u8",
        serialize_u16: u16 => "u16",
        serialize_u32: u32 => "u32",
        serialize_u64: u64 => "u64",
        serialize_u128: u128 => "u128",
    }

    fn serialize_f32(self, v: f32) -> Result<String, PrintError> {
        Ok(format!("(f32) {v:?}"))
    }

    fn serialize_f64(self, v: f64) -> Result<String, PrintError> {
        Ok(format!("(f64) {v:?}"))
    }

    fn serialize_char(self, v: char) -> Result<String, PrintError> {
        Ok(format!("(char) {v:?}"))
    }

    fn serialize_str(self, v: &str) -> Result<String, PrintError> {
        if !v.contains('\n') {
            return Ok(format!("(string) (len={}) {:?}", v.len(), v));
        }

        // Multi-line text prints one line per row so diffs stay line-based.
        let mut output = format!("(string) (len={}) \"\"\"", v.len());
        for line in v.split('\n') {
            output.push('\n');
            output.push_str(&self.config.indent);
            output.extend(line.escape_debug());
        }
        output.push_str("\n\"\"\"");
        Ok(output)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<String, PrintError> {
        let mut output = format!("(bytes) (len={})", v.len());
        for byte in v {
            output.push_str(&format!(" {byte:02x}"));
        }
        Ok(output)
    }

    fn serialize_none(self) -> Result<String, PrintError> {
        Ok(format!("({}) None", self.label()))
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<String, PrintError> {
        value.serialize(self.child(type_name::<T>()))
    }

    fn serialize_unit(self) -> Result<String, PrintError> {
        Ok("(unit) ()".to_string())
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<String, PrintError> {
        Ok(format!("({name}) {name}"))
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String, PrintError> {
        Ok(format!("({name}) {variant}"))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<String, PrintError> {
        let inner = value.serialize(self.child(type_name::<T>()))?;
        Ok(format!("({name}) {inner}"))
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<String, PrintError> {
        let inner = value.serialize(self.child(type_name::<T>()))?;
        Ok(format!("({name}::{variant}) {inner}"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Compound<'a>, PrintError> {
        let label = self.label();
        let unordered = self.config.sort_keys && label.starts_with("HashSet");
        Ok(self.compound(format!("({label})"), CompoundKind::Seq { unordered }))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Compound<'a>, PrintError> {
        let header = format!("({})", self.label());
        Ok(self.compound(header, CompoundKind::Tuple))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, PrintError> {
        Ok(self.compound(format!("({name})"), CompoundKind::Tuple))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, PrintError> {
        Ok(self.compound(format!("({name}::{variant})"), CompoundKind::Tuple))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Compound<'a>, PrintError> {
        let header = format!("({})", self.label());
        Ok(self.compound(header, CompoundKind::Map))
    }

    fn serialize_struct(
        self,
        name: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, PrintError> {
        Ok(self.compound(format!("({name})"), CompoundKind::Struct))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Compound<'a>, PrintError> {
        Ok(self.compound(format!("({name}::{variant})"), CompoundKind::Struct))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CompoundKind {
    Seq { unordered: bool },
    Tuple,
    Map,
    Struct,
}

struct Entry {
    key: Option<String>,
    value: String,
}

/// Collects the children of a sequence, tuple, map or struct.
struct Compound<'a> {
    printer: Printer<'a>,
    header: String,
    kind: CompoundKind,
    entries: Vec<Entry>,
    pending_key: Option<String>,
}

impl<'a> Compound<'a> {
    fn push_value<T: ?Sized + Serialize>(
        &mut self,
        key: Option<String>,
        value: &T,
    ) -> Result<(), PrintError> {
        let value = value.serialize(self.printer.child(type_name::<T>()))?;
        self.entries.push(Entry { key, value });
        Ok(())
    }

    fn finish(mut self) -> String {
        let sort_keys = self.printer.config.sort_keys;
        match self.kind {
            CompoundKind::Seq { unordered } => {
                self.header = format!("{} (len={})", self.header, self.entries.len());
                if unordered {
                    self.entries.sort_by(|a, b| compare_rendered(&a.value, &b.value));
                }
            }
            CompoundKind::Map => {
                self.header = format!("{} (len={})", self.header, self.entries.len());
                if sort_keys {
                    self.entries.sort_by(|a, b| {
                        let (a, b) = (a.key.as_deref(), b.key.as_deref());
                        compare_rendered(a.unwrap_or_default(), b.unwrap_or_default())
                    });
                }
            }
            CompoundKind::Tuple | CompoundKind::Struct => {}
        }

        if self.entries.is_empty() {
            return format!("{} {{}}", self.header);
        }

        let indent = &self.printer.config.indent;
        let mut output = self.header;
        output.push_str(" {");
        for entry in &self.entries {
            let line = match &entry.key {
                Some(key) => format!("{key}: {}", entry.value),
                None => entry.value.clone(),
            };
            output.push('\n');
            output.push_str(&indent_lines(&line, indent));
        }
        output.push_str("\n}");
        output
    }
}

/// Orders two renderings by their value text, ignoring type labels.
///
/// Numeric values compare numerically; ties fall back to the full text so
/// the order is total.
fn compare_rendered(a: &str, b: &str) -> Ordering {
    let (bare_a, bare_b) = (strip_labels(a), strip_labels(b));
    let by_value = match (bare_a.parse::<f64>(), bare_b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.total_cmp(&y),
        _ => bare_a.cmp(bare_b),
    };
    by_value.then_with(|| a.cmp(b))
}

/// Drops the leading `(...) ` groups of a rendering.
fn strip_labels(rendered: &str) -> &str {
    let mut rest = rendered;
    while rest.starts_with('(') {
        let mut depth = 0usize;
        let mut end = None;
        for (i, c) in rest.char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        end = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        match end {
            Some(i) if rest[i + 1..].starts_with(' ') => rest = &rest[i + 2..],
            _ => break,
        }
    }
    rest
}

/// Prefixes every line of `text` with `indent`.
fn indent_lines(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ser::SerializeSeq for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PrintError> {
        self.push_value(None, value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PrintError> {
        self.push_value(None, value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PrintError> {
        self.push_value(None, value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PrintError> {
        self.push_value(None, value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), PrintError> {
        self.pending_key = Some(key.serialize(self.printer.child(type_name::<T>()))?);
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), PrintError> {
        let key = self.pending_key.take().ok_or(PrintError::ValueWithoutKey)?;
        self.push_value(Some(key), value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PrintError> {
        self.push_value(Some(key.to_string()), value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for Compound<'_> {
    type Ok = String;
    type Error = PrintError;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PrintError> {
        self.push_value(Some(key.to_string()), value)
    }

    fn end(self) -> Result<String, PrintError> {
        Ok(self.finish())
    }
}
