//! DICOM data dumping library
//!
//! This is a helper library
//! for dumping the contents of DICOM objects
//! in a human readable way,
//! one line per element:
//!
//! ```text
//! (0010,0010) PN PatientName                  [8] Doe^John
//! ```
//!
//! Nested items are indented,
//! and the diagnostics of a read follow the element tree.
//!
//! # Example
//!
//! ```no_run
//! use dcmtree_object::open_file;
//! use dcmtree_dump::{ColorMode, DumpOptions};
//!
//! let outcome = open_file("path/to/file.dcm");
//! let mut options = DumpOptions::new();
//! options
//!     .width(100)
//!     .color_mode(ColorMode::Never)
//!     .dump_outcome(&outcome)?;
//! # Result::<(), Box<dyn std::error::Error>>::Ok(())
//! ```
use dcmtree_core::{Tag, VR};
use dcmtree_object::{DataElement, Diagnostic, DicomObject, Item, Node, NodeId, ReadOutcome};
use owo_colors::*;
use std::fmt::{self, Display, Formatter};
use std::io::{stdout, Result as IoResult, Write};
use std::str::FromStr;

/// How many bytes of a bulk value are shown.
const BULK_PREVIEW: usize = 16;

/// Options and flags to configure how to dump a DICOM object.
#[derive(Debug, Default, Clone, PartialEq)]
#[non_exhaustive]
pub struct DumpOptions {
    /// whether to produce colored output
    pub color: ColorMode,
    /// the console width to assume when trimming long values
    pub width: Option<u32>,
    /// never trim out any values
    pub no_limit: bool,
}

impl DumpOptions {
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the maximum output width in number of characters.
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    /// Set whether to remove the maximum width restriction.
    pub fn no_limit(&mut self, no_limit: bool) -> &mut Self {
        self.no_limit = no_limit;
        self
    }

    /// Set the output color mode.
    pub fn color_mode(&mut self, color: ColorMode) -> &mut Self {
        self.color = color;
        self
    }

    /// Dump a read outcome to standard output:
    /// the element tree, then the diagnostics.
    pub fn dump_outcome(&self, outcome: &ReadOutcome) -> IoResult<()> {
        self.set_colors(true);
        self.dump_outcome_impl(&mut stdout().lock(), outcome)
    }

    /// Dump a read outcome to the given writer.
    pub fn dump_outcome_to(&self, mut to: impl Write, outcome: &ReadOutcome) -> IoResult<()> {
        self.set_colors(false);
        self.dump_outcome_impl(&mut to, outcome)
    }

    fn dump_outcome_impl<W: Write>(&self, to: &mut W, outcome: &ReadOutcome) -> IoResult<()> {
        self.dump_node(to, &outcome.object, outcome.object.root(), 0)?;
        if !outcome.diagnostics.is_empty() {
            writeln!(to, "{:-<58}", "")?;
            dump_diagnostics(to, &outcome.diagnostics)?;
        }
        Ok(())
    }

    /// Dump the element tree of an object to the given writer.
    pub fn dump_object_to(&self, mut to: impl Write, obj: &DicomObject) -> IoResult<()> {
        self.set_colors(false);
        self.dump_node(&mut to, obj, obj.root(), 0)
    }

    fn set_colors(&self, to_stdout: bool) {
        match (self.color, to_stdout) {
            (ColorMode::Never, _) => owo_colors::set_override(false),
            (ColorMode::Always, _) => owo_colors::set_override(true),
            (ColorMode::Auto, false) => owo_colors::set_override(false),
            (ColorMode::Auto, true) => owo_colors::unset_override(),
        }
    }

    fn value_width(&self, depth: usize) -> Option<usize> {
        if self.no_limit {
            return None;
        }
        let width = self.width.unwrap_or(120) as usize;
        Some(width.saturating_sub(52 + depth * 2).max(8))
    }

    /// Dump the children of a node, one line each.
    fn dump_node<W: Write>(&self, to: &mut W, obj: &DicomObject, id: NodeId, depth: usize) -> IoResult<()> {
        for child in obj.children(id) {
            match obj.get(child) {
                Some(Node::Element(elem)) => self.dump_element(to, elem, depth)?,
                Some(Node::Sequence(seq)) => {
                    let count = obj.child_count(child);
                    let length = format_length(seq.length().get());
                    let label = if seq.is_encapsulated() {
                        format!("(PixelSequence, {} fragment{})", count, plural(count))
                    } else {
                        format!("({} Item{})", count, plural(count))
                    };
                    indent(to, depth)?;
                    writeln!(
                        to,
                        "{} {} {:28} [{}] {}",
                        DumpValue::TagNum(seq.tag()),
                        seq.vr(),
                        DumpValue::Alias(display_name(seq.name())),
                        length,
                        label,
                    )?;
                    for (index, item) in obj.items(child).enumerate() {
                        self.dump_item(to, obj, item, index, depth + 1)?;
                    }
                }
                // items only appear under sequences
                Some(Node::Item(_)) | Some(Node::Root) | None => {}
            }
        }
        Ok(())
    }

    fn dump_item<W: Write>(
        &self,
        to: &mut W,
        obj: &DicomObject,
        id: NodeId,
        index: usize,
        depth: usize,
    ) -> IoResult<()> {
        let Some(item) = obj.get(id).and_then(Node::as_item) else {
            return Ok(());
        };
        indent(to, depth)?;
        match item.payload() {
            Some(payload) => writeln!(
                to,
                "{} Fragment #{} [{}] {}",
                DumpValue::TagNum(Tag::ITEM),
                index,
                payload.len(),
                DumpValue::Num(hex_summary(payload, self.value_width(depth))),
            ),
            None => {
                writeln!(
                    to,
                    "{} Item #{} [{}]",
                    DumpValue::TagNum(Tag::ITEM),
                    index,
                    format_length(Item::length(item).get()),
                )?;
                self.dump_node(to, obj, id, depth + 1)
            }
        }
    }

    fn dump_element<W: Write>(&self, to: &mut W, elem: &DataElement, depth: usize) -> IoResult<()> {
        indent(to, depth)?;
        let width = self.value_width(depth);
        let value = if elem.vr().is_bulk() {
            DumpValue::Num(hex_summary(elem.bin(), width))
        } else {
            match elem.to_str() {
                Ok(s) if s.is_empty() => DumpValue::Nothing,
                Ok(s) if is_numeric(elem.vr()) => DumpValue::Num(cut(s, width)),
                Ok(s) => DumpValue::Str(cut(s, width)),
                Err(e) => DumpValue::Invalid(e.to_string()),
            }
        };
        writeln!(
            to,
            "{} {} {:28} [{}] {}",
            DumpValue::TagNum(elem.tag()),
            elem.vr(),
            DumpValue::Alias(display_name(elem.name())),
            elem.bin().len(),
            value,
        )
    }
}

/// Print a list of diagnostics, one per line.
pub fn dump_diagnostics<W: ?Sized + Write>(to: &mut W, diagnostics: &[Diagnostic]) -> IoResult<()> {
    for d in diagnostics {
        if d.is_fatal() {
            writeln!(to, "{} {}", "[ERROR]".if_supports_color(Stream::Stdout, |v| v.red()), d)?;
        } else {
            writeln!(to, "{} {}", "[WARN]".if_supports_color(Stream::Stdout, |v| v.yellow()), d)?;
        }
    }
    Ok(())
}

/// Print the sizes of the segments of an encoded object.
pub fn dump_segments<W: ?Sized + Write>(to: &mut W, max: usize, segments: &[Vec<u8>]) -> IoResult<()> {
    let total: usize = segments.iter().map(Vec::len).sum();
    writeln!(
        to,
        "{} bytes in {} segment{} of at most {} bytes",
        total,
        segments.len(),
        plural(segments.len()),
        max
    )?;
    for (i, segment) in segments.iter().enumerate() {
        writeln!(to, "  #{:<4} {:>8} bytes", i, segment.len())?;
    }
    Ok(())
}

/// Enumeration of output coloring modes.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub enum ColorMode {
    /// Produce colored output if supported by the destination
    /// (namely, if the destination is a terminal).
    /// When dumping to a writer, the output is not colored.
    ///
    /// This is the default behavior.
    #[default]
    Auto,
    /// Never produce colored output.
    Never,
    /// Always produce colored output.
    Always,
}

impl Display for ColorMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ColorMode::Never => f.write_str("never"),
            ColorMode::Auto => f.write_str("auto"),
            ColorMode::Always => f.write_str("always"),
        }
    }
}

impl FromStr for ColorMode {
    type Err = ColorModeError;
    fn from_str(color: &str) -> Result<Self, Self::Err> {
        match color {
            "never" => Ok(ColorMode::Never),
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            _ => Err(ColorModeError),
        }
    }
}

/// The error raised when providing an invalid color mode.
#[derive(Debug, Default, Copy, Clone, Eq, Hash, PartialEq)]
pub struct ColorModeError;

impl Display for ColorModeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("invalid color mode")
    }
}

impl std::error::Error for ColorModeError {}

#[derive(Clone, Debug, PartialEq, Eq)]
enum DumpValue<T> {
    TagNum(T),
    Alias(T),
    Num(T),
    Str(T),
    Invalid(T),
    Nothing,
}

impl<T> Display for DumpValue<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        fn write_value_with_width(value: impl Display, f: &mut Formatter) -> fmt::Result {
            if let Some(width) = f.width() {
                write!(f, "{:width$}", value, width = width)
            } else {
                write!(f, "{}", value)
            }
        }

        match self {
            DumpValue::TagNum(v) => {
                let value = v.if_supports_color(Stream::Stdout, |v| v.dimmed());
                write_value_with_width(value, f)
            }
            DumpValue::Alias(v) => {
                let value = v.if_supports_color(Stream::Stdout, |v| v.bold());
                write_value_with_width(value, f)
            }
            DumpValue::Num(v) => {
                let value = v.if_supports_color(Stream::Stdout, |v| v.cyan());
                write_value_with_width(value, f)
            }
            DumpValue::Str(v) => {
                let value = v.if_supports_color(Stream::Stdout, |v| v.yellow());
                write_value_with_width(value, f)
            }
            DumpValue::Invalid(v) => {
                let value = v.if_supports_color(Stream::Stdout, |v| v.red());
                write_value_with_width(value, f)
            }
            DumpValue::Nothing => {
                let value = "(no value)".if_supports_color(Stream::Stdout, |v| v.italic());
                write_value_with_width(value, f)
            }
        }
    }
}

fn indent<W: ?Sized + Write>(to: &mut W, depth: usize) -> IoResult<()> {
    write!(to, "{:width$}", "", width = depth * 2)
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

fn display_name(name: &str) -> &str {
    if name.is_empty() {
        "«Unknown Attribute»"
    } else {
        name
    }
}

fn format_length(len: Option<u32>) -> String {
    match len {
        Some(len) => len.to_string(),
        None => "u/l".to_string(),
    }
}

fn is_numeric(vr: VR) -> bool {
    matches!(
        vr,
        VR::US | VR::SS | VR::UL | VR::SL | VR::UV | VR::SV | VR::FL | VR::FD | VR::DS | VR::IS
    )
}

/// Cut a text value to fit the given width, marking the cut with `…`.
fn cut(text: String, width: Option<usize>) -> String {
    match width {
        Some(width) if text.chars().count() > width => {
            let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
            out.push('…');
            out
        }
        _ => text,
    }
}

/// Show the first bytes of a bulk value in hexadecimal.
fn hex_summary(bytes: &[u8], width: Option<usize>) -> String {
    let shown = if width.is_some() {
        &bytes[..bytes.len().min(BULK_PREVIEW)]
    } else {
        bytes
    };
    let mut out = shown
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");
    if shown.len() < bytes.len() {
        out.push_str(" …");
    }
    cut(out, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dcmtree_dictionary_std::tags;
    use dcmtree_object::{Reader, Sequence, WriteOptions, Writer};

    fn sample() -> DicomObject {
        let mut obj = DicomObject::new();
        obj.put(DataElement::new(tags::PATIENT_NAME, VR::PN, "Doe^John").unwrap())
            .unwrap();
        obj.put(DataElement::new(tags::ROWS, VR::US, 512_u16).unwrap())
            .unwrap();
        let seq = obj
            .put(Sequence::new(tags::REFERENCED_IMAGE_SEQUENCE).with_name("ReferencedImageSequence"))
            .unwrap();
        let item = obj.add_item(seq, None, None).unwrap();
        obj.add(item, DataElement::new(tags::REFERENCED_SOP_INSTANCE_UID, VR::UI, "1.2.3").unwrap())
            .unwrap();
        obj
    }

    #[test]
    fn dumps_one_line_per_node() {
        let mut out = Vec::new();
        DumpOptions::new()
            .color_mode(ColorMode::Never)
            .dump_object_to(&mut out, &sample())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("(0008,1140) SQ ReferencedImageSequence"));
        assert!(lines[0].ends_with("[u/l] (1 Item)"));
        assert!(lines[1].starts_with("  (FFFE,E000) Item #0 [u/l]"));
        assert!(lines[2].starts_with("    (0008,1155) UI"));
        assert!(lines[2].ends_with("[6] 1.2.3"));
        assert!(lines[3].contains("[8] Doe^John"));
        assert!(lines[4].ends_with("[2] 512"));
    }

    #[test]
    fn outcome_lists_diagnostics() {
        let writer = Writer::new().with_options(WriteOptions::new().without_signature());
        let bytes = writer.to_bytes(&sample()).output;
        let outcome = Reader::new().read(&bytes);
        let mut out = Vec::new();
        DumpOptions::new()
            .dump_outcome_to(&mut out, &outcome)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("PatientName"));
        assert!(text.contains("[WARN] No DICM signature found"));
    }

    #[test]
    fn long_values_are_cut() {
        assert_eq!(cut("ABCDEFGHIJ".to_string(), Some(5)), "ABCD…");
        assert_eq!(cut("ABC".to_string(), Some(5)), "ABC");
        assert_eq!(hex_summary(&[0xDE, 0xAD], None), "DE AD");
        assert_eq!(hex_summary(&[0; 20], Some(200)).matches("00").count(), 16);
    }

    #[test]
    fn segment_report() {
        let mut out = Vec::new();
        dump_segments(&mut out, 64, &[vec![0; 64], vec![0; 10]]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("74 bytes in 2 segments of at most 64 bytes"));
    }
}
