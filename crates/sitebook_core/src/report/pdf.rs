//! Minimal PDF 1.4 serializer for laid-out report pages.
//!
//! # Invariants
//! - Output depends only on the input pages: no creation date, document id
//!   or producer string is written.
//! - Content streams are uncompressed.
//! - Text is encoded as WinAnsi via `win_ansi_byte`; unmappable characters
//!   become `?`.

use crate::report::layout::{Color, DrawOp, Page, PAGE_HEIGHT, PAGE_WIDTH};
use crate::report::metrics::{win_ansi_byte, Font};
use std::io::{self, Write};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FIRST_FONT_ID: usize = 3;
const FIRST_PAGE_ID: usize = FIRST_FONT_ID + Font::ALL.len();

/// Serializes pages into a complete PDF document.
pub fn write_document(pages: &[Page]) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut offsets = Vec::new();

    out.write_all(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n")?;

    let kids = (0..pages.len())
        .map(|index| format!("{} 0 R", page_object_id(index)))
        .collect::<Vec<_>>()
        .join(" ");

    begin_object(&mut out, &mut offsets, CATALOG_ID)?;
    writeln!(out, "<< /Type /Catalog /Pages {PAGES_ID} 0 R >>\nendobj")?;

    begin_object(&mut out, &mut offsets, PAGES_ID)?;
    writeln!(
        out,
        "<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj",
        pages.len()
    )?;

    for (index, font) in Font::ALL.iter().enumerate() {
        begin_object(&mut out, &mut offsets, FIRST_FONT_ID + index)?;
        writeln!(
            out,
            "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>\nendobj",
            font.base_font()
        )?;
    }

    let font_resources = Font::ALL
        .iter()
        .enumerate()
        .map(|(index, font)| format!("/{} {} 0 R", font.resource_name(), FIRST_FONT_ID + index))
        .collect::<Vec<_>>()
        .join(" ");

    for (index, page) in pages.iter().enumerate() {
        let page_id = page_object_id(index);
        let content_id = page_id + 1;

        begin_object(&mut out, &mut offsets, page_id)?;
        writeln!(
            out,
            "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << {font_resources} >> >> /Contents {content_id} 0 R >>\nendobj",
            number(PAGE_WIDTH),
            number(PAGE_HEIGHT)
        )?;

        let content = content_stream(page)?;
        begin_object(&mut out, &mut offsets, content_id)?;
        writeln!(out, "<< /Length {} >>\nstream", content.len())?;
        out.write_all(&content)?;
        out.write_all(b"\nendstream\nendobj\n")?;
    }

    let xref_offset = out.len();
    writeln!(out, "xref\n0 {}", offsets.len() + 1)?;
    out.write_all(b"0000000000 65535 f \n")?;
    for offset in &offsets {
        writeln!(out, "{offset:010} 00000 n ")?;
    }
    writeln!(
        out,
        "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{xref_offset}\n%%EOF",
        offsets.len() + 1
    )?;

    Ok(out)
}

fn page_object_id(page_index: usize) -> usize {
    FIRST_PAGE_ID + page_index * 2
}

fn begin_object(out: &mut Vec<u8>, offsets: &mut Vec<usize>, id: usize) -> io::Result<()> {
    debug_assert_eq!(offsets.len() + 1, id, "objects must be written in id order");
    offsets.push(out.len());
    writeln!(out, "{id} 0 obj")
}

fn content_stream(page: &Page) -> io::Result<Vec<u8>> {
    let mut stream = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                write!(
                    stream,
                    "BT /{} {} Tf {} rg {} {} Td (",
                    font.resource_name(),
                    number(*size),
                    rgb(*color),
                    number(*x),
                    number(*y)
                )?;
                stream.extend_from_slice(&encode_text(text));
                stream.extend_from_slice(b") Tj ET\n");
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                writeln!(
                    stream,
                    "{} rg {} {} {} {} re f",
                    rgb(*color),
                    number(*x),
                    number(*y),
                    number(*width),
                    number(*height)
                )?;
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                width,
                color,
            } => {
                writeln!(
                    stream,
                    "{} RG {} w {} {} m {} {} l S",
                    rgb(*color),
                    number(*width),
                    number(*x1),
                    number(*y),
                    number(*x2),
                    number(*y)
                )?;
            }
        }
    }
    Ok(stream)
}

/// Formats a coordinate with two decimals, trimming trailing zeros.
fn number(value: f32) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

fn rgb(color: Color) -> String {
    format!(
        "{} {} {}",
        number(color.r),
        number(color.g),
        number(color.b)
    )
}

/// Encodes text as a WinAnsi literal-string body (without parentheses).
pub fn encode_text(text: &str) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(text.len());
    for byte in text.chars().map(win_ansi_byte) {
        match byte {
            b'(' | b')' | b'\\' => encoded.extend_from_slice(&[b'\\', byte]),
            0x20..=0x7E => encoded.push(byte),
            _ => encoded.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::{encode_text, number, write_document};
    use crate::report::layout::Page;

    #[test]
    fn number_trims_trailing_zeros() {
        assert_eq!(number(12.0), "12");
        assert_eq!(number(12.5), "12.5");
        assert_eq!(number(0.4196), "0.42");
        assert_eq!(number(-0.001), "0");
    }

    #[test]
    fn encode_text_escapes_delimiters_and_maps_latin1() {
        assert_eq!(encode_text("a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
        assert_eq!(encode_text("caf\u{e9}"), b"caf\\351".to_vec());
        assert_eq!(encode_text("\u{2603}"), b"?".to_vec());
    }

    #[test]
    fn encode_text_maps_typographic_punctuation_to_win_ansi() {
        assert_eq!(
            encode_text("It\u{2019}s \u{2013} \u{20AC}5 \u{2022} done\u{2026}"),
            b"It\\222s \\226 \\2005 \\225 done\\205".to_vec()
        );
        assert_eq!(encode_text("\u{201C}ok\u{201D}"), b"\\223ok\\224".to_vec());
    }

    #[test]
    fn document_has_header_xref_and_trailer() {
        let bytes = write_document(&[Page::default()]).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.contains("/Type /Catalog"));
        assert!(text.contains("/Count 1"));
        assert!(text.contains("/BaseFont /Helvetica "));
        assert!(text.contains("/BaseFont /Helvetica-Bold "));
        assert!(text.contains("xref\n0 7\n"));
        assert!(text.ends_with("%%EOF\n"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = write_document(&[Page::default(), Page::default()]).unwrap();
        let xref_start = bytes
            .windows(5)
            .rposition(|window| window == b"xref\n")
            .unwrap();
        let xref = std::str::from_utf8(&bytes[xref_start..]).unwrap();
        let entries = xref
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "));
        let mut checked = 0;
        for (index, entry) in entries.enumerate() {
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", index + 1);
            assert!(
                bytes[offset..].starts_with(expected.as_bytes()),
                "bad offset for {expected}"
            );
            checked += 1;
        }
        assert_eq!(checked, 8);
    }
}
