//! # SVG Document Input
//!
//! Pulls path data out of a whole SVG document so it can be compiled
//! without hand-copying `d` attributes. Only two things are read:
//!
//! - the `d` attribute of every `<path>` element, in document order, with
//!   its `id` when present;
//! - the `viewBox` of the root `<svg>` element, which callers use as the
//!   source canvas size for rescaling.
//!
//! Everything else (styles, transforms, other shapes) is ignored.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::SvgError;

/// A parsed SVG viewBox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// One `<path>` element's data.
#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: Option<String>,
    pub d: String,
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SvgPaths {
    pub view_box: Option<ViewBox>,
    pub paths: Vec<PathElement>,
}

/// Parse a viewBox string like "0 0 100 100" or "0,0,24,24".
pub fn parse_view_box(s: &str) -> Option<ViewBox> {
    let parts: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse::<f64>().ok())
        .collect();
    if parts.len() == 4 {
        Some(ViewBox {
            min_x: parts[0],
            min_y: parts[1],
            width: parts[2],
            height: parts[3],
        })
    } else {
        None
    }
}

/// Collect every `<path d>` and the root viewBox from SVG XML content.
pub fn extract_paths(content: &str) -> Result<SvgPaths, SvgError> {
    let mut result = SvgPaths::default();
    let mut reader = Reader::from_str(content);
    let mut seen_root = false;

    let mut buf = Vec::new();

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Start(e) | Event::Empty(e) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"svg" if !seen_root => {
                        seen_root = true;
                        result.view_box = get_attr(e, "viewBox")?
                            .as_deref()
                            .and_then(parse_view_box);
                    }
                    b"path" => {
                        if let Some(d) = get_attr(e, "d")? {
                            let id = get_attr(e, "id")?;
                            result.paths.push(PathElement { id, d });
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    log::debug!(
        "extracted {} path elements (viewBox: {:?})",
        result.paths.len(),
        result.view_box
    );
    Ok(result)
}

/// Helper to get an attribute value from a quick-xml BytesStart.
fn get_attr(e: &BytesStart, name: &str) -> Result<Option<String>, SvgError> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec())
                .map(Some)
                .map_err(|_| SvgError::Encoding(name.to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_box() {
        let vb = parse_view_box("0 0 100 200").unwrap();
        assert!((vb.min_x - 0.0).abs() < 0.001);
        assert!((vb.width - 100.0).abs() < 0.001);
        assert!((vb.height - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_view_box_commas() {
        let vb = parse_view_box("-5,10, 24 ,48").unwrap();
        assert!((vb.min_x + 5.0).abs() < 0.001);
        assert!((vb.height - 48.0).abs() < 0.001);
    }

    #[test]
    fn test_parse_view_box_invalid() {
        assert!(parse_view_box("bad").is_none());
        assert!(parse_view_box("0 0 10").is_none());
    }

    #[test]
    fn test_extract_paths() {
        let doc = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
            <g fill="none">
                <path id="a" d="M 0 0 L 10 10"/>
                <rect x="1" y="1" width="2" height="2"/>
                <path d="M 5 5 h 2"></path>
            </g>
        </svg>"#;
        let found = extract_paths(doc).unwrap();
        assert_eq!(
            found.view_box,
            Some(ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: 24.0,
                height: 24.0,
            })
        );
        assert_eq!(found.paths.len(), 2);
        assert_eq!(found.paths[0].id.as_deref(), Some("a"));
        assert_eq!(found.paths[0].d, "M 0 0 L 10 10");
        assert_eq!(found.paths[1].id, None);
        assert_eq!(found.paths[1].d, "M 5 5 h 2");
    }

    #[test]
    fn test_extract_without_view_box() {
        let found = extract_paths(r#"<svg><path d="M1 1"/></svg>"#).unwrap();
        assert!(found.view_box.is_none());
        assert_eq!(found.paths.len(), 1);
    }

    #[test]
    fn test_path_without_d_is_skipped() {
        let found = extract_paths(r#"<svg><path id="x"/></svg>"#).unwrap();
        assert!(found.paths.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_paths("").unwrap(), SvgPaths::default());
    }

    #[test]
    fn test_mismatched_tags_are_an_error() {
        assert!(extract_paths("<svg><g></svg>").is_err());
    }
}
