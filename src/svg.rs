//! Extraction of `<path d="...">` data from SVG frame files
//!
//! Frame files are produced by bitmap tracers and contain one or more
//! `<path>` elements. Only their `d` attributes are of interest; everything
//! else in the document is skipped.

use thiserror::Error;

/// Error type for SVG scanning failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SvgError {
    /// A `d` attribute was opened but never closed
    #[error("unterminated d attribute in <path> element at byte {0}")]
    UnterminatedAttribute(usize),
}

/// Return the `d` attribute of every `<path>` element, in document order.
///
/// Elements without a `d` attribute are skipped.
///
/// # Examples
///
/// ```
/// use svg2clip::svg::path_data;
///
/// let svg = r#"<svg><g><path d="M10 10 l5 5z"/><path d='M0 0 l1 1'/></g></svg>"#;
/// assert_eq!(path_data(svg).unwrap(), vec!["M10 10 l5 5z", "M0 0 l1 1"]);
/// ```
///
/// # Errors
///
/// Returns `SvgError::UnterminatedAttribute` if a `d` value has no closing quote.
pub fn path_data(svg: &str) -> Result<Vec<&str>, SvgError> {
    let mut data = Vec::new();
    let mut offset = 0;

    while let Some(found) = svg[offset..].find("<path") {
        let start = offset + found + "<path".len();
        offset = start;

        // Reject longer tag names such as <pathology>
        match svg[start..].chars().next() {
            Some(c) if c.is_whitespace() || c == '/' || c == '>' => {}
            _ => continue,
        }

        let Some((value_start, quote)) = find_d_attribute(svg, start) else {
            continue;
        };
        let value_end = svg[value_start..]
            .find(quote)
            .map(|i| value_start + i)
            .ok_or(SvgError::UnterminatedAttribute(value_start))?;

        data.push(&svg[value_start..value_end]);
        offset = value_end + 1;
    }

    Ok(data)
}

/// Locate the value of a `d` attribute inside the element starting at `start`.
///
/// Returns the byte index of the first value character and the quote used.
fn find_d_attribute(svg: &str, start: usize) -> Option<(usize, char)> {
    let tag_end = tag_end(svg, start);
    let bytes = svg.as_bytes();
    let mut i = start;

    while i < tag_end {
        let quoted = bytes[i] == b'"' || bytes[i] == b'\'';
        if quoted {
            // Skip over other attribute values
            let quote = bytes[i];
            i += 1;
            while i < tag_end && bytes[i] != quote {
                i += 1;
            }
            i += 1;
            continue;
        }

        let boundary = i > 0 && bytes[i - 1].is_ascii_whitespace();
        if bytes[i] == b'd' && boundary {
            let mut j = i + 1;
            while j < tag_end && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < tag_end && bytes[j] == b'=' {
                j += 1;
                while j < tag_end && bytes[j].is_ascii_whitespace() {
                    j += 1;
                }
                if j < svg.len() && (bytes[j] == b'"' || bytes[j] == b'\'') {
                    return Some((j + 1, char::from(bytes[j])));
                }
            }
        }
        i += 1;
    }

    None
}

/// Byte index of the `>` closing the tag that starts at `start`.
///
/// A `>` inside a quoted attribute value does not end the tag.
fn tag_end(svg: &str, start: usize) -> usize {
    let mut quote = None;
    for (i, b) in svg.bytes().enumerate().skip(start) {
        match (quote, b) {
            (None, b'"' | b'\'') => quote = Some(b),
            (None, b'>') => return i,
            (Some(q), _) if q == b => quote = None,
            _ => {}
        }
    }
    svg.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRACED_FRAME: &str = r##"<?xml version="1.0" standalone="no"?>
<svg version="1.0" xmlns="http://www.w3.org/2000/svg"
 width="14400" height="10800" viewBox="0 0 14400 10800"
 preserveAspectRatio="xMidYMid meet">
<g transform="translate(0,10800) scale(1,-1)"
fill="#000000" stroke="none">
<path d="M2810 10763 c-13 -5 -40 -20 -60 -34 l-5 -20 z"/>
</g>
</svg>"##;

    #[test]
    fn test_traced_frame() {
        let data = path_data(TRACED_FRAME).unwrap();
        assert_eq!(data, vec!["M2810 10763 c-13 -5 -40 -20 -60 -34 l-5 -20 z"]);
    }

    #[test]
    fn test_multiline_path_data() {
        let svg = "<path d=\"M10 10\nl5 5\nl1 1z\"/>";
        assert_eq!(path_data(svg).unwrap(), vec!["M10 10\nl5 5\nl1 1z"]);
    }

    #[test]
    fn test_d_after_other_attributes() {
        let svg = r##"<path fill="#000" id="d" d = "M1 2"/>"##;
        assert_eq!(path_data(svg).unwrap(), vec!["M1 2"]);
    }

    #[test]
    fn test_angle_bracket_in_attribute_value() {
        let svg = r#"<path title="a>b" d="M1 1 l1 1"/><path data-x='>' d="M2 2"/>"#;
        assert_eq!(path_data(svg).unwrap(), vec!["M1 1 l1 1", "M2 2"]);
    }

    #[test]
    fn test_path_without_d_is_skipped() {
        let svg = r#"<path fill="none"/><path d="M0 0"/>"#;
        assert_eq!(path_data(svg).unwrap(), vec!["M0 0"]);
    }

    #[test]
    fn test_similar_tag_names_ignored() {
        let svg = r#"<pathology d="M9 9"/><path d="M1 1"/>"#;
        assert_eq!(path_data(svg).unwrap(), vec!["M1 1"]);
    }

    #[test]
    fn test_no_paths() {
        assert!(path_data("<svg></svg>").unwrap().is_empty());
    }

    #[test]
    fn test_unterminated_attribute() {
        let result = path_data(r#"<path d="M0 0 l1 1"#);
        assert!(matches!(result, Err(SvgError::UnterminatedAttribute(_))));
    }
}
