/**
 * Multipart Body Decoder
 *
 * Turns a raw `multipart/form-data` request body into ordered form fields
 * and file parts.
 *
 * # State Machine
 *
 * ```text
 * SeekBoundary ──► ReadHeaders ──► ReadBody ──┐
 *      ▲   │             │                    │
 *      │   └──► End      └── malformed ───────┤
 *      └──────────────────────────────────────┘
 * ```
 *
 * - **SeekBoundary** finds the next `--boundary` line. `--boundary--` ends
 *   the body.
 * - **ReadHeaders** needs a blank line before the next delimiter and a
 *   `Content-Disposition` with a `name`. Anything else is a malformed part:
 *   it is counted, skipped, and decoding carries on from the next delimiter.
 * - **ReadBody** takes everything up to the next `CRLF --boundary`. A part
 *   with no closing delimiter is malformed and ends decoding.
 *
 * Line breaks are `CRLF` on the wire, but a bare `LF` is accepted in the
 * same places (delimiter lines, header lines, before a delimiter) so that
 * hand-built bodies decode the same way.
 *
 * Payloads are `Bytes` slices of the request body, so no part is copied.
 */
use crate::shared::SharedError;
use bytes::Bytes;

/// Longest boundary RFC 2046 allows
const MAX_BOUNDARY_LEN: usize = 70;

/// A plain form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: Bytes,
}

impl FormField {
    /// The value as text, with invalid UTF-8 replaced
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.value).into_owned()
    }
}

/// An uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub name: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Field(FormField),
    File(FilePart),
}

/// Result of decoding one request body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedBody {
    /// Well-formed parts in body order
    pub parts: Vec<Part>,
    /// Parts dropped as malformed
    pub skipped: usize,
}

impl ParsedBody {
    /// First form field with the given name, wherever it appears
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.parts.iter().find_map(|part| match part {
            Part::Field(field) if field.name == name => Some(field),
            _ => None,
        })
    }

    pub fn field_text(&self, name: &str) -> Option<String> {
        self.field(name).map(FormField::text)
    }

    /// File parts in body order
    pub fn files(&self) -> impl Iterator<Item = &FilePart> {
        self.parts.iter().filter_map(|part| match part {
            Part::File(file) => Some(file),
            _ => None,
        })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PartHeaders {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
}

impl PartHeaders {
    fn parse(block: &[u8]) -> Option<Self> {
        let text = String::from_utf8_lossy(block);
        let mut name = None;
        let mut filename = None;
        let mut content_type = None;

        for line in text.lines() {
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.eq_ignore_ascii_case("content-disposition") {
                for param in split_params(value).into_iter().skip(1) {
                    match param_pair(param) {
                        Some((k, v)) if k.eq_ignore_ascii_case("name") => name = Some(v),
                        Some((k, v)) if k.eq_ignore_ascii_case("filename") => filename = Some(v),
                        _ => {}
                    }
                }
            } else if key.eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }

        let name = name.filter(|n| !n.is_empty())?;
        Some(Self {
            name,
            filename,
            content_type,
        })
    }
}

enum State {
    SeekBoundary,
    ReadHeaders,
    ReadBody(PartHeaders),
    End,
}

/// Extract the boundary token from a `Content-Type` header value
///
/// # Errors
///
/// `SharedError::MalformedUpload` when the type is not
/// `multipart/form-data` or the boundary is missing, empty or too long.
pub fn boundary_from_content_type(content_type: &str) -> Result<String, SharedError> {
    let params = split_params(content_type);
    let mime = params.first().map(|m| m.trim()).unwrap_or_default();
    if !mime.eq_ignore_ascii_case("multipart/form-data") {
        return Err(SharedError::malformed_upload(format!(
            "expected multipart/form-data, got '{}'",
            mime
        )));
    }

    let boundary = params
        .iter()
        .skip(1)
        .filter_map(|param| param_pair(param))
        .find(|(k, _)| k.eq_ignore_ascii_case("boundary"))
        .map(|(_, v)| v)
        .ok_or_else(|| SharedError::malformed_upload("missing multipart boundary"))?;

    if boundary.is_empty() || boundary.len() > MAX_BOUNDARY_LEN {
        return Err(SharedError::malformed_upload("invalid multipart boundary length"));
    }
    Ok(boundary)
}

/// Decode a multipart body delimited by `boundary`
pub fn parse_multipart(body: &Bytes, boundary: &str) -> ParsedBody {
    let delimiter = format!("--{}", boundary).into_bytes();
    // The CR before it, if any, is stripped from the part data
    let body_end = format!("\n--{}", boundary).into_bytes();

    let mut parsed = ParsedBody::default();
    let mut pos = 0;
    let mut state = State::SeekBoundary;

    loop {
        state = match state {
            State::SeekBoundary => match find(&body[pos..], &delimiter) {
                None => State::End,
                Some(offset) => {
                    pos += offset + delimiter.len();
                    let rest = &body[pos..];
                    if rest.starts_with(b"--") {
                        State::End
                    } else if let Some(line_end) = delimiter_line_end(rest) {
                        pos += line_end;
                        State::ReadHeaders
                    } else {
                        // Boundary text inside other data, not a delimiter line
                        State::SeekBoundary
                    }
                }
            },

            State::ReadHeaders => {
                let next_delimiter = find(&body[pos..], &body_end).map(|offset| pos + offset);
                let limit = next_delimiter.unwrap_or(body.len());
                let headers = header_block_end(&body[pos..limit]).and_then(|(len, body_offset)| {
                    let block = &body[pos..pos + len];
                    PartHeaders::parse(block).map(|headers| (headers, pos + body_offset))
                });

                match headers {
                    Some((headers, body_start)) => {
                        pos = body_start;
                        State::ReadBody(headers)
                    }
                    None => {
                        tracing::warn!("[Upload] Skipping multipart part without usable headers");
                        parsed.skipped += 1;
                        // Land on the "--boundary" that follows the LF
                        pos = next_delimiter.map(|d| d + 1).unwrap_or(body.len());
                        State::SeekBoundary
                    }
                }
            }

            State::ReadBody(headers) => match find(&body[pos..], &body_end) {
                None => {
                    tracing::warn!("[Upload] Skipping unterminated multipart part '{}'", headers.name);
                    parsed.skipped += 1;
                    State::End
                }
                Some(offset) => {
                    let mut end = pos + offset;
                    if end > pos && body[end - 1] == b'\r' {
                        end -= 1;
                    }
                    let data = body.slice(pos..end);
                    pos += offset + 1;
                    push_part(&mut parsed, headers, data);
                    State::SeekBoundary
                }
            },

            State::End => break,
        };
    }

    parsed
}

fn push_part(parsed: &mut ParsedBody, headers: PartHeaders, data: Bytes) {
    match headers.filename {
        None => parsed.parts.push(Part::Field(FormField {
            name: headers.name,
            value: data,
        })),
        // Browsers send an empty file input as filename=""
        Some(filename) if filename.is_empty() => {
            tracing::debug!("[Upload] Ignoring empty file input '{}'", headers.name);
        }
        Some(filename) => parsed.parts.push(Part::File(FilePart {
            name: headers.name,
            filename,
            content_type: headers.content_type,
            data,
        })),
    }
}

/// Length of the rest of a delimiter line: optional padding then CRLF or LF
fn delimiter_line_end(rest: &[u8]) -> Option<usize> {
    let padding = rest.iter().take_while(|b| **b == b' ' || **b == b'\t').count();
    let after = &rest[padding..];
    if after.starts_with(b"\r\n") {
        Some(padding + 2)
    } else if after.starts_with(b"\n") {
        Some(padding + 1)
    } else {
        None
    }
}

/// Length of the header lines and offset of the data after the blank line
fn header_block_end(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut line_start = 0;
    while let Some(offset) = find(&bytes[line_start..], b"\n") {
        let line_end = line_start + offset;
        let line = &bytes[line_start..line_end];
        if line.is_empty() || line == b"\r" {
            return Some((line_start, line_end + 1));
        }
        line_start = line_end + 1;
    }
    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// Split a header value on `;`, ignoring separators inside quoted strings
fn split_params(value: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                params.push(&value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    params.push(&value[start..]);
    params
}

/// Parse `key=value` or `key="quoted \"value\""`
fn param_pair(param: &str) -> Option<(String, String)> {
    let (key, value) = param.split_once('=')?;
    let value = value.trim();
    let value = match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        Some(quoted) => unescape(quoted),
        None => value.to_string(),
    };
    Some((key.trim().to_string(), value))
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
