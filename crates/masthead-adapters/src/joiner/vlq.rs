//! Base64 VLQ codec for the `mappings` field of revision 3 source maps.
//!
//! Decoding turns the relative, line-separated wire form into absolute
//! segments; encoding reverses it. The generated column resets at every
//! line, all other fields accumulate across the whole string.

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const CONTINUATION: i64 = 1 << 5;

/// One decoded segment with absolute fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) generated_col: u32,
    /// (source index, source line, source column)
    pub(crate) source: Option<(u32, u32, u32)>,
    pub(crate) name: Option<u32>,
}

/// One absolute mapping in the combined output, ready for re-encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mapping {
    pub(crate) dst_line: u32,
    pub(crate) dst_col: u32,
    pub(crate) src: Option<(u32, u32, u32)>,
    pub(crate) name: Option<u32>,
}

/// Decode a `mappings` string into per-line segments with absolute fields.
pub(crate) fn decode_mappings(mappings: &str) -> Result<Vec<Vec<Segment>>, String> {
    let mut lines = Vec::new();
    let mut gen_col: i64;
    let mut src_idx: i64 = 0;
    let mut src_line: i64 = 0;
    let mut src_col: i64 = 0;
    let mut name_idx: i64 = 0;

    for line in mappings.split(';') {
        gen_col = 0;
        let mut segments = Vec::new();
        for seg in line.split(',') {
            if seg.is_empty() {
                continue;
            }
            let fields = decode_fields(seg)?;
            match fields.len() {
                1 | 4 | 5 => {}
                n => return Err(format!("segment has {n} fields, expected 1, 4, or 5")),
            }
            gen_col += fields[0];
            if gen_col < 0 {
                return Err("negative generated column".into());
            }
            let mut segment = Segment {
                generated_col: gen_col as u32,
                source: None,
                name: None,
            };
            if fields.len() >= 4 {
                src_idx += fields[1];
                src_line += fields[2];
                src_col += fields[3];
                if src_idx < 0 || src_line < 0 || src_col < 0 {
                    return Err("negative source field".into());
                }
                segment.source = Some((src_idx as u32, src_line as u32, src_col as u32));
                if fields.len() == 5 {
                    name_idx += fields[4];
                    if name_idx < 0 {
                        return Err("negative name index".into());
                    }
                    segment.name = Some(name_idx as u32);
                }
            }
            segments.push(segment);
        }
        lines.push(segments);
    }
    Ok(lines)
}

/// Encode absolute mappings (sorted by generated position) back into the
/// relative wire form.
pub(crate) fn encode_mappings(mappings: &[Mapping]) -> String {
    let mut out = String::new();
    let mut line: u32 = 0;
    let mut prev_col: i64 = 0;
    let mut prev_src: i64 = 0;
    let mut prev_src_line: i64 = 0;
    let mut prev_src_col: i64 = 0;
    let mut prev_name: i64 = 0;
    let mut first_in_line = true;

    for mapping in mappings {
        while line < mapping.dst_line {
            out.push(';');
            line += 1;
            prev_col = 0;
            first_in_line = true;
        }
        if !first_in_line {
            out.push(',');
        }
        first_in_line = false;
        encode_value(i64::from(mapping.dst_col) - prev_col, &mut out);
        prev_col = i64::from(mapping.dst_col);
        if let Some((src, src_line, src_col)) = mapping.src {
            encode_value(i64::from(src) - prev_src, &mut out);
            encode_value(i64::from(src_line) - prev_src_line, &mut out);
            encode_value(i64::from(src_col) - prev_src_col, &mut out);
            prev_src = i64::from(src);
            prev_src_line = i64::from(src_line);
            prev_src_col = i64::from(src_col);
            if let Some(name) = mapping.name {
                encode_value(i64::from(name) - prev_name, &mut out);
                prev_name = i64::from(name);
            }
        }
    }
    out
}

fn decode_fields(segment: &str) -> Result<Vec<i64>, String> {
    let mut fields = Vec::with_capacity(5);
    let mut value: i64 = 0;
    let mut shift: u32 = 0;
    let mut in_value = false;
    for byte in segment.bytes() {
        let digit = digit(byte)?;
        value |= (digit & (CONTINUATION - 1)) << shift;
        in_value = true;
        if digit & CONTINUATION != 0 {
            shift += 5;
            if shift > 45 {
                return Err("VLQ value too large".into());
            }
        } else {
            let negative = value & 1 != 0;
            let magnitude = value >> 1;
            fields.push(if negative { -magnitude } else { magnitude });
            value = 0;
            shift = 0;
            in_value = false;
        }
    }
    if in_value {
        return Err("truncated VLQ segment".into());
    }
    Ok(fields)
}

fn digit(byte: u8) -> Result<i64, String> {
    BASE64
        .iter()
        .position(|b| *b == byte)
        .map(|i| i as i64)
        .ok_or_else(|| format!("invalid base64 character `{}`", byte as char))
}

fn encode_value(value: i64, out: &mut String) {
    let mut vlq = if value < 0 {
        ((-value as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };
    loop {
        let mut digit = (vlq & 31) as usize;
        vlq >>= 5;
        if vlq != 0 {
            digit |= 32;
        }
        out.push(BASE64[digit] as char);
        if vlq == 0 {
            break;
        }
    }
}
