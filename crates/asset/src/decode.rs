//! Per-record decoders. Each takes the operands that follow a tag.

use corelib::{Color, Point, Vector, vec3};

use crate::{error::RecordError, face::FaceVertexRef};

/// Parse the first `N` whitespace separated floats.
///
/// Extra operands are ignored, a missing or unparseable one is an error.
pub fn decode_floats<const N: usize>(
    tag: &'static str,
    operands: &str,
) -> Result<[f32; N], RecordError> {
    let mut out = [0.0; N];
    let mut tokens = operands.split_whitespace();
    for (found, slot) in out.iter_mut().enumerate() {
        *slot = tokens
            .next()
            .and_then(|t| t.parse::<f32>().ok())
            .ok_or(RecordError::OperandCount {
                tag,
                expected: N,
                found,
            })?;
    }
    Ok(out)
}

/// `v x y z`
pub fn decode_position(operands: &str) -> Result<Point, RecordError> {
    decode_floats::<3>("v", operands).map(Point::from_array)
}

/// `vt u v`, the third coordinate is always 0.
pub fn decode_texcoord(operands: &str) -> Result<Point, RecordError> {
    let [u, v] = decode_floats::<2>("vt", operands)?;
    Ok(vec3(u, v, 0.0))
}

/// `vn x y z`
pub fn decode_normal(operands: &str) -> Result<Vector, RecordError> {
    decode_floats::<3>("vn", operands).map(Vector::from_array)
}

/// Three-component color property such as `Kd r g b`.
pub fn decode_color(tag: &'static str, operands: &str) -> Result<Color, RecordError> {
    decode_floats::<3>(tag, operands).map(Color::from)
}

/// Single scalar property such as `Ns 32`.
pub fn decode_scalar(tag: &'static str, operands: &str) -> Result<f32, RecordError> {
    decode_floats::<1>(tag, operands).map(|[x]| x)
}

/// Name running to the end of the line, `None` if empty.
pub fn decode_name(operands: &str) -> Option<&str> {
    let name = operands.trim();
    (!name.is_empty()).then_some(name)
}

/// Decode the corners of an `f` record into `refs` (cleared first).
///
/// Each corner is tried against `p/t/n`, `p/t`, `p//n` and `p`, in that order.
/// Stopping anywhere but the end of the operands is an error.
pub fn decode_face(operands: &str, refs: &mut Vec<FaceVertexRef>) -> Result<(), RecordError> {
    refs.clear();
    let mut cursor = Cursor::new(operands);
    loop {
        cursor.skip_whitespace();
        if cursor.is_empty() {
            return Ok(());
        }
        let corner = cursor
            .face_vertex()
            .ok_or(RecordError::MalformedFace {
                column: cursor.pos + 1,
            })?;
        refs.push(corner);
    }
}

/// Byte cursor mimicking the `%d` conversions of scanf-style grammars.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Optional whitespace, optional sign, at least one digit.
    fn int(&mut self) -> Option<i32> {
        self.skip_whitespace();
        let start = self.pos;
        let mut end = start;
        if matches!(self.bytes.get(end), Some(b'+' | b'-')) {
            end += 1;
        }
        let digits = end;
        while self.bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end == digits {
            return None;
        }
        let text = std::str::from_utf8(&self.bytes[start..end]).ok()?;
        let value = text.parse().ok()?;
        self.pos = end;
        Some(value)
    }

    /// Run `grammar` from the current position, rewinding if it fails.
    fn attempt<T>(&mut self, grammar: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let result = grammar(self);
        if result.is_none() {
            self.pos = start;
        }
        result
    }

    fn face_vertex(&mut self) -> Option<FaceVertexRef> {
        self.attempt(|c| {
            let p = c.int()?;
            c.eat(b'/').then_some(())?;
            let t = c.int()?;
            c.eat(b'/').then_some(())?;
            let n = c.int()?;
            Some(FaceVertexRef::new(p, t, n))
        })
        .or_else(|| {
            self.attempt(|c| {
                let p = c.int()?;
                c.eat(b'/').then_some(())?;
                let t = c.int()?;
                Some(FaceVertexRef::new(p, t, 0))
            })
        })
        .or_else(|| {
            self.attempt(|c| {
                let p = c.int()?;
                (c.eat(b'/') && c.eat(b'/')).then_some(())?;
                let n = c.int()?;
                Some(FaceVertexRef::new(p, 0, n))
            })
        })
        .or_else(|| self.attempt(|c| c.int().map(FaceVertexRef::position_only)))
    }
}
