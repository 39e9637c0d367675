use crate::algorithms::routing::EdgeCurve;
use crate::error::GeometryError;
use crate::geometry::cubic::CubicBezier;
use crate::geometry::limits;
use crate::model::Point;

impl EdgeCurve {
    pub fn to_svg_path(&self) -> String {
        cubic_to_svg_path(&self.bezier)
    }
}

pub fn cubic_to_svg_path(c: &CubicBezier) -> String {
    format!(
        "M{},{} C{},{} {},{} {},{}",
        c.p0.x, c.p0.y, c.p1.x, c.p1.y, c.p2.x, c.p2.y, c.p3.x, c.p3.y
    )
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() {
        let c = bytes[*i];
        if c == b' ' || c == b'\n' || c == b'\t' || c == b'\r' || c == b',' {
            *i += 1;
        } else {
            break;
        }
    }
}

fn parse_num(bytes: &[u8], i: &mut usize) -> Result<f32, GeometryError> {
    skip_ws(bytes, i);
    let start = *i;
    while *i < bytes.len() {
        let c = bytes[*i];
        let sign_ok = (c == b'-' || c == b'+')
            && (*i == start || matches!(bytes[*i - 1], b'e' | b'E'));
        if c.is_ascii_digit() || c == b'.' || c == b'e' || c == b'E' || sign_ok {
            *i += 1;
        } else {
            break;
        }
    }
    if start == *i {
        return Err(GeometryError::Parse(format!("expected number at byte {}", start)));
    }
    // Only ASCII bytes were consumed above
    let s = std::str::from_utf8(&bytes[start..*i])
        .map_err(|e| GeometryError::Parse(e.to_string()))?;
    let v = s
        .parse::<f32>()
        .map_err(|_| GeometryError::Parse(format!("bad number '{}'", s)))?;
    if !limits::in_coord_bounds(v) {
        return Err(GeometryError::OutOfRange {
            param: "coordinate",
            min: limits::COORD_MIN,
            max: limits::COORD_MAX,
            got: v,
        });
    }
    Ok(v)
}

fn expect_cmd(bytes: &[u8], i: &mut usize, cmd: u8) -> Result<(), GeometryError> {
    skip_ws(bytes, i);
    match bytes.get(*i) {
        Some(&c) if c == cmd => {
            *i += 1;
            Ok(())
        }
        Some(&c) => Err(GeometryError::Parse(format!(
            "expected '{}' at byte {}, found '{}'",
            cmd as char, *i, c as char
        ))),
        None => Err(GeometryError::Parse(format!("expected '{}', found end of input", cmd as char))),
    }
}

/// Read a rendered edge path `M x,y C x1,y1 x2,y2 x,y` back into its cubic.
///
/// Only absolute `M` followed by absolute `C` is accepted; anything after the
/// eighth number is ignored.
pub fn parse_cubic_path(d: &str) -> Result<CubicBezier, GeometryError> {
    if d.len() > limits::MAX_SVG_TOKENS {
        return Err(GeometryError::Parse(format!("path longer than {} bytes", limits::MAX_SVG_TOKENS)));
    }
    let bytes = d.as_bytes();
    let mut i = 0usize;

    expect_cmd(bytes, &mut i, b'M')?;
    let p0 = Point::new(parse_num(bytes, &mut i)?, parse_num(bytes, &mut i)?);
    expect_cmd(bytes, &mut i, b'C')?;
    let mut pts = [Point::default(); 3];
    for p in pts.iter_mut() {
        *p = Point::new(parse_num(bytes, &mut i)?, parse_num(bytes, &mut i)?);
    }
    Ok(CubicBezier::new(p0, pts[0], pts[1], pts[2]))
}
