//! SVG serialization of a module matrix.

use super::{EncodeOptions, ModuleMatrix};
use std::fmt::Write;

/// Render the matrix as SVG markup, one unit per module.
///
/// The output has exactly two filled paths: the full background in the
/// light color, then every dark run of each row in the dark color. The
/// string always uses Unix newlines.
pub fn to_svg_string(matrix: &ModuleMatrix, options: &EncodeOptions) -> String {
    let size = matrix.size();
    let margin = options.margin as usize;
    let dimension = size + 2 * margin;

    let mut path = String::new();
    for y in 0..size {
        let mut x = 0;
        while x < size {
            if !matrix.is_dark(x, y) {
                x += 1;
                continue;
            }
            let start = x;
            while x < size && matrix.is_dark(x, y) {
                x += 1;
            }
            let run = x - start;
            if !path.is_empty() {
                path.push(' ');
            }
            // write! to a String cannot fail
            let _ = write!(path, "M{},{}h{}v1h-{}z", start + margin, y + margin, run, run);
        }
    }

    let mut svg = String::new();
    svg += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
    svg += &format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{w}\" viewBox=\"0 0 {d} {d}\" shape-rendering=\"crispEdges\">\n",
        w = options.width,
        d = dimension
    );
    svg += &format!(
        "\t<path fill=\"{}\" d=\"M0 0h{d}v{d}H0z\"/>\n",
        options.light,
        d = dimension
    );
    svg += &format!("\t<path fill=\"{}\" d=\"{}\"/>\n", options.dark, path);
    svg += "</svg>\n";
    svg
}
