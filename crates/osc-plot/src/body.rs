//! Outline of the oscillating object on the object canvas.

use osc_core::{Parameters, Real};
use serde::{Deserialize, Serialize};

/// Width of the liquid container the cylinder floats in.
pub const CONTAINER_WIDTH: Real = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: Real,
    pub y: Real,
    pub w: Real,
    pub h: Real,
}

/// Rectangles making up the body, given the object Y in canvas pixels.
///
/// The cylinder is centred on `object_y`. The blocks hang from it: a `2s`
/// cube with its top edge at `object_y` and an `s` cube stacked on top.
pub fn body_rects(parameters: &Parameters, canvas_width: Real, object_y: Real) -> Vec<Rect> {
    let cx = canvas_width / 2.0;
    match *parameters {
        Parameters::Cylinder { length, .. } => {
            let w = CONTAINER_WIDTH / 3.0;
            vec![Rect {
                x: cx - w / 2.0,
                y: object_y - length / 2.0,
                w,
                h: length,
            }]
        }
        Parameters::CubicBlock { size } => {
            let big = 2.0 * size;
            vec![
                Rect {
                    x: cx - big / 2.0,
                    y: object_y,
                    w: big,
                    h: big,
                },
                Rect {
                    x: cx - size / 2.0,
                    y: object_y - size,
                    w: size,
                    h: size,
                },
            ]
        }
    }
}
