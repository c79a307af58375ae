//! Integral defuzzifiers
//!
//! Each one takes `resolution` samples at the midpoints of equal-width
//! slices of `[minimum, maximum]`. A range with an infinite or NaN bound
//! cannot be sampled and yields NaN.

use crate::term::Membership;

fn samples(minimum: f64, maximum: f64, resolution: usize) -> Option<(f64, usize)> {
    if !minimum.is_finite() || !maximum.is_finite() || resolution == 0 {
        return None;
    }
    Some(((maximum - minimum) / resolution as f64, resolution))
}

/// Center of the area under `term`
pub fn centroid<M: Membership + ?Sized>(
    term: &M,
    minimum: f64,
    maximum: f64,
    resolution: usize,
) -> f64 {
    let Some((dx, resolution)) = samples(minimum, maximum, resolution) else {
        return f64::NAN;
    };
    let mut area = 0.0;
    let mut moment = 0.0;
    for i in 0..resolution {
        let x = minimum + (i as f64 + 0.5) * dx;
        let y = term.membership(x);
        moment += x * y;
        area += y;
    }
    moment / area
}

/// Point splitting the area under `term` in two equal halves.
///
/// Sweeps inwards from both ends, always extending the smaller side, then
/// weighs the two meeting points by the opposite areas.
pub fn bisector<M: Membership + ?Sized>(
    term: &M,
    minimum: f64,
    maximum: f64,
    resolution: usize,
) -> f64 {
    let Some((dx, resolution)) = samples(minimum, maximum, resolution) else {
        return f64::NAN;
    };
    let (mut left, mut right) = (0usize, 0usize);
    let (mut left_area, mut right_area) = (0.0, 0.0);
    let (mut x_left, mut x_right) = (minimum, maximum);
    for _ in 0..resolution {
        if left_area <= right_area {
            x_left = minimum + (left as f64 + 0.5) * dx;
            left_area += term.membership(x_left);
            left += 1;
        } else {
            x_right = maximum - (right as f64 + 0.5) * dx;
            right_area += term.membership(x_right);
            right += 1;
        }
    }
    (left_area * x_right + right_area * x_left) / (left_area + right_area)
}

pub fn smallest_of_maximum<M: Membership + ?Sized>(
    term: &M,
    minimum: f64,
    maximum: f64,
    resolution: usize,
) -> f64 {
    let Some((dx, resolution)) = samples(minimum, maximum, resolution) else {
        return f64::NAN;
    };
    let mut y_max = -1.0;
    let mut x_smallest = minimum;
    for i in 0..resolution {
        let x = minimum + (i as f64 + 0.5) * dx;
        let y = term.membership(x);
        if y > y_max {
            y_max = y;
            x_smallest = x;
        }
    }
    x_smallest
}

pub fn largest_of_maximum<M: Membership + ?Sized>(
    term: &M,
    minimum: f64,
    maximum: f64,
    resolution: usize,
) -> f64 {
    let Some((dx, resolution)) = samples(minimum, maximum, resolution) else {
        return f64::NAN;
    };
    let mut y_max = -1.0;
    let mut x_largest = maximum;
    for i in 0..resolution {
        let x = minimum + (i as f64 + 0.5) * dx;
        let y = term.membership(x);
        if y >= y_max {
            y_max = y;
            x_largest = x;
        }
    }
    x_largest
}

/// Middle of the first plateau reaching the maximum membership
pub fn mean_of_maximum<M: Membership + ?Sized>(
    term: &M,
    minimum: f64,
    maximum: f64,
    resolution: usize,
) -> f64 {
    let Some((dx, resolution)) = samples(minimum, maximum, resolution) else {
        return f64::NAN;
    };
    let mut y_max = -1.0;
    let mut x_smallest = minimum;
    let mut x_largest = maximum;
    let mut same_plateau = false;
    for i in 0..resolution {
        let x = minimum + (i as f64 + 0.5) * dx;
        let y = term.membership(x);
        if y > y_max {
            y_max = y;
            x_smallest = x;
            x_largest = x;
            same_plateau = true;
        } else if y == y_max && same_plateau {
            x_largest = x;
        } else if y < y_max {
            same_plateau = false;
        }
    }
    (x_smallest + x_largest) / 2.0
}
