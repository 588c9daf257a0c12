//! Chart builders for staged vectors.
use itertools_num::linspace;
use ndarray::Array1;
use plotly::common::{Fill, Line, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{Plot, Scatter};

/// Plot every cumulative-sum vector as a line over `[0, 1]`.
pub fn plot_vectors(vectors: &[Array1<f64>]) -> Plot {
    let mut plot = Plot::new();

    for (index, vector) in vectors.iter().enumerate() {
        let x: Vec<f64> = linspace(0., 1., vector.len()).collect();
        let name = format!("vector_{}", index);
        plot.add_trace(
            Scatter::new(x, vector.to_vec())
                .name(&name)
                .mode(Mode::Lines),
        );
    }

    plot.set_layout(
        Layout::new()
            .title("Cumulative sums")
            .x_axis(Axis::new().title("Position (normalized)"))
            .y_axis(Axis::new().title("Cumulative sum")),
    );
    plot
}

/// Plot the vectors as gradient-filled curves on the gnuplot palette.
///
/// Curves are drawn in ascending order of their final value. Each one is
/// filled down to its own minimum and colored by `row max / global max`, so
/// the tallest curve sits on top of the stack in the brightest color.
pub fn plot_gradient_fill(vectors: &[Array1<f64>]) -> Plot {
    let mut plot = Plot::new();

    let mut order: Vec<usize> = (0..vectors.len()).collect();
    order.sort_by(|&a, &b| {
        let left = vectors[a].last().copied().unwrap_or(f64::NEG_INFINITY);
        let right = vectors[b].last().copied().unwrap_or(f64::NEG_INFINITY);
        left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal)
    });

    let global_max = vectors
        .iter()
        .flat_map(|vector| vector.iter().copied())
        .fold(f64::NEG_INFINITY, f64::max);

    for index in order {
        let vector = &vectors[index];
        if vector.is_empty() {
            continue;
        }

        let row_max = vector.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let row_min = vector.iter().copied().fold(f64::INFINITY, f64::min);
        let fraction = if global_max > 0.0 { row_max / global_max } else { 0.0 };
        let (r, g, b) = gnuplot_color(fraction);

        let x: Vec<f64> = linspace(0., 1., vector.len()).collect();
        let y: Vec<f64> = vector.to_vec();

        // Fill band: the curve forward, then its own minimum on the way back.
        let mut band_x = x.clone();
        band_x.extend(x.iter().rev().copied());
        let mut band_y = y.clone();
        band_y.extend(std::iter::repeat(row_min).take(x.len()));

        let fill = format!("rgba({}, {}, {}, 0.35)", r, g, b);
        let stroke = format!("rgba({}, {}, {}, 1.0)", r, g, b);
        let name = format!("vector_{}", index);

        plot.add_trace(
            Scatter::new(band_x, band_y)
                .mode(Mode::Lines)
                .fill(Fill::ToSelf)
                .fill_color(fill)
                .line(Line::new().width(0.0))
                .show_legend(false),
        );
        plot.add_trace(
            Scatter::new(x, y)
                .name(&name)
                .mode(Mode::Lines)
                .line(Line::new().color(stroke)),
        );
    }

    plot.set_layout(
        Layout::new()
            .title("Cumulative sums")
            .x_axis(Axis::new().title("Position (normalized)"))
            .y_axis(Axis::new().title("Cumulative sum")),
    );
    plot
}

/// Map `x` in `[0, 1]` onto the classic gnuplot palette (rgbformulae 7,5,15):
/// `r = sqrt(x)`, `g = x^3`, `b = sin(2 pi x)` clipped at zero.
fn gnuplot_color(x: f64) -> (u8, u8, u8) {
    let x = x.clamp(0.0, 1.0);
    let r = x.sqrt();
    let g = x.powi(3);
    let b = (2.0 * std::f64::consts::PI * x).sin().max(0.0);
    (
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
    )
}
