//! Beta-distribution reference curves.
//!
//! A standalone illustrative figure: the density of each beta prior the
//! hyperparameterized initializations draw from. Independent of the
//! aggregation pipeline — it only needs the shared beta PDF.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use sdlab_core::numeric::beta_pdf;

use crate::style::series_color;

const STEPS: usize = 1000;
const Y_MAX: f64 = 2.5;

/// Render beta PDF curves for the given (alpha, beta) shape pairs.
pub fn render_beta_density(path: &Path, shapes: &[(f64, f64)]) -> Result<(), Box<dyn Error>> {
    assert!(!shapes.is_empty(), "at least one curve to render");

    let root = BitMapBackend::new(path, (1000, 700)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0_f64..1.0, 0.0_f64..Y_MAX)?;

    chart.configure_mesh().x_desc("x").y_desc("PDF").draw()?;

    for (i, &(alpha, beta)) in shapes.iter().enumerate() {
        let color = series_color(i);
        let points = (0..STEPS).filter_map(move |step| {
            let x = step as f64 / STEPS as f64;
            let y = beta_pdf(x, alpha, beta);
            y.is_finite().then_some((x, y))
        });
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(shape_label(alpha, beta))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn shape_label(alpha: f64, beta: f64) -> String {
    format!("α = {alpha}; β = {beta}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_read_like_the_figure_legend() {
        assert_eq!(shape_label(1.0, 81.0), "α = 1; β = 81");
        assert_eq!(shape_label(1.0, 3.0), "α = 1; β = 3");
    }
}
