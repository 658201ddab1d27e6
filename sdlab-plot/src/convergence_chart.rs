//! Convergence-by-proportion line charts, one panel per algorithm family.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::style::series_color;

/// One line in a family panel: the convergence counts of a single variant
/// across the proportion axis.
#[derive(Debug, Clone)]
pub struct ConvergenceSeries {
    /// Legend label, e.g. `base` or `β 81.0`.
    pub label: String,
    /// One count per proportion, in proportion order.
    pub counts: Vec<u64>,
}

/// One chart panel: a family name and its variants' series.
#[derive(Debug, Clone)]
pub struct FamilyPanel {
    pub family: String,
    pub series: Vec<ConvergenceSeries>,
}

/// Render side-by-side convergence panels to `path`.
///
/// The x axis is the proportion index, labeled with the actual percentages,
/// so the (logarithmically spaced) proportions plot at even intervals.
pub fn render_convergence_chart(
    path: &Path,
    panels: &[FamilyPanel],
    proportions: &[u32],
) -> Result<(), Box<dyn Error>> {
    assert!(!panels.is_empty(), "at least one panel to render");

    let root = BitMapBackend::new(path, (620 * panels.len() as u32, 620)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((1, panels.len()));

    let labels: Vec<String> = proportions.iter().map(u32::to_string).collect();

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let y_max = panel
            .series
            .iter()
            .flat_map(|s| s.counts.iter().copied())
            .max()
            .unwrap_or(0)
            .max(1) as f64;

        let mut chart = ChartBuilder::on(area)
            .caption(
                format!("Convergence by Initialization - {}", panel.family.to_uppercase()),
                ("sans-serif", 20),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(-0.5_f64..(proportions.len() as f64 - 0.5), 0.0_f64..y_max * 1.1)?;

        chart
            .configure_mesh()
            .x_desc("proportion of features (%)")
            .y_desc("number of convergences")
            .x_labels(proportions.len())
            .x_label_formatter(&|x| {
                let i = x.round() as isize;
                if (x - i as f64).abs() < 0.01 && (0..labels.len() as isize).contains(&i) {
                    labels[i as usize].clone()
                } else {
                    String::new()
                }
            })
            .draw()?;

        for (si, series) in panel.series.iter().enumerate() {
            let color = series_color(si);
            let points: Vec<(f64, f64)> = series
                .counts
                .iter()
                .enumerate()
                .map(|(i, &c)| (i as f64, c as f64))
                .collect();
            chart
                .draw_series(LineSeries::new(points, &color).point_size(3))?
                .label(series.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}
