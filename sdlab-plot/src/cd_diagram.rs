//! Critical-difference diagram rendering.
//!
//! Draws the standard layout: a horizontal rank axis (best rank on the
//! left), each competitor connected to its mean-rank position with an elbow
//! line ending at its name, and a bar above the axis showing the critical
//! difference at the run's significance level. Competitors closer than the
//! bar's length are statistically indistinguishable.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const WIDTH: u32 = 1000;
const SIDE_MARGIN: i32 = 300;
const AXIS_Y: i32 = 130;
const CD_BAR_Y: i32 = 70;
const ROW_HEIGHT: i32 = 28;

/// Render a critical-difference diagram to `path`.
///
/// `names` and `mean_ranks` are parallel, in pipeline order; ranking is
/// minimize-is-better (rank 1 = best). `caption` labels the figure, usually
/// with the metric under comparison.
pub fn render_cd_diagram(
    path: &Path,
    names: &[String],
    mean_ranks: &[f64],
    critical_difference: f64,
    caption: &str,
) -> Result<(), Box<dyn Error>> {
    assert_eq!(
        names.len(),
        mean_ranks.len(),
        "names and mean ranks must be parallel"
    );
    let k = names.len();
    assert!(k >= 2, "a comparison needs at least two competitors");

    let rows_per_side = k.div_ceil(2) as i32;
    let height = (AXIS_Y + 40 + rows_per_side * ROW_HEIGHT + 30) as u32;

    let root = BitMapBackend::new(path, (WIDTH, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let x0 = SIDE_MARGIN;
    let x1 = WIDTH as i32 - SIDE_MARGIN;
    let span = (x1 - x0) as f64;
    let x_of = |rank: f64| x0 + (span * (rank - 1.0) / (k as f64 - 1.0)).round() as i32;

    let axis = BLACK.stroke_width(2);
    let thin = BLACK.stroke_width(1);

    // Rank axis with integer ticks.
    root.draw(&PathElement::new(vec![(x0, AXIS_Y), (x1, AXIS_Y)], axis))?;
    for rank in 1..=k {
        let x = x_of(rank as f64);
        root.draw(&PathElement::new(vec![(x, AXIS_Y - 6), (x, AXIS_Y)], axis))?;
        root.draw(&Text::new(
            rank.to_string(),
            (x, AXIS_Y - 22),
            ("sans-serif", 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }

    // Critical-difference bar, clamped to the axis span.
    let cd_end = x_of((1.0 + critical_difference).min(k as f64));
    root.draw(&PathElement::new(
        vec![(x0, CD_BAR_Y), (cd_end, CD_BAR_Y)],
        axis,
    ))?;
    for x in [x0, cd_end] {
        root.draw(&PathElement::new(
            vec![(x, CD_BAR_Y - 5), (x, CD_BAR_Y + 5)],
            axis,
        ))?;
    }
    root.draw(&Text::new(
        format!("CD = {critical_difference:.3}"),
        ((x0 + cd_end) / 2, CD_BAR_Y - 24),
        ("sans-serif", 16)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top)),
    ))?;

    // Competitors sorted best-first; first half drops to the left column,
    // second half to the right.
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| {
        mean_ranks[a]
            .partial_cmp(&mean_ranks[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for (slot, &idx) in order.iter().enumerate() {
        let on_left = slot < rows_per_side as usize;
        let row = if on_left {
            slot as i32
        } else {
            (k - 1 - slot) as i32
        };
        let label_y = AXIS_Y + 40 + row * ROW_HEIGHT;
        let rank_x = x_of(mean_ranks[idx]);
        let (edge_x, text_x, h_pos) = if on_left {
            (x0 - 10, x0 - 16, HPos::Right)
        } else {
            (x1 + 10, x1 + 16, HPos::Left)
        };

        root.draw(&PathElement::new(
            vec![(rank_x, AXIS_Y), (rank_x, label_y), (edge_x, label_y)],
            thin,
        ))?;
        root.draw(&Text::new(
            format!("{} ({:.2})", names[idx], mean_ranks[idx]),
            (text_x, label_y),
            ("sans-serif", 17)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center)),
        ))?;
    }

    root.draw(&Text::new(
        caption.to_string(),
        (20, 20),
        ("sans-serif", 20).into_font(),
    ))?;

    root.present()?;
    Ok(())
}
