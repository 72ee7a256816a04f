use std::{fmt::Display, path::Path};

use plotters::{coord::Shift, prelude::*};
use plotters_svg::SVGBackend;
use tracing::info;

use crate::{
    driver::SimulationRun,
    error::{Error, Result},
};

/// Canvas size of the side-by-side charts.
pub static PLOT_SIZE: (u32, u32) = (1200, 500);

fn plot_error(e: impl Display) -> Error {
    Error::Plot(e.to_string())
}

/// Writes both charts to an SVG file at `path`.
pub fn render_svg(run: &SimulationRun, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, PLOT_SIZE).into_drawing_area();
    draw_run(run, &root)?;
    root.present().map_err(plot_error)?;

    info!(path = %path.display(), "Charts written");
    Ok(())
}

/// Renders both charts into an SVG document held in memory.
pub fn render_svg_string(run: &SimulationRun) -> Result<String> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, PLOT_SIZE).into_drawing_area();
        draw_run(run, &root)?;
        root.present().map_err(plot_error)?;
    }
    Ok(svg)
}

fn draw_run<DB: DrawingBackend>(run: &SimulationRun, root: &DrawingArea<DB, Shift>) -> Result<()> {
    root.fill(&WHITE).map_err(plot_error)?;

    let areas = root.split_evenly((1, 2));
    draw_series(
        &areas[0],
        "Transmission Delay",
        "Delay (s)",
        "Delay per Packet",
        &run.delays(),
        BLUE,
    )?;
    draw_series(
        &areas[1],
        "Throughput Over Time",
        "Throughput (bps)",
        "Throughput per Packet",
        &run.throughputs(),
        RED,
    )
}

fn draw_series<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    label: &str,
    values: &[f64],
    color: RGBColor,
) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let y_max = values.iter().copied().fold(0.0, f64::max);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(0i64..values.len() as i64, 0.0..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Packet #")
        .y_desc(y_desc)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            values.iter().enumerate().map(|(i, &v)| (i as i64, v)),
            color,
        ))
        .map_err(plot_error)?
        .label(label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 30, y)], color));

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    Ok(())
}
