//! Static Chart Renderer
//! Draws the current scatterplot frame through plotters, to SVG or PNG.
//!
//! Layout (all offsets relative to the canvas):
//! 1. Plot area translated by the left/top margins
//! 2. Bottom and left axes with round ticks
//! 3. One circle per state with its abbreviation centered inside
//! 4. Horizontal axis labels stacked under the plot, vertical ones rotated
//!    to the left; the active label is bold and dark, the rest grey

use crate::charts::NICE_TICK_COUNT;
use crate::config::ChartConfig;
use crate::data::Axis;
use crate::view::{Frame, ViewState};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const MARKER_FILL: RGBColor = RGBColor(137, 189, 211);
pub const MARKER_STROKE: RGBColor = RGBColor(227, 227, 227);
pub const INACTIVE_LABEL: RGBColor = RGBColor(173, 173, 173);

const TICK_SIZE: i32 = 6;
const LABEL_SPACING: f64 = 20.0;
const LABEL_FONT_SIZE: f64 = 16.0;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

fn drawing_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render a frame to an SVG document.
    pub fn render_svg(
        frame: &Frame,
        state: &ViewState,
        config: &ChartConfig,
    ) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, Self::canvas_size(config))
                .into_drawing_area();
            Self::draw(&root, frame, state, config)?;
            root.present().map_err(drawing_error)?;
        }
        Ok(svg)
    }

    /// Render a frame to a PNG file.
    pub fn render_png(
        frame: &Frame,
        state: &ViewState,
        config: &ChartConfig,
        path: &Path,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, Self::canvas_size(config)).into_drawing_area();
        Self::draw(&root, frame, state, config)?;
        root.present().map_err(drawing_error)?;
        info!(path = %path.display(), "png written");
        Ok(())
    }

    fn canvas_size(config: &ChartConfig) -> (u32, u32) {
        (
            config.svg_width.max(1.0).round() as u32,
            config.svg_height.max(1.0).round() as u32,
        )
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        frame: &Frame,
        state: &ViewState,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        root.fill(&WHITE).map_err(drawing_error)?;

        let origin = (config.margin.left, config.margin.top);
        Self::draw_axes(root, frame, origin, config)?;
        Self::draw_marks(root, frame, origin, config)?;
        Self::draw_axis_labels(root, state, origin, config)?;
        Ok(())
    }

    fn px(origin: (f64, f64), x: f64, y: f64) -> (i32, i32) {
        ((origin.0 + x).round() as i32, (origin.1 + y).round() as i32)
    }

    fn draw_axes<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        frame: &Frame,
        origin: (f64, f64),
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        let (pw, ph) = (config.plot_width(), config.plot_height());
        let tick_font = ("sans-serif", 10).into_font().color(&BLACK);

        // Bottom axis
        root.draw(&PathElement::new(
            vec![Self::px(origin, 0.0, ph), Self::px(origin, pw, ph)],
            BLACK.stroke_width(1),
        ))
        .map_err(drawing_error)?;

        let x_scale = &frame.x_scale;
        for tick in x_scale.ticks(NICE_TICK_COUNT) {
            let (x, y) = Self::px(origin, x_scale.project(tick), ph);
            root.draw(&PathElement::new(
                vec![(x, y), (x, y + TICK_SIZE)],
                BLACK.stroke_width(1),
            ))
            .map_err(drawing_error)?;
            root.draw(&Text::new(
                x_scale.format_tick(tick, NICE_TICK_COUNT),
                (x, y + TICK_SIZE + 3),
                tick_font.pos(Pos::new(HPos::Center, VPos::Top)),
            ))
            .map_err(drawing_error)?;
        }

        // Left axis
        root.draw(&PathElement::new(
            vec![Self::px(origin, 0.0, 0.0), Self::px(origin, 0.0, ph)],
            BLACK.stroke_width(1),
        ))
        .map_err(drawing_error)?;

        let y_scale = &frame.y_scale;
        for tick in y_scale.ticks(NICE_TICK_COUNT) {
            let (x, y) = Self::px(origin, 0.0, y_scale.project(tick));
            root.draw(&PathElement::new(
                vec![(x - TICK_SIZE, y), (x, y)],
                BLACK.stroke_width(1),
            ))
            .map_err(drawing_error)?;
            root.draw(&Text::new(
                y_scale.format_tick(tick, NICE_TICK_COUNT),
                (x - TICK_SIZE - 3, y),
                tick_font.pos(Pos::new(HPos::Right, VPos::Center)),
            ))
            .map_err(drawing_error)?;
        }

        Ok(())
    }

    fn draw_marks<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        frame: &Frame,
        origin: (f64, f64),
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        let radius = config.marker_radius.round() as i32;
        let abbr_font = ("sans-serif", 9)
            .into_font()
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));

        for mark in frame.marks.iter().filter(|m| m.is_drawable()) {
            let center = Self::px(origin, mark.x, mark.y);
            root.draw(&Circle::new(center, radius, MARKER_FILL.mix(0.8).filled()))
                .map_err(drawing_error)?;
            root.draw(&Circle::new(center, radius, MARKER_STROKE.stroke_width(1)))
                .map_err(drawing_error)?;
            root.draw(&Text::new(mark.abbr.clone(), center, abbr_font.clone()))
                .map_err(drawing_error)?;
        }
        Ok(())
    }

    fn draw_axis_labels<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        state: &ViewState,
        origin: (f64, f64),
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        let (pw, ph) = (config.plot_width(), config.plot_height());

        let label_style = |active: bool| {
            let font = ("sans-serif", LABEL_FONT_SIZE).into_font();
            if active {
                font.style(FontStyle::Bold).color(&BLACK)
            } else {
                font.color(&INACTIVE_LABEL)
            }
        };

        // Stacked under the plot, centered on it.
        let group_y = ph + LABEL_SPACING + config.margin.top;
        for (i, (metric, active)) in state.labels(Axis::Horizontal).into_iter().enumerate() {
            let y = group_y + LABEL_SPACING * (i + 1) as f64;
            root.draw(&Text::new(
                metric.label(),
                Self::px(origin, pw / 2.0, y),
                label_style(active).pos(Pos::new(HPos::Center, VPos::Center)),
            ))
            .map_err(drawing_error)?;
        }

        // Rotated, moving outward from the left axis.
        let group_x = -config.margin.left / 4.0;
        for (i, (metric, active)) in state.labels(Axis::Vertical).into_iter().enumerate() {
            let x = group_x - LABEL_SPACING * (i + 1) as f64 + LABEL_FONT_SIZE / 2.0;
            root.draw(&Text::new(
                metric.label(),
                Self::px(origin, x, ph / 2.0),
                label_style(active)
                    .transform(FontTransform::Rotate270)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))
            .map_err(drawing_error)?;
        }

        Ok(())
    }
}
