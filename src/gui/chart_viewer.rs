//! Chart Viewer Widget
//! Paints the scatterplot with the egui painter: axes, markers, abbreviations,
//! clickable axis labels and hover tooltips.

use crate::charts::{INACTIVE_LABEL, MARKER_FILL, MARKER_STROKE, NICE_TICK_COUNT};
use crate::config::ChartConfig;
use crate::data::{Axis, Metric};
use crate::view::{AxisCommand, Frame, ViewState};
use egui::epaint::TextShape;
use egui::{Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke, Vec2};

const TICK_SIZE: f32 = 6.0;
const LABEL_SPACING: f32 = 20.0;
const LABEL_FONT_SIZE: f32 = 16.0;

fn to_color32(c: plotters::style::RGBColor) -> Color32 {
    Color32::from_rgb(c.0, c.1, c.2)
}

/// Scatterplot canvas sized from the chart config.
pub struct ChartViewer {
    config: ChartConfig,
}

impl ChartViewer {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    /// Draw one frame. Returns the command for a clicked axis label.
    pub fn show(
        &self,
        ui: &mut egui::Ui,
        frame: Option<&Frame>,
        state: Option<&ViewState>,
    ) -> Option<AxisCommand> {
        let size = Vec2::new(self.config.svg_width as f32, self.config.svg_height as f32);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());

        let (Some(frame), Some(state)) = (frame, state) else {
            painter.text(
                response.rect.center(),
                Align2::CENTER_CENTER,
                "No Data",
                FontId::proportional(20.0),
                Color32::GRAY,
            );
            return None;
        };

        let origin = response.rect.min
            + Vec2::new(
                self.config.margin.left as f32,
                self.config.margin.top as f32,
            );

        self.draw_axes(&painter, ui, frame, origin);
        self.draw_marks(&painter, frame, origin);

        if let Some(pointer) = response.hover_pos() {
            let local = pointer - origin;
            let hit = frame.hit_test(
                local.x as f64,
                local.y as f64,
                self.config.marker_radius,
            );
            if let Some(idx) = hit {
                let tooltip = frame.marks[idx].tooltip.clone();
                response.clone().on_hover_ui_at_pointer(|ui| {
                    ui.label(RichText::new(tooltip).size(12.0));
                });
            }
        }

        self.draw_axis_labels(&painter, ui, state, origin)
    }

    fn draw_axes(&self, painter: &egui::Painter, ui: &egui::Ui, frame: &Frame, origin: Pos2) {
        let pw = self.config.plot_width() as f32;
        let ph = self.config.plot_height() as f32;
        let color = ui.visuals().text_color();
        let stroke = Stroke::new(1.0, color);
        let font = FontId::proportional(10.0);

        painter.line_segment([origin + Vec2::new(0.0, ph), origin + Vec2::new(pw, ph)], stroke);
        let x_scale = &frame.x_scale;
        for tick in x_scale.ticks(NICE_TICK_COUNT) {
            let p = origin + Vec2::new(x_scale.project(tick) as f32, ph);
            painter.line_segment([p, p + Vec2::new(0.0, TICK_SIZE)], stroke);
            painter.text(
                p + Vec2::new(0.0, TICK_SIZE + 3.0),
                Align2::CENTER_TOP,
                x_scale.format_tick(tick, NICE_TICK_COUNT),
                font.clone(),
                color,
            );
        }

        painter.line_segment([origin, origin + Vec2::new(0.0, ph)], stroke);
        let y_scale = &frame.y_scale;
        for tick in y_scale.ticks(NICE_TICK_COUNT) {
            let p = origin + Vec2::new(0.0, y_scale.project(tick) as f32);
            painter.line_segment([p - Vec2::new(TICK_SIZE, 0.0), p], stroke);
            painter.text(
                p - Vec2::new(TICK_SIZE + 3.0, 0.0),
                Align2::RIGHT_CENTER,
                y_scale.format_tick(tick, NICE_TICK_COUNT),
                font.clone(),
                color,
            );
        }
    }

    fn draw_marks(&self, painter: &egui::Painter, frame: &Frame, origin: Pos2) {
        let radius = self.config.marker_radius as f32;
        let fill = to_color32(MARKER_FILL).gamma_multiply(0.8);
        let stroke = Stroke::new(1.0, to_color32(MARKER_STROKE));

        for mark in frame.marks.iter().filter(|m| m.is_drawable()) {
            let center = origin + Vec2::new(mark.x as f32, mark.y as f32);
            painter.circle(center, radius, fill, stroke);
            painter.text(
                center,
                Align2::CENTER_CENTER,
                &mark.abbr,
                FontId::proportional(9.0),
                Color32::WHITE,
            );
        }
    }

    fn label_color(ui: &egui::Ui, active: bool) -> Color32 {
        if active {
            ui.visuals().strong_text_color()
        } else {
            to_color32(INACTIVE_LABEL)
        }
    }

    /// Draw both label pools and report a click on any of them.
    fn draw_axis_labels(
        &self,
        painter: &egui::Painter,
        ui: &egui::Ui,
        state: &ViewState,
        origin: Pos2,
    ) -> Option<AxisCommand> {
        let pw = self.config.plot_width() as f32;
        let ph = self.config.plot_height() as f32;
        let font = FontId::proportional(LABEL_FONT_SIZE);
        let mut clicked = None;

        let group_y = ph + LABEL_SPACING + self.config.margin.top as f32;
        for (i, (metric, active)) in state.labels(Axis::Horizontal).into_iter().enumerate() {
            let color = Self::label_color(ui, active);
            let galley = painter.layout_no_wrap(metric.label().to_string(), font.clone(), color);
            let center = origin + Vec2::new(pw / 2.0, group_y + LABEL_SPACING * (i + 1) as f32);
            let rect = Rect::from_center_size(center, galley.size());
            painter.galley(rect.min, galley, color);

            if Self::label_clicked(ui, rect, metric) {
                clicked = Some(AxisCommand::new(Axis::Horizontal, metric));
            }
        }

        let group_x = -(self.config.margin.left as f32) / 4.0;
        for (i, (metric, active)) in state.labels(Axis::Vertical).into_iter().enumerate() {
            let color = Self::label_color(ui, active);
            let galley = painter.layout_no_wrap(metric.label().to_string(), font.clone(), color);
            let text = galley.size();
            let center = origin
                + Vec2::new(
                    group_x - LABEL_SPACING * (i + 1) as f32 + LABEL_FONT_SIZE / 2.0,
                    ph / 2.0,
                );
            // Rotated a quarter turn counter-clockwise around its top-left corner.
            let anchor = center + Vec2::new(-text.y / 2.0, text.x / 2.0);
            painter.add(
                TextShape::new(anchor, galley, color).with_angle(-std::f32::consts::FRAC_PI_2),
            );

            let rect = Rect::from_center_size(center, Vec2::new(text.y, text.x));
            if Self::label_clicked(ui, rect, metric) {
                clicked = Some(AxisCommand::new(Axis::Vertical, metric));
            }
        }

        clicked
    }

    fn label_clicked(ui: &egui::Ui, rect: Rect, metric: Metric) -> bool {
        ui.interact(rect, ui.id().with(("axis_label", metric.column())), Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
            .clicked()
    }
}
