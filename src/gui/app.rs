//! State Scatter Main Application
//! Main window with control panel and the animated scatterplot.

use crate::charts::{ChartRenderer, Transition};
use crate::config::ChartConfig;
use crate::data::{DataLoader, Dataset};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::view::{bind, AxisCommand, Frame, Update, ViewState};
use anyhow::Context;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{error, info, warn};

/// CSV loading result from background thread
enum LoadResult {
    Complete { path: PathBuf, dataset: Dataset },
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExportKind {
    Svg,
    Png,
}

impl ExportKind {
    fn extension(self) -> &'static str {
        match self {
            ExportKind::Svg => "svg",
            ExportKind::Png => "png",
        }
    }
}

/// Main application window.
pub struct ScatterApp {
    config: ChartConfig,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    view_state: Option<ViewState>,
    /// Where the marks end up once the running transition completes.
    settled: Option<Frame>,
    transition: Option<Transition>,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl ScatterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: ChartConfig) -> Self {
        let mut app = Self {
            chart_viewer: ChartViewer::new(config.clone()),
            config,
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            view_state: None,
            settled: None,
            transition: None,
            load_rx: None,
            is_loading: false,
        };
        let path = app.config.data_path.clone();
        app.start_loading(path);
        app
    }

    /// Handle CSV file selection
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    /// Load a dataset in a background thread. Rendering waits for the result.
    fn start_loading(&mut self, path: PathBuf) {
        self.view_state = None;
        self.settled = None;
        self.transition = None;
        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.export_enabled = false;
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        thread::spawn(move || {
            let result = match DataLoader::read_dataset(&path) {
                Ok(dataset) => LoadResult::Complete { path, dataset },
                Err(e) => LoadResult::Error(format!("{}: {}", path.display(), e)),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { path, dataset }) => {
                info!(records = dataset.len(), path = %path.display(), "dataset loaded");
                let state =
                    ViewState::initial(&dataset, self.config.plot_width(), self.config.plot_height());
                self.settled = Some(bind(&dataset, &state));
                self.view_state = Some(state);
                self.control_panel
                    .set_status(&format!("Loaded {} records", dataset.len()));
                self.control_panel.export_enabled = true;
                self.loader.set_dataset(path, dataset);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(message)) => {
                error!(%message, "dataset load failed");
                self.control_panel.set_status(&format!("Error: {}", message));
                self.is_loading = false;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                error!("loader thread exited without a result");
                self.is_loading = false;
            }
        }
    }

    /// Run the pure update and, if the axis changed, animate toward the new frame.
    fn handle_axis_command(&mut self, command: AxisCommand, now: f64) {
        let (Some(dataset), Some(state), Some(settled)) = (
            self.loader.get_dataset(),
            self.view_state.as_ref(),
            self.settled.as_ref(),
        ) else {
            return;
        };

        let (next, update) = state.apply(dataset, command);
        match update {
            Update::Unchanged => {}
            Update::Rejected => warn!(?command, "axis command rejected"),
            Update::Retargeted(axis) => {
                info!(?axis, metric = command.metric.column(), "axis changed");
                let target = bind(dataset, &next);
                let transition = Transition::retarget(
                    self.transition.as_ref(),
                    settled,
                    target.clone(),
                    now,
                    self.config.transition_secs(),
                );
                self.transition = Some(transition);
                self.settled = Some(target);
                self.view_state = Some(next);
            }
        }
    }

    /// Frame to paint at `now`; drops the transition once it has finished.
    fn current_frame(&mut self, now: f64) -> Option<Frame> {
        if let Some(transition) = &self.transition {
            if transition.is_finished(now) {
                self.transition = None;
            } else {
                return Some(transition.sample(now));
            }
        }
        self.settled.clone()
    }

    fn handle_export(&mut self, kind: ExportKind) {
        let Some(path) = self
            .loader
            .get_file_path()
            .map(|data_path| export_path(data_path, kind))
        else {
            self.control_panel.set_status("Error: no dataset loaded");
            return;
        };

        match self.export(kind, &path) {
            Ok(()) => {
                info!(path = %path.display(), "chart exported");
                self.control_panel
                    .set_status(&format!("Exported {}", path.display()));
                if let Err(e) = open::that(&path) {
                    warn!(error = %e, "could not open exported chart");
                }
            }
            Err(e) => {
                error!(error = %format!("{:#}", e), "export failed");
                self.control_panel.set_status(&format!("Error: {:#}", e));
            }
        }
    }

    fn export(&self, kind: ExportKind, path: &Path) -> anyhow::Result<()> {
        let (Some(frame), Some(state)) = (self.settled.as_ref(), self.view_state.as_ref()) else {
            anyhow::bail!("no chart to export");
        };
        match kind {
            ExportKind::Svg => {
                let svg = ChartRenderer::render_svg(frame, state, &self.config)?;
                std::fs::write(path, svg)
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            ExportKind::Png => ChartRenderer::render_png(frame, state, &self.config, path)?,
        }
        Ok(())
    }
}

/// Export target next to the dataset, e.g. `data.csv` -> `data.svg`.
fn export_path(data_path: &Path, kind: ExportKind) -> PathBuf {
    data_path.with_extension(kind.extension())
}

impl eframe::App for ScatterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        let now = ctx.input(|i| i.time);
        let frame = self.current_frame(now);

        // Request repaint while loading or animating
        if self.is_loading || self.transition.is_some() {
            ctx.request_repaint();
        }

        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui, self.view_state.as_ref());
                match action {
                    ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                    ControlPanelAction::ExportSvg => self.handle_export(ExportKind::Svg),
                    ControlPanelAction::ExportPng => self.handle_export(ExportKind::Png),
                    ControlPanelAction::None => {}
                }
            });

        let mut command = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                command = self
                    .chart_viewer
                    .show(ui, frame.as_ref(), self.view_state.as_ref());
            });
        });

        if let Some(command) = command {
            self.handle_axis_command(command, now);
            ctx.request_repaint();
        }
    }
}
