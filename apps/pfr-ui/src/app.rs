use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui_file_dialog::FileDialog;
use pfr_app::{Completion, Session};
use pfr_client::{
    ClientConfig, ClientError, ClientResult, HttpBackend, ServiceInfo, SimulationBackend,
};
use pfr_params::SimulationRequest;
use pfr_results::{SimulationResult, to_chart_series, write_chart_series_csv};
use tracing::{info, warn};

use crate::views::{DashboardActions, DashboardView, SidebarActions, SidebarView};

pub struct PfrApp {
    session: Session,
    sidebar: SidebarView,
    dashboard: DashboardView,
    file_dialog: FileDialog,
    last_directory: Option<PathBuf>,
    status_message: Option<String>,
}

impl PfrApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config_path = std::env::args().nth(1).map(PathBuf::from);
        let (backend, status_message) = build_backend(config_path.as_deref());

        let mut session = Session::new(backend);
        let ctx = cc.egui_ctx.clone();
        session.set_waker(Arc::new(move || ctx.request_repaint()));

        Self {
            session,
            sidebar: SidebarView::default(),
            dashboard: DashboardView::default(),
            file_dialog: FileDialog::new(),
            last_directory: None,
            status_message,
        }
    }

    fn poll_session(&mut self) {
        match self.session.poll() {
            Some(Completion::Applied(report)) => {
                info!(
                    request_id = %report.request_id,
                    succeeded = report.succeeded,
                    elapsed_s = report.elapsed_s,
                    "run settled"
                );
            }
            Some(Completion::Stale { request_id }) => {
                warn!(%request_id, "dropped stale completion");
            }
            None => {}
        }
    }

    fn apply_sidebar_actions(&mut self, actions: SidebarActions) {
        for (field, value) in actions.edits {
            self.session.set_parameter(field, value);
        }
        if actions.reset {
            self.session.reset_parameters();
        }
        if actions.run && self.session.trigger_run().is_some() {
            self.status_message = None;
        }
    }

    fn export_csv(&mut self, path: &Path) {
        let Some(result) = self.session.state().result() else {
            self.status_message = Some("Nothing to export yet".to_string());
            return;
        };
        let series = to_chart_series(result);
        match write_chart_series_csv(path, &series) {
            Ok(()) => {
                if let Some(parent) = path.parent() {
                    self.last_directory = Some(parent.to_path_buf());
                }
                self.status_message = Some(format!(
                    "Exported {} points to {}",
                    series.len(),
                    path.display()
                ));
            }
            Err(e) => {
                self.status_message = Some(format!("Failed to export CSV: {}", e));
            }
        }
    }
}

impl eframe::App for PfrApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_session();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("PFR Simulator");
                ui.separator();
                ui.label(format!("Service: {}", self.session.backend().describe()));
                ui.separator();
                ui.label(format!("Status: {}", self.session.state().label()));
            });
        });

        let sidebar_actions = egui::SidePanel::left("parameters")
            .default_width(300.0)
            .show(ctx, |ui| {
                self.sidebar
                    .show(ui, &self.session.parameters(), self.session.is_running())
            })
            .inner;
        self.apply_sidebar_actions(sidebar_actions);

        let dashboard_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let actions = self.dashboard.show(
                    ui,
                    self.session.state(),
                    self.session.controller().last_report(),
                );
                if let Some(message) = &self.status_message {
                    ui.separator();
                    ui.label(message);
                }
                actions
            })
            .inner;

        if dashboard_actions.export_csv {
            self.file_dialog.save_file();
        }

        self.file_dialog.update(ctx);
        if let Some(path) = self.file_dialog.take_selected() {
            self.export_csv(&path);
        }

        if self.session.is_running() {
            // Keep the spinner moving until the waker fires.
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

/// Stands in for the HTTP backend when it cannot be built, so every run
/// fails with the configuration error instead of the app refusing to start.
struct UnavailableBackend {
    reason: ClientError,
}

impl SimulationBackend for UnavailableBackend {
    fn simulate(&self, _request: &SimulationRequest) -> ClientResult<SimulationResult> {
        Err(self.reason.clone())
    }

    fn service_info(&self) -> ClientResult<ServiceInfo> {
        Err(self.reason.clone())
    }

    fn describe(&self) -> String {
        "unavailable".to_string()
    }
}

fn build_backend(config_path: Option<&Path>) -> (Arc<dyn SimulationBackend>, Option<String>) {
    let config = match config_path {
        Some(path) => ClientConfig::from_yaml_file(path).map(ClientConfig::with_env_overrides),
        None => Ok(ClientConfig::from_env()),
    };

    match config.and_then(|c| HttpBackend::new(&c)) {
        Ok(backend) => (Arc::new(backend), None),
        Err(err) => {
            warn!("simulation backend unavailable: {err}");
            let message = err.to_string();
            (Arc::new(UnavailableBackend { reason: err }), Some(message))
        }
    }
}
