use egui_plot::{Legend, Line, Plot, PlotPoints};
use pfr_app::{RunReport, RunState};
use pfr_core::reactor;
use pfr_results::{ChartPoint, SimulationResult, SummaryMetrics, summary_metrics, to_chart_series};

const CHART_HEIGHT: f32 = 240.0;

#[derive(Default)]
pub struct DashboardView {
    show_details: bool,
}

#[derive(Debug, Default)]
pub struct DashboardActions {
    pub export_csv: bool,
}

/// One headline number.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: String,
    pub detail: String,
}

impl DashboardView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        state: &RunState,
        report: Option<&RunReport>,
    ) -> DashboardActions {
        let mut actions = DashboardActions::default();

        match state {
            RunState::Idle => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.heading("No simulation results yet");
                    ui.label("Adjust the parameters on the left and press Run Simulation.");
                });
            }
            RunState::Running => {
                ui.vertical_centered(|ui| {
                    ui.add_space(80.0);
                    ui.spinner();
                    ui.label("Running simulation...");
                });
            }
            RunState::Failed(failure) => {
                ui.group(|ui| {
                    ui.colored_label(egui::Color32::RED, "Simulation failed");
                    ui.label(&failure.message);
                });
            }
            RunState::Succeeded(result) => {
                self.show_result(ui, result, report, &mut actions);
            }
        }

        actions
    }

    fn show_result(
        &mut self,
        ui: &mut egui::Ui,
        result: &SimulationResult,
        report: Option<&RunReport>,
        actions: &mut DashboardActions,
    ) {
        let summary = match summary_metrics(result) {
            Ok(summary) => summary,
            Err(e) => {
                ui.colored_label(egui::Color32::RED, format!("Cannot display result: {}", e));
                return;
            }
        };
        let series = to_chart_series(result);

        ui.horizontal(|ui| {
            for card in kpi_cards(&summary) {
                ui.group(|ui| {
                    ui.set_min_width(160.0);
                    ui.vertical(|ui| {
                        ui.small(card.title);
                        ui.heading(card.value);
                        ui.small(card.detail);
                    });
                });
            }
        });

        if let Some(report) = report {
            ui.label(format!(
                "Run {} finished in {:.2}s at {}",
                report.request_id,
                report.elapsed_s,
                report.finished_at.format("%H:%M:%S UTC")
            ));
        }

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label("Temperature profile");
            Plot::new("temperature_profile")
                .legend(Legend::default())
                .height(CHART_HEIGHT)
                .x_axis_label("Axial position (m)")
                .y_axis_label("Temperature (K)")
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(temperature_points(&series))
                            .name("Temperature")
                            .color(egui::Color32::from_rgb(220, 90, 60)),
                    );
                });

            ui.add_space(8.0);
            ui.label("Concentration profile");
            Plot::new("concentration_profile")
                .legend(Legend::default())
                .height(CHART_HEIGHT)
                .x_axis_label("Axial position (m)")
                .y_axis_label("Concentration (mol/m³)")
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(concentration_points(&series))
                            .name("Concentration")
                            .color(egui::Color32::from_rgb(60, 120, 220)),
                    );
                });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .button(if self.show_details {
                        "Hide Details"
                    } else {
                        "Show Details"
                    })
                    .clicked()
                {
                    self.show_details = !self.show_details;
                }
                if ui.button("Export CSV").clicked() {
                    actions.export_csv = true;
                }
            });

            if self.show_details {
                details_grid(ui, &summary);
            }
        });
    }
}

fn details_grid(ui: &mut egui::Ui, summary: &SummaryMetrics) {
    egui::Grid::new("result_details")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            let rows = [
                ("Inlet temperature", format!("{:.1} K", summary.inlet_temperature)),
                ("Outlet temperature", format!("{:.1} K", summary.outlet_temperature)),
                (
                    "Inlet concentration",
                    format!("{:.3} mol/m³", summary.inlet_concentration),
                ),
                (
                    "Outlet concentration",
                    format!("{:.3} mol/m³", summary.outlet_concentration),
                ),
                ("Reactor length", format!("{:.2} m", reactor::LENGTH_M)),
                ("Samples", summary.sample_count.to_string()),
            ];
            for (label, value) in rows {
                ui.label(label);
                ui.label(value);
                ui.end_row();
            }
        });
}

pub fn kpi_cards(summary: &SummaryMetrics) -> Vec<KpiCard> {
    vec![
        KpiCard {
            title: "Final conversion",
            value: format!("{:.1} %", summary.final_conversion_percent),
            detail: "of reactant at the outlet".to_string(),
        },
        KpiCard {
            title: "Max temperature",
            value: format!("{:.1} K", summary.max_temperature),
            detail: format!("{:.1} °C", summary.max_temperature_celsius()),
        },
        KpiCard {
            title: "Temperature rise",
            value: format!("{:+.1} K", summary.temperature_rise()),
            detail: "outlet minus inlet".to_string(),
        },
    ]
}

fn temperature_points(series: &[ChartPoint]) -> PlotPoints {
    series
        .iter()
        .map(|p| [p.position_m, p.temperature])
        .collect()
}

fn concentration_points(series: &[ChartPoint]) -> PlotPoints {
    series
        .iter()
        .map(|p| [p.position_m, p.concentration])
        .collect()
}
