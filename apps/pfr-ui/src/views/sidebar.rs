use pfr_core::{Real, kelvin_to_celsius, reactor};
use pfr_params::{ParamField, SimulationParameters};

#[derive(Default)]
pub struct SidebarView {
    show_reactor_info: bool,
}

/// What the operator asked for this frame.
#[derive(Debug, Default)]
pub struct SidebarActions {
    pub edits: Vec<(ParamField, Real)>,
    pub reset: bool,
    pub run: bool,
}

impl SidebarView {
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        params: &SimulationParameters,
        running: bool,
    ) -> SidebarActions {
        let mut actions = SidebarActions::default();

        ui.heading("Reactor Parameters");
        ui.separator();

        for field in ParamField::ALL {
            let range = field.range();
            let mut value = params.get(field);

            ui.label(format!("{} [{}]", field.label(), range.unit));
            let decimals = if range.step < 1.0 { 1 } else { 0 };
            let response = ui.add(
                egui::Slider::new(&mut value, range.min..=range.max)
                    .step_by(range.step)
                    .fixed_decimals(decimals)
                    .suffix(format!(" {}", range.unit)),
            );
            if response.changed() {
                actions.edits.push((field, value));
            }
            ui.small(slider_note(field, value));
            ui.add_space(6.0);
        }

        ui.separator();

        ui.horizontal(|ui| {
            let label = if running {
                "Running..."
            } else {
                "Run Simulation"
            };
            if ui
                .add_enabled(!running, egui::Button::new(label))
                .clicked()
            {
                actions.run = true;
            }
            if ui.button("Reset").clicked() {
                actions.reset = true;
            }
            if running {
                ui.spinner();
            }
        });

        ui.separator();
        ui.checkbox(&mut self.show_reactor_info, "Show reactor geometry");
        if self.show_reactor_info {
            egui::Grid::new("reactor_info").num_columns(2).show(ui, |ui| {
                ui.label("Length");
                ui.label(format!("{:.2} m", reactor::LENGTH_M));
                ui.end_row();
                ui.label("Tube diameter");
                ui.label(format!("{:.2} m", reactor::TUBE_DIAMETER_M));
                ui.end_row();
            });
        }

        actions
    }
}

/// Annotation under a slider: Celsius for temperatures, residence time for
/// the flow velocity.
pub fn slider_note(field: ParamField, value: Real) -> String {
    if field.is_temperature() {
        format!("= {:.1} °C", kelvin_to_celsius(value))
    } else {
        format!(
            "Residence time: {:.1} s",
            reactor::residence_time_s(value)
        )
    }
}
