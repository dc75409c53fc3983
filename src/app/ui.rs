use super::CsvUploader;
use crate::upload::{SelectedFile, Severity};
use eframe::egui::{self, Align2, Color32, RichText, Stroke};
use rfd::FileDialog;

fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Success => Color32::from_rgb(0, 180, 0),
        Severity::Danger => Color32::from_rgb(220, 50, 50),
        Severity::Info => Color32::from_rgb(70, 140, 220),
        Severity::Secondary => Color32::from_rgb(150, 150, 150),
    }
}

impl CsvUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        self.render_confirm_dialog(ctx);

        let drag_hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.heading("CSV File Uploader");
                ui.add_space(5.0);
                ui.label(
                    RichText::new("Drop CSV files to send them to the ledger server")
                        .color(ui.visuals().text_color().gamma_multiply(0.7)),
                );
            });

            ui.add_space(20.0);

            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Server");
                    ui.add(
                        egui::TextEdit::singleline(&mut self.state.server_url)
                            .desired_width(ui.available_width())
                            .font(egui::TextStyle::Monospace),
                    );
                });
            });

            ui.add_space(20.0);

            self.render_drop_zone(ui, drag_hovering);

            ui.add_space(20.0);

            self.render_messages(ui);
        });
    }

    fn render_drop_zone(&mut self, ui: &mut egui::Ui, drag_hovering: bool) {
        // Highlighted border while a drag is over the window, standing in
        // for the web widget's `dragover` CSS class.
        let stroke = if drag_hovering {
            Stroke::new(2.0, Color32::from_rgb(70, 140, 220))
        } else {
            Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color)
        };

        egui::Frame::none()
            .stroke(stroke)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    let label = if drag_hovering {
                        "Release to upload"
                    } else {
                        "Drag & drop CSV files here"
                    };
                    ui.label(RichText::new(label).heading());
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new("or")
                            .color(severity_color(Severity::Secondary)),
                    );
                    ui.add_space(8.0);
                    if ui.button("📁 Browse files").clicked() {
                        if let Some(paths) = FileDialog::new().pick_files() {
                            let files: Vec<SelectedFile> =
                                paths.into_iter().map(SelectedFile::from_path).collect();
                            self.handle_batch(files);
                        }
                    }
                });
            });
    }

    fn render_messages(&self, ui: &mut egui::Ui) {
        if self.state.messages.is_empty() {
            return;
        }

        egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
            egui::Frame::none()
                .fill(ui.style().visuals.extreme_bg_color)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.add_space(8.0);
                    for message in &self.state.messages {
                        ui.horizontal(|ui| {
                            let icon = match message.severity {
                                Severity::Success => "✅",
                                Severity::Danger => "❌",
                                Severity::Info => "ℹ",
                                Severity::Secondary => "•",
                            };
                            ui.label(icon);
                            ui.colored_label(severity_color(message.severity), &message.text);
                        });
                        ui.add_space(4.0);
                    }
                    ui.add_space(8.0);
                });
        });
    }

    /// Modal yes/no prompt for the oldest server-requested confirmation,
    /// the native stand-in for the browser's blocking `confirm()`.
    fn render_confirm_dialog(&mut self, ctx: &egui::Context) {
        let Some(pending) = self.state.pending_confirms.first().cloned() else {
            return;
        };

        let mut decision = None;
        egui::Window::new("Confirm upload")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&pending.prompt);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Upload anyway").clicked() {
                        decision = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        decision = Some(false);
                    }
                });
            });

        if let Some(accepted) = decision {
            self.resolve_confirm(accepted);
        }
    }
}
