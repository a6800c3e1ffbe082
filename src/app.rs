// src/app.rs
//
// Calculateur de pureau — module App (racine)
// -------------------------------------------
// Rôle:
// - Déclarer les sous-modules (état, vue, catalogue, dépôt)
// - Ré-exporter AppPureau (pour main.rs: use crate::app::AppPureau;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Enter est géré dans vue.rs (quand un champ a le focus).

pub mod catalogue;
pub mod depot;
pub mod etat;
pub mod vue;

pub use etat::AppPureau;

use eframe::egui;

impl eframe::App for AppPureau {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer le message d’erreur (résultats conservés).
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.clear_erreur();
        }

        ctx.set_visuals(if self.sombre {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
