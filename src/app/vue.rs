// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppPureau (etat.rs) pour natif + wasm
// - Trois onglets : Calculateur / Pureau dicté / Pente
// - Tactile : gros boutons, Enter calcule quand un champ a le focus
// - Lecture pas à pas : panneau commun aux deux onglets

use eframe::egui;

use super::depot::ContenuChantier;
use super::etat::{AppPureau, Onglet};
use crate::noyau::curseur::CommandeLecture;
use crate::noyau::format::format_decimal;
use crate::noyau::parametres::Champ;
use crate::noyau::rampant::ResultatRampant;

const LIBELLES_CALCUL: [&str; 8] = [
    "Rampant 1 (cm)",
    "Rampant 2 (cm)",
    "Premier rang 1 (cm)",
    "Premier rang 2 (cm)",
    "Espace faîtage 1 (cm)",
    "Espace faîtage 2 (cm)",
    "Pureau min (cm)",
    "Pureau max (cm)",
];

impl AppPureau {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Calculateur de pureau");
                    let theme = if self.sombre { "☀ Clair" } else { "🌙 Sombre" };
                    if ui.button(theme).on_hover_text("Change le thème").clicked() {
                        self.basculer_theme();
                    }
                });
                ui.add_space(6.0);

                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.onglet, Onglet::Calculateur, "Calculateur");
                    ui.selectable_value(&mut self.onglet, Onglet::PureauDicte, "Pureau dicté");
                    ui.selectable_value(&mut self.onglet, Onglet::Pente, "Pente");
                });

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                match self.onglet {
                    Onglet::Calculateur => self.ui_calculateur(ui),
                    Onglet::PureauDicte => self.ui_dicte(ui),
                    Onglet::Pente => self.ui_pente(ui),
                }

                self.ui_messages(ui);

                if self.lecture.is_some() {
                    ui.add_space(8.0);
                    ui.separator();
                    self.ui_lecture(ui);
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_chantiers(ui);
            });
    }

    /* ------------------------ Calculateur ------------------------ */

    fn ui_calculateur(&mut self, ui: &mut egui::Ui) {
        self.ui_tuiles(ui);

        ui.add_space(8.0);

        let mut entree = false;
        egui::Grid::new("formulaire_calcul")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Chantier :");
                ui.add(
                    egui::TextEdit::singleline(&mut self.formulaire.nom_chantier)
                        .hint_text("Chantier du jour si vide"),
                );
                ui.end_row();

                for (i, libelle) in LIBELLES_CALCUL.iter().enumerate() {
                    ui.label(*libelle);
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.formulaire.champs[i])
                            .id_source(Champ::CALCUL[i].nom())
                            .desired_width(120.0),
                    );
                    entree |= Self::entree_validee(ui, &resp);
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        ui.horizontal_wrapped(|ui| {
            if Self::bouton(ui, "Calculer", "Calcule les rangs des deux rampants") || entree {
                self.calculer();
            }
            if Self::bouton(ui, "Enregistrer", "Enregistre le chantier") {
                self.enregistrer_calcul();
            }
            ui.separator();
            ui.add(
                egui::TextEdit::singleline(&mut self.nom_nouvelle_tuile)
                    .hint_text("Nom de la tuile")
                    .desired_width(120.0),
            );
            if Self::bouton(ui, "Nouvelle tuile", "Ajoute la plage de pureau à mes tuiles") {
                self.nouvelle_tuile();
            }
        });

        if let Some(r) = &self.resultat {
            ui.add_space(8.0);
            if r.hors_pureau() {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    "Hors pureau : aucun nombre de rangs commun aux deux rampants",
                );
            } else if let Some(n) = r.nombre_rangs_commun() {
                ui.label(format!("Rangs communs : {n}"));
            }
        }

        let mut lire = None;
        if let Some(r) = &self.resultat {
            for (i, res) in r.rampants().into_iter().enumerate() {
                ui.add_space(6.0);
                if Self::ui_rampant(ui, i, res) {
                    lire = Some(i);
                }
            }
        }
        if let Some(i) = lire {
            self.lire_tracage(i);
        }
    }

    fn ui_tuiles(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Tuiles")
            .default_open(false)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.recherche)
                        .hint_text("Rechercher (nom, marque)")
                        .desired_width(ui.available_width()),
                );

                let trouvees = self.tuiles_trouvees();
                if trouvees.is_empty() {
                    ui.label("Aucune tuile");
                }
                let mut choix = None;
                let mut modifier = None;
                let mut supprimer = None;
                for (i, trouvee) in trouvees.iter().enumerate() {
                    let t = &trouvee.tuile;
                    ui.push_id(("tuile", i), |ui| {
                        ui.horizontal(|ui| {
                            if ui.button("Choisir").clicked() {
                                choix = Some(i);
                            }
                            ui.label(format!(
                                "{} {} · {} · {}–{} cm",
                                t.marque,
                                t.nom,
                                t.type_tuile,
                                format_decimal(t.pureau_min, 1),
                                format_decimal(t.pureau_max, 1)
                            ));
                            // mes tuiles seulement
                            if let Some(index) = trouvee.perso {
                                if ui
                                    .button("Modifier")
                                    .on_hover_text("Remplace la plage et les décalages par ceux du formulaire")
                                    .clicked()
                                {
                                    modifier = Some(index);
                                }
                                if ui.button("Supprimer").clicked() {
                                    supprimer = Some(index);
                                }
                            }
                        });
                    });
                }
                if let Some(t) = choix.and_then(|i| trouvees.get(i)) {
                    self.choisir_tuile(&t.tuile);
                }
                if let Some(index) = modifier {
                    self.modifier_tuile(index);
                }
                if let Some(index) = supprimer {
                    self.supprimer_tuile(index);
                }
            });
    }

    /// Retourne true si "Lire" a été cliqué.
    fn ui_rampant(ui: &mut egui::Ui, i: usize, r: &ResultatRampant) -> bool {
        let mut lire = false;
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.strong(format!("Rampant {}", i + 1));
            ui.label(format!(
                "{} rangs · pureau {} cm{}",
                r.nombre_rangs,
                r.pureau_calcule(),
                if r.est_pile_poil() { "" } else { " (dernier rang différent)" }
            ));

            let d = &r.detail;
            ui.label(format!(
                "Premier rang {} cm, {} rangs à {} cm",
                format_decimal(d.premier_rang, 2),
                d.rangs_complets,
                format_decimal(d.pureau_complet, 2)
            ));
            if let Some(dernier) = d.dernier_rang {
                ui.label(format!("Dernier rang : {} cm", format_decimal(dernier, 2)));
            }
            if let Some(s) = r.rangs_supplementaires {
                ui.label(format!(
                    "Encore {} rang(s) possible(s), reste {} cm",
                    s.nombre,
                    format_decimal(s.cote_restante, 2)
                ));
            }

            ui.label("Traçage :");
            Self::champ_monospace(
                ui,
                &format!("tracage_{i}"),
                &r.tracage_formate().join("  "),
                2,
            );
            lire = ui.button("Lire").clicked();
        });
        lire
    }

    /* ------------------------ Pureau dicté ------------------------ */

    fn ui_dicte(&mut self, ui: &mut egui::Ui) {
        let mut entree = false;
        egui::Grid::new("formulaire_dicte")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                let f = &mut self.formulaire_dicte;
                for (libelle, valeur) in [
                    ("Chantier :", &mut f.nom_chantier),
                    ("Premier rang (cm)", &mut f.premier_rang),
                    ("Pureau (cm)", &mut f.pureau),
                    ("Nombre de rangs", &mut f.nombre_rangs),
                ] {
                    ui.label(libelle);
                    let resp = ui.add(egui::TextEdit::singleline(valeur).desired_width(160.0));
                    entree |= Self::entree_validee(ui, &resp);
                    ui.end_row();
                }
            });

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if Self::bouton(ui, "Calculer", "Calcule les cotes") || entree {
                self.calculer_dicte();
            }
            if Self::bouton(ui, "Enregistrer", "Enregistre le chantier") {
                self.enregistrer_dicte();
            }
        });

        let mut lire = false;
        if let Some(r) = &self.resultat_dicte {
            ui.add_space(8.0);
            ui.strong(r.nom_chantier.as_str());
            ui.label(format!("{} cotes :", r.cotes.len()));
            Self::champ_monospace(ui, "cotes_dicte", &r.cotes.join("  "), 2);
            lire = ui.button("Lire").clicked();
        }
        if lire {
            self.lire_dicte();
        }
    }

    /* ------------------------ Pente ------------------------ */

    /// Chaque champ convertit vers l’autre à la saisie.
    fn ui_pente(&mut self, ui: &mut egui::Ui) {
        let mut degres = false;
        let mut pourcentage = false;
        egui::Grid::new("formulaire_pente")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Degrés (°)");
                degres = ui
                    .add(egui::TextEdit::singleline(&mut self.formulaire_pente.degres).desired_width(120.0))
                    .changed();
                ui.end_row();

                ui.label("Pourcentage (%)");
                pourcentage = ui
                    .add(egui::TextEdit::singleline(&mut self.formulaire_pente.pourcentage).desired_width(120.0))
                    .changed();
                ui.end_row();
            });

        if degres {
            self.convertir_degres();
        } else if pourcentage {
            self.convertir_pourcentage();
        }

        if !self.formulaire_pente.resultat.is_empty() {
            ui.add_space(6.0);
            Self::champ_monospace(ui, "resultat_pente", &self.formulaire_pente.resultat, 1);
        }
    }

    /* ------------------------ Lecture ------------------------ */

    fn ui_lecture(&mut self, ui: &mut egui::Ui) {
        let Some(curseur) = &self.lecture else {
            return;
        };
        ui.strong(format!("Lecture : {} ({})", curseur.libelle(), curseur.progression()));
        Self::champ_monospace(ui, "annonce", &self.annonce, 1);

        let mut commande = None;
        ui.horizontal(|ui| {
            for (label, c) in [
                ("Précédent", CommandeLecture::Precedent),
                ("Répéter", CommandeLecture::Repeter),
                ("Suivant", CommandeLecture::Suivant),
                ("Stop", CommandeLecture::Stop),
            ] {
                if ui.add_sized([80.0, 32.0], egui::Button::new(label)).clicked() {
                    commande = Some(c);
                }
            }
        });
        if let Some(c) = commande {
            self.commande_lecture(c);
        }
    }

    /* ------------------------ Chantiers ------------------------ */

    fn ui_chantiers(&mut self, ui: &mut egui::Ui) {
        let mut reprendre = None;
        let mut supprimer = None;

        egui::CollapsingHeader::new(format!("Chantiers ({})", self.chantiers().len()))
            .default_open(false)
            .show(ui, |ui| {
                for c in self.chantiers() {
                    ui.push_id(c.id, |ui| {
                        ui.horizontal(|ui| {
                            let genre = match c.contenu {
                                ContenuChantier::Pureau(_) => "calcul",
                                ContenuChantier::Dicte(_) => "dicté",
                            };
                            ui.label(format!("{} · {} · {}", c.nom, c.date.format("%d/%m/%Y"), genre));
                            if ui.button("Reprendre").clicked() {
                                reprendre = Some(c.id);
                            }
                            if ui.button("Supprimer").clicked() {
                                supprimer = Some(c.id);
                            }
                        });
                    });
                }
            });

        if let Some(id) = reprendre {
            self.reprendre(id);
        }
        if let Some(id) = supprimer {
            self.supprimer(id);
        }
    }

    /* ------------------------ Briques ------------------------ */

    fn ui_messages(&self, ui: &mut egui::Ui) {
        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        } else if !self.info.is_empty() {
            ui.add_space(6.0);
            ui.label(&self.info);
        }
    }

    /// Enter seulement si le champ avait le focus (egui le rend à la validation).
    fn entree_validee(ui: &egui::Ui, resp: &egui::Response) -> bool {
        resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.add(egui::Label::new(egui::RichText::new(contenu).monospace()).wrap());
                });
            });
    }

    fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> bool {
        ui.add_sized([110.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip)
            .clicked()
    }
}
