//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir les formulaires (calculateur + pureau dicté), les derniers
//! résultats, la lecture en cours et l’erreur, et offrir les actions des
//! boutons sans logique d’affichage.
//!
//! Contrats :
//! - Aucun calcul ici : les formulaires sont lus puis confiés au noyau.
//! - Le noyau ne voit jamais le dépôt ; c’est cet état qui enregistre / reprend.
//! - Une erreur n’efface pas le dernier résultat affiché.

use chrono::Local;
use num_traits::ToPrimitive;
use tracing::{debug, info, warn};

use super::catalogue::{catalogue_par_defaut, rechercher, Tuile, TypeTuile};
use super::depot::{Chantier, ContenuChantier, Depot, DepotMemoire, IdChantier};
use crate::config::Config;
use crate::noyau::constantes::DECIMALES_TRACAGE;
use crate::noyau::curseur::{CommandeLecture, CurseurCotes, Evenement, MESSAGE_FIN};
use crate::noyau::dicte::nom_par_defaut;
use crate::noyau::format::{format_decimal, lire_nombre};
use crate::noyau::parametres::Champ;
use crate::noyau::pente::{degres_vers_pourcentage, pourcentage_vers_degres};
use crate::noyau::{
    calculer_dicte, CalculateurPureau, ErreurCalcul, ParametresCalcul, ParametresDictes,
    ResultatCalcul, ResultatDicte,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Onglet {
    #[default]
    Calculateur,
    PureauDicte,
    Pente,
}

/// Saisie brute du calculateur : une chaîne par champ, dans l’ordre `Champ::CALCUL`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaireCalcul {
    pub nom_chantier: String,
    pub champs: [String; 8],
}

impl FormulaireCalcul {
    /// Lecture tolérante (virgule acceptée) ; un champ illisible devient NaN
    /// et sera refusé par la validation du noyau.
    pub fn parametres(&self) -> ParametresCalcul {
        let [r1, r2, pr1, pr2, ef1, ef2, pmin, pmax] = self.champs.each_ref().map(|s| lire_nombre(s));
        ParametresCalcul {
            rampant1: r1,
            rampant2: r2,
            premier_rang1: pr1,
            premier_rang2: pr2,
            espace_faitage1: ef1,
            espace_faitage2: ef2,
            pureau_min: pmin,
            pureau_max: pmax,
        }
    }

    fn remplir(&mut self, params: &ParametresCalcul) {
        self.champs = Champ::CALCUL.map(|c| params.valeur(c).to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulaireDicte {
    pub nom_chantier: String,
    pub premier_rang: String,
    pub pureau: String,
    pub nombre_rangs: String,
}

impl FormulaireDicte {
    pub fn parametres(&self) -> ParametresDictes {
        ParametresDictes {
            nom_chantier: self.nom_chantier.trim().to_string(),
            premier_rang: lire_nombre(&self.premier_rang),
            pureau: lire_nombre(&self.pureau),
            nombre_rangs: lire_nombre_rangs(&self.nombre_rangs),
        }
    }

    fn remplir(&mut self, params: &ParametresDictes) {
        self.nom_chantier = params.nom_chantier.clone();
        self.premier_rang = params.premier_rang.to_string();
        self.pureau = params.pureau.to_string();
        self.nombre_rangs = params.nombre_rangs.to_string();
    }
}

/// Résultat de recherche : `perso` = indice dans mes tuiles (modifiable).
#[derive(Debug, Clone, PartialEq)]
pub struct TuileTrouvee {
    pub tuile: Tuile,
    pub perso: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormulairePente {
    pub degres: String,
    pub pourcentage: String,
    pub resultat: String,
}

/// Nombre de rangs saisi : partie entière ; illisible ou négatif => 0
/// (refusé par le noyau) ; au-delà de u32 => u32::MAX (=> `NombreRangsDepasse`).
fn lire_nombre_rangs(saisie: &str) -> u32 {
    let n = lire_nombre(saisie).trunc();
    if !(n >= 0.0) {
        return 0;
    }
    n.min(f64::from(u32::MAX)).to_u32().unwrap_or(0)
}

pub struct AppPureau {
    pub onglet: Onglet,

    // --- calculateur ---
    pub formulaire: FormulaireCalcul,
    pub recherche: String,
    pub nom_nouvelle_tuile: String,
    pub resultat: Option<ResultatCalcul>,

    // --- pureau dicté ---
    pub formulaire_dicte: FormulaireDicte,
    pub resultat_dicte: Option<ResultatDicte>,

    // --- conversion de pente ---
    pub formulaire_pente: FormulairePente,

    // --- lecture pas à pas ---
    pub lecture: Option<CurseurCotes>,
    pub annonce: String,

    // --- messages ---
    pub erreur: String,
    pub info: String,

    /// Thème sombre (bascule manuelle).
    pub sombre: bool,

    catalogue: Vec<Tuile>,
    depot: Box<dyn Depot>,
    calculateur: CalculateurPureau,
}

impl Default for AppPureau {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppPureau {
    pub fn new(config: &Config) -> Self {
        Self::avec(config, catalogue_par_defaut(), Box::<DepotMemoire>::default())
    }

    /// Catalogue importé + dépôt fournis par l’appelant.
    pub fn avec(config: &Config, catalogue: Vec<Tuile>, depot: Box<dyn Depot>) -> Self {
        Self {
            onglet: Onglet::default(),
            formulaire: FormulaireCalcul::default(),
            recherche: String::new(),
            nom_nouvelle_tuile: String::new(),
            resultat: None,
            formulaire_dicte: FormulaireDicte::default(),
            resultat_dicte: None,
            formulaire_pente: FormulairePente::default(),
            lecture: None,
            annonce: String::new(),
            erreur: String::new(),
            info: String::new(),
            sombre: false,
            catalogue,
            depot,
            calculateur: CalculateurPureau::new(config.limites()),
        }
    }

    /* ------------------------ Messages ------------------------ */

    /// Échap : efface seulement le message d’erreur.
    pub fn clear_erreur(&mut self) {
        self.erreur.clear();
    }

    pub fn basculer_theme(&mut self) {
        self.sombre = !self.sombre;
        debug!(sombre = self.sombre, "thème");
    }

    fn set_erreur(&mut self, e: &ErreurCalcul) {
        warn!(erreur = %e, "saisie refusée");
        self.erreur = e.to_string();
        self.info.clear();
    }

    fn set_info(&mut self, msg: impl Into<String>) {
        self.erreur.clear();
        self.info = msg.into();
    }

    /* ------------------------ Calculateur ------------------------ */

    pub fn calculer(&mut self) {
        let params = self.formulaire.parametres();
        match self.calculateur.calculer(&params) {
            Ok(r) => {
                info!(hors_pureau = r.hors_pureau(), "calcul effectué");
                self.resultat = Some(r);
                self.erreur.clear();
                self.info.clear();
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /// Tuiles importées puis mes tuiles, filtrées par la recherche.
    pub fn tuiles_trouvees(&self) -> Vec<TuileTrouvee> {
        let importees = rechercher(&self.catalogue, &self.recherche)
            .into_iter()
            .map(|t| TuileTrouvee {
                tuile: t.clone(),
                perso: None,
            });
        let perso = self
            .depot
            .tuiles()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.correspond(&self.recherche))
            .map(|(i, t)| TuileTrouvee {
                tuile: t.clone(),
                perso: Some(i),
            });
        importees.chain(perso).collect()
    }

    /// Sélection : décalages + plage de pureau de la tuile, rampants conservés.
    pub fn choisir_tuile(&mut self, tuile: &Tuile) {
        let saisie = [self.formulaire.champs[0].clone(), self.formulaire.champs[1].clone()];
        self.formulaire.remplir(&tuile.parametres(f64::NAN, f64::NAN));
        // rampants : saisie d’origine, au caractère près
        let [r1, r2] = saisie;
        self.formulaire.champs[0] = r1;
        self.formulaire.champs[1] = r2;
        debug!(tuile = %tuile.nom, "tuile choisie");
    }

    /// Plage de pureau + décalages du rampant 1 => nouvelle tuile perso.
    pub fn nouvelle_tuile(&mut self) {
        let Some(p) = self.parametres_tuile() else {
            return;
        };
        let nom = self.nom_nouvelle_tuile.trim();
        let tuile = Tuile {
            nom: if nom.is_empty() { "Ma tuile".to_string() } else { nom.to_string() },
            marque: String::new(),
            type_tuile: TypeTuile::FaibleGalbe,
            pureau_min: p.pureau_min,
            pureau_max: p.pureau_max,
            pureau_depart: p.premier_rang1,
            espace_faitage: p.espace_faitage1,
        };
        self.set_info(format!("Tuile \"{}\" ajoutée", tuile.nom));
        self.depot.ajouter_tuile(tuile);
        self.nom_nouvelle_tuile.clear();
    }

    /// Tuile perso `index` <- plage + décalages du formulaire (nom conservé,
    /// sauf si un nouveau nom est saisi).
    pub fn modifier_tuile(&mut self, index: usize) {
        let Some(mut tuile) = self.depot.tuiles().get(index).cloned() else {
            return;
        };
        let Some(p) = self.parametres_tuile() else {
            return;
        };
        let nom = self.nom_nouvelle_tuile.trim();
        if !nom.is_empty() {
            tuile.nom = nom.to_string();
        }
        tuile.pureau_min = p.pureau_min;
        tuile.pureau_max = p.pureau_max;
        tuile.pureau_depart = p.premier_rang1;
        tuile.espace_faitage = p.espace_faitage1;

        self.set_info(format!("Tuile \"{}\" modifiée", tuile.nom));
        self.depot.modifier_tuile(index, tuile);
        self.nom_nouvelle_tuile.clear();
    }

    pub fn supprimer_tuile(&mut self, index: usize) {
        if self.depot.supprimer_tuile(index) {
            self.set_info("Tuile supprimée");
        }
    }

    /// Formulaire lu pour une tuile : longueurs de rampant facultatives.
    fn parametres_tuile(&mut self) -> Option<ParametresCalcul> {
        let p = self.formulaire.parametres();
        match p.valider_tuile() {
            Ok(()) => Some(p),
            Err(e) => {
                self.set_erreur(&e);
                None
            }
        }
    }

    pub fn enregistrer_calcul(&mut self) {
        let p = self.formulaire.parametres();
        if let Err(e) = p.valider() {
            self.set_erreur(&e);
            return;
        }
        let date = Local::now().date_naive();
        let nom = match self.formulaire.nom_chantier.trim() {
            "" => nom_par_defaut(date),
            n => n.to_string(),
        };
        let id = self
            .depot
            .enregistrer_chantier(nom.clone(), date, ContenuChantier::Pureau(p));
        info!(?id, "chantier enregistré");
        self.set_info(format!("Chantier \"{nom}\" enregistré"));
    }

    /* ------------------------ Pureau dicté ------------------------ */

    pub fn calculer_dicte(&mut self) {
        match calculer_dicte(&self.formulaire_dicte.parametres()) {
            Ok(r) => {
                self.resultat_dicte = Some(r);
                self.erreur.clear();
                self.info.clear();
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /// Enregistre le dernier calcul dicté (calculé au besoin).
    pub fn enregistrer_dicte(&mut self) {
        if self.resultat_dicte.is_none() {
            self.calculer_dicte();
        }
        let Some(r) = &self.resultat_dicte else {
            return;
        };
        let params = ParametresDictes {
            nom_chantier: r.nom_chantier.clone(),
            premier_rang: r.premier_rang,
            pureau: r.pureau,
            nombre_rangs: r.nombre_rangs,
        };
        let nom = r.nom_chantier.clone();
        let id = self
            .depot
            .enregistrer_chantier(nom.clone(), r.date, ContenuChantier::Dicte(params));
        info!(?id, "chantier dicté enregistré");
        self.set_info(format!("Chantier \"{nom}\" enregistré"));
    }

    /* ------------------------ Conversion de pente ------------------------ */

    /// Degrés saisis => pourcentage (2 décimales) dans l’autre champ.
    pub fn convertir_degres(&mut self) {
        let degres = lire_nombre(&self.formulaire_pente.degres);
        match degres_vers_pourcentage(degres) {
            Ok(pourcentage) => {
                let texte = format_decimal(pourcentage, DECIMALES_TRACAGE);
                self.formulaire_pente.resultat = format!("{degres}° = {texte}%");
                self.formulaire_pente.pourcentage = texte;
                self.erreur.clear();
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    pub fn convertir_pourcentage(&mut self) {
        let pourcentage = lire_nombre(&self.formulaire_pente.pourcentage);
        match pourcentage_vers_degres(pourcentage) {
            Ok(degres) => {
                let texte = format_decimal(degres, DECIMALES_TRACAGE);
                self.formulaire_pente.resultat = format!("{pourcentage}% = {texte}°");
                self.formulaire_pente.degres = texte;
                self.erreur.clear();
            }
            Err(e) => self.set_erreur(&e),
        }
    }

    /* ------------------------ Chantiers ------------------------ */

    pub fn chantiers(&self) -> &[Chantier] {
        self.depot.chantiers()
    }

    /// Recharge un chantier dans son formulaire et bascule sur le bon onglet.
    pub fn reprendre(&mut self, id: IdChantier) {
        let Some(chantier) = self.depot.chantier(id).cloned() else {
            return;
        };
        match &chantier.contenu {
            ContenuChantier::Pureau(p) => {
                self.formulaire.nom_chantier = chantier.nom.clone();
                self.formulaire.remplir(p);
                self.onglet = Onglet::Calculateur;
                self.calculer();
            }
            ContenuChantier::Dicte(p) => {
                self.formulaire_dicte.remplir(p);
                self.onglet = Onglet::PureauDicte;
                self.calculer_dicte();
            }
        }
        debug!(?id, "chantier repris");
    }

    pub fn supprimer(&mut self, id: IdChantier) {
        if self.depot.supprimer_chantier(id) {
            self.set_info("Chantier supprimé");
        }
    }

    /* ------------------------ Lecture ------------------------ */

    /// Lecture du tracé d’un rampant (0 ou 1) du dernier calcul.
    pub fn lire_tracage(&mut self, rampant: usize) {
        let Some(r) = &self.resultat else {
            return;
        };
        let Some(res) = r.rampants().get(rampant).copied() else {
            return;
        };
        let curseur = CurseurCotes::demarrer(format!("Rampant {}", rampant + 1), res.tracage_formate());
        self.demarrer_lecture(curseur);
    }

    pub fn lire_dicte(&mut self) {
        let Some(r) = &self.resultat_dicte else {
            return;
        };
        let curseur = CurseurCotes::demarrer(r.nom_chantier.clone(), r.cotes.clone());
        self.demarrer_lecture(curseur);
    }

    fn demarrer_lecture(&mut self, curseur: CurseurCotes) {
        self.annonce = curseur.annonce().unwrap_or_default();
        self.lecture = Some(curseur);
    }

    pub fn commande_lecture(&mut self, commande: CommandeLecture) {
        let Some(curseur) = self.lecture.as_mut() else {
            return;
        };
        match curseur.appliquer(commande) {
            Evenement::Lire { .. } => self.annonce = curseur.annonce().unwrap_or_default(),
            Evenement::Fin => self.annonce = MESSAGE_FIN.to_string(),
            Evenement::Arret => {
                self.lecture = None;
                self.annonce.clear();
            }
            Evenement::AucunEffet => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_remplie() -> AppPureau {
        let mut app = AppPureau::default();
        app.formulaire.champs = ["500", "480", "33", "33", "15", "15", "35", "44"].map(String::from);
        app
    }

    #[test]
    fn calcul_depuis_formulaire() {
        let mut app = app_remplie();
        app.calculer();
        assert!(app.erreur.is_empty());
        let r = app.resultat.as_ref().unwrap();
        assert_eq!(r.nombre_rangs_commun(), Some(11));
    }

    #[test]
    fn virgule_acceptee() {
        let mut f = FormulaireCalcul::default();
        f.champs[6] = "35,5".into();
        assert_eq!(f.parametres().pureau_min, 35.5);
    }

    #[test]
    fn erreur_conserve_le_resultat() {
        let mut app = app_remplie();
        app.calculer();
        app.formulaire.champs[0] = "abc".into();
        app.calculer();
        assert_eq!(app.erreur, "Le champ \"rampant1\" est invalide ou manquant");
        assert!(app.resultat.is_some());

        app.clear_erreur();
        assert!(app.erreur.is_empty());
    }

    #[test]
    fn tuile_remplit_decalages_et_plage() {
        let mut app = AppPureau::default();
        app.formulaire.champs[0] = "500".into();
        let t = Tuile::depuis_enregistrement([("Modèle", "Romane"), ("Min", "36")]);
        app.choisir_tuile(&t);

        let p = app.formulaire.parametres();
        assert_eq!(p.rampant1, 500.0);
        assert!(app.formulaire.champs[1].is_empty());
        assert_eq!((p.premier_rang2, p.espace_faitage1, p.pureau_min), (33.0, 15.0, 36.0));
    }

    #[test]
    fn nouvelle_tuile_retrouvee_par_recherche() {
        let mut app = app_remplie();
        app.nom_nouvelle_tuile = "Grange Nord".into();
        app.nouvelle_tuile();

        app.recherche = "grange".into();
        let trouvees = app.tuiles_trouvees();
        assert_eq!(trouvees.len(), 1);
        assert_eq!((trouvees[0].tuile.pureau_min, trouvees[0].tuile.pureau_max), (35.0, 44.0));
        assert_eq!(trouvees[0].perso, Some(0));
    }

    #[test]
    fn nouvelle_tuile_sans_rampants() {
        let mut app = AppPureau::default();
        app.formulaire.champs = ["", "", "33", "", "15", "", "35", "44"].map(String::from);
        app.nom_nouvelle_tuile = "Atelier".into();
        app.nouvelle_tuile();

        assert!(app.erreur.is_empty());
        app.recherche = "atelier".into();
        assert_eq!(app.tuiles_trouvees().len(), 1);
    }

    #[test]
    fn modifier_puis_supprimer_ma_tuile() {
        let mut app = app_remplie();
        app.nom_nouvelle_tuile = "Grange".into();
        app.nouvelle_tuile();

        app.formulaire.champs[7] = "42".into();
        app.modifier_tuile(0);
        app.recherche = "grange".into();
        let trouvees = app.tuiles_trouvees();
        assert_eq!(trouvees[0].tuile.pureau_max, 42.0);
        assert_eq!(trouvees[0].tuile.nom, "Grange");

        // plage inversée : refusée, tuile inchangée
        app.formulaire.champs[6] = "45".into();
        app.modifier_tuile(0);
        assert_eq!(app.erreur, "Le pureau minimum doit être inférieur au pureau maximum");
        assert_eq!(app.tuiles_trouvees()[0].tuile.pureau_min, 35.0);

        app.supprimer_tuile(0);
        assert!(app.tuiles_trouvees().is_empty());
    }

    #[test]
    fn catalogue_embarque_par_defaut() {
        let mut app = AppPureau::default();
        app.recherche = "romane".into();
        let trouvees = app.tuiles_trouvees();
        assert_eq!(trouvees.len(), 1);
        assert_eq!(trouvees[0].perso, None);
        assert_eq!(trouvees[0].tuile.pureau_max, 44.0);
    }

    #[test]
    fn conversion_de_pente() {
        let mut app = AppPureau::default();
        app.formulaire_pente.degres = "45".into();
        app.convertir_degres();
        assert_eq!(app.formulaire_pente.pourcentage, "100.00");
        assert_eq!(app.formulaire_pente.resultat, "45° = 100.00%");

        app.formulaire_pente.pourcentage = "57,74".into();
        app.convertir_pourcentage();
        assert_eq!(app.formulaire_pente.degres, "30.00");

        app.formulaire_pente.degres = "95".into();
        app.convertir_degres();
        assert_eq!(app.erreur, "Le champ \"degres\" est invalide ou manquant");
        assert_eq!(app.formulaire_pente.pourcentage, "57,74");
    }

    #[test]
    fn bascule_du_theme() {
        let mut app = AppPureau::default();
        assert!(!app.sombre);
        app.basculer_theme();
        assert!(app.sombre);
    }

    #[test]
    fn enregistrer_puis_reprendre() {
        let mut app = app_remplie();
        app.formulaire.nom_chantier = "Maison Dupont".into();
        app.enregistrer_calcul();
        let id = app.chantiers()[0].id;
        assert_eq!(app.chantiers()[0].nom, "Maison Dupont");

        app.formulaire = FormulaireCalcul::default();
        app.onglet = Onglet::PureauDicte;
        app.reprendre(id);

        assert_eq!(app.onglet, Onglet::Calculateur);
        assert_eq!(app.formulaire.champs[0], "500");
        assert!(app.resultat.is_some());

        app.supprimer(id);
        assert!(app.chantiers().is_empty());
    }

    #[test]
    fn dicte_nom_par_defaut_et_enregistrement() {
        let mut app = AppPureau::default();
        app.formulaire_dicte = FormulaireDicte {
            nom_chantier: "  ".into(),
            premier_rang: "4".into(),
            pureau: "35".into(),
            nombre_rangs: "3".into(),
        };
        app.enregistrer_dicte();

        let r = app.resultat_dicte.as_ref().unwrap();
        assert!(r.nom_chantier.starts_with("Chantier du "));
        assert_eq!(app.chantiers().len(), 1);
        assert!(matches!(app.chantiers()[0].contenu, ContenuChantier::Dicte(_)));
    }

    #[test]
    fn dicte_trop_de_rangs() {
        let mut app = AppPureau::default();
        app.formulaire_dicte = FormulaireDicte {
            nom_chantier: String::new(),
            premier_rang: "0".into(),
            pureau: "35".into(),
            nombre_rangs: "101".into(),
        };
        app.calculer_dicte();
        assert_eq!(app.erreur, "Le nombre de rangs ne peut pas dépasser 100");
        assert!(app.resultat_dicte.is_none());

        // au-delà de u32 : même refus, pas de retour silencieux à 0
        app.formulaire_dicte.nombre_rangs = "5000000000".into();
        app.calculer_dicte();
        assert_eq!(app.erreur, "Le nombre de rangs ne peut pas dépasser 100");
    }

    #[test]
    fn nombre_de_rangs_lu_en_partie_entiere() {
        assert_eq!(lire_nombre_rangs("2.5"), 2);
        assert_eq!(lire_nombre_rangs(" 3,9 "), 3);
        assert_eq!(lire_nombre_rangs("-4"), 0);
        assert_eq!(lire_nombre_rangs("abc"), 0);
        assert_eq!(lire_nombre_rangs("5000000000"), u32::MAX);
    }

    #[test]
    fn lecture_du_tracage() {
        let mut app = app_remplie();
        app.calculer();
        app.lire_tracage(0);
        assert_eq!(app.annonce, "Rampant 1, cote 33.00 centimètres. Cote 1 sur 12");

        app.commande_lecture(CommandeLecture::Suivant);
        assert_eq!(app.annonce, "Rampant 1, cote 74.09 centimètres. Cote 2 sur 12");

        app.commande_lecture(CommandeLecture::Stop);
        assert!(app.lecture.is_none());
        assert!(app.annonce.is_empty());
    }

    #[test]
    fn lecture_fin_du_dicte() {
        let mut app = AppPureau::default();
        app.formulaire_dicte = FormulaireDicte {
            nom_chantier: "Atelier".into(),
            premier_rang: "4".into(),
            pureau: "35".into(),
            nombre_rangs: "1".into(),
        };
        app.calculer_dicte();
        app.lire_dicte();
        assert_eq!(app.annonce, "Atelier, cote 39.0 centimètres. Cote 1 sur 1");
        app.commande_lecture(CommandeLecture::Suivant);
        assert_eq!(app.annonce, MESSAGE_FIN);
    }
}
