//! Scénarios chantier de référence (valeurs relevées à la main).
//!
//! A : deux rampants proches, intervalle large => rangs communs.
//! B : intervalle quasi dégénéré, rampants très différents => hors pureau.
//! C : pureau min > pureau max => refus.
//! D : pureau dicté 4 / 35 / 3 rangs.

use chrono::NaiveDate;

use super::calculateur::{calculer_pureau, Solution};
use super::constantes::FACTEUR_PROCHE_MAX;
use super::curseur::{CommandeLecture, CurseurCotes, Evenement};
use super::dicte::{calculer_dicte_le, ParametresDictes};
use super::erreur::ErreurCalcul;
use super::parametres::ParametresCalcul;

fn params(r1: f64, r2: f64, pmin: f64, pmax: f64) -> ParametresCalcul {
    ParametresCalcul {
        rampant1: r1,
        rampant2: r2,
        premier_rang1: 33.0,
        premier_rang2: 33.0,
        espace_faitage1: 15.0,
        espace_faitage2: 15.0,
        pureau_min: pmin,
        pureau_max: pmax,
    }
}

/* ------------------------ A : mode normal ------------------------ */

#[test]
fn scenario_a_rangs_communs() {
    let r = calculer_pureau(&params(500.0, 480.0, 35.0, 44.0)).unwrap();

    assert!(!r.hors_pureau());
    assert_eq!(r.nombre_rangs_commun(), Some(11));

    let Solution::Commune(s) = r.solution else {
        panic!("attendu solution commune");
    };
    assert!((35.0..=44.0).contains(&s.pureau1));
    assert!((35.0..=44.0).contains(&s.pureau2));

    assert_eq!(r.rampant1.nombre_rangs, 11);
    assert_eq!(r.rampant2.nombre_rangs, 11);
    assert_eq!(r.rampant1.pureau_calcule(), "41.09");
    assert_eq!(r.rampant2.pureau_calcule(), "39.27");

    let t1 = r.rampant1.tracage_formate();
    assert_eq!(t1.len(), 12);
    assert_eq!(&t1[..3], ["33.00", "74.09", "115.18"]);
    assert_eq!(t1.last().map(String::as_str), Some("485.00"));

    let t2 = r.rampant2.tracage_formate();
    assert_eq!(t2.len(), 12);
    assert_eq!(t2.last().map(String::as_str), Some("465.00"));
}

/* ------------------------ B : hors pureau ------------------------ */

#[test]
fn scenario_b_hors_pureau_independant() {
    // 70 cm d’écart entre rampants, intervalle 40 – 40.5
    let r = calculer_pureau(&params(500.0, 430.0, 40.0, 40.5)).unwrap();

    assert!(r.hors_pureau());
    assert_eq!(r.nombre_rangs_commun(), None);

    let Solution::HorsPureau { config1, config2 } = r.solution else {
        panic!("attendu hors pureau");
    };

    // aucun pile-poil => pureau forcé sur chaque rampant
    for c in [config1, config2] {
        assert!(!c.est_pile_poil());
        assert_eq!(c.pureau(), 40.5 * FACTEUR_PROCHE_MAX);
    }
    assert_eq!((config1.rangs_complets(), config1.nombre_rangs()), (11, 12));
    assert_eq!((config2.rangs_complets(), config2.nombre_rangs()), (9, 10));

    assert_eq!(r.rampant1.pureau_calcule(), "38.48");
    assert_eq!(
        r.rampant1.detail.dernier_rang.map(|d| (d * 1000.0).round()),
        Some(28_775.0)
    );

    // premier + 11 rangs complets + dernier rang (qui tombe pile au faîtage)
    let t1 = r.rampant1.tracage_formate();
    assert_eq!(t1.len(), 13);
    assert_eq!(t1[11], "456.23");
    assert_eq!(t1[12], "485.00");
}

/* ------------------------ C : intervalle inversé ------------------------ */

#[test]
fn scenario_c_intervalle_invalide() {
    assert_eq!(
        calculer_pureau(&params(500.0, 480.0, 45.0, 40.0)),
        Err(ErreurCalcul::IntervalleInvalide)
    );
}

/* ------------------------ D : pureau dicté + lecture ------------------------ */

#[test]
fn scenario_d_pureau_dicte_et_lecture() {
    let p = ParametresDictes {
        nom_chantier: String::new(),
        premier_rang: 4.0,
        pureau: 35.0,
        nombre_rangs: 3,
    };
    let date = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
    let r = calculer_dicte_le(&p, date).unwrap();

    assert_eq!(r.cotes, vec!["39.0", "74.0", "109.0"]);
    assert_eq!(r.nom_chantier, "Chantier du 02/11/2024");

    let mut lecture = CurseurCotes::demarrer(r.nom_chantier.clone(), r.cotes.clone());
    assert_eq!(lecture.cote_courante(), Some("39.0"));
    lecture.appliquer(CommandeLecture::Suivant);
    lecture.appliquer(CommandeLecture::Suivant);
    assert_eq!(lecture.progression(), "3/3");
    assert_eq!(lecture.appliquer(CommandeLecture::Suivant), Evenement::Fin);
    assert_eq!(
        lecture.appliquer(CommandeLecture::Precedent),
        Evenement::Lire {
            index: 1,
            cote: "74.0".into()
        }
    );
}
