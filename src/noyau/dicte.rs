//! Noyau — pureau dicté
//!
//! Pureau fixe imposé : cote(i) = premier rang + pureau × (i + 1), i = 0..N.
//! Exemple : premier rang 4, pureau 35, 3 rangs => 39.0, 74.0, 109.0

use chrono::{Local, NaiveDate};
use tracing::debug;

use super::constantes::{DECIMALES_DICTE, NOMBRE_RANGS_DICTE_MAX};
use super::erreur::ErreurCalcul;
use super::format::format_decimal;
use super::parametres::{est_strictement_positif, Champ};

#[derive(Debug, Clone, PartialEq)]
pub struct ParametresDictes {
    /// Vide => "Chantier du jj/mm/aaaa" dans le résultat.
    pub nom_chantier: String,
    /// Peut valoir 0.
    pub premier_rang: f64,
    pub pureau: f64,
    pub nombre_rangs: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultatDicte {
    pub nom_chantier: String,
    pub premier_rang: f64,
    pub pureau: f64,
    pub nombre_rangs: u32,
    /// Cotes cumulées, 1 décimale.
    pub cotes: Vec<String>,
    pub date: NaiveDate,
}

/// API publique : calcul daté du jour (heure locale).
pub fn calculer_dicte(params: &ParametresDictes) -> Result<ResultatDicte, ErreurCalcul> {
    calculer_dicte_le(params, Local::now().date_naive())
}

/// Variante déterministe : la date est fournie par l’appelant.
pub fn calculer_dicte_le(
    params: &ParametresDictes,
    date: NaiveDate,
) -> Result<ResultatDicte, ErreurCalcul> {
    valider(params)?;

    let nom_chantier = if params.nom_chantier.trim().is_empty() {
        nom_par_defaut(date)
    } else {
        params.nom_chantier.clone()
    };

    let cotes: Vec<String> = (1..=params.nombre_rangs)
        .map(|i| params.premier_rang + params.pureau * f64::from(i))
        .map(|c| format_decimal(c, DECIMALES_DICTE))
        .collect();

    debug!(nombre = cotes.len(), "cotes générées");

    Ok(ResultatDicte {
        nom_chantier,
        premier_rang: params.premier_rang,
        pureau: params.pureau,
        nombre_rangs: params.nombre_rangs,
        cotes,
        date,
    })
}

/// Libellé daté pour un chantier sans nom.
pub fn nom_par_defaut(date: NaiveDate) -> String {
    format!("Chantier du {}", date.format("%d/%m/%Y"))
}

fn valider(params: &ParametresDictes) -> Result<(), ErreurCalcul> {
    if !(params.premier_rang.is_finite() && params.premier_rang >= 0.0) {
        return Err(ErreurCalcul::ChampInvalide(Champ::PremierRang));
    }
    if !est_strictement_positif(params.pureau) {
        return Err(ErreurCalcul::ChampInvalide(Champ::Pureau));
    }
    if params.nombre_rangs == 0 {
        return Err(ErreurCalcul::ChampInvalide(Champ::NombreRangs));
    }
    if params.nombre_rangs > NOMBRE_RANGS_DICTE_MAX {
        return Err(ErreurCalcul::NombreRangsDepasse {
            max: NOMBRE_RANGS_DICTE_MAX,
        });
    }
    Ok(())
}
