//! Résultat par rampant : détail des rangs, rangs supplémentaires, tracé.
//!
//! Le tracé = cotes cumulées depuis l’égout (une par limite de rang), jamais
//! au-delà de `longueur − espace faîtage` : une cote trop loin est retirée,
//! pas ramenée sur la limite (sauf bruit flottant ≤ TOLERANCE_CM).

use num_traits::ToPrimitive;

use super::calculateur::ConfigRampant;
use super::constantes::{DECIMALES_TRACAGE, TOLERANCE_CM};
use super::format::format_decimal;
use super::parametres::Rampant;

/// Premier rang, rangs au pureau plein, dernier rang différent (hors pureau inexact).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailRangs {
    pub premier_rang: f64,
    pub rangs_complets: u32,
    pub pureau_complet: f64,
    pub dernier_rang: Option<f64>,
}

/// Informatif (mode normal) : rangs qui tiendraient encore + reste.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangsSupplementaires {
    pub nombre: u32,
    pub cote_restante: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultatRampant {
    pub nombre_rangs: u32,
    pub pureau: f64,
    pub detail: DetailRangs,
    pub rangs_supplementaires: Option<RangsSupplementaires>,
    /// Cotes brutes (cm), strictement croissantes.
    pub tracage: Vec<f64>,
}

impl ResultatRampant {
    /// MODE NORMAL : `nombre_rangs` rangs égaux de `pureau`.
    pub(crate) fn commun(rampant: &Rampant, pureau: f64, nombre_rangs: u32) -> Self {
        let detail = DetailRangs {
            premier_rang: rampant.premier_rang,
            rangs_complets: nombre_rangs,
            pureau_complet: pureau,
            dernier_rang: None,
        };

        Self {
            nombre_rangs,
            pureau,
            detail,
            rangs_supplementaires: rangs_supplementaires(rampant, pureau, nombre_rangs),
            tracage: tracer(rampant, &detail),
        }
    }

    /// MODE HORS PUREAU : pile-poil ou pureau forcé + dernier rang.
    pub(crate) fn hors_pureau(rampant: &Rampant, config: &ConfigRampant) -> Self {
        let reste = config.dernier_rang();
        let detail = DetailRangs {
            premier_rang: rampant.premier_rang,
            rangs_complets: config.rangs_complets(),
            pureau_complet: config.pureau(),
            dernier_rang: (reste > 0.0).then_some(reste),
        };

        Self {
            nombre_rangs: config.nombre_rangs(),
            pureau: config.pureau(),
            detail,
            rangs_supplementaires: None,
            tracage: tracer(rampant, &detail),
        }
    }

    /// Pureau affiché (2 décimales).
    pub fn pureau_calcule(&self) -> String {
        format_decimal(self.pureau, DECIMALES_TRACAGE)
    }

    /// Tracé affiché (2 décimales).
    pub fn tracage_formate(&self) -> Vec<String> {
        self.tracage
            .iter()
            .map(|&c| format_decimal(c, DECIMALES_TRACAGE))
            .collect()
    }

    pub fn est_pile_poil(&self) -> bool {
        self.detail.dernier_rang.is_none()
    }
}

fn rangs_supplementaires(
    rampant: &Rampant,
    pureau: f64,
    nombre_rangs: u32,
) -> Option<RangsSupplementaires> {
    let reste = rampant.longueur - (rampant.premier_rang + pureau * f64::from(nombre_rangs));
    if reste < pureau {
        return None;
    }

    let nombre = (reste / pureau).floor();
    Some(RangsSupplementaires {
        nombre: nombre.to_u32()?,
        cote_restante: reste - nombre * pureau,
    })
}

fn tracer(rampant: &Rampant, detail: &DetailRangs) -> Vec<f64> {
    let limite = rampant.limite_tracage();
    let premier = detail.premier_rang;
    let pureau = detail.pureau_complet;

    let mut cotes = Vec::with_capacity(detail.rangs_complets as usize + 2);
    cotes.push(premier);

    cotes.extend(
        (1..=detail.rangs_complets)
            .filter_map(|i| sous_limite(premier + pureau * f64::from(i), limite)),
    );

    if let Some(reste) = detail.dernier_rang {
        let fin = premier + pureau * f64::from(detail.rangs_complets) + reste;
        cotes.extend(sous_limite(fin, limite));
    }

    cotes
}

fn sous_limite(cote: f64, limite: f64) -> Option<f64> {
    if cote <= limite {
        Some(cote)
    } else if cote - limite <= TOLERANCE_CM {
        Some(limite)
    } else {
        None
    }
}
