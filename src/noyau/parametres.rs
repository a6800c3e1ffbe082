//! Paramètres d’entrée du calculateur de pureau + validation.
//!
//! Contrats :
//! - Les 8 champs doivent être finis et > 0 (un champ absent arrive en `NaN`).
//! - `pureau_min < pureau_max`.
//! - La longueur utile n’est PAS validée : trop petite => fenêtre vide, pas d’erreur.

use std::fmt;

use super::erreur::ErreurCalcul;

/// Nom canonique d’un champ numérique (sert aux messages d’erreur).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Champ {
    Rampant1,
    Rampant2,
    PremierRang1,
    PremierRang2,
    EspaceFaitage1,
    EspaceFaitage2,
    PureauMin,
    PureauMax,
    // --- pureau dicté ---
    PremierRang,
    Pureau,
    NombreRangs,
    // --- conversion de pente ---
    Degres,
    Pourcentage,
}

impl Champ {
    /// Ordre de validation du calculateur (fail fast dans cet ordre).
    pub const CALCUL: [Champ; 8] = [
        Champ::Rampant1,
        Champ::Rampant2,
        Champ::PremierRang1,
        Champ::PremierRang2,
        Champ::EspaceFaitage1,
        Champ::EspaceFaitage2,
        Champ::PureauMin,
        Champ::PureauMax,
    ];

    pub fn nom(self) -> &'static str {
        match self {
            Champ::Rampant1 => "rampant1",
            Champ::Rampant2 => "rampant2",
            Champ::PremierRang1 => "premierRang1",
            Champ::PremierRang2 => "premierRang2",
            Champ::EspaceFaitage1 => "espaceFaitage1",
            Champ::EspaceFaitage2 => "espaceFaitage2",
            Champ::PureauMin => "pureauMin",
            Champ::PureauMax => "pureauMax",
            Champ::PremierRang => "premierRang",
            Champ::Pureau => "pureau",
            Champ::NombreRangs => "nombreRangs",
            Champ::Degres => "degres",
            Champ::Pourcentage => "pourcentage",
        }
    }
}

impl fmt::Display for Champ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}

/// Un rampant vu par le noyau : longueur totale + réserves fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rampant {
    pub longueur: f64,
    pub premier_rang: f64,
    pub espace_faitage: f64,
}

impl Rampant {
    /// Longueur à répartir en rangs (sans premier rang ni faîtage).
    pub fn longueur_utile(&self) -> f64 {
        self.longueur - self.premier_rang - self.espace_faitage
    }

    /// Cote maximale d’un tracé : on ne trace jamais dans l’espace faîtage.
    pub fn limite_tracage(&self) -> f64 {
        self.longueur - self.espace_faitage
    }
}

/// Entrée du calculateur (cm).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParametresCalcul {
    pub rampant1: f64,
    pub rampant2: f64,
    pub premier_rang1: f64,
    pub premier_rang2: f64,
    pub espace_faitage1: f64,
    pub espace_faitage2: f64,
    pub pureau_min: f64,
    pub pureau_max: f64,
}

impl ParametresCalcul {
    pub fn valeur(&self, champ: Champ) -> f64 {
        match champ {
            Champ::Rampant1 => self.rampant1,
            Champ::Rampant2 => self.rampant2,
            Champ::PremierRang1 => self.premier_rang1,
            Champ::PremierRang2 => self.premier_rang2,
            Champ::EspaceFaitage1 => self.espace_faitage1,
            Champ::EspaceFaitage2 => self.espace_faitage2,
            Champ::PureauMin => self.pureau_min,
            Champ::PureauMax => self.pureau_max,
            Champ::PremierRang
            | Champ::Pureau
            | Champ::NombreRangs
            | Champ::Degres
            | Champ::Pourcentage => f64::NAN,
        }
    }

    pub fn valider(&self) -> Result<(), ErreurCalcul> {
        self.valider_champs(&Champ::CALCUL)
    }

    /// Ce qu’il faut pour décrire une tuile : décalages du rampant 1 + plage.
    /// Les longueurs de rampant ne sont pas exigées.
    pub fn valider_tuile(&self) -> Result<(), ErreurCalcul> {
        self.valider_champs(&[
            Champ::PremierRang1,
            Champ::EspaceFaitage1,
            Champ::PureauMin,
            Champ::PureauMax,
        ])
    }

    fn valider_champs(&self, champs: &[Champ]) -> Result<(), ErreurCalcul> {
        if let Some(&champ) = champs
            .iter()
            .find(|&&c| !est_strictement_positif(self.valeur(c)))
        {
            return Err(ErreurCalcul::ChampInvalide(champ));
        }

        if self.pureau_min >= self.pureau_max {
            return Err(ErreurCalcul::IntervalleInvalide);
        }

        Ok(())
    }

    pub fn rampants(&self) -> [Rampant; 2] {
        [
            Rampant {
                longueur: self.rampant1,
                premier_rang: self.premier_rang1,
                espace_faitage: self.espace_faitage1,
            },
            Rampant {
                longueur: self.rampant2,
                premier_rang: self.premier_rang2,
                espace_faitage: self.espace_faitage2,
            },
        ]
    }
}

/// Fini et > 0 (NaN et ±∞ refusés).
pub(crate) fn est_strictement_positif(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
