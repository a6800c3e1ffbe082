//! Conversion de pente : degrés <-> pourcentage.
//!
//! pourcentage = tan(degrés) × 100, degrés dans [0, 90] ; pourcentage ≥ 0.

use super::erreur::ErreurCalcul;
use super::parametres::Champ;

pub fn degres_vers_pourcentage(degres: f64) -> Result<f64, ErreurCalcul> {
    if !(0.0..=90.0).contains(&degres) {
        return Err(ErreurCalcul::ChampInvalide(Champ::Degres));
    }
    Ok(degres.to_radians().tan() * 100.0)
}

pub fn pourcentage_vers_degres(pourcentage: f64) -> Result<f64, ErreurCalcul> {
    if !(pourcentage.is_finite() && pourcentage >= 0.0) {
        return Err(ErreurCalcul::ChampInvalide(Champ::Pourcentage));
    }
    Ok((pourcentage / 100.0).atan().to_degrees())
}
