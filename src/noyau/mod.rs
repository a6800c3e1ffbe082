//! Noyau de calcul du pureau
//!
//! Organisation interne :
//! - parametres.rs  : entrées du calculateur + validation (Champ, Rampant)
//! - calculateur.rs : mode normal (rangs communs) / hors pureau (pile-poil, forcé)
//! - rampant.rs     : résultat par rampant (détail des rangs + tracé)
//! - dicte.rs       : pureau dicté (cotes à pureau fixe)
//! - curseur.rs     : lecture pas à pas d’une suite de cotes
//! - pente.rs       : conversion degrés <-> pourcentage
//! - format.rs      : arrondi décimal exact des cotes
//! - erreur.rs      : erreurs typées
//! - constantes.rs  : valeurs métier + garde-fous
//!
//! Aucun état global : chaque calcul est une fonction pure.

pub mod calculateur;
pub mod constantes;
pub mod curseur;
pub mod dicte;
pub mod erreur;
pub mod format;
pub mod parametres;
pub mod pente;
pub mod rampant;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_proprietes;

// API publique minimale
pub use calculateur::{CalculateurPureau, Limites, ResultatCalcul};
pub use dicte::{calculer_dicte, ParametresDictes, ResultatDicte};
pub use erreur::ErreurCalcul;
pub use parametres::ParametresCalcul;
