//! Erreurs du noyau.
//!
//! Les messages sont destinés à l’utilisateur final (affichés tels quels par l’UI).

use thiserror::Error;

use super::parametres::Champ;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Champ manquant, non numérique ou hors domaine.
    #[error("Le champ \"{0}\" est invalide ou manquant")]
    ChampInvalide(Champ),

    #[error("Le pureau minimum doit être inférieur au pureau maximum")]
    IntervalleInvalide,

    #[error("Le nombre de rangs ne peut pas dépasser {max}")]
    NombreRangsDepasse { max: u32 },

    /// Garde-fou : la recherche dépasserait le budget d’itérations.
    #[error("Aucune solution : la recherche dépasse {iterations_max} itérations")]
    AucuneSolution { iterations_max: u64 },
}
