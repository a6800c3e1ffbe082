//! Noyau — calculateur de pureau (deux rampants, une même tuile)
//!
//! validation -> longueurs utiles -> fenêtre de rangs
//!            -> MODE NORMAL (nombre de rangs commun aux 2 rampants)
//!            -> sinon MODE HORS PUREAU (pile-poil, sinon pureau forcé près du max)
//!            -> résultat par rampant (détail + tracé)
//!
//! Pur : aucun état entre deux appels, mêmes entrées => même sortie.

use num_traits::ToPrimitive;
use tracing::{debug, info, warn};

use super::constantes::{FACTEUR_PROCHE_MAX, ITERATIONS_MAX_DEFAUT, TOLERANCE_CM};
use super::erreur::ErreurCalcul;
use super::parametres::ParametresCalcul;
use super::rampant::ResultatRampant;

/// Garde-fous de recherche.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limites {
    /// Nombre maximal de candidats essayés par balayage ; au-delà, sans
    /// résultat, `AucuneSolution`.
    pub iterations_max: u64,
}

impl Default for Limites {
    fn default() -> Self {
        Self {
            iterations_max: ITERATIONS_MAX_DEFAUT,
        }
    }
}

/// MODE NORMAL : même nombre de rangs sur les deux rampants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolutionCommune {
    pub nombre_rangs: u32,
    pub pureau1: f64,
    pub pureau2: f64,
}

/// MODE HORS PUREAU : configuration d’un rampant seul.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigRampant {
    /// Tous les rangs égaux, pureau dans l’intervalle (dernier rang = 0).
    PilePoil { nombre_rangs: u32, pureau: f64 },

    /// `rangs_complets` rangs à `pureau`, puis un dernier rang de `dernier_rang`
    /// (compté dans `nombre_rangs` seulement s’il est non nul).
    ForcePresMax {
        nombre_rangs: u32,
        pureau: f64,
        rangs_complets: u32,
        dernier_rang: f64,
    },
}

impl ConfigRampant {
    pub fn nombre_rangs(&self) -> u32 {
        match *self {
            ConfigRampant::PilePoil { nombre_rangs, .. }
            | ConfigRampant::ForcePresMax { nombre_rangs, .. } => nombre_rangs,
        }
    }

    pub fn pureau(&self) -> f64 {
        match *self {
            ConfigRampant::PilePoil { pureau, .. } | ConfigRampant::ForcePresMax { pureau, .. } => {
                pureau
            }
        }
    }

    pub fn est_pile_poil(&self) -> bool {
        matches!(self, ConfigRampant::PilePoil { .. })
    }

    pub fn rangs_complets(&self) -> u32 {
        match *self {
            ConfigRampant::PilePoil { nombre_rangs, .. } => nombre_rangs,
            ConfigRampant::ForcePresMax { rangs_complets, .. } => rangs_complets,
        }
    }

    pub fn dernier_rang(&self) -> f64 {
        match *self {
            ConfigRampant::PilePoil { .. } => 0.0,
            ConfigRampant::ForcePresMax { dernier_rang, .. } => dernier_rang,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    Commune(SolutionCommune),
    /// Pas de coordination entre les rampants : chacun sa config.
    HorsPureau {
        config1: ConfigRampant,
        config2: ConfigRampant,
    },
}

/// Résultat complet (les deux rampants + la solution retenue).
#[derive(Debug, Clone, PartialEq)]
pub struct ResultatCalcul {
    pub solution: Solution,
    pub rampant1: ResultatRampant,
    pub rampant2: ResultatRampant,
}

impl ResultatCalcul {
    pub fn hors_pureau(&self) -> bool {
        matches!(self.solution, Solution::HorsPureau { .. })
    }

    pub fn nombre_rangs_commun(&self) -> Option<u32> {
        match self.solution {
            Solution::Commune(s) => Some(s.nombre_rangs),
            Solution::HorsPureau { .. } => None,
        }
    }

    pub fn rampants(&self) -> [&ResultatRampant; 2] {
        [&self.rampant1, &self.rampant2]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalculateurPureau {
    limites: Limites,
}

impl CalculateurPureau {
    pub fn new(limites: Limites) -> Self {
        Self { limites }
    }

    /// Point d’entrée : valide puis calcule la disposition des deux rampants.
    pub fn calculer(&self, params: &ParametresCalcul) -> Result<ResultatCalcul, ErreurCalcul> {
        params.valider()?;

        let [r1, r2] = params.rampants();
        let (u1, u2) = (r1.longueur_utile(), r2.longueur_utile());
        let (pmin, pmax) = (params.pureau_min, params.pureau_max);
        debug!(longueur_utile1 = u1, longueur_utile2 = u2, "longueurs utiles");

        if let Some(s) = self.chercher_solution_normale(u1, u2, pmin, pmax)? {
            info!(nombre_rangs = s.nombre_rangs, "solution normale");
            return Ok(ResultatCalcul {
                solution: Solution::Commune(s),
                rampant1: ResultatRampant::commun(&r1, s.pureau1, s.nombre_rangs),
                rampant2: ResultatRampant::commun(&r2, s.pureau2, s.nombre_rangs),
            });
        }

        info!("pas de rangs communs : passage en mode hors pureau");
        let config1 = self.config_hors_pureau(u1, pmin, pmax)?;
        let config2 = self.config_hors_pureau(u2, pmin, pmax)?;
        debug!(?config1, ?config2, "solution hors pureau");

        Ok(ResultatCalcul {
            solution: Solution::HorsPureau { config1, config2 },
            rampant1: ResultatRampant::hors_pureau(&r1, &config1),
            rampant2: ResultatRampant::hors_pureau(&r2, &config2),
        })
    }

    /// Fenêtre des nombres de rangs qui peuvent garder les DEUX pureaux dans l’intervalle.
    pub fn fenetre_commune(&self, u1: f64, u2: f64, pmin: f64, pmax: f64) -> (f64, f64) {
        let rangs_min = (u1 / pmax).ceil().max((u2 / pmax).ceil());
        let rangs_max = (u1 / pmin).floor().min((u2 / pmin).floor());
        debug!(rangs_min, rangs_max, "bornes rangs");
        (rangs_min, rangs_max)
    }

    /// MODE NORMAL : plus petit nombre de rangs commun (balayage croissant).
    pub fn chercher_solution_normale(
        &self,
        u1: f64,
        u2: f64,
        pmin: f64,
        pmax: f64,
    ) -> Result<Option<SolutionCommune>, ErreurCalcul> {
        let (rangs_min, rangs_max) = self.fenetre_commune(u1, u2, pmin, pmax);
        self.balayer(rangs_min, rangs_max, |nombre_rangs| {
            let n = f64::from(nombre_rangs);
            let s = SolutionCommune {
                nombre_rangs,
                pureau1: u1 / n,
                pureau2: u2 / n,
            };
            (dans_intervalle(s.pureau1, pmin, pmax) && dans_intervalle(s.pureau2, pmin, pmax))
                .then_some(s)
        })
    }

    /// Pile-poil : un nombre de rangs où tous les rangs (dernier compris) sont égaux.
    pub fn trouver_pile_poil(
        &self,
        longueur_utile: f64,
        pmin: f64,
        pmax: f64,
    ) -> Result<Option<ConfigRampant>, ErreurCalcul> {
        let config = self.balayer(
            (longueur_utile / pmax).ceil(),
            (longueur_utile / pmin).floor(),
            |nombre_rangs| {
                let pureau = longueur_utile / f64::from(nombre_rangs);
                dans_intervalle(pureau, pmin, pmax).then_some(ConfigRampant::PilePoil {
                    nombre_rangs,
                    pureau,
                })
            },
        )?;

        debug!(longueur_utile, ?config, "pile-poil");
        Ok(config)
    }

    /// Repli : pureau cible = pureau max × 0.95, le reste va dans un dernier rang.
    pub fn forcer_pureau_proche(
        &self,
        longueur_utile: f64,
        pmax: f64,
    ) -> Result<ConfigRampant, ErreurCalcul> {
        let pureau = pmax * FACTEUR_PROCHE_MAX;

        // longueur utile nulle ou négative : rien à poser
        if longueur_utile <= 0.0 {
            return Ok(ConfigRampant::ForcePresMax {
                nombre_rangs: 0,
                pureau,
                rangs_complets: 0,
                dernier_rang: 0.0,
            });
        }

        let complets = (longueur_utile / pureau).floor();
        // une cote de tracé par rang : même plafond que les balayages
        if complets + 1.0 > self.limites.iterations_max as f64 {
            return Err(self.hors_budget(complets + 1.0));
        }
        let dernier_rang = longueur_utile - complets * pureau;
        let rangs_complets = complets
            .to_u32()
            .ok_or_else(|| self.hors_budget(complets))?;

        Ok(if dernier_rang > TOLERANCE_CM {
            ConfigRampant::ForcePresMax {
                nombre_rangs: rangs_complets + 1,
                pureau,
                rangs_complets,
                dernier_rang,
            }
        } else {
            ConfigRampant::ForcePresMax {
                nombre_rangs: rangs_complets,
                pureau,
                rangs_complets,
                dernier_rang: 0.0,
            }
        })
    }

    fn config_hors_pureau(
        &self,
        longueur_utile: f64,
        pmin: f64,
        pmax: f64,
    ) -> Result<ConfigRampant, ErreurCalcul> {
        match self.trouver_pile_poil(longueur_utile, pmin, pmax)? {
            Some(config) => Ok(config),
            None => self.forcer_pureau_proche(longueur_utile, pmax),
        }
    }

    /// Balayage croissant de `[rangs_min, rangs_max]` (rangs ≥ 1), arrêté au
    /// premier candidat retenu. Seuls les candidats réellement essayés
    /// comptent dans le budget : `AucuneSolution` si le budget est épuisé
    /// sans résultat alors que la fenêtre continuait.
    fn balayer<T>(
        &self,
        rangs_min: f64,
        rangs_max: f64,
        mut essai: impl FnMut(u32) -> Option<T>,
    ) -> Result<Option<T>, ErreurCalcul> {
        let bas = rangs_min.max(1.0);

        // couvre aussi NaN
        if !(rangs_max >= bas) {
            return Ok(None);
        }

        // aucun nombre de rangs représentable dans la fenêtre
        let Some(premier) = bas.to_u32() else {
            return Err(self.hors_budget(rangs_max - bas + 1.0));
        };
        let dernier = rangs_max.min(f64::from(u32::MAX)).to_u32().unwrap_or(u32::MAX);

        let max = usize::try_from(self.limites.iterations_max).unwrap_or(usize::MAX);
        if let Some(trouve) = (premier..=dernier).take(max).find_map(&mut essai) {
            return Ok(Some(trouve));
        }

        let taille = rangs_max - bas + 1.0;
        if taille > self.limites.iterations_max as f64 {
            return Err(self.hors_budget(taille));
        }
        Ok(None)
    }

    fn hors_budget(&self, iterations: f64) -> ErreurCalcul {
        warn!(
            iterations,
            iterations_max = self.limites.iterations_max,
            "recherche abandonnée (budget d’itérations)"
        );
        ErreurCalcul::AucuneSolution {
            iterations_max: self.limites.iterations_max,
        }
    }
}

/// Calcul avec les limites par défaut.
#[cfg(test)]
pub(crate) fn calculer_pureau(params: &ParametresCalcul) -> Result<ResultatCalcul, ErreurCalcul> {
    CalculateurPureau::default().calculer(params)
}

fn dans_intervalle(pureau: f64, pmin: f64, pmax: f64) -> bool {
    pureau >= pmin && pureau <= pmax
}
