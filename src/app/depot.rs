//! src/app/depot.rs
//!
//! Dépôt (côté persistance, hors noyau) : mes tuiles + chantiers enregistrés.
//!
//! Contrat : le noyau ne lit ni n’écrit jamais ici ; c’est l’état UI qui
//! enregistre un chantier et le relit pour “Reprendre”.
//! Seule implémentation fournie : en mémoire (aucun format de fichier).

use chrono::NaiveDate;

use super::catalogue::Tuile;
use crate::noyau::{ParametresCalcul, ParametresDictes};

/// Identifiant opaque d’un chantier enregistré.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdChantier(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ContenuChantier {
    Pureau(ParametresCalcul),
    Dicte(ParametresDictes),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chantier {
    pub id: IdChantier,
    pub nom: String,
    pub date: NaiveDate,
    pub contenu: ContenuChantier,
}

pub trait Depot {
    fn tuiles(&self) -> &[Tuile];
    fn ajouter_tuile(&mut self, tuile: Tuile);
    /// Remplace la tuile perso d’indice `index` ; `false` si absente.
    fn modifier_tuile(&mut self, index: usize, tuile: Tuile) -> bool;
    fn supprimer_tuile(&mut self, index: usize) -> bool;

    fn chantiers(&self) -> &[Chantier];
    /// Enregistre et retourne l’identifiant attribué.
    fn enregistrer_chantier(&mut self, nom: String, date: NaiveDate, contenu: ContenuChantier) -> IdChantier;
    fn chantier(&self, id: IdChantier) -> Option<&Chantier>;
    /// `true` si le chantier existait.
    fn supprimer_chantier(&mut self, id: IdChantier) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct DepotMemoire {
    tuiles: Vec<Tuile>,
    chantiers: Vec<Chantier>,
    prochain_id: u64,
}

impl Depot for DepotMemoire {
    fn tuiles(&self) -> &[Tuile] {
        &self.tuiles
    }

    fn ajouter_tuile(&mut self, tuile: Tuile) {
        self.tuiles.push(tuile);
    }

    fn modifier_tuile(&mut self, index: usize, tuile: Tuile) -> bool {
        match self.tuiles.get_mut(index) {
            Some(t) => {
                *t = tuile;
                true
            }
            None => false,
        }
    }

    fn supprimer_tuile(&mut self, index: usize) -> bool {
        if index < self.tuiles.len() {
            self.tuiles.remove(index);
            true
        } else {
            false
        }
    }

    fn chantiers(&self) -> &[Chantier] {
        &self.chantiers
    }

    fn enregistrer_chantier(&mut self, nom: String, date: NaiveDate, contenu: ContenuChantier) -> IdChantier {
        let id = IdChantier(self.prochain_id);
        self.prochain_id += 1;
        self.chantiers.push(Chantier {
            id,
            nom,
            date,
            contenu,
        });
        id
    }

    fn chantier(&self, id: IdChantier) -> Option<&Chantier> {
        self.chantiers.iter().find(|c| c.id == id)
    }

    fn supprimer_chantier(&mut self, id: IdChantier) -> bool {
        let avant = self.chantiers.len();
        self.chantiers.retain(|c| c.id != id);
        self.chantiers.len() != avant
    }
}
