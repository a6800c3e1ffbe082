//! Lecture pas à pas d’une suite de cotes (tracé ou pureau dicté).
//!
//! Le curseur ne sait pas d’où vient la commande (bouton, voix…) : il reçoit
//! une `CommandeLecture` et dit à l’appelant quoi annoncer.
//!
//! Bornes :
//! - Suivant sur la dernière cote => `Fin`, la position ne bouge pas.
//! - Précédent sur la première cote => `AucunEffet`.
//! - Stop => curseur vidé ; toute commande suivante est sans effet.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandeLecture {
    Suivant,
    Repeter,
    Precedent,
    Stop,
}

/// Ce que la présentation doit faire après une commande.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evenement {
    /// Annoncer la cote à `index` (0-based).
    Lire { index: usize, cote: String },
    /// Fin de la suite atteinte.
    Fin,
    Arret,
    AucunEffet,
}

pub const MESSAGE_FIN: &str = "Fin de la lecture";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurseurCotes {
    libelle: String,
    cotes: Vec<String>,
    index: usize,
    actif: bool,
}

impl CurseurCotes {
    /// Démarre sur la première cote.
    pub fn demarrer(libelle: impl Into<String>, cotes: Vec<String>) -> Self {
        debug!(total = cotes.len(), "démarrage lecture");
        Self {
            libelle: libelle.into(),
            cotes,
            index: 0,
            actif: true,
        }
    }

    pub fn appliquer(&mut self, commande: CommandeLecture) -> Evenement {
        if !self.actif {
            return Evenement::AucunEffet;
        }

        match commande {
            CommandeLecture::Suivant => {
                if self.index + 1 < self.cotes.len() {
                    self.index += 1;
                    self.lire()
                } else {
                    Evenement::Fin
                }
            }
            CommandeLecture::Repeter => self.lire(),
            CommandeLecture::Precedent => {
                if self.index > 0 {
                    self.index -= 1;
                    self.lire()
                } else {
                    Evenement::AucunEffet
                }
            }
            CommandeLecture::Stop => {
                *self = Self::default();
                Evenement::Arret
            }
        }
    }

    pub fn est_actif(&self) -> bool {
        self.actif
    }

    pub fn libelle(&self) -> &str {
        &self.libelle
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.cotes.len()
    }

    pub fn cote_courante(&self) -> Option<&str> {
        self.cotes.get(self.index).map(String::as_str)
    }

    /// "i/n" (1-based), "0/0" si vide.
    pub fn progression(&self) -> String {
        if self.cotes.is_empty() {
            "0/0".to_string()
        } else {
            format!("{}/{}", self.index + 1, self.cotes.len())
        }
    }

    /// Phrase à dire pour la cote courante.
    pub fn annonce(&self) -> Option<String> {
        let cote = self.cote_courante()?;
        Some(format!(
            "{}, cote {} centimètres. Cote {} sur {}",
            self.libelle,
            cote,
            self.index + 1,
            self.cotes.len()
        ))
    }

    fn lire(&self) -> Evenement {
        match self.cote_courante() {
            Some(cote) => Evenement::Lire {
                index: self.index,
                cote: cote.to_string(),
            },
            None => Evenement::AucunEffet,
        }
    }
}
