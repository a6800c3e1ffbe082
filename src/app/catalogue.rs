//! src/app/catalogue.rs
//!
//! Catalogue de tuiles (côté import, hors noyau).
//!
//! Rôle :
//! - Table d’alias : plusieurs intitulés de colonne acceptés pour un même champ.
//! - Conversion d’une ligne DÉJÀ décodée (paires intitulé/valeur) en `Tuile`.
//! - Recherche (nom / marque) + passage Tuile -> ParametresCalcul.
//!
//! Le décodage du fichier tableur lui-même n’est pas fait ici.

use std::fmt;

use crate::noyau::format::lire_nombre;
use crate::noyau::ParametresCalcul;

/// Valeurs par défaut d’une ligne incomplète.
const PUREAU_MIN_DEFAUT: f64 = 35.0;
const PUREAU_MAX_DEFAUT: f64 = 44.0;
const PUREAU_DEPART_DEFAUT: f64 = 33.0;
const ESPACE_FAITAGE_DEFAUT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChampCatalogue {
    Marque,
    Type,
    Nom,
    PureauMin,
    PureauMax,
    PureauDepart,
    EspaceFaitage,
}

/// Intitulés acceptés, par ordre de priorité pour un même champ.
const ALIAS_ENTETES: &[(&str, ChampCatalogue)] = &[
    ("Marque", ChampCatalogue::Marque),
    ("marque", ChampCatalogue::Marque),
    ("Type", ChampCatalogue::Type),
    ("type", ChampCatalogue::Type),
    ("Modèle", ChampCatalogue::Nom),
    ("Modele", ChampCatalogue::Nom),
    ("modele", ChampCatalogue::Nom),
    ("nom", ChampCatalogue::Nom),
    ("Pureau Min", ChampCatalogue::PureauMin),
    ("pureauMin", ChampCatalogue::PureauMin),
    ("Min", ChampCatalogue::PureauMin),
    ("Pureau Max", ChampCatalogue::PureauMax),
    ("pureauMax", ChampCatalogue::PureauMax),
    ("Max", ChampCatalogue::PureauMax),
    ("Pureau Départ", ChampCatalogue::PureauDepart),
    ("Pureau Depart", ChampCatalogue::PureauDepart),
    ("pureauDepart", ChampCatalogue::PureauDepart),
    ("Départ", ChampCatalogue::PureauDepart),
    ("Depart", ChampCatalogue::PureauDepart),
    ("Espace Faîtage", ChampCatalogue::EspaceFaitage),
    ("Espace Faitage", ChampCatalogue::EspaceFaitage),
    ("espaceFaitage", ChampCatalogue::EspaceFaitage),
    ("Faîtage", ChampCatalogue::EspaceFaitage),
    ("Faitage", ChampCatalogue::EspaceFaitage),
];

/// Intitulé de colonne -> (champ canonique, priorité). Comparaison exacte après trim.
pub fn champ_pour_entete(entete: &str) -> Option<(ChampCatalogue, usize)> {
    let entete = entete.trim();
    ALIAS_ENTETES
        .iter()
        .position(|(alias, _)| *alias == entete)
        .map(|rang| (ALIAS_ENTETES[rang].1, rang))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTuile {
    Plate,
    FaibleGalbe,
    GrandGalbe,
    Autre(String),
}

impl TypeTuile {
    pub fn depuis_code(code: &str) -> Self {
        match code.trim() {
            "plate" => TypeTuile::Plate,
            "faible-galbe" | "" => TypeTuile::FaibleGalbe,
            "grand-galbe" => TypeTuile::GrandGalbe,
            autre => TypeTuile::Autre(autre.to_string()),
        }
    }
}

impl fmt::Display for TypeTuile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTuile::Plate => f.write_str("Plate"),
            TypeTuile::FaibleGalbe => f.write_str("Faible galbe"),
            TypeTuile::GrandGalbe => f.write_str("Grand galbe"),
            TypeTuile::Autre(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tuile {
    pub nom: String,
    pub marque: String,
    pub type_tuile: TypeTuile,
    pub pureau_min: f64,
    pub pureau_max: f64,
    /// Sert de premier rang sur les deux rampants.
    pub pureau_depart: f64,
    pub espace_faitage: f64,
}

impl Tuile {
    /// Ligne décodée -> Tuile. Cellules vides ignorées ; intitulé le plus
    /// prioritaire gagnant ; nombre illisible => valeur par défaut.
    pub fn depuis_enregistrement<'a>(cellules: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut retenus: Vec<(ChampCatalogue, usize, &'a str)> = Vec::new();

        for (entete, valeur) in cellules {
            let valeur = valeur.trim();
            if valeur.is_empty() {
                continue;
            }
            let Some((champ, rang)) = champ_pour_entete(entete) else {
                continue;
            };
            match retenus.iter_mut().find(|(c, _, _)| *c == champ) {
                Some(r) if rang < r.1 => *r = (champ, rang, valeur),
                Some(_) => {}
                None => retenus.push((champ, rang, valeur)),
            }
        }

        let texte = |champ: ChampCatalogue| {
            retenus
                .iter()
                .find(|(c, _, _)| *c == champ)
                .map(|(_, _, v)| *v)
        };
        let nombre = |champ: ChampCatalogue, defaut: f64| {
            texte(champ)
                .map(lire_nombre)
                .filter(|v| v.is_finite())
                .unwrap_or(defaut)
        };

        Self {
            nom: texte(ChampCatalogue::Nom).unwrap_or_default().to_string(),
            marque: texte(ChampCatalogue::Marque).unwrap_or_default().to_string(),
            type_tuile: TypeTuile::depuis_code(texte(ChampCatalogue::Type).unwrap_or_default()),
            pureau_min: nombre(ChampCatalogue::PureauMin, PUREAU_MIN_DEFAUT),
            pureau_max: nombre(ChampCatalogue::PureauMax, PUREAU_MAX_DEFAUT),
            pureau_depart: nombre(ChampCatalogue::PureauDepart, PUREAU_DEPART_DEFAUT),
            espace_faitage: nombre(ChampCatalogue::EspaceFaitage, ESPACE_FAITAGE_DEFAUT),
        }
    }

    /// Recherche insensible à la casse sur nom + marque ; requête vide => tout.
    pub fn correspond(&self, requete: &str) -> bool {
        let q = requete.trim().to_lowercase();
        q.is_empty() || self.nom.to_lowercase().contains(&q) || self.marque.to_lowercase().contains(&q)
    }

    /// Tuile + longueurs des rampants -> entrée du calculateur.
    pub fn parametres(&self, rampant1: f64, rampant2: f64) -> ParametresCalcul {
        ParametresCalcul {
            rampant1,
            rampant2,
            premier_rang1: self.pureau_depart,
            premier_rang2: self.pureau_depart,
            espace_faitage1: self.espace_faitage,
            espace_faitage2: self.espace_faitage,
            pureau_min: self.pureau_min,
            pureau_max: self.pureau_max,
        }
    }
}

/// Catalogue de départ, sous forme de lignes déjà décodées (intitulés variés
/// comme dans les fichiers fournisseurs).
const LIGNES_PAR_DEFAUT: &[&[(&str, &str)]] = &[
    &[
        ("Marque", "Standard"),
        ("Modèle", "Romane"),
        ("Type", "faible-galbe"),
        ("Pureau Min", "35"),
        ("Pureau Max", "44"),
        ("Pureau Départ", "33"),
        ("Espace Faîtage", "15"),
    ],
    &[
        ("marque", "Standard"),
        ("nom", "Canal grand moule"),
        ("type", "grand-galbe"),
        ("pureauMin", "34"),
        ("pureauMax", "38"),
        ("pureauDepart", "32"),
        ("espaceFaitage", "12"),
    ],
    &[
        ("Marque", "Standard"),
        ("Modele", "Losangée"),
        ("Type", "faible-galbe"),
        ("Min", "36"),
        ("Max", "40,5"),
        ("Départ", "34"),
        ("Faîtage", "14"),
    ],
    &[
        ("Marque", "Standard"),
        ("Modèle", "Plate 17x27"),
        ("Type", "plate"),
        ("Pureau Min", "9,5"),
        ("Pureau Max", "10,5"),
        ("Pureau Depart", "12"),
        ("Espace Faitage", "8"),
    ],
];

/// Catalogue embarqué, passé par la même conversion qu’un import.
pub fn catalogue_par_defaut() -> Vec<Tuile> {
    LIGNES_PAR_DEFAUT
        .iter()
        .map(|ligne| Tuile::depuis_enregistrement(ligne.iter().copied()))
        .collect()
}

/// Tuiles qui correspondent à la requête, dans l’ordre d’origine.
pub fn rechercher<'a>(tuiles: &'a [Tuile], requete: &str) -> Vec<&'a Tuile> {
    tuiles.iter().filter(|t| t.correspond(requete)).collect()
}
