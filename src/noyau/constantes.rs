// src/noyau/constantes.rs
//
// Constantes du noyau (valeurs métier + garde-fous numériques).

/// Hors pureau : pureau cible = pureau max − 5 %.
pub const FACTEUR_PROCHE_MAX: f64 = 0.95;

/// Pureau dicté : plafond dur du nombre de rangs.
pub const NOMBRE_RANGS_DICTE_MAX: u32 = 100;

/// Décimales affichées pour le tracé / pureau calculé.
pub const DECIMALES_TRACAGE: usize = 2;

/// Décimales affichées pour les cotes du pureau dicté.
pub const DECIMALES_DICTE: usize = 1;

/// Garde-fou anti-gel : nombre max d’itérations pour une recherche de rangs.
pub const ITERATIONS_MAX_DEFAUT: u64 = 100_000;

/// Bruit flottant toléré (cm) : en dessous, un reste vaut 0 et une cote
/// qui dépasse la limite de si peu est ramenée sur la limite.
pub const TOLERANCE_CM: f64 = 1e-9;
