// src/noyau/format.rs
//
// Affichage des cotes à N décimales.
//
// On arrondit sur la valeur binaire EXACTE du flottant (BigRational), demi
// vers le haut en valeur absolue : 0.125 -> "0.13", mais 1.005 (stocké
// 1.00499…) -> "1.00". Pas de double arrondi via `{:.N}`.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// Convertit un entier “scalé” (×10^decimales) en texte décimal.
fn scaled_to_decimal(mut scaled: BigInt, decimales: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(decimales);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if decimales == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < decimales {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// x -> entier “scalé” = round(|x| * 10^decimales), signe réappliqué.
fn arrondi_scaled(x: &BigRational, decimales: usize) -> BigInt {
    let scale = BigRational::from_integer(pow10(decimales));
    let demi = BigRational::new(BigInt::one(), BigInt::from(2));

    let n = (x.abs() * scale + demi).floor().to_integer();
    if x.is_negative() {
        -n
    } else {
        n
    }
}

/// Texte décimal à `decimales` chiffres après la virgule (point décimal).
///
/// NaN / ±∞ : rendus tels quels (ne devrait pas arriver après validation).
pub fn format_decimal(x: f64, decimales: usize) -> String {
    let Some(r) = BigRational::from_float(x) else {
        return x.to_string();
    };

    let scaled = arrondi_scaled(&r, decimales);
    if scaled.is_zero() {
        // pas de "-0.00"
        return scaled_to_decimal(BigInt::zero(), decimales);
    }
    scaled_to_decimal(scaled, decimales)
}

/// Lecture d’une saisie utilisateur : virgule ou point, espaces tolérés.
/// Saisie vide ou illisible => NaN (le noyau la refusera comme champ invalide).
pub fn lire_nombre(saisie: &str) -> f64 {
    let s = saisie.trim().replace(',', ".");
    s.parse::<f64>().unwrap_or(f64::NAN)
}
