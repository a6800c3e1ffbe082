//! Tests de propriétés : invariants sur des paramètres tirés au hasard.
//!
//! - RNG déterministe (seed fixe)
//! - saisies au dixième de cm (comme sur chantier)
//! - budget temps global
//! - oracle indépendant : balayage brut des nombres de rangs depuis 1

use std::time::{Duration, Instant};

use super::calculateur::{calculer_pureau, ConfigRampant, Solution};
use super::constantes::FACTEUR_PROCHE_MAX;
use super::dicte::{calculer_dicte_le, ParametresDictes};
use super::parametres::ParametresCalcul;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    /// Valeur au dixième dans [min, min + pas/10].
    fn dixiemes(&mut self, min: f64, pas: u32) -> f64 {
        min + f64::from(self.pick(pas + 1)) / 10.0
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération ------------------------ */

fn gen_params(rng: &mut Rng) -> ParametresCalcul {
    let pureau_min = rng.dixiemes(25.0, 150);
    // intervalles étroits fréquents => on force aussi le mode hors pureau
    let ecart = if rng.pick(3) == 0 {
        rng.dixiemes(0.1, 10)
    } else {
        rng.dixiemes(1.0, 90)
    };

    ParametresCalcul {
        rampant1: rng.dixiemes(200.0, 10_000),
        rampant2: rng.dixiemes(200.0, 10_000),
        premier_rang1: rng.dixiemes(20.0, 200),
        premier_rang2: rng.dixiemes(20.0, 200),
        espace_faitage1: rng.dixiemes(5.0, 200),
        espace_faitage2: rng.dixiemes(5.0, 200),
        pureau_min,
        pureau_max: pureau_min + ecart,
    }
}

/// Strictement dans l’intervalle (on écarte les cas limites au bruit flottant près).
fn nettement_dans(p: f64, pmin: f64, pmax: f64) -> bool {
    p >= pmin + 1e-9 && p <= pmax - 1e-9
}

fn rangs_communs_nets(p: &ParametresCalcul, jusqu_a: u32) -> Option<u32> {
    let [r1, r2] = p.rampants();
    let (u1, u2) = (r1.longueur_utile(), r2.longueur_utile());
    (1..jusqu_a).find(|&n| {
        let n = f64::from(n);
        nettement_dans(u1 / n, p.pureau_min, p.pureau_max)
            && nettement_dans(u2 / n, p.pureau_min, p.pureau_max)
    })
}

/* ------------------------ Tests ------------------------ */

#[test]
fn prop_solution_commune_minimale_et_dans_intervalle() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut vus_normal = 0usize;
    let mut vus_hors = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let p = gen_params(&mut rng);
        let r = calculer_pureau(&p).unwrap_or_else(|e| panic!("p={p:?} err={e}"));
        let [r1, r2] = p.rampants();

        match r.solution {
            Solution::Commune(s) => {
                vus_normal += 1;
                for pureau in [s.pureau1, s.pureau2] {
                    assert!(
                        pureau >= p.pureau_min && pureau <= p.pureau_max,
                        "p={p:?} s={s:?}"
                    );
                }
                // aucun nombre de rangs plus petit ne convenait
                assert_eq!(
                    rangs_communs_nets(&p, s.nombre_rangs),
                    None,
                    "p={p:?} s={s:?}"
                );
                // aller-retour : longueur utile ≈ pureau × rangs
                let n = f64::from(s.nombre_rangs);
                assert!((r1.longueur_utile() - s.pureau1 * n).abs() <= 0.01);
                assert!((r2.longueur_utile() - s.pureau2 * n).abs() <= 0.01);
            }
            Solution::HorsPureau { .. } => {
                vus_hors += 1;
                assert_eq!(rangs_communs_nets(&p, 1000), None, "p={p:?}");
            }
        }
    }

    // On veut voir les deux modes, sinon le tirage ne “balaye” rien.
    assert!(vus_normal > 100, "trop peu de solutions normales: {vus_normal}");
    assert!(vus_hors > 100, "trop peu de hors pureau: {vus_hors}");
}

#[test]
fn prop_configs_hors_pureau() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..2000 {
        budget(t0, max);

        let p = gen_params(&mut rng);
        let r = calculer_pureau(&p).unwrap_or_else(|e| panic!("p={p:?} err={e}"));
        let Solution::HorsPureau { config1, config2 } = r.solution else {
            continue;
        };

        for (config, rampant) in [(config1, p.rampants()[0]), (config2, p.rampants()[1])] {
            let u = rampant.longueur_utile();
            match config {
                ConfigRampant::PilePoil {
                    nombre_rangs,
                    pureau,
                } => {
                    assert_eq!(config.dernier_rang(), 0.0);
                    assert!(pureau >= p.pureau_min && pureau <= p.pureau_max);
                    assert!((pureau * f64::from(nombre_rangs) - u).abs() <= 0.01);
                }
                ConfigRampant::ForcePresMax {
                    nombre_rangs,
                    pureau,
                    rangs_complets,
                    dernier_rang,
                } => {
                    assert_eq!(pureau, p.pureau_max * FACTEUR_PROCHE_MAX);
                    assert!(dernier_rang >= 0.0 && dernier_rang <= pureau + 1e-9);
                    let attendu = if dernier_rang > 0.0 {
                        rangs_complets + 1
                    } else {
                        rangs_complets
                    };
                    assert_eq!(nombre_rangs, attendu);
                    assert!((pureau * f64::from(rangs_complets) + dernier_rang - u).abs() <= 0.01);
                }
            }
        }
    }
}

#[test]
fn prop_tracage_croissant_et_borne() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(0x5EED_u64);

    for cas in 0..1000 {
        budget(t0, max);

        let p = gen_params(&mut rng);
        let r = calculer_pureau(&p).unwrap_or_else(|e| panic!("p={p:?} err={e}"));

        for (res, rampant) in r.rampants().into_iter().zip(p.rampants()) {
            let limite = rampant.limite_tracage();

            assert_eq!(res.tracage.first(), Some(&rampant.premier_rang));
            assert!(
                res.tracage.windows(2).all(|w| w[0] < w[1]),
                "tracé non croissant p={p:?} t={:?}",
                res.tracage
            );
            assert!(
                res.tracage.iter().all(|&c| c <= limite),
                "cote au-delà du faîtage p={p:?} t={:?}",
                res.tracage
            );
        }

        // formatage exact (BigRational) : coûteux, un cas sur 50 suffit
        if cas % 50 == 0 {
            for res in r.rampants() {
                let t = res.tracage_formate();
                assert_eq!(t.len(), res.tracage.len());
                assert!(t.iter().all(|c| c.split_once('.').is_some_and(|(_, d)| d.len() == 2)));
            }
        }
    }
}

#[test]
fn prop_determinisme() {
    let mut rng = Rng::new(0xD15EA5E_u64);
    for _ in 0..200 {
        let p = gen_params(&mut rng);
        assert_eq!(calculer_pureau(&p), calculer_pureau(&p));
    }
}

#[test]
fn prop_dicte_ecarts_constants() {
    let t0 = Instant::now();
    let max = Duration::from_secs(10);
    let mut rng = Rng::new(0xFACADE_u64);
    let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

    for _ in 0..200 {
        budget(t0, max);

        let params = ParametresDictes {
            nom_chantier: String::new(),
            premier_rang: rng.dixiemes(0.0, 500),
            pureau: rng.dixiemes(10.0, 400),
            nombre_rangs: 1 + rng.pick(100),
        };
        let r = calculer_dicte_le(&params, date)
            .unwrap_or_else(|e| panic!("params={params:?} err={e}"));

        assert_eq!(r.cotes.len(), params.nombre_rangs as usize);
        let v: Vec<f64> = r.cotes.iter().map(|c| c.parse().unwrap()).collect();
        assert!((v[0] - (params.premier_rang + params.pureau)).abs() <= 0.05 + 1e-9);
        for w in v.windows(2) {
            assert!(
                (w[1] - w[0] - params.pureau).abs() <= 0.1 + 1e-9,
                "params={params:?} cotes={:?}",
                r.cotes
            );
        }
    }
}
