//! Configuration lue dans l’environnement (natif seulement).
//!
//! - `RUST_LOG`                   : niveau de journalisation (défaut "info")
//! - `CALCULATEUR_ITERATIONS_MAX` : garde-fou des recherches de rangs (défaut 100000)
//!
//! Un fichier `.env` est chargé s’il existe.

use thiserror::Error;

use crate::noyau::constantes::ITERATIONS_MAX_DEFAUT;
use crate::noyau::Limites;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ErreurConfig {
    #[error("Variable d’environnement {cle} invalide : {valeur:?}")]
    Invalide { cle: &'static str, valeur: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rust_log: String,
    pub iterations_max: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            iterations_max: ITERATIONS_MAX_DEFAUT,
        }
    }
}

impl Config {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn depuis_env() -> Result<Self, ErreurConfig> {
        dotenvy::dotenv().ok(); // .env optionnel

        Self::depuis(|cle| std::env::var(cle).ok())
    }

    /// Construit la config à partir d’une source clé -> valeur (testable sans env).
    pub fn depuis(lire: impl Fn(&str) -> Option<String>) -> Result<Self, ErreurConfig> {
        let defaut = Self::default();

        let rust_log = lire("RUST_LOG").unwrap_or(defaut.rust_log);

        let iterations_max = match lire("CALCULATEUR_ITERATIONS_MAX") {
            None => defaut.iterations_max,
            Some(v) => match v.trim().parse::<u64>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ErreurConfig::Invalide {
                        cle: "CALCULATEUR_ITERATIONS_MAX",
                        valeur: v,
                    })
                }
            },
        };

        Ok(Self {
            rust_log,
            iterations_max,
        })
    }

    /// Directive `EnvFilter` : le niveau ne vise que cette crate.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn directive_journal(&self) -> String {
        format!("{}={}", env!("CARGO_PKG_NAME"), self.rust_log.trim())
    }

    pub fn limites(&self) -> Limites {
        Limites {
            iterations_max: self.iterations_max,
        }
    }
}
