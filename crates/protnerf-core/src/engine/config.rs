use crate::core::utils::geometry::DEFAULT_EPSILON;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Bond length '{name}' must be positive and finite, got {value}")]
    InvalidBondLength { name: &'static str, value: f64 },

    #[error("Normalization epsilon must be positive and finite, got {0}")]
    InvalidEpsilon(f64),

    #[error("Seed angle '{name}' must be finite, got {value}")]
    InvalidSeedAngle { name: &'static str, value: f64 },
}

/// Standard backbone bond lengths in angstroms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondLengths {
    pub n_ca: f64,
    pub ca_c: f64,
    pub c_n: f64,
}

impl Default for BondLengths {
    fn default() -> Self {
        Self {
            n_ca: 1.442,
            ca_c: 1.498,
            c_n: 1.379,
        }
    }
}

/// Geometry of the synthetic carbon placed before the first residue's nitrogen.
///
/// The first residue has no real preceding carbonyl carbon, yet its side-chain
/// dihedral slot 0 is defined over `C(-1)-N-CA-CB`. The synthetic carbon stands
/// in for it and must match the convention used to measure that dihedral.
/// Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedGeometry {
    /// Bond angle `C(-1)-N-CA`.
    pub c_n_ca_angle: f64,
    /// Dihedral `C-CA-N-C(-1)` of the first residue.
    pub preceding_dihedral: f64,
}

impl Default for SeedGeometry {
    fn default() -> Self {
        Self {
            c_n_ca_angle: 121.7f64.to_radians(),
            preceding_dihedral: (-60.0f64).to_radians(),
        }
    }
}

/// Immutable settings shared by every reconstruction step.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconstructionConfig {
    pub bond_lengths: BondLengths,
    pub epsilon: f64,
    pub seed: SeedGeometry,
    /// Reject chains whose output holds non-finite or collapsed coordinates.
    pub validate_output: bool,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            bond_lengths: BondLengths::default(),
            epsilon: DEFAULT_EPSILON,
            seed: SeedGeometry::default(),
            validate_output: false,
        }
    }
}

#[derive(Default)]
pub struct ReconstructionConfigBuilder {
    n_ca: Option<f64>,
    ca_c: Option<f64>,
    c_n: Option<f64>,
    epsilon: Option<f64>,
    seed_c_n_ca_angle: Option<f64>,
    seed_preceding_dihedral: Option<f64>,
    validate_output: Option<bool>,
}

impl ReconstructionConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_ca_length(mut self, length: f64) -> Self {
        self.n_ca = Some(length);
        self
    }
    pub fn ca_c_length(mut self, length: f64) -> Self {
        self.ca_c = Some(length);
        self
    }
    pub fn c_n_length(mut self, length: f64) -> Self {
        self.c_n = Some(length);
        self
    }
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = Some(epsilon);
        self
    }
    pub fn seed_c_n_ca_angle(mut self, radians: f64) -> Self {
        self.seed_c_n_ca_angle = Some(radians);
        self
    }
    pub fn seed_preceding_dihedral(mut self, radians: f64) -> Self {
        self.seed_preceding_dihedral = Some(radians);
        self
    }
    pub fn validate_output(mut self, validate: bool) -> Self {
        self.validate_output = Some(validate);
        self
    }

    pub fn build(self) -> Result<ReconstructionConfig, ConfigError> {
        let defaults = ReconstructionConfig::default();

        let bond_lengths = BondLengths {
            n_ca: positive_length("n_ca", self.n_ca.unwrap_or(defaults.bond_lengths.n_ca))?,
            ca_c: positive_length("ca_c", self.ca_c.unwrap_or(defaults.bond_lengths.ca_c))?,
            c_n: positive_length("c_n", self.c_n.unwrap_or(defaults.bond_lengths.c_n))?,
        };

        let epsilon = self.epsilon.unwrap_or(defaults.epsilon);
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }

        let seed = SeedGeometry {
            c_n_ca_angle: finite_angle(
                "c_n_ca_angle",
                self.seed_c_n_ca_angle
                    .unwrap_or(defaults.seed.c_n_ca_angle),
            )?,
            preceding_dihedral: finite_angle(
                "preceding_dihedral",
                self.seed_preceding_dihedral
                    .unwrap_or(defaults.seed.preceding_dihedral),
            )?,
        };

        Ok(ReconstructionConfig {
            bond_lengths,
            epsilon,
            seed,
            validate_output: self.validate_output.unwrap_or(defaults.validate_output),
        })
    }
}

fn positive_length(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidBondLength { name, value })
    }
}

fn finite_angle(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidSeedAngle { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_overrides_yields_defaults() {
        let config = ReconstructionConfigBuilder::new().build().unwrap();
        assert_eq!(config, ReconstructionConfig::default());
        assert_eq!(config.bond_lengths.n_ca, 1.442);
        assert_eq!(config.bond_lengths.ca_c, 1.498);
        assert_eq!(config.bond_lengths.c_n, 1.379);
        assert_eq!(config.epsilon, 1e-12);
        assert!(!config.validate_output);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ReconstructionConfigBuilder::new()
            .n_ca_length(1.46)
            .ca_c_length(1.52)
            .c_n_length(1.33)
            .epsilon(1e-8)
            .seed_c_n_ca_angle(2.0)
            .seed_preceding_dihedral(3.0)
            .validate_output(true)
            .build()
            .unwrap();

        assert_eq!(
            config.bond_lengths,
            BondLengths {
                n_ca: 1.46,
                ca_c: 1.52,
                c_n: 1.33
            }
        );
        assert_eq!(config.epsilon, 1e-8);
        assert_eq!(config.seed.c_n_ca_angle, 2.0);
        assert_eq!(config.seed.preceding_dihedral, 3.0);
        assert!(config.validate_output);
    }

    #[test]
    fn builder_rejects_non_positive_bond_length() {
        let err = ReconstructionConfigBuilder::new()
            .ca_c_length(0.0)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBondLength {
                name: "ca_c",
                value: 0.0
            }
        );
    }

    #[test]
    fn builder_rejects_bad_epsilon_and_seed() {
        assert_eq!(
            ReconstructionConfigBuilder::new().epsilon(-1.0).build(),
            Err(ConfigError::InvalidEpsilon(-1.0))
        );
        assert!(matches!(
            ReconstructionConfigBuilder::new()
                .seed_preceding_dihedral(f64::INFINITY)
                .build(),
            Err(ConfigError::InvalidSeedAngle {
                name: "preceding_dihedral",
                ..
            })
        ));
    }
}
