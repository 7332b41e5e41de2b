use protnerf::engine::config::ReconstructionConfig;

/// Values used when neither the CLI nor the config file sets a key.
/// Angles are in degrees, as in the config file.
pub struct DefaultsConfig {
    pub n_ca: f64,
    pub ca_c: f64,
    pub c_n: f64,
    pub epsilon: f64,
    pub seed_c_n_ca_angle: f64,
    pub seed_preceding_dihedral: f64,
    pub validate_output: bool,
    pub input_degrees: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let core = ReconstructionConfig::default();
        Self {
            n_ca: core.bond_lengths.n_ca,
            ca_c: core.bond_lengths.ca_c,
            c_n: core.bond_lengths.c_n,
            epsilon: core.epsilon,
            seed_c_n_ca_angle: core.seed.c_n_ca_angle.to_degrees(),
            seed_preceding_dihedral: core.seed.preceding_dihedral.to_degrees(),
            validate_output: core.validate_output,
            input_degrees: false,
        }
    }
}
