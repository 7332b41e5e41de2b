use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use protnerf::engine::config::ReconstructionConfigBuilder;
use std::path::PathBuf;
use std::str::FromStr;

pub fn build_config(args: &BuildArgs) -> Result<AppConfig> {
    if args.input == args.output {
        return Err(CliError::Argument(format!(
            "Output path {:?} would overwrite the input table",
            args.output
        )));
    }

    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let bonds = file_config.bond_lengths.take().unwrap_or_default();
    let seed = file_config.seed.take().unwrap_or_default();

    let epsilon = args
        .epsilon
        .or(file_config.epsilon)
        .unwrap_or(defaults.epsilon);

    let validate_output = args.validate
        || file_config
            .validate_output
            .unwrap_or(defaults.validate_output);

    let input_degrees = args.degrees
        || file_config
            .input_degrees
            .unwrap_or(defaults.input_degrees);

    let templates_path = args.templates.clone().or(file_config.templates_path);

    let core_config = ReconstructionConfigBuilder::new()
        .n_ca_length(bonds.n_ca.unwrap_or(defaults.n_ca))
        .ca_c_length(bonds.ca_c.unwrap_or(defaults.ca_c))
        .c_n_length(bonds.c_n.unwrap_or(defaults.c_n))
        .epsilon(epsilon)
        .seed_c_n_ca_angle(
            seed.c_n_ca_angle
                .unwrap_or(defaults.seed_c_n_ca_angle)
                .to_radians(),
        )
        .seed_preceding_dihedral(
            seed.preceding_dihedral
                .unwrap_or(defaults.seed_preceding_dihedral)
                .to_radians(),
        )
        .validate_output(validate_output)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        templates_path,
        input_degrees,
        precision: args.precision,
        core_config,
    })
}

fn parse_value<V: FromStr>(key: &str, value: &str, kind: &str) -> Result<V> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "bond-lengths.n-ca" => {
                config
                    .bond_lengths
                    .get_or_insert_with(Default::default)
                    .n_ca = Some(parse_value(key, value_str, "float")?);
            }
            "bond-lengths.ca-c" => {
                config
                    .bond_lengths
                    .get_or_insert_with(Default::default)
                    .ca_c = Some(parse_value(key, value_str, "float")?);
            }
            "bond-lengths.c-n" => {
                config
                    .bond_lengths
                    .get_or_insert_with(Default::default)
                    .c_n = Some(parse_value(key, value_str, "float")?);
            }
            "epsilon" => {
                config.epsilon = Some(parse_value(key, value_str, "float")?);
            }
            "seed.c-n-ca-angle" => {
                config.seed.get_or_insert_with(Default::default).c_n_ca_angle =
                    Some(parse_value(key, value_str, "float")?);
            }
            "seed.preceding-dihedral" => {
                config
                    .seed
                    .get_or_insert_with(Default::default)
                    .preceding_dihedral = Some(parse_value(key, value_str, "float")?);
            }
            "validate-output" => {
                config.validate_output = Some(parse_value(key, value_str, "boolean")?);
            }
            "input-degrees" => {
                config.input_degrees = Some(parse_value(key, value_str, "boolean")?);
            }
            "templates-path" => {
                config.templates_path = Some(PathBuf::from(value_str));
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Precision;
    use protnerf::engine::config::ReconstructionConfig;
    use std::fs;
    use tempfile::tempdir;

    fn base_build_args() -> BuildArgs {
        BuildArgs {
            input: PathBuf::from("angles.csv"),
            output: PathBuf::from("coords.csv"),
            config: None,
            templates: None,
            degrees: false,
            precision: Precision::F64,
            epsilon: None,
            validate: false,
            set_values: vec![],
        }
    }

    #[test]
    fn build_config_rejects_output_overwriting_input() {
        let mut args = base_build_args();
        args.output = args.input.clone();

        let result = build_config(&args);

        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn build_config_without_file_uses_defaults() {
        let app = build_config(&base_build_args()).expect("build ok");

        assert_eq!(app.input_path, PathBuf::from("angles.csv"));
        assert_eq!(app.output_path, PathBuf::from("coords.csv"));
        assert!(app.templates_path.is_none());
        assert!(!app.input_degrees);
        assert_eq!(app.precision, Precision::F64);

        let expected = ReconstructionConfig::default();
        assert_eq!(app.core_config.bond_lengths, expected.bond_lengths);
        assert_eq!(app.core_config.epsilon, expected.epsilon);
        assert!((app.core_config.seed.c_n_ca_angle - expected.seed.c_n_ca_angle).abs() < 1e-12);
        assert!(
            (app.core_config.seed.preceding_dihedral - expected.seed.preceding_dihedral).abs()
                < 1e-12
        );
        assert!(!app.core_config.validate_output);
    }

    #[test]
    fn build_config_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(
            &cfg_path,
            r#"
            epsilon = 1e-9
            validate-output = true
            input-degrees = true
            templates-path = "residues.toml"

            [bond-lengths]
            ca-c = 1.52

            [seed]
            preceding-dihedral = 180.0
            "#,
        )
        .unwrap();

        let mut args = base_build_args();
        args.config = Some(cfg_path);

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.epsilon, 1e-9);
        assert!(cfg.validate_output);
        assert!(app.input_degrees);
        assert_eq!(app.templates_path, Some(PathBuf::from("residues.toml")));
        assert_eq!(cfg.bond_lengths.ca_c, 1.52);
        assert_eq!(cfg.bond_lengths.n_ca, DefaultsConfig::default().n_ca);
        assert!((cfg.seed.preceding_dihedral - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn cli_overrides_set_values_which_override_file() {
        let dir = tempdir().unwrap();
        let cfg_path = dir.path().join("config.toml");
        fs::write(&cfg_path, "epsilon = 1e-9\n[bond-lengths]\nc-n = 1.30\n").unwrap();

        let mut args = base_build_args();
        args.config = Some(cfg_path);
        args.epsilon = Some(1e-6);
        args.templates = Some(PathBuf::from("cli.toml"));
        args.set_values = vec![
            "epsilon=1e-7".to_string(),
            "bond-lengths.c-n=1.33".to_string(),
            "templates-path=set.toml".to_string(),
        ];

        let app = build_config(&args).expect("build ok");

        assert_eq!(app.core_config.epsilon, 1e-6);
        assert_eq!(app.core_config.bond_lengths.c_n, 1.33);
        assert_eq!(app.templates_path, Some(PathBuf::from("cli.toml")));
    }

    #[test]
    fn set_values_override() {
        let mut args = base_build_args();
        args.set_values = vec![
            "bond-lengths.n-ca=1.46".to_string(),
            "bond-lengths.ca-c=1.53".to_string(),
            "seed.c-n-ca-angle=120.0".to_string(),
            "seed.preceding-dihedral=-45.0".to_string(),
            "validate-output=true".to_string(),
            "input-degrees=true".to_string(),
        ];

        let app = build_config(&args).expect("build ok");
        let cfg = app.core_config;

        assert_eq!(cfg.bond_lengths.n_ca, 1.46);
        assert_eq!(cfg.bond_lengths.ca_c, 1.53);
        assert!((cfg.seed.c_n_ca_angle - 120.0f64.to_radians()).abs() < 1e-12);
        assert!((cfg.seed.preceding_dihedral - (-45.0f64).to_radians()).abs() < 1e-12);
        assert!(cfg.validate_output);
        assert!(app.input_degrees);
    }

    #[test]
    fn malformed_or_unknown_set_values_are_rejected() {
        for bad in ["epsilon", "epsilon=abc", "unknown.key=1", "validate-output=maybe"] {
            let mut args = base_build_args();
            args.set_values = vec![bad.to_string()];
            assert!(
                matches!(build_config(&args), Err(CliError::Config(_))),
                "accepted {bad}"
            );
        }
    }

    #[test]
    fn invalid_bond_length_is_a_config_error() {
        let mut args = base_build_args();
        args.set_values = vec!["bond-lengths.n-ca=-1.0".to_string()];
        assert!(matches!(build_config(&args), Err(CliError::Config(_))));
    }
}
