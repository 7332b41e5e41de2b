use super::load_registry;
use crate::cli::TemplatesArgs;
use crate::error::Result;
use protnerf::core::topology::registry::TemplateRegistry;

pub fn run(args: TemplatesArgs) -> Result<()> {
    let registry = load_registry(args.templates.as_deref())?;
    for line in describe(&registry) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per residue type: three-letter code, atom count and atom names in emission order.
pub fn describe(registry: &TemplateRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|(residue, template)| {
            let names: Vec<&str> = template.atoms().iter().map(|a| a.name.as_str()).collect();
            let atoms = if names.is_empty() {
                "-".to_string()
            } else {
                names.join(" ")
            };
            format!("{}  {:>2}  {}", residue, template.len(), atoms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_every_standard_residue() {
        let lines = describe(&TemplateRegistry::standard());
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().any(|l| l == "GLY   0  -"));
        assert!(lines.iter().any(|l| l == "SER   2  CB OG"));
    }

    #[test]
    fn describes_custom_registry() {
        let registry = TemplateRegistry::from_toml_str(
            r#"
[ALA]
atoms = [
    { name = "CB", anchors = ["C-", "N", "CA"], bond_length = 1.52, bond_angle = 110.5, dihedral = { chi = 0 } },
]
"#,
        )
        .unwrap();
        assert_eq!(describe(&registry), vec!["ALA   1  CB".to_string()]);
    }
}
