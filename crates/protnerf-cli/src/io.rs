use crate::error::{CliError, Result};
use nalgebra::RealField;
use protnerf::core::models::chain::{ChainInput, ReconstructedChain};
use protnerf::core::models::internal::{
    ANGLES_PER_RESIDUE, AngleRow, CA_C_N, CHI_START, C_N_CA, InternalCoordinates, N_CA_C, OMEGA,
    PHI, PSI,
};
use protnerf::core::models::residue::AminoAcid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One residue of the input angle table.
#[derive(Debug, Clone, Deserialize)]
pub struct AngleRecord {
    pub chain: String,
    pub residue: String,
    pub phi: f64,
    pub psi: f64,
    pub omega: f64,
    pub n_ca_c: f64,
    pub ca_c_n: f64,
    pub c_n_ca: f64,
    #[serde(default)]
    pub chi1: Option<f64>,
    #[serde(default)]
    pub chi2: Option<f64>,
    #[serde(default)]
    pub chi3: Option<f64>,
    #[serde(default)]
    pub chi4: Option<f64>,
    #[serde(default)]
    pub chi5: Option<f64>,
}

impl AngleRecord {
    /// The record as an angle row in radians. Missing side-chain dihedrals are `0`.
    pub fn to_row(&self, degrees: bool) -> AngleRow<f64> {
        let mut row = [0.0; ANGLES_PER_RESIDUE];
        row[PHI] = self.phi;
        row[PSI] = self.psi;
        row[OMEGA] = self.omega;
        row[N_CA_C] = self.n_ca_c;
        row[CA_C_N] = self.ca_c_n;
        row[C_N_CA] = self.c_n_ca;
        for (slot, chi) in [self.chi1, self.chi2, self.chi3, self.chi4, self.chi5]
            .into_iter()
            .enumerate()
        {
            row[CHI_START + slot] = chi.unwrap_or(0.0);
        }
        if degrees {
            row.iter_mut().for_each(|v| *v = v.to_radians());
        }
        row
    }
}

/// All rows of one chain, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainTable {
    pub id: String,
    pub sequence: Vec<AminoAcid>,
    pub rows: Vec<AngleRow<f64>>,
}

impl ChainTable {
    pub fn to_input<T: RealField + Copy>(&self) -> ChainInput<T> {
        let rows = self
            .rows
            .iter()
            .map(|row| row.map(nalgebra::convert::<f64, T>))
            .collect();
        ChainInput::new(&self.id, self.sequence.clone(), InternalCoordinates::new(rows))
    }
}

/// Reads the angle table at `path`, grouping rows by chain in order of first appearance.
pub fn read_angle_table(path: &Path, degrees: bool) -> Result<Vec<ChainTable>> {
    let parse_error = |e: csv::Error| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(parse_error)?;

    let mut chains: Vec<ChainTable> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for (row, result) in reader.deserialize::<AngleRecord>().enumerate() {
        let record = result.map_err(parse_error)?;
        let residue: AminoAcid = record
            .residue
            .parse()
            .map_err(|source| CliError::Residue { row, source })?;

        let index = *index_by_id.entry(record.chain.clone()).or_insert_with(|| {
            chains.push(ChainTable {
                id: record.chain.clone(),
                sequence: Vec::new(),
                rows: Vec::new(),
            });
            chains.len() - 1
        });
        chains[index].sequence.push(residue);
        chains[index].rows.push(record.to_row(degrees));
    }

    debug!("Read {} chain(s) from {:?}.", chains.len(), path);
    Ok(chains)
}

/// One atom of the output coordinate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateRecord {
    pub chain: String,
    pub atom_index: usize,
    pub residue_index: usize,
    pub residue: String,
    pub atom: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Writes every chain's atoms in emission order and returns the number of rows written.
pub fn write_coordinates<T>(path: &Path, chains: &[ReconstructedChain<T>]) -> Result<usize>
where
    T: RealField + Copy + Into<f64>,
{
    let write_error = |e: csv::Error| CliError::FileWriting {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;
    let mut written = 0;

    for chain in chains {
        for (atom_index, (site, position)) in chain.atoms().enumerate() {
            writer
                .serialize(CoordinateRecord {
                    chain: chain.id.clone(),
                    atom_index,
                    residue_index: site.residue_index,
                    residue: site.residue_type.three_letter_code().to_string(),
                    atom: site.name.clone(),
                    x: position.x.into(),
                    y: position.y.into(),
                    z: position.z.into(),
                })
                .map_err(write_error)?;
            written += 1;
        }
    }

    writer.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use protnerf::core::models::chain::AtomSite;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "chain,residue,phi,psi,omega,n_ca_c,ca_c_n,c_n_ca,chi1,chi2,chi3,chi4,chi5";

    #[test]
    fn groups_rows_by_chain_in_first_appearance_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("angles.csv");
        fs::write(
            &path,
            format!(
                "{HEADER}\n\
                 B,ALA,1,2,3,4,5,6,7,,,,\n\
                 A,G,0,0,0,1.9,2.0,2.1,,,,,\n\
                 B,ser,0.1,0.2,0.3,0.4,0.5,0.6,0.7,0.8,,,\n"
            ),
        )
        .unwrap();

        let chains = read_angle_table(&path, false).unwrap();

        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].id, "B");
        assert_eq!(
            chains[0].sequence,
            vec![AminoAcid::Alanine, AminoAcid::Serine]
        );
        assert_eq!(chains[0].rows[0][PHI], 1.0);
        assert_eq!(chains[0].rows[0][CHI_START], 7.0);
        assert_eq!(chains[0].rows[0][CHI_START + 1], 0.0);
        assert_eq!(chains[0].rows[1][CHI_START + 1], 0.8);
        assert_eq!(chains[1].id, "A");
        assert_eq!(chains[1].sequence, vec![AminoAcid::Glycine]);
    }

    #[test]
    fn degrees_are_converted_to_radians() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("angles.csv");
        fs::write(&path, format!("{HEADER}\nA,A,180,-90,0,0,0,0,90,,,,\n")).unwrap();

        let chains = read_angle_table(&path, true).unwrap();
        let row = chains[0].rows[0];

        assert!((row[PHI] - std::f64::consts::PI).abs() < 1e-12);
        assert!((row[PSI] + std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((row[CHI_START] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn chi_columns_may_be_omitted() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("angles.csv");
        fs::write(
            &path,
            "chain,residue,phi,psi,omega,n_ca_c,ca_c_n,c_n_ca\nA,GLY,0,0,0,1,1,1\n",
        )
        .unwrap();

        let chains = read_angle_table(&path, false).unwrap();
        assert!(chains[0].rows[0][CHI_START..].iter().all(|&chi| chi == 0.0));
    }

    #[test]
    fn unknown_residue_reports_row() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("angles.csv");
        fs::write(
            &path,
            format!("{HEADER}\nA,ALA,0,0,0,0,0,0,,,,,\nA,XYZ,0,0,0,0,0,0,,,,,\n"),
        )
        .unwrap();

        let result = read_angle_table(&path, false);
        assert!(matches!(result, Err(CliError::Residue { row: 1, .. })));
    }

    #[test]
    fn malformed_number_is_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("angles.csv");
        fs::write(&path, format!("{HEADER}\nA,ALA,abc,0,0,0,0,0,,,,,\n")).unwrap();

        let result = read_angle_table(&path, false);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }

    #[test]
    fn to_input_converts_precision() {
        let table = ChainTable {
            id: "A".to_string(),
            sequence: vec![AminoAcid::Alanine],
            rows: vec![[0.25; ANGLES_PER_RESIDUE]],
        };
        let input: ChainInput<f32> = table.to_input();
        assert_eq!(input.length, 1);
        assert_eq!(input.angles.row(0).unwrap()[PSI], 0.25f32);
    }

    #[test]
    fn writes_one_row_per_atom() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.csv");
        let chain = ReconstructedChain {
            id: "A".to_string(),
            positions: vec![Point3::new(0.0f32, 0.0, 0.0), Point3::new(1.5, -2.0, 0.25)],
            sites: vec![
                AtomSite {
                    residue_index: 0,
                    residue_type: AminoAcid::Alanine,
                    name: "N".to_string(),
                },
                AtomSite {
                    residue_index: 0,
                    residue_type: AminoAcid::Alanine,
                    name: "CA".to_string(),
                },
            ],
        };

        let written = write_coordinates(&path, &[chain]).unwrap();
        assert_eq!(written, 2);

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["chain", "atom_index", "residue_index", "residue", "atom", "x", "y", "z"]
        );
        let records: Vec<CoordinateRecord> =
            reader.deserialize().collect::<std::result::Result<_, _>>().unwrap();
        assert_eq!(records[1].atom, "CA");
        assert_eq!(records[1].residue, "ALA");
        assert_eq!(records[1].atom_index, 1);
        assert_eq!((records[1].x, records[1].y, records[1].z), (1.5, -2.0, 0.25));
    }
}
