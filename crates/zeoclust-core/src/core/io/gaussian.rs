use super::traits::{JobHeader, StructureInput, StructureWriter};
use crate::core::models::atom::{AtomRecord, FrozenFlag};
use crate::core::models::combination::CanonicalKey;
use crate::core::models::conformer::AbstractConformer;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::template::BindingModeTemplate;
use nalgebra::Point3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

const GENERATED_TITLE: &str = "Automatically generated extraframework cluster";
const INPUT_EXTENSIONS: [&str; 2] = ["com", "gjf"];

#[derive(Debug, Error)]
pub enum GaussianError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: GaussianParseErrorKind,
    },
    #[error("Missing required section: {0}")]
    MissingSection(&'static str),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Error)]
pub enum GaussianParseErrorKind {
    #[error("Invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Charge/multiplicity line requires two integers")]
    IncompleteChargeLine,
    #[error("Multiplicity must be at least 1")]
    ZeroMultiplicity,
    #[error("Atom line requires a symbol and three coordinates")]
    AtomLineTooShort,
}

/// Gaussian-style job files (`.com`, `.gjf`).
///
/// Layout: Link0 (`%`) and route lines, a blank line, the title section, a
/// blank line, a `charge multiplicity` line, then one line per atom as
/// `symbol [frozen] x y z`.
pub struct GaussianFile;

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn skip_blank(lines: &[String], mut idx: usize) -> usize {
    while idx < lines.len() && is_blank(&lines[idx]) {
        idx += 1;
    }
    idx
}

fn parse_coordinate(token: &str, field: &'static str, line: usize) -> Result<f64, GaussianError> {
    token.parse().map_err(|_| GaussianError::Parse {
        line,
        kind: GaussianParseErrorKind::InvalidFloat {
            field,
            value: token.to_string(),
        },
    })
}

fn is_atom_line(tokens: &[&str]) -> bool {
    tokens
        .first()
        .and_then(|t| t.chars().next())
        .is_some_and(|c| c.is_ascii_alphabetic())
}

impl StructureInput for GaussianFile {
    type Error = GaussianError;

    fn parse_header(lines: &[String]) -> Result<(JobHeader, usize), Self::Error> {
        let mut header = JobHeader::default();

        let mut idx = skip_blank(lines, 0);
        while idx < lines.len() && !is_blank(&lines[idx]) {
            let line = lines[idx].trim_end();
            if line.trim_start().starts_with('%') {
                header.link0.push(line.to_string());
            } else {
                header.route.push(line.to_string());
            }
            idx += 1;
        }
        if header.route.is_empty() {
            return Err(GaussianError::MissingSection("route"));
        }

        idx = skip_blank(lines, idx);
        let mut title = Vec::new();
        while idx < lines.len() && !is_blank(&lines[idx]) {
            title.push(lines[idx].trim());
            idx += 1;
        }
        if title.is_empty() {
            return Err(GaussianError::MissingSection("title"));
        }
        header.title = title.join(" ");

        idx = skip_blank(lines, idx);
        let charge_line = lines
            .get(idx)
            .ok_or(GaussianError::MissingSection("charge and multiplicity"))?;
        let line_num = idx + 1;
        let fields: Vec<&str> = charge_line.split_whitespace().collect();
        if fields.len() < 2 {
            return Err(GaussianError::Parse {
                line: line_num,
                kind: GaussianParseErrorKind::IncompleteChargeLine,
            });
        }
        header.charge = fields[0].parse().map_err(|_| GaussianError::Parse {
            line: line_num,
            kind: GaussianParseErrorKind::InvalidInt {
                field: "charge",
                value: fields[0].to_string(),
            },
        })?;
        let multiplicity: u32 = fields[1].parse().map_err(|_| GaussianError::Parse {
            line: line_num,
            kind: GaussianParseErrorKind::InvalidInt {
                field: "multiplicity",
                value: fields[1].to_string(),
            },
        })?;
        if multiplicity == 0 {
            return Err(GaussianError::Parse {
                line: line_num,
                kind: GaussianParseErrorKind::ZeroMultiplicity,
            });
        }
        header.unpaired = multiplicity - 1;

        Ok((header, idx + 1))
    }

    fn parse_atoms(lines: &[String], start: usize) -> Result<Vec<AtomRecord>, Self::Error> {
        let mut atoms = Vec::new();
        for (offset, line) in lines.iter().skip(start).enumerate() {
            let line_num = start + offset + 1;
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if !is_atom_line(&tokens) {
                break;
            }

            let (frozen, coords) = match FrozenFlag::from_str(tokens.get(1).unwrap_or(&"")) {
                Ok(flag) if tokens.len() >= 5 => (flag, &tokens[2..5]),
                _ if tokens.len() >= 4 => (FrozenFlag::Free, &tokens[1..4]),
                _ => {
                    return Err(GaussianError::Parse {
                        line: line_num,
                        kind: GaussianParseErrorKind::AtomLineTooShort,
                    });
                }
            };

            let position = Point3::new(
                parse_coordinate(coords[0], "x", line_num)?,
                parse_coordinate(coords[1], "y", line_num)?,
                parse_coordinate(coords[2], "z", line_num)?,
            );
            atoms.push(AtomRecord::new(tokens[0], position).with_frozen(frozen));
        }
        Ok(atoms)
    }
}

fn write_atom_line(writer: &mut impl Write, atom: &AtomRecord) -> io::Result<()> {
    writeln!(
        writer,
        "{:<5} {:<5} {:>14.8} {:>14.8} {:>14.8}",
        atom.symbol,
        atom.frozen.as_str(),
        atom.position.x,
        atom.position.y,
        atom.position.z
    )
}

impl StructureWriter for GaussianFile {
    type Error = GaussianError;

    fn write_conformer(
        conformer: &AbstractConformer,
        scaffold: &Scaffold,
        header: &JobHeader,
        job_name: &str,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "%chk={}.chk", job_name)?;
        for line in header
            .link0
            .iter()
            .filter(|l| !l.trim_start().to_ascii_lowercase().starts_with("%chk"))
        {
            writeln!(writer, "{}", line)?;
        }
        for line in &header.route {
            writeln!(writer, "{}", line)?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {} on {}",
            GENERATED_TITLE,
            conformer.canonical_label(),
            conformer.template.name
        )?;
        writeln!(writer)?;
        writeln!(
            writer,
            "{} {}",
            conformer.total_charge,
            conformer.multiplicity()
        )?;

        for atom in scaffold.atoms.iter().chain(conformer.atoms.iter()) {
            write_atom_line(writer, atom)?;
        }

        writeln!(writer)?;
        writeln!(writer)?;
        Ok(())
    }
}

/// Reads a binding-mode file whose atom block repeats the scaffold atoms
/// before the metal and ligand entries.
///
/// The template keeps only the entries that follow the first
/// `scaffold.num_atoms()` atoms.
pub fn read_binding_mode(
    name: &str,
    path: &Path,
    scaffold: &Scaffold,
) -> Result<BindingModeTemplate, GaussianError> {
    let mut reader = BufReader::new(File::open(path)?);
    let (_, atoms) = GaussianFile::read_structure(&mut reader)?;
    if atoms.len() < scaffold.num_atoms() {
        return Err(GaussianError::Inconsistency(format!(
            "binding mode '{}' has {} atoms but the scaffold alone has {}",
            name,
            atoms.len(),
            scaffold.num_atoms()
        )));
    }
    let mode_atoms = atoms.into_iter().skip(scaffold.num_atoms()).collect();
    Ok(BindingModeTemplate::new(name, mode_atoms))
}

/// Loads every `.com`/`.gjf` binding mode in `dir`, in file-name order.
pub fn load_binding_modes(
    dir: &Path,
    scaffold: &Scaffold,
) -> Result<Vec<BindingModeTemplate>, GaussianError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| INPUT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .collect();
    paths.sort();

    let mut modes = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        debug!(mode = %name, "Reading binding mode.");
        modes.push(read_binding_mode(&name, &path, scaffold)?);
    }
    info!(count = modes.len(), dir = %dir.display(), "Loaded binding modes.");
    Ok(modes)
}

/// Builds the job name for the `conf_number`-th conformer of a combination.
pub fn job_name(conformer: &AbstractConformer, conf_number: usize) -> String {
    format!(
        "{}_charge{}_mult{}_conf{}",
        conformer.combination.key().tokens().concat(),
        conformer.total_charge,
        conformer.multiplicity(),
        conf_number
    )
}

/// Writes every conformer as its own job file under `output_dir`.
///
/// Conformers sharing a canonical key are numbered in order of appearance.
/// With `make_dirs`, each job is placed in a directory of the same name.
///
/// # Return
///
/// Returns the paths of the written files.
pub fn write_all(
    conformers: &[AbstractConformer],
    scaffold: &Scaffold,
    header: &JobHeader,
    output_dir: &Path,
    make_dirs: bool,
) -> Result<Vec<PathBuf>, GaussianError> {
    std::fs::create_dir_all(output_dir)?;
    let mut counters: HashMap<&CanonicalKey, usize> = HashMap::new();
    let mut written = Vec::with_capacity(conformers.len());

    for conformer in conformers {
        let counter = counters.entry(conformer.combination.key()).or_insert(0);
        *counter += 1;
        let name = job_name(conformer, *counter);

        let dir = if make_dirs {
            let dir = output_dir.join(&name);
            std::fs::create_dir_all(&dir)?;
            dir
        } else {
            output_dir.to_path_buf()
        };
        let path = dir.join(format!("{}.com", name));
        GaussianFile::write_conformer_to_path(conformer, scaffold, header, &name, &path)?;
        written.push(path);
    }

    info!(files = written.len(), "Conformer files written.");
    Ok(written)
}
