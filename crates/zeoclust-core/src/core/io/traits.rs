use crate::core::models::atom::AtomRecord;
use crate::core::models::conformer::AbstractConformer;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::species::Parity;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Job-level information carried by a structure input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobHeader {
    /// Resource directives (e.g. `%mem=`, `%nprocshared=`), kept verbatim.
    pub link0: Vec<String>,
    /// Calculation keywords, kept verbatim for reuse in generated files.
    pub route: Vec<String>,
    pub title: String,
    pub charge: i32,
    pub unpaired: u32,
}

/// Defines the interface for reading scaffold and binding-mode structures.
///
/// Implementors handle format-specific parsing of the header and the atom
/// block; assembling a [`Scaffold`] from them is shared.
pub trait StructureInput {
    /// The error type for parsing and I/O operations.
    type Error: Error + From<io::Error>;

    /// Parses the job header.
    ///
    /// # Return
    ///
    /// Returns the header and the index of the first line of the atom block.
    ///
    /// # Errors
    ///
    /// Returns an error if a required header section is missing or malformed.
    fn parse_header(lines: &[String]) -> Result<(JobHeader, usize), Self::Error>;

    /// Parses the atom block starting at `start`, stopping at the first line
    /// that is not an atom line.
    ///
    /// # Errors
    ///
    /// Returns an error if an atom line has too few fields or bad coordinates.
    fn parse_atoms(lines: &[String], start: usize) -> Result<Vec<AtomRecord>, Self::Error>;

    /// Reads every line of a structure file.
    fn read_lines(reader: &mut impl BufRead) -> Result<Vec<String>, Self::Error> {
        let mut lines = Vec::new();
        for line in reader.lines() {
            lines.push(line?);
        }
        Ok(lines)
    }

    /// Reads a header and its atom block.
    fn read_structure(
        reader: &mut impl BufRead,
    ) -> Result<(JobHeader, Vec<AtomRecord>), Self::Error> {
        let lines = Self::read_lines(reader)?;
        let (header, start) = Self::parse_header(&lines)?;
        let atoms = Self::parse_atoms(&lines, start)?;
        Ok((header, atoms))
    }

    /// Reads a scaffold, taking its base charge and spin parity from the header.
    fn read_scaffold(reader: &mut impl BufRead) -> Result<(Scaffold, JobHeader), Self::Error> {
        let (header, atoms) = Self::read_structure(reader)?;
        let scaffold = Scaffold::new(
            header.charge,
            Parity::from_unpaired(header.unpaired),
            atoms,
        );
        Ok((scaffold, header))
    }

    /// Reads a scaffold from a file path.
    fn read_scaffold_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(Scaffold, JobHeader), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_scaffold(&mut reader)
    }
}

/// Defines the interface for writing generated conformers.
///
/// The writer owns every naming and formatting decision for the output.
pub trait StructureWriter {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes one conformer placed on `scaffold` as a complete job.
    ///
    /// # Arguments
    ///
    /// * `conformer` - The generated metal and ligand atoms.
    /// * `scaffold` - The host structure written ahead of the conformer atoms.
    /// * `header` - The scaffold's job header, reused for the generated job.
    /// * `job_name` - Base name used for checkpoint references.
    /// * `writer` - The writer to output to.
    fn write_conformer(
        conformer: &AbstractConformer,
        scaffold: &Scaffold,
        header: &JobHeader,
        job_name: &str,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes one conformer to a file path.
    fn write_conformer_to_path<P: AsRef<Path>>(
        conformer: &AbstractConformer,
        scaffold: &Scaffold,
        header: &JobHeader,
        job_name: &str,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_conformer(conformer, scaffold, header, job_name, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
