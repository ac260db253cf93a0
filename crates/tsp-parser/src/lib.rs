use memmap2::{Advice, Mmap};
use std::{fs::File, path::Path};
use thiserror::Error;
use tsp_core::Instance;

use crate::metadata::{MetaDataParseError, parse_metadata};

pub mod data_section;
pub mod distance_container;
pub mod metadata;

/// Raw bytes of a memory-mapped `.tsp` file, indexed the same way a `&[u8]` slice would be.
pub type FileContent = Mmap;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    MetaDataParsing(#[from] MetaDataParseError),
}

/// Parses a TSPLIB95 `.tsp` file into a symmetric [`Instance`].
///
/// The file is memory-mapped rather than read into a buffer, so instances much larger than
/// available RAM can still be parsed.
pub fn parse_tsp_instance<P: AsRef<Path>>(instance_path: P) -> Result<Instance, ParserError> {
    // Safety: This is the only point at which we access the file, so the file should not be
    // modified for the lifetime of the mapping.
    let mmap = unsafe { Mmap::map(&File::open(instance_path)?)? };
    mmap.advise(Advice::Sequential)?;
    let mut index_in_map = 0;

    let (metadata, data_keyword) = parse_metadata(&mmap, &mut index_in_map)?;
    let distances = data_section::parse_data_sections(&mmap, &mut index_in_map, data_keyword, &metadata);

    Ok(Instance::new(distances, metadata))
}
