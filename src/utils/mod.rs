use std::fs;
use std::io;
use std::io::{BufReader, Read};
use std::path::Path;

use log::trace;
use serde::de::DeserializeOwned;

pub fn toml_from_reader<R, T>(reader: R) -> anyhow::Result<T>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut reader = BufReader::new(reader);
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    Ok(toml::from_str(&data)?)
}

pub fn read(path: impl AsRef<Path>) -> io::Result<Vec<u8>> {
    trace!("reading from: {}", path.as_ref().display());
    fs::read(path)
}

pub fn write(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    trace!("writing to: {}", path.as_ref().display());
    fs::write(path, contents)
}
