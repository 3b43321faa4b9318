use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::WordgenResult;
use crate::model::alphabet::Alphabet;

/// Reads a whole text file.
///
/// - Reads the entire file into memory
/// - Invalid UTF-8 sequences are replaced, not rejected
pub fn read_text<P: AsRef<Path>>(filename: P) -> WordgenResult<String> {
	let mut bytes = Vec::new();
	File::open(filename)?.read_to_end(&mut bytes)?;
	Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Loads an alphabet from a JSON file.
///
/// Expected form: `{"letters": "abc..."}`, letters in index order.
pub fn load_alphabet<P: AsRef<Path>>(filename: P) -> WordgenResult<Alphabet> {
	let contents = std::fs::read_to_string(filename)?;
	Ok(serde_json::from_str(&contents)?)
}
