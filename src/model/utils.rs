use std::io;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::constants::TOKENIZER_FILENAME;

/// Loads a tokenizer from a model directory or an explicit `tokenizer.json` path.
pub fn load_tokenizer(model_path: &Path) -> io::Result<Tokenizer> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new(TOKENIZER_FILENAME))
    {
        model_path.to_path_buf()
    } else {
        model_path.join(TOKENIZER_FILENAME)
    };

    if !tokenizer_path.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("missing {}", tokenizer_path.display()),
        ));
    }

    Tokenizer::from_file(&tokenizer_path).map_err(io::Error::other)
}
