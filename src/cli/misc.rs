use std::{fs::File, io::BufReader, path::Path};

use prover_sat::{
    builder::DimacsInfo,
    context::Context,
    structures::literal::Literal,
    types::err::{self},
};

/// Reads the DIMACS formula at `path` into `context`, decompressing files with an `xz` extension.
pub fn load_dimacs(context: &mut Context, path: &Path) -> Result<DimacsInfo, err::ErrorKind> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            println!("c Could not open {}: {e}", path.display());
            return Err(err::ParseError::Io(0).into());
        }
    };

    match path.extension() {
        #[cfg(feature = "xz")]
        Some(extension) if extension == "xz" => {
            context.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(&file)))
        }

        #[cfg(not(feature = "xz"))]
        Some(extension) if extension == "xz" => {
            println!("c Reading xz compressed files requires the 'xz' feature");
            Err(err::ParseError::Io(0).into())
        }

        _ => context.read_dimacs(BufReader::new(&file)),
    }
}

/// `literal` as the name of its variable, prefixed by `-` if negative.
pub fn literal_string(context: &Context, literal: &Literal) -> String {
    let name = context.variable_db.name_of(literal.variable());
    match literal.polarity() {
        true => name.to_string(),
        false => format!("-{name}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prover_sat::config::Config;

    #[test]
    fn missing_file() {
        let mut the_context = Context::from_config(Config::default());
        let path = std::env::temp_dir().join("prover_sat_missing").join("formula.cnf");

        assert_eq!(
            load_dimacs(&mut the_context, &path),
            Err(err::ErrorKind::Parse(err::ParseError::Io(0)))
        );
        assert_eq!(the_context.variable_db.count(), 0);
    }
}
