//! primitivedb command shell
//!
//! Usage:
//!   primitivedb --dir /path/to/db
//!
//! Reads one command per line from stdin until `exit` or end of input.

use clap::Parser;
use std::io::{self, BufRead, ErrorKind, Write};
use std::path::PathBuf;

use primitivedb::{
    config::{Config, DEFAULT_DATA_DIR, DEFAULT_META_FILE},
    display::HELP,
    sql::{engine::Session, executor::ResultSet},
    storage::{engine::Engine, json::JsonEngine},
};

#[derive(Parser, Debug)]
#[command(name = "primitivedb")]
#[command(about = "A small file-backed table store")]
#[command(version)]
struct Args {
    /// Directory holding the metadata file and the data directory
    #[arg(short, long, default_value = ".")]
    dir: PathBuf,

    /// Name of the metadata file
    #[arg(long, default_value = DEFAULT_META_FILE)]
    meta_file: String,

    /// Name of the directory holding table data files
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: String,

    /// Disable the select result cache
    #[arg(long)]
    no_cache: bool,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = Config {
        root: args.dir,
        meta_file: args.meta_file,
        data_dir: args.data_dir,
        cache_enabled: !args.no_cache,
    };
    log::info!("opening database in {}", config.root.display());

    if let Err(e) = run(config) {
        eprintln!("I/O error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> io::Result<()> {
    let mut session = Session::with_config(JsonEngine::new(config.clone()), &config);
    repl(&mut session, io::stdin().lock(), io::stdout())
}

/// Reads commands from `input` until `exit` or end of input, writing every
/// outcome to `output`
fn repl<E: Engine>(
    session: &mut Session<E>,
    mut input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "{}", HELP)?;
    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        match input.read_line(&mut line) {
            Ok(0) => {
                writeln!(output)?;
                break;
            }
            Ok(_) => {}
            // The bad line is consumed, carry on with the next one
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                writeln!(output, "Error: {}", e)?;
                continue;
            }
            Err(e) => return Err(e),
        }

        match session.execute(&line) {
            Ok(Some(ResultSet::Exit)) => {
                writeln!(output, "{}", ResultSet::Exit)?;
                break;
            }
            Ok(Some(result)) => writeln!(output, "{}", result)?,
            Ok(None) => {}
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use primitivedb::{sql::engine::Session, storage::memory::MemoryEngine};

    use super::repl;

    fn run_lines(input: &[u8]) -> io::Result<String> {
        let mut session = Session::new(MemoryEngine::new());
        let mut output = Vec::new();
        repl(&mut session, Cursor::new(input), &mut output)?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    #[test]
    fn test_repl_keeps_going_after_errors() -> io::Result<()> {
        let output = run_lines(b"create_table t v:int\n\xff\xfe\nlaunch\nlist_tables\nexit\nlist_tables\n")?;

        assert!(output.contains("valid UTF-8"));
        assert!(output.contains("Error: "));
        assert!(output.contains("- t"));
        assert!(output.trim_end().ends_with("Bye!"));
        Ok(())
    }

    #[test]
    fn test_repl_stops_at_end_of_input() -> io::Result<()> {
        let output = run_lines(b"create_table t v:int\n")?;
        assert!(output.contains("Table \"t\" created"));
        assert!(output.ends_with("> \n"));
        Ok(())
    }
}
