//! Generates the fixture tables from `locales/<set>/*.json` into `OUT_DIR`.

use std::env;
use std::error::Error;
use std::io::{self, Write};

use calendar_locales::config::GeneratorConfig;
use calendar_locales::pipeline::run;
use camino::Utf8PathBuf;

const LOCALE_SETS: [&str; 2] = ["complete", "edge"];

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = Utf8PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let out_dir = Utf8PathBuf::from(env::var("OUT_DIR")?);
    let taxonomy = manifest_dir.join("taxonomy.toml");

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "cargo::rerun-if-changed=build.rs")?;
    writeln!(stdout, "cargo::rerun-if-changed={taxonomy}")?;

    for set in LOCALE_SETS {
        let locales_dir = manifest_dir.join("locales").join(set);
        writeln!(stdout, "cargo::rerun-if-changed={locales_dir}")?;
        let config = GeneratorConfig {
            locales_dir,
            module_path: out_dir.join(format!("{set}.rs")),
            test_path: out_dir.join(format!("{set}_test.rs")),
            taxonomy: Some(taxonomy.clone()),
        };
        run(&config)?;
    }
    Ok(())
}
