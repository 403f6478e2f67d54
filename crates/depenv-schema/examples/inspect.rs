//! Print the contents of a dependency manifest.

use depenv_schema::Registry;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let path = if args.len() > 1 {
        args[1].clone()
    } else {
        depenv_schema::LOCK_FILE.to_string()
    };

    let registry = Registry::load(Path::new(&path))?;
    println!("Manifest: {path}");
    println!("Dependencies ({}):", registry.len());

    for record in &registry {
        println!(" - {} {}", record.name, record.version);
    }

    if let Some(yap) = registry.get("YapDatabase") {
        println!("Found YapDatabase {}!", yap.version);
        for sub in registry.submodules_of("YapDatabase") {
            println!("  sub-module {}", sub.name);
        }
    } else {
        println!("YapDatabase not present in this manifest.");
    }

    Ok(())
}
