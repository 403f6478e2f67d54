//! Version command

use anyhow::{Context, Result, bail};
use semver::VersionReq;

use crate::config::Config;

/// Print the version of `name`, optionally enforcing a requirement
pub fn version(config: &Config, name: &str, require: Option<&str>) -> Result<()> {
    let registry = config.load()?;
    let version = registry.version_of(name)?;

    if let Some(req) = require {
        let req = VersionReq::parse(req).with_context(|| format!("Invalid requirement '{req}'"))?;
        if !registry.satisfies(name, &req)? {
            bail!("{name} {version} does not satisfy {req}");
        }
    }

    println!("{version}");
    Ok(())
}
